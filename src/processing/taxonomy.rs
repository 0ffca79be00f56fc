//! Skill taxonomy: canonical skills, their categories and recognized aliases
//!
//! The taxonomy is built once at startup and shared read-only (behind an `Arc`)
//! by every analysis request.

use crate::config::TaxonomyConfig;
use crate::error::{AnalyzerError, Result};
use crate::processing::normalizer::normalize_phrase;
use crate::processing::phrase::{PhraseMatch, PhraseMatcher};
use indexmap::{IndexMap, IndexSet};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const PROGRAMMING_LANGUAGES: &str = "programming_languages";
pub const WEB_TECHNOLOGIES: &str = "web_technologies";
pub const DATABASES: &str = "databases";
pub const CLOUD_DEVOPS: &str = "cloud_devops";
pub const DATA_ML: &str = "data_ml";
pub const TOOLS_PRACTICES: &str = "tools_practices";
pub const SOFT_SKILLS: &str = "soft_skills";

/// Categories whose absence is worth pointing out to a technical candidate
pub const CORE_CATEGORIES: &[&str] = &[PROGRAMMING_LANGUAGES, WEB_TECHNOLOGIES, DATABASES, CLOUD_DEVOPS];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillTaxonomyEntry {
    #[serde(alias = "name")]
    pub canonical_name: String,
    pub category: String,
    #[serde(default)]
    pub aliases: IndexSet<String>,
}

#[derive(Debug, Deserialize)]
struct TaxonomyFile {
    #[serde(default)]
    skills: Vec<SkillTaxonomyEntry>,
}

#[derive(Debug, Clone)]
pub struct SkillTaxonomy {
    entries: Vec<SkillTaxonomyEntry>,
    categories: Vec<String>,
    matcher: PhraseMatcher,
    /// Phrase index -> entry index
    phrase_owner: Vec<usize>,
    lookup: IndexMap<String, usize>,
}

impl SkillTaxonomyEntry {
    pub fn new(canonical_name: &str, category: &str, aliases: &[&str]) -> Self {
        Self {
            canonical_name: canonical_name.to_string(),
            category: category.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Canonical name and aliases, normalized and deduplicated
    pub fn phrases(&self) -> IndexSet<String> {
        std::iter::once(&self.canonical_name)
            .chain(self.aliases.iter())
            .map(|p| normalize_phrase(p))
            .filter(|p| !p.is_empty())
            .collect()
    }
}

impl SkillTaxonomy {
    /// Build a taxonomy, rejecting empty catalogs and aliases claimed by two skills
    pub fn from_entries(entries: Vec<SkillTaxonomyEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(AnalyzerError::Taxonomy("Skill taxonomy is empty".to_string()));
        }

        let mut categories: Vec<String> = Vec::new();
        let mut lookup: IndexMap<String, usize> = IndexMap::new();
        let mut phrases = Vec::new();
        let mut phrase_owner = Vec::new();

        for (idx, entry) in entries.iter().enumerate() {
            if entry.canonical_name.trim().is_empty() {
                return Err(AnalyzerError::Taxonomy(format!("Entry #{} has an empty name", idx + 1)));
            }
            if entry.category.trim().is_empty() {
                return Err(AnalyzerError::Taxonomy(format!(
                    "Skill '{}' has an empty category",
                    entry.canonical_name
                )));
            }
            if !categories.contains(&entry.category) {
                categories.push(entry.category.clone());
            }

            for phrase in entry.phrases() {
                if let Some(&owner) = lookup.get(&phrase) {
                    return Err(AnalyzerError::Taxonomy(format!(
                        "Alias '{}' is claimed by both '{}' and '{}'",
                        phrase, entries[owner].canonical_name, entry.canonical_name
                    )));
                }
                lookup.insert(phrase.clone(), idx);
                phrases.push(phrase);
                phrase_owner.push(idx);
            }
        }

        let matcher = PhraseMatcher::new(&phrases)?;
        debug!(
            "Built skill taxonomy: {} skills, {} phrases, {} categories",
            entries.len(),
            phrases.len(),
            categories.len()
        );

        Ok(Self {
            entries,
            categories,
            matcher,
            phrase_owner,
            lookup,
        })
    }

    pub fn builtin() -> Result<Self> {
        Self::from_entries(builtin_entries())
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: TaxonomyFile = toml::from_str(content)
            .map_err(|e| AnalyzerError::Taxonomy(format!("Failed to parse taxonomy: {}", e)))?;
        Self::from_entries(file.skills)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalyzerError::Taxonomy(format!("Failed to read taxonomy '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load the taxonomy described by the configuration.
    ///
    /// Custom entries replace built-in entries with the same canonical name.
    pub fn load(config: &TaxonomyConfig) -> Result<Self> {
        let mut entries = if config.include_builtin {
            builtin_entries()
        } else {
            Vec::new()
        };

        if let Some(path) = &config.custom_path {
            let custom = Self::from_path(path)?;
            info!("Loaded {} custom skills from {}", custom.len(), path.display());
            for entry in custom.entries {
                match entries
                    .iter_mut()
                    .find(|e| e.canonical_name.eq_ignore_ascii_case(&entry.canonical_name))
                {
                    Some(existing) => *existing = entry,
                    None => entries.push(entry),
                }
            }
        }

        Self::from_entries(entries)
    }

    /// Whole-word taxonomy hits in document order, as (entry, match) pairs
    pub fn find_matches<'a>(&'a self, text: &str) -> impl Iterator<Item = (&'a SkillTaxonomyEntry, PhraseMatch)> + 'a {
        self.matcher
            .find_all(text)
            .into_iter()
            .map(move |m| (&self.entries[self.phrase_owner[m.phrase]], m))
    }

    /// Resolve a canonical name or alias to its entry
    pub fn find(&self, phrase: &str) -> Option<&SkillTaxonomyEntry> {
        self.lookup.get(&normalize_phrase(phrase)).map(|&idx| &self.entries[idx])
    }

    pub fn entries(&self) -> &[SkillTaxonomyEntry] {
        &self.entries
    }

    /// Categories in declaration order
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn entries_in<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a SkillTaxonomyEntry> + 'a {
        self.entries.iter().filter(move |e| e.category == category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn builtin_entries() -> Vec<SkillTaxonomyEntry> {
    use SkillTaxonomyEntry as E;

    vec![
        // Programming languages
        E::new("Python", PROGRAMMING_LANGUAGES, &["python3"]),
        E::new("Java", PROGRAMMING_LANGUAGES, &[]),
        E::new("JavaScript", PROGRAMMING_LANGUAGES, &["js", "ecmascript", "es6"]),
        E::new("TypeScript", PROGRAMMING_LANGUAGES, &["ts"]),
        E::new("C++", PROGRAMMING_LANGUAGES, &["cpp"]),
        E::new("C#", PROGRAMMING_LANGUAGES, &["csharp", "c sharp"]),
        E::new("Ruby", PROGRAMMING_LANGUAGES, &[]),
        E::new("Go", PROGRAMMING_LANGUAGES, &["golang"]),
        E::new("Rust", PROGRAMMING_LANGUAGES, &["rustlang"]),
        E::new("PHP", PROGRAMMING_LANGUAGES, &[]),
        E::new("Swift", PROGRAMMING_LANGUAGES, &[]),
        E::new("Kotlin", PROGRAMMING_LANGUAGES, &[]),
        E::new("Scala", PROGRAMMING_LANGUAGES, &[]),
        E::new("R", PROGRAMMING_LANGUAGES, &[]),
        E::new("MATLAB", PROGRAMMING_LANGUAGES, &[]),
        E::new("Perl", PROGRAMMING_LANGUAGES, &[]),
        E::new("Bash", PROGRAMMING_LANGUAGES, &["shell scripting"]),
        // Web technologies
        E::new("React", WEB_TECHNOLOGIES, &["reactjs", "react.js"]),
        E::new("Angular", WEB_TECHNOLOGIES, &["angularjs"]),
        E::new("Vue", WEB_TECHNOLOGIES, &["vuejs", "vue.js"]),
        E::new("Next.js", WEB_TECHNOLOGIES, &["nextjs"]),
        E::new("Node.js", WEB_TECHNOLOGIES, &["nodejs"]),
        E::new("Express", WEB_TECHNOLOGIES, &["expressjs", "express.js"]),
        E::new("Django", WEB_TECHNOLOGIES, &[]),
        E::new("Flask", WEB_TECHNOLOGIES, &[]),
        E::new("FastAPI", WEB_TECHNOLOGIES, &[]),
        E::new("Spring", WEB_TECHNOLOGIES, &["spring boot"]),
        E::new("Rails", WEB_TECHNOLOGIES, &["ruby on rails"]),
        E::new("Laravel", WEB_TECHNOLOGIES, &[]),
        E::new("ASP.NET", WEB_TECHNOLOGIES, &[".net", "dotnet"]),
        E::new("HTML", WEB_TECHNOLOGIES, &["html5"]),
        E::new("CSS", WEB_TECHNOLOGIES, &["css3"]),
        E::new("Sass", WEB_TECHNOLOGIES, &["scss"]),
        E::new("Tailwind", WEB_TECHNOLOGIES, &["tailwindcss", "tailwind css"]),
        E::new("Bootstrap", WEB_TECHNOLOGIES, &[]),
        E::new("jQuery", WEB_TECHNOLOGIES, &[]),
        E::new("Webpack", WEB_TECHNOLOGIES, &[]),
        E::new("Vite", WEB_TECHNOLOGIES, &[]),
        // Databases
        E::new("SQL", DATABASES, &[]),
        E::new("MySQL", DATABASES, &[]),
        E::new("PostgreSQL", DATABASES, &["postgres", "psql"]),
        E::new("MongoDB", DATABASES, &["mongo"]),
        E::new("Redis", DATABASES, &[]),
        E::new("Elasticsearch", DATABASES, &["elastic search"]),
        E::new("DynamoDB", DATABASES, &[]),
        E::new("Firebase", DATABASES, &[]),
        E::new("Oracle", DATABASES, &[]),
        E::new("SQLite", DATABASES, &[]),
        E::new("Cassandra", DATABASES, &[]),
        E::new("Neo4j", DATABASES, &[]),
        E::new("MariaDB", DATABASES, &[]),
        E::new("Supabase", DATABASES, &[]),
        // Cloud and DevOps
        E::new("AWS", CLOUD_DEVOPS, &["amazon web services"]),
        E::new("Azure", CLOUD_DEVOPS, &["microsoft azure"]),
        E::new("GCP", CLOUD_DEVOPS, &["google cloud", "google cloud platform"]),
        E::new("Docker", CLOUD_DEVOPS, &[]),
        E::new("Kubernetes", CLOUD_DEVOPS, &["k8s"]),
        E::new("Terraform", CLOUD_DEVOPS, &[]),
        E::new("Jenkins", CLOUD_DEVOPS, &[]),
        E::new("GitHub Actions", CLOUD_DEVOPS, &[]),
        E::new("CI/CD", CLOUD_DEVOPS, &["cicd", "continuous integration", "continuous delivery"]),
        E::new("Ansible", CLOUD_DEVOPS, &[]),
        E::new("Puppet", CLOUD_DEVOPS, &[]),
        E::new("Chef", CLOUD_DEVOPS, &[]),
        E::new("Nginx", CLOUD_DEVOPS, &[]),
        E::new("Apache", CLOUD_DEVOPS, &[]),
        E::new("Linux", CLOUD_DEVOPS, &[]),
        E::new("Unix", CLOUD_DEVOPS, &[]),
        E::new("Cloudflare", CLOUD_DEVOPS, &[]),
        E::new("Heroku", CLOUD_DEVOPS, &[]),
        E::new("Vercel", CLOUD_DEVOPS, &[]),
        E::new("Netlify", CLOUD_DEVOPS, &[]),
        // Data and machine learning
        E::new("Machine Learning", DATA_ML, &["ml"]),
        E::new("Deep Learning", DATA_ML, &[]),
        E::new("NLP", DATA_ML, &["natural language processing"]),
        E::new("Computer Vision", DATA_ML, &[]),
        E::new("TensorFlow", DATA_ML, &[]),
        E::new("PyTorch", DATA_ML, &[]),
        E::new("scikit-learn", DATA_ML, &["sklearn", "scikit learn"]),
        E::new("Pandas", DATA_ML, &[]),
        E::new("NumPy", DATA_ML, &[]),
        E::new("Spark", DATA_ML, &["apache spark", "pyspark"]),
        E::new("Hadoop", DATA_ML, &[]),
        E::new("Data Analysis", DATA_ML, &["data analytics"]),
        E::new("Data Science", DATA_ML, &[]),
        E::new("Neural Networks", DATA_ML, &["neural network"]),
        E::new("Keras", DATA_ML, &[]),
        E::new("OpenCV", DATA_ML, &[]),
        E::new("Hugging Face", DATA_ML, &["huggingface"]),
        E::new("LLM", DATA_ML, &["llms", "large language models"]),
        E::new("AI", DATA_ML, &["artificial intelligence"]),
        // Tools and practices
        E::new("Git", TOOLS_PRACTICES, &[]),
        E::new("Agile", TOOLS_PRACTICES, &[]),
        E::new("Scrum", TOOLS_PRACTICES, &[]),
        E::new("REST API", TOOLS_PRACTICES, &["rest apis", "restful"]),
        E::new("GraphQL", TOOLS_PRACTICES, &[]),
        E::new("Microservices", TOOLS_PRACTICES, &["microservice"]),
        E::new("API Design", TOOLS_PRACTICES, &[]),
        E::new("Unit Testing", TOOLS_PRACTICES, &["unit tests"]),
        E::new("Integration Testing", TOOLS_PRACTICES, &["integration tests"]),
        E::new("TDD", TOOLS_PRACTICES, &["test driven development", "test-driven development"]),
        E::new("BDD", TOOLS_PRACTICES, &["behavior driven development"]),
        E::new("Jira", TOOLS_PRACTICES, &[]),
        E::new("Confluence", TOOLS_PRACTICES, &[]),
        E::new("Figma", TOOLS_PRACTICES, &[]),
        E::new("Postman", TOOLS_PRACTICES, &[]),
        E::new("Swagger", TOOLS_PRACTICES, &["openapi"]),
        // Soft skills
        E::new("Leadership", SOFT_SKILLS, &[]),
        E::new("Communication", SOFT_SKILLS, &[]),
        E::new("Problem Solving", SOFT_SKILLS, &["problem-solving"]),
        E::new("Teamwork", SOFT_SKILLS, &["collaboration"]),
        E::new("Project Management", SOFT_SKILLS, &[]),
        E::new("Critical Thinking", SOFT_SKILLS, &[]),
        E::new("Time Management", SOFT_SKILLS, &[]),
        E::new("Creativity", SOFT_SKILLS, &[]),
        E::new("Adaptability", SOFT_SKILLS, &[]),
        E::new("Mentoring", SOFT_SKILLS, &["mentorship"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_taxonomy_is_valid() {
        let taxonomy = SkillTaxonomy::builtin().unwrap();
        assert!(taxonomy.len() > 100);
        assert_eq!(taxonomy.categories().len(), 7);
        assert_eq!(taxonomy.categories()[0], PROGRAMMING_LANGUAGES);
    }

    #[test]
    fn test_alias_lookup() {
        let taxonomy = SkillTaxonomy::builtin().unwrap();
        assert_eq!(taxonomy.find("js").unwrap().canonical_name, "JavaScript");
        assert_eq!(taxonomy.find("K8S").unwrap().canonical_name, "Kubernetes");
        assert_eq!(taxonomy.find("Node.js").unwrap().category, WEB_TECHNOLOGIES);
        assert!(taxonomy.find("cobol").is_none());
    }

    #[test]
    fn test_empty_taxonomy_is_rejected() {
        let err = SkillTaxonomy::from_entries(Vec::new()).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_conflicting_alias_is_rejected() {
        let entries = vec![
            SkillTaxonomyEntry::new("Go", PROGRAMMING_LANGUAGES, &["golang"]),
            SkillTaxonomyEntry::new("Golang Tools", TOOLS_PRACTICES, &["GoLang"]),
        ];
        let err = SkillTaxonomy::from_entries(entries).unwrap_err();
        assert!(matches!(err, AnalyzerError::Taxonomy(_)));
    }

    #[test]
    fn test_toml_taxonomy() {
        let taxonomy = SkillTaxonomy::from_toml_str(
            r#"
            [[skills]]
            name = "Elixir"
            category = "programming_languages"
            aliases = ["ex"]

            [[skills]]
            canonical_name = "Phoenix"
            category = "web_technologies"
            "#,
        )
        .unwrap();
        assert_eq!(taxonomy.len(), 2);
        assert_eq!(taxonomy.find("ex").unwrap().canonical_name, "Elixir");
    }

    #[test]
    fn test_malformed_toml_is_taxonomy_error() {
        let err = SkillTaxonomy::from_toml_str("[[skills]]\nname = 3").unwrap_err();
        assert!(matches!(err, AnalyzerError::Taxonomy(_)));
    }

    #[test]
    fn test_load_merges_custom_entries() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[[skills]]\nname = \"Elixir\"\ncategory = \"programming_languages\"\n\n[[skills]]\nname = \"python\"\ncategory = \"scripting\"\naliases = [\"py\"]"
        )
        .unwrap();

        let config = TaxonomyConfig {
            custom_path: Some(file.path().to_path_buf()),
            include_builtin: true,
        };
        let taxonomy = SkillTaxonomy::load(&config).unwrap();
        assert!(taxonomy.find("elixir").is_some());
        assert_eq!(taxonomy.find("py").unwrap().category, "scripting");
        assert!(taxonomy.find("java").is_some());
    }

    #[test]
    fn test_missing_custom_file_is_fatal() {
        let config = TaxonomyConfig {
            custom_path: Some("/definitely/not/here.toml".into()),
            include_builtin: true,
        };
        assert!(SkillTaxonomy::load(&config).unwrap_err().is_fatal());
    }

    #[test]
    fn test_find_matches_in_document_order() {
        let taxonomy = SkillTaxonomy::builtin().unwrap();
        let names: Vec<&str> = taxonomy
            .find_matches("docker, then python and js")
            .map(|(entry, _)| entry.canonical_name.as_str())
            .collect();
        assert_eq!(names, vec!["Docker", "Python", "JavaScript"]);
    }
}
