//! Skill extraction against the shared taxonomy

use crate::processing::normalizer::{normalize_phrase, tokenize, ResumeText};
use crate::processing::taxonomy::SkillTaxonomy;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Skills found in a document, in order of first occurrence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSkills {
    pub skills: IndexSet<String>,
    pub by_category: IndexMap<String, IndexSet<String>>,
}

impl ExtractedSkills {
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.skills.contains(skill)
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.by_category.get(category).is_some_and(|s| !s.is_empty())
    }

    fn insert(&mut self, canonical_name: &str, category: &str) {
        if self.skills.insert(canonical_name.to_string()) {
            self.by_category
                .entry(category.to_string())
                .or_default()
                .insert(canonical_name.to_string());
        }
    }
}

#[derive(Clone)]
pub struct SkillExtractor {
    taxonomy: Arc<SkillTaxonomy>,
}

impl SkillExtractor {
    pub fn new(taxonomy: Arc<SkillTaxonomy>) -> Self {
        Self { taxonomy }
    }

    pub fn taxonomy(&self) -> &SkillTaxonomy {
        &self.taxonomy
    }

    pub fn extract(&self, text: &ResumeText) -> ExtractedSkills {
        let mut extracted = ExtractedSkills::default();
        for (entry, _) in self.taxonomy.find_matches(text.text()) {
            extracted.insert(&entry.canonical_name, &entry.category);
        }
        extracted
    }

    /// Every token that belongs to an extracted skill's name or aliases
    pub fn skill_vocabulary(&self, skills: &ExtractedSkills) -> HashSet<String> {
        skills
            .skills
            .iter()
            .filter_map(|name| self.taxonomy.find(name))
            .flat_map(|entry| entry.phrases())
            .flat_map(|phrase| tokenize(&normalize_phrase(&phrase)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::taxonomy::{SkillTaxonomyEntry, CLOUD_DEVOPS, PROGRAMMING_LANGUAGES};

    fn extractor() -> SkillExtractor {
        SkillExtractor::new(Arc::new(SkillTaxonomy::builtin().unwrap()))
    }

    fn names(skills: &ExtractedSkills) -> Vec<&str> {
        skills.skills.iter().map(|s| s.as_str()).collect()
    }

    #[test]
    fn test_basic_extraction_and_categories() {
        let skills = extractor().extract(&ResumeText::new("Built APIs in Python on AWS with Docker and Kubernetes."));
        assert_eq!(names(&skills), vec!["Python", "AWS", "Docker", "Kubernetes"]);
        assert_eq!(skills.by_category[CLOUD_DEVOPS].len(), 3);
        assert!(skills.has_category(PROGRAMMING_LANGUAGES));
    }

    #[test]
    fn test_aliases_collapse_to_one_skill() {
        let skills = extractor().extract(&ResumeText::new("JS everywhere: javascript, ecmascript and js again"));
        assert_eq!(names(&skills), vec!["JavaScript"]);
        assert_eq!(skills.by_category[PROGRAMMING_LANGUAGES].len(), 1);
    }

    #[test]
    fn test_alias_insensitive_detection() {
        let taxonomy = SkillTaxonomy::from_entries(vec![SkillTaxonomyEntry::new(
            "JavaScript",
            PROGRAMMING_LANGUAGES,
            &["js", "javascript"],
        )])
        .unwrap();
        let extractor = SkillExtractor::new(Arc::new(taxonomy));

        for text in ["Expert in js", "Expert in JavaScript"] {
            let skills = extractor.extract(&ResumeText::new(text));
            assert_eq!(names(&skills), vec!["JavaScript"]);
        }
    }

    #[test]
    fn test_javascript_does_not_match_java() {
        let taxonomy = SkillTaxonomy::from_entries(vec![
            SkillTaxonomyEntry::new("Java", PROGRAMMING_LANGUAGES, &[]),
            SkillTaxonomyEntry::new("JavaScript", PROGRAMMING_LANGUAGES, &[]),
        ])
        .unwrap();
        let extractor = SkillExtractor::new(Arc::new(taxonomy));
        let skills = extractor.extract(&ResumeText::new("javascript"));
        assert_eq!(names(&skills), vec!["JavaScript"]);
    }

    #[test]
    fn test_everyday_words_are_not_skills() {
        let skills = extractor().extract(&ResumeText::new(
            "Handled the rest of the migration and balanced every node in the tree",
        ));
        assert!(skills.is_empty());

        let skills = extractor().extract(&ResumeText::new("Designed RESTful REST APIs in Node.js and nodejs"));
        assert_eq!(names(&skills), vec!["REST API", "Node.js"]);
    }

    #[test]
    fn test_multi_word_skills() {
        let skills = extractor().extract(&ResumeText::new(
            "Pipelines in GitHub Actions; research in machine learning and natural language processing",
        ));
        assert_eq!(names(&skills), vec!["GitHub Actions", "Machine Learning", "NLP"]);
        assert!(!skills.contains("Git"));
    }

    #[test]
    fn test_every_skill_in_exactly_one_bucket() {
        let skills = extractor().extract(&ResumeText::new(
            "python django postgres redis aws docker react leadership git agile pandas",
        ));
        let bucketed: usize = skills.by_category.values().map(|s| s.len()).sum();
        assert_eq!(bucketed, skills.len());
        for skill in &skills.skills {
            let owners = skills.by_category.values().filter(|s| s.contains(skill)).count();
            assert_eq!(owners, 1, "{} must be in exactly one category", skill);
        }
    }

    #[test]
    fn test_empty_and_unknown_documents() {
        let extractor = extractor();
        assert!(extractor.extract(&ResumeText::new("")).is_empty());
        let skills = extractor.extract(&ResumeText::new("cobol fortran mainframe wizardry"));
        assert!(skills.is_empty());
        assert!(skills.by_category.is_empty());
    }

    #[test]
    fn test_skill_vocabulary() {
        let extractor = extractor();
        let skills = extractor.extract(&ResumeText::new("GitHub Actions and Node.js"));
        let vocabulary = extractor.skill_vocabulary(&skills);
        assert!(vocabulary.contains("github"));
        assert!(vocabulary.contains("actions"));
        assert!(vocabulary.contains("nodejs"));
        assert!(vocabulary.contains("node.js"));
    }
}
