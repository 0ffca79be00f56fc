//! Main analysis engine coordinating extraction, scoring, suggestions and job matching

use crate::config::Config;
use crate::error::{AnalyzerError, Result};
use crate::processing::contact::{Contact, ContactExtractor};
use crate::processing::experience::{ExperienceEstimate, ExperienceEstimator};
use crate::processing::keywords::KeywordExtractor;
use crate::processing::matcher::{JobMatcher, MatchResult};
use crate::processing::normalizer::ResumeText;
use crate::processing::quality::{EducationAnalysis, QualityAnalysis, QualityAnalyzer};
use crate::processing::scoring::{ResumeSignals, ScoreBreakdown, ScoringEngine};
use crate::processing::skills::SkillExtractor;
use crate::processing::suggestions::{RuleContext, Suggestion, SuggestionGenerator};
use crate::processing::taxonomy::SkillTaxonomy;
use chrono::{NaiveDate, Utc};
use indexmap::{IndexMap, IndexSet};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;

/// One analysis call: resume text plus an optional (possibly empty) job description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub resume_text: String,
    #[serde(default)]
    pub job_description: String,
}

impl AnalysisRequest {
    pub fn new(resume_text: impl Into<String>) -> Self {
        Self {
            resume_text: resume_text.into(),
            job_description: String::new(),
        }
    }

    pub fn with_job_description(mut self, job_description: impl Into<String>) -> Self {
        self.job_description = job_description.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeData {
    pub skills: Vec<String>,
    pub skills_by_category: IndexMap<String, IndexSet<String>>,
    /// "5", "3.5", or "0" when no experience could be determined
    pub experience_years: String,
    pub keywords: Vec<String>,
    pub contact: Contact,
    pub resume_score: u32,
    pub suggestions: Vec<Suggestion>,
    pub word_count: usize,
    pub score_breakdown: ScoreBreakdown,
    pub education: EducationAnalysis,
    pub quality_analysis: QualityAnalysis,
    #[serde(skip)]
    pub experience: Option<ExperienceEstimate>,
}

/// Wire envelope; the match fields are absent when no job description was given
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResponse {
    pub resume_data: ResumeData,
    #[serde(flatten)]
    pub job_match: Option<MatchResult>,
}

impl ParseResponse {
    pub fn match_score(&self) -> Option<u32> {
        self.job_match.as_ref().map(|m| m.match_score)
    }
}

/// Stateless per request; cheap to share behind an `Arc` across tasks
pub struct ResumeAnalyzer {
    config: Config,
    skill_extractor: SkillExtractor,
    contact_extractor: ContactExtractor,
    experience_estimator: ExperienceEstimator,
    keyword_extractor: KeywordExtractor,
    quality_analyzer: QualityAnalyzer,
    scoring_engine: ScoringEngine,
    suggestion_generator: SuggestionGenerator,
    job_matcher: JobMatcher,
    reference_date: Option<NaiveDate>,
}

impl ResumeAnalyzer {
    /// Validate the configuration and load the skill taxonomy once
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        let taxonomy = Arc::new(SkillTaxonomy::load(&config.taxonomy)?);
        Self::with_taxonomy(config, taxonomy)
    }

    pub fn with_taxonomy(config: &Config, taxonomy: Arc<SkillTaxonomy>) -> Result<Self> {
        info!(
            "Analyzer ready with {} skills in {} categories",
            taxonomy.len(),
            taxonomy.categories().len()
        );

        let skill_extractor = SkillExtractor::new(taxonomy);
        Ok(Self {
            contact_extractor: ContactExtractor::new(),
            experience_estimator: ExperienceEstimator::new(config.extraction.max_experience_years),
            keyword_extractor: KeywordExtractor::new(config.extraction.max_keywords),
            quality_analyzer: QualityAnalyzer::new()?,
            scoring_engine: ScoringEngine::new(config.scoring.clone(), config.content.clone()),
            suggestion_generator: SuggestionGenerator::new(config.suggestions.max_suggestions),
            job_matcher: JobMatcher::new(skill_extractor.clone(), config.extraction.max_keywords),
            skill_extractor,
            config: config.clone(),
            reference_date: None,
        })
    }

    /// Pin the date that "present" resolves to
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn taxonomy(&self) -> &SkillTaxonomy {
        self.skill_extractor.taxonomy()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn analyze(&self, request: &AnalysisRequest) -> Result<ParseResponse> {
        let start_time = Instant::now();

        let limit = self.config.extraction.max_input_chars;
        let length = request.resume_text.chars().count();
        if length > limit {
            return Err(AnalyzerError::InvalidInput(format!(
                "Resume text has {} characters, limit is {}",
                length, limit
            )));
        }

        let text = ResumeText::new(&request.resume_text);
        if text.is_empty() {
            debug!("Empty resume text, every extractor and score component will be empty");
        }

        let skills = self.skill_extractor.extract(&text);
        let contact = self.contact_extractor.extract(text.text());
        let experience = self.experience_estimator.estimate(&text, self.today());
        let keywords = self
            .keyword_extractor
            .extract(text.tokens(), &self.skill_extractor.skill_vocabulary(&skills));
        let education = self.quality_analyzer.analyze_education(&text);
        let quality = self.quality_analyzer.analyze(&text);

        let signals = ResumeSignals {
            skills: &skills,
            experience: &experience,
            contact: &contact,
            word_count: text.word_count(),
            education: &education,
            quality: &quality,
        };
        let score_breakdown = self.scoring_engine.score(&signals);

        let job_match = self
            .job_matcher
            .match_job(&request.job_description, &text, &skills);

        let suggestions = self.suggestion_generator.generate(&RuleContext {
            signals: &signals,
            job_match: job_match.as_ref(),
            thresholds: &self.config.suggestions,
            content: &self.config.content,
            breadth_threshold: self.config.scoring.skill_breadth_threshold,
        });

        debug!(
            "Analyzed {} words: {} skills, experience {}, score {} in {}ms",
            text.word_count(),
            skills.len(),
            experience,
            score_breakdown.total,
            start_time.elapsed().as_millis()
        );

        Ok(ParseResponse {
            resume_data: ResumeData {
                skills: skills.skills.iter().cloned().collect(),
                skills_by_category: skills.by_category,
                experience_years: experience.to_wire(),
                keywords,
                contact,
                resume_score: score_breakdown.total,
                suggestions,
                word_count: text.word_count(),
                score_breakdown,
                education,
                quality_analysis: quality,
                experience: Some(experience),
            },
            job_match,
        })
    }

    /// Analyze requests concurrently on blocking threads; results keep input order
    pub async fn analyze_batch(
        self: Arc<Self>,
        requests: Vec<AnalysisRequest>,
    ) -> Vec<Result<ParseResponse>> {
        let total = requests.len();
        let mut tasks = JoinSet::new();
        for (index, request) in requests.into_iter().enumerate() {
            let analyzer = Arc::clone(&self);
            tasks.spawn_blocking(move || (index, analyzer.analyze(&request)));
        }

        let mut results: Vec<Option<Result<ParseResponse>>> = (0..total).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => results[index] = Some(result),
                Err(e) => log::warn!("Analysis task failed: {}", e),
            }
        }

        info!("Batch of {} analyses finished", total);
        results
            .into_iter()
            .map(|slot| {
                slot.unwrap_or_else(|| Err(AnalyzerError::AnalysisFailed("analysis task did not complete".to_string())))
            })
            .collect()
    }

    fn today(&self) -> NaiveDate {
        self.reference_date.unwrap_or_else(|| Utc::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> ResumeAnalyzer {
        ResumeAnalyzer::new(&Config::default())
            .unwrap()
            .with_reference_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
    }

    #[test]
    fn test_empty_resume_is_well_formed() {
        let response = analyzer().analyze(&AnalysisRequest::new("")).unwrap();
        let data = &response.resume_data;
        assert!(data.skills.is_empty());
        assert!(data.skills_by_category.is_empty());
        assert_eq!(data.experience_years, "0");
        assert!(data.keywords.is_empty());
        assert_eq!(data.contact, Contact::default());
        assert_eq!(data.word_count, 0);
        assert_eq!(data.resume_score, 0);
        assert!(data.score_breakdown.components.values().all(|points| *points == 0));
        assert!(!data.suggestions.is_empty());
        assert!(response.job_match.is_none());
    }

    #[test]
    fn test_scenario() {
        let request = AnalysisRequest::new(
            "jane@example.com\n5+ years of experience in Python, AWS, and Docker",
        )
        .with_job_description("Python, AWS, Kubernetes");
        let response = analyzer().analyze(&request).unwrap();

        let data = &response.resume_data;
        for skill in ["Python", "AWS", "Docker"] {
            assert!(data.skills.contains(&skill.to_string()));
        }
        assert_eq!(data.experience_years, "5");
        assert_eq!(data.contact.email.as_deref(), Some("jane@example.com"));
        assert_eq!(response.match_score(), Some(67));
    }

    #[test]
    fn test_oversized_input_rejected() {
        let mut config = Config::default();
        config.extraction.max_input_chars = 10;
        let analyzer = ResumeAnalyzer::new(&config).unwrap();
        let err = analyzer.analyze(&AnalysisRequest::new("a".repeat(11))).unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidInput(_)));
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let mut config = Config::default();
        config.scoring.impact_weight = 50;
        let err = ResumeAnalyzer::new(&config).err().unwrap();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_json_field_names() {
        let response = analyzer()
            .analyze(&AnalysisRequest::new("Rust developer").with_job_description("rust"))
            .unwrap();
        let value = serde_json::to_value(&response).unwrap();
        let data = &value["resume_data"];
        for field in [
            "skills",
            "skills_by_category",
            "experience_years",
            "keywords",
            "contact",
            "resume_score",
            "suggestions",
            "word_count",
        ] {
            assert!(data.get(field).is_some(), "missing {}", field);
        }
        assert!(data.get("experience").is_none());
        assert_eq!(value["match_score"], 100);

        let without_job = analyzer().analyze(&AnalysisRequest::new("Rust developer")).unwrap();
        let value = serde_json::to_value(&without_job).unwrap();
        assert!(value.get("match_score").is_none());
    }

    #[tokio::test]
    async fn test_batch_keeps_order() {
        let analyzer = Arc::new(analyzer());
        let requests = vec![
            AnalysisRequest::new("python"),
            AnalysisRequest::new(""),
            AnalysisRequest::new("docker kubernetes aws"),
        ];
        let results = analyzer.analyze_batch(requests).await;
        assert_eq!(results.len(), 3);
        let skill_counts: Vec<usize> = results
            .iter()
            .map(|r| r.as_ref().unwrap().resume_data.skills.len())
            .collect();
        assert_eq!(skill_counts, vec![1, 0, 3]);
    }
}
