//! Report model wrapping an analysis response with run metadata

use crate::processing::analyzer::{ParseResponse, ResumeAnalyzer};
use crate::processing::experience::ExperienceEstimate;
use crate::processing::scoring;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::SystemTime;

/// One analyzed resume plus where it came from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub response: ParseResponse,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: SystemTime,
    pub analyzer_version: String,
    pub processing_time_ms: u64,
    pub resume_file: String,
    pub job_file: Option<String>,
    pub taxonomy_size: usize,
    /// Maximum points per score component
    pub score_weights: IndexMap<String, u32>,
}

/// Result row for one file of a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchEntry {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ParseResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisReport {
    pub fn new(
        response: ParseResponse,
        resume_file: &Path,
        job_file: Option<&Path>,
        processing_time_ms: u64,
        analyzer: &ResumeAnalyzer,
    ) -> Self {
        let weights = &analyzer.config().scoring;
        let score_weights = [
            (scoring::SKILLS, weights.skills_weight),
            (scoring::EXPERIENCE, weights.experience_weight),
            (scoring::CONTACT, weights.contact_weight),
            (scoring::CONTENT, weights.content_weight),
            (scoring::EDUCATION, weights.education_weight),
            (scoring::IMPACT, weights.impact_weight),
        ]
        .into_iter()
        .map(|(name, weight)| (name.to_string(), weight))
        .collect();

        Self {
            response,
            metadata: ReportMetadata {
                generated_at: SystemTime::now(),
                analyzer_version: env!("CARGO_PKG_VERSION").to_string(),
                processing_time_ms,
                resume_file: resume_file.display().to_string(),
                job_file: job_file.map(|p| p.display().to_string()),
                taxonomy_size: analyzer.taxonomy().len(),
                score_weights,
            },
        }
    }

    pub fn score_label(&self) -> &'static str {
        score_label(self.response.resume_data.resume_score)
    }

    /// Human form of the experience estimate; distinguishes "not found" from zero
    pub fn experience_display(&self) -> String {
        let data = &self.response.resume_data;
        match data.experience {
            Some(ExperienceEstimate::NotFound) => "Not found".to_string(),
            Some(estimate) => estimate.to_string(),
            None if data.experience_years == "0" => "Not found".to_string(),
            None => format!("{} years", data.experience_years),
        }
    }

    pub fn resume_name(&self) -> String {
        file_name(&self.metadata.resume_file)
    }

    pub fn job_name(&self) -> Option<String> {
        self.metadata.job_file.as_deref().map(file_name)
    }
}

impl BatchEntry {
    pub fn from_result(file: &Path, result: crate::error::Result<ParseResponse>) -> Self {
        match result {
            Ok(response) => Self {
                file: file.display().to_string(),
                result: Some(response),
                error: None,
            },
            Err(e) => Self {
                file: file.display().to_string(),
                result: None,
                error: Some(e.to_string()),
            },
        }
    }
}

pub fn score_label(score: u32) -> &'static str {
    match score {
        90..=100 => "Excellent",
        75..=89 => "Strong",
        60..=74 => "Good",
        40..=59 => "Fair",
        _ => "Needs Work",
    }
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_labels() {
        assert_eq!(score_label(100), "Excellent");
        assert_eq!(score_label(80), "Strong");
        assert_eq!(score_label(60), "Good");
        assert_eq!(score_label(45), "Fair");
        assert_eq!(score_label(0), "Needs Work");
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("/tmp/resumes/jane.txt"), "jane.txt");
        assert_eq!(file_name("jane.md"), "jane.md");
    }
}
