//! Resume coverage of a job description's skills and keywords

use crate::processing::keywords::KeywordExtractor;
use crate::processing::normalizer::ResumeText;
use crate::processing::skills::{ExtractedSkills, SkillExtractor};
use serde::{Deserialize, Serialize};

const SKILL_SHARE: f64 = 0.75;
const KEYWORD_SHARE: f64 = 0.25;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub match_score: u32,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

pub struct JobMatcher {
    skill_extractor: SkillExtractor,
    keyword_extractor: KeywordExtractor,
}

impl JobMatcher {
    pub fn new(skill_extractor: SkillExtractor, max_keywords: usize) -> Self {
        Self {
            skill_extractor,
            keyword_extractor: KeywordExtractor::new(max_keywords),
        }
    }

    /// Score how much of the job description the resume covers.
    ///
    /// Returns `None` for a blank job description so callers can omit the
    /// field entirely instead of reporting a 0% match.
    pub fn match_job(
        &self,
        job_description: &str,
        resume: &ResumeText,
        resume_skills: &ExtractedSkills,
    ) -> Option<MatchResult> {
        if job_description.trim().is_empty() {
            return None;
        }

        let job = ResumeText::new(job_description);
        let job_skills = self.skill_extractor.extract(&job);
        let job_keywords = self
            .keyword_extractor
            .extract(job.tokens(), &self.skill_extractor.skill_vocabulary(&job_skills));

        let (matched_skills, missing_skills): (Vec<String>, Vec<String>) = job_skills
            .skills
            .iter()
            .cloned()
            .partition(|skill| resume_skills.contains(skill));

        let resume_vocabulary = self.keyword_extractor.vocabulary(resume.tokens());
        let keyword_hits = job_keywords
            .iter()
            .filter(|k| resume_vocabulary.contains(k.as_str()))
            .count();

        let skill_coverage = coverage(matched_skills.len(), job_skills.len());
        let keyword_coverage = coverage(keyword_hits, job_keywords.len());

        let score = match (skill_coverage, keyword_coverage) {
            (Some(skills), Some(keywords)) => SKILL_SHARE * skills + KEYWORD_SHARE * keywords,
            (Some(skills), None) => skills,
            (None, Some(keywords)) => keywords,
            (None, None) => 0.0,
        };
        let match_score = ((score * 100.0).round() as u32).min(100);

        log::debug!(
            "Job match {}%: {}/{} skills, {}/{} keywords",
            match_score,
            matched_skills.len(),
            job_skills.len(),
            keyword_hits,
            job_keywords.len()
        );

        Some(MatchResult {
            match_score,
            matched_skills,
            missing_skills,
        })
    }
}

fn coverage(hits: usize, total: usize) -> Option<f64> {
    (total > 0).then(|| hits as f64 / total as f64)
}
