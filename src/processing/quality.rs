//! Content quality signals: education, action verbs, weak phrasing and measurable results

use crate::error::Result;
use crate::processing::normalizer::{ResumeText, Section};
use crate::processing::phrase::PhraseMatcher;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

const EDUCATION_KEYWORDS: &[&str] = &[
    "bachelor", "bachelors", "bachelor's", "master", "masters", "master's", "phd", "ph.d", "doctorate",
    "mba", "b.tech", "m.tech", "b.sc", "m.sc", "bsc", "msc", "b.e", "m.e", "b.s", "m.s", "bca", "mca",
    "computer science", "engineering", "university", "college", "degree", "diploma",
    "certification", "certified",
];

const DEGREE_KEYWORDS: &[&str] = &[
    "bachelor", "bachelors", "bachelor's", "master", "masters", "master's", "phd", "ph.d", "doctorate",
    "mba", "b.tech", "m.tech", "b.sc", "m.sc", "bsc", "msc", "b.s", "m.s", "degree",
];

const ACTION_VERBS: &[&str] = &[
    "achieved", "implemented", "developed", "designed", "led", "managed", "created", "improved",
    "increased", "decreased", "reduced", "optimized", "built", "launched", "delivered", "executed",
    "spearheaded", "orchestrated", "streamlined", "transformed", "architected", "automated",
    "migrated", "mentored", "shipped",
];

const WEAK_PHRASES: &[&str] = &[
    "responsible for", "duties included", "helped", "assisted", "worked on", "participated",
    "was involved", "familiar with", "exposure to",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationAnalysis {
    pub keywords_found: Vec<String>,
    pub has_degree: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityAnalysis {
    pub word_count: usize,
    pub sentence_count: usize,
    pub action_verbs_used: Vec<String>,
    pub action_verb_count: usize,
    pub weak_words_found: Vec<String>,
    pub weak_word_count: usize,
    pub quantifiable_achievements: usize,
    pub has_summary: bool,
}

pub struct QualityAnalyzer {
    education: PhraseMatcher,
    action_verbs: PhraseMatcher,
    weak_phrases: PhraseMatcher,
    achievement_regex: Regex,
}

impl QualityAnalyzer {
    pub fn new() -> Result<Self> {
        let achievement_regex = Regex::new(
            r"\d+(?:\.\d+)?\s*%|\$\s?\d[\d,.]*\s*(?:k|m|mm|b)?\b|\b\d[\d,]*\+?\s*(?:users|customers|clients|projects|people|engineers|members|requests|transactions|countries|stores|services)\b|\b\d+(?:\.\d+)?x\b",
        )
        .expect("Invalid achievement regex");

        Ok(Self {
            education: PhraseMatcher::new(EDUCATION_KEYWORDS)?,
            action_verbs: PhraseMatcher::new(ACTION_VERBS)?,
            weak_phrases: PhraseMatcher::new(WEAK_PHRASES)?,
            achievement_regex,
        })
    }

    pub fn analyze_education(&self, text: &ResumeText) -> EducationAnalysis {
        let mut keywords_found: Vec<String> = self
            .education
            .count_each(text.text())
            .into_iter()
            .enumerate()
            .filter(|(_, count)| *count > 0)
            .map(|(idx, _)| EDUCATION_KEYWORDS[idx].to_string())
            .collect();
        keywords_found.sort();

        let has_degree = keywords_found
            .iter()
            .any(|k| DEGREE_KEYWORDS.contains(&k.as_str()));

        EducationAnalysis {
            keywords_found,
            has_degree,
        }
    }

    pub fn analyze(&self, text: &ResumeText) -> QualityAnalysis {
        let (action_verbs_used, action_verb_count) = tally(&self.action_verbs, ACTION_VERBS, text.text());
        let (weak_words_found, weak_word_count) = tally(&self.weak_phrases, WEAK_PHRASES, text.text());

        let quantifiable_achievements = self.achievement_regex.find_iter(text.text()).count();

        let sentence_count = text
            .lines()
            .iter()
            .flat_map(|line| line.text.unicode_sentences())
            .filter(|s| s.chars().any(char::is_alphanumeric))
            .count();

        QualityAnalysis {
            word_count: text.word_count(),
            sentence_count,
            action_verbs_used,
            action_verb_count,
            weak_words_found,
            weak_word_count,
            quantifiable_achievements,
            has_summary: text.has_section(Section::Summary),
        }
    }
}

/// Distinct phrases found (in list order) and their total occurrences
fn tally(matcher: &PhraseMatcher, phrases: &[&str], text: &str) -> (Vec<String>, usize) {
    let counts = matcher.count_each(text);
    let found = counts
        .iter()
        .enumerate()
        .filter(|(_, count)| **count > 0)
        .map(|(idx, _)| phrases[idx].to_string())
        .collect();
    (found, counts.iter().sum())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> QualityAnalyzer {
        QualityAnalyzer::new().unwrap()
    }

    #[test]
    fn test_education_with_degree() {
        let text = ResumeText::new("B.Sc in Computer Science, State University");
        let education = analyzer().analyze_education(&text);
        assert!(education.has_degree);
        assert_eq!(education.keywords_found, vec!["b.sc", "computer science", "university"]);
    }

    #[test]
    fn test_education_without_degree() {
        let education = analyzer().analyze_education(&ResumeText::new("AWS Certified Solutions Architect"));
        assert!(!education.has_degree);
        assert_eq!(education.keywords_found, vec!["certified"]);
    }

    #[test]
    fn test_action_verbs_and_weak_phrases() {
        let text = ResumeText::new(
            "Led a team of 6 engineers. Built and launched a billing service. Responsible for on-call. Helped QA.",
        );
        let quality = analyzer().analyze(&text);
        assert_eq!(quality.action_verbs_used, vec!["led", "built", "launched"]);
        assert_eq!(quality.action_verb_count, 3);
        assert_eq!(quality.weak_words_found, vec!["responsible for", "helped"]);
        assert_eq!(quality.weak_word_count, 2);
        assert_eq!(quality.quantifiable_achievements, 1);
        assert_eq!(quality.sentence_count, 4);
    }

    #[test]
    fn test_quantifiable_achievements() {
        let text = ResumeText::new("Cut costs by 30% and saved $120k; served 2,000,000 users; 3x faster builds");
        assert_eq!(analyzer().analyze(&text).quantifiable_achievements, 4);
    }

    #[test]
    fn test_summary_detection() {
        let quality = analyzer().analyze(&ResumeText::new("Profile\nBackend engineer"));
        assert!(quality.has_summary);
        assert!(!analyzer().analyze(&ResumeText::new("Backend engineer")).has_summary);
    }

    #[test]
    fn test_empty_document() {
        let quality = analyzer().analyze(&ResumeText::new(""));
        assert_eq!(quality, QualityAnalysis::default());
        assert_eq!(analyzer().analyze_education(&ResumeText::new("")), EducationAnalysis::default());
    }
}
