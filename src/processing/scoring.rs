//! Resume quality score built from independently bounded sub-scores

use crate::config::{ContentConfig, ScoringConfig};
use crate::processing::contact::Contact;
use crate::processing::experience::ExperienceEstimate;
use crate::processing::quality::{EducationAnalysis, QualityAnalysis};
use crate::processing::skills::ExtractedSkills;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const SKILLS: &str = "skills";
pub const EXPERIENCE: &str = "experience";
pub const CONTACT: &str = "contact";
pub const CONTENT: &str = "content";
pub const EDUCATION: &str = "education";
pub const IMPACT: &str = "impact";

const CONTACT_FIELDS: f64 = 4.0;
const ACTION_VERB_CAP: usize = 5;
const QUANTIFIED_CAP: usize = 3;
const WEAK_PHRASE_CAP: usize = 5;
const WEAK_PHRASE_PENALTY: f64 = 0.1;

/// Everything extracted from one resume that scoring and suggestions look at
#[derive(Debug, Clone, Copy)]
pub struct ResumeSignals<'a> {
    pub skills: &'a ExtractedSkills,
    pub experience: &'a ExperienceEstimate,
    pub contact: &'a Contact,
    pub word_count: usize,
    pub education: &'a EducationAnalysis,
    pub quality: &'a QualityAnalysis,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub total: u32,
    pub components: IndexMap<String, u32>,
}

impl ScoreBreakdown {
    pub fn component(&self, name: &str) -> u32 {
        self.components.get(name).copied().unwrap_or(0)
    }
}

pub struct ScoringEngine {
    scoring: ScoringConfig,
    content: ContentConfig,
}

impl ScoringEngine {
    pub fn new(scoring: ScoringConfig, content: ContentConfig) -> Self {
        Self { scoring, content }
    }

    /// A document without words scores zero on every component
    pub fn score(&self, signals: &ResumeSignals) -> ScoreBreakdown {
        let empty = signals.word_count == 0;
        let weights = &self.scoring;
        let parts = [
            (SKILLS, weights.skills_weight, self.skills_fraction(signals.skills.len())),
            (EXPERIENCE, weights.experience_weight, self.experience_fraction(signals.experience)),
            (CONTACT, weights.contact_weight, signals.contact.present_count() as f64 / CONTACT_FIELDS),
            (CONTENT, weights.content_weight, self.content_fraction(signals.word_count)),
            (EDUCATION, weights.education_weight, education_fraction(signals.education)),
            (IMPACT, weights.impact_weight, impact_fraction(signals.quality)),
        ];

        let components: IndexMap<String, u32> = parts
            .into_iter()
            .map(|(name, weight, fraction)| {
                let points = if empty { 0 } else { contribution(weight, fraction) };
                (name.to_string(), points)
            })
            .collect();
        let total = components.values().sum::<u32>().min(100);

        log::debug!("Score {} from {:?}", total, components);
        ScoreBreakdown { total, components }
    }

    /// 80% of the weight over the first `threshold` skills, the rest over the next `threshold`
    fn skills_fraction(&self, count: usize) -> f64 {
        let threshold = self.scoring.skill_breadth_threshold.max(1) as f64;
        let count = count as f64;
        let primary = count.min(threshold) / threshold;
        let secondary = (count - threshold).clamp(0.0, threshold) / threshold;
        0.8 * primary + 0.2 * secondary
    }

    fn experience_fraction(&self, experience: &ExperienceEstimate) -> f64 {
        match experience.years() {
            Some(years) if years > 0.0 => 1.0,
            _ => self.scoring.missing_experience_ratio,
        }
    }

    /// Rises to full at the ideal minimum, stays full through the ideal maximum, then decays to zero
    fn content_fraction(&self, words: usize) -> f64 {
        let band = &self.content;
        let words = words as f64;
        let min = band.ideal_min_words.max(1) as f64;
        let max = band.ideal_max_words as f64;
        let cap = band.max_words as f64;

        if words < min {
            words / min
        } else if words <= max {
            1.0
        } else if words < cap && cap > max {
            (cap - words) / (cap - max)
        } else {
            0.0
        }
    }
}

fn education_fraction(education: &EducationAnalysis) -> f64 {
    if education.has_degree {
        1.0
    } else if !education.keywords_found.is_empty() {
        0.5
    } else {
        0.0
    }
}

fn impact_fraction(quality: &QualityAnalysis) -> f64 {
    let verbs = quality.action_verb_count.min(ACTION_VERB_CAP) as f64 / ACTION_VERB_CAP as f64;
    let quantified = quality.quantifiable_achievements.min(QUANTIFIED_CAP) as f64 / QUANTIFIED_CAP as f64;
    let penalty = quality.weak_word_count.min(WEAK_PHRASE_CAP) as f64 * WEAK_PHRASE_PENALTY;
    0.5 * verbs + 0.5 * quantified - penalty
}

fn contribution(weight: u32, fraction: f64) -> u32 {
    let value = (weight as f64 * fraction.clamp(0.0, 1.0)).round() as u32;
    value.min(weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::experience::ExperienceSource;
    use indexmap::IndexSet;

    struct Fixture {
        skills: ExtractedSkills,
        experience: ExperienceEstimate,
        contact: Contact,
        word_count: usize,
        education: EducationAnalysis,
        quality: QualityAnalysis,
    }

    impl Fixture {
        fn empty() -> Self {
            Self {
                skills: ExtractedSkills::default(),
                experience: ExperienceEstimate::NotFound,
                contact: Contact::default(),
                word_count: 0,
                education: EducationAnalysis::default(),
                quality: QualityAnalysis::default(),
            }
        }

        fn strong() -> Self {
            let skills = ExtractedSkills {
                skills: (0..25).map(|i| format!("skill{}", i)).collect::<IndexSet<_>>(),
                ..Default::default()
            };
            Self {
                skills,
                experience: ExperienceEstimate::Found {
                    years: 8.0,
                    source: ExperienceSource::ExplicitStatement,
                },
                contact: Contact {
                    email: Some("a@b.io".to_string()),
                    phone: Some("555 123 4567".to_string()),
                    linkedin: Some("linkedin.com/in/a".to_string()),
                    github: Some("github.com/a".to_string()),
                },
                word_count: 600,
                education: EducationAnalysis {
                    keywords_found: vec!["bachelor".to_string()],
                    has_degree: true,
                },
                quality: QualityAnalysis {
                    action_verb_count: 9,
                    quantifiable_achievements: 4,
                    ..Default::default()
                },
            }
        }

        fn signals(&self) -> ResumeSignals<'_> {
            ResumeSignals {
                skills: &self.skills,
                experience: &self.experience,
                contact: &self.contact,
                word_count: self.word_count,
                education: &self.education,
                quality: &self.quality,
            }
        }
    }

    fn engine() -> ScoringEngine {
        ScoringEngine::new(ScoringConfig::default(), ContentConfig::default())
    }

    #[test]
    fn test_empty_resume_scores_zero() {
        let fixture = Fixture::empty();
        let breakdown = engine().score(&fixture.signals());
        assert_eq!(breakdown.components.len(), 6);
        assert!(breakdown.components.values().all(|points| *points == 0));
        assert_eq!(breakdown.total, 0);
    }

    #[test]
    fn test_strong_resume_scores_full() {
        let fixture = Fixture::strong();
        let breakdown = engine().score(&fixture.signals());
        assert_eq!(breakdown.total, 100);
        assert_eq!(breakdown.components.len(), 6);
    }

    #[test]
    fn test_total_is_sum_of_components() {
        let mut fixture = Fixture::strong();
        fixture.word_count = 1000;
        fixture.contact.github = None;
        let breakdown = engine().score(&fixture.signals());
        assert_eq!(breakdown.total, breakdown.components.values().sum::<u32>());
        assert!(breakdown.total < 100);
    }

    #[test]
    fn test_components_bounded_by_weight() {
        let config = ScoringConfig::default();
        let fixture = Fixture::strong();
        let breakdown = engine().score(&fixture.signals());
        assert!(breakdown.component(SKILLS) <= config.skills_weight);
        assert!(breakdown.component(IMPACT) <= config.impact_weight);
        assert!(breakdown.component(CONTENT) <= config.content_weight);
    }

    #[test]
    fn test_skills_have_diminishing_returns() {
        let engine = engine();
        assert_eq!(engine.skills_fraction(0), 0.0);
        assert!((engine.skills_fraction(5) - 0.4).abs() < 1e-9);
        assert!((engine.skills_fraction(10) - 0.8).abs() < 1e-9);
        assert!((engine.skills_fraction(15) - 0.9).abs() < 1e-9);
        assert_eq!(engine.skills_fraction(40), 1.0);
    }

    #[test]
    fn test_content_band_is_not_monotonic() {
        let engine = engine();
        assert_eq!(engine.content_fraction(0), 0.0);
        assert_eq!(engine.content_fraction(200), 0.5);
        assert_eq!(engine.content_fraction(400), 1.0);
        assert_eq!(engine.content_fraction(800), 1.0);
        assert_eq!(engine.content_fraction(1200), 0.5);
        assert_eq!(engine.content_fraction(5000), 0.0);
    }

    #[test]
    fn test_weak_phrases_reduce_impact() {
        let mut fixture = Fixture::strong();
        let before = engine().score(&fixture.signals()).component(IMPACT);
        fixture.quality.weak_word_count = 3;
        let after = engine().score(&fixture.signals()).component(IMPACT);
        assert!(after < before);
    }

    #[test]
    fn test_education_partial_credit() {
        let mut fixture = Fixture::empty();
        fixture.word_count = 120;
        fixture.education.keywords_found = vec!["certified".to_string()];
        let breakdown = engine().score(&fixture.signals());
        assert_eq!(breakdown.component(EDUCATION), 5);
        // words present, so the missing-experience floor applies again
        assert_eq!(breakdown.component(EXPERIENCE), 5);
    }

    #[test]
    fn test_score_is_deterministic() {
        let fixture = Fixture::strong();
        assert_eq!(engine().score(&fixture.signals()), engine().score(&fixture.signals()));
    }
}
