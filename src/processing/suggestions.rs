//! Prioritized improvement suggestions from a declarative rule catalog

use crate::config::{ContentConfig, SuggestionConfig};
use crate::processing::matcher::MatchResult;
use crate::processing::scoring::ResumeSignals;
use crate::processing::taxonomy::{CORE_CATEGORIES, PROGRAMMING_LANGUAGES};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub category: String,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub impact: String,
}

/// What a rule may look at
pub struct RuleContext<'a> {
    pub signals: &'a ResumeSignals<'a>,
    pub job_match: Option<&'a MatchResult>,
    pub thresholds: &'a SuggestionConfig,
    pub content: &'a ContentConfig,
    pub breadth_threshold: usize,
}

impl RuleContext<'_> {
    fn has_content(&self) -> bool {
        self.signals.word_count > 0
    }

    fn missing_core_categories(&self) -> Vec<&'static str> {
        CORE_CATEGORIES
            .iter()
            .copied()
            .filter(|category| !self.signals.skills.has_category(category))
            .collect()
    }
}

struct SuggestionRule {
    category: &'static str,
    priority: Priority,
    title: &'static str,
    impact: &'static str,
    fires: fn(&RuleContext) -> bool,
    describe: fn(&RuleContext) -> String,
}

/// Declaration order is the tie-break within a priority
const RULES: &[SuggestionRule] = &[
    SuggestionRule {
        category: "Contact",
        priority: Priority::High,
        title: "Add an Email Address",
        impact: "Required for recruiters to reach you",
        fires: |ctx| ctx.signals.contact.email.is_none(),
        describe: |_| "No email address was found. Put a professional email at the top of your resume.".to_string(),
    },
    SuggestionRule {
        category: "Skills",
        priority: Priority::High,
        title: "Add More Technical Skills",
        impact: "+10-15% match score",
        fires: |ctx| ctx.signals.skills.len() < ctx.thresholds.min_skills,
        describe: |ctx| {
            format!(
                "Your resume only mentions {} recognized skills. Aim for 8-12 relevant skills to improve visibility.",
                ctx.signals.skills.len()
            )
        },
    },
    SuggestionRule {
        category: "Experience",
        priority: Priority::High,
        title: "State Your Experience",
        impact: "+10% score",
        fires: |ctx| !ctx.signals.experience.is_found(),
        describe: |_| {
            "Years of experience could not be determined. Add dated roles (e.g. 'Jan 2020 - Present') or a line such as '5+ years of experience'.".to_string()
        },
    },
    SuggestionRule {
        category: "Content",
        priority: Priority::High,
        title: "Expand Resume Content",
        impact: "+15% completeness",
        fires: |ctx| ctx.signals.word_count < ctx.content.ideal_min_words,
        describe: |ctx| {
            format!(
                "Your resume has only {} words. Aim for {}-{} words with detailed descriptions.",
                ctx.signals.word_count, ctx.content.ideal_min_words, ctx.content.ideal_max_words
            )
        },
    },
    SuggestionRule {
        category: "Language",
        priority: Priority::High,
        title: "Replace Weak Phrases",
        impact: "+5-8% readability",
        fires: |ctx| ctx.signals.quality.weak_word_count > 0,
        describe: |ctx| {
            let found: Vec<&str> = ctx
                .signals
                .quality
                .weak_words_found
                .iter()
                .take(3)
                .map(String::as_str)
                .collect();
            format!(
                "Found weak phrases: {}. Replace them with strong action verbs like 'achieved', 'implemented', 'led'.",
                found.join(", ")
            )
        },
    },
    SuggestionRule {
        category: "Achievements",
        priority: Priority::High,
        title: "Add Quantifiable Results",
        impact: "+10-20% credibility",
        fires: |ctx| {
            ctx.has_content() && ctx.signals.quality.quantifiable_achievements < ctx.thresholds.min_quantified_results
        },
        describe: |_| {
            "Include numbers and metrics: 'Increased performance by 40%', 'Managed team of 5', 'Reduced costs by $10K'.".to_string()
        },
    },
    SuggestionRule {
        category: "Job Match",
        priority: Priority::High,
        title: "Add Missing Job Skills",
        impact: "+5-15% match score",
        fires: |ctx| {
            ctx.job_match.is_some_and(|m| {
                m.match_score < ctx.thresholds.match_threshold && !m.missing_skills.is_empty()
            })
        },
        describe: |ctx| {
            let missing: Vec<&str> = ctx
                .job_match
                .map(|m| m.missing_skills.iter().take(5).map(String::as_str).collect())
                .unwrap_or_default();
            format!(
                "The job description asks for skills your resume does not show: {}. Add them if you have the experience.",
                missing.join(", ")
            )
        },
    },
    SuggestionRule {
        category: "Skills",
        priority: Priority::Medium,
        title: "Broaden Your Technical Skill Set",
        impact: "+5-10% match score",
        fires: |ctx| {
            ctx.signals.skills.len() < ctx.breadth_threshold && !ctx.missing_core_categories().is_empty()
        },
        describe: |ctx| {
            let names: Vec<String> = ctx
                .missing_core_categories()
                .iter()
                .map(|c| c.replace('_', " "))
                .collect();
            format!(
                "No skills found for: {}. List the ones you have worked with.",
                names.join(", ")
            )
        },
    },
    SuggestionRule {
        category: "Contact",
        priority: Priority::Medium,
        title: "Add a Phone Number",
        impact: "Easier recruiter contact",
        fires: |ctx| ctx.signals.contact.phone.is_none(),
        describe: |_| "No phone number was found. Add one next to your email.".to_string(),
    },
    SuggestionRule {
        category: "Language",
        priority: Priority::Medium,
        title: "Use More Action Verbs",
        impact: "+5% impact",
        fires: |ctx| ctx.has_content() && ctx.signals.quality.action_verb_count < ctx.thresholds.min_action_verbs,
        describe: |_| {
            "Start bullet points with strong action verbs: 'Developed', 'Implemented', 'Optimized', 'Streamlined', 'Delivered'.".to_string()
        },
    },
    SuggestionRule {
        category: "Education",
        priority: Priority::Medium,
        title: "Highlight Education",
        impact: "+3-5% completeness",
        fires: |ctx| !ctx.signals.education.has_degree,
        describe: |_| "Ensure your education section clearly states your degree, major and institution.".to_string(),
    },
    SuggestionRule {
        category: "Content",
        priority: Priority::Low,
        title: "Tighten Resume Length",
        impact: "+5% readability",
        fires: |ctx| ctx.signals.word_count > ctx.content.ideal_max_words,
        describe: |ctx| {
            format!(
                "Your resume has {} words. Trim it toward {} words by cutting older or less relevant detail.",
                ctx.signals.word_count, ctx.content.ideal_max_words
            )
        },
    },
    SuggestionRule {
        category: "Contact",
        priority: Priority::Low,
        title: "Add Your LinkedIn Profile",
        impact: "+3% completeness",
        fires: |ctx| ctx.signals.contact.linkedin.is_none(),
        describe: |_| "Include a linkedin.com/in/ URL so recruiters can verify your history.".to_string(),
    },
    SuggestionRule {
        category: "Contact",
        priority: Priority::Low,
        title: "Link Your GitHub",
        impact: "+3% credibility",
        fires: |ctx| {
            ctx.signals.skills.has_category(PROGRAMMING_LANGUAGES) && ctx.signals.contact.github.is_none()
        },
        describe: |_| "You list programming languages but no GitHub profile. Link one to show your code.".to_string(),
    },
    SuggestionRule {
        category: "Format",
        priority: Priority::Low,
        title: "Add Professional Summary",
        impact: "+5% first impression",
        fires: |ctx| !ctx.signals.quality.has_summary,
        describe: |_| {
            "Start with a 2-3 sentence summary highlighting your experience level, key skills and career goals.".to_string()
        },
    },
];

pub struct SuggestionGenerator {
    max_suggestions: usize,
}

impl SuggestionGenerator {
    pub fn new(max_suggestions: usize) -> Self {
        Self { max_suggestions }
    }

    pub fn generate(&self, ctx: &RuleContext) -> Vec<Suggestion> {
        let mut suggestions: Vec<Suggestion> = RULES
            .iter()
            .filter(|rule| (rule.fires)(ctx))
            .map(|rule| Suggestion {
                category: rule.category.to_string(),
                priority: rule.priority,
                title: rule.title.to_string(),
                description: (rule.describe)(ctx),
                impact: rule.impact.to_string(),
            })
            .collect();

        // sort_by_key is stable, so declaration order survives within a priority
        suggestions.sort_by_key(|s| s.priority);
        suggestions.truncate(self.max_suggestions);
        suggestions
    }
}
