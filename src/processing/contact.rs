//! Contact field extraction (email, phone, LinkedIn, GitHub)

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Independently extracted contact fields; absence is a valid result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

impl Contact {
    pub fn present_count(&self) -> usize {
        [&self.email, &self.phone, &self.linkedin, &self.github]
            .iter()
            .filter(|f| f.is_some())
            .count()
    }
}

pub struct ContactExtractor {
    email_regex: Regex,
    phone_regex: Regex,
    date_regex: Regex,
    linkedin_regex: Regex,
    github_regex: Regex,
}

impl Default for ContactExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactExtractor {
    pub fn new() -> Self {
        let email_regex = Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
            .expect("Invalid email regex");

        let phone_regex = Regex::new(r"\+?(?:\(\d{1,4}\)|\d{1,4})(?:[ .-]?(?:\(\d{1,4}\)|\d{1,4})){1,5}")
            .expect("Invalid phone regex");

        let date_regex = Regex::new(
            r"^(?:19|20)\d{2}(?:(?:\s*-\s*|\s+)(?:19|20)\d{2}|[-.]\d{1,2}(?:[-.]\d{1,2})?)$",
        )
        .expect("Invalid date regex");

        let linkedin_regex = Regex::new(r"(?i)(?:https?://)?(?:[a-z]{2,3}\.)?linkedin\.com/(?:in|pub)/[a-z0-9_-]+")
            .expect("Invalid LinkedIn regex");

        let github_regex = Regex::new(r"(?i)(?:https?://)?(?:www\.)?github\.com/[a-z0-9](?:[a-z0-9-]{0,38})")
            .expect("Invalid GitHub regex");

        Self {
            email_regex,
            phone_regex,
            date_regex,
            linkedin_regex,
            github_regex,
        }
    }

    pub fn extract(&self, text: &str) -> Contact {
        Contact {
            email: self.extract_email(text),
            phone: self.extract_phone(text),
            linkedin: self.extract_linkedin(text),
            github: self.extract_github(text),
        }
    }

    pub fn extract_email(&self, text: &str) -> Option<String> {
        self.email_regex.find(text).map(|m| m.as_str().to_string())
    }

    /// First digit run of 7-15 digits that is not glued to other text and is not a year range or date
    pub fn extract_phone(&self, text: &str) -> Option<String> {
        self.phone_regex
            .find_iter(text)
            .filter(|m| {
                let before = text[..m.start()].chars().next_back();
                let after = text[m.end()..].chars().next();
                !before.is_some_and(|c| c.is_alphanumeric() || c == '/' || c == '@')
                    && !after.is_some_and(|c| c.is_alphanumeric() || c == '/' || c == '@')
            })
            .map(|m| m.as_str().trim())
            .find(|candidate| {
                let digits = candidate.chars().filter(|c| c.is_ascii_digit()).count();
                (7..=15).contains(&digits) && !self.date_regex.is_match(candidate)
            })
            .map(|candidate| candidate.to_string())
    }

    pub fn extract_linkedin(&self, text: &str) -> Option<String> {
        self.linkedin_regex
            .find(text)
            .map(|m| m.as_str().to_lowercase())
    }

    pub fn extract_github(&self, text: &str) -> Option<String> {
        self.github_regex
            .find(text)
            .map(|m| m.as_str().to_lowercase())
    }
}
