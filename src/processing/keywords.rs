//! Frequency-ranked keyword extraction

use crate::processing::normalizer::Token;
use std::collections::{HashMap, HashSet};

pub struct KeywordExtractor {
    stop_words: HashSet<&'static str>,
    max_keywords: usize,
}

impl KeywordExtractor {
    pub fn new(max_keywords: usize) -> Self {
        Self {
            stop_words: Self::create_stop_words(),
            max_keywords,
        }
    }

    /// Top keywords ranked by frequency, ties broken by first occurrence.
    ///
    /// Tokens in `exclude` (typically the vocabulary of already-extracted skills)
    /// are skipped.
    pub fn extract(&self, tokens: &[Token], exclude: &HashSet<String>) -> Vec<String> {
        let mut stats: HashMap<&str, (usize, usize)> = HashMap::new();

        for (position, token) in tokens.iter().enumerate() {
            let word = token.text.as_str();
            if !self.is_candidate(word) || exclude.contains(word) {
                continue;
            }
            stats.entry(word).or_insert((0, position)).0 += 1;
        }

        let mut ranked: Vec<(&str, usize, usize)> = stats
            .into_iter()
            .map(|(word, (count, first))| (word, count, first))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.2.cmp(&b.2)));

        ranked
            .into_iter()
            .take(self.max_keywords)
            .map(|(word, _, _)| word.to_string())
            .collect()
    }

    /// Every candidate term of a token stream, used as a document vocabulary
    pub fn vocabulary(&self, tokens: &[Token]) -> HashSet<String> {
        tokens
            .iter()
            .map(|t| t.text.as_str())
            .filter(|w| self.is_candidate(w))
            .map(str::to_string)
            .collect()
    }

    fn is_candidate(&self, word: &str) -> bool {
        word.chars().count() > 2
            && word.chars().any(char::is_alphabetic)
            && !word.contains('@')
            && !word.contains("://")
            && !word.starts_with("www.")
            && !word.contains(".com")
            && !self.stop_words.contains(word)
    }

    /// English function words plus resume boilerplate
    fn create_stop_words() -> HashSet<&'static str> {
        [
            "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
            "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
            "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "etc",
            "few", "for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers",
            "him", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "me",
            "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once", "only",
            "or", "other", "our", "ours", "out", "over", "own", "per", "same", "she", "should", "so",
            "some", "such", "than", "that", "the", "their", "theirs", "them", "then", "there", "these",
            "they", "this", "those", "through", "to", "too", "under", "until", "up", "upon", "very",
            "via", "was", "we", "well", "were", "what", "when", "where", "which", "while", "who", "whom",
            "why", "will", "with", "within", "would", "you", "your", "yours", "yourself", "across",
            "along", "among", "around", "including", "using", "used", "use", "able", "new", "various",
            "etc.", "e.g", "i.e", "ability", "strong", "excellent", "good", "great",
            // resume and job-posting boilerplate
            "resume", "cv", "curriculum", "vitae", "experience", "experiences", "experienced", "year",
            "years", "yrs", "month", "months", "present", "current", "currently", "responsibilities",
            "responsible", "duties", "role", "roles", "position", "work", "worked", "working", "job",
            "company", "team", "teams", "skills", "skill", "summary", "objective", "profile",
            "education", "references", "available", "request", "email", "phone", "linkedin", "github",
            "looking", "seeking", "required", "requirements", "preferred", "plus", "must", "candidate",
            "ideal", "join", "knowledge", "familiarity", "understanding", "proficiency", "proficient",
            "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
            "january", "february", "march", "april", "june", "july", "august", "september", "october",
            "november", "december",
        ]
        .into_iter()
        .collect()
    }
}
