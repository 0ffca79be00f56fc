//! Word-boundary aware multi-phrase matching over normalized text

use crate::error::{AnalyzerError, Result};
use aho_corasick::{AhoCorasick, MatchKind};

/// A phrase occurrence in the searched text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseMatch {
    /// Index of the phrase in the slice given to [`PhraseMatcher::new`]
    pub phrase: usize,
    pub start: usize,
    pub end: usize,
}

/// Finds whole-word occurrences of a fixed phrase list.
///
/// Candidates are collected with overlaps, filtered on word boundaries and then
/// resolved leftmost-longest, so `javascript` never yields `java` and
/// `github actions` wins over `github`.
#[derive(Debug, Clone)]
pub struct PhraseMatcher {
    automaton: AhoCorasick,
    lengths: Vec<usize>,
}

impl PhraseMatcher {
    /// Phrases must already be normalized (lowercase, single spaces)
    pub fn new<P: AsRef<str>>(phrases: &[P]) -> Result<Self> {
        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(phrases.iter().map(|p| p.as_ref()))
            .map_err(|e| AnalyzerError::Taxonomy(format!("Failed to build phrase matcher: {}", e)))?;
        let lengths = phrases.iter().map(|p| p.as_ref().len()).collect();

        Ok(Self { automaton, lengths })
    }

    /// Non-overlapping whole-word matches in document order
    pub fn find_all(&self, text: &str) -> Vec<PhraseMatch> {
        let mut candidates: Vec<PhraseMatch> = self
            .automaton
            .find_overlapping_iter(text)
            .filter(|m| self.lengths[m.pattern().as_usize()] > 0)
            .filter(|m| is_start_boundary(text, m.start()) && is_end_boundary(text, m.end()))
            .map(|m| PhraseMatch {
                phrase: m.pattern().as_usize(),
                start: m.start(),
                end: m.end(),
            })
            .collect();

        candidates.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| b.end.cmp(&a.end)));

        let mut accepted = Vec::with_capacity(candidates.len());
        let mut last_end = 0;
        for candidate in candidates {
            if candidate.start >= last_end {
                last_end = candidate.end;
                accepted.push(candidate);
            }
        }
        accepted
    }

    /// Number of whole-word occurrences per phrase
    pub fn count_each(&self, text: &str) -> Vec<usize> {
        let mut counts = vec![0; self.lengths.len()];
        for m in self.find_all(text) {
            counts[m.phrase] += 1;
        }
        counts
    }

    pub fn is_match(&self, text: &str) -> bool {
        !self.find_all(text).is_empty()
    }
}

fn is_start_boundary(text: &str, start: usize) -> bool {
    match text[..start].chars().next_back() {
        None => true,
        Some(c) => !(c.is_alphanumeric() || c == '@' || c == '.' || c == '_'),
    }
}

fn is_end_boundary(text: &str, end: usize) -> bool {
    let mut rest = text[end..].chars();
    match rest.next() {
        None => true,
        Some('.') => !rest.next().is_some_and(char::is_alphanumeric),
        Some(c) => !(c.is_alphanumeric() || matches!(c, '+' | '#' | '&' | '_' | '@')),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched<'a>(phrases: &[&'a str], text: &str) -> Vec<&'a str> {
        let matcher = PhraseMatcher::new(phrases).unwrap();
        matcher.find_all(text).into_iter().map(|m| phrases[m.phrase]).collect()
    }

    #[test]
    fn test_no_substring_matches() {
        assert_eq!(matched(&["java"], "javascript developer"), Vec::<&str>::new());
        assert_eq!(matched(&["go"], "google cloud"), Vec::<&str>::new());
        assert_eq!(matched(&["java", "javascript"], "javascript and java"), vec!["javascript", "java"]);
    }

    #[test]
    fn test_longest_phrase_wins() {
        assert_eq!(matched(&["github", "github actions"], "ci with github actions"), vec!["github actions"]);
        assert_eq!(matched(&["node", "node.js"], "node.js services"), vec!["node.js"]);
    }

    #[test]
    fn test_symbol_suffixes() {
        assert_eq!(matched(&["c", "c++", "c#"], "c++ and c# and c"), vec!["c++", "c#", "c"]);
        assert_eq!(matched(&["r"], "r&d lead"), Vec::<&str>::new());
    }

    #[test]
    fn test_separators_split_words() {
        assert_eq!(matched(&["python", "django"], "python/django, python-based"), vec!["python", "django", "python"]);
        assert_eq!(matched(&["react"], "react."), vec!["react"]);
        assert_eq!(matched(&["react"], "john@react.dev"), Vec::<&str>::new());
    }

    #[test]
    fn test_count_each() {
        let matcher = PhraseMatcher::new(&["led", "built"]).unwrap();
        assert_eq!(matcher.count_each("led a team. built x. led y"), vec![2, 1]);
        assert!(!matcher.is_match("ledger"));
    }
}
