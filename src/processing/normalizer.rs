//! Text normalization and tokenization

use serde::{Deserialize, Serialize};
use std::fmt;

/// Resume section a line belongs to, detected from heading lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    General,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Section::General => "General",
            Section::Summary => "Summary",
            Section::Experience => "Experience",
            Section::Education => "Education",
            Section::Skills => "Skills",
            Section::Projects => "Projects",
            Section::Certifications => "Certifications",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    pub section: Section,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    /// Index into [`ResumeText::lines`]
    pub line: usize,
}

/// Immutable normalized view of a document
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeText {
    text: String,
    lines: Vec<Line>,
    tokens: Vec<Token>,
    word_count: usize,
}

const SECTION_HEADINGS: &[(Section, &[&str])] = &[
    (
        Section::Summary,
        &["summary", "professional summary", "profile", "professional profile", "objective", "career objective", "about", "about me", "overview"],
    ),
    (
        Section::Experience,
        &["experience", "work experience", "professional experience", "employment", "employment history", "work history", "career history"],
    ),
    (
        Section::Education,
        &["education", "academic background", "academics", "education and training", "qualifications"],
    ),
    (
        Section::Skills,
        &["skills", "technical skills", "core competencies", "expertise", "technologies", "tech stack"],
    ),
    (
        Section::Projects,
        &["projects", "personal projects", "notable projects", "portfolio"],
    ),
    (
        Section::Certifications,
        &["certifications", "certificates", "licenses", "licenses and certifications"],
    ),
];

impl ResumeText {
    /// Normalize raw extracted text. Never fails; empty input gives an empty document.
    pub fn new(raw: &str) -> Self {
        let folded = fold_characters(raw).to_lowercase();

        let mut lines = Vec::new();
        let mut section = Section::General;
        for raw_line in folded.lines() {
            let collapsed = raw_line.split_whitespace().collect::<Vec<_>>().join(" ");
            if collapsed.is_empty() {
                continue;
            }
            if let Some(heading) = detect_heading(&collapsed) {
                section = heading;
            }
            lines.push(Line {
                text: collapsed,
                section,
            });
        }

        let tokens = lines
            .iter()
            .enumerate()
            .flat_map(|(idx, line)| {
                tokenize(&line.text).into_iter().map(move |text| Token { text, line: idx })
            })
            .collect();

        let text = lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let word_count = text.split_whitespace().count();

        Self {
            text,
            lines,
            tokens,
            word_count,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn has_section(&self, section: Section) -> bool {
        self.lines.iter().any(|l| l.section == section)
    }
}

/// Repair common PDF extraction artifacts and fold typography to ASCII
pub fn fold_characters(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{FB00}' => out.push_str("ff"),
            '\u{FB01}' => out.push_str("fi"),
            '\u{FB02}' => out.push_str("fl"),
            '\u{FB03}' => out.push_str("ffi"),
            '\u{FB04}' => out.push_str("ffl"),
            '\u{2018}' | '\u{2019}' | '\u{201B}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2212}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            '\u{00AD}' | '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{FEFF}' => {}
            '\u{2022}' | '\u{25AA}' | '\u{25CF}' | '\u{25E6}' | '\u{2023}' | '\u{2043}' | '\u{F0B7}' => out.push(' '),
            '\r' => {}
            c if c != '\n' && c.is_whitespace() => out.push(' '),
            c => out.push(c),
        }
    }
    out
}

/// Normalize a short phrase (taxonomy alias, keyword list entry) the same way documents are
pub fn normalize_phrase(phrase: &str) -> String {
    fold_characters(phrase)
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a line into tokens, keeping technical forms such as `c++`, `node.js` and `ci/cd`
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for chunk in line.split_whitespace() {
        // URLs and emails stay whole so they can be recognized downstream
        if chunk.contains("://") || chunk.contains('@') || chunk.starts_with("www.") {
            tokens.extend(clean_token(chunk));
            continue;
        }
        tokens.extend(
            chunk
                .split(|c: char| ",;:()[]{}\"|!?<>*=".contains(c))
                .filter_map(clean_token),
        );
    }
    tokens
}

fn clean_token(raw: &str) -> Option<String> {
    // Leading '.' survives for `.net`; trailing '+'/'#' survive for `c++` and `c#`
    let start = raw
        .char_indices()
        .find(|&(i, c)| c.is_alphanumeric() || (c == '.' && raw[i + 1..].starts_with(char::is_alphanumeric)))
        .map(|(i, _)| i)?;
    let trimmed = &raw[start..];
    let end = trimmed
        .char_indices()
        .rev()
        .find(|&(_, c)| c.is_alphanumeric() || c == '+' || c == '#')
        .map(|(i, c)| i + c.len_utf8())?;
    let token = &trimmed[..end];
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

fn detect_heading(line: &str) -> Option<Section> {
    let candidate = line.trim_end_matches(':').trim();
    if candidate.split_whitespace().count() > 4 {
        return None;
    }
    let candidate = candidate.replace('&', "and");
    SECTION_HEADINGS
        .iter()
        .find(|(_, headings)| headings.iter().any(|h| *h == candidate))
        .map(|(section, _)| *section)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let text = ResumeText::new("");
        assert!(text.is_empty());
        assert!(text.tokens().is_empty());
        assert_eq!(text.word_count(), 0);
        assert_eq!(text.text(), "");
    }

    #[test]
    fn test_whitespace_and_case_folding() {
        let text = ResumeText::new("  Senior   ENGINEER\t\tat  Acme \n\n\n Rust  ");
        assert_eq!(text.text(), "senior engineer at acme\nrust");
        assert_eq!(text.lines().len(), 2);
        assert_eq!(text.word_count(), 5);
    }

    #[test]
    fn test_ligatures_and_dashes_are_repaired() {
        let text = ResumeText::new("O\u{FB03}ce e\u{FB00}orts \u{2013} proﬁle\u{00AD}");
        assert_eq!(text.text(), "office efforts - profile");
    }

    #[test]
    fn test_tokenization_keeps_technical_forms() {
        let tokens = tokenize("c++, c#, node.js. (ci/cd) .net; -- \"aws\"!");
        assert_eq!(tokens, vec!["c++", "c#", "node.js", "ci/cd", ".net", "aws"]);
    }

    #[test]
    fn test_tokens_remember_their_line() {
        let text = ResumeText::new("first line\nsecond");
        let lines: Vec<usize> = text.tokens().iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![0, 0, 1]);
    }

    #[test]
    fn test_section_detection() {
        let text = ResumeText::new(
            "Jane Doe\nSummary\nBuilder of things\nWork Experience:\nAcme 2019 - 2021\nEDUCATION\nBSc 2015 - 2019",
        );
        let sections: Vec<Section> = text.lines().iter().map(|l| l.section).collect();
        assert_eq!(
            sections,
            vec![
                Section::General,
                Section::Summary,
                Section::Summary,
                Section::Experience,
                Section::Experience,
                Section::Education,
                Section::Education,
            ]
        );
        assert!(text.has_section(Section::Summary));
        assert!(!text.has_section(Section::Projects));
    }

    #[test]
    fn test_long_lines_are_not_headings() {
        let text = ResumeText::new("experience building distributed payment systems at scale");
        assert_eq!(text.lines()[0].section, Section::General);
    }
}
