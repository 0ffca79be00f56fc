//! Text extraction from plain text and Markdown files

use crate::error::Result;
use pulldown_cmark::{Event, Parser, Tag};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await?;
        Ok(content)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(markdown_to_text(&markdown_content))
    }
}

/// Strip Markdown syntax, one line per block. Link targets are kept so
/// profile URLs hidden behind link text still reach contact extraction.
pub fn markdown_to_text(markdown: &str) -> String {
    let mut text = String::with_capacity(markdown.len());
    let mut link_targets: Vec<String> = Vec::new();

    for event in Parser::new(markdown) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak => text.push(' '),
            Event::HardBreak | Event::Rule => text.push('\n'),
            Event::Start(Tag::Link(_, dest, _)) => link_targets.push(dest.to_string()),
            Event::End(Tag::Link(..)) => {
                if let Some(dest) = link_targets.pop() {
                    if !dest.is_empty() && !text.ends_with(dest.as_str()) {
                        text.push_str(" (");
                        text.push_str(&dest);
                        text.push(')');
                    }
                }
            }
            Event::End(Tag::Paragraph | Tag::Heading(..) | Tag::Item | Tag::CodeBlock(_) | Tag::TableRow) => {
                text.push('\n')
            }
            Event::End(Tag::TableCell) => text.push(' '),
            _ => {}
        }
    }

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_is_flattened() {
        let markdown = "# Jane Doe\n\n**Backend** engineer\n\n## Skills\n\n- Rust\n- `PostgreSQL`\n";
        assert_eq!(
            markdown_to_text(markdown),
            "Jane Doe\nBackend engineer\nSkills\nRust\nPostgreSQL"
        );
    }

    #[test]
    fn test_link_targets_are_kept() {
        let markdown = "[LinkedIn](https://linkedin.com/in/janedoe) | <https://github.com/janedoe>";
        let text = markdown_to_text(markdown);
        assert!(text.contains("LinkedIn (https://linkedin.com/in/janedoe)"));
        assert_eq!(text.matches("github.com/janedoe").count(), 1);
    }

    #[tokio::test]
    async fn test_plain_text_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, "Python developer").unwrap();
        assert_eq!(PlainTextExtractor.extract(&path).await.unwrap(), "Python developer");
    }
}
