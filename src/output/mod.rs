//! Report rendering for console, JSON, Markdown and HTML output

pub mod formatter;
pub mod report;
