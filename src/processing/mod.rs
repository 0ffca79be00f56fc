//! Text processing and analysis module

pub mod normalizer;
pub mod phrase;
pub mod taxonomy;
pub mod contact;
pub mod skills;
pub mod experience;
pub mod keywords;
pub mod quality;
pub mod scoring;
pub mod suggestions;
pub mod matcher;
pub mod analyzer;

pub use analyzer::{AnalysisRequest, ParseResponse, ResumeAnalyzer, ResumeData};
