//! Resume analyzer library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use error::{Result, AnalyzerError};
pub use config::Config;
pub use processing::{AnalysisRequest, ParseResponse, ResumeAnalyzer, ResumeData};
