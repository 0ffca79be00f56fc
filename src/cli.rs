//! CLI interface for the resume analyzer

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-analyzer")]
#[command(about = "Heuristic resume analysis and job matching")]
#[command(long_about = "Extract skills, experience and contact details from a resume, score it, suggest improvements and match it against a job description")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a single resume
    Analyze {
        /// Path to resume file (TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Output format: console, json, markdown, html [default: from config]
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Output detailed analysis
        #[arg(short, long)]
        detailed: bool,
    },

    /// Analyze several resumes concurrently
    Batch {
        /// Resume files (TXT, MD)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Job description matched against every resume
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Output format: console, json [default: from config]
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Inspect the skill taxonomy
    Taxonomy {
        #[command(subcommand)]
        action: TaxonomyAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum TaxonomyAction {
    /// List known skills grouped by category
    List {
        /// Only show one category
        #[arg(long)]
        category: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("resume.TXT"), &["txt", "md"]).is_ok());
        assert!(validate_file_extension(Path::new("resume.docx"), &["txt", "md"]).is_err());
        assert!(validate_file_extension(Path::new("resume"), &["txt"]).is_err());
    }

    #[test]
    fn test_analyze_arguments() {
        let cli = Cli::try_parse_from([
            "resume-analyzer",
            "analyze",
            "--resume",
            "jane.md",
            "--job",
            "role.txt",
            "--output",
            "json",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze { resume, job, output, save, detailed } => {
                assert_eq!(resume, PathBuf::from("jane.md"));
                assert_eq!(job, Some(PathBuf::from("role.txt")));
                assert_eq!(output.as_deref(), Some("json"));
                assert!(save.is_none());
                assert!(!detailed);
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_batch_requires_files() {
        assert!(Cli::try_parse_from(["resume-analyzer", "batch"]).is_err());
        let cli = Cli::try_parse_from(["resume-analyzer", "-v", "batch", "a.txt", "b.md"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Batch { files, .. } => assert_eq!(files.len(), 2),
            _ => panic!("expected batch"),
        }
    }
}
