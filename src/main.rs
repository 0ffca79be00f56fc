//! Resume analyzer: heuristic resume analysis and job matching

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use resume_analyzer::cli::{self, Cli, Commands, ConfigAction, TaxonomyAction};
use resume_analyzer::config::OutputFormat;
use resume_analyzer::input::InputManager;
use resume_analyzer::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use resume_analyzer::output::report::{AnalysisReport, BatchEntry};
use resume_analyzer::{AnalysisRequest, AnalyzerError, Config, ResumeAnalyzer};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Instant;

const INPUT_EXTENSIONS: &[&str] = &["txt", "text", "md", "markdown"];

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_file: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            output,
            save,
            detailed,
        } => {
            validate_input(&resume, "Resume file")?;
            if let Some(job) = &job {
                validate_input(job, "Job description file")?;
            }
            let output_format = resolve_format(output.as_deref(), &config)?;

            let analyzer = ResumeAnalyzer::new(&config)?;
            let mut input_manager = InputManager::new();

            info!("Analyzing {}", resume.display());
            let resume_text = input_manager
                .extract_text(&resume)
                .await
                .with_context(|| format!("Failed to read resume {}", resume.display()))?;
            let mut request = AnalysisRequest::new(resume_text);
            if let Some(job) = &job {
                let job_text = input_manager
                    .extract_text(job)
                    .await
                    .with_context(|| format!("Failed to read job description {}", job.display()))?;
                request = request.with_job_description(job_text);
            }

            let start_time = Instant::now();
            let response = analyzer.analyze(&request)?;
            let elapsed = start_time.elapsed().as_millis() as u64;
            debug!("Analysis finished in {}ms", elapsed);

            let report = AnalysisReport::new(response, &resume, job.as_deref(), elapsed, &analyzer);
            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                detailed || config.output.detailed,
                config.output.pretty_json,
            );
            let content = generator.generate_report(&report, output_format)?;

            match save {
                Some(path) => {
                    let target = if path.is_dir() {
                        path.join(suggest_filename(output_format, &report.resume_name(), true))
                    } else {
                        path
                    };
                    save_report_to_file(&content, &target)
                        .with_context(|| format!("Failed to save report to {}", target.display()))?;
                    println!("✅ Report saved to {}", target.display());
                }
                None => println!("{}", content),
            }
        }

        Commands::Batch { files, job, output } => {
            for file in &files {
                validate_input(file, "Resume file")?;
            }
            let output_format = resolve_format(output.as_deref(), &config)?;

            let analyzer = Arc::new(ResumeAnalyzer::new(&config)?);
            // Every file is read once, so there is nothing to cache
            let mut input_manager = InputManager::new().with_cache(false);
            let job_description = match &job {
                Some(job) => {
                    validate_input(job, "Job description file")?;
                    input_manager
                        .extract_text(job)
                        .await
                        .with_context(|| format!("Failed to read job description {}", job.display()))?
                }
                None => String::new(),
            };

            let progress = ProgressBar::new(files.len() as u64);
            progress.set_style(
                ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=> "),
            );

            // Unreadable files become error rows instead of aborting the batch
            let mut read_results = Vec::with_capacity(files.len());
            for file in &files {
                progress.set_message(format!("reading {}", file.display()));
                let text = input_manager.extract_text(file).await;
                if let Err(e) = &text {
                    warn!("Skipping {}: {}", file.display(), e);
                }
                read_results.push(text);
                progress.inc(1);
            }

            let requests: Vec<AnalysisRequest> = read_results
                .iter()
                .filter_map(|text| text.as_ref().ok())
                .map(|text| AnalysisRequest::new(text.clone()).with_job_description(job_description.clone()))
                .collect();

            progress.set_message("analyzing");
            let mut analyzed = analyzer.analyze_batch(requests).await.into_iter();
            progress.finish_with_message("done");

            let entries: Vec<BatchEntry> = files
                .iter()
                .zip(read_results)
                .map(|(file, text)| {
                    let result = match text {
                        Ok(_) => analyzed.next().unwrap_or_else(|| {
                            Err(AnalyzerError::AnalysisFailed("missing batch result".to_string()))
                        }),
                        Err(e) => Err(e),
                    };
                    BatchEntry::from_result(file, result)
                })
                .collect();

            let generator = ReportGenerator::with_options(config.output.color_output, false, config.output.pretty_json);
            println!("{}", generator.generate_batch(&entries, output_format)?);
        }

        Commands::Taxonomy { action } => match action {
            TaxonomyAction::List { category } => {
                let analyzer = ResumeAnalyzer::new(&config)?;
                let taxonomy = analyzer.taxonomy();

                if let Some(wanted) = &category {
                    if !taxonomy.categories().iter().any(|c| c == wanted) {
                        return Err(AnalyzerError::InvalidInput(format!(
                            "Unknown category: {}. Known: {}",
                            wanted,
                            taxonomy.categories().join(", ")
                        ))
                        .into());
                    }
                }

                println!("📚 Skill taxonomy ({} skills)\n", taxonomy.len());
                for name in taxonomy.categories() {
                    if category.as_ref().is_some_and(|wanted| wanted != name) {
                        continue;
                    }
                    println!("{}", name.bold());
                    for entry in taxonomy.entries_in(name) {
                        if entry.aliases.is_empty() {
                            println!("  • {}", entry.canonical_name);
                        } else {
                            let aliases: Vec<&str> = entry.aliases.iter().map(String::as_str).collect();
                            println!("  • {} ({})", entry.canonical_name, aliases.join(", "));
                        }
                    }
                    println!();
                }
            }
        },

        Commands::Config { action } => {
            let path = config_file.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("⚙️  Current Configuration ({})\n", path.display());
                    println!("{}", toml::to_string_pretty(&config)?);
                }

                Some(ConfigAction::Reset) => {
                    println!("🔄 Resetting configuration to defaults...");
                    Config::default()
                        .save_to(&path)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("✅ Configuration reset successfully!");
                }

                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
            }
        }
    }

    Ok(())
}

fn validate_input(path: &Path, label: &str) -> Result<()> {
    cli::validate_file_extension(path, INPUT_EXTENSIONS)
        .map_err(|e| AnalyzerError::InvalidInput(format!("{} {}: {}", label, path.display(), e)))?;
    Ok(())
}

fn resolve_format(requested: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match requested {
        Some(format) => Ok(cli::parse_output_format(format).map_err(AnalyzerError::InvalidInput)?),
        None => Ok(config.output.format),
    }
}
