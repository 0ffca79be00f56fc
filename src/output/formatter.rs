//! Output formatters: console, JSON, Markdown and HTML

use crate::config::OutputFormat;
use crate::error::{AnalyzerError, Result};
use crate::output::report::{score_label, AnalysisReport, BatchEntry};
use crate::processing::suggestions::{Priority, Suggestion};
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter emitting the wire envelope
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Analysis Report</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container { background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .header { text-align: center; margin-bottom: 30px; border-bottom: 3px solid #007acc; padding-bottom: 20px; }
        .score-badge { display: inline-block; padding: 8px 16px; border-radius: 20px; font-weight: bold; color: white; margin-left: 10px; }
        .score-excellent { background: #28a745; }
        .score-good { background: #17a2b8; }
        .score-fair { background: #ffc107; color: #000; }
        .score-poor { background: #dc3545; }
        .section h2 { color: #007acc; border-bottom: 2px solid #e9ecef; padding-bottom: 10px; }
        .score-breakdown { display: grid; grid-template-columns: repeat(auto-fit, minmax(140px, 1fr)); gap: 15px; margin: 20px 0; }
        .score-item { background: #f8f9fa; padding: 15px; border-radius: 6px; border-left: 4px solid #007acc; }
        .suggestion { background: white; padding: 15px; margin: 10px 0; border-radius: 6px; border-left: 4px solid #17a2b8; }
        .priority-high { border-left-color: #dc3545; }
        .priority-medium { border-left-color: #ffc107; }
        .priority-low { border-left-color: #28a745; }
        .tag { display: inline-block; background: #e9ecef; border-radius: 4px; padding: 2px 8px; margin: 2px; }
        .metadata { background: #e9ecef; padding: 15px; border-radius: 6px; margin-top: 30px; font-size: 0.9em; color: #6c757d; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Resume Analysis Report</h1>
            <p>{{ resume_file }} | Generated: {{ generated_at }}</p>
        </div>

        <div class="section">
            <h2>Resume Score: {{ resume_score }}/100 <span class="score-badge {{ score_class }}">{{ score_label }}</span></h2>
            <div class="score-breakdown">
                {% for component in components %}
                <div class="score-item">
                    <h4>{{ component.name }}</h4>
                    <p><strong>{{ component.points }}</strong> / {{ component.weight }}</p>
                </div>
                {% endfor %}
            </div>
            <p><strong>Experience:</strong> {{ experience }} | <strong>Words:</strong> {{ word_count }}</p>
        </div>

        {% if has_match %}
        <div class="section">
            <h2>Job Match: {{ match_score }}%</h2>
            {% if !matched_skills.is_empty() %}<p><strong>Matched:</strong> {{ matched_skills }}</p>{% endif %}
            {% if !missing_skills.is_empty() %}<p><strong>Missing:</strong> {{ missing_skills }}</p>{% endif %}
        </div>
        {% endif %}

        <div class="section">
            <h2>Contact</h2>
            <ul>
                {% for field in contact %}
                <li><strong>{{ field.label }}:</strong> {{ field.value }}</li>
                {% endfor %}
            </ul>
        </div>

        <div class="section">
            <h2>Skills</h2>
            {% for category in categories %}
            <p><strong>{{ category.name }}:</strong>
            {% for skill in category.skills %}<span class="tag">{{ skill }}</span>{% endfor %}
            </p>
            {% endfor %}
            {% if categories.is_empty() %}<p>No recognized skills.</p>{% endif %}
        </div>

        <div class="section">
            <h2>Keywords</h2>
            <p>{% for keyword in keywords %}<span class="tag">{{ keyword }}</span>{% endfor %}</p>
        </div>

        <div class="section">
            <h2>Suggestions</h2>
            {% for suggestion in suggestions %}
            <div class="suggestion priority-{{ suggestion.priority }}">
                <h4>{{ suggestion.title }}</h4>
                <p><strong>{{ suggestion.category }}</strong> | {{ suggestion.priority }} priority | {{ suggestion.impact }}</p>
                <p>{{ suggestion.description }}</p>
            </div>
            {% endfor %}
        </div>

        <div class="metadata">
            <p><strong>Generated by Resume Analyzer v{{ version }}</strong> | {{ taxonomy_size }} skills in taxonomy | {{ processing_time }}ms</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    resume_file: String,
    generated_at: String,
    resume_score: u32,
    score_class: &'static str,
    score_label: &'static str,
    components: Vec<HtmlComponent>,
    experience: String,
    word_count: usize,
    has_match: bool,
    match_score: u32,
    matched_skills: String,
    missing_skills: String,
    contact: Vec<HtmlContact>,
    categories: Vec<HtmlCategory>,
    keywords: Vec<String>,
    suggestions: Vec<Suggestion>,
    version: String,
    taxonomy_size: usize,
    processing_time: u64,
}

struct HtmlComponent {
    name: String,
    points: u32,
    weight: u32,
}

struct HtmlContact {
    label: &'static str,
    value: String,
}

struct HtmlCategory {
    name: String,
    skills: Vec<String>,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };
        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: u32) -> String {
        let color = match score {
            90..=100 => Color::Green,
            75..=89 => Color::BrightGreen,
            60..=74 => Color::Yellow,
            40..=59 => Color::BrightYellow,
            _ => Color::Red,
        };
        let badge = score_label(score).to_uppercase();

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_priority(&self, priority: Priority) -> String {
        let (tag, color) = match priority {
            Priority::High => ("[!]", Color::Red),
            Priority::Medium => ("[*]", Color::Yellow),
            Priority::Low => ("[-]", Color::Green),
        };
        self.colorize(tag, color)
    }

    pub fn format_batch(&self, entries: &[BatchEntry]) -> String {
        let mut output = self.format_header("BATCH RESUME ANALYSIS", 1);
        output.push_str(&format!(
            "{:<40} {:>6} {:>7} {:>11} {:>6}\n",
            "File", "Score", "Skills", "Experience", "Match"
        ));
        output.push_str(&format!("{}\n", "-".repeat(74)));

        for entry in entries {
            let name = Path::new(&entry.file)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| entry.file.clone());
            match (&entry.result, &entry.error) {
                (Some(response), _) => {
                    let data = &response.resume_data;
                    let match_score = response
                        .match_score()
                        .map(|s| format!("{}%", s))
                        .unwrap_or_else(|| "-".to_string());
                    output.push_str(&format!(
                        "{:<40} {:>6} {:>7} {:>11} {:>6}\n",
                        truncate(&name, 40),
                        data.resume_score,
                        data.skills.len(),
                        data.experience_years,
                        match_score
                    ));
                }
                (None, error) => {
                    output.push_str(&format!(
                        "{:<40} {}\n",
                        truncate(&name, 40),
                        self.colorize(error.as_deref().unwrap_or("failed"), Color::Red)
                    ));
                }
            }
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let data = &report.response.resume_data;
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME ANALYSIS", 1));
        output.push_str(&format!("File: {}\n", report.resume_name()));

        output.push_str(&self.format_header("Resume Score", 2));
        output.push_str(&format!(
            "{}/100 {}\n",
            data.resume_score,
            self.format_score_badge(data.resume_score)
        ));
        for (name, points) in &data.score_breakdown.components {
            let weight = report.metadata.score_weights.get(name).copied().unwrap_or(*points);
            output.push_str(&format!("  {:<12} {:>3} / {}\n", capitalize(name), points, weight));
        }
        output.push_str(&format!(
            "Experience: {} | Words: {}\n",
            self.colorize(&report.experience_display(), Color::Cyan),
            data.word_count
        ));

        if let Some(job_match) = &report.response.job_match {
            output.push_str(&self.format_header("Job Match", 2));
            output.push_str(&format!(
                "{}% {}\n",
                job_match.match_score,
                self.format_score_badge(job_match.match_score)
            ));
            if !job_match.matched_skills.is_empty() {
                output.push_str(&format!(
                    "  Matched: {}\n",
                    self.colorize(&job_match.matched_skills.join(", "), Color::Green)
                ));
            }
            if !job_match.missing_skills.is_empty() {
                output.push_str(&format!(
                    "  Missing: {}\n",
                    self.colorize(&job_match.missing_skills.join(", "), Color::Red)
                ));
            }
        }

        output.push_str(&self.format_header("Contact", 3));
        let contact = contact_rows(report);
        if contact.is_empty() {
            output.push_str("  none found\n");
        }
        for (label, value) in contact {
            output.push_str(&format!("  {}: {}\n", label, value));
        }

        output.push_str(&self.format_header("Skills", 3));
        if data.skills_by_category.is_empty() {
            output.push_str("  none recognized\n");
        }
        for (category, skills) in &data.skills_by_category {
            output.push_str(&format!(
                "  {}: {}\n",
                self.colorize(&category_title(category), Color::BrightBlack),
                skills.iter().cloned().collect::<Vec<_>>().join(", ")
            ));
        }

        if !data.keywords.is_empty() {
            output.push_str(&self.format_header("Keywords", 3));
            output.push_str(&format!("  {}\n", data.keywords.join(", ")));
        }

        output.push_str(&self.format_header("Suggestions", 2));
        if data.suggestions.is_empty() {
            output.push_str(&format!("  {}\n", self.colorize("Nothing to improve", Color::Green)));
        }
        for (i, suggestion) in data.suggestions.iter().enumerate() {
            output.push_str(&format!(
                "{}. {} {} {}\n",
                i + 1,
                self.format_priority(suggestion.priority),
                suggestion.title,
                self.colorize(&format!("({})", suggestion.category), Color::BrightBlack)
            ));
            output.push_str(&format!("   {}\n", suggestion.description));
            if self.detailed {
                output.push_str(&format!("   Impact: {}\n", suggestion.impact));
            }
        }

        if self.detailed {
            let quality = &data.quality_analysis;
            output.push_str(&self.format_header("Content Quality", 2));
            output.push_str(&format!(
                "Sentences: {} | Action verbs: {} | Weak phrases: {} | Quantified results: {}\n",
                quality.sentence_count,
                quality.action_verb_count,
                quality.weak_word_count,
                quality.quantifiable_achievements
            ));
            if !quality.action_verbs_used.is_empty() {
                output.push_str(&format!("Action verbs used: {}\n", quality.action_verbs_used.join(", ")));
            }
            if !quality.weak_words_found.is_empty() {
                output.push_str(&format!(
                    "Weak phrases: {}\n",
                    self.colorize(&quality.weak_words_found.join(", "), Color::Yellow)
                ));
            }
            output.push_str(&format!(
                "Summary section: {}\n",
                if quality.has_summary { "yes" } else { "no" }
            ));
            output.push_str(&format!(
                "Education: {}{}\n",
                if data.education.has_degree { "degree found" } else { "no degree found" },
                if data.education.keywords_found.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", data.education.keywords_found.join(", "))
                }
            ));
        }

        output.push_str(&format!(
            "\n{} Resume Analyzer v{} | {} skills in taxonomy | {}ms\n",
            self.colorize("i", Color::Blue),
            report.metadata.analyzer_version,
            report.metadata.taxonomy_size,
            report.metadata.processing_time_ms
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    pub fn format_batch(&self, entries: &[BatchEntry]) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(entries)?)
        } else {
            Ok(serde_json::to_string(entries)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(&report.response)?)
        } else {
            Ok(serde_json::to_string(&report.response)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let data = &report.response.resume_data;
        let mut output = String::new();

        output.push_str("# Resume Analysis Report\n\n");
        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Resume:** `{}`",
                format_timestamp(report),
                report.resume_name()
            ));
            if let Some(job) = report.job_name() {
                output.push_str(&format!(" | **Job:** `{}`", job));
            }
            output.push_str("\n\n");
        }

        output.push_str(&format!(
            "## Resume Score: {}/100 ({})\n\n",
            data.resume_score,
            report.score_label()
        ));
        output.push_str("| Component | Points | Weight |\n");
        output.push_str("|-----------|--------|--------|\n");
        for (name, points) in &data.score_breakdown.components {
            let weight = report.metadata.score_weights.get(name).copied().unwrap_or(*points);
            output.push_str(&format!("| {} | {} | {} |\n", capitalize(name), points, weight));
        }
        output.push('\n');
        output.push_str(&format!(
            "**Experience:** {} | **Words:** {}\n\n",
            report.experience_display(),
            data.word_count
        ));

        if let Some(job_match) = &report.response.job_match {
            output.push_str(&format!("## Job Match: {}%\n\n", job_match.match_score));
            if !job_match.matched_skills.is_empty() {
                output.push_str(&format!("- **Matched:** {}\n", job_match.matched_skills.join(", ")));
            }
            if !job_match.missing_skills.is_empty() {
                output.push_str(&format!("- **Missing:** {}\n", job_match.missing_skills.join(", ")));
            }
            output.push('\n');
        }

        output.push_str("## Contact\n\n");
        for (label, value) in contact_rows(report) {
            output.push_str(&format!("- **{}:** {}\n", label, value));
        }
        output.push('\n');

        output.push_str("## Skills\n\n");
        for (category, skills) in &data.skills_by_category {
            output.push_str(&format!(
                "- **{}:** {}\n",
                category_title(category),
                skills.iter().cloned().collect::<Vec<_>>().join(", ")
            ));
        }
        output.push('\n');

        if !data.keywords.is_empty() {
            output.push_str(&format!("## Keywords\n\n`{}`\n\n", data.keywords.join("`, `")));
        }

        output.push_str("## Suggestions\n\n");
        for (i, suggestion) in data.suggestions.iter().enumerate() {
            output.push_str(&format!(
                "### {}. {}\n\n**{}** | {} priority | {}\n\n{}\n\n",
                i + 1,
                suggestion.title,
                suggestion.category,
                suggestion.priority,
                suggestion.impact,
                suggestion.description
            ));
        }

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!(
                "*Generated by Resume Analyzer v{}*\n",
                report.metadata.analyzer_version
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &AnalysisReport) -> HtmlTemplate {
        let data = &report.response.resume_data;
        let score_class = match data.resume_score {
            90..=100 => "score-excellent",
            60..=89 => "score-good",
            40..=59 => "score-fair",
            _ => "score-poor",
        };

        let components = data
            .score_breakdown
            .components
            .iter()
            .map(|(name, points)| HtmlComponent {
                name: capitalize(name),
                points: *points,
                weight: report.metadata.score_weights.get(name).copied().unwrap_or(*points),
            })
            .collect();

        let categories = data
            .skills_by_category
            .iter()
            .map(|(category, skills)| HtmlCategory {
                name: category_title(category),
                skills: skills.iter().cloned().collect(),
            })
            .collect();

        let job_match = report.response.job_match.as_ref();

        HtmlTemplate {
            include_styles: self.include_styles,
            resume_file: report.resume_name(),
            generated_at: format_timestamp(report),
            resume_score: data.resume_score,
            score_class,
            score_label: report.score_label(),
            components,
            experience: report.experience_display(),
            word_count: data.word_count,
            has_match: job_match.is_some(),
            match_score: job_match.map(|m| m.match_score).unwrap_or(0),
            matched_skills: job_match.map(|m| m.matched_skills.join(", ")).unwrap_or_default(),
            missing_skills: job_match.map(|m| m.missing_skills.join(", ")).unwrap_or_default(),
            contact: contact_rows(report)
                .into_iter()
                .map(|(label, value)| HtmlContact { label, value })
                .collect(),
            categories,
            keywords: data.keywords.clone(),
            suggestions: data.suggestions.clone(),
            version: report.metadata.analyzer_version.clone(),
            taxonomy_size: report.metadata.taxonomy_size,
            processing_time: report.metadata.processing_time_ms,
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| AnalyzerError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }

    /// Batch output is a summary table on the console and an array elsewhere
    pub fn generate_batch(&self, entries: &[BatchEntry], format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => Ok(self.console_formatter.format_batch(entries)),
            OutputFormat::Json => self.json_formatter.format_batch(entries),
            other => Err(AnalyzerError::OutputFormatting(format!(
                "{:?} output is not available for batch runs, use console or json",
                other
            ))),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };
    format!("{}_analysis{}.{}", base_name, timestamp_suffix, extension)
}

fn contact_rows(report: &AnalysisReport) -> Vec<(&'static str, String)> {
    let contact = &report.response.resume_data.contact;
    [
        ("Email", &contact.email),
        ("Phone", &contact.phone),
        ("LinkedIn", &contact.linkedin),
        ("GitHub", &contact.github),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.as_ref().map(|v| (label, v.clone())))
    .collect()
}

fn format_timestamp(report: &AnalysisReport) -> String {
    chrono::DateTime::<chrono::Utc>::from(report.metadata.generated_at)
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string()
}

fn category_title(category: &str) -> String {
    category
        .split('_')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
