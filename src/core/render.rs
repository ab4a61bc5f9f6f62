//! Renderer module
//!
//! Renders a validation Report to different output formats: text, jsonl, json, md.
//! The text format is the CI-friendly `path:line: [CODE] message` form.

use colored::Colorize;

use crate::core::model::{Report, Severity, Violation};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Jsonl,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(OutputFormat::Text),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
        }
    }

    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Renderer for validation reports
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a report to a string
    pub fn render(&self, report: &Report) -> String {
        match self.config.format {
            OutputFormat::Text => self.render_text(report),
            OutputFormat::Jsonl => self.render_jsonl(report),
            OutputFormat::Json => self.render_json(report),
            OutputFormat::Markdown => self.render_markdown(report),
        }
    }

    /// Render as `path:line: [CODE] message` lines
    fn render_text(&self, report: &Report) -> String {
        report
            .violations
            .iter()
            .map(render_violation_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render as JSON Lines (one violation per line)
    fn render_jsonl(&self, report: &Report) -> String {
        report
            .violations
            .iter()
            .filter_map(|v| {
                if self.config.pretty {
                    serde_json::to_string_pretty(v).ok()
                } else {
                    serde_json::to_string(v).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render as a single JSON array
    fn render_json(&self, report: &Report) -> String {
        if self.config.pretty {
            serde_json::to_string_pretty(&report.violations).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(&report.violations).unwrap_or_else(|_| "[]".to_string())
        }
    }

    /// Render as Markdown, grouped by severity
    fn render_markdown(&self, report: &Report) -> String {
        let mut output = String::new();

        let errors: Vec<_> = report
            .violations
            .iter()
            .filter(|v| v.severity == Severity::Error)
            .collect();
        let warnings: Vec<_> = report
            .violations
            .iter()
            .filter(|v| v.severity == Severity::Warning)
            .collect();

        if !errors.is_empty() {
            output.push_str("## Errors\n\n");
            for v in errors {
                output.push_str(&render_violation_md(v));
            }
            output.push('\n');
        }

        if !warnings.is_empty() {
            output.push_str("## Warnings\n\n");
            for v in warnings {
                output.push_str(&render_violation_md(v));
            }
            output.push('\n');
        }

        if !report.documents.is_empty() {
            output.push_str("## Documents\n\n");
            for doc in &report.documents {
                output.push_str(&format!("- `{}`\n", doc));
            }
            output.push('\n');
        }

        output
    }
}

fn render_violation_text(v: &Violation) -> String {
    let code = match v.severity {
        Severity::Error => format!("[{}]", v.code).red().to_string(),
        Severity::Warning => format!("[{}]", v.code).yellow().to_string(),
    };
    match v.line {
        Some(line) => format!("{}:{}: {} {}", v.path, line, code, v.message),
        None => format!("{}: {} {}", v.path, code, v.message),
    }
}

fn render_violation_md(v: &Violation) -> String {
    match v.line {
        Some(line) => format!("- **{}** `{}:{}`: {}\n", v.code, v.path, line, v.message),
        None => format!("- **{}** `{}`: {}\n", v.code, v.path, v.message),
    }
}
