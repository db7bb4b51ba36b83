//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use scribe_render::{render_html, Assembler, Block, Document, Table};
use scribe_summarizer::SummaryRecord;
use std::fmt::Write;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a summary record in the configured format.
    pub fn format_record(&self, record: &SummaryRecord) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(record.to_json()?),
            OutputFormat::Markdown => Ok(self.format_markdown(record)),
            OutputFormat::Html => Ok(render_html(&assemble(record))),
            OutputFormat::Table => Ok(self.format_document(&assemble(record))),
        }
    }

    /// The stored Markdown, or Markdown rebuilt from the structured fields.
    fn format_markdown(&self, record: &SummaryRecord) -> String {
        if record.document.raw_markdown.trim().is_empty() {
            document_markdown(&assemble(record))
        } else {
            record.document.raw_markdown.clone()
        }
    }

    /// Terminal view of an assembled document.
    fn format_document(&self, document: &Document) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.colorize(&document.header.title, "cyan"));
        if let Some(meta) = &document.header.meta_line {
            let _ = writeln!(out, "{}", meta);
        }

        for block in &document.blocks {
            match block {
                Block::Heading { level: 1, text } => {
                    let _ = write!(out, "\n{}\n", self.colorize(text, "magenta"));
                }
                Block::Heading { text, .. } => {
                    let _ = writeln!(out, "{}", self.colorize(&format!("· {}", text), "blue"));
                }
                Block::Paragraph(text) => {
                    let _ = writeln!(out, "{}", text);
                }
                Block::Quote { text, attribution } => match attribution {
                    Some(attribution) => {
                        let _ = writeln!(out, "  {} — {}", text, attribution);
                    }
                    None => {
                        let _ = writeln!(out, "  {}", text);
                    }
                },
                Block::Table(table) => {
                    let _ = writeln!(out, "{}", format_table(table));
                }
                Block::Bullet(text) => {
                    let _ = writeln!(out, "  • {}", text);
                }
            }
        }

        out
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format the confirmation for a saved record.
    pub fn record_saved(&self, record: &SummaryRecord, path: &std::path::Path) -> String {
        self.success(&format!(
            "Saved summary {} to {}",
            record.id.short(),
            path.display()
        ))
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().bold().to_string(),
            "magenta" => text.magenta().bold().to_string(),
            _ => text.to_string(),
        }
    }
}

fn assemble(record: &SummaryRecord) -> Document {
    Assembler::new(record.metadata.clone()).assemble(&record.document)
}

fn format_table(table: &Table) -> String {
    let mut builder = Builder::default();
    builder.push_record(table.header.iter().map(String::as_str));
    for row in &table.rows {
        builder.push_record(row.iter().map(String::as_str));
    }

    let mut rendered = builder.build();
    rendered
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    rendered.to_string()
}

/// Markdown for an assembled document, following the numbered section layout.
pub fn document_markdown(document: &Document) -> String {
    let mut out = String::new();
    let mut section = 0;

    for block in &document.blocks {
        match block {
            Block::Heading { level: 1, text } => {
                section += 1;
                let _ = write!(out, "## {}. {}\n\n", section, text);
            }
            Block::Heading { text, .. } => {
                let _ = writeln!(out, "### {}", text);
            }
            Block::Paragraph(text) => {
                let _ = write!(out, "{}\n\n", text);
            }
            Block::Quote { text, attribution } => {
                match attribution {
                    Some(attribution) => {
                        let _ = write!(out, "> {} – {}\n\n", text, attribution);
                    }
                    None => {
                        let _ = write!(out, "> {}\n\n", text);
                    }
                }
            }
            Block::Table(table) => {
                let _ = writeln!(out, "| {} |", table.header.join(" | "));
                let _ = writeln!(out, "|{}", "---|".repeat(table.header.len()));
                for row in &table.rows {
                    let cells: Vec<String> = row.iter().map(|c| c.replace('|', "\\|")).collect();
                    let _ = writeln!(out, "| {} |", cells.join(" | "));
                }
                out.push('\n');
            }
            Block::Bullet(text) => {
                let _ = writeln!(out, "- {}", text);
            }
        }
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_domain::{
        KeyQuote, MeetingMetadata, Participant, SectionField, SummaryDocument,
    };

    fn structured_record() -> SummaryRecord {
        let document = SummaryDocument {
            executive_summary: "Budget approved.".to_string(),
            participants: SectionField::from(vec![Participant {
                name: "Ana Lima".to_string(),
                organization: "Globex / CFO".to_string(),
                role: "Approver".to_string(),
            }]),
            key_quotes: SectionField::from(vec![KeyQuote {
                quote: "Ship it.".to_string(),
                attribution: "Ana Lima".to_string(),
            }]),
            ..SummaryDocument::default()
        };
        SummaryRecord::new(
            MeetingMetadata::new("Budget Review").with_date("2024-03-04"),
            document,
        )
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_record(&structured_record()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["metadata"]["title"], "Budget Review");
        assert_eq!(value["document"]["executive_summary"], "Budget approved.");
    }

    #[test]
    fn test_markdown_prefers_stored_text() {
        let mut record = structured_record();
        record.document.raw_markdown = "## 1. Executive Summary\n\nAs generated.".to_string();
        let formatter = Formatter::new(OutputFormat::Markdown, false);
        assert_eq!(
            formatter.format_record(&record).unwrap(),
            "## 1. Executive Summary\n\nAs generated."
        );
    }

    #[test]
    fn test_markdown_rebuilt_from_fields() {
        let formatter = Formatter::new(OutputFormat::Markdown, false);
        let output = formatter.format_record(&structured_record()).unwrap();

        assert!(output.starts_with("## 1. Executive Summary\n\nBudget approved."));
        assert!(output.contains("## 2. Participants"));
        assert!(output.contains("| Ana Lima | Globex / CFO | Approver |"));
        assert!(output.contains("> \"Ship it.\" – Ana Lima"));
        assert!(output.contains("## 11. Technical Terminology & Acronyms"));
    }

    #[test]
    fn test_table_format_without_color() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_record(&structured_record()).unwrap();

        assert!(output.starts_with("Budget Review Summary\n"));
        assert!(output.contains("\nParticipants\n"));
        assert!(output.contains("Ana Lima"));
        assert!(output.contains("╭"));
        assert!(output.contains("  \"Ship it.\" — Ana Lima"));
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_html_format() {
        let formatter = Formatter::new(OutputFormat::Html, false);
        let output = formatter.format_record(&structured_record()).unwrap();
        assert!(output.starts_with("<!DOCTYPE html>"));
        assert!(output.contains("<td>Globex / CFO</td>"));
    }

    #[test]
    fn test_messages_plain_when_color_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("done"), "✓ done");
        assert_eq!(formatter.error("failed"), "✗ failed");
        assert_eq!(formatter.warning("careful"), "⚠ careful");
        assert_eq!(formatter.info("note"), "ℹ note");
    }
}
