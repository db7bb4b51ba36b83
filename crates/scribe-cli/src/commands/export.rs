//! Export command implementation.

use crate::cli::ExportArgs;
use crate::error::Result;
use crate::output::Formatter;
use scribe_render::{export_file_name, render_html, Assembler, DocxWriter};
use scribe_summarizer::SummaryRecord;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Execute the export command.
pub async fn execute_export(args: ExportArgs, formatter: &Formatter) -> Result<()> {
    let record = SummaryRecord::load(&args.record)?;
    let path = export_record(&record, args.output, args.html)?;
    println!(
        "{}",
        formatter.success(&format!("Exported {}", path.display()))
    );
    Ok(())
}

/// Write `record` as DOCX (or HTML) and return the path written.
pub fn export_record(record: &SummaryRecord, output: Option<PathBuf>, html: bool) -> Result<PathBuf> {
    let document = Assembler::new(record.metadata.clone()).assemble(&record.document);
    let path = output.unwrap_or_else(|| default_output(&record.metadata.title, html));
    debug!(path = %path.display(), blocks = document.blocks.len(), html, "exporting");

    if html {
        fs::write(&path, render_html(&document))?;
    } else {
        DocxWriter::new().write_to_path(&document, &path)?;
    }
    Ok(path)
}

fn default_output(title: &str, html: bool) -> PathBuf {
    let name = export_file_name(title);
    if html {
        Path::new(&name).with_extension("html")
    } else {
        PathBuf::from(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_domain::{MeetingMetadata, SummaryDocument};
    use tempfile::TempDir;

    fn record() -> SummaryRecord {
        let document = SummaryDocument {
            executive_summary: "Contract renewed.".to_string(),
            ..SummaryDocument::default()
        };
        SummaryRecord::new(MeetingMetadata::new("Vendor Call"), document)
    }

    #[test]
    fn test_default_output_names() {
        assert_eq!(
            default_output("Vendor Call", false),
            PathBuf::from("Vendor_Call_Summary.docx")
        );
        assert_eq!(
            default_output("Vendor Call", true),
            PathBuf::from("Vendor_Call_Summary.html")
        );
    }

    #[test]
    fn test_export_docx() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out.docx");

        let written = export_record(&record(), Some(target.clone()), false).unwrap();
        assert_eq!(written, target);
        let bytes = fs::read(&target).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_export_html() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out.html");

        export_record(&record(), Some(target.clone()), true).unwrap();
        let html = fs::read_to_string(&target).unwrap();
        assert!(html.contains("<h1>Vendor Call Summary</h1>"));
        assert!(html.contains("<p>Contract renewed.</p>"));
    }
}
