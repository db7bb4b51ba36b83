//! Parse command implementation.

use super::read_input;
use crate::cli::ParseArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use scribe_domain::MeetingMetadata;
use scribe_summarizer::{clean, parse, SummaryRecord};

/// Execute the parse command.
pub async fn execute_parse(args: ParseArgs, formatter: &Formatter) -> Result<()> {
    let markdown = read_input(&args.markdown)?;
    let record = parse_record(&markdown, args.meeting.metadata())?;

    if let Some(path) = &args.save {
        record.save(path)?;
        eprintln!("{}", formatter.record_saved(&record, path));
    }

    println!("{}", formatter.format_record(&record)?);
    Ok(())
}

/// Sanitize and parse `markdown` into a record; no provider is involved.
pub fn parse_record(markdown: &str, metadata: MeetingMetadata) -> Result<SummaryRecord> {
    let cleaned = clean(markdown);
    if cleaned.trim().is_empty() {
        return Err(CliError::InvalidInput("Summary Markdown is empty".to_string()));
    }

    let mut document = parse(&cleaned);
    document.raw_markdown = cleaned;
    Ok(SummaryRecord::new(metadata, document))
}
