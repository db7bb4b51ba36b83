//! View command implementation.

use crate::cli::ViewArgs;
use crate::error::Result;
use crate::output::Formatter;
use scribe_summarizer::SummaryRecord;

/// Execute the view command.
pub async fn execute_view(args: ViewArgs, formatter: &Formatter) -> Result<()> {
    let record = SummaryRecord::load(&args.record)?;
    println!("{}", formatter.format_record(&record)?);
    Ok(())
}
