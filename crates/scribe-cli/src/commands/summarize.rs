//! Summarize command implementation.

use super::read_input;
use crate::cli::SummarizeArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use scribe_llm::ConfiguredProvider;
use scribe_summarizer::{Summarizer, SummarizerConfig, SummaryRequest};
use tracing::debug;

/// Execute the summarize command.
pub async fn execute_summarize(
    args: SummarizeArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let transcript = read_input(&args.transcript)?;
    let context = match (&args.context, &args.context_file) {
        (Some(text), _) => Some(text.clone()),
        (None, Some(path)) => Some(read_input(path)?),
        (None, None) => None,
    };

    let summarizer_config = summarizer_config(config, args.preset.as_deref())?;
    let profile = config.get_active_profile()?;
    let provider = ConfiguredProvider::from_config(&profile.provider_config()?)?;
    debug!(profile = %config.active_profile, provider = %profile.provider, model = %profile.model, "provider ready");

    let summarizer = Summarizer::new(provider, summarizer_config)?;

    let mut request = SummaryRequest::new(transcript).with_metadata(args.meeting.metadata());
    if let Some(persona) = args.persona {
        request = request.with_persona(persona);
    }
    if let Some(context) = context {
        request = request.with_context(context);
    }

    eprintln!(
        "{}",
        formatter.info(&format!(
            "Summarizing {} characters with {} ({})",
            request.transcript.chars().count(),
            profile.model,
            profile.provider
        ))
    );

    let record = summarizer.generate(&request).await?;

    if let Some(path) = &args.save {
        record.save(path)?;
        eprintln!("{}", formatter.record_saved(&record, path));
    }

    println!("{}", formatter.format_record(&record)?);
    Ok(())
}

/// The preset named on the command line, else the `[summarizer]` table.
fn summarizer_config(config: &Config, preset: Option<&str>) -> Result<SummarizerConfig> {
    match preset {
        None => Ok(config.summarizer.clone()),
        Some(name) => {
            let mut preset = SummarizerConfig::preset(name).ok_or_else(|| {
                CliError::InvalidInput(format!(
                    "Unknown preset '{}' (expected default, thorough or fast)",
                    name
                ))
            })?;
            preset.host_organization = config.summarizer.host_organization.clone();
            Ok(preset)
        }
    }
}
