//! CLI argument parsing and command definitions.

use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use scribe_domain::MeetingMetadata;
use scribe_llm::ProviderKind;
use std::path::PathBuf;

/// Scribe - meeting transcript summarizer.
#[derive(Debug, Parser)]
#[command(name = "scribe")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file (defaults to ~/.scribe/config.toml)
    #[arg(short, long, global = true, env = "SCRIBE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Profile to use
    #[arg(short, long, global = true, env = "SCRIBE_PROFILE")]
    pub profile: Option<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Terminal view with tables (default)
    Table,
    /// Summary Markdown
    Markdown,
    /// Full record as JSON
    Json,
    /// Standalone HTML page
    Html,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => OutputFormat::Table,
            CliFormat::Markdown => OutputFormat::Markdown,
            CliFormat::Json => OutputFormat::Json,
            CliFormat::Html => OutputFormat::Html,
        }
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Summarize a transcript with the active provider
    Summarize(SummarizeArgs),

    /// Parse an existing Markdown summary without calling a provider
    Parse(ParseArgs),

    /// Print a saved summary record
    View(ViewArgs),

    /// Export a saved summary record to DOCX or HTML
    Export(ExportArgs),

    /// Manage provider profiles
    Profile(ProfileArgs),
}

/// Meeting details shared by `summarize` and `parse`.
#[derive(Debug, Clone, Args)]
pub struct MeetingArgs {
    /// Meeting title
    #[arg(short, long, default_value = "Meeting Summary")]
    pub title: String,

    /// Meeting date
    #[arg(short, long)]
    pub date: Option<String>,

    /// Meeting duration
    #[arg(long)]
    pub duration: Option<String>,
}

impl MeetingArgs {
    /// Metadata for the record
    pub fn metadata(&self) -> MeetingMetadata {
        let mut metadata = MeetingMetadata::new(self.title.as_str());
        if let Some(date) = &self.date {
            metadata = metadata.with_date(date.as_str());
        }
        if let Some(duration) = &self.duration {
            metadata = metadata.with_duration(duration.as_str());
        }
        metadata
    }
}

/// Arguments for the summarize command.
#[derive(Debug, Parser)]
pub struct SummarizeArgs {
    /// Transcript file (`-` reads stdin)
    pub transcript: PathBuf,

    #[command(flatten)]
    pub meeting: MeetingArgs,

    /// Persona instructions for the summary
    #[arg(long)]
    pub persona: Option<String>,

    /// Extra context about the meeting
    #[arg(long, conflicts_with = "context_file")]
    pub context: Option<String>,

    /// Read the extra context from a file
    #[arg(long)]
    pub context_file: Option<PathBuf>,

    /// Pipeline preset (default, thorough, fast); overrides [summarizer] in the config
    #[arg(long)]
    pub preset: Option<String>,

    /// Save the summary record as JSON
    #[arg(short, long)]
    pub save: Option<PathBuf>,
}

/// Arguments for the parse command.
#[derive(Debug, Parser)]
pub struct ParseArgs {
    /// Markdown summary file (`-` reads stdin)
    pub markdown: PathBuf,

    #[command(flatten)]
    pub meeting: MeetingArgs,

    /// Save the summary record as JSON
    #[arg(short, long)]
    pub save: Option<PathBuf>,
}

/// Arguments for the view command.
#[derive(Debug, Parser)]
pub struct ViewArgs {
    /// Saved summary record
    pub record: PathBuf,
}

/// Arguments for the export command.
#[derive(Debug, Parser)]
pub struct ExportArgs {
    /// Saved summary record
    pub record: PathBuf,

    /// Output file (defaults to <Title>_Summary.docx)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write HTML instead of DOCX
    #[arg(long)]
    pub html: bool,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,

        /// Provider (openai, ollama, mock)
        #[arg(long)]
        provider: ProviderKind,

        /// Model name
        #[arg(short, long)]
        model: String,

        /// Base URL override
        #[arg(short, long)]
        endpoint: Option<String>,

        /// Environment variable holding the API key
        #[arg(long)]
        api_key_env: Option<String>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_summarize_arguments() {
        let cli = Cli::try_parse_from([
            "scribe",
            "--format",
            "markdown",
            "summarize",
            "call.txt",
            "--title",
            "Q3 Planning",
            "--date",
            "2024-07-01",
            "--persona",
            "Chief of staff",
            "--save",
            "q3.json",
        ])
        .unwrap();

        assert_eq!(cli.format, Some(CliFormat::Markdown));
        let Command::Summarize(args) = cli.command else {
            panic!("expected summarize");
        };
        assert_eq!(args.transcript, PathBuf::from("call.txt"));
        assert_eq!(args.persona.as_deref(), Some("Chief of staff"));
        assert_eq!(args.save, Some(PathBuf::from("q3.json")));

        let metadata = args.meeting.metadata();
        assert_eq!(metadata.title, "Q3 Planning");
        assert_eq!(metadata.date, "2024-07-01");
        assert_eq!(metadata.duration_or_unknown(), "unknown duration");
    }

    #[test]
    fn test_default_title() {
        let cli = Cli::try_parse_from(["scribe", "parse", "summary.md"]).unwrap();
        let Command::Parse(args) = cli.command else {
            panic!("expected parse");
        };
        assert_eq!(args.meeting.metadata().title, "Meeting Summary");
    }

    #[test]
    fn test_context_sources_conflict() {
        let result = Cli::try_parse_from([
            "scribe",
            "summarize",
            "call.txt",
            "--context",
            "inline",
            "--context-file",
            "notes.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "scribe", "export", "rec.json", "--html", "--no-color", "-v", "-p", "local",
        ])
        .unwrap();
        assert!(cli.no_color);
        assert!(cli.verbose);
        assert_eq!(cli.profile.as_deref(), Some("local"));
        let Command::Export(args) = cli.command else {
            panic!("expected export");
        };
        assert!(args.html);
        assert_eq!(args.output, None);
    }

    #[test]
    fn test_profile_set_parses_provider() {
        let cli = Cli::try_parse_from([
            "scribe", "profile", "set", "work", "--provider", "Ollama", "--model", "mistral",
        ])
        .unwrap();
        let Command::Profile(ProfileArgs {
            action: ProfileAction::Set { provider, model, .. },
        }) = cli.command
        else {
            panic!("expected profile set");
        };
        assert_eq!(provider, ProviderKind::Ollama);
        assert_eq!(model, "mistral");

        assert!(Cli::try_parse_from([
            "scribe", "profile", "set", "x", "--provider", "gemini", "--model", "m",
        ])
        .is_err());
    }
}
