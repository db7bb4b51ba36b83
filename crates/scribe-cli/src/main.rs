//! Scribe CLI - meeting transcript summarizer.

use clap::Parser;
use scribe_cli::commands;
use scribe_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

/// Crates whose events are shown by default.
const LOG_TARGETS: &[&str] = &["scribe_cli", "scribe_llm", "scribe_summarizer", "scribe_render"];

#[tokio::main]
async fn main() {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> scribe_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Override profile if specified
    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Summarize(args) => commands::execute_summarize(args, &config, &formatter).await?,
        Command::Parse(args) => commands::execute_parse(args, &formatter).await?,
        Command::View(args) => commands::execute_view(args, &formatter).await?,
        Command::Export(args) => commands::execute_export(args, &formatter).await?,
        Command::Profile(args) => {
            commands::execute_profile(args, &mut config, &formatter).await?
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over the defaults.
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directives: Vec<String> = LOG_TARGETS
            .iter()
            .map(|target| format!("{}={}", target, level))
            .collect();
        EnvFilter::new(format!("warn,{}", directives.join(",")))
    });

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(verbose)
        .init();
}
