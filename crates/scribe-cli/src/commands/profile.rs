//! Profile command implementation.

use crate::cli::{ProfileAction, ProfileArgs};
use crate::config::{Config, Profile};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use tabled::{builder::Builder, settings::Style};

/// Execute the profile command.
pub async fn execute_profile(
    args: ProfileArgs,
    config: &mut Config,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ProfileAction::List => list_profiles(config, formatter),
        ProfileAction::Show => show_active_profile(config, formatter),
        ProfileAction::Switch { name } => switch_profile(config, name, formatter),
        ProfileAction::Set {
            name,
            provider,
            model,
            endpoint,
            api_key_env,
            timeout,
        } => {
            let mut profile = Profile::new(provider, model);
            profile.endpoint = endpoint;
            profile.api_key_env = api_key_env;
            if let Some(timeout) = timeout {
                profile.timeout_secs = timeout;
            }
            set_profile(config, name, profile, formatter)
        }
        ProfileAction::Delete { name } => delete_profile(config, name, formatter),
    }
}

/// List all profiles.
fn list_profiles(config: &Config, formatter: &Formatter) -> Result<()> {
    if config.profiles.is_empty() {
        println!("{}", formatter.info("No profiles configured"));
        return Ok(());
    }

    println!("{}", profiles_table(config));
    Ok(())
}

fn profiles_table(config: &Config) -> String {
    let mut builder = Builder::default();
    builder.push_record(["", "Name", "Provider", "Model", "Endpoint"]);
    for (name, profile) in &config.profiles {
        let marker = if name == &config.active_profile { "*" } else { "" };
        let provider = profile.provider.to_string();
        builder.push_record([
            marker,
            name.as_str(),
            provider.as_str(),
            profile.model.as_str(),
            profile.endpoint.as_deref().unwrap_or("(default)"),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

/// Show the active profile.
fn show_active_profile(config: &Config, formatter: &Formatter) -> Result<()> {
    let profile = config.get_active_profile()?;

    println!("Active profile: {}", formatter.success(&config.active_profile));
    println!("  Provider: {}", profile.provider);
    println!("  Model: {}", profile.model);
    if let Some(endpoint) = &profile.endpoint {
        println!("  Endpoint: {}", endpoint);
    }
    if let Some(var) = profile.key_variable() {
        let state = if std::env::var(var).is_ok() { "set" } else { "not set" };
        println!("  API key: ${} ({})", var, state);
    }
    println!("  Timeout: {}s", profile.timeout_secs);

    Ok(())
}

/// Switch to a different profile.
fn switch_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    config.switch_profile(name.clone())?;
    config.save()?;
    println!(
        "{}",
        formatter.success(&format!("Switched to profile '{}'", name))
    );
    Ok(())
}

/// Create or update a profile.
fn set_profile(
    config: &mut Config,
    name: String,
    profile: Profile,
    formatter: &Formatter,
) -> Result<()> {
    if profile.model.trim().is_empty() {
        return Err(CliError::InvalidInput("Model name must not be empty".to_string()));
    }
    if profile.api_key_env.as_deref().is_some_and(|var| var.trim().is_empty()) {
        return Err(CliError::InvalidInput(
            "API key variable name must not be empty".to_string(),
        ));
    }

    let action = if config.profiles.contains_key(&name) {
        "Updated"
    } else {
        "Created"
    };

    config.set_profile(name.clone(), profile);
    config.save()?;

    println!(
        "{}",
        formatter.success(&format!("{} profile '{}'", action, name))
    );

    Ok(())
}

/// Delete a profile.
fn delete_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    if name == config.active_profile {
        return Err(CliError::NotPermitted(
            "Cannot delete the active profile".to_string(),
        ));
    }

    if config.profiles.remove(&name).is_some() {
        config.save()?;
        println!(
            "{}",
            formatter.success(&format!("Deleted profile '{}'", name))
        );
    } else {
        println!(
            "{}",
            formatter.warning(&format!("Profile '{}' does not exist", name))
        );
    }

    Ok(())
}
