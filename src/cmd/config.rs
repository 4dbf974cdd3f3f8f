use std::io::{self, Write};

use clap::{Args, Subcommand};

use crate::config::{DEFAULT_BASE_URL, StoredConfig, ThemePreference, config_file_path};
use crate::error::{AppError, AppResult};

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Run the interactive configuration wizard.
    Init,
    /// Show the stored configuration.
    Show,
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Init => run_init(),
        ConfigCommand::Show => run_show(),
    }
}

fn run_init() -> AppResult<()> {
    let mut cfg = StoredConfig::load()?;

    println!("Configuring tix.");
    println!("Press Enter to keep the current value, '-' to clear it.");
    println!();

    apply_prompt(
        &format!("Backend base URL (default {DEFAULT_BASE_URL})"),
        &mut cfg.base_url,
    )?;
    apply_prompt("Theme (light/dark)", &mut cfg.theme)?;

    if let Some(theme) = &cfg.theme {
        if ThemePreference::from_str(theme).is_none() {
            return Err(AppError::Configuration(format!(
                "unknown theme '{theme}', expected light or dark"
            )));
        }
    }

    cfg.save()?;

    let path = config_file_path()?;
    println!("\nConfiguration saved to {}", path.display());
    Ok(())
}

fn run_show() -> AppResult<()> {
    let cfg = StoredConfig::load()?;
    let path = config_file_path()?;

    println!("Configuration file: {}", path.display());
    println!("Backend base URL: {}", display_value(&cfg.base_url));
    println!("Theme: {}", display_value(&cfg.theme));

    Ok(())
}

fn apply_prompt(field: &str, target: &mut Option<String>) -> AppResult<()> {
    match prompt(field, target.as_deref())? {
        PromptAction::Keep => {}
        PromptAction::Clear => *target = None,
        PromptAction::Set(value) => *target = Some(value),
    }
    Ok(())
}

fn prompt(field: &str, current: Option<&str>) -> AppResult<PromptAction> {
    let mut stdout = io::stdout();

    match current {
        Some(value) => write!(stdout, "{field} [{value}] (Enter to keep, '-' to clear): ")?,
        None => write!(stdout, "{field} (Enter to skip): ")?,
    }
    stdout.flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let trimmed = input.trim();

    if trimmed.is_empty() {
        Ok(PromptAction::Keep)
    } else if trimmed == "-" {
        Ok(PromptAction::Clear)
    } else {
        Ok(PromptAction::Set(trimmed.to_string()))
    }
}

fn display_value(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

enum PromptAction {
    Keep,
    Clear,
    Set(String),
}
