//! Config command
//!
//! Inspect and reset the discuss configuration.

use super::common::Context;
use anyhow::Result;
use clap::Subcommand;
use discuss_core::config::Config;
use std::fs;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate the configuration file
    Validate,

    /// Reset to default configuration
    Reset {
        /// Force reset without confirmation
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command
pub fn execute(cmd: ConfigCommand, ctx: &Context) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => show_config(ctx, json),
        ConfigCommand::Validate => validate_config(ctx),
        ConfigCommand::Reset { force } => reset_config(ctx, force),
    }
}

fn show_config(ctx: &Context, as_json: bool) -> Result<()> {
    use colored::Colorize;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&ctx.config)?);
        return Ok(());
    }

    println!("{}", "Configuration:".bold().underline());
    if ctx.config_path.exists() {
        println!("{}", ctx.config_path.display().to_string().dimmed());
    } else {
        println!("{}", "(built-in defaults)".dimmed());
    }
    println!();
    println!("{}", ctx.config.to_toml()?);

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    use colored::Colorize;

    if !ctx.config_path.exists() {
        eprintln!(
            "{} Configuration not found at {}. Run '{}' to create.",
            "⚠".yellow(),
            ctx.config_path.display(),
            "discuss init".cyan()
        );
        return Ok(());
    }

    // Loading already validated the file; report the interesting values
    ctx.config.validate()?;
    println!("{} Configuration is valid", "✓".green());
    println!(
        "  max comment length: {}",
        ctx.config.comments.max_length.to_string().cyan()
    );
    println!(
        "  max thread depth:   {}",
        ctx.config.threads.max_depth.to_string().cyan()
    );
    if ctx.config.moderation.categories.is_empty() {
        println!("  report categories:  {}", "any".cyan());
    } else {
        println!(
            "  report categories:  {}",
            ctx.config.moderation.categories.join(", ").cyan()
        );
    }

    Ok(())
}

fn reset_config(ctx: &Context, force: bool) -> Result<()> {
    use colored::Colorize;

    if !force {
        use dialoguer::Confirm;

        let confirmed = Confirm::new()
            .with_prompt("Reset configuration to defaults?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Reset cancelled.");
            return Ok(());
        }
    }

    let config_path = &ctx.config_path;
    if config_path.exists() {
        let backup_path = format!(
            "{}.backup-{}",
            config_path.display(),
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        );
        fs::copy(config_path, &backup_path)?;
        println!("{} Backed up to {}", "✓".green(), backup_path);
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(config_path, Config::default().to_toml()?)?;

    println!("{} Configuration reset to defaults.", "✓".green());

    Ok(())
}
