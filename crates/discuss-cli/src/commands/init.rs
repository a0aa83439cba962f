//! Init command
//!
//! Create the `.discuss/` directory with a default configuration.

use anyhow::{Context, Result};
use clap::Args;
use discuss_core::config::Config;
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments for the init command
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Force overwrite existing configuration
    #[arg(long)]
    pub force: bool,

    /// Directory to initialize (default: current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,
}

/// Execute the init command
pub fn execute(args: InitArgs) -> Result<()> {
    use colored::Colorize;

    let project_dir = match args.path {
        Some(path) => path,
        None => std::env::current_dir().context("Failed to resolve current directory")?,
    };

    let discuss_dir = project_dir.join(".discuss");
    let config_path = discuss_dir.join("config.toml");
    if config_path.exists() && !args.force {
        eprintln!(
            "{} discuss already initialized. Use --force to reinitialize.",
            "⚠".yellow()
        );
        return Ok(());
    }

    create_directory_structure(&discuss_dir)?;
    println!("{} Created {}", "✓".green(), discuss_dir.display());

    fs::write(&config_path, default_config()?).context("Failed to write config.toml")?;
    println!("{} Generated config.toml", "✓".green());

    println!("\n{}", "Next steps:".bold());
    println!("  1. Review .discuss/config.toml");
    println!("  2. Post a first comment:");
    println!();
    println!(
        "     {}",
        "discuss add --node <node> --user <you> --content \"Hello\"".cyan()
    );

    Ok(())
}

fn create_directory_structure(discuss_dir: &Path) -> Result<()> {
    fs::create_dir_all(discuss_dir.join("comments"))
        .with_context(|| format!("Failed to create {}", discuss_dir.display()))?;
    Ok(())
}

fn default_config() -> Result<String> {
    let body = Config::default().to_toml()?;
    Ok(format!("# discuss configuration\n\n{}", body))
}
