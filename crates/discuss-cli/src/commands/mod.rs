//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod add;
pub mod common;
pub mod config;
pub mod delete;
pub mod discussion;
pub mod edit;
pub mod init;
pub mod list;
pub mod report;

use clap::{Parser, Subcommand};
use common::Context;
use std::path::PathBuf;

/// discuss - threaded, moderated comments on collaboration nodes
#[derive(Debug, Parser)]
#[command(name = "discuss")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding comment documents (overrides storage.data_dir)
    #[arg(long, global = true, env = "DISCUSS_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialize discuss in the current directory
    Init(init::InitArgs),

    /// Post a comment on a node or reply to a comment
    Add(add::AddArgs),

    /// List visible comments under a node or comment
    List(list::ListArgs),

    /// Edit one of your comments
    Edit(edit::EditArgs),

    /// Delete one of your comments
    Delete(delete::DeleteArgs),

    /// Report a comment as abusive
    Report(report::ReportArgs),

    /// List the participants of a discussion
    Discussion(discussion::DiscussionArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Run the CLI application
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Commands::Init(args) = cli.command {
        return init::execute(args);
    }

    let ctx = Context::load(cli.config.as_deref(), cli.data_dir.as_deref())?;

    match cli.command {
        Commands::Init(_) => Ok(()),
        Commands::Add(args) => add::execute(args, &ctx),
        Commands::List(args) => list::execute(args, &ctx),
        Commands::Edit(args) => edit::execute(args, &ctx),
        Commands::Delete(args) => delete::execute(args, &ctx),
        Commands::Report(args) => report::execute(args, &ctx),
        Commands::Discussion(args) => discussion::execute(args, &ctx),
        Commands::Config(cmd) => config::execute(cmd, &ctx),
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
