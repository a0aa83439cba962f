//! List command

use super::common::{ActorArgs, Context, NodeArgs};
use anyhow::Result;
use clap::Args;
use discuss_core::api::ApiRequest;

/// Arguments for the list command
#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub node: NodeArgs,

    #[command(flatten)]
    pub actor: ActorArgs,

    /// Comment id whose replies to list (default: top-level comments)
    #[arg(long)]
    pub target: Option<String>,

    /// Print thread totals for the node instead of the comments
    #[arg(long)]
    pub stats: bool,
}

/// Execute the list command
pub fn execute(args: ListArgs, ctx: &Context) -> Result<()> {
    if args.stats {
        return print_stats(&args, ctx);
    }

    let request = ApiRequest::ListComments {
        target: args.target.clone(),
    };
    ctx.call(&args.node, &args.actor, request)
}

fn print_stats(args: &ListArgs, ctx: &Context) -> Result<()> {
    use colored::Colorize;

    let store = ctx.open_store()?;
    let stats = store.thread_stats(&args.node.node())?;

    println!("{} {}", "Thread".bold(), args.node.node.cyan());
    println!("  total:    {}", stats.total);
    println!("  live:     {}", stats.live.to_string().green());
    println!("  edited:   {}", stats.edited);
    println!("  deleted:  {}", stats.deleted.to_string().dimmed());
    println!("  private:  {}", stats.private);
    if stats.reported > 0 {
        println!("  reported: {}", stats.reported.to_string().red());
    } else {
        println!("  reported: {}", stats.reported);
    }

    Ok(())
}
