//! Discussion command

use super::common::{ActorArgs, Context, NodeArgs};
use anyhow::Result;
use clap::Args;
use discuss_core::api::ApiRequest;

/// Arguments for the discussion command
#[derive(Debug, Args)]
pub struct DiscussionArgs {
    #[command(flatten)]
    pub node: NodeArgs,

    #[command(flatten)]
    pub actor: ActorArgs,

    /// Comment id to start from (default: the whole node)
    #[arg(long)]
    pub target: Option<String>,
}

/// Execute the discussion command
pub fn execute(args: DiscussionArgs, ctx: &Context) -> Result<()> {
    let request = ApiRequest::Discussion {
        target: args.target.clone(),
    };
    ctx.call(&args.node, &args.actor, request)
}
