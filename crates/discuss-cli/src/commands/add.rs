//! Add command

use super::common::{ActorArgs, Context, NodeArgs};
use anyhow::Result;
use clap::Args;
use discuss_core::api::ApiRequest;
use discuss_core::thread::AddCommentRequest;

/// Arguments for the add command
#[derive(Debug, Args)]
pub struct AddArgs {
    #[command(flatten)]
    pub node: NodeArgs,

    #[command(flatten)]
    pub actor: ActorArgs,

    /// Comment text
    #[arg(long)]
    pub content: String,

    /// "public" or "private"
    #[arg(long, default_value = "public")]
    pub visibility: String,

    /// Id of the comment to reply to
    #[arg(long)]
    pub reply_to: Option<String>,
}

/// Execute the add command
pub fn execute(args: AddArgs, ctx: &Context) -> Result<()> {
    let mut body = AddCommentRequest::new(args.content, args.visibility);
    if let Some(parent) = args.reply_to {
        body = body.reply_to(parent);
    }

    ctx.call(&args.node, &args.actor, ApiRequest::AddComment(body))
}
