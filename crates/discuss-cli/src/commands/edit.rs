//! Edit command

use super::common::{ActorArgs, Context, NodeArgs};
use anyhow::Result;
use clap::Args;
use discuss_core::api::ApiRequest;
use discuss_core::thread::EditCommentRequest;

/// Arguments for the edit command
#[derive(Debug, Args)]
pub struct EditArgs {
    #[command(flatten)]
    pub node: NodeArgs,

    #[command(flatten)]
    pub actor: ActorArgs,

    /// Id of the comment to edit
    pub cid: String,

    /// Replacement text
    #[arg(long)]
    pub content: String,

    /// "public" or "private"
    #[arg(long, default_value = "public")]
    pub visibility: String,
}

/// Execute the edit command
pub fn execute(args: EditArgs, ctx: &Context) -> Result<()> {
    let request = ApiRequest::EditComment {
        cid: args.cid,
        body: EditCommentRequest::new(args.content, args.visibility),
    };
    ctx.call(&args.node, &args.actor, request)
}
