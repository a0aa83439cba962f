//! Delete command

use super::common::{ActorArgs, Context, NodeArgs};
use anyhow::Result;
use clap::Args;
use discuss_core::api::ApiRequest;

/// Arguments for the delete command
#[derive(Debug, Args)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub node: NodeArgs,

    #[command(flatten)]
    pub actor: ActorArgs,

    /// Id of the comment to delete
    pub cid: String,

    /// Skip confirmation
    #[arg(long, short)]
    pub yes: bool,
}

/// Execute the delete command
pub fn execute(args: DeleteArgs, ctx: &Context) -> Result<()> {
    if !args.yes {
        use dialoguer::Confirm;

        let confirmed = Confirm::new()
            .with_prompt(format!("Delete comment {}?", args.cid))
            .default(false)
            .interact()?;

        if !confirmed {
            eprintln!("Cancelled.");
            return Ok(());
        }
    }

    let request = ApiRequest::DeleteComment { cid: args.cid };
    ctx.call(&args.node, &args.actor, request)
}
