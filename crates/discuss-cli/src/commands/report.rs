//! Report command

use super::common::{ActorArgs, Context, NodeArgs};
use anyhow::Result;
use clap::Args;
use discuss_core::api::ApiRequest;
use discuss_core::thread::ReportAbuseRequest;

/// Arguments for the report command
#[derive(Debug, Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub node: NodeArgs,

    #[command(flatten)]
    pub actor: ActorArgs,

    /// Id of the comment to report
    pub cid: String,

    /// Report category, e.g. "spam"
    #[arg(long)]
    pub category: String,

    /// Optional explanation
    #[arg(long)]
    pub text: Option<String>,
}

/// Execute the report command
pub fn execute(args: ReportArgs, ctx: &Context) -> Result<()> {
    let request = ApiRequest::ReportAbuse {
        cid: args.cid,
        body: ReportAbuseRequest {
            category: Some(args.category),
            text: args.text,
        },
    };
    ctx.call(&args.node, &args.actor, request)
}
