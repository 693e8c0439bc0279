//! automerge - merge a pull request from CI once it is ready

mod cli;

use clap::Parser;
use cli::{MergeArgs, MergeContext, run_merge};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "automerge",
    version,
    about = "Merge a pull request once its title marker and status checks are in place"
)]
struct Cli {
    #[command(flatten)]
    args: MergeArgs,

    /// Log debug output from the merge gate
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "info,pr_automerge=debug,automerge=debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli.args).await {
        // Surface as a workflow annotation before failing the step
        anstream::eprintln!("::error::{e}");
        return Err(e.into());
    }

    Ok(())
}

async fn run(args: MergeArgs) -> pr_automerge::error::Result<()> {
    let ctx = MergeContext::new(args)?;
    run_merge(ctx).await
}
