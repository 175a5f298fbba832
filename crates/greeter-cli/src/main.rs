use anyhow::Result;
use clap::Parser;

mod args;
mod cmd;
mod context;
mod explorer;
mod output;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = args::Cli::parse();
    output::init(cli.json, cli.verbose);

    cmd::dispatch(cli).await
}
