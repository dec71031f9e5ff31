use clap::Parser;
use college_finder::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Search(args) => cli::search::run(args).await,
        Command::Interactive => cli::interactive::run().await,
        Command::Doctor => cli::doctor::run().await,
    }
}
