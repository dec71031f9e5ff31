//! Search command - one foreground search, printed as result cards

use clap::Args;
use tracing::info;

use super::{bootstrap, render};
use crate::domain::college::is_known_location;

/// Arguments for the search command
#[derive(Args, Clone)]
pub struct SearchArgs {
    /// State or city to search, e.g. "Maharashtra" or "Pune"
    pub location: String,

    /// Print every result instead of the first page
    #[arg(long)]
    pub all: bool,

    /// Print the results as JSON
    #[arg(long, conflicts_with = "all")]
    pub json: bool,
}

/// Run a single search
pub async fn run(args: SearchArgs) -> anyhow::Result<()> {
    let config = bootstrap()?;
    let location = args.location.trim();

    if location.is_empty() {
        anyhow::bail!("Please enter a state or city");
    }

    if !is_known_location(location) {
        info!(location = %location, "Location is not in the built-in catalog");
    }

    let orchestrator = crate::create_orchestrator(&config)?;
    orchestrator.search(location).await;

    let mut state = orchestrator.snapshot().await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&state.colleges)?);
        return Ok(());
    }

    if args.all {
        state.display_count = state.total();
    }

    print!("{}", render::render_state(&state));

    Ok(())
}
