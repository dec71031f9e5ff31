//! CLI module for College Finder
//!
//! Provides subcommands for looking up colleges:
//! - `search`: one-shot search for a location
//! - `interactive`: pick a state or city and browse results page by page
//! - `doctor`: show credential and configuration diagnostics

pub mod doctor;
pub mod interactive;
pub mod render;
pub mod search;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// College Finder - IT and Management colleges across India
#[derive(Parser)]
#[command(name = "college-finder")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Search colleges in a state or city
    Search(search::SearchArgs),

    /// Interactive session with location picker and pagination
    Interactive,

    /// Show API key status and effective settings
    Doctor,
}

/// Load `.env` and configuration, then install logging
fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    Ok(config)
}
