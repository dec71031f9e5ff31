//! Interactive command - location picker with background pre-fetch and pagination

use std::str::FromStr;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;

use super::{bootstrap, render};
use crate::domain::college::{INDIAN_STATES, MAJOR_CITIES};

const HELP: &str = "Commands:
  state <name>   pick a state (clears the city)
  city <name>    pick a city (clears the state)
  search         search the picked location
  more           show the next page of results
  states         list states and union territories
  cities         list major cities
  help           show this message
  quit           exit
";

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    State(String),
    City(String),
    Search,
    More,
    States,
    Cities,
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map(|(verb, rest)| (verb, rest.trim()))
            .unwrap_or((line, ""));

        match verb.to_lowercase().as_str() {
            "state" | "city" if rest.is_empty() => Err(format!("Usage: {} <name>", verb)),
            "state" => Ok(SessionCommand::State(rest.to_string())),
            "city" => Ok(SessionCommand::City(rest.to_string())),
            "search" | "s" => Ok(SessionCommand::Search),
            "more" | "m" => Ok(SessionCommand::More),
            "states" => Ok(SessionCommand::States),
            "cities" => Ok(SessionCommand::Cities),
            "help" | "?" => Ok(SessionCommand::Help),
            "quit" | "exit" | "q" => Ok(SessionCommand::Quit),
            other => Err(format!("Unknown command '{}'. Type `help` for commands.", other)),
        }
    }
}

/// Picked location; a state and a city are never picked together
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    state: Option<String>,
    city: Option<String>,
}

impl Selection {
    pub fn pick_state(&mut self, state: impl Into<String>) {
        self.state = Some(state.into());
        self.city = None;
    }

    pub fn pick_city(&mut self, city: impl Into<String>) {
        self.city = Some(city.into());
        self.state = None;
    }

    pub fn location(&self) -> Option<&str> {
        self.city
            .as_deref()
            .or(self.state.as_deref())
            .map(str::trim)
            .filter(|location| !location.is_empty())
    }
}

/// Resolve a picked name against a catalog, keeping free text as typed
fn canonical(name: &str, catalog: &[&str]) -> String {
    catalog
        .iter()
        .find(|known| known.eq_ignore_ascii_case(name.trim()))
        .map(|known| known.to_string())
        .unwrap_or_else(|| name.trim().to_string())
}

/// Run the interactive session
pub async fn run() -> anyhow::Result<()> {
    let config = bootstrap()?;
    let orchestrator = crate::create_orchestrator(&config)?;

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut selection = Selection::default();

    stdout.write_all(HELP.as_bytes()).await?;

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<SessionCommand>() {
            Ok(command) => command,
            Err(message) => {
                stdout.write_all(format!("{}\n", message).as_bytes()).await?;
                continue;
            }
        };

        debug!(?command, "Session command");

        let output = match command {
            SessionCommand::State(name) => {
                selection.pick_state(canonical(&name, INDIAN_STATES));
                picked(&orchestrator, &selection).await
            }
            SessionCommand::City(name) => {
                selection.pick_city(canonical(&name, MAJOR_CITIES));
                picked(&orchestrator, &selection).await
            }
            SessionCommand::Search => match selection.location() {
                Some(location) => {
                    stdout.write_all(b"Searching...\n").await?;
                    orchestrator.search(location).await;
                    render::render_state(&orchestrator.snapshot().await)
                }
                None => "Pick a state or city first.\n".to_string(),
            },
            SessionCommand::More => {
                if orchestrator.has_more().await {
                    orchestrator.load_more().await;
                    render::render_state(&orchestrator.snapshot().await)
                } else {
                    "No more results.\n".to_string()
                }
            }
            SessionCommand::States => format!("{}\n", INDIAN_STATES.join(", ")),
            SessionCommand::Cities => format!("{}\n", MAJOR_CITIES.join(", ")),
            SessionCommand::Help => HELP.to_string(),
            SessionCommand::Quit => break,
        };

        stdout.write_all(output.as_bytes()).await?;
    }

    Ok(())
}

async fn picked(
    orchestrator: &std::sync::Arc<crate::infrastructure::services::SearchOrchestrator>,
    selection: &Selection,
) -> String {
    match selection.location() {
        Some(location) => {
            orchestrator.schedule_background_search(location).await;
            format!("Selected {}. Type `search` to see colleges.\n", location)
        }
        None => "Please enter a state or city.\n".to_string(),
    }
}
