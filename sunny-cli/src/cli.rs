use std::{fmt, sync::Arc};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, Select, Text};
use sunny_core::{
    Config, Place, PlaceViewModel, Repository, Selection, WeatherViewModel,
    repository_from_config,
    view_state::{NO_PLACES_NOTICE, WEATHER_FAILED_NOTICE},
};
use tracing::warn;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "sunny", version, about = "Sunny weather CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API token and language.
    Configure {
        /// Token to store; prompted for when absent.
        #[arg(long)]
        token: Option<String>,
    },

    /// Search places by name.
    Search {
        /// Place name, e.g. "北京" or "Beijing".
        query: String,

        /// Pick one of the results, save it and show its weather.
        #[arg(long)]
        pick: bool,
    },

    /// Show weather for coordinates, or for the saved place when none are given.
    Show {
        #[arg(long, requires = "lat")]
        lng: Option<String>,

        #[arg(long, requires = "lng")]
        lat: Option<String>,

        /// Display name for the coordinates.
        #[arg(long)]
        name: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { token } => configure(token),
            Command::Search { query, pick } => {
                let repository = open_repository()?;
                search(repository, &query, pick).await
            }
            Command::Show { lng, lat, name } => {
                let repository = open_repository()?;
                let selection = match (lng, lat) {
                    (Some(lng), Some(lat)) => Selection::new(lng, lat, name.unwrap_or_default()),
                    _ => saved_selection(&repository)?,
                };
                show(repository, selection).await
            }
        }
    }
}

fn open_repository() -> anyhow::Result<Arc<Repository>> {
    let config = Config::load()?;
    repository_from_config(&config)
}

fn configure(token: Option<String>) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let token = match token {
        Some(token) => token,
        None => Password::new("API token:")
            .without_confirmation()
            .prompt()
            .context("Failed to read API token")?,
    };
    if token.trim().is_empty() {
        bail!("API token must not be empty");
    }
    config.set_token(token.trim().to_string());

    let lang = Text::new("Language:")
        .with_default(config.lang())
        .prompt()
        .context("Failed to read language")?;
    config.lang = Some(lang);

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

/// Wraps a place so the picker can display it.
struct PlaceChoice(Place);

impl fmt::Display for PlaceChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0.name, self.0.address)
    }
}

async fn search(repository: Arc<Repository>, query: &str, pick: bool) -> anyhow::Result<()> {
    let screen = PlaceViewModel::new(Arc::clone(&repository));

    let query = query.trim();
    if query.is_empty() {
        screen.clear_search();
        bail!("Search query is empty");
    }

    screen.search_places(query).await?;

    let Some(outcome) = screen.latest_results() else {
        eprintln!("{NO_PLACES_NOTICE}");
        return Ok(());
    };
    if !screen.apply_results(&outcome) {
        if let Err(e) = &*outcome {
            warn!(error = %e, "place search failed");
        }
        eprintln!("{NO_PLACES_NOTICE}");
        return Ok(());
    }

    let places = screen.place_list();
    if places.is_empty() {
        eprintln!("{NO_PLACES_NOTICE}");
        return Ok(());
    }

    if !pick {
        print!("{}", render::places(&places));
        return Ok(());
    }

    let choices = places.into_iter().map(PlaceChoice).collect();
    let PlaceChoice(chosen) = Select::new("Pick a place:", choices)
        .prompt()
        .context("No place picked")?;

    screen.save_place(&chosen)?;
    show(repository, Selection::from(&chosen)).await
}

fn saved_selection(repository: &Repository) -> anyhow::Result<Selection> {
    if !repository.is_place_saved() {
        bail!(
            "No place saved yet.\n\
             Hint: run `sunny search <name> --pick` or pass --lng and --lat."
        );
    }
    let place = repository.saved_place()?;
    Ok(Selection::from(&place))
}

async fn show(repository: Arc<Repository>, selection: Selection) -> anyhow::Result<()> {
    let screen = WeatherViewModel::new(repository);
    screen.restore(selection);

    screen.refresh().await?;

    match screen.latest_weather().as_deref() {
        Some(Ok(weather)) => {
            print!("{}", render::weather(&screen.selection().place_name, weather));
        }
        Some(Err(e)) => {
            warn!(error = %e, "weather refresh failed");
            eprintln!("{WEATHER_FAILED_NOTICE}: {}", e.user_message());
        }
        None => eprintln!("{WEATHER_FAILED_NOTICE}"),
    }

    Ok(())
}
