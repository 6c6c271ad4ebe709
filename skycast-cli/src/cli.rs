use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use skycast_core::{
    Config, IpLocationSource, LocationCycle, LocationSource, SearchCycle, WeatherProvider,
    provider_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Terminal weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key used by the dashboard.
    Configure,

    /// Run the live dashboard: weather where you are, plus city search.
    Watch {
        /// Skip geolocation entirely (no position lookup, no location weather).
        #[arg(long)]
        no_locate: bool,
    },

    /// Look up current weather for a city once and exit.
    Search {
        /// City name, e.g. "Delhi".
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Watch { no_locate } => watch(no_locate).await,
            Command::Search { city } => search(city).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Text::new("OpenWeather API key:")
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );

    Ok(())
}

async fn search(city: String) -> anyhow::Result<()> {
    let config = Config::load()?;
    let provider: Arc<dyn WeatherProvider> = Arc::new(provider_from_config(&config)?);

    let mut cycle = SearchCycle::new(provider, config.default_city.clone());
    cycle.search(city).await;

    print!("{}", render::search_panel(cycle.state()));

    Ok(())
}

async fn watch(no_locate: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let provider: Arc<dyn WeatherProvider> = Arc::new(provider_from_config(&config)?);

    let source: Option<Arc<dyn LocationSource>> = if no_locate {
        None
    } else {
        Some(Arc::new(IpLocationSource::new()?))
    };

    let handle = LocationCycle::new(provider.clone(), source).spawn(config.refresh_interval());
    let mut location_rx = handle.state();

    let mut search = SearchCycle::new(provider, config.default_city.clone());
    search.activate().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("Type a city name and press Enter to search. Ctrl-D quits.\n");

    let location = location_rx.borrow_and_update().clone();
    render::draw(&location, search.state());

    loop {
        tokio::select! {
            changed = location_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let location = location_rx.borrow_and_update().clone();
                render::draw(&location, search.state());
            }
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };
                search.set_query(line.trim());
                search.submit().await;

                let location = location_rx.borrow().clone();
                render::draw(&location, search.state());
            }
        }
    }

    handle.deactivate().await;

    Ok(())
}
