use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use inquire::{CustomType, Select, Text};
use roadwx_core::{
    AdviceBatch, Config, GeoPoint, RouteProviderId,
    geo::polyline_length_m,
    route::{default_provider_from_config, route_or_straight_line},
};
use std::{fs, io::Read};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "roadwx", version, about = "Road-weather advisories along a route")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively edit routing and caution thresholds.
    Configure,

    /// Parse a single advisory line.
    Parse {
        /// Advisory text, e.g. "STEHE (Steingrímsfjarðarheiði): wind 12 m/s, icy".
        line: String,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Interpret a batch of advisory lines with station data.
    Interpret {
        /// Path to a JSON batch document, or "-" for stdin.
        input: String,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Fetch a road-following route between waypoints.
    Route {
        /// Waypoint as "lon,lat"; repeat for each stop, at least two.
        #[arg(long = "waypoint", value_parser = parse_waypoint, required = true, num_args = 1)]
        waypoints: Vec<GeoPoint>,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Parse { line, json } => {
                let config = Config::load()?;
                let parsed = config.engine()?.parser().parse(&line);

                if json {
                    println!("{}", serde_json::to_string_pretty(&parsed)?);
                } else {
                    print!("{}", render::parsed(&parsed));
                }
                Ok(())
            }
            Command::Interpret { input, json } => {
                let config = Config::load()?;
                let batch = read_batch(&input)?;
                let engine = config.engine()?;
                let records = engine.run_batch(&batch);

                if json {
                    println!("{}", serde_json::to_string_pretty(&records)?);
                } else {
                    for (station, record) in batch.stations.iter().zip(&records) {
                        print!("{}", render::classified(station, record, engine.classifier()));
                    }
                }
                Ok(())
            }
            Command::Route { waypoints, json } => {
                if waypoints.len() < 2 {
                    return Err(anyhow!("At least two --waypoint values are required."));
                }

                let config = Config::load()?;
                let provider = default_provider_from_config(&config)?;
                let route =
                    route_or_straight_line(provider.as_ref(), &waypoints, config.routing.retry_policy())
                        .await;

                if json {
                    let pairs: Vec<[f64; 2]> = route.iter().map(|p| [p.lat, p.lon]).collect();
                    println!("{}", serde_json::to_string(&pairs)?);
                } else {
                    println!(
                        "Route: {} points, {:.1} km",
                        route.len(),
                        polyline_length_m(&route) / 1000.0
                    );
                }
                Ok(())
            }
        }
    }
}

fn read_batch(input: &str) -> Result<AdviceBatch> {
    let contents = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read batch from stdin")?;
        buf
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read batch file: {input}"))?
    };

    serde_json::from_str(&contents).with_context(|| format!("Failed to parse batch JSON: {input}"))
}

fn parse_waypoint(value: &str) -> Result<GeoPoint, String> {
    let (lon, lat) = value
        .split_once(',')
        .ok_or_else(|| format!("expected \"lon,lat\", got '{value}'"))?;
    let lon: f64 = lon.trim().parse().map_err(|e| format!("invalid longitude: {e}"))?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("invalid latitude: {e}"))?;

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(format!("coordinates out of range: '{value}'"));
    }

    Ok(GeoPoint::new(lat, lon))
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let providers: Vec<&str> = RouteProviderId::all().iter().map(|id| id.as_str()).collect();
    let current = providers
        .iter()
        .position(|p| *p == config.routing.provider)
        .unwrap_or(0);
    let provider = Select::new("Route provider:", providers)
        .with_starting_cursor(current)
        .prompt()?;
    config.set_route_provider(RouteProviderId::try_from(provider)?);

    if provider == RouteProviderId::Osrm.as_str() {
        let base_url = Text::new("OSRM base URL:")
            .with_default(&config.routing.base_url)
            .prompt()?;
        config.routing.base_url = base_url;
    }

    let t = &mut config.thresholds;
    t.wind_ms = CustomType::<f64>::new("Caution above wind (m/s):")
        .with_default(t.wind_ms)
        .prompt()?;
    t.gust_ms = CustomType::<f64>::new("Caution above gusts (m/s):")
        .with_default(t.gust_ms)
        .prompt()?;
    t.visibility_m = CustomType::<f64>::new("Caution below visibility (m):")
        .with_default(t.visibility_m)
        .prompt()?;
    t.temp_c = CustomType::<f64>::new("Caution below temperature (°C):")
        .with_default(t.temp_c)
        .prompt()?;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}
