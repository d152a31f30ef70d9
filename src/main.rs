//! Airwatch CLI
//!
//! Terminal front end for the air-quality dashboard:
//! - Show the current reading for a place or a position
//! - Look up place suggestions
//! - Watch a live dashboard that refreshes while following a position
//! - Generate a default config file

use airwatch::config::{generate_default_config, Config, LoggingConfig};
use airwatch::dashboard::{Controller, CurrentOutcome, FetchRequest, LoadOutcome, SearchOutcome};
use airwatch::location::{Coordinate, FixedGeolocator, SEARCH_PROMPT};
use airwatch::refresh::RefreshTicker;
use airwatch::view::{ReadingView, TrendSeries, CONCENTRATION_UNIT, TREND_LABEL};
use airwatch::{HttpApi, Suggestion};
use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "airwatch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Air-quality dashboard for the terminal")]
#[command(long_about = "Airwatch shows the current AQI, pollutant sub-indices and the 24h PM2.5 trend\nfor your position or any searched place.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend API URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the current reading
    Current {
        /// Place name to look up
        #[arg(long, conflicts_with_all = ["lat", "lng"])]
        city: Option<String>,
        /// Latitude (default: from config)
        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Longitude (default: from config)
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,
    },

    /// Suggest places matching a partial name
    Search {
        /// Partial place name
        query: String,
    },

    /// Live dashboard. Type a place to search it, `?text` for suggestions,
    /// `:N` to pick suggestion N, `:r` to refresh, `:q` to quit
    Watch {
        /// Start with this place instead of the configured position
        #[arg(long, conflicts_with_all = ["lat", "lng"])]
        city: Option<String>,
        /// Latitude (default: from config)
        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Longitude (default: from config)
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("writing config to {}", path.display()))?;
                println!("Config written to {}", path.display());
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    init_tracing(&config.logging);
    tracing::info!("Airwatch v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!(base_url = %config.api.base_url, "Using backend");

    let api = HttpApi::new(config.api.http())?;
    let controller = Controller::new(api);

    match cli.command {
        Commands::Current { city, lat, lng } => {
            let request = match (city, lat.zip(lng)) {
                (Some(city), _) => FetchRequest::Place(city),
                (None, Some((lat, lng))) => {
                    locate(&controller, &config, Some(Coordinate::new(lat, lng))).await?;
                    FetchRequest::Current
                }
                (None, None) => {
                    locate(&controller, &config, config.location.coordinate()).await?;
                    FetchRequest::Current
                }
            };

            let outcome = controller.load(request).await?;
            if let Some(message) = outcome.error_message() {
                bail!("{}", message);
            }
            let state = controller.state();
            if let Some(view) = state.view() {
                print_reading(view, state.trend(), cli.format)?;
            }
        }

        Commands::Search { query } => match controller.suggest(&query).await {
            SearchOutcome::Suggestions(list) => print_suggestions(&list, cli.format)?,
            SearchOutcome::Skipped => bail!(
                "Query must be at least {} characters",
                airwatch::MIN_QUERY_LEN
            ),
            SearchOutcome::Cleared | SearchOutcome::Superseded => {
                bail!("Suggestion lookup failed")
            }
        },

        Commands::Watch { city, lat, lng } => {
            let position = lat
                .zip(lng)
                .map(|(lat, lng)| Coordinate::new(lat, lng))
                .or_else(|| config.location.coordinate());
            watch(&controller, &config, city, position, cli.format).await?
        }

        Commands::Config { .. } => {}
    }

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("airwatch={}", logging.level).into());

    // Logs go to stderr so stdout stays parseable
    if logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Resolve the device position, bounded by the configured wait
async fn locate(
    controller: &Controller<HttpApi>,
    config: &Config,
    position: Option<Coordinate>,
) -> anyhow::Result<Coordinate> {
    let geolocator = FixedGeolocator::new(position);
    match tokio::time::timeout(
        config.location.timeout(),
        controller.resolve_location(&geolocator),
    )
    .await
    {
        Ok(Ok(coord)) => Ok(coord),
        Ok(Err(e)) => bail!("{} ({})", SEARCH_PROMPT, e),
        Err(_) => bail!("{} (timed out)", SEARCH_PROMPT),
    }
}

/// One line of input in watch mode
#[derive(Debug, PartialEq)]
enum WatchCommand {
    Search(String),
    Suggest(String),
    Select(usize),
    Refresh,
    Quit,
    Empty,
    Unknown(String),
}

fn parse_watch_command(line: &str) -> WatchCommand {
    let line = line.trim();
    if line.is_empty() {
        return WatchCommand::Empty;
    }
    if let Some(partial) = line.strip_prefix('?') {
        return WatchCommand::Suggest(partial.to_string());
    }
    match line.strip_prefix(':') {
        Some("q") | Some("quit") => WatchCommand::Quit,
        Some("r") | Some("refresh") => WatchCommand::Refresh,
        Some(n) => match n.parse::<usize>() {
            Ok(n) if n >= 1 => WatchCommand::Select(n - 1),
            _ => WatchCommand::Unknown(line.to_string()),
        },
        None => WatchCommand::Search(line.to_string()),
    }
}

async fn watch(
    controller: &Controller<HttpApi>,
    config: &Config,
    city: Option<String>,
    position: Option<Coordinate>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut ticker = RefreshTicker::new();

    match city {
        Some(city) => {
            let outcome = controller.load(FetchRequest::Place(city)).await?;
            report(controller, &outcome, format)?;
        }
        None => match locate(controller, config, position).await {
            Ok(_) => {
                let outcome = controller.load(FetchRequest::Current).await?;
                report(controller, &outcome, format)?;
            }
            Err(e) => eprintln!("{}", e),
        },
    }
    ticker.sync(controller.state().auto_refresh());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Some(outcome) = controller.refresh_tick().await {
                    report(controller, &outcome, format)?;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_watch_command(&line) {
                    WatchCommand::Quit => break,
                    WatchCommand::Empty => {}
                    WatchCommand::Unknown(cmd) => eprintln!("Unknown command: {}", cmd),
                    WatchCommand::Refresh => match controller.load(FetchRequest::Current).await {
                        Ok(outcome) => report(controller, &outcome, format)?,
                        Err(e) => eprintln!("{}", e),
                    },
                    WatchCommand::Search(place) => {
                        let outcome = controller.load(FetchRequest::Place(place)).await?;
                        report(controller, &outcome, format)?;
                    }
                    WatchCommand::Suggest(partial) => match controller.suggest(&partial).await {
                        SearchOutcome::Suggestions(list) => print_suggestions(&list, format)?,
                        SearchOutcome::Skipped | SearchOutcome::Cleared => println!("No suggestions"),
                        SearchOutcome::Superseded => {}
                    },
                    WatchCommand::Select(index) => match controller.select_suggestion(index).await {
                        Some(result) => report(controller, &result?, format)?,
                        None => eprintln!("No suggestion {}", index + 1),
                    },
                }
                ticker.sync(controller.state().auto_refresh());
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    tracing::info!("Watch stopped");
    Ok(())
}

/// Print the outcome of a fetch sequence
fn report(
    controller: &Controller<HttpApi>,
    outcome: &LoadOutcome,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match &outcome.current {
        CurrentOutcome::Failed { message } => eprintln!("{}", message),
        CurrentOutcome::Superseded => {}
        CurrentOutcome::Rendered { .. } => {
            let state = controller.state();
            if let Some(view) = state.view() {
                print_reading(view, state.trend(), format)?;
            }
        }
    }
    Ok(())
}

fn print_reading(view: &ReadingView, trend: &TrendSeries, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let doc = serde_json::json!({ "reading": view, "trend": trend });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        OutputFormat::Table => print!("{}", render_table(view, trend)),
    }
    Ok(())
}

fn render_table(view: &ReadingView, trend: &TrendSeries) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", view.location));
    out.push_str(&format!(
        "AQI {}  {}  (dominant: {})\n",
        view.aqi, view.category, view.dominant_pollutant
    ));
    if !view.advisory.is_empty() {
        out.push_str(&format!("{}\n", view.advisory));
    }
    out.push('\n');

    out.push_str(&format!(
        "{:<10} | {:<14} | {:<10} | {}\n",
        "Pollutant", "Value", "Sub-index", "Level"
    ));
    out.push_str(&format!("{}\n", "-".repeat(52)));
    for card in &view.pollutants {
        out.push_str(&format!(
            "{:<10} | {:<14} | {:<10} | {}\n",
            card.code,
            format!("{} {}", card.value_text(), CONCENTRATION_UNIT),
            card.sub_index_text(),
            card.severity.map(|s| s.label()).unwrap_or("-"),
        ));
    }

    if !trend.is_empty() {
        out.push_str(&format!("\n{}\n", TREND_LABEL));
        for (label, value) in trend.iter() {
            out.push_str(&format!("  {}  {:>7.1}\n", label, value));
        }
    }

    if let Some(updated) = &view.last_updated {
        out.push_str(&format!("\nLast updated: {}\n", updated));
    }

    out
}

fn print_suggestions(list: &[Suggestion], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(list)?),
        OutputFormat::Table => {
            if list.is_empty() {
                println!("No suggestions");
            }
            for (i, suggestion) in list.iter().enumerate() {
                println!("{:>3}. {}", i + 1, suggestion.display());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use airwatch::view::{PollutantCard, Severity};

    #[test]
    fn test_parse_watch_commands() {
        assert_eq!(parse_watch_command("  "), WatchCommand::Empty);
        assert_eq!(parse_watch_command(":q"), WatchCommand::Quit);
        assert_eq!(parse_watch_command(":r"), WatchCommand::Refresh);
        assert_eq!(parse_watch_command(":2"), WatchCommand::Select(1));
        assert_eq!(parse_watch_command(":0"), WatchCommand::Unknown(":0".to_string()));
        assert_eq!(parse_watch_command("?del"), WatchCommand::Suggest("del".to_string()));
        assert_eq!(
            parse_watch_command(" New Delhi "),
            WatchCommand::Search("New Delhi".to_string())
        );
    }

    #[test]
    fn test_render_table() {
        let view = ReadingView {
            location: "Delhi".to_string(),
            aqi: "180".to_string(),
            category: "Moderate".to_string(),
            advisory: String::new(),
            dominant_pollutant: "PM2.5".to_string(),
            color: None,
            last_updated: Some("10:00:00".to_string()),
            pollutants: vec![PollutantCard {
                code: "PM2.5".to_string(),
                value: Some(72.5),
                sub_index: Some(180.0),
                severity: Some(Severity::Moderate),
            }],
        };
        let trend = TrendSeries {
            labels: vec!["09:00".to_string()],
            values: vec![70.0],
        };

        let table = render_table(&view, &trend);
        assert!(table.starts_with("Delhi\nAQI 180  Moderate  (dominant: PM2.5)\n"));
        assert!(table.contains("72.5 µg/m³"));
        assert!(table.contains("PM2.5 (24h)"));
        assert!(table.contains("  09:00     70.0"));
        assert!(table.ends_with("Last updated: 10:00:00\n"));
    }
}
