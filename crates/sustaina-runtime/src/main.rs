//! `sustaina` command-line entry point.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use su_01_impact_ledger::{ActionKind, LedgerState};
use su_03_initiative_map::{Coordinate, InitiativeType};
use sustaina_runtime::{InitiativeListing, RuntimeConfig, ScanSummary, SustainaApp};
use sustaina_telemetry::{init_telemetry, TelemetryConfig};

/// Sustaina: track your environmental impact
#[derive(Parser, Debug)]
#[command(name = "sustaina", version)]
#[command(about = "Log sustainable actions, complete daily challenges, scan waste and find local initiatives")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "SU_CONFIG")]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Debug logging (overrides SU_LOG_LEVEL)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show stats, achievements, challenges and streak
    Status,
    /// Record a sustainable action
    LogAction {
        /// carbon | waste | trees
        #[arg(short, long)]
        kind: ActionKind,
        #[arg(short = 'n', long, allow_negative_numbers = true)]
        value: f64,
    },
    /// Mark today's challenge as done
    CompleteChallenge { id: String },
    /// Start a new challenge period if the date has changed
    NewPeriod,
    /// Classify an item photo and show recycling guidance
    Scan {
        image: PathBuf,
        /// Count a recyclable item as one unit of waste diverted
        #[arg(long)]
        log: bool,
    },
    /// List climate initiatives
    Initiatives {
        /// solar | reforestation | waste-collection | water-conservation
        #[arg(short, long)]
        kind: Option<InitiativeType>,
        /// Sort by distance from LAT,LON
        #[arg(long, value_parser = parse_coordinate)]
        near: Option<Coordinate>,
    },
}

fn parse_coordinate(raw: &str) -> Result<Coordinate, String> {
    let (lat, lon) = raw
        .split_once(',')
        .ok_or_else(|| "expected LAT,LON".to_string())?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("latitude: {e}"))?;
    let lon: f64 = lon.trim().parse().map_err(|e| format!("longitude: {e}"))?;
    Coordinate::new(lat, lon).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut telemetry = TelemetryConfig::from_env();
    if cli.verbose {
        telemetry = telemetry.with_log_level("debug");
    }
    let _guard = init_telemetry(telemetry).context("initializing logging")?;

    let config = RuntimeConfig::load(cli.config.as_deref())?;
    let mut app = SustainaApp::open(config).await?;

    let json = cli.json;
    match cli.command {
        Command::Status => print_state(&app.status(), json)?,
        Command::LogAction { kind, value } => {
            let outcome = app.log_action(kind, value).await?;
            if json {
                print_json(&outcome)?;
            } else {
                println!("Logged {} {}", value, kind);
                for achievement in &outcome.newly_unlocked {
                    println!(
                        "Achievement unlocked: {} (+{} points)",
                        achievement.title, achievement.points
                    );
                }
                println!("Total points: {}", outcome.snapshot.total_points);
            }
        }
        Command::CompleteChallenge { id } => {
            let outcome = app.complete_challenge(&id).await?;
            if json {
                print_json(&outcome)?;
            } else if outcome.completed {
                println!(
                    "Challenge {} completed (+{} points), streak {}",
                    id, outcome.points_awarded, outcome.streak_count
                );
            } else {
                println!("Challenge {} was already completed", id);
            }
        }
        Command::NewPeriod => {
            let rolled = app.new_period().await?;
            if json {
                print_json(&serde_json::json!({ "rolled": rolled }))?;
            } else if rolled {
                println!("New challenge period started");
            } else {
                println!("Current period is still active");
            }
        }
        Command::Scan { image, log } => {
            let summary = app.scan(&image, log).await?;
            print_scan(&summary, json)?;
        }
        Command::Initiatives { kind, near } => {
            print_initiatives(&app.initiatives(kind, near), json)?;
        }
    }

    app.close().await
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_state(state: &LedgerState, json: bool) -> Result<()> {
    if json {
        return print_json(state);
    }

    println!("Period {}", state.period);
    println!(
        "Carbon saved: {:.1} kg | Waste diverted: {:.1} | Trees planted: {}",
        state.stats.carbon_saved, state.stats.waste_diverted, state.stats.trees_planted
    );
    println!(
        "Points: {} | Streak: {} (longest {}) | Percentile: {} of {}",
        state.total_points,
        state.streak_count,
        state.longest_streak,
        state.community.percentile_ranking,
        state.community.total_participants
    );
    println!("Achievements:");
    for a in &state.achievements {
        let mark = if a.is_unlocked { "x" } else { " " };
        println!("  [{}] {} ({} pts) - {}", mark, a.title, a.points, a.description);
    }
    println!("Today's challenges:");
    for c in &state.challenges {
        let mark = if c.is_completed { "x" } else { " " };
        println!("  [{}] {} ({}, {} pts) - {}", mark, c.id, c.kind, c.points, c.title);
    }
    Ok(())
}

fn print_scan(summary: &ScanSummary, json: bool) -> Result<()> {
    if json {
        return print_json(summary);
    }

    let guide = &summary.report.guide;
    println!("{}", guide.title);
    println!("{}", guide.item_line);
    println!("{}", guide.message);
    for step in &guide.instructions {
        println!("  - {}", step);
    }
    if let Some(outcome) = &summary.logged {
        println!("Logged 1 item, waste diverted: {}", outcome.snapshot.stats.waste_diverted);
    }
    Ok(())
}

fn print_initiatives(listings: &[InitiativeListing], json: bool) -> Result<()> {
    if json {
        return print_json(&listings);
    }
    if listings.is_empty() {
        println!("No initiatives found");
    }
    for listing in listings {
        let i = &listing.initiative;
        match listing.distance_km {
            Some(d) => println!("[{}] {} ({:.1} km) - {}", i.kind, i.title, d, i.description),
            None => println!("[{}] {} - {}", i.kind, i.title, i.description),
        }
    }
    Ok(())
}
