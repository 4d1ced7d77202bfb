//! Crease - command-line standings
//!
//! Reads a league export (teams and matches as JSON) and prints the points
//! table or one team's net run rate.
//!
//! ```text
//! crease standings league.json --config league.toml
//! crease nrr league.json SA
//! ```
//!
//! Set `RUST_LOG=debug` for engine tracing.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crease_core::config::LeagueConfig;
use crease_core::standings::{net_run_rate, recompute_season, InMemoryRepository, StandingsAggregator};
use crease_core::types::{MatchRecord, Team};

/// Cricket season standings with exact net run rate
#[derive(Parser, Debug)]
#[command(name = "crease")]
#[command(about = "Cricket season standings with exact net run rate", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recompute and print the points table
    Standings {
        /// League export (JSON)
        file: PathBuf,

        /// Season to compute; defaults to the export's `seasonId`
        #[arg(long)]
        season: Option<String>,

        /// League config (TOML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print one team's net run rate and its aggregates
    Nrr {
        /// League export (JSON)
        file: PathBuf,

        /// Team id
        team: String,

        /// Season to compute; defaults to the export's `seasonId`
        #[arg(long)]
        season: Option<String>,
    },
}

/// Shape of a league export.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LeagueExport {
    #[serde(default)]
    season_id: Option<String>,
    #[serde(default)]
    teams: Vec<Team>,
    matches: Vec<MatchRecord>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Standings {
            file,
            season,
            config,
            json,
        } => run_standings(&file, season, config.as_deref(), json),
        Command::Nrr { file, team, season } => run_nrr(&file, &team, season),
    }
}

fn load_export(path: &Path) -> Result<LeagueExport> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let export: LeagueExport = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    info!(teams = export.teams.len(), matches = export.matches.len(), "export loaded");
    Ok(export)
}

fn pick_season(flag: Option<String>, export: &LeagueExport) -> Result<String> {
    match flag.or_else(|| export.season_id.clone()) {
        Some(season) => Ok(season),
        None => bail!("no season given: pass --season or set seasonId in the export"),
    }
}

fn run_standings(file: &Path, season: Option<String>, config: Option<&Path>, json: bool) -> Result<()> {
    let export = load_export(file)?;
    let season = pick_season(season, &export)?;
    let config = match config {
        Some(path) => LeagueConfig::load(path)?,
        None => LeagueConfig::default(),
    };

    let mut repo = InMemoryRepository::from_parts(export.teams, export.matches);
    let table = recompute_season(&mut repo, &season, &StandingsAggregator::new(config))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    println!(
        "{:>3}  {:<24} {:>3} {:>3} {:>3} {:>3} {:>3} {:>4} {:>8}",
        "Pos", "Team", "P", "W", "L", "T", "NR", "Pts", "NRR"
    );
    for entry in &table {
        println!(
            "{:>3}  {:<24} {:>3} {:>3} {:>3} {:>3} {:>3} {:>4} {:>8}",
            entry.position,
            entry.team_name,
            entry.played,
            entry.won,
            entry.lost,
            entry.tied,
            entry.no_result,
            entry.points,
            entry.nrr.to_string(),
        );
    }
    Ok(())
}

fn run_nrr(file: &Path, team: &str, season: Option<String>) -> Result<()> {
    let export = load_export(file)?;
    let season = pick_season(season, &export)?;
    let matches: Vec<MatchRecord> = export
        .matches
        .into_iter()
        .filter(|m| m.season_id == season)
        .collect();

    let breakdown = net_run_rate(team, &matches)?;
    println!("{} ({})", team, season);
    println!("  runs for      {}", breakdown.runs_for);
    println!("  overs faced   {}", breakdown.overs_for.round_dp(3));
    println!("  runs against  {}", breakdown.runs_against);
    println!("  overs bowled  {}", breakdown.overs_against.round_dp(3));
    println!("  NRR           {}", breakdown.nrr);
    Ok(())
}
