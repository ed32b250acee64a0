mod display;

use anyhow::Context;
use clap::{Parser, Subcommand};
use display::output::{
    display_counter_picks, display_error, display_info, display_load_report, display_roster,
    display_team_analysis, display_warning,
};
use hero_draft::{Config, Dataset, MatchupEngine};
use indicatif::ProgressBar;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "Hero Draft")]
#[command(about = "Counter-picks, draft suggestions and win probability from hero matchup data", long_about = None)]
struct Args {
    /// Path to the matchup dataset (default: $HERO_DATA_PATH or data/hero_matchups.json)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Ignore matchup and solo win rates
    #[arg(long, global = true)]
    no_winrate: bool,

    /// Ignore ally synergy
    #[arg(long, global = true)]
    no_synergy: bool,

    /// Number of rows to display per table (default: 10)
    #[arg(short, long, default_value = "10", global = true)]
    top_n: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every hero in the dataset
    Heroes,

    /// Rank the best picks against a set of enemy heroes
    Counters {
        /// Enemy hero names
        #[arg(required = true)]
        enemies: Vec<String>,
    },

    /// Evaluate two drafted teams
    Analyze {
        /// Team 1 heroes, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        team1: Vec<String>,

        /// Team 2 heroes, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        team2: Vec<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = Config::from_env().context("Invalid configuration")?;
    if let Some(path) = args.data {
        config.data_path = path;
    }

    display_info(&format!("Loading dataset from {}", config.data_path.display()));

    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Validating matchup data");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let loaded = Dataset::load(&config.data_path);
    spinner.finish_and_clear();

    let dataset = Arc::new(loaded.with_context(|| {
        format!(
            "Could not load hero data from {}",
            config.data_path.display()
        )
    })?);
    display_load_report(dataset.report());

    let engine = MatchupEngine::from_config(Arc::clone(&dataset), &config);
    let use_winrate = !args.no_winrate;
    let use_synergy = !args.no_synergy;

    if use_synergy && !dataset.has_synergy() && !matches!(args.command, Command::Heroes) {
        display_info("Dataset has no synergy table, synergy is not modelled");
    }

    match args.command {
        Command::Heroes => display_roster(&dataset),
        Command::Counters { enemies } => {
            let known = known_heroes(&dataset, &enemies);
            let picks = engine.rank_counters(&known, use_winrate);
            display_counter_picks(&known, &picks, args.top_n);
        }
        Command::Analyze { team1, team2 } => {
            let team1 = known_heroes(&dataset, &team1);
            let team2 = known_heroes(&dataset, &team2);
            let result = engine.analyze(&team1, &team2, use_winrate, use_synergy);
            display_team_analysis(&result, args.top_n);
        }
    }

    Ok(())
}

// Warns about names outside the roster and returns the rest, in input order
fn known_heroes(dataset: &Dataset, heroes: &[String]) -> Vec<String> {
    let (known, unknown): (Vec<&String>, Vec<&String>) =
        heroes.iter().partition(|h| dataset.contains(h));
    for hero in unknown {
        display_warning(&format!("Unknown hero '{}' ignored", hero));
    }
    known.into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dataset() -> Dataset {
        let doc = json!({
            "heroes": ["Axe", "Bane", "Lion"],
            "matchup_data": {"Axe": {"Bane": {"disadvantage": 1.0, "winrate": 48.0}}}
        });
        Dataset::from_json_str(&doc.to_string()).unwrap()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_known_heroes_drops_unknown_names() {
        let ds = dataset();
        let known = known_heroes(&ds, &names(&["Lion", "Techies", "Bane", "Invoker"]));
        assert_eq!(known, names(&["Lion", "Bane"]));
    }

    #[test]
    fn test_counter_heading_names_come_from_roster() {
        let ds = dataset();
        assert!(known_heroes(&ds, &names(&["Ghost"])).is_empty());

        let known = known_heroes(&ds, &names(&["Bane", "Ghost"]));
        assert!(known.iter().all(|h| ds.contains(h)));
        let engine = MatchupEngine::new(Arc::new(ds), Default::default());
        let picks = engine.rank_counters(&known, false);
        assert_eq!(picks[0].name, "Axe");
    }
}
