use colored::*;
use hero_draft::{normalize_scores, AnalysisResult, Dataset, LoadReport, NormalizedScore, ScoredHero, Verdict};
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct ScoreRow {
    rank: String,
    hero: String,
    score: String,
    rating: String,
}

#[derive(Tabled)]
struct HeroRow {
    #[tabled(rename = "#")]
    number: String,
    hero: String,
    solo_winrate: String,
}

fn score_table(scores: &[NormalizedScore]) -> Table {
    let rows: Vec<ScoreRow> = scores
        .iter()
        .enumerate()
        .map(|(idx, s)| ScoreRow {
            rank: format!("#{}", idx + 1),
            hero: s.name.clone(),
            score: format!("{:.2}", s.raw),
            rating: format!("{:.1}%", s.normalized),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table
}

// Normalizes over the full list so ratings don't shift with --top
fn print_scores(title: &str, scores: &[ScoredHero], top_n: usize) {
    println!("\n{}", title.bold().yellow());

    if scores.is_empty() {
        println!("{}", "No data".yellow());
        return;
    }

    let mut normalized = normalize_scores(scores);
    normalized.truncate(top_n);
    println!("{}", score_table(&normalized));
}

pub fn display_roster(dataset: &Dataset) {
    println!("\n{}", format!("🧙 Hero Roster ({} heroes)", dataset.len()).bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    let rows: Vec<HeroRow> = dataset
        .roster()
        .iter()
        .enumerate()
        .map(|(idx, hero)| HeroRow {
            number: format!("{}", idx + 1),
            hero: hero.clone(),
            solo_winrate: format!("{:.1}%", dataset.solo_winrate(hero)),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_counter_picks(enemies: &[String], picks: &[ScoredHero], top_n: usize) {
    let against = if enemies.is_empty() {
        "(none)".to_string()
    } else {
        enemies.join(", ")
    };
    println!(
        "\n{}",
        format!("🎯 Counter Picks vs {}", against).bold().cyan()
    );
    println!("{}", "=".repeat(60).cyan());

    if picks.is_empty() {
        println!(
            "{}",
            "No recommendations available (no known enemy heroes)".yellow()
        );
        return;
    }

    print_scores("Recommended Picks", picks, top_n);

    println!("\n{}", "Interpretation".bold().yellow());
    println!("• Score: summed advantage against the selected enemies");
    println!("• Rating: score rescaled so the best pick is 100%\n");
}

pub fn display_team_analysis(result: &AnalysisResult, top_n: usize) {
    println!("\n{}", "⚔️  DRAFT ANALYSIS".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    let headline = match result.verdict() {
        Verdict::Team1Favoured => format!(
            "Team 1 Advantage: {:.1}% Win Probability",
            result.win_probability
        )
        .green()
        .bold(),
        Verdict::Team2Favoured => format!(
            "Team 2 Advantage: {:.1}% Win Probability",
            100.0 - result.win_probability
        )
        .red()
        .bold(),
        Verdict::Even => "Matchup is Even".yellow().bold(),
    };
    println!("{}", headline);
    println!(
        "{} {} / {} {}",
        "Team totals:".bold(),
        format!("{:.2}", result.team1_total).green(),
        format!("{:.2}", result.team2_total).red(),
        if result.synergy_applied { "(synergy included)" } else { "" }
    );

    print_scores("Team 1 Hero Contributions", &result.team1_contributions, top_n);
    print_scores("Team 1 Draft Suggestions", &result.team1_suggestions, top_n);
    print_scores("Team 2 Hero Contributions", &result.team2_contributions, top_n);
    print_scores("Team 2 Draft Suggestions", &result.team2_suggestions, top_n);
    println!();
}

pub fn display_load_report(report: &LoadReport) {
    display_success(&format!(
        "Loaded {} heroes, {} matchups, {} synergy pairs, {} winrates",
        report.heroes, report.matchups, report.synergy_pairs, report.winrates
    ));

    if report.neutral_replacements > 0 {
        display_warning(&format!(
            "{} malformed matchup entries replaced with neutral values",
            report.neutral_replacements
        ));
    }
    if report.unknown_hero_entries > 0 || report.skipped_values > 0 {
        display_warning(&format!(
            "Skipped {} entries for unknown heroes and {} malformed values",
            report.unknown_hero_entries, report.skipped_values
        ));
    }
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_warning(message: &str) {
    eprintln!("{} {}", "⚠️".yellow(), message);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
