use super::engine::MatchupEngine;
use super::recommender::{sort_descending, ScoredHero};
use crate::dataset::HeroId;
use serde::Serialize;
use tracing::debug;

/// Probability reported when either side has no (known) heroes.
pub const EVEN_PROBABILITY: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Team1Favoured,
    Team2Favoured,
    Even,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Estimated chance (0-100) that team 1 wins.
    pub win_probability: f64,
    pub team1_total: f64,
    pub team2_total: f64,
    pub team1_contributions: Vec<ScoredHero>,
    pub team2_contributions: Vec<ScoredHero>,
    pub team1_suggestions: Vec<ScoredHero>,
    pub team2_suggestions: Vec<ScoredHero>,
    pub synergy_applied: bool,
}

impl AnalysisResult {
    /// Coarse reading of the win probability; 48-52 counts as even.
    pub fn verdict(&self) -> Verdict {
        if self.win_probability > 52.0 {
            Verdict::Team1Favoured
        } else if self.win_probability < 48.0 {
            Verdict::Team2Favoured
        } else {
            Verdict::Even
        }
    }
}

struct TeamScore {
    total: f64,
    contributions: Vec<ScoredHero>,
}

impl MatchupEngine {
    /// Full evaluation of two drafted teams.
    ///
    /// Unknown names and repeated heroes are dropped before scoring. Each
    /// member's contribution is its summed pair score against the other team,
    /// plus its solo winrate bonus and an even share of the team synergy.
    pub fn analyze<S: AsRef<str>, T: AsRef<str>>(
        &self,
        team1: &[S],
        team2: &[T],
        use_winrate: bool,
        use_synergy: bool,
    ) -> AnalysisResult {
        let team1 = self.resolve_selection(team1);
        let team2 = self.resolve_selection(team2);
        let synergy_applied = self.synergy_enabled(use_synergy);

        let side1 = self.score_team(&team1, &team2, use_winrate, synergy_applied);
        let side2 = self.score_team(&team2, &team1, use_winrate, synergy_applied);

        let win_probability = if team1.is_empty() || team2.is_empty() {
            EVEN_PROBABILITY
        } else {
            self.win_probability(side1.total, side2.total)
        };

        debug!(
            team1 = team1.len(),
            team2 = team2.len(),
            total1 = side1.total,
            total2 = side2.total,
            win_probability,
            "Analyzed draft"
        );

        AnalysisResult {
            win_probability,
            team1_total: side1.total,
            team2_total: side2.total,
            team1_contributions: side1.contributions,
            team2_contributions: side2.contributions,
            team1_suggestions: self.draft_suggestions_by_id(&team1, &team2, use_winrate, use_synergy),
            team2_suggestions: self.draft_suggestions_by_id(&team2, &team1, use_winrate, use_synergy),
            synergy_applied,
        }
    }

    /// `100 / (1 + e^(-adv_k * (total1 - total2)))`
    pub fn win_probability(&self, team1_total: f64, team2_total: f64) -> f64 {
        let net_advantage = team1_total - team2_total;
        100.0 / (1.0 + (-self.weights().adv_k * net_advantage).exp())
    }

    fn score_team(&self, team: &[HeroId], opponents: &[HeroId], use_winrate: bool, use_synergy: bool) -> TeamScore {
        let synergy_term = if use_synergy {
            self.weights().synergy_k * self.team_synergy(team)
        } else {
            0.0
        };
        let synergy_share = if team.is_empty() {
            0.0
        } else {
            synergy_term / team.len() as f64
        };

        let mut matchup_total = 0.0;
        let mut winrate_total = 0.0;
        let mut contributions = Vec::with_capacity(team.len());

        for &hero in team {
            let Some(name) = self.dataset().hero_name(hero) else {
                continue;
            };
            let matchup = self.counter_score(hero, opponents, use_winrate);
            let winrate_bonus = if use_winrate { self.winrate_bonus(hero) } else { 0.0 };

            matchup_total += matchup;
            winrate_total += winrate_bonus;
            contributions.push(ScoredHero::new(name, matchup + winrate_bonus + synergy_share));
        }
        sort_descending(&mut contributions);

        TeamScore {
            total: matchup_total + winrate_total + synergy_term,
            contributions,
        }
    }

    // Sum of synergy over every unordered pair within the team.
    fn team_synergy(&self, team: &[HeroId]) -> f64 {
        let mut sum = 0.0;
        for (i, &a) in team.iter().enumerate() {
            for &b in &team[i + 1..] {
                sum += self.dataset().synergy_by_id(a, b);
            }
        }
        sum
    }
}
