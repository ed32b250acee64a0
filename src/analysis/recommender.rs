use super::engine::MatchupEngine;
use crate::dataset::HeroId;
use serde::Serialize;
use std::cmp::Ordering;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredHero {
    pub name: String,
    pub score: f64,
}

impl ScoredHero {
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        ScoredHero {
            name: name.into(),
            score,
        }
    }
}

/// Highest score first. The sort is stable, so ties keep their input order.
pub(crate) fn sort_descending(scores: &mut [ScoredHero]) {
    scores.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}

impl MatchupEngine {
    /// Rank every hero not in `enemies` by how well it plays into them.
    ///
    /// Score = sum over enemies of the pair score (candidate vs enemy).
    /// Returns an empty list when no enemy is known to the roster.
    pub fn rank_counters<S: AsRef<str>>(&self, enemies: &[S], use_winrate: bool) -> Vec<ScoredHero> {
        let enemy_ids = self.resolve_selection(enemies);
        if enemy_ids.is_empty() {
            return Vec::new();
        }

        let ranked = self.rank_candidates(&enemy_ids, |candidate| {
            self.counter_score(candidate, &enemy_ids, use_winrate)
        });
        debug!(enemies = enemy_ids.len(), candidates = ranked.len(), "Ranked counter picks");
        ranked
    }

    /// Rank heroes not yet drafted by either side as the next pick for `allies`.
    ///
    /// Score is the sum of three independent terms:
    /// - counter score against `enemies`
    /// - `synergy_k` × summed synergy with `allies` (when `use_synergy`)
    /// - `(solo_winrate - 50)` × `winrate_k` (when `use_winrate`)
    pub fn rank_draft_suggestions<S: AsRef<str>, T: AsRef<str>>(
        &self,
        allies: &[S],
        enemies: &[T],
        use_winrate: bool,
        use_synergy: bool,
    ) -> Vec<ScoredHero> {
        let ally_ids = self.resolve_selection(allies);
        let enemy_ids = self.resolve_selection(enemies);
        self.draft_suggestions_by_id(&ally_ids, &enemy_ids, use_winrate, use_synergy)
    }

    pub(crate) fn draft_suggestions_by_id(
        &self,
        allies: &[HeroId],
        enemies: &[HeroId],
        use_winrate: bool,
        use_synergy: bool,
    ) -> Vec<ScoredHero> {
        let picked: Vec<HeroId> = allies.iter().chain(enemies).copied().collect();
        let synergy_k = if self.synergy_enabled(use_synergy) && !allies.is_empty() {
            self.weights().synergy_k
        } else {
            0.0
        };

        self.rank_candidates(&picked, |candidate| {
            let counter = self.counter_score(candidate, enemies, use_winrate);

            let synergy: f64 = if synergy_k != 0.0 {
                allies
                    .iter()
                    .map(|&ally| self.dataset().synergy_by_id(candidate, ally))
                    .sum()
            } else {
                0.0
            };

            let winrate_bonus = if use_winrate {
                self.winrate_bonus(candidate)
            } else {
                0.0
            };

            counter + synergy_k * synergy + winrate_bonus
        })
    }

    // Scores every roster hero outside `excluded`, in roster order, then sorts.
    fn rank_candidates(&self, excluded: &[HeroId], score: impl Fn(HeroId) -> f64) -> Vec<ScoredHero> {
        let mut ranked: Vec<ScoredHero> = self
            .dataset()
            .roster()
            .iter()
            .enumerate()
            .filter(|(id, _)| !excluded.contains(id))
            .map(|(id, name)| ScoredHero::new(name.as_str(), score(id)))
            .collect();

        sort_descending(&mut ranked);
        ranked
    }
}
