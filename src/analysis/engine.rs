use super::resolver::PairwiseResolver;
use crate::config::{Config, ScoringWeights, DEFAULT_MEMO_CAPACITY};
use crate::dataset::{Dataset, HeroId, NEUTRAL_WINRATE};
use std::sync::Arc;
use tracing::debug;

/// Entry point for all scoring operations.
///
/// Holds the immutable dataset, the formula coefficients and the pair-score
/// memo. Every operation takes `&self`, so one engine can be shared across
/// worker threads behind an `Arc`. Reloading the dataset means building a new
/// engine, which also discards the memo.
pub struct MatchupEngine {
    dataset: Arc<Dataset>,
    weights: ScoringWeights,
    resolver: PairwiseResolver,
}

impl MatchupEngine {
    pub fn new(dataset: Arc<Dataset>, weights: ScoringWeights) -> Self {
        Self::with_memo_capacity(dataset, weights, DEFAULT_MEMO_CAPACITY)
    }

    pub fn with_memo_capacity(dataset: Arc<Dataset>, weights: ScoringWeights, capacity: usize) -> Self {
        debug!(
            heroes = dataset.len(),
            synergy = dataset.has_synergy(),
            ?weights,
            capacity,
            "Building matchup engine"
        );
        MatchupEngine {
            resolver: PairwiseResolver::new(Arc::clone(&dataset), capacity),
            dataset,
            weights,
        }
    }

    pub fn from_config(dataset: Arc<Dataset>, config: &Config) -> Self {
        Self::with_memo_capacity(dataset, config.weights, config.memo_capacity)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn weights(&self) -> ScoringWeights {
        self.weights
    }

    pub fn resolver(&self) -> &PairwiseResolver {
        &self.resolver
    }

    /// Advantage of `hero_for` against `hero_against`.
    pub fn score(&self, hero_for: &str, hero_against: &str, use_winrate: bool) -> f64 {
        self.resolver.score(hero_for, hero_against, use_winrate)
    }

    /// Maps names to roster ids, dropping unknown names and repeats while
    /// keeping the caller's order.
    pub(crate) fn resolve_selection<S: AsRef<str>>(&self, names: &[S]) -> Vec<HeroId> {
        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            match self.dataset.hero_id(name.as_ref()) {
                Some(id) if !ids.contains(&id) => ids.push(id),
                Some(_) => {}
                None => debug!(hero = name.as_ref(), "Ignoring hero not in roster"),
            }
        }
        ids
    }

    /// Sum of pair scores of `candidate` against every opponent.
    pub(crate) fn counter_score(&self, candidate: HeroId, opponents: &[HeroId], use_winrate: bool) -> f64 {
        opponents
            .iter()
            .map(|&opponent| self.resolver.score_by_id(candidate, opponent, use_winrate))
            .sum()
    }

    /// `(solo_winrate - 50) * winrate_k`
    pub(crate) fn winrate_bonus(&self, hero: HeroId) -> f64 {
        (self.dataset.solo_winrate_by_id(hero) - NEUTRAL_WINRATE) * self.weights.winrate_k
    }

    /// Synergy only counts when requested and the dataset actually models it.
    pub(crate) fn synergy_enabled(&self, use_synergy: bool) -> bool {
        use_synergy && self.dataset.has_synergy()
    }
}
