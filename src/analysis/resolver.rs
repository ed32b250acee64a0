use crate::dataset::{Dataset, HeroId, MatchupRecord};
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

type MemoKey = (HeroId, HeroId, bool);

/// Rescales a 0-100 matchup winrate into a ±1 term. Below 50% raises the
/// score, above 50% lowers it: 30 -> +0.4, 70 -> -0.4.
pub fn winrate_modifier(winrate: f64) -> f64 {
    2.0 * (0.5 - winrate / 100.0)
}

/// Advantage of one hero over another, read from a single matchup record.
pub fn pair_score(record: MatchupRecord, use_winrate: bool) -> f64 {
    if use_winrate {
        record.disadvantage + winrate_modifier(record.winrate)
    } else {
        record.disadvantage
    }
}

/// Directional pair scores with a dataset-scoped memo.
///
/// Ranking calls evaluate the same pairs over and over, so every computed
/// `(for, against, use_winrate)` value is kept until the resolver is dropped.
/// The memo holds at most `capacity` entries; past that, values are computed
/// without being stored. Racing inserts of the same key store the same value.
pub struct PairwiseResolver {
    dataset: Arc<Dataset>,
    memo: DashMap<MemoKey, f64>,
    // new keys stored so far; avoids locking every shard to read the length
    stored: AtomicUsize,
    capacity: usize,
}

impl PairwiseResolver {
    pub fn new(dataset: Arc<Dataset>, capacity: usize) -> Self {
        PairwiseResolver {
            dataset,
            memo: DashMap::new(),
            stored: AtomicUsize::new(0),
            capacity,
        }
    }

    /// Score of `hero_for` against `hero_against`. Heroes outside the roster
    /// resolve through the neutral record and are never memoized.
    pub fn score(&self, hero_for: &str, hero_against: &str, use_winrate: bool) -> f64 {
        match (self.dataset.hero_id(hero_for), self.dataset.hero_id(hero_against)) {
            (Some(a), Some(b)) => self.score_by_id(a, b, use_winrate),
            _ => pair_score(MatchupRecord::NEUTRAL, use_winrate),
        }
    }

    pub fn score_by_id(&self, hero_for: HeroId, hero_against: HeroId, use_winrate: bool) -> f64 {
        let key = (hero_for, hero_against, use_winrate);
        if let Some(cached) = self.memo.get(&key) {
            return *cached;
        }

        let value = pair_score(self.dataset.matchup_by_id(hero_for, hero_against), use_winrate);
        if self.stored.load(Ordering::Relaxed) < self.capacity
            && self.memo.insert(key, value).is_none()
        {
            self.stored.fetch_add(1, Ordering::Relaxed);
        }
        value
    }

    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }

    pub fn clear_memo(&self) {
        self.memo.clear();
        self.stored.store(0, Ordering::Relaxed);
    }
}
