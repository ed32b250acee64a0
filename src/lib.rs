//! Hero draft analysis: counter-pick rankings, draft suggestions and two-team
//! win probability estimates from a pairwise matchup dataset.
//!
//! ```no_run
//! use hero_draft::{Dataset, MatchupEngine, ScoringWeights};
//! use std::sync::Arc;
//!
//! let dataset = Arc::new(Dataset::load("data/hero_matchups.json")?);
//! let engine = MatchupEngine::new(dataset, ScoringWeights::default());
//! let picks = engine.rank_counters(&["Axe", "Lion"], true);
//! # Ok::<(), hero_draft::error::DataError>(())
//! ```

pub mod analysis;
pub mod config;
pub mod dataset;
pub mod error;

pub use analysis::{
    normalize_scores, AnalysisResult, MatchupEngine, NormalizedScore, ScoredHero, Verdict,
};
pub use config::{Config, ScoringWeights};
pub use dataset::{Dataset, LoadReport, MatchupRecord};
pub use error::{ConfigError, DataError};
