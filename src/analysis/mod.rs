pub mod engine;
pub mod normalize;
pub mod recommender;
pub mod resolver;
pub mod team;

pub use engine::MatchupEngine;
pub use normalize::{normalize_scores, NormalizedScore};
pub use recommender::ScoredHero;
pub use resolver::{pair_score, winrate_modifier, PairwiseResolver};
pub use team::{AnalysisResult, Verdict, EVEN_PROBABILITY};
