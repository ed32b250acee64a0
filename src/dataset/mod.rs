pub mod models;
pub mod store;

pub use store::{Dataset, HeroId, LoadReport, MatchupRecord, NEUTRAL_WINRATE};
