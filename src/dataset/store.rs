use super::models::{coerce_number, coerce_percentage, DatasetSource, HeroEntry, RawMatchup};
use crate::error::DataError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Dense index of a hero in the sorted roster.
pub type HeroId = usize;

pub const NEUTRAL_WINRATE: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchupRecord {
    /// Advantage of the first hero of the lookup against the second.
    pub disadvantage: f64,
    pub winrate: f64,
}

impl MatchupRecord {
    pub const NEUTRAL: MatchupRecord = MatchupRecord {
        disadvantage: 0.0,
        winrate: NEUTRAL_WINRATE,
    };
}

impl Default for MatchupRecord {
    fn default() -> Self {
        MatchupRecord::NEUTRAL
    }
}

/// What happened while validating a source document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub heroes: usize,
    pub matchups: usize,
    /// Matchup entries that failed numeric coercion and were stored as neutral.
    pub neutral_replacements: usize,
    /// Entries naming a hero that is not in the roster.
    pub unknown_hero_entries: usize,
    pub synergy_pairs: usize,
    pub winrates: usize,
    /// Malformed synergy or winrate values.
    pub skipped_values: usize,
}

/// Hero roster plus matchup, synergy and solo winrate tables.
///
/// Built once from a validated source and read-only afterwards. Lookups never
/// fail: pairs or heroes without data resolve to neutral defaults.
#[derive(Debug)]
pub struct Dataset {
    heroes: Vec<String>,
    index: HashMap<String, HeroId>,
    matchups: HashMap<(HeroId, HeroId), MatchupRecord>,
    // keyed by (lower id, higher id)
    synergy: HashMap<(HeroId, HeroId), f64>,
    winrates: HashMap<HeroId, f64>,
    report: LoadReport,
}

impl Dataset {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let dataset = Self::from_json_str(&content)?;
        info!(
            path = %path.display(),
            heroes = dataset.report.heroes,
            matchups = dataset.report.matchups,
            "Loaded hero dataset"
        );
        Ok(dataset)
    }

    pub fn from_json_str(content: &str) -> Result<Self, DataError> {
        let source: DatasetSource = serde_json::from_str(content)?;
        Self::from_source(source)
    }

    pub fn from_source(source: DatasetSource) -> Result<Self, DataError> {
        let heroes_value = non_null(source.heroes).ok_or(DataError::MissingSection("heroes"))?;
        let matchup_value =
            non_null(source.matchup_data).ok_or(DataError::MissingSection("matchup_data"))?;

        let entries: Vec<HeroEntry> =
            serde_json::from_value(heroes_value).map_err(|e| DataError::InvalidSection {
                section: "heroes",
                reason: e.to_string(),
            })?;

        let roster: BTreeSet<String> = entries
            .iter()
            .map(|entry| entry.name().trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        if roster.is_empty() {
            return Err(DataError::EmptyRoster);
        }

        let heroes: Vec<String> = roster.into_iter().collect();
        let index: HashMap<String, HeroId> = heroes
            .iter()
            .enumerate()
            .map(|(id, name)| (name.clone(), id))
            .collect();

        let mut dataset = Dataset {
            report: LoadReport {
                heroes: heroes.len(),
                ..LoadReport::default()
            },
            heroes,
            index,
            matchups: HashMap::new(),
            synergy: HashMap::new(),
            winrates: HashMap::new(),
        };

        let matchup_table = as_table("matchup_data", matchup_value)?;
        dataset.load_matchups(matchup_table);

        if let Some(value) = non_null(source.synergy_data) {
            let table = as_table("synergy_data", value)?;
            dataset.load_synergy(table);
        }

        if let Some(value) = non_null(source.winrate_data) {
            let table = as_table("winrate_data", value)?;
            dataset.load_winrates(table);
        }

        debug!(report = ?dataset.report, "Dataset validated");
        Ok(dataset)
    }

    fn load_matchups(&mut self, table: Map<String, Value>) {
        for (hero_for, row) in table {
            let Some(for_id) = self.hero_id(&hero_for) else {
                warn!(hero = %hero_for, "Skipping matchup row for unknown hero");
                self.report.unknown_hero_entries += 1;
                continue;
            };

            let Value::Object(row) = row else {
                warn!(hero = %hero_for, "Skipping matchup row that is not an object");
                self.report.skipped_values += 1;
                continue;
            };

            for (hero_against, cell) in row {
                let Some(against_id) = self.hero_id(&hero_against) else {
                    warn!(hero = %hero_for, opponent = %hero_against, "Skipping matchup against unknown hero");
                    self.report.unknown_hero_entries += 1;
                    continue;
                };
                if for_id == against_id {
                    continue;
                }

                let record = parse_matchup(cell).unwrap_or_else(|| {
                    warn!(
                        hero = %hero_for,
                        opponent = %hero_against,
                        "Malformed matchup entry, using neutral record"
                    );
                    self.report.neutral_replacements += 1;
                    MatchupRecord::NEUTRAL
                });

                self.matchups.insert((for_id, against_id), record);
                self.report.matchups += 1;
            }
        }
    }

    fn load_synergy(&mut self, table: Map<String, Value>) {
        for (hero_a, row) in table {
            let Some(a) = self.hero_id(&hero_a) else {
                self.report.unknown_hero_entries += 1;
                continue;
            };
            let Value::Object(row) = row else {
                self.report.skipped_values += 1;
                continue;
            };

            for (hero_b, value) in row {
                let Some(b) = self.hero_id(&hero_b) else {
                    self.report.unknown_hero_entries += 1;
                    continue;
                };
                if a == b {
                    continue;
                }
                let Some(score) = coerce_number(&value) else {
                    warn!(hero = %hero_a, ally = %hero_b, "Skipping malformed synergy value");
                    self.report.skipped_values += 1;
                    continue;
                };

                let key = pair_key(a, b);
                match self.synergy.get(&key) {
                    Some(existing) if *existing != score => {
                        warn!(
                            hero = %hero_a,
                            ally = %hero_b,
                            kept = *existing,
                            ignored = score,
                            "Conflicting synergy values for pair"
                        );
                    }
                    Some(_) => {}
                    None => {
                        self.synergy.insert(key, score);
                        self.report.synergy_pairs += 1;
                    }
                }
            }
        }
    }

    fn load_winrates(&mut self, table: Map<String, Value>) {
        for (hero, value) in table {
            let Some(id) = self.hero_id(&hero) else {
                self.report.unknown_hero_entries += 1;
                continue;
            };
            match coerce_percentage(&value) {
                Some(winrate) => {
                    self.winrates.insert(id, winrate);
                    self.report.winrates += 1;
                }
                None => {
                    warn!(hero = %hero, "Skipping malformed winrate value");
                    self.report.skipped_values += 1;
                }
            }
        }
    }

    /// All hero names, sorted.
    pub fn roster(&self) -> &[String] {
        &self.heroes
    }

    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }

    pub fn hero_id(&self, name: &str) -> Option<HeroId> {
        self.index.get(name).copied()
    }

    pub fn hero_name(&self, id: HeroId) -> Option<&str> {
        self.heroes.get(id).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn matchup(&self, hero_for: &str, hero_against: &str) -> MatchupRecord {
        match (self.hero_id(hero_for), self.hero_id(hero_against)) {
            (Some(a), Some(b)) => self.matchup_by_id(a, b),
            _ => MatchupRecord::NEUTRAL,
        }
    }

    pub fn matchup_by_id(&self, hero_for: HeroId, hero_against: HeroId) -> MatchupRecord {
        self.matchups
            .get(&(hero_for, hero_against))
            .copied()
            .unwrap_or(MatchupRecord::NEUTRAL)
    }

    pub fn synergy(&self, a: &str, b: &str) -> f64 {
        match (self.hero_id(a), self.hero_id(b)) {
            (Some(a), Some(b)) => self.synergy_by_id(a, b),
            _ => 0.0,
        }
    }

    pub fn synergy_by_id(&self, a: HeroId, b: HeroId) -> f64 {
        self.synergy.get(&pair_key(a, b)).copied().unwrap_or(0.0)
    }

    /// False when the source carried no usable synergy table.
    pub fn has_synergy(&self) -> bool {
        !self.synergy.is_empty()
    }

    pub fn solo_winrate(&self, hero: &str) -> f64 {
        self.hero_id(hero)
            .map(|id| self.solo_winrate_by_id(id))
            .unwrap_or(NEUTRAL_WINRATE)
    }

    pub fn solo_winrate_by_id(&self, hero: HeroId) -> f64 {
        self.winrates.get(&hero).copied().unwrap_or(NEUTRAL_WINRATE)
    }
}

fn pair_key(a: HeroId, b: HeroId) -> (HeroId, HeroId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn non_null(value: Option<Value>) -> Option<Value> {
    value.filter(|v| !v.is_null())
}

fn as_table(section: &'static str, value: Value) -> Result<Map<String, Value>, DataError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(DataError::InvalidSection {
            section,
            reason: format!("expected an object keyed by hero name, found {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn parse_matchup(cell: Value) -> Option<MatchupRecord> {
    let raw: RawMatchup = serde_json::from_value(cell).ok()?;
    Some(MatchupRecord {
        disadvantage: coerce_number(&raw.disadvantage)?,
        winrate: coerce_percentage(&raw.winrate)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Dataset {
        let doc = json!({
            "heroes": ["Zeus", {"name": "Axe", "slug": "axe"}, "Bane", "Axe"],
            "matchup_data": {
                "Axe": {
                    "Bane": {"disadvantage": 2.5, "winrate": 45.0},
                    "Zeus": {"disadvantage": "oops", "winrate": 51.0},
                    "Ghost": {"disadvantage": 1.0, "winrate": 50.0}
                },
                "Bane": {
                    "Axe": {"disadvantage": "-2.5", "winrate": "55.0%"}
                }
            },
            "synergy_data": {
                "Axe": {"Bane": 1.5},
                "Bane": {"Zeus": "x"}
            },
            "winrate_data": {"Zeus": 53.2, "Axe": 140}
        });
        Dataset::from_json_str(&doc.to_string()).unwrap()
    }

    #[test]
    fn test_roster_sorted_and_deduplicated() {
        let ds = sample();
        assert_eq!(ds.roster(), &["Axe", "Bane", "Zeus"]);
        assert_eq!(ds.hero_id("Bane"), Some(1));
        assert_eq!(ds.hero_name(2), Some("Zeus"));
    }

    #[test]
    fn test_matchup_lookup_is_directional() {
        let ds = sample();
        assert_eq!(
            ds.matchup("Axe", "Bane"),
            MatchupRecord {
                disadvantage: 2.5,
                winrate: 45.0
            }
        );
        assert_eq!(
            ds.matchup("Bane", "Axe"),
            MatchupRecord {
                disadvantage: -2.5,
                winrate: 55.0
            }
        );
    }

    #[test]
    fn test_missing_pair_is_neutral() {
        let ds = sample();
        assert_eq!(ds.matchup("Zeus", "Axe"), MatchupRecord::NEUTRAL);
        assert_eq!(ds.matchup("Nobody", "Axe"), MatchupRecord::NEUTRAL);
    }

    #[test]
    fn test_malformed_entry_becomes_neutral() {
        let ds = sample();
        assert_eq!(ds.matchup("Axe", "Zeus"), MatchupRecord::NEUTRAL);
        assert_eq!(ds.report().neutral_replacements, 1);
        assert_eq!(ds.report().matchups, 3);
    }

    #[test]
    fn test_out_of_range_number_becomes_neutral() {
        let doc = r#"{
            "heroes": ["A", "B", "C"],
            "matchup_data": {
                "A": {"B": {"disadvantage": 1e400, "winrate": 50}},
                "B": {"C": {"disadvantage": 1.5, "winrate": 1e400}},
                "C": {"A": {"disadvantage": 2.0, "winrate": 45}}
            }
        }"#;
        let ds = Dataset::from_json_str(doc).unwrap();
        assert_eq!(ds.matchup("A", "B"), MatchupRecord::NEUTRAL);
        assert_eq!(ds.matchup("B", "C"), MatchupRecord::NEUTRAL);
        assert_eq!(ds.matchup("C", "A").disadvantage, 2.0);
        assert_eq!(ds.report().neutral_replacements, 2);
    }

    #[test]
    fn test_implausible_magnitudes_are_rejected() {
        let doc = json!({
            "heroes": ["A", "B", "C"],
            "matchup_data": {
                "A": {
                    "B": {"disadvantage": 1e308, "winrate": 50.0},
                    "C": {"disadvantage": -1e308, "winrate": 50.0}
                }
            },
            "synergy_data": {"A": {"B": 1e300}}
        });
        let ds = Dataset::from_json_str(&doc.to_string()).unwrap();
        assert_eq!(ds.matchup("A", "B"), MatchupRecord::NEUTRAL);
        assert_eq!(ds.matchup("A", "C"), MatchupRecord::NEUTRAL);
        assert_eq!(ds.synergy("A", "B"), 0.0);
        assert!(!ds.has_synergy());
    }

    #[test]
    fn test_unknown_heroes_are_counted() {
        let ds = sample();
        assert_eq!(ds.report().unknown_hero_entries, 1);
        assert!(!ds.contains("Ghost"));
    }

    #[test]
    fn test_synergy_is_symmetric() {
        let ds = sample();
        assert!(ds.has_synergy());
        assert_eq!(ds.synergy("Axe", "Bane"), 1.5);
        assert_eq!(ds.synergy("Bane", "Axe"), 1.5);
        assert_eq!(ds.synergy("Bane", "Zeus"), 0.0);
        assert_eq!(ds.report().synergy_pairs, 1);
    }

    #[test]
    fn test_solo_winrate_defaults() {
        let ds = sample();
        assert_eq!(ds.solo_winrate("Zeus"), 53.2);
        // out of range value is skipped
        assert_eq!(ds.solo_winrate("Axe"), 50.0);
        assert_eq!(ds.solo_winrate("Nobody"), 50.0);
        assert_eq!(ds.report().skipped_values, 2);
    }

    #[test]
    fn test_optional_sections_absent() {
        let doc = json!({"heroes": ["A", "B"], "matchup_data": {}});
        let ds = Dataset::from_json_str(&doc.to_string()).unwrap();
        assert!(!ds.has_synergy());
        assert_eq!(ds.synergy("A", "B"), 0.0);
        assert_eq!(ds.solo_winrate("A"), 50.0);
    }

    #[test]
    fn test_missing_required_sections() {
        let err = Dataset::from_json_str(r#"{"matchup_data": {}}"#).unwrap_err();
        assert!(matches!(err, DataError::MissingSection("heroes")));

        let err = Dataset::from_json_str(r#"{"heroes": ["A"]}"#).unwrap_err();
        assert!(matches!(err, DataError::MissingSection("matchup_data")));

        let err = Dataset::from_json_str(r#"{"heroes": ["A"], "matchup_data": null}"#).unwrap_err();
        assert!(matches!(err, DataError::MissingSection("matchup_data")));
    }

    #[test]
    fn test_invalid_documents() {
        assert!(matches!(
            Dataset::from_json_str("not json").unwrap_err(),
            DataError::Json(_)
        ));
        assert!(matches!(
            Dataset::from_json_str(r#"{"heroes": [], "matchup_data": {}}"#).unwrap_err(),
            DataError::EmptyRoster
        ));
        assert!(matches!(
            Dataset::from_json_str(r#"{"heroes": ["A"], "matchup_data": []}"#).unwrap_err(),
            DataError::InvalidSection {
                section: "matchup_data",
                ..
            }
        ));
        assert!(matches!(
            Dataset::from_json_str(r#"{"heroes": "A", "matchup_data": {}}"#).unwrap_err(),
            DataError::InvalidSection {
                section: "heroes",
                ..
            }
        ));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Dataset::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }
}
