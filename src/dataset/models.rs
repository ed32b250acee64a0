use serde::Deserialize;
use serde_json::Value;

// Document written by the matchup updater (data/hero_matchups.json).
// Sections are kept as raw JSON so that one bad entry can be coerced or
// skipped without failing the whole document.
#[derive(Debug, Default, Deserialize)]
pub struct DatasetSource {
    #[serde(default)]
    pub heroes: Option<Value>,
    #[serde(default)]
    pub matchup_data: Option<Value>,
    #[serde(default)]
    pub synergy_data: Option<Value>,
    #[serde(default)]
    pub winrate_data: Option<Value>,
}

// Roster entries come either as bare names or as the updater's {name, slug}
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HeroEntry {
    Name(String),
    Detailed {
        name: String,
        #[serde(default)]
        #[allow(dead_code)]
        slug: Option<String>,
    },
}

impl HeroEntry {
    pub fn name(&self) -> &str {
        match self {
            HeroEntry::Name(name) => name,
            HeroEntry::Detailed { name, .. } => name,
        }
    }
}

// Matchup cell as stored on disk: {"disadvantage": .., "winrate": ..}
#[derive(Debug, Deserialize)]
pub struct RawMatchup {
    pub disadvantage: Value,
    pub winrate: Value,
}

/// Largest magnitude accepted for any stored statistic. Bounds every sum the
/// engine builds from the tables, so scores stay finite.
pub const MAX_MAGNITUDE: f64 = 1e6;

/// Reads a JSON number, or a string holding one ("12.5", " 48.1% ").
/// Non-finite values and values beyond [`MAX_MAGNITUDE`] are rejected.
pub fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').trim_end().parse::<f64>().ok()?,
        _ => return None,
    };

    (number.is_finite() && number.abs() <= MAX_MAGNITUDE).then_some(number)
}

/// Same as [`coerce_number`], additionally requiring a percentage in [0, 100].
pub fn coerce_percentage(value: &Value) -> Option<f64> {
    coerce_number(value).filter(|v| (0.0..=100.0).contains(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_number_variants() {
        assert_eq!(coerce_number(&json!(1.5)), Some(1.5));
        assert_eq!(coerce_number(&json!(-3)), Some(-3.0));
        assert_eq!(coerce_number(&json!("2.25")), Some(2.25));
        assert_eq!(coerce_number(&json!(" 48.1% ")), Some(48.1));
        assert_eq!(coerce_number(&json!("n/a")), None);
        assert_eq!(coerce_number(&json!(null)), None);
        assert_eq!(coerce_number(&json!([1.0])), None);
    }

    #[test]
    fn test_coerce_number_rejects_huge_values() {
        assert_eq!(coerce_number(&json!(1e6)), Some(1e6));
        assert_eq!(coerce_number(&json!(-1e6)), Some(-1e6));
        assert_eq!(coerce_number(&json!(1e308)), None);
        assert_eq!(coerce_number(&json!("-2e7")), None);

        let overflowing: Value = serde_json::from_str("1e400").unwrap();
        assert_eq!(coerce_number(&overflowing), None);
    }

    #[test]
    fn test_coerce_percentage_range() {
        assert_eq!(coerce_percentage(&json!(0)), Some(0.0));
        assert_eq!(coerce_percentage(&json!(100)), Some(100.0));
        assert_eq!(coerce_percentage(&json!(100.5)), None);
        assert_eq!(coerce_percentage(&json!(-1)), None);
    }

    #[test]
    fn test_hero_entry_accepts_both_shapes() {
        let entries: Vec<HeroEntry> =
            serde_json::from_value(json!(["Axe", {"name": "Bane", "slug": "bane"}])).unwrap();
        let names: Vec<&str> = entries.iter().map(HeroEntry::name).collect();
        assert_eq!(names, vec!["Axe", "Bane"]);
    }
}
