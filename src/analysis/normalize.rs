use super::recommender::ScoredHero;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedScore {
    pub name: String,
    pub raw: f64,
    /// Position of `raw` between the list's min (0) and max (100).
    pub normalized: f64,
}

/// Min-max scales a score list onto 0-100, keeping input order.
///
/// When every score is equal (including a single entry) all of them map to
/// 100.0. Non-finite inputs pin to 100.0 (the max) or 0.0, never NaN.
pub fn normalize_scores(scores: &[ScoredHero]) -> Vec<NormalizedScore> {
    if scores.is_empty() {
        return Vec::new();
    }

    let min = scores.iter().map(|s| s.score).fold(f64::INFINITY, f64::min);
    let max = scores.iter().map(|s| s.score).fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    scores
        .iter()
        .map(|s| {
            let scaled = (s.score - min) / range * 100.0;
            NormalizedScore {
                name: s.name.clone(),
                raw: s.score,
                normalized: if min == max || (!scaled.is_finite() && s.score == max) {
                    100.0
                } else if scaled.is_finite() {
                    scaled
                } else {
                    0.0
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_input() {
        assert!(normalize_scores(&[]).is_empty());
    }

    #[test]
    fn test_all_equal_scores_map_to_100() {
        let scores = vec![ScoredHero::new("A", 5.0), ScoredHero::new("B", 5.0)];
        let normalized = normalize_scores(&scores);
        assert_eq!(
            normalized,
            vec![
                NormalizedScore {
                    name: "A".into(),
                    raw: 5.0,
                    normalized: 100.0
                },
                NormalizedScore {
                    name: "B".into(),
                    raw: 5.0,
                    normalized: 100.0
                },
            ]
        );
    }

    #[test]
    fn test_infinite_scores_stay_finite() {
        let scores = vec![
            ScoredHero::new("A", f64::INFINITY),
            ScoredHero::new("B", 0.0),
            ScoredHero::new("C", f64::NEG_INFINITY),
        ];
        let normalized: Vec<f64> = normalize_scores(&scores).iter().map(|n| n.normalized).collect();
        assert_eq!(normalized, vec![100.0, 0.0, 0.0]);
    }

    #[test]
    fn test_single_score() {
        let normalized = normalize_scores(&[ScoredHero::new("A", -3.2)]);
        assert_eq!(normalized[0].normalized, 100.0);
    }

    #[test]
    fn test_min_max_scaling_keeps_order() {
        let scores = vec![
            ScoredHero::new("A", 1.0),
            ScoredHero::new("B", 3.0),
            ScoredHero::new("C", -1.0),
        ];
        let normalized = normalize_scores(&scores);
        let names: Vec<&str> = normalized.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_relative_eq!(normalized[0].normalized, 50.0);
        assert_eq!(normalized[1].normalized, 100.0);
        assert_eq!(normalized[2].normalized, 0.0);
    }
}
