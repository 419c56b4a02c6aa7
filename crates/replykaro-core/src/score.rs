//! Parsing of evaluation responses into bounded scores.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ScorePayload {
    score: f64,
}

/// Parse a raw evaluation response into a score in `[0, 100]`.
///
/// The evaluator is instructed to answer with a strict single-field JSON
/// object `{"score": <0-100 integer>}`. Anything else (malformed JSON, a
/// missing or non-numeric field, a value outside the range) yields `None`,
/// which the caller degrades to a score of 0 for that draft only.
pub fn parse_score(raw: &str) -> Option<u8> {
    let payload: ScorePayload = serde_json::from_str(raw.trim()).ok()?;
    if !payload.score.is_finite() || !(0.0..=100.0).contains(&payload.score) {
        return None;
    }
    Some(payload.score.round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integer_scores() {
        assert_eq!(parse_score(r#"{"score": 0}"#), Some(0));
        assert_eq!(parse_score(r#"{"score": 87}"#), Some(87));
        assert_eq!(parse_score(r#"{"score": 100}"#), Some(100));
    }

    #[test]
    fn rounds_fractional_scores_to_nearest_integer() {
        assert_eq!(parse_score(r#"{"score": 87.6}"#), Some(88));
        assert_eq!(parse_score(r#"{"score": 42.4}"#), Some(42));
        assert_eq!(parse_score(r#"{"score": 99.5}"#), Some(100));
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert_eq!(parse_score("  {\"score\": 55}\n"), Some(55));
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert_eq!(parse_score(r#"{"score": 101}"#), None);
        assert_eq!(parse_score(r#"{"score": 150.2}"#), None);
        assert_eq!(parse_score(r#"{"score": -1}"#), None);
    }

    #[test]
    fn rejects_non_numeric_scores() {
        assert_eq!(parse_score(r#"{"score": "87"}"#), None);
        assert_eq!(parse_score(r#"{"score": null}"#), None);
        assert_eq!(parse_score(r#"{"score": true}"#), None);
    }

    #[test]
    fn rejects_malformed_payloads() {
        assert_eq!(parse_score(""), None);
        assert_eq!(parse_score("87"), None);
        assert_eq!(parse_score("score: 87"), None);
        assert_eq!(parse_score(r#"{"rating": 87}"#), None);
        assert_eq!(parse_score("The score is {\"score\": 87}"), None);
    }
}
