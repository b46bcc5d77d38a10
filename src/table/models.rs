use std::collections::HashMap;

use serde::Serialize;

/// One input row: header name → raw cell value.
///
/// Column names vary between sources, so nothing is fixed here; the resolver
/// in `model::resolver` maps aliases onto the logical fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameRecord {
    /// 1-based line number in the input file (header is line 1)
    pub line: u64,
    pub fields: HashMap<String, String>,
}

impl GameRecord {
    pub fn new(line: u64, fields: HashMap<String, String>) -> Self {
        GameRecord { line, fields }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

/// Signals pulled out of a `GameRecord`.
///
/// Each side of a pair is resolved on its own; the probability model only
/// uses a pair when both halves are present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedSignals {
    pub home_team: String,
    pub away_team: String,
    pub home_rating: Option<f64>,
    pub away_rating: Option<f64>,
    pub home_spread: Option<f64>,
    pub away_spread: Option<f64>,
}

/// Column order of the output table.
pub const OUTPUT_COLUMNS: [&str; 10] = [
    "Date",
    "HomeTeam",
    "AwayTeam",
    "HomeAwayKey",
    "HomeAwayKeyNorm",
    "HomeProb",
    "AwayProb",
    "FavTeam",
    "FavProb",
    "GeneratedAtUTC",
];

/// One output row. Probabilities are stored at full precision and rounded
/// to 4 decimals only when serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "HomeTeam")]
    pub home_team: String,
    #[serde(rename = "AwayTeam")]
    pub away_team: String,
    #[serde(rename = "HomeAwayKey")]
    pub home_away_key: String,
    #[serde(rename = "HomeAwayKeyNorm")]
    pub home_away_key_norm: String,
    #[serde(rename = "HomeProb", serialize_with = "serialize_prob")]
    pub home_prob: f64,
    #[serde(rename = "AwayProb", serialize_with = "serialize_prob")]
    pub away_prob: f64,
    #[serde(rename = "FavTeam")]
    pub favorite_team: String,
    #[serde(rename = "FavProb", serialize_with = "serialize_prob")]
    pub favorite_prob: f64,
    #[serde(rename = "GeneratedAtUTC")]
    pub generated_at: String,
}

/// Round to 4 decimal places for presentation.
pub fn round_prob(p: f64) -> f64 {
    (p * 10_000.0).round() / 10_000.0
}

fn serialize_prob<S: serde::Serializer>(p: &f64, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(round_prob(*p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn round_prob_four_places() {
        assert_relative_eq!(round_prob(0.731_058_578), 0.7311, epsilon = 1e-12);
        assert_relative_eq!(round_prob(0.268_941_421), 0.2689, epsilon = 1e-12);
        assert_relative_eq!(round_prob(0.5), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn record_lookup_by_column() {
        let mut fields = HashMap::new();
        fields.insert("Home".to_string(), "Duke".to_string());
        let rec = GameRecord::new(2, fields);
        assert_eq!(rec.get("Home"), Some("Duke"));
        assert_eq!(rec.get("Away"), None);
    }
}
