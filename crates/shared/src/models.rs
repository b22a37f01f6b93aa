//! Wire models for the leaderboard stream.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// --- Identity ---

/// Opaque identifier for competitions and users.
///
/// The stream sends ids either as JSON strings or JSON numbers. The two are
/// kept apart: `"7"` and `7` are different identifiers. Numbers are stored in
/// a canonical decimal text (`1`, `1.0` and `1e0` are all `1`) so that equality
/// and hashing never go through floating point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Identifier {
    Text(String),
    Number(String),
}

impl Identifier {
    /// Numeric id from the number's JSON text.
    ///
    /// Numbers outside the decimal range keep their text as received.
    pub fn number(text: &str) -> Self {
        match parse_decimal(text) {
            Ok(value) => Identifier::Number(value.normalize().to_string()),
            Err(_) => Identifier::Number(text.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Identifier::Text(s) | Identifier::Number(s) => s,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Identifier::Text(s.to_string())
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self {
        Identifier::Text(s)
    }
}

impl From<u64> for Identifier {
    fn from(n: u64) -> Self {
        Identifier::Number(n.to_string())
    }
}

/// A JSON string or number, with the number's exact text.
///
/// Goes through `serde_json::Value`, which keeps the number token verbatim
/// (`arbitrary_precision`), so no value is ever rounded through `f64`.
fn scalar_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<(String, bool), D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok((s, false)),
        serde_json::Value::Number(n) => Ok((n.to_string(), true)),
        other => Err(serde::de::Error::invalid_type(
            serde::de::Unexpected::Other(&other.to_string()),
            &"a string or a number",
        )),
    }
}

fn parse_decimal(text: &str) -> Result<Decimal, rust_decimal::Error> {
    let text = text.trim();
    Decimal::from_str(text).or_else(|_| Decimal::from_scientific(text))
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match scalar_text(deserializer)? {
            (text, true) => Identifier::number(&text),
            (text, false) => Identifier::Text(text),
        })
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Identifier::Text(s) => serializer.serialize_str(s),
            Identifier::Number(s) => serde_json::Number::from_str(s)
                .map_err(serde::ser::Error::custom)?
                .serialize(serializer),
        }
    }
}

// --- Scores ---

/// A user's score as an exact decimal.
///
/// Accepts JSON numbers and decimal strings. Two scores are equal when their
/// decimal values are equal, so `"10.0"` and `10` compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Score(Decimal);

impl Score {
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Decimal> for Score {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<u64> for Score {
    fn from(value: u64) -> Self {
        Self(Decimal::from(value))
    }
}

impl FromStr for Score {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_decimal(s).map(Score)
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (text, _) = scalar_text(deserializer)?;
        text.parse()
            .map_err(|e| serde::de::Error::custom(format!("invalid score {:?}: {}", text, e)))
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

// --- Snapshots ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserScore {
    pub id: Identifier,
    pub score: Score,
}

impl UserScore {
    pub fn new(id: impl Into<Identifier>, score: impl Into<Score>) -> Self {
        Self {
            id: id.into(),
            score: score.into(),
        }
    }
}

/// The server's complete view of one competition at the time of a message.
/// A newer snapshot for the same competition replaces this one entirely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompetitionSnapshot {
    #[serde(rename = "CompetitionID")]
    pub competition_id: Identifier,
    #[serde(rename = "Users")]
    pub users: Vec<UserScore>,
}

impl CompetitionSnapshot {
    pub fn new(competition_id: impl Into<Identifier>, users: Vec<UserScore>) -> Self {
        Self {
            competition_id: competition_id.into(),
            users,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_and_number_ids_are_distinct() {
        let text: Identifier = serde_json::from_value(json!("7")).unwrap();
        let number: Identifier = serde_json::from_value(json!(7)).unwrap();
        assert_eq!(text, Identifier::Text("7".into()));
        assert_eq!(number, Identifier::Number("7".into()));
        assert_ne!(text, number);
        assert_eq!(number.to_string(), "7");
    }

    #[test]
    fn numeric_id_serializes_back_to_a_number() {
        let id = Identifier::from(42u64);
        assert_eq!(serde_json::to_value(&id).unwrap(), json!(42));
        assert_eq!(
            serde_json::to_value(Identifier::from("a")).unwrap(),
            json!("a")
        );
    }

    #[test]
    fn scores_compare_by_decimal_value() {
        let from_string: Score = serde_json::from_value(json!("10.0")).unwrap();
        let from_number: Score = serde_json::from_value(json!(10)).unwrap();
        assert_eq!(from_string, from_number);

        let a: Score = serde_json::from_value(json!("0.3")).unwrap();
        let b: Score = serde_json::from_value(json!(0.3)).unwrap();
        assert_eq!(a, b);

        let c: Score = serde_json::from_value(json!("15.01")).unwrap();
        assert_ne!(from_number, c);
    }

    #[test]
    fn numeric_scores_keep_their_exact_text() {
        let short: Score = serde_json::from_str("0.1").unwrap();
        let long: Score = serde_json::from_str("0.10000000000000001").unwrap();
        assert_ne!(short, long);
        assert_eq!(long.to_string(), "0.10000000000000001");

        let big: Score = serde_json::from_str("12345678901234567890123").unwrap();
        assert_eq!(big.to_string(), "12345678901234567890123");
    }

    #[test]
    fn numeric_ids_are_canonical() {
        let parse = |text: &str| serde_json::from_str::<Identifier>(text).unwrap();
        assert_eq!(parse("1"), parse("1.0"));
        assert_eq!(parse("1e2"), parse("100"));
        assert_eq!(parse("1.50"), Identifier::Number("1.5".into()));
        assert_ne!(parse("1"), parse("\"1\""));

        let big = parse("98765432109876543210");
        assert_eq!(big.to_string(), "98765432109876543210");
    }

    #[test]
    fn rejects_non_decimal_score_text() {
        assert!(serde_json::from_value::<Score>(json!("ten")).is_err());
        assert!(serde_json::from_value::<Score>(json!(true)).is_err());
    }

    #[test]
    fn accepts_scientific_notation() {
        let score: Score = "1.5e2".parse().unwrap();
        assert_eq!(score, Score::from(150u64));
    }
}
