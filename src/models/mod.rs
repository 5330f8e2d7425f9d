pub mod log;
pub mod recipe;

pub use log::{Log, LogPayload};
pub use recipe::{Recipe, RecipePayload};

use std::{fmt, num::ParseIntError, str::FromStr};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};

/// Storage-assigned row identifier.
///
/// Rows are keyed by `BIGINT` identity columns, but the JSON API exchanges ids
/// as decimal strings. Incoming ids are accepted in either string or numeric
/// form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, sqlx::Type)]
#[sqlx(transparent)]
pub struct RecordId(i64);

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for RecordId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RecordIdVisitor)
    }
}

struct RecordIdVisitor;

impl Visitor<'_> for RecordIdVisitor {
    type Value = RecordId;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integer id as a number or a decimal string")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<RecordId, E> {
        Ok(RecordId(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<RecordId, E> {
        i64::try_from(value)
            .map(RecordId)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(value), &self))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<RecordId, E> {
        value
            .trim()
            .parse()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
    }
}

/// Serializes a value for binding to a `$n::json` parameter. Binding text
/// instead of `sqlx::types::Json` avoids the implicit JSONB round trip, which
/// would reorder object keys.
pub(crate) fn encode_json<T: Serialize>(value: &T) -> sqlx::Result<String> {
    serde_json::to_string(value)
        .map_err(|err| sqlx::Error::Protocol(format!("failed to encode json: {err}")))
}

/// Connects to `DATABASE_URL` and applies migrations, or returns `None` when
/// no database is configured so storage tests can be skipped. Skips are
/// reported on stderr so a green run without a database is visible as such.
#[cfg(test)]
pub(crate) async fn test_pool() -> Option<sqlx::PgPool> {
    dotenvy::dotenv().ok();
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!(
            "skipping {}: DATABASE_URL is not set",
            std::thread::current().name().unwrap_or("storage test")
        );
        return None;
    };

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(4)
        .connect(&url)
        .await
        .expect("connect to DATABASE_URL");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("run migrations");

    Some(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_as_decimal_string() {
        let value = serde_json::to_value(RecordId::from(42)).expect("serialize");
        assert_eq!(value, json!("42"));
    }

    #[test]
    fn deserializes_from_string_or_number() {
        let from_str: RecordId = serde_json::from_value(json!("7")).expect("string id");
        let from_num: RecordId = serde_json::from_value(json!(7)).expect("numeric id");
        assert_eq!(from_str, RecordId::from(7));
        assert_eq!(from_num, RecordId::from(7));
    }

    #[test]
    fn rejects_non_integer_input() {
        assert!(serde_json::from_value::<RecordId>(json!("seven")).is_err());
        assert!(serde_json::from_value::<RecordId>(json!(1.5)).is_err());
        assert!(serde_json::from_value::<RecordId>(json!(u64::MAX)).is_err());
        assert!(serde_json::from_value::<RecordId>(json!(null)).is_err());
    }

    #[test]
    fn encode_json_keeps_key_order() {
        let ingredients: recipe::Ingredients = serde_json::from_str(
            r#"{"zucchini":{"amount":4,"measurement":"cup"},"apple":{"amount":0.5,"measurement":"whole"}}"#,
        )
        .expect("ingredients");

        assert_eq!(
            encode_json(&ingredients).expect("encode"),
            r#"{"zucchini":{"amount":4,"measurement":"cup"},"apple":{"amount":0.5,"measurement":"whole"}}"#
        );
    }

    #[test]
    fn encode_json_failures_surface_as_sqlx_errors() {
        let mut by_pair = std::collections::HashMap::new();
        by_pair.insert((1, 2), "not a string key");

        match encode_json(&by_pair) {
            Err(sqlx::Error::Protocol(message)) => assert!(message.contains("encode json")),
            other => panic!("expected a protocol error, got {other:?}"),
        }
    }

    #[test]
    fn parses_path_segments() {
        assert_eq!("12".parse::<RecordId>().expect("parse"), RecordId::from(12));
        assert!("abc".parse::<RecordId>().is_err());
        assert!("".parse::<RecordId>().is_err());
    }
}
