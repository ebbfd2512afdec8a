//! Lenient decoding of a project's analysis date.
//!
//! The service may send the date as epoch milliseconds or as an ISO-8601 string,
//! either RFC 3339 or its own `2017-05-10T12:00:00+0200` form. Anything that
//! cannot be understood is treated as "never analyzed".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDate {
    Millis(i64),
    FractionalMillis(f64),
    Text(String),
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error> {
    let raw = Option::<RawDate>::deserialize(deserializer)?;
    Ok(raw.and_then(|raw| match raw {
        RawDate::Millis(ms) => DateTime::from_timestamp_millis(ms),
        RawDate::FractionalMillis(ms) => from_fractional_millis(ms),
        RawDate::Text(text) => parse_text(&text),
    }))
}

#[expect(clippy::cast_possible_truncation, reason = "sub-millisecond precision is irrelevant here")]
fn from_fractional_millis(ms: f64) -> Option<DateTime<Utc>> {
    if ms.is_finite() {
        DateTime::from_timestamp_millis(ms.floor() as i64)
    } else {
        None
    }
}

fn parse_text(text: &str) -> Option<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%z"))
        .or_else(|_| DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f%z"));

    match parsed {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            log::debug!("ignoring unparsable analysis date '{text}': {e}");
            None
        }
    }
}
