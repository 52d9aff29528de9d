//! Timestamp codecs for the two wire encodings used by node endpoints.
//!
//! `/v1/chain/get_info` emits naive ISO-8601 strings (`2019-08-04T13:33:54`)
//! that are always UTC but carry no offset. `/v2/health` emits service times
//! as milliseconds since the Unix epoch. The two forms are decoded by
//! separate functions and selected per field; nothing here guesses the
//! format from the value.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Wire format of naive-UTC timestamps, second precision.
pub const NAIVE_UTC_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Accepted on decode: an optional `.fff` suffix after the seconds.
const NAIVE_UTC_PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parse a naive timestamp string and pin it to UTC.
pub fn parse_naive_utc(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, NAIVE_UTC_PARSE_FORMAT).map(|naive| naive.and_utc())
}

/// Render a timestamp in the naive wire form. Never appends an offset.
pub fn format_naive_utc(value: &DateTime<Utc>) -> String {
    value.format(NAIVE_UTC_FORMAT).to_string()
}

/// Convert milliseconds since the Unix epoch to a UTC timestamp.
///
/// Returns `None` when the value is outside the representable range.
pub fn from_epoch_millis(millis: i64) -> Option<DateTime<Utc>> {
    let secs = millis.div_euclid(1000);
    let nanos = (millis.rem_euclid(1000) * 1_000_000) as u32;
    DateTime::from_timestamp(secs, nanos)
}

/// Convert a UTC timestamp back to milliseconds since the Unix epoch.
pub fn to_epoch_millis(value: &DateTime<Utc>) -> i64 {
    value.timestamp_millis()
}

/// Serde adapter for naive-UTC string fields.
pub mod naive_utc {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_naive_utc(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_naive_utc(&raw)
            .map_err(|e| de::Error::custom(format!("invalid timestamp '{}': {}", raw, e)))
    }

    /// Same encoding for optional fields; `null` and absence both decode to `None`.
    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer, de};

        pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(value) => super::serialize(value, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => super::super::parse_naive_utc(&raw)
                    .map(Some)
                    .map_err(|e| de::Error::custom(format!("invalid timestamp '{}': {}", raw, e))),
                None => Ok(None),
            }
        }
    }
}

/// Serde adapter for epoch-millisecond integer fields.
pub mod epoch_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(super::to_epoch_millis(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = i64::deserialize(deserializer)?;
        super::from_epoch_millis(millis)
            .ok_or_else(|| de::Error::custom(format!("epoch milliseconds out of range: {}", millis)))
    }
}
