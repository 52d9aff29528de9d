//! Response payloads of the node status endpoints.
//!
//! Field names follow the server's snake_case wire identifiers exactly.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::time;

/// Open-ended key/value map whose value shapes are controlled by the server.
pub type DataMap = HashMap<String, serde_json::Value>;

// ─────────────────────────────────────────────────────────────────────────────
// Chain info
// ─────────────────────────────────────────────────────────────────────────────

/// Chain status snapshot from `/v1/chain/get_info`.
///
/// Keys missing from the payload decode to zero values; a key present with
/// the wrong type is still a decode error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Info {
    /// Short server build hash.
    pub server_version: String,
    /// Human readable server version (absent on old servers).
    pub server_version_string: String,
    /// Server version including the full commit hash (absent on old servers).
    pub server_full_version_string: String,
    /// Chain identifier.
    pub chain_id: String,
    pub head_block_id: String,
    pub head_block_num: u64,
    #[serde(with = "time::naive_utc")]
    pub head_block_time: DateTime<Utc>,
    pub head_block_producer: String,
    pub last_irreversible_block_num: u64,
    pub last_irreversible_block_id: String,
    #[serde(
        with = "time::naive_utc::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_irreversible_block_time: Option<DateTime<Utc>>,
    pub virtual_block_cpu_limit: u64,
    pub virtual_block_net_limit: u64,
    pub block_cpu_limit: u64,
    pub block_net_limit: u64,
    /// Total staked CPU weight. The server spells this key `total_cpu_weigth`.
    #[serde(
        rename = "total_cpu_weigth",
        alias = "total_cpu_weight",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_cpu_weight: Option<u64>,
    /// Total staked NET weight. The server spells this key `total_net_weigth`.
    #[serde(
        rename = "total_net_weigth",
        alias = "total_net_weight",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_net_weight: Option<u64>,
    pub fork_db_head_block_id: String,
    pub fork_db_head_block_num: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earliest_available_block_num: Option<u64>,
    /// HTTP status of the response this value was decoded from.
    #[serde(skip)]
    pub http_status: u16,
}

impl Info {
    /// Number of blocks between head and last irreversible block.
    pub fn irreversible_lag(&self) -> u64 {
        self.head_block_num
            .saturating_sub(self.last_irreversible_block_num)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Health
// ─────────────────────────────────────────────────────────────────────────────

/// Service-health snapshot from `/v2/health`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Health {
    pub version: String,
    pub version_hash: String,
    /// Monitored subsystems, in server order.
    pub health: Vec<Service>,
    #[serde(deserialize_with = "null_as_empty")]
    pub features: DataMap,
    /// Time the server spent answering, in milliseconds.
    pub query_time_ms: f64,
    /// HTTP status of the response this value was decoded from.
    #[serde(skip)]
    pub http_status: u16,
}

impl Health {
    /// Look up a service entry by name.
    pub fn service(&self, name: &str) -> Option<&Service> {
        self.health.iter().find(|s| s.name == name)
    }

    /// True when every reported service is OK.
    pub fn is_healthy(&self) -> bool {
        self.health.iter().all(Service::is_ok)
    }
}

/// One monitored subsystem.
///
/// `time` is milliseconds since the Unix epoch on the wire, unlike the
/// naive-UTC strings of [`Info`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    #[serde(rename = "service")]
    pub name: String,
    /// Free-text status label such as `OK` or `DOWN`.
    pub status: String,
    #[serde(
        rename = "service_data",
        deserialize_with = "null_as_empty",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub data: DataMap,
    #[serde(with = "time::epoch_millis")]
    pub time: DateTime<Utc>,
}

impl Service {
    /// Whether the status label reads `OK` (case-insensitive).
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<DataMap, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<DataMap>::deserialize(deserializer)?.unwrap_or_default())
}

// ─────────────────────────────────────────────────────────────────────────────
// Structured API error
// ─────────────────────────────────────────────────────────────────────────────

/// Structured error body returned by the node on non-2xx responses.
///
/// Every field defaults on decode, so a body such as `{}` decodes to an
/// empty value. See [`ApiError::is_empty`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Outer code; the server mirrors the HTTP status here.
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub error: ApiErrorInfo,
    /// HTTP status of the response this error was decoded from.
    #[serde(skip)]
    pub http_status: u16,
}

/// Inner error object of an [`ApiError`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorInfo {
    /// Chain-specific error code, e.g. `3010004`.
    #[serde(default)]
    pub code: i64,
    /// Symbolic error name, e.g. `unknown_block_exception`.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub what: String,
    #[serde(default)]
    pub details: Vec<ApiErrorDetail>,
}

/// One diagnostic record inside an [`ApiErrorInfo`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub line_number: i64,
    #[serde(default)]
    pub method: String,
}

impl ApiError {
    /// True when every decoded field holds its zero value, i.e. the body was
    /// not actually a structured error.
    pub fn is_empty(&self) -> bool {
        self.code == 0 && self.message.is_empty() && self.error == ApiErrorInfo::default()
    }

    /// Status code of the error: the HTTP status when known, else the
    /// outer `code` of the body.
    pub fn status(&self) -> u16 {
        if self.http_status != 0 {
            return self.http_status;
        }
        u16::try_from(self.code).unwrap_or_default()
    }

    /// Message to display: the server's message, or the standard reason
    /// phrase of the status when the message is blank.
    pub fn display_message(&self) -> String {
        if self.message.is_empty() {
            crate::error::reason_phrase(self.status())
        } else {
            self.message.clone()
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status(), self.display_message())
    }
}

impl std::error::Error for ApiError {}
