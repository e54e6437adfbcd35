//! SMS messages as read from the local message store.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};

/// Seconds between the Unix epoch and 2001-01-01T00:00:00Z, the anchor of
/// the store's native timestamps.
const STORE_EPOCH_UNIX_SECS: i64 = 978_307_200;

/// Display format for message timestamps (`YYYY-MM-DD HH:MM`).
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A single SMS message. Immutable once read from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Sender identifier as recorded by the store (phone number or short name).
    pub sender: String,
    /// Message body.
    pub text: String,
    /// Absolute send time.
    pub timestamp: DateTime<Utc>,
    /// Store-native timestamp (nanoseconds since 2001-01-01 UTC).
    pub raw_timestamp: i64,
}

impl Message {
    /// Build a message from a store row, converting the native timestamp.
    pub fn from_store(sender: String, text: String, raw_timestamp: i64) -> Self {
        Self {
            sender,
            text,
            timestamp: store_time_to_utc(raw_timestamp),
            raw_timestamp,
        }
    }

    /// Timestamp rendered as `YYYY-MM-DD HH:MM`.
    pub fn time_str(&self) -> String {
        self.timestamp.format(TIME_FORMAT).to_string()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.time_str(), self.sender, self.text)
    }
}

/// Convert a store-native offset (nanoseconds since 2001-01-01 UTC) into an
/// absolute instant.
pub fn store_time_to_utc(raw: i64) -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
        + TimeDelta::seconds(STORE_EPOCH_UNIX_SECS)
        + TimeDelta::nanoseconds(raw)
}

/// Inverse of [`store_time_to_utc`]; used when seeding test stores.
pub fn utc_to_store_time(time: DateTime<Utc>) -> i64 {
    let since_anchor = time - store_time_to_utc(0);
    since_anchor.num_nanoseconds().unwrap_or(i64::MAX)
}
