use chrono::{DateTime, TimeZone, Utc};

/// Converts a binlog event's unix-seconds timestamp into a UTC instant.
///
/// Binlog headers never carry an out-of-range value in practice; an
/// overflowing timestamp falls back to the unix epoch rather than panicking.
pub fn unix_seconds_to_utc(seconds: u32) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds as i64, 0)
        .single()
        .unwrap_or_else(|| Utc.timestamp_opt(0, 0).single().unwrap())
}
