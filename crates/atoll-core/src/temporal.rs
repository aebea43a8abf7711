//! # Temporal Types — Ledger Time
//!
//! Defines `Timestamp`, a UTC-only timestamp truncated to seconds
//! precision — the granularity the external ledger reports.
//!
//! ## Invariant
//!
//! Domain code never reads the wall clock. Every time-dependent transition
//! (marine right expiry, bond maturity, KYC expiry, project deadlines) is
//! evaluated lazily against a timestamp supplied by the ledger boundary at
//! call time. `Timestamp::now()` exists for binaries and tests that stand
//! in for that boundary.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::OperationError;

/// Seconds in a (non-leap) year, the basis for simple-interest accrual.
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// A UTC timestamp truncated to seconds precision.
///
/// # Construction
///
/// - [`Timestamp::from_epoch_secs()`] — from the ledger's epoch seconds.
/// - [`Timestamp::parse()`] — from an RFC 3339 string (CLI and fixtures).
/// - [`Timestamp::now()`] — current UTC time, truncated (ledger stand-ins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp from the current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// Create a timestamp from a Unix epoch timestamp (seconds).
    pub fn from_epoch_secs(secs: i64) -> Result<Self, OperationError> {
        let dt = DateTime::from_timestamp(secs, 0).ok_or_else(|| {
            OperationError::validation(format!("invalid Unix timestamp: {secs}"))
        })?;
        Ok(Self(dt))
    }

    /// Parse a timestamp from an RFC 3339 string, converting to UTC and
    /// truncating sub-seconds.
    pub fn parse(s: &str) -> Result<Self, OperationError> {
        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| {
            OperationError::validation(format!("invalid RFC 3339 timestamp {s:?}: {e}"))
        })?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Returns the Unix epoch timestamp in seconds.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// The timestamp `secs` seconds after this one.
    pub fn plus_secs(&self, secs: u64) -> Self {
        Self(self.0 + chrono::Duration::seconds(secs as i64))
    }

    /// Whole seconds elapsed from `earlier` to `self`; zero if `earlier`
    /// is not actually earlier.
    pub fn secs_since(&self, earlier: Timestamp) -> u64 {
        (self.0 - earlier.0).num_seconds().max(0) as u64
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Render as ISO8601 with Z suffix (e.g., `2026-01-15T12:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

/// Truncate a `DateTime<Utc>` to seconds precision (discard nanoseconds).
fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}
