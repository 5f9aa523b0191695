//! Assimilation cycle times in rose/cylc notation.

use chrono::{DateTime, Datelike, Duration, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{OmfgError, OmfgResult};

/// Cylc cycle point format, e.g. `20190830T1200Z`.
pub const CYCLE_FORMAT: &str = "%Y%m%dT%H%MZ";

/// Hours between consecutive assimilation cycles.
pub const CYCLE_STEP_HOURS: i64 = 6;

/// Latest year with a four-digit cycle point.
pub const MAX_CYCLE_YEAR: i32 = 9999;

/// A single forecast/assimilation cycle.
///
/// Cycles are plain values: stepping returns a new cycle and never touches
/// the original, so a cycle held in a request can be used as the start of
/// an iteration without being disturbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cycle {
    instant: DateTime<Utc>,
}

impl Cycle {
    /// Parse a cycle from its `YYYYMMDDThhmmZ` string form.
    ///
    /// Only years `0000..=9999` are accepted; anything else has no
    /// fixed-width cycle point.
    pub fn parse(s: &str) -> OmfgResult<Self> {
        let invalid = || OmfgError::InvalidCycleFormat(s.to_string());
        if !s.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let ndt = NaiveDateTime::parse_from_str(s, CYCLE_FORMAT).map_err(|_| invalid())?;
        if !(0..=MAX_CYCLE_YEAR).contains(&ndt.year()) {
            return Err(invalid());
        }
        Ok(Self {
            instant: Utc.from_utc_datetime(&ndt),
        })
    }

    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    /// The underlying instant.
    pub fn datetime(&self) -> DateTime<Utc> {
        self.instant
    }

    /// The cycle six hours later.
    ///
    /// Stepping past the end of year 9999 yields a cycle whose text form
    /// cannot be parsed back; use [`Cycle::checked_increment`] near that edge.
    pub fn increment(&self) -> Self {
        Self {
            instant: self.instant + Duration::hours(CYCLE_STEP_HOURS),
        }
    }

    /// The cycle six hours later, or `None` past the end of year 9999.
    pub fn checked_increment(&self) -> Option<Self> {
        let next = self.increment();
        (next.instant.year() <= MAX_CYCLE_YEAR).then_some(next)
    }

    /// The cycle six hours earlier.
    pub fn decrement(&self) -> Self {
        Self {
            instant: self.instant - Duration::hours(CYCLE_STEP_HOURS),
        }
    }

    /// Iterate from `self` to `end` inclusive in six hour steps.
    ///
    /// Yields nothing when `end` is earlier than `self`.
    pub fn range_to(&self, end: Cycle) -> CycleRange {
        CycleRange {
            next: Some(*self),
            end,
        }
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.instant.format(CYCLE_FORMAT))
    }
}

impl FromStr for Cycle {
    type Err = OmfgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cycle::parse(s)
    }
}

impl TryFrom<String> for Cycle {
    type Error = OmfgError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Cycle::parse(&value)
    }
}

impl From<Cycle> for String {
    fn from(cycle: Cycle) -> Self {
        cycle.to_string()
    }
}

/// Inclusive, ascending iterator over cycles.
#[derive(Debug, Clone)]
pub struct CycleRange {
    next: Option<Cycle>,
    end: Cycle,
}

impl Iterator for CycleRange {
    type Item = Cycle;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.filter(|cycle| *cycle <= self.end)?;
        self.next = current.checked_increment();
        Some(current)
    }
}
