use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDateTime, SubsecRound, Utc};

/// Rendering format: ISO-8601 with exactly six fractional digits.
const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Parsing format: the fractional part is optional.
const ISO_PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Wall-clock timestamp for record creation and modification.
///
/// Stored as a naive UTC date-time truncated to microseconds, so a value
/// survives an ISO-8601 round trip unchanged.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// The current UTC time.
    pub fn now() -> Self {
        Self(Utc::now().naive_utc().trunc_subsecs(6))
    }

    /// Wrap an existing date-time, dropping sub-microsecond precision.
    pub fn from_naive(datetime: NaiveDateTime) -> Self {
        Self(datetime.trunc_subsecs(6))
    }

    /// The underlying date-time.
    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    /// A timestamp strictly after `prev`: the current time if the clock has
    /// moved past it, otherwise `prev` plus one microsecond.
    pub fn advanced_past(prev: Timestamp) -> Self {
        let now = Self::now();
        if now > prev {
            now
        } else {
            Self(prev.0 + Duration::microseconds(1))
        }
    }

    /// ISO-8601 rendering, e.g. `2017-09-28T21:03:54.052302`.
    pub fn to_iso(&self) -> String {
        self.0.format(ISO_FORMAT).to_string()
    }

    /// Parse an ISO-8601 string as written by [`Timestamp::to_iso`].
    pub fn parse_iso(s: &str) -> Result<Self, chrono::ParseError> {
        NaiveDateTime::parse_from_str(s, ISO_PARSE_FORMAT).map(Self::from_naive)
    }
}

impl FromStr for Timestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_iso(s)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.to_iso())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso())
    }
}
