//! Snowflake ID - 64-bit time-ordered identifier for users, targets and votes
//!
//! Layout: 42 bits of milliseconds since [`Snowflake::EPOCH`], 10 bits of
//! worker id, 12 bits of per-millisecond sequence.

use parking_lot::Mutex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

const WORKER_BITS: u32 = 10;
const SEQUENCE_BITS: u32 = 12;
const MAX_WORKER_ID: u16 = (1 << WORKER_BITS) - 1;
const SEQUENCE_MASK: i64 = (1 << SEQUENCE_BITS) - 1;

/// Snowflake identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Snowflake(i64);

impl Snowflake {
    /// Custom epoch: 2024-01-01 00:00:00 UTC (milliseconds)
    pub const EPOCH: i64 = 1_704_067_200_000;

    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Zero is never issued and marks a missing identifier
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Parse from the decimal string representation.
    ///
    /// Negative values are rejected.
    pub fn parse(s: &str) -> Result<Self, SnowflakeParseError> {
        match s.trim().parse::<i64>() {
            Ok(id) if id >= 0 => Ok(Self(id)),
            _ => Err(SnowflakeParseError::InvalidFormat),
        }
    }
}

/// Error when parsing a Snowflake from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SnowflakeParseError {
    #[error("invalid snowflake format")]
    InvalidFormat,
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Snowflake {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for i64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

impl std::str::FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Snowflake::parse(s)
    }
}

// Serialized as a string so JavaScript clients keep full precision
impl Serialize for Snowflake {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Int(i64),
            Str(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Int(id) if id >= 0 => Ok(Snowflake(id)),
            Repr::Int(_) => Err(serde::de::Error::custom("snowflake must not be negative")),
            Repr::Str(s) => Snowflake::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}

/// Thread-safe Snowflake ID generator
///
/// Issues up to 4096 ids per millisecond per worker.
pub struct SnowflakeGenerator {
    worker_id: u16,
    // (last timestamp in ms since EPOCH, last sequence)
    state: Mutex<(i64, i64)>,
}

impl SnowflakeGenerator {
    /// Create a new generator with the given worker ID
    ///
    /// # Panics
    /// Panics if worker_id >= 1024
    pub fn new(worker_id: u16) -> Self {
        assert!(worker_id <= MAX_WORKER_ID, "Worker ID must be < 1024");
        Self {
            worker_id,
            state: Mutex::new((0, 0)),
        }
    }

    /// Generate a new unique Snowflake ID
    pub fn generate(&self) -> Snowflake {
        let mut state = self.state.lock();
        let (last, sequence) = *state;

        // A clock that moved backwards keeps using the last timestamp
        let mut now = Self::elapsed_millis().max(last);
        let next_sequence = if now == last {
            let seq = (sequence + 1) & SEQUENCE_MASK;
            if seq == 0 {
                while now <= last {
                    std::hint::spin_loop();
                    now = Self::elapsed_millis();
                }
            }
            seq
        } else {
            0
        };

        *state = (now, next_sequence);
        Snowflake::new(
            (now << (WORKER_BITS + SEQUENCE_BITS))
                | (i64::from(self.worker_id) << SEQUENCE_BITS)
                | next_sequence,
        )
    }

    pub fn worker_id(&self) -> u16 {
        self.worker_id
    }

    fn elapsed_millis() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64 - Snowflake::EPOCH)
            .unwrap_or(0)
    }
}

impl Default for SnowflakeGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}
