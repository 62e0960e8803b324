//! Injectable sources of randomness and time.
//!
//! The generator never reaches for a global RNG or the wall clock directly.
//! Production code uses [`ThreadRngIdSource`] and [`SystemClock`]; tests swap
//! in [`FixedIdSource`] and [`FixedClock`] to assert exact output.

use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;
use std::fmt::Debug;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const HEX: &[u8] = b"0123456789abcdef";

/// ISO-8601 UTC timestamp with millisecond precision, e.g. `2025-01-02T03:04:05.000Z`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Source of random identifier material.
pub trait IdSource: Debug + Send + Sync {
    /// `len` characters drawn from `[0-9a-z]`.
    fn token(&self, len: usize) -> String;

    /// `len` lowercase hexadecimal characters.
    fn hex(&self, len: usize) -> String;
}

/// Source of the current time.
pub trait Clock: Debug + Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Fresh randomness per call from the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngIdSource;

impl ThreadRngIdSource {
    fn pick(alphabet: &[u8], len: usize) -> String {
        let mut rng = rand::thread_rng();
        (0..len)
            .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
            .collect()
    }
}

impl IdSource for ThreadRngIdSource {
    fn token(&self, len: usize) -> String {
        Self::pick(BASE36, len)
    }

    fn hex(&self, len: usize) -> String {
        Self::pick(HEX, len)
    }
}

/// Deterministic source that repeats a fixed pattern.
///
/// The pattern is cycled until `len` characters are produced, so any requested
/// length is honoured.
#[derive(Debug, Clone)]
pub struct FixedIdSource {
    token: String,
    hex: String,
}

impl FixedIdSource {
    pub fn new(token: impl Into<String>, hex: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            hex: hex.into(),
        }
    }

    fn cycle(pattern: &str, len: usize) -> String {
        if pattern.is_empty() {
            return "0".repeat(len);
        }
        pattern.chars().cycle().take(len).collect()
    }
}

impl IdSource for FixedIdSource {
    fn token(&self, len: usize) -> String {
        Self::cycle(&self.token, len)
    }

    fn hex(&self, len: usize) -> String {
        Self::cycle(&self.hex, len)
    }
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
