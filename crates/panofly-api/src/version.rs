// ── Negotiated protocol version ──
//
// The device's software version doubles as its configuration schema
// generation. It is fetched once per session and read on every operation
// to pick the wire encoding.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Device software version: `(major, minor, patch, suffix)`.
///
/// Ordering follows the numeric components, then the suffix, so `9.0.3`
/// < `9.0.3-h2` < `9.0.3-h10` < `9.1.0`. Values are immutable once
/// obtained from the session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ProtocolVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    /// Hotfix / build suffix such as `h3` or `c45`. Empty for releases.
    pub suffix: String,
}

impl ProtocolVersion {
    /// A release version with no suffix.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            suffix: String::new(),
        }
    }

    /// Attach a hotfix / build suffix.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }
}

impl Ord for ProtocolVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| cmp_suffix(&self.suffix, &other.suffix))
    }
}

impl PartialOrd for ProtocolVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Letters first, then the digit run by value, then whatever follows.
/// The raw text breaks remaining ties so only equal suffixes compare equal.
fn cmp_suffix(a: &str, b: &str) -> Ordering {
    let (a_tag, a_num, a_rest) = split_suffix(a);
    let (b_tag, b_num, b_rest) = split_suffix(b);
    a_tag
        .cmp(b_tag)
        .then_with(|| a_num.len().cmp(&b_num.len()))
        .then_with(|| a_num.cmp(b_num))
        .then_with(|| a_rest.cmp(b_rest))
        .then_with(|| a.cmp(b))
}

/// `h10x` -> (`h`, `10`, `x`), with leading zeros dropped from the digits.
fn split_suffix(suffix: &str) -> (&str, &str, &str) {
    let digits_at = suffix
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(suffix.len());
    let (tag, tail) = suffix.split_at(digits_at);
    let digits_end = tail
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(tail.len());
    let (digits, rest) = tail.split_at(digits_end);
    (tag, digits.trim_start_matches('0'), rest)
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.suffix.is_empty() {
            write!(f, "-{}", self.suffix)?;
        }
        Ok(())
    }
}

impl FromStr for ProtocolVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| Error::InvalidVersion {
            raw: s.to_owned(),
            reason: reason.to_owned(),
        };

        let trimmed = s.trim();
        let (numbers, suffix) = match trimmed.split_once('-') {
            Some((numbers, suffix)) => (numbers, suffix),
            None => (trimmed, ""),
        };

        let mut parts = numbers.split('.');
        let mut next = |label: &str| -> Result<u32, Error> {
            parts
                .next()
                .ok_or_else(|| invalid(&format!("missing {label} component")))?
                .parse::<u32>()
                .map_err(|e| invalid(&format!("bad {label} component: {e}")))
        };

        let major = next("major")?;
        let minor = next("minor")?;
        let patch = next("patch")?;
        if parts.next().is_some() {
            return Err(invalid("too many components"));
        }

        Ok(Self::new(major, minor, patch).with_suffix(suffix))
    }
}
