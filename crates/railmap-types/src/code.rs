//! Department code newtype with fixed-width normalization.
//!
//! Source datasets disagree on how a department code is written: the
//! population table may carry `1` where the boundary file carries `01`.
//! [`RegionCode`] is the only way to hold a code in this workspace, and it
//! can only be built through [`RegionCode::normalize`], so every join and
//! lookup compares the same left-zero-padded representation.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Minimum width of a normalized department code.
pub const CODE_WIDTH: usize = 2;

/// A normalized department code (`"01"`, `"2A"`, `"75"`, `"971"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(try_from = "String", into = "String")]
#[ts(export, export_to = "bindings/")]
pub struct RegionCode(String);

/// Raised when a textual code is empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("empty region code")]
pub struct EmptyRegionCode;

impl RegionCode {
    /// Normalize a raw code: trim, then left-pad with `'0'` to
    /// [`CODE_WIDTH`]. Longer codes are kept whole.
    ///
    /// Returns `None` when nothing is left after trimming.
    pub fn normalize(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(format!("{trimmed:0>width$}", width = CODE_WIDTH)))
    }

    /// Borrow the normalized code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for RegionCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RegionCode {
    type Error = EmptyRegionCode;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::normalize(&raw).ok_or(EmptyRegionCode)
    }
}

impl From<RegionCode> for String {
    fn from(code: RegionCode) -> Self {
        code.0
    }
}

impl AsRef<str> for RegionCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(raw: &str) -> Option<String> {
        RegionCode::normalize(raw).map(String::from)
    }

    #[test]
    fn pads_single_digit() {
        assert_eq!(code("1").as_deref(), Some("01"));
        assert_eq!(code(" 9 ").as_deref(), Some("09"));
    }

    #[test]
    fn keeps_two_character_codes() {
        assert_eq!(code("01").as_deref(), Some("01"));
        assert_eq!(code("2A").as_deref(), Some("2A"));
        assert_eq!(code("75").as_deref(), Some("75"));
    }

    #[test]
    fn never_truncates_longer_codes() {
        assert_eq!(code("971").as_deref(), Some("971"));
    }

    #[test]
    fn empty_code_is_rejected() {
        assert!(code("").is_none());
        assert!(code("   ").is_none());
    }

    #[test]
    fn deserialization_normalizes() {
        let parsed: Result<RegionCode, _> = serde_json::from_str("\"5\"");
        assert_eq!(parsed.ok().map(String::from).as_deref(), Some("05"));

        let empty: Result<RegionCode, _> = serde_json::from_str("\"\"");
        assert!(empty.is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let code = RegionCode::normalize("3");
        let json = code.map(|c| serde_json::to_string(&c).ok());
        assert_eq!(json.flatten().as_deref(), Some("\"03\""));
    }
}
