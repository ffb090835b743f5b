use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Tax filing status. Selects the federal bracket column and the state
/// bracket table used for a projection.
///
/// Serializes as its [`Display`](fmt::Display) name and deserializes from
/// anything [`FilingStatus::parse`] accepts, including the bare numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilingStatus {
    Single,
    #[default]
    Joint,
    Separate,
    HeadOfHousehold,
}

/// Error returned when a filing status code or name is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognised filing status '{0}' (expected 1-4, single, joint, separate or head)")]
pub struct ParseFilingStatusError(pub String);

impl FilingStatus {
    pub const ALL: [FilingStatus; 4] = [
        Self::Single,
        Self::Joint,
        Self::Separate,
        Self::HeadOfHousehold,
    ];

    /// Numeric code used on the command line (1=single, 2=joint,
    /// 3=separate, 4=head of household).
    pub fn code(&self) -> u8 {
        match self {
            Self::Single => 1,
            Self::Joint => 2,
            Self::Separate => 3,
            Self::HeadOfHousehold => 4,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Single),
            2 => Some(Self::Joint),
            3 => Some(Self::Separate),
            4 => Some(Self::HeadOfHousehold),
            _ => None,
        }
    }

    /// Zero-based column index into the bracket tables.
    pub fn index(&self) -> usize {
        usize::from(self.code() - 1)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Joint => "joint",
            Self::Separate => "separate",
            Self::HeadOfHousehold => "head",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(code) = s.parse::<u8>() {
            return Self::from_code(code);
        }
        match s.to_ascii_lowercase().as_str() {
            "single" | "s" => Some(Self::Single),
            "joint" | "mfj" => Some(Self::Joint),
            "separate" | "mfs" => Some(Self::Separate),
            "head" | "hoh" | "head-of-household" | "head_of_household" => Some(Self::HeadOfHousehold),
            _ => None,
        }
    }
}

impl fmt::Display for FilingStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilingStatus {
    type Err = ParseFilingStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseFilingStatusError(s.to_string()))
    }
}

impl Serialize for FilingStatus {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

struct FilingStatusVisitor;

impl Visitor<'_> for FilingStatusVisitor {
    type Value = FilingStatus;

    fn expecting(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str("a filing status code 1-4 or name")
    }

    fn visit_str<E: de::Error>(
        self,
        v: &str,
    ) -> Result<FilingStatus, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(
        self,
        v: u64,
    ) -> Result<FilingStatus, E> {
        u8::try_from(v)
            .ok()
            .and_then(FilingStatus::from_code)
            .ok_or_else(|| E::custom(ParseFilingStatusError(v.to_string())))
    }

    fn visit_i64<E: de::Error>(
        self,
        v: i64,
    ) -> Result<FilingStatus, E> {
        u64::try_from(v)
            .map_err(|_| E::custom(ParseFilingStatusError(v.to_string())))
            .and_then(|v| self.visit_u64(v))
    }
}

impl<'de> Deserialize<'de> for FilingStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FilingStatusVisitor)
    }
}
