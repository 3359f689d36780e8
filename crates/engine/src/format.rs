//! Display-base rendering for quiz values.
//!
//! The engine emits every answer-key field as a display-ready string in a
//! configurable numeric base. Strings are unprefixed; the presentation
//! layer decides whether to show `0b`/`0x` prefixes (see
//! [`DisplayBase::prefix`]).

use serde::{Deserialize, Serialize};

/// Numeric base quiz values are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum DisplayBase {
    /// Base 2, prefix `0b`.
    Binary,
    /// Base 10, no prefix.
    Decimal,
    /// Base 16 (lowercase digits), prefix `0x`.
    #[default]
    #[serde(alias = "Hex")]
    Hexadecimal,
}

impl DisplayBase {
    /// Returns the numeric radix (2, 10, or 16).
    pub fn radix(self) -> u32 {
        match self {
            Self::Binary => 2,
            Self::Decimal => 10,
            Self::Hexadecimal => 16,
        }
    }

    /// Returns the presentation prefix for this base.
    ///
    /// The engine never applies it; prefixes are the front-end's job.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Binary => "0b",
            Self::Decimal => "",
            Self::Hexadecimal => "0x",
        }
    }

    /// Renders `value` in this base, unpadded, hex in lowercase.
    pub fn render(self, value: u64) -> String {
        match self {
            Self::Binary => format!("{value:b}"),
            Self::Decimal => format!("{value}"),
            Self::Hexadecimal => format!("{value:x}"),
        }
    }
}

/// Renders `value` in binary, zero-padded on the left to `width` digits.
///
/// Used wherever a bit field has a fixed width: address decomposition and
/// physical-address assembly.
pub fn binary_width(value: u64, width: u32) -> String {
    format!("{value:0width$b}", width = width as usize)
}
