//! Configuration system for the exercise generator.
//!
//! This module defines the draw ranges the random parameter generator
//! samples from. It provides:
//! 1. **Defaults:** Baseline exercise geometry (page sizes, TLB shape,
//!    address widths, page-table dimensions).
//! 2. **Structures:** [`GeneratorConfig`] and the half-open [`DrawRange`].
//! 3. **Validation:** Rejection of configurations that could never produce
//!    a valid exercise.
//!
//! Configuration is supplied via JSON (`GeneratorConfig::from_json`) or use
//! `GeneratorConfig::default()` for the stock exercise mix.

use serde::{Deserialize, Serialize};

use crate::common::ConfigError;
use crate::rng::RandomSource;

/// Largest supported width for PPN and filler-value draws.
///
/// Keeps every `2^width` computation comfortably inside a `u64`.
pub const MAX_VALUE_WIDTH: u32 = 32;

/// Default configuration constants for the generator.
///
/// These values reproduce the classic exam-style exercise mix when not
/// explicitly overridden.
mod defaults {
    /// Page sizes the generator picks from, in bytes.
    ///
    /// All powers of two; the page offset width is their log2 (4 to 6 bits).
    pub const PAGE_SIZES: [u64; 3] = [16, 32, 64];

    /// TLB set-count exponent range: sets = 2^U[2,4), i.e. 4 or 8 sets.
    pub const TLB_SET_EXPONENT: (u64, u64) = (2, 4);

    /// TLB associativity range: U[3,5), i.e. 3 or 4 ways.
    pub const TLB_WAYS: (u64, u64) = (3, 5);

    /// Virtual address bit width range: U[10,14).
    pub const VA_WIDTH: (u64, u64) = (10, 14);

    /// Page-table row count.
    ///
    /// Fixed at 3 regardless of page size; the 3x4 shape matches the exam
    /// convention the exercises reproduce rather than anything derived from
    /// the address space.
    pub const PAGE_TABLE_ROWS: usize = 3;

    /// Page-table column count (see [`PAGE_TABLE_ROWS`]).
    pub const PAGE_TABLE_COLS: usize = 4;

    /// Physical page number width in bits (the 8-bit PPN pool).
    pub const PPN_WIDTH: u32 = 8;

    /// Width of the synthetic tag/VPN values planted in table cells.
    pub const TABLE_VALUE_WIDTH: u32 = 8;
}

/// A half-open integer draw range `[lo, hi)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRange {
    /// Inclusive lower bound.
    pub lo: u64,
    /// Exclusive upper bound.
    pub hi: u64,
}

impl DrawRange {
    /// Creates a range `[lo, hi)`.
    pub fn new(lo: u64, hi: u64) -> Self {
        Self { lo, hi }
    }

    /// Returns true when the range contains no values.
    pub fn is_empty(self) -> bool {
        self.lo >= self.hi
    }

    /// Draws a uniform value from the range.
    pub fn draw<R: RandomSource + ?Sized>(self, rng: &mut R) -> u64 {
        rng.gen_range(self.lo, self.hi)
    }
}

impl From<(u64, u64)> for DrawRange {
    fn from((lo, hi): (u64, u64)) -> Self {
        Self { lo, hi }
    }
}

/// Draw ranges for the random parameter generator.
///
/// Every exercise regeneration samples its memory geometry from these
/// ranges. Use `GeneratorConfig::default()` for the stock mix, or
/// deserialize from JSON:
///
/// ```
/// use vmtrain_core::config::GeneratorConfig;
///
/// let json = r#"{
///     "page_sizes": [16, 64],
///     "va_width": { "lo": 12, "hi": 16 }
/// }"#;
///
/// let config = GeneratorConfig::from_json(json).unwrap();
/// assert_eq!(config.page_sizes, vec![16, 64]);
/// assert_eq!(config.va_width.lo, 12);
/// // Unspecified fields keep their defaults.
/// assert_eq!(config.tlb_ways.lo, 3);
/// assert_eq!(config.ppn_width, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Page sizes to pick from, in bytes (each a power of two).
    #[serde(default = "GeneratorConfig::default_page_sizes")]
    pub page_sizes: Vec<u64>,

    /// TLB set-count exponent range (sets = 2^draw).
    #[serde(default = "GeneratorConfig::default_tlb_set_exponent")]
    pub tlb_set_exponent: DrawRange,

    /// TLB associativity (way count) range.
    #[serde(default = "GeneratorConfig::default_tlb_ways")]
    pub tlb_ways: DrawRange,

    /// Virtual address bit width range.
    #[serde(default = "GeneratorConfig::default_va_width")]
    pub va_width: DrawRange,

    /// Page-table row count (fixed exam-style shape).
    #[serde(default = "GeneratorConfig::default_page_table_rows")]
    pub page_table_rows: usize,

    /// Page-table column count.
    #[serde(default = "GeneratorConfig::default_page_table_cols")]
    pub page_table_cols: usize,

    /// Physical page number width in bits.
    #[serde(default = "GeneratorConfig::default_ppn_width")]
    pub ppn_width: u32,

    /// Width of synthetic tag/VPN filler values in bits.
    #[serde(default = "GeneratorConfig::default_table_value_width")]
    pub table_value_width: u32,
}

impl GeneratorConfig {
    /// Returns the default page-size list.
    fn default_page_sizes() -> Vec<u64> {
        defaults::PAGE_SIZES.to_vec()
    }

    /// Returns the default TLB set-count exponent range.
    fn default_tlb_set_exponent() -> DrawRange {
        defaults::TLB_SET_EXPONENT.into()
    }

    /// Returns the default TLB way-count range.
    fn default_tlb_ways() -> DrawRange {
        defaults::TLB_WAYS.into()
    }

    /// Returns the default virtual address width range.
    fn default_va_width() -> DrawRange {
        defaults::VA_WIDTH.into()
    }

    /// Returns the default page-table row count.
    fn default_page_table_rows() -> usize {
        defaults::PAGE_TABLE_ROWS
    }

    /// Returns the default page-table column count.
    fn default_page_table_cols() -> usize {
        defaults::PAGE_TABLE_COLS
    }

    /// Returns the default PPN width.
    fn default_ppn_width() -> u32 {
        defaults::PPN_WIDTH
    }

    /// Returns the default synthetic-value width.
    fn default_table_value_width() -> u32 {
        defaults::TABLE_VALUE_WIDTH
    }

    /// Parses a configuration from JSON and validates it.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] on malformed JSON, or any validation error
    /// from [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every range can produce a valid exercise.
    ///
    /// # Errors
    ///
    /// Returns the first violation found: an empty page-size list, a
    /// non-power-of-two page size, an empty draw range, or a zero width or
    /// table dimension.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_sizes.is_empty() {
            return Err(ConfigError::EmptyPageSizes);
        }
        for &size in &self.page_sizes {
            if !size.is_power_of_two() {
                return Err(ConfigError::NonPowerOfTwoPageSize(size));
            }
        }
        for (name, range) in [
            ("tlb_set_exponent", self.tlb_set_exponent),
            ("tlb_ways", self.tlb_ways),
            ("va_width", self.va_width),
        ] {
            if range.is_empty() {
                return Err(ConfigError::EmptyRange {
                    name,
                    lo: range.lo,
                    hi: range.hi,
                });
            }
        }
        if self.page_table_rows == 0 {
            return Err(ConfigError::ZeroDimension("page_table_rows"));
        }
        if self.page_table_cols == 0 {
            return Err(ConfigError::ZeroDimension("page_table_cols"));
        }
        for (name, width) in [
            ("ppn_width", self.ppn_width),
            ("table_value_width", self.table_value_width),
        ] {
            if width == 0 {
                return Err(ConfigError::ZeroDimension(name));
            }
            if width > MAX_VALUE_WIDTH {
                return Err(ConfigError::WidthOutOfRange {
                    name,
                    width,
                    max: MAX_VALUE_WIDTH,
                });
            }
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            page_sizes: defaults::PAGE_SIZES.to_vec(),
            tlb_set_exponent: defaults::TLB_SET_EXPONENT.into(),
            tlb_ways: defaults::TLB_WAYS.into(),
            va_width: defaults::VA_WIDTH.into(),
            page_table_rows: defaults::PAGE_TABLE_ROWS,
            page_table_cols: defaults::PAGE_TABLE_COLS,
            ppn_width: defaults::PPN_WIDTH,
            table_value_width: defaults::TABLE_VALUE_WIDTH,
        }
    }
}
