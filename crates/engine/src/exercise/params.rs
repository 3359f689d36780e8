//! Random memory-hierarchy parameter generation.
//!
//! Every exercise starts from a [`MemoryConfig`]: the page size, TLB shape,
//! and address widths the quiz fields are derived from. The geometry is
//! drawn from the ranges in a [`GeneratorConfig`] and validated before use;
//! an invalid draw is rejected and redrawn rather than propagated.

use serde::Serialize;

use crate::common::GenError;
use crate::config::GeneratorConfig;
use crate::rng::RandomSource;

/// Redraw cap for geometry generation.
///
/// The default ranges always satisfy the geometry invariant; the cap exists
/// so an incompatible custom configuration fails loudly instead of spinning.
const GEOMETRY_DRAW_CAP: usize = 32;

/// Memory-hierarchy geometry for one exercise.
///
/// All widths are derived on demand; the invariant `vpo + tlbi_width <=
/// va_width` is established at construction and holds for the lifetime of
/// the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemoryConfig {
    page_size: u64,
    tlb_sets: usize,
    tlb_ways: usize,
    va_width: u32,
    ppn_width: u32,
    page_table_rows: usize,
    page_table_cols: usize,
}

impl MemoryConfig {
    /// Creates a geometry from explicit parameters, using the default PPN
    /// width and page-table shape.
    ///
    /// # Arguments
    ///
    /// * `page_size` - Page size in bytes (power of two).
    /// * `tlb_sets` - TLB set count (power of two).
    /// * `tlb_ways` - TLB associativity.
    /// * `va_width` - Virtual address width in bits.
    ///
    /// # Errors
    ///
    /// [`GenError::InvalidGeometry`] when the offset and index fields do not
    /// fit in the virtual address, or a size parameter is degenerate.
    pub fn new(
        page_size: u64,
        tlb_sets: usize,
        tlb_ways: usize,
        va_width: u32,
    ) -> Result<Self, GenError> {
        let defaults = GeneratorConfig::default();
        let candidate = Self {
            page_size,
            tlb_sets,
            tlb_ways,
            va_width,
            ppn_width: defaults.ppn_width,
            page_table_rows: defaults.page_table_rows,
            page_table_cols: defaults.page_table_cols,
        };
        candidate.validate()?;
        Ok(candidate)
    }

    /// Draws a geometry from the configured ranges.
    ///
    /// Rejects and redraws geometries that violate the width invariant,
    /// bounded by an attempt cap.
    ///
    /// # Errors
    ///
    /// [`GenError::GeometryExhausted`] when no valid geometry is drawn
    /// within the cap (only possible with incompatible custom ranges).
    pub fn random<R: RandomSource + ?Sized>(
        config: &GeneratorConfig,
        rng: &mut R,
    ) -> Result<Self, GenError> {
        for _ in 0..GEOMETRY_DRAW_CAP {
            let candidate = Self {
                page_size: config.page_sizes[rng.index(config.page_sizes.len())],
                tlb_sets: 1 << config.tlb_set_exponent.draw(rng),
                tlb_ways: config.tlb_ways.draw(rng) as usize,
                va_width: config.va_width.draw(rng) as u32,
                ppn_width: config.ppn_width,
                page_table_rows: config.page_table_rows,
                page_table_cols: config.page_table_cols,
            };
            if candidate.validate().is_ok() {
                tracing::debug!(
                    page_size = candidate.page_size,
                    tlb_sets = candidate.tlb_sets,
                    tlb_ways = candidate.tlb_ways,
                    va_width = candidate.va_width,
                    pa_width = candidate.pa_width(),
                    "geometry drawn"
                );
                return Ok(candidate);
            }
        }
        Err(GenError::GeometryExhausted {
            attempts: GEOMETRY_DRAW_CAP,
        })
    }

    /// Checks the geometry invariants.
    ///
    /// # Errors
    ///
    /// [`GenError::InvalidGeometry`] when `vpo + tlbi_width > va_width` or a
    /// size parameter is degenerate (zero ways, non-power-of-two page size
    /// or set count).
    pub fn validate(&self) -> Result<(), GenError> {
        let invalid = || GenError::InvalidGeometry {
            vpo: self.vpo(),
            tlbi_width: self.tlbi_width(),
            va_width: self.va_width,
        };
        if !self.page_size.is_power_of_two()
            || !self.tlb_sets.is_power_of_two()
            || self.tlb_ways == 0
            || self.ppn_width == 0
            || !(1..=63).contains(&self.va_width)
        {
            return Err(invalid());
        }
        if self.vpo() + self.tlbi_width() > self.va_width {
            return Err(invalid());
        }
        Ok(())
    }

    /// Page size in bytes.
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// TLB set count.
    pub fn tlb_sets(&self) -> usize {
        self.tlb_sets
    }

    /// TLB associativity (ways per set).
    pub fn tlb_ways(&self) -> usize {
        self.tlb_ways
    }

    /// Virtual address width in bits.
    pub fn va_width(&self) -> u32 {
        self.va_width
    }

    /// Physical page number width in bits.
    pub fn ppn_width(&self) -> u32 {
        self.ppn_width
    }

    /// Page-table row count.
    pub fn page_table_rows(&self) -> usize {
        self.page_table_rows
    }

    /// Page-table column count.
    pub fn page_table_cols(&self) -> usize {
        self.page_table_cols
    }

    /// Virtual page offset width: log2 of the page size.
    pub fn vpo(&self) -> u32 {
        self.page_size.trailing_zeros()
    }

    /// TLB index width: log2 of the set count.
    pub fn tlbi_width(&self) -> u32 {
        self.tlb_sets.trailing_zeros()
    }

    /// TLB tag width: whatever the offset and index fields leave over.
    pub fn tlbt_width(&self) -> u32 {
        self.va_width - self.vpo() - self.tlbi_width()
    }

    /// Physical address width: PPN width plus the page offset width.
    pub fn pa_width(&self) -> u32 {
        self.ppn_width + self.vpo()
    }
}
