//! Synthetic TLB and page-table builders.
//!
//! The quiz tables are fabricated with plausible random content that can
//! never collide with the scenario the engine plants afterwards: every
//! filler tag (TLB) and VPN (page table) is drawn with rejection sampling
//! against the real value, so the planted entry is the only possible match.
//! The two entry kinds are distinct types with distinct builders.

use serde::Serialize;

use crate::common::RngError;
use crate::exercise::params::MemoryConfig;
use crate::rng::RandomSource;

/// A single TLB entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TlbEntry {
    /// TLB tag.
    pub tag: u64,
    /// Physical page number.
    pub ppn: u64,
    /// Entry validity flag.
    pub valid: bool,
}

/// A single page-table entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PageTableEntry {
    /// Virtual page number.
    pub vpn: u64,
    /// Physical page number.
    pub ppn: u64,
    /// Entry validity flag.
    pub valid: bool,
}

/// A set-associative TLB table, `tlb_sets` rows of `tlb_ways` entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TlbTable {
    sets: usize,
    ways: usize,
    entries: Vec<TlbEntry>,
}

impl TlbTable {
    /// Builds a table of random filler entries.
    ///
    /// Every cell draws a random valid bit, a PPN with the configured
    /// width, and a tag guaranteed distinct from `excluded_tag`.
    ///
    /// # Arguments
    ///
    /// * `config` - Geometry supplying the set and way counts.
    /// * `excluded_tag` - The exercise's real tag; no filler cell may hold it.
    /// * `value_width` - Bit width of the filler tag pool.
    /// * `rng` - Random source.
    ///
    /// # Errors
    ///
    /// [`RngError::UniqueExhausted`] when the rejection-sampling cap trips.
    pub fn build<R: RandomSource + ?Sized>(
        config: &MemoryConfig,
        excluded_tag: u64,
        value_width: u32,
        rng: &mut R,
    ) -> Result<Self, RngError> {
        let sets = config.tlb_sets();
        let ways = config.tlb_ways();
        let mut entries = Vec::with_capacity(sets * ways);
        for _ in 0..sets * ways {
            let valid = rng.bit();
            let ppn = rng.bit_pattern(config.ppn_width());
            let tag = rng.unique(excluded_tag, value_width)?;
            entries.push(TlbEntry { tag, ppn, valid });
        }
        Ok(Self {
            sets,
            ways,
            entries,
        })
    }

    /// Number of sets (rows).
    pub fn sets(&self) -> usize {
        self.sets
    }

    /// Number of ways (columns).
    pub fn ways(&self) -> usize {
        self.ways
    }

    /// Returns the entry at `[set][way]`.
    ///
    /// # Panics
    ///
    /// Panics when either index is out of range.
    pub fn get(&self, set: usize, way: usize) -> TlbEntry {
        assert!(set < self.sets && way < self.ways, "TLB index out of range");
        self.entries[set * self.ways + way]
    }

    /// Replaces the entry at `[set][way]`.
    ///
    /// # Panics
    ///
    /// Panics when either index is out of range.
    pub fn set_entry(&mut self, set: usize, way: usize, entry: TlbEntry) {
        assert!(set < self.sets && way < self.ways, "TLB index out of range");
        self.entries[set * self.ways + way] = entry;
    }

    /// Returns one set's entries (for rendering).
    pub fn row(&self, set: usize) -> &[TlbEntry] {
        &self.entries[set * self.ways..(set + 1) * self.ways]
    }
}

/// A fixed-shape page table, `rows` by `cols` entries.
///
/// The shape is configuration-fixed (3x4 by default) regardless of page
/// size; it mirrors the exam convention the quizzes reproduce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageTable {
    rows: usize,
    cols: usize,
    entries: Vec<PageTableEntry>,
}

impl PageTable {
    /// Builds a table of random filler entries, with every VPN guaranteed
    /// distinct from `excluded_vpn`.
    ///
    /// # Errors
    ///
    /// [`RngError::UniqueExhausted`] when the rejection-sampling cap trips.
    pub fn build<R: RandomSource + ?Sized>(
        config: &MemoryConfig,
        excluded_vpn: u64,
        value_width: u32,
        rng: &mut R,
    ) -> Result<Self, RngError> {
        let rows = config.page_table_rows();
        let cols = config.page_table_cols();
        let mut entries = Vec::with_capacity(rows * cols);
        for _ in 0..rows * cols {
            let valid = rng.bit();
            let ppn = rng.bit_pattern(config.ppn_width());
            let vpn = rng.unique(excluded_vpn, value_width)?;
            entries.push(PageTableEntry { vpn, ppn, valid });
        }
        Ok(Self {
            rows,
            cols,
            entries,
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the entry at `[row][col]`.
    ///
    /// # Panics
    ///
    /// Panics when either index is out of range.
    pub fn get(&self, row: usize, col: usize) -> PageTableEntry {
        assert!(row < self.rows && col < self.cols, "page table index out of range");
        self.entries[row * self.cols + col]
    }

    /// Replaces the entry at `[row][col]`.
    ///
    /// # Panics
    ///
    /// Panics when either index is out of range.
    pub fn set_entry(&mut self, row: usize, col: usize, entry: PageTableEntry) {
        assert!(row < self.rows && col < self.cols, "page table index out of range");
        self.entries[row * self.cols + col] = entry;
    }

    /// Returns one row's entries (for rendering).
    pub fn row(&self, row: usize) -> &[PageTableEntry] {
        &self.entries[row * self.cols..(row + 1) * self.cols]
    }
}
