//! Physical and Virtual Address types.
//!
//! This module defines strong types for virtual and physical addresses to
//! prevent accidental mixing of the two address spaces. Exercises operate on
//! narrow addresses (10 to 13 bits in the default configuration), so both
//! types wrap a `u64` and leave the significant bit width to the memory
//! configuration that produced them.

use serde::Serialize;

use crate::rng::RandomSource;

/// A virtual address in an exercise's address space.
///
/// Carries exactly `width` significant bits when produced by
/// [`VirtAddr::random`]: the draw range `[2^(width-1), 2^width)` keeps the
/// most-significant bit set, so a binary rendering never silently loses
/// leading digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct VirtAddr(pub u64);

/// A physical address assembled from a physical page number and a page offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct PhysAddr(pub u64);

impl VirtAddr {
    /// Creates a new virtual address from a raw value.
    #[inline]
    pub fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Draws a random virtual address with exactly `width` significant bits.
    ///
    /// # Arguments
    ///
    /// * `width` - Number of significant bits (the most-significant bit is
    ///   always set).
    /// * `rng` - Random source to draw from.
    pub fn random<R: RandomSource + ?Sized>(width: u32, rng: &mut R) -> Self {
        Self(rng.bit_pattern(width))
    }

    /// Returns the raw address value.
    #[inline]
    pub fn val(self) -> u64 {
        self.0
    }

    /// Extracts the page offset for a page of `page_size` bytes.
    ///
    /// `page_size` must be a power of two.
    #[inline]
    pub fn page_offset(self, page_size: u64) -> u64 {
        self.0 & (page_size - 1)
    }
}

impl PhysAddr {
    /// Creates a new physical address from a raw value.
    #[inline]
    pub fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Assembles a physical address from a physical page number and a page
    /// offset.
    ///
    /// # Arguments
    ///
    /// * `ppn` - Physical page number.
    /// * `offset` - Byte offset within the page (must fit in `vpo` bits).
    /// * `vpo` - Width of the page-offset field in bits.
    #[inline]
    pub fn assemble(ppn: u64, offset: u64, vpo: u32) -> Self {
        Self((ppn << vpo) | offset)
    }

    /// Returns the raw address value.
    #[inline]
    pub fn val(self) -> u64 {
        self.0
    }
}
