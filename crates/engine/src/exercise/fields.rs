//! Virtual address decomposition into quiz bit fields.
//!
//! A virtual address splits, from the least-significant end, into the page
//! offset (VPO), the TLB index (TLBI), and the TLB tag (TLBT); the VPN is
//! the tag and index together. The split is kept in two equivalent forms:
//! bit strings for display and grading, and integer values for table
//! lookups and physical-address assembly.

use serde::Serialize;

use crate::common::VirtAddr;
use crate::exercise::params::MemoryConfig;
use crate::format::binary_width;

/// The bit fields of one decomposed virtual address.
///
/// String fields are slices of the zero-padded binary rendering
/// (most-significant bit first); integer fields are the same quantities
/// computed arithmetically. The two agree by construction:
/// `offset = addr mod page_size`, `tlbi = (addr / page_size) mod tlb_sets`,
/// `tlbt = addr / (page_size * tlb_sets)`, `vpn = addr / page_size`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressFields {
    vpo_bits: String,
    tlbi_bits: String,
    tlbt_bits: String,
    offset: u64,
    tlbi: u64,
    tlbt: u64,
    vpn: u64,
}

impl AddressFields {
    /// Splits `vaddr` according to the geometry's field widths.
    ///
    /// Total over all inputs: an address with fewer significant bits than
    /// the offset and index fields is zero-extended, so the missing
    /// high-order bits read as zero and the tag degenerates to an all-zero
    /// (possibly empty) slice rather than a panic.
    pub fn decompose(vaddr: VirtAddr, config: &MemoryConfig) -> Self {
        let bits = binary_width(vaddr.val(), config.va_width());
        let vpo = config.vpo() as usize;
        let tlbi_width = config.tlbi_width() as usize;

        let (rest, vpo_bits) = split_tail(&bits, vpo);
        let (tlbt_bits, tlbi_bits) = split_tail(rest, tlbi_width);

        Self {
            vpo_bits: vpo_bits.to_owned(),
            tlbi_bits: tlbi_bits.to_owned(),
            tlbt_bits: tlbt_bits.to_owned(),
            offset: vaddr.page_offset(config.page_size()),
            tlbi: (vaddr.val() >> config.vpo()) & (config.tlb_sets() as u64 - 1),
            tlbt: vaddr.val() >> (config.vpo() + config.tlbi_width()),
            vpn: vaddr.val() >> config.vpo(),
        }
    }

    /// Page-offset bits (length = `vpo`).
    pub fn vpo_bits(&self) -> &str {
        &self.vpo_bits
    }

    /// TLB-index bits (length = `tlbi_width`).
    pub fn tlbi_bits(&self) -> &str {
        &self.tlbi_bits
    }

    /// TLB-tag bits (length = `tlbt_width`; empty when the tag field has
    /// zero width).
    pub fn tlbt_bits(&self) -> &str {
        &self.tlbt_bits
    }

    /// Byte offset within the page.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// TLB set index value.
    pub fn tlbi(&self) -> u64 {
        self.tlbi
    }

    /// TLB tag value.
    pub fn tlbt(&self) -> u64 {
        self.tlbt
    }

    /// Virtual page number (tag and index bits together).
    pub fn vpn(&self) -> u64 {
        self.vpn
    }
}

/// Splits off the last `n` characters of `s`; shorter strings yield a
/// shorter (possibly empty) tail rather than panicking.
fn split_tail(s: &str, n: usize) -> (&str, &str) {
    s.split_at(s.len().saturating_sub(n))
}
