//! Address Decomposition Unit Tests.
//!
//! Verifies the canonical slice-from-the-end split, the round-trip and
//! field-width properties, and the zero-extension edge cases.

use proptest::prelude::*;

use vmtrain_core::exercise::fields::AddressFields;
use vmtrain_core::format::binary_width;
use vmtrain_core::{MemoryConfig, VirtAddr};

// ══════════════════════════════════════════════════════════
// 1. Concrete Split
// ══════════════════════════════════════════════════════════

#[test]
fn canonical_example_split() {
    // 0b1010_1101_0110, page size 16 (vpo 4), 4 sets (tlbi 2), width 12.
    let config = MemoryConfig::new(16, 4, 3, 12).expect("valid geometry");
    let fields = AddressFields::decompose(VirtAddr::new(0b1010_1101_0110), &config);

    assert_eq!(fields.vpo_bits(), "0110");
    assert_eq!(fields.tlbi_bits(), "01");
    assert_eq!(fields.tlbt_bits(), "101011");
    assert_eq!(fields.offset(), 0b0110);
    assert_eq!(fields.tlbi(), 1);
    assert_eq!(fields.tlbt(), 0b101011);
    assert_eq!(fields.vpn(), 0b1010_1101);
}

#[test]
fn strings_and_values_agree() {
    let config = MemoryConfig::new(32, 8, 4, 13).expect("valid geometry");
    let addr = VirtAddr::new(0b1_0110_1001_1010);
    let fields = AddressFields::decompose(addr, &config);

    assert_eq!(u64::from_str_radix(fields.vpo_bits(), 2).ok(), Some(fields.offset()));
    assert_eq!(u64::from_str_radix(fields.tlbi_bits(), 2).ok(), Some(fields.tlbi()));
    assert_eq!(u64::from_str_radix(fields.tlbt_bits(), 2).ok(), Some(fields.tlbt()));
}

// ══════════════════════════════════════════════════════════
// 2. Edge Cases
// ══════════════════════════════════════════════════════════

#[test]
fn short_address_is_zero_extended() {
    // Only 4 significant bits: the index and tag fields read as zero.
    let config = MemoryConfig::new(16, 4, 3, 12).expect("valid geometry");
    let fields = AddressFields::decompose(VirtAddr::new(0b0110), &config);

    assert_eq!(fields.vpo_bits(), "0110");
    assert_eq!(fields.tlbi_bits(), "00");
    assert_eq!(fields.tlbt_bits(), "000000");
    assert_eq!(fields.tlbi(), 0);
    assert_eq!(fields.tlbt(), 0);
}

#[test]
fn zero_width_tag_is_empty() {
    // vpo 6 + tlbi 3 == va_width 9: no tag bits remain.
    let config = MemoryConfig::new(64, 8, 3, 9).expect("valid geometry");
    let fields = AddressFields::decompose(VirtAddr::new(0b1_0110_1001), &config);

    assert_eq!(fields.tlbt_bits(), "");
    assert_eq!(fields.tlbt(), 0);
    assert_eq!(fields.vpo_bits(), "101001");
    assert_eq!(fields.tlbi_bits(), "101");
}

// ══════════════════════════════════════════════════════════
// 3. Properties
// ══════════════════════════════════════════════════════════

proptest! {
    /// Concatenating tag + index + offset bits reproduces the zero-padded
    /// binary rendering of the whole address.
    #[test]
    fn round_trip(
        page_size in prop_oneof![Just(16u64), Just(32), Just(64)],
        sets in prop_oneof![Just(4usize), Just(8)],
        ways in 3usize..5,
        va_width in 10u32..14,
        raw in any::<u64>(),
    ) {
        let config = MemoryConfig::new(page_size, sets, ways, va_width).unwrap();
        let lo = 1u64 << (va_width - 1);
        let addr = lo + raw % lo;
        let fields = AddressFields::decompose(VirtAddr::new(addr), &config);

        let concat = format!(
            "{}{}{}",
            fields.tlbt_bits(),
            fields.tlbi_bits(),
            fields.vpo_bits()
        );
        prop_assert_eq!(concat, binary_width(addr, va_width));
    }

    /// Every field slice has exactly its configured width.
    #[test]
    fn field_widths(
        page_size in prop_oneof![Just(16u64), Just(32), Just(64)],
        sets in prop_oneof![Just(4usize), Just(8)],
        ways in 3usize..5,
        va_width in 10u32..14,
        raw in any::<u64>(),
    ) {
        let config = MemoryConfig::new(page_size, sets, ways, va_width).unwrap();
        let lo = 1u64 << (va_width - 1);
        let addr = lo + raw % lo;
        let fields = AddressFields::decompose(VirtAddr::new(addr), &config);

        prop_assert_eq!(fields.vpo_bits().len(), config.vpo() as usize);
        prop_assert_eq!(fields.tlbi_bits().len(), config.tlbi_width() as usize);
        prop_assert_eq!(fields.tlbt_bits().len(), config.tlbt_width() as usize);
    }

    /// The arithmetic form matches div/mod by page size and set count.
    #[test]
    fn arithmetic_equivalence(
        page_size in prop_oneof![Just(16u64), Just(32), Just(64)],
        sets in prop_oneof![Just(4usize), Just(8)],
        va_width in 10u32..14,
        raw in any::<u64>(),
    ) {
        let config = MemoryConfig::new(page_size, sets, 3, va_width).unwrap();
        let lo = 1u64 << (va_width - 1);
        let addr = lo + raw % lo;
        let fields = AddressFields::decompose(VirtAddr::new(addr), &config);

        prop_assert_eq!(fields.offset(), addr % page_size);
        prop_assert_eq!(fields.tlbi(), (addr / page_size) % sets as u64);
        prop_assert_eq!(fields.tlbt(), addr / (page_size * sets as u64));
        prop_assert_eq!(fields.vpn(), addr / page_size);
    }
}
