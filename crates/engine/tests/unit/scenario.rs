//! Scenario Engine Unit Tests.
//!
//! Drives `plant` with scripted draws to verify each branch's table
//! mutations and answer key, including the dummy/correct way collision and
//! both page-fault arms.

use pretty_assertions::assert_eq;

use vmtrain_core::exercise::fields::AddressFields;
use vmtrain_core::exercise::scenario::{self, ExerciseKind};
use vmtrain_core::exercise::tables::{PageTable, TlbTable};
use vmtrain_core::{DisplayBase, MemoryConfig, VirtAddr, XorShift64};

use crate::common::ScriptedSource;

/// The worked example: width 12, page size 16, 4 sets, 3 ways,
/// address 0b1010_1101_0110.
fn setup() -> (MemoryConfig, VirtAddr, AddressFields, TlbTable, PageTable) {
    let config = MemoryConfig::new(16, 4, 3, 12).expect("valid geometry");
    let vaddr = VirtAddr::new(0b1010_1101_0110);
    let fields = AddressFields::decompose(vaddr, &config);
    let mut rng = XorShift64::seeded(31);
    let tlb = TlbTable::build(&config, fields.tlbt(), 8, &mut rng).expect("tlb");
    let table = PageTable::build(&config, fields.vpn(), 8, &mut rng).expect("page table");
    (config, vaddr, fields, tlb, table)
}

// ══════════════════════════════════════════════════════════
// 1. TLB Hit
// ══════════════════════════════════════════════════════════

#[test]
fn tlb_hit_plants_correct_and_dummy_entries() {
    let (config, vaddr, fields, mut tlb, mut table) = setup();
    // Draws: dummy way 2, correct way 1, ppn 128+42 = 0xAA, dummy ppn 7.
    let mut rng = ScriptedSource::new([2, 1, 42, 7]);

    let key = scenario::plant(
        ExerciseKind::TlbHit,
        &config,
        &fields,
        vaddr,
        DisplayBase::Hexadecimal,
        8,
        &mut tlb,
        &mut table,
        &mut rng,
    )
    .expect("plant");

    let correct = tlb.get(1, 1);
    assert_eq!(correct.tag, 0b101011);
    assert_eq!(correct.ppn, 0xAA);
    assert!(correct.valid);

    let dummy = tlb.get(1, 2);
    assert_eq!(dummy.tag, 0b101011);
    assert_eq!(dummy.ppn, 7);
    assert!(!dummy.valid);

    assert_eq!(key.virtual_address, "101011010110");
    assert_eq!(key.vpn, "ad");
    assert_eq!(key.tlbi, "1");
    assert_eq!(key.tlbt, "2b");
    assert_eq!(key.tlb_hit, "Y");
    assert_eq!(key.page_fault, "N");
    assert_eq!(key.ppn, "aa");
    // PPN bits '10101010' followed by the offset bits '0110'.
    assert_eq!(key.physical_address, "101010100110");
    assert_eq!(key.page_hit, "");
}

#[test]
fn tlb_hit_correct_entry_wins_way_collision() {
    let (config, vaddr, fields, mut tlb, mut table) = setup();
    // Dummy and correct both land on way 1; the correct write is applied
    // last and must win.
    let mut rng = ScriptedSource::new([1, 1, 42, 7]);

    let key = scenario::plant(
        ExerciseKind::TlbHit,
        &config,
        &fields,
        vaddr,
        DisplayBase::Hexadecimal,
        8,
        &mut tlb,
        &mut table,
        &mut rng,
    )
    .expect("plant");

    let entry = tlb.get(1, 1);
    assert!(entry.valid, "the correct entry must overwrite the dummy");
    assert_eq!(entry.ppn, 0xAA);
    assert_eq!(key.tlb_hit, "Y");
    assert_eq!(key.ppn, "aa");
}

#[test]
fn tlb_hit_dummy_ppn_differs_from_planted() {
    let (config, vaddr, fields, mut tlb, mut table) = setup();
    // The first dummy-ppn candidate collides with the planted PPN (0xAA)
    // and must be redrawn.
    let mut rng = ScriptedSource::new([2, 1, 42, 0xAA, 9]);

    scenario::plant(
        ExerciseKind::TlbHit,
        &config,
        &fields,
        vaddr,
        DisplayBase::Hexadecimal,
        8,
        &mut tlb,
        &mut table,
        &mut rng,
    )
    .expect("plant");

    assert_eq!(tlb.get(1, 2).ppn, 9);
    assert_eq!(rng.remaining(), 0);
}

// ══════════════════════════════════════════════════════════
// 2. Page Hit
// ══════════════════════════════════════════════════════════

#[test]
fn page_hit_plants_valid_mapping() {
    let (config, vaddr, fields, mut tlb, mut table) = setup();
    let tlb_before = tlb.clone();
    // Draws: row 2, col 3, ppn 128+1 = 0x81.
    let mut rng = ScriptedSource::new([2, 3, 1]);

    let key = scenario::plant(
        ExerciseKind::PageHit,
        &config,
        &fields,
        vaddr,
        DisplayBase::Hexadecimal,
        8,
        &mut tlb,
        &mut table,
        &mut rng,
    )
    .expect("plant");

    let entry = table.get(2, 3);
    assert_eq!(entry.vpn, 0b1010_1101);
    assert_eq!(entry.ppn, 0x81);
    assert!(entry.valid);
    assert_eq!(tlb, tlb_before, "a page hit leaves the TLB untouched");

    assert_eq!(key.tlb_hit, "N");
    assert_eq!(key.page_fault, "N");
    assert_eq!(key.ppn, "81");
    assert_eq!(key.physical_address, "100000010110");
    assert_eq!(
        key.physical_address.len(),
        config.pa_width() as usize,
        "physical address is padded to the physical width"
    );
}

// ══════════════════════════════════════════════════════════
// 3. Page Fault
// ══════════════════════════════════════════════════════════

#[test]
fn page_fault_with_invalid_entry_planted() {
    let (config, vaddr, fields, mut tlb, mut table) = setup();
    // Draws: coin 1 (plant), row 0, col 2.
    let ppn_before = table.get(0, 2).ppn;
    let mut rng = ScriptedSource::new([1, 0, 2]);

    let key = scenario::plant(
        ExerciseKind::PageFault,
        &config,
        &fields,
        vaddr,
        DisplayBase::Hexadecimal,
        8,
        &mut tlb,
        &mut table,
        &mut rng,
    )
    .expect("plant");

    let entry = table.get(0, 2);
    assert_eq!(entry.vpn, fields.vpn(), "the real VPN is present");
    assert!(!entry.valid, "but its valid bit is clear");
    assert_eq!(entry.ppn, ppn_before, "the filler PPN is kept");

    assert_eq!(key.tlb_hit, "N");
    assert_eq!(key.page_fault, "Y");
    assert_eq!(key.ppn, "", "no translation completes");
    assert_eq!(key.physical_address, "");
}

#[test]
fn page_fault_by_absence_leaves_tables_untouched() {
    let (config, vaddr, fields, mut tlb, mut table) = setup();
    let table_before = table.clone();
    // Draws: coin 0 (absent).
    let mut rng = ScriptedSource::new([0]);

    let key = scenario::plant(
        ExerciseKind::PageFault,
        &config,
        &fields,
        vaddr,
        DisplayBase::Hexadecimal,
        8,
        &mut tlb,
        &mut table,
        &mut rng,
    )
    .expect("plant");

    assert_eq!(table, table_before);
    assert_eq!(key.page_fault, "Y");
    assert_eq!(key.ppn, "");
    assert_eq!(key.physical_address, "");
}

// ══════════════════════════════════════════════════════════
// 4. Kind Selection
// ══════════════════════════════════════════════════════════

#[test]
fn random_kind_covers_all_variants() {
    let mut rng = XorShift64::seeded(41);
    let mut seen = [false; 3];
    for _ in 0..100 {
        let idx = ExerciseKind::ALL
            .iter()
            .position(|&k| k == ExerciseKind::random(&mut rng))
            .expect("kind is in ALL");
        seen[idx] = true;
    }
    assert_eq!(seen, [true; 3]);
}
