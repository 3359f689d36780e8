//! Scenario planting and answer-key computation.
//!
//! Given a chosen exercise kind, this module mutates the freshly built
//! tables so that exactly one scenario-consistent lookup outcome exists,
//! then computes the expected answer for every quiz field. An exercise has
//! no internal transitions: the kind is a one-shot configuration selected
//! per regeneration, and the three branches are exhaustive.

use serde::Serialize;

use crate::common::{PhysAddr, RngError, VirtAddr};
use crate::exercise::fields::AddressFields;
use crate::exercise::params::MemoryConfig;
use crate::exercise::tables::{PageTable, TlbEntry, TlbTable};
use crate::format::{binary_width, DisplayBase};
use crate::rng::RandomSource;

/// The lookup outcome an exercise is built around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ExerciseKind {
    /// The translation is cached: a valid TLB entry matches the tag.
    TlbHit,
    /// The TLB misses but the page table holds a valid mapping.
    PageHit,
    /// No valid mapping exists; the translation does not complete.
    PageFault,
}

impl ExerciseKind {
    /// All kinds, in presentation order.
    pub const ALL: [Self; 3] = [Self::TlbHit, Self::PageHit, Self::PageFault];

    /// Draws a kind uniformly at random.
    pub fn random<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.index(Self::ALL.len())]
    }
}

/// The computed answer key (facit) for one exercise.
///
/// Every field is a display-ready, unprefixed string. `ppn` and
/// `physical_address` are empty when the translation does not complete;
/// `page_hit` is reserved and always empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnswerKey {
    /// The virtual address in binary, zero-padded to the address width.
    pub virtual_address: String,
    /// Virtual page number, in the display base.
    pub vpn: String,
    /// TLB index value, in the display base.
    pub tlbi: String,
    /// TLB tag value, in the display base.
    pub tlbt: String,
    /// Whether the TLB lookup hits: `"Y"` or `"N"`.
    pub tlb_hit: String,
    /// Whether the access faults: `"Y"` or `"N"`.
    pub page_fault: String,
    /// Physical page number in the display base; empty when not applicable.
    pub ppn: String,
    /// Physical address in binary; empty when not applicable.
    pub physical_address: String,
    /// Reserved; always empty.
    pub page_hit: String,
}

/// Plants the chosen scenario into the tables and computes the answer key.
///
/// Tables are mutated in place. The TLB-hit branch writes a dummy invalid
/// entry first and the correct entry second, so the correct entry wins when
/// the two randomly drawn ways coincide.
///
/// # Errors
///
/// [`RngError::UniqueExhausted`] when the dummy-PPN draw cannot avoid the
/// planted PPN within the sampling cap.
#[allow(clippy::too_many_arguments)]
pub fn plant<R: RandomSource + ?Sized>(
    kind: ExerciseKind,
    config: &MemoryConfig,
    fields: &AddressFields,
    vaddr: VirtAddr,
    base: DisplayBase,
    value_width: u32,
    tlb: &mut TlbTable,
    page_table: &mut PageTable,
    rng: &mut R,
) -> Result<AnswerKey, RngError> {
    let mut key = AnswerKey {
        virtual_address: binary_width(vaddr.val(), config.va_width()),
        vpn: base.render(fields.vpn()),
        tlbi: base.render(fields.tlbi()),
        tlbt: base.render(fields.tlbt()),
        tlb_hit: "N".to_owned(),
        page_fault: "N".to_owned(),
        ..AnswerKey::default()
    };

    match kind {
        ExerciseKind::TlbHit => {
            let set = fields.tlbi() as usize;
            let dummy_way = rng.index(tlb.ways());
            let correct_way = rng.index(tlb.ways());
            let ppn = rng.bit_pattern(config.ppn_width());

            // Dummy first: same tag, invalid, different PPN. The correct
            // write below overwrites it when the ways coincide.
            tlb.set_entry(
                set,
                dummy_way,
                TlbEntry {
                    tag: fields.tlbt(),
                    ppn: rng.unique(ppn, value_width)?,
                    valid: false,
                },
            );
            tlb.set_entry(
                set,
                correct_way,
                TlbEntry {
                    tag: fields.tlbt(),
                    ppn,
                    valid: true,
                },
            );

            key.tlb_hit = "Y".to_owned();
            key.ppn = base.render(ppn);
            key.physical_address = physical_address_bits(config, fields, ppn);
            tracing::debug!(set, correct_way, dummy_way, ppn, "planted TLB hit");
        }
        ExerciseKind::PageHit => {
            let row = rng.index(page_table.rows());
            let col = rng.index(page_table.cols());
            let ppn = rng.bit_pattern(config.ppn_width());

            let mut entry = page_table.get(row, col);
            entry.vpn = fields.vpn();
            entry.ppn = ppn;
            entry.valid = true;
            page_table.set_entry(row, col, entry);

            key.ppn = base.render(ppn);
            key.physical_address = physical_address_bits(config, fields, ppn);
            tracing::debug!(row, col, ppn, "planted page hit");
        }
        ExerciseKind::PageFault => {
            // Two faces of the same fault: half the time the VPN is present
            // with its valid bit clear, otherwise it is simply absent.
            if rng.bit() {
                let row = rng.index(page_table.rows());
                let col = rng.index(page_table.cols());
                let mut entry = page_table.get(row, col);
                entry.vpn = fields.vpn();
                entry.valid = false;
                page_table.set_entry(row, col, entry);
                tracing::debug!(row, col, "planted invalid page-table entry");
            } else {
                tracing::debug!("page fault by absence; tables untouched");
            }
            key.page_fault = "Y".to_owned();
        }
    }

    Ok(key)
}

/// Assembles the physical-address bit string: the PPN zero-padded to its
/// configured width, followed by the page-offset bits. Total length is
/// always `pa_width`.
fn physical_address_bits(config: &MemoryConfig, fields: &AddressFields, ppn: u64) -> String {
    let pa = PhysAddr::assemble(ppn, fields.offset(), config.vpo());
    binary_width(pa.val(), config.pa_width())
}
