//! Exercise generation pipeline.
//!
//! This module assembles one complete exercise from its parts, in
//! dependency order:
//! 1. **Parameters:** random memory-hierarchy geometry and virtual address.
//! 2. **Decomposition:** the address's VPO/TLBI/TLBT bit fields.
//! 3. **Tables:** synthetic TLB and page-table content that cannot collide
//!    with the real tag or VPN.
//! 4. **Scenario:** the planted entry and the computed answer key.
//!
//! Generation is atomic: a consumer only ever observes a fully built
//! [`Exercise`], never partial state. Regeneration replaces the whole value.

/// Virtual address decomposition into quiz bit fields.
pub mod fields;

/// Random memory-hierarchy parameter generation.
pub mod params;

/// Scenario planting and answer-key computation.
pub mod scenario;

/// Synthetic TLB and page-table builders.
pub mod tables;

use serde::Serialize;

use crate::common::{GenError, VirtAddr};
use crate::config::GeneratorConfig;
use crate::format::DisplayBase;
use crate::rng::RandomSource;

use self::fields::AddressFields;
use self::params::MemoryConfig;
use self::scenario::{AnswerKey, ExerciseKind};
use self::tables::{PageTable, TlbTable};

/// One complete, self-contained exercise.
///
/// Owns its tables exclusively; nothing is shared across regenerations.
#[derive(Debug, Clone, Serialize)]
pub struct Exercise {
    /// The scenario this exercise was built around.
    pub kind: ExerciseKind,
    /// Display base the answer key is rendered in.
    pub base: DisplayBase,
    /// The generated memory-hierarchy geometry.
    pub config: MemoryConfig,
    /// The generated virtual address.
    pub vaddr: VirtAddr,
    /// The address's decomposed bit fields.
    pub fields: AddressFields,
    /// The synthetic TLB, with the scenario planted.
    pub tlb: TlbTable,
    /// The synthetic page table, with the scenario planted.
    pub page_table: PageTable,
    /// The computed answer key.
    pub key: AnswerKey,
}

impl Exercise {
    /// Generates a complete exercise of the given kind.
    ///
    /// # Arguments
    ///
    /// * `kind` - The scenario to build.
    /// * `base` - Display base for the answer key's value fields.
    /// * `config` - Draw ranges for the parameter generator.
    /// * `rng` - Random source (owned by the caller; inject a seeded one
    ///   for reproducible exercises).
    ///
    /// # Errors
    ///
    /// [`GenError::Config`] when the draw ranges are invalid,
    /// [`GenError::GeometryExhausted`] when they cannot produce a valid
    /// geometry, or [`GenError::Rng`] when rejection sampling exhausts its
    /// cap.
    pub fn generate<R: RandomSource + ?Sized>(
        kind: ExerciseKind,
        base: DisplayBase,
        config: &GeneratorConfig,
        rng: &mut R,
    ) -> Result<Self, GenError> {
        config.validate()?;

        let geometry = MemoryConfig::random(config, rng)?;
        let vaddr = VirtAddr::random(geometry.va_width(), rng);
        let fields = AddressFields::decompose(vaddr, &geometry);
        tracing::debug!(
            vaddr = vaddr.val(),
            vpo_bits = fields.vpo_bits(),
            tlbi_bits = fields.tlbi_bits(),
            tlbt_bits = fields.tlbt_bits(),
            vpn = fields.vpn(),
            "address decomposed"
        );

        let mut tlb = TlbTable::build(&geometry, fields.tlbt(), config.table_value_width, rng)?;
        let mut page_table =
            PageTable::build(&geometry, fields.vpn(), config.table_value_width, rng)?;

        let key = scenario::plant(
            kind,
            &geometry,
            &fields,
            vaddr,
            base,
            config.table_value_width,
            &mut tlb,
            &mut page_table,
            rng,
        )?;

        Ok(Self {
            kind,
            base,
            config: geometry,
            vaddr,
            fields,
            tlb,
            page_table,
            key,
        })
    }
}
