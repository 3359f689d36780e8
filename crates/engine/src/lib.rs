//! Virtual-memory address-translation exercise engine.
//!
//! This crate generates randomized address-translation exercises and grades
//! answers against a computed answer key (the facit). It provides:
//! 1. **Parameters:** random memory-hierarchy geometry (page size, TLB
//!    sets/ways, address widths) and virtual addresses.
//! 2. **Decomposition:** VPO/TLBI/TLBT bit fields and the VPN, as strings
//!    and values.
//! 3. **Tables:** synthetic TLB and page-table content guaranteed not to
//!    shadow the planted scenario.
//! 4. **Scenarios:** TLB-hit, page-hit, and page-fault planting with a
//!    display-ready answer key.
//! 5. **Grading:** field-by-field and whole-submission comparison with
//!    touched-field semantics.
//!
//! The engine performs no I/O and owns no global state: every function
//! takes its configuration and random source explicitly. Rendering,
//! prompting, and prefix handling belong to the front-end.

/// Common types (addresses, errors).
pub mod common;
/// Generator configuration (draw ranges, defaults, JSON loading).
pub mod config;
/// Exercise generation pipeline (parameters, decomposition, tables, scenario).
pub mod exercise;
/// Display-base rendering of quiz values.
pub mod format;
/// Grading of user submissions against the answer key.
pub mod grade;
/// Random source abstraction and the default xorshift generator.
pub mod rng;
/// Session statistics collection and reporting.
pub mod stats;

/// Strong address types.
pub use crate::common::{PhysAddr, VirtAddr};
/// Error taxonomy.
pub use crate::common::{ConfigError, GenError, RngError};
/// Draw-range configuration; use `GeneratorConfig::default()` or `from_json`.
pub use crate::config::GeneratorConfig;
/// One complete exercise; construct with `Exercise::generate`.
pub use crate::exercise::Exercise;
/// Generated geometry and its derived field widths.
pub use crate::exercise::params::MemoryConfig;
/// Scenario kind and the computed answer key.
pub use crate::exercise::scenario::{AnswerKey, ExerciseKind};
/// Display base for quiz values.
pub use crate::format::DisplayBase;
/// Field enumeration, submissions, and the comparators.
pub use crate::grade::{is_correct, is_submission_correct, Field, Submission};
/// Random source trait and the default seedable generator.
pub use crate::rng::{RandomSource, XorShift64};
/// Session counters.
pub use crate::stats::SessionStats;
