//! Common types used throughout the exercise engine.
//!
//! This module provides the fundamental building blocks shared across all
//! components of the trainer. It includes:
//! 1. **Address Types:** Strong types for virtual and physical addresses.
//! 2. **Error Handling:** The configuration, generation, and sampling error taxonomy.

/// Address type definitions (virtual and physical addresses).
pub mod addr;

/// Error types for configuration, generation, and random sampling.
pub mod error;

pub use addr::{PhysAddr, VirtAddr};
pub use error::{ConfigError, GenError, RngError};
