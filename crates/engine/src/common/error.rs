//! Error taxonomy for the exercise engine.
//!
//! Generation is total over valid inputs, so the surface here is small:
//! 1. **Configuration errors:** rejected draw-range configurations and JSON
//!    parse failures.
//! 2. **Generation errors:** geometry invariant violations that survive the
//!    bounded redraw loop.
//! 3. **Sampling errors:** rejection-sampling loops that hit their iteration
//!    cap, signalling a flawed width parameter rather than looping forever.

use thiserror::Error;

/// Errors raised while validating or parsing a generator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The page-size list is empty, leaving nothing to draw from.
    #[error("page size list is empty")]
    EmptyPageSizes,

    /// A configured page size is not a power of two.
    #[error("page size {0} is not a power of two")]
    NonPowerOfTwoPageSize(u64),

    /// A draw range is empty or inverted (`lo >= hi`).
    #[error("draw range `{name}` is empty: [{lo}, {hi})")]
    EmptyRange {
        /// Name of the offending range field.
        name: &'static str,
        /// Inclusive lower bound.
        lo: u64,
        /// Exclusive upper bound.
        hi: u64,
    },

    /// A width or table dimension is zero.
    #[error("`{0}` must be nonzero")]
    ZeroDimension(&'static str),

    /// A bit width is outside the supported range.
    #[error("`{name}` is {width} bits; must be between 1 and {max}")]
    WidthOutOfRange {
        /// Name of the offending width field.
        name: &'static str,
        /// The configured width.
        width: u32,
        /// The largest supported width.
        max: u32,
    },

    /// The configuration JSON could not be parsed.
    #[error("invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised while generating an exercise.
#[derive(Debug, Error)]
pub enum GenError {
    /// The drawn geometry violates `vpo + tlbi_width <= va_width`.
    #[error(
        "invalid geometry: vpo {vpo} + tlbi width {tlbi_width} exceeds virtual address width {va_width}"
    )]
    InvalidGeometry {
        /// Page-offset field width.
        vpo: u32,
        /// TLB-index field width.
        tlbi_width: u32,
        /// Virtual address bit width.
        va_width: u32,
    },

    /// No valid geometry was drawn within the attempt cap.
    ///
    /// The default ranges always satisfy the invariant; hitting this means
    /// the configured ranges are incompatible.
    #[error("no valid geometry drawn after {attempts} attempts")]
    GeometryExhausted {
        /// Number of redraws performed before giving up.
        attempts: usize,
    },

    /// The generator configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A random draw failed.
    #[error(transparent)]
    Rng(#[from] RngError),
}

/// Errors raised by the random source combinators.
#[derive(Debug, Error)]
pub enum RngError {
    /// Rejection sampling failed to produce a value distinct from the
    /// excluded one within the iteration cap.
    #[error(
        "unique draw exhausted after {attempts} attempts (excluded {excluded}, width {width})"
    )]
    UniqueExhausted {
        /// The value every candidate must differ from.
        excluded: u64,
        /// Candidate width in bits.
        width: u32,
        /// Number of draws performed before giving up.
        attempts: usize,
    },
}
