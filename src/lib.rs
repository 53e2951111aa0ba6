//! A geometry kernel, a set of spatial indices, and a handful of
//! manufacturability analyses for two-dimensional IC layout data.
//!
//! The kernel (see [`geometry`]) works exclusively in `f64`; there is no
//! exact-arithmetic backend. Every predicate is tolerant to [`EPSILON`], and
//! [`GeometryError`] is reserved for programming errors (malformed indices,
//! out-of-range configuration) rather than for degenerate geometric input,
//! which the kernel absorbs via sentinel values instead of failing.

pub mod analysis;
pub mod geometry;
pub mod index;

/// The tolerance used throughout the crate for treating nearly-equal floats,
/// nearly-zero cross products, and nearly-coincident points as equal.
///
/// Chosen to comfortably exceed the rounding error of a handful of `f64`
/// operations on coordinates in the 10^6-ish range typical of IC layouts,
/// while staying far below any spacing a real design rule would care about.
pub const EPSILON: f64 = 1e-10;

/// A programming error: malformed configuration or an invariant violation
/// that the caller is expected to fix rather than recover from at runtime.
///
/// This is distinct from degenerate geometric input (handled via sentinel
/// return values, not errors) and from rejected mutations (handled via a
/// `bool` acknowledgement). See the crate's error-handling design notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
  /// A spatial index's world-bounding rectangle had non-positive width or height.
  InvalidBounds,
  /// A configuration value (e.g. node capacity, max depth, `min`/`max`
  /// entries) was outside the range the index requires to function.
  InvalidConfig {
    field: &'static str,
  },
  /// A query or construction was given fewer points than the operation requires.
  InsufficientPoints,
}

impl std::fmt::Display for GeometryError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      GeometryError::InvalidBounds => write!(f, "index bounds must have positive width and height"),
      GeometryError::InvalidConfig { field } => write!(f, "invalid configuration field: {field}"),
      GeometryError::InsufficientPoints => write!(f, "operation requires more points than were given"),
    }
  }
}

impl std::error::Error for GeometryError {}
