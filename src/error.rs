//! Errors returned when a container is constructed with invalid arguments.
//!
//! Routine emptiness (popping an empty heap, missing cache keys, ...) is never
//! an error and is reported through [`Option`] instead.

use thiserror::Error;

/// Errors that can occur when constructing a container.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A circular buffer needs room for at least one element.
    #[error("capacity must be non-zero.")]
    ZeroCapacity,
    /// The promotion probability `$p$` must be in the range `$(0, 1)$`.
    #[error("p must be in (0, 1).")]
    InvalidProbability,
    /// The maximum skiplist height exceeds
    /// [`MAX_HEIGHT_LIMIT`][crate::level_generator::MAX_HEIGHT_LIMIT].
    #[error("max height must be at most {limit}, got {requested}.")]
    MaxHeightTooLarge {
        /// The requested height.
        requested: usize,
        /// The largest height accepted.
        limit: usize,
    },
}

/// A specialized [`Result`][std::result::Result] for container construction.
pub type Result<T, E = Error> = std::result::Result<T, E>;
