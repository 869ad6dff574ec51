//! Error types for the fallible slice APIs
//!
//! Everything else in the crate either cannot fail or treats a violated
//! precondition as undefined behavior (checked by `debug_assert!` only).

use thiserror::Error;

/// Recoverable failures of the safe slice-based entry points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimdError {
    /// A slice holds fewer elements than the vector has lanes
    #[error("slice too short: need {needed} elements, got {actual}")]
    SliceTooShort {
        /// Lanes required
        needed: usize,
        /// Elements available
        actual: usize,
    },

    /// A gather index points outside the source slice
    #[error("lane {lane}: index {index} out of bounds for slice of length {len}")]
    IndexOutOfBounds {
        /// Lane holding the bad index
        lane: usize,
        /// Element offset the lane resolved to
        index: i64,
        /// Length of the slice
        len: usize,
    },
}

/// Convenience alias used by the fallible APIs
pub type Result<T> = core::result::Result<T, SimdError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        use std::string::ToString;

        let err = SimdError::SliceTooShort { needed: 8, actual: 3 };
        assert_eq!(err.to_string(), "slice too short: need 8 elements, got 3");

        let err = SimdError::IndexOutOfBounds { lane: 2, index: -1, len: 4 };
        assert_eq!(
            err.to_string(),
            "lane 2: index -1 out of bounds for slice of length 4"
        );
    }
}
