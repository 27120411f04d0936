//! Error types for the peer registry.

use crate::peer::PeerId;
use thiserror::Error;

/// Errors returned by registry operations.
///
/// A lookup miss is a normal absence and is reported as `Option::None` by
/// the lookup methods, never as an error variant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PeerstoreError {
    /// A zero-length peer ID was supplied
    #[error("peer id must not be empty")]
    EmptyPeerId,

    /// A peer with this ID is already registered
    #[error("peer {0} already registered")]
    DuplicatePeer(PeerId),
}

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, PeerstoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            PeerstoreError::EmptyPeerId.to_string(),
            "peer id must not be empty"
        );

        let err = PeerstoreError::DuplicatePeer(PeerId::from(&b"\x01\x02"[..]));
        assert_eq!(err.to_string(), "peer 0102 already registered");
    }
}
