//! Peer identity and the registry's per-peer record.
//!
//! A [`Peer`] is the registry's view of a network participant: an
//! immutable byte-string identity plus the connection metadata the rest of
//! the node reports about it. Connection handles, transport state, and
//! protocol negotiation live elsewhere; the registry only tracks what is
//! needed to resolve and deduplicate peers.

use std::borrow::Borrow;
use std::fmt;
use std::net::SocketAddr;

/// A peer's unique identifier: a variable-length byte string, typically a
/// hash of the peer's public key.
///
/// `PeerId` is the key type of the registry. Equality is exact byte-length
/// and byte-content match. `Display` renders a shortened hex form suitable
/// for log output.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PeerId(Vec<u8>);

impl PeerId {
    /// Create a peer ID from raw bytes
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Get the raw ID bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the ID in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the ID is zero-length
    ///
    /// Zero-length IDs are rejected at every registry boundary.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for PeerId {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for PeerId {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for PeerId {
    fn from(bytes: &[u8; N]) -> Self {
        Self(bytes.to_vec())
    }
}

// Lets the map be queried with raw `&[u8]` slices without allocating.
// Consistent with Hash/Eq: `Vec<u8>` hashes as its slice.
impl Borrow<[u8]> for PeerId {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SHORT: usize = 8;
        if self.0.len() <= SHORT {
            write!(f, "{}", hex::encode(&self.0))
        } else {
            write!(f, "{}..", hex::encode(&self.0[..SHORT]))
        }
    }
}

impl fmt::Debug for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PeerId({self})")
    }
}

/// Connection status of a peer as last reported by the connection layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    /// No connection attempt has been made yet
    #[default]
    NotConnected,

    /// A live connection to the peer exists
    Connected,

    /// The peer is reachable but not currently connected
    CanConnect,

    /// A previous connection attempt failed
    CannotConnect,
}

/// The registry's record of a single network participant.
///
/// The identity is fixed at construction and never mutated by the registry.
/// `Clone` performs a deep copy; the registry stores its own copies and
/// never aliases caller-owned peers.
#[derive(Clone)]
pub struct Peer {
    /// Immutable identity
    id: PeerId,

    /// Known network endpoints for the peer
    addresses: Vec<SocketAddr>,

    /// Last reported connection status
    status: ConnectionStatus,

    /// Socket descriptor of the live connection, if any
    socket_fd: Option<i32>,
}

impl Peer {
    /// Create a minimal peer holding only an identity.
    ///
    /// All other fields start empty/default. This is the shape the registry
    /// itself constructs when a find-or-add by raw ID misses.
    #[must_use]
    pub fn with_id(id: impl Into<PeerId>) -> Self {
        Self {
            id: id.into(),
            addresses: Vec::new(),
            status: ConnectionStatus::default(),
            socket_fd: None,
        }
    }

    /// Create a peer with an identity and known addresses
    #[must_use]
    pub fn new(id: impl Into<PeerId>, addresses: Vec<SocketAddr>) -> Self {
        Self {
            id: id.into(),
            addresses,
            status: ConnectionStatus::default(),
            socket_fd: None,
        }
    }

    /// Get the peer's identity
    #[must_use]
    pub fn id(&self) -> &PeerId {
        &self.id
    }

    /// Get the peer's known addresses
    #[must_use]
    pub fn addresses(&self) -> &[SocketAddr] {
        &self.addresses
    }

    /// Record an additional known address
    pub fn add_address(&mut self, addr: SocketAddr) {
        if !self.addresses.contains(&addr) {
            self.addresses.push(addr);
        }
    }

    /// Get the last reported connection status
    #[must_use]
    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    /// Set the connection status
    pub fn set_status(&mut self, status: ConnectionStatus) {
        self.status = status;
    }

    /// Get the socket descriptor of the peer's connection, if any
    #[must_use]
    pub fn socket_fd(&self) -> Option<i32> {
        self.socket_fd
    }

    /// Record the socket descriptor of a live connection
    pub fn set_socket_fd(&mut self, fd: i32) {
        self.socket_fd = Some(fd);
    }
}

impl fmt::Debug for Peer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Peer")
            .field("id", &self.id)
            .field("addresses", &self.addresses)
            .field("status", &self.status)
            .field("socket_fd", &self.socket_fd)
            .finish()
    }
}
