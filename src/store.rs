//! The peer registry: deduplicated, concurrent peer storage.
//!
//! The registry tracks every peer the local node knows about, the local
//! node itself included, and resolves peer IDs to shared [`Peer`] handles.
//!
//! # Architecture
//!
//! Peers are stored in a concurrent `DashMap` keyed by [`PeerId`], with each
//! stored peer behind an `Arc` so lookups hand out shared handles rather
//! than copies. The local peer is held in a dedicated field installed once
//! at construction; it also lives in the map so ID lookup is uniform.
//!
//! Find-or-add goes through the map's `entry` API: the shard lock spans the
//! whole search-and-maybe-insert, so two callers racing to register the same
//! previously-unknown ID are serialized - exactly one inserts, and both
//! observe the same stored peer.

use crate::error::{PeerstoreError, Result};
use crate::peer::{Peer, PeerId};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

/// A registry entry wrapping exactly one stored peer.
///
/// Currently carries nothing beyond the peer; per-entry metadata (last-seen
/// bookkeeping and the like) gets a home here when it lands. An entry can
/// never exist without a peer.
#[derive(Clone)]
pub struct PeerEntry {
    peer: Arc<Peer>,
}

impl PeerEntry {
    /// Wrap a peer in a new registry entry, taking ownership
    #[must_use]
    pub fn new(peer: Peer) -> Self {
        Self {
            peer: Arc::new(peer),
        }
    }

    fn from_shared(peer: Arc<Peer>) -> Self {
        Self { peer }
    }

    /// Get the entry's peer
    #[must_use]
    pub fn peer(&self) -> &Arc<Peer> {
        &self.peer
    }

    /// Get the ID of the entry's peer
    #[must_use]
    pub fn id(&self) -> &PeerId {
        self.peer.id()
    }
}

impl std::fmt::Debug for PeerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PeerEntry").field("peer", &self.peer).finish()
    }
}

/// The registry of all known peers for one node.
///
/// Thread-safe and designed for concurrent access: every operation takes
/// `&self`, so the store is typically shared behind an `Arc` across the
/// inbound listener, outbound dialer, and per-protocol handlers.
///
/// # Invariants
///
/// - The local peer is installed at construction, never replaced, and is
///   always resolvable via [`Peerstore::local_peer`].
/// - No two stored peers share an ID.
/// - The socket-fd watermark is monotonically non-decreasing.
///
/// # Example
///
/// ```
/// use peerstore::{Peer, Peerstore};
///
/// let store = Peerstore::new(&Peer::with_id(&b"local"[..])).unwrap();
/// let peer = store.get_or_add_peer(&Peer::with_id(&b"remote"[..])).unwrap();
/// assert_eq!(store.get_peer(b"remote").unwrap().id(), peer.id());
/// ```
pub struct Peerstore {
    /// The node's own identity, installed once at construction
    local: Arc<Peer>,

    /// All known peers, the local peer included (`peer_id` -> entry)
    peers: DashMap<PeerId, PeerEntry>,

    /// Highest socket descriptor observed across all peer connections,
    /// tracked for readiness-set sizing
    max_socket_fd: AtomicI32,
}

impl Peerstore {
    /// Create a registry seeded with the local peer.
    ///
    /// The local peer is deep-copied into the store; the caller keeps
    /// ownership of its argument.
    ///
    /// # Errors
    ///
    /// Returns `PeerstoreError::EmptyPeerId` if the local peer has a
    /// zero-length ID. No partial state is left behind on error.
    pub fn new(local_peer: &Peer) -> Result<Self> {
        if local_peer.id().is_empty() {
            return Err(PeerstoreError::EmptyPeerId);
        }

        let local = Arc::new(local_peer.clone());
        let peers = DashMap::new();
        peers.insert(
            local.id().clone(),
            PeerEntry::from_shared(Arc::clone(&local)),
        );

        tracing::debug!(local = %local.id(), "peerstore created");

        Ok(Self {
            local,
            peers,
            max_socket_fd: AtomicI32::new(0),
        })
    }

    /// Add an entry to the registry.
    ///
    /// # Errors
    ///
    /// Returns `PeerstoreError::DuplicatePeer` if a peer with the same ID is
    /// already registered, or `PeerstoreError::EmptyPeerId` for a zero-length
    /// ID. For conditional insertion of externally observed peers use
    /// [`Peerstore::get_or_add_peer`] instead; a separate lookup followed by
    /// this call would reopen the race it closes.
    pub fn add_peer_entry(&self, entry: PeerEntry) -> Result<()> {
        if entry.id().is_empty() {
            return Err(PeerstoreError::EmptyPeerId);
        }

        match self.peers.entry(entry.id().clone()) {
            Entry::Occupied(_) => Err(PeerstoreError::DuplicatePeer(entry.id().clone())),
            Entry::Vacant(slot) => {
                tracing::debug!(peer = %entry.id(), "peer registered");
                slot.insert(entry);
                Ok(())
            }
        }
    }

    /// Deep-copy a peer into the registry and return the stored copy.
    ///
    /// # Errors
    ///
    /// Same contract as [`Peerstore::add_peer_entry`].
    pub fn add_peer(&self, peer: &Peer) -> Result<Arc<Peer>> {
        let entry = PeerEntry::new(peer.clone());
        let stored = Arc::clone(entry.peer());
        self.add_peer_entry(entry)?;
        Ok(stored)
    }

    /// Look up a registry entry by peer ID.
    ///
    /// Exact byte-length and byte-content match. A miss is a normal
    /// absence, not an error.
    #[must_use]
    pub fn get_peer_entry(&self, id: &[u8]) -> Option<PeerEntry> {
        self.peers.get(id).map(|entry| entry.value().clone())
    }

    /// Look up a peer by ID
    #[must_use]
    pub fn get_peer(&self, id: &[u8]) -> Option<Arc<Peer>> {
        self.peers.get(id).map(|entry| Arc::clone(entry.peer()))
    }

    /// Get the local peer.
    ///
    /// Always succeeds: the local peer is installed at construction and
    /// never removed or replaced.
    #[must_use]
    pub fn local_peer(&self) -> &Arc<Peer> {
        &self.local
    }

    /// Find a peer by the candidate's ID, inserting a deep copy of the
    /// candidate if it is unknown.
    ///
    /// The search-and-maybe-insert is one indivisible operation: concurrent
    /// callers racing on the same new ID all receive handles to the single
    /// stored copy. The returned handle is shared; the caller never receives
    /// ownership of registry state.
    ///
    /// # Errors
    ///
    /// Returns `PeerstoreError::EmptyPeerId` if the candidate's ID is
    /// zero-length.
    pub fn get_or_add_peer(&self, candidate: &Peer) -> Result<Arc<Peer>> {
        if candidate.id().is_empty() {
            return Err(PeerstoreError::EmptyPeerId);
        }

        let entry = self.peers.entry(candidate.id().clone()).or_insert_with(|| {
            tracing::debug!(peer = %candidate.id(), "unknown peer registered via find-or-add");
            PeerEntry::new(candidate.clone())
        });

        Ok(Arc::clone(entry.peer()))
    }

    /// Find a peer by raw ID, inserting a minimal peer holding only that ID
    /// if it is unknown.
    ///
    /// Same atomicity contract as [`Peerstore::get_or_add_peer`].
    ///
    /// # Errors
    ///
    /// Returns `PeerstoreError::EmptyPeerId` for a zero-length ID.
    pub fn get_or_add_peer_by_id(&self, id: &[u8]) -> Result<Arc<Peer>> {
        if id.is_empty() {
            return Err(PeerstoreError::EmptyPeerId);
        }

        let entry = self.peers.entry(PeerId::from(id)).or_insert_with(|| {
            tracing::debug!(peer = %PeerId::from(id), "unknown peer registered by id");
            PeerEntry::new(Peer::with_id(id))
        });

        Ok(Arc::clone(entry.peer()))
    }

    /// Raise the socket-fd watermark and return the resulting maximum.
    ///
    /// The watermark only moves up: values below the current maximum leave
    /// it unchanged. Connection-accepting code uses it to size
    /// `select`/`poll`-style readiness sets across all peer sockets.
    pub fn update_socket_fd(&self, fd: i32) -> i32 {
        let prev = self.max_socket_fd.fetch_max(fd, Ordering::AcqRel);
        if fd > prev {
            tracing::trace!(fd, "socket-fd watermark raised");
        }
        prev.max(fd)
    }

    /// Get the current socket-fd watermark
    #[must_use]
    pub fn max_socket_fd(&self) -> i32 {
        self.max_socket_fd.load(Ordering::Acquire)
    }

    /// Check whether a peer with the given ID is registered
    #[must_use]
    pub fn contains(&self, id: &[u8]) -> bool {
        self.peers.contains_key(id)
    }

    /// Number of registered peers, the local peer included
    #[must_use]
    pub fn peer_count(&self) -> usize {
        self.peers.len()
    }

    /// IDs of all registered peers, in unspecified order
    #[must_use]
    pub fn peer_ids(&self) -> Vec<PeerId> {
        self.peers.iter().map(|entry| entry.key().clone()).collect()
    }
}

impl std::fmt::Debug for Peerstore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Peerstore")
            .field("local", &self.local.id())
            .field("peer_count", &self.peer_count())
            .field("max_socket_fd", &self.max_socket_fd())
            .finish()
    }
}
