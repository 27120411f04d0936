//! # peerstore
//!
//! In-process peer registry for a peer-to-peer networking stack.
//!
//! This crate provides:
//! - Deduplicated peer tracking keyed by byte-string peer ID
//! - Atomic find-or-add (at most one stored copy per ID, even under races)
//! - A distinguished local peer, always resolvable
//! - A monotonic socket-fd watermark for readiness-set sizing
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Peerstore                                 │
//! │   (concurrent map: peer ID -> entry, plus local peer + fd mark) │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                        PeerEntry                                 │
//! │   (owns exactly one stored peer; reserved per-entry metadata)   │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                          Peer                                    │
//! │   (identity, known addresses, connection status, socket fd)     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Network I/O, discovery, dialing, and persistence are out of scope:
//! session and connection-management code consume the registry as a
//! library API and keep those concerns for themselves.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod peer;
pub mod store;

pub use error::{PeerstoreError, Result};
pub use peer::{ConnectionStatus, Peer, PeerId};
pub use store::{PeerEntry, Peerstore};
