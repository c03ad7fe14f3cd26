//! # dukaan-sync: Offline Queue and Sync Client
//!
//! The client side of Dukaan: typed REST calls, a persistent local queue of
//! product edits made while the server was unreachable, and the sync pass
//! that replays the queue when connectivity returns.
//!
//! ## The Sync Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         One Sync Pass                                   │
//! │                                                                         │
//! │  queue: [ create A │ create B │ update #7 ]   (FIFO, on disk)          │
//! │              │                                                          │
//! │              ▼                                                          │
//! │  entry 1: POST /api/products  ──► 201 ──► prepend A' to cache          │
//! │  entry 2: POST /api/products  ──► 201 ──► prepend B' to cache          │
//! │  entry 3: PUT  /api/products/7 ─► 200                                  │
//! │              │                                                          │
//! │              ▼                                                          │
//! │  all succeeded ──► queue cleared ──► Completed { synced: 3 }           │
//! │                                                                         │
//! │  ANY failure ──► pass aborts immediately; the queue - including        │
//! │  entries that already succeeded this pass - is left untouched.         │
//! │  A later retry re-sends the already-applied entries (duplicate         │
//! │  creates). That hazard is part of the wire contract; see               │
//! │  `SyncAgent::sync` before "fixing" it.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`agent`] - [`SyncAgent`]: queue + client + product cache orchestration
//! - [`client`] - [`ApiClient`]: typed reqwest wrapper over the REST API
//! - [`queue`] - [`LocalQueue`] and queue entry types
//! - [`config`] - TOML + environment configuration
//! - [`error`] - Sync error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod agent;
pub mod client;
pub mod config;
pub mod error;
pub mod queue;

// =============================================================================
// Re-exports
// =============================================================================

pub use agent::{SaveOutcome, SyncAgent, SyncOutcome};
pub use client::ApiClient;
pub use config::SyncConfig;
pub use error::{SyncError, SyncResult};
pub use queue::{LocalQueue, QueueEntry, UpdateIntent};
