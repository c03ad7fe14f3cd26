//! # dukaan-store: Record Store for Dukaan
//!
//! This crate provides persistence for the Dukaan system. Each collection
//! (products, users, transactions) lives in one flat JSON file that is read
//! and rewritten wholesale on every mutation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Dukaan Data Flow                                │
//! │                                                                         │
//! │  HTTP handler (POST /api/products)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   dukaan-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │     Store     │    │  Repositories │    │  Collection  │  │   │
//! │  │   │  (store.rs)   │    │ (product.rs)  │    │ (names/locks)│  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ read / write  │◄───│ ProductRepo   │    │ products.json│  │   │
//! │  │   │ heal / locks  │    │ UserRepo      │    │ user.json    │  │   │
//! │  │   │               │    │ TransactionRe.│    │ transactions.│  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  <data dir>/products.json • user.json • transactions.json              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - File access, self-healing, per-collection locking
//! - [`collection`] - The three collections and their file names
//! - [`error`] - Store error types
//! - [`repository`] - Repository implementations (product, user, transaction)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dukaan_store::{Store, StoreConfig};
//!
//! let store = Store::open(StoreConfig::new("database")).await?;
//! let products = store.products().list().await;
//! let created = store.products().insert(draft).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod collection;
pub mod error;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use collection::Collection;
pub use error::{StoreError, StoreResult};
pub use store::{Store, StoreConfig};

// Repository re-exports for convenience
pub use repository::product::ProductRepository;
pub use repository::transaction::TransactionRepository;
pub use repository::user::UserRepository;
