//! # dukaan-core: Pure Domain Logic for Dukaan
//!
//! This crate is the **heart** of Dukaan. It contains all domain rules as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Dukaan Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            apps/api (REST) • apps/admin (CLI)                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ dukaan-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   phone   │  │    ops    │  │   cart    │  │   │
//! │  │   │  Product  │  │ normalize │  │  lookups  │  │ id → qty  │  │   │
//! │  │   │   User    │  │ validate  │  │ tx build  │  │  totals   │  │   │
//! │  │   │Transaction│  │           │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          dukaan-store (JSON files) • dukaan-sync (queue)        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain records (Product, User, Transaction) and request DTOs
//! - [`phone`] - Phone-number normalization
//! - [`ids`] - Monotonic id assignment over whole collections
//! - [`ops`] - Lookups, filters, transaction construction
//! - [`cart`] - Pure shopping-cart math
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - time is passed in
//! 2. **No I/O**: File, network and database access is FORBIDDEN here
//! 3. **Lenient Records**: Collection files are user-editable JSON; a sparse
//!    or mistyped record never poisons a whole collection
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod ids;
pub mod ops;
pub mod phone;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use dukaan_core::Product` instead of
// `use dukaan_core::types::Product`

pub use cart::Cart;
pub use error::ValidationError;
pub use phone::normalize_phone;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of digits a normalized phone number must have to be accepted
/// at signup.
///
/// Lookups never enforce this - only account creation does, so data imported
/// from elsewhere with odd phone formats can still be queried.
pub const PHONE_DIGITS: usize = 10;

/// Phone value recorded on transactions that cannot be attributed to any
/// phone number or user account.
pub const GUEST_PHONE: &str = "guest";

/// Transaction status recorded when payment was taken.
pub const STATUS_PAID: &str = "PAID";

/// Transaction status recorded for cash-on-delivery orders.
pub const STATUS_PLACED: &str = "PLACED";
