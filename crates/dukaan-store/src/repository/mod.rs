//! # Repositories
//!
//! One repository per collection. Each owns the read-modify-write cycle for
//! its collection: acquire the collection lock, read the whole file, apply
//! the domain operation (from dukaan-core), write the whole file back.
//!
//! Read-only operations skip the lock - the store's rename-based writes mean
//! a reader always sees a complete file.

pub mod product;
pub mod transaction;
pub mod user;
