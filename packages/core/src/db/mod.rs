//! Database Layer
//!
//! This module defines the boundary to the authoritative link database:
//!
//! - `LinkStore` - async gateway trait (create, read all, update, delete, clear)
//! - `StoreError` - gateway failures
//! - `InMemoryLinkStore` - reference implementation for tests and tooling
//!
//! Real engines live outside this crate and plug in by implementing
//! `LinkStore`.

mod error;
mod link_store;
mod memory_store;

pub use error::StoreError;
pub use link_store::LinkStore;
pub use memory_store::InMemoryLinkStore;
