//! Links Core
//!
//! Associative data model ("Links Theory") built on a flat store of
//! `(id, source, target)` triples.
//!
//! # Architecture
//!
//! - **Gateway**: `LinkStore` is the only path to the authoritative link
//!   database; this crate never caches links between calls
//! - **Flat algebra**: `LinksService` filters with positional restrictions
//!   and the `ANY` wildcard, and mutates one link at a time
//! - **Recursive codec**: `RecursiveLinks` and `notation` convert between
//!   nested values, link chains and Links Notation text
//!
//! # Modules
//!
//! - [`models`] - Links, restrictions, change records, nested values
//! - [`db`] - Store trait and in-memory implementation
//! - [`services`] - `LinksService`, `RecursiveLinks`, errors
//! - [`notation`] - Links Notation rendering and parsing
//! - [`config`] - Service configuration
//!
//! # Example
//!
//! ```rust
//! use links_core::{InMemoryLinkStore, LinksService, RecursiveLinks};
//! use links_core::models::Node;
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let links = LinksService::new(Arc::new(InMemoryLinkStore::new()));
//! let codec = RecursiveLinks::new(links.clone());
//!
//! let items = vec![Node::pair(1, 2), Node::pair(3, 4)];
//! let ids = codec.create_from_nested_array(&items).await.unwrap();
//! assert_eq!(ids.len(), 2);
//! assert_eq!(codec.to_links_notation(&items), "((1 2) (3 4))");
//! # });
//! ```

pub mod config;
pub mod db;
pub mod models;
pub mod notation;
pub mod services;

// Re-export commonly used types
pub use config::{LinksConfig, MatchOrder};
pub use db::{InMemoryLinkStore, LinkStore, StoreError};
pub use models::{Flow, Link, LinkAddress, LinkChange, LinkConstants, Restriction, ANY};
pub use services::{LinksError, LinksService, RecursiveLinks};
