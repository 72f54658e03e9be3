//! LinkStore Trait - Gateway to the Authoritative Link Database
//!
//! The flat algebra never owns links. Every operation goes through an object
//! implementing this trait, and every read is a full round trip: there is no
//! cache, no batching and no pagination at this boundary.
//!
//! # Contract
//!
//! - `create_link` assigns a fresh positive id that is never reused.
//! - `read_all_links` returns every link in whatever order the engine keeps
//!   them. Callers may use that order to break ties, never for correctness.
//! - `update_link` rewrites `(source, target)` and keeps the id.
//! - `delete_link` reports whether a link was removed.
//! - `clear_database` is for reset tooling; the algebra never calls it.
//!
//! Cancellation, timeouts and retries belong to the implementation.
//!
//! # Examples
//!
//! ```rust
//! use links_core::db::{InMemoryLinkStore, LinkStore};
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let store: Arc<dyn LinkStore> = Arc::new(InMemoryLinkStore::new());
//! let link = store.create_link(1, 2).await.unwrap();
//! assert_eq!(store.read_all_links().await.unwrap(), vec![link]);
//! # });
//! ```

use super::error::StoreError;
use crate::models::{Link, LinkAddress};
use async_trait::async_trait;

/// Abstraction over link persistence
///
/// Implementations must be `Send + Sync` so services holding an
/// `Arc<dyn LinkStore>` can be shared across tasks.
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Create a link and return it with its assigned id
    async fn create_link(
        &self,
        source: LinkAddress,
        target: LinkAddress,
    ) -> Result<Link, StoreError>;

    /// Full scan of all links
    async fn read_all_links(&self) -> Result<Vec<Link>, StoreError>;

    /// Rewrite `(source, target)` of an existing link
    ///
    /// # Errors
    ///
    /// `StoreError::LinkNotFound` if no link has this id.
    async fn update_link(
        &self,
        id: LinkAddress,
        source: LinkAddress,
        target: LinkAddress,
    ) -> Result<Link, StoreError>;

    /// Remove a link; `Ok(false)` if it did not exist
    async fn delete_link(&self, id: LinkAddress) -> Result<bool, StoreError>;

    /// Remove every link
    async fn clear_database(&self) -> Result<bool, StoreError>;
}
