//! InMemoryLinkStore - Vec-backed LinkStore for tests and development
//!
//! Keeps links in insertion order, which is the order `read_all_links`
//! returns. Ids come from a counter that survives `clear_database`, so an id
//! is never handed out twice by the same store.

use super::error::StoreError;
use super::link_store::LinkStore;
use crate::models::{Link, LinkAddress};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug)]
struct StoreState {
    links: Vec<Link>,
    next_id: LinkAddress,
}

/// In-memory link store.
///
/// Clone-friendly via Arc: clones share the same links.
#[derive(Debug, Clone)]
pub struct InMemoryLinkStore {
    state: Arc<RwLock<StoreState>>,
}

impl Default for InMemoryLinkStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLinkStore {
    /// Create an empty store; the first id handed out is 1.
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState {
                links: Vec::new(),
                next_id: 1,
            })),
        }
    }

    /// Seed a store with existing links, kept in the given order.
    ///
    /// New ids continue after the highest seeded id.
    pub fn from_links(links: Vec<Link>) -> Self {
        let next_id = links.iter().map(|link| link.id).max().unwrap_or(0) + 1;
        Self {
            state: Arc::new(RwLock::new(StoreState { links, next_id })),
        }
    }

    /// Number of links currently stored
    pub async fn len(&self) -> usize {
        self.state.read().await.links.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.links.is_empty()
    }
}

#[async_trait]
impl LinkStore for InMemoryLinkStore {
    async fn create_link(
        &self,
        source: LinkAddress,
        target: LinkAddress,
    ) -> Result<Link, StoreError> {
        let mut state = self.state.write().await;
        let link = Link::new(state.next_id, source, target);
        state.next_id += 1;
        state.links.push(link);
        Ok(link)
    }

    async fn read_all_links(&self) -> Result<Vec<Link>, StoreError> {
        Ok(self.state.read().await.links.clone())
    }

    async fn update_link(
        &self,
        id: LinkAddress,
        source: LinkAddress,
        target: LinkAddress,
    ) -> Result<Link, StoreError> {
        let mut state = self.state.write().await;
        let link = state
            .links
            .iter_mut()
            .find(|link| link.id == id)
            .ok_or(StoreError::LinkNotFound { id })?;

        link.source = source;
        link.target = target;
        Ok(*link)
    }

    async fn delete_link(&self, id: LinkAddress) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        let before = state.links.len();
        state.links.retain(|link| link.id != id);
        Ok(state.links.len() != before)
    }

    async fn clear_database(&self) -> Result<bool, StoreError> {
        self.state.write().await.links.clear();
        Ok(true)
    }
}
