//! Links Service - Flat Link Algebra
//!
//! Restriction/substitution CRUD over a `LinkStore`:
//!
//! - `count` / `each` - filtered reads with short-circuiting iteration
//! - `create` / `update` / `delete` - single-link mutations with optional
//!   change observers
//!
//! "Flat" means every operation touches at most one link. Every call re-reads
//! the store in full before filtering; nothing is cached between calls.
//!
//! # Matching
//!
//! A link matches a restriction when every present position is either
//! [`ANY`](crate::models::ANY) or equal to the link's field. Update and delete
//! act on a single match chosen by `LinksConfig::match_order` (by default the
//! first link in store order).
//!
//! # Concurrency
//!
//! There is no locking here. Overlapping mutations from several callers race
//! on the store's own concurrency control.

use crate::config::{LinksConfig, MatchOrder};
use crate::db::LinkStore;
use crate::models::{
    Flow, Link, LinkAddress, LinkChange, LinkConstants, Restriction, Substitution,
};
use crate::services::error::LinksError;
use std::sync::Arc;

/// Per-link callback for `each`. Return `Flow::Break` to stop.
pub type LinkHandler<'a> = &'a mut (dyn FnMut(&Link) -> Flow + Send);

/// Observer invoked synchronously after a successful mutation.
pub type ChangeHandler<'a> = &'a mut (dyn FnMut(&LinkChange) + Send);

/// Flat link algebra over a shared store
///
/// Cheap to clone; clones talk to the same store.
#[derive(Clone)]
pub struct LinksService {
    store: Arc<dyn LinkStore>,
    config: LinksConfig,
}

impl LinksService {
    /// Create a service with default configuration
    pub fn new(store: Arc<dyn LinkStore>) -> Self {
        Self::with_config(store, LinksConfig::default())
    }

    pub fn with_config(store: Arc<dyn LinkStore>, config: LinksConfig) -> Self {
        Self { store, config }
    }

    /// Constants for this links instance (`ANY`, `CONTINUE`, `BREAK`)
    pub fn constants(&self) -> LinkConstants {
        LinkConstants
    }

    pub fn store(&self) -> &Arc<dyn LinkStore> {
        &self.store
    }

    pub fn config(&self) -> &LinksConfig {
        &self.config
    }

    /// Count links matching the restriction
    ///
    /// An empty restriction counts every link.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use links_core::{InMemoryLinkStore, LinksService, Restriction};
    /// # use std::sync::Arc;
    /// # tokio_test::block_on(async {
    /// let links = LinksService::new(Arc::new(InMemoryLinkStore::new()));
    /// links.create(&[10, 20], None).await.unwrap();
    /// links.create(&[10, 30], None).await.unwrap();
    ///
    /// assert_eq!(links.count(Restriction::All).await.unwrap(), 2);
    /// assert_eq!(links.count([10, 0]).await.unwrap(), 2);
    /// assert_eq!(links.count([0, 30]).await.unwrap(), 1);
    /// # });
    /// ```
    pub async fn count(&self, restriction: impl Into<Restriction>) -> Result<usize, LinksError> {
        let restriction = restriction.into();
        self.read_matching(&restriction)
            .await
            .map(|matches| matches.len())
            .inspect_err(|e| tracing::error!("Failed to count links: {}", e))
    }

    /// Visit links matching the restriction in store order
    ///
    /// Returns `Flow::Break` as soon as the handler does, without visiting
    /// further links; otherwise `Flow::Continue`. Without a handler the
    /// call only reads and returns `Flow::Continue`.
    pub async fn each(
        &self,
        restriction: impl Into<Restriction>,
        handler: Option<LinkHandler<'_>>,
    ) -> Result<Flow, LinksError> {
        let restriction = restriction.into();
        let matches = self
            .read_matching(&restriction)
            .await
            .inspect_err(|e| tracing::error!("Failed to iterate links: {}", e))?;

        let Some(handler) = handler else {
            return Ok(Flow::Continue);
        };

        for link in &matches {
            if handler(link) == Flow::Break {
                return Ok(Flow::Break);
            }
        }

        Ok(Flow::Continue)
    }

    /// Create a link from `[source, target]` or `[id, source, target]`
    ///
    /// The id slot is ignored; the store assigns ids.
    ///
    /// # Errors
    ///
    /// - `InvalidSubstitution` if fewer than two values are given (the store
    ///   is not contacted)
    /// - `StoreUnavailable` if the store fails
    pub async fn create(
        &self,
        substitution: &[LinkAddress],
        handler: Option<ChangeHandler<'_>>,
    ) -> Result<LinkAddress, LinksError> {
        self.create_link(substitution, handler)
            .await
            .inspect_err(|e| tracing::error!("Failed to create link: {}", e))
    }

    async fn create_link(
        &self,
        substitution: &[LinkAddress],
        handler: Option<ChangeHandler<'_>>,
    ) -> Result<LinkAddress, LinksError> {
        let Substitution { source, target } = parse_substitution(substitution)?;
        let link = self.store.create_link(source, target).await?;
        tracing::debug!("Created link {}: ({} {})", link.id, source, target);

        if let Some(handler) = handler {
            handler(&LinkChange::created(link));
        }

        Ok(link.id)
    }

    /// Rewrite `(source, target)` of one link matching the restriction
    ///
    /// Never updates more than one link. The id is preserved.
    ///
    /// # Errors
    ///
    /// - `RestrictionRequired` for an empty restriction
    /// - `InvalidSubstitution` if fewer than two values are given
    /// - `NoMatch` if nothing matches
    /// - `StoreUnavailable` if the store fails
    pub async fn update(
        &self,
        restriction: impl Into<Restriction>,
        substitution: &[LinkAddress],
        handler: Option<ChangeHandler<'_>>,
    ) -> Result<LinkAddress, LinksError> {
        let restriction = restriction.into();
        self.update_link(&restriction, substitution, handler)
            .await
            .inspect_err(|e| tracing::error!("Failed to update link: {}", e))
    }

    async fn update_link(
        &self,
        restriction: &Restriction,
        substitution: &[LinkAddress],
        handler: Option<ChangeHandler<'_>>,
    ) -> Result<LinkAddress, LinksError> {
        if restriction.is_empty() {
            return Err(LinksError::RestrictionRequired {
                operation: "update",
            });
        }
        let Substitution { source, target } = parse_substitution(substitution)?;

        let before = self.select_match("update", restriction).await?;
        let after = self.store.update_link(before.id, source, target).await?;
        tracing::debug!(
            "Updated link {}: ({} {}) -> ({} {})",
            after.id,
            before.source,
            before.target,
            after.source,
            after.target
        );

        if let Some(handler) = handler {
            handler(&LinkChange::updated(before, after));
        }

        Ok(after.id)
    }

    /// Delete one link matching the restriction
    ///
    /// # Errors
    ///
    /// - `RestrictionRequired` for an empty restriction
    /// - `NoMatch` if nothing matches
    /// - `StoreUnavailable` if the store fails
    pub async fn delete(
        &self,
        restriction: impl Into<Restriction>,
        handler: Option<ChangeHandler<'_>>,
    ) -> Result<LinkAddress, LinksError> {
        let restriction = restriction.into();
        self.delete_link(&restriction, handler)
            .await
            .inspect_err(|e| tracing::error!("Failed to delete link: {}", e))
    }

    async fn delete_link(
        &self,
        restriction: &Restriction,
        handler: Option<ChangeHandler<'_>>,
    ) -> Result<LinkAddress, LinksError> {
        if restriction.is_empty() {
            return Err(LinksError::RestrictionRequired {
                operation: "delete",
            });
        }

        let before = self.select_match("delete", restriction).await?;
        if !self.store.delete_link(before.id).await? {
            tracing::warn!("Link {} was already gone when deleting", before.id);
        }
        tracing::debug!("Deleted link {}", before.id);

        if let Some(handler) = handler {
            handler(&LinkChange::deleted(before));
        }

        Ok(before.id)
    }

    /// Full read followed by the restriction filter, in store order
    async fn read_matching(&self, restriction: &Restriction) -> Result<Vec<Link>, LinksError> {
        let links = self.store.read_all_links().await?;
        Ok(restriction.filter(&links).copied().collect())
    }

    /// The single link an update or delete acts on
    async fn select_match(
        &self,
        operation: &'static str,
        restriction: &Restriction,
    ) -> Result<Link, LinksError> {
        let matches = self.read_matching(restriction).await?;
        let selected = match self.config.match_order {
            MatchOrder::Store => matches.first().copied(),
            MatchOrder::LowestId => matches.iter().min_by_key(|link| link.id).copied(),
        };

        selected.ok_or_else(|| LinksError::NoMatch {
            operation,
            restriction: restriction.to_string(),
        })
    }
}

fn parse_substitution(values: &[LinkAddress]) -> Result<Substitution, LinksError> {
    Substitution::from_values(values).ok_or(LinksError::InvalidSubstitution { len: values.len() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryLinkStore;

    fn service_over(links: Vec<Link>, match_order: MatchOrder) -> LinksService {
        let config = LinksConfig {
            match_order,
            ..Default::default()
        };
        LinksService::with_config(Arc::new(InMemoryLinkStore::from_links(links)), config)
    }

    #[tokio::test]
    async fn test_update_picks_first_in_store_order() {
        let links = service_over(
            vec![Link::new(7, 1, 1), Link::new(2, 1, 1)],
            MatchOrder::Store,
        );

        let id = links.update([1, 1], &[5, 5], None).await.unwrap();
        assert_eq!(id, 7);
    }

    #[tokio::test]
    async fn test_update_picks_lowest_id_when_configured() {
        let links = service_over(
            vec![Link::new(7, 1, 1), Link::new(2, 1, 1)],
            MatchOrder::LowestId,
        );

        let id = links.delete([1, 1], None).await.unwrap();
        assert_eq!(id, 2);
        assert_eq!(links.count(Restriction::by_id(7)).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_invalid_substitution_does_not_touch_store() {
        let links = service_over(vec![Link::new(1, 1, 2)], MatchOrder::Store);

        let err = links.create(&[1], None).await.unwrap_err();
        assert_eq!(err, LinksError::InvalidSubstitution { len: 1 });

        let err = links.update([1], &[], None).await.unwrap_err();
        assert_eq!(err, LinksError::InvalidSubstitution { len: 0 });
        assert_eq!(links.count(Restriction::All).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_with_three_value_substitution() {
        let links = service_over(vec![Link::new(1, 1, 2)], MatchOrder::Store);

        links.update([1], &[99, 3, 4], None).await.unwrap();
        assert_eq!(links.count([1, 3, 4]).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_each_without_handler_continues() {
        let links = service_over(vec![Link::new(1, 1, 2)], MatchOrder::Store);
        assert_eq!(links.each(Restriction::All, None).await.unwrap(), Flow::Continue);
    }
}
