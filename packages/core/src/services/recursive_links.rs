//! Recursive Links - Nested Values <-> Flat Links
//!
//! Builds chains of flat links from nested values and reads links back as
//! nested pairs. All link creation goes through [`LinksService::create`].
//!
//! # Nested arrays
//!
//! `[[1, 2], [3, 4]]` creates two links, `(1 2)` and `(3 4)`. A nested array
//! in a source or target position is created first and its id used in place:
//! `[[[1, 2], 3]]` creates `(1 2)` with id `n`, then `(n 3)`.
//!
//! # Reference groups
//!
//! `{ "1": [1, { "2": [5, 6] }, 3, 4] }` folds each array left to right into a
//! chain: the first element seeds the chain, every later element is linked to
//! the chain so far. Nested groups contribute their first reference id and
//! their names are merged into the result.
//!
//! # Atomicity
//!
//! There is none across links. A failure aborts the call, but links created
//! by earlier, completed steps stay in the store.

use crate::models::{Flow, Link, LinkAddress, Node, ReferenceMap, References, Restriction};
use crate::notation;
use crate::services::error::LinksError;
use crate::services::links_service::{LinkHandler, LinksService};
use futures::future::{BoxFuture, FutureExt};
use std::collections::HashSet;

/// Allocator for temporary ids.
///
/// Owned by the caller and passed where needed; nothing is shared globally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempIds {
    next: LinkAddress,
}

impl TempIds {
    pub fn starting_at(start: LinkAddress) -> Self {
        Self { next: start }
    }

    /// Hand out the next id and advance
    pub fn next_id(&mut self) -> LinkAddress {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Recursive codec over a `LinksService`
#[derive(Clone)]
pub struct RecursiveLinks {
    links: LinksService,
}

impl RecursiveLinks {
    pub fn new(links: LinksService) -> Self {
        Self { links }
    }

    /// The flat service this codec writes through; shares the same store
    pub fn links(&self) -> &LinksService {
        &self.links
    }

    /// Fresh temporary id allocator starting at the configured value
    pub fn temp_ids(&self) -> TempIds {
        TempIds::starting_at(self.links.config().temp_id_start)
    }

    /// Create one link per `[source, target]` item
    ///
    /// Items that are not arrays are skipped with a warning. Each item is
    /// checked in full before any of its links are created. Returns the ids
    /// of the top-level links in input order; links created for nested
    /// endpoints are not listed.
    ///
    /// # Errors
    ///
    /// - `InvalidArrayItem` for an array item with fewer than two elements,
    ///   or a labeled group used as an endpoint
    /// - anything `LinksService::create` returns
    pub async fn create_from_nested_array(
        &self,
        items: &[Node],
    ) -> Result<Vec<LinkAddress>, LinksError> {
        let mut ids = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Node::Sequence(pair) => {
                    let id = self
                        .create_item(pair)
                        .await
                        .inspect_err(|e| tracing::error!("Failed to create from nested array: {}", e))?;
                    ids.push(id);
                }
                other => tracing::warn!("Skipping non-array item in nested array: {:?}", other),
            }
        }
        Ok(ids)
    }

    async fn create_item(&self, pair: &[Node]) -> Result<LinkAddress, LinksError> {
        check_pair(pair)?;
        self.create_pair(pair).await
    }

    /// Post-order walk with an explicit stack: both endpoints of a pair are
    /// resolved, nested pairs first, before the pair itself is created.
    async fn create_pair(&self, pair: &[Node]) -> Result<LinkAddress, LinksError> {
        let mut stack = vec![PendingPair::new(pair)];

        while let Some(top) = stack.last_mut() {
            if top.resolved.len() < 2 {
                let items = top.items;
                match items.get(top.resolved.len()) {
                    Some(Node::Scalar(value)) => top.resolved.push(*value),
                    Some(Node::Sequence(inner)) => stack.push(PendingPair::new(inner)),
                    Some(Node::Labeled(_)) => return Err(labeled_endpoint()),
                    None => return Err(LinksError::array_item_arity(items.len())),
                }
                continue;
            }

            let id = self.links.create(&top.resolved, None).await?;
            stack.pop();
            match stack.last_mut() {
                Some(parent) => parent.resolved.push(id),
                None => return Ok(id),
            }
        }

        Err(LinksError::array_item_arity(pair.len()))
    }

    /// Build link chains for every array value and return their ids by name
    ///
    /// Non-array values are skipped with a warning. Names from nested groups
    /// are merged into the returned map.
    ///
    /// # Errors
    ///
    /// - `EmptySequence` for an empty array anywhere in the structure
    /// - `EmptyReferenceGroup` for a nested group with no array values
    /// - anything `LinksService::create` returns
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use links_core::{InMemoryLinkStore, LinksService, RecursiveLinks};
    /// # use links_core::models::References;
    /// # use serde_json::json;
    /// # use std::sync::Arc;
    /// # tokio_test::block_on(async {
    /// let codec = RecursiveLinks::new(LinksService::new(Arc::new(InMemoryLinkStore::new())));
    /// let refs = References::try_from(json!({ "1": [1, { "2": [5, 6] }, 3, 4] })).unwrap();
    ///
    /// let map = codec.create_from_nested_object(&refs).await.unwrap();
    /// assert!(map.get("1").is_some());
    /// assert!(map.get("2").is_some());
    /// # });
    /// ```
    pub async fn create_from_nested_object(
        &self,
        references: &References,
    ) -> Result<ReferenceMap, LinksError> {
        self.build_references(references)
            .await
            .inspect_err(|e| tracing::error!("Failed to create from nested object: {}", e))
    }

    fn build_references<'a>(
        &'a self,
        references: &'a References,
    ) -> BoxFuture<'a, Result<ReferenceMap, LinksError>> {
        async move {
            let mut map = ReferenceMap::new();
            for (name, value) in references.iter() {
                match value {
                    Node::Sequence(items) => {
                        let id = self.build_sequence(items, &mut map).await?;
                        map.insert(name, id);
                    }
                    other => tracing::warn!(
                        "Skipping non-array value in nested object: {}={:?}",
                        name,
                        other
                    ),
                }
            }
            Ok(map)
        }
        .boxed()
    }

    /// Fold an array into a left-associated chain and return the chain's id
    fn build_sequence<'a>(
        &'a self,
        items: &'a [Node],
        map: &'a mut ReferenceMap,
    ) -> BoxFuture<'a, Result<LinkAddress, LinksError>> {
        async move {
            if let [Node::Scalar(source), Node::Scalar(target)] = items {
                return self.links.create(&[*source, *target], None).await;
            }

            let mut current: Option<LinkAddress> = None;
            for item in items {
                let id = match item {
                    Node::Labeled(nested) => {
                        let nested_map = self.build_references(nested).await?;
                        let first = nested_map.first().ok_or(LinksError::EmptyReferenceGroup)?;
                        map.merge(nested_map);
                        first
                    }
                    Node::Sequence(inner) => self.build_sequence(inner, map).await?,
                    Node::Scalar(value) => *value,
                };

                current = Some(match current {
                    None => id,
                    Some(chain) => self.links.create(&[chain, id], None).await?,
                });
            }

            current.ok_or(LinksError::EmptySequence)
        }
        .boxed()
    }

    /// Read matching links as `[source, target]` pairs, once per link id
    ///
    /// Store order is kept. This is a flat listing, not a reconstruction of
    /// whatever nesting created the links.
    pub async fn read_as_nested_array(
        &self,
        restriction: impl Into<Restriction>,
    ) -> Result<Vec<Node>, LinksError> {
        let mut visited = HashSet::new();
        let mut pairs = Vec::new();

        let handler: LinkHandler<'_> = &mut |link: &Link| {
            if visited.insert(link.id) {
                pairs.push(Node::pair(link.source, link.target));
            }
            Flow::Continue
        };
        self.links
            .each(restriction, Some(handler))
            .await
            .inspect_err(|e| tracing::error!("Failed to read as nested array: {}", e))?;

        Ok(pairs)
    }

    /// See [`notation::to_links_notation`]
    pub fn to_links_notation(&self, items: &[Node]) -> String {
        notation::to_links_notation(items)
    }

    /// See [`notation::to_links_notation_with_refs`]
    pub fn to_links_notation_with_refs(&self, references: &References) -> String {
        notation::to_links_notation_with_refs(references)
    }

    /// See [`notation::parse_links_notation`]
    pub fn parse_links_notation(&self, text: &str) -> Vec<Node> {
        notation::parse_links_notation(text)
    }
}

/// A `[source, target]` pair whose endpoints are being resolved
struct PendingPair<'a> {
    items: &'a [Node],
    resolved: Vec<LinkAddress>,
}

impl<'a> PendingPair<'a> {
    fn new(items: &'a [Node]) -> Self {
        Self {
            items,
            resolved: Vec::with_capacity(2),
        }
    }
}

/// Shape check for one top-level item, run before any of its links exist
fn check_pair(pair: &[Node]) -> Result<(), LinksError> {
    let mut pending = vec![pair];
    while let Some(pair) = pending.pop() {
        let [source, target, ..] = pair else {
            return Err(LinksError::array_item_arity(pair.len()));
        };

        for endpoint in [source, target] {
            match endpoint {
                Node::Scalar(_) => {}
                Node::Sequence(inner) => pending.push(inner),
                Node::Labeled(_) => return Err(labeled_endpoint()),
            }
        }
    }
    Ok(())
}

fn labeled_endpoint() -> LinksError {
    LinksError::invalid_array_item("a labeled group cannot be used as a source or target")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_pair_walks_nested_endpoints() {
        assert!(check_pair(&[Node::pair(1, 2), Node::scalar(3)]).is_ok());
        assert!(check_pair(&[Node::seq([Node::scalar(1)]), Node::scalar(3)]).is_err());
        assert!(check_pair(&[Node::scalar(1), Node::labeled([("x", Node::pair(2, 3))])]).is_err());
        assert!(check_pair(&[Node::scalar(1)]).is_err());
    }

    #[test]
    fn test_check_pair_handles_deep_nesting() {
        let mut node = Node::pair(1, 2);
        for level in 0..10_000 {
            node = Node::seq([node, Node::scalar(level)]);
        }
        assert!(check_pair(&[node, Node::scalar(0)]).is_ok());
    }

    #[test]
    fn test_temp_ids_are_threaded_explicitly() {
        let mut ids = TempIds::starting_at(1_000_000);
        assert_eq!(ids.next_id(), 1_000_000);
        assert_eq!(ids.next_id(), 1_000_001);

        let mut other = TempIds::starting_at(1_000_000);
        assert_eq!(other.next_id(), 1_000_000);
    }
}
