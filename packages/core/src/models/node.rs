//! Nested Values
//!
//! `Node` is the codec's input and output shape: a tagged union of scalar
//! addresses, ordered sequences and labeled reference groups. It replaces
//! shape sniffing on untyped values with exhaustive matching.
//!
//! Labeled groups keep insertion order. The first entry of a nested group is
//! significant when building link chains, and rendering follows the order
//! entries were written in.
//!
//! Dropping a `Node` walks the tree with an explicit stack, so arbitrarily
//! deep values parsed from notation are released without recursion.
//!
//! # Examples
//!
//! ```rust
//! use links_core::models::{Node, References};
//! use serde_json::json;
//!
//! let pairs = Node::try_from(json!([[1, 2], [3, 4]])).unwrap();
//! assert_eq!(pairs, Node::seq([Node::pair(1, 2), Node::pair(3, 4)]));
//!
//! let refs = References::try_from(json!({ "1": [1, { "2": [5, 6] }, 3, 4] })).unwrap();
//! assert_eq!(refs.len(), 1);
//! ```

use super::link::LinkAddress;
use serde::{Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// Validation errors for nested values built from JSON
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unsupported value in nested structure: {0}")]
    UnsupportedValue(String),

    #[error("Expected an object of references, got: {0}")]
    NotAnObject(String),
}

/// A nested value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Scalar(LinkAddress),
    Sequence(Vec<Node>),
    Labeled(References),
}

impl Node {
    pub fn scalar(value: LinkAddress) -> Self {
        Node::Scalar(value)
    }

    /// Two-element sequence `[source, target]`.
    pub fn pair(source: LinkAddress, target: LinkAddress) -> Self {
        Node::Sequence(vec![Node::Scalar(source), Node::Scalar(target)])
    }

    pub fn seq(items: impl IntoIterator<Item = Node>) -> Self {
        Node::Sequence(items.into_iter().collect())
    }

    pub fn labeled<K: Into<String>>(entries: impl IntoIterator<Item = (K, Node)>) -> Self {
        Node::Labeled(entries.into_iter().collect())
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Unwrap a sequence into its items; any other node is handed back.
    pub fn into_items(mut self) -> Result<Vec<Node>, Node> {
        if let Node::Sequence(items) = &mut self {
            return Ok(std::mem::take(items));
        }
        Err(self)
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = match self {
            Node::Scalar(_) => return,
            Node::Sequence(items) => std::mem::take(items),
            Node::Labeled(references) => references.take_nodes(),
        };

        // each popped node is emptied before it goes out of scope
        while let Some(mut node) = pending.pop() {
            match &mut node {
                Node::Scalar(_) => {}
                Node::Sequence(items) => pending.append(items),
                Node::Labeled(references) => pending.append(&mut references.take_nodes()),
            }
        }
    }
}

impl From<LinkAddress> for Node {
    fn from(value: LinkAddress) -> Self {
        Node::Scalar(value)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::Sequence(items)
    }
}

impl From<References> for Node {
    fn from(references: References) -> Self {
        Node::Labeled(references)
    }
}

impl TryFrom<Value> for Node {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(number) => number
                .as_i64()
                .map(Node::Scalar)
                .ok_or_else(|| ValidationError::UnsupportedValue(number.to_string())),
            Value::Array(items) => items
                .into_iter()
                .map(Node::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Node::Sequence),
            Value::Object(_) => References::try_from(value).map(Node::Labeled),
            other => Err(ValidationError::UnsupportedValue(other.to_string())),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Scalar(value) => serializer.serialize_i64(*value),
            Node::Sequence(items) => serializer.collect_seq(items),
            Node::Labeled(references) => references.serialize(serializer),
        }
    }
}

impl From<&Node> for Value {
    fn from(node: &Node) -> Self {
        match node {
            Node::Scalar(value) => Value::from(*value),
            Node::Sequence(items) => Value::Array(items.iter().map(Value::from).collect()),
            Node::Labeled(references) => Value::Object(
                references
                    .iter()
                    .map(|(name, node)| (name.to_string(), Value::from(node)))
                    .collect(),
            ),
        }
    }
}

/// Ordered mapping from reference name to nested value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct References {
    entries: Vec<(String, Node)>,
}

impl References {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. A replaced entry keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, node: Node) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = node,
            None => self.entries.push((name, node)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, node)| node)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(name, node)| (name.as_str(), node))
    }

    fn take_nodes(&mut self) -> Vec<Node> {
        self.entries.drain(..).map(|(_, node)| node).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Node)> for References {
    fn from_iter<I: IntoIterator<Item = (K, Node)>>(iter: I) -> Self {
        let mut references = References::new();
        for (name, node) in iter {
            references.insert(name, node);
        }
        references
    }
}

impl TryFrom<Value> for References {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => map
                .into_iter()
                .map(|(name, value)| Node::try_from(value).map(|node| (name, node)))
                .collect(),
            other => Err(ValidationError::NotAnObject(other.to_string())),
        }
    }
}

impl Serialize for References {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Ordered mapping from reference name to the link id built for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceMap {
    entries: Vec<(String, LinkAddress)>,
}

impl ReferenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. A replaced entry keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, id: LinkAddress) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = id,
            None => self.entries.push((name, id)),
        }
    }

    /// Merge another map into this one, replacing existing names.
    pub fn merge(&mut self, other: ReferenceMap) {
        for (name, id) in other.entries {
            self.insert(name, id);
        }
    }

    pub fn get(&self, name: &str) -> Option<LinkAddress> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, id)| *id)
    }

    /// Id of the first inserted reference.
    pub fn first(&self) -> Option<LinkAddress> {
        self.entries.first().map(|(_, id)| *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, LinkAddress)> {
        self.entries.iter().map(|(name, id)| (name.as_str(), *id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ReferenceMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_preserves_shape() {
        let node = Node::try_from(json!([[[11, 12], 13]])).unwrap();
        assert_eq!(
            node,
            Node::seq([Node::seq([Node::pair(11, 12), Node::scalar(13)])])
        );
    }

    #[test]
    fn test_from_json_keeps_object_order() {
        let refs = References::try_from(json!({ "b": [1, 2], "a": [3, 4] })).unwrap();
        let names: Vec<&str> = refs.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_from_json_rejects_unsupported_leaves() {
        assert!(matches!(
            Node::try_from(json!([1, "x"])),
            Err(ValidationError::UnsupportedValue(_))
        ));
        assert!(Node::try_from(json!(1.5)).is_err());
        assert!(Node::try_from(json!(u64::MAX)).is_err());
        assert!(matches!(
            References::try_from(json!([1, 2])),
            Err(ValidationError::NotAnObject(_))
        ));
    }

    #[test]
    fn test_from_json_accepts_negative_scalars() {
        let node = Node::try_from(json!([-1, 2])).unwrap();
        assert_eq!(node, Node::pair(-1, 2));
        assert_eq!(serde_json::to_value(&node).unwrap(), json!([-1, 2]));
    }

    #[test]
    fn test_into_items() {
        assert_eq!(Node::pair(1, 2).into_items(), Ok(vec![Node::scalar(1), Node::scalar(2)]));
        assert_eq!(Node::scalar(7).into_items(), Err(Node::scalar(7)));
    }

    #[test]
    fn test_drop_deep_tree() {
        let mut node = Node::scalar(1);
        for _ in 0..100_000 {
            node = Node::seq([node, Node::labeled([("x", Node::pair(2, 3))])]);
        }
        drop(node);
    }

    #[test]
    fn test_to_json() {
        let input = json!({ "1": [1, { "2": [5, 6] }, 3, 4] });
        let node = Node::try_from(input.clone()).unwrap();
        assert_eq!(Value::from(&node), input);
        assert_eq!(serde_json::to_value(&node).unwrap(), input);
    }

    #[test]
    fn test_reference_map_replace_keeps_position() {
        let mut map = ReferenceMap::new();
        map.insert("a", 1);
        map.insert("b", 2);

        let mut nested = ReferenceMap::new();
        nested.insert("a", 10);
        nested.insert("c", 3);
        map.merge(nested);

        let entries: Vec<(&str, LinkAddress)> = map.iter().collect();
        assert_eq!(entries, vec![("a", 10), ("b", 2), ("c", 3)]);
        assert_eq!(map.first(), Some(10));
        assert_eq!(
            serde_json::to_string(&map).unwrap(),
            r#"{"a":10,"b":2,"c":3}"#
        );
    }
}
