//! Link Data Structures
//!
//! A link is the atomic unit of the associative model: a triple of
//! `(id, source, target)`. Ids are assigned by the store on creation and are
//! never reused. `source` and `target` may be rewritten by an update, which
//! keeps the id.
//!
//! # Examples
//!
//! ```rust
//! use links_core::models::{Link, LinkChange};
//!
//! let link = Link::new(1, 10, 20);
//! let change = LinkChange::created(link);
//! assert_eq!(change.kind(), "link:created");
//! ```

use serde::{Deserialize, Serialize};

/// Address of a link, or of any value a link may point at.
///
/// Signed: sources and targets are plain integers and may be negative. Ids
/// handed out by stores are always positive.
pub type LinkAddress = i64;

/// Wildcard used in restrictions: matches any value at its position.
pub const ANY: LinkAddress = 0;

/// A stored `(id, source, target)` triple.
///
/// Values of this type are transient copies of what the store returned;
/// they are never cached across calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub id: LinkAddress,
    pub source: LinkAddress,
    pub target: LinkAddress,
}

impl Link {
    pub fn new(id: LinkAddress, source: LinkAddress, target: LinkAddress) -> Self {
        Self { id, source, target }
    }
}

/// Iteration control returned by `each` handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    /// Keep visiting matching links
    Continue,
    /// Stop immediately
    Break,
}

/// Constants exposed by a links instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkConstants;

impl LinkConstants {
    pub const ANY: LinkAddress = ANY;
    pub const CONTINUE: Flow = Flow::Continue;
    pub const BREAK: Flow = Flow::Break;
}

/// Change record handed to observers after a mutation.
///
/// - create: `before` is `None`
/// - update: both present
/// - delete: `after` is `None`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkChange {
    pub before: Option<Link>,
    pub after: Option<Link>,
}

impl LinkChange {
    pub fn created(after: Link) -> Self {
        Self {
            before: None,
            after: Some(after),
        }
    }

    pub fn updated(before: Link, after: Link) -> Self {
        Self {
            before: Some(before),
            after: Some(after),
        }
    }

    pub fn deleted(before: Link) -> Self {
        Self {
            before: Some(before),
            after: None,
        }
    }

    /// String form of the change, useful for logging.
    pub fn kind(&self) -> &'static str {
        match (&self.before, &self.after) {
            (None, Some(_)) => "link:created",
            (Some(_), Some(_)) => "link:updated",
            (Some(_), None) => "link:deleted",
            (None, None) => "link:none",
        }
    }
}
