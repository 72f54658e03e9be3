//! Data Models
//!
//! This module contains the data structures shared by the store, the flat
//! algebra and the notation codec:
//!
//! - `Link` - the `(id, source, target)` triple
//! - `Restriction` / `Substitution` - positional query and replacement payloads
//! - `LinkChange` - observer record for mutations
//! - `Node` - nested values handled by the codec

mod link;
mod node;
mod restriction;

pub use link::{Flow, Link, LinkAddress, LinkChange, LinkConstants, ANY};
pub use node::{Node, ReferenceMap, References, ValidationError};
pub use restriction::{Restriction, Substitution};
