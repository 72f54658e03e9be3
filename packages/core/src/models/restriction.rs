//! Restrictions and Substitutions
//!
//! A restriction selects links by position. The number of positions decides
//! what is compared, never a field name:
//!
//! | values              | compares                 |
//! |---------------------|--------------------------|
//! | `[]`                | nothing, matches all     |
//! | `[id]`              | id                       |
//! | `[source, target]`  | source and target        |
//! | `[id, source, target, ..]` | all three         |
//!
//! Any position holding [`ANY`] is unconstrained.

use super::link::{Link, LinkAddress, ANY};
use std::fmt;

/// Positional link filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Restriction {
    /// Empty or absent restriction
    #[default]
    All,
    Id(LinkAddress),
    SourceTarget {
        source: LinkAddress,
        target: LinkAddress,
    },
    Full {
        id: LinkAddress,
        source: LinkAddress,
        target: LinkAddress,
    },
}

#[inline]
fn position_matches(expected: LinkAddress, actual: LinkAddress) -> bool {
    expected == ANY || expected == actual
}

impl Restriction {
    /// Interpret a positional list. Values past the third are ignored.
    pub fn from_values(values: &[LinkAddress]) -> Self {
        match *values {
            [] => Restriction::All,
            [id] => Restriction::Id(id),
            [source, target] => Restriction::SourceTarget { source, target },
            [id, source, target, ..] => Restriction::Full { id, source, target },
        }
    }

    pub fn by_id(id: LinkAddress) -> Self {
        Restriction::Full {
            id,
            source: ANY,
            target: ANY,
        }
    }

    /// True for the empty restriction, which update and delete refuse.
    pub fn is_empty(&self) -> bool {
        matches!(self, Restriction::All)
    }

    /// Conjunction of every present position.
    pub fn matches(&self, link: &Link) -> bool {
        match *self {
            Restriction::All => true,
            Restriction::Id(id) => position_matches(id, link.id),
            Restriction::SourceTarget { source, target } => {
                position_matches(source, link.source) && position_matches(target, link.target)
            }
            Restriction::Full { id, source, target } => {
                position_matches(id, link.id)
                    && position_matches(source, link.source)
                    && position_matches(target, link.target)
            }
        }
    }

    /// Matching links in the order they were given.
    pub fn filter<'a>(&'a self, links: &'a [Link]) -> impl Iterator<Item = &'a Link> + 'a {
        links.iter().filter(move |link| self.matches(link))
    }
}

impl fmt::Display for Restriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Restriction::All => write!(f, "[]"),
            Restriction::Id(id) => write!(f, "[{}]", id),
            Restriction::SourceTarget { source, target } => write!(f, "[{}, {}]", source, target),
            Restriction::Full { id, source, target } => {
                write!(f, "[{}, {}, {}]", id, source, target)
            }
        }
    }
}

impl From<&[LinkAddress]> for Restriction {
    fn from(values: &[LinkAddress]) -> Self {
        Restriction::from_values(values)
    }
}

impl<const N: usize> From<[LinkAddress; N]> for Restriction {
    fn from(values: [LinkAddress; N]) -> Self {
        Restriction::from_values(&values)
    }
}

impl From<Vec<LinkAddress>> for Restriction {
    fn from(values: Vec<LinkAddress>) -> Self {
        Restriction::from_values(&values)
    }
}

impl From<Option<Vec<LinkAddress>>> for Restriction {
    fn from(values: Option<Vec<LinkAddress>>) -> Self {
        values.map(Restriction::from).unwrap_or_default()
    }
}

/// Replacement `(source, target)` for create and update.
///
/// Built from `[source, target]` or `[id, source, target]`; the id slot is
/// ignored because ids belong to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Substitution {
    pub source: LinkAddress,
    pub target: LinkAddress,
}

impl Substitution {
    pub fn new(source: LinkAddress, target: LinkAddress) -> Self {
        Self { source, target }
    }

    /// Returns `None` when fewer than two values are given.
    pub fn from_values(values: &[LinkAddress]) -> Option<Self> {
        match *values {
            [source, target] => Some(Self::new(source, target)),
            [_, source, target, ..] => Some(Self::new(source, target)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_follows_length() {
        assert_eq!(Restriction::from_values(&[]), Restriction::All);
        assert_eq!(Restriction::from_values(&[4]), Restriction::Id(4));
        assert_eq!(
            Restriction::from_values(&[1, 2]),
            Restriction::SourceTarget {
                source: 1,
                target: 2
            }
        );
        assert_eq!(
            Restriction::from_values(&[3, 1, 2, 99]),
            Restriction::Full {
                id: 3,
                source: 1,
                target: 2
            }
        );
    }

    #[test]
    fn test_wildcards() {
        let link = Link::new(5, 10, 20);
        assert!(Restriction::from([0]).matches(&link));
        assert!(Restriction::from([5]).matches(&link));
        assert!(!Restriction::from([6]).matches(&link));
        assert!(Restriction::from([10, 0]).matches(&link));
        assert!(Restriction::from([0, 20]).matches(&link));
        assert!(!Restriction::from([10, 21]).matches(&link));
        assert!(Restriction::by_id(5).matches(&link));
        assert!(!Restriction::from([5, 11, 0]).matches(&link));
    }

    #[test]
    fn test_absent_restriction_is_empty() {
        assert!(Restriction::from(None).is_empty());
        assert!(Restriction::from(Vec::new()).is_empty());
        assert!(!Restriction::from([0]).is_empty());
    }

    #[test]
    fn test_substitution_ignores_id_slot() {
        assert_eq!(Substitution::from_values(&[1]), None);
        assert_eq!(Substitution::from_values(&[]), None);
        assert_eq!(
            Substitution::from_values(&[1, 2]),
            Some(Substitution::new(1, 2))
        );
        assert_eq!(
            Substitution::from_values(&[9, 1, 2]),
            Some(Substitution::new(1, 2))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Restriction::All.to_string(), "[]");
        assert_eq!(Restriction::by_id(7).to_string(), "[7, 0, 0]");
    }
}
