//! Links Notation
//!
//! Parenthesized, space-separated text for nested link structures:
//!
//! - `[[1, 2], [3, 4]]` <-> `((1 2) (3 4))`
//! - `{ "1": [1, { "2": [5, 6] }, 3, 4] }` -> `((1: 1 (2: 5 6) 3 4))`
//!
//! Rendering and parsing are pure; building links from nested values lives
//! in [`RecursiveLinks`](crate::services::RecursiveLinks).
//!
//! For any nested value made only of scalars and sequences,
//! `parse_links_notation(&to_links_notation(x)) == x`. Labels are not read
//! back: the parser drops them like any other non-numeric token.

mod parser;
mod render;

pub use parser::parse_links_notation;
pub use render::{to_links_notation, to_links_notation_with_refs};
