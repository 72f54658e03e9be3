//! Parsing Links Notation into nested values
//!
//! Single pass, no backtracking. Open groups live on an explicit stack:
//! `(` pushes a new group and `)` pops it into its parent, so nesting depth
//! is bounded only by memory. Whitespace separates tokens at every level.

use crate::models::{LinkAddress, Node};

/// Parse Links Notation into a sequence of nested values.
///
/// One outer `(`...`)` layer is stripped when the first paren closes at the
/// very end. Integer tokens (negative included) become scalars and closed
/// groups become nested sequences. Everything else (labels, words, stray
/// parens, unclosed groups) is dropped with a warning.
///
/// # Examples
///
/// ```
/// use links_core::models::Node;
/// use links_core::notation::parse_links_notation;
///
/// assert_eq!(
///     parse_links_notation("((1 2) (3 4))"),
///     vec![Node::pair(1, 2), Node::pair(3, 4)]
/// );
/// assert_eq!(
///     parse_links_notation("(-1 2 3)"),
///     vec![Node::scalar(-1), Node::scalar(2), Node::scalar(3)]
/// );
/// ```
pub fn parse_links_notation(notation: &str) -> Vec<Node> {
    let body = strip_outer_parens(notation.trim());

    let mut result = Vec::new();
    let mut groups: Vec<Vec<Node>> = Vec::new();
    let mut current = String::new();

    for c in body.chars() {
        match c {
            '(' => {
                // text glued to a group, e.g. `a(1 2)`, is its own token
                flush_token(&mut current, groups.last_mut().unwrap_or(&mut result));
                groups.push(Vec::new());
            }
            ')' => match groups.pop() {
                Some(mut items) => {
                    flush_token(&mut current, &mut items);
                    groups
                        .last_mut()
                        .unwrap_or(&mut result)
                        .push(Node::Sequence(items));
                }
                None => tracing::warn!("Skipping unbalanced ')' in links notation: {}", notation),
            },
            c if c.is_whitespace() => {
                flush_token(&mut current, groups.last_mut().unwrap_or(&mut result))
            }
            c => current.push(c),
        }
    }

    if groups.is_empty() {
        flush_token(&mut current, &mut result);
    } else {
        tracing::warn!(
            "Skipping {} unclosed group(s) in links notation: {}",
            groups.len(),
            notation
        );
    }

    result
}

/// Drop one layer of parens if the opening paren at the start closes at the
/// end; `(1 2) (3 4)` is left alone.
fn strip_outer_parens(notation: &str) -> &str {
    if !notation.starts_with('(') || !notation.ends_with(')') {
        return notation;
    }

    let mut depth: usize = 0;
    for (index, c) in notation.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return if index == notation.len() - 1 {
                        notation[1..index].trim()
                    } else {
                        notation
                    };
                }
            }
            _ => {}
        }
    }

    notation
}

fn flush_token(current: &mut String, result: &mut Vec<Node>) {
    let token = current.trim();
    if !token.is_empty() {
        match token.parse::<LinkAddress>() {
            Ok(value) => result.push(Node::Scalar(value)),
            Err(_) => tracing::warn!("Skipping non-numeric token in links notation: {}", token),
        }
    }
    current.clear();
}
