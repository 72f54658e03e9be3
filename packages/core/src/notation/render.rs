//! Rendering nested values as Links Notation

use crate::models::{Node, References};

/// Render a sequence of nested values, wrapped in one outer pair of parens.
///
/// Each array becomes `(` + its space-joined elements + `)`, each scalar
/// its decimal form. The outer wrapping is unconditional, so a single pair
/// still gains a level: `[[5, 6]]` renders as `((5 6))`.
///
/// # Examples
///
/// ```
/// use links_core::models::Node;
/// use links_core::notation::to_links_notation;
///
/// let items = [Node::pair(1, 2), Node::pair(3, 4)];
/// assert_eq!(to_links_notation(&items), "((1 2) (3 4))");
/// ```
pub fn to_links_notation(items: &[Node]) -> String {
    wrap(items.iter().map(|item| Step::Node(item, None)))
}

/// Render a reference map with `label:` prefixes.
///
/// Every array value under a name renders as `(name: elements...)`; a nested
/// reference map contributes its entries without parens of its own; the
/// whole map is wrapped in one outer pair.
///
/// # Examples
///
/// ```
/// use links_core::models::References;
/// use links_core::notation::to_links_notation_with_refs;
/// use serde_json::json;
///
/// let refs = References::try_from(json!({ "1": [1, { "2": [5, 6] }, 3, 4] })).unwrap();
/// assert_eq!(to_links_notation_with_refs(&refs), "((1: 1 (2: 5 6) 3 4))");
/// ```
pub fn to_links_notation_with_refs(references: &References) -> String {
    wrap(entries(references))
}

/// Pending output, popped last-in first-out.
enum Step<'a> {
    Node(&'a Node, Option<&'a str>),
    Text(&'static str),
}

/// Render `steps` space-joined inside one pair of parens.
///
/// Works from an explicit stack so nesting depth is bounded by memory, not
/// by the call stack.
fn wrap<'a>(steps: impl Iterator<Item = Step<'a>>) -> String {
    let mut out = String::from("(");
    let mut stack = vec![Step::Text(")")];
    push_joined(&mut stack, steps);

    while let Some(step) = stack.pop() {
        match step {
            Step::Text(text) => out.push_str(text),
            Step::Node(node, label) => match node {
                Node::Scalar(value) => out.push_str(&value.to_string()),
                Node::Sequence(items) => {
                    out.push('(');
                    if let Some(label) = label.filter(|label| !label.is_empty()) {
                        out.push_str(label);
                        out.push_str(": ");
                    }
                    stack.push(Step::Text(")"));
                    push_joined(&mut stack, items.iter().map(|item| Step::Node(item, None)));
                }
                // entries only, no parens of its own
                Node::Labeled(references) => push_joined(&mut stack, entries(references)),
            },
        }
    }

    out
}

fn entries(references: &References) -> impl Iterator<Item = Step<'_>> {
    references
        .iter()
        .map(|(name, node)| Step::Node(node, Some(name)))
}

/// Queue `steps` so they pop in order with a single space between each.
fn push_joined<'a>(stack: &mut Vec<Step<'a>>, steps: impl Iterator<Item = Step<'a>>) {
    let steps: Vec<Step<'a>> = steps.collect();
    for (index, step) in steps.into_iter().rev().enumerate() {
        if index > 0 {
            stack.push(Step::Text(" "));
        }
        stack.push(step);
    }
}
