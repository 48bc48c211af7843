//! Slot discovery and substitution
//!
//! Discovers every placeholder in a template instance in stable depth-first
//! order, decides what value feeds it (direct field lookup or the `-preview`
//! derivation), and replaces it in place. Failures are isolated per slot: a
//! slot that cannot be filled stays in the tree and is logged, and its
//! siblings resolve normally.

use tracing::warn;

use crate::options::RenderOptions;
use crate::parser::ast::{Node, Span, Spanned};
use crate::record::{Record, Value};

use super::normalize::{normalize, ResolveContext, Resolved};
use super::preview::derive_preview;

/// Suffix marking a derived placeholder over field `<base>`
const PREVIEW_SUFFIX: &str = "-preview";

/// Child-index path from the instance root to a slot node
type NodePath = Vec<usize>;

struct DiscoveredSlot {
    path: NodePath,
    name: String,
    preserve_whitespace: bool,
    span: Span,
}

/// Resolve every slot in a template instance against one record.
///
/// Each discovered slot is replaced exactly once on success; on failure the
/// slot node is left in place as a visible degraded state. The instance is
/// mutated in place.
pub fn resolve_slots(instance: &mut Vec<Spanned<Node>>, record: &Record, options: &RenderOptions) {
    let slots = discover_slots(instance);
    let mut replacements: Vec<(NodePath, Vec<Spanned<Node>>)> = Vec::new();

    for slot in &slots {
        let Some((field, candidate)) = candidate_value(record, &slot.name) else {
            continue;
        };

        // Unless whitespace is preserved, a text candidate is split into one
        // line per paragraph before normalization; the split sequence then
        // flows through the normalizer's list branch.
        let candidate = if slot.preserve_whitespace {
            candidate
        } else {
            split_lines(candidate)
        };

        let ctx = ResolveContext {
            instance: &instance[..],
            field,
            options,
            span: slot.span.clone(),
        };
        match normalize(&candidate, &ctx) {
            Ok(resolved) => {
                replacements.push((slot.path.clone(), replacement_nodes(resolved, &slot.span)));
            }
            Err(err) => {
                warn!(
                    slot = %slot.name,
                    record = ?record,
                    kind = candidate.kind(),
                    error = %err,
                    "slot value is unresolvable; placeholder left in place"
                );
            }
        }
    }

    // Apply in reverse discovery order so a fragment splicing extra siblings
    // never shifts a path that is still pending.
    for (path, nodes) in replacements.into_iter().rev() {
        splice(instance, &path, nodes);
    }
}

/// Depth-first placeholder discovery; order is stable and deterministic
fn discover_slots(nodes: &[Spanned<Node>]) -> Vec<DiscoveredSlot> {
    let mut found = Vec::new();
    let mut path = Vec::new();
    walk(nodes, &mut path, &mut found);
    found
}

fn walk(nodes: &[Spanned<Node>], path: &mut NodePath, found: &mut Vec<DiscoveredSlot>) {
    for (index, node) in nodes.iter().enumerate() {
        path.push(index);
        match &node.node {
            Node::Slot(slot) => found.push(DiscoveredSlot {
                path: path.clone(),
                name: slot.name.node.0.clone(),
                preserve_whitespace: slot.preserve_whitespace,
                span: node.span.clone(),
            }),
            Node::Element(el) => walk(&el.children, path, found),
            Node::Text(_) => {}
        }
        path.pop();
    }
}

/// Decide the candidate raw value for a slot: direct lookup first, then the
/// `-preview` derivation. Returns the source field (for the date hook) and
/// the value, or logs and returns None when the slot cannot be fed.
fn candidate_value<'a>(record: &'a Record, name: &'a str) -> Option<(Option<&'a str>, Value)> {
    if let Some(value) = record.get(name) {
        return Some((Some(name), value.clone()));
    }

    let Some(base) = name.strip_suffix(PREVIEW_SUFFIX) else {
        warn!(slot = %name, "record has no field for slot");
        return None;
    };
    match record.get(base) {
        // Derived text never goes through the date hook, hence field = None
        Some(Value::Text(text)) => Some((None, Value::Text(derive_preview(text).into_owned()))),
        Some(other) => {
            warn!(
                slot = %name,
                base = %base,
                kind = other.kind(),
                "preview source field is not text"
            );
            None
        }
        None => {
            warn!(
                slot = %name,
                base = %base,
                "record has neither slot field nor preview source"
            );
            None
        }
    }
}

/// Split a text candidate on newline boundaries into a list of line strings
fn split_lines(value: Value) -> Value {
    match value {
        Value::Text(text) => Value::List(
            text.split('\n')
                .map(|line| Value::Text(line.to_string()))
                .collect(),
        ),
        other => other,
    }
}

/// The nodes that take the slot's place in the tree
fn replacement_nodes(resolved: Resolved, span: &Span) -> Vec<Spanned<Node>> {
    match resolved {
        Resolved::Text(text) => vec![Spanned::new(Node::Text(text), span.clone())],
        Resolved::Node(node) => vec![Spanned::new(node, span.clone())],
        Resolved::Fragment(nodes) => nodes,
    }
}

/// Replace the node at `path` with `replacement`, splicing fragments into the
/// parent's child list
fn splice(nodes: &mut Vec<Spanned<Node>>, path: &[usize], replacement: Vec<Spanned<Node>>) {
    match path {
        [index] => {
            nodes.splice(*index..*index + 1, replacement);
        }
        [index, rest @ ..] => {
            if let Node::Element(el) = &mut nodes[*index].node {
                splice(&mut el.children, rest, replacement);
            }
        }
        [] => {}
    }
}
