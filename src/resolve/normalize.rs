//! Value normalization - recursive resolution of raw values into renderable
//! content
//!
//! This is the heart of the rendering core: one raw value of unknown shape
//! goes in, renderable content (or an observable failure) comes out. The
//! dispatch is an explicit match over the [`Value`] variants rather than any
//! runtime type inspection, and a failure anywhere inside a composite value
//! poisons the whole result.

use thiserror::Error;
use tracing::warn;

use crate::options::RenderOptions;
use crate::parser::ast::{ElementDecl, Identifier, Node, Span, Spanned};
use crate::record::{json_kind, Value};

/// Context threaded through normalization, handed to value producers
pub struct ResolveContext<'a> {
    /// The template instance currently being populated
    pub instance: &'a [Spanned<Node>],
    /// Record field the value was drawn from, if it came from a direct lookup
    pub field: Option<&'a str>,
    /// Display policies (the opt-in date hook)
    pub options: &'a RenderOptions,
    /// Span of the slot being filled; fabricated nodes inherit it
    pub span: Span,
}

/// Why a value could not be normalized
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The value is neither text, a producer, pre-built content, nor a
    /// sequence
    #[error("unsupported value shape ({kind})")]
    UnsupportedShape { kind: String },

    /// An empty sequence carries nothing to render
    #[error("empty sequence cannot fill a slot")]
    EmptySequence,

    /// One poisoned element invalidates the entire composite
    #[error("sequence element {index} is unresolvable: {source}")]
    BadElement {
        index: usize,
        #[source]
        source: Box<ResolveError>,
    },
}

/// The outcome of successful normalization
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// Plain text, inserted as a text node
    Text(String),
    /// Ordered paragraph units, spliced in place of the slot
    Fragment(Vec<Spanned<Node>>),
    /// Pre-built content, inserted unchanged
    Node(Node),
}

/// Normalize one raw value into renderable content.
///
/// Producers are invoked with the context and their result normalized
/// recursively; depth is unbounded and the caller must not construct cycles.
/// Failure paths log the offending value and never mutate the input.
pub fn normalize(value: &Value, ctx: &ResolveContext<'_>) -> Result<Resolved, ResolveError> {
    match value {
        Value::Producer(produce) => normalize(&produce(ctx), ctx),
        Value::Text(text) => Ok(Resolved::Text(apply_date_hook(text, ctx))),
        Value::Node(node) => Ok(Resolved::Node(node.clone())),
        Value::Opaque(raw) => {
            warn!(value = %raw, "cannot resolve value of unsupported shape");
            Err(ResolveError::UnsupportedShape {
                kind: json_kind(raw).to_string(),
            })
        }
        Value::List(items) => {
            if items.is_empty() {
                warn!("empty sequence supplied as slot value");
                return Err(ResolveError::EmptySequence);
            }
            let mut units = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                let resolved = normalize(item, ctx).map_err(|source| ResolveError::BadElement {
                    index,
                    source: Box::new(source),
                })?;
                units.push(paragraph_unit(resolved, ctx.span.clone()));
            }
            Ok(Resolved::Fragment(units))
        }
    }
}

/// Wrap one normalized element in its own paragraph unit.
///
/// Text becomes the unit's text content; composite and pre-built content is
/// nested inside the unit.
fn paragraph_unit(resolved: Resolved, span: Span) -> Spanned<Node> {
    let children = match resolved {
        Resolved::Text(text) => vec![Spanned::new(Node::Text(text), span.clone())],
        Resolved::Fragment(nodes) => nodes,
        Resolved::Node(node) => vec![Spanned::new(node, span.clone())],
    };
    Spanned::new(
        Node::Element(ElementDecl {
            tag: Spanned::new(Identifier::new("p"), span.clone()),
            name: None,
            children,
        }),
        span,
    )
}

/// Opt-in date display: only fields listed in the render options are ever
/// parsed, and a string that is not an ISO date passes through unchanged.
fn apply_date_hook(text: &str, ctx: &ResolveContext<'_>) -> String {
    let Some(field) = ctx.field else {
        return text.to_string();
    };
    if !ctx.options.is_date_field(field) {
        return text.to_string();
    }
    match chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        Ok(date) => date.format(&ctx.options.date_format).to_string(),
        Err(_) => text.to_string(),
    }
}
