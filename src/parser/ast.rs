//! Abstract Syntax Tree types for the PTL page language

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// AST node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Valid identifier (alphanumeric, underscore, hyphen; starts with letter/_)
///
/// Hyphens are part of identifiers so that derived slot names like
/// `body-preview` lex as a single token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(pub String);

impl Identifier {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Root AST node - a complete page document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub statements: Vec<Spanned<Statement>>,
}

/// Top-level statement in a document
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Template declaration: `template post-card { ... }`
    Template(TemplateDecl),
    /// A structural node rendered as-is (elements, literal text)
    Node(Node),
}

/// A named, reusable structural skeleton cloned once per record
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateDecl {
    pub name: Spanned<Identifier>,
    pub body: Vec<Spanned<Node>>,
}

/// A node in the page tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Container element: `div meta { ... }`
    Element(ElementDecl),
    /// Named placeholder: `slot title [preserve]`
    Slot(SlotDecl),
    /// Literal text content: `text "Read more"`
    Text(String),
}

/// Element declaration with a tag, an optional name (used as the element id
/// and for mount lookup), and child nodes
#[derive(Debug, Clone, PartialEq)]
pub struct ElementDecl {
    pub tag: Spanned<Identifier>,
    pub name: Option<Spanned<Identifier>>,
    pub children: Vec<Spanned<Node>>,
}

/// Placeholder declaration
///
/// A slot named `<base>-preview` is a derived placeholder: when the record has
/// no field of that exact name, its value is computed from field `<base>`.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotDecl {
    pub name: Spanned<Identifier>,
    /// When set, multi-line text values are inserted verbatim instead of
    /// being split into one paragraph per line
    pub preserve_whitespace: bool,
}
