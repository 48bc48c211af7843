//! HTML generation from a resolved page

use crate::page::Page;
use crate::parser::ast::{ElementDecl, Node, Spanned, Statement};

use super::HtmlConfig;

/// Build HTML output incrementally
pub struct HtmlBuilder {
    config: HtmlConfig,
    output: String,
    indent: usize,
}

impl HtmlBuilder {
    /// Create a new HTML builder
    pub fn new(config: HtmlConfig) -> Self {
        Self {
            config,
            output: String::new(),
            indent: 0,
        }
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &'static str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    fn push_line(&mut self, line: &str) {
        self.output.push_str(&self.indent_str());
        self.output.push_str(line);
        self.output.push_str(self.newline());
    }

    /// Add a content node and its subtree
    pub fn add_node(&mut self, node: &Node) {
        match node {
            Node::Element(el) => self.add_element(el),
            Node::Text(text) => self.push_line(&escape(text)),
            Node::Slot(slot) => {
                // A slot surviving to render time is an unresolved placeholder
                if self.config.unresolved_comments {
                    self.push_line(&format!(
                        "<!-- unresolved slot: {} -->",
                        escape(slot.name.node.as_str())
                    ));
                }
            }
        }
    }

    fn add_element(&mut self, el: &ElementDecl) {
        let tag = el.tag.node.as_str();
        let id_attr = el
            .name
            .as_ref()
            .map(|n| format!(r#" id="{}""#, escape(n.node.as_str())))
            .unwrap_or_default();

        if el.children.is_empty() {
            self.push_line(&format!("<{}{}></{}>", tag, id_attr, tag));
            return;
        }
        self.push_line(&format!("<{}{}>", tag, id_attr));
        self.indent += 1;
        for child in &el.children {
            self.add_node(&child.node);
        }
        self.indent -= 1;
        self.push_line(&format!("</{}>", tag));
    }

    /// Generate the final HTML string
    pub fn build(self) -> String {
        self.output
    }
}

/// Render a node sequence to an HTML string
pub fn render_html(nodes: &[Spanned<Node>], config: &HtmlConfig) -> String {
    let mut builder = HtmlBuilder::new(config.clone());
    for node in nodes {
        builder.add_node(&node.node);
    }
    builder.build()
}

/// Render a page's content tree to an HTML string.
///
/// Template declarations are definitions, not content; only top-level content
/// nodes appear in the output.
pub fn render_page(page: &Page, config: &HtmlConfig) -> String {
    let mut builder = HtmlBuilder::new(config.clone());
    for stmt in &page.document().statements {
        if let Statement::Node(node) = &stmt.node {
            builder.add_node(node);
        }
    }
    builder.build()
}

/// Escape text for safe inclusion in HTML content and attributes
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
