//! Page model and the record rendering pass
//!
//! A page owns a parsed document and drives the batch pass: for each record,
//! clone the named template's body, resolve its slots, and append the filled
//! instance under the mount element. Structural problems (no record set, no
//! such template, no such mount) abort the pass before any cloning happens;
//! per-record value problems do not.

use thiserror::Error;
use tracing::{debug, error};

use crate::options::RenderOptions;
use crate::parser::ast::{Document, ElementDecl, Node, Spanned, Statement, TemplateDecl};
use crate::record::Record;
use crate::resolve::resolve_slots;

/// Template looked up when the caller names none
pub const DEFAULT_TEMPLATE: &str = "post-card";

/// Mount element looked up when the caller names none
pub const DEFAULT_MOUNT: &str = "post-list";

#[derive(Error, Debug)]
pub enum PageError {
    #[error("no template named '{name}' in document")]
    TemplateMissing { name: String },

    #[error("no mount element named '{name}' in document")]
    MountMissing { name: String },

    #[error("no record set supplied")]
    NoRecords,
}

/// A parsed page: template declarations plus the static content tree
#[derive(Debug, Clone)]
pub struct Page {
    doc: Document,
}

impl Page {
    pub fn new(doc: Document) -> Self {
        Self { doc }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Look up a template declaration by name
    pub fn template(&self, name: &str) -> Option<&TemplateDecl> {
        self.doc.statements.iter().find_map(|stmt| match &stmt.node {
            Statement::Template(t) if t.name.node.as_str() == name => Some(t),
            _ => None,
        })
    }

    /// Find the named mount element in the static content tree
    pub fn find_mount(&self, name: &str) -> Option<&ElementDecl> {
        self.doc.statements.iter().find_map(|stmt| match &stmt.node {
            Statement::Node(node) => find_element(node, name),
            _ => None,
        })
    }

    fn mount_mut(&mut self, name: &str) -> Option<&mut ElementDecl> {
        self.doc
            .statements
            .iter_mut()
            .find_map(|stmt| match &mut stmt.node {
                Statement::Node(node) => find_element_mut(node, name),
                _ => None,
            })
    }

    /// Render a batch of records into the page.
    ///
    /// `records` is the whole record set or nothing at all; an absent set is
    /// a hard failure, while an empty set renders zero instances and
    /// succeeds. Structural checks run before any instance is cloned, so a
    /// failed pass leaves the page untouched.
    pub fn render_records(
        &mut self,
        records: Option<&[Record]>,
        template: &str,
        mount: &str,
        options: &RenderOptions,
    ) -> Result<(), PageError> {
        let Some(records) = records else {
            error!("record set is absent; nothing to render");
            return Err(PageError::NoRecords);
        };

        let Some(decl) = self.template(template) else {
            error!(template = %template, "template not found in document");
            return Err(PageError::TemplateMissing {
                name: template.to_string(),
            });
        };
        let body = decl.body.clone();

        if self.find_mount(mount).is_none() {
            error!(mount = %mount, "mount element not found in document");
            return Err(PageError::MountMissing {
                name: mount.to_string(),
            });
        }

        let mut rendered: Vec<Spanned<Node>> = Vec::new();
        for record in records {
            let mut instance = body.clone();
            resolve_slots(&mut instance, record, options);
            rendered.extend(instance);
        }

        debug!(
            records = records.len(),
            template = %template,
            mount = %mount,
            "rendered record batch"
        );

        // Verified present above; re-looked up because the first borrow was
        // immutable.
        if let Some(mount_el) = self.mount_mut(mount) {
            mount_el.children.extend(rendered);
        }
        Ok(())
    }
}

fn find_element<'a>(node: &'a Node, name: &str) -> Option<&'a ElementDecl> {
    match node {
        Node::Element(el) => {
            if el.name.as_ref().is_some_and(|n| n.node.as_str() == name) {
                return Some(el);
            }
            el.children
                .iter()
                .find_map(|child| find_element(&child.node, name))
        }
        _ => None,
    }
}

fn find_element_mut<'a>(node: &'a mut Node, name: &str) -> Option<&'a mut ElementDecl> {
    match node {
        Node::Element(el) => {
            if el.name.as_ref().is_some_and(|n| n.node.as_str() == name) {
                return Some(el);
            }
            el.children
                .iter_mut()
                .find_map(|child| find_element_mut(&mut child.node, name))
        }
        _ => None,
    }
}
