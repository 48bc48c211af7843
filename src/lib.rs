//! Post Press - a declarative template language for rendering blog feeds
//!
//! This library provides a parser, a record resolution engine, and an HTML
//! renderer for the Post Press template language. A page declares reusable
//! templates with named slots plus a static content tree; record data (JSON)
//! is rendered by cloning a template per record, filling its slots, and
//! mounting the results into the tree.
//!
//! # Example
//!
//! ```rust
//! use post_press::render_feed;
//!
//! let page = r#"
//!     template post-card {
//!         article {
//!             h2 { slot title }
//!         }
//!     }
//!     section post-list { }
//! "#;
//!
//! let html = render_feed(page, r#"{"posts": [{"title": "Hello"}]}"#).unwrap();
//! assert!(html.contains("Hello"));
//! ```

pub mod error;
pub mod options;
pub mod page;
pub mod parser;
pub mod record;
pub mod renderer;
pub mod resolve;

pub use error::ParseError;
pub use options::{OptionsError, RenderOptions};
pub use page::{Page, PageError, DEFAULT_MOUNT, DEFAULT_TEMPLATE};
pub use parser::{parse, Document};
pub use record::{records_from_json, Record, RecordError, Value};
pub use renderer::{render_page, HtmlConfig};
pub use resolve::{derive_preview, resolve_slots};

use thiserror::Error;

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    /// Error during parsing
    #[error("parse errors: {}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    /// Error during record ingestion
    #[error("record error: {0}")]
    Records(#[from] RecordError),

    /// Structural error during the render pass
    #[error("page error: {0}")]
    Page(#[from] PageError),
}

impl From<Vec<ParseError>> for RenderError {
    fn from(errors: Vec<ParseError>) -> Self {
        RenderError::Parse(errors)
    }
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Template to instantiate per record
    pub template: String,
    /// Element the rendered instances are mounted under
    pub mount: String,
    /// Display policies for slot resolution
    pub options: RenderOptions,
    /// HTML output configuration
    pub html: HtmlConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            mount: DEFAULT_MOUNT.to_string(),
            options: RenderOptions::default(),
            html: HtmlConfig::default(),
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the template to instantiate
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Set the mount element
    pub fn with_mount(mut self, mount: impl Into<String>) -> Self {
        self.mount = mount.into();
        self
    }

    /// Set the render options
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the HTML configuration
    pub fn with_html(mut self, html: HtmlConfig) -> Self {
        self.html = html;
        self
    }
}

/// Render a page and a record feed to HTML with default configuration
///
/// This is the main entry point for the library. It parses the page source,
/// ingests the JSON feed, renders every record through the default template,
/// and generates HTML output.
pub fn render_feed(source: &str, records_json: &str) -> Result<String, RenderError> {
    render_feed_with_config(source, records_json, RenderConfig::default())
}

/// Render a page and a record feed to HTML with custom configuration
///
/// # Example
///
/// ```rust
/// use post_press::{render_feed_with_config, HtmlConfig, RenderConfig};
///
/// let config = RenderConfig::new()
///     .with_template("entry")
///     .with_mount("feed")
///     .with_html(HtmlConfig::default().with_pretty_print(false));
///
/// let html = render_feed_with_config(
///     "template entry { p { slot title } } div feed { }",
///     r#"{"posts": [{"title": "One"}]}"#,
///     config,
/// )
/// .unwrap();
/// assert!(html.contains("One"));
/// ```
pub fn render_feed_with_config(
    source: &str,
    records_json: &str,
    config: RenderConfig,
) -> Result<String, RenderError> {
    let doc = parse(source)?;
    let records = records_from_json(records_json)?;

    let mut page = Page::new(doc);
    page.render_records(
        Some(&records),
        &config.template,
        &config.mount,
        &config.options,
    )?;

    Ok(render_page(&page, &config.html))
}
