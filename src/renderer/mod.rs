//! HTML renderer for generating output from a resolved page
//!
//! This module takes a page whose slots have been resolved and produces an
//! HTML string.

pub mod config;
pub mod html;

pub use config::HtmlConfig;
pub use html::{render_html, render_page};
