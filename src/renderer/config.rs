//! Configuration for HTML rendering

/// Configuration options for HTML output
#[derive(Debug, Clone)]
pub struct HtmlConfig {
    /// Whether to format output with indentation
    pub pretty_print: bool,

    /// Whether unresolved slots are emitted as HTML comments; when disabled
    /// they are omitted entirely
    pub unresolved_comments: bool,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            pretty_print: true,
            unresolved_comments: true,
        }
    }
}

impl HtmlConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Set whether unresolved slots leave a comment in the output
    pub fn with_unresolved_comments(mut self, comments: bool) -> Self {
        self.unresolved_comments = comments;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HtmlConfig::default();
        assert!(config.pretty_print);
        assert!(config.unresolved_comments);
    }

    #[test]
    fn test_builder_pattern() {
        let config = HtmlConfig::new()
            .with_pretty_print(false)
            .with_unresolved_comments(false);

        assert!(!config.pretty_print);
        assert!(!config.unresolved_comments);
    }
}
