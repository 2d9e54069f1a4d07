//! Parsing options and configuration.

use pulldown_cmark::Options;

/// Options for the markdown front end.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Read a leading block of `%` lines as the document's front matter
    pub title_block: bool,

    /// Enable pipe tables
    pub tables: bool,

    /// Enable `~~strikethrough~~` (the renderer rejects it)
    pub strikethrough: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable title block detection.
    pub fn with_title_block(mut self, enabled: bool) -> Self {
        self.title_block = enabled;
        self
    }

    /// Enable or disable tables.
    pub fn with_tables(mut self, enabled: bool) -> Self {
        self.tables = enabled;
        self
    }

    /// Enable or disable strikethrough.
    pub fn with_strikethrough(mut self, enabled: bool) -> Self {
        self.strikethrough = enabled;
        self
    }

    pub(crate) fn cmark_options(&self) -> Options {
        let mut options = Options::empty();
        if self.tables {
            options.insert(Options::ENABLE_TABLES);
        }
        if self.strikethrough {
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }
        options
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            title_block: true,
            tables: true,
            strikethrough: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert!(options.title_block);
        assert!(options.cmark_options().contains(Options::ENABLE_TABLES));
        assert!(options.cmark_options().contains(Options::ENABLE_STRIKETHROUGH));
    }

    #[test]
    fn test_builder() {
        let options = ParseOptions::new()
            .with_title_block(false)
            .with_tables(false)
            .with_strikethrough(false);
        assert!(!options.title_block);
        assert!(options.cmark_options().is_empty());
    }
}
