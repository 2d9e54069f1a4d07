//! Rendering options and configuration.

/// Options for rendering a document tree to ms macros.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Text written before the first node (macro definitions, `.nr` setup)
    pub preamble: Option<String>,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document preamble.
    pub fn with_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = Some(preamble.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_have_no_preamble() {
        assert!(RenderOptions::default().preamble.is_none());
    }

    #[test]
    fn test_with_preamble() {
        let options = RenderOptions::new().with_preamble(".nr PS 11\n");
        assert_eq!(options.preamble.as_deref(), Some(".nr PS 11\n"));
    }
}
