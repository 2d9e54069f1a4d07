//! Rendering module for converting document trees to ms macro source.

mod options;
pub mod troff;
pub mod walk;

pub use options::RenderOptions;
pub use troff::TroffRenderer;
pub use walk::{walk, WalkStatus};

use std::io::Write;

use crate::error::{Error, Result};
use crate::model::Node;

/// A renderer driven by enter/exit visits of a document tree.
pub trait NodeRenderer {
    /// Write anything that precedes the body of the document.
    fn render_header(&mut self, w: &mut dyn Write, doc: &Node) -> Result<()>;

    /// Render one visit of `node`. Called once for leaf nodes and twice for
    /// containers (`entering` true, then false).
    fn render_node(&mut self, w: &mut dyn Write, node: &Node, entering: bool) -> Result<WalkStatus>;

    /// Write anything that follows the body of the document.
    fn render_footer(&mut self, w: &mut dyn Write, doc: &Node) -> Result<()>;
}

/// Run `renderer` over `doc` and collect its output.
///
/// Either the whole document renders or an error is returned; no partial
/// output escapes.
pub fn run<R: NodeRenderer + ?Sized>(doc: &Node, renderer: &mut R) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    renderer.render_header(&mut out, doc)?;
    walk(doc, &mut |node: &Node, entering: bool| {
        renderer.render_node(&mut out, node, entering)
    })?;
    renderer.render_footer(&mut out, doc)?;
    Ok(out)
}

/// Render a document tree to ms macro source.
pub fn to_troff(doc: &Node, options: &RenderOptions) -> Result<String> {
    let mut renderer = TroffRenderer::with_options(options.clone());
    let out = run(doc, &mut renderer)?;
    log::debug!("Rendered {} bytes of ms source", out.len());
    String::from_utf8(out).map_err(|e| Error::Other(format!("output is not UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeKind;

    struct Recorder(Vec<String>);

    impl NodeRenderer for Recorder {
        fn render_header(&mut self, w: &mut dyn Write, _doc: &Node) -> Result<()> {
            w.write_all(b"<")?;
            Ok(())
        }

        fn render_node(&mut self, _w: &mut dyn Write, node: &Node, entering: bool) -> Result<WalkStatus> {
            self.0.push(format!("{}:{}", node.kind, entering));
            Ok(WalkStatus::GoToNext)
        }

        fn render_footer(&mut self, w: &mut dyn Write, _doc: &Node) -> Result<()> {
            w.write_all(b">")?;
            Ok(())
        }
    }

    #[test]
    fn test_run_calls_hooks_in_order() {
        let doc = Node::with_children(NodeKind::Document, vec![Node::text("x")]);
        let mut recorder = Recorder(Vec::new());
        let out = run(&doc, &mut recorder).unwrap();
        assert_eq!(out, b"<>");
        assert_eq!(recorder.0, vec!["document:true", "text:true", "document:false"]);
    }

    #[test]
    fn test_to_troff() {
        let doc = Node::with_children(
            NodeKind::Document,
            vec![Node::with_children(NodeKind::Paragraph, vec![Node::text("hi")])],
        );
        let out = to_troff(&doc, &RenderOptions::default()).unwrap();
        assert_eq!(out, "\nhi\n.SG\n");
    }
}
