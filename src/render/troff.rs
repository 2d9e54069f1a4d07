//! The ms renderer.
//!
//! `TroffRenderer` is a small state machine driven by enter/exit visits of
//! the document tree. Its state lives on the instance, so independent
//! documents can be rendered concurrently with one renderer each.

use std::io::Write;

use crate::error::{Error, Result};
use crate::model::{HeadingData, ListData, Node, NodeKind, TitleBlock};
use crate::ms::emit;

use super::{NodeRenderer, RenderOptions, WalkStatus};

/// Renders a document tree to ms macro source.
#[derive(Debug, Default)]
pub struct TroffRenderer {
    options: RenderOptions,
    /// Set only until the text under the front matter heading is read
    consuming_front_matter: bool,
    title: Option<TitleBlock>,
    /// One item counter per open list, outermost first
    list: Vec<u32>,
    /// Present strictly between a table's enter and exit
    table: Option<Vec<u8>>,
}

impl TroffRenderer {
    /// Create a renderer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with the given options.
    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// The title block read from the front matter, if any.
    pub fn title_block(&self) -> Option<&TitleBlock> {
        self.title.as_ref()
    }

    /// Take the title block out of a finished renderer.
    pub fn into_title_block(self) -> Option<TitleBlock> {
        self.title
    }

    /// Number of lists currently open.
    pub fn list_depth(&self) -> usize {
        self.list.len()
    }

    fn text(&mut self, w: &mut dyn Write, node: &Node) -> Result<()> {
        if self.consuming_front_matter {
            self.consuming_front_matter = false;
            self.title = Some(TitleBlock::from_yaml(&node.literal)?);
            return Ok(());
        }
        if node.literal.is_empty() {
            return Ok(());
        }
        let text = node.literal.trim_start_matches(' ');
        match self.table.as_mut() {
            Some(buf) => buf.extend_from_slice(text.as_bytes()),
            None => w.write_all(text.as_bytes())?,
        }
        Ok(())
    }

    fn heading(&mut self, w: &mut dyn Write, data: &HeadingData, entering: bool) -> Result<()> {
        if !data.is_title_block {
            self.consuming_front_matter = false;
            if entering {
                emit::section_heading(w)?;
            } else {
                emit::line_break(w)?;
            }
            return Ok(());
        }

        if entering {
            if self.title.is_some() {
                return Err(Error::Structure(
                    "document has more than one title block".into(),
                ));
            }
            self.consuming_front_matter = true;
            return Ok(());
        }

        self.consuming_front_matter = false;
        let block = self.title.as_ref().ok_or_else(|| {
            Error::Structure("title block heading carries no front matter".into())
        })?;
        emit::title_block(w, block)?;
        Ok(())
    }

    fn list(&mut self, w: &mut dyn Write, entering: bool) -> Result<()> {
        if entering {
            if !self.list.is_empty() {
                emit::indent(w)?;
            }
            self.list.push(0);
        } else {
            self.list.pop();
            emit::outdent(w)?;
        }
        Ok(())
    }

    fn item(&mut self, w: &mut dyn Write, data: &ListData) -> Result<()> {
        let Some(count) = self.list.last_mut() else {
            return Err(Error::Structure("list item outside of a list".into()));
        };
        *count += 1;

        let label = if data.ordered {
            self.list.iter().map(|n| format!("{}.", n)).collect::<String>()
        } else {
            data.bullet.to_string()
        };
        emit::indent_paragraph(w, &label)?;
        Ok(())
    }

    fn table_buffer(&mut self, kind: &NodeKind) -> Result<&mut Vec<u8>> {
        self.table
            .as_mut()
            .ok_or_else(|| Error::Structure(format!("{} outside of a table", kind)))
    }
}

impl NodeRenderer for TroffRenderer {
    fn render_header(&mut self, w: &mut dyn Write, _doc: &Node) -> Result<()> {
        if let Some(ref preamble) = self.options.preamble {
            w.write_all(preamble.as_bytes())?;
        }
        Ok(())
    }

    fn render_node(&mut self, w: &mut dyn Write, node: &Node, entering: bool) -> Result<WalkStatus> {
        match &node.kind {
            NodeKind::Document => {}
            NodeKind::Text => self.text(w, node)?,
            NodeKind::Paragraph => {
                if entering {
                    let level = self.list.len() as i32;
                    emit::left_aligned_paragraph(w, &node.literal, level)?;
                } else {
                    emit::line_break(w)?;
                }
            }
            NodeKind::BlockQuote => {
                if entering {
                    emit::left_aligned_paragraph(w, &node.literal, 1)?;
                } else {
                    emit::line_break(w)?;
                }
            }
            NodeKind::HtmlBlock => emit::html(w, &node.literal)?,
            NodeKind::HtmlSpan => {}
            NodeKind::Code => {
                emit::line_break(w)?;
                emit::bold_text(w, &node.literal)?;
                emit::roman(w)?;
            }
            NodeKind::CodeBlock(_) => emit::code_block(w, &node.literal)?,
            NodeKind::Table => {
                if entering {
                    if self.table.is_some() {
                        return Err(Error::Structure("tables cannot nest".into()));
                    }
                    self.table = Some(Vec::new());
                } else {
                    let buf = self.table.take().ok_or_else(|| {
                        Error::Structure("table closed without being opened".into())
                    })?;
                    emit::table(w, &buf)?;
                }
            }
            NodeKind::TableHead | NodeKind::TableBody => {}
            NodeKind::TableRow => {
                if !entering {
                    self.table_buffer(&node.kind)?.push(b'\n');
                }
            }
            NodeKind::TableCell(_) => {
                if !entering {
                    self.table_buffer(&node.kind)?.push(b'\t');
                }
            }
            NodeKind::List(_) => self.list(w, entering)?,
            NodeKind::Item(data) => {
                if entering {
                    self.item(w, data)?;
                }
            }
            NodeKind::Emph => {
                if entering {
                    emit::italic(w)?;
                } else {
                    emit::line_break(w)?;
                    emit::roman(w)?;
                }
            }
            NodeKind::Strong => {
                if entering {
                    emit::bold(w)?;
                } else {
                    emit::line_break(w)?;
                    emit::roman(w)?;
                }
            }
            // TODO: map links to the .pdfhref macro once gropdf output is supported.
            NodeKind::Link(_) => {}
            NodeKind::Image(_) => return Ok(WalkStatus::SkipChildren),
            NodeKind::Heading(data) => self.heading(w, data, entering)?,
            NodeKind::HorizontalRule
            | NodeKind::Strikethrough
            | NodeKind::SoftBreak
            | NodeKind::HardBreak => {
                return Err(Error::UnsupportedNode(node.kind.name().to_string()));
            }
        }
        Ok(WalkStatus::GoToNext)
    }

    fn render_footer(&mut self, w: &mut dyn Write, _doc: &Node) -> Result<()> {
        emit::signature(w)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CellData, CodeBlockData, LinkData};
    use crate::render::run;

    fn doc(children: Vec<Node>) -> Node {
        Node::with_children(NodeKind::Document, children)
    }

    fn render(root: &Node) -> String {
        let mut renderer = TroffRenderer::new();
        String::from_utf8(run(root, &mut renderer).unwrap()).unwrap()
    }

    fn para(text: &str) -> Node {
        Node::with_children(NodeKind::Paragraph, vec![Node::text(text)])
    }

    fn list(data: ListData, items: Vec<Vec<Node>>) -> Node {
        Node::with_children(
            NodeKind::List(data),
            items
                .into_iter()
                .map(|children| Node::with_children(NodeKind::Item(data), children))
                .collect(),
        )
    }

    #[test]
    fn test_empty_document_ends_with_signature() {
        assert_eq!(render(&doc(vec![])), ".SG\n");
    }

    #[test]
    fn test_paragraph_and_heading() {
        let root = doc(vec![
            Node::with_children(NodeKind::Heading(HeadingData::new(1)), vec![Node::text("Intro")]),
            para("  plain text"),
        ]);
        assert_eq!(render(&root), ".SH\nIntro\n\nplain text\n.SG\n");
    }

    #[test]
    fn test_emphasis_and_strong_close() {
        let root = doc(vec![Node::with_children(
            NodeKind::Paragraph,
            vec![
                Node::with_children(NodeKind::Emph, vec![Node::text("it")]),
                Node::with_children(NodeKind::Strong, vec![Node::text("bo")]),
            ],
        )]);
        assert_eq!(render(&root), "\n.I\nit\n.R\n.B\nbo\n.R\n\n.SG\n");
    }

    #[test]
    fn test_code_span_and_block() {
        let root = doc(vec![
            Node::with_children(NodeKind::Paragraph, vec![Node::leaf(NodeKind::Code, "x = 1")]),
            Node::leaf(NodeKind::CodeBlock(CodeBlockData::default()), "  let y;\n"),
        ]);
        assert_eq!(render(&root), "\n\n.B x = 1\n.R\n\n.P1\nlet y;\n.P2\n.SG\n");
    }

    #[test]
    fn test_nested_ordered_labels() {
        let inner = list(ListData::ordered(1), vec![vec![para("a")], vec![para("b")]]);
        let root = doc(vec![list(
            ListData::ordered(1),
            vec![vec![para("one"), inner], vec![para("two")]],
        )]);
        let out = render(&root);
        assert!(out.contains(".IP 1.\n"));
        assert!(out.contains(".RS\n.IP 1.1.\n"));
        assert!(out.contains(".IP 1.2.\n"));
        assert!(out.contains(".IP 2.\n"));
        assert_eq!(out.matches(".RE\n").count(), 2);
    }

    #[test]
    fn test_unordered_bullet_kept() {
        let root = doc(vec![list(ListData::unordered('+'), vec![vec![para("x")]])]);
        assert_eq!(render(&root), ".IP +\n\nx\n.RE\n.SG\n");
    }

    #[test]
    fn test_list_stack_empty_after_render() {
        let deep = list(
            ListData::unordered('-'),
            vec![vec![list(ListData::unordered('*'), vec![vec![para("x")]])]],
        );
        let root = doc(vec![deep]);
        let mut renderer = TroffRenderer::new();
        run(&root, &mut renderer).unwrap();
        assert_eq!(renderer.list_depth(), 0);
    }

    #[test]
    fn test_table_routes_text_into_buffer() {
        let cell = |t: &str| Node::with_children(NodeKind::TableCell(CellData::default()), vec![Node::text(t)]);
        let row = |a: &str, b: &str| Node::with_children(NodeKind::TableRow, vec![cell(a), cell(b)]);
        let root = doc(vec![Node::with_children(
            NodeKind::Table,
            vec![
                Node::with_children(NodeKind::TableHead, vec![row("k", "v")]),
                Node::with_children(NodeKind::TableBody, vec![row("a", "1")]),
            ],
        )]);
        assert_eq!(
            render(&root),
            ".DS\n.TS H\nk    v    \n.TH\na    1    \n.TE\n.DE\n.SG\n"
        );
    }

    #[test]
    fn test_empty_table_is_error() {
        let root = doc(vec![Node::new(NodeKind::Table)]);
        let err = run(&root, &mut TroffRenderer::new()).unwrap_err();
        assert!(matches!(err, Error::MalformedTable(_)));
    }

    #[test]
    fn test_link_and_image_emit_nothing() {
        let root = doc(vec![Node::with_children(
            NodeKind::Paragraph,
            vec![
                Node::with_children(NodeKind::Link(LinkData::default()), vec![Node::text("l")]),
                Node::with_children(NodeKind::Image(LinkData::default()), vec![Node::text("alt")]),
            ],
        )]);
        assert_eq!(render(&root), "\nl\n.SG\n");
    }

    #[test]
    fn test_unsupported_node_fails() {
        let root = doc(vec![para("before"), Node::new(NodeKind::HorizontalRule)]);
        let err = run(&root, &mut TroffRenderer::new()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedNode(ref k) if k == "horizontal rule"));
    }

    #[test]
    fn test_title_block() {
        let yaml = "title: T\nauthors:\n- name: Name\n  email: Email\n  affiliation: Affiliation\nabstract: A\ndate: Feb 22, 2020\n";
        let root = doc(vec![Node::with_children(
            NodeKind::Heading(HeadingData::title_block()),
            vec![Node::text(yaml)],
        )]);
        let mut renderer = TroffRenderer::new();
        let out = String::from_utf8(run(&root, &mut renderer).unwrap()).unwrap();
        assert_eq!(
            out,
            ".HTML T\n.TL\nT\n.AU\n.I Name\n.I Email\n.AI Affiliation\n.ND Feb 22, 2020\n.AB\nA\n.AE\n.PP\n.SG\n"
        );
        assert_eq!(renderer.title_block().unwrap().title, "T");
    }

    #[test]
    fn test_bad_front_matter_is_fatal() {
        let root = doc(vec![Node::with_children(
            NodeKind::Heading(HeadingData::title_block()),
            vec![Node::text("title: [unclosed")],
        )]);
        let err = run(&root, &mut TroffRenderer::new()).unwrap_err();
        assert!(matches!(err, Error::FrontMatter(_)));
    }

    #[test]
    fn test_second_title_block_rejected() {
        let title = || {
            Node::with_children(
                NodeKind::Heading(HeadingData::title_block()),
                vec![Node::text("title: T")],
            )
        };
        let err = run(&doc(vec![title(), title()]), &mut TroffRenderer::new()).unwrap_err();
        assert!(matches!(err, Error::Structure(_)));
    }

    #[test]
    fn test_item_outside_list_is_error() {
        let root = doc(vec![Node::new(NodeKind::Item(ListData::default()))]);
        assert!(run(&root, &mut TroffRenderer::new()).is_err());
    }

    #[test]
    fn test_preamble_written_first() {
        let mut renderer = TroffRenderer::with_options(RenderOptions::new().with_preamble(".nr PS 12\n"));
        let out = run(&doc(vec![para("x")]), &mut renderer).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), ".nr PS 12\n\nx\n.SG\n");
    }
}
