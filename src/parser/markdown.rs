//! Markdown to document tree, on top of pulldown-cmark.
//!
//! pulldown-cmark produces a flat event stream; this module folds it into
//! the nested [`Node`] tree the renderer walks. A few shapes are adjusted on
//! the way so the tree matches what the renderer expects:
//!
//! - a leading block of `%` lines becomes the front matter heading,
//! - inline content of tight list items is wrapped in a paragraph,
//! - table header cells are wrapped in a row and body rows in a table body,
//! - soft breaks become newlines inside the surrounding text.

use std::ops::Range;

use pulldown_cmark::{Alignment, CodeBlockKind, Event, Parser, Tag, TagEnd};

use super::ParseOptions;
use crate::error::{Error, Result};
use crate::model::{
    CellAlignment, CellData, CodeBlockData, HeadingData, LinkData, ListData, Node, NodeKind,
};

/// Parse markdown source into a document tree.
pub fn parse_markdown(source: &str, options: &ParseOptions) -> Result<Node> {
    let mut root = Node::new(NodeKind::Document);

    let body = match split_title_block(source).filter(|_| options.title_block) {
        Some((front, rest)) => {
            root.push(Node::with_children(
                NodeKind::Heading(HeadingData::title_block()),
                vec![Node::text(front)],
            ));
            rest
        }
        None => source,
    };

    let mut builder = TreeBuilder::new(body, root);
    for (event, range) in Parser::new_ext(body, options.cmark_options()).into_offset_iter() {
        builder.event(event, range)?;
    }
    builder.finish()
}

/// Split a leading `%` block from the rest of the source.
///
/// Each line loses its `%` and one following space.
pub fn split_title_block(source: &str) -> Option<(String, &str)> {
    if !source.starts_with('%') {
        return None;
    }
    let mut consumed = 0;
    let mut lines = Vec::new();
    for line in source.split_inclusive('\n') {
        let Some(content) = line.strip_prefix('%') else {
            break;
        };
        consumed += line.len();
        let content = content.trim_end_matches(['\n', '\r']);
        lines.push(content.strip_prefix(' ').unwrap_or(content));
    }
    Some((lines.join("\n"), &source[consumed..]))
}

fn bullet_in(source: &str, range: &Range<usize>) -> char {
    source
        .get(range.clone())
        .and_then(|s| s.chars().find(|c| matches!(c, '-' | '*' | '+')))
        .unwrap_or('*')
}

fn cell_alignment(alignment: Alignment) -> CellAlignment {
    match alignment {
        Alignment::None => CellAlignment::None,
        Alignment::Left => CellAlignment::Left,
        Alignment::Center => CellAlignment::Center,
        Alignment::Right => CellAlignment::Right,
    }
}

#[derive(Default)]
struct TableState {
    alignments: Vec<CellAlignment>,
    column: usize,
    in_head: bool,
}

struct TreeBuilder<'s> {
    source: &'s str,
    stack: Vec<Node>,
    /// Stack depths of paragraphs opened for tight list items
    implicit: Vec<usize>,
    table: TableState,
}

impl<'s> TreeBuilder<'s> {
    fn new(source: &'s str, root: Node) -> Self {
        Self {
            source,
            stack: vec![root],
            implicit: Vec::new(),
            table: TableState::default(),
        }
    }

    fn top(&mut self) -> Result<&mut Node> {
        self.stack
            .last_mut()
            .ok_or_else(|| Error::Parse("unbalanced markdown events".into()))
    }

    fn top_kind(&self) -> Option<&NodeKind> {
        self.stack.last().map(|n| &n.kind)
    }

    fn close(&mut self) -> Result<()> {
        if self.stack.len() < 2 {
            return Err(Error::Parse("unbalanced markdown events".into()));
        }
        let node = self.pop()?;
        self.top()?.push(node);
        Ok(())
    }

    fn pop(&mut self) -> Result<Node> {
        self.stack
            .pop()
            .ok_or_else(|| Error::Parse("unbalanced markdown events".into()))
    }

    // Inline content directly inside a list item gets a paragraph around it.
    fn inline_context(&mut self) {
        if matches!(self.top_kind(), Some(NodeKind::Item(_))) {
            self.stack.push(Node::new(NodeKind::Paragraph));
            self.implicit.push(self.stack.len() - 1);
        }
    }

    fn block_context(&mut self) -> Result<()> {
        if self.implicit.last() == Some(&(self.stack.len() - 1)) {
            self.implicit.pop();
            self.close()?;
        }
        Ok(())
    }

    fn append(&mut self, node: Node) -> Result<()> {
        self.inline_context();
        self.top()?.push(node);
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<()> {
        let top = self.top()?;
        if matches!(top.kind, NodeKind::CodeBlock(_) | NodeKind::HtmlBlock) {
            top.literal.push_str(text);
            return Ok(());
        }
        self.inline_context();
        let top = self.top()?;
        match top.children.last_mut() {
            Some(last) if last.kind == NodeKind::Text => last.literal.push_str(text),
            _ => top.push(Node::text(text)),
        }
        Ok(())
    }

    fn html(&mut self, html: &str) -> Result<()> {
        let top = self.top()?;
        if top.kind == NodeKind::HtmlBlock {
            top.literal.push_str(html);
            return Ok(());
        }
        match top.children.last_mut() {
            Some(last) if last.kind == NodeKind::HtmlBlock => last.literal.push_str(html),
            _ => top.push(Node::leaf(NodeKind::HtmlBlock, html)),
        }
        Ok(())
    }

    fn event(&mut self, event: Event<'_>, range: Range<usize>) -> Result<()> {
        match event {
            Event::Start(tag) => self.start(tag, range),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::SoftBreak => self.text("\n"),
            Event::Code(code) => self.append(Node::leaf(NodeKind::Code, &*code)),
            Event::Html(html) => self.html(&html),
            Event::InlineHtml(html) => self.append(Node::leaf(NodeKind::HtmlSpan, &*html)),
            Event::HardBreak => self.append(Node::new(NodeKind::HardBreak)),
            Event::Rule => {
                self.block_context()?;
                self.top()?.push(Node::new(NodeKind::HorizontalRule));
                Ok(())
            }
            other => Err(Error::Parse(format!(
                "unsupported markdown element: {:?}",
                other
            ))),
        }
    }

    fn start(&mut self, tag: Tag<'_>, range: Range<usize>) -> Result<()> {
        let inline = matches!(
            tag,
            Tag::Emphasis | Tag::Strong | Tag::Strikethrough | Tag::Link { .. } | Tag::Image { .. }
        );
        if inline {
            self.inline_context();
        } else {
            self.block_context()?;
        }

        let kind = match tag {
            Tag::Paragraph => NodeKind::Paragraph,
            Tag::Heading { level, .. } => NodeKind::Heading(HeadingData::new(level as u8)),
            Tag::BlockQuote(_) => NodeKind::BlockQuote,
            Tag::CodeBlock(kind) => NodeKind::CodeBlock(CodeBlockData {
                info: match kind {
                    CodeBlockKind::Fenced(info) => info.to_string(),
                    CodeBlockKind::Indented => String::new(),
                },
            }),
            Tag::HtmlBlock => NodeKind::HtmlBlock,
            Tag::List(Some(start)) => NodeKind::List(ListData::ordered(start)),
            Tag::List(None) => NodeKind::List(ListData::unordered(bullet_in(self.source, &range))),
            Tag::Item => match self.top_kind() {
                Some(NodeKind::List(data)) => NodeKind::Item(*data),
                _ => return Err(Error::Parse("list item outside of a list".into())),
            },
            Tag::Table(alignments) => {
                self.table = TableState {
                    alignments: alignments.into_iter().map(cell_alignment).collect(),
                    ..TableState::default()
                };
                NodeKind::Table
            }
            Tag::TableHead => {
                self.stack.push(Node::new(NodeKind::TableHead));
                self.table.in_head = true;
                self.table.column = 0;
                NodeKind::TableRow
            }
            Tag::TableRow => {
                if self.top_kind() == Some(&NodeKind::Table) {
                    self.stack.push(Node::new(NodeKind::TableBody));
                }
                self.table.column = 0;
                NodeKind::TableRow
            }
            Tag::TableCell => NodeKind::TableCell(CellData {
                is_header: self.table.in_head,
                alignment: self
                    .table
                    .alignments
                    .get(self.table.column)
                    .copied()
                    .unwrap_or_default(),
            }),
            Tag::Emphasis => NodeKind::Emph,
            Tag::Strong => NodeKind::Strong,
            Tag::Strikethrough => NodeKind::Strikethrough,
            Tag::Link { dest_url, title, .. } => NodeKind::Link(LinkData {
                destination: dest_url.to_string(),
                title: title.to_string(),
            }),
            Tag::Image { dest_url, title, .. } => NodeKind::Image(LinkData {
                destination: dest_url.to_string(),
                title: title.to_string(),
            }),
            other => {
                return Err(Error::Parse(format!(
                    "unsupported markdown element: {:?}",
                    other
                )))
            }
        };
        self.stack.push(Node::new(kind));
        Ok(())
    }

    fn end(&mut self, tag: TagEnd) -> Result<()> {
        self.block_context()?;
        match tag {
            TagEnd::TableHead => {
                self.close()?;
                self.close()?;
                self.table.in_head = false;
            }
            TagEnd::TableCell => {
                self.close()?;
                self.table.column += 1;
            }
            TagEnd::Table => {
                if self.top_kind() == Some(&NodeKind::TableBody) {
                    self.close()?;
                }
                self.close()?;
            }
            _ => self.close()?,
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Node> {
        if self.stack.len() != 1 {
            return Err(Error::Parse(format!(
                "{} unclosed element(s) at end of input",
                self.stack.len() - 1
            )));
        }
        let root = self.pop()?;
        log::debug!("Parsed markdown into {} top-level nodes", root.children.len());
        Ok(root)
    }
}
