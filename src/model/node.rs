//! Document tree nodes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A node of a parsed document tree.
///
/// The renderer only reads nodes; it never mutates the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// What this node represents
    pub kind: NodeKind,

    /// Literal payload (text, code, raw html)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub literal: String,

    /// Child nodes in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    /// Create a node without payload or children.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            literal: String::new(),
            children: Vec::new(),
        }
    }

    /// Create a text leaf.
    pub fn text(literal: impl Into<String>) -> Self {
        Self::leaf(NodeKind::Text, literal)
    }

    /// Create a leaf node carrying a literal payload.
    pub fn leaf(kind: NodeKind, literal: impl Into<String>) -> Self {
        Self {
            kind,
            literal: literal.into(),
            children: Vec::new(),
        }
    }

    /// Create a container with the given children.
    pub fn with_children(kind: NodeKind, children: Vec<Node>) -> Self {
        Self {
            kind,
            literal: String::new(),
            children,
        }
    }

    /// Append a child node.
    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Check whether this node is visited on both enter and exit.
    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    /// Concatenated literal text of this node and all descendants.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        out.push_str(&self.literal);
        for child in &self.children {
            child.collect_text(out);
        }
    }
}

/// The closed set of node kinds a tree may contain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    Document,
    Text,
    Paragraph,
    Heading(HeadingData),
    List(ListData),
    Item(ListData),
    Emph,
    Strong,
    Code,
    CodeBlock(CodeBlockData),
    Table,
    TableHead,
    TableBody,
    TableRow,
    TableCell(CellData),
    BlockQuote,
    HtmlBlock,
    HtmlSpan,
    Link(LinkData),
    Image(LinkData),
    HorizontalRule,
    Strikethrough,
    SoftBreak,
    HardBreak,
}

impl NodeKind {
    /// Human readable name of the kind.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Text => "text",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Heading(_) => "heading",
            NodeKind::List(_) => "list",
            NodeKind::Item(_) => "list item",
            NodeKind::Emph => "emphasis",
            NodeKind::Strong => "strong",
            NodeKind::Code => "code span",
            NodeKind::CodeBlock(_) => "code block",
            NodeKind::Table => "table",
            NodeKind::TableHead => "table head",
            NodeKind::TableBody => "table body",
            NodeKind::TableRow => "table row",
            NodeKind::TableCell(_) => "table cell",
            NodeKind::BlockQuote => "block quote",
            NodeKind::HtmlBlock => "html block",
            NodeKind::HtmlSpan => "html span",
            NodeKind::Link(_) => "link",
            NodeKind::Image(_) => "image",
            NodeKind::HorizontalRule => "horizontal rule",
            NodeKind::Strikethrough => "strikethrough",
            NodeKind::SoftBreak => "soft break",
            NodeKind::HardBreak => "hard break",
        }
    }

    /// Leaf kinds are visited once, on enter.
    pub fn is_container(&self) -> bool {
        !matches!(
            self,
            NodeKind::Text
                | NodeKind::Code
                | NodeKind::CodeBlock(_)
                | NodeKind::HtmlBlock
                | NodeKind::HtmlSpan
                | NodeKind::HorizontalRule
                | NodeKind::SoftBreak
                | NodeKind::HardBreak
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Heading metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeadingData {
    /// Heading level (1-6)
    pub level: u8,

    /// Whether this heading carries the document's front matter
    #[serde(default)]
    pub is_title_block: bool,
}

impl HeadingData {
    /// A regular section heading.
    pub fn new(level: u8) -> Self {
        Self {
            level,
            is_title_block: false,
        }
    }

    /// The heading that wraps the front matter block.
    pub fn title_block() -> Self {
        Self {
            level: 1,
            is_title_block: true,
        }
    }
}

/// List metadata, shared by lists and their items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListData {
    /// Numbered list
    pub ordered: bool,

    /// Bullet character of an unordered list
    pub bullet: char,

    /// First number of an ordered list as written in the source
    #[serde(default)]
    pub start: u64,
}

impl ListData {
    /// Unordered list using the given bullet.
    pub fn unordered(bullet: char) -> Self {
        Self {
            ordered: false,
            bullet,
            start: 0,
        }
    }

    /// Ordered list starting at `start`.
    pub fn ordered(start: u64) -> Self {
        Self {
            ordered: true,
            bullet: '.',
            start,
        }
    }
}

impl Default for ListData {
    fn default() -> Self {
        Self::unordered('*')
    }
}

/// Link and image metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LinkData {
    /// Target URL or path
    pub destination: String,

    /// Optional title attribute
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
}

/// Fenced or indented code block metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CodeBlockData {
    /// Info string of a fenced block (language hint)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub info: String,
}

/// Table cell metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CellData {
    /// Cell belongs to the header row
    pub is_header: bool,

    /// Column alignment
    pub alignment: CellAlignment,
}

/// Column alignment of a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellAlignment {
    #[default]
    None,
    Left,
    Center,
    Right,
}
