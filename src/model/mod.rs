//! Document model types.
//!
//! The tree produced by the markdown front end and consumed by the
//! renderer, and the title block carried in a document's front matter.

mod node;
mod title;

pub use node::{
    CellAlignment, CellData, CodeBlockData, HeadingData, LinkData, ListData, Node, NodeKind,
};
pub use title::{Author, PostDate, TitleBlock};
