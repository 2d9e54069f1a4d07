//! Markdown front end.

mod markdown;
mod options;

pub use markdown::{parse_markdown, split_title_block};
pub use options::ParseOptions;
