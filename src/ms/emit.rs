//! Block emitters built on [`ms_print`].
//!
//! Each emitter writes a fixed macro sequence to the sink. None of them
//! keep state between calls.

use std::io::{self, Write};

use super::align::align;
use super::command::{ms_print, Arg, Macro};
use crate::error::Result;
use crate::model::{Author, PostDate, TitleBlock};

/// Line terminator used between macro lines and text.
pub const LINEBREAK: &str = "\n";

fn cmd<W: Write + ?Sized>(w: &mut W, m: Macro, args: &[Arg<'_>]) -> io::Result<()> {
    w.write_all(ms_print(m, args).as_bytes())
}

/// Writes
/// ```text
/// .DS
/// <p>
/// .DE
/// ```
pub fn display<W: Write + ?Sized>(w: &mut W, p: &[u8]) -> io::Result<()> {
    cmd(w, Macro::DisplayStart, &[])?;
    w.write_all(p)?;
    cmd(w, Macro::DisplayEnd, &[])
}

/// Writes tab separated rows as an aligned table with a header row:
/// ```text
/// .DS
/// .TS H
/// <header>
/// .TH
/// <body>
/// .TE
/// .DE
/// ```
pub fn table<W: Write + ?Sized>(w: &mut W, p: &[u8]) -> Result<()> {
    let aligned = align(p)?;
    let mut buf = Vec::with_capacity(p.len() * 2);
    esc(&mut buf, ms_print(Macro::TableStart, &["H".into()]).as_bytes())?;
    esc(&mut buf, &aligned.header)?;
    line_break(&mut buf)?;
    table_heading(&mut buf)?;
    esc(&mut buf, &aligned.body)?;
    esc(&mut buf, ms_print(Macro::TableEnd, &[]).as_bytes())?;
    display(w, &buf)?;
    Ok(())
}

/// Should write escaped bytes, but writes them unchanged.
///
/// Characters special to troff (leading dots and apostrophes, backslashes)
/// pass through as is.
pub fn esc<W: Write + ?Sized>(w: &mut W, p: &[u8]) -> io::Result<()> {
    w.write_all(p)
}

/// `.TH`
pub fn table_heading<W: Write + ?Sized>(w: &mut W) -> io::Result<()> {
    cmd(w, Macro::TableHeading, &[])
}

/// `.RS`
pub fn indent<W: Write + ?Sized>(w: &mut W) -> io::Result<()> {
    cmd(w, Macro::BeginIndent, &[])
}

/// `.RE`
pub fn outdent<W: Write + ?Sized>(w: &mut W) -> io::Result<()> {
    cmd(w, Macro::EndIndent, &[])
}

/// `.IP <label>`
pub fn indent_paragraph<W: Write + ?Sized>(w: &mut W, label: &str) -> io::Result<()> {
    cmd(w, Macro::BeginAndIndentParagraph, &[label.into()])
}

/// Starts a paragraph.
///
/// A negative level is a fresh top level paragraph (`.LP`). Any other
/// level continues inside the current indented context, so only a line
/// break and the text are written.
pub fn left_aligned_paragraph<W: Write + ?Sized>(
    w: &mut W,
    text: &str,
    level: i32,
) -> io::Result<()> {
    if level < 0 {
        cmd(w, Macro::LeftAlignedParagraph, &[])?;
        w.write_all(text.as_bytes())?;
        line_break(w)
    } else {
        line_break(w)?;
        w.write_all(text.as_bytes())
    }
}

/// `.B`
pub fn bold<W: Write + ?Sized>(w: &mut W) -> io::Result<()> {
    cmd(w, Macro::Bold, &[])
}

/// `.B <text>`, used for inline code.
pub fn bold_text<W: Write + ?Sized>(w: &mut W, text: &str) -> io::Result<()> {
    cmd(w, Macro::Bold, &[text.into()])
}

/// `.R`
pub fn roman<W: Write + ?Sized>(w: &mut W) -> io::Result<()> {
    cmd(w, Macro::Roman, &[])
}

/// `.I`
pub fn italic<W: Write + ?Sized>(w: &mut W) -> io::Result<()> {
    cmd(w, Macro::Italic, &[])
}

/// `.UL`
pub fn underline<W: Write + ?Sized>(w: &mut W) -> io::Result<()> {
    cmd(w, Macro::Underline, &[])
}

/// Writes
/// ```text
/// .P1
/// <code>
/// .P2
/// ```
/// Leading spaces of the first line are dropped.
pub fn code_block<W: Write + ?Sized>(w: &mut W, code: &str) -> io::Result<()> {
    cmd(w, Macro::BeginCodeBlock, &[])?;
    w.write_all(code.trim_start_matches(' ').as_bytes())?;
    cmd(w, Macro::EndCodeBlock, &[])
}

/// `.HTML <attribute>`
pub fn html<W: Write + ?Sized>(w: &mut W, attribute: &str) -> io::Result<()> {
    cmd(w, Macro::Html, &[attribute.into()])
}

/// Writes
/// ```text
/// .TL
/// <title>
/// ```
pub fn title<W: Write + ?Sized>(w: &mut W, text: &str) -> io::Result<()> {
    cmd(w, Macro::Title, &[])?;
    w.write_all(text.as_bytes())?;
    line_break(w)
}

/// Writes
/// ```text
/// .AB
/// <abstract>
/// .AE
/// ```
pub fn abstract_block<W: Write + ?Sized>(w: &mut W, text: &str) -> io::Result<()> {
    cmd(w, Macro::BeginAbstract, &[])?;
    w.write_all(text.trim_start_matches(' ').as_bytes())?;
    line_break(w)?;
    cmd(w, Macro::EndAbstract, &[])
}

/// Writes
/// ```text
/// .AU
/// .I <name>
/// .I <email>
/// .AI <affiliation>
/// ```
/// The `.AI` line is left out when the affiliation is one character or less.
pub fn author_bio<W: Write + ?Sized>(w: &mut W, author: &Author) -> io::Result<()> {
    cmd(w, Macro::Author, &[])?;
    cmd(w, Macro::Italic, &[(&author.name).into()])?;
    cmd(w, Macro::Italic, &[(&author.email).into()])?;
    if author.has_affiliation() {
        cmd(w, Macro::Institution, &[(&author.affiliation).into()])?;
    }
    Ok(())
}

/// `.ND May 8, 1945`
pub fn change_date<W: Write + ?Sized>(w: &mut W, date: &PostDate) -> io::Result<()> {
    cmd(w, Macro::ChangeDate, &[date.ms_format().as_str().into()])
}

/// `.SH`
pub fn section_heading<W: Write + ?Sized>(w: &mut W) -> io::Result<()> {
    cmd(w, Macro::SectionHeading, &[])
}

/// `.PP`
pub fn begin_paragraph<W: Write + ?Sized>(w: &mut W) -> io::Result<()> {
    cmd(w, Macro::BeginParagraph, &[])
}

/// `.SG`
pub fn signature<W: Write + ?Sized>(w: &mut W) -> io::Result<()> {
    cmd(w, Macro::Signature, &[])
}

/// A single newline.
pub fn line_break<W: Write + ?Sized>(w: &mut W) -> io::Result<()> {
    w.write_all(LINEBREAK.as_bytes())
}

/// Writes the document title block, then opens the first body paragraph.
pub fn title_block<W: Write + ?Sized>(w: &mut W, block: &TitleBlock) -> io::Result<()> {
    html(w, &block.title)?;
    title(w, &block.title)?;
    for author in &block.authors {
        author_bio(w, author)?;
    }
    change_date(w, &block.date)?;
    if block.has_abstract() {
        abstract_block(w, &block.abstract_text)?;
    }
    begin_paragraph(w)
}
