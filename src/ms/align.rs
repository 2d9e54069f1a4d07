//! Column alignment for buffered table text.
//!
//! Input rows are newline terminated and every cell is tab terminated.
//! Columns are aligned the way an elastic tabstop writer does it: a column
//! block is a run of adjacent lines that all have a terminated cell at that
//! index, and every cell of the block is padded to the widest cell plus a
//! fixed gutter.

use crate::error::{Error, Result};

/// Spaces added after the widest cell of a column.
pub const PADDING: usize = 4;

/// Aligned table text split at the first line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedTable {
    /// First row, without its newline
    pub header: Vec<u8>,

    /// Remaining rows
    pub body: Vec<u8>,
}

struct Cell<'a> {
    text: &'a str,
    width: usize,
}

/// Align tab separated rows and split off the header row.
pub fn align(input: &[u8]) -> Result<AlignedTable> {
    if input.is_empty() {
        return Err(Error::MalformedTable("table has no rows".into()));
    }
    let text = String::from_utf8_lossy(input);
    let aligned = align_text(&text);

    let Some(i) = aligned.find('\n') else {
        return Err(Error::MalformedTable("table has no row terminator".into()));
    };
    let (header, body) = (&aligned[..i], &aligned[i + 1..]);
    Ok(AlignedTable {
        header: header.as_bytes().to_vec(),
        body: body.as_bytes().to_vec(),
    })
}

/// Pad tab terminated cells so columns line up.
pub fn align_text(text: &str) -> String {
    let lines: Vec<Vec<Cell<'_>>> = text
        .split('\n')
        .map(|line| {
            line.split('\t')
                .map(|cell| Cell {
                    text: cell,
                    width: cell.chars().count(),
                })
                .collect()
        })
        .collect();

    let mut out = String::with_capacity(text.len() * 2);
    let mut widths = Vec::new();
    format_block(&lines, &mut widths, 0, 0, lines.len(), &mut out);
    out
}

// Terminated cells only: the last entry of a line is trailing text.
fn has_column(line: &[Cell<'_>], column: usize) -> bool {
    column + 1 < line.len()
}

fn format_block(
    lines: &[Vec<Cell<'_>>],
    widths: &mut Vec<usize>,
    mut pos: usize,
    line0: usize,
    line1: usize,
    out: &mut String,
) -> usize {
    let column = widths.len();
    let mut this = line0;
    while this < line1 {
        if !has_column(&lines[this], column) {
            this += 1;
            continue;
        }

        pos = write_lines(lines, widths, pos, this, out);
        let start = this;

        let mut width = 0;
        while this < line1 && has_column(&lines[this], column) {
            width = width.max(lines[this][column].width + PADDING);
            this += 1;
        }

        widths.push(width);
        pos = format_block(lines, widths, pos, start, this, out);
        widths.pop();
    }
    write_lines(lines, widths, pos, line1, out)
}

fn write_lines(
    lines: &[Vec<Cell<'_>>],
    widths: &[usize],
    line0: usize,
    line1: usize,
    out: &mut String,
) -> usize {
    for (i, line) in lines.iter().enumerate().take(line1).skip(line0) {
        // Leading empty cells are indentation; tab indent has no width here.
        let mut indenting = true;
        for (j, cell) in line.iter().enumerate() {
            if cell.width == 0 {
                if j < widths.len() && !indenting {
                    pad(out, cell.width, widths[j]);
                }
            } else {
                indenting = false;
                out.push_str(cell.text);
                if j < widths.len() {
                    pad(out, cell.width, widths[j]);
                }
            }
        }
        if i + 1 < lines.len() {
            out.push('\n');
        }
    }
    line1
}

fn pad(out: &mut String, text_width: usize, cell_width: usize) {
    for _ in text_width..cell_width {
        out.push(' ');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_pads_to_widest_plus_gutter() {
        let got = align_text("Name\tAge\tCountry\t\nBob\t27\ttur\t\nAlice\t23\tuk\t\n");
        assert_eq!(
            got,
            concat!(
                "Name     Age    Country    \n",
                "Bob      27     tur        \n",
                "Alice    23     uk         \n",
            )
        );
    }

    #[test]
    fn test_align_split_header_body() {
        let table = align(b"h1\th2\t\nv1\tv2\t\nw1\tw2\t\n").unwrap();
        assert_eq!(table.header, b"h1    h2    ");
        assert_eq!(table.body, b"v1    v2    \nw1    w2    \n");
    }

    #[test]
    fn test_align_counts_chars_not_bytes() {
        let got = align_text("é\tx\t\nab\ty\t\n");
        assert_eq!(got, "é     x    \nab    y    \n");
    }

    #[test]
    fn test_align_empty_interior_cell_is_padded() {
        let got = align_text("a\t\tc\t\nd\te\tf\t\n");
        assert_eq!(got, "a         c    \nd    e    f    \n");
    }

    #[test]
    fn test_align_errors() {
        assert!(matches!(align(b""), Err(Error::MalformedTable(_))));
        assert!(matches!(align(b"a\tb\t"), Err(Error::MalformedTable(_))));
    }
}
