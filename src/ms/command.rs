//! ms macro names and the one-line command formatter.

/// The ms macros known to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Macro {
    SingleColumn,
    DoubleColumn,
    BeginAbstract,
    EndAbstract,
    Institution,
    Author,
    Bold,
    DateOnPage,
    DisplayEnd,
    DisplayStart,
    TableEnd,
    TableStart,
    BeginEquation,
    EndEquation,
    BeginFootnote,
    EndFootnote,
    Italic,
    BeginAndIndentParagraph,
    EndKeep,
    BeginKeep,
    StartKeep,
    IncreaseTypeSize,
    LeftAlignedParagraph,
    ChangeDate,
    NumberedHeading,
    NormalType,
    BeginParagraph,
    Roman,
    ReleasePaper,
    EndIndent,
    BeginIndent,
    Signature,
    SectionHeading,
    DecreaseTypeSize,
    Title,
    TableHeading,
    Underline,
    BeginCodeBlock,
    EndCodeBlock,
    Html,
}

impl Macro {
    /// Name as written after the leading dot.
    pub const fn name(self) -> &'static str {
        match self {
            Macro::SingleColumn => "1C",
            Macro::DoubleColumn => "2C",
            Macro::BeginAbstract => "AB",
            Macro::EndAbstract => "AE",
            Macro::Institution => "AI",
            Macro::Author => "AU",
            Macro::Bold => "B",
            Macro::DateOnPage => "DA",
            Macro::DisplayEnd => "DE",
            Macro::DisplayStart => "DS",
            Macro::TableEnd => "TE",
            Macro::TableStart => "TS",
            Macro::BeginEquation => "EQ",
            Macro::EndEquation => "EN",
            Macro::BeginFootnote => "FS",
            Macro::EndFootnote => "FE",
            Macro::Italic => "I",
            Macro::BeginAndIndentParagraph => "IP",
            Macro::EndKeep => "KE",
            Macro::BeginKeep => "KF",
            Macro::StartKeep => "KS",
            Macro::IncreaseTypeSize => "LG",
            Macro::LeftAlignedParagraph => "LP",
            Macro::ChangeDate => "ND",
            Macro::NumberedHeading => "NH",
            Macro::NormalType => "NL",
            Macro::BeginParagraph => "PP",
            Macro::Roman => "R",
            Macro::ReleasePaper => "RP",
            Macro::EndIndent => "RE",
            Macro::BeginIndent => "RS",
            Macro::Signature => "SG",
            Macro::SectionHeading => "SH",
            Macro::DecreaseTypeSize => "SM",
            Macro::Title => "TL",
            Macro::TableHeading => "TH",
            Macro::Underline => "UL",
            Macro::BeginCodeBlock => "P1",
            Macro::EndCodeBlock => "P2",
            Macro::Html => "HTML",
        }
    }
}

/// A macro argument. Only strings and integers can be passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg<'a> {
    Str(&'a str),
    Int(i64),
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(s: &'a str) -> Self {
        Arg::Str(s)
    }
}

impl<'a> From<&'a String> for Arg<'a> {
    fn from(s: &'a String) -> Self {
        Arg::Str(s.as_str())
    }
}

impl From<i64> for Arg<'_> {
    fn from(n: i64) -> Self {
        Arg::Int(n)
    }
}

impl From<i32> for Arg<'_> {
    fn from(n: i32) -> Self {
        Arg::Int(n.into())
    }
}

impl From<u32> for Arg<'_> {
    fn from(n: u32) -> Self {
        Arg::Int(n.into())
    }
}

/// Values above `i64::MAX` are clamped to `i64::MAX`.
impl From<usize> for Arg<'_> {
    fn from(n: usize) -> Self {
        Arg::Int(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

/// Format `.NAME arg1 arg2\n`.
///
/// String arguments are substituted verbatim: nothing is quoted or escaped.
pub fn ms_print(cmd: Macro, args: &[Arg<'_>]) -> String {
    let mut line = String::with_capacity(8);
    line.push('.');
    line.push_str(cmd.name());
    for arg in args {
        line.push(' ');
        match arg {
            Arg::Str(s) => line.push_str(s),
            Arg::Int(n) => line.push_str(&n.to_string()),
        }
    }
    line.push('\n');
    line
}
