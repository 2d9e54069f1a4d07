//! Front matter title block.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::{Error, Result};

/// Document metadata carried by the front matter heading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleBlock {
    /// Document title
    pub title: String,

    /// Publication date
    pub date: PostDate,

    /// URL slug (kept, not rendered)
    pub slug: String,

    /// Authors in listing order
    pub authors: Vec<Author>,

    /// Abstract text
    #[serde(rename = "abstract")]
    pub abstract_text: String,

    /// Tags (kept, not rendered)
    pub tags: BTreeSet<String>,
}

impl TitleBlock {
    /// Deserialize a title block from a YAML payload.
    pub fn from_yaml(payload: &str) -> Result<Self> {
        let block: TitleBlock = serde_yaml::from_str(payload)?;
        log::debug!(
            "Parsed title block {:?} with {} author(s)",
            block.title,
            block.authors.len()
        );
        Ok(block)
    }

    /// Check if an abstract was given.
    pub fn has_abstract(&self) -> bool {
        !self.abstract_text.is_empty()
    }
}

/// A document author.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    /// Full name
    pub name: String,

    /// Institution or employer
    pub affiliation: String,

    /// Contact address
    pub email: String,
}

impl Author {
    /// Create an author record.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        affiliation: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            affiliation: affiliation.into(),
            email: email.into(),
        }
    }

    /// Affiliations of one character or less count as absent.
    pub fn has_affiliation(&self) -> bool {
        self.affiliation.len() > 1
    }
}

/// A date written in whatever format the author preferred.
///
/// Time zone designators are accepted and dropped; the date is kept as
/// written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PostDate(pub NaiveDateTime);

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%b %e %H:%M:%S %Y",
    "%b %e, %Y %H:%M:%S",
    "%b %e, %Y %H:%M",
    "%d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%b %e, %Y",
    "%B %e, %Y",
    "%b %e %Y",
    "%B %e %Y",
    "%e %b %Y",
    "%e %B %Y",
    "%e %b, %Y",
];

fn weekday_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^(?:mon|tue|wed|thu|fri|sat|sun)[a-z]*\.?,?\s+").unwrap())
}

fn zone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s(?:UTC|GMT|Z|[A-Z]{1,4}T|[+-]\d{2}:?\d{2})\b").unwrap())
}

impl PostDate {
    /// The zero date, used when the front matter has no date.
    pub fn zero() -> Self {
        let date = NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN);
        PostDate(date.and_time(NaiveTime::MIN))
    }

    /// Parse a loosely formatted date.
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_text(text).map_err(Error::FrontMatter)
    }

    fn parse_text(text: &str) -> std::result::Result<Self, String> {
        let text = text.trim();
        if text.is_empty() {
            return Err("empty date".into());
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Ok(PostDate(dt.naive_local()));
        }
        if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
            return Ok(PostDate(dt.naive_local()));
        }

        let cleaned = weekday_regex().replace(text, "");
        let cleaned = zone_regex().replace_all(&cleaned, " ");
        let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

        for format in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(&cleaned, format) {
                return Ok(PostDate(dt));
            }
        }
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(&cleaned, format) {
                return Ok(PostDate(date.and_time(NaiveTime::MIN)));
            }
        }

        Err(format!("unrecognised date: {:?}", text))
    }

    /// Calendar date.
    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    /// Date in the form `.ND` expects, e.g. `Feb 22, 2020`.
    pub fn ms_format(&self) -> String {
        self.0.format("%b %-d, %Y").to_string()
    }
}

impl Default for PostDate {
    fn default() -> Self {
        Self::zero()
    }
}

impl FromStr for PostDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PostDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S"))
    }
}

impl Serialize for PostDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PostDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        // `date:` and `date: ~` leave the zero date, like a missing key.
        match Option::<String>::deserialize(deserializer)? {
            Some(text) if !text.trim().is_empty() => {
                PostDate::parse_text(&text).map_err(serde::de::Error::custom)
            }
            _ => Ok(PostDate::zero()),
        }
    }
}
