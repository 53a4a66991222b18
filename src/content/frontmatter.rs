//! Front-matter parsing

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Format used when writing a post back to disk. Also the first entry of the
/// accepted parse formats, so written files reload unchanged.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Header parsing and validation errors
#[derive(Error, Debug)]
pub enum HeaderError {
    #[error("missing opening `---` delimiter")]
    MissingOpeningFence,

    #[error("missing closing `---` delimiter")]
    MissingClosingFence,

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("unrecognized date `{0}`")]
    InvalidDate(String),
}

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Raw header data from a content file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub draft: bool,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Vec<String>,
}

impl FrontMatter {
    /// Split the `---` delimited header from the body and decode it.
    /// Returns (front_matter, body).
    pub fn parse(content: &str) -> Result<(Self, &str), HeaderError> {
        let rest = content
            .strip_prefix("---")
            .ok_or(HeaderError::MissingOpeningFence)?;

        let end = rest.find("\n---").ok_or(HeaderError::MissingClosingFence)?;
        let yaml = &rest[..end];
        let body = rest[end + 4..].trim_start_matches(['\n', '\r']);

        let header = if yaml.trim().is_empty() {
            FrontMatter::default()
        } else {
            serde_yaml::from_str(yaml)?
        };

        Ok((header, body))
    }

    /// Serialize back to the YAML header shape (without the fences).
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// The `title` field, required and non-blank.
    pub fn required_title(&self) -> Result<String, HeaderError> {
        self.title
            .as_ref()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .ok_or(HeaderError::MissingField("title"))
    }

    /// The `date` field, required and parseable.
    pub fn required_date(&self) -> Result<DateTime<Local>, HeaderError> {
        let raw = self
            .date
            .as_deref()
            .ok_or(HeaderError::MissingField("date"))?;
        parse_date_string(raw).ok_or_else(|| HeaderError::InvalidDate(raw.to_string()))
    }
}

/// Parse a date string in the accepted ISO-8601-like formats
fn parse_date_string(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    let formats = [
        DATE_FORMAT,
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%Y-%m-%dT%H:%M:%S",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            if let Some(local) = dt.and_local_timezone(Local).earliest() {
                return Some(local);
            }
        }
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            let dt = d.and_hms_opt(0, 0, 0)?;
            if let Some(local) = dt.and_local_timezone(Local).earliest() {
                return Some(local);
            }
        }
    }

    // Full RFC 3339 / ISO 8601 with offset
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    None
}
