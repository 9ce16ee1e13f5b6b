//! Dotted paths into JSON documents.
//!
//! Product pages keep their state in deeply nested JSON where any level may
//! be missing depending on the listing. Lookups therefore never fail: a
//! missing key, an out-of-range index or a `null` along the way all yield
//! `None`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from parsing a path string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("path is empty")]
    Empty,

    #[error("empty segment {position} in path '{path}'")]
    EmptySegment { position: usize, path: String },

    #[error("unterminated quote in path '{0}'")]
    UnterminatedQuote(String),
}

/// One step of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Object key
    Key(String),
    /// Array position (also tried as a decimal key on objects)
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Index(index) => write!(f, "{}", index),
            Segment::Key(key)
                if key.is_empty()
                    || key.contains(['.', '"', '\\'])
                    || key.parse::<usize>().is_ok() =>
            {
                write!(f, "\"{}\"", key.replace('\\', "\\\\").replace('"', "\\\""))
            }
            Segment::Key(key) => write!(f, "{}", key),
        }
    }
}

/// Path into a JSON document, e.g. `props.pageProps.product.skus.0.skuId`.
///
/// Numeric segments index arrays; wrap a segment in double quotes to force
/// it to be read as an object key (`"0"`, `"a.b"`). Inside quotes, `\"` and
/// `\\` stand for a literal quote and backslash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JsonPath {
    segments: Vec<Segment>,
}

impl JsonPath {
    /// Builds a path from segments. An empty path addresses the whole document.
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns a new path with `segment` appended.
    pub fn join(&self, segment: Segment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// Follows the path through `value`. `null` counts as absent.
    pub fn lookup<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(value, |current, segment| match (segment, current) {
                (Segment::Key(key), Value::Object(map)) => map.get(key),
                (Segment::Index(index), Value::Array(items)) => items.get(*index),
                (Segment::Index(index), Value::Object(map)) => map.get(&index.to_string()),
                _ => None,
            })
            .filter(|found| !found.is_null())
    }
}

impl FromStr for JsonPath {
    type Err = PathError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        if path.trim().is_empty() {
            return Err(PathError::Empty);
        }

        let mut segments = Vec::new();
        let mut current = String::new();
        let mut quoted = false;
        let mut in_quote = false;
        let mut escaped = false;

        let mut finish = |current: &mut String, quoted: &mut bool| -> Result<(), PathError> {
            let raw = std::mem::take(current);
            let was_quoted = std::mem::replace(quoted, false);

            let segment = if was_quoted {
                Segment::Key(raw)
            } else if raw.is_empty() {
                return Err(PathError::EmptySegment {
                    position: segments.len(),
                    path: path.to_string(),
                });
            } else if let Ok(index) = raw.parse::<usize>() {
                Segment::Index(index)
            } else {
                Segment::Key(raw)
            };

            segments.push(segment);
            Ok(())
        };

        for c in path.chars() {
            match c {
                _ if escaped => {
                    current.push(c);
                    escaped = false;
                }
                '\\' if in_quote => escaped = true,
                '"' => {
                    in_quote = !in_quote;
                    quoted = true;
                }
                '.' if !in_quote => finish(&mut current, &mut quoted)?,
                _ => current.push(c),
            }
        }

        if in_quote {
            return Err(PathError::UnterminatedQuote(path.to_string()));
        }
        finish(&mut current, &mut quoted)?;

        Ok(Self { segments })
    }
}

impl TryFrom<String> for JsonPath {
    type Error = PathError;

    fn try_from(path: String) -> Result<Self, Self::Error> {
        path.parse()
    }
}

impl From<JsonPath> for String {
    fn from(path: JsonPath) -> Self {
        path.to_string()
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// Parses `path` and looks it up in `value` in one go.
pub fn get_from_json<'a>(value: &'a Value, path: &str) -> Result<Option<&'a Value>, PathError> {
    let path: JsonPath = path.parse()?;
    Ok(path.lookup(value))
}
