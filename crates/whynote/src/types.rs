use crate::error::{Error, Result};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentinel author used when no identity could be resolved.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

// ============================================================================
// Range
// ============================================================================

/// A zero-based, half-open text span captured when the annotation was created.
///
/// Ranges are never re-anchored against live file content. The checked
/// constructor [`AnnotationRange::new`] rejects spans whose end precedes their
/// start; ranges read back from a store are taken as-is.
///
/// # JSON shape
///
/// ```json
/// { "startLine": 3, "startCharacter": 0, "endLine": 3, "endCharacter": 12 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationRange {
    pub start_line: u32,
    pub start_character: u32,
    pub end_line: u32,
    pub end_character: u32,
}

impl AnnotationRange {
    pub fn new(
        start_line: u32,
        start_character: u32,
        end_line: u32,
        end_character: u32,
    ) -> Result<Self> {
        let range = Self {
            start_line,
            start_character,
            end_line,
            end_character,
        };
        if range.is_ordered() {
            Ok(range)
        } else {
            Err(Error::Validation(format!(
                "range end {}:{} precedes start {}:{}",
                end_line, end_character, start_line, start_character
            )))
        }
    }

    /// A zero-width range at the start of `line`.
    pub fn line(line: u32) -> Self {
        Self {
            start_line: line,
            start_character: 0,
            end_line: line,
            end_character: 0,
        }
    }

    pub fn is_ordered(&self) -> bool {
        (self.start_line, self.start_character) <= (self.end_line, self.end_character)
    }
}

impl fmt::Display for AnnotationRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start_line, self.start_character, self.end_line, self.end_character
        )
    }
}

/// Parses `"L:C-L:C"`, `"L-L"` (whole lines) or a bare `"L"`. All numbers are
/// zero-based.
impl FromStr for AnnotationRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::Validation(format!("cannot parse range '{}'", s));
        let position = |p: &str| -> Result<(u32, Option<u32>)> {
            match p.split_once(':') {
                Some((line, ch)) => Ok((
                    line.trim().parse().map_err(|_| invalid())?,
                    Some(ch.trim().parse().map_err(|_| invalid())?),
                )),
                None => Ok((p.trim().parse().map_err(|_| invalid())?, None)),
            }
        };

        match s.split_once('-') {
            Some((start, end)) => {
                let (start_line, start_ch) = position(start)?;
                let (end_line, end_ch) = position(end)?;
                AnnotationRange::new(
                    start_line,
                    start_ch.unwrap_or(0),
                    end_line,
                    end_ch.unwrap_or(0),
                )
            }
            None => match position(s)? {
                (line, None) => Ok(AnnotationRange::line(line)),
                (line, Some(ch)) => AnnotationRange::new(line, ch, line, ch),
            },
        }
    }
}

// ============================================================================
// Annotation
// ============================================================================

/// A stored explanation attached to a range of one file.
///
/// `id` is the only lookup key. `file_path` is compared by exact string
/// equality, so callers should hand in the same absolute spelling every time.
/// `created_at` is kept as the original ISO-8601 string so a load/save cycle
/// reproduces it byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub id: String,
    pub file_path: String,
    pub range: AnnotationRange,
    pub text: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub author: String,
    pub created_at: String,
}

impl Annotation {
    /// Build a new annotation with a fresh UUID and the current timestamp.
    ///
    /// Fails with [`Error::Validation`] when `text` is empty or whitespace.
    /// An empty `author` is replaced with [`UNKNOWN_AUTHOR`].
    pub fn new(
        file_path: impl Into<String>,
        range: AnnotationRange,
        text: impl Into<String>,
        tags: Vec<String>,
        author: impl Into<String>,
    ) -> Result<Self> {
        let text = validate_text(text.into())?;
        let author = author.into();
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            file_path: file_path.into(),
            range,
            text,
            tags,
            author: if author.trim().is_empty() {
                UNKNOWN_AUTHOR.to_string()
            } else {
                author
            },
            created_at: now_iso8601(),
        })
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = created_at.into();
        self
    }
}

/// Trim and reject empty explanation text.
pub fn validate_text(text: String) -> Result<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation("explanation text is empty".into()));
    }
    if trimmed.len() == text.len() {
        Ok(text)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Split comma-separated tag input, trimming items and dropping empty ones.
/// Duplicates are kept.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ============================================================================
// Collection
// ============================================================================

/// The full, ordered set of annotations for one workspace. This is the unit
/// of persistence.
///
/// # JSON shape
///
/// ```json
/// { "annotations": [ { "id": "…", "filePath": "/src/a.rs", … } ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationCollection {
    pub annotations: Vec<Annotation>,
}

impl AnnotationCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Annotation> {
        self.annotations.iter()
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl From<Vec<Annotation>> for AnnotationCollection {
    fn from(annotations: Vec<Annotation>) -> Self {
        Self { annotations }
    }
}

impl<'a> IntoIterator for &'a AnnotationCollection {
    type Item = &'a Annotation;
    type IntoIter = std::slice::Iter<'a, Annotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.annotations.iter()
    }
}
