//! Protocol-facing regions: a file identity plus two resolved points.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ConverterConfig;
use crate::convert::SpanConverter;
use crate::error::SpanError;
use crate::file::AddressableFile;
use crate::point::Point;
use crate::range::Range;

/// Identity of the file a [`Span`] belongs to.
///
/// This is the filename reported by the file abstraction. Turning it into a
/// URI, or a URI back into a path, belongs to the protocol layer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileIdentity(String);

impl FileIdentity {
    /// Wraps a file name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the identity as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileIdentity {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl From<&str> for FileIdentity {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A region of one file with fully resolved endpoints.
///
/// The start never lies after the end. On the wire a span is
/// `{"fileURI": ..., "start": {line, column, offset}, "end": {...}}` with
/// one-based lines and byte columns.
///
/// # Example
///
/// ```
/// use weaver_span::{ConverterConfig, PointSpec, SpanConverter, TokenFile};
///
/// let file = TokenFile::from_content("main.go", 1, "package main\nfunc main() {}\n")?;
/// let span = SpanConverter::new(ConverterConfig::default()).resolve_span(
///     &file,
///     PointSpec::line_column(2, 6),
///     Some(PointSpec::line_column(2, 10)),
/// )?;
/// assert_eq!(span.to_string(), "main.go:2:6-2:10");
/// assert_eq!(span.len(), 4);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SpanFields")]
pub struct Span {
    #[serde(rename = "fileURI")]
    uri: FileIdentity,
    start: Point,
    end: Point,
}

impl Span {
    /// Builds a span from resolved points.
    ///
    /// # Errors
    ///
    /// Returns [`SpanError::InvertedSpan`] when `start` lies after `end`.
    pub fn new(uri: FileIdentity, start: Point, end: Point) -> Result<Self, SpanError> {
        if start.offset() > end.offset() {
            return Err(SpanError::InvertedSpan {
                start: start.offset(),
                end: end.offset(),
            });
        }
        Ok(Self { uri, start, end })
    }

    /// Builds an empty span at `point`.
    #[must_use]
    pub const fn point(uri: FileIdentity, point: Point) -> Self {
        Self {
            uri,
            start: point,
            end: point,
        }
    }

    /// Identity of the file.
    #[must_use]
    pub const fn uri(&self) -> &FileIdentity {
        &self.uri
    }

    /// Start point (inclusive).
    #[must_use]
    pub const fn start(&self) -> &Point {
        &self.start
    }

    /// End point (exclusive).
    #[must_use]
    pub const fn end(&self) -> &Point {
        &self.end
    }

    /// Returns `true` when the span covers no bytes.
    #[must_use]
    pub fn is_point(&self) -> bool {
        self.start == self.end
    }

    /// Number of bytes covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.offset() - self.start.offset()
    }

    /// Maps the span back onto `file` with the default converter.
    ///
    /// `file` may be a newer generation than the one the span was captured
    /// from; a span reaching past its end fails with
    /// [`SpanError::Bounds`].
    ///
    /// # Errors
    ///
    /// See [`SpanConverter::span_range`].
    pub fn to_range<'f, F>(&self, file: &'f F) -> Result<Range<'f, F>, SpanError>
    where
        F: AddressableFile + ?Sized,
    {
        SpanConverter::new(ConverterConfig::default()).span_range(self, file)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:{}", self.uri, self.start)?;
        if !self.is_point() {
            write!(formatter, "-{}", self.end)?;
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct SpanFields {
    #[serde(rename = "fileURI")]
    uri: FileIdentity,
    start: Point,
    end: Option<Point>,
}

impl TryFrom<SpanFields> for Span {
    type Error = SpanError;

    fn try_from(fields: SpanFields) -> Result<Self, Self::Error> {
        let end = fields.end.unwrap_or(fields.start);
        Self::new(fields.uri, fields.start, end)
    }
}
