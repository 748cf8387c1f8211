//! Resolved locations within a file.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::SpanError;

/// Coordinates for a location before they have been checked against a file.
///
/// Callers supply whichever form they have; the
/// [`SpanConverter`](crate::SpanConverter) derives the other and returns a
/// [`Point`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointSpec {
    /// One-based line and one-based byte column.
    LineColumn {
        /// One-based line number.
        line: usize,
        /// One-based byte column.
        column: usize,
    },
    /// Zero-based byte offset from the start of the file.
    Offset(usize),
}

impl PointSpec {
    /// Line/column coordinates.
    #[must_use]
    pub const fn line_column(line: usize, column: usize) -> Self {
        Self::LineColumn { line, column }
    }

    /// Byte-offset coordinates.
    #[must_use]
    pub const fn offset(offset: usize) -> Self {
        Self::Offset(offset)
    }
}

/// A location with line, column, and offset all populated.
///
/// Points built by the [`SpanConverter`](crate::SpanConverter) carry three
/// coordinates that agree. Deserialization only checks the one-based fields;
/// [`SpanConverter::span_range`](crate::SpanConverter::span_range) rejects a
/// point whose line and column do not name its offset. Equality, ordering,
/// and hashing use the offset alone; line and column are a derived view of
/// it.
///
/// # Example
///
/// ```
/// use weaver_span::{ConverterConfig, PointSpec, SpanConverter, TokenFile};
///
/// let file = TokenFile::from_content("main.go", 1, "package main\nfunc main() {}\n")?;
/// let converter = SpanConverter::new(ConverterConfig::default());
/// let point = converter.resolve_point(&file, PointSpec::offset(13))?;
/// assert_eq!((point.line(), point.column()), (2, 1));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "PointFields")]
pub struct Point {
    line: usize,
    column: usize,
    offset: usize,
}

impl Point {
    pub(crate) const fn resolved(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// One-based line number.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// One-based byte column.
    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// Zero-based byte offset.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset
    }
}

impl Eq for Point {}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        self.offset.cmp(&other.offset)
    }
}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.offset.hash(state);
    }
}

impl fmt::Display for Point {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:{}", self.line, self.column)
    }
}

#[derive(Deserialize)]
struct PointFields {
    line: usize,
    column: usize,
    offset: usize,
}

impl TryFrom<PointFields> for Point {
    type Error = SpanError;

    fn try_from(fields: PointFields) -> Result<Self, Self::Error> {
        if fields.line == 0 {
            return Err(SpanError::InvalidLine { line: fields.line });
        }
        if fields.column == 0 {
            return Err(SpanError::InvalidColumn {
                column: fields.column,
            });
        }
        Ok(Self::resolved(fields.line, fields.column, fields.offset))
    }
}
