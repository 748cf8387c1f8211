//! Error types for position, offset, and span conversion.
//!
//! Failures fall into three families that callers treat differently:
//!
//! - [`ContractViolation`]: the caller broke a precondition of
//!   [`Range`](crate::Range) construction. This is a bug in the caller.
//! - [`SpanError`] with [`ErrorKind::Input`] or [`ErrorKind::Stale`]: bad
//!   client coordinates or a snapshot that no longer matches the content.
//!   Requests degrade; the server carries on.
//! - [`SpanError`] with [`ErrorKind::Collaborator`]: the file abstraction
//!   contradicted itself. These are also sent to the
//!   [`DefectReporter`](crate::DefectReporter).

use std::fmt;

use thiserror::Error;

use crate::pos::TokenPos;

/// Which end of a span an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// The start point.
    Start,
    /// The end point.
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Start => "start",
            Self::End => "end",
        };
        formatter.write_str(label)
    }
}

/// Coarse classification of a [`SpanError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed coordinates or positions supplied by the caller.
    Input,
    /// The span was captured against an older, longer file generation.
    Stale,
    /// The file abstraction violated its own invariants.
    Collaborator,
}

/// Recoverable conversion failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SpanError {
    /// A token position lies outside the file's address space.
    #[error("invalid pos: {pos} not in [{base}, {end}]")]
    InvalidPosition {
        /// The rejected position.
        pos: TokenPos,
        /// First position of the file.
        base: usize,
        /// End-of-file position of the file.
        end: usize,
    },

    /// An offset, line, or column lies beyond the end of the file.
    #[error("{message}")]
    OutOfRange {
        /// Description naming the coordinate and the limit it exceeded.
        message: String,
    },

    /// The start and end of a span resolve to different filenames.
    #[error("span begins in file {start_file:?} but ends in {end_file:?}")]
    CrossFileSpan {
        /// Filename reported for the start position.
        start_file: String,
        /// Filename reported for the end position.
        end_file: String,
    },

    /// A span offset does not fit the file it is being applied to.
    #[error("{endpoint} offset {offset} is past the end of the file {file} ({size} bytes)")]
    Bounds {
        /// The offending end of the span.
        endpoint: Endpoint,
        /// The span's offset for that end.
        offset: usize,
        /// Size of the file generation being converted against.
        size: usize,
        /// Name of the file.
        file: String,
    },

    /// A point's line and column name a different byte than its offset.
    #[error("{endpoint} point {line}:{column} does not match offset {offset} in file {file}")]
    PointMismatch {
        /// The offending end of the span.
        endpoint: Endpoint,
        /// Line carried by the point.
        line: usize,
        /// Column carried by the point.
        column: usize,
        /// Offset carried by the point.
        offset: usize,
        /// Name of the file.
        file: String,
    },

    /// Lines are one-based.
    #[error("invalid line: {line}")]
    InvalidLine {
        /// The rejected line number.
        line: usize,
    },

    /// Columns are one-based.
    #[error("invalid column: {column}")]
    InvalidColumn {
        /// The rejected column number.
        column: usize,
    },

    /// The start of a span lies after its end.
    #[error("span start offset {start} is after end offset {end}")]
    InvertedSpan {
        /// Start offset.
        start: usize,
        /// End offset.
        end: usize,
    },

    /// The file abstraction reported something outside its own bounds.
    #[error("file invariant violated: {message}")]
    CollaboratorDefect {
        /// Description of the inconsistency.
        message: String,
    },
}

impl SpanError {
    /// Creates an invalid position error for `pos` against the given bounds.
    #[must_use]
    pub const fn invalid_position(pos: TokenPos, base: usize, end: usize) -> Self {
        Self::InvalidPosition { pos, base, end }
    }

    /// Creates an out-of-range error.
    #[must_use]
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::OutOfRange {
            message: message.into(),
        }
    }

    /// Creates a cross-file span error.
    #[must_use]
    pub fn cross_file(start_file: impl Into<String>, end_file: impl Into<String>) -> Self {
        Self::CrossFileSpan {
            start_file: start_file.into(),
            end_file: end_file.into(),
        }
    }

    /// Creates a stale-bounds error.
    #[must_use]
    pub fn bounds(endpoint: Endpoint, offset: usize, size: usize, file: impl Into<String>) -> Self {
        Self::Bounds {
            endpoint,
            offset,
            size,
            file: file.into(),
        }
    }

    /// Creates a collaborator defect error.
    #[must_use]
    pub fn collaborator_defect(message: impl Into<String>) -> Self {
        Self::CollaboratorDefect {
            message: message.into(),
        }
    }

    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Bounds { .. } => ErrorKind::Stale,
            Self::CollaboratorDefect { .. } => ErrorKind::Collaborator,
            Self::InvalidPosition { .. }
            | Self::OutOfRange { .. }
            | Self::CrossFileSpan { .. }
            | Self::InvalidLine { .. }
            | Self::InvalidColumn { .. }
            | Self::InvertedSpan { .. }
            | Self::PointMismatch { .. } => ErrorKind::Input,
        }
    }
}

/// Preconditions of [`Range`](crate::Range) construction that the caller
/// broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ContractViolation {
    /// The start position is invalid or not inside the bound file.
    #[error("invalid start pos {pos} for file {file} spanning [{base}, {end}]")]
    InvalidStart {
        /// The rejected start position.
        pos: TokenPos,
        /// Name of the bound file.
        file: String,
        /// First position of the file.
        base: usize,
        /// End-of-file position of the file.
        end: usize,
    },

    /// The end position is valid but not inside the bound file.
    #[error("invalid end pos {pos} for file {file} spanning [{base}, {end}]")]
    InvalidEnd {
        /// The rejected end position.
        pos: TokenPos,
        /// Name of the bound file.
        file: String,
        /// First position of the file.
        base: usize,
        /// End-of-file position of the file.
        end: usize,
    },
}

/// Errors raised while building a [`TokenFile`](crate::TokenFile).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TokenFileError {
    /// Base zero collides with [`TokenPos::NONE`].
    #[error("file {file} cannot start at base 0")]
    ZeroBase {
        /// Name of the file.
        file: String,
    },

    /// `base + size` does not fit the address space.
    #[error("file {file} of {size} bytes does not fit at base {base}")]
    AddressOverflow {
        /// Name of the file.
        file: String,
        /// Requested base.
        base: usize,
        /// Requested size.
        size: usize,
    },

    /// A line table must start with offset zero.
    #[error("line table for {file} must start at offset 0")]
    MissingFirstLine {
        /// Name of the file.
        file: String,
    },

    /// Line starts must increase and stay inside the content.
    #[error("line {line} of {file} starts at invalid offset {offset}")]
    InvalidLineStart {
        /// Name of the file.
        file: String,
        /// One-based line whose start is invalid.
        line: usize,
        /// The rejected offset.
        offset: usize,
    },

    /// Line directives must be added in order, at line starts.
    #[error("line directive at offset {offset} of {file} is invalid: {reason}")]
    InvalidDirective {
        /// Name of the file.
        file: String,
        /// Offset the directive was attached to.
        offset: usize,
        /// Why the directive was rejected.
        reason: &'static str,
    },

    /// The file set ran out of address space.
    #[error("address space exhausted while adding {file}")]
    AddressSpaceExhausted {
        /// Name of the file that did not fit.
        file: String,
    },
}
