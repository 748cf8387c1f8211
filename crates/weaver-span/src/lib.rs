//! Position, offset, and span translation for the Weaver language tooling.
//!
//! Every semantic request locates a region of a file, and that region
//! travels through several coordinate systems on the way:
//!
//! - [`TokenPos`]: parser positions in an address space shared by all files
//!   of a [`FileSet`], grouped into a [`Range`] bound to its file
//! - byte offsets from the start of a file
//! - one-based line and byte-column pairs, carried by [`Point`] and [`Span`]
//!   on the protocol side
//!
//! [`SpanConverter`] is the only place aware of all of them. It never panics
//! on stale or malformed input; failures are typed [`SpanError`]s whose
//! [`ErrorKind`] tells callers whether the input was bad, the snapshot was
//! stale, or the file abstraction misbehaved. The last case is also reported
//! to a [`DefectReporter`].
//!
//! # Core types
//!
//! - [`AddressableFile`]: the file abstraction supplied by parsers
//! - [`TokenFile`] and [`FileSet`]: the in-crate implementation
//! - [`Point`], [`PointSpec`] and [`Span`]: resolved protocol-facing locations
//! - [`Range`]: analysis-facing token positions
//! - [`ConverterConfig`]: end-of-file rendering policy
//!
//! # Example
//!
//! ```
//! use weaver_span::{AddressableFile, ConverterConfig, Range, SpanConverter, TokenFile};
//!
//! let file = TokenFile::from_content("main.go", 1, "package main\nfunc main() {}\n")?;
//! let converter = SpanConverter::new(ConverterConfig::default());
//!
//! // Analysis side: `main` in `func main`.
//! let range = Range::new(&file, file.pos(18), file.pos(22));
//! let span = converter.range_span(&range)?;
//! assert_eq!(span.to_string(), "main.go:2:6-2:10");
//!
//! // Back again, against the same generation.
//! let back = converter.span_range(&span, &file)?;
//! assert_eq!((back.start(), back.end()), (range.start(), range.end()));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod convert;
mod defect;
mod error;
mod file;
mod point;
mod pos;
mod range;
mod span;
mod token_file;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::{ConverterConfig, EofPolicy, EofPolicyParseError};
pub use convert::SpanConverter;
pub use defect::{CollaboratorDefect, DefectReporter, DefectSite, TracingDefectReporter};
pub use error::{ContractViolation, Endpoint, ErrorKind, SpanError, TokenFileError};
pub use file::{AddressableFile, Location};
pub use point::{Point, PointSpec};
pub use pos::TokenPos;
pub use range::Range;
pub use span::{FileIdentity, Span};
pub use token_file::{FileSet, LineDirective, TokenFile};

#[cfg(test)]
mod tests;
