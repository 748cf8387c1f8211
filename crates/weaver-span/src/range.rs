//! Analysis-facing regions: token positions bound to their file.

use crate::config::ConverterConfig;
use crate::convert::SpanConverter;
use crate::error::{ContractViolation, SpanError};
use crate::file::AddressableFile;
use crate::pos::TokenPos;
use crate::span::Span;

/// A pair of token positions together with the file that owns them.
///
/// Carrying the file keeps the range self-contained: converting it never
/// needs a lookup in some wider file set, and it cannot silently be applied
/// to another file's address space.
///
/// # Example
///
/// ```
/// use weaver_span::{AddressableFile, Range, TokenFile, TokenPos};
///
/// let file = TokenFile::from_content("main.go", 1, "package main\n")?;
/// let range = Range::new(&file, file.pos(8), TokenPos::NONE);
/// assert!(range.is_point());
/// # Ok::<(), weaver_span::TokenFileError>(())
/// ```
#[derive(Debug)]
pub struct Range<'f, F: ?Sized> {
    file: &'f F,
    start: TokenPos,
    end: TokenPos,
}

impl<F: ?Sized> Clone for Range<'_, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: ?Sized> Copy for Range<'_, F> {}

impl<'f, F> Range<'f, F>
where
    F: AddressableFile + ?Sized,
{
    /// Binds `start..end` to `file`.
    ///
    /// An invalid `end` ([`TokenPos::NONE`]) is replaced by `start`.
    ///
    /// # Panics
    ///
    /// Panics when `start` is not a position of `file`, or `end` is valid but
    /// not a position of `file`. Passing a position from another file is a
    /// bug in the caller; [`try_new`](Self::try_new) surfaces it as a value
    /// instead.
    #[must_use]
    pub fn new(file: &'f F, start: TokenPos, end: TokenPos) -> Self {
        match Self::try_new(file, start, end) {
            Ok(range) => range,
            Err(violation) => panic!("{violation}"),
        }
    }

    /// Binds `start..end` to `file`, reporting bad positions as a value.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::InvalidStart`] when `start` is not a
    /// position of `file`, and [`ContractViolation::InvalidEnd`] when `end`
    /// is valid but belongs elsewhere.
    pub fn try_new(file: &'f F, start: TokenPos, end: TokenPos) -> Result<Self, ContractViolation> {
        if !start.is_valid() || !file.contains(start) {
            return Err(ContractViolation::InvalidStart {
                pos: start,
                file: file.name().to_owned(),
                base: file.base(),
                end: file.end().get(),
            });
        }
        if !end.is_valid() {
            return Ok(Self {
                file,
                start,
                end: start,
            });
        }
        if !file.contains(end) {
            return Err(ContractViolation::InvalidEnd {
                pos: end,
                file: file.name().to_owned(),
                base: file.base(),
                end: file.end().get(),
            });
        }
        Ok(Self { file, start, end })
    }

    /// Assembles a range from positions already checked against `file`.
    pub(crate) const fn from_parts(file: &'f F, start: TokenPos, end: TokenPos) -> Self {
        Self { file, start, end }
    }

    /// The file the positions belong to.
    #[must_use]
    pub const fn file(&self) -> &'f F {
        self.file
    }

    /// Start position.
    #[must_use]
    pub const fn start(&self) -> TokenPos {
        self.start
    }

    /// End position.
    #[must_use]
    pub const fn end(&self) -> TokenPos {
        self.end
    }

    /// Returns `true` for a cursor location rather than a selection.
    #[must_use]
    pub fn is_point(&self) -> bool {
        self.start == self.end
    }

    /// Number of bytes from start to end, zero when the end precedes the
    /// start.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.get().saturating_sub(self.start.get())
    }

    /// Converts the range to a [`Span`] with the default converter.
    ///
    /// # Errors
    ///
    /// See [`SpanConverter::file_span`].
    pub fn span(&self) -> Result<Span, SpanError> {
        SpanConverter::new(ConverterConfig::default()).range_span(self)
    }
}
