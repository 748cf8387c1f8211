//! Conversions between token positions, byte offsets, line/column pairs,
//! [`Range`]s, and [`Span`]s.
//!
//! Every conversion is a pure function of its inputs. Lookups on the
//! [`AddressableFile`] are only made with arguments already checked against
//! the file's bounds, and their answers are checked in turn: a file that
//! contradicts itself is reported to the [`DefectReporter`] and surfaces as
//! [`SpanError::CollaboratorDefect`] rather than as a panic.
//!
//! Columns are UTF-8 byte columns throughout. Re-encoding them as UTF-16
//! code units for the wire is left to the protocol layer.

use crate::config::{ConverterConfig, EofPolicy};
use crate::defect::{CollaboratorDefect, DefectReporter, DefectSite, TracingDefectReporter};
use crate::error::{Endpoint, SpanError};
use crate::file::{AddressableFile, Location};
use crate::point::{Point, PointSpec};
use crate::pos::TokenPos;
use crate::range::Range;
use crate::span::{FileIdentity, Span};

/// The conversion engine.
///
/// Cheap to clone and safe to share between threads; it holds only its
/// configuration and the reporter used for collaborator defects.
///
/// # Example
///
/// ```
/// use weaver_span::{ConverterConfig, SpanConverter, TokenFile};
///
/// let file = TokenFile::from_content("main.go", 1, "package main\nfunc main() {}\n")?;
/// let converter = SpanConverter::new(ConverterConfig::default());
///
/// assert_eq!(converter.offset_to_line_column(&file, 13)?, (2, 1));
/// assert_eq!(converter.offset_to_line_column(&file, 28)?, (3, 1));
/// assert_eq!(converter.line_column_to_offset(&file, 3, 1)?, 28);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct SpanConverter<R = TracingDefectReporter> {
    config: ConverterConfig,
    reporter: R,
}

impl SpanConverter {
    /// Creates a converter that reports defects through `tracing`.
    #[must_use]
    pub const fn new(config: ConverterConfig) -> Self {
        Self::with_reporter(config, TracingDefectReporter::new())
    }
}

impl Default for SpanConverter {
    fn default() -> Self {
        Self::new(ConverterConfig::default())
    }
}

impl<R> SpanConverter<R>
where
    R: DefectReporter,
{
    /// Creates a converter with an injected defect reporter.
    #[must_use]
    pub const fn with_reporter(config: ConverterConfig, reporter: R) -> Self {
        Self { config, reporter }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Returns the defect reporter.
    #[must_use]
    pub const fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Converts a [`Range`] to a [`Span`] using the range's own file.
    ///
    /// # Errors
    ///
    /// See [`file_span`](Self::file_span).
    pub fn range_span<F>(&self, range: &Range<'_, F>) -> Result<Span, SpanError>
    where
        F: AddressableFile + ?Sized,
    {
        self.file_span(range.file(), range.start(), range.end())
    }

    /// Builds a fully resolved [`Span`] covering `start..end` in `file`.
    ///
    /// An invalid `end` produces a point span at `start`.
    ///
    /// # Errors
    ///
    /// - [`SpanError::InvalidPosition`] when `start` is invalid or either
    ///   position lies outside `file`.
    /// - [`SpanError::CrossFileSpan`] when a line directive places the two
    ///   ends in different files.
    /// - [`SpanError::InvertedSpan`] when `end` precedes `start`.
    pub fn file_span<F>(&self, file: &F, start: TokenPos, end: TokenPos) -> Result<Span, SpanError>
    where
        F: AddressableFile + ?Sized,
    {
        if !start.is_valid() {
            return Err(SpanError::invalid_position(
                start,
                file.base(),
                file.end().get(),
            ));
        }
        let start_offset = self.offset(file, start)?;
        let start_location = self.position_from_offset(file, start_offset)?;
        let start_point = Point::resolved(start_location.line, start_location.column, start_offset);

        let end_point = if end.is_valid() {
            let end_offset = self.offset(file, end)?;
            let end_location = self.position_from_offset(file, end_offset)?;
            if end_location.filename != start_location.filename {
                return Err(SpanError::cross_file(
                    start_location.filename,
                    end_location.filename,
                ));
            }
            Point::resolved(end_location.line, end_location.column, end_offset)
        } else {
            start_point
        };

        Span::new(
            FileIdentity::new(start_location.filename),
            start_point,
            end_point,
        )
    }

    /// Translates a byte offset into a filename, line, and byte column.
    ///
    /// The end-of-file offset follows the configured [`EofPolicy`]; with the
    /// default it is reported as column 1 of the line after the last one.
    ///
    /// # Errors
    ///
    /// Returns [`SpanError::OutOfRange`] when `offset` exceeds the file size,
    /// or when the sentinel line after the last one cannot be numbered.
    pub fn position_from_offset<'f, F>(
        &self,
        file: &'f F,
        offset: usize,
    ) -> Result<Location<'f>, SpanError>
    where
        F: AddressableFile + ?Sized,
    {
        let location = self.locate(file, offset)?;
        if offset == file.size() && self.config.eof_policy() == EofPolicy::SentinelLine {
            return Self::sentinel(file, location);
        }
        Ok(location)
    }

    /// Looks up the location of `offset` as the file reports it, before any
    /// end-of-file policy applies.
    fn locate<'f, F>(&self, file: &'f F, offset: usize) -> Result<Location<'f>, SpanError>
    where
        F: AddressableFile + ?Sized,
    {
        let size = file.size();
        if offset > size {
            return Err(SpanError::out_of_range(format!(
                "offset {offset} is beyond EOF ({size}) in file {}",
                file.name()
            )));
        }
        let pos = self.pos_for_offset(file, offset)?;
        let location = file.location(pos);
        if location.line == 0 || location.column == 0 {
            return Err(self.defect(
                file,
                DefectSite::Location,
                format!(
                    "pos {pos} resolved to {}:{}:{} in file {}",
                    location.filename,
                    location.line,
                    location.column,
                    file.name()
                ),
            ));
        }
        Ok(location)
    }

    fn sentinel<'f, F>(file: &F, last: Location<'f>) -> Result<Location<'f>, SpanError>
    where
        F: AddressableFile + ?Sized,
    {
        let line = last.line.checked_add(1).ok_or_else(|| {
            SpanError::out_of_range(format!(
                "line {} of {} has no successor for end of file {}",
                last.line,
                last.filename,
                file.name()
            ))
        })?;
        Ok(Location {
            filename: last.filename,
            line,
            column: 1,
        })
    }

    /// Translates a token position into a byte offset.
    ///
    /// # Errors
    ///
    /// Returns [`SpanError::InvalidPosition`] when `pos` lies outside
    /// `[base, base + size]`.
    pub fn offset<F>(&self, file: &F, pos: TokenPos) -> Result<usize, SpanError>
    where
        F: AddressableFile + ?Sized,
    {
        let base = file.base();
        let end = file.end().get();
        if pos.get() < base || pos.get() > end {
            return Err(SpanError::invalid_position(pos, base, end));
        }
        Ok(pos.get() - base)
    }

    /// Maps `span` onto `file`, which may be a newer generation than the one
    /// the span was captured from.
    ///
    /// # Errors
    ///
    /// - [`SpanError::Bounds`] when either offset lies past the end of
    ///   `file`; the snapshot that produced the span is stale.
    /// - [`SpanError::PointMismatch`] when a point's line and column do not
    ///   name its offset in `file`. Either end-of-file rendering is accepted.
    /// - [`SpanError::CollaboratorDefect`] when the file maps an offset to a
    ///   position outside itself.
    pub fn span_range<'f, F>(&self, span: &Span, file: &'f F) -> Result<Range<'f, F>, SpanError>
    where
        F: AddressableFile + ?Sized,
    {
        let size = file.size();
        for (endpoint, point) in [(Endpoint::Start, span.start()), (Endpoint::End, span.end())] {
            if point.offset() > size {
                tracing::debug!(
                    target: "weaver_span::convert",
                    event = "stale_span",
                    file = file.name(),
                    endpoint = %endpoint,
                    offset = point.offset(),
                    size,
                    "span no longer fits the file"
                );
                return Err(SpanError::bounds(endpoint, point.offset(), size, file.name()));
            }
        }
        let start = self.checked_pos(file, Endpoint::Start, span.start())?;
        let end = self.checked_pos(file, Endpoint::End, span.end())?;
        Ok(Range::from_parts(file, start, end))
    }

    /// Maps a point's offset to a position after checking that its line and
    /// column name the same byte.
    fn checked_pos<F>(
        &self,
        file: &F,
        endpoint: Endpoint,
        point: &Point,
    ) -> Result<TokenPos, SpanError>
    where
        F: AddressableFile + ?Sized,
    {
        let offset = point.offset();
        let last = self.locate(file, offset)?;
        let claimed = (point.line(), point.column());
        let agrees = claimed == (last.line, last.column)
            || (offset == file.size()
                && Self::sentinel(file, last)
                    .is_ok_and(|sentinel| claimed == (sentinel.line, sentinel.column)));
        if !agrees {
            return Err(SpanError::PointMismatch {
                endpoint,
                line: point.line(),
                column: point.column(),
                offset,
                file: file.name().to_owned(),
            });
        }
        self.pos_for_offset(file, offset)
    }

    /// Translates a byte offset into a one-based line and byte column.
    ///
    /// # Errors
    ///
    /// See [`position_from_offset`](Self::position_from_offset).
    pub fn offset_to_line_column<F>(
        &self,
        file: &F,
        offset: usize,
    ) -> Result<(usize, usize), SpanError>
    where
        F: AddressableFile + ?Sized,
    {
        self.position_from_offset(file, offset)
            .map(|location| (location.line, location.column))
    }

    /// Translates a one-based line and byte column into a byte offset.
    ///
    /// The line after the last one is accepted at column 1 and denotes
    /// end-of-file. A column running past the end of its line continues into
    /// the following lines, as long as it stays inside the file.
    ///
    /// # Errors
    ///
    /// - [`SpanError::InvalidLine`] or [`SpanError::InvalidColumn`] for zero.
    /// - [`SpanError::OutOfRange`] when the coordinates lie past the end of
    ///   the file.
    /// - [`SpanError::CollaboratorDefect`] when the file has no start for a
    ///   line it claims to contain.
    pub fn line_column_to_offset<F>(
        &self,
        file: &F,
        line: usize,
        column: usize,
    ) -> Result<usize, SpanError>
    where
        F: AddressableFile + ?Sized,
    {
        if line == 0 {
            return Err(SpanError::InvalidLine { line });
        }
        if column == 0 {
            return Err(SpanError::InvalidColumn { column });
        }
        let line_max = file.line_count().saturating_add(1);
        if line > line_max {
            return Err(SpanError::out_of_range(format!(
                "line {line} is beyond end of file {line_max}"
            )));
        }
        if line == line_max {
            if column > 1 {
                return Err(SpanError::out_of_range(format!(
                    "column {column} is beyond end of file"
                )));
            }
            return Ok(file.size());
        }

        let line_start = file
            .line_start(line)
            .filter(|&start| file.contains(start))
            .ok_or_else(|| {
                self.defect(
                    file,
                    DefectSite::LineStart,
                    format!("line {line} is not in file {}", file.name()),
                )
            })?;
        let pos = line_start
            .checked_add(column - 1)
            .filter(|&pos| pos <= file.end())
            .ok_or_else(|| {
                SpanError::out_of_range(format!("column {column} is beyond end of file"))
            })?;
        self.offset(file, pos)
    }

    /// Resolves caller-supplied coordinates into a [`Point`].
    ///
    /// Line/column input is normalised: a column spilling past its line is
    /// re-expressed on the line it actually lands on.
    ///
    /// # Errors
    ///
    /// See [`position_from_offset`](Self::position_from_offset) and
    /// [`line_column_to_offset`](Self::line_column_to_offset).
    pub fn resolve_point<F>(&self, file: &F, spec: PointSpec) -> Result<Point, SpanError>
    where
        F: AddressableFile + ?Sized,
    {
        let offset = match spec {
            PointSpec::Offset(offset) => offset,
            PointSpec::LineColumn { line, column } => {
                self.line_column_to_offset(file, line, column)?
            }
        };
        let location = self.position_from_offset(file, offset)?;
        Ok(Point::resolved(location.line, location.column, offset))
    }

    /// Resolves caller-supplied coordinates into a [`Span`] of `file`.
    ///
    /// A missing `end` produces a point span.
    ///
    /// # Errors
    ///
    /// Fails as [`resolve_point`](Self::resolve_point) does for either end,
    /// and with [`SpanError::InvertedSpan`] when the end precedes the start.
    pub fn resolve_span<F>(
        &self,
        file: &F,
        start: PointSpec,
        end: Option<PointSpec>,
    ) -> Result<Span, SpanError>
    where
        F: AddressableFile + ?Sized,
    {
        let start_point = self.resolve_point(file, start)?;
        let end_point = match end {
            Some(spec) => self.resolve_point(file, spec)?,
            None => start_point,
        };
        Span::new(FileIdentity::new(file.name()), start_point, end_point)
    }

    /// Asks the file for the position of `offset` and checks the answer.
    fn pos_for_offset<F>(&self, file: &F, offset: usize) -> Result<TokenPos, SpanError>
    where
        F: AddressableFile + ?Sized,
    {
        let pos = file.pos(offset);
        if pos.get().checked_sub(file.base()) == Some(offset) {
            return Ok(pos);
        }
        Err(self.defect(
            file,
            DefectSite::OffsetLookup,
            format!(
                "offset {offset} of file {} mapped to pos {pos}, expected {}",
                file.name(),
                file.base().saturating_add(offset)
            ),
        ))
    }

    fn defect<F>(&self, file: &F, site: DefectSite, message: String) -> SpanError
    where
        F: AddressableFile + ?Sized,
    {
        let error = SpanError::collaborator_defect(message);
        self.reporter.collaborator_defect(&CollaboratorDefect {
            file: file.name(),
            site,
            error: &error,
        });
        error
    }
}
