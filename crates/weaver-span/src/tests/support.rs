//! Shared fixtures and file doubles.

use std::sync::Arc;

use rstest::fixture;

use crate::test_support::RecordingDefectReporter;
use crate::{AddressableFile, ConverterConfig, Location, SpanConverter, TokenFile, TokenPos};

/// Content used by most scenarios: 28 bytes, two lines, trailing newline.
pub const MAIN_GO: &str = "package main\nfunc main() {}\n";

/// Two lines of `MAIN_GO` at base 1.
#[fixture]
pub fn main_file() -> TokenFile {
    TokenFile::from_content("main.go", 1, MAIN_GO)
        .unwrap_or_else(|error| panic!("fixture file: {error}"))
}

/// Converter with the default configuration.
#[fixture]
pub fn converter() -> SpanConverter {
    SpanConverter::new(ConverterConfig::default())
}

/// Converter that records defects, plus a handle to the recorder.
#[must_use]
pub fn recording_converter() -> (
    SpanConverter<Arc<RecordingDefectReporter>>,
    Arc<RecordingDefectReporter>,
) {
    let reporter = Arc::new(RecordingDefectReporter::new());
    let converter = SpanConverter::with_reporter(ConverterConfig::default(), Arc::clone(&reporter));
    (converter, reporter)
}

/// Builds a file from `content` at base 1.
#[must_use]
pub fn file_with(name: &str, content: &str) -> TokenFile {
    TokenFile::from_content(name, 1, content)
        .unwrap_or_else(|error| panic!("test file {name}: {error}"))
}

/// The way a [`MisbehavingFile`] contradicts itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Misbehaviour {
    /// `line_start` returns `None` for every line.
    MissingLineStarts,
    /// `line_start` returns a position past the end of the file.
    LineStartPastEnd,
    /// `pos` returns positions shifted past the file's bounds.
    ShiftedPositions,
    /// `location` reports line zero.
    ZeroLines,
    /// `location` reports the largest representable line.
    MaxLines,
}

/// Wraps a well-formed file and breaks one of its invariants.
#[derive(Debug)]
pub struct MisbehavingFile {
    inner: TokenFile,
    misbehaviour: Misbehaviour,
}

impl MisbehavingFile {
    pub fn new(inner: TokenFile, misbehaviour: Misbehaviour) -> Self {
        Self {
            inner,
            misbehaviour,
        }
    }
}

impl AddressableFile for MisbehavingFile {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn base(&self) -> usize {
        self.inner.base()
    }

    fn size(&self) -> usize {
        self.inner.size()
    }

    fn line_count(&self) -> usize {
        self.inner.line_count()
    }

    fn line_start(&self, line: usize) -> Option<TokenPos> {
        match self.misbehaviour {
            Misbehaviour::MissingLineStarts => None,
            Misbehaviour::LineStartPastEnd => self.inner.end().checked_add(100),
            Misbehaviour::ShiftedPositions
            | Misbehaviour::ZeroLines
            | Misbehaviour::MaxLines => self.inner.line_start(line),
        }
    }

    fn pos(&self, offset: usize) -> TokenPos {
        let pos = self.inner.pos(offset);
        match self.misbehaviour {
            Misbehaviour::ShiftedPositions => pos.checked_add(1_000).unwrap_or(pos),
            Misbehaviour::MissingLineStarts
            | Misbehaviour::LineStartPastEnd
            | Misbehaviour::ZeroLines
            | Misbehaviour::MaxLines => pos,
        }
    }

    fn location(&self, pos: TokenPos) -> Location<'_> {
        let location = self.inner.location(pos);
        match self.misbehaviour {
            Misbehaviour::ZeroLines => Location { line: 0, ..location },
            Misbehaviour::MaxLines => Location {
                line: usize::MAX,
                ..location
            },
            Misbehaviour::MissingLineStarts
            | Misbehaviour::LineStartPastEnd
            | Misbehaviour::ShiftedPositions => location,
        }
    }
}
