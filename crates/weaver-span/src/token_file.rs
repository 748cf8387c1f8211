//! Line tables for files placed in a shared token address space.
//!
//! [`TokenFile`] is the reference [`AddressableFile`]: an immutable line
//! table plus optional line directives. [`FileSet`] hands out
//! non-overlapping bases. A file set is an ordinary owned value; nothing in
//! the crate keeps one in global state, so every conversion receives its file
//! explicitly.

use std::sync::Arc;

use crate::error::TokenFileError;
use crate::file::{AddressableFile, Location};
use crate::pos::TokenPos;

/// Remaps positions at or after `offset` to another filename and line
/// numbering, as produced by `#line`-style inclusion directives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDirective {
    offset: usize,
    filename: String,
    line: usize,
}

impl LineDirective {
    /// Creates a directive: the line starting at `offset` is reported as
    /// `line` of `filename`.
    #[must_use]
    pub fn new(offset: usize, filename: impl Into<String>, line: usize) -> Self {
        Self {
            offset,
            filename: filename.into(),
            line,
        }
    }

    /// Offset of the first remapped line.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Filename reported for remapped positions.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Line number reported for the first remapped line.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }
}

/// An immutable line table for one file generation.
///
/// A line begins at offset zero and after every newline that is not the last
/// byte of the content, so a trailing newline does not open an extra line.
///
/// # Example
///
/// ```
/// use weaver_span::{AddressableFile, TokenFile};
///
/// let file = TokenFile::from_content("main.go", 1, "package main\nfunc main() {}\n")?;
/// assert_eq!(file.size(), 28);
/// assert_eq!(file.line_count(), 2);
/// # Ok::<(), weaver_span::TokenFileError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenFile {
    name: String,
    base: usize,
    size: usize,
    lines: Vec<usize>,
    directives: Vec<LineDirective>,
}

impl TokenFile {
    /// Builds a file by scanning `content` for newlines.
    ///
    /// # Errors
    ///
    /// Returns [`TokenFileError`] when `base` is zero or the file would not
    /// fit in the address space.
    pub fn from_content(
        name: impl Into<String>,
        base: usize,
        content: &str,
    ) -> Result<Self, TokenFileError> {
        let size = content.len();
        let mut lines = vec![0];
        lines.extend(
            content
                .bytes()
                .enumerate()
                .filter(|&(_, byte)| byte == b'\n')
                .map(|(index, _)| index + 1)
                .filter(|&start| start < size),
        );
        Self::build(name.into(), base, size, lines)
    }

    /// Builds a file from a precomputed table of line-start offsets.
    ///
    /// # Errors
    ///
    /// Returns [`TokenFileError`] when the table does not start at zero, is
    /// not strictly increasing, or reaches past the content.
    pub fn from_line_starts(
        name: impl Into<String>,
        base: usize,
        size: usize,
        line_starts: Vec<usize>,
    ) -> Result<Self, TokenFileError> {
        let name = name.into();
        if line_starts.first() != Some(&0) {
            return Err(TokenFileError::MissingFirstLine { file: name });
        }
        let misplaced = line_starts
            .iter()
            .zip(line_starts.iter().skip(1))
            .position(|(&previous, &start)| start <= previous || start >= size);
        if let Some(index) = misplaced {
            let offset = line_starts.get(index + 1).copied().unwrap_or_default();
            return Err(TokenFileError::InvalidLineStart {
                file: name,
                line: index + 2,
                offset,
            });
        }
        Self::build(name, base, size, line_starts)
    }

    fn build(
        name: String,
        base: usize,
        size: usize,
        lines: Vec<usize>,
    ) -> Result<Self, TokenFileError> {
        if base == 0 {
            return Err(TokenFileError::ZeroBase { file: name });
        }
        if base.checked_add(size).is_none() {
            return Err(TokenFileError::AddressOverflow {
                file: name,
                base,
                size,
            });
        }
        Ok(Self {
            name,
            base,
            size,
            lines,
            directives: Vec::new(),
        })
    }

    /// Adds a line directive and returns the updated file.
    ///
    /// # Errors
    ///
    /// Returns [`TokenFileError::InvalidDirective`] when the directive does
    /// not sit on a line start, precedes an earlier directive, names line
    /// zero, or numbers the remaining lines and the end-of-file line past
    /// `usize::MAX`.
    pub fn with_line_directive(mut self, directive: LineDirective) -> Result<Self, TokenFileError> {
        let reject = |reason| TokenFileError::InvalidDirective {
            file: self.name.clone(),
            offset: directive.offset,
            reason,
        };
        if directive.line == 0 {
            return Err(reject("line numbers are one-based"));
        }
        let Ok(index) = self.lines.binary_search(&directive.offset) else {
            return Err(reject("offset is not the start of a line"));
        };
        if directive.line.checked_add(self.lines.len() - index).is_none() {
            return Err(reject("line numbering overflows"));
        }
        if self
            .directives
            .last()
            .is_some_and(|last| last.offset >= directive.offset)
        {
            return Err(reject("directives must be added in offset order"));
        }
        self.directives.push(directive);
        Ok(self)
    }

    /// Line directives in offset order.
    #[must_use]
    pub fn line_directives(&self) -> &[LineDirective] {
        &self.directives
    }

    /// Zero-based index of the line containing `offset`.
    fn line_index(&self, offset: usize) -> usize {
        self.lines
            .partition_point(|&start| start <= offset)
            .saturating_sub(1)
    }

    fn directive_for(&self, offset: usize) -> Option<&LineDirective> {
        self.directives
            .partition_point(|directive| directive.offset <= offset)
            .checked_sub(1)
            .and_then(|index| self.directives.get(index))
    }
}

impl AddressableFile for TokenFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn base(&self) -> usize {
        self.base
    }

    fn size(&self) -> usize {
        self.size
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_start(&self, line: usize) -> Option<TokenPos> {
        line.checked_sub(1)
            .and_then(|index| self.lines.get(index))
            .map(|&start| TokenPos::new(self.base + start))
    }

    fn pos(&self, offset: usize) -> TokenPos {
        TokenPos::new(self.base.saturating_add(offset))
    }

    fn location(&self, pos: TokenPos) -> Location<'_> {
        let offset = self.offset_of(pos).min(self.size);
        let index = self.line_index(offset);
        let line_start = self.lines.get(index).copied().unwrap_or_default();
        let column = offset - line_start + 1;
        match self.directive_for(offset) {
            Some(directive) => Location {
                filename: &directive.filename,
                line: directive
                    .line
                    .saturating_add(index - self.line_index(directive.offset)),
                column,
            },
            None => Location {
                filename: &self.name,
                line: index + 1,
                column,
            },
        }
    }
}

/// Allocates non-overlapping bases for the files of one analysis session.
///
/// Bases start at 1 and each file is followed by a one-position gap, so the
/// end-of-file position of one file is never the base of the next.
#[derive(Debug, Clone)]
pub struct FileSet {
    next_base: usize,
    files: Vec<Arc<TokenFile>>,
}

impl FileSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_base: 1,
            files: Vec::new(),
        }
    }

    /// Base the next added file will receive.
    #[must_use]
    pub const fn next_base(&self) -> usize {
        self.next_base
    }

    /// Scans `content` into a new file at the next free base.
    ///
    /// # Errors
    ///
    /// Returns [`TokenFileError`] when the address space is exhausted.
    pub fn add_file(
        &mut self,
        name: impl Into<String>,
        content: &str,
    ) -> Result<Arc<TokenFile>, TokenFileError> {
        let file = TokenFile::from_content(name, self.next_base, content)?;
        self.insert(file)
    }

    /// Adds a file built elsewhere, typically one carrying line directives.
    ///
    /// # Errors
    ///
    /// Returns [`TokenFileError::AddressSpaceExhausted`] when the file's base
    /// lies below [`next_base`](Self::next_base) or no room is left after it.
    pub fn insert(&mut self, file: TokenFile) -> Result<Arc<TokenFile>, TokenFileError> {
        let next = file
            .base
            .checked_add(file.size)
            .and_then(|end| end.checked_add(1))
            .filter(|_| file.base >= self.next_base);
        let Some(next) = next else {
            return Err(TokenFileError::AddressSpaceExhausted { file: file.name });
        };
        self.next_base = next;
        let shared = Arc::new(file);
        self.files.push(Arc::clone(&shared));
        Ok(shared)
    }

    /// Returns the file whose address space contains `pos`.
    #[must_use]
    pub fn file_for(&self, pos: TokenPos) -> Option<&Arc<TokenFile>> {
        if !pos.is_valid() {
            return None;
        }
        let index = self
            .files
            .partition_point(|file| file.base <= pos.get())
            .checked_sub(1)?;
        self.files.get(index).filter(|file| file.contains(pos))
    }

    /// Files in insertion order.
    pub fn files(&self) -> impl Iterator<Item = &Arc<TokenFile>> {
        self.files.iter()
    }
}

impl Default for FileSet {
    fn default() -> Self {
        Self::new()
    }
}
