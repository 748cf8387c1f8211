//! The file abstraction consumed by the conversion engine.
//!
//! Parsers own the concrete representation of a file's line table. The
//! engine only needs the handful of lookups in [`AddressableFile`], so any
//! parser front end can plug in by implementing the trait for its own file
//! type. [`TokenFile`](crate::TokenFile) is the in-crate implementation.

use crate::pos::TokenPos;

/// A filename, line, and byte column reported by an [`AddressableFile`].
///
/// Lines and columns are one-based; the column counts UTF-8 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location<'a> {
    /// Name of the file the position belongs to, after line directives.
    pub filename: &'a str,
    /// One-based line number.
    pub line: usize,
    /// One-based byte column.
    pub column: usize,
}

/// An immutable view of one file generation inside a token address space.
///
/// Implementations must be snapshots: every answer stays the same for the
/// lifetime of the value. Lookups are only defined for inputs inside the
/// file's bounds; the engine validates inputs before calling them and treats
/// out-of-bounds answers as collaborator defects.
pub trait AddressableFile {
    /// Name of the file, used as the identity of spans built from it.
    fn name(&self) -> &str;

    /// First position owned by the file.
    fn base(&self) -> usize;

    /// Length of the file content in bytes.
    fn size(&self) -> usize;

    /// Number of lines; at least one, even for empty content.
    fn line_count(&self) -> usize;

    /// Position of the first byte of the one-based `line`, or `None` when the
    /// line does not exist.
    fn line_start(&self, line: usize) -> Option<TokenPos>;

    /// Position of the byte at `offset`. Defined for `offset <= size()`.
    fn pos(&self, offset: usize) -> TokenPos;

    /// Filename, line, and column of `pos`. Defined for positions inside
    /// [`contains`](Self::contains).
    fn location(&self, pos: TokenPos) -> Location<'_>;

    /// Byte offset of `pos` without bounds checks.
    fn offset_of(&self, pos: TokenPos) -> usize {
        pos.get().saturating_sub(self.base())
    }

    /// The end-of-file position, `base + size`.
    fn end(&self) -> TokenPos {
        TokenPos::new(self.base().saturating_add(self.size()))
    }

    /// Returns `true` when `pos` lies in `[base, base + size]`.
    fn contains(&self, pos: TokenPos) -> bool {
        pos.get() >= self.base() && pos <= self.end()
    }
}
