//! Token positions in a shared, parser-defined address space.

use std::fmt;

/// An absolute position in the address space shared by every file of a
/// [`FileSet`](crate::FileSet).
///
/// Each file owns the slice `[base, base + size]`; the upper bound denotes
/// end-of-file. Zero is reserved as [`TokenPos::NONE`] so that a position can
/// be "absent" without an `Option` wrapper, mirroring how parsers hand out
/// positions for synthesised nodes.
///
/// # Example
///
/// ```
/// use weaver_span::TokenPos;
///
/// assert!(!TokenPos::NONE.is_valid());
/// assert!(TokenPos::new(1).is_valid());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenPos(usize);

impl TokenPos {
    /// The invalid position.
    pub const NONE: Self = Self(0);

    /// Wraps a raw address.
    #[must_use]
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    /// Returns the raw address.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Returns `true` unless this is [`TokenPos::NONE`].
    ///
    /// Validity is file-independent: a valid position may still lie outside
    /// a particular file's slice.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }

    /// Returns the position `delta` bytes further on, or `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, delta: usize) -> Option<Self> {
        match self.0.checked_add(delta) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }
}

impl fmt::Display for TokenPos {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(formatter, "{}", self.0)
        } else {
            formatter.write_str("-")
        }
    }
}
