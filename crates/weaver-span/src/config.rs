//! Converter configuration.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How the end-of-file offset is rendered as a line and column.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, Hash, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EofPolicy {
    /// Report a synthetic line one past the last real line, column 1, so a
    /// cursor at end-of-file never overlaps the last character.
    #[default]
    SentinelLine,
    /// Report the last real line and the column just past its final byte.
    LastLine,
}

/// Errors encountered while parsing an [`EofPolicy`] from text.
pub type EofPolicyParseError = strum::ParseError;

/// Settings for a [`SpanConverter`](crate::SpanConverter).
///
/// # Defaults
///
/// - `eof_policy`: [`EofPolicy::SentinelLine`]
///
/// # Example
///
/// ```
/// use weaver_span::{ConverterConfig, EofPolicy};
///
/// let config = ConverterConfig::default();
/// assert_eq!(config.eof_policy(), EofPolicy::SentinelLine);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterConfig {
    #[serde(default)]
    eof_policy: EofPolicy,
}

impl ConverterConfig {
    /// Creates a configuration with explicit values.
    #[must_use]
    pub const fn new(eof_policy: EofPolicy) -> Self {
        Self { eof_policy }
    }

    /// Returns the end-of-file rendering policy.
    #[must_use]
    pub const fn eof_policy(&self) -> EofPolicy {
        self.eof_policy
    }
}
