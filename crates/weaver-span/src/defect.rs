//! Reporting of collaborator invariant violations.
//!
//! Bad input from clients is returned to the caller as a [`SpanError`].
//! When the [`AddressableFile`](crate::AddressableFile) itself answers
//! inconsistently the fault lies with the parser that built it, so the
//! converter also hands the defect to a [`DefectReporter`] where telemetry
//! can count it separately from ordinary request failures.

use std::sync::Arc;

use crate::error::SpanError;

/// Where in the converter a defect was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefectSite {
    /// `line_start` returned nothing for a line inside the file.
    LineStart,
    /// `pos` returned a position outside the file's own bounds.
    OffsetLookup,
    /// `location` returned a zero line or column.
    Location,
}

impl DefectSite {
    /// Stable identifier used in telemetry fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LineStart => "line_start",
            Self::OffsetLookup => "offset_lookup",
            Self::Location => "location",
        }
    }
}

/// A collaborator invariant violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollaboratorDefect<'a> {
    /// Name of the misbehaving file.
    pub file: &'a str,
    /// Lookup that misbehaved.
    pub site: DefectSite,
    /// The error returned to the caller.
    pub error: &'a SpanError,
}

/// Observer for collaborator defects.
pub trait DefectReporter: Send + Sync {
    /// Invoked once per detected defect, before the error is returned.
    fn collaborator_defect(&self, defect: &CollaboratorDefect<'_>);
}

impl<T> DefectReporter for Arc<T>
where
    T: DefectReporter + ?Sized,
{
    fn collaborator_defect(&self, defect: &CollaboratorDefect<'_>) {
        (**self).collaborator_defect(defect);
    }
}

/// Default reporter that records defects using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDefectReporter;

impl TracingDefectReporter {
    /// Builds a new reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DefectReporter for TracingDefectReporter {
    fn collaborator_defect(&self, defect: &CollaboratorDefect<'_>) {
        tracing::error!(
            target: "weaver_span::defect",
            event = "collaborator_defect",
            file = defect.file,
            site = defect.site.as_str(),
            error = %defect.error,
            "file abstraction violated its invariants"
        );
    }
}
