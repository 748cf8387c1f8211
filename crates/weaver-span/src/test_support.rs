//! Test double for [`DefectReporter`] that records defects for assertions.

use std::sync::Mutex;

use crate::defect::{CollaboratorDefect, DefectReporter, DefectSite};

/// A defect captured by [`RecordingDefectReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedDefect {
    /// Name of the misbehaving file.
    pub file: String,
    /// Lookup that misbehaved.
    pub site: DefectSite,
    /// Rendered error returned to the caller.
    pub message: String,
}

/// Records collaborator defects instead of logging them.
#[derive(Debug, Default)]
pub struct RecordingDefectReporter {
    defects: Mutex<Vec<RecordedDefect>>,
}

impl RecordingDefectReporter {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures a copy of the recorded defects.
    #[must_use]
    pub fn defects(&self) -> Vec<RecordedDefect> {
        self.defects
            .lock()
            .map(|defects| defects.clone())
            .unwrap_or_default()
    }
}

impl DefectReporter for RecordingDefectReporter {
    fn collaborator_defect(&self, defect: &CollaboratorDefect<'_>) {
        if let Ok(mut defects) = self.defects.lock() {
            defects.push(RecordedDefect {
                file: defect.file.to_owned(),
                site: defect.site,
                message: defect.error.to_string(),
            });
        }
    }
}
