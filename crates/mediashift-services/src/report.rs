//! Per-run counters.

use serde::Serialize;

use crate::migrator::FileOutcome;

/// Summary of a migration run. Failures here never change the exit status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Non-directory entries visited.
    pub files_seen: usize,
    pub migrated: usize,
    /// No record, or a record with an empty `url`.
    pub not_found: usize,
    pub lookup_failed: usize,
    pub upload_failed: usize,
    pub serialize_failed: usize,
    pub update_failed: usize,
    /// Entries the walk could not read.
    pub walk_errors: usize,
    /// Files whose stored `formats` was NULL or could not be fully parsed.
    pub formats_parse_errors: usize,
}

impl MigrationReport {
    pub fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::WalkError => {
                self.walk_errors += 1;
                return;
            }
            FileOutcome::Migrated { formats_parse_error }
            | FileOutcome::UpdateFailed { formats_parse_error }
            | FileOutcome::SerializeFailed { formats_parse_error } => {
                if *formats_parse_error {
                    self.formats_parse_errors += 1;
                }
            }
            _ => {}
        }

        self.files_seen += 1;
        match outcome {
            FileOutcome::Migrated { .. } => self.migrated += 1,
            FileOutcome::NotInDatabase => self.not_found += 1,
            FileOutcome::LookupFailed => self.lookup_failed += 1,
            FileOutcome::UploadFailed => self.upload_failed += 1,
            FileOutcome::SerializeFailed { .. } => self.serialize_failed += 1,
            FileOutcome::UpdateFailed { .. } => self.update_failed += 1,
            FileOutcome::WalkError => {}
        }
    }

    /// Files that matched a record but did not end up migrated.
    pub fn failed(&self) -> usize {
        self.lookup_failed + self.upload_failed + self.serialize_failed + self.update_failed
    }

    pub fn log_summary(&self) {
        tracing::info!(
            files_seen = self.files_seen,
            migrated = self.migrated,
            not_found = self.not_found,
            failed = self.failed(),
            walk_errors = self.walk_errors,
            formats_parse_errors = self.formats_parse_errors,
            "Migration finished"
        );
    }
}
