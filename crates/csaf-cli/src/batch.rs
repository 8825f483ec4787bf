//! # Batch Walker — Validate Many Advisories in One Run
//!
//! Expands each source argument into a set of candidate files, validates
//! every candidate, and folds the outcomes into a summary. A plain file is
//! its own candidate set; a directory is walked for `.json` entries, two
//! levels deep by default or without bound when recursion is requested.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::process::{self, ProcessError};

/// Directory walk depth when recursion is not requested.
const DEFAULT_MAX_DEPTH: usize = 2;

/// Outcome tally of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Candidates handed to the validation pipeline.
    pub checked: usize,
    /// Candidates that passed every check.
    pub passed: usize,
    /// Candidates rejected by some check.
    pub failed: usize,
    /// Entries skipped for lacking a `.json` extension.
    pub ignored: usize,
}

impl BatchSummary {
    /// Whether every checked candidate passed.
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// The one-line tally in the fixed reporting shape.
    pub fn tally_line(&self) -> String {
        format!(
            "checked={} passed={} failed={} ignored={}",
            self.checked, self.passed, self.failed, self.ignored
        )
    }

    /// Terminal verdict token.
    pub fn verdict(&self) -> &'static str {
        if self.all_passed() {
            "OK"
        } else {
            "FAIL"
        }
    }
}

fn has_json_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

/// Expand one source into candidate files, counting skipped entries.
///
/// Files are taken as-is regardless of extension; directory entries must
/// carry a `.json` extension to become candidates.
fn collect_candidates(
    source: &Path,
    recursive: bool,
    ignored: &mut usize,
) -> Vec<PathBuf> {
    if source.is_file() {
        return vec![source.to_path_buf()];
    }

    let mut walker = WalkDir::new(source).min_depth(1);
    if !recursive {
        walker = walker.max_depth(DEFAULT_MAX_DEPTH);
    }

    let mut candidates = Vec::new();
    for entry in walker.into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        if has_json_extension(entry.path()) {
            candidates.push(entry.into_path());
        } else {
            *ignored += 1;
        }
    }
    candidates.sort();
    candidates
}

/// Validate every candidate below the given sources.
///
/// Per-file failures are reported and tallied, never propagated; the batch
/// keeps going unless `bail_out` is set, in which case the first failure
/// ends the run with the tally as it stands.
pub fn run(sources: &[PathBuf], recursive: bool, bail_out: bool) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for source in sources {
        let candidates = collect_candidates(source, recursive, &mut summary.ignored);
        if candidates.is_empty() && !source.is_dir() {
            tracing::error!("{} ... {}", source.display(), ProcessError::SourceIsNoFile);
            summary.checked += 1;
            summary.failed += 1;
            if bail_out {
                return summary;
            }
            continue;
        }

        for candidate in candidates {
            summary.checked += 1;
            match process::validate_file(&candidate) {
                Ok(()) => {
                    summary.passed += 1;
                    tracing::info!("{} ... ok", candidate.display());
                }
                Err(err) => {
                    summary.failed += 1;
                    tracing::error!("{} ... {}", candidate.display(), err);
                    if bail_out {
                        return summary;
                    }
                }
            }
        }
    }

    summary
}
