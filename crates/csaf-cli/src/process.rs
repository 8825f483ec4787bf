//! # Process Orchestrator — Single-Document Validation Pipeline
//!
//! The state machine for one advisory:
//! `START -> SNIFF -> PARSE -> STRUCTURAL_CHECK -> MANDATORY_RULES -> DONE`,
//! with an early exit to a failure terminal at every state.
//!
//! Each run is a pure function of the input bytes: single-threaded,
//! synchronous, no shared mutable state, no retries. The parsed document
//! tree is local to one call and never mutated after parse.

use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use csaf_core::document::verify_document;
use csaf_core::error::{FormatError, StructuralError};
use csaf_core::product::ProductTree;
use csaf_core::{CSAF_MIN_BYTES, CSAF_WARN_MAX_BYTES};

use crate::{EXIT_FAILURE, EXIT_USAGE};

/// Trivial-format classification of raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sniff {
    /// Shorter than the minimal conceivable CSAF document.
    TooShort,
    /// Looks like JSON; the flag records whether the size warning fired.
    Json {
        /// Input exceeds the known advisory size limits (15 MiB).
        maybe_too_large: bool,
    },
    /// Looks like XML, which is out of scope.
    Xml,
    /// Neither JSON nor XML.
    Unknown,
}

/// Determine the trivial format of the data.
///
/// Only the first [`CSAF_MIN_BYTES`] characters, whitespace-trimmed, are
/// consulted for the leading-character test.
pub fn peek(data: &str) -> Sniff {
    if data.len() < CSAF_MIN_BYTES {
        return Sniff::TooShort;
    }

    let sample: String = data.chars().take(CSAF_MIN_BYTES).collect();
    let sample = sample.trim();
    if sample.starts_with('{') {
        return Sniff::Json {
            maybe_too_large: data.len() > CSAF_WARN_MAX_BYTES,
        };
    }
    if sample.starts_with('<') {
        return Sniff::Xml;
    }
    Sniff::Unknown
}

/// Everything that can take a single validation run to its failure
/// terminal. Converted to `(exit code, message)` at the CLI boundary.
#[derive(Error, Debug)]
pub enum ProcessError {
    /// Invalid invocation (empty path argument).
    #[error("USAGE")]
    Usage,

    /// The source path does not point at a regular file.
    #[error("source is no file")]
    SourceIsNoFile,

    /// The input failed trivial-format classification.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The input claimed to be JSON but did not decode.
    #[error("advisory is no valid JSON")]
    InvalidJson,

    /// A mandatory document property is missing or malformed.
    #[error(transparent)]
    Structural(#[from] StructuralError),

    /// One or more mandatory rules are violated; the message carries the
    /// comma-joined labels of every violated rule.
    #[error("{0}")]
    MandatoryRules(String),

    /// The input could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProcessError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage => EXIT_USAGE,
            _ => EXIT_FAILURE,
        }
    }
}

/// Validate one advisory held in memory.
///
/// # Errors
///
/// Returns the first failure along the pipeline; see [`ProcessError`].
pub fn validate_data(data: &str) -> Result<(), ProcessError> {
    match peek(data) {
        Sniff::TooShort => return Err(FormatError::TooShort.into()),
        Sniff::Unknown => return Err(FormatError::Unknown.into()),
        Sniff::Xml => return Err(FormatError::XmlOutOfScope.into()),
        Sniff::Json { maybe_too_large } => {
            if maybe_too_large {
                tracing::warn!(
                    "File of {} bytes may be above known file size limits",
                    data.len()
                );
            }
        }
    }

    let doc: Value = serde_json::from_str(data).map_err(|_| ProcessError::InvalidJson)?;

    verify_document(&doc)?;
    if let Some(tree) = ProductTree::from_document(&doc) {
        tree.verify()?;
    }

    let report = csaf_rules::evaluate(&doc);
    if !report.is_valid() {
        tracing::error!("advisory fails mandatory rules:");
        return Err(ProcessError::MandatoryRules(report.message()));
    }

    Ok(())
}

/// Validate one advisory on disk.
///
/// # Errors
///
/// `SourceIsNoFile` when the path is not a regular file, `Io` when reading
/// fails, otherwise whatever [`validate_data`] reports.
pub fn validate_file(path: &Path) -> Result<(), ProcessError> {
    if !path.is_file() {
        return Err(ProcessError::SourceIsNoFile);
    }
    let data = std::fs::read_to_string(path)?;
    validate_data(&data)
}

/// Public API convenience: does the file at `path` hold a valid advisory?
pub fn is_valid_file(path: &Path) -> bool {
    validate_file(path).is_ok()
}
