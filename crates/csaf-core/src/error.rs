//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types shared across the CSAF verification stack. All
//! errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Structural errors carry the qualified location of the offending field
//!   so the single diagnostic line names exactly what is wrong.
//! - Format errors are deliberately terse: the sniffer rejects input before
//!   any parsing happens, so there is no position to report.
//! - Every failure here is a deterministic function of the input document.
//!   Nothing is retried.

use thiserror::Error;

/// Trivial-format classification failure, raised before JSON parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Input shorter than the minimal conceivable CSAF document.
    #[error("advisory is too short to be valid")]
    TooShort,

    /// Leading character matches neither JSON nor XML.
    #[error("advisory is of unknown format")]
    Unknown,

    /// XML advisories are explicitly rejected.
    #[error("XML IS OUT OF SCOPE")]
    XmlOutOfScope,
}

/// A mandatory or optional document property failed the structural check.
///
/// Messages are field-qualified: the reader of the single diagnostic line
/// must be able to locate the offending property without opening the file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    /// The root `document` member is absent or empty.
    #[error("missing document property")]
    MissingDocument,

    /// A mandatory `document` property is absent or empty.
    #[error("missing document property ({0})")]
    MissingDocumentProperty(&'static str),

    /// A mandatory `document.publisher` property is absent or empty.
    #[error("missing document.publisher property ({0})")]
    MissingPublisherProperty(&'static str),

    /// A mandatory `document.tracking` property is absent.
    #[error("missing document.tracking property ({0})")]
    MissingTrackingProperty(&'static str),

    /// `document.csaf_version` is present but not the supported literal.
    #[error("property document.csaf_version present but ({found}) not matching CSAF version 2.0")]
    CsafVersionMismatch {
        /// The value found in the document.
        found: String,
    },

    /// A language property is present but not a well-formed language tag.
    #[error("property {path} present but ({found}) is no valid language tag")]
    InvalidLanguageTag {
        /// Qualified location of the property.
        path: String,
        /// The value found in the document.
        found: String,
    },

    /// A property expected to hold text holds something else.
    #[error("property {path} present but no text")]
    NotText {
        /// Qualified location of the property.
        path: String,
    },

    /// A text property is present but empty.
    #[error("property {path} present but empty")]
    EmptyText {
        /// Qualified location of the property.
        path: String,
    },

    /// An optional property expected to hold an array holds something else.
    #[error("optional property {path} present but no array")]
    NotArray {
        /// Qualified location of the property.
        path: String,
    },

    /// An optional array property is present but empty.
    #[error("optional property {path} present but empty")]
    EmptyArray {
        /// Qualified location of the property.
        path: String,
    },

    /// An optional property expected to hold an object holds something else.
    #[error("optional property {path} present but no object")]
    NotObject {
        /// Qualified location of the property.
        path: String,
    },

    /// An optional object property is present but empty.
    #[error("optional property {path} present but empty object")]
    EmptyObject {
        /// Qualified location of the property.
        path: String,
    },

    /// An object carries fewer distinct known properties than required.
    #[error("found too few properties ({found}) for {path}")]
    TooFewProperties {
        /// Qualified location of the object.
        path: String,
        /// Number of distinct properties found.
        found: usize,
    },

    /// An object carries more distinct properties than the known set allows.
    #[error("found too many properties ({found}) for {path}")]
    TooManyProperties {
        /// Qualified location of the object.
        path: String,
        /// Number of distinct properties found.
        found: usize,
    },

    /// A mandatory sub-property of an optional object is absent.
    #[error("mandatory property {path} not present")]
    MissingProperty {
        /// Qualified location of the property.
        path: String,
    },

    /// A property expected to hold a URI holds an unparseable value.
    #[error("property {path} present but invalid as URI ({reason})")]
    InvalidUri {
        /// Qualified location of the property.
        path: String,
        /// Parser diagnostic for the rejected value.
        reason: String,
    },
}
