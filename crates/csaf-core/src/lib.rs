//! # csaf-core — Foundational Types for CSAF 2.0 Verification
//!
//! This crate is the bedrock of the CSAF verification stack. It defines the
//! primitives every other crate builds on: the error hierarchy, the
//! declarative path resolver used to collect scattered identifier references,
//! the document meta-data structural checks, and the typed product tree with
//! its recursive identifier collector.
//!
//! ## Key Design Principles
//!
//! 1. **Typed recursion over path probing.** Branch nesting depth in a CSAF
//!    product tree is unbounded and not declared in the document. The
//!    identifier collector walks typed [`product::Branch`] nodes recursively
//!    instead of probing depth and widening string queries.
//!
//! 2. **Absent is not an error.** The path resolver returns an absent result
//!    for unresolvable segments. Callers treat absence as "rule does not
//!    apply", never as a violation.
//!
//! 3. **Parsed documents are immutable.** Every check takes `&Value` and
//!    never mutates the document tree.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `csaf-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod document;
pub mod error;
pub mod path;
pub mod product;

// Re-export primary types for ergonomic imports.
pub use document::verify_document;
pub use error::{FormatError, StructuralError};
pub use path::{PathExpr, Resolution};
pub use product::ProductTree;

/// The only CSAF version this stack verifies.
pub const CSAF_VERSION_STRING: &str = "2.0";

/// Shortest conceivable CSAF JSON document, in bytes. Anything shorter is
/// rejected before parsing.
pub const CSAF_MIN_BYTES: usize = 92;

/// Advisory sizes above this threshold trigger a warning (15 MiB).
pub const CSAF_WARN_MAX_BYTES: usize = 15 << 20;
