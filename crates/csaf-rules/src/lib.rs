//! # csaf-rules — Mandatory Rule Engine for CSAF 2.0
//!
//! Implements the cross-document consistency checks of CSAF v2.0 section
//! 6.1 that run after structural verification succeeds: product id
//! uniqueness and definition, group id uniqueness and definition, the
//! prohibited category-name test, and the translator/source_lang coupling.
//!
//! ## Layout
//!
//! - [`definitions`] — declarative per-rule metadata: id, topic, OASIS
//!   reference, trigger and condition paths. No logic.
//! - [`category`] — the category-name normalizer and its decision table.
//! - [`rules`] — the evaluator: per-rule predicates, the short-circuit
//!   composite, and the accumulate-all diagnostic pass.
//!
//! ## Crate Policy
//!
//! - Rules never mutate the document and never error: a location that does
//!   not resolve means the rule does not apply.
//! - Each rule is a pure function of the parsed document; evaluating twice
//!   yields the same verdict.

pub mod category;
pub mod definitions;
pub mod rules;

pub use rules::{evaluate, is_valid, MandatoryRule, RuleReport};
