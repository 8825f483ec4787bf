//! # Path Resolver — Declarative Queries over Parsed Documents
//!
//! Evaluates dot/bracket query expressions against a parsed JSON document.
//! The mandatory rules collect identifier references from over a dozen
//! distinct document locations; those locations are declared as path
//! expressions (e.g. `vulnerabilities[].remediations[].product_ids[]`) and
//! resolved here.
//!
//! ## Grammar
//!
//! - `.` separates member accesses: `document.publisher.category`.
//! - A `[]` suffix projects over every element of a sequence, flattening
//!   one level: `product_tree.product_groups[].group_id` yields the
//!   `group_id` of every product group as a single flat sequence.
//! - No filters, predicates, slices, or recursive descent.
//!
//! ## Failure Mode
//!
//! An unresolvable segment yields [`Resolution::Absent`], never an error.
//! Callers must treat absence as "rule does not apply" rather than as a
//! violation. Resolution is side-effect-free and never mutates the input.

use serde_json::Value;

/// One parsed segment of a path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Plain member access: `key`.
    Member(String),
    /// Member access followed by sequence projection: `key[]`.
    Project(String),
}

/// A parsed path expression, ready for repeated evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpr {
    segments: Vec<Segment>,
}

/// Result of evaluating a [`PathExpr`] against a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a> {
    /// No value matched the expression.
    Absent,
    /// A plain member chain matched exactly one value.
    One(&'a Value),
    /// A projecting expression matched a flattened sequence of values.
    Many(Vec<&'a Value>),
}

impl<'a> Resolution<'a> {
    /// Returns true if nothing matched.
    pub fn is_absent(&self) -> bool {
        matches!(self, Resolution::Absent)
    }

    /// All matched values as a flat slice-like vector.
    pub fn values(&self) -> Vec<&'a Value> {
        match self {
            Resolution::Absent => Vec::new(),
            Resolution::One(v) => vec![v],
            Resolution::Many(vs) => vs.clone(),
        }
    }

    /// All matched string values; non-string matches are skipped.
    pub fn strings(&self) -> Vec<&'a str> {
        self.values().into_iter().filter_map(Value::as_str).collect()
    }

    /// The single matched string, if the expression matched one text value.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Resolution::One(v) => v.as_str(),
            _ => None,
        }
    }
}

impl PathExpr {
    /// Parse a path expression.
    ///
    /// Parsing is total: empty segments are dropped, so `a..b` reads as
    /// `a.b`. The rule definitions only ever feed well-formed literals.
    pub fn parse(expr: &str) -> Self {
        let segments = expr
            .split('.')
            .filter(|s| !s.is_empty())
            .map(|s| match s.strip_suffix("[]") {
                Some(key) => Segment::Project(key.to_string()),
                None => Segment::Member(s.to_string()),
            })
            .collect();
        Self { segments }
    }

    /// Evaluate the expression against a document root.
    ///
    /// Member access on a non-object or with a missing key removes the node
    /// from the working set; projection over a non-array does the same.
    /// An empty working set at the end resolves to [`Resolution::Absent`].
    pub fn resolve<'a>(&self, root: &'a Value) -> Resolution<'a> {
        let mut nodes: Vec<&'a Value> = vec![root];
        let mut projected = false;

        for segment in &self.segments {
            match segment {
                Segment::Member(key) => {
                    nodes = nodes.iter().filter_map(|n| n.get(key)).collect();
                }
                Segment::Project(key) => {
                    projected = true;
                    let mut next = Vec::new();
                    for node in nodes.iter().filter_map(|n| n.get(key)) {
                        if let Value::Array(items) = node {
                            next.extend(items.iter());
                        }
                    }
                    nodes = next;
                }
            }
            if nodes.is_empty() {
                return Resolution::Absent;
            }
        }

        if projected {
            Resolution::Many(nodes)
        } else {
            // A member chain keeps at most one node.
            match nodes.first() {
                Some(v) => Resolution::One(v),
                None => Resolution::Absent,
            }
        }
    }
}

/// Resolve a path expression literal in one step.
pub fn resolve<'a>(root: &'a Value, expr: &str) -> Resolution<'a> {
    PathExpr::parse(expr).resolve(root)
}
