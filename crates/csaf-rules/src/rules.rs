//! # Rule Evaluator — Mandatory Cross-Reference Checks
//!
//! Runs the six mandatory rules against a parsed advisory. Each rule is a
//! pure predicate over the immutable document tree; reference locations are
//! resolved through the declarative paths in [`crate::definitions`] and the
//! definition sets come from the typed identifier collector in
//! `csaf_core::product`.
//!
//! ## Composite Semantics
//!
//! [`is_valid`] is the short-circuit fast path: it stops at the first
//! violated rule. [`evaluate`] is the diagnostic path: it runs every rule
//! exactly once and accumulates all violations, so a single pass names
//! every failing rule. Both paths agree on the verdict for any document.
//!
//! The translator rule is vacuously satisfied when the publisher category
//! is anything but `translator`; it never fires just because a document
//! has no `source_lang`.

use std::collections::HashSet;
use std::fmt;

use serde_json::Value;

use csaf_core::path::resolve;
use csaf_core::product::ProductTree;

use crate::category;
use crate::definitions::{
    defined_group_ids, defined_product_ids, translator, unique_group_ids, unique_product_ids,
    valid_category_name, RuleSection,
};

/// The mandatory rules this engine evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MandatoryRule {
    /// 6.1.26 Prohibited Document Category Name.
    ValidCategoryName,
    /// 6.1.4 Missing Definition of Product Group ID.
    DefinedGroupIds,
    /// 6.1.1 Missing Definition of Product ID.
    DefinedProductIds,
    /// 6.1.15 Translator.
    Translator,
    /// 6.1.5 Multiple Definition of Product Group ID.
    UniqueGroupIds,
    /// 6.1.2 Multiple Definition of Product ID.
    UniqueProductIds,
}

/// Diagnostic evaluation order; also the order of labels in the
/// aggregated failure message.
pub const ALL_RULES: [MandatoryRule; 6] = [
    MandatoryRule::ValidCategoryName,
    MandatoryRule::DefinedGroupIds,
    MandatoryRule::DefinedProductIds,
    MandatoryRule::Translator,
    MandatoryRule::UniqueGroupIds,
    MandatoryRule::UniqueProductIds,
];

impl MandatoryRule {
    /// CSAF section of the rule.
    pub fn section(&self) -> RuleSection {
        match self {
            Self::ValidCategoryName => valid_category_name::ID,
            Self::DefinedGroupIds => defined_group_ids::ID,
            Self::DefinedProductIds => defined_product_ids::ID,
            Self::Translator => translator::ID,
            Self::UniqueGroupIds => unique_group_ids::ID,
            Self::UniqueProductIds => unique_product_ids::ID,
        }
    }

    /// Short failure label used in the aggregated diagnostic message.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ValidCategoryName => "invalid category",
            Self::DefinedGroupIds => "undefined group ids",
            Self::DefinedProductIds => "undefined product ids",
            Self::Translator => "invalid translator",
            Self::UniqueGroupIds => "non-unique group ids",
            Self::UniqueProductIds => "non-unique product ids",
        }
    }

    /// Human-readable topic from the OASIS specification.
    pub fn topic(&self) -> &'static str {
        match self {
            Self::ValidCategoryName => valid_category_name::TOPIC,
            Self::DefinedGroupIds => defined_group_ids::TOPIC,
            Self::DefinedProductIds => defined_product_ids::TOPIC,
            Self::Translator => translator::TOPIC,
            Self::UniqueGroupIds => unique_group_ids::TOPIC,
            Self::UniqueProductIds => unique_product_ids::TOPIC,
        }
    }

    /// Evaluate this rule against a document.
    pub fn holds(&self, doc: &Value) -> bool {
        match self {
            Self::ValidCategoryName => is_valid_category(doc),
            Self::DefinedGroupIds => is_valid_defined_group_ids(doc),
            Self::DefinedProductIds => is_valid_defined_product_ids(doc),
            Self::Translator => is_valid_translator(doc),
            Self::UniqueGroupIds => is_valid_unique_group_ids(doc),
            Self::UniqueProductIds => is_valid_unique_product_ids(doc),
        }
    }
}

/// Outcome of the accumulate-all diagnostic pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleReport {
    violations: Vec<MandatoryRule>,
}

impl RuleReport {
    /// True when no rule was violated.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// The violated rules, in diagnostic order.
    pub fn violations(&self) -> &[MandatoryRule] {
        &self.violations
    }

    /// Comma-joined failure labels, e.g.
    /// `"invalid category, non-unique product ids"`.
    pub fn message(&self) -> String {
        self.violations
            .iter()
            .map(MandatoryRule::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for RuleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "all mandatory rules hold")
        } else {
            write!(f, "{}", self.message())
        }
    }
}

/// Verify the category value (6.1.26).
///
/// An absent or non-text category is invalid here; structural verification
/// normally rejects such documents before rules run.
pub fn is_valid_category(doc: &Value) -> bool {
    match resolve(doc, valid_category_name::CONDITION_PATH).as_str() {
        Some(text) => category::is_valid(text),
        None => false,
    }
}

/// Verify `source_lang` is present and set for translator publishers
/// (6.1.15); vacuously satisfied for every other publisher category.
pub fn is_valid_translator(doc: &Value) -> bool {
    let triggered =
        resolve(doc, translator::TRIGGER_PATH).as_str() == Some(translator::TRIGGER_VALUE);
    if !triggered {
        return true;
    }
    matches!(resolve(doc, translator::CONDITION_PATH).as_str(), Some(lang) if !lang.is_empty())
}

/// Verify no product id is defined more than once (6.1.2).
pub fn is_valid_unique_product_ids(doc: &Value) -> bool {
    let Some(tree) = ProductTree::from_document(doc) else {
        return true;
    };
    let ids = tree.defined_product_ids();
    let distinct: HashSet<&str> = ids.iter().copied().collect();
    ids.len() == distinct.len()
}

/// Verify no group id is defined more than once (6.1.5).
pub fn is_valid_unique_group_ids(doc: &Value) -> bool {
    let group_ids = resolve(doc, unique_group_ids::CONDITION_PATH).strings();
    let distinct: HashSet<&str> = group_ids.iter().copied().collect();
    group_ids.len() == distinct.len()
}

/// Verify every referenced product id is defined (6.1.1).
pub fn is_valid_defined_product_ids(doc: &Value) -> bool {
    find_undefined_product_reference(doc).is_none()
}

/// First product id reference that does not resolve to a definition,
/// together with the path it was found under.
fn find_undefined_product_reference(doc: &Value) -> Option<(&'static str, String)> {
    let known: HashSet<String> = ProductTree::from_document(doc)
        .map(|tree| {
            tree.defined_product_ids()
                .into_iter()
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    for path in defined_product_ids::CONDITION_PATHS {
        for id in resolve(doc, path).strings() {
            if !known.contains(id) {
                return Some((path, id.to_string()));
            }
        }
    }
    None
}

/// Verify every referenced group id is defined (6.1.4).
pub fn is_valid_defined_group_ids(doc: &Value) -> bool {
    let known: HashSet<&str> = resolve(doc, defined_group_ids::TRIGGER_PATH)
        .strings()
        .into_iter()
        .collect();

    for path in defined_group_ids::CONDITION_PATHS {
        if resolve(doc, path)
            .strings()
            .iter()
            .any(|id| !known.contains(id))
        {
            return false;
        }
    }
    true
}

/// Short-circuit composite: category, then the translator coupling (only
/// when armed), then uniqueness, then definition closure. Returns false at
/// the first violated rule.
pub fn is_valid(doc: &Value) -> bool {
    if !is_valid_category(doc) {
        return false;
    }

    if resolve(doc, translator::TRIGGER_PATH).as_str() == Some(translator::TRIGGER_VALUE)
        && !is_valid_translator(doc)
    {
        return false;
    }

    is_valid_unique_product_ids(doc)
        && is_valid_unique_group_ids(doc)
        && is_valid_defined_product_ids(doc)
        && is_valid_defined_group_ids(doc)
}

/// Diagnostic pass: run every rule exactly once and accumulate all
/// violations.
pub fn evaluate(doc: &Value) -> RuleReport {
    let mut violations = Vec::new();
    for rule in ALL_RULES {
        if !rule.holds(doc) {
            if rule == MandatoryRule::DefinedProductIds {
                if let Some((path, id)) = find_undefined_product_reference(doc) {
                    tracing::debug!("undefined product id ({id}) referenced at {path}");
                }
            }
            violations.push(rule);
        }
    }
    RuleReport { violations }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_document(category: &str, publisher_category: &str) -> Value {
        json!({
            "document": {
                "category": category,
                "csaf_version": "2.0",
                "publisher": {
                    "category": publisher_category,
                    "name": "ACME",
                    "namespace": "https://example.com"
                },
                "title": "T",
                "tracking": {
                    "current_release_date": "2020-01-01T00:00:00Z",
                    "id": "1",
                    "initial_release_date": "2020-01-01T00:00:00Z",
                    "revision_history": [
                        {"date": "2020-01-01T00:00:00Z", "number": "1", "summary": "s"}
                    ],
                    "status": "final",
                    "version": "1"
                }
            }
        })
    }

    #[test]
    fn test_minimal_document_is_valid() {
        let doc = minimal_document("vex", "vendor");
        assert!(is_valid(&doc));
        assert!(evaluate(&doc).is_valid());
    }

    #[test]
    fn test_category_near_collision_fails() {
        let doc = minimal_document("Security_Incident_Response", "vendor");
        assert!(!is_valid_category(&doc));
        assert!(!is_valid(&doc));
        let report = evaluate(&doc);
        assert_eq!(report.message(), "invalid category");
    }

    #[test]
    fn test_exact_profile_category_passes() {
        let doc = minimal_document("security_incident_response", "vendor");
        assert!(is_valid_category(&doc));
        assert!(is_valid(&doc));
    }

    #[test]
    fn test_translator_without_source_lang_fails() {
        let doc = minimal_document("vex", "translator");
        assert!(!is_valid_translator(&doc));
        let report = evaluate(&doc);
        assert_eq!(report.message(), "invalid translator");
    }

    #[test]
    fn test_translator_with_source_lang_passes() {
        let mut doc = minimal_document("vex", "translator");
        doc["document"]["source_lang"] = json!("en");
        assert!(is_valid_translator(&doc));
        assert!(is_valid(&doc));
    }

    #[test]
    fn test_non_translator_without_source_lang_is_vacuous() {
        let doc = minimal_document("vex", "vendor");
        assert!(is_valid_translator(&doc));
        assert!(evaluate(&doc).is_valid());
    }

    #[test]
    fn test_duplicate_product_id_in_flat_list() {
        let mut doc = minimal_document("vex", "vendor");
        doc["product_tree"] = json!({
            "full_product_names": [
                {"name": "Product A", "product_id": "CSAFPID-0001"},
                {"name": "Product B", "product_id": "CSAFPID-0001"}
            ]
        });
        assert!(!is_valid_unique_product_ids(&doc));
        assert_eq!(evaluate(&doc).message(), "non-unique product ids");
    }

    #[test]
    fn test_duplicate_product_id_across_origins() {
        // Defined once in a nested branch and once in a relationship.
        let mut doc = minimal_document("vex", "vendor");
        doc["product_tree"] = json!({
            "branches": [{
                "category": "vendor",
                "name": "V",
                "branches": [{
                    "category": "product_version",
                    "name": "1.0",
                    "product": {"name": "P 1.0", "product_id": "CSAFPID-0001"}
                }]
            }],
            "full_product_names": [
                {"name": "Q", "product_id": "CSAFPID-0002"}
            ],
            "relationships": [{
                "category": "installed_on",
                "product_reference": "CSAFPID-0001",
                "relates_to_product_reference": "CSAFPID-0002",
                "full_product_name": {"name": "dup", "product_id": "CSAFPID-0001"}
            }]
        });
        assert!(!is_valid_unique_product_ids(&doc));
    }

    #[test]
    fn test_distinct_product_ids_pass() {
        let mut doc = minimal_document("vex", "vendor");
        doc["product_tree"] = json!({
            "full_product_names": [
                {"name": "A", "product_id": "CSAFPID-0001"},
                {"name": "B", "product_id": "CSAFPID-0002"}
            ]
        });
        assert!(is_valid_unique_product_ids(&doc));
        assert!(evaluate(&doc).is_valid());
    }

    #[test]
    fn test_duplicate_group_id_fails() {
        let mut doc = minimal_document("vex", "vendor");
        doc["product_tree"] = json!({
            "full_product_names": [
                {"name": "A", "product_id": "P-1"},
                {"name": "B", "product_id": "P-2"}
            ],
            "product_groups": [
                {"group_id": "CSAFGID-1", "product_ids": ["P-1", "P-2"]},
                {"group_id": "CSAFGID-1", "product_ids": ["P-2", "P-1"]}
            ]
        });
        assert!(!is_valid_unique_group_ids(&doc));
        assert_eq!(evaluate(&doc).message(), "non-unique group ids");
    }

    #[test]
    fn test_undefined_product_reference_in_group_fails() {
        let mut doc = minimal_document("vex", "vendor");
        doc["product_tree"] = json!({
            "product_groups": [
                {"group_id": "CSAFGID-1020300",
                 "product_ids": ["CSAFPID-9080700", "CSAFPID-9080701"]}
            ]
        });
        assert!(!is_valid_defined_product_ids(&doc));
        assert_eq!(evaluate(&doc).message(), "undefined product ids");
    }

    #[test]
    fn test_undefined_product_reference_in_vulnerability_fails() {
        let mut doc = minimal_document("vex", "vendor");
        doc["product_tree"] = json!({
            "full_product_names": [{"name": "A", "product_id": "CSAFPID-0001"}]
        });
        doc["vulnerabilities"] = json!([{
            "product_status": {"known_affected": ["CSAFPID-0001", "CSAFPID-9999"]}
        }]);
        assert!(!is_valid_defined_product_ids(&doc));
    }

    #[test]
    fn test_branch_defined_id_satisfies_references() {
        // The definition lives deep in the branch tree; the reference must
        // still resolve against it.
        let mut doc = minimal_document("vex", "vendor");
        doc["product_tree"] = json!({
            "branches": [{
                "category": "vendor",
                "name": "V",
                "branches": [{
                    "category": "product_name",
                    "name": "N",
                    "branches": [{
                        "category": "product_version",
                        "name": "1",
                        "product": {"name": "P", "product_id": "CSAFPID-0001"}
                    }]
                }]
            }]
        });
        doc["vulnerabilities"] = json!([{
            "scores": [{"products": ["CSAFPID-0001"]}]
        }]);
        assert!(is_valid_defined_product_ids(&doc));
        assert!(evaluate(&doc).is_valid());
    }

    #[test]
    fn test_undefined_group_reference_fails() {
        let mut doc = minimal_document("vex", "vendor");
        doc["vulnerabilities"] = json!([{
            "threats": [{"category": "impact", "group_ids": ["CSAFGID-404"]}]
        }]);
        assert!(!is_valid_defined_group_ids(&doc));
        assert_eq!(evaluate(&doc).message(), "undefined group ids");
    }

    #[test]
    fn test_defined_group_reference_passes() {
        let mut doc = minimal_document("vex", "vendor");
        doc["product_tree"] = json!({
            "full_product_names": [
                {"name": "A", "product_id": "P-1"},
                {"name": "B", "product_id": "P-2"}
            ],
            "product_groups": [
                {"group_id": "CSAFGID-1", "product_ids": ["P-1", "P-2"]}
            ]
        });
        doc["vulnerabilities"] = json!([{
            "remediations": [{"category": "vendor_fix", "group_ids": ["CSAFGID-1"]}]
        }]);
        assert!(is_valid_defined_group_ids(&doc));
        assert!(evaluate(&doc).is_valid());
    }

    #[test]
    fn test_report_accumulates_multiple_violations() {
        let mut doc = minimal_document("veX", "translator");
        doc["product_tree"] = json!({
            "full_product_names": [
                {"name": "A", "product_id": "CSAFPID-0001"},
                {"name": "B", "product_id": "CSAFPID-0001"}
            ]
        });
        let report = evaluate(&doc);
        assert!(!report.is_valid());
        assert_eq!(
            report.message(),
            "invalid category, invalid translator, non-unique product ids"
        );
    }

    #[test]
    fn test_fast_path_and_diagnostic_path_agree() {
        let docs = [
            minimal_document("vex", "vendor"),
            minimal_document("veX", "vendor"),
            minimal_document("vex", "translator"),
        ];
        for doc in docs {
            assert_eq!(is_valid(&doc), evaluate(&doc).is_valid());
        }
    }

    #[test]
    fn test_rule_metadata() {
        assert_eq!(MandatoryRule::ValidCategoryName.section(), (6, 1, 26));
        assert_eq!(MandatoryRule::DefinedProductIds.section(), (6, 1, 1));
        assert_eq!(
            MandatoryRule::UniqueProductIds.topic(),
            "Multiple Definition of Product ID"
        );
        assert_eq!(MandatoryRule::Translator.label(), "invalid translator");
    }
}
