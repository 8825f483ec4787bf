//! # Rule Definitions — Declarative Metadata per Mandatory Rule
//!
//! One module per mandatory rule, each carrying the rule's CSAF section id,
//! topic, OASIS reference URL, and the trigger/condition path expressions
//! the evaluator resolves. Purely declarative; the logic lives in
//! [`crate::rules`].
//!
//! Path expressions use the resolver grammar of `csaf_core::path`:
//! `.` for member access, a `[]` suffix for flattening sequence projection.

/// CSAF section number of a mandatory rule, e.g. `(6, 1, 26)`.
pub type RuleSection = (u8, u8, u8);

/// Base URL of the OASIS CSAF v2.0 committee specification.
pub const BASE_URL: &str = "https://docs.oasis-open.org/csaf/csaf/v2.0/cs01/csaf-v2.0-cs01.html";

/// 6.1.1 Missing Definition of Product ID.
///
/// Every product id referenced outside a Full Product Name must have been
/// defined as one. The known-set is produced by the identifier collector
/// (`csaf_core::product::ProductTree::defined_product_ids`), which covers
/// flat lists, relationship-embedded names, and arbitrarily nested branch
/// products.
pub mod defined_product_ids {
    use super::RuleSection;

    pub const ID: RuleSection = (6, 1, 1);
    pub const TOPIC: &str = "Missing Definition of Product ID";
    pub const REFERENCE: &str = "https://docs.oasis-open.org/csaf/csaf/v2.0/cs01/csaf-v2.0-cs01.html#611-missing-definition-of-product-id";

    /// Every location a product id may be referenced from.
    pub const CONDITION_PATHS: [&str; 14] = [
        "product_tree.product_groups[].product_ids[]",
        "product_tree.relationships[].product_reference",
        "product_tree.relationships[].relates_to_product_reference",
        "vulnerabilities[].product_status.first_affected[]",
        "vulnerabilities[].product_status.first_fixed[]",
        "vulnerabilities[].product_status.fixed[]",
        "vulnerabilities[].product_status.known_affected[]",
        "vulnerabilities[].product_status.known_not_affected[]",
        "vulnerabilities[].product_status.last_affected[]",
        "vulnerabilities[].product_status.recommended[]",
        "vulnerabilities[].product_status.under_investigation[]",
        "vulnerabilities[].remediations[].product_ids[]",
        "vulnerabilities[].scores[].products[]",
        "vulnerabilities[].threats[].product_ids[]",
    ];
}

/// 6.1.2 Multiple Definition of Product ID.
///
/// No product id may be defined twice across the flat list, nested branch
/// products, and relationship-embedded full product names. The definition
/// multiset comes from the identifier collector; no condition paths are
/// needed here because the recursive origins cannot be expressed as a
/// finite path list.
pub mod unique_product_ids {
    use super::RuleSection;

    pub const ID: RuleSection = (6, 1, 2);
    pub const TOPIC: &str = "Multiple Definition of Product ID";
    pub const REFERENCE: &str = "https://docs.oasis-open.org/csaf/csaf/v2.0/cs01/csaf-v2.0-cs01.html#612-multiple-definition-of-product-id";
}

/// 6.1.4 Missing Definition of Product Group ID.
///
/// Every group id referenced from a vulnerability section must be defined
/// in `product_groups`.
pub mod defined_group_ids {
    use super::RuleSection;

    pub const ID: RuleSection = (6, 1, 4);
    pub const TOPIC: &str = "Missing Definition of Product Group ID";
    pub const REFERENCE: &str = "https://docs.oasis-open.org/csaf/csaf/v2.0/cs01/csaf-v2.0-cs01.html#614-missing-definition-of-product-group-id";

    /// Where group ids are defined.
    pub const TRIGGER_PATH: &str = "product_tree.product_groups[].group_id";

    /// Every location a group id may be referenced from.
    pub const CONDITION_PATHS: [&str; 2] = [
        "vulnerabilities[].remediations[].group_ids[]",
        "vulnerabilities[].threats[].group_ids[]",
    ];
}

/// 6.1.5 Multiple Definition of Product Group ID.
pub mod unique_group_ids {
    use super::RuleSection;

    pub const ID: RuleSection = (6, 1, 5);
    pub const TOPIC: &str = "Multiple Definition of Product Group ID";
    pub const REFERENCE: &str = "https://docs.oasis-open.org/csaf/csaf/v2.0/cs01/csaf-v2.0-cs01.html#615-multiple-definition-of-product-group-id";

    /// Where group ids are defined (duplicates detected over this list).
    pub const CONDITION_PATH: &str = "product_tree.product_groups[].group_id";
}

/// 6.1.15 Translator.
///
/// `document.source_lang` must be present and set when
/// `document.publisher.category` is `translator`.
pub mod translator {
    use super::RuleSection;

    pub const ID: RuleSection = (6, 1, 15);
    pub const TOPIC: &str = "Translator";
    pub const REFERENCE: &str = "https://docs.oasis-open.org/csaf/csaf/v2.0/cs01/csaf-v2.0-cs01.html#6115-translator";

    /// The publisher category that arms this rule.
    pub const TRIGGER_PATH: &str = "document.publisher.category";
    pub const TRIGGER_VALUE: &str = "translator";
    pub const CONDITION_PATH: &str = "document.source_lang";
}

/// 6.1.26 Prohibited Document Category Name.
///
/// The document category must not collide - case, whitespace, underscore,
/// or dash insensitively - with the name of a profile other than
/// "Generic CSAF", unless it is the byte-exact profile value itself.
pub mod valid_category_name {
    use super::RuleSection;

    pub const ID: RuleSection = (6, 1, 26);
    pub const TOPIC: &str = "Prohibited Document Category Name";
    pub const REFERENCE: &str = "https://docs.oasis-open.org/csaf/csaf/v2.0/cs01/csaf-v2.0-cs01.html#6126-prohibited-document-category-name";

    pub const CONDITION_PATH: &str = "document.category";
}
