//! # Product Tree — Typed Entities and the Identifier Collector
//!
//! Typed records for the `product_tree` member of a CSAF document and the
//! recursive collector that produces every defined `product_id` regardless
//! of branch nesting depth.
//!
//! ## Recursion Invariant
//!
//! Branch nesting depth is undetermined ahead of time: the document may nest
//! `branches` inside `branches` to any depth. The collector therefore walks
//! the typed tree recursively instead of probing the maximum depth and
//! issuing one widened query per level. Branches form a tree, not a graph,
//! so termination is bounded by input size and there is no cycle risk.
//!
//! ## Leniency
//!
//! All fields are optional at this layer. Full shape conformance is the job
//! of an external JSON-Schema validator; the collector only needs to find
//! the identifiers that are actually there. A branch with neither `product`
//! nor nested `branches` contributes nothing and is not an error.

use serde::Deserialize;
use serde_json::Value;

use crate::error::StructuralError;

/// Container for all fully qualified product names that can be referenced
/// elsewhere in the document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductTree {
    /// Recursive branch structure, unbounded depth.
    pub branches: Option<Vec<Branch>>,
    /// Flat list of product name definitions.
    pub full_product_names: Option<Vec<FullProductName>>,
    /// Named collections of product ids.
    pub product_groups: Option<Vec<ProductGroup>>,
    /// Links between existing products, each defining one fresh product.
    pub relationships: Option<Vec<Relationship>>,
}

/// One node of the recursive branch structure.
///
/// A branch nests further `branches` or terminates in a `product`;
/// a node carrying neither is permitted and contributes no identifier.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Branch {
    /// Branch category tag (`vendor`, `product_name`, `product_version`, ...).
    pub category: Option<String>,
    /// Display name of the branch.
    pub name: Option<String>,
    /// Nested child branches.
    pub branches: Option<Vec<Branch>>,
    /// Terminal product definition.
    pub product: Option<FullProductName>,
}

/// A full product name definition: the one and only place a `product_id`
/// is born.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FullProductName {
    /// Human-readable product name.
    pub name: Option<String>,
    /// Opaque token, unique within the document across all origins.
    pub product_id: Option<String>,
    /// Pass-through identification helper (cpe, purl, hashes, ...).
    pub product_identification_helper: Option<Value>,
}

/// A named collection of at least two product id references.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductGroup {
    /// Opaque token, unique within the document.
    pub group_id: Option<String>,
    /// References that must resolve to defined product ids.
    pub product_ids: Option<Vec<Value>>,
    /// Optional description of the group.
    pub summary: Option<String>,
}

/// A link between two existing products that embeds one fresh
/// [`FullProductName`] of its own.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Relationship {
    /// Relationship category tag.
    pub category: Option<String>,
    /// Reference to an existing product id.
    pub product_reference: Option<String>,
    /// Reference to the related existing product id.
    pub relates_to_product_reference: Option<String>,
    /// The product defined by this relationship.
    pub full_product_name: Option<FullProductName>,
}

impl Branch {
    /// Accumulate the `product_id` of this branch's terminal product (if
    /// any) and of every product below it, at arbitrary depth.
    fn collect_product_ids<'a>(&'a self, into: &mut Vec<&'a str>) {
        if let Some(id) = self
            .product
            .as_ref()
            .and_then(|p| p.product_id.as_deref())
        {
            into.push(id);
        }
        if let Some(children) = &self.branches {
            for child in children {
                child.collect_product_ids(into);
            }
        }
    }
}

impl ProductTree {
    /// Parse the `product_tree` member of a document, if present.
    ///
    /// Returns `None` both when the member is absent and when it is too
    /// malformed for the typed model; shape conformance is delegated to the
    /// external schema validator, and a rule that cannot see a tree treats
    /// it as not applicable.
    pub fn from_document(doc: &Value) -> Option<Self> {
        let tree = doc.get("product_tree")?;
        match serde_json::from_value(tree.clone()) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                tracing::warn!("product_tree does not fit the typed model: {err}");
                None
            }
        }
    }

    /// Every `product_id` defined anywhere under this tree, in document
    /// order, duplicates preserved.
    ///
    /// Origins: arbitrarily nested branch products, the flat
    /// `full_product_names` list, and relationship-embedded product names.
    pub fn defined_product_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();

        if let Some(branches) = &self.branches {
            for branch in branches {
                branch.collect_product_ids(&mut ids);
            }
        }

        if let Some(names) = &self.full_product_names {
            ids.extend(names.iter().filter_map(|n| n.product_id.as_deref()));
        }

        if let Some(relationships) = &self.relationships {
            ids.extend(
                relationships
                    .iter()
                    .filter_map(|r| r.full_product_name.as_ref())
                    .filter_map(|n| n.product_id.as_deref()),
            );
        }

        ids
    }

    /// Every `group_id` defined in `product_groups`, duplicates preserved.
    pub fn defined_group_ids(&self) -> Vec<&str> {
        self.product_groups
            .iter()
            .flatten()
            .filter_map(|g| g.group_id.as_deref())
            .collect()
    }

    /// Check the container invariant: any optional sub-list that is present
    /// must be non-empty.
    pub fn verify(&self) -> Result<(), StructuralError> {
        let checks: [(&str, Option<usize>); 4] = [
            ("product_tree.branches", self.branches.as_ref().map(Vec::len)),
            (
                "product_tree.full_product_names",
                self.full_product_names.as_ref().map(Vec::len),
            ),
            (
                "product_tree.product_groups",
                self.product_groups.as_ref().map(Vec::len),
            ),
            (
                "product_tree.relationships",
                self.relationships.as_ref().map(Vec::len),
            ),
        ];
        for (path, len) in checks {
            if len == Some(0) {
                return Err(StructuralError::EmptyArray {
                    path: path.to_string(),
                });
            }
        }
        Ok(())
    }
}
