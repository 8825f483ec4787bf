//! # Document Meta-Data — Level-Zero Structural Checks
//!
//! Verifies the presence and basic shape of the `document` member before any
//! mandatory rule runs: category, csaf_version, publisher, title, tracking,
//! plus the optional `lang`, `acknowledgments`, and `aggregate_severity`
//! properties when present.
//!
//! ## Presence Semantics
//!
//! Mandatory `document` and `document.publisher` properties use falsy
//! semantics: absent, `null`, empty text, empty containers, `false`, and `0`
//! all count as missing. `document.tracking` sub-properties only require
//! presence (non-null); their value shapes are the schema validator's job.
//!
//! ## Warnings
//!
//! Space-only `category` and `title` values are reported through the logging
//! sink but do not fail the check.

use serde_json::Value;

use crate::error::StructuralError;
use crate::CSAF_VERSION_STRING;

/// Mandatory top-level `document` properties.
const DOCUMENT_PROPS: [&str; 5] = ["category", "csaf_version", "publisher", "title", "tracking"];

/// Mandatory `document.publisher` properties.
const PUBLISHER_PROPS: [&str; 3] = ["category", "name", "namespace"];

/// Mandatory `document.tracking` properties (presence only).
const TRACKING_PROPS: [&str; 6] = [
    "current_release_date",
    "id",
    "initial_release_date",
    "revision_history",
    "status",
    "version",
];

/// Known properties of one `document.acknowledgments` entry.
const ACKNOWLEDGMENT_PROPS: [&str; 4] = ["names", "organization", "summary", "urls"];

/// Known properties of `document.aggregate_severity`.
const AGGREGATE_SEVERITY_PROPS: [&str; 2] = ["text", "namespace"];

/// Verify the root shape of a parsed advisory: the `document` member and,
/// if present, the `vulnerabilities` container.
///
/// This is the most superficial verification; it runs after JSON parsing
/// succeeds and before the mandatory rule suite.
///
/// # Errors
///
/// Returns the first [`StructuralError`] encountered, field-qualified.
pub fn verify_document(doc: &Value) -> Result<(), StructuralError> {
    let document = match doc.get("document") {
        Some(d) if !is_falsy(d) => d,
        _ => return Err(StructuralError::MissingDocument),
    };

    verify_document_member(document)?;

    if let Some(vulnerabilities) = doc.get("vulnerabilities") {
        match vulnerabilities {
            Value::Array(items) if items.is_empty() => {
                return Err(StructuralError::EmptyArray {
                    path: "vulnerabilities".to_string(),
                })
            }
            Value::Array(_) => {}
            _ => {
                return Err(StructuralError::NotArray {
                    path: "vulnerabilities".to_string(),
                })
            }
        }
    }

    Ok(())
}

/// Verify the `document` member itself.
fn verify_document_member(document: &Value) -> Result<(), StructuralError> {
    for prop in DOCUMENT_PROPS {
        if document.get(prop).is_none_or_falsy() {
            return Err(StructuralError::MissingDocumentProperty(prop));
        }
    }

    verify_text(document, "category", "document.category")?;
    verify_csaf_version(&document["csaf_version"])?;

    if let Some(lang) = document.get("lang") {
        verify_language_tag(lang, "document.lang")?;
    }

    for prop in PUBLISHER_PROPS {
        let value = document.get("publisher").and_then(|p| p.get(prop));
        if value.is_none_or_falsy() {
            return Err(StructuralError::MissingPublisherProperty(prop));
        }
    }
    verify_uri(&document["publisher"]["namespace"], "document.publisher.namespace")?;

    if let Some(source_lang) = document.get("source_lang") {
        verify_language_tag(source_lang, "document.source_lang")?;
    }

    verify_text(document, "title", "document.title")?;

    for sub in TRACKING_PROPS {
        let value = document.get("tracking").and_then(|t| t.get(sub));
        if value.is_none() || value == Some(&Value::Null) {
            return Err(StructuralError::MissingTrackingProperty(sub));
        }
    }

    if let Some(acknowledgments) = document.get("acknowledgments") {
        verify_acknowledgments(acknowledgments)?;
    }

    if let Some(aggregate_severity) = document.get("aggregate_severity") {
        verify_aggregate_severity(aggregate_severity)?;
    }

    Ok(())
}

/// Require a text-valued property; warn when the text is space-only.
fn verify_text(parent: &Value, prop: &str, path: &str) -> Result<(), StructuralError> {
    match parent.get(prop).and_then(Value::as_str) {
        Some(text) if text.trim().is_empty() => {
            tracing::warn!("warning - property {path} value is space-only");
            Ok(())
        }
        Some(_) => Ok(()),
        None => Err(StructuralError::NotText {
            path: path.to_string(),
        }),
    }
}

/// `document.csaf_version` must literal-equal the supported version.
fn verify_csaf_version(value: &Value) -> Result<(), StructuralError> {
    let text = value.as_str().ok_or_else(|| StructuralError::NotText {
        path: "document.csaf_version".to_string(),
    })?;
    if text != CSAF_VERSION_STRING {
        return Err(StructuralError::CsafVersionMismatch {
            found: text.to_string(),
        });
    }
    Ok(())
}

/// Validate an optional language-tag property (`document.lang`).
fn verify_language_tag(value: &Value, path: &str) -> Result<(), StructuralError> {
    let text = value.as_str().ok_or_else(|| StructuralError::NotText {
        path: path.to_string(),
    })?;
    if text.is_empty() {
        return Err(StructuralError::EmptyText {
            path: path.to_string(),
        });
    }
    if !is_well_formed_language_tag(text) {
        return Err(StructuralError::InvalidLanguageTag {
            path: path.to_string(),
            found: text.to_string(),
        });
    }
    Ok(())
}

/// Require a text-valued property parsing as an absolute URI.
fn verify_uri(value: &Value, path: &str) -> Result<(), StructuralError> {
    let text = value.as_str().ok_or_else(|| StructuralError::NotText {
        path: path.to_string(),
    })?;
    url::Url::parse(text).map_err(|err| StructuralError::InvalidUri {
        path: path.to_string(),
        reason: err.to_string(),
    })?;
    Ok(())
}

/// BCP 47 well-formedness (grammar only, no registry lookup): a primary
/// subtag of 2-8 ASCII letters followed by `-` separated subtags of 1-8
/// alphanumerics each.
pub fn is_well_formed_language_tag(tag: &str) -> bool {
    let mut subtags = tag.split('-');
    let primary = match subtags.next() {
        Some(s) => s,
        None => return false,
    };
    let primary_ok = (2..=8).contains(&primary.len())
        && primary.chars().all(|c| c.is_ascii_alphabetic());
    primary_ok
        && subtags.all(|s| {
            (1..=8).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphanumeric())
        })
}

/// Verify `document.acknowledgments` when present: a non-empty array of
/// objects carrying 1..=4 known properties with non-empty contents.
fn verify_acknowledgments(values: &Value) -> Result<(), StructuralError> {
    let base = "document.acknowledgments";
    let entries = values.as_array().ok_or_else(|| StructuralError::NotArray {
        path: base.to_string(),
    })?;
    if entries.is_empty() {
        return Err(StructuralError::EmptyArray {
            path: base.to_string(),
        });
    }

    for (pos, entry) in entries.iter().enumerate() {
        let entry_path = format!("{base}[{pos}]");
        let map = entry.as_object().ok_or_else(|| StructuralError::NotObject {
            path: entry_path.clone(),
        })?;

        if map.is_empty() {
            return Err(StructuralError::TooFewProperties {
                path: entry_path.clone(),
                found: 0,
            });
        }
        if map.len() > ACKNOWLEDGMENT_PROPS.len() {
            return Err(StructuralError::TooManyProperties {
                path: entry_path.clone(),
                found: map.len(),
            });
        }
        if map.keys().all(|k| ACKNOWLEDGMENT_PROPS.contains(&k.as_str())) {
            tracing::info!("set of properties of {entry_path} only contains known properties");
        }

        for what in ["names", "urls"] {
            let Some(seq) = map.get(what) else { continue };
            let seq_path = format!("{entry_path}.{what}");
            let items = seq.as_array().ok_or_else(|| StructuralError::NotArray {
                path: seq_path.clone(),
            })?;
            if items.is_empty() {
                return Err(StructuralError::EmptyArray {
                    path: seq_path.clone(),
                });
            }
            for (ndx, item) in items.iter().enumerate() {
                let item_path = format!("{seq_path}[{ndx}]");
                let text = item.as_str().ok_or_else(|| StructuralError::NotText {
                    path: item_path.clone(),
                })?;
                if text.is_empty() {
                    return Err(StructuralError::EmptyText { path: item_path });
                }
                if what == "urls" {
                    url::Url::parse(text).map_err(|err| StructuralError::InvalidUri {
                        path: item_path,
                        reason: err.to_string(),
                    })?;
                }
            }
        }

        for what in ["organization", "summary"] {
            let Some(value) = map.get(what) else { continue };
            let text_path = format!("{entry_path}.{what}");
            let text = value.as_str().ok_or_else(|| StructuralError::NotText {
                path: text_path.clone(),
            })?;
            if text.is_empty() {
                return Err(StructuralError::EmptyText { path: text_path });
            }
        }
    }

    Ok(())
}

/// Verify `document.aggregate_severity` when present: a non-empty object
/// with mandatory `text` and optional URI-valued `namespace`.
fn verify_aggregate_severity(value: &Value) -> Result<(), StructuralError> {
    let base = "document.aggregate_severity";
    let map = value.as_object().ok_or_else(|| StructuralError::NotObject {
        path: base.to_string(),
    })?;
    if map.is_empty() {
        return Err(StructuralError::EmptyObject {
            path: base.to_string(),
        });
    }
    if map.len() > AGGREGATE_SEVERITY_PROPS.len() {
        return Err(StructuralError::TooManyProperties {
            path: base.to_string(),
            found: map.len(),
        });
    }

    let text_path = format!("{base}.text");
    let text = map
        .get("text")
        .ok_or_else(|| StructuralError::MissingProperty {
            path: text_path.clone(),
        })?
        .as_str()
        .ok_or_else(|| StructuralError::NotText {
            path: text_path.clone(),
        })?;
    if text.is_empty() {
        return Err(StructuralError::EmptyText { path: text_path });
    }

    if let Some(namespace) = map.get("namespace") {
        let ns_path = format!("{base}.namespace");
        let ns = namespace.as_str().ok_or_else(|| StructuralError::NotText {
            path: ns_path.clone(),
        })?;
        if ns.is_empty() {
            return Err(StructuralError::EmptyText { path: ns_path });
        }
        url::Url::parse(ns).map_err(|err| StructuralError::InvalidUri {
            path: ns_path,
            reason: err.to_string(),
        })?;
    }

    Ok(())
}

/// Falsy semantics for mandatory presence checks: absent, `null`, empty
/// text, empty containers, `false`, and numeric zero all count as missing.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(m) => m.is_empty(),
    }
}

/// Extension over `Option<&Value>` so presence checks read naturally.
trait OptionValueExt {
    fn is_none_or_falsy(&self) -> bool;
}

impl OptionValueExt for Option<&Value> {
    fn is_none_or_falsy(&self) -> bool {
        match self {
            None => true,
            Some(v) => is_falsy(v),
        }
    }
}
