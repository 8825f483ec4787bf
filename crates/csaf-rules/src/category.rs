//! # Category Name Normalizer — CSAF v2.0 §6.1.26
//!
//! Canonicalizes a free-text document category and decides whether it is a
//! prohibited near-collision with a reserved profile name.
//!
//! ## Decision Table
//!
//! 1. Empty value — invalid (implementer safeguard).
//! 2. Value entirely composed of separator characters after stripping, or
//!    shorter than the shortest profile name — trivially valid (cannot
//!    collide with any profile).
//! 3. Normalized lowercase value not in the profile list — valid (a custom
//!    category is fine).
//! 4. Normalized lowercase value in the profile list AND the original text
//!    equals both its own normalization and its own stripped form — valid
//!    (legitimate byte-exact profile use).
//! 5. Otherwise — invalid (right word, wrong case/separators/padding).
//!
//! The short-or-all-junk special case in step 2 is deliberate and must not
//! be reinterpreted: such strings cannot express a profile name, so they
//! pass trivially.

/// Reserved profile names other than "Generic CSAF".
pub const PROFILES: [&str; 4] = [
    "informational_advisory",
    "security_advisory",
    "security_incident_response",
    "vex",
];

/// Characters treated as interchangeable separators/junk.
const SEPARATORS: [char; 3] = [' ', '_', '-'];

/// Length of the shortest profile name ("vex"); see the guard test below.
const MIN_PROFILE_LEN: usize = 3;

/// Fold a category string to its canonical single-underscore form:
/// dashes and underscores become spaces, then the space-separated words
/// are re-joined with single underscores. Case is preserved.
pub fn normalize(text: &str) -> String {
    text.replace(['-', '_'], " ")
        .split(' ')
        .filter(|w| !w.trim().is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Verify a category value against the prohibited-name decision table.
pub fn is_valid(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }

    let stripped = text.trim_matches(|c: char| SEPARATORS.contains(&c));
    if stripped.is_empty() || text.chars().count() < MIN_PROFILE_LEN {
        return true;
    }

    let term = normalize(text);
    let term_lc = term.to_lowercase();
    if !PROFILES.contains(&term_lc.as_str()) {
        return true;
    }

    // A reserved name is only acceptable as its byte-exact profile form.
    term_lc == term && stripped == text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_profile_len_guard() {
        let computed = PROFILES.iter().map(|p| p.len()).min().unwrap();
        assert_eq!(MIN_PROFILE_LEN, computed);
    }

    #[test]
    fn test_exact_profile_values_are_valid() {
        for profile in PROFILES {
            assert!(is_valid(profile), "{profile} should be valid");
        }
    }

    #[test]
    fn test_empty_is_invalid() {
        assert!(!is_valid(""));
    }

    #[test]
    fn test_junk_only_is_trivially_valid() {
        assert!(is_valid("-"));
        assert!(is_valid("___"));
        assert!(is_valid(" - _ - "));
    }

    #[test]
    fn test_shorter_than_shortest_profile_is_trivially_valid() {
        assert!(is_valid("no"));
        assert!(is_valid("a"));
    }

    #[test]
    fn test_custom_category_is_valid() {
        assert!(is_valid("My Custom Category"));
        assert!(is_valid("csaf_security_advisory"));
        assert!(is_valid("Advisory"));
    }

    #[test]
    fn test_underscored_profile_with_wrong_case_is_invalid() {
        // Normalizes to security_incident_response, which is reserved, but
        // the original text is not the byte-exact profile value.
        assert!(!is_valid("Security_Incident_Response"));
    }

    #[test]
    fn test_prohibited_near_collisions() {
        assert!(!is_valid("Informational Advisory"));
        assert!(!is_valid("security-incident-response"));
        assert!(!is_valid("Security      Advisory"));
        assert!(!is_valid("veX"));
        assert!(!is_valid("VEX"));
    }

    #[test]
    fn test_padded_profile_is_invalid() {
        // Strips to a reserved name but carries junk padding.
        assert!(!is_valid(" vex "));
        assert!(!is_valid("_vex_"));
        assert!(!is_valid("--security_advisory"));
    }

    #[test]
    fn test_normalize_folds_separator_runs() {
        assert_eq!(normalize("Security      Advisory"), "Security_Advisory");
        assert_eq!(normalize("security-incident-response"), "security_incident_response");
        assert_eq!(normalize("a_-_b"), "a_b");
        assert_eq!(normalize("___"), "");
    }
}
