//! Input validation for searches and prediction submissions

use thiserror::Error;

use crate::types::ActiveTab;

/// Shortest query that is sent to the search endpoint
pub const MIN_QUERY_LEN: usize = 2;

/// Why a calculation cannot be submitted
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("target plant is required")]
    MissingPlantA,

    #[error("second parent is required for a cross evaluation")]
    MissingPlantB,
}

// ============================================================================
// Search Validations
// ============================================================================

/// Whether the text is long enough to query the search endpoint
pub fn is_searchable_query(text: &str, min_len: usize) -> bool {
    text.chars().count() >= min_len
}

/// Whether the panel should reopen when the field regains focus
pub fn should_open_on_focus(text: &str) -> bool {
    text.chars().count() > 1
}

/// Whether the "no matches" hint applies to a settled search
pub fn shows_no_matches(text: &str, open: bool, searching: bool, suggestion_count: usize) -> bool {
    open && !searching && text.chars().count() > 2 && suggestion_count == 0
}

// ============================================================================
// Submission Validations
// ============================================================================

/// Validate the form inputs for the current tab.
///
/// Plant B is only checked in cross mode.
pub fn validate_submission(
    tab: ActiveTab,
    plant_a: &str,
    plant_b: &str,
) -> Result<(), SubmissionError> {
    if plant_a.trim().is_empty() {
        return Err(SubmissionError::MissingPlantA);
    }
    if tab == ActiveTab::Cross && plant_b.trim().is_empty() {
        return Err(SubmissionError::MissingPlantB);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ========================================================================
    // Search Validation Tests
    // ========================================================================

    #[test]
    fn test_searchable_query() {
        assert!(!is_searchable_query("", MIN_QUERY_LEN));
        assert!(!is_searchable_query("w", MIN_QUERY_LEN));
        assert!(is_searchable_query("wh", MIN_QUERY_LEN));
        // Counted in characters, not bytes
        assert!(!is_searchable_query("é", MIN_QUERY_LEN));
    }

    #[test]
    fn test_no_matches_hint() {
        assert!(shows_no_matches("abc", true, false, 0));
        assert!(!shows_no_matches("ab", true, false, 0));
        assert!(!shows_no_matches("abc", false, false, 0));
        assert!(!shows_no_matches("abc", true, true, 0));
        assert!(!shows_no_matches("abc", true, false, 3));
    }

    #[test]
    fn test_open_on_focus() {
        assert!(!should_open_on_focus("a"));
        assert!(should_open_on_focus("ab"));
    }

    // ========================================================================
    // Submission Validation Tests
    // ========================================================================

    #[test]
    fn test_single_ignores_plant_b() {
        assert!(validate_submission(ActiveTab::Single, "Abutilon", "").is_ok());
        assert_eq!(
            validate_submission(ActiveTab::Single, "  ", ""),
            Err(SubmissionError::MissingPlantA)
        );
    }

    #[test]
    fn test_cross_requires_both() {
        assert!(validate_submission(ActiveTab::Cross, "Abies", "Trifolium").is_ok());
        assert_eq!(
            validate_submission(ActiveTab::Cross, "Abies", " "),
            Err(SubmissionError::MissingPlantB)
        );
    }

    #[test]
    fn test_long_identifiers_accepted() {
        let long = "Abutilon ".repeat(40);
        assert!(validate_submission(ActiveTab::Single, &long, "").is_ok());
        assert!(validate_submission(ActiveTab::Cross, &long, &long).is_ok());
    }

    proptest! {
        #[test]
        fn test_single_mode_ignores_plant_b(a in "[A-Za-z]{1,40}", b in "\\PC{0,200}") {
            prop_assert!(validate_submission(ActiveTab::Single, &a, &b).is_ok());
        }

        #[test]
        fn test_blank_target_always_rejected(pad in "[ \t]{0,8}", b in "[A-Za-z]{0,20}") {
            prop_assert_eq!(
                validate_submission(ActiveTab::Cross, &pad, &b),
                Err(SubmissionError::MissingPlantA)
            );
        }
    }
}
