//! Property-based tests for input validation
//!
//! Uses proptest to generate emails, usernames and form fields

use proptest::prelude::*;
use userauth::shared::validation::{
    is_valid_email, non_blank, normalize_username, require_fields, validate_email,
};
use userauth::shared::ValidationError;

proptest! {
    #[test]
    fn test_well_formed_emails_are_accepted(
        local in "[a-z0-9._-]{1,20}",
        domain in "[a-z0-9]{1,15}",
        tld in "[a-z]{2,4}",
    ) {
        let email = format!("{local}@{domain}.{tld}");
        prop_assert!(is_valid_email(&email), "{} should be valid", email);
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored(
        local in "[a-z0-9]{1,10}",
        domain in "[a-z]{1,10}",
        pad in "[ \t]{0,3}",
    ) {
        let email = format!("{pad}{local}@{domain}.com{pad}");
        prop_assert!(validate_email(&email).is_ok());
    }

    #[test]
    fn test_email_without_at_sign_is_rejected(email in "[^@]*") {
        prop_assert!(!is_valid_email(&email));
        prop_assert!(matches!(validate_email(&email), Err(ValidationError::InvalidEmail)));
    }

    #[test]
    fn test_normalized_username_is_stable(username in "[A-Za-z0-9_ ]{0,30}") {
        let normalized = normalize_username(&username);
        prop_assert_eq!(normalize_username(&normalized), normalized.clone());
        prop_assert_eq!(normalized.trim(), normalized.as_str());
        prop_assert!(!normalized.chars().any(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_whitespace_only_is_blank(value in "[ \t\n]*") {
        prop_assert_eq!(non_blank(Some(value.as_str())), None);
    }

    #[test]
    fn test_require_fields_reports_exactly_the_blank_ones(
        full_name in prop::option::of("[ a-z]{0,5}"),
        email in prop::option::of("[ a-z]{0,5}"),
    ) {
        let result = require_fields(&[
            ("fullName", full_name.as_deref()),
            ("email", email.as_deref()),
        ]);

        let mut expected = Vec::new();
        if non_blank(full_name.as_deref()).is_none() {
            expected.push("fullName is required".to_string());
        }
        if non_blank(email.as_deref()).is_none() {
            expected.push("email is required".to_string());
        }

        match result {
            Ok(()) => prop_assert!(expected.is_empty()),
            Err(error) => prop_assert_eq!(error.details(), expected),
        }
    }
}
