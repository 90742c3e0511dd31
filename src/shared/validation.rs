//! Input Validation
//!
//! Pure validation rules used by the registration and login flows. Each
//! check returns `Result<_, ValidationError>` so callers compose them with
//! `?` instead of branching on booleans.

use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::shared::error::ValidationError;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // local@domain.tld, with a 2-4 character final label
        let pattern = r"^[A-Za-z0-9_.\-]+@([A-Za-z0-9_\-]+\.)+[A-Za-z0-9_\-]{2,4}$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Return true if the email matches the accepted `local@domain.tld` pattern
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Return the trimmed value, or `None` if it is absent or whitespace-only
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|trimmed| !trimmed.is_empty())
}

/// Check that every named field carries a non-blank value
///
/// All offending fields are reported at once, in the order given.
pub fn require_fields(fields: &[(&str, Option<&str>)]) -> Result<(), ValidationError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| non_blank(*value).is_none())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::missing_fields(missing))
    }
}

/// Validate an email address, trimming surrounding whitespace first
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if is_valid_email(email.trim()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Canonical form of a username for storage and comparison
pub fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}

/// Which login identifiers must be supplied
///
/// `RequireBoth` rejects a login unless both username and email are present.
/// `RequireEither` accepts a login carrying at least one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginIdentifierPolicy {
    /// Username AND email must both be present
    #[default]
    RequireBoth,
    /// Username OR email must be present
    RequireEither,
}

impl LoginIdentifierPolicy {
    /// Check the supplied identifiers against this policy
    pub fn check(self, username: Option<&str>, email: Option<&str>) -> Result<(), ValidationError> {
        let has_username = non_blank(username).is_some();
        let has_email = non_blank(email).is_some();

        let satisfied = match self {
            Self::RequireBoth => has_username && has_email,
            Self::RequireEither => has_username || has_email,
        };

        if satisfied {
            Ok(())
        } else {
            Err(ValidationError::MissingIdentifier)
        }
    }
}

impl FromStr for LoginIdentifierPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "both" | "require_both" => Ok(Self::RequireBoth),
            "either" | "require_either" => Ok(Self::RequireEither),
            other => Err(format!("unknown login identifier policy '{other}' (expected 'both' or 'either')")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        for email in ["alice@example.com", "a.b-c_d@mail.example.org", "x@y.io"] {
            assert!(is_valid_email(email), "{email} should be valid");
        }
    }

    #[test]
    fn test_invalid_emails() {
        for email in [
            "",
            "alice",
            "alice@",
            "@example.com",
            "alice@example",
            "alice@example.c",
            "alice@example.museum",
            "al ice@example.com",
            "alice@@example.com",
        ] {
            assert!(!is_valid_email(email), "{email} should be invalid");
        }
    }

    #[test]
    fn test_validate_email_trims() {
        assert!(validate_email("  alice@example.com ").is_ok());
        assert_eq!(validate_email("nope"), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_require_fields_reports_every_blank_field() {
        let result = require_fields(&[
            ("fullName", Some("Alice A")),
            ("email", Some("   ")),
            ("password", None),
            ("username", Some("alice")),
        ]);
        assert_eq!(result, Err(ValidationError::missing_fields(["email", "password"])));
    }

    #[test]
    fn test_require_fields_accepts_complete_input() {
        assert!(require_fields(&[("a", Some("x")), ("b", Some(" y "))]).is_ok());
    }

    #[test]
    fn test_normalize_username() {
        assert_eq!(normalize_username("  Alice "), "alice");
    }

    #[test]
    fn test_require_both_policy() {
        let policy = LoginIdentifierPolicy::RequireBoth;
        assert!(policy.check(Some("alice"), Some("alice@example.com")).is_ok());
        assert_eq!(policy.check(Some("alice"), None), Err(ValidationError::MissingIdentifier));
        assert_eq!(policy.check(None, Some("alice@example.com")), Err(ValidationError::MissingIdentifier));
        assert_eq!(policy.check(Some(" "), Some("alice@example.com")), Err(ValidationError::MissingIdentifier));
    }

    #[test]
    fn test_require_either_policy() {
        let policy = LoginIdentifierPolicy::RequireEither;
        assert!(policy.check(Some("alice"), None).is_ok());
        assert!(policy.check(None, Some("alice@example.com")).is_ok());
        assert_eq!(policy.check(None, Some("")), Err(ValidationError::MissingIdentifier));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("both".parse(), Ok(LoginIdentifierPolicy::RequireBoth));
        assert_eq!(" Either ".parse(), Ok(LoginIdentifierPolicy::RequireEither));
        assert!("sometimes".parse::<LoginIdentifierPolicy>().is_err());
    }
}
