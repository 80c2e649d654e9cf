//! Email address validation

use regex::Regex;
use std::sync::LazyLock;
use validator::ValidationError;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.-]+@([A-Za-z0-9_-]+\.)+[A-Za-z0-9_-]{2,4}$")
        .expect("email regex is valid")
});

/// Check that a string is a plausible `local@domain.tld` address.
///
/// Both the length bounds and the pattern must hold. Word characters are
/// ASCII only.
pub fn is_email_valid(email: &str) -> bool {
    email.len() > 3 && email.len() < 254 && EMAIL_RE.is_match(email)
}

/// Adapter for `#[validate(custom(function = "validate_email"))]`
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if is_email_valid(email) {
        Ok(())
    } else {
        Err(ValidationError::new("email").with_message("invalid user email".into()))
    }
}
