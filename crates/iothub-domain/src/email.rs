//! Email address normalization and validation.

/// Normalize an email address for storage and lookup: trim surrounding
/// whitespace and lowercase. The `users.email` unique constraint is on the
/// normalized form, so two spellings of the same address cannot register
/// twice.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// Minimal structural validation: one `@` with a non-empty local part and a
/// domain containing a dot. Deliverability is proven by the OTP email, not
/// by syntax.
pub fn validate_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}
