//! Admin authorization rule, applied in one place by the `AdminUser`
//! extractor before any admin handler body runs.

use unicode_normalization::UnicodeNormalization;

pub const DEFAULT_ADMIN_EMAIL_DOMAIN: &str = "admin.com";

/// Outcome of the admin check, kept for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminGrant {
    /// `profiles.is_admin` is set
    ProfileFlag,
    /// No flag, but the email is on the admin domain
    EmailDomain,
}

/// Trimmed, NFKC-normalized, lowercased email.
pub fn normalize_email(email: &str) -> String {
    email.trim().nfkc().collect::<String>().to_lowercase()
}

/// True when `email` belongs to exactly `domain` (no subdomains).
pub fn email_in_domain(email: &str, domain: &str) -> bool {
    let email = normalize_email(email);
    let domain = normalize_email(domain.trim_start_matches('@'));
    if domain.is_empty() {
        return false;
    }
    match email.rsplit_once('@') {
        Some((local, host)) => !local.is_empty() && host == domain,
        None => false,
    }
}

/// The profile flag decides first; the email domain is the fallback.
pub fn admin_grant(
    profile_is_admin: Option<bool>,
    email: Option<&str>,
    admin_domain: &str,
) -> Option<AdminGrant> {
    if profile_is_admin == Some(true) {
        return Some(AdminGrant::ProfileFlag);
    }
    match email {
        Some(email) if email_in_domain(email, admin_domain) => Some(AdminGrant::EmailDomain),
        _ => None,
    }
}
