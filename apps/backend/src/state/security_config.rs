use crate::auth::policy::DEFAULT_ADMIN_EMAIL_DOMAIN;
use crate::auth::CookieSettings;
use crate::config::env::opt_var;
use crate::config::RuntimeEnv;

/// Cookie attributes and the admin email domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityConfig {
    pub cookies: CookieSettings,
    /// Emails on exactly this domain are admins even without the profile flag
    pub admin_email_domain: String,
}

impl SecurityConfig {
    pub fn new(secure_cookies: bool, admin_email_domain: impl Into<String>) -> Self {
        Self {
            cookies: CookieSettings::new(secure_cookies),
            admin_email_domain: admin_email_domain.into(),
        }
    }

    /// `Secure` cookies in production; `ADMIN_EMAIL_DOMAIN` overrides the default domain.
    pub fn from_env(env: RuntimeEnv) -> Self {
        let domain =
            opt_var("ADMIN_EMAIL_DOMAIN").unwrap_or_else(|| DEFAULT_ADMIN_EMAIL_DOMAIN.to_string());
        Self::new(env.is_production(), domain)
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(false, DEFAULT_ADMIN_EMAIL_DOMAIN)
    }
}
