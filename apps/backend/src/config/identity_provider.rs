use reqwest::Url;

use super::env::opt_var;
use crate::error::AppError;

const DEFAULT_SCOPE: &str = "openid profile email";

/// Secondary OAuth integration: endpoint / app id / redirect URI triple.
#[derive(Debug, Clone)]
pub struct IdentityProviderConfig {
    pub endpoint: String,
    pub app_id: String,
    pub redirect_uri: String,
    pub scope: String,
}

impl IdentityProviderConfig {
    /// Reads `IDP_ENDPOINT`, `IDP_APP_ID`, `IDP_REDIRECT_URI` (and optional
    /// `IDP_SCOPE`). Returns `None` unless all three are set.
    pub fn from_env() -> Option<Self> {
        Some(Self {
            endpoint: opt_var("IDP_ENDPOINT")?.trim_end_matches('/').to_string(),
            app_id: opt_var("IDP_APP_ID")?,
            redirect_uri: opt_var("IDP_REDIRECT_URI")?,
            scope: opt_var("IDP_SCOPE").unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
        })
    }

    /// Authorization request URL for the sign-in redirect.
    pub fn authorize_url(&self, state: &str, direct_sign_in: Option<&str>) -> Result<Url, AppError> {
        let mut params = vec![
            ("client_id", self.app_id.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("response_type", "code"),
            ("scope", self.scope.as_str()),
            ("state", state),
        ];
        if let Some(hint) = direct_sign_in.filter(|h| !h.is_empty()) {
            params.push(("direct_sign_in", hint));
        }

        Url::parse_with_params(&format!("{}/oidc/auth", self.endpoint), &params)
            .map_err(|e| AppError::config(format!("invalid IDP_ENDPOINT: {e}")))
    }
}
