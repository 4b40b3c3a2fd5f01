//! Session bridging between request cookies and the hosted auth API.
//!
//! - [`client`]: the `AuthClient` seam plus its wire types
//! - [`http_client`]: the reqwest implementation against the auth REST API
//! - [`session`]: the token pair and local expiry inspection
//! - [`cookies`]: cookie names, attributes and the per-request accumulator
//! - [`csrf`]: double-submit token issue and comparison
//! - [`policy`]: the single admin authorization rule

pub mod client;
pub mod cookies;
pub mod csrf;
pub mod http_client;
pub mod policy;
pub mod session;

pub use client::{AuthClient, AuthError, AuthSession, AuthUser};
pub use cookies::{CookieSettings, ResponseCookies, SessionWrite};
pub use http_client::HttpAuthClient;
pub use session::{SessionContext, SessionTokens};
