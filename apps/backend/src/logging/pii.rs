use std::fmt;

use lazy_regex::{regex, Captures};

const REDACTED_TOKEN: &str = "[REDACTED_TOKEN]";

/// Masks emails and bearer material before a string reaches the logs.
///
/// - Emails keep the first character of the local part and the full domain.
/// - JWTs (`eyJ...` three-segment tokens) become `[REDACTED_TOKEN]`.
/// - Any other opaque run of 16+ token characters becomes `[REDACTED_TOKEN]`.
///
/// Emails go first so the domain is not mistaken for a token.
pub fn redact(input: &str) -> String {
    let emails = regex!(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").replace_all(
        input,
        |caps: &Captures| {
            let full = &caps[0];
            match full.find('@') {
                Some(at) if at > 0 => format!("{}***{}", &full[..1], &full[at..]),
                _ => full.to_string(),
            }
        },
    );

    let jwts = regex!(r"eyJ[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]*")
        .replace_all(&emails, REDACTED_TOKEN);

    regex!(r"[A-Za-z0-9_-]{16,}={0,2}")
        .replace_all(&jwts, REDACTED_TOKEN)
        .to_string()
}

/// Display wrapper that runs [`redact`] on format.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}
