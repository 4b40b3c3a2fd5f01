use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;

const TOKEN_BYTES: usize = 32;

/// Why a double-submit check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsrfFailure {
    MissingCookie,
    MissingHeader,
    Mismatch,
}

impl CsrfFailure {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingCookie => "missing_cookie",
            Self::MissingHeader => "missing_header",
            Self::Mismatch => "mismatch",
        }
    }
}

/// Fresh random token, URL-safe base64 of 32 OS-random bytes.
/// Also used for the OAuth `state` parameter.
pub fn generate_token() -> String {
    let mut buf = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut buf);
    URL_SAFE_NO_PAD.encode(buf)
}

/// Double-submit check: the header must equal the cookie.
pub fn verify(cookie: Option<&str>, header: Option<&str>) -> Result<(), CsrfFailure> {
    let cookie = cookie
        .filter(|c| !c.is_empty())
        .ok_or(CsrfFailure::MissingCookie)?;
    let header = header
        .filter(|h| !h.is_empty())
        .ok_or(CsrfFailure::MissingHeader)?;

    if constant_time_eq(cookie.as_bytes(), header.as_bytes()) {
        Ok(())
    } else {
        Err(CsrfFailure::Mismatch)
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
