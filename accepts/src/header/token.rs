use std::{fmt, hash, str};

use crate::error::ParseError;

/// A case-insensitive header token, such as a content-coding or charset name.
///
/// Tokens follow the [RFC 7230 §3.2.6] `token` grammar. Comparison ignores ASCII case while the
/// original spelling is kept for display.
///
/// # Examples
/// ```
/// use accepts::header::Token;
///
/// let gzip: Token = "GZip".parse().unwrap();
/// assert_eq!(gzip, "gzip");
/// assert_eq!(gzip.to_string(), "GZip");
///
/// assert!("utf 8".parse::<Token>().is_err());
/// ```
///
/// [RFC 7230 §3.2.6]: https://datatracker.ietf.org/doc/html/rfc7230#section-3.2.6
#[derive(Debug, Clone, Eq)]
pub struct Token(String);

impl Token {
    /// Returns the token as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this is the `identity` content-coding.
    pub fn is_identity(&self) -> bool {
        self == "identity"
    }
}

/// Returns true if `b` is a `tchar`.
fn is_tchar(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}

impl str::FromStr for Token {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.is_empty() || !s.bytes().all(is_tchar) {
            return Err(ParseError::Header);
        }

        Ok(Token(s.to_owned()))
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Token) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl hash::Hash for Token {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        for b in self.0.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
