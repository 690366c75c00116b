use std::{fmt, str};

/// A header item that is either the wildcard (`*`) or a specific `T`.
///
/// Used by the `Accept-Encoding`, `Accept-Charset` and `Accept-Language` headers, whose grammar
/// allows a lone `*` meaning "anything not listed elsewhere". The `Accept` header has its own
/// wildcard forms (`*/*`, `type/*`) handled by [`MediaRange`](super::MediaRange).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Hash)]
pub enum Preference<T> {
    /// `*`, covering values the header does not list.
    Any,

    /// A specific value, such as a content-coding or a language range.
    Specific(T),
}

impl<T: fmt::Display> fmt::Display for Preference<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Preference::Specific(item) = self {
            item.fmt(f)
        } else {
            f.write_str("*")
        }
    }
}

impl<T: str::FromStr> str::FromStr for Preference<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s == "*" {
            return Ok(Preference::Any);
        }

        s.parse().map(Preference::Specific)
    }
}
