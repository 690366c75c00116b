use std::{fmt, str};

use mime::{Mime, Name};

use super::utils::unquote;
use crate::{error::ParseError, negotiate::Precision};

/// A media range from the `Accept` header: `*/*`, `type/*` or `type/subtype`.
///
/// Parameters of the range are not part of this type; they are kept on the enclosing
/// [`QualityItem`](super::QualityItem) next to the q-factor.
///
/// # Examples
/// ```
/// use accepts::header::MediaRange;
///
/// let range: MediaRange = "text/*".parse().unwrap();
/// assert_eq!(range.specificity(), 1);
///
/// let html = mime::TEXT_HTML;
/// assert!(range.matches(&[], &html).is_some());
/// assert!(range.matches(&[], &mime::APPLICATION_JSON).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaRange(Mime);

impl MediaRange {
    /// Returns the range as a [`Mime`]. Wildcard parts are [`mime::STAR`].
    pub fn mime(&self) -> &Mime {
        &self.0
    }

    /// Returns the number of non-wildcard parts: `*/*` is 0, `type/*` is 1, `type/subtype` is 2.
    pub fn specificity(&self) -> u8 {
        u8::from(self.0.type_() != mime::STAR) + u8::from(self.0.subtype() != mime::STAR)
    }

    /// Matches this range plus its `params` against an offered media type.
    ///
    /// Type and subtype must be equal (ignoring case) unless the range has a wildcard in that
    /// position. Every parameter of the range must be present on the candidate with the same
    /// value; `charset` values ignore case, other values are compared exactly.
    pub fn matches(&self, params: &[(String, String)], candidate: &Mime) -> Option<Precision> {
        if !name_matches(self.0.type_(), candidate.type_())
            || !name_matches(self.0.subtype(), candidate.subtype())
        {
            return None;
        }

        for (key, val) in params {
            let offered = candidate
                .params()
                .find(|(name, _)| name.as_str().eq_ignore_ascii_case(key))
                .map(|(_, offered)| unquote(offered.as_str()))?;

            let same = if key == "charset" {
                offered.eq_ignore_ascii_case(val)
            } else {
                offered == *val
            };

            if !same {
                return None;
            }
        }

        Some(Precision {
            specificity: self.specificity(),
            parameters: u8::try_from(params.len()).unwrap_or(u8::MAX),
        })
    }
}

/// Returns true if the range part is `*` or equals the candidate part, ignoring case.
fn name_matches(range: Name<'_>, candidate: Name<'_>) -> bool {
    range == mime::STAR || range.as_str().eq_ignore_ascii_case(candidate.as_str())
}

impl str::FromStr for MediaRange {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mime = match s.trim() {
            // some user agents send a lone "*" to mean "*/*"
            "*" => mime::STAR_STAR,
            other => other.parse::<Mime>().map_err(|_| ParseError::Header)?,
        };

        if mime.params().next().is_some() {
            return Err(ParseError::Header);
        }

        Ok(MediaRange(mime))
    }
}

impl From<Mime> for MediaRange {
    /// Drops any parameters of `mime`.
    fn from(mime: Mime) -> Self {
        match mime.essence_str().parse() {
            Ok(essence) => MediaRange(essence),
            Err(_) => MediaRange(mime),
        }
    }
}

impl fmt::Display for MediaRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.essence_str())
    }
}
