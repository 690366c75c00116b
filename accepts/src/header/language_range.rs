use std::{fmt, str};

use language_tags::LanguageTag;

use crate::error::ParseError;

/// A language range from the `Accept-Language` header, without the `*` wildcard.
///
/// The text must be a well-formed [BCP 47] tag. The tag is kept as written for output while
/// comparisons ignore ASCII case.
///
/// [BCP 47]: https://www.rfc-editor.org/info/bcp47
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageRange {
    raw: String,
    tag: LanguageTag,
}

impl LanguageRange {
    /// Returns the range as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the primary language subtag, e.g. `en` for `en-US`.
    pub fn primary_language(&self) -> &str {
        self.tag.primary_language()
    }

    /// Returns how precisely this range covers the offered `language`, or `None` if it doesn't.
    ///
    /// - `4`: same tag (`en-US` vs `en-US`)
    /// - `2`: this range is the candidate's primary subtag (`en` vs `en-US`)
    /// - `1`: the candidate is this range's primary subtag (`en-US` vs `en`)
    pub fn precision(&self, language: &str) -> Option<u8> {
        let language = language.trim();
        let candidate_primary = language.split('-').next().unwrap_or(language);

        if self.raw.eq_ignore_ascii_case(language) {
            Some(4)
        } else if self.raw.eq_ignore_ascii_case(candidate_primary) {
            Some(2)
        } else if self.primary_language().eq_ignore_ascii_case(language) {
            Some(1)
        } else {
            None
        }
    }
}

impl str::FromStr for LanguageRange {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let tag = LanguageTag::parse(raw).map_err(|_| ParseError::Header)?;

        Ok(LanguageRange {
            raw: raw.to_owned(),
            tag,
        })
    }
}

impl fmt::Display for LanguageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
