//! Typed `Accept*` headers and the building blocks they are parsed from.
//!
//! ## Header sources
//! Headers are read through the [`HeaderSource`] trait so that negotiation does not depend on a
//! particular HTTP stack. It is implemented for [`http::HeaderMap`], string maps and slices of
//! name/value pairs. A source distinguishes a missing header (`None`) from a present one with
//! an empty value (`Some` with no items), since the two negotiate differently.
//!
//! ## Mime Types
//! The `Accept` header uses media ranges built on the [mime] crate; candidates for media type
//! negotiation are [`Mime`](mime::Mime) values.

use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};

pub use http::header::{
    HeaderMap, HeaderName, ACCEPT, ACCEPT_CHARSET, ACCEPT_ENCODING, ACCEPT_LANGUAGE,
};

mod accept;
mod accept_charset;
mod accept_encoding;
mod accept_language;
mod language_range;
mod macros;
mod media_range;
mod preference;
mod quality;
mod quality_item;
mod token;
mod utils;

#[cfg(test)]
pub(crate) use self::macros::common_header_test;
pub(crate) use self::macros::{common_header, common_header_test_module};
pub use self::{
    accept::Accept,
    accept_charset::AcceptCharset,
    accept_encoding::AcceptEncoding,
    accept_language::AcceptLanguage,
    language_range::LanguageRange,
    media_range::MediaRange,
    preference::Preference,
    quality::{q, Quality, QualityOutOfBounds},
    quality_item::{Params, QualityItem},
    token::Token,
    utils::{fmt_comma_delimited, from_comma_delimited},
};

/// A read-only view of request headers.
pub trait HeaderSource {
    /// Returns every value of the header called `name`, in order, or `None` if the header is not
    /// present. Names compare case-insensitively.
    fn header_values(&self, name: &HeaderName) -> Option<Vec<&str>>;
}

impl<T: HeaderSource + ?Sized> HeaderSource for &T {
    #[inline]
    fn header_values(&self, name: &HeaderName) -> Option<Vec<&str>> {
        (**self).header_values(name)
    }
}

impl HeaderSource for HeaderMap {
    fn header_values(&self, name: &HeaderName) -> Option<Vec<&str>> {
        if !self.contains_key(name) {
            return None;
        }

        let values = self
            .get_all(name)
            .iter()
            .filter_map(|val| match val.to_str() {
                Ok(val) => Some(val),
                Err(_) => {
                    log::debug!("ignoring non-text {} header value", name);
                    None
                }
            })
            .collect();

        Some(values)
    }
}

/// Collects values of the pairs whose key equals `name`, ignoring case.
fn matching_values<'a, I>(pairs: I, name: &HeaderName) -> Option<Vec<&'a str>>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let values = pairs
        .into_iter()
        .filter(|(key, _)| key.trim().eq_ignore_ascii_case(name.as_str()))
        .map(|(_, val)| val)
        .collect::<Vec<_>>();

    (!values.is_empty()).then_some(values)
}

impl<S: BuildHasher> HeaderSource for HashMap<String, String, S> {
    fn header_values(&self, name: &HeaderName) -> Option<Vec<&str>> {
        matching_values(self.iter().map(|(k, v)| (k.as_str(), v.as_str())), name)
    }
}

impl HeaderSource for BTreeMap<String, String> {
    fn header_values(&self, name: &HeaderName) -> Option<Vec<&str>> {
        matching_values(self.iter().map(|(k, v)| (k.as_str(), v.as_str())), name)
    }
}

impl<K: AsRef<str>, V: AsRef<str>> HeaderSource for [(K, V)] {
    fn header_values(&self, name: &HeaderName) -> Option<Vec<&str>> {
        matching_values(self.iter().map(|(k, v)| (k.as_ref(), v.as_ref())), name)
    }
}

impl<K: AsRef<str>, V: AsRef<str>, const N: usize> HeaderSource for [(K, V); N] {
    #[inline]
    fn header_values(&self, name: &HeaderName) -> Option<Vec<&str>> {
        self[..].header_values(name)
    }
}

impl<K: AsRef<str>, V: AsRef<str>> HeaderSource for Vec<(K, V)> {
    #[inline]
    fn header_values(&self, name: &HeaderName) -> Option<Vec<&str>> {
        self[..].header_values(name)
    }
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;

    use super::*;

    #[test]
    fn header_map_source() {
        let mut headers = HeaderMap::new();
        assert_eq!(headers.header_values(&ACCEPT), None);

        headers.insert(ACCEPT, HeaderValue::from_static(""));
        assert_eq!(headers.header_values(&ACCEPT), Some(vec![""]));

        headers.insert(ACCEPT, HeaderValue::from_static("text/html"));
        headers.append(ACCEPT, HeaderValue::from_static("application/json"));
        assert_eq!(
            headers.header_values(&ACCEPT),
            Some(vec!["text/html", "application/json"])
        );

        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_bytes(b"\xfe\xff").unwrap(),
        );
        assert_eq!(headers.header_values(&ACCEPT_LANGUAGE), Some(vec![]));
    }

    #[test]
    fn map_sources() {
        let mut headers = HashMap::new();
        headers.insert("Accept-Encoding".to_owned(), "gzip".to_owned());
        assert_eq!(headers.header_values(&ACCEPT_ENCODING), Some(vec!["gzip"]));
        assert_eq!(headers.header_values(&ACCEPT), None);

        let mut headers = BTreeMap::new();
        headers.insert("accept-charset".to_owned(), String::new());
        assert_eq!(headers.header_values(&ACCEPT_CHARSET), Some(vec![""]));
    }

    #[test]
    fn pair_sources() {
        let headers = [("accept", "text/html"), ("ACCEPT", "*/*"), ("x-other", "1")];
        assert_eq!(
            headers.header_values(&ACCEPT),
            Some(vec!["text/html", "*/*"])
        );
        assert_eq!(headers.header_values(&ACCEPT_LANGUAGE), None);

        let headers = vec![("accept-language".to_owned(), "en".to_owned())];
        assert_eq!(headers.header_values(&ACCEPT_LANGUAGE), Some(vec!["en"]));
    }
}
