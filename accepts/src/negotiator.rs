use mime::Mime;

use crate::{
    header::{Accept, AcceptCharset, AcceptEncoding, AcceptLanguage, HeaderSource},
    negotiate::{negotiate, no_implicit},
};

/// The four `Accept*` headers of one request, parsed once and ranked on demand.
///
/// Each dimension keeps track of whether its header was sent at all: a missing header accepts
/// every candidate, while a header that is present but empty accepts none (except the
/// `identity` encoding).
///
/// Unlike [`Accepts`](crate::Accepts), which picks a single representation, the `preferred_*`
/// methods return every acceptable candidate, most preferred first.
///
/// # Examples
/// ```
/// use accepts::Negotiator;
///
/// let headers = [
///     ("Accept", "text/*;q=0.5, application/json"),
///     ("Accept-Encoding", "gzip, br;q=0.5"),
/// ];
/// let negotiator = Negotiator::new(&headers);
///
/// let offered = [mime::TEXT_HTML, mime::APPLICATION_JSON, mime::IMAGE_PNG];
/// assert_eq!(
///     negotiator.preferred_media_types(&offered),
///     vec![&mime::APPLICATION_JSON, &mime::TEXT_HTML],
/// );
///
/// assert_eq!(negotiator.encodings(), vec!["gzip", "br"]);
/// assert_eq!(negotiator.preferred_encodings(&["br", "identity"]), vec!["identity", "br"]);
///
/// // no Accept-Language header: anything goes
/// assert_eq!(negotiator.languages(), vec!["*"]);
/// assert_eq!(negotiator.preferred_languages(&["fr", "en"]), vec!["fr", "en"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Negotiator {
    accept: Option<Accept>,
    accept_encoding: Option<AcceptEncoding>,
    accept_charset: Option<AcceptCharset>,
    accept_language: Option<AcceptLanguage>,
}

impl Negotiator {
    /// Parses the negotiation headers from `headers`.
    pub fn new<H: HeaderSource + ?Sized>(headers: &H) -> Self {
        Negotiator {
            accept: Accept::parse(headers),
            accept_encoding: AcceptEncoding::parse(headers),
            accept_charset: AcceptCharset::parse(headers),
            accept_language: AcceptLanguage::parse(headers),
        }
    }

    /// Returns the parsed `Accept` header, if the request carried one.
    pub fn accept(&self) -> Option<&Accept> {
        self.accept.as_ref()
    }

    /// Returns the parsed `Accept-Encoding` header, if the request carried one.
    pub fn accept_encoding(&self) -> Option<&AcceptEncoding> {
        self.accept_encoding.as_ref()
    }

    /// Returns the parsed `Accept-Charset` header, if the request carried one.
    pub fn accept_charset(&self) -> Option<&AcceptCharset> {
        self.accept_charset.as_ref()
    }

    /// Returns the parsed `Accept-Language` header, if the request carried one.
    pub fn accept_language(&self) -> Option<&AcceptLanguage> {
        self.accept_language.as_ref()
    }

    /// Lists acceptable media ranges, most preferred first, without parameters or q-factors.
    ///
    /// Returns `["*/*"]` when the `Accept` header is missing.
    pub fn media_types(&self) -> Vec<String> {
        listing(self.accept.as_ref().map(Accept::ranked_tokens), "*/*")
    }

    /// Ranks offered media types, returning the acceptable ones, most preferred first.
    pub fn preferred_media_types<'c>(&self, candidates: &'c [Mime]) -> Vec<&'c Mime> {
        let accept = self.accept.as_ref().map(|accept| accept.as_slice());
        pick(candidates, negotiate(accept, candidates, no_implicit))
    }

    /// Lists acceptable content-codings, most preferred first.
    ///
    /// Returns `["*"]` when the `Accept-Encoding` header is missing.
    pub fn encodings(&self) -> Vec<String> {
        listing(
            self.accept_encoding
                .as_ref()
                .map(AcceptEncoding::ranked_tokens),
            "*",
        )
    }

    /// Ranks offered content-codings, returning the acceptable ones, most preferred first.
    ///
    /// `identity` stays acceptable unless the header explicitly excludes it.
    pub fn preferred_encodings<'c>(&self, candidates: &[&'c str]) -> Vec<&'c str> {
        let ranked = match &self.accept_encoding {
            Some(accept) => accept.negotiate(candidates),
            None => (0..candidates.len()).collect(),
        };

        pick_str(candidates, ranked)
    }

    /// Lists acceptable charsets, most preferred first.
    ///
    /// Returns `["*"]` when the `Accept-Charset` header is missing.
    pub fn charsets(&self) -> Vec<String> {
        listing(
            self.accept_charset
                .as_ref()
                .map(AcceptCharset::ranked_tokens),
            "*",
        )
    }

    /// Ranks offered charsets, returning the acceptable ones, most preferred first.
    pub fn preferred_charsets<'c>(&self, candidates: &[&'c str]) -> Vec<&'c str> {
        let ranked = match &self.accept_charset {
            Some(accept) => accept.negotiate(candidates),
            None => (0..candidates.len()).collect(),
        };

        pick_str(candidates, ranked)
    }

    /// Lists acceptable language ranges, most preferred first.
    ///
    /// Returns `["*"]` when the `Accept-Language` header is missing.
    pub fn languages(&self) -> Vec<String> {
        listing(
            self.accept_language
                .as_ref()
                .map(AcceptLanguage::ranked_tokens),
            "*",
        )
    }

    /// Ranks offered languages, returning the acceptable ones, most preferred first.
    pub fn preferred_languages<'c>(&self, candidates: &[&'c str]) -> Vec<&'c str> {
        let ranked = match &self.accept_language {
            Some(accept) => accept.negotiate(candidates),
            None => (0..candidates.len()).collect(),
        };

        pick_str(candidates, ranked)
    }
}

fn listing(ranked: Option<Vec<String>>, wildcard: &str) -> Vec<String> {
    ranked.unwrap_or_else(|| vec![wildcard.to_owned()])
}

fn pick<T>(candidates: &[T], ranked: Vec<usize>) -> Vec<&T> {
    ranked.into_iter().map(|idx| &candidates[idx]).collect()
}

fn pick_str<'c>(candidates: &[&'c str], ranked: Vec<usize>) -> Vec<&'c str> {
    ranked.into_iter().map(|idx| candidates[idx]).collect()
}

#[cfg(test)]
mod tests {
    use http::{header, HeaderMap, HeaderValue};

    use super::*;

    fn negotiator(headers: &[(&str, &str)]) -> Negotiator {
        Negotiator::new(headers)
    }

    #[test]
    fn missing_headers() {
        let negotiator = negotiator(&[]);
        assert_eq!(negotiator, Negotiator::default());

        assert_eq!(negotiator.media_types(), vec!["*/*"]);
        assert_eq!(negotiator.encodings(), vec!["*"]);
        assert_eq!(negotiator.charsets(), vec!["*"]);
        assert_eq!(negotiator.languages(), vec!["*"]);

        let offered = [mime::IMAGE_PNG, mime::TEXT_HTML];
        assert_eq!(
            negotiator.preferred_media_types(&offered),
            vec![&mime::IMAGE_PNG, &mime::TEXT_HTML]
        );
        assert_eq!(negotiator.preferred_encodings(&["br", "gzip"]), vec!["br", "gzip"]);
        assert_eq!(negotiator.preferred_charsets(&["utf-8"]), vec!["utf-8"]);
        assert_eq!(negotiator.preferred_languages(&["fr", "en"]), vec!["fr", "en"]);
        assert!(negotiator.preferred_languages(&[]).is_empty());
    }

    #[test]
    fn empty_headers() {
        let negotiator = negotiator(&[
            ("accept", ""),
            ("accept-encoding", ""),
            ("accept-charset", ""),
            ("accept-language", ""),
        ]);

        assert!(negotiator.media_types().is_empty());
        assert!(negotiator.encodings().is_empty());
        assert!(negotiator.charsets().is_empty());
        assert!(negotiator.languages().is_empty());

        assert!(negotiator.preferred_media_types(&[mime::TEXT_HTML]).is_empty());
        assert_eq!(negotiator.preferred_encodings(&["gzip", "identity"]), vec!["identity"]);
        assert!(negotiator.preferred_charsets(&["utf-8"]).is_empty());
        assert!(negotiator.preferred_languages(&["en"]).is_empty());
    }

    #[test]
    fn all_rejected() {
        let negotiator = negotiator(&[
            ("accept", "*/*;q=0"),
            ("accept-encoding", "*;q=0"),
            ("accept-charset", "utf-8;q=0, *;q=0"),
            ("accept-language", "en;q=0"),
        ]);

        assert!(negotiator.media_types().is_empty());
        assert!(negotiator.preferred_media_types(&[mime::TEXT_HTML]).is_empty());
        assert!(negotiator.preferred_encodings(&["gzip", "identity"]).is_empty());
        assert!(negotiator.preferred_charsets(&["utf-8", "latin1"]).is_empty());
        assert!(negotiator.preferred_languages(&["en"]).is_empty());
    }

    #[test]
    fn listings() {
        let negotiator = negotiator(&[
            ("Accept", "text/html;level=1;q=0.5, application/json"),
            ("Accept-Encoding", "gzip, deflate"),
            ("Accept-Charset", "utf-8, iso-8859-1;q=0.2, utf-7;q=0.5"),
            ("Accept-Language", "en;q=0.8, es, pt"),
        ]);

        assert_eq!(negotiator.media_types(), vec!["application/json", "text/html"]);
        assert_eq!(negotiator.encodings(), vec!["gzip", "deflate"]);
        assert_eq!(negotiator.charsets(), vec!["utf-8", "utf-7", "iso-8859-1"]);
        assert_eq!(negotiator.languages(), vec!["es", "pt", "en"]);
    }

    #[test]
    fn multiple_header_lines() {
        let mut headers = HeaderMap::new();
        headers.append(header::ACCEPT_LANGUAGE, HeaderValue::from_static("en;q=0.5"));
        headers.append(header::ACCEPT_LANGUAGE, HeaderValue::from_static("de"));

        let negotiator = Negotiator::new(&headers);
        assert_eq!(negotiator.languages(), vec!["de", "en"]);
        assert_eq!(negotiator.preferred_languages(&["en-GB", "de-AT"]), vec!["de-AT", "en-GB"]);
        assert_eq!(negotiator.accept_language().map(|h| h.len()), Some(2));
        assert!(negotiator.accept().is_none());
    }

    #[test]
    fn preferred_only_contains_candidates() {
        let negotiator = negotiator(&[("accept-charset", "utf-8;q=0.1, *")]);
        let offered = ["utf-8", "ascii", "UTF-16"];

        let preferred = negotiator.preferred_charsets(&offered);
        assert_eq!(preferred, vec!["ascii", "UTF-16", "utf-8"]);
        assert!(preferred.iter().all(|charset| offered.contains(charset)));

        // pure; repeated calls agree
        assert_eq!(negotiator.preferred_charsets(&offered), preferred);
    }
}
