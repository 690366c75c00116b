use super::{common_header, Preference, Quality, Token, ACCEPT_ENCODING};
use crate::negotiate::negotiate;

common_header! {
    /// `Accept-Encoding` header, defined
    /// in [RFC 7231](https://datatracker.ietf.org/doc/html/rfc7231#section-5.3.4)
    ///
    /// The `Accept-Encoding` header field can be used by user agents to indicate what response
    /// content-codings are acceptable in the response. An `identity` token is used as a synonym
    /// for "no encoding" in order to communicate when no encoding is preferred.
    ///
    /// # ABNF
    /// ```plain
    /// Accept-Encoding  = #( codings [ weight ] )
    /// codings          = content-coding / "identity" / "*"
    /// ```
    ///
    /// # Example Values
    /// * `compress, gzip`
    /// * ``
    /// * `*`
    /// * `compress;q=0.5, gzip;q=1`
    /// * `gzip;q=1.0, identity; q=0.5, *;q=0`
    ///
    /// # Examples
    /// ```
    /// use accepts::header::AcceptEncoding;
    ///
    /// let accept: AcceptEncoding = "gzip;q=0.5, br".parse().unwrap();
    /// assert_eq!(accept.ranked_tokens(), vec!["br", "gzip"]);
    ///
    /// // identity is acceptable unless excluded
    /// assert_eq!(accept.negotiate(&["deflate", "identity", "gzip"]), vec![1, 2]);
    /// ```
    (AcceptEncoding, ACCEPT_ENCODING) => (Preference<Token>)*

    test_parse_and_format {
        fn enc(s: &str) -> Preference<Token> {
            s.parse().unwrap()
        }

        common_header_test!(no_headers, [], None);
        common_header_test!(empty_header, [""], Some(AcceptEncoding(vec![])));

        common_header_test!(
            order_of_appearance,
            ["br, gzip"],
            Some(AcceptEncoding(vec![
                QualityItem::max(enc("br")),
                QualityItem::max(enc("gzip")),
            ]))
        );

        common_header_test!(any, ["*"], Some(AcceptEncoding(vec![
            QualityItem::max(Preference::Any),
        ])));

        common_header_test!(implicit_quality, ["gzip, identity; q=0.5, *;q=0"]);

        common_header_test!(implicit_quality_out_of_order, ["compress;q=0.5, gzip"]);

        common_header_test!(
            only_gzip_no_identity,
            ["gzip, *; q=0"],
            Some(AcceptEncoding(vec![
                QualityItem::max(enc("gzip")),
                QualityItem::zero(Preference::Any),
            ]))
        );

        common_header_test!(
            multiple_lines,
            ["gzip", "br;q=0.5"],
            Some(AcceptEncoding(vec![
                QualityItem::max(enc("gzip")),
                QualityItem::new(enc("br"), q(0.5)),
            ]))
        );
    }
}

impl AcceptEncoding {
    /// Ranks the offered content-codings, returning their positions from most to least
    /// preferred.
    ///
    /// Codings listed in the header take their listed quality; `*` covers codings not listed.
    /// The `identity` coding is acceptable with `q=1` when nothing in the header matches it, so
    /// only `identity;q=0` (or `*;q=0` without an `identity` entry) excludes it. Equal qualities
    /// keep the order of `candidates`.
    ///
    /// An empty result indicates that none of the offered encodings are acceptable to the
    /// client. The caller should generate a 406 Not Acceptable response.
    pub fn negotiate<S: AsRef<str>>(&self, candidates: &[S]) -> Vec<usize> {
        negotiate(
            Some(self.0.as_slice()),
            candidates.iter().map(|c| c.as_ref()),
            implicit_identity,
        )
    }
}

/// Quality of a coding that no header item matched: only `identity` is implicitly acceptable.
pub(crate) fn implicit_identity(coding: &str) -> Option<Quality> {
    coding
        .parse::<Token>()
        .is_ok_and(|token| token.is_identity())
        .then_some(Quality::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! accept_encoding {
        () => { AcceptEncoding(vec![]) };
        ($($q:expr),+ $(,)?) => { AcceptEncoding(vec![$($q.parse().unwrap()),+]) };
    }

    #[test]
    fn identity_fallback() {
        let acceptable = |test: &AcceptEncoding| test.negotiate(&["identity"]) == vec![0];

        assert!(acceptable(&accept_encoding!()));
        assert!(acceptable(&accept_encoding!("gzip")));
        assert!(acceptable(&accept_encoding!("gzip", "br")));
        assert!(acceptable(&accept_encoding!("gzip", "*;q=0.1")));
        assert!(acceptable(&accept_encoding!("gzip", "identity;q=0.1")));
        assert!(acceptable(&accept_encoding!("gzip", "identity;q=0.1", "*;q=0")));
        assert!(acceptable(&accept_encoding!("gzip", "*;q=0", "identity;q=0.1")));

        assert!(!acceptable(&accept_encoding!("gzip", "*;q=0")));
        assert!(!acceptable(&accept_encoding!("gzip", "identity;q=0")));
        assert!(!acceptable(&accept_encoding!("gzip", "identity;q=0", "*;q=0")));
        assert!(!acceptable(&accept_encoding!("gzip", "*;q=0", "identity;q=0")));

        // candidates compare as tokens
        let test = accept_encoding!("gzip");
        assert_eq!(test.negotiate(&["br", "IDENTITY"]), vec![1]);
        assert_eq!(test.negotiate(&["br", " identity "]), vec![1]);
        assert!(test.negotiate(&["br", "identity;q=1"]).is_empty());
    }

    #[test]
    fn encoding_negotiation() {
        // present but empty header still allows identity
        let test = accept_encoding!();
        assert!(test.negotiate::<&str>(&[]).is_empty());
        assert_eq!(test.negotiate(&["identity"]), vec![0]);
        assert_eq!(test.negotiate(&["gzip", "identity"]), vec![1]);

        let test = accept_encoding!("identity;q=0");
        assert!(test.negotiate(&["identity"]).is_empty());

        let test = accept_encoding!("*;q=0");
        assert!(test.negotiate(&["identity"]).is_empty());

        let test = accept_encoding!("gzip");
        assert_eq!(test.negotiate(&["gzip", "identity"]), vec![0, 1]);
        assert_eq!(test.negotiate(&["br", "identity"]), vec![1]);
        assert_eq!(test.negotiate(&["br", "gzip", "identity"]), vec![1, 2]);

        let test = accept_encoding!("gzip", "identity;q=0");
        assert_eq!(test.negotiate(&["gzip", "identity"]), vec![0]);
        assert!(test.negotiate(&["br", "identity"]).is_empty());

        let test = accept_encoding!("gzip", "*;q=0");
        assert_eq!(test.negotiate(&["gzip", "identity"]), vec![0]);
        assert!(test.negotiate(&["br", "identity"]).is_empty());

        let test = accept_encoding!("gzip;q=0.8", "deflate", "br;q=0.9");
        assert_eq!(test.negotiate(&["gzip", "br", "deflate"]), vec![2, 1, 0]);

        let test = accept_encoding!("gzip", "deflate", "br");
        assert_eq!(test.negotiate(&["br", "gzip"]), vec![0, 1]);
        assert_eq!(test.negotiate(&["gzip", "br"]), vec![0, 1]);

        let test = accept_encoding!("GZIP");
        assert_eq!(test.negotiate(&[String::from("gzip")]), vec![0]);
    }

    #[test]
    fn wildcard_covers_unlisted() {
        let test = accept_encoding!("gzip;q=0.2", "*;q=0.5");
        assert_eq!(test.negotiate(&["gzip", "zstd"]), vec![1, 0]);

        let test = accept_encoding!("br;q=0", "*");
        assert_eq!(test.negotiate(&["br", "gzip"]), vec![1]);
    }

    #[test]
    fn ranking_precedence() {
        let test = accept_encoding!();
        assert!(test.ranked().is_empty());

        let test = accept_encoding!("gzip");
        assert_eq!(test.ranked_tokens(), vec!["gzip"]);

        let test = accept_encoding!("gzip;q=0.900", "*;q=0.700", "br;q=1.0");
        assert_eq!(test.ranked_tokens(), vec!["br", "gzip", "*"]);

        let test = accept_encoding!("gzip", "deflate");
        assert_eq!(test.ranked_tokens(), vec!["gzip", "deflate"]);

        let test = accept_encoding!("gzip", "*;q=0");
        assert_eq!(test.ranked_tokens(), vec!["gzip"]);
    }
}
