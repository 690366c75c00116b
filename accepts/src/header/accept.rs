use mime::Mime;

use super::{common_header, MediaRange, ACCEPT};
use crate::negotiate::{negotiate, no_implicit};

common_header! {
    /// `Accept` header, defined in [RFC 7231 §5.3.2].
    ///
    /// The `Accept` header field can be used by user agents to specify
    /// response media types that are acceptable. Accept header fields can
    /// be used to indicate that the request is specifically limited to a
    /// small set of desired types, as in the case of a request for an
    /// in-line image
    ///
    /// # ABNF
    /// ```plain
    /// Accept = #( media-range [ accept-params ] )
    ///
    /// media-range    = ( "*/*"
    ///                  / ( type "/" "*" )
    ///                  / ( type "/" subtype )
    ///                  ) *( OWS ";" OWS parameter )
    /// accept-params  = weight *( accept-ext )
    /// accept-ext = OWS ";" OWS token [ "=" ( token / quoted-string ) ]
    /// ```
    ///
    /// # Example Values
    /// * `audio/*; q=0.2, audio/basic`
    /// * `text/plain; q=0.5, text/html, text/x-dvi; q=0.8, text/x-c`
    ///
    /// # Examples
    /// ```
    /// use accepts::header::Accept;
    ///
    /// let accept: Accept = "text/*;q=.5, application/json".parse().unwrap();
    /// assert_eq!(accept.ranked_tokens(), vec!["application/json", "text/*"]);
    ///
    /// let offered = [mime::TEXT_HTML, mime::APPLICATION_JSON, mime::IMAGE_PNG];
    /// assert_eq!(accept.negotiate(&offered), vec![1, 0]);
    /// ```
    ///
    /// [RFC 7231 §5.3.2]: https://datatracker.ietf.org/doc/html/rfc7231#section-5.3.2
    (Accept, ACCEPT) => (MediaRange)*

    test_parse_and_format {
        fn range(s: &str) -> MediaRange {
            s.parse().unwrap()
        }

        // Tests from the RFC
        common_header_test!(test1, ["audio/*; q=0.2, audio/basic"]);

        common_header_test!(
            test2,
            ["text/plain; q=0.5, text/html, text/x-dvi; q=0.8, text/x-c"],
            Some(Accept(vec![
                QualityItem::new(range("text/plain"), q(0.5)),
                QualityItem::max(range("text/html")),
                QualityItem::new(range("text/x-dvi"), q(0.8)),
                QualityItem::max(range("text/x-c")),
            ]))
        );

        // Custom tests
        common_header_test!(
            test3,
            ["text/plain; charset=utf-8"],
            Some(Accept(vec![
                QualityItem::max(range("text/plain")).with_param("charset", "utf-8"),
            ]))
        );

        common_header_test!(
            test4,
            ["text/plain; charset=utf-8; q=0.5"],
            Some(Accept(vec![
                QualityItem::new(range("text/plain"), q(0.5)).with_param("charset", "utf-8"),
            ]))
        );

        common_header_test!(empty_header, [""], Some(Accept(vec![])));

        #[test]
        fn absent_header() {
            let headers: [(&str, &str); 0] = [];
            assert_eq!(Accept::parse(&headers), None);
        }

        #[test]
        fn test_fuzzing1() {
            let header = Accept::parse(&[("accept", "chunk#;e")]);
            assert_eq!(header, Some(Accept(vec![])));
        }

        #[test]
        fn malformed_items_dropped() {
            let header: Accept = "text/html;q=abc, , application/json, text".parse().unwrap();
            assert_eq!(header.0, vec![QualityItem::max(range("application/json"))]);
        }
    }
}

impl Accept {
    /// Ranks the offered media types, returning their positions from most to least preferred.
    ///
    /// Each candidate takes the quality of the most specific media range covering it. Candidates
    /// that no range covers, or whose range has `q=0`, are left out. Ties are broken by the
    /// specificity of the matching range, then by the order of `candidates`.
    pub fn negotiate(&self, candidates: &[Mime]) -> Vec<usize> {
        negotiate(Some(self.0.as_slice()), candidates, no_implicit)
    }
}
