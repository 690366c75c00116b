use super::{common_header, LanguageRange, Preference, ACCEPT_LANGUAGE};
use crate::negotiate::{negotiate, no_implicit};

common_header! {
    /// The `Accept-Language` header field can be used by user agents to indicate the set of natural
    /// languages that are preferred in the response.
    ///
    /// The `Accept-Language` header is defined in
    /// [RFC 7231 §5.3.5](https://datatracker.ietf.org/doc/html/rfc7231#section-5.3.5) using language
    /// ranges defined in [RFC 4647 §2.1](https://datatracker.ietf.org/doc/html/rfc4647#section-2.1).
    ///
    /// # ABNF
    /// ```plain
    /// Accept-Language = 1#( language-range [ weight ] )
    /// language-range  = (1*8ALPHA *("-" 1*8alphanum)) / "*"
    /// alphanum        = ALPHA / DIGIT
    /// weight          = OWS ";" OWS "q=" qvalue
    /// qvalue          = ( "0" [ "." 0*3DIGIT ] )
    ///                 / ( "1" [ "." 0*3("0") ] )
    /// ```
    ///
    /// # Example Values
    /// - `da, en-gb;q=0.8, en;q=0.7`
    /// - `en-us;q=1.0, en;q=0.5, fr`
    /// - `fr-CH, fr;q=0.9, en;q=0.8, de;q=0.7, *;q=0.5`
    ///
    /// # Examples
    /// ```
    /// use accepts::header::AcceptLanguage;
    ///
    /// let accept: AcceptLanguage = "en;q=0.8, es, pt".parse().unwrap();
    /// assert_eq!(accept.ranked_tokens(), vec!["es", "pt", "en"]);
    ///
    /// // `en` covers regional variants
    /// assert_eq!(accept.negotiate(&["en-US", "fr", "pt-BR"]), vec![2, 0]);
    /// ```
    (AcceptLanguage, ACCEPT_LANGUAGE) => (Preference<LanguageRange>)*

    test_parse_and_format {
        fn lang(s: &str) -> Preference<LanguageRange> {
            s.parse().unwrap()
        }

        common_header_test!(example_from_rfc, ["da, en-gb;q=0.8, en;q=0.7"]);

        common_header_test!(
            not_ordered_by_weight,
            ["en-US, en; q=0.5, fr"],
            Some(AcceptLanguage(vec![
                QualityItem::max(lang("en-US")),
                QualityItem::new(lang("en"), q(0.5)),
                QualityItem::max(lang("fr")),
            ]))
        );

        common_header_test!(
            has_wildcard,
            ["fr-CH, fr; q=0.9, en; q=0.8, de; q=0.7, *; q=0.5"],
            Some(AcceptLanguage(vec![
                QualityItem::max(lang("fr-CH")),
                QualityItem::new(lang("fr"), q(0.9)),
                QualityItem::new(lang("en"), q(0.8)),
                QualityItem::new(lang("de"), q(0.7)),
                QualityItem::new(Preference::Any, q(0.5)),
            ]))
        );

        #[test]
        fn malformed_tags_dropped() {
            let header: AcceptLanguage = "en us, 12345678901, de".parse().unwrap();
            assert_eq!(header.0, vec![QualityItem::max(lang("de"))]);
        }
    }
}

impl AcceptLanguage {
    /// Ranks the offered languages, returning their positions from most to least preferred.
    ///
    /// A language takes the quality of the closest range covering it: an exact tag first, then
    /// a range naming the language's primary subtag, then the primary subtag of a regional range,
    /// then `*`. Equal qualities keep the order of `candidates`.
    pub fn negotiate<S: AsRef<str>>(&self, candidates: &[S]) -> Vec<usize> {
        negotiate(
            Some(self.0.as_slice()),
            candidates.iter().map(|c| c.as_ref()),
            no_implicit,
        )
    }
}
