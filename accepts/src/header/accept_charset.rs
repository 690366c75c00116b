use super::{common_header, Preference, Token, ACCEPT_CHARSET};
use crate::negotiate::{negotiate, no_implicit};

common_header! {
    /// `Accept-Charset` header, defined in [RFC 7231 §5.3.3].
    ///
    /// The `Accept-Charset` header field can be sent by a user agent to
    /// indicate what charsets are acceptable in textual response content.
    /// This field allows user agents capable of understanding more
    /// comprehensive or special-purpose charsets to signal that capability
    /// to an origin server that is capable of representing information in
    /// those charsets.
    ///
    /// Charset names compare case-insensitively.
    ///
    /// # ABNF
    /// ```plain
    /// Accept-Charset = 1#( ( charset / "*" ) [ weight ] )
    /// ```
    ///
    /// # Example Values
    /// * `iso-8859-5, unicode-1-1;q=0.8`
    ///
    /// # Examples
    /// ```
    /// use accepts::header::AcceptCharset;
    ///
    /// let accept: AcceptCharset = "utf-8, iso-8859-1;q=0.2, utf-7;q=0.5".parse().unwrap();
    /// assert_eq!(accept.ranked_tokens(), vec!["utf-8", "utf-7", "iso-8859-1"]);
    /// assert_eq!(accept.negotiate(&["ISO-8859-1", "UTF-8"]), vec![1, 0]);
    /// ```
    ///
    /// [RFC 7231 §5.3.3]: https://datatracker.ietf.org/doc/html/rfc7231#section-5.3.3
    (AcceptCharset, ACCEPT_CHARSET) => (Preference<Token>)*

    test_parse_and_format {
        fn charset(s: &str) -> Preference<Token> {
            s.parse().unwrap()
        }

        // Test case from RFC
        common_header_test!(test1, ["Shift_JIS, utf-8"]);

        common_header_test!(
            test2,
            ["iso-8859-5, unicode-1-1;q=0.8"],
            Some(AcceptCharset(vec![
                QualityItem::max(charset("iso-8859-5")),
                QualityItem::new(charset("unicode-1-1"), q(0.8)),
            ]))
        );

        common_header_test!(
            wildcard,
            ["utf-8, *;q=0.1"],
            Some(AcceptCharset(vec![
                QualityItem::max(charset("utf-8")),
                QualityItem::new(Preference::Any, q(0.1)),
            ]))
        );

        #[test]
        fn invalid_tokens_dropped() {
            let header: AcceptCharset = "utf 8, \"latin1\", utf-8".parse().unwrap();
            assert_eq!(header.0, vec![QualityItem::max(charset("utf-8"))]);
        }
    }
}

impl AcceptCharset {
    /// Ranks the offered charsets, returning their positions from most to least preferred.
    ///
    /// Charsets that no item covers, or whose matching item has `q=0`, are left out. Equal
    /// qualities keep the order of `candidates`.
    pub fn negotiate<S: AsRef<str>>(&self, candidates: &[S]) -> Vec<usize> {
        negotiate(
            Some(self.0.as_slice()),
            candidates.iter().map(|c| c.as_ref()),
            no_implicit,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranking_precedence() {
        let test = AcceptCharset(vec![]);
        assert!(test.ranked().is_empty());

        let test: AcceptCharset = "iso-8859-5;q=0.3, *;q=0.3, unicode-1-1;q=0.8".parse().unwrap();
        assert_eq!(test.ranked_tokens(), vec!["unicode-1-1", "iso-8859-5", "*"]);
    }

    #[test]
    fn negotiation() {
        let test: AcceptCharset = "utf-8".parse().unwrap();
        assert_eq!(test.negotiate(&["UTF-8"]), vec![0]);
        assert!(test.negotiate(&["iso-8859-1"]).is_empty());

        let test: AcceptCharset = "*, utf-7;q=0".parse().unwrap();
        assert_eq!(test.negotiate(&["utf-7", "utf-8", "iso-8859-1"]), vec![1, 2]);

        let test: AcceptCharset = "".parse().unwrap();
        assert!(test.negotiate(&["utf-8"]).is_empty());
    }
}
