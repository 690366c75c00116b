use std::{cmp, fmt, str};

use smallvec::SmallVec;

use super::{
    utils::{split_quoted, unquote},
    Quality,
};
use crate::error::ParseError;

/// Non-`q` parameters attached to a header item, in listed order.
///
/// Keys are lowercased; values are unquoted but otherwise verbatim.
pub type Params = SmallVec<[(String, String); 2]>;

/// Represents an item with a quality value as defined
/// in [RFC 7231 §5.3.1](https://datatracker.ietf.org/doc/html/rfc7231#section-5.3.1).
///
/// # Parsing and Formatting
/// This wrapper be used to parse header value items that have a q-factor annotation as well as
/// serialize items with a their q-factor. Parameters other than `q` are kept in [`params`] so
/// that media ranges like `text/plain; charset=utf-8` can be matched on them.
///
/// Parsing is lenient in the same way as [`Quality`]: an out-of-range q-factor is clamped. A
/// missing q-factor means [`Quality::MAX`].
///
/// # Ordering
/// Since this context of use for this type is header value items, ordering is defined for
/// `QualityItem`s but _only_ considers the item's quality. Order of appearance should be used as
/// the secondary sorting parameter; i.e., a stable sort over the quality values will produce a
/// correctly sorted sequence.
///
/// # Examples
/// ```
/// # use accepts::header::{QualityItem, q};
/// let q_item: QualityItem<String> = "hello;q=0.3".parse().unwrap();
/// assert_eq!(&q_item.item, "hello");
/// assert_eq!(q_item.quality, q(0.3));
///
/// // note that format is normalized compared to parsed item
/// assert_eq!(q_item.to_string(), "hello; q=0.3");
///
/// // item with q=0.3 is greater than item with q=0.1
/// let q_item_fallback: QualityItem<String> = "abc;q=0.1".parse().unwrap();
/// assert!(q_item > q_item_fallback);
/// ```
///
/// [`params`]: Self::params
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityItem<T> {
    /// The wrapped contents of the field.
    pub item: T,

    /// The quality (client or server preference) for the value.
    pub quality: Quality,

    /// Parameters other than `q`.
    pub params: Params,
}

impl<T> QualityItem<T> {
    /// Constructs a new `QualityItem` from an item and a quality value.
    ///
    /// The item can be of any type. The quality should be a value in the range [0, 1].
    pub fn new(item: T, quality: Quality) -> Self {
        QualityItem {
            item,
            quality,
            params: Params::new(),
        }
    }

    /// Constructs a new `QualityItem` from an item, using the maximum q-value.
    pub fn max(item: T) -> Self {
        Self::new(item, Quality::MAX)
    }

    /// Constructs a new `QualityItem` from an item, using zero q-value of zero.
    pub fn zero(item: T) -> Self {
        Self::new(item, Quality::ZERO)
    }

    /// Adds a parameter, builder style.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut key = key.into();
        key.make_ascii_lowercase();
        self.params.push((key, value.into()));
        self
    }

    /// Returns the value of parameter `key`, compared case-insensitively.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if this item rejects whatever it matches (`q=0`).
    pub fn is_rejection(&self) -> bool {
        self.quality.is_zero()
    }
}

impl<T: PartialEq> PartialOrd for QualityItem<T> {
    fn partial_cmp(&self, other: &QualityItem<T>) -> Option<cmp::Ordering> {
        self.quality.partial_cmp(&other.quality)
    }
}

impl<T: fmt::Display> fmt::Display for QualityItem<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.item, f)?;

        for (key, val) in &self.params {
            write!(f, "; {}={}", key, val)?;
        }

        match self.quality {
            // q-factor value is implied for max value
            Quality::MAX => Ok(()),

            // fast path for zero
            Quality::ZERO => f.write_str("; q=0"),

            // quality formatting is already using itoa
            q => write!(f, "; q={}", q),
        }
    }
}

impl<T: str::FromStr> str::FromStr for QualityItem<T> {
    type Err = ParseError;

    fn from_str(q_item_str: &str) -> Result<Self, Self::Err> {
        if !q_item_str.is_ascii() {
            return Err(ParseError::Header);
        }

        // example for item with parameters and q-factor:
        //
        // text/plain; charset=utf-8; q=0.65
        // ^^^^^^^^^^                          raw_item
        //             ^^^^^^^^^^^^^           param
        //                            ^^^^^^   q attribute

        let mut parts = split_quoted(q_item_str, b';');

        let raw_item = parts.next().unwrap_or_default().trim();
        if raw_item.is_empty() {
            return Err(ParseError::Header);
        }

        // set defaults used if item has no q attribute
        let mut quality = Quality::MAX;
        let mut params = Params::new();
        let mut seen_q = false;

        for attr in parts.map(str::trim) {
            // tolerate a trailing or doubled semicolon; anything after q is an accept-ext
            if attr.is_empty() || seen_q {
                continue;
            }

            // bare identifiers are forbidden; an attribute needs a name followed by an equals sign
            let (key, val) = attr.split_once('=').ok_or(ParseError::Header)?;
            let key = key.trim();

            if key.is_empty() {
                return Err(ParseError::Header);
            }

            if key.eq_ignore_ascii_case("q") {
                quality = val.parse()?;
                seen_q = true;
            } else {
                params.push((key.to_ascii_lowercase(), unquote(val.trim())));
            }
        }

        let item = raw_item.parse::<T>().map_err(|_| ParseError::Header)?;

        Ok(QualityItem {
            item,
            quality,
            params,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::q;

    #[test]
    fn fmt_q_1() {
        let x = QualityItem::max("chunked".to_owned());
        assert_eq!(format!("{}", x), "chunked");
    }

    #[test]
    fn fmt_q_0001() {
        let x = QualityItem::new("chunked".to_owned(), Quality(1));
        assert_eq!(format!("{}", x), "chunked; q=0.001");
    }

    #[test]
    fn fmt_q_05() {
        let x = QualityItem::new("identity".to_owned(), Quality(500));
        assert_eq!(format!("{}", x), "identity; q=0.5");
    }

    #[test]
    fn fmt_q_0() {
        let x = QualityItem::zero("identity".to_owned());
        assert_eq!(x.to_string(), "identity; q=0");
    }

    #[test]
    fn fmt_params() {
        let x = QualityItem::new("text/plain".to_owned(), q(0.5)).with_param("Charset", "utf-8");
        assert_eq!(x.to_string(), "text/plain; charset=utf-8; q=0.5");
    }

    #[test]
    fn from_str_defaults() {
        let x: QualityItem<String> = "chunked".parse().unwrap();
        assert_eq!(x, QualityItem::max("chunked".to_owned()));

        let x: QualityItem<String> = "chunked; q=1".parse().unwrap();
        assert_eq!(x, QualityItem::max("chunked".to_owned()));

        let x: QualityItem<String> = "gzip; Q=0.5".parse().unwrap();
        assert_eq!(x, QualityItem::new("gzip".to_owned(), Quality(500)));

        let x: QualityItem<String> = "gzip;q=0.273".parse().unwrap();
        assert_eq!(x, QualityItem::new("gzip".to_owned(), Quality(273)));

        let x: QualityItem<String> = "gzip;".parse().unwrap();
        assert_eq!(x, QualityItem::max("gzip".to_owned()));
    }

    #[test]
    fn from_str_clamps_quality() {
        let x: QualityItem<String> = "gzip; q=2".parse().unwrap();
        assert_eq!(x.quality, Quality::MAX);

        let x: QualityItem<String> = "gzip; q=-1".parse().unwrap();
        assert!(x.is_rejection());
    }

    #[test]
    fn from_str_params() {
        let x: QualityItem<String> = r#"text/html; Level=1; charset="UTF-8"; q=0.4"#
            .parse()
            .unwrap();
        assert_eq!(x.item, "text/html");
        assert_eq!(x.quality, q(0.4));
        assert_eq!(x.param("level"), Some("1"));
        assert_eq!(x.param("CHARSET"), Some("UTF-8"));
        assert_eq!(x.params.len(), 2);
    }

    #[test]
    fn from_str_extensions_after_q() {
        let x: QualityItem<String> = "text/html; level=1; q=0.9; foo=bar; flag".parse().unwrap();
        assert_eq!(x.quality, q(0.9));
        assert_eq!(x.param("level"), Some("1"));
        assert_eq!(x.param("foo"), None);
        assert_eq!(x.params.len(), 1);
    }

    #[test]
    fn from_str_errors() {
        assert_eq!(
            "gzip; q=abc".parse::<QualityItem<String>>(),
            Err(ParseError::Quality)
        );
        assert_eq!(
            "gzip; level".parse::<QualityItem<String>>(),
            Err(ParseError::Header)
        );
        assert_eq!(
            "gzip; =1".parse::<QualityItem<String>>(),
            Err(ParseError::Header)
        );
        assert_eq!(" ; q=1".parse::<QualityItem<String>>(), Err(ParseError::Header));
        assert_eq!("gzïp".parse::<QualityItem<String>>(), Err(ParseError::Header));
    }

    #[test]
    fn ordering() {
        let x: QualityItem<String> = "gzip; q=0.5".parse().unwrap();
        let y: QualityItem<String> = "gzip; q=0.273".parse().unwrap();
        assert!(x > y);
    }

    #[test]
    fn fuzzing_bugs() {
        assert!("99999;".parse::<QualityItem<String>>().is_ok());
        assert!("\x0d;;;=\u{d6aa}==".parse::<QualityItem<String>>().is_err());
        assert!(";;;".parse::<QualityItem<String>>().is_err());
    }
}
