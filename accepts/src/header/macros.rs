macro_rules! common_header_test_module {
    ($id:ident, $tm:ident{$($tf:item)*}) => {
        #[cfg(test)]
        mod $tm {
            #![allow(unused_imports)]

            use $crate::header::{self, *};
            use super::{$id as HeaderField, *};

            $($tf)*
        }
    }
}

#[cfg(test)]
macro_rules! common_header_test {
    // parse raw header lines, check that formatting reproduces the first line (ignoring case
    // and whitespace)
    ($id:ident, $raw:expr) => {
        #[test]
        fn $id() {
            let raw: &[&str] = &$raw;
            let name = HeaderField::name();
            let headers = raw
                .iter()
                .map(|line| (name.as_str(), *line))
                .collect::<Vec<_>>();

            let value = HeaderField::parse(&headers[..]);

            let result = format!("{}", value.unwrap());
            let expected = raw[0].to_owned();

            let result_cmp: Vec<String> = result
                .to_ascii_lowercase()
                .split(' ')
                .map(|x| x.to_owned())
                .collect();
            let expected_cmp: Vec<String> = expected
                .to_ascii_lowercase()
                .split(' ')
                .map(|x| x.to_owned())
                .collect();

            assert_eq!(result_cmp.concat(), expected_cmp.concat());
        }
    };

    // parse raw header lines, compare with expected value, then check formatting of the
    // expected value against the joined lines
    ($id:ident, $raw:expr, $exp:expr) => {
        #[test]
        fn $id() {
            let raw: &[&str] = &$raw;
            let name = HeaderField::name();
            let headers = raw
                .iter()
                .map(|line| (name.as_str(), *line))
                .collect::<Vec<_>>();

            let val = HeaderField::parse(&headers[..]);

            let exp: ::core::option::Option<HeaderField> = $exp;

            // test parsing
            assert_eq!(val, exp);

            // test formatting
            if let Some(exp) = exp {
                assert_eq!(format!("{}", exp), raw.join(", "));
            }
        }
    };
}

macro_rules! common_header {
    // $attrs:meta: Attributes associated with the header item (usually docs)
    // $id:ident: Identifier of the header
    // $name:expr: Header name constant
    // $item:ty: Type of each comma separated item, wrapped in a `QualityItem`

    // List header, zero or more items
    ($(#[$attrs:meta])*($id:ident, $name:expr) => ($item:ty)*) => {
        $(#[$attrs])*
        #[derive(Debug, Clone, PartialEq, Eq, ::derive_more::Deref, ::derive_more::DerefMut)]
        pub struct $id(pub Vec<$crate::header::QualityItem<$item>>);

        impl $id {
            /// Returns the name of the header.
            #[inline]
            pub fn name() -> ::http::header::HeaderName {
                $name
            }

            /// Parses the header from `headers`.
            ///
            /// Returns `None` when the request does not carry the header. A header that is
            /// present but holds no valid items parses to an empty list.
            #[inline]
            pub fn parse<H>(headers: &H) -> Option<Self>
            where
                H: $crate::header::HeaderSource + ?Sized,
            {
                let values = headers.header_values(&Self::name())?;
                Some($id($crate::header::from_comma_delimited(values)))
            }

            /// Returns the items with a non-zero quality, most preferred first.
            pub fn ranked(&self) -> Vec<&$crate::header::QualityItem<$item>> {
                $crate::negotiate::ranked(&self.0)
            }

            /// Returns the tokens of [`ranked`](Self::ranked) items, without q-factors or
            /// parameters.
            pub fn ranked_tokens(&self) -> Vec<String> {
                self.ranked()
                    .into_iter()
                    .map(|qitem| qitem.item.to_string())
                    .collect()
            }
        }

        impl ::core::str::FromStr for $id {
            type Err = ::core::convert::Infallible;

            /// Parses a single raw header value. Malformed items are dropped.
            #[inline]
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok($id($crate::header::from_comma_delimited([s])))
            }
        }

        impl ::core::fmt::Display for $id {
            #[inline]
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                $crate::header::fmt_comma_delimited(f, &self.0[..])
            }
        }
    };

    // List header, zero or more items (with test module)
    ($(#[$attrs:meta])*($id:ident, $name:expr) => ($item:ty)* $tm:ident{$($tf:item)*}) => {
        crate::header::common_header! {
            $(#[$attrs])*
            ($id, $name) => ($item)*
        }

        crate::header::common_header_test_module! { $id, $tm { $($tf)* }}
    };
}

#[cfg(test)]
pub(crate) use common_header_test;
pub(crate) use {common_header, common_header_test_module};
