//! Error types.

use derive_more::{Display, Error};

/// A set of errors that can occur while parsing a single header item.
///
/// Negotiation itself never fails; items that produce one of these errors are dropped from
/// the parsed header and the remaining items are still honored.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// A malformed item, such as an empty token or a parameter with no value.
    #[display("invalid header item")]
    Header,

    /// A `q` parameter that is not a number.
    #[display("invalid quality value")]
    Quality,
}
