//! HTTP content negotiation.
//!
//! Given the `Accept`, `Accept-Encoding`, `Accept-Charset` and `Accept-Language` headers of a
//! request, works out which of the representations a server can produce the client prefers, or
//! that none of them is acceptable.
//!
//! # Examples
//! ```
//! use accepts::Accepts;
//! use http::{header, HeaderMap, HeaderValue};
//!
//! let mut headers = HeaderMap::new();
//! headers.insert(header::ACCEPT, HeaderValue::from_static("text/*;q=0.5, application/json"));
//! headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static("en;q=0.8, es, pt"));
//!
//! let accepts = Accepts::new(&headers);
//!
//! // extensions and media types can be mixed
//! assert_eq!(accepts.types(&["html", "application/json"]), vec!["application/json"]);
//! assert!(accepts.types(&["image/png"]).is_empty());
//!
//! // without candidates, list the client's preferences
//! assert_eq!(accepts.languages(&[]), vec!["es", "pt", "en"]);
//! ```
//!
//! # Components
//! - [`Accepts`]: picks one representation per dimension for a request.
//! - [`Negotiator`]: full preference-ordered candidate lists for each dimension.
//! - [`header`]: typed headers ([`Accept`](header::Accept),
//!   [`AcceptEncoding`](header::AcceptEncoding), ...) and their items.
//! - [`negotiate`]: the ranking algorithm, usable with custom header item types.
//!
//! # Crate Features
//! - `mime-guess` (default): resolve file extension candidates with the `mime_guess` table
//!   ([`GuessLookup`]). Without it, [`Accepts::new`] only resolves full media types; use
//!   [`Accepts::with_lookup`] to supply a table.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use mime;

mod accepts;
mod candidate;
pub mod error;
pub mod header;
mod lookup;
pub mod negotiate;
mod negotiator;

#[cfg(feature = "mime-guess")]
pub use self::lookup::GuessLookup;
pub use self::{
    accepts::Accepts,
    candidate::Candidate,
    lookup::{DefaultLookup, MimeLookup, NoLookup},
    negotiator::Negotiator,
};
