use std::fmt;

use mime::Mime;

use crate::lookup::MimeLookup;

/// A representation offered for media type negotiation.
///
/// Candidates containing a `/` are media types; anything else is a file extension that is
/// resolved through a [`MimeLookup`].
///
/// # Examples
/// ```
/// use accepts::{Candidate, NoLookup};
///
/// assert_eq!(Candidate::from("json"), Candidate::Extension("json"));
/// assert_eq!(Candidate::from("text/html"), Candidate::MediaType("text/html"));
///
/// let html = Candidate::from("text/html").resolve(&NoLookup).unwrap();
/// assert_eq!(html, mime::TEXT_HTML);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Candidate<'a> {
    /// A file extension such as `json` or `.html`.
    Extension(&'a str),

    /// A full media type such as `application/json`.
    MediaType(&'a str),
}

impl<'a> Candidate<'a> {
    /// Returns the candidate as supplied.
    pub fn as_str(&self) -> &'a str {
        match *self {
            Candidate::Extension(ext) => ext,
            Candidate::MediaType(ty) => ty,
        }
    }

    /// Resolves the candidate to a media type.
    ///
    /// Returns `None` for extensions the lookup does not know and for malformed media types.
    pub fn resolve<L: MimeLookup + ?Sized>(&self, lookup: &L) -> Option<Mime> {
        match *self {
            Candidate::Extension(ext) => {
                let ext = ext.trim();
                let ext = ext.strip_prefix('.').unwrap_or(ext);

                if ext.is_empty() {
                    return None;
                }

                lookup.lookup(ext)
            }

            Candidate::MediaType(ty) => ty.trim().parse().ok(),
        }
    }
}

impl<'a> From<&'a str> for Candidate<'a> {
    fn from(candidate: &'a str) -> Self {
        if candidate.contains('/') {
            Candidate::MediaType(candidate)
        } else {
            Candidate::Extension(candidate)
        }
    }
}

impl fmt::Display for Candidate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
