//! Extension to media type resolution.

use mime::Mime;

/// Resolves a file extension (without the leading dot) to a media type.
///
/// The table itself is supplied from outside; negotiation only reads it. Closures of the form
/// `Fn(&str) -> Option<Mime>` implement this trait.
///
/// # Examples
/// ```
/// use accepts::MimeLookup;
///
/// let lookup = |ext: &str| (ext == "md").then(|| "text/markdown".parse::<mime::Mime>().unwrap());
/// assert_eq!(lookup.lookup("md").unwrap().essence_str(), "text/markdown");
/// assert!(lookup.lookup("png").is_none());
/// ```
pub trait MimeLookup {
    /// Returns the media type registered for `ext`, or `None` if it is unknown.
    fn lookup(&self, ext: &str) -> Option<Mime>;
}

impl<F> MimeLookup for F
where
    F: Fn(&str) -> Option<Mime>,
{
    #[inline]
    fn lookup(&self, ext: &str) -> Option<Mime> {
        (self)(ext)
    }
}

/// Extension table from the `mime_guess` crate.
///
/// Extensions compare case-insensitively. When an extension maps to several media types the
/// first, most common one is used.
#[cfg(feature = "mime-guess")]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuessLookup;

#[cfg(feature = "mime-guess")]
impl MimeLookup for GuessLookup {
    #[inline]
    fn lookup(&self, ext: &str) -> Option<Mime> {
        mime_guess::from_ext(ext).first()
    }
}

/// A lookup that knows no extensions; only full media type candidates resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoLookup;

impl MimeLookup for NoLookup {
    #[inline]
    fn lookup(&self, _ext: &str) -> Option<Mime> {
        None
    }
}

/// Lookup used by [`Accepts::new`](crate::Accepts::new).
#[cfg(feature = "mime-guess")]
pub type DefaultLookup = GuessLookup;

/// Lookup used by [`Accepts::new`](crate::Accepts::new).
#[cfg(not(feature = "mime-guess"))]
pub type DefaultLookup = NoLookup;
