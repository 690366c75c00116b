use mime::Mime;

use crate::{
    candidate::Candidate,
    header::HeaderSource,
    lookup::{DefaultLookup, MimeLookup},
    negotiator::Negotiator,
};

/// Content negotiation for one request.
///
/// Built from the request headers, `Accepts` answers which of the representations a handler
/// can produce the client wants. Each method takes the offered candidates and returns the one
/// the client prefers, exactly as it was passed in, or an empty list if none is acceptable (the
/// caller should then respond with 406 Not Acceptable). Called with no candidates, a method lists
/// what the client accepts instead, most preferred first.
///
/// Media type candidates may be file extensions (`"json"`) or media types
/// (`"application/json"`); extensions are resolved through a [`MimeLookup`].
///
/// # Examples
/// ```
/// use accepts::Accepts;
///
/// let headers = [("Accept", "text/*;q=0.5, application/json")];
/// let accepts = Accepts::new(&headers);
///
/// assert_eq!(accepts.types(&["html", "json"]), vec!["json"]);
/// assert_eq!(accepts.types(&["text/html"]), vec!["text/html"]);
/// assert!(accepts.types(&["png"]).is_empty());
/// assert_eq!(accepts.types(&[]), vec!["application/json", "text/*"]);
///
/// // no Accept-Encoding header
/// assert_eq!(accepts.encodings(&["gzip", "identity"]), vec!["gzip"]);
/// assert_eq!(accepts.encodings(&[]), vec!["*"]);
/// ```
#[derive(Debug, Clone)]
pub struct Accepts<L = DefaultLookup> {
    negotiator: Negotiator,
    lookup: L,
}

impl Accepts {
    /// Reads the negotiation headers from `headers`, resolving extensions with the
    /// [`DefaultLookup`].
    pub fn new<H: HeaderSource + ?Sized>(headers: &H) -> Self {
        Accepts::with_lookup(headers, DefaultLookup::default())
    }
}

impl<L: MimeLookup> Accepts<L> {
    /// Reads the negotiation headers from `headers`, resolving extensions with `lookup`.
    ///
    /// # Examples
    /// ```
    /// use accepts::Accepts;
    ///
    /// let lookup = |ext: &str| match ext {
    ///     "md" => "text/markdown".parse::<mime::Mime>().ok(),
    ///     _ => None,
    /// };
    ///
    /// let accepts = Accepts::with_lookup(&[("accept", "text/*")], lookup);
    /// assert_eq!(accepts.types(&["json", "md"]), vec!["md"]);
    /// ```
    pub fn with_lookup<H: HeaderSource + ?Sized>(headers: &H, lookup: L) -> Self {
        Accepts {
            negotiator: Negotiator::new(headers),
            lookup,
        }
    }

    /// Returns the parsed headers.
    pub fn negotiator(&self) -> &Negotiator {
        &self.negotiator
    }

    /// Returns the extension lookup.
    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Picks the preferred media type from `candidates`.
    ///
    /// Without an `Accept` header the first candidate is returned. Candidates whose extension
    /// is unknown or whose media type is malformed are never picked.
    ///
    /// With no candidates, lists the accepted media ranges as `type/subtype`.
    pub fn types(&self, candidates: &[&str]) -> Vec<String> {
        if candidates.is_empty() {
            return self.negotiator.media_types();
        }

        let Some(accept) = self.negotiator.accept() else {
            return vec![candidates[0].to_owned()];
        };

        let (positions, resolved): (Vec<usize>, Vec<Mime>) = candidates
            .iter()
            .enumerate()
            .filter_map(|(idx, &candidate)| {
                let resolved = Candidate::from(candidate).resolve(&self.lookup);

                if resolved.is_none() {
                    log::debug!("cannot resolve media type candidate {:?}", candidate);
                }

                Some((idx, resolved?))
            })
            .unzip();

        accept
            .negotiate(&resolved)
            .first()
            .map(|&idx| candidates[positions[idx]].to_owned())
            .into_iter()
            .collect()
    }

    /// Picks the preferred content-coding from `candidates`.
    ///
    /// `identity` is acceptable unless the `Accept-Encoding` header excludes it. With no
    /// candidates, lists the accepted codings.
    pub fn encodings(&self, candidates: &[&str]) -> Vec<String> {
        if candidates.is_empty() {
            return self.negotiator.encodings();
        }

        best(self.negotiator.preferred_encodings(candidates))
    }

    /// Picks the preferred charset from `candidates`. With no candidates, lists the accepted
    /// charsets.
    pub fn charsets(&self, candidates: &[&str]) -> Vec<String> {
        if candidates.is_empty() {
            return self.negotiator.charsets();
        }

        best(self.negotiator.preferred_charsets(candidates))
    }

    /// Picks the preferred language from `candidates`. With no candidates, lists the accepted
    /// language ranges.
    pub fn languages(&self, candidates: &[&str]) -> Vec<String> {
        if candidates.is_empty() {
            return self.negotiator.languages();
        }

        best(self.negotiator.preferred_languages(candidates))
    }
}

fn best(preferred: Vec<&str>) -> Vec<String> {
    preferred.into_iter().take(1).map(str::to_owned).collect()
}
