//! Ranking of header items and server-offered candidates.
//!
//! This is the dimension-agnostic core shared by the typed headers in [`header`](crate::header).
//! Each header item type implements [`Negotiable`] to say how it matches a candidate; the
//! functions here turn those matches into an ordering.

use std::cmp::{Ordering, Reverse};

use mime::Mime;

use crate::header::{LanguageRange, MediaRange, Preference, Quality, QualityItem, Token};

/// How precisely a header item matched a candidate. Higher is more precise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Precision {
    /// Wildcard level of the match, e.g. 0 for `*/*` and 2 for `text/html`.
    pub specificity: u8,

    /// Number of media range parameters that had to match.
    pub parameters: u8,
}

impl Precision {
    /// Precision of a match that only specificity distinguishes.
    pub const fn new(specificity: u8) -> Self {
        Precision {
            specificity,
            parameters: 0,
        }
    }
}

/// A header item that can be matched against server-offered candidates.
pub trait Negotiable {
    /// The resolved form of a candidate this item is compared with.
    type Candidate: ?Sized;

    /// Whether match precision orders the results in addition to quality.
    ///
    /// Only media types do this. For the other dimensions precision just selects which header
    /// item applies to a candidate.
    const RANK_BY_PRECISION: bool = false;

    /// Precision of the item on its own, used to order items when listing a header.
    fn specificity(&self) -> u8 {
        0
    }

    /// Returns the match precision if this item, with its `params`, covers `candidate`.
    fn precision(&self, params: &[(String, String)], candidate: &Self::Candidate)
        -> Option<Precision>;
}

impl Negotiable for MediaRange {
    type Candidate = Mime;

    const RANK_BY_PRECISION: bool = true;

    fn specificity(&self) -> u8 {
        MediaRange::specificity(self)
    }

    fn precision(&self, params: &[(String, String)], candidate: &Mime) -> Option<Precision> {
        self.matches(params, candidate)
    }
}

impl Negotiable for Preference<Token> {
    type Candidate = str;

    fn precision(&self, _params: &[(String, String)], candidate: &str) -> Option<Precision> {
        match self {
            Preference::Any => Some(Precision::new(0)),
            Preference::Specific(token) if *token == *candidate.trim() => Some(Precision::new(1)),
            Preference::Specific(_) => None,
        }
    }
}

impl Negotiable for Preference<LanguageRange> {
    type Candidate = str;

    fn precision(&self, _params: &[(String, String)], candidate: &str) -> Option<Precision> {
        match self {
            Preference::Any => Some(Precision::new(0)),
            Preference::Specific(range) => range.precision(candidate).map(Precision::new),
        }
    }
}

/// The header item that applies to one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Matched {
    pub(crate) quality: Quality,
    pub(crate) precision: Precision,
}

/// Finds the most precise item covering `candidate`; on equal precision the higher quality
/// wins, then the earlier item.
///
/// Items with `q=0` take part, so a precise rejection shadows a broader acceptance.
pub(crate) fn best_match<T: Negotiable>(
    items: &[QualityItem<T>],
    candidate: &T::Candidate,
) -> Option<Matched> {
    let mut best: Option<Matched> = None;

    for item in items {
        let Some(precision) = item.item.precision(&item.params, candidate) else {
            continue;
        };

        // only replace on strictly better so the earliest of equal items wins
        let better = match best {
            None => true,
            Some(best) => (precision, item.quality) > (best.precision, best.quality),
        };

        if better {
            best = Some(Matched {
                quality: item.quality,
                precision,
            });
        }
    }

    best
}

/// Lists header items with a non-zero quality, most preferred first.
///
/// Items are ordered by quality, then (for media ranges) by specificity, then by position in
/// the header.
pub fn ranked<T: Negotiable>(items: &[QualityItem<T>]) -> Vec<&QualityItem<T>> {
    let mut ranked = items
        .iter()
        .filter(|item| !item.is_rejection())
        .collect::<Vec<_>>();

    // use stable sort so items with equal q-factor and specificity retain listed order
    ranked.sort_by(|a, b| {
        b.quality.cmp(&a.quality).then_with(|| {
            if T::RANK_BY_PRECISION {
                b.item.specificity().cmp(&a.item.specificity())
            } else {
                Ordering::Equal
            }
        })
    });

    ranked
}

/// Ranks `candidates` against a parsed header, returning candidate positions in order of
/// preference. Unacceptable candidates are left out.
///
/// `items` is `None` when the request did not carry the header at all; every candidate is
/// then acceptable and the original order is kept. `implicit` supplies a quality for
/// candidates that no item matches (used for the `identity` encoding); returning `None`
/// excludes them.
pub fn negotiate<'c, T, C, F>(
    items: Option<&[QualityItem<T>]>,
    candidates: C,
    implicit: F,
) -> Vec<usize>
where
    T: Negotiable,
    T::Candidate: 'c,
    C: IntoIterator<Item = &'c T::Candidate>,
    F: Fn(&T::Candidate) -> Option<Quality>,
{
    let Some(items) = items else {
        return candidates.into_iter().enumerate().map(|(idx, _)| idx).collect();
    };

    let mut accepted = candidates
        .into_iter()
        .enumerate()
        .filter_map(|(idx, candidate)| {
            let matched = best_match(items, candidate).or_else(|| {
                implicit(candidate).map(|quality| Matched {
                    quality,
                    precision: Precision::default(),
                })
            })?;

            (!matched.quality.is_zero()).then_some((idx, matched))
        })
        .collect::<Vec<_>>();

    // sort by quality descending, then precision descending where it ranks, then caller order
    accepted.sort_by_key(|(idx, matched)| {
        let precision = if T::RANK_BY_PRECISION {
            matched.precision
        } else {
            Precision::default()
        };

        (Reverse(matched.quality), Reverse(precision), *idx)
    });

    accepted.into_iter().map(|(idx, _)| idx).collect()
}

/// Implicit quality used by dimensions without an implicitly acceptable candidate.
pub fn no_implicit<C: ?Sized>(_candidate: &C) -> Option<Quality> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{from_comma_delimited, q};

    fn items<T: std::str::FromStr>(header: &str) -> Vec<QualityItem<T>>
    where
        T::Err: std::fmt::Display,
    {
        from_comma_delimited([header])
    }

    fn mimes(types: &[&str]) -> Vec<Mime> {
        types.iter().map(|ty| ty.parse().unwrap()).collect()
    }

    #[test]
    fn ranked_media_ranges() {
        let accept = items::<MediaRange>("*/*;q=0.8, image/*, image/png, text/html;q=0");
        let ranked = ranked(&accept)
            .into_iter()
            .map(|item| item.item.to_string())
            .collect::<Vec<_>>();
        assert_eq!(ranked, vec!["image/png", "image/*", "*/*"]);
    }

    #[test]
    fn ranked_tokens_keep_header_order() {
        let accept = items::<Preference<Token>>("*, gzip;q=0.5, br");
        let ranked = ranked(&accept)
            .into_iter()
            .map(|item| item.item.to_string())
            .collect::<Vec<_>>();
        assert_eq!(ranked, vec!["*", "br", "gzip"]);
    }

    #[test]
    fn best_match_prefers_precision() {
        let accept = items::<MediaRange>("text/*;q=0.9, text/html;q=0.3, */*");
        let matched = best_match(&accept, &mime::TEXT_HTML).unwrap();
        assert_eq!(matched.quality, q(0.3));
        assert_eq!(matched.precision, Precision::new(2));

        let matched = best_match(&accept, &mime::IMAGE_PNG).unwrap();
        assert_eq!(matched.quality, Quality::MAX);
    }

    #[test]
    fn best_match_prefers_quality_on_equal_precision() {
        let accept = items::<Preference<Token>>("gzip;q=0.2, GZIP;q=0.7");
        let matched = best_match(&accept, "gzip").unwrap();
        assert_eq!(matched.quality, q(0.7));
    }

    #[test]
    fn rejection_shadows_wildcard() {
        let accept = items::<MediaRange>("text/*, text/plain;q=0");
        let candidates = mimes(&["text/plain", "text/html"]);
        assert_eq!(negotiate(Some(accept.as_slice()), &candidates, no_implicit), vec![1]);
    }

    #[test]
    fn absent_header_accepts_everything() {
        let candidates = ["b", "a", "c"];
        let ranked = negotiate::<Preference<Token>, _, _>(None, candidates, no_implicit);
        assert_eq!(ranked, vec![0, 1, 2]);
    }

    #[test]
    fn present_but_empty_header_accepts_nothing() {
        let accept = items::<Preference<Token>>("");
        assert!(accept.is_empty());
        assert!(negotiate(Some(accept.as_slice()), ["utf-8"], no_implicit).is_empty());
    }

    #[test]
    fn candidates_sorted_by_quality_then_caller_order() {
        let accept = items::<Preference<Token>>("utf-8;q=0.5, iso-8859-1, *;q=0.5");
        let candidates = ["utf-7", "utf-8", "iso-8859-1"];
        let ranked = negotiate(Some(accept.as_slice()), candidates, no_implicit);
        assert_eq!(ranked, vec![2, 0, 1]);
    }

    #[test]
    fn media_candidates_sorted_by_specificity() {
        let accept = items::<MediaRange>("text/*, application/json");
        let candidates = mimes(&["text/html", "application/json"]);
        assert_eq!(negotiate(Some(accept.as_slice()), &candidates, no_implicit), vec![1, 0]);

        let accept = items::<MediaRange>("text/html;level=1, text/html");
        let candidates = mimes(&["text/html", "text/html;level=1"]);
        assert_eq!(negotiate(Some(accept.as_slice()), &candidates, no_implicit), vec![1, 0]);
    }

    #[test]
    fn implicit_quality_applies_only_without_match() {
        let identity = |enc: &str| enc.eq_ignore_ascii_case("identity").then_some(Quality::MAX);

        let accept = items::<Preference<Token>>("gzip;q=0.5");
        assert_eq!(
            negotiate(Some(accept.as_slice()), ["gzip", "identity"], identity),
            vec![1, 0]
        );

        let accept = items::<Preference<Token>>("gzip, identity;q=0");
        assert_eq!(
            negotiate(Some(accept.as_slice()), ["identity", "gzip"], identity),
            vec![1]
        );
    }
}
