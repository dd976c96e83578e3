//! Picking the single best candidate around a reference span.

use serde::{Deserialize, Serialize};

use crate::matcher::Candidate;
use crate::primitive::next_boundary;
use crate::types::Span;

/// Which candidates are acceptable relative to the reference region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMethod {
    /// Only a candidate covering the reference.
    Cover,
    /// Covering, otherwise the nearest candidate after the reference.
    #[default]
    CoverOrNext,
    /// Covering, otherwise the nearest candidate before the reference.
    CoverOrPrev,
    /// Covering, otherwise the nearer of previous and next.
    CoverOrNearest,
    /// Only the nearest candidate after the reference.
    Next,
    /// Only the nearest candidate before the reference.
    Prev,
    /// The nearer of previous and next, ignoring covering candidates.
    Nearest,
}

bitflags::bitflags! {
    /// Candidate classes a search method accepts.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Accept: u8 {
        const COVER = 0b001;
        const PREV  = 0b010;
        const NEXT  = 0b100;
    }
}

impl SearchMethod {
    pub fn accepts(self) -> Accept {
        match self {
            SearchMethod::Cover => Accept::COVER,
            SearchMethod::CoverOrNext => Accept::COVER | Accept::NEXT,
            SearchMethod::CoverOrPrev => Accept::COVER | Accept::PREV,
            SearchMethod::CoverOrNearest => Accept::all(),
            SearchMethod::Next => Accept::NEXT,
            SearchMethod::Prev => Accept::PREV,
            SearchMethod::Nearest => Accept::PREV | Accept::NEXT,
        }
    }
}

/// Pick the best candidate for `reference` according to `method`.
///
/// `candidates` and `reference` are spans of `text`. An empty reference is a
/// cursor on the character at its offset: distances to previous candidates
/// are measured from that character's start, distances to next candidates
/// from its end. Candidates equal to the reference or nested inside it
/// never qualify. Ties keep the candidate that comes first in `candidates`.
pub fn select(
    text: &str,
    candidates: &[Candidate],
    reference: Span,
    method: SearchMethod,
) -> Option<Candidate> {
    let accept = method.accepts();
    let eligible = || {
        candidates
            .iter()
            .filter(move |c| !reference.covers(&c.outer) && c.outer != reference)
    };

    if accept.contains(Accept::COVER) {
        let cover = eligible()
            .filter(|c| c.outer.covers(&reference))
            .min_by_key(|c| (c.outer.len(), c.outer.start.abs_diff(reference.start)));
        if cover.is_some() {
            return cover.copied();
        }
    }

    let reference_end = if reference.is_empty() {
        next_boundary(text, reference.start)
    } else {
        reference.end
    };
    let prev = if accept.contains(Accept::PREV) {
        eligible()
            .filter(|c| c.outer.end <= reference.start)
            .min_by_key(|c| reference.start - c.outer.end)
            .map(|c| (reference.start - c.outer.end, *c))
    } else {
        None
    };
    let next = if accept.contains(Accept::NEXT) {
        eligible()
            .filter(|c| c.outer.start >= reference_end)
            .min_by_key(|c| c.outer.start - reference_end)
            .map(|c| (c.outer.start - reference_end, *c))
    } else {
        None
    };

    match (prev, next) {
        (Some((prev_dist, prev)), Some((next_dist, next))) => {
            Some(if prev_dist < next_dist { prev } else { next })
        }
        (Some((_, c)), None) | (None, Some((_, c))) => Some(c),
        (None, None) => None,
    }
}
