//! The search driver: two-stage windowing, consecutive search and the
//! region-level entry points.

use crate::config::FindOptions;
use crate::error::Result;
use crate::matcher::{self, Candidate};
use crate::region::Neighborhood;
use crate::select::{SearchMethod, select};
use crate::spec::{Resolved, TextobjectSpec};
use crate::traits::TextSource;
use crate::types::{AiType, Region, Textobject};

/// Locate textobject `id` described by `spec`.
///
/// Returns `Ok(None)` when nothing acceptable is found. With `n_times > 1`
/// each step searches from the outer region found by the previous one. If
/// the result equals the reference region, the search is repeated once more
/// from the found outer region, so re-applying a textobject to its own
/// result moves on instead of being a no-op.
pub fn locate<T: TextSource + ?Sized>(
    text: &T,
    id: char,
    spec: &TextobjectSpec,
    ai_type: AiType,
    opts: &FindOptions,
) -> Result<Option<Region>> {
    if opts.n_times == 0 {
        return Ok(None);
    }

    let resolved = spec.resolve(ai_type, id, opts)?;
    if let Resolved::Region(region) = resolved {
        return Ok(Some(region));
    }

    let reference = opts.reference_region;
    let mut current = reference;
    let mut found = None;
    for step in 1..=opts.n_times {
        let Some(hit) = find_best(text, &resolved, &current, opts)? else {
            log::debug!("textobject '{id}' not found (step {step} of {})", opts.n_times);
            return Ok(None);
        };
        current = hit.outer;
        found = Some(hit);
    }
    let Some(hit) = found else {
        return Ok(None);
    };

    if hit.get(ai_type).same_extent(&reference) {
        log::debug!("textobject '{id}' equals the reference region, searching again");
        return Ok(find_best(text, &resolved, &hit.outer, opts)?.map(|next| next.get(ai_type)));
    }
    Ok(Some(hit.get(ai_type)))
}

/// Outer and inner regions of the textobject whose outer region is exactly
/// `region`, without searching around it.
pub fn extract_inner_outer<T: TextSource + ?Sized>(
    text: &T,
    id: char,
    spec: &TextobjectSpec,
    region: &Region,
) -> Result<Option<Textobject>> {
    let opts = FindOptions::default()
        .with_reference(*region)
        .with_n_lines(0);
    let resolved = spec.resolve(AiType::Around, id, &opts)?;
    if let Resolved::Region(found) = resolved {
        return Ok(found.same_extent(region).then_some(Textobject {
            outer: found,
            inner: found,
        }));
    }

    let neigh = Neighborhood::around(text, region, 0);
    let Some(span) = neigh.region_to_span(region) else {
        return Ok(None);
    };
    Ok(candidates_in(&neigh, &resolved)?
        .into_iter()
        .find(|c| c.outer == span)
        .map(|c| to_textobject(&neigh, c)))
}

/// Best match for `reference`: first within the reference's own lines, then
/// within `n_lines` around it.
fn find_best<T: TextSource + ?Sized>(
    text: &T,
    resolved: &Resolved,
    reference: &Region,
    opts: &FindOptions,
) -> Result<Option<Textobject>> {
    let narrow = Neighborhood::around(text, reference, 0);
    if let Some(hit) = best_in(&narrow, resolved, reference, opts.search_method)? {
        return Ok(Some(hit));
    }

    let wide = Neighborhood::around(text, reference, opts.n_lines);
    if wide.same_window(&narrow) {
        return Ok(None);
    }
    log::debug!(
        "widening search to lines {}..={}",
        wide.first_line(),
        wide.first_line() + wide.line_count().saturating_sub(1)
    );
    best_in(&wide, resolved, reference, opts.search_method)
}

fn best_in(
    neigh: &Neighborhood,
    resolved: &Resolved,
    reference: &Region,
    method: SearchMethod,
) -> Result<Option<Textobject>> {
    let Some(reference) = neigh.region_to_span(reference) else {
        log::debug!("reference region {reference:?} lies outside the window");
        return Ok(None);
    };
    let candidates = candidates_in(neigh, resolved)?;
    log::trace!(
        "{} candidates in {} lines from line {}",
        candidates.len(),
        neigh.line_count(),
        neigh.first_line()
    );
    Ok(select(neigh.text(), &candidates, reference, method).map(|c| to_textobject(neigh, c)))
}

fn candidates_in(neigh: &Neighborhood, resolved: &Resolved) -> Result<Vec<Candidate>> {
    match resolved {
        Resolved::Patterns(patterns) => matcher::candidates(neigh.text(), patterns),
        Resolved::Region(region) => Ok(neigh
            .region_to_span(region)
            .map(Candidate::whole)
            .into_iter()
            .collect()),
        Resolved::Regions(regions) => Ok(regions
            .iter()
            .filter_map(|region| neigh.region_to_span(region))
            .map(Candidate::whole)
            .collect()),
    }
}

fn to_textobject(neigh: &Neighborhood, candidate: Candidate) -> Textobject {
    Textobject {
        outer: neigh.span_to_region(candidate.outer),
        inner: neigh.span_to_region(candidate.inner),
    }
}
