//! Depth-first enumeration of every span matching a nested pattern.

use std::collections::HashSet;

use crate::error::Result;
use crate::pattern::NestedPattern;
use crate::primitive::{self, Atom};
use crate::types::Span;

/// A matched textobject inside one flattened string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Candidate {
    pub outer: Span,
    pub inner: Span,
}

impl Candidate {
    /// Candidate whose inner and outer parts coincide.
    pub fn whole(span: Span) -> Self {
        Self {
            outer: span,
            inner: span,
        }
    }

    /// The span compared against the reference region.
    pub fn span(&self) -> Span {
        self.outer
    }
}

/// Every candidate matching `pattern` in `text`, in discovery order.
pub fn enumerate(text: &str, pattern: &NestedPattern) -> Result<Vec<Candidate>> {
    let mut out = Vec::new();
    visit(text, 0, pattern.atoms(), &mut out)?;
    Ok(out)
}

/// Enumerate every nested pattern and keep the first candidate for each
/// distinct outer span.
pub fn candidates(text: &str, patterns: &[NestedPattern]) -> Result<Vec<Candidate>> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for pattern in patterns {
        for candidate in enumerate(text, pattern)? {
            if seen.insert(candidate.outer) {
                out.push(candidate);
            }
        }
    }
    Ok(out)
}

fn visit(text: &str, offset: usize, atoms: &[Atom], out: &mut Vec<Candidate>) -> Result<()> {
    let Some((atom, rest)) = atoms.split_first() else {
        return Ok(());
    };
    let is_last = rest.is_empty();
    let mark_groups = if is_last { atom.mark_groups() } else { Vec::new() };

    let mut init = 0;
    while init <= text.len() {
        let span = if is_last {
            let found = primitive::find_with_marks(text, atom, &mark_groups, init)?;
            let Some((span, marks)) = found else {
                break;
            };
            if let Some(candidate) = carve(span, &marks) {
                out.push(Candidate {
                    outer: candidate.outer.shift(offset),
                    inner: candidate.inner.shift(offset),
                });
            } else {
                log::trace!("skipping match {span:?}: capture marks {marks:?} out of order");
            }
            span
        } else {
            let Some(span) = primitive::find(text, atom, init)? else {
                break;
            };
            visit(&text[span.range()], offset + span.start, rest, out)?;
            span
        };
        init = atom.resume_after(text, span);
    }
    Ok(())
}

/// Split a final match into outer and inner parts using its capture marks.
fn carve(span: Span, marks: &[Option<usize>]) -> Option<Candidate> {
    let marks = marks.iter().copied().collect::<Option<Vec<_>>>()?;
    if marks.windows(2).any(|w| w[0] > w[1]) {
        return None;
    }
    match marks.as_slice() {
        [] => Some(Candidate::whole(span)),
        [a, b] => Some(Candidate {
            outer: span,
            inner: Span::new(*a, *b),
        }),
        [a, b, c, d] => Some(Candidate {
            outer: Span::new(*a, *d),
            inner: Span::new(*b, *c),
        }),
        _ => None,
    }
}
