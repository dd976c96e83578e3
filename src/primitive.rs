//! Matching atoms and the `find` primitive every search is built from.
//!
//! Each atom answers one question: where is the next match at or after a
//! given byte offset? The enumerator in [`crate::matcher`] relies on the
//! returned span never starting before that offset.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::error::{Error, Result};
use crate::types::Span;

/// Host-supplied find function: `(text, init) -> span starting at or after init`.
#[derive(Clone)]
pub struct Finder(Arc<dyn Fn(&str, usize) -> Option<Span> + Send + Sync>);

impl Finder {
    pub fn new(f: impl Fn(&str, usize) -> Option<Span> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    fn call(&self, text: &str, init: usize) -> Option<Span> {
        (self.0)(text, init)
    }
}

impl fmt::Debug for Finder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Finder(..)")
    }
}

/// An atomic pattern.
#[derive(Debug, Clone)]
pub enum Atom {
    /// A regular find-pattern. Empty groups `()` act as capture marks when
    /// the atom is last in a nested pattern; any other group is an ordinary
    /// group and never a mark.
    Literal(Regex),
    /// Shortest balanced run of two distinct delimiters, `(` … `)`.
    Balanced { open: char, close: char },
    /// Shortest `left … right` span, not necessarily balanced.
    MinimalWidth { left: String, right: String },
    /// A delimiter and the next occurrence of the same delimiter. Consecutive
    /// quotes pair up left to right.
    Quoted(char),
    /// Arbitrary finder supplied by the host.
    Custom(Finder),
}

impl Atom {
    /// Compile a literal find-pattern.
    pub fn literal(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(Atom::Literal)
            .map_err(|err| Error::InvalidPattern {
                pattern: pattern.to_string(),
                message: err.to_string(),
            })
    }

    pub fn balanced(open: char, close: char) -> Self {
        Atom::Balanced { open, close }
    }

    pub fn minimal_width(left: impl Into<String>, right: impl Into<String>) -> Self {
        Atom::MinimalWidth {
            left: left.into(),
            right: right.into(),
        }
    }

    pub fn quoted(quote: char) -> Self {
        Atom::Quoted(quote)
    }

    pub fn custom(f: impl Fn(&str, usize) -> Option<Span> + Send + Sync + 'static) -> Self {
        Atom::Custom(Finder::new(f))
    }

    /// Number of capture marks this atom carries.
    pub fn capture_marks(&self) -> usize {
        self.mark_groups().len()
    }

    /// Capture group indices of the empty `()` marks, in pattern order.
    pub(crate) fn mark_groups(&self) -> Vec<usize> {
        match self {
            Atom::Literal(re) => empty_groups(re.as_str()),
            _ => Vec::new(),
        }
    }

    /// Where enumeration resumes after a match of this atom.
    pub(crate) fn resume_after(&self, text: &str, span: Span) -> usize {
        match self {
            Atom::Quoted(_) if !span.is_empty() => span.end,
            _ => next_boundary(text, span.start),
        }
    }
}

/// Find the next match of `atom` in `text` starting at or after `init`.
pub fn find(text: &str, atom: &Atom, init: usize) -> Result<Option<Span>> {
    if init > text.len() || !text.is_char_boundary(init) {
        return Ok(None);
    }
    let found = match atom {
        Atom::Literal(re) => re.find_at(text, init).map(|m| Span::new(m.start(), m.end())),
        Atom::Balanced { open, close } => find_balanced(text, init, *open, *close),
        Atom::MinimalWidth { left, right } => find_minimal_width(text, init, left, right),
        Atom::Quoted(quote) => find_quoted(text, init, *quote),
        Atom::Custom(finder) => {
            let span = finder.call(text, init);
            if let Some(span) = span {
                check_progress(text, init, span)?;
            }
            span
        }
    };
    Ok(found)
}

/// Like [`find`], but also returns the capture marks of literal atoms as
/// offsets into `text`. `None` marks mean a mark group did not take part in
/// the match.
///
/// `mark_groups` are the group indices from [`Atom::mark_groups`].
pub(crate) fn find_with_marks(
    text: &str,
    atom: &Atom,
    mark_groups: &[usize],
    init: usize,
) -> Result<Option<(Span, Vec<Option<usize>>)>> {
    match atom {
        Atom::Literal(re) => {
            if init > text.len() || !text.is_char_boundary(init) {
                return Ok(None);
            }
            Ok(re.captures_at(text, init).and_then(|caps| {
                let whole = caps.get(0)?;
                let marks = mark_groups
                    .iter()
                    .map(|&group| caps.get(group).map(|m| m.start()))
                    .collect();
                Some((Span::new(whole.start(), whole.end()), marks))
            }))
        }
        _ => Ok(find(text, atom, init)?.map(|span| (span, Vec::new()))),
    }
}

fn check_progress(text: &str, init: usize, span: Span) -> Result<()> {
    let valid = span.start >= init
        && span.start <= span.end
        && span.end <= text.len()
        && text.is_char_boundary(span.start)
        && text.is_char_boundary(span.end);
    if valid {
        Ok(())
    } else {
        Err(Error::NonProgressing {
            init,
            start: span.start,
            end: span.end,
            len: text.len(),
        })
    }
}

/// Indices of the capturing groups written as a literal `()`.
///
/// Groups are numbered by their opening parenthesis, counting named groups
/// and skipping `(?…)` non-capturing groups, as the regex crate does.
/// Parentheses that are escaped or inside a character class are not groups.
fn empty_groups(pattern: &str) -> Vec<usize> {
    let bytes = pattern.as_bytes();
    let mut marks = Vec::new();
    let mut group = 0;
    let mut class_depth = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b'[' => {
                class_depth += 1;
                if bytes.get(i + 1) == Some(&b'^') {
                    i += 1;
                }
                // A leading `]` is a literal member of the class.
                if bytes.get(i + 1) == Some(&b']') {
                    i += 1;
                }
            }
            b']' if class_depth > 0 => class_depth -= 1,
            b'(' if class_depth == 0 => {
                let rest = &bytes[i + 1..];
                let named = rest.starts_with(b"?P<") || rest.starts_with(b"?<");
                if named || !rest.starts_with(b"?") {
                    group += 1;
                    if rest.first() == Some(&b')') {
                        marks.push(group);
                    }
                }
            }
            _ => {}
        }
        i += 1;
    }
    marks
}

/// Byte offset of the character boundary following `at`.
pub(crate) fn next_boundary(text: &str, at: usize) -> usize {
    text.get(at..)
        .and_then(|rest| rest.chars().next())
        .map_or(at + 1, |c| at + c.len_utf8())
}

pub(crate) fn find_balanced(text: &str, init: usize, open: char, close: char) -> Option<Span> {
    let mut search = init;
    while let Some(rel) = text.get(search..)?.find(open) {
        let start = search + rel;
        let mut depth = 0usize;
        for (idx, c) in text[start..].char_indices() {
            if c == open {
                depth += 1;
            } else if c == close {
                depth -= 1;
                if depth == 0 {
                    return Some(Span::new(start, start + idx + c.len_utf8()));
                }
            }
        }
        // Unclosed from here; a later opening delimiter may still close.
        search = start + open.len_utf8();
    }
    None
}

pub(crate) fn find_quoted(text: &str, init: usize, quote: char) -> Option<Span> {
    let start = init + text.get(init..)?.find(quote)?;
    let after = start + quote.len_utf8();
    let close = after + text[after..].find(quote)?;
    Some(Span::new(start, close + quote.len_utf8()))
}

fn find_minimal_width(text: &str, init: usize, left: &str, right: &str) -> Option<Span> {
    let start = init + text.get(init..)?.find(left)?;
    let after = start + left.len();
    let close = after + text[after..].find(right)?;
    // Same end, largest start: the last `left` that still fits before `right`.
    let start = text[start..close]
        .rfind(left)
        .map_or(start, |rel| start + rel);
    Some(Span::new(start, close + right.len()))
}
