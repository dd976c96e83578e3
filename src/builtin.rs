//! Built-in textobjects and generators for common spec shapes.

use regex::Regex;

use crate::error::{Error, Result};
use crate::pattern::{ComposedPattern, PatternNode};
use crate::primitive::{Atom, Finder, find_balanced, find_quoted, next_boundary};
use crate::spec::TextobjectSpec;
use crate::types::Span;

/// Inner part excludes the one-character delimiters.
const DELIMITED: &str = r"(?s)^.().*().$";
/// Inner part also excludes whitespace next to the delimiters.
const DELIMITED_TRIMMED: &str = r"(?s)^.\s*().*?()\s*.$";

const BRACKETS: [(char, char); 4] = [('(', ')'), ('[', ']'), ('{', '}'), ('<', '>')];
const QUOTES: [char; 3] = ['"', '\'', '`'];

/// The spec behind a built-in textobject id, if there is one.
///
/// | id | textobject |
/// |---|---|
/// | `(` `[` `{` `<` | balanced bracket, inner trims whitespace |
/// | `)` `]` `}` `>` | balanced bracket |
/// | `b` | any of `()`, `[]`, `{}` |
/// | `"` `'` `` ` `` | quote |
/// | `q` | any quote |
/// | `t` | tag |
/// | `f` | function call |
/// | `a` | argument |
///
/// Any other non-alphanumeric id `c` (punctuation, whitespace) selects the
/// shortest `c … c`. Other alphanumeric ids have no built-in.
pub fn builtin(id: char) -> Result<Option<TextobjectSpec>> {
    let spec = match id {
        '(' | '[' | '{' | '<' => bracket(id, DELIMITED_TRIMMED)?,
        ')' | ']' | '}' | '>' => bracket(id, DELIMITED)?,
        'b' => ComposedPattern::default()
            .then(PatternNode::any_of(
                BRACKETS[..3].iter().map(|&(open, close)| Atom::balanced(open, close)),
            ))
            .then(Atom::literal(DELIMITED)?)
            .into(),
        '"' | '\'' | '`' => ComposedPattern::default()
            .then(Atom::quoted(id))
            .then(Atom::literal(DELIMITED)?)
            .into(),
        'q' => ComposedPattern::default()
            .then(PatternNode::any_of(QUOTES.iter().map(|&q| Atom::quoted(q))))
            .then(Atom::literal(DELIMITED)?)
            .into(),
        't' => gen_spec::tag()?,
        'f' => gen_spec::function_call(gen_spec::DEFAULT_CALL_NAME)?,
        'a' => gen_spec::argument(gen_spec::ArgumentOptions::default())?,
        c if c.is_alphanumeric() => return Ok(None),
        c => ComposedPattern::default()
            .then(Atom::minimal_width(c, c))
            .then(Atom::literal(DELIMITED)?)
            .into(),
    };
    Ok(Some(spec))
}

fn bracket(id: char, inner: &str) -> Result<TextobjectSpec> {
    let (open, close) = BRACKETS
        .iter()
        .copied()
        .find(|&(open, close)| id == open || id == close)
        .ok_or(Error::UnknownTextobject(id))?;
    Ok(ComposedPattern::default()
        .then(Atom::balanced(open, close))
        .then(Atom::literal(inner)?)
        .into())
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|err| Error::InvalidPattern {
        pattern: pattern.to_string(),
        message: err.to_string(),
    })
}

pub mod gen_spec {
    use super::*;

    /// Name pattern used by the `f` textobject.
    pub const DEFAULT_CALL_NAME: &str = r"[\w.]+";

    /// How `left` and `right` delimit a pair.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub enum PairKind {
        /// Shortest `left … right`, ignoring nesting.
        #[default]
        NonBalanced,
        /// Balanced run of single-character delimiters.
        Balanced,
        /// Like `NonBalanced`, but runs of repeated delimiters belong to the
        /// outer part: `__x__` rather than `_x_`.
        Greedy,
    }

    /// Textobject between `left` and `right`; the inner part excludes them.
    pub fn pair(left: &str, right: &str, kind: PairKind) -> Result<TextobjectSpec> {
        let (l, r) = (regex::escape(left), regex::escape(right));
        let spec = match kind {
            PairKind::NonBalanced => ComposedPattern::default()
                .then(Atom::minimal_width(left, right))
                .then(Atom::literal(&format!("(?s)^{l}().*(){r}$"))?),
            PairKind::Balanced => {
                let (open, close) = single_chars(left, right)?;
                if open == close {
                    return Err(Error::SameDelimiters(open));
                }
                ComposedPattern::default()
                    .then(Atom::balanced(open, close))
                    .then(Atom::literal(DELIMITED)?)
            }
            PairKind::Greedy => {
                let (left, right) = (left.to_string(), right.to_string());
                ComposedPattern::default()
                    .then(Atom::custom(move |s, init| greedy_pair(s, init, &left, &right)))
                    .then(Atom::literal(&format!("(?s)^(?:{l})+().*?()(?:{r})+$"))?)
            }
        };
        Ok(spec.into())
    }

    fn single_chars(left: &str, right: &str) -> Result<(char, char)> {
        let mut l = left.chars();
        let mut r = right.chars();
        match (l.next(), l.next(), r.next(), r.next()) {
            (Some(open), None, Some(close), None) => Ok((open, close)),
            _ => Err(Error::InvalidPattern {
                pattern: format!("{left}{right}"),
                message: "balanced pairs need single-character delimiters".to_string(),
            }),
        }
    }

    fn greedy_pair(s: &str, init: usize, left: &str, right: &str) -> Option<Span> {
        if left.is_empty() || right.is_empty() {
            return None;
        }
        let mut from = init;
        loop {
            let start = from + s.get(from..)?.find(left)?;
            if s[..start].ends_with(left) {
                // Inside a run that started earlier.
                from = next_boundary(s, start);
                continue;
            }
            let mut open_end = start;
            while s[open_end..].starts_with(left) {
                open_end += left.len();
            }
            let close = open_end + s[open_end..].find(right)?;
            let mut end = close;
            while s[end..].starts_with(right) {
                end += right.len();
            }
            return Some(Span::new(start, end));
        }
    }

    /// `name(args)` where `name` matches `name_pattern`; inner is the
    /// argument list.
    pub fn function_call(name_pattern: &str) -> Result<TextobjectSpec> {
        let head = compile(&format!(r"(?:{name_pattern})\("))?;
        let finder = Finder::new(move |s, init| find_call(&head, s, init));
        Ok(ComposedPattern::default()
            .then(Atom::Custom(finder))
            .then(Atom::literal(r"(?s)^[^(]*\(().*()\)$")?)
            .into())
    }

    fn find_call(head: &Regex, s: &str, init: usize) -> Option<Span> {
        let mut from = init;
        while from <= s.len() {
            let m = head.find_at(s, from)?;
            let paren = m.end() - 1;
            let at_frontier = s[..m.start()]
                .chars()
                .next_back()
                .is_none_or(|c| !(c.is_alphanumeric() || c == '_' || c == '.'));
            if at_frontier
                && let Some(args) = find_balanced(s, paren, '(', ')')
                && args.start == paren
            {
                return Some(Span::new(m.start(), args.end));
            }
            from = next_boundary(s, m.start());
        }
        None
    }

    /// `<name …>…</name>`, shortest match, not balanced; inner is the
    /// content between the tags.
    pub fn tag() -> Result<TextobjectSpec> {
        let open = compile(r"<(\w+)[^<>]*>")?;
        let finder = Finder::new(move |s, init| find_tag(&open, s, init));
        Ok(ComposedPattern::default()
            .then(Atom::Custom(finder))
            .then(Atom::literal(r"(?s)^<[^>]*>()(?:.*)()</[^/>]*>$")?)
            .into())
    }

    fn find_tag(open: &Regex, s: &str, init: usize) -> Option<Span> {
        let mut from = init;
        while from <= s.len() {
            let caps = open.captures_at(s, from)?;
            let (whole, name) = (caps.get(0)?, caps.get(1)?.as_str());
            let closing = format!("</{name}>");
            let Some(rel) = s[whole.end()..].find(&closing) else {
                from = next_boundary(s, whole.start());
                continue;
            };
            let close = whole.end() + rel;

            // Same closing tag, latest opening tag of that name.
            let mut start = whole.start();
            let mut probe = next_boundary(s, start);
            while probe <= close {
                let Some(inner) = open.captures_at(&s[..close], probe) else {
                    break;
                };
                let (Some(m), Some(n)) = (inner.get(0), inner.get(1)) else {
                    break;
                };
                if n.as_str() == name {
                    start = m.start();
                }
                probe = next_boundary(s, m.start());
            }
            return Some(Span::new(start, close + closing.len()));
        }
        None
    }

    /// Options of the argument textobject.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ArgumentOptions {
        /// Bracket pairs enclosing argument lists.
        pub brackets: Vec<(char, char)>,
        pub separator: String,
        /// Regions inside which separators are ignored. Pairs with equal
        /// delimiters are treated as quotes.
        pub exclude: Vec<(char, char)>,
    }

    impl Default for ArgumentOptions {
        fn default() -> Self {
            Self {
                brackets: BRACKETS[..3].to_vec(),
                separator: ",".to_string(),
                exclude: vec![
                    ('"', '"'),
                    ('\'', '\''),
                    ('(', ')'),
                    ('[', ']'),
                    ('{', '}'),
                ],
            }
        }
    }

    /// One argument of a bracketed, separated list.
    ///
    /// The outer part includes the separator and the whitespace after it for
    /// the first argument, and the separator before it for the others. The
    /// inner part is the argument without surrounding whitespace.
    pub fn argument(opts: ArgumentOptions) -> Result<TextobjectSpec> {
        let sep = regex::escape(&opts.separator);
        let trim = Atom::literal(&format!(r"(?s)^\s*(?:{sep}\s*)?()(?:.*?)()\s*(?:{sep}\s*)?$"))?;
        let ArgumentOptions {
            brackets,
            separator,
            exclude,
        } = opts;
        let brackets = brackets
            .into_iter()
            .map(|(open, close)| Atom::balanced(open, close));
        let finder = Finder::new(move |s, init| {
            argument_spans(s, &separator, &exclude)
                .into_iter()
                .find(|span| span.start >= init)
        });
        Ok(ComposedPattern::default()
            .then(PatternNode::any_of(brackets))
            .then(Atom::Custom(finder))
            .then(trim)
            .into())
    }

    /// Outer spans of the arguments in `s`, a bracketed list including its
    /// brackets.
    fn argument_spans(s: &str, separator: &str, exclude: &[(char, char)]) -> Vec<Span> {
        let (Some(open), Some(close)) = (s.chars().next(), s.chars().next_back()) else {
            return Vec::new();
        };
        let (lo, hi) = (open.len_utf8(), s.len().saturating_sub(close.len_utf8()));
        if lo > hi {
            return Vec::new();
        }

        let mut separators = Vec::new();
        let mut i = lo;
        while i < hi {
            let rest = &s[i..hi];
            if let Some(skip) = excluded_run(rest, exclude) {
                i += skip;
            } else if !separator.is_empty() && rest.starts_with(separator) {
                separators.push(i);
                i += separator.len();
            } else {
                i = next_boundary(s, i);
            }
        }

        let starts = std::iter::once(lo).chain(separators.iter().map(|p| p + separator.len()));
        let ends = separators.iter().copied().chain(std::iter::once(hi));
        let inner: Vec<Span> = starts
            .zip(ends)
            .map(|(a, b)| {
                let piece = &s[a..b];
                let lead = piece.len() - piece.trim_start().len();
                Span::new(a + lead, a + lead + piece.trim().len())
            })
            .collect();

        match inner.as_slice() {
            [] => Vec::new(),
            [only] if only.is_empty() => Vec::new(),
            [only] => vec![*only],
            _ => inner
                .iter()
                .enumerate()
                .map(|(k, arg)| match k {
                    0 => Span::new(arg.start, inner[1].start),
                    _ => Span::new(inner[k - 1].end, arg.end),
                })
                .collect(),
        }
    }

    /// Length of an excluded region starting exactly at the start of `rest`.
    fn excluded_run(rest: &str, exclude: &[(char, char)]) -> Option<usize> {
        exclude.iter().find_map(|&(open, close)| {
            if !rest.starts_with(open) {
                return None;
            }
            let span = if open == close {
                find_quoted(rest, 0, open)?
            } else {
                find_balanced(rest, 0, open, close)?
            };
            (span.start == 0).then_some(span.end)
        })
    }
}
