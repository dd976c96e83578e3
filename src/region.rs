//! Mapping between buffer coordinates and offsets in a flattened window of
//! lines.

use unicode_segmentation::UnicodeSegmentation;

use crate::traits::TextSource;
use crate::types::{Orientation, Position, Region, Span};

/// A contiguous window of buffer lines joined with `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighborhood {
    text: String,
    first_line: u32,
    line_starts: Vec<usize>,
}

impl Neighborhood {
    /// Collect lines `first..=last`, clamped to what `source` can supply.
    ///
    /// Lines the source cannot provide end the window early instead of
    /// failing the search.
    pub fn new<T: TextSource + ?Sized>(source: &T, first: u32, last: u32) -> Self {
        let first = first.max(1);
        let last = last.min(source.line_count());
        let mut text = String::new();
        let mut line_starts = Vec::new();
        for line in first..=last {
            let Some(content) = source.line(line) else {
                log::debug!("line {line} unavailable, window narrowed to {first}..{}", line - 1);
                break;
            };
            if !line_starts.is_empty() {
                text.push('\n');
            }
            line_starts.push(text.len());
            text.push_str(&content);
        }
        Self {
            text,
            first_line: first,
            line_starts,
        }
    }

    /// The lines of `region` plus `n_lines` lines above and below.
    pub fn around<T: TextSource + ?Sized>(source: &T, region: &Region, n_lines: u32) -> Self {
        let last = region.to.map_or(region.from.line, |to| to.line);
        Self::new(
            source,
            region.from.line.saturating_sub(n_lines),
            last.saturating_add(n_lines),
        )
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn first_line(&self) -> u32 {
        self.first_line
    }

    pub fn line_count(&self) -> u32 {
        self.line_starts.len() as u32
    }

    /// Whether both windows hold the same lines.
    pub fn same_window(&self, other: &Neighborhood) -> bool {
        self.first_line == other.first_line && self.line_starts.len() == other.line_starts.len()
    }

    fn line_bounds(&self, line: u32) -> Option<(usize, usize)> {
        let idx = line.checked_sub(self.first_line)? as usize;
        let start = *self.line_starts.get(idx)?;
        let end = self
            .line_starts
            .get(idx + 1)
            .map_or(self.text.len(), |next| next - 1);
        Some((start, end))
    }

    /// Offset of `pos`, or `None` when its line is outside the window.
    ///
    /// Columns past the end of the line land on the line separator, which
    /// is where a cursor on an empty line sits. Columns inside a multi-byte
    /// character snap to its first byte.
    pub fn offset(&self, pos: Position) -> Option<usize> {
        let (start, end) = self.line_bounds(pos.line)?;
        let col = pos.col.saturating_sub(1) as usize;
        let mut offset = (start + col).min(end);
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        Some(offset)
    }

    /// Position of `offset`.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.text.len());
        let idx = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let start = self.line_starts.get(idx).copied().unwrap_or(0);
        Position {
            line: self.first_line + idx as u32,
            col: (offset - start) as u32 + 1,
        }
    }

    /// Span covered by `region`, or `None` when it leaves the window.
    pub fn region_to_span(&self, region: &Region) -> Option<Span> {
        if region.orientation == Orientation::Linewise {
            let last = region.to.map_or(region.from.line, |to| to.line);
            let (start, _) = self.line_bounds(region.from.line)?;
            let (_, end) = self.line_bounds(last)?;
            return Some(Span::new(start, end));
        }

        let start = self.offset(region.from)?;
        let Some(to) = region.to else {
            return Some(Span::empty(start));
        };
        let last = self.offset(to)?;
        let width = self.text[last..]
            .graphemes(true)
            .next()
            .map_or(0, str::len);
        Some(Span::new(start, (last + width).max(start)))
    }

    /// Region covering `span`. `to` lands on the start of the last grapheme
    /// cluster; an empty span maps to an empty region.
    pub fn span_to_region(&self, span: Span) -> Region {
        let from = self.position(span.start);
        if span.is_empty() {
            return Region::point(from);
        }
        let last = self.text[span.range()]
            .grapheme_indices(true)
            .next_back()
            .map_or(span.start, |(idx, _)| span.start + idx);
        Region::new(from, self.position(last))
    }
}
