use std::borrow::Cow;

use ropey::Rope;
use textobjects::traits::TextSource;
use textobjects::types::{Position, Region};

pub struct MockBuffer {
    rope: Rope,
}

impl MockBuffer {
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Byte columns of the first occurrence of `needle` on `line`, as an
    /// inclusive region.
    pub fn region_of(&self, line: u32, needle: &str) -> Region {
        let content = self.line(line).unwrap_or_default();
        let start = content
            .find(needle)
            .unwrap_or_else(|| panic!("{needle:?} not on line {line}"));
        let from = Position::new(line, start as u32 + 1);
        let to = Position::new(line, (start + needle.len()) as u32);
        Region::new(from, to)
    }

    /// Text covered by `region`, assuming single-byte characters at its end.
    pub fn slice(&self, region: &Region) -> String {
        let start = self.char_offset(region.from);
        let end = match region.to {
            Some(to) => self.char_offset(to) + 1,
            None => start,
        };
        self.rope.slice(start..end).to_string()
    }

    fn char_offset(&self, pos: Position) -> usize {
        let line_start = self.rope.line_to_byte(pos.line as usize - 1);
        self.rope.byte_to_char(line_start + pos.col as usize - 1)
    }
}

impl TextSource for MockBuffer {
    fn line_count(&self) -> u32 {
        self.rope.len_lines() as u32
    }

    fn line(&self, line: u32) -> Option<Cow<'_, str>> {
        let idx = (line as usize).checked_sub(1)?;
        if idx >= self.rope.len_lines() {
            return None;
        }
        let mut s = self.rope.line(idx).to_string();
        // Remove trailing newline if present
        if s.ends_with('\n') {
            s.pop();
        }
        Some(Cow::Owned(s))
    }
}
