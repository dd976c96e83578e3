use serde::{Deserialize, Serialize};

/// A position within a text buffer.
///
/// Positions are one-based in both directions and column values are counted
/// in bytes of the line, matching what most editor hosts report for cursors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// One-based line number.
    pub line: u32,
    /// One-based byte column.
    pub col: u32,
}

impl Position {
    /// The first byte of the first line.
    pub const ORIGIN: Position = Position { line: 1, col: 1 };

    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

/// How a region is meant to be interpreted by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Character-wise region (v).
    #[default]
    Charwise,
    /// Line-wise region (V). Columns are ignored.
    Linewise,
    /// Block-wise region (<C-v>). Treated as character-wise when searching.
    Blockwise,
}

/// A region of a buffer in two-dimensional coordinates.
///
/// `to` is inclusive and addresses the first byte of the last character of
/// the region. A region without `to` is empty and anchored at `from`, which
/// is how a plain cursor is represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub from: Position,
    #[serde(default)]
    pub to: Option<Position>,
    #[serde(default)]
    pub orientation: Orientation,
}

impl Region {
    /// A non-empty character-wise region.
    pub fn new(from: Position, to: Position) -> Self {
        Self {
            from,
            to: Some(to),
            orientation: Orientation::Charwise,
        }
    }

    /// An empty region at `pos`, i.e. a cursor.
    pub fn point(pos: Position) -> Self {
        Self {
            from: pos,
            to: None,
            orientation: Orientation::Charwise,
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.to.is_none()
    }

    /// Position of the requested edge. The right edge of an empty region is
    /// its anchor.
    pub fn edge(&self, edge: Edge) -> Position {
        match edge {
            Edge::Left => self.from,
            Edge::Right => self.to.unwrap_or(self.from),
        }
    }

    /// Whether both regions cover the same positions, regardless of
    /// orientation.
    pub fn same_extent(&self, other: &Region) -> bool {
        self.from == other.from && self.to == other.to
    }

    pub(crate) fn is_well_formed(&self) -> bool {
        self.from.line >= 1
            && self.from.col >= 1
            && self.to.is_none_or(|to| to.line >= 1 && to.col >= 1 && self.from <= to)
    }
}

/// A half-open byte interval `[start, end)` inside one flattened string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} past end {end}");
        Self { start, end }
    }

    /// The empty span at `at`.
    pub fn empty(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    pub(crate) fn shift(self, offset: usize) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }

    /// Whether `self` covers `other`.
    ///
    /// An empty `other` is a cursor sitting on the character at its offset,
    /// so it is covered only when that character lies inside `self`. An
    /// empty `self` covers nothing but an identical empty span.
    pub fn covers(&self, other: &Span) -> bool {
        if self.is_empty() {
            return self == other;
        }
        if other.is_empty() {
            return self.start <= other.start && other.start < self.end;
        }
        self.start <= other.start && other.end <= self.end
    }
}

/// Which part of a textobject is requested: `a` (around) or `i` (inside).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiType {
    Around,
    Inside,
}

/// One side of a region, used by cursor-edge motions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Right,
}

/// The outer and inner regions of a located textobject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Textobject {
    pub outer: Region,
    pub inner: Region,
}

impl Textobject {
    pub fn get(&self, ai_type: AiType) -> Region {
        match ai_type {
            AiType::Around => self.outer,
            AiType::Inside => self.inner,
        }
    }
}
