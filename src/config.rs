use serde::{Deserialize, Serialize};

use crate::select::SearchMethod;
use crate::types::{Position, Region};

/// Default number of lines searched above and below the reference region.
pub const DEFAULT_N_LINES: u32 = 50;

/// Engine-wide defaults.
///
/// Deserializes from any serde format with every field optional, e.g.
/// `{"n_lines": 20, "search_method": "cover_or_nearest"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Lines above and below the reference region used by the wider search.
    pub n_lines: u32,
    pub search_method: SearchMethod,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            n_lines: DEFAULT_N_LINES,
            search_method: SearchMethod::default(),
        }
    }
}

impl Config {
    /// Options for a single search from `cursor` with this config's defaults.
    pub fn find_options(&self, cursor: Position) -> FindOptions {
        FindOptions {
            n_lines: self.n_lines,
            n_times: 1,
            reference_region: Region::point(cursor),
            search_method: self.search_method,
        }
    }
}

/// Parameters of one textobject search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FindOptions {
    pub n_lines: u32,
    /// How many consecutive matches to step through.
    pub n_times: u32,
    /// The region the result should cover, precede or follow.
    pub reference_region: Region,
    pub search_method: SearchMethod,
}

impl Default for FindOptions {
    fn default() -> Self {
        Config::default().find_options(Position::ORIGIN)
    }
}

impl FindOptions {
    pub fn with_reference(mut self, region: Region) -> Self {
        self.reference_region = region;
        self
    }

    pub fn with_method(mut self, method: SearchMethod) -> Self {
        self.search_method = method;
        self
    }

    pub fn with_n_times(mut self, n_times: u32) -> Self {
        self.n_times = n_times;
        self
    }

    pub fn with_n_lines(mut self, n_lines: u32) -> Self {
        self.n_lines = n_lines;
        self
    }
}
