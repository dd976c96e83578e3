use std::collections::HashMap;

use crate::config::FindOptions;
use crate::types::{AiType, Region};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    window: String,
    first_line: u32,
    id: char,
    ai_type: AiType,
    opts: FindOptions,
}

/// Caller-owned memo of search results for an unchanged window.
///
/// The engine never detects text changes itself: call [`MatchCache::clear`]
/// whenever the underlying buffer is edited.
#[derive(Debug, Default, Clone)]
pub struct MatchCache {
    entries: HashMap<CacheKey, Option<Region>>,
}

impl MatchCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn get(
        &self,
        window: &str,
        first_line: u32,
        id: char,
        ai_type: AiType,
        opts: &FindOptions,
    ) -> Option<Option<Region>> {
        let key = CacheKey {
            window: window.to_string(),
            first_line,
            id,
            ai_type,
            opts: *opts,
        };
        self.entries.get(&key).copied()
    }

    pub(crate) fn insert(
        &mut self,
        window: String,
        first_line: u32,
        id: char,
        ai_type: AiType,
        opts: &FindOptions,
        result: Option<Region>,
    ) {
        let key = CacheKey {
            window,
            first_line,
            id,
            ai_type,
            opts: *opts,
        };
        self.entries.insert(key, result);
    }
}
