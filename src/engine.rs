use std::collections::HashMap;

use crate::builtin::builtin;
use crate::cache::MatchCache;
use crate::config::{Config, FindOptions};
use crate::error::{Error, Result};
use crate::region::Neighborhood;
use crate::select::SearchMethod;
use crate::spec::TextobjectSpec;
use crate::textobject::{extract_inner_outer, locate};
use crate::traits::TextSource;
use crate::types::{AiType, Edge, Position, Region, Textobject};

/// Textobject lookup with a configuration and user-defined textobjects.
///
/// User-defined textobjects take precedence over the built-in ones.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: Config,
    custom: HashMap<char, TextobjectSpec>,
}

#[derive(Debug, Default)]
pub struct EngineBuilder {
    config: Config,
    custom: HashMap<char, TextobjectSpec>,
}

impl EngineBuilder {
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn n_lines(mut self, n_lines: u32) -> Self {
        self.config.n_lines = n_lines;
        self
    }

    pub fn search_method(mut self, method: SearchMethod) -> Self {
        self.config.search_method = method;
        self
    }

    /// Register (or override) the textobject for `id`.
    pub fn textobject(mut self, id: char, spec: impl Into<TextobjectSpec>) -> Self {
        self.custom.insert(id, spec.into());
        self
    }

    pub fn build(self) -> Engine {
        Engine {
            config: self.config,
            custom: self.custom,
        }
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Search options for a single search from `cursor`.
    pub fn options(&self, cursor: Position) -> FindOptions {
        self.config.find_options(cursor)
    }

    /// The spec `id` resolves to.
    pub fn spec(&self, id: char) -> Result<TextobjectSpec> {
        if let Some(spec) = self.custom.get(&id) {
            return Ok(spec.clone());
        }
        builtin(id)?.ok_or(Error::UnknownTextobject(id))
    }

    /// Region of textobject `id`, or `None` when it is not found.
    pub fn find_textobject<T: TextSource + ?Sized>(
        &self,
        text: &T,
        ai_type: AiType,
        id: char,
        opts: &FindOptions,
    ) -> Result<Option<Region>> {
        let spec = self.spec(id)?;
        locate(text, id, &spec, ai_type, opts)
    }

    /// [`Engine::find_textobject`] memoized in `cache`.
    ///
    /// Results are keyed by the text of the first search window around the
    /// reference region. Steps after the first (`n_times > 1`, or the extra
    /// step when the result equals the reference) search around the region
    /// found so far and may read lines outside that window, so the key does
    /// not capture every line a search depends on: clear the cache on every
    /// edit. Provider-backed textobjects are never cached.
    pub fn find_textobject_cached<T: TextSource + ?Sized>(
        &self,
        cache: &mut MatchCache,
        text: &T,
        ai_type: AiType,
        id: char,
        opts: &FindOptions,
    ) -> Result<Option<Region>> {
        let spec = self.spec(id)?;
        if spec.is_provider() {
            return locate(text, id, &spec, ai_type, opts);
        }

        let window = Neighborhood::around(text, &opts.reference_region, opts.n_lines);
        if let Some(hit) = cache.get(window.text(), window.first_line(), id, ai_type, opts) {
            log::trace!("cache hit for textobject '{id}'");
            return Ok(hit);
        }
        let result = locate(text, id, &spec, ai_type, opts)?;
        cache.insert(
            window.text().to_string(),
            window.first_line(),
            id,
            ai_type,
            opts,
            result,
        );
        Ok(result)
    }

    /// Outer and inner regions of textobject `id` whose outer region is
    /// exactly `region`.
    pub fn extract_inner_outer<T: TextSource + ?Sized>(
        &self,
        text: &T,
        id: char,
        region: &Region,
    ) -> Result<Option<Textobject>> {
        let spec = self.spec(id)?;
        extract_inner_outer(text, id, &spec, region)
    }

    /// Where a cursor at the reference region moves to go to `edge` of
    /// textobject `id`.
    ///
    /// When the cursor already sits on that edge, the next textobject is
    /// used so that repeating the motion keeps moving.
    pub fn goto_edge<T: TextSource + ?Sized>(
        &self,
        text: &T,
        edge: Edge,
        ai_type: AiType,
        id: char,
        opts: &FindOptions,
    ) -> Result<Option<Position>> {
        let Some(region) = self.find_textobject(text, ai_type, id, opts)? else {
            return Ok(None);
        };
        let cursor = opts.reference_region.from;
        let target = region.edge(edge);
        if target != cursor {
            return Ok(Some(target));
        }

        let again = opts.with_n_times(opts.n_times.saturating_add(1));
        Ok(self
            .find_textobject(text, ai_type, id, &again)?
            .map(|region| region.edge(edge)))
    }
}
