pub mod builtin;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod pattern;
pub mod primitive;
pub mod region;
pub mod select;
pub mod spec;
pub mod textobject;
pub mod traits;
pub mod types;

pub use crate::builtin::{builtin, gen_spec};
pub use crate::cache::MatchCache;
pub use crate::config::{Config, DEFAULT_N_LINES, FindOptions};
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::error::{Error, Result};
pub use crate::matcher::{Candidate, candidates, enumerate};
pub use crate::pattern::{ComposedPattern, NestedPattern, PatternNode, expand};
pub use crate::primitive::{Atom, Finder, find};
pub use crate::region::Neighborhood;
pub use crate::select::{Accept, SearchMethod, select};
pub use crate::spec::{Provider, ProviderOutput, TextobjectSpec};
pub use crate::textobject::{extract_inner_outer, locate};
pub use crate::traits::TextSource;
pub use crate::types::{AiType, Edge, Orientation, Position, Region, Span, Textobject};
