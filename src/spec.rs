use std::fmt;
use std::sync::Arc;

use crate::config::FindOptions;
use crate::error::{Error, Result};
use crate::pattern::{ComposedPattern, NestedPattern, expand};
use crate::types::{AiType, Region};

/// What a textobject id resolves to.
#[derive(Debug, Clone)]
pub enum TextobjectSpec {
    Pattern(ComposedPattern),
    /// Computed on demand by the host, e.g. from a syntax tree.
    Provider(Provider),
}

impl From<ComposedPattern> for TextobjectSpec {
    fn from(pattern: ComposedPattern) -> Self {
        TextobjectSpec::Pattern(pattern)
    }
}

impl TextobjectSpec {
    pub fn provider(
        f: impl Fn(AiType, char, &FindOptions) -> Result<ProviderOutput> + Send + Sync + 'static,
    ) -> Self {
        TextobjectSpec::Provider(Provider(Arc::new(f)))
    }

    /// Turn the spec into something searchable, calling the provider if
    /// there is one.
    pub(crate) fn resolve(&self, ai_type: AiType, id: char, opts: &FindOptions) -> Result<Resolved> {
        match self {
            TextobjectSpec::Pattern(pattern) => Ok(Resolved::Patterns(expand(pattern)?)),
            TextobjectSpec::Provider(provider) => match (provider.0)(ai_type, id, opts)? {
                ProviderOutput::Pattern(pattern) => Ok(Resolved::Patterns(expand(&pattern)?)),
                ProviderOutput::Region(region) => {
                    validate(&region)?;
                    Ok(Resolved::Region(region))
                }
                ProviderOutput::Regions(regions) => {
                    regions.iter().try_for_each(validate)?;
                    Ok(Resolved::Regions(regions))
                }
            },
        }
    }

    pub(crate) fn is_provider(&self) -> bool {
        matches!(self, TextobjectSpec::Provider(_))
    }
}

/// Host callback invoked with the search parameters.
#[derive(Clone)]
pub struct Provider(Arc<dyn Fn(AiType, char, &FindOptions) -> Result<ProviderOutput> + Send + Sync>);

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Provider(..)")
    }
}

/// What a provider may answer with.
#[derive(Debug, Clone)]
pub enum ProviderOutput {
    /// Pattern to search with, as if it had been the spec.
    Pattern(ComposedPattern),
    /// The final answer; no search is done.
    Region(Region),
    /// Ready-made candidates; the best one is picked as usual.
    Regions(Vec<Region>),
}

#[derive(Debug)]
pub(crate) enum Resolved {
    Patterns(Vec<NestedPattern>),
    Region(Region),
    Regions(Vec<Region>),
}

fn validate(region: &Region) -> Result<()> {
    if region.is_well_formed() {
        Ok(())
    } else {
        Err(Error::MalformedRegion {
            from: region.from,
            to: region.to,
        })
    }
}
