//! Composed patterns and their expansion into nested patterns.

use crate::error::{Error, Result};
use crate::primitive::Atom;

/// One position of a composed pattern.
#[derive(Debug, Clone)]
pub enum PatternNode {
    Atom(Atom),
    /// Alternatives for this position. Nested alternative lists flatten into
    /// one list.
    Alternatives(Vec<PatternNode>),
}

impl From<Atom> for PatternNode {
    fn from(atom: Atom) -> Self {
        PatternNode::Atom(atom)
    }
}

impl PatternNode {
    pub fn any_of(alternatives: impl IntoIterator<Item = Atom>) -> Self {
        PatternNode::Alternatives(alternatives.into_iter().map(PatternNode::Atom).collect())
    }

    fn flatten_into<'a>(&'a self, out: &mut Vec<&'a Atom>) {
        match self {
            PatternNode::Atom(atom) => out.push(atom),
            PatternNode::Alternatives(nodes) => {
                for node in nodes {
                    node.flatten_into(out);
                }
            }
        }
    }
}

/// A nested pattern whose positions may offer alternatives.
#[derive(Debug, Clone, Default)]
pub struct ComposedPattern {
    nodes: Vec<PatternNode>,
}

impl ComposedPattern {
    pub fn new(nodes: Vec<PatternNode>) -> Self {
        Self { nodes }
    }

    /// Append a position.
    pub fn then(mut self, node: impl Into<PatternNode>) -> Self {
        self.nodes.push(node.into());
        self
    }

    pub fn nodes(&self) -> &[PatternNode] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl FromIterator<PatternNode> for ComposedPattern {
    fn from_iter<I: IntoIterator<Item = PatternNode>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Plain sequence of atoms; atom `k + 1` is searched inside the match of
/// atom `k`.
#[derive(Debug, Clone)]
pub struct NestedPattern {
    atoms: Vec<Atom>,
}

impl NestedPattern {
    /// Build and validate a nested pattern.
    pub fn new(atoms: Vec<Atom>) -> Result<Self> {
        let Some(last) = atoms.last() else {
            return Err(Error::EmptyPattern);
        };
        for atom in &atoms {
            if let Atom::Balanced { open, close } = atom
                && open == close
            {
                return Err(Error::SameDelimiters(*open));
            }
        }
        match last.capture_marks() {
            0 | 2 | 4 => Ok(Self { atoms }),
            n => Err(Error::CaptureMarks(n)),
        }
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }
}

/// Expand `composed` into the cartesian product of its alternatives.
///
/// The last position varies fastest, so the output order is stable and
/// candidate discovery order is reproducible.
pub fn expand(composed: &ComposedPattern) -> Result<Vec<NestedPattern>> {
    if composed.is_empty() {
        return Err(Error::EmptyPattern);
    }

    let mut choices = Vec::with_capacity(composed.nodes.len());
    for (position, node) in composed.nodes.iter().enumerate() {
        let mut atoms = Vec::new();
        node.flatten_into(&mut atoms);
        if atoms.is_empty() {
            return Err(Error::EmptyAlternatives { position });
        }
        choices.push(atoms);
    }

    let mut product: Vec<Vec<Atom>> = vec![Vec::new()];
    for atoms in &choices {
        product = product
            .into_iter()
            .flat_map(|prefix| {
                atoms.iter().map(move |atom| {
                    let mut next = prefix.clone();
                    next.push((*atom).clone());
                    next
                })
            })
            .collect();
    }

    product.into_iter().map(NestedPattern::new).collect()
}
