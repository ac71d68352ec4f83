//! Concept lattice assembly.
//!
//! Concepts are ordered by reverse intent inclusion: `a ≤ b` iff
//! `b.intent ⊆ a.intent`. `a` is covered by `b` when `b.intent` is a maximal
//! proper subset of `a.intent` among the collected concepts.
//!
//! Nodes are kept in lectic order of their intents, so node indices are
//! stable across runs and compatible with the enumeration order.

use std::cmp::Reverse;

use indexmap::IndexSet;

use crate::algebra::{lectic_cmp, AttributeSet};
use crate::enumerate::Concept;

/// Collects concepts and builds their covering graph.
#[derive(Clone, Debug)]
pub struct LatticeAssembler<E> {
    concepts: Vec<Concept<E>>,
}

impl<E> Default for LatticeAssembler<E> {
    fn default() -> Self {
        Self {
            concepts: Vec::new(),
        }
    }
}

impl<E> LatticeAssembler<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, concept: Concept<E>) {
        self.concepts.push(concept);
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Shortcut for `add` on every concept followed by `assemble`.
    pub fn assemble_from(concepts: impl IntoIterator<Item = Concept<E>>) -> ConceptLattice<E> {
        let mut assembler = Self::new();
        for concept in concepts {
            assembler.add(concept);
        }
        assembler.assemble()
    }

    /// Sort, de-duplicate by intent and compute covers.
    pub fn assemble(self) -> ConceptLattice<E> {
        let mut concepts = self.concepts;
        concepts.sort_by(|a, b| lectic_cmp(&a.intent, &b.intent));
        concepts.dedup_by(|a, b| a.intent == b.intent);

        let intents: IndexSet<AttributeSet> = concepts.iter().map(|c| c.intent.clone()).collect();
        let mut upper: Vec<Vec<usize>> = vec![Vec::new(); concepts.len()];
        let mut lower: Vec<Vec<usize>> = vec![Vec::new(); concepts.len()];

        for (a, intent) in intents.iter().enumerate() {
            let mut below: Vec<usize> = intents
                .iter()
                .enumerate()
                .filter(|&(b, other)| b != a && other.is_subset(intent))
                .map(|(b, _)| b)
                .collect();
            below.sort_by_key(|&b| Reverse(intents[b].len()));

            let mut maximal: Vec<usize> = Vec::new();
            for b in below {
                if maximal.iter().all(|&c| !intents[b].is_subset(&intents[c])) {
                    maximal.push(b);
                }
            }
            maximal.sort_unstable();
            for &b in &maximal {
                lower[b].push(a);
            }
            upper[a] = maximal;
        }

        tracing::debug!(nodes = concepts.len(), "lattice assembled");
        ConceptLattice {
            concepts,
            intents,
            upper,
            lower,
        }
    }
}

/// Concepts with their covering relation.
#[derive(Clone, Debug)]
pub struct ConceptLattice<E> {
    concepts: Vec<Concept<E>>,
    intents: IndexSet<AttributeSet>,
    /// `upper[a]`: concepts covering `a` (maximal proper sub-intents).
    upper: Vec<Vec<usize>>,
    /// `lower[b]`: concepts covered by `b`.
    lower: Vec<Vec<usize>>,
}

impl<E> ConceptLattice<E> {
    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Nodes in lectic order of intents.
    pub fn concepts(&self) -> &[Concept<E>] {
        &self.concepts
    }

    pub fn concept(&self, index: usize) -> Option<&Concept<E>> {
        self.concepts.get(index)
    }

    pub fn index_of(&self, intent: &AttributeSet) -> Option<usize> {
        self.intents.get_index_of(intent)
    }

    pub fn find(&self, intent: &AttributeSet) -> Option<&Concept<E>> {
        self.index_of(intent).and_then(|i| self.concepts.get(i))
    }

    /// Immediate superconcepts of node `index`.
    pub fn superconcepts(&self, index: usize) -> &[usize] {
        self.upper.get(index).map(Vec::as_slice).unwrap_or_default()
    }

    /// Immediate subconcepts of node `index`.
    pub fn subconcepts(&self, index: usize) -> &[usize] {
        self.lower.get(index).map(Vec::as_slice).unwrap_or_default()
    }

    /// Covering pairs `(a, b)`: `a` is covered by `b`.
    pub fn covers(&self) -> Vec<(usize, usize)> {
        self.upper
            .iter()
            .enumerate()
            .flat_map(|(a, ups)| ups.iter().map(move |&b| (a, b)))
            .collect()
    }

    /// The node whose intent is contained in every other intent.
    pub fn top(&self) -> Option<usize> {
        let first = self.intents.first()?;
        self.intents
            .iter()
            .all(|intent| first.is_subset(intent))
            .then_some(0)
    }

    /// The node whose intent contains every other intent.
    pub fn bottom(&self) -> Option<usize> {
        let last = self.intents.len().checked_sub(1)?;
        let widest = &self.intents[last];
        self.intents
            .iter()
            .all(|intent| intent.is_subset(widest))
            .then_some(last)
    }
}
