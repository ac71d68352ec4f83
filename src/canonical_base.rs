//! Canonical (Duquenne–Guigues) implication base.
//!
//! [`CanonicalBaseBuilder`] runs one enumeration with implication tracking
//! switched on and returns the concepts together with the base. Two
//! strategies are available; on the same context they produce bases with
//! exactly the same consequences:
//!
//! - [`Strategy::NextClosure`]: the depth-first enumerator in pre-closure
//!   mode. Pruning conditions cut branches, so with conditions the base only
//!   covers the explored part of the lattice.
//! - [`Strategy::Relay`]: the pivot-driven walk. Conditions only filter the
//!   emitted concepts; the base is always complete.

use std::fmt;

use crate::condition::Conditions;
use crate::context::Derivation;
use crate::enumerate::{
    ClosureEnumerator, Concept, EnumerationStats, EnumeratorConfig, RelayEnumerator,
};
use crate::error::Result;
use crate::lattice::{ConceptLattice, LatticeAssembler};
use crate::preclosure::Implication;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strategy {
    #[default]
    NextClosure,
    Relay,
}

/// An implication with attribute labels, ready for presentation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabeledImplication {
    pub antecedent: Vec<String>,
    pub consequent: Vec<String>,
    pub support: usize,
}

impl fmt::Display for LabeledImplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}} -> {{{}}} [{}]",
            self.antecedent.join(", "),
            self.consequent.join(", "),
            self.support
        )
    }
}

pub struct CanonicalBaseBuilder<'c, D: Derivation> {
    context: &'c D,
    strategy: Strategy,
    conditions: Conditions<D::Extent>,
}

impl<'c, D: Derivation> CanonicalBaseBuilder<'c, D> {
    pub fn new(context: &'c D) -> Self {
        Self {
            context,
            strategy: Strategy::default(),
            conditions: Conditions::none(),
        }
    }

    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn conditions(mut self, conditions: Conditions<D::Extent>) -> Self {
        self.conditions = conditions;
        self
    }

    /// Enumerate every concept and collect the implication base.
    #[tracing::instrument(
        skip(self),
        fields(strategy = ?self.strategy, attributes = self.context.attribute_count())
    )]
    pub fn run(self) -> Result<CanonicalBase<D::Extent>> {
        let (concepts, implications, stats) = match self.strategy {
            Strategy::NextClosure => {
                let mut enumerator = ClosureEnumerator::with_config(
                    self.context,
                    self.conditions,
                    EnumeratorConfig::canonical(),
                )?;
                let concepts = enumerator.collect_concepts()?;
                let stats = enumerator.stats().clone();
                (concepts, enumerator.into_implications(), stats)
            }
            Strategy::Relay => {
                let mut enumerator = RelayEnumerator::new(self.context, self.conditions)?;
                let concepts = enumerator.collect_concepts()?;
                let stats = enumerator.stats().clone();
                (concepts, enumerator.into_implications(), stats)
            }
        };
        tracing::debug!(
            concepts = concepts.len(),
            implications = implications.len(),
            derivations = stats.derivations,
            "canonical base built"
        );
        let labels = (0..self.context.attribute_count())
            .map(|m| self.context.attribute_label(m))
            .collect();
        Ok(CanonicalBase {
            concepts,
            implications,
            stats,
            labels,
        })
    }
}

/// Result of a [`CanonicalBaseBuilder`] run.
#[derive(Clone, Debug)]
pub struct CanonicalBase<E> {
    concepts: Vec<Concept<E>>,
    implications: Vec<Implication>,
    stats: EnumerationStats,
    labels: Vec<String>,
}

impl<E: Clone> CanonicalBase<E> {
    /// Concepts in lectic order of their intents.
    pub fn concepts(&self) -> &[Concept<E>] {
        &self.concepts
    }

    /// Implications in discovery order.
    pub fn implications(&self) -> &[Implication] {
        &self.implications
    }

    pub fn stats(&self) -> &EnumerationStats {
        &self.stats
    }

    /// Implications ordered by antecedent size, then by antecedent indices.
    pub fn sorted_implications(&self) -> Vec<Implication> {
        let mut sorted = self.implications.clone();
        sorted.sort_by(|a, b| {
            a.antecedent
                .len()
                .cmp(&b.antecedent.len())
                .then_with(|| a.antecedent.iter().cmp(b.antecedent.iter()))
                .then_with(|| a.consequent.iter().cmp(b.consequent.iter()))
        });
        sorted
    }

    /// The base in presentation order, with attribute labels.
    pub fn get_implications(&self) -> Vec<LabeledImplication> {
        self.sorted_implications()
            .into_iter()
            .map(|implication| LabeledImplication {
                antecedent: self.label_all(&implication.antecedent),
                consequent: self.label_all(&implication.consequent),
                support: implication.support,
            })
            .collect()
    }

    /// Covering graph of the enumerated concepts.
    pub fn lattice(&self) -> ConceptLattice<E> {
        LatticeAssembler::assemble_from(self.concepts.iter().cloned())
    }

    pub fn into_parts(self) -> (Vec<Concept<E>>, Vec<Implication>) {
        (self.concepts, self.implications)
    }

    fn label_all<'a>(&self, set: impl IntoIterator<Item = &'a usize>) -> Vec<String> {
        set.into_iter()
            .map(|&m| {
                self.labels
                    .get(m)
                    .cloned()
                    .unwrap_or_else(|| m.to_string())
            })
            .collect()
    }
}
