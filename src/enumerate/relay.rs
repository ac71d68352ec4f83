//! Relay enumeration: Next-Closure driven from a pivot.
//!
//! Walks every set closed under the implications found so far (intents and
//! pseudo-intents alike) in lectic order, holding a single working `pattern`
//! and the `pivot` index that produced it:
//!
//! ```text
//! process(pattern):
//!     closed := pattern''
//!     if closed ≠ pattern: register pattern → closed
//!     if closed \ pattern has nothing below pivot:
//!         pattern := closed; pivot := n - 1; emit
//!     else:
//!         pattern := pattern ∩ [0, pivot]
//!
//! successor:
//!     for j := pivot down to 0:
//!         if j ∈ pattern: peel j off and go on
//!         B := L•(pattern ∪ {j})
//!         if B \ pattern has nothing below j: pattern := B; pivot := j; stop
//! ```
//!
//! The run ends once the pattern holds every attribute. Conditions only
//! filter what is emitted: the walk itself always covers the whole lattice,
//! so the implications gathered form the unrestricted canonical base.

use tracing::{debug, trace, warn};

use super::{ensure_extensive, Concept, EnumerationStats, RunState};
use crate::algebra::sets::reaches_below;
use crate::algebra::AttributeSet;
use crate::condition::Conditions;
use crate::context::Derivation;
use crate::error::{FcaError, Result};
use crate::preclosure::{Implication, PreClosure};

pub struct RelayEnumerator<'c, D: Derivation> {
    context: &'c D,
    conditions: Conditions<D::Extent>,
    preclosure: PreClosure,
    pattern: AttributeSet,
    pivot: usize,
    state: RunState,
    stats: EnumerationStats,
}

impl<'c, D: Derivation> RelayEnumerator<'c, D> {
    pub fn new(context: &'c D, conditions: Conditions<D::Extent>) -> Result<Self> {
        conditions.validate()?;
        Ok(Self {
            context,
            conditions,
            preclosure: PreClosure::new(),
            pattern: AttributeSet::new(),
            pivot: context.attribute_count().saturating_sub(1),
            state: RunState::Start,
            stats: EnumerationStats::default(),
        })
    }

    pub fn stats(&self) -> &EnumerationStats {
        &self.stats
    }

    pub fn preclosure(&self) -> &PreClosure {
        &self.preclosure
    }

    pub fn into_implications(self) -> Vec<Implication> {
        self.preclosure.into_implications()
    }

    pub fn collect_concepts(&mut self) -> Result<Vec<Concept<D::Extent>>> {
        self.by_ref().collect()
    }

    fn advance(&mut self) -> Result<Option<Concept<D::Extent>>> {
        if self.state == RunState::Start {
            self.state = RunState::Running;
            if let Some(concept) = self.process()? {
                return Ok(Some(concept));
            }
        }
        let n = self.context.attribute_count();
        while self.pattern.len() < n {
            self.successor()?;
            if let Some(concept) = self.process()? {
                return Ok(Some(concept));
            }
        }
        Ok(None)
    }

    /// Close the current pattern and decide where the walk goes next.
    fn process(&mut self) -> Result<Option<Concept<D::Extent>>> {
        let extent = self.context.derive_extent(&self.pattern)?;
        let closed = self.context.derive_intent(&extent)?;
        self.stats.derivations += 1;
        ensure_extensive(&self.pattern, &self.pattern, &closed, &extent)?;
        let support = self.context.support(&extent);

        let pseudo_closed = closed.len() != self.pattern.len();
        if pseudo_closed
            && self
                .preclosure
                .register_implication(self.pattern.clone(), &closed, support)
        {
            self.stats.implications += 1;
        }

        if reaches_below(&(&closed - &self.pattern), self.pivot) {
            trace!(pivot = self.pivot, pattern = ?self.pattern, "pseudo-closed leaf");
            let pivot = self.pivot;
            self.pattern.retain(|&m| m <= pivot);
            return Ok(None);
        }

        if pseudo_closed {
            self.stats.jumps += 1;
        }
        self.pattern = closed;
        self.pivot = self.context.attribute_count().saturating_sub(1);
        if self.conditions.admits(support, &extent, &self.pattern) {
            Ok(Some(Concept {
                extent,
                intent: self.pattern.clone(),
            }))
        } else {
            self.stats.pruned += 1;
            Ok(None)
        }
    }

    /// Move to the lectically next set closed under the known implications.
    fn successor(&mut self) -> Result<()> {
        for j in (0..=self.pivot).rev() {
            if self.pattern.remove(&j) {
                continue;
            }
            self.stats.candidates += 1;
            let mut seed = self.pattern.clone();
            seed.insert(j);
            self.stats.preclosures += 1;
            let candidate = self.preclosure.preclose(seed);
            if reaches_below(&(&candidate - &self.pattern), j) {
                self.stats.preclosure_shortcuts += 1;
                continue;
            }
            self.pattern = candidate;
            self.pivot = j;
            return Ok(());
        }
        // A closure operator always has a lectic successor below the full set.
        warn!(pivot = self.pivot, "no lectic successor found");
        Err(FcaError::AlgebraInvariantViolation {
            message: "no lectic successor below the full attribute set".to_string(),
            pattern: format!("{:?}", self.pattern),
            candidate: String::new(),
            closure: String::new(),
            extent: String::new(),
        })
    }
}

impl<D: Derivation> Iterator for RelayEnumerator<'_, D> {
    type Item = Result<Concept<D::Extent>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == RunState::Done {
            return None;
        }
        match self.advance() {
            Ok(Some(concept)) => {
                self.stats.concepts += 1;
                Some(Ok(concept))
            }
            Ok(None) => {
                self.state = RunState::Done;
                debug!(stats = ?self.stats, "relay enumeration finished");
                None
            }
            Err(err) => {
                self.state = RunState::Done;
                Some(Err(err))
            }
        }
    }
}
