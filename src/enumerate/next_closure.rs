//! Depth-first Next-Closure.
//!
//! The closed sets of a context form a tree: every closed set `B` other than
//! the root `∅''` has exactly one parent `A` and generator `j` such that
//!
//! ```text
//! B = (A ∪ {j})''     j ∉ A,  j > generator(A),  (B \ A) ∩ [0, j) = ∅
//! ```
//!
//! Visiting that tree in preorder, trying the highest generator first, lists
//! the closed sets in strict lectic order. The enumerator keeps one frame
//! per tree level and resumes the scan of the top frame on every `next()`.
//!
//! # Pre-closure mode
//!
//! With [`EnumeratorConfig::preclosure`] the candidate for `j` is
//! `L•(A ∪ {j})`, the closure under the implications found so far:
//!
//! 1. if `L•` already adds an attribute below `j`, reject without deriving
//! 2. derive the extent of the candidate and its closure
//! 3. if the closure is larger, the candidate is pseudo-closed: register
//!    `candidate → closure`, then either jump to the closure (nothing new
//!    below `j`) or stop, since every extension of the candidate would reach
//!    below `j` as well
//!
//! The implications registered over a complete run form the canonical base.

use tracing::{debug, trace};

use super::{
    ensure_extensive, Concept, EnumerationStats, EnumeratorConfig, Frame, RunState,
};
use crate::algebra::sets::reaches_below;
use crate::algebra::AttributeSet;
use crate::condition::Conditions;
use crate::context::Derivation;
use crate::error::Result;
use crate::preclosure::{Implication, PreClosure};

/// Outcome of trying one generator on the top frame.
enum Step<E> {
    Skip,
    Push { frame: Frame<E>, emit: bool },
}

/// Lazy enumerator of the concepts of a context, in lectic order of intents.
pub struct ClosureEnumerator<'c, D: Derivation> {
    context: &'c D,
    conditions: Conditions<D::Extent>,
    config: EnumeratorConfig,
    preclosure: PreClosure,
    stack: Vec<Frame<D::Extent>>,
    state: RunState,
    stats: EnumerationStats,
}

impl<'c, D: Derivation> ClosureEnumerator<'c, D> {
    /// Plain enumerator. Fails with `ConfigurationError` on malformed
    /// conditions.
    pub fn new(context: &'c D, conditions: Conditions<D::Extent>) -> Result<Self> {
        Self::with_config(context, conditions, EnumeratorConfig::default())
    }

    pub fn with_config(
        context: &'c D,
        conditions: Conditions<D::Extent>,
        config: EnumeratorConfig,
    ) -> Result<Self> {
        conditions.validate()?;
        Ok(Self {
            context,
            conditions,
            config,
            preclosure: PreClosure::new(),
            stack: Vec::new(),
            state: RunState::Start,
            stats: EnumerationStats::default(),
        })
    }

    pub fn context(&self) -> &'c D {
        self.context
    }

    pub fn stats(&self) -> &EnumerationStats {
        &self.stats
    }

    /// Implications registered so far (pre-closure mode only).
    pub fn preclosure(&self) -> &PreClosure {
        &self.preclosure
    }

    pub fn into_implications(self) -> Vec<Implication> {
        self.preclosure.into_implications()
    }

    /// Run to completion and return every remaining concept.
    pub fn collect_concepts(&mut self) -> Result<Vec<Concept<D::Extent>>> {
        self.by_ref().collect()
    }

    fn advance(&mut self) -> Result<Option<Concept<D::Extent>>> {
        if self.state == RunState::Start {
            self.state = RunState::Running;
            if let Some(root) = self.root()? {
                return Ok(Some(root));
            }
        }
        let n = self.context.attribute_count();
        loop {
            let Some(top) = self.stack.last_mut() else {
                return Ok(None);
            };
            if top.pointer <= top.floor {
                self.stack.pop();
                continue;
            }
            top.pointer -= 1;
            let j = top.pointer;
            if top.intent.contains(&j) {
                continue;
            }
            self.stats.candidates += 1;
            let step = if self.config.preclosure {
                self.canonical_step(j)?
            } else {
                self.plain_step(j)?
            };
            if let Step::Push { mut frame, emit } = step {
                frame.pointer = n;
                frame.floor = j + 1;
                let concept = emit.then(|| Concept {
                    extent: frame.extent.clone(),
                    intent: frame.intent.clone(),
                });
                self.stack.push(frame);
                if concept.is_some() {
                    return Ok(concept);
                }
            }
        }
    }

    /// `∅''`, pushed as the bottom frame. Its generator sits below every
    /// index, so a closure jump is always allowed.
    fn root(&mut self) -> Result<Option<Concept<D::Extent>>> {
        let empty = AttributeSet::new();
        let extent = self.context.derive_extent(&empty)?;
        let intent = self.context.derive_intent(&extent)?;
        self.stats.derivations += 1;
        let support = self.context.support(&extent);

        if self.config.preclosure && !intent.is_empty() {
            if self.preclosure.register_implication(empty, &intent, support) {
                self.stats.implications += 1;
            }
            self.stats.jumps += 1;
        }
        if !self.conditions.admits_intent(&intent)
            || !self.conditions.admits_branch(support, &extent, &intent)
        {
            self.stats.pruned += 1;
            return Ok(None);
        }
        let emit = self.conditions.admits(support, &extent, &intent);
        let concept = emit.then(|| Concept {
            extent: extent.clone(),
            intent: intent.clone(),
        });
        self.stack.push(Frame {
            extent,
            intent,
            pointer: self.context.attribute_count(),
            floor: 0,
        });
        Ok(concept)
    }

    fn plain_step(&mut self, j: usize) -> Result<Step<D::Extent>> {
        let Some(parent) = self.stack.last() else {
            return Ok(Step::Skip);
        };
        let mut candidate = parent.intent.clone();
        candidate.insert(j);
        if !self.conditions.admits_intent(&candidate) {
            self.stats.pruned += 1;
            return Ok(Step::Skip);
        }

        let extent = self
            .context
            .restrict_extent(&parent.extent, &AttributeSet::from([j]))?;
        let closed = self.context.derive_intent(&extent)?;
        self.stats.derivations += 1;
        ensure_extensive(&parent.intent, &candidate, &closed, &extent)?;

        if reaches_below(&(&closed - &parent.intent), j) {
            trace!(j, ?closed, "not canonical");
            self.stats.non_canonical += 1;
            return Ok(Step::Skip);
        }
        Ok(self.admit(extent, closed))
    }

    fn canonical_step(&mut self, j: usize) -> Result<Step<D::Extent>> {
        let Some(parent) = self.stack.last() else {
            return Ok(Step::Skip);
        };
        let mut seed = parent.intent.clone();
        seed.insert(j);
        self.stats.preclosures += 1;
        let conditions = &self.conditions;
        let Some(candidate) = self
            .preclosure
            .preclose_pattern(seed, |s| conditions.admits_intent(s))
        else {
            trace!(j, "pre-closure left the admissible region");
            self.stats.pruned += 1;
            return Ok(Step::Skip);
        };

        let added = &candidate - &parent.intent;
        if reaches_below(&added, j) {
            trace!(j, ?candidate, "pre-closure is not canonical");
            self.stats.preclosure_shortcuts += 1;
            return Ok(Step::Skip);
        }

        let extent = self.context.restrict_extent(&parent.extent, &added)?;
        let closed = self.context.derive_intent(&extent)?;
        self.stats.derivations += 1;
        ensure_extensive(&parent.intent, &candidate, &closed, &extent)?;

        if closed.len() == candidate.len() {
            return Ok(self.admit(extent, candidate));
        }

        let support = self.context.support(&extent);
        let jumped = &closed - &candidate;
        if self
            .preclosure
            .register_implication(candidate, &closed, support)
        {
            self.stats.implications += 1;
        }
        if reaches_below(&jumped, j) {
            trace!(j, ?closed, "pseudo-closed leaf");
            self.stats.non_canonical += 1;
            return Ok(Step::Skip);
        }
        self.stats.jumps += 1;
        Ok(self.admit(extent, closed))
    }

    /// Apply conditions to a canonical closed set.
    fn admit(&mut self, extent: D::Extent, intent: AttributeSet) -> Step<D::Extent> {
        let support = self.context.support(&extent);
        if !self.conditions.admits_branch(support, &extent, &intent) {
            trace!(?intent, support, "branch pruned");
            self.stats.pruned += 1;
            return Step::Skip;
        }
        let emit = self.conditions.admits(support, &extent, &intent);
        if !emit {
            self.stats.pruned += 1;
        }
        Step::Push {
            frame: Frame {
                extent,
                intent,
                pointer: 0,
                floor: 0,
            },
            emit,
        }
    }
}

impl<D: Derivation> Iterator for ClosureEnumerator<'_, D> {
    type Item = Result<Concept<D::Extent>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == RunState::Done {
            return None;
        }
        if self
            .config
            .max_concepts
            .is_some_and(|max| self.stats.concepts >= max)
        {
            self.state = RunState::Done;
            return None;
        }
        match self.advance() {
            Ok(Some(concept)) => {
                self.stats.concepts += 1;
                Some(Ok(concept))
            }
            Ok(None) => {
                self.state = RunState::Done;
                debug!(stats = ?self.stats, "enumeration finished");
                None
            }
            Err(err) => {
                self.state = RunState::Done;
                self.stack.clear();
                Some(Err(err))
            }
        }
    }
}
