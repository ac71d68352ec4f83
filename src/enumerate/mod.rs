//! Concept enumeration in lectic order.
//!
//! Two enumerators share the types in this module:
//!
//! - [`ClosureEnumerator`]: depth-first Next-Closure over a stack of frames.
//!   With the pre-closure enabled it also builds the canonical implication
//!   base and jumps straight to closures that cannot hide a smaller
//!   successor.
//! - [`RelayEnumerator`]: the iterative "enhanced" Next-Closure that walks
//!   every pseudo-closed set from a pivot downwards, peeling attributes as it
//!   goes. It always builds the implication base.
//!
//! Both are iterators of `Result<Concept<_>>`. Dropping one cancels it; any
//! error finishes it.

use std::fmt::Debug;

use crate::algebra::AttributeSet;
use crate::error::{FcaError, Result};

pub mod next_closure;
pub mod relay;

pub use next_closure::ClosureEnumerator;
pub use relay::RelayEnumerator;

/// A closed intent together with its extent.
#[derive(Clone, Debug, PartialEq)]
pub struct Concept<E> {
    pub extent: E,
    pub intent: AttributeSet,
}

/// Knobs of a single enumeration run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnumeratorConfig {
    /// Pre-close candidates under the implications found so far, register
    /// new implications and take closure jumps.
    pub preclosure: bool,
    /// Stop after this many emitted concepts.
    pub max_concepts: Option<usize>,
}

impl EnumeratorConfig {
    /// Plain Next-Closure.
    pub fn plain() -> Self {
        Self::default()
    }

    /// Next-Closure that builds the canonical base along the way.
    pub fn canonical() -> Self {
        Self {
            preclosure: true,
            max_concepts: None,
        }
    }

    pub fn with_max_concepts(mut self, max: usize) -> Self {
        self.max_concepts = Some(max);
        self
    }
}

/// Counters collected during a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnumerationStats {
    /// Attribute indices tried as extensions.
    pub candidates: usize,
    /// Pre-closures computed.
    pub preclosures: usize,
    /// Extent/intent derivations.
    pub derivations: usize,
    /// Closures rejected by the canonicity test after a derive call.
    pub non_canonical: usize,
    /// Candidates rejected from the pre-closure alone.
    pub preclosure_shortcuts: usize,
    /// Concepts or branches cut by a condition.
    pub pruned: usize,
    /// Closure jumps taken from a pseudo-closed candidate.
    pub jumps: usize,
    /// Implications registered.
    pub implications: usize,
    /// Concepts emitted.
    pub concepts: usize,
}

/// One level of the depth-first search.
#[derive(Clone, Debug)]
pub(crate) struct Frame<E> {
    pub extent: E,
    pub intent: AttributeSet,
    /// Indices in `[floor, pointer)` are still to be tried, highest first.
    pub pointer: usize,
    /// One past the index that generated this frame.
    pub floor: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RunState {
    Start,
    Running,
    Done,
}

/// A closure must contain what it closes.
pub(crate) fn ensure_extensive<E: Debug>(
    pattern: &AttributeSet,
    candidate: &AttributeSet,
    closure: &AttributeSet,
    extent: &E,
) -> Result<()> {
    if candidate.is_subset(closure) {
        return Ok(());
    }
    let missing: AttributeSet = candidate - closure;
    tracing::warn!(
        ?pattern,
        ?candidate,
        ?closure,
        ?extent,
        "closure lost attributes of its candidate"
    );
    Err(FcaError::AlgebraInvariantViolation {
        message: format!("closure is not extensive, attributes {missing:?} were dropped"),
        pattern: format!("{pattern:?}"),
        candidate: format!("{candidate:?}"),
        closure: format!("{closure:?}"),
        extent: format!("{extent:?}"),
    })
}
