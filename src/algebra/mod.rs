//! Pattern algebras: the description domains concepts are computed over.
//!
//! A pattern algebra is a meet-semilattice of descriptions with a few extra
//! operations (join, difference, length). The enumeration engine never looks
//! inside a pattern; everything it needs goes through [`PatternAlgebra`].
//!
//! # Reference algebras
//!
//! - [`AttributeSets`]: finite sets of attribute indices (the intent side of
//!   every enumeration)
//! - [`ObjectSets`]: Roaring-backed object sets, the extent algebra of binary
//!   contexts
//! - [`ThresholdIntervals`]: interval vectors whose similarity collapses to a
//!   bottom sentinel once an interval gets wider than θ
//! - [`Partitions`]: set partitions ordered by refinement; used transposed
//!   they describe functional dependencies
//!
//! # Configuration
//!
//! Every parameter an algebra needs (universe size, threshold, number of
//! dimensions) is a field of the algebra *value*. All operations take
//! `&self` and are pure, so two runs with differently configured instances of
//! the same algebra type never see each other's settings.

use std::cmp::Ordering;
use std::fmt::Debug;

pub mod interval;
pub mod partition;
pub mod sets;

pub use interval::{IntervalPattern, ThresholdIntervals};
pub use partition::{Partition, Partitions};
pub use sets::{lectic_cmp, AttributeSet, AttributeSets, ObjectSets};

/// The algebraic contract every description type satisfies.
///
/// Laws (not checked at runtime):
/// - `join` and `intersection` are associative, commutative and idempotent
/// - `bottom()` is the identity of `join`
/// - `top()`, when defined, is the identity of `intersection`
/// - `order(a, b)` agrees with the meet: `a ≤ b` iff `intersection(a, b) == a`
pub trait PatternAlgebra: Clone + Debug {
    /// The description values this algebra operates on.
    type Pattern: Clone + Debug + PartialEq;

    /// The least pattern (no information).
    fn bottom(&self) -> Self::Pattern;

    /// The greatest pattern, if the algebra has one.
    fn top(&self) -> Option<Self::Pattern>;

    /// Least upper bound.
    fn join(&self, a: &Self::Pattern, b: &Self::Pattern) -> Self::Pattern;

    /// Greatest lower bound (similarity).
    fn intersection(&self, a: &Self::Pattern, b: &Self::Pattern) -> Self::Pattern;

    /// Cardinality-like size, used for support and tie-breaking.
    fn length(&self, a: &Self::Pattern) -> usize;

    /// Whether `a` belongs to this algebra's domain.
    fn contains(&self, _a: &Self::Pattern) -> bool {
        true
    }

    /// The part of `a` not derivable from `b`.
    ///
    /// The default is all-or-nothing: bottom when `b` already entails `a`,
    /// `a` itself otherwise. Set-like algebras override it with the proper
    /// element-wise difference.
    fn difference(&self, a: &Self::Pattern, b: &Self::Pattern) -> Self::Pattern {
        if self.leq(a, b) {
            self.bottom()
        } else {
            a.clone()
        }
    }

    /// Partial order; `None` means incomparable.
    ///
    /// Derived from the meet by default.
    fn order(&self, a: &Self::Pattern, b: &Self::Pattern) -> Option<Ordering> {
        let meet = self.intersection(a, b);
        match (meet == *a, meet == *b) {
            (true, true) => Some(Ordering::Equal),
            (true, false) => Some(Ordering::Less),
            (false, true) => Some(Ordering::Greater),
            (false, false) => None,
        }
    }

    /// `a ≤ b` in the algebra's order.
    fn leq(&self, a: &Self::Pattern, b: &Self::Pattern) -> bool {
        matches!(self.order(a, b), Some(Ordering::Less | Ordering::Equal))
    }

    /// Meet of a sequence of patterns; `top()` for an empty sequence.
    fn meet_all<'p, I>(&self, patterns: I) -> Option<Self::Pattern>
    where
        I: IntoIterator<Item = &'p Self::Pattern>,
        Self::Pattern: 'p,
    {
        let mut iter = patterns.into_iter();
        match iter.next() {
            None => self.top(),
            Some(first) => Some(iter.fold(first.clone(), |acc, p| self.intersection(&acc, p))),
        }
    }
}
