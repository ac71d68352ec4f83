//! Implications and the pre-closure operator.
//!
//! While the canonical base is being built, every pseudo-closed set found so
//! far contributes an implication `P → P''`. Closing a candidate under those
//! implications (the `L•` operator) is pure set work, much cheaper than a
//! derive call, and already tells the enumerator two things:
//!
//! - if the pre-closure adds an attribute below the generating index, the
//!   candidate is not canonical and the derive call is skipped
//! - otherwise the pre-closure is the next pseudo-closed candidate, and
//!   deriving it either confirms a concept or yields a new implication
//!
//! The state is owned by one enumerator and dropped with it; `reset` exists
//! for callers that want to reuse the allocation.

use std::collections::HashSet;

use crate::algebra::AttributeSet;

/// `antecedent → antecedent ∪ consequent`, with `consequent` disjoint from the
/// antecedent.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Implication {
    pub antecedent: AttributeSet,
    pub consequent: AttributeSet,
    /// Size of the extent the implication was read from.
    pub support: usize,
}

impl Implication {
    /// Implication from an antecedent and its closure. The stored consequent
    /// is `closure \ antecedent`.
    pub fn new(antecedent: AttributeSet, closure: &AttributeSet, support: usize) -> Self {
        let consequent = closure - &antecedent;
        Self {
            antecedent,
            consequent,
            support,
        }
    }

    /// `antecedent ∪ consequent`.
    pub fn conclusion(&self) -> AttributeSet {
        &self.antecedent | &self.consequent
    }

    /// Whether `set` respects the implication.
    pub fn holds_in(&self, set: &AttributeSet) -> bool {
        !self.antecedent.is_subset(set) || self.consequent.is_subset(set)
    }
}

/// Implications discovered so far, in discovery order, without duplicates.
#[derive(Clone, Debug, Default)]
pub struct PreClosure {
    implications: Vec<Implication>,
    seen: HashSet<(AttributeSet, AttributeSet)>,
}

impl PreClosure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `antecedent → closure`. Returns false if the same
    /// antecedent/consequent pair is already known.
    pub fn register_implication(
        &mut self,
        antecedent: AttributeSet,
        closure: &AttributeSet,
        support: usize,
    ) -> bool {
        let implication = Implication::new(antecedent, closure, support);
        let key = (
            implication.antecedent.clone(),
            implication.consequent.clone(),
        );
        if !self.seen.insert(key) {
            return false;
        }
        tracing::debug!(
            antecedent = ?implication.antecedent,
            consequent = ?implication.consequent,
            support,
            "implication registered"
        );
        self.implications.push(implication);
        true
    }

    /// Close `candidate` under every known implication.
    pub fn preclose(&self, candidate: AttributeSet) -> AttributeSet {
        saturate(&self.implications, candidate, |_| true).unwrap_or_default()
    }

    /// Like [`preclose`](Self::preclose), but gives up with `None` as soon as
    /// the growing set stops being `admissible`. Admissibility must be
    /// monotone (once lost, never regained by growing the set).
    pub fn preclose_pattern(
        &self,
        candidate: AttributeSet,
        admissible: impl Fn(&AttributeSet) -> bool,
    ) -> Option<AttributeSet> {
        saturate(&self.implications, candidate, admissible)
    }

    /// The accumulated implications, in discovery order.
    pub fn implication_base(&self) -> &[Implication] {
        &self.implications
    }

    pub fn into_implications(self) -> Vec<Implication> {
        self.implications
    }

    pub fn len(&self) -> usize {
        self.implications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.implications.is_empty()
    }

    pub fn reset(&mut self) {
        self.implications.clear();
        self.seen.clear();
    }
}

/// Smallest superset of `set` respecting every implication.
pub fn closure_under(implications: &[Implication], set: &AttributeSet) -> AttributeSet {
    saturate(implications, set.clone(), |_| true).unwrap_or_default()
}

/// Whether `implication` is a logical consequence of `implications`.
pub fn entails(implications: &[Implication], implication: &Implication) -> bool {
    implication
        .consequent
        .is_subset(&closure_under(implications, &implication.antecedent))
}

/// Whether two implication sets have the same consequences.
pub fn equivalent(a: &[Implication], b: &[Implication]) -> bool {
    a.iter().all(|i| entails(b, i)) && b.iter().all(|i| entails(a, i))
}

fn saturate(
    implications: &[Implication],
    mut set: AttributeSet,
    admissible: impl Fn(&AttributeSet) -> bool,
) -> Option<AttributeSet> {
    if !admissible(&set) {
        return None;
    }
    // An implication fires at most once; after that its consequent is in.
    let mut fired = vec![false; implications.len()];
    loop {
        let mut changed = false;
        for (implication, fired) in implications.iter().zip(fired.iter_mut()) {
            if *fired || !implication.antecedent.is_subset(&set) {
                continue;
            }
            *fired = true;
            if !implication.consequent.is_subset(&set) {
                set.extend(implication.consequent.iter().copied());
                changed = true;
                if !admissible(&set) {
                    return None;
                }
            }
        }
        if !changed {
            return Some(set);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[usize]) -> AttributeSet {
        items.iter().copied().collect()
    }

    #[test]
    fn test_register_deduplicates() {
        let mut pre = PreClosure::new();
        assert!(pre.register_implication(set(&[0]), &set(&[0, 1]), 2));
        assert!(!pre.register_implication(set(&[0]), &set(&[0, 1]), 5));
        assert!(pre.register_implication(set(&[0]), &set(&[0, 1, 2]), 1));
        assert_eq!(pre.len(), 2);
        assert_eq!(pre.implication_base()[0].consequent, set(&[1]));
    }

    #[test]
    fn test_preclose_chains_implications() {
        let mut pre = PreClosure::new();
        pre.register_implication(set(&[1]), &set(&[1, 2]), 1);
        pre.register_implication(set(&[0, 2]), &set(&[0, 2, 3]), 1);
        assert_eq!(pre.preclose(set(&[0, 1])), set(&[0, 1, 2, 3]));
        assert_eq!(pre.preclose(set(&[0])), set(&[0]));
    }

    #[test]
    fn test_preclose_pattern_exits_early() {
        let mut pre = PreClosure::new();
        pre.register_implication(set(&[0]), &set(&[0, 1, 2]), 1);
        assert_eq!(pre.preclose_pattern(set(&[0]), |s| s.len() <= 2), None);
        assert_eq!(pre.preclose_pattern(set(&[1]), |s| s.len() <= 2), Some(set(&[1])));
    }

    #[test]
    fn test_reset_clears_state() {
        let mut pre = PreClosure::new();
        pre.register_implication(set(&[0]), &set(&[0, 1]), 1);
        pre.reset();
        assert!(pre.is_empty());
        assert!(pre.register_implication(set(&[0]), &set(&[0, 1]), 1));
    }

    #[test]
    fn test_entailment() {
        let base = vec![
            Implication::new(set(&[0]), &set(&[0, 1]), 1),
            Implication::new(set(&[1]), &set(&[1, 2]), 1),
        ];
        assert!(entails(&base, &Implication::new(set(&[0]), &set(&[0, 2]), 0)));
        assert!(!entails(&base, &Implication::new(set(&[2]), &set(&[0, 2]), 0)));
        let merged = vec![
            Implication::new(set(&[0]), &set(&[0, 1, 2]), 1),
            Implication::new(set(&[1]), &set(&[1, 2]), 1),
        ];
        assert!(equivalent(&base, &merged));
        assert!(Implication::new(set(&[0]), &set(&[0, 1]), 1).holds_in(&set(&[2])));
    }
}
