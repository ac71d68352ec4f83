//! Restriction conditions on enumerated concepts.
//!
//! A condition is a predicate over `(support, extent, intent)`. Conditions
//! come in two flavours, and the enumerators treat them differently:
//!
//! - **pruning** conditions are anti-monotone along the enumeration: once a
//!   concept fails, every concept below it in the search tree (larger intent,
//!   smaller extent) fails too. A failing concept is not emitted and its
//!   branch is cut. `MinSupport`, `MaxIntentLength` and `Custom` predicates
//!   are pruning.
//! - **filtering** conditions only decide emission: `MaxSupport` gets
//!   *easier* to satisfy deeper in the tree, so the branch is still explored.
//!
//! `MaxIntentLength` depends on the intent alone, which lets the pre-closure
//! reject a candidate before any derive call.

use std::fmt;
use std::sync::Arc;

use crate::algebra::AttributeSet;
use crate::error::{FcaError, Result};

/// A user predicate over an extent and its intent.
pub type Predicate<E> = Arc<dyn Fn(&E, &AttributeSet) -> bool + Send + Sync>;

#[derive(Clone)]
pub enum Condition<E> {
    /// Support at least `k`.
    MinSupport(usize),
    /// Support at most `k`.
    MaxSupport(usize),
    /// Intent has at most `k` attributes.
    MaxIntentLength(usize),
    /// Named anti-monotone predicate.
    Custom { name: String, predicate: Predicate<E> },
}

impl<E> Condition<E> {
    pub fn custom(
        name: impl Into<String>,
        predicate: impl Fn(&E, &AttributeSet) -> bool + Send + Sync + 'static,
    ) -> Self {
        Condition::Custom {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Whether failing this condition cuts the branch.
    pub fn prunes(&self) -> bool {
        !matches!(self, Condition::MaxSupport(_))
    }

    pub fn admits(&self, support: usize, extent: &E, intent: &AttributeSet) -> bool {
        match self {
            Condition::MinSupport(k) => support >= *k,
            Condition::MaxSupport(k) => support <= *k,
            Condition::MaxIntentLength(k) => intent.len() <= *k,
            Condition::Custom { predicate, .. } => predicate(extent, intent),
        }
    }
}

impl<E> fmt::Debug for Condition<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::MinSupport(k) => write!(f, "MinSupport({k})"),
            Condition::MaxSupport(k) => write!(f, "MaxSupport({k})"),
            Condition::MaxIntentLength(k) => write!(f, "MaxIntentLength({k})"),
            Condition::Custom { name, .. } => write!(f, "Custom({name:?})"),
        }
    }
}

/// The conjunction of a list of conditions.
#[derive(Clone, Debug)]
pub struct Conditions<E> {
    conditions: Vec<Condition<E>>,
}

impl<E> Default for Conditions<E> {
    fn default() -> Self {
        Self {
            conditions: Vec::new(),
        }
    }
}

impl<E> Conditions<E> {
    /// No restriction.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with(mut self, condition: Condition<E>) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn min_support(self, k: usize) -> Self {
        self.with(Condition::MinSupport(k))
    }

    pub fn max_support(self, k: usize) -> Self {
        self.with(Condition::MaxSupport(k))
    }

    pub fn max_intent_length(self, k: usize) -> Self {
        self.with(Condition::MaxIntentLength(k))
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Condition<E>> {
        self.conditions.iter()
    }

    /// Reject malformed condition lists before any enumeration step.
    pub fn validate(&self) -> Result<()> {
        let mut lowest = 0;
        let mut highest = usize::MAX;
        for condition in &self.conditions {
            match condition {
                Condition::MinSupport(k) => lowest = lowest.max(*k),
                Condition::MaxSupport(k) => highest = highest.min(*k),
                Condition::Custom { name, .. } if name.trim().is_empty() => {
                    return Err(FcaError::ConfigurationError(
                        "custom condition needs a name".to_string(),
                    ));
                }
                _ => {}
            }
        }
        if lowest > highest {
            return Err(FcaError::ConfigurationError(format!(
                "support bounds are contradictory: at least {lowest} and at most {highest}"
            )));
        }
        Ok(())
    }

    /// Intent-only pruning check, usable before the extent is known.
    pub fn admits_intent(&self, intent: &AttributeSet) -> bool {
        self.conditions.iter().all(|c| match c {
            Condition::MaxIntentLength(k) => intent.len() <= *k,
            _ => true,
        })
    }

    /// Whether the branch rooted at this concept is worth exploring.
    pub fn admits_branch(&self, support: usize, extent: &E, intent: &AttributeSet) -> bool {
        self.conditions
            .iter()
            .filter(|c| c.prunes())
            .all(|c| c.admits(support, extent, intent))
    }

    /// Whether the concept itself is emitted.
    pub fn admits(&self, support: usize, extent: &E, intent: &AttributeSet) -> bool {
        self.conditions
            .iter()
            .all(|c| c.admits(support, extent, intent))
    }
}

impl<E> From<Vec<Condition<E>>> for Conditions<E> {
    fn from(conditions: Vec<Condition<E>>) -> Self {
        Self { conditions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[usize]) -> AttributeSet {
        items.iter().copied().collect()
    }

    #[test]
    fn test_contradictory_support_bounds() {
        let conditions: Conditions<()> = Conditions::none().min_support(5).max_support(3);
        assert!(matches!(
            conditions.validate(),
            Err(FcaError::ConfigurationError(_))
        ));
        assert!(Conditions::<()>::none().min_support(3).max_support(3).validate().is_ok());
    }

    #[test]
    fn test_unnamed_custom_condition() {
        let conditions = Conditions::none().with(Condition::custom("  ", |_: &(), _| true));
        assert!(conditions.validate().is_err());
    }

    #[test]
    fn test_max_support_only_filters() {
        let conditions: Conditions<()> = Conditions::none().max_support(2).min_support(1);
        assert!(conditions.admits_branch(5, &(), &set(&[])));
        assert!(!conditions.admits(5, &(), &set(&[])));
        assert!(!conditions.admits_branch(0, &(), &set(&[0])));
    }

    #[test]
    fn test_intent_length() {
        let conditions: Conditions<()> = Conditions::none().max_intent_length(2);
        assert!(conditions.admits_intent(&set(&[0, 3])));
        assert!(!conditions.admits_intent(&set(&[0, 1, 3])));
    }

    #[test]
    fn test_custom_predicate_sees_extent() {
        let conditions = Conditions::none().with(Condition::custom("even", |e: &usize, _| e % 2 == 0));
        assert!(conditions.admits(0, &4, &set(&[])));
        assert!(!conditions.admits_branch(0, &3, &set(&[])));
        assert_eq!(format!("{:?}", conditions.iter().next().unwrap()), "Custom(\"even\")");
    }
}
