//! Galois contexts: the relation between objects and descriptions.
//!
//! A context fixes an ordered attribute set `M = [0, n)` and gives every
//! attribute `m` a description `m'` in some extent algebra. The two derivation
//! operators
//!
//! ```text
//! extent(X) = ⋀ { m' : m ∈ X }          (top of the algebra for X = ∅)
//! intent(E) = { m : E ≤ m' }
//! ```
//!
//! form a Galois connection, and `closure(X) = intent(extent(X))` is the
//! closure operator every enumerator walks.
//!
//! # Binary contexts
//!
//! For an ordinary incidence relation the extent algebra is [`ObjectSets`]:
//! `m'` is the set of objects having `m`, the meet is intersection, and the
//! formulas above reduce to the textbook ones (`extent(X)` is the set of
//! objects having every attribute of `X`; `intent(E)` is the set of attributes
//! shared by every object of `E`).
//!
//! # Pattern structures
//!
//! For generalized descriptions (intervals, partitions, ...) the context is
//! read transposed: the enumerated indices are the described items and the
//! "extent" value is their common description. Closed index sets then
//! correspond one-to-one to pattern concepts.

use std::collections::BTreeSet;
use std::fmt::Debug;

use indexmap::IndexSet;
use roaring::RoaringBitmap;

use crate::algebra::{AttributeSet, ObjectSets, PatternAlgebra};
use crate::error::{FcaError, Result};

// ============================================================================
// Derivation capability
// ============================================================================

/// The derive-extent / derive-intent capability enumerators are built on.
///
/// [`GaloisContext`] is the standard implementation; anything else that
/// provides a Galois connection over `[0, attribute_count())` can be
/// enumerated the same way.
pub trait Derivation {
    /// Extent-side value (object set, common description, ...).
    type Extent: Clone + Debug;

    /// Number of attributes `n`; indices live in `[0, n)`.
    fn attribute_count(&self) -> usize;

    /// Human-readable name of an attribute.
    fn attribute_label(&self, index: usize) -> String {
        index.to_string()
    }

    /// Extent of an attribute set.
    fn derive_extent(&self, intent: &AttributeSet) -> Result<Self::Extent>;

    /// `extent ∧ derive_extent(added)`, without recomputing the part of the
    /// extent that is already known.
    fn restrict_extent(&self, extent: &Self::Extent, added: &AttributeSet) -> Result<Self::Extent>;

    /// Attributes shared by an extent.
    fn derive_intent(&self, extent: &Self::Extent) -> Result<AttributeSet>;

    /// Size of an extent, reported as the support of implications.
    fn support(&self, extent: &Self::Extent) -> usize;

    /// `derive_intent(derive_extent(intent))`.
    fn closure(&self, intent: &AttributeSet) -> Result<AttributeSet> {
        self.derive_intent(&self.derive_extent(intent)?)
    }
}

// ============================================================================
// Relation builder
// ============================================================================

/// A binary incidence relation with labelled objects and attributes.
///
/// Labels are interned in insertion order. Objects or attributes without any
/// incidence can be declared explicitly.
#[derive(Clone, Debug, Default)]
pub struct Relation {
    objects: IndexSet<String>,
    attributes: IndexSet<String>,
    incidences: BTreeSet<(usize, usize)>,
}

impl Relation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a relation from `(object, attribute)` pairs.
    pub fn from_pairs<G, M>(pairs: impl IntoIterator<Item = (G, M)>) -> Self
    where
        G: Into<String>,
        M: Into<String>,
    {
        let mut relation = Self::new();
        for (g, m) in pairs {
            relation.insert(g, m);
        }
        relation
    }

    /// Declare an object, returning its index.
    pub fn add_object(&mut self, label: impl Into<String>) -> usize {
        self.objects.insert_full(label.into()).0
    }

    /// Declare an attribute, returning its index.
    pub fn add_attribute(&mut self, label: impl Into<String>) -> usize {
        self.attributes.insert_full(label.into()).0
    }

    /// Record that `object` has `attribute`. Returns false if already present.
    pub fn insert(&mut self, object: impl Into<String>, attribute: impl Into<String>) -> bool {
        let g = self.add_object(object);
        let m = self.add_attribute(attribute);
        self.incidences.insert((g, m))
    }

    pub fn objects(&self) -> &IndexSet<String> {
        &self.objects
    }

    pub fn attributes(&self) -> &IndexSet<String> {
        &self.attributes
    }

    /// `(object index, attribute index)` pairs in ascending order.
    pub fn incidences(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.incidences.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.incidences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.incidences.is_empty()
    }

    /// Swap the roles of objects and attributes.
    pub fn transpose(&self) -> Relation {
        Relation {
            objects: self.attributes.clone(),
            attributes: self.objects.clone(),
            incidences: self.incidences.iter().map(|&(g, m)| (m, g)).collect(),
        }
    }
}

// ============================================================================
// GaloisContext
// ============================================================================

/// An immutable context: ordered, labelled attributes with descriptions in
/// the extent algebra `A`.
#[derive(Clone, Debug)]
pub struct GaloisContext<A: PatternAlgebra> {
    algebra: A,
    attributes: IndexSet<String>,
    descriptions: Vec<A::Pattern>,
    objects: IndexSet<String>,
}

impl<A: PatternAlgebra> GaloisContext<A> {
    /// Context over explicit attribute descriptions, in the given order.
    ///
    /// Fails with `ConfigurationError` on duplicate labels and with
    /// `InvalidPattern` when a description lies outside the algebra's domain.
    pub fn from_descriptions<L: Into<String>>(
        algebra: A,
        descriptions: impl IntoIterator<Item = (L, A::Pattern)>,
    ) -> Result<Self> {
        let mut attributes = IndexSet::new();
        let mut patterns = Vec::new();
        for (label, description) in descriptions {
            let label = label.into();
            if !algebra.contains(&description) {
                return Err(FcaError::InvalidPattern(format!(
                    "description of `{label}` lies outside {algebra:?}: {description:?}"
                )));
            }
            if !attributes.insert(label.clone()) {
                return Err(FcaError::ConfigurationError(format!(
                    "duplicate attribute label `{label}`"
                )));
            }
            patterns.push(description);
        }
        Ok(Self {
            algebra,
            attributes,
            descriptions: patterns,
            objects: IndexSet::new(),
        })
    }

    pub fn algebra(&self) -> &A {
        &self.algebra
    }

    /// Attribute labels in attribute order.
    pub fn attribute_labels(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(String::as_str)
    }

    pub fn attribute_index(&self, label: &str) -> Option<usize> {
        self.attributes.get_index_of(label)
    }

    /// Description `m'` of attribute `m`.
    pub fn m_prime(&self, m: usize) -> Option<&A::Pattern> {
        self.descriptions.get(m)
    }

    /// Attribute set named by labels.
    pub fn intent_of<S: AsRef<str>>(&self, labels: &[S]) -> Result<AttributeSet> {
        labels
            .iter()
            .map(|label| {
                let label = label.as_ref();
                self.attribute_index(label)
                    .ok_or_else(|| FcaError::InvalidPattern(format!("unknown attribute `{label}`")))
            })
            .collect()
    }

    /// Labels of an attribute set, in attribute order.
    pub fn labels_of(&self, intent: &AttributeSet) -> Vec<String> {
        intent.iter().map(|&m| self.attribute_label(m)).collect()
    }

    fn check_intent(&self, intent: &AttributeSet) -> Result<()> {
        match intent.last() {
            Some(&m) if m >= self.descriptions.len() => Err(FcaError::InvalidPattern(format!(
                "attribute index {m} out of range for {} attributes",
                self.descriptions.len()
            ))),
            _ => Ok(()),
        }
    }
}

impl<A: PatternAlgebra> Derivation for GaloisContext<A> {
    type Extent = A::Pattern;

    fn attribute_count(&self) -> usize {
        self.descriptions.len()
    }

    fn attribute_label(&self, index: usize) -> String {
        self.attributes
            .get_index(index)
            .cloned()
            .unwrap_or_else(|| index.to_string())
    }

    fn derive_extent(&self, intent: &AttributeSet) -> Result<A::Pattern> {
        self.check_intent(intent)?;
        self.algebra
            .meet_all(intent.iter().map(|&m| &self.descriptions[m]))
            .ok_or_else(|| {
                FcaError::InvalidPattern(format!(
                    "{:?} has no top, so the empty intent has no extent",
                    self.algebra
                ))
            })
    }

    fn restrict_extent(&self, extent: &A::Pattern, added: &AttributeSet) -> Result<A::Pattern> {
        self.check_intent(added)?;
        Ok(added.iter().fold(extent.clone(), |acc, &m| {
            self.algebra.intersection(&acc, &self.descriptions[m])
        }))
    }

    fn derive_intent(&self, extent: &A::Pattern) -> Result<AttributeSet> {
        if !self.algebra.contains(extent) {
            return Err(FcaError::InvalidPattern(format!(
                "extent {extent:?} lies outside {:?}",
                self.algebra
            )));
        }
        Ok(self
            .descriptions
            .iter()
            .enumerate()
            .filter(|(_, description)| self.algebra.leq(extent, description))
            .map(|(m, _)| m)
            .collect())
    }

    fn support(&self, extent: &A::Pattern) -> usize {
        self.algebra.length(extent)
    }
}

// ============================================================================
// Binary contexts
// ============================================================================

impl GaloisContext<ObjectSets> {
    /// Binary context from an incidence relation.
    ///
    /// - `attribute_order`: the attribute order defining the lectic order;
    ///   `None` keeps the relation's insertion order. It must list every
    ///   attribute of the relation exactly once.
    /// - `transposed`: the relation's pairs are `(attribute, object)`. The
    ///   context is still built in object × attribute orientation.
    pub fn from_relation(
        relation: &Relation,
        attribute_order: Option<&[&str]>,
        transposed: bool,
    ) -> Result<Self> {
        let (objects, attributes) = if transposed {
            (relation.attributes(), relation.objects())
        } else {
            (relation.objects(), relation.attributes())
        };

        // position[m] = place of relation attribute m in the context order
        let position: Vec<usize> = match attribute_order {
            None => (0..attributes.len()).collect(),
            Some(order) => {
                if order.len() != attributes.len() {
                    return Err(FcaError::ConfigurationError(format!(
                        "attribute order names {} attributes but the relation has {}",
                        order.len(),
                        attributes.len()
                    )));
                }
                let mut position = vec![usize::MAX; attributes.len()];
                for (place, label) in order.iter().enumerate() {
                    let m = attributes.get_index_of(*label).ok_or_else(|| {
                        FcaError::ConfigurationError(format!(
                            "attribute order names `{label}`, which is not in the relation"
                        ))
                    })?;
                    if position[m] != usize::MAX {
                        return Err(FcaError::ConfigurationError(format!(
                            "attribute order names `{label}` twice"
                        )));
                    }
                    position[m] = place;
                }
                position
            }
        };

        let object_count = u32::try_from(objects.len()).map_err(|_| {
            FcaError::ConfigurationError(format!("{} objects exceed the u32 range", objects.len()))
        })?;

        let mut labels = vec![String::new(); attributes.len()];
        for (m, label) in attributes.iter().enumerate() {
            labels[position[m]] = label.clone();
        }
        let mut descriptions = vec![RoaringBitmap::new(); attributes.len()];
        for (a, b) in relation.incidences() {
            let (g, m) = if transposed { (b, a) } else { (a, b) };
            // g < objects.len() <= u32::MAX was checked above
            descriptions[position[m]].insert(g as u32);
        }

        Ok(Self {
            algebra: ObjectSets::new(object_count),
            attributes: labels.into_iter().collect(),
            descriptions,
            objects: objects.clone(),
        })
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn object_label(&self, g: u32) -> Option<&str> {
        self.objects.get_index(g as usize).map(String::as_str)
    }

    pub fn object_index(&self, label: &str) -> Option<u32> {
        self.objects.get_index_of(label).map(|g| g as u32)
    }

    /// Attributes of object `g`.
    pub fn g_prime(&self, g: u32) -> AttributeSet {
        self.descriptions
            .iter()
            .enumerate()
            .filter(|(_, objects)| objects.contains(g))
            .map(|(m, _)| m)
            .collect()
    }

    /// Labels of an object set, in object order.
    pub fn object_labels_of(&self, extent: &RoaringBitmap) -> Vec<String> {
        extent
            .iter()
            .filter_map(|g| self.object_label(g).map(str::to_string))
            .collect()
    }
}
