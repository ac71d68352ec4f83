//! Set algebras: attribute sets (intents) and object sets (binary extents).

use std::cmp::Ordering;
use std::collections::BTreeSet;

use roaring::RoaringBitmap;

use super::PatternAlgebra;

/// A set of attribute indices. Iteration is ascending, which is the order the
/// lectic comparison and the canonicity test rely on.
pub type AttributeSet = BTreeSet<usize>;

// ============================================================================
// Attribute sets
// ============================================================================

/// Subsets of `[0, attributes)` under union and intersection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeSets {
    attributes: usize,
}

impl AttributeSets {
    pub fn new(attributes: usize) -> Self {
        Self { attributes }
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes
    }

    /// The singleton `{index}`: attribute `index` viewed as a pattern.
    pub fn atom(&self, index: usize) -> AttributeSet {
        BTreeSet::from([index])
    }

    /// Every attribute.
    pub fn full(&self) -> AttributeSet {
        (0..self.attributes).collect()
    }
}

impl PatternAlgebra for AttributeSets {
    type Pattern = AttributeSet;

    fn bottom(&self) -> AttributeSet {
        AttributeSet::new()
    }

    fn top(&self) -> Option<AttributeSet> {
        Some(self.full())
    }

    fn join(&self, a: &AttributeSet, b: &AttributeSet) -> AttributeSet {
        a | b
    }

    fn intersection(&self, a: &AttributeSet, b: &AttributeSet) -> AttributeSet {
        a & b
    }

    fn difference(&self, a: &AttributeSet, b: &AttributeSet) -> AttributeSet {
        a - b
    }

    fn order(&self, a: &AttributeSet, b: &AttributeSet) -> Option<Ordering> {
        subset_order(a.len(), b.len(), a.is_subset(b), b.is_subset(a))
    }

    fn length(&self, a: &AttributeSet) -> usize {
        a.len()
    }

    fn contains(&self, a: &AttributeSet) -> bool {
        a.last().map_or(true, |&m| m < self.attributes)
    }
}

/// True when `added` has an element strictly below `bound`.
///
/// This is the canonicity test: a closure that introduces an attribute
/// smaller than the generating index "reaches back" and was already
/// produced earlier in lectic order.
pub fn reaches_below(added: &AttributeSet, bound: usize) -> bool {
    added.range(..bound).next().is_some()
}

/// Lectic order on attribute sets.
///
/// `a < b` iff the smallest attribute on which they differ belongs to `b`.
/// Attribute 0 is the most significant position.
pub fn lectic_cmp(a: &AttributeSet, b: &AttributeSet) -> Ordering {
    match a.symmetric_difference(b).next() {
        None => Ordering::Equal,
        Some(m) if b.contains(m) => Ordering::Less,
        Some(_) => Ordering::Greater,
    }
}

/// Whether a sequence is strictly increasing in lectic order (hence
/// duplicate-free).
pub fn is_lectically_increasing<'a>(sets: impl IntoIterator<Item = &'a AttributeSet>) -> bool {
    let mut iter = sets.into_iter();
    let Some(mut prev) = iter.next() else {
        return true;
    };
    for next in iter {
        if lectic_cmp(prev, next) != Ordering::Less {
            return false;
        }
        prev = next;
    }
    true
}

// ============================================================================
// Object sets
// ============================================================================

/// Subsets of `[0, objects)` backed by a Roaring bitmap.
///
/// This is the extent algebra of a binary context: attribute descriptions
/// are their object sets and the meet is plain intersection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectSets {
    objects: u32,
}

impl ObjectSets {
    pub fn new(objects: u32) -> Self {
        Self { objects }
    }

    pub fn object_count(&self) -> u32 {
        self.objects
    }

    /// Bitmap holding the given object indices.
    pub fn set(&self, objects: impl IntoIterator<Item = u32>) -> RoaringBitmap {
        objects.into_iter().collect()
    }
}

impl PatternAlgebra for ObjectSets {
    type Pattern = RoaringBitmap;

    fn bottom(&self) -> RoaringBitmap {
        RoaringBitmap::new()
    }

    fn top(&self) -> Option<RoaringBitmap> {
        let mut all = RoaringBitmap::new();
        all.insert_range(0..self.objects);
        Some(all)
    }

    fn join(&self, a: &RoaringBitmap, b: &RoaringBitmap) -> RoaringBitmap {
        a | b
    }

    fn intersection(&self, a: &RoaringBitmap, b: &RoaringBitmap) -> RoaringBitmap {
        a & b
    }

    fn difference(&self, a: &RoaringBitmap, b: &RoaringBitmap) -> RoaringBitmap {
        a - b
    }

    fn order(&self, a: &RoaringBitmap, b: &RoaringBitmap) -> Option<Ordering> {
        subset_order(a.len(), b.len(), a.is_subset(b), b.is_subset(a))
    }

    fn length(&self, a: &RoaringBitmap) -> usize {
        a.len() as usize
    }

    fn contains(&self, a: &RoaringBitmap) -> bool {
        a.max().map_or(true, |g| g < self.objects)
    }
}

fn subset_order<N: PartialEq>(a_len: N, b_len: N, a_in_b: bool, b_in_a: bool) -> Option<Ordering> {
    match (a_in_b, b_in_a) {
        (true, true) if a_len == b_len => Some(Ordering::Equal),
        (true, _) => Some(Ordering::Less),
        (_, true) => Some(Ordering::Greater),
        _ => None,
    }
}
