//! Proptest generators and brute-force references for lattice tests
//!
//! Contexts are kept small (at most 6 attributes) so that every subset of
//! the attribute set can be checked exhaustively.

#![allow(dead_code)]

use lectic::{
    lectic_cmp, AttributeSet, Derivation, GaloisContext, ObjectSets, Partition, Partitions,
    Relation, ThresholdIntervals,
};
use proptest::collection::vec;
use proptest::prelude::*;

// ============================================================================
// Binary contexts
// ============================================================================

/// Parameters for context generation
#[derive(Debug, Clone, Copy)]
pub struct ContextParams {
    pub max_objects: usize,
    pub max_attributes: usize,
}

impl Default for ContextParams {
    fn default() -> Self {
        Self {
            max_objects: 6,
            max_attributes: 5,
        }
    }
}

/// A dense incidence table: `rows[g][m]` iff object `g` has attribute `m`
#[derive(Debug, Clone)]
pub struct Incidence {
    pub attributes: usize,
    pub rows: Vec<Vec<bool>>,
}

impl Incidence {
    /// Relation with objects `g0..` and attributes `m0..`, every attribute
    /// declared even when no object has it
    pub fn relation(&self) -> Relation {
        let mut relation = Relation::new();
        for m in 0..self.attributes {
            relation.add_attribute(format!("m{m}"));
        }
        for (g, row) in self.rows.iter().enumerate() {
            relation.add_object(format!("g{g}"));
            for (m, &has) in row.iter().enumerate() {
                if has {
                    relation.insert(format!("g{g}"), format!("m{m}"));
                }
            }
        }
        relation
    }

    pub fn context(&self) -> GaloisContext<ObjectSets> {
        GaloisContext::from_relation(&self.relation(), None, false).unwrap()
    }

    /// Attributes of object `g`
    pub fn object_intent(&self, g: usize) -> AttributeSet {
        self.rows[g]
            .iter()
            .enumerate()
            .filter(|(_, has)| **has)
            .map(|(m, _)| m)
            .collect()
    }
}

/// Generate an incidence table within the given bounds
pub fn arb_incidence(params: ContextParams) -> impl Strategy<Value = Incidence> {
    (0..=params.max_attributes).prop_flat_map(move |attributes| {
        vec(vec(any::<bool>(), attributes), 0..=params.max_objects)
            .prop_map(move |rows| Incidence { attributes, rows })
    })
}

/// Generate a subset of `[0, n)`
pub fn arb_attribute_set(n: usize) -> impl Strategy<Value = AttributeSet> {
    vec(any::<bool>(), n).prop_map(|bits| {
        bits.into_iter()
            .enumerate()
            .filter(|(_, b)| *b)
            .map(|(m, _)| m)
            .collect()
    })
}

// ============================================================================
// Partition contexts
// ============================================================================

/// A table of small values: `rows` rows, `columns` columns
pub fn arb_table(max_rows: usize, max_columns: usize) -> impl Strategy<Value = Vec<Vec<u8>>> {
    (1..=max_rows, 0..=max_columns).prop_flat_map(|(rows, columns)| {
        vec(vec(0u8..3, rows), columns)
    })
}

/// Transposed partition context: one attribute per column, described by the
/// partition of rows its values induce
pub fn partition_context(columns: &[Vec<u8>]) -> GaloisContext<Partitions> {
    let rows = columns.first().map_or(1, Vec::len);
    GaloisContext::from_descriptions(
        Partitions::new(rows),
        columns
            .iter()
            .enumerate()
            .map(|(c, values)| (format!("c{c}"), Partition::from_values(values.as_slice()))),
    )
    .unwrap()
}

// ============================================================================
// Interval contexts
// ============================================================================

/// Up to five points on a short line, with a threshold that may or may not
/// split them
pub fn arb_points() -> impl Strategy<Value = (Vec<i64>, u64)> {
    (vec(0i64..12, 0..=5), 0u64..6)
}

/// One attribute per point, described by its degenerate interval
pub fn interval_context(points: &[i64], theta: u64) -> GaloisContext<ThresholdIntervals> {
    let algebra = ThresholdIntervals::with_theta(1, theta);
    let descriptions: Vec<_> = points
        .iter()
        .enumerate()
        .map(|(i, &v)| (format!("p{i}"), algebra.point(&[v]).unwrap()))
        .collect();
    GaloisContext::from_descriptions(algebra, descriptions).unwrap()
}

// ============================================================================
// Brute force references
// ============================================================================

/// Every subset of `[0, n)`
pub fn all_subsets(n: usize) -> Vec<AttributeSet> {
    (0u32..(1 << n))
        .map(|bits| (0..n).filter(|m| bits & (1 << m) != 0).collect())
        .collect()
}

/// All closed sets in lectic order
pub fn brute_force_intents<D: Derivation>(context: &D) -> Vec<AttributeSet> {
    let mut intents: Vec<AttributeSet> = all_subsets(context.attribute_count())
        .into_iter()
        .filter(|x| context.closure(x).unwrap() == *x)
        .collect();
    intents.sort_by(lectic_cmp);
    intents
}

/// Pseudo-intents: not closed, and containing the closure of every smaller
/// pseudo-intent they contain
pub fn brute_force_pseudo_intents<D: Derivation>(context: &D) -> Vec<AttributeSet> {
    let mut subsets = all_subsets(context.attribute_count());
    subsets.sort_by_key(|x| x.len());
    let mut pseudo: Vec<(AttributeSet, AttributeSet)> = Vec::new();
    for x in subsets {
        let closed = context.closure(&x).unwrap();
        if closed == x {
            continue;
        }
        let respects = pseudo
            .iter()
            .filter(|(q, _)| q.len() < x.len() && q.is_subset(&x))
            .all(|(_, q_closed)| q_closed.is_subset(&x));
        if respects {
            pseudo.push((x, closed));
        }
    }
    let mut antecedents: Vec<AttributeSet> = pseudo.into_iter().map(|(p, _)| p).collect();
    antecedents.sort_by(lectic_cmp);
    antecedents
}
