//! Partition patterns.
//!
//! A partition of the elements `[0, k)` groups elements that agree on
//! something, typically rows of a table that share a column value. Ordered
//! by refinement (finer is lower), partitions form a lattice:
//!
//! - meet: common refinement, two elements share a block iff they share one
//!   in both inputs
//! - join: finest common coarsening, the transitive closure of "shares a
//!   block in either input", computed with a union-find
//!
//! Used as the description algebra of a transposed context (columns as the
//! enumerated indices, their value partitions as descriptions), the closure
//! of a column set `X` is every column `Y` with `π(X) ≤ π(Y)`, i.e. every
//! functional dependency `X → Y`.

use std::collections::HashMap;
use std::hash::Hash;

use egglog_union_find::UnionFind;

use super::PatternAlgebra;

/// A partition stored as canonical block labels: `labels[x]` is the smallest
/// element of `x`'s block. Two partitions are equal iff their labels are.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Partition {
    labels: Vec<usize>,
}

impl Partition {
    /// Partition induced by equal values: `values[x] == values[y]` puts `x`
    /// and `y` in the same block.
    pub fn from_values<V: Eq + Hash>(values: &[V]) -> Self {
        let mut first_seen: HashMap<&V, usize> = HashMap::new();
        let labels = values
            .iter()
            .enumerate()
            .map(|(x, v)| *first_seen.entry(v).or_insert(x))
            .collect();
        Self { labels }
    }

    /// Partition from explicit blocks. Overlapping blocks are merged and
    /// elements not mentioned become singletons.
    pub fn from_blocks(elements: usize, blocks: &[Vec<usize>]) -> Self {
        let mut uf: UnionFind<usize> = UnionFind::default();
        for block in blocks {
            let mut members = block.iter().copied().filter(|&x| x < elements);
            if let Some(first) = members.next() {
                for x in members {
                    merge(&mut uf, first, x);
                }
            }
        }
        Self::from_classes(elements, &mut uf)
    }

    /// Relabel union-find classes by their smallest element.
    fn from_classes(elements: usize, uf: &mut UnionFind<usize>) -> Self {
        let mut smallest: HashMap<usize, usize> = HashMap::new();
        let labels = (0..elements)
            .map(|x| *smallest.entry(uf.find(x)).or_insert(x))
            .collect();
        Self { labels }
    }

    pub fn element_count(&self) -> usize {
        self.labels.len()
    }

    /// Number of blocks.
    pub fn block_count(&self) -> usize {
        self.labels
            .iter()
            .enumerate()
            .filter(|&(x, &label)| x == label)
            .count()
    }

    /// Blocks in order of their smallest element.
    pub fn blocks(&self) -> Vec<Vec<usize>> {
        let mut by_label: Vec<Vec<usize>> = vec![Vec::new(); self.labels.len()];
        for (x, &label) in self.labels.iter().enumerate() {
            by_label[label].push(x);
        }
        by_label.into_iter().filter(|b| !b.is_empty()).collect()
    }

    /// Whether `x` and `y` share a block.
    pub fn same_block(&self, x: usize, y: usize) -> bool {
        self.labels.get(x).is_some() && self.labels.get(x) == self.labels.get(y)
    }

    /// Whether every block of `self` lies inside a block of `other`.
    pub fn refines(&self, other: &Partition) -> bool {
        self.labels.len() == other.labels.len()
            && self
                .labels
                .iter()
                .enumerate()
                .all(|(x, &rep)| other.labels[x] == other.labels[rep])
    }

    fn is_canonical(&self) -> bool {
        self.labels
            .iter()
            .enumerate()
            .all(|(x, &label)| label <= x && self.labels[label] == label)
    }
}

fn merge(uf: &mut UnionFind<usize>, x: usize, y: usize) {
    let (rx, ry) = (uf.find(x), uf.find(y));
    if rx != ry {
        uf.union(rx, ry);
    }
}

/// Partitions of `[0, elements)` ordered by refinement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partitions {
    elements: usize,
}

impl Partitions {
    pub fn new(elements: usize) -> Self {
        Self { elements }
    }

    pub fn element_count(&self) -> usize {
        self.elements
    }

    /// Every element alone.
    pub fn discrete(&self) -> Partition {
        Partition {
            labels: (0..self.elements).collect(),
        }
    }

    /// All elements in one block.
    pub fn single_block(&self) -> Partition {
        Partition {
            labels: vec![0; self.elements],
        }
    }
}

impl PatternAlgebra for Partitions {
    type Pattern = Partition;

    fn bottom(&self) -> Partition {
        self.discrete()
    }

    fn top(&self) -> Option<Partition> {
        Some(self.single_block())
    }

    fn join(&self, a: &Partition, b: &Partition) -> Partition {
        let mut uf: UnionFind<usize> = UnionFind::default();
        let elements = a.labels.len().min(b.labels.len());
        for (x, (&la, &lb)) in a.labels.iter().zip(&b.labels).enumerate() {
            merge(&mut uf, x, la);
            merge(&mut uf, x, lb);
        }
        Partition::from_classes(elements, &mut uf)
    }

    fn intersection(&self, a: &Partition, b: &Partition) -> Partition {
        let mut first_seen: HashMap<(usize, usize), usize> = HashMap::new();
        let labels = a
            .labels
            .iter()
            .zip(&b.labels)
            .enumerate()
            .map(|(x, (&la, &lb))| *first_seen.entry((la, lb)).or_insert(x))
            .collect();
        Partition { labels }
    }

    fn order(&self, a: &Partition, b: &Partition) -> Option<std::cmp::Ordering> {
        use std::cmp::Ordering;
        match (a.refines(b), b.refines(a)) {
            (true, true) => Some(Ordering::Equal),
            (true, false) => Some(Ordering::Less),
            (false, true) => Some(Ordering::Greater),
            (false, false) => None,
        }
    }

    fn length(&self, a: &Partition) -> usize {
        a.block_count()
    }

    fn contains(&self, a: &Partition) -> bool {
        a.labels.len() == self.elements && a.is_canonical()
    }
}
