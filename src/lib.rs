//! Lectic: concept lattices and canonical implication bases.
//!
//! Formal Concept Analysis over generic description algebras. The crate
//! enumerates every closed intent of a Galois connection in lectic order,
//! builds the Duquenne–Guigues base while doing so, and assembles the
//! covering graph of the resulting concept lattice.
//!
//! ```text
//! Relation ──► GaloisContext ──► ClosureEnumerator / RelayEnumerator ──► Concepts
//!                                        │                                 │
//!                                    PreClosure                     LatticeAssembler
//!                                        │
//!                               CanonicalBaseBuilder ──► implications
//! ```
//!
//! # Example
//!
//! ```
//! use lectic::{CanonicalBaseBuilder, GaloisContext, Relation};
//!
//! let relation = Relation::from_pairs([
//!     ("1", "a"), ("1", "b"),
//!     ("2", "b"), ("2", "c"),
//!     ("3", "a"), ("3", "b"), ("3", "c"), ("3", "d"),
//! ]);
//! let context = GaloisContext::from_relation(&relation, None, false)?;
//! let base = CanonicalBaseBuilder::new(&context).run()?;
//!
//! assert_eq!(base.concepts().len(), 4);
//! assert_eq!(base.get_implications()[0].consequent, vec!["b"]);
//! # Ok::<(), lectic::FcaError>(())
//! ```

pub mod algebra;
pub mod canonical_base;
pub mod condition;
pub mod context;
pub mod enumerate;
pub mod error;
pub mod lattice;
pub mod preclosure;

pub use algebra::sets::is_lectically_increasing;
pub use algebra::{
    lectic_cmp, AttributeSet, AttributeSets, IntervalPattern, ObjectSets, Partition, Partitions,
    PatternAlgebra, ThresholdIntervals,
};
pub use canonical_base::{CanonicalBase, CanonicalBaseBuilder, LabeledImplication, Strategy};
pub use condition::{Condition, Conditions};
pub use context::{Derivation, GaloisContext, Relation};
pub use enumerate::{
    ClosureEnumerator, Concept, EnumerationStats, EnumeratorConfig, RelayEnumerator,
};
pub use error::{FcaError, Result};
pub use lattice::{ConceptLattice, LatticeAssembler};
pub use preclosure::{closure_under, entails, equivalent, Implication, PreClosure};
