//! Property tests for the Galois connection and concept enumeration
//!
//! Every enumerated sequence is checked against an exhaustive scan of all
//! attribute subsets.

mod generators;

use generators::{
    arb_attribute_set, arb_incidence, arb_table, brute_force_intents, partition_context,
    ContextParams,
};
use lectic::{
    is_lectically_increasing, CanonicalBaseBuilder, ClosureEnumerator, Conditions, Derivation,
    EnumeratorConfig, RelayEnumerator, Strategy,
};
use proptest::prelude::*;
use proptest::strategy::Strategy as _;
use roaring::RoaringBitmap;

fn object_subset(objects: usize, mask: u64) -> RoaringBitmap {
    (0..objects as u32).filter(|g| mask & (1 << g) != 0).collect()
}

// ============================================================================
// Galois connection
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// intent(extent(intent(A))) = intent(A) for object sets A
    #[test]
    fn intent_is_a_fixed_point(incidence in arb_incidence(ContextParams::default()), mask in any::<u64>()) {
        let ctx = incidence.context();
        let objects = object_subset(incidence.rows.len(), mask);
        let intent = ctx.derive_intent(&objects).unwrap();
        let round_trip = ctx.derive_intent(&ctx.derive_extent(&intent).unwrap()).unwrap();
        prop_assert_eq!(round_trip, intent);
    }

    /// extent(intent(extent(X))) = extent(X) for attribute sets X
    #[test]
    fn extent_is_a_fixed_point(
        (incidence, x) in arb_incidence(ContextParams::default())
            .prop_flat_map(|inc| { let n = inc.attributes; (Just(inc), arb_attribute_set(n)) })
    ) {
        let ctx = incidence.context();
        let extent = ctx.derive_extent(&x).unwrap();
        let round_trip = ctx.derive_extent(&ctx.derive_intent(&extent).unwrap()).unwrap();
        prop_assert_eq!(round_trip, extent);
    }

    /// The binary extent is exactly the set of objects having every attribute
    #[test]
    fn extent_matches_object_intents(
        (incidence, x) in arb_incidence(ContextParams::default())
            .prop_flat_map(|inc| { let n = inc.attributes; (Just(inc), arb_attribute_set(n)) })
    ) {
        let ctx = incidence.context();
        let extent = ctx.derive_extent(&x).unwrap();
        for g in 0..incidence.rows.len() {
            prop_assert_eq!(extent.contains(g as u32), x.is_subset(&incidence.object_intent(g)));
            prop_assert_eq!(ctx.g_prime(g as u32), incidence.object_intent(g));
        }
    }

    /// Closure is extensive and idempotent
    #[test]
    fn closure_is_idempotent(
        (incidence, x) in arb_incidence(ContextParams::default())
            .prop_flat_map(|inc| { let n = inc.attributes; (Just(inc), arb_attribute_set(n)) })
    ) {
        let ctx = incidence.context();
        let closed = ctx.closure(&x).unwrap();
        prop_assert!(x.is_subset(&closed));
        prop_assert_eq!(ctx.closure(&closed).unwrap(), closed);
    }
}

// ============================================================================
// Enumeration
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Plain Next-Closure lists exactly the closed sets, in lectic order
    #[test]
    fn plain_enumeration_matches_brute_force(incidence in arb_incidence(ContextParams::default())) {
        let ctx = incidence.context();
        let concepts = ClosureEnumerator::new(&ctx, Conditions::none())
            .unwrap()
            .collect_concepts()
            .unwrap();
        let intents: Vec<_> = concepts.iter().map(|c| c.intent.clone()).collect();
        prop_assert!(is_lectically_increasing(intents.iter()));
        prop_assert_eq!(intents, brute_force_intents(&ctx));
        for concept in &concepts {
            prop_assert_eq!(&concept.extent, &ctx.derive_extent(&concept.intent).unwrap());
        }
    }

    /// Pre-closure mode and the relay walk emit the same sequence
    #[test]
    fn all_modes_emit_the_same_concepts(incidence in arb_incidence(ContextParams::default())) {
        let ctx = incidence.context();
        let plain = ClosureEnumerator::new(&ctx, Conditions::none())
            .unwrap()
            .collect_concepts()
            .unwrap();
        let canonical = ClosureEnumerator::with_config(&ctx, Conditions::none(), EnumeratorConfig::canonical())
            .unwrap()
            .collect_concepts()
            .unwrap();
        let relay = RelayEnumerator::new(&ctx, Conditions::none())
            .unwrap()
            .collect_concepts()
            .unwrap();
        prop_assert_eq!(&canonical, &plain);
        prop_assert_eq!(&relay, &plain);
    }

    /// Two fresh enumerators over one context agree
    #[test]
    fn restart_reproduces_sequence(incidence in arb_incidence(ContextParams::default())) {
        let ctx = incidence.context();
        let config = EnumeratorConfig::canonical();
        let first = ClosureEnumerator::with_config(&ctx, Conditions::none(), config.clone())
            .unwrap()
            .collect_concepts()
            .unwrap();
        let second = ClosureEnumerator::with_config(&ctx, Conditions::none(), config)
            .unwrap()
            .collect_concepts()
            .unwrap();
        prop_assert_eq!(first, second);
    }

    /// Minimum support keeps exactly the frequent closed sets
    #[test]
    fn min_support_keeps_frequent_intents(
        incidence in arb_incidence(ContextParams::default()),
        k in 0usize..4,
    ) {
        let ctx = incidence.context();
        let concepts = ClosureEnumerator::new(&ctx, Conditions::none().min_support(k))
            .unwrap()
            .collect_concepts()
            .unwrap();
        let intents: Vec<_> = concepts.into_iter().map(|c| c.intent).collect();
        let expected: Vec<_> = brute_force_intents(&ctx)
            .into_iter()
            .filter(|x| ctx.derive_extent(x).unwrap().len() as usize >= k)
            .collect();
        prop_assert_eq!(intents, expected);
    }

    /// An intent length bound keeps exactly the short closed sets, whether it
    /// cuts during pre-closure or only filters the relay walk
    #[test]
    fn max_intent_length_keeps_short_intents(
        incidence in arb_incidence(ContextParams::default()),
        k in 0usize..5,
    ) {
        let ctx = incidence.context();
        let expected: Vec<_> = brute_force_intents(&ctx)
            .into_iter()
            .filter(|x| x.len() <= k)
            .collect();

        let mut canonical = ClosureEnumerator::with_config(
            &ctx,
            Conditions::none().max_intent_length(k),
            EnumeratorConfig::canonical(),
        )
        .unwrap();
        let intents: Vec<_> = canonical
            .collect_concepts()
            .unwrap()
            .into_iter()
            .map(|c| c.intent)
            .collect();
        prop_assert_eq!(&intents, &expected);
        if ctx.closure(&Default::default()).unwrap().len() <= k && ctx.attribute_count() > k {
            prop_assert!(canonical.stats().pruned > 0);
        }

        let relay = CanonicalBaseBuilder::new(&ctx)
            .strategy(Strategy::Relay)
            .conditions(Conditions::none().max_intent_length(k))
            .run()
            .unwrap();
        let relay_intents: Vec<_> = relay.concepts().iter().map(|c| c.intent.clone()).collect();
        prop_assert_eq!(relay_intents, expected);
    }

    /// Partition contexts enumerate every closed column set
    #[test]
    fn partition_enumeration_matches_brute_force(columns in arb_table(5, 4)) {
        let ctx = partition_context(&columns);
        let intents: Vec<_> = ClosureEnumerator::with_config(&ctx, Conditions::none(), EnumeratorConfig::canonical())
            .unwrap()
            .collect_concepts()
            .unwrap()
            .into_iter()
            .map(|c| c.intent)
            .collect();
        prop_assert_eq!(intents, brute_force_intents(&ctx));
    }
}
