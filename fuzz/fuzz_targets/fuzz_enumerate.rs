//! Fuzz the enumerators on arbitrary small relations
//!
//! The first byte picks the number of attributes, every following byte is
//! one object's attribute mask. Both strategies must succeed and agree.

#![no_main]

use libfuzzer_sys::fuzz_target;
use lectic::{equivalent, CanonicalBaseBuilder, GaloisContext, Relation, Strategy};

fuzz_target!(|data: &[u8]| {
    let Some((&first, rows)) = data.split_first() else {
        return;
    };
    let attributes = (first % 8) as usize;
    let mut relation = Relation::new();
    for m in 0..attributes {
        relation.add_attribute(format!("m{m}"));
    }
    for (g, mask) in rows.iter().take(32).enumerate() {
        relation.add_object(format!("g{g}"));
        for m in 0..attributes {
            if mask & (1 << m) != 0 {
                relation.insert(format!("g{g}"), format!("m{m}"));
            }
        }
    }

    let context = GaloisContext::from_relation(&relation, None, false).unwrap();
    let forward = CanonicalBaseBuilder::new(&context).run().unwrap();
    let relay = CanonicalBaseBuilder::new(&context)
        .strategy(Strategy::Relay)
        .run()
        .unwrap();
    assert_eq!(forward.concepts(), relay.concepts());
    assert!(equivalent(forward.implications(), relay.implications()));
});
