// SPDX-License-Identifier: Apache-2.0
//! `TruthStreamIdentity::identity_hash` is a deterministic function of its
//! fields, sensitive to each one (§8 property 10's stream-identity half).
#![allow(missing_docs)]

use proptest::prelude::*;
use tecto_ids::TruthStreamIdentity;

fn identity(variant: &str, branch: &str, l_level: u32, domain: &str, model: &str) -> TruthStreamIdentity {
    TruthStreamIdentity::new(variant, branch, l_level, domain, model)
}

proptest! {
    #[test]
    fn equal_fields_hash_equal(
        variant in ".{0,12}", branch in ".{0,12}", l_level in any::<u32>(),
        domain in ".{0,12}", model in ".{0,12}",
    ) {
        let a = identity(&variant, &branch, l_level, &domain, &model);
        let b = identity(&variant, &branch, l_level, &domain, &model);
        prop_assert_eq!(a.identity_hash(), b.identity_hash());
    }

    #[test]
    fn a_changed_l_level_changes_the_hash(
        variant in ".{0,12}", branch in ".{0,12}", l_level in 0u32..1_000_000,
        domain in ".{0,12}", model in ".{0,12}",
    ) {
        let a = identity(&variant, &branch, l_level, &domain, &model);
        let b = identity(&variant, &branch, l_level + 1, &domain, &model);
        prop_assert_ne!(a.identity_hash(), b.identity_hash());
    }

    #[test]
    fn a_changed_model_changes_the_hash(
        variant in ".{0,12}", branch in ".{0,12}", l_level in any::<u32>(),
        domain in ".{0,12}", model in ".{1,12}",
    ) {
        let a = identity(&variant, &branch, l_level, &domain, &model);
        let b = identity(&variant, &branch, l_level, &domain, &format!("{model}x"));
        prop_assert_ne!(a.identity_hash(), b.identity_hash());
    }
}
