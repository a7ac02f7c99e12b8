// SPDX-License-Identifier: Apache-2.0
//! Content hash identifying which algorithm/options produced a
//! [`crate::PartitionResult`] (§4.8).

use tecto_ids::Hash;
use tecto_polygon::{SamplingSpec, TolerancePolicy};

/// Version tag stamped into every [`crate::Provenance`] and folded into
/// [`algorithm_hash`]; bump when the polygonization algorithm's observable
/// behavior changes.
pub const POLYGONIZER_VERSION: &str = "tecto-polygon/0.1.0";

/// Domain-separated digest over `{polygonizer_version, tolerance_policy
/// class, canonical option encoding}`, used both as the cache key's variant
/// component and as result provenance.
#[must_use]
pub fn algorithm_hash(policy: TolerancePolicy, sampling: SamplingSpec) -> Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(b"tecto:partition:algorithm-hash:v1:");
    hasher.update(POLYGONIZER_VERSION.as_bytes());
    hasher.update(b":");
    hasher.update(policy.class_name().as_bytes());
    hasher.update(b":");
    if let Some(epsilon) = policy.epsilon() {
        hasher.update(&epsilon.to_be_bytes());
    }
    hasher.update(b":");
    hasher.update(sampling.tag().as_bytes());
    hasher.update(b":");
    match sampling {
        SamplingSpec::VertexOnly {
            junction_buffer_distance,
        } => hasher.update(&junction_buffer_distance.to_be_bytes()),
        SamplingSpec::FixedInterval { interval } => hasher.update(&interval.to_be_bytes()),
    };
    *hasher.finalize().as_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_options_hash_equal() {
        let policy = TolerancePolicy::Lenient { epsilon: 1e-6 };
        let sampling = SamplingSpec::FixedInterval { interval: 0.1 };
        assert_eq!(algorithm_hash(policy, sampling), algorithm_hash(policy, sampling));
    }

    #[test]
    fn differing_tolerance_policy_hashes_differ() {
        let sampling = SamplingSpec::FixedInterval { interval: 0.1 };
        let strict = algorithm_hash(TolerancePolicy::Strict, sampling);
        let lenient = algorithm_hash(TolerancePolicy::Lenient { epsilon: 1e-6 }, sampling);
        assert_ne!(strict, lenient);
    }

    #[test]
    fn differing_epsilon_hashes_differ() {
        let sampling = SamplingSpec::FixedInterval { interval: 0.1 };
        let a = algorithm_hash(TolerancePolicy::Lenient { epsilon: 1e-6 }, sampling);
        let b = algorithm_hash(TolerancePolicy::Lenient { epsilon: 1e-7 }, sampling);
        assert_ne!(a, b);
    }

    #[test]
    fn differing_sampling_hashes_differ() {
        let policy = TolerancePolicy::Strict;
        let a = algorithm_hash(policy, SamplingSpec::FixedInterval { interval: 0.1 });
        let b = algorithm_hash(policy, SamplingSpec::VertexOnly { junction_buffer_distance: 0.1 });
        assert_ne!(a, b);
    }
}
