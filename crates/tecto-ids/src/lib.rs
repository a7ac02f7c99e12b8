// SPDX-License-Identifier: Apache-2.0
//! Identifiers, ticks, and stream identity for the tectonic topology engine.
//!
//! All identifiers here are opaque fixed-width byte arrays. Equality and
//! ordering are defined on the raw bits (lexicographic byte order), never on
//! a derived meaning, so that replay and polygonization produce outputs that
//! are stable across runs regardless of how an embedder chooses to mint ids.
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::unreadable_literal,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions
)]

use core::fmt;

/// Canonical 256-bit hash used for event chaining, cache keys, and
/// content-addressed algorithm identifiers.
pub type Hash = [u8; 32];

/// The all-zero hash, used as `previous_hash` of the first event in a stream.
pub const EMPTY_HASH: Hash = [0u8; 32];

macro_rules! opaque_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[repr(transparent)]
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        pub struct $name(pub [u8; 16]);

        impl $name {
            /// Builds an identifier from a little-endian `u128`.
            ///
            /// This is a convenience for tests and embedders who mint ids
            /// from a counter; the engine itself never assumes ids are
            /// sequential.
            #[must_use]
            pub fn from_u128(value: u128) -> Self {
                Self(value.to_le_bytes())
            }

            /// Returns the raw 16-byte representation.
            #[must_use]
            pub fn as_bytes(&self) -> &[u8; 16] {
                &self.0
            }

            /// Reconstructs the little-endian `u128` this id was built from.
            ///
            /// Ids minted by other means (e.g. content hashes truncated to
            /// 16 bytes) round-trip through this just as validly — it is a
            /// bit reinterpretation, not a provenance claim.
            #[must_use]
            pub fn as_u128(&self) -> u128 {
                u128::from_le_bytes(self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                for byte in &self.0 {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
        }
    };
}

opaque_id!(PlateId, "Opaque 128-bit identifier for a tectonic plate.");
opaque_id!(
    BoundaryId,
    "Opaque 128-bit identifier for a boundary between two plates."
);
opaque_id!(
    JunctionId,
    "Opaque 128-bit identifier for a junction where boundaries meet."
);

/// 64-bit signed simulation time.
///
/// Not necessarily monotone across events within a stream: two consecutive
/// sequence numbers may carry ticks in either order. Code must never assume
/// `tick` is a proxy for `sequence`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct CanonicalTick(pub i64);

impl CanonicalTick {
    /// Returns the raw tick value.
    #[must_use]
    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CanonicalTick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one append-only, hash-chained event log.
///
/// Two `TruthStreamIdentity` values are equal iff every field is equal.
/// `domain` is conventionally a dotted name (e.g. `"earth.pangea.l0"`), but
/// the engine treats it as an opaque string.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TruthStreamIdentity {
    /// Simulation variant (e.g. `"baseline"`, `"counterfactual-a"`).
    pub variant: String,
    /// Branch name within the variant.
    pub branch: String,
    /// Level-of-detail tier.
    pub l_level: u32,
    /// Dotted domain name scoping this stream.
    pub domain: String,
    /// Model identifier.
    pub model: String,
}

impl TruthStreamIdentity {
    /// Creates a new stream identity.
    pub fn new(
        variant: impl Into<String>,
        branch: impl Into<String>,
        l_level: u32,
        domain: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            variant: variant.into(),
            branch: branch.into(),
            l_level,
            domain: domain.into(),
            model: model.into(),
        }
    }

    /// Canonical length-prefixed byte encoding of this identity.
    ///
    /// Used both to derive the event-log key prefix (§4.3) and the
    /// identity component of partition cache keys (§4.5). Each string
    /// field is encoded as a 4-byte big-endian length followed by its UTF-8
    /// bytes so that no field can be confused with a neighboring one
    /// regardless of content.
    #[must_use]
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for field in [&self.variant, &self.branch, &self.domain, &self.model] {
            out.extend_from_slice(&(field.len() as u32).to_be_bytes());
            out.extend_from_slice(field.as_bytes());
        }
        out.extend_from_slice(&self.l_level.to_be_bytes());
        out
    }

    /// Domain-separated BLAKE3 digest of this identity.
    ///
    /// Two identities with equal fields hash equal; any differing field
    /// changes the digest. Used as the stream-identity component of cache
    /// keys (§8, property 10).
    #[must_use]
    pub fn identity_hash(&self) -> Hash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"tecto:stream-identity:v1:");
        hasher.update(&self.canonical_bytes());
        *hasher.finalize().as_bytes()
    }
}

impl fmt::Display for TruthStreamIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:L{}:{}:M{}",
            self.variant, self.branch, self.l_level, self.domain, self.model
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_ordering_is_byte_lexicographic() {
        let a = PlateId::from_u128(1);
        let b = PlateId::from_u128(2);
        assert!(a < b || a > b);
        assert_eq!(a, PlateId::from_u128(1));
    }

    #[test]
    fn identity_hash_is_sensitive_to_every_field() {
        let base = TruthStreamIdentity::new("baseline", "main", 0, "earth.l0", "m1");
        let variant = TruthStreamIdentity::new("other", "main", 0, "earth.l0", "m1");
        let branch = TruthStreamIdentity::new("baseline", "other", 0, "earth.l0", "m1");
        let level = TruthStreamIdentity::new("baseline", "main", 1, "earth.l0", "m1");
        let domain = TruthStreamIdentity::new("baseline", "main", 0, "mars.l0", "m1");
        let model = TruthStreamIdentity::new("baseline", "main", 0, "earth.l0", "m2");

        let digests = [
            base.identity_hash(),
            variant.identity_hash(),
            branch.identity_hash(),
            level.identity_hash(),
            domain.identity_hash(),
            model.identity_hash(),
        ];
        for i in 0..digests.len() {
            for j in (i + 1)..digests.len() {
                assert_ne!(digests[i], digests[j], "fields {i} and {j} collided");
            }
        }
    }

    #[test]
    fn identity_hash_is_deterministic() {
        let a = TruthStreamIdentity::new("baseline", "main", 0, "earth.l0", "m1");
        let b = TruthStreamIdentity::new("baseline", "main", 0, "earth.l0", "m1");
        assert_eq!(a.identity_hash(), b.identity_hash());
    }

    #[test]
    fn canonical_bytes_length_prefix_prevents_field_confusion() {
        // "ab"+"c" vs "a"+"bc" must not collide despite identical concatenation.
        let a = TruthStreamIdentity::new("ab", "c", 0, "d", "e");
        let b = TruthStreamIdentity::new("a", "bc", 0, "d", "e");
        assert_ne!(a.canonical_bytes(), b.canonical_bytes());
    }
}
