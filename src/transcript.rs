//!
//! A small variable-output-hash transcript, used both as the Fiat-Shamir
//! challenge hash for the linear-relation proof ([`crate::linear`]) and as
//! the "uniform scalar from a byte stream" primitive used to turn a public
//! attribute into a scalar ([`crate::token`]).
//!
//! Grounded in `coconut::proof::RequestCoinsProof::to_challenge`, which
//! hashes a fixed sequence of group elements with `Sha512` and reduces the
//! digest with `Scalar::from_bytes_wide`. We generalize that fixed SHA-512
//! call into a BLAKE2b extendable-output accumulator so the same code path
//! serves both call sites, matching the variable-output hash the reference
//! implementation uses for its challenge.
//!

use bls12_381::Scalar;
use blake2::Blake2bVar;
use digest::{Update, VariableOutput};

/// Accumulates domain-separated bytes in a fixed order and yields a
/// uniform scalar. Two streams fed identical bytes in identical order
/// always yield identical scalars.
pub struct ScalarStream {
    hasher: Blake2bVar,
}

impl ScalarStream {
    pub fn new() -> Self {
        Self {
            hasher: Blake2bVar::new(64).expect("64 is a valid BLAKE2b output length"),
        }
    }

    pub fn write(&mut self, bytes: &[u8]) -> &mut Self {
        self.hasher.update(bytes);
        self
    }

    pub fn finalize_scalar(self) -> Scalar {
        let mut wide = [0u8; 64];
        self.hasher
            .finalize_variable(|out| wide.copy_from_slice(out));
        Scalar::from_bytes_wide(&wide)
    }
}

impl Default for ScalarStream {
    fn default() -> Self {
        Self::new()
    }
}
