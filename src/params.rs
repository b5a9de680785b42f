//!
//! System-wide constants and generator derivation.
//!
//! Grounded in `coconut::setup::Parameters`: a small constants carrier built
//! once from domain-separated hash-to-curve outputs and threaded by
//! reference through the rest of the crate.
//!

use bls12_381::hash_to_curve::{ExpandMsgXmd, HashToCurve};
use bls12_381::{G1Projective, G2Projective};
use group::Group as _;
#[cfg(feature = "with_serde")]
use serde::{Deserialize, Serialize};
use sha2::Sha512;

/// Practical cap on the range-proof bitlength a rate-limit counter needs,
/// well inside the 256-bit scalar encoding `crate::range` reads bits from.
pub const MAX_RANGE_BITS: usize = 64;

/// Hash a domain-separated label into an element of `G1`. Every
/// hash-to-curve call in this crate goes through here so the domain tag is
/// never accidentally omitted.
pub fn hash_to_g1<M: AsRef<[u8]>>(msg: M, dst: &[u8]) -> G1Projective {
    <G1Projective as HashToCurve<ExpandMsgXmd<Sha512>>>::hash_to_curve(msg, dst)
}

/// The four public generators shared by the token protocol and the range
/// proof it embeds: `g0, g1` anchor the BBS-style signature equation,
/// `h0, h1` are reused as the Pedersen bases for both the attribute
/// commitment baked into a token and the rate-limit counter commitment
/// produced at showing time.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "with_serde", derive(Serialize, Deserialize))]
pub struct SystemParams {
    pub g0: G1Projective,
    pub g1: G1Projective,
    pub h0: G1Projective,
    pub h1: G1Projective,
    pub g2_gen: G2Projective,
}

impl SystemParams {
    pub fn new() -> Self {
        Self {
            g0: hash_to_g1(b"g0", b"demo"),
            g1: hash_to_g1(b"g1", b"demo"),
            h0: hash_to_g1(b"h0", b"demo"),
            h1: hash_to_g1(b"h1", b"demo"),
            g2_gen: G2Projective::generator(),
        }
    }
}

impl Default for SystemParams {
    fn default() -> Self {
        Self::new()
    }
}
