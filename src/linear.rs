//!
//! Maurer's linear-relation Sigma protocol, Fiat-Shamir transformed.
//!
//! Grounded in `examples/original_source/linear/proof.go` for the shape of
//! the algorithm (statement/witness/proof, the `Prove`/`Verify` pair, the
//! transcript hash), and in `coconut::proof::RequestCoinsProof` for how the
//! teacher turns a hand-rolled Sigma protocol into idiomatic Rust: response
//! vectors built with `.zip().map().collect()`, a dedicated challenge-hash
//! helper, and verification gated behind an equality check rather than a
//! bag of early returns.
//!

use crate::error::Error;
use crate::transcript::ScalarStream;
use crate::{bail, ensure};
use bls12_381::{G1Projective, Scalar};
use ff::Field as _;
use group::{Group as _, GroupEncoding as _};
use rand::{CryptoRng, RngCore};
#[cfg(feature = "with_serde")]
use serde::{Deserialize, Serialize};

/// A linear-relation statement: the prover knows `w` such that, for every
/// row `i`, `X[i] = Σ_j w[j] · F[i][j]`.
#[derive(Clone, Debug)]
pub struct Statement {
    pub f: Vec<Vec<G1Projective>>,
    pub x: Vec<G1Projective>,
}

impl Statement {
    pub fn new(f: Vec<Vec<G1Projective>>, x: Vec<G1Projective>) -> Self {
        Self { f, x }
    }

    /// All rows of `F` have identical length `n`, and `|X| = m`.
    pub fn is_well_formed(&self) -> bool {
        match self.f.first() {
            Some(first) => {
                let n = first.len();
                self.f.iter().all(|row| row.len() == n) && self.x.len() == self.f.len()
            }
            None => self.x.is_empty(),
        }
    }

    pub fn input_dimension(&self) -> usize {
        self.f.first().map(Vec::len).unwrap_or(0)
    }

    pub fn output_dimension(&self) -> usize {
        self.f.len()
    }
}

/// The secret witness vector `w`. Scalars are zeroed on drop since this is
/// the one value in the protocol that must never outlive the proving call.
pub struct Witness {
    pub w: Vec<Scalar>,
}

impl Witness {
    pub fn new(w: Vec<Scalar>) -> Self {
        Self { w }
    }
}

impl Drop for Witness {
    fn drop(&mut self) {
        for scalar in self.w.iter_mut() {
            *scalar = Scalar::zero();
        }
    }
}

/// A non-interactive proof of knowledge of a witness satisfying a
/// [`Statement`]: first-round commitments `R` and Fiat-Shamir responses `S`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "with_serde", derive(Serialize, Deserialize))]
pub struct LinearProof {
    pub r: Vec<G1Projective>,
    pub s: Vec<Scalar>,
}

/// Check the relation directly, without any randomness or hashing. Used as
/// the prover's self-check before committing to a proof it can't actually
/// back up.
pub fn satisfied(statement: &Statement, witness: &Witness) -> bool {
    if witness.w.len() != statement.input_dimension() {
        return false;
    }
    statement.f.iter().zip(statement.x.iter()).all(|(row, x)| {
        let lhs: G1Projective = row
            .iter()
            .zip(witness.w.iter())
            .map(|(base, w)| *base * *w)
            .sum();
        lhs == *x
    })
}

/// Produce a proof of knowledge of `witness` for `statement`.
pub fn prove<R: RngCore + CryptoRng>(
    statement: &Statement,
    witness: &Witness,
    rng: &mut R,
) -> crate::Result<LinearProof> {
    ensure!(statement.is_well_formed(), Error::MalformedStatement);
    let n = statement.input_dimension();
    ensure!(witness.w.len() == n, Error::WitnessLengthMismatch);
    ensure!(satisfied(statement, witness), Error::InternalConsistency);

    let blinds: Vec<Scalar> = (0..n).map(|_| Scalar::random(&mut *rng)).collect();

    let r: Vec<G1Projective> = statement
        .f
        .iter()
        .map(|row| {
            row.iter()
                .zip(blinds.iter())
                .map(|(base, blind)| *base * *blind)
                .sum()
        })
        .collect();

    let challenge = challenge_hash(statement, &r);

    let s: Vec<Scalar> = blinds
        .iter()
        .zip(witness.w.iter())
        .map(|(blind, w)| *blind + challenge * w)
        .collect();

    Ok(LinearProof { r, s })
}

/// Verify a proof of knowledge for `statement`.
pub fn verify(statement: &Statement, proof: &LinearProof) -> bool {
    if !statement.is_well_formed() {
        return false;
    }
    if proof.r.len() != statement.output_dimension() {
        return false;
    }
    if proof.s.len() != statement.input_dimension() {
        return false;
    }

    let challenge = challenge_hash(statement, &proof.r);

    statement
        .f
        .iter()
        .zip(statement.x.iter())
        .zip(proof.r.iter())
        .all(|((row, x), r)| {
            let lhs: G1Projective = row
                .iter()
                .zip(proof.s.iter())
                .map(|(base, s)| *base * *s)
                .sum();
            let rhs = *x * challenge + *r;
            lhs == rhs
        })
}

/// The Fiat-Shamir challenge: `H("Input: n Output: m", F, X, R)`. Identity
/// cells in `F` are hashed in their positional order along with everything
/// else, so prover and verifier always agree on the dimensions being
/// proven even though multiplying by identity contributes nothing.
fn challenge_hash(statement: &Statement, r: &[G1Projective]) -> Scalar {
    let mut stream = ScalarStream::new();
    stream.write(
        format!(
            "Input: {} Output: {}",
            statement.input_dimension(),
            statement.output_dimension()
        )
        .as_bytes(),
    );
    for row in &statement.f {
        for elt in row {
            stream.write(elt.to_bytes().as_ref());
        }
    }
    for elt in &statement.x {
        stream.write(elt.to_bytes().as_ref());
    }
    for elt in r {
        stream.write(elt.to_bytes().as_ref());
    }
    stream.finalize_scalar()
}

#[cfg(test)]
#[path = "tests/linear_tests.rs"]
mod linear_tests;
