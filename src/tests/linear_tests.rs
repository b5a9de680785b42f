use super::*;
use bls12_381::{G1Projective, Scalar};
use group::Group as _;
use rand::{rngs::StdRng, SeedableRng};

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[test]
fn simple_schnorr_accepts() {
    let g = G1Projective::generator();
    let x = Scalar::random(&mut rng());
    let a = g * x;

    let statement = Statement::new(vec![vec![g]], vec![a]);
    let witness = Witness::new(vec![x]);

    let proof = prove(&statement, &witness, &mut rng()).unwrap();
    assert!(verify(&statement, &proof));
}

#[test]
fn simple_schnorr_rejects_swapped_base() {
    let g = G1Projective::generator();
    let other_g = crate::params::hash_to_g1(b"other", b"test");
    let x = Scalar::random(&mut rng());
    let a = g * x;

    let statement = Statement::new(vec![vec![g]], vec![a]);
    let witness = Witness::new(vec![x]);
    let proof = prove(&statement, &witness, &mut rng()).unwrap();

    let tampered = Statement::new(vec![vec![other_g]], vec![a]);
    assert!(!verify(&tampered, &proof));
}

#[test]
fn equal_discrete_log_accepts_and_rejects_swap() {
    let g0 = crate::params::hash_to_g1(b"g0", b"test");
    let g1 = crate::params::hash_to_g1(b"g1", b"test");
    let x = Scalar::random(&mut rng());
    let b0 = g0 * x;
    let b1 = g1 * x;

    let statement = Statement::new(vec![vec![g0], vec![g1]], vec![b0, b1]);
    let witness = Witness::new(vec![x]);
    let proof = prove(&statement, &witness, &mut rng()).unwrap();
    assert!(verify(&statement, &proof));

    let mut swapped = statement.clone();
    swapped.f[0][0] = g1;
    assert!(!verify(&swapped, &proof));
}

#[test]
fn two_commitment_equality_accepts() {
    let g0 = crate::params::hash_to_g1(b"g0", b"test");
    let h0 = crate::params::hash_to_g1(b"h0", b"test");
    let g1 = crate::params::hash_to_g1(b"g1", b"test");
    let h1 = crate::params::hash_to_g1(b"h1", b"test");

    let mut r = rng();
    let x = Scalar::random(&mut r);
    let r0 = Scalar::random(&mut r);
    let r1 = Scalar::random(&mut r);

    let c0 = g0 * x + h0 * r0;
    let c1 = g1 * x + h1 * r1;

    let identity = G1Projective::identity();
    let statement = Statement::new(
        vec![vec![g0, h0, identity], vec![g1, identity, h1]],
        vec![c0, c1],
    );
    let witness = Witness::new(vec![x, r0, r1]);

    let proof = prove(&statement, &witness, &mut r).unwrap();
    assert!(verify(&statement, &proof));
}

#[test]
fn witness_length_mismatch_is_rejected() {
    let g = G1Projective::generator();
    let x = Scalar::random(&mut rng());
    let a = g * x;
    let statement = Statement::new(vec![vec![g]], vec![a]);
    let witness = Witness::new(vec![x, x]);
    assert!(matches!(
        prove(&statement, &witness, &mut rng()),
        Err(crate::Error::WitnessLengthMismatch)
    ));
}

#[test]
fn malformed_statement_is_rejected() {
    let g = G1Projective::generator();
    let statement = Statement::new(vec![vec![g], vec![g, g]], vec![g, g]);
    let witness = Witness::new(vec![Scalar::one()]);
    assert!(matches!(
        prove(&statement, &witness, &mut rng()),
        Err(crate::Error::MalformedStatement)
    ));
}

#[test]
fn transcript_is_deterministic() {
    let g = G1Projective::generator();
    let x = Scalar::random(&mut rng());
    let a = g * x;
    let statement = Statement::new(vec![vec![g]], vec![a]);

    let r = vec![g * Scalar::random(&mut rng())];
    let c1 = super::challenge_hash(&statement, &r);
    let c2 = super::challenge_hash(&statement, &r);
    assert_eq!(c1, c2);
}
