//!
//! A rate-limited anonymous credential: a BBS-style short signature over a
//! pairing-friendly curve, shown unlinkably with a per-origin pseudonymous
//! ticket and a hidden rate-limit counter.
//!
//! Three layers, leaves first: [`linear`] is a generic non-interactive
//! Sigma-protocol proof of knowledge for linear relations over a
//! prime-order group (Maurer's construction, Fiat-Shamir transformed);
//! [`range`] is a bit-decomposition range proof expressed as a single
//! `linear` instance; [`token`] composes both into issuer key generation,
//! direct issuance, and unlinkable showing with a rate-limit proof.
//!

#[macro_use]
mod error;
pub mod linear;
mod params;
pub mod range;
pub mod token;
mod transcript;

pub use error::{Error, Result};
pub use params::SystemParams;

#[cfg(test)]
#[path = "tests/fixtures.rs"]
mod fixtures;

#[cfg(test)]
#[path = "tests/integration_tests.rs"]
mod integration_tests;
