//!
//! Module containing the error kinds shared by every layer of the crate.
//!

use thiserror::Error;

#[macro_export]
macro_rules! bail {
    ($e:expr) => {
        return Err($e);
    };
}

#[macro_export(local_inner_macros)]
macro_rules! ensure {
    ($cond:expr, $e:expr) => {
        if !($cond) {
            bail!($e);
        }
    };
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("statement is malformed: row lengths or output dimension disagree")]
    MalformedStatement,

    #[error("witness length does not match the statement's input dimension")]
    WitnessLengthMismatch,

    #[error("requested bitlength exceeds the supported range-proof cap")]
    Unsupported,

    #[error("invalid parameter")]
    InvalidParameter,

    #[error("failed to read randomness from the CSPRNG")]
    RandomnessFailure,

    #[error("canonical byte encoding failed")]
    EncodingFailure,

    #[error("prover-side self-check failed: statement and witness disagree")]
    InternalConsistency,

    #[error("verification failed")]
    VerificationFailure,
}
