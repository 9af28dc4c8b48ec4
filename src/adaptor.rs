//! Schnorr adaptor signatures for the discrete-log relation `Y = y·G`.
//!
//! A pre-signature commits to the final nonce point `R = k·G + Y` but its
//! response is missing `y`, so it is not a valid signature until adapted.
//! Once the adapted signature is public, anyone holding the pre-signature can
//! recover `y`.
//!
//! ```text
//! R  = k·G + Y              (pre_sign)
//! ŝ  = k + e·sk             e = H_challenge(R, P, msg)
//! ŝ·G == R - Y + e·P        (pre_verify)
//! s  = ŝ + y                (adapt)   ->  s·G == R + e·P
//! y  = s - ŝ                (extract)
//! ```

use ark_ff::Zero;
use tracing::trace;

use crate::error::{FasError, Result};
use crate::group::{mul_generator, point_to_bytes, Point, Scalar};
use crate::schnorr::{self, challenge, decode_parts, derive_nonce, encode_parts, Signature, SIGNATURE_LEN};

const ADAPTOR_NONCE_TAG: &str = "FAS/adaptor-nonce";

/// Pre-signature in wire form: `R (48 bytes) || ŝ (32 bytes)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PreSignature([u8; SIGNATURE_LEN]);

impl PreSignature {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; SIGNATURE_LEN] = bytes
            .try_into()
            .map_err(|_| FasError::Decode("pre-signature must be 80 bytes"))?;
        Ok(Self(arr))
    }

    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Final nonce point `R` and partial response `ŝ`.
    pub fn parts(&self) -> Result<(Point, Scalar)> {
        decode_parts(&self.0)
    }
}

/// Adaptor.PreSign(msg, sk, auxRand, Y)
///
/// # Arguments
/// * `msg` - Message bytes
/// * `sk` - Signer's non-zero secret key
/// * `aux_rand` - Fresh auxiliary randomness mixed into the nonce
/// * `statement` - Hard-relation statement `Y`
///
/// The statement is hashed into the nonce, so the same key and message never
/// share a nonce across two different statements.
pub fn pre_sign(msg: &[u8], sk: &Scalar, aux_rand: &[u8; 32], statement: &Point) -> Result<PreSignature> {
    if sk.is_zero() {
        return Err(FasError::InvalidSecretKey);
    }
    let pk = schnorr::keygen(sk);

    let k = derive_nonce(
        ADAPTOR_NONCE_TAG,
        sk,
        &pk,
        aux_rand,
        &point_to_bytes(statement),
        msg,
    )?;
    let r = mul_generator(&k) + statement;
    if r.is_zero() {
        return Err(FasError::DegenerateNonce);
    }

    let e = challenge(&r, &pk, msg);
    let s_hat = k + e * sk;

    Ok(PreSignature(encode_parts(&r, &s_hat)))
}

/// Adaptor.PreVerify(msg, pk, presig, Y). False on any failure.
///
/// Rejects the identity as public key (forgeable without a secret) and as
/// statement (its witness is `0`).
pub fn pre_verify(msg: &[u8], pk: &Point, presig: &PreSignature, statement: &Point) -> bool {
    if pk.is_zero() || statement.is_zero() {
        return false;
    }
    let Ok((r, s_hat)) = presig.parts() else {
        return false;
    };
    let e = challenge(&r, pk, msg);
    let ok = mul_generator(&s_hat) == r - statement + *pk * e;
    trace!(ok, "adaptor pre-verification");
    ok
}

/// Adaptor.Adapt(presig, y): complete the pre-signature with the witness.
///
/// Does not re-run [`pre_verify`]; the result is only a valid signature when
/// the pre-signature verified against `y·G`.
pub fn adapt(presig: &PreSignature, witness: &Scalar) -> Result<Signature> {
    let (r, s_hat) = presig.parts()?;
    let s = s_hat + witness;
    Ok(Signature::from_parts(&r, &s))
}

/// Adaptor.Extract(presig, sig): `y = s - ŝ`
///
/// Plain arithmetic with no validity check. Callers that need the guarantee
/// compare `y·G` against the statement.
pub fn extract(presig: &PreSignature, sig: &Signature) -> Result<Scalar> {
    let (_, s_hat) = presig.parts()?;
    let (_, s) = sig.parts()?;
    Ok(s - s_hat)
}
