//! Group arithmetic over the BLS12-381 G1 subgroup.
//!
//! Every other layer works in this one group. Points travel as 48-byte
//! compressed encodings and scalars as 32-byte big-endian integers below the
//! group order.

use ark_bls12_381::{Fr, G1Affine, G1Projective};
use ark_ec::{CurveGroup, PrimeGroup};
use ark_ff::{BigInteger, PrimeField};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use sha2::{Digest, Sha256, Sha512};

use crate::error::{FasError, Result};

pub type Scalar = Fr;
pub type Point = G1Projective;

/// Length of a compressed G1 encoding.
pub const POINT_LEN: usize = 48;
/// Length of a big-endian scalar encoding.
pub const SCALAR_LEN: usize = 32;

/// The fixed generator `G`.
pub fn generator() -> Point {
    G1Projective::generator()
}

/// `s·G`
pub fn mul_generator(s: &Scalar) -> Point {
    generator() * *s
}

pub fn point_to_bytes(p: &Point) -> [u8; POINT_LEN] {
    affine_to_bytes(&p.into_affine())
}

pub fn affine_to_bytes(p: &G1Affine) -> [u8; POINT_LEN] {
    let mut out = [0u8; POINT_LEN];
    p.serialize_compressed(&mut out[..])
        .expect("compressed G1 encoding is 48 bytes");
    out
}

/// Parse a compressed point. Rejects off-curve and out-of-subgroup encodings.
pub fn point_from_bytes(bytes: &[u8]) -> Result<Point> {
    if bytes.len() != POINT_LEN {
        return Err(FasError::Decode("point must be 48 bytes"));
    }
    G1Affine::deserialize_compressed(bytes)
        .map(Point::from)
        .map_err(|_| FasError::Decode("invalid G1 point"))
}

pub fn scalar_to_bytes(s: &Scalar) -> [u8; SCALAR_LEN] {
    let mut out = [0u8; SCALAR_LEN];
    out.copy_from_slice(&s.into_bigint().to_bytes_be());
    out
}

/// Strict parse: the bytes must already be reduced modulo the group order.
pub fn scalar_from_bytes(bytes: &[u8]) -> Result<Scalar> {
    if bytes.len() != SCALAR_LEN {
        return Err(FasError::Decode("scalar must be 32 bytes"));
    }
    let s = Fr::from_be_bytes_mod_order(bytes);
    if scalar_to_bytes(&s)[..] != *bytes {
        return Err(FasError::Decode("scalar is not below the group order"));
    }
    Ok(s)
}

/// Interpret arbitrary big-endian bytes as an integer reduced modulo `n`.
pub fn scalar_from_bytes_reduced(bytes: &[u8]) -> Scalar {
    Fr::from_be_bytes_mod_order(bytes)
}

/// 32-byte tagged hash: `SHA256(SHA256(tag) || SHA256(tag) || parts...)`.
pub fn tagged_hash(tag: &str, parts: &[&[u8]]) -> [u8; 32] {
    let tag_hash = Sha256::digest(tag.as_bytes());
    let mut hasher = Sha256::new();
    hasher.update(tag_hash);
    hasher.update(tag_hash);
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Tagged hash onto the scalar field.
///
/// Uses a 64-byte SHA-512 body so the reduction modulo `n` carries no
/// measurable bias.
pub fn hash_to_scalar(tag: &str, parts: &[&[u8]]) -> Scalar {
    let tag_hash = Sha256::digest(tag.as_bytes());
    let mut hasher = Sha512::new();
    hasher.update(tag_hash);
    hasher.update(tag_hash);
    for part in parts {
        hasher.update(part);
    }
    Fr::from_be_bytes_mod_order(&hasher.finalize())
}
