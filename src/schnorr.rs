//! Schnorr signatures over BLS12-381 G1.
//!
//! A signature is `(R, s)` with `s·G = R + e·P` and
//! `e = H("FAS/challenge", R || P || msg)`. Nonces are derived BIP340-style
//! from the secret key masked with auxiliary randomness, so a weak or
//! repeated `aux_rand` never repeats a nonce across different messages.
//!
//! ```text
//! k = H("FAS/nonce", (sk XOR H_aux(aux_rand)) || P || msg)
//! R = k·G
//! s = k + e·sk
//! ```

use ark_ff::{UniformRand, Zero};
use rand::{CryptoRng, Rng};
use zeroize::Zeroize;

use crate::error::{FasError, Result};
use crate::group::{
    hash_to_scalar, mul_generator, point_from_bytes, point_to_bytes, scalar_from_bytes,
    scalar_to_bytes, tagged_hash, Point, Scalar, POINT_LEN, SCALAR_LEN,
};

/// `R (48 bytes) || s (32 bytes)`
pub const SIGNATURE_LEN: usize = POINT_LEN + SCALAR_LEN;

const CHALLENGE_TAG: &str = "FAS/challenge";
const AUX_TAG: &str = "FAS/aux";
const NONCE_TAG: &str = "FAS/nonce";

// ---------------------------------------------------------------------------
// Signature bytes
// ---------------------------------------------------------------------------

/// A Schnorr signature in wire form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature([u8; SIGNATURE_LEN]);

impl Signature {
    /// Accept any 80-byte string. Component validity is checked on use.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; SIGNATURE_LEN] = bytes
            .try_into()
            .map_err(|_| FasError::Decode("signature must be 80 bytes"))?;
        Ok(Self(arr))
    }

    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub(crate) fn from_parts(r: &Point, s: &Scalar) -> Self {
        Self(encode_parts(r, s))
    }

    /// Nonce point `R` and response `s`.
    pub fn parts(&self) -> Result<(Point, Scalar)> {
        decode_parts(&self.0)
    }
}

pub(crate) fn encode_parts(r: &Point, s: &Scalar) -> [u8; SIGNATURE_LEN] {
    let mut out = [0u8; SIGNATURE_LEN];
    out[..POINT_LEN].copy_from_slice(&point_to_bytes(r));
    out[POINT_LEN..].copy_from_slice(&scalar_to_bytes(s));
    out
}

pub(crate) fn decode_parts(bytes: &[u8; SIGNATURE_LEN]) -> Result<(Point, Scalar)> {
    let r = point_from_bytes(&bytes[..POINT_LEN])?;
    let s = scalar_from_bytes(&bytes[POINT_LEN..])?;
    Ok((r, s))
}

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// Signing key pair. The secret is zeroized on drop.
pub struct KeyPair {
    sk: Scalar,
    pk: Point,
}

impl KeyPair {
    pub fn generate<R: Rng + CryptoRng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let sk = Scalar::rand(rng);
            if !sk.is_zero() {
                return Self {
                    pk: keygen(&sk),
                    sk,
                };
            }
        }
    }

    pub fn from_secret(sk: Scalar) -> Result<Self> {
        if sk.is_zero() {
            return Err(FasError::InvalidSecretKey);
        }
        Ok(Self {
            pk: keygen(&sk),
            sk,
        })
    }

    pub fn secret(&self) -> &Scalar {
        &self.sk
    }

    pub fn public(&self) -> &Point {
        &self.pk
    }
}

impl Drop for KeyPair {
    fn drop(&mut self) {
        self.sk.zeroize();
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("pk", &self.pk)
            .finish_non_exhaustive()
    }
}

/// Schnorr.KeyGen(sk): `pk = sk·G`
pub fn keygen(sk: &Scalar) -> Point {
    mul_generator(sk)
}

// ---------------------------------------------------------------------------
// Hashes
// ---------------------------------------------------------------------------

pub(crate) fn challenge(r: &Point, pk: &Point, msg: &[u8]) -> Scalar {
    hash_to_scalar(
        CHALLENGE_TAG,
        &[&point_to_bytes(r)[..], &point_to_bytes(pk)[..], msg],
    )
}

/// Hedged nonce. `extra` is bound into the hash; the adaptor layer passes
/// the statement point there under its own tag.
pub(crate) fn derive_nonce(
    tag: &str,
    sk: &Scalar,
    pk: &Point,
    aux_rand: &[u8; 32],
    extra: &[u8],
    msg: &[u8],
) -> Result<Scalar> {
    let mask = tagged_hash(AUX_TAG, &[&aux_rand[..]]);
    let mut masked = scalar_to_bytes(sk);
    for (b, m) in masked.iter_mut().zip(mask.iter()) {
        *b ^= m;
    }

    let k = hash_to_scalar(tag, &[&masked[..], &point_to_bytes(pk)[..], extra, msg]);
    masked.zeroize();

    if k.is_zero() {
        return Err(FasError::DegenerateNonce);
    }
    Ok(k)
}

// ---------------------------------------------------------------------------
// Sign / verify
// ---------------------------------------------------------------------------

/// Schnorr.Sign(msg, sk)
///
/// # Arguments
/// * `msg` - Message bytes, any length
/// * `sk` - Non-zero secret key
/// * `aux_rand` - 32 bytes of fresh auxiliary randomness
pub fn sign(msg: &[u8], sk: &Scalar, aux_rand: &[u8; 32]) -> Result<Signature> {
    if sk.is_zero() {
        return Err(FasError::InvalidSecretKey);
    }
    let pk = keygen(sk);

    let k = derive_nonce(NONCE_TAG, sk, &pk, aux_rand, &[], msg)?;
    let r = mul_generator(&k);
    let e = challenge(&r, &pk, msg);
    let s = k + e * sk;

    Ok(Signature::from_parts(&r, &s))
}

/// Schnorr.Verify(msg, pk, sig). False on any mismatch or malformed input.
///
/// The identity is never a valid public key: under it the equation reduces
/// to `s·G == R`, which anyone can satisfy.
pub fn verify(msg: &[u8], pk: &Point, sig: &Signature) -> bool {
    if pk.is_zero() {
        return false;
    }
    let Ok((r, s)) = sig.parts() else {
        return false;
    };
    let e = challenge(&r, pk, msg);
    mul_generator(&s) == r + *pk * e
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_std::rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::RngCore;

    const MSG: &[u8] = b"functional adaptor signature test message";

    fn aux(rng: &mut StdRng) -> [u8; 32] {
        let mut out = [0u8; 32];
        rng.fill_bytes(&mut out);
        out
    }

    #[test]
    fn sign_then_verify() {
        let mut rng = StdRng::seed_from_u64(42);
        let kp = KeyPair::generate(&mut rng);
        let sig = sign(MSG, kp.secret(), &aux(&mut rng)).unwrap();
        assert!(verify(MSG, kp.public(), &sig));
    }

    #[test]
    fn verify_rejects_wrong_message_and_key() {
        let mut rng = StdRng::seed_from_u64(43);
        let kp = KeyPair::generate(&mut rng);
        let other = KeyPair::generate(&mut rng);
        let sig = sign(MSG, kp.secret(), &aux(&mut rng)).unwrap();

        assert!(!verify(b"another message", kp.public(), &sig));
        assert!(!verify(MSG, other.public(), &sig));
    }

    #[test]
    fn verify_rejects_tampered_signature() {
        let mut rng = StdRng::seed_from_u64(44);
        let kp = KeyPair::generate(&mut rng);
        let sig = sign(MSG, kp.secret(), &aux(&mut rng)).unwrap();

        for idx in [0, 10, POINT_LEN - 1, POINT_LEN, SIGNATURE_LEN - 1] {
            let mut bytes = sig.to_bytes();
            bytes[idx] ^= 0x01;
            let tampered = Signature::from_bytes(&bytes).unwrap();
            assert!(!verify(MSG, kp.public(), &tampered), "byte {} flipped", idx);
        }
    }

    #[test]
    fn signature_length_is_checked() {
        assert!(Signature::from_bytes(&[0u8; 64]).is_err());
        // well-sized garbage parses as bytes but never verifies
        let junk = Signature::from_bytes(&[0xffu8; SIGNATURE_LEN]).unwrap();
        assert!(!verify(MSG, &keygen(&Scalar::from(3u64)), &junk));
    }

    #[test]
    fn zero_secret_rejected() {
        assert!(matches!(
            KeyPair::from_secret(Scalar::zero()),
            Err(FasError::InvalidSecretKey)
        ));
        assert!(sign(MSG, &Scalar::zero(), &[0u8; 32]).is_err());
    }

    #[test]
    fn identity_public_key_rejected() {
        // s·G == R holds for any s when P is the identity
        let s = Scalar::from(12345u64);
        let forged = Signature::from_parts(&mul_generator(&s), &s);
        assert!(!verify(MSG, &Point::zero(), &forged));

        let identity = point_from_bytes(&point_to_bytes(&Point::zero())).unwrap();
        assert!(!verify(MSG, &identity, &forged));
    }

    #[test]
    fn nonce_depends_on_aux_rand() {
        let sk = Scalar::from(3u64);
        let a = sign(MSG, &sk, &[1u8; 32]).unwrap();
        let b = sign(MSG, &sk, &[1u8; 32]).unwrap();
        let c = sign(MSG, &sk, &[2u8; 32]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(verify(MSG, &keygen(&sk), &c));
    }
}
