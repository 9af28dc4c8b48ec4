//! Lifted ElGamal over vectors with bounded decryption.
//!
//! Messages live in the exponent, so decryption ends in a discrete-log
//! search and only recovers values in `[0, bound)`.

use ark_ff::UniformRand;
use rand::{CryptoRng, Rng};
use tracing::debug;

use crate::dlog::DlogTable;
use crate::error::Result;
use crate::group::{mul_generator, Point, Scalar};
use crate::types::{Ciphertext, MasterPublicKey, MasterSecretKey};
use crate::util::{ensure_len, linear_combination};

/// PKE.Setup(len)
///
/// # Arguments
/// * `len` - Number of coordinates
/// * `rng` - Cryptographically secure RNG
///
/// # Returns
/// * `(MasterPublicKey, MasterSecretKey)` with `mpk[i] = msk[i]·G`
pub fn setup<R: Rng + CryptoRng + ?Sized>(
    len: usize,
    rng: &mut R,
) -> (MasterPublicKey, MasterSecretKey) {
    let scalars: Vec<Scalar> = (0..len).map(|_| Scalar::rand(rng)).collect();
    let points = scalars.iter().map(mul_generator).collect();

    debug!(len, "pke setup");
    (MasterPublicKey { points }, MasterSecretKey { scalars })
}

/// PKE.Encrypt(len, mpk, msg)
///
/// One randomness scalar `r` is shared across all coordinates:
/// `ct0 = r·G`, `ct1[i] = msg[i]·G + r·mpk[i]`.
pub fn encrypt<R: Rng + CryptoRng + ?Sized>(
    len: usize,
    mpk: &MasterPublicKey,
    msg: &[Scalar],
    rng: &mut R,
) -> Result<Ciphertext> {
    ensure_len("mpk", &mpk.points, len)?;
    ensure_len("message", msg, len)?;

    let r = Scalar::rand(rng);
    let ct0 = mul_generator(&r);
    let ct1 = msg
        .iter()
        .zip(mpk.points.iter())
        .map(|(m, pk)| mul_generator(m) + *pk * r)
        .collect();

    Ok(Ciphertext { ct0, ct1 })
}

/// Offline half of decryption: `ct2 = Σ f[i]·ct1[i]`. Needs no secret.
pub fn decrypt_offline(f: &[Scalar], ct1: &[Point]) -> Result<Point> {
    ensure_len("ct1", ct1, f.len())?;
    linear_combination(ct1, f)
}

/// Online half of decryption: solve `v·G = ct2 - sk_f·ct0` for `v < bound`.
pub fn decrypt_online(sk_f: &Scalar, ct0: &Point, ct2: &Point, bound: u64) -> Result<u64> {
    decrypt_online_with_table(sk_f, ct0, ct2, &DlogTable::new(bound)?)
}

/// As [`decrypt_online`], reusing a prebuilt table.
pub fn decrypt_online_with_table(
    sk_f: &Scalar,
    ct0: &Point,
    ct2: &Point,
    table: &DlogTable,
) -> Result<u64> {
    let target = *ct2 - *ct0 * *sk_f;
    table.solve(&target)
}

/// PKE.Decrypt(f, sk_f, ct, bound): offline then online.
pub fn decrypt(f: &[Scalar], sk_f: &Scalar, ct: &Ciphertext, bound: u64) -> Result<u64> {
    let ct2 = decrypt_offline(f, &ct.ct1)?;
    decrypt_online(sk_f, &ct.ct0, &ct2, bound)
}

/// Decrypt every coordinate with the master secret: `m_i·G = ct1[i] - msk[i]·ct0`.
pub fn decrypt_vector(msk: &MasterSecretKey, ct: &Ciphertext, bound: u64) -> Result<Vec<u64>> {
    ensure_len("ct1", &ct.ct1, msk.scalars.len())?;

    let table = DlogTable::new(bound)?;
    msk.scalars
        .iter()
        .zip(ct.ct1.iter())
        .map(|(sk, c)| decrypt_online_with_table(sk, &ct.ct0, c, &table))
        .collect()
}
