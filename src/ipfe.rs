//! Inner-product functional encryption on top of the lifted ElGamal layer.
//!
//! A functional key for `f` is `sk_f = Σ f[i]·msk[i]`, which decrypts
//! `<f, msg>` and nothing else about `msg`. Its public image `sk_f·G` can be
//! computed by anyone from `mpk` alone, which is what lets a buyer check a
//! seller's commitment to a key without seeing it.

use rand::{CryptoRng, Rng};
use tracing::debug;

use crate::error::Result;
use crate::group::{Point, Scalar};
use crate::parallel::WorkerPool;
use crate::pke;
use crate::types::{Ciphertext, MasterPublicKey, MasterSecretKey};
use crate::util::{ensure_len, field_inner_product};

/// IPFE.Setup = PKE.Setup
pub fn setup<R: Rng + CryptoRng + ?Sized>(
    len: usize,
    rng: &mut R,
) -> (MasterPublicKey, MasterSecretKey) {
    pke::setup(len, rng)
}

/// IPFE.Enc = PKE.Encrypt
pub fn encrypt<R: Rng + CryptoRng + ?Sized>(
    len: usize,
    mpk: &MasterPublicKey,
    msg: &[Scalar],
    rng: &mut R,
) -> Result<Ciphertext> {
    pke::encrypt(len, mpk, msg, rng)
}

/// IPFE.KGen(msk, f): functional secret key `Σ f[i]·msk[i] mod n`
///
/// # Arguments
/// * `len` - Configured dimension
/// * `msk` - Master secret key of that dimension
/// * `f` - Function vector of that dimension
pub fn kgen(len: usize, msk: &MasterSecretKey, f: &[Scalar]) -> Result<Scalar> {
    ensure_len("msk", &msk.scalars, len)?;
    ensure_len("function", f, len)?;
    field_inner_product(f, &msk.scalars)
}

/// IPFE.PubKGen(mpk, f): public functional key `Σ f[i]·mpk[i]`
///
/// Equals `kgen(msk, f)·G` for the matching master secret. The scalar
/// multiplications are fanned out over `pool` and folded by point addition.
pub fn pubkgen(pool: &WorkerPool, len: usize, mpk: &MasterPublicKey, f: &[Scalar]) -> Result<Point> {
    ensure_len("mpk", &mpk.points, len)?;
    ensure_len("function", f, len)?;
    debug!(len, workers = pool.workers(), "ipfe pubkgen");
    pool.linear_combination(&mpk.points, f)
}

/// Offline decryption `ct2 = Σ f[i]·ct1[i]`, parallel like [`pubkgen`].
/// Needs no secret, so it can run before the functional key is known.
pub fn dec_offline(pool: &WorkerPool, len: usize, f: &[Scalar], ct1: &[Point]) -> Result<Point> {
    ensure_len("function", f, len)?;
    ensure_len("ct1", ct1, len)?;
    debug!(len, workers = pool.workers(), "ipfe offline decryption");
    pool.linear_combination(ct1, f)
}

/// Online decryption: recover `<f, msg>` in `[0, bound)` from `ct2`.
pub fn dec_online(sk_f: &Scalar, ct0: &Point, ct2: &Point, bound: u64) -> Result<u64> {
    pke::decrypt_online(sk_f, ct0, ct2, bound)
}

/// IPFE.Dec = offline + online.
pub fn dec(
    pool: &WorkerPool,
    len: usize,
    f: &[Scalar],
    sk_f: &Scalar,
    ct: &Ciphertext,
    bound: u64,
) -> Result<u64> {
    let ct2 = dec_offline(pool, len, f, &ct.ct1)?;
    dec_online(sk_f, &ct.ct0, &ct2, bound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FasError;
    use crate::group::mul_generator;
    use crate::util::scalars_from_u64;
    use ark_ff::UniformRand;
    use ark_std::rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::Rng as RandRng;

    #[test]
    fn public_key_matches_secret_key() {
        let mut rng = StdRng::seed_from_u64(42);
        let pool = WorkerPool::new(Some(4)).unwrap();
        let n = 16;
        let (mpk, msk) = setup(n, &mut rng);

        for _ in 0..5 {
            let f: Vec<Scalar> = (0..n).map(|_| Scalar::rand(&mut rng)).collect();
            let sk_f = kgen(n, &msk, &f).unwrap();
            let pk_f = pubkgen(&pool, n, &mpk, &f).unwrap();
            assert_eq!(pk_f, mul_generator(&sk_f));
        }
    }

    #[test]
    fn pubkgen_is_deterministic_across_pool_sizes() {
        let mut rng = StdRng::seed_from_u64(11);
        let n = 23;
        let (mpk, _msk) = setup(n, &mut rng);
        let f: Vec<Scalar> = (0..n).map(|_| Scalar::rand(&mut rng)).collect();

        let single = pubkgen(&WorkerPool::new(Some(1)).unwrap(), n, &mpk, &f).unwrap();
        let many = pubkgen(&WorkerPool::new(Some(6)).unwrap(), n, &mpk, &f).unwrap();
        assert_eq!(single, many);
    }

    #[test]
    fn full_ipfe_flow() {
        let mut rng = StdRng::seed_from_u64(999);
        let pool = WorkerPool::new(None).unwrap();
        let n = 10;
        let (mpk, msk) = setup(n, &mut rng);

        for test_num in 0..5 {
            let x: Vec<u64> = (0..n).map(|_| rng.gen_range(0..10)).collect();
            let y: Vec<u64> = (0..n).map(|_| rng.gen_range(0..10)).collect();
            let expected: u64 = x.iter().zip(y.iter()).map(|(a, b)| a * b).sum();

            let f = scalars_from_u64(&x);
            let ct = encrypt(n, &mpk, &scalars_from_u64(&y), &mut rng).unwrap();
            let sk_f = kgen(n, &msk, &f).unwrap();

            let value = dec(&pool, n, &f, &sk_f, &ct, 1000).unwrap();
            assert_eq!(value, expected, "test {}: mismatch", test_num);

            // offline halves agree between the parallel and sequential paths
            let par = dec_offline(&pool, n, &f, &ct.ct1).unwrap();
            let seq = pke::decrypt_offline(&f, &ct.ct1).unwrap();
            assert_eq!(par, seq);
        }
    }

    #[test]
    fn kgen_rejects_wrong_dimensions() {
        let mut rng = StdRng::seed_from_u64(3);
        let (mpk, msk) = setup(4, &mut rng);
        let pool = WorkerPool::new(Some(2)).unwrap();
        let short = scalars_from_u64(&[1, 2, 3]);

        assert!(matches!(
            kgen(4, &msk, &short),
            Err(FasError::DimensionMismatch { what: "function", expected: 4, actual: 3 })
        ));
        assert!(matches!(
            kgen(5, &msk, &short),
            Err(FasError::DimensionMismatch { what: "msk", .. })
        ));
        assert!(pubkgen(&pool, 4, &mpk, &short).is_err());
    }
}
