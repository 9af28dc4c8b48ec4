//! Functional adaptor signatures.
//!
//! The seller advertises an encrypted witness once. For each function `f`
//! a buyer asks about, the seller publishes an [`AuxProof`] whose `aux_f`
//! is the public image of the IPFE functional key for `f ‖ [pi_f]`. That
//! point doubles as the adaptor statement: when the seller adapts the
//! buyer's pre-signature, the signature reveals `sk_f`, and `sk_f`
//! decrypts `<f, witness>`.
//!
//! The witness is padded with `0` and the function with `pi_f = <f, t>`,
//! so the padding contributes nothing to the inner product. `pi_f` exists
//! only so that [`Fas::aux_verify`] can tie `aux_f` to `f` using public
//! data.

use ark_ff::{UniformRand, Zero};
use rand::{CryptoRng, Rng};
use tracing::{debug, trace};

use crate::adaptor::{self, PreSignature};
use crate::config::FasConfig;
use crate::error::Result;
use crate::group::{mul_generator, Point, Scalar, SCALAR_LEN};
use crate::ipfe;
use crate::parallel::WorkerPool;
use crate::schnorr::Signature;
use crate::types::{Advertisement, AuxProof, SellerState};
use crate::util::{augment, ensure_len, field_inner_product};

/// One entry of the public statement an advertisement is made against.
/// Only its count is checked; no proof is attached to it.
pub type StatementEntry = [u8; SCALAR_LEN];

/// FAS context: dimension, worker pool and logging settings.
#[derive(Debug)]
pub struct Fas {
    config: FasConfig,
    pool: WorkerPool,
}

impl Fas {
    pub fn new(config: FasConfig) -> Result<Self> {
        config.validate()?;
        let pool = WorkerPool::new(config.workers)?;
        debug!(faslen = config.faslen, workers = pool.workers(), "fas context ready");
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &FasConfig {
        &self.config
    }

    pub fn faslen(&self) -> usize {
        self.config.faslen
    }

    pub fn ipfelen(&self) -> usize {
        self.config.ipfelen()
    }

    fn check_advertisement(&self, advt: &Advertisement) -> Result<()> {
        ensure_len("advertisement mpk", &advt.mpk.points, self.ipfelen())?;
        ensure_len("advertisement ct1", &advt.ct1, self.ipfelen())
    }

    /// `f ‖ [pi_f]`, after checking `f`.
    fn f_tilde(&self, f: &[Scalar], pi_f: Scalar) -> Result<Vec<Scalar>> {
        ensure_len("function", f, self.faslen())?;
        Ok(augment(f, pi_f))
    }

    /// Seller-side derivation of `(pi_f, sk_f)` from the secret state.
    fn derive_function_key(&self, st: &SellerState, f: &[Scalar]) -> Result<(Scalar, Scalar)> {
        ensure_len("function", f, self.faslen())?;
        ensure_len("seller state t", &st.t, self.faslen())?;

        let pi_f = field_inner_product(f, &st.t)?;
        let f_tilde = augment(f, pi_f);
        let sk_f = ipfe::kgen(self.ipfelen(), &st.msk, &f_tilde)?;
        Ok((pi_f, sk_f))
    }

    /// AdGen(statement, witness)
    ///
    /// # Arguments
    /// * `statement` - Public statement, one entry per witness coordinate
    /// * `witness` - Secret vector of length `faslen`
    /// * `rng` - Cryptographically secure RNG
    ///
    /// # Returns
    /// * `(Advertisement, SellerState)` - The published commitment to
    ///   `witness ‖ [0]` and the seller's secrets. Neither changes afterwards.
    pub fn adgen<R: Rng + CryptoRng + ?Sized>(
        &self,
        statement: &[StatementEntry],
        witness: &[Scalar],
        rng: &mut R,
    ) -> Result<(Advertisement, SellerState)> {
        ensure_len("statement", statement, self.faslen())?;
        ensure_len("witness", witness, self.faslen())?;

        let ipfelen = self.ipfelen();
        let (mpk, msk) = ipfe::setup(ipfelen, rng);
        let t: Vec<Scalar> = (0..self.faslen()).map(|_| Scalar::rand(rng)).collect();

        let witness_tilde = augment(witness, Scalar::zero());
        let ct = ipfe::encrypt(ipfelen, &mpk, &witness_tilde, rng)?;

        debug!(faslen = self.faslen(), "advertisement generated");
        if self.config.trace_intermediates {
            trace!(ct0 = ?ct.ct0, "advertisement randomness commitment");
        }

        let advt = Advertisement {
            mpk,
            ct0: ct.ct0,
            ct1: ct.ct1,
        };
        Ok((advt, SellerState { msk, t }))
    }

    /// AuxGen(advt, st, f) -> (aux_f, pi_f)
    ///
    /// The seller knows `msk`, so `aux_f = KGen(msk, f ‖ [pi_f])·G` is
    /// computed directly rather than through the public fold.
    pub fn auxgen(&self, advt: &Advertisement, st: &SellerState, f: &[Scalar]) -> Result<AuxProof> {
        self.check_advertisement(advt)?;
        let (pi_f, sk_f) = self.derive_function_key(st, f)?;
        let aux_f = mul_generator(&sk_f);

        debug!("aux proof generated");
        if self.config.trace_intermediates {
            trace!(aux_f = ?aux_f, pi_f = ?pi_f, "aux proof");
        }
        Ok(AuxProof { aux_f, pi_f })
    }

    /// AuxVerify(advt, f, aux_f, pi_f): `aux_f == PubKGen(mpk, f ‖ [pi_f])`
    ///
    /// Uses public data only.
    pub fn aux_verify(&self, advt: &Advertisement, f: &[Scalar], aux: &AuxProof) -> Result<bool> {
        self.check_advertisement(advt)?;
        let f_tilde = self.f_tilde(f, aux.pi_f)?;
        let expected = ipfe::pubkgen(&self.pool, self.ipfelen(), &advt.mpk, &f_tilde)?;

        let ok = expected == aux.aux_f;
        debug!(ok, "aux verification");
        Ok(ok)
    }

    /// FPreSign(advt, sk, msg, f, aux_f)
    ///
    /// Draws fresh auxiliary randomness and pre-signs against `aux_f`.
    pub fn fpresign<R: Rng + CryptoRng + ?Sized>(
        &self,
        advt: &Advertisement,
        sk: &Scalar,
        msg: &[u8],
        f: &[Scalar],
        aux_f: &Point,
        rng: &mut R,
    ) -> Result<PreSignature> {
        self.check_advertisement(advt)?;
        ensure_len("function", f, self.faslen())?;

        let mut aux_rand = [0u8; 32];
        rng.fill_bytes(&mut aux_rand);
        let presig = adaptor::pre_sign(msg, sk, &aux_rand, aux_f)?;

        debug!("functional pre-signature created");
        Ok(presig)
    }

    /// FPreVerify: `AuxVerify(...) && Adaptor.PreVerify(msg, pk, presig, aux_f)`
    ///
    /// A seller must not adapt, and a buyer must not rely on the exchange,
    /// unless this returns `true`.
    pub fn fpreverify(
        &self,
        advt: &Advertisement,
        pk: &Point,
        msg: &[u8],
        f: &[Scalar],
        aux: &AuxProof,
        presig: &PreSignature,
    ) -> Result<bool> {
        let ok = self.aux_verify(advt, f, aux)?
            && adaptor::pre_verify(msg, pk, presig, &aux.aux_f);
        debug!(ok, "functional pre-verification");
        Ok(ok)
    }

    /// Adapt(advt, st, f, presig)
    ///
    /// Re-derives `pi_f` and `sk_f` exactly as [`Fas::auxgen`] does and
    /// completes the pre-signature with `sk_f`. Does not re-check the
    /// pre-signature; run [`Fas::fpreverify`] first.
    pub fn adapt(
        &self,
        advt: &Advertisement,
        st: &SellerState,
        f: &[Scalar],
        presig: &PreSignature,
    ) -> Result<Signature> {
        self.check_advertisement(advt)?;
        let (_, sk_f) = self.derive_function_key(st, f)?;
        let sig = adaptor::adapt(presig, &sk_f)?;

        debug!("pre-signature adapted");
        Ok(sig)
    }

    /// FExt offline half: `ct2 = Σ (f ‖ [pi_f])[i]·ct1[i]`
    ///
    /// Independent of the signature; may run before it is published.
    pub fn fext_offline(&self, advt: &Advertisement, f: &[Scalar], pi_f: &Scalar) -> Result<Point> {
        self.check_advertisement(advt)?;
        let f_tilde = self.f_tilde(f, *pi_f)?;
        let ct2 = ipfe::dec_offline(&self.pool, self.ipfelen(), &f_tilde, &advt.ct1)?;

        if self.config.trace_intermediates {
            trace!(ct2 = ?ct2, "offline extraction");
        }
        Ok(ct2)
    }

    /// FExt online half: extract `sk_f` from `(presig, sig)` and decrypt.
    ///
    /// # Returns
    /// * `Ok(v)` - `<f, witness>` when it lies in `[0, bound)`
    /// * `Err(FasError::NotFoundInBound)` - the value is out of range, or
    ///   `sig` is not the adaptation of `presig`
    pub fn fext_online(
        &self,
        advt: &Advertisement,
        presig: &PreSignature,
        sig: &Signature,
        bound: u64,
        ct2: &Point,
    ) -> Result<u64> {
        let sk_f = adaptor::extract(presig, sig)?;
        let value = ipfe::dec_online(&sk_f, &advt.ct0, ct2, bound)?;

        debug!(bound, "functional extraction complete");
        Ok(value)
    }

    /// FExt = offline + online
    pub fn fext(
        &self,
        advt: &Advertisement,
        presig: &PreSignature,
        sig: &Signature,
        f: &[Scalar],
        pi_f: &Scalar,
        bound: u64,
    ) -> Result<u64> {
        let ct2 = self.fext_offline(advt, f, pi_f)?;
        self.fext_online(advt, presig, sig, bound, &ct2)
    }
}
