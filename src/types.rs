use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use zeroize::Zeroize;

use crate::group::{Point, Scalar};

/// Master public key: `mpk[i] = msk[i]·G`
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct MasterPublicKey {
    pub points: Vec<Point>,
}

/// Master secret key, one scalar per coordinate. Zeroized on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct MasterSecretKey {
    pub scalars: Vec<Scalar>,
}

impl Drop for MasterSecretKey {
    fn drop(&mut self) {
        self.scalars.zeroize();
    }
}

impl std::fmt::Debug for MasterSecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterSecretKey")
            .field("len", &self.scalars.len())
            .finish_non_exhaustive()
    }
}

/// Lifted ElGamal ciphertext of a vector
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct Ciphertext {
    /// `r·G`, the randomness shared by every coordinate
    pub ct0: Point,
    /// `msg[i]·G + r·mpk[i]`
    pub ct1: Vec<Point>,
}

/// Published once by the seller: the master public key and the encrypted
/// witness.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct Advertisement {
    pub mpk: MasterPublicKey,
    pub ct0: Point,
    pub ct1: Vec<Point>,
}

impl Advertisement {
    pub fn ciphertext(&self) -> Ciphertext {
        Ciphertext {
            ct0: self.ct0,
            ct1: self.ct1.clone(),
        }
    }
}

/// The seller's secrets for one advertisement: the master secret key and
/// the blinding vector `t` that derives every `pi_f`.
pub struct SellerState {
    pub msk: MasterSecretKey,
    pub t: Vec<Scalar>,
}

impl Drop for SellerState {
    fn drop(&mut self) {
        self.t.zeroize();
    }
}

impl std::fmt::Debug for SellerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SellerState")
            .field("msk", &self.msk)
            .field("t_len", &self.t.len())
            .finish()
    }
}

/// Per-function public artifact. `aux_f` is also the adaptor statement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct AuxProof {
    /// `sk_f·G` for the augmented function `f ‖ [pi_f]`
    pub aux_f: Point,
    /// `<f, t> mod n`
    pub pi_f: Scalar,
}
