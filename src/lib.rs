//! Functional Adaptor Signatures (FAS) over BLS12-381
//!
//! A seller commits to a hidden vector `w` (the witness). For any linear
//! function `f` a buyer picks, the two parties atomically exchange a valid
//! Schnorr signature for the ability to decrypt `<f, w>`, as long as that
//! value lies below a public bound.
//!
//! The crate is built in layers, each usable on its own:
//! - [`group`]: G1 arithmetic, encodings, tagged hashing
//! - [`pke`]: lifted ElGamal over vectors with bounded decryption
//! - [`dlog`]: baby-step giant-step search used by decryption
//! - [`ipfe`]: inner-product functional encryption on top of [`pke`]
//! - [`schnorr`] / [`adaptor`]: signatures and adaptor signatures
//! - [`fas`]: the protocol tying functional keys to adaptor statements
//!
//! Design choices:
//! - Group: BLS12-381 G1 via Arkworks; 48-byte compressed points, 32-byte
//!   big-endian scalars
//! - Vectors are dense slices validated for exact length at every boundary
//! - `PubKGen` and offline decryption fan out over a Rayon pool
//! - Only non-negative witness and function entries are supported for
//!   extraction; negative values wrap modulo the group order and fall outside
//!   any practical bound
//!
//! Minimal flow:
//! - `Fas::adgen` -> `Fas::auxgen` -> `Fas::aux_verify`
//! - `Fas::fpresign` -> `Fas::fpreverify` -> `Fas::adapt`
//! - `schnorr::verify` -> `Fas::fext`

pub mod adaptor;
pub mod config;
pub mod dlog;
pub mod error;
pub mod fas;
pub mod group;
pub mod ipfe;
pub mod parallel;
pub mod pke;
pub mod schnorr;
pub mod types;
pub mod util;

pub use adaptor::PreSignature;
pub use config::FasConfig;
pub use error::{FasError, Result};
pub use fas::{Fas, StatementEntry};
pub use group::{Point, Scalar};
pub use schnorr::{KeyPair, Signature};
pub use types::{Advertisement, AuxProof, Ciphertext, MasterPublicKey, MasterSecretKey, SellerState};
