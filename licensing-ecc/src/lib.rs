//#![deny(warnings)]
#![deny(clippy::dbg_macro)]
#![deny(clippy::all)]

pub mod arithmetic;
pub mod curve;
pub mod ecdsa;
mod error;
pub mod hasher;
pub mod keys;
pub mod signer;

pub use bigint::U256;
pub use curve::{Curve, Secp256k1};
pub use error::EccError;
pub use hasher::{digest_parts, MessageHasher};
pub use keys::{PrivateKey, PublicKey, Signature};
pub use signer::{
    derive_public_key, generate_keypair, generate_keypair_with_rng, sign, sign_with_rng, verify,
    verify_hex, Keypair,
};
