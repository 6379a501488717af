//! Byte oriented signing API used for licenses.
//!
//! Keys travel as plain byte buffers: 32 byte private keys, 33 byte
//! compressed public keys and 64 byte `r || s` signatures. Messages may be
//! split over several buffers which are hashed in order without being
//! concatenated.

use crate::arithmetic::Scalar;
use crate::ecdsa;
use crate::error::EccError;
use crate::hasher::digest_parts;
use crate::keys::{PrivateKey, PublicKey, Signature};

use rand_core::{CryptoRng, OsRng, RngCore};

/// A private key together with its public key.
#[derive(Clone, Debug)]
pub struct Keypair {
    private_key: PrivateKey,
    public_key: PublicKey,
}

impl Keypair {
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Self::from_private_key(PrivateKey::from_scalar(Scalar::random(rng)))
    }

    pub fn generate() -> Self {
        Self::random(&mut OsRng)
    }

    pub fn from_private_key(private_key: PrivateKey) -> Self {
        let public_key = private_key.public_key();
        Self {
            private_key,
            public_key,
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EccError> {
        PrivateKey::from_bytes(bytes).map(Self::from_private_key)
    }

    pub fn from_hex(hex_str: &str) -> Result<Self, EccError> {
        PrivateKey::from_hex(hex_str).map(Self::from_private_key)
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn sign<I>(&self, message_parts: I) -> Signature
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        self.sign_with_rng(message_parts, &mut OsRng)
    }

    pub fn sign_with_rng<I, R>(&self, message_parts: I, rng: &mut R) -> Signature
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
        R: RngCore + CryptoRng,
    {
        let digest = digest_parts(message_parts);
        // NOTE unwrap is fine here because the key was validated on
        // construction and the generator multiples never fail
        ecdsa::sign_digest(&digest, &self.private_key, rng).unwrap()
    }

    pub fn verify<I>(&self, message_parts: I, signature: &Signature) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        ecdsa::verify_digest(&digest_parts(message_parts), signature, &self.public_key)
    }
}

/// Fresh `(private key, compressed public key)` pair from the OS rng.
pub fn generate_keypair() -> ([u8; 32], Vec<u8>) {
    generate_keypair_with_rng(&mut OsRng)
}

pub fn generate_keypair_with_rng<R: RngCore + CryptoRng>(rng: &mut R) -> ([u8; 32], Vec<u8>) {
    let keypair = Keypair::random(rng);
    (
        keypair.private_key().to_bytes(),
        keypair.public_key().to_bytes(),
    )
}

/// Compressed public key of a 32 byte private key.
pub fn derive_public_key(private_key: &[u8]) -> Result<Vec<u8>, EccError> {
    Ok(PrivateKey::from_bytes(private_key)?.public_key().to_bytes())
}

/// Signs the concatenation of `message_parts` with a fresh random nonce.
pub fn sign<I>(message_parts: I, private_key: &[u8]) -> Result<[u8; 64], EccError>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    sign_with_rng(message_parts, private_key, &mut OsRng)
}

pub fn sign_with_rng<I, R>(
    message_parts: I,
    private_key: &[u8],
    rng: &mut R,
) -> Result<[u8; 64], EccError>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
    R: RngCore + CryptoRng,
{
    let key = PrivateKey::from_bytes(private_key)?;
    let digest = digest_parts(message_parts);
    Ok(ecdsa::sign_digest(&digest, &key, rng)?.to_bytes())
}

/// Checks a raw `r || s` signature against a SEC1 encoded public key.
///
/// Malformed input of any kind is reported as an invalid signature.
pub fn verify<I>(message_parts: I, signature: &[u8], public_key: &[u8]) -> bool
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let signature = match Signature::from_bytes(signature) {
        Ok(signature) => signature,
        Err(e) => {
            log::debug!("rejecting signature: {}", e);
            return false;
        }
    };
    let public_key = match PublicKey::from_bytes(public_key) {
        Ok(key) => key,
        Err(e) => {
            log::debug!("rejecting public key: {}", e);
            return false;
        }
    };
    ecdsa::verify_digest(&digest_parts(message_parts), &signature, &public_key)
}

/// Same as [`verify`] with the public key given as hex.
pub fn verify_hex<I>(message_parts: I, signature: &[u8], public_key_hex: &str) -> bool
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    match hex::decode(public_key_hex.trim()) {
        Ok(public_key) => verify(message_parts, signature, &public_key),
        Err(e) => {
            log::debug!("rejecting public key: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use rand_chacha::ChaChaRng;
    use rand_core::SeedableRng;

    const PRIVATE_KEY: &str = "1d3a2f4e5b6c7d8e9fa0b1c2d3e4f5061728394a5b6c7d8e9fa0b1c2d3e4f506";
    const PUBLIC_KEY: &str = "036ddffe1e65e45d3c2f71fc7030903c893133cc0eb10fd09c690c7346c332b3a2";
    const QUOTE: &[u8] = b"Friends are the adventures of life. - MacGyver";

    fn private_key() -> Vec<u8> {
        hex::decode(PRIVATE_KEY).unwrap()
    }

    #[test]
    fn keypair_generation() {
        let mut rng = ChaChaRng::from_seed([5; 32]);
        let (private, public) = generate_keypair_with_rng(&mut rng);
        assert_eq!(public.len(), 33);
        assert!(public[0] == 0x02 || public[0] == 0x03);
        assert_eq!(derive_public_key(&private).unwrap(), public);

        let (other_private, _) = generate_keypair();
        assert_ne!(other_private, private);
    }

    #[test]
    fn derivation_is_pure() {
        let first = derive_public_key(&private_key()).unwrap();
        let second = derive_public_key(&private_key()).unwrap();
        assert_eq!(first, second);
        assert_eq!(hex::encode(first), PUBLIC_KEY);

        assert_eq!(derive_public_key(&[0u8; 32]), Err(EccError::InvalidKey));
        assert_eq!(derive_public_key(&[0xff; 32]), Err(EccError::InvalidKey));
        assert_eq!(derive_public_key(&[1u8; 16]), Err(EccError::InvalidKey));
    }

    #[test]
    fn quote_signs_and_verifies() {
        let public = hex::decode(PUBLIC_KEY).unwrap();
        let signature = sign([QUOTE], &private_key()).unwrap();

        assert!(verify([QUOTE], &signature, &public));
        assert!(verify_hex([QUOTE], &signature, PUBLIC_KEY));
        assert!(!verify(
            [b"Friends are the adventures of life. - MacGyver!"],
            &signature,
            &public
        ));

        let other_public = derive_public_key(&[0x24; 32]).unwrap();
        assert!(!verify([QUOTE], &signature, &other_public));
    }

    #[test]
    fn message_parts_are_hashed_in_order() {
        let mut rng = ChaChaRng::from_seed([9; 32]);
        let public = derive_public_key(&private_key()).unwrap();
        let signature = sign_with_rng(
            [&b"Friends are the adventures"[..], b" of life. - MacGyver"],
            &private_key(),
            &mut rng,
        )
        .unwrap();

        assert!(verify([QUOTE], &signature, &public));
        assert!(verify(
            [&b"Friends"[..], b" are the ", b"adventures of life. - MacGyver"],
            &signature,
            &public
        ));
        assert!(!verify(
            [&b" of life. - MacGyver"[..], b"Friends are the adventures"],
            &signature,
            &public
        ));
    }

    #[test]
    fn malformed_input_is_rejected_not_raised() {
        let public = hex::decode(PUBLIC_KEY).unwrap();
        let signature = sign([QUOTE], &private_key()).unwrap();

        assert!(!verify([QUOTE], &signature[..63], &public));
        assert!(!verify([QUOTE], &[0u8; 64], &public));
        assert!(!verify([QUOTE], &signature, &public[..32]));
        assert!(!verify([QUOTE], &signature, &[0x00]));
        assert!(!verify_hex([QUOTE], &signature, "not hex"));

        let mut bad_tag = public.clone();
        bad_tag[0] = 0x05;
        assert!(!verify([QUOTE], &signature, &bad_tag));

        assert_eq!(sign([QUOTE], &[0u8; 32]), Err(EccError::InvalidKey));
    }

    #[test]
    fn keypair_round_trip() {
        let mut rng = ChaChaRng::from_seed([1; 32]);
        let keypair = Keypair::from_hex(PRIVATE_KEY).unwrap();
        assert_eq!(keypair.public_key().to_hex(), PUBLIC_KEY);

        let signature = keypair.sign_with_rng([QUOTE], &mut rng);
        assert!(keypair.verify([QUOTE], &signature));
        assert!(!keypair.verify([b"Friends"], &signature));

        let random = Keypair::random(&mut rng);
        assert!(!random.verify([QUOTE], &signature));
        assert!(random.verify([QUOTE], &random.sign([QUOTE])));
        assert_eq!(
            Keypair::from_bytes(&random.private_key().to_bytes())
                .unwrap()
                .public_key(),
            random.public_key()
        );
    }
}
