use licensing_ecc::arithmetic::{Modular, Point, Scalar};
use licensing_ecc::{
    derive_public_key, generate_keypair, sign, verify, EccError, Keypair, PublicKey, Secp256k1,
    Signature,
};

use rand_chacha::ChaChaRng;
use rand_core::SeedableRng;

use std::sync::Arc;
use std::thread;

const QUOTE: &str = "Friends are the adventures of life. - MacGyver";

#[test]
fn license_flow() {
    let (private_key, public_key) = generate_keypair();
    assert_eq!(derive_public_key(&private_key).unwrap(), public_key);

    let license = br#"{"licensee":"ACME","edition":"enterprise"}"#;
    let signature = sign([&license[..]], &private_key).unwrap();
    assert!(verify([&license[..]], &signature, &public_key));

    let mut tampered = license.to_vec();
    tampered[14] ^= 1;
    assert!(!verify([tampered], &signature, &public_key));
}

#[test]
fn uncompressed_public_keys_verify_too() {
    let mut rng = ChaChaRng::from_seed([21; 32]);
    let keypair = Keypair::random(&mut rng);
    let signature = keypair.sign_with_rng([QUOTE], &mut rng).to_bytes();

    let uncompressed = keypair.public_key().to_uncompressed_bytes();
    assert_eq!(uncompressed.len(), 65);
    assert!(verify([QUOTE], &signature, &uncompressed));
    assert_eq!(
        PublicKey::from_bytes(&uncompressed).unwrap(),
        *keypair.public_key()
    );
}

#[test]
fn identity_public_key_never_verifies() {
    let keypair = Keypair::from_bytes(&[0x31; 32]).unwrap();
    let signature = keypair.sign([QUOTE]).to_bytes();
    assert!(!verify([QUOTE], &signature, &[0x00]));
    assert!(matches!(
        PublicKey::from_point(Point::IDENTITY),
        Err(EccError::InvalidEncoding(_))
    ));
}

#[test]
fn scalar_multiples_of_the_generator_agree() {
    let mut rng = ChaChaRng::from_seed([33; 32]);
    let g = Point::<Secp256k1>::GENERATOR;
    for _ in 0..8 {
        let k1 = Scalar::<Secp256k1>::random(&mut rng);
        let k2 = Scalar::<Secp256k1>::random(&mut rng);
        let lhs = g.scalar_mul(&k1).unwrap().add(&g.scalar_mul(&k2).unwrap()).unwrap();
        assert_eq!(lhs, g.scalar_mul(&(k1 + k2)).unwrap());

        let encoded = lhs.to_bytes(true);
        assert_eq!(Point::<Secp256k1>::from_bytes(&encoded).unwrap(), lhs);
        let encoded = lhs.to_bytes(false);
        assert_eq!(Point::<Secp256k1>::from_bytes(&encoded).unwrap(), lhs);
    }
    assert!(g.scalar_mul(&Scalar::ZERO).unwrap().is_identity());
    assert!(!Scalar::<Secp256k1>::ONE.is_zero());
}

#[test]
fn concurrent_signers_do_not_interfere() {
    let keypair = Arc::new(Keypair::generate());
    let handles: Vec<_> = (0..4u8)
        .map(|i| {
            let keypair = Arc::clone(&keypair);
            thread::spawn(move || {
                let message = vec![i; 128];
                let signature = keypair.sign([&message]);
                (message, signature)
            })
        })
        .collect();

    let results: Vec<(Vec<u8>, Signature)> =
        handles.into_iter().map(|h| h.join().unwrap()).collect();
    for (i, (message, signature)) in results.iter().enumerate() {
        assert!(keypair.verify([message], signature));
        for (j, (other, _)) in results.iter().enumerate() {
            if i != j {
                assert!(!keypair.verify([other], signature));
            }
        }
    }
}
