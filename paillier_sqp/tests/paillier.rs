//! Cipher-level properties: round trips, homomorphic laws, key invariants.

use std::sync::OnceLock;

use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use paillier_sqp::{
    paillier_add, paillier_add_plain, paillier_decrypt, paillier_encrypt, paillier_keygen, paillier_keygen_with,
    paillier_scalar_mul, paillier_subtract, Ciphertext, PaillierConfig, PaillierError, PrivateKey, PublicKey,
};
use proptest::prelude::*;

const TEST_MSG: u64 = 9_589_489_438;

fn shared_keys() -> &'static (PublicKey, PrivateKey) {
    static KEYS: OnceLock<(PublicKey, PrivateKey)> = OnceLock::new();
    KEYS.get_or_init(|| paillier_keygen(512).unwrap())
}

#[test]
fn fixed_message_survives_fresh_keys() {
    for _ in 0..5 {
        let (pk, sk) = paillier_keygen(256).unwrap();
        let c = paillier_encrypt(&pk, &BigUint::from(TEST_MSG)).unwrap();
        assert_eq!(paillier_decrypt(&sk, &pk, &c).unwrap(), BigUint::from(TEST_MSG));
    }
}

#[test]
fn sampled_plaintexts_round_trip() {
    let (pk, sk) = shared_keys();
    let mut rng = rand::thread_rng();
    for _ in 0..50 {
        let m = rng.gen_biguint_below(pk.n());
        let c = paillier_encrypt(pk, &m).unwrap();
        assert_eq!(paillier_decrypt(sk, pk, &c).unwrap(), m);
    }
    let top = pk.n() - 1u32;
    let c = paillier_encrypt(pk, &top).unwrap();
    assert_eq!(paillier_decrypt(sk, pk, &c).unwrap(), top);
}

#[test]
fn encryption_is_probabilistic() {
    let (pk, sk) = shared_keys();
    let m = BigUint::from(123_456u32);
    let c1 = paillier_encrypt(pk, &m).unwrap();
    let c2 = paillier_encrypt(pk, &m).unwrap();
    assert_ne!(c1, c2);
    assert_eq!(paillier_decrypt(sk, pk, &c1).unwrap(), m);
    assert_eq!(paillier_decrypt(sk, pk, &c2).unwrap(), m);
}

#[test]
fn key_generation_invariants() {
    let config = PaillierConfig::with_key_bit_length(512).unwrap();
    let (pk, sk) = paillier_keygen_with(&config, &mut rand::thread_rng()).unwrap();
    assert!(pk.bits() >= 511 && pk.bits() <= 513);
    assert_eq!((sk.lambda() * sk.mu()) % pk.n(), BigUint::one());
    assert_eq!(*pk.g(), pk.n() + 1u32);
    assert!(pk.to_string().starts_with("Public Key:"));
}

#[test]
fn mismatched_keys_and_unreduced_ciphertexts_are_refused() {
    let (pk, sk) = shared_keys();
    let (other_pk, other_sk) = paillier_keygen(256).unwrap();
    let c = paillier_encrypt(pk, &BigUint::from(77u32)).unwrap();
    assert!(matches!(paillier_decrypt(&other_sk, pk, &c), Err(PaillierError::Decryption(_))));
    assert!(matches!(paillier_decrypt(sk, &other_pk, &c), Err(PaillierError::Decryption(_))));

    // a 512-bit key's ciphertext does not fit in Z_{n'^2} of a 256-bit key
    let wide = Ciphertext::from_raw(pk.n_squared() - 1u32, pk).unwrap();
    assert!(wide.value() >= other_pk.n_squared());
    assert!(matches!(
        paillier_decrypt(&other_sk, &other_pk, &wide),
        Err(PaillierError::Decryption(_))
    ));
}

#[test]
fn tampered_ciphertext_fails() {
    let (pk, sk) = shared_keys();
    // a multiple of n is never a valid ciphertext
    let forged = Ciphertext::from_raw(pk.n() * 3u32, pk).unwrap();
    assert!(matches!(paillier_decrypt(sk, pk, &forged), Err(PaillierError::Decryption(_))));
    assert!(Ciphertext::from_raw(pk.n_squared().clone(), pk).is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn addition_is_homomorphic(a in any::<u64>(), b in any::<u64>()) {
        let (pk, sk) = shared_keys();
        let (a, b) = (BigUint::from(a), BigUint::from(b));
        let c = paillier_add(&paillier_encrypt(pk, &a).unwrap(), &paillier_encrypt(pk, &b).unwrap(), pk);
        prop_assert_eq!(paillier_decrypt(sk, pk, &c).unwrap(), (a + b) % pk.n());
    }

    #[test]
    fn subtraction_is_homomorphic(a in any::<u64>(), b in any::<u64>()) {
        let (pk, sk) = shared_keys();
        let (a, b) = (BigUint::from(a), BigUint::from(b));
        let c = paillier_subtract(&paillier_encrypt(pk, &a).unwrap(), &paillier_encrypt(pk, &b).unwrap(), pk);
        let expected = (a + pk.n() - b) % pk.n();
        prop_assert_eq!(paillier_decrypt(sk, pk, &c).unwrap(), expected);
    }

    #[test]
    fn scalar_multiplication_is_homomorphic(m in any::<u64>(), k in any::<u32>()) {
        let (pk, sk) = shared_keys();
        let (m, k) = (BigUint::from(m), BigUint::from(k));
        let c = paillier_scalar_mul(&paillier_encrypt(pk, &m).unwrap(), &k, pk);
        prop_assert_eq!(paillier_decrypt(sk, pk, &c).unwrap(), (m * k) % pk.n());
    }

    #[test]
    fn plain_addition_matches_encrypted_addition(m in any::<u64>(), k in any::<u64>()) {
        let (pk, sk) = shared_keys();
        let (m, k) = (BigUint::from(m), BigUint::from(k));
        let c = paillier_add_plain(&paillier_encrypt(pk, &m).unwrap(), &k, pk);
        prop_assert_eq!(paillier_decrypt(sk, pk, &c).unwrap(), (m + k) % pk.n());
    }
}
