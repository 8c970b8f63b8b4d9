use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::One;
use rand::Rng;

use crate::ciphertext::Ciphertext;
use crate::error::{PaillierError, Result};
use crate::keygen::PublicKey;
use crate::modular::mod_pow;

/// Encrypts `m` under `pubkey` using the thread-local RNG.
///
/// See [`paillier_encrypt_with_rng`].
pub fn paillier_encrypt(pubkey: &PublicKey, m: &BigUint) -> Result<Ciphertext> {
    paillier_encrypt_with_rng(pubkey, m, &mut rand::thread_rng())
}

/// Encrypts a plaintext `m` in `[0, n)`:
///
/// \[ c = g^m \cdot r^n \mod n^2, \]
///
/// where `r` is drawn uniformly from the units of `[1, n)`. Encryption is
/// probabilistic, so encrypting the same message twice gives unrelated
/// ciphertexts.
pub fn paillier_encrypt_with_rng<R: Rng + ?Sized>(
    pubkey: &PublicKey,
    m: &BigUint,
    rng: &mut R,
) -> Result<Ciphertext> {
    let n = pubkey.n();
    if m >= n {
        return Err(PaillierError::InvalidParameter(
            "plaintext must be smaller than the modulus".into(),
        ));
    }
    let n_sq = pubkey.n_squared();
    let r = sample_unit(n, rng);
    let g_m = mod_pow(pubkey.g(), m, n_sq);
    let r_n = mod_pow(&r, n, n_sq);
    Ok(Ciphertext::new((g_m * r_n) % n_sq))
}

/// Draws `r` uniformly from `[1, n)` with `gcd(r, n) = 1`.
///
/// For a real key a non-unit is only hit by factoring `n`; the loop matters
/// for toy moduli, where `r^n` would otherwise destroy the plaintext.
pub(crate) fn sample_unit<R: Rng + ?Sized>(n: &BigUint, rng: &mut R) -> BigUint {
    loop {
        let r = rng.gen_biguint_range(&BigUint::one(), n);
        if r.gcd(n).is_one() {
            return r;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keygen::key_pair_from_primes;

    #[test]
    fn plaintext_must_be_below_modulus() {
        let (pk, _) = key_pair_from_primes(&BigUint::from(7u32), &BigUint::from(11u32)).unwrap();
        assert!(paillier_encrypt(&pk, &BigUint::from(76u32)).is_ok());
        assert!(matches!(
            paillier_encrypt(&pk, &BigUint::from(77u32)),
            Err(PaillierError::InvalidParameter(_))
        ));
    }

    #[test]
    fn ciphertext_lies_in_group() {
        let (pk, _) = key_pair_from_primes(&BigUint::from(7u32), &BigUint::from(11u32)).unwrap();
        for m in 0u32..77 {
            let c = paillier_encrypt(&pk, &BigUint::from(m)).unwrap();
            assert!(c.value() < pk.n_squared());
            assert!(Ciphertext::from_raw(c.into_inner(), &pk).is_ok());
        }
    }
}
