use crate::ciphertext::Ciphertext;
use crate::decrypt::paillier_decrypt;
use crate::encrypt::sample_unit;
use crate::error::Result;
use crate::keygen::{PrivateKey, PublicKey};
use crate::modular::mod_pow;
use num_bigint::{BigInt, BigUint};
use num_traits::One;
use rand::Rng;

/// Homomorphic addition of two ciphertexts.
/// Given ciphertexts `c1` and `c2`, returns the ciphertext corresponding to
/// the sum of the underlying plaintexts (mod n) by computing:
///
/// \[ c_{\text{add}} = c_1 \cdot c_2 \mod n^2. \]
pub fn paillier_add(c1: &Ciphertext, c2: &Ciphertext, pubkey: &PublicKey) -> Ciphertext {
    Ciphertext::new((c1.value() * c2.value()) % pubkey.n_squared())
}

/// Scalar multiplication of a ciphertext.
/// Raising a ciphertext `c` to a constant `k` yields a ciphertext corresponding to
/// the plaintext \(k \cdot m \mod n\).
pub fn paillier_scalar_mul(c: &Ciphertext, k: &BigUint, pubkey: &PublicKey) -> Ciphertext {
    Ciphertext::new(mod_pow(c.value(), k, pubkey.n_squared()))
}

/// Homomorphic subtraction of two ciphertexts.
/// Computes the ciphertext corresponding to \(m_1 - m_2 \mod n\) by using:
///
/// \[ c_{\text{diff}} = c_1 \cdot c_2^{-1} \mod n^2, \]
///
/// where \(c_2^{-1}\) is computed by raising \(c_2\) to the power \((n-1)\).
pub fn paillier_subtract(c1: &Ciphertext, c2: &Ciphertext, pubkey: &PublicKey) -> Ciphertext {
    let neg_one = pubkey.n() - BigUint::one();
    let c2_inv = mod_pow(c2.value(), &neg_one, pubkey.n_squared());
    Ciphertext::new((c1.value() * c2_inv) % pubkey.n_squared())
}

/// Adds a cleartext constant without encrypting it first:
///
/// \[ c' = c \cdot g^k \mod n^2. \]
///
/// The result is deterministic in `c`; pair it with [`paillier_rerandomize`]
/// when the output leaves the executing party.
pub fn paillier_add_plain(c: &Ciphertext, k: &BigUint, pubkey: &PublicKey) -> Ciphertext {
    let g_k = mod_pow(pubkey.g(), k, pubkey.n_squared());
    Ciphertext::new((c.value() * g_k) % pubkey.n_squared())
}

/// Multiplies `c` by a fresh encryption of zero, giving an unlinkable
/// ciphertext of the same plaintext.
pub fn paillier_rerandomize<R: Rng + ?Sized>(
    c: &Ciphertext,
    pubkey: &PublicKey,
    rng: &mut R,
) -> Ciphertext {
    let s = sample_unit(pubkey.n(), rng);
    let s_n = mod_pow(&s, pubkey.n(), pubkey.n_squared());
    Ciphertext::new((c.value() * s_n) % pubkey.n_squared())
}

/// Convenience function that computes the difference of two ciphertexts,
/// decrypts it, and converts the result into a signed integer.
///
/// Assumes that the plaintexts are small relative to n. If the decrypted result
/// is greater than \(n/2\), it is interpreted as negative.
/// Returns the signed difference.
pub fn paillier_difference(
    c1: &Ciphertext,
    c2: &Ciphertext,
    pubkey: &PublicKey,
    privkey: &PrivateKey,
) -> Result<BigInt> {
    let diff_cipher = paillier_subtract(c1, c2, pubkey);
    let diff_mod = paillier_decrypt(privkey, pubkey, &diff_cipher)?;
    let half_n = pubkey.n() >> 1;
    if diff_mod > half_n {
        Ok(BigInt::from(diff_mod) - BigInt::from(pubkey.n().clone()))
    } else {
        Ok(BigInt::from(diff_mod))
    }
}
