use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::Zero;

use crate::ciphertext::Ciphertext;
use crate::error::{PaillierError, Result};
use crate::keygen::{PrivateKey, PublicKey};
use crate::modular::mod_pow;

/// Decrypts a ciphertext.
///
/// Computes `x = c^lambda mod n^2` and `m = L(x) * mu mod n` with
/// `L(x) = (x - 1) / n`. The division has to be exact; a remainder means `c`
/// shares a factor with `n`.
///
/// A ciphertext produced under another key pair but still inside `Z_{n^2}`
/// is indistinguishable from a valid one and decrypts to an unrelated value.
///
/// # Errors
/// [`PaillierError::Decryption`] if the keys do not belong together, the
/// ciphertext is outside `Z_{n^2}`, or `x - 1` is not divisible by `n`.
pub fn paillier_decrypt(
    privkey: &PrivateKey,
    pubkey: &PublicKey,
    ciphertext: &Ciphertext,
) -> Result<BigUint> {
    if !privkey.matches(pubkey) {
        return Err(PaillierError::Decryption(
            "private key does not belong to the public key".into(),
        ));
    }
    let n = pubkey.n();
    let n_sq = pubkey.n_squared();
    let c = ciphertext.value();
    if c >= n_sq {
        return Err(PaillierError::Decryption(
            "ciphertext is not reduced modulo n^2".into(),
        ));
    }

    let x = mod_pow(c, privkey.lambda(), n_sq);
    if x.is_zero() {
        return Err(PaillierError::Decryption(
            "ciphertext shares a factor with the modulus".into(),
        ));
    }
    let (l, rem) = (x - 1u32).div_rem(n);
    if !rem.is_zero() {
        return Err(PaillierError::Decryption(
            "c^lambda - 1 is not divisible by n".into(),
        ));
    }
    Ok((l * privkey.mu()) % n)
}
