//! Secure comparison of two Paillier ciphertexts.
//!
//! Given `Enc(a)` and `Enc(b)` with both values below `2^L`, the protocol
//! decides whether `a >= b` using only homomorphic operations plus a single
//! decryption of a masked value:
//!
//! 1. `z = Enc(2^L) + Enc(a) - Enc(b)`, so bit `L` of `z` is set iff `a >= b`.
//! 2. `c = z + Enc(r)` for the mask `r`.
//! 3. `d = Dec(c)`; the low `L` bits of `d` are encrypted one by one.
//! 4. For each bit index `i`, a ciphertext `e_i` that decrypts to zero iff
//!    `d mod 2^L` and `r mod 2^L` first differ at bit `i`, with the mask bit
//!    set there (a borrow out of the low half).
//! 5. The borrow, the known high halves of `d` and `r`, and the unmasked `z`
//!    must agree on bit `L` of `z`.
//!
//! The executor holds the private key, so this is a single-party simulation
//! of the circuit. Intermediates are only exposed through an explicitly
//! supplied [`SqpObserver`].

pub mod bits;
pub mod observer;

pub use bits::BitVector;
pub use observer::{NoopObserver, SqpEvent, SqpObserver, TracingObserver};

use num_bigint::{BigInt, BigUint};
use num_traits::{One, ToPrimitive, Zero};

use crate::arithmetic::{paillier_add, paillier_scalar_mul, paillier_subtract};
use crate::ciphertext::Ciphertext;
use crate::config::{PaillierConfig, DEFAULT_SEC_PARAM};
use crate::decrypt::paillier_decrypt;
use crate::encrypt::paillier_encrypt;
use crate::error::{PaillierError, Result};
use crate::keygen::{PrivateKey, PublicKey};

/// Compares `Enc(a)` and `Enc(b)`: returns 1 if `a >= b`, 0 otherwise.
///
/// Uses the default security parameter and reports nothing to any observer.
/// `l` must be at least the bit length of both `a` and `b`.
pub fn sqp(
    c1: &Ciphertext,
    c2: &Ciphertext,
    pubkey: &PublicKey,
    privkey: &PrivateKey,
    l: u64,
) -> Result<u8> {
    SecureComparison::new(pubkey, privkey).compare(c1, c2, l)
}

/// Result of stage 3.
#[derive(Clone, Debug)]
pub struct Decomposition {
    /// Decrypted masked value `d`.
    pub masked: BigUint,
    /// `d mod 2^L`, least-significant bit first.
    pub bits: BitVector,
    /// Fresh encryptions of `bits`, same order.
    pub encrypted_bits: Vec<Ciphertext>,
}

/// A key pair bound to the comparison parameters.
#[derive(Clone, Copy, Debug)]
pub struct SecureComparison<'k> {
    pubkey: &'k PublicKey,
    privkey: &'k PrivateKey,
    sec_param: u64,
}

impl<'k> SecureComparison<'k> {
    pub fn new(pubkey: &'k PublicKey, privkey: &'k PrivateKey) -> Self {
        SecureComparison {
            pubkey,
            privkey,
            sec_param: DEFAULT_SEC_PARAM,
        }
    }

    pub fn from_config(pubkey: &'k PublicKey, privkey: &'k PrivateKey, config: &PaillierConfig) -> Self {
        Self::new(pubkey, privkey).with_sec_param(config.sec_param)
    }

    pub fn with_sec_param(mut self, sec_param: u64) -> Self {
        self.sec_param = sec_param;
        self
    }

    pub fn sec_param(&self) -> u64 {
        self.sec_param
    }

    pub fn compare(&self, c1: &Ciphertext, c2: &Ciphertext, l: u64) -> Result<u8> {
        self.compare_observed(c1, c2, l, &mut NoopObserver)
    }

    /// Runs all five stages, reporting decrypted intermediates to `observer`.
    pub fn compare_observed(
        &self,
        c1: &Ciphertext,
        c2: &Ciphertext,
        l: u64,
        observer: &mut dyn SqpObserver,
    ) -> Result<u8> {
        let pk = self.pubkey;
        let mask = mask_value(self.sec_param, l);
        self.check_preconditions(c1, c2, l, &mask)?;

        tracing::debug!(l, "sqp stage 1: offset difference");
        let z = offset_difference(c1, c2, l, pk)?;

        tracing::debug!(l, "sqp stage 2: masking");
        let masked = apply_mask(&z, &mask, pk)?;

        tracing::debug!(l, "sqp stage 3: bit decomposition");
        let decomposition = decompose(&masked, l, pk, self.privkey)?;
        observer.observe(SqpEvent::Masked {
            mask: &mask,
            masked: &decomposition.masked,
        });
        observer.observe(SqpEvent::BitsDecomposed {
            bits: &decomposition.bits,
        });

        tracing::debug!(l, "sqp stage 4: borrow terms");
        let mask_bits = BitVector::from_biguint(&mask, l);
        let terms = borrow_terms(&decomposition.encrypted_bits, &mask_bits, pk)?;

        tracing::debug!(l, "sqp stage 5: decision");
        self.resolve(&masked, &mask, &decomposition, &terms, l, observer)
    }

    /// Stage 5: decrypts the borrow terms and the unmasked difference and
    /// checks that both derivations of the decision bit agree.
    pub fn resolve(
        &self,
        masked: &Ciphertext,
        mask: &BigUint,
        decomposition: &Decomposition,
        terms: &[Ciphertext],
        l: u64,
        observer: &mut dyn SqpObserver,
    ) -> Result<u8> {
        let pk = self.pubkey;
        check_length(l, pk)?;
        let bound = BigUint::from(l) + 1u32;
        let values = terms
            .iter()
            .map(|e| self.decrypt(e))
            .collect::<Result<Vec<_>>>()?;
        if values.iter().any(|v| *v > bound) {
            return Err(PaillierError::Protocol(
                "borrow term decrypted outside the circuit range".into(),
            ));
        }
        observer.observe(SqpEvent::BorrowTerms { values: &values });
        let borrow = values.iter().any(Zero::is_zero);

        let difference = self.decrypt(&paillier_subtract(masked, &encrypt(pk, mask)?, pk))?;
        observer.observe(SqpEvent::Unmasked {
            difference: &difference,
        });
        if difference.is_zero() || !(&difference >> (l + 1)).is_zero() {
            return Err(PaillierError::Protocol(
                "unmasked difference outside (0, 2^(L+1))".into(),
            ));
        }
        let shifted_bit: u8 = if (&difference >> l).is_zero() { 0 } else { 1 };

        // bit L of z = floor(d / 2^L) - floor(r / 2^L) - borrow
        let high = BigInt::from(&decomposition.masked >> l)
            - BigInt::from(mask >> l)
            - BigInt::from(u8::from(borrow));
        let circuit_bit = match high.to_u8() {
            Some(bit @ 0..=1) => bit,
            _ => {
                return Err(PaillierError::Protocol(
                    "borrow circuit produced a non-binary decision".into(),
                ))
            }
        };
        observer.observe(SqpEvent::Decision {
            circuit_bit,
            shifted_bit,
        });

        if circuit_bit != shifted_bit {
            return Err(PaillierError::Protocol(format!(
                "borrow circuit says {} but the unmasked difference says {}",
                circuit_bit, shifted_bit
            )));
        }
        Ok(shifted_bit)
    }

    fn check_preconditions(&self, c1: &Ciphertext, c2: &Ciphertext, l: u64, mask: &BigUint) -> Result<()> {
        if !self.privkey.matches(self.pubkey) {
            return Err(PaillierError::Protocol(
                "private key does not belong to the public key".into(),
            ));
        }
        check_length(l, self.pubkey)?;
        // z + r must stay below n, or decrypting the masked value wraps
        if (BigUint::one() << (l + 1)) + mask >= *self.pubkey.n() {
            return Err(PaillierError::Protocol(format!(
                "mask {} with comparison length {} does not fit a {}-bit modulus",
                mask,
                l,
                self.pubkey.bits()
            )));
        }
        for operand in [c1, c2] {
            if self.decrypt(operand)?.bits() > l {
                return Err(PaillierError::Protocol(format!(
                    "operand is wider than the comparison length {}",
                    l
                )));
            }
        }
        Ok(())
    }

    fn decrypt(&self, c: &Ciphertext) -> Result<BigUint> {
        paillier_decrypt(self.privkey, self.pubkey, c).map_err(protocol_error)
    }
}

/// Stage 1: `Enc(2^L) + c1 - c2`.
pub fn offset_difference(c1: &Ciphertext, c2: &Ciphertext, l: u64, pubkey: &PublicKey) -> Result<Ciphertext> {
    check_length(l, pubkey)?;
    let offset = encrypt(pubkey, &(BigUint::one() << l))?;
    Ok(paillier_subtract(&paillier_add(&offset, c1, pubkey), c2, pubkey))
}

/// Stage 2 mask `r = sec_param + L + 1`.
///
/// Deterministic and therefore known to anyone who knows the parameters; it
/// hides nothing from a second party.
pub fn mask_value(sec_param: u64, l: u64) -> BigUint {
    BigUint::from(sec_param) + l + 1u32
}

/// Stage 2: `z + Enc(r)`.
pub fn apply_mask(z: &Ciphertext, mask: &BigUint, pubkey: &PublicKey) -> Result<Ciphertext> {
    Ok(paillier_add(z, &encrypt(pubkey, mask)?, pubkey))
}

/// Stage 3: decrypts the masked value and encrypts its low `l` bits
/// individually, least-significant first.
pub fn decompose(
    masked: &Ciphertext,
    l: u64,
    pubkey: &PublicKey,
    privkey: &PrivateKey,
) -> Result<Decomposition> {
    check_length(l, pubkey)?;
    let value = paillier_decrypt(privkey, pubkey, masked).map_err(protocol_error)?;
    let bits = BitVector::from_biguint(&value, l);
    let encrypted_bits = map_indexed(bits.len(), |i| encrypt(pubkey, &bit_value(bits.bit(i))))?;
    Ok(Decomposition {
        masked: value,
        bits,
        encrypted_bits,
    })
}

/// Stage 4: the borrow terms
///
/// \[ e_i = 1 + c_i - r_i + \sum_{j > i} (c_j \oplus r_j), \]
///
/// with `c_j XOR r_j = c_j + r_j - 2 c_j r_j` evaluated homomorphically.
/// `e_i` decrypts to zero exactly when bit `i` is the highest differing bit
/// and there `c_i = 0`, `r_i = 1`.
pub fn borrow_terms(
    encrypted_bits: &[Ciphertext],
    mask_bits: &BitVector,
    pubkey: &PublicKey,
) -> Result<Vec<Ciphertext>> {
    if encrypted_bits.len() != mask_bits.len() {
        return Err(PaillierError::Protocol(format!(
            "{} encrypted bits against a {}-bit mask",
            encrypted_bits.len(),
            mask_bits.len()
        )));
    }
    let len = encrypted_bits.len();
    check_length(len as u64, pubkey)?;

    let xors = map_indexed(len, |j| xor_term(&encrypted_bits[j], mask_bits.bit(j), pubkey))?;
    let lefts = map_indexed(len, |i| {
        let one = encrypt(pubkey, &BigUint::one())?;
        let r_i = encrypt(pubkey, &bit_value(mask_bits.bit(i)))?;
        Ok(paillier_subtract(&paillier_add(&one, &encrypted_bits[i], pubkey), &r_i, pubkey))
    })?;

    // suffix sums over j > i, built from the most-significant end
    let mut terms = Vec::with_capacity(len);
    let mut suffix = encrypt(pubkey, &BigUint::zero())?;
    for i in (0..len).rev() {
        terms.push(paillier_add(&lefts[i], &suffix, pubkey));
        suffix = paillier_add(&suffix, &xors[i], pubkey);
    }
    terms.reverse();
    Ok(terms)
}

/// `Enc(c_j XOR r_j)` from `Enc(c_j)` and the clear bit `r_j`. The product
/// term is subtracted twice to realise the factor 2.
fn xor_term(c_j: &Ciphertext, r_j: bool, pubkey: &PublicKey) -> Result<Ciphertext> {
    let r = bit_value(r_j);
    let product = paillier_scalar_mul(c_j, &r, pubkey);
    let sum = paillier_add(c_j, &encrypt(pubkey, &r)?, pubkey);
    let once = paillier_subtract(&sum, &product, pubkey);
    Ok(paillier_subtract(&once, &product, pubkey))
}

/// `1 <= l < bits(n)`; anything wider cannot be decrypted without wrapping.
fn check_length(l: u64, pubkey: &PublicKey) -> Result<()> {
    if l == 0 {
        return Err(PaillierError::Protocol("comparison length must be at least 1".into()));
    }
    if l >= pubkey.bits() {
        return Err(PaillierError::Protocol(format!(
            "comparison length {} too large for a {}-bit modulus",
            l,
            pubkey.bits()
        )));
    }
    Ok(())
}

fn bit_value(bit: bool) -> BigUint {
    BigUint::from(u8::from(bit))
}

fn encrypt(pubkey: &PublicKey, m: &BigUint) -> Result<Ciphertext> {
    paillier_encrypt(pubkey, m).map_err(protocol_error)
}

fn protocol_error(e: PaillierError) -> PaillierError {
    match e {
        PaillierError::Protocol(_) => e,
        other => PaillierError::Protocol(other.to_string()),
    }
}

#[cfg(feature = "parallel")]
fn map_indexed<T, F>(len: usize, f: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> Result<T> + Sync + Send,
{
    use rayon::prelude::*;
    (0..len).into_par_iter().map(f).collect()
}

#[cfg(not(feature = "parallel"))]
fn map_indexed<T, F>(len: usize, f: F) -> Result<Vec<T>>
where
    F: Fn(usize) -> Result<T>,
{
    (0..len).map(f).collect()
}
