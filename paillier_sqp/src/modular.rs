use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::error::{PaillierError, Result};

/// Extended Euclidean algorithm.
///
/// Returns `(g, x, y)` such that `a*x + b*y = g` where `g = gcd(a, b) >= 0`.
/// Runs in a loop rather than recursing, so stack usage does not grow with
/// the size of the operands.
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_x, mut x) = (BigInt::one(), BigInt::zero());
    let (mut old_y, mut y) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let q = old_r.div_floor(&r);

        let next_r = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, next_r);

        let next_x = &old_x - &q * &x;
        old_x = std::mem::replace(&mut x, next_x);

        let next_y = &old_y - &q * &y;
        old_y = std::mem::replace(&mut y, next_y);
    }

    if old_r.is_negative() {
        (-old_r, -old_x, -old_y)
    } else {
        (old_r, old_x, old_y)
    }
}

/// Multiplicative inverse of `a` modulo `n`, in `[0, n)`.
///
/// # Errors
/// [`PaillierError::NoInverse`] when `gcd(a, n) != 1`.
pub fn mod_inverse(a: &BigUint, n: &BigUint) -> Result<BigUint> {
    if n.is_zero() {
        return Err(PaillierError::NoInverse);
    }
    let a = BigInt::from_biguint(Sign::Plus, a.clone());
    let n = BigInt::from_biguint(Sign::Plus, n.clone());
    let (g, x, _) = extended_gcd(&a, &n);
    if !g.is_one() {
        return Err(PaillierError::NoInverse);
    }
    x.mod_floor(&n)
        .to_biguint()
        .ok_or(PaillierError::NoInverse)
}

/// Square-and-multiply modular exponentiation.
///
/// # Panics
/// If `modulus` is zero.
pub fn mod_pow(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    if modulus.is_one() {
        return BigUint::zero();
    }
    base.modpow(exponent, modulus)
}
