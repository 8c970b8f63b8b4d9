//! Random probable primes via the Miller–Rabin test.

use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::One;
use rand::Rng;

use crate::error::{PaillierError, Result};
use crate::modular::mod_pow;

/// Draws a probable prime from `[2^(bits-1) + 1, 2^bits]`.
///
/// Candidates are sampled uniformly from that interval and tested with
/// [`is_probable_prime`]; the search gives up after `budget` rejected
/// candidates.
///
/// # Arguments
/// * `bits` - Bit length of the prime, at least 2
/// * `rounds` - Miller–Rabin witness rounds per candidate
/// * `budget` - Maximum number of candidates to draw
/// * `rng` - Source of randomness for candidates and witnesses
pub fn generate_prime<R: Rng + ?Sized>(
    bits: u64,
    rounds: usize,
    budget: usize,
    rng: &mut R,
) -> Result<BigUint> {
    if bits < 2 {
        return Err(PaillierError::InvalidParameter(format!(
            "prime bit length must be at least 2, got {}",
            bits
        )));
    }
    let low = (BigUint::one() << (bits - 1)) + 1u32;
    // gen_biguint_range excludes its upper bound
    let high = (BigUint::one() << bits) + 1u32;

    for attempt in 1..=budget {
        let candidate = rng.gen_biguint_range(&low, &high);
        if is_probable_prime(&candidate, rounds, rng) {
            tracing::debug!(bits, attempt, "found probable prime");
            return Ok(candidate);
        }
        tracing::trace!(bits, attempt, "rejected prime candidate");
    }

    Err(PaillierError::Generation {
        bits,
        attempts: budget,
    })
}

/// Miller–Rabin probabilistic primality test.
///
/// Composites pass a single round with probability at most 1/4, so the
/// false-positive rate is bounded by `4^-rounds`. Primes always pass.
pub fn is_probable_prime<R: Rng + ?Sized>(n: &BigUint, rounds: usize, rng: &mut R) -> bool {
    let two = BigUint::from(2u32);
    let three = BigUint::from(3u32);
    if *n == two || *n == three {
        return true;
    }
    if *n <= BigUint::one() || n.is_even() {
        return false;
    }

    // n - 1 = 2^s * r with r odd
    let n_minus_one = n - 1u32;
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let r = &n_minus_one >> s;

    'witness: for _ in 0..rounds {
        let a = rng.gen_biguint_range(&two, &n_minus_one);
        let mut x = mod_pow(&a, &r, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = mod_pow(&x, &two, n);
            if x == n_minus_one {
                continue 'witness;
            }
            if x.is_one() {
                return false;
            }
        }
        return false;
    }
    true
}
