use std::fmt;

use num_bigint::BigUint;
use num_traits::One;
use rand::Rng;

use crate::config::PaillierConfig;
use crate::error::{PaillierError, Result};
use crate::modular::mod_inverse;
use crate::prime::generate_prime;

/// Paillier public key `(n, g)` with `n^2` cached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    n: BigUint,
    n_squared: BigUint,
    g: BigUint,
}

impl PublicKey {
    fn from_modulus(n: BigUint) -> Self {
        let n_squared = &n * &n;
        let g = &n + BigUint::one();
        PublicKey { n, n_squared, g }
    }

    pub fn n(&self) -> &BigUint {
        &self.n
    }

    pub fn g(&self) -> &BigUint {
        &self.g
    }

    pub fn n_squared(&self) -> &BigUint {
        &self.n_squared
    }

    /// Bit length of the modulus.
    pub fn bits(&self) -> u64 {
        self.n.bits()
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Public Key:\n n: {}\n g: {}", self.n, self.g)
    }
}

/// Paillier private key `(lambda, mu)`.
///
/// Remembers the modulus it was derived for so that decryption can refuse a
/// public key from a different pair.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    lambda: BigUint,
    mu: BigUint,
    n: BigUint,
}

impl PrivateKey {
    pub fn lambda(&self) -> &BigUint {
        &self.lambda
    }

    pub fn mu(&self) -> &BigUint {
        &self.mu
    }

    /// Whether this key was derived for `pk`.
    pub fn matches(&self, pk: &PublicKey) -> bool {
        self.n == pk.n
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("bits", &self.n.bits())
            .finish_non_exhaustive()
    }
}

/// Derives a key pair from two distinct primes.
///
/// Computes `n = p*q`, `g = n + 1`, `lambda = (p-1)(q-1)` and
/// `mu = lambda^-1 mod n`.
///
/// # Errors
/// * [`PaillierError::InvalidParameter`] if `p == q` or either is below 2
/// * [`PaillierError::NoInverse`] if `lambda` is not invertible modulo `n`
pub fn key_pair_from_primes(p: &BigUint, q: &BigUint) -> Result<(PublicKey, PrivateKey)> {
    let two = BigUint::from(2u32);
    if p == q || *p < two || *q < two {
        return Err(PaillierError::InvalidParameter(
            "key primes must be distinct and at least 2".into(),
        ));
    }
    let pk = PublicKey::from_modulus(p * q);
    let lambda = (p - 1u32) * (q - 1u32);
    let mu = mod_inverse(&lambda, &pk.n)?;
    let sk = PrivateKey {
        lambda,
        mu,
        n: pk.n.clone(),
    };
    Ok((pk, sk))
}

/// Generates a key pair whose modulus has `bits` bits, using the default
/// configuration otherwise and the thread-local RNG.
///
/// A bad `bits` is the caller's argument, so it surfaces as
/// [`PaillierError::InvalidParameter`] rather than a configuration error.
pub fn paillier_keygen(bits: u64) -> Result<(PublicKey, PrivateKey)> {
    let config = PaillierConfig::with_key_bit_length(bits).map_err(|e| match e {
        PaillierError::Config(msg) => PaillierError::InvalidParameter(msg),
        other => other,
    })?;
    paillier_keygen_with(&config, &mut rand::thread_rng())
}

/// Generates a key pair as described by `config`.
///
/// Each attempt draws two primes of `key_bit_length / 2` bits. Equal primes
/// and a non-invertible `lambda` are handled by drawing a fresh pair; after
/// `keygen_attempts` unsuccessful pairs the search fails.
pub fn paillier_keygen_with<R: Rng + ?Sized>(
    config: &PaillierConfig,
    rng: &mut R,
) -> Result<(PublicKey, PrivateKey)> {
    config.validate()?;
    let half = config.key_bit_length / 2;

    for attempt in 1..=config.keygen_attempts {
        let p = generate_prime(half, config.miller_rabin_rounds, config.prime_search_budget, rng)?;
        let q = generate_prime(half, config.miller_rabin_rounds, config.prime_search_budget, rng)?;
        if p == q {
            tracing::debug!(attempt, "drew identical primes, resampling");
            continue;
        }
        match key_pair_from_primes(&p, &q) {
            Ok((pk, sk)) => {
                tracing::debug!(bits = pk.bits(), attempt, "generated Paillier key pair");
                return Ok((pk, sk));
            }
            Err(PaillierError::NoInverse) => {
                tracing::warn!(attempt, "lambda not invertible modulo n, resampling primes");
            }
            Err(e) => return Err(e),
        }
    }

    Err(PaillierError::Generation {
        bits: config.key_bit_length,
        attempts: config.keygen_attempts,
    })
}
