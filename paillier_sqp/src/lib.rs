//! Paillier cryptosystem with a homomorphic secure comparison protocol.
//!
//! The crate is organised leaves first:
//!
//! * [`prime`] – Miller–Rabin testing and random prime generation
//! * [`modular`] – extended Euclid, modular inverse and exponentiation
//! * [`keygen`] – key pairs from two primes
//! * [`encrypt`], [`decrypt`], [`arithmetic`] – the cipher and its homomorphic operations
//! * [`sqp`] – comparison of two ciphertexts using only the operations above
//!
//! ```no_run
//! use num_bigint::BigUint;
//! use paillier_sqp::{paillier_encrypt, paillier_keygen, sqp};
//!
//! let (pk, sk) = paillier_keygen(2048)?;
//! let a = paillier_encrypt(&pk, &BigUint::from(10u32))?;
//! let b = paillier_encrypt(&pk, &BigUint::from(5u32))?;
//! assert_eq!(sqp(&a, &b, &pk, &sk, 4)?, 1);
//! # Ok::<(), paillier_sqp::PaillierError>(())
//! ```

pub mod arithmetic;
pub mod ciphertext;
pub mod config;
pub mod decrypt;
pub mod encrypt;
pub mod error;
pub mod keygen;
pub mod modular;
pub mod prime;
pub mod sqp;

pub use arithmetic::{
    paillier_add, paillier_add_plain, paillier_difference, paillier_rerandomize, paillier_scalar_mul,
    paillier_subtract,
};
pub use ciphertext::Ciphertext;
pub use config::PaillierConfig;
pub use decrypt::paillier_decrypt;
pub use encrypt::{paillier_encrypt, paillier_encrypt_with_rng};
pub use error::{PaillierError, Result};
pub use keygen::{key_pair_from_primes, paillier_keygen, paillier_keygen_with, PrivateKey, PublicKey};
pub use sqp::{sqp, SecureComparison, SqpEvent, SqpObserver};
