use num_bigint::BigUint;

use crate::error::{PaillierError, Result};
use crate::keygen::PublicKey;

/// An element of `Z_{n^2}` produced by encryption or a homomorphic operation.
///
/// Ciphertexts are values: operations never modify them in place, they
/// return new ciphertexts.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ciphertext(BigUint);

impl Ciphertext {
    /// Wraps a value that is already known to be reduced modulo `n^2`.
    pub(crate) fn new(value: BigUint) -> Self {
        Ciphertext(value)
    }

    /// Wraps an integer received from outside the crate.
    ///
    /// Fails when the value is not in `[0, n^2)` for the given key.
    pub fn from_raw(value: BigUint, pk: &PublicKey) -> Result<Self> {
        if &value >= pk.n_squared() {
            return Err(PaillierError::InvalidParameter(
                "ciphertext is not reduced modulo n^2".into(),
            ));
        }
        Ok(Ciphertext(value))
    }

    pub fn value(&self) -> &BigUint {
        &self.0
    }

    pub fn into_inner(self) -> BigUint {
        self.0
    }
}
