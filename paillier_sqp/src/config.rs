//! Tunable parameters for key generation and the comparison protocol.
//!
//! A configuration can be built from defaults, from a TOML document, or from
//! environment variables. Missing entries always fall back to the defaults, and
//! every constructor validates the result before handing it out.

use serde::{Deserialize, Serialize};

use crate::error::{PaillierError, Result};

pub const DEFAULT_KEY_BIT_LENGTH: u64 = 2048;
pub const DEFAULT_MILLER_RABIN_ROUNDS: usize = 128;
pub const DEFAULT_SEC_PARAM: u64 = 100;
pub const DEFAULT_PRIME_SEARCH_BUDGET: usize = 1_000_000;
pub const DEFAULT_KEYGEN_ATTEMPTS: usize = 64;

/// Smallest modulus the key factory accepts.
pub const MIN_KEY_BIT_LENGTH: u64 = 16;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaillierConfig {
    /// Bit length of the modulus `n`, split evenly between `p` and `q`.
    pub key_bit_length: u64,
    /// Witness rounds per Miller–Rabin test.
    pub miller_rabin_rounds: usize,
    /// Security margin folded into the comparison mask.
    pub sec_param: u64,
    /// Candidates drawn per prime before giving up.
    pub prime_search_budget: usize,
    /// `(p, q)` pairs tried per key pair before giving up.
    pub keygen_attempts: usize,
}

impl Default for PaillierConfig {
    fn default() -> Self {
        PaillierConfig {
            key_bit_length: DEFAULT_KEY_BIT_LENGTH,
            miller_rabin_rounds: DEFAULT_MILLER_RABIN_ROUNDS,
            sec_param: DEFAULT_SEC_PARAM,
            prime_search_budget: DEFAULT_PRIME_SEARCH_BUDGET,
            keygen_attempts: DEFAULT_KEYGEN_ATTEMPTS,
        }
    }
}

impl PaillierConfig {
    /// Default configuration with a different modulus size.
    pub fn with_key_bit_length(key_bit_length: u64) -> Result<Self> {
        let config = PaillierConfig {
            key_bit_length,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML document such as:
    ///
    /// ```toml
    /// key_bit_length = 1024
    /// miller_rabin_rounds = 64
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: PaillierConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `KEY_BIT_LENGTH`, `MILLER_RABIN_ROUNDS`, `SEC_PARAM`,
    /// `PRIME_SEARCH_BUDGET` and `KEYGEN_ATTEMPTS` from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`PaillierConfig::from_env`] with an injected variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(v) = parse_var(&lookup, "KEY_BIT_LENGTH")? {
            config.key_bit_length = v;
        }
        if let Some(v) = parse_var(&lookup, "MILLER_RABIN_ROUNDS")? {
            config.miller_rabin_rounds = v;
        }
        if let Some(v) = parse_var(&lookup, "SEC_PARAM")? {
            config.sec_param = v;
        }
        if let Some(v) = parse_var(&lookup, "PRIME_SEARCH_BUDGET")? {
            config.prime_search_budget = v;
        }
        if let Some(v) = parse_var(&lookup, "KEYGEN_ATTEMPTS")? {
            config.keygen_attempts = v;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.key_bit_length < MIN_KEY_BIT_LENGTH {
            return Err(PaillierError::Config(format!(
                "key_bit_length must be at least {}, got {}",
                MIN_KEY_BIT_LENGTH, self.key_bit_length
            )));
        }
        if self.key_bit_length % 2 != 0 {
            return Err(PaillierError::Config(format!(
                "key_bit_length must be even, got {}",
                self.key_bit_length
            )));
        }
        if self.miller_rabin_rounds == 0 {
            return Err(PaillierError::Config(
                "miller_rabin_rounds must be at least 1".into(),
            ));
        }
        if self.prime_search_budget == 0 || self.keygen_attempts == 0 {
            return Err(PaillierError::Config(
                "search budgets must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| PaillierError::Config(format!("{} is not a valid number: {:?}", key, raw))),
    }
}
