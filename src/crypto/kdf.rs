use argon2::{Algorithm, Argon2, Params, Version};

use super::{DerivedKey, KEY_LEN, SALT_LEN};
use crate::error::{CryptoError, Result};
use crate::rng::{OsRandom, SecureRandom, random_array};

/// Largest memory cost accepted from any source (1 GiB).
pub const MAX_MEM_COST_KIB: u32 = 1024 * 1024;
/// Largest number of Argon2 passes accepted from any source.
pub const MAX_TIME_COST: u32 = 64;

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    mem_cost_kib: u32,
    time_cost: u32,
    parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            // 64 MiB
            mem_cost_kib: 64 * 1024,
            time_cost: 3,
            parallelism: 1,
        }
    }
}

impl KdfParams {
    pub fn new(mem_cost_kib: u32, time_cost: u32, parallelism: u32) -> Result<Self> {
        let params = Self {
            mem_cost_kib,
            time_cost,
            parallelism,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn mem_cost_kib(&self) -> u32 {
        self.mem_cost_kib
    }

    pub fn time_cost(&self) -> u32 {
        self.time_cost
    }

    pub fn parallelism(&self) -> u32 {
        self.parallelism
    }

    pub fn validate(&self) -> Result<()> {
        if self.mem_cost_kib < 8 {
            return Err(CryptoError::InvalidInput("argon2 memory cost too low"));
        }
        if self.mem_cost_kib > MAX_MEM_COST_KIB {
            return Err(CryptoError::InvalidInput("argon2 memory cost too high"));
        }
        if self.time_cost < 1 {
            return Err(CryptoError::InvalidInput("argon2 time cost must be >= 1"));
        }
        if self.time_cost > MAX_TIME_COST {
            return Err(CryptoError::InvalidInput("argon2 time cost too high"));
        }
        if self.parallelism < 1 {
            return Err(CryptoError::InvalidInput("argon2 parallelism must be >= 1"));
        }
        if self
            .parallelism
            .checked_mul(8)
            .is_none_or(|min| self.mem_cost_kib < min)
        {
            return Err(CryptoError::InvalidInput(
                "argon2 memory cost must be at least 8 * parallelism",
            ));
        }
        Ok(())
    }
}

/// Derive a key from `password` under a freshly generated salt.
///
/// Returns the key together with the salt the caller must persist to derive
/// the same key again.
pub fn generate_key(password: &str) -> Result<(DerivedKey, [u8; SALT_LEN])> {
    generate_key_with(&OsRandom, password, KdfParams::default())
}

pub fn generate_key_with(
    rng: &dyn SecureRandom,
    password: &str,
    kdf: KdfParams,
) -> Result<(DerivedKey, [u8; SALT_LEN])> {
    // Reject before spending entropy on a derivation that cannot succeed.
    if password.is_empty() {
        return Err(CryptoError::InvalidInput("password must not be empty"));
    }

    let salt: [u8; SALT_LEN] = random_array(rng)?;
    let key = derive_key_with_params(password, &salt, kdf)?;

    Ok((key, salt))
}

/// Deterministically derive a key from `password` and a stored 32-byte salt.
pub fn derive_key(password: &str, salt: &[u8]) -> Result<DerivedKey> {
    derive_key_with_params(password, salt, KdfParams::default())
}

pub fn derive_key_with_params(password: &str, salt: &[u8], kdf: KdfParams) -> Result<DerivedKey> {
    if password.is_empty() {
        return Err(CryptoError::InvalidInput("password must not be empty"));
    }
    if salt.is_empty() {
        return Err(CryptoError::InvalidInput("salt is missing"));
    }
    if salt.len() != SALT_LEN {
        return Err(CryptoError::InvalidInput("salt must be exactly 32 bytes"));
    }
    kdf.validate()?;

    let params = Params::new(
        kdf.mem_cost_kib,
        kdf.time_cost,
        kdf.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|_| CryptoError::InvalidInput("argon2 rejected the cost parameters"))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = DerivedKey::from_bytes([0u8; KEY_LEN]);
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut key.bytes)
        .map_err(|_| CryptoError::CryptoUnavailable("argon2 key derivation failed"))?;

    Ok(key)
}
