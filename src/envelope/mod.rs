//! Password-sealed envelopes.
//!
//! An envelope carries everything needed to recover its payload from the
//! password alone: the KDF parameters, the salt and the sealed bytes. The
//! header is authenticated as associated data, so it cannot be altered
//! without the payload failing to open.

use tracing::debug;
use zeroize::Zeroizing;

use crate::crypto::{self, KdfParams};
use crate::error::{CryptoError, Result};
use crate::rng::{OsRandom, SecureRandom, random_array};

pub mod v1;

/// Magic bytes identifying a keyseal envelope ("KSEL").
pub const MAGIC: &[u8; 4] = b"KSEL";
/// Length of magic bytes.
pub const MAGIC_LEN: usize = 4;
/// Length of version field.
pub const VER_LEN: usize = 1;
/// Latest format version
pub const CURRENT_VERSION: u8 = v1::VERSION_V1;

/// A parsed envelope, borrowing its sealed payload from the input buffer.
#[derive(Debug)]
pub struct Envelope<'a> {
    version: u8,
    kdf: KdfParams,
    salt: [u8; crypto::SALT_LEN],
    header: &'a [u8],
    sealed: &'a [u8],
}

impl<'a> Envelope<'a> {
    /// Returns the format version.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Returns the KDF parameters the key was derived with.
    pub fn kdf(&self) -> &KdfParams {
        &self.kdf
    }

    pub fn salt(&self) -> &[u8; crypto::SALT_LEN] {
        &self.salt
    }

    /// Returns the raw header bytes, which double as associated data.
    pub fn header(&self) -> &'a [u8] {
        self.header
    }

    /// Returns `nonce || ciphertext || tag`.
    pub fn sealed(&self) -> &'a [u8] {
        self.sealed
    }
}

/// Parses an envelope, dispatching on its version byte.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidInput`] if:
/// - The buffer is too short
/// - The magic bytes are invalid
/// - The version is unsupported
/// - The stored KDF parameters are out of range
pub fn parse(data: &[u8]) -> Result<Envelope<'_>> {
    if data.len() < MAGIC_LEN + VER_LEN {
        return Err(CryptoError::InvalidInput("envelope too short"));
    }

    if &data[..MAGIC_LEN] != MAGIC {
        return Err(CryptoError::InvalidInput("not a keyseal envelope"));
    }

    match data[MAGIC_LEN] {
        v1::VERSION_V1 => v1::parse(data),
        _ => Err(CryptoError::InvalidInput("unsupported envelope version")),
    }
}

/// Seal `plaintext` under a key derived from `password`.
pub fn seal(password: &str, plaintext: &[u8], kdf: KdfParams) -> Result<Vec<u8>> {
    seal_with(&OsRandom, password, plaintext, kdf)
}

pub fn seal_with(
    rng: &dyn SecureRandom,
    password: &str,
    plaintext: &[u8],
    kdf: KdfParams,
) -> Result<Vec<u8>> {
    if plaintext.is_empty() {
        return Err(CryptoError::InvalidInput("plaintext must not be empty"));
    }

    let salt: [u8; crypto::SALT_LEN] = random_array(rng)?;
    let key = crypto::derive_key_with_params(password, &salt, kdf)?;

    let mut out = v1::header(&kdf, &salt);
    let sealed = crypto::encrypt_with_aad(rng, key.as_bytes(), plaintext, &out)?;

    debug!(
        version = CURRENT_VERSION,
        mem_cost_kib = kdf.mem_cost_kib(),
        time_cost = kdf.time_cost(),
        parallelism = kdf.parallelism(),
        payload_len = plaintext.len(),
        "sealed envelope"
    );

    out.extend_from_slice(&sealed);
    Ok(out)
}

/// Recover the payload of an envelope produced by [`seal`].
pub fn open(password: &str, data: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let envelope = parse(data)?;

    debug!(
        version = envelope.version(),
        mem_cost_kib = envelope.kdf().mem_cost_kib(),
        time_cost = envelope.kdf().time_cost(),
        parallelism = envelope.kdf().parallelism(),
        sealed_len = envelope.sealed().len(),
        "opening envelope"
    );

    let key = crypto::derive_key_with_params(password, envelope.salt(), *envelope.kdf())?;

    crypto::decrypt_with_aad(key.as_bytes(), envelope.sealed(), envelope.header()).inspect_err(
        |e| {
            if *e == CryptoError::AuthenticationFailed {
                debug!("envelope rejected: wrong password or corrupted data");
            }
        },
    )
}
