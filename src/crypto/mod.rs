//! Cryptographic primitives.
//!
//! Provides password-based key derivation, HMAC tagging and authenticated
//! encryption over plain byte buffers.

pub mod aead;
pub mod kdf;
pub mod mac;

use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

pub use aead::{decrypt, decrypt_with_aad, encrypt, encrypt_with, encrypt_with_aad};
pub use kdf::{KdfParams, derive_key, derive_key_with_params, generate_key, generate_key_with};
pub use mac::{append_tag, compute_tag, validate_tag};

/// Length of the KDF salt (32 bytes).
pub const SALT_LEN: usize = 32;
/// Length of a derived or encryption key (32 bytes / 256 bits).
pub const KEY_LEN: usize = 32;
/// Length of the nonce (24 bytes for XChaCha20-Poly1305).
pub const NONCE_LEN: usize = 24;
/// Length of the Poly1305 authentication tag.
pub const AEAD_TAG_LEN: usize = 16;
/// Length of the HMAC-SHA256 tag.
pub const MAC_LEN: usize = 32;
/// Smallest buffer `decrypt` will look at: nonce plus tag.
pub const SEALED_OVERHEAD: usize = NONCE_LEN + AEAD_TAG_LEN;

/// A 256-bit key stretched from a password.
///
/// Zeroized on drop, redacted in `Debug`, compared in constant time.
#[derive(Clone)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl AsRef<[u8]> for DerivedKey {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl PartialEq for DerivedKey {
    fn eq(&self, other: &Self) -> bool {
        self.bytes.as_slice().ct_eq(other.bytes.as_slice()).into()
    }
}

impl Eq for DerivedKey {}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
