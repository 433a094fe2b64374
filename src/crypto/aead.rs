//! XChaCha20-Poly1305 sealing under a 256-bit key.
//!
//! Sealed format:
//! ```text
//! [24 bytes: random nonce][N bytes: ciphertext][16 bytes: Poly1305 tag]
//! ```

use chacha20poly1305::{
    Key, XChaCha20Poly1305, XNonce,
    aead::{Aead, KeyInit, Payload},
};
use zeroize::Zeroizing;

use super::{KEY_LEN, NONCE_LEN, SEALED_OVERHEAD};
use crate::error::{CryptoError, Result};
use crate::rng::{OsRandom, SecureRandom, random_array};

fn cipher_for(key: &[u8]) -> Result<XChaCha20Poly1305> {
    if key.len() != KEY_LEN {
        return Err(CryptoError::InvalidKey {
            expected: KEY_LEN,
            got: key.len(),
        });
    }
    Ok(XChaCha20Poly1305::new(Key::from_slice(key)))
}

/// Encrypt `plaintext` under a fresh random nonce.
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    encrypt_with_aad(&OsRandom, key, plaintext, &[])
}

/// Like [`encrypt`], drawing the nonce from `rng`.
pub fn encrypt_with(rng: &dyn SecureRandom, key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    encrypt_with_aad(rng, key, plaintext, &[])
}

/// Encrypt `plaintext` and authenticate `aad` alongside it.
///
/// `aad` is not part of the output; the same bytes must be handed to
/// [`decrypt_with_aad`].
pub fn encrypt_with_aad(
    rng: &dyn SecureRandom,
    key: &[u8],
    plaintext: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>> {
    let cipher = cipher_for(key)?;
    if plaintext.is_empty() {
        return Err(CryptoError::InvalidInput("plaintext must not be empty"));
    }

    let nonce: [u8; NONCE_LEN] = random_array(rng)?;

    let ciphertext = cipher
        .encrypt(
            XNonce::from_slice(&nonce),
            Payload {
                msg: plaintext,
                aad,
            },
        )
        .map_err(|_| CryptoError::CryptoUnavailable("encryption failed"))?;

    let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    sealed.extend_from_slice(&nonce);
    sealed.extend_from_slice(&ciphertext);
    Ok(sealed)
}

/// Verify and decrypt a buffer produced by [`encrypt`].
pub fn decrypt(key: &[u8], sealed: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    decrypt_with_aad(key, sealed, &[])
}

pub fn decrypt_with_aad(key: &[u8], sealed: &[u8], aad: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let cipher = cipher_for(key)?;
    if sealed.is_empty() {
        return Err(CryptoError::InvalidInput("sealed data is empty"));
    }
    if sealed.len() < SEALED_OVERHEAD {
        return Err(CryptoError::InvalidInput("sealed data too short"));
    }

    let (nonce, ciphertext) = sealed.split_at(NONCE_LEN);

    let plaintext = cipher
        .decrypt(
            XNonce::from_slice(nonce),
            Payload {
                msg: ciphertext,
                aad,
            },
        )
        .map_err(|_| CryptoError::AuthenticationFailed)?;
    Ok(Zeroizing::new(plaintext))
}
