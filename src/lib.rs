//! Password-based key derivation, message authentication and authenticated
//! encryption over byte buffers.
//!
//! The usual pipeline is password -> key (+ salt) -> protect data:
//!
//! ```no_run
//! # fn main() -> keyseal::Result<()> {
//! let (key, salt) = keyseal::generate_key("correct horse battery staple")?;
//! let sealed = keyseal::encrypt(key.as_bytes(), b"launch codes")?;
//!
//! // later, with the persisted salt
//! let key = keyseal::derive_key("correct horse battery staple", &salt)?;
//! let plaintext = keyseal::decrypt(key.as_bytes(), &sealed)?;
//! assert_eq!(&plaintext[..], b"launch codes");
//! # Ok(())
//! # }
//! ```
//!
//! Every operation is stateless and safe to call from many threads at once.

pub mod crypto;
pub mod envelope;
mod error;
pub mod rng;

pub use crate::crypto::{
    DerivedKey, KdfParams, append_tag, decrypt, derive_key, encrypt, generate_key, validate_tag,
};
pub use crate::error::{CryptoError, Result};
pub use crate::rng::{OsRandom, SecureRandom};
