use std::fmt;

/// Failure signal shared by every operation in this crate.
///
/// Messages only ever carry static reasons and lengths. Passwords, keys and
/// plaintext never end up in an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Caller supplied an empty password, a malformed salt, an empty payload
    /// or a buffer too short to hold the fixed overhead.
    InvalidInput(&'static str),
    /// Key is present but has the wrong length.
    InvalidKey { expected: usize, got: usize },
    /// Tag mismatch: tampering, corruption or the wrong key.
    AuthenticationFailed,
    /// The random source or an underlying primitive could not operate.
    CryptoUnavailable(&'static str),
}

impl CryptoError {
    /// Only environment failures may succeed on a second attempt; everything
    /// else needs different input from the caller.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CryptoError::CryptoUnavailable(_))
    }
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoError::InvalidInput(reason) => write!(f, "invalid input: {reason}"),
            CryptoError::InvalidKey { expected, got } => {
                write!(f, "invalid key length: expected {expected} bytes, got {got}")
            }
            CryptoError::AuthenticationFailed => {
                write!(f, "authentication failed: wrong key or corrupted data")
            }
            CryptoError::CryptoUnavailable(reason) => {
                write!(f, "cryptography unavailable: {reason}")
            }
        }
    }
}

impl std::error::Error for CryptoError {}

pub type Result<T> = std::result::Result<T, CryptoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_unavailable_is_retryable() {
        assert!(CryptoError::CryptoUnavailable("rng").is_retryable());
        assert!(!CryptoError::InvalidInput("empty password").is_retryable());
        assert!(!CryptoError::InvalidKey { expected: 32, got: 16 }.is_retryable());
        assert!(!CryptoError::AuthenticationFailed.is_retryable());
    }

    #[test]
    fn display_mentions_lengths_only() {
        let msg = CryptoError::InvalidKey { expected: 32, got: 31 }.to_string();
        assert_eq!(msg, "invalid key length: expected 32 bytes, got 31");
    }
}
