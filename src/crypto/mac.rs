//! HMAC-SHA256 tags appended to the data they protect.
//!
//! Tagged format:
//! ```text
//! [N bytes: data][32 bytes: HMAC-SHA256(key, data)]
//! ```

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::MAC_LEN;
use crate::error::{CryptoError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Compute the 32-byte tag of `data` under `key`.
pub fn compute_tag(key: &[u8], data: &[u8]) -> [u8; MAC_LEN] {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key)
        .expect("HMAC key length is always valid");
    mac.update(data);
    mac.finalize().into_bytes().into()
}

/// Return `data || tag`, or `None` when there is nothing to authenticate.
pub fn append_tag(key: &[u8], data: &[u8]) -> Option<Vec<u8>> {
    if data.is_empty() {
        return None;
    }

    let tag = compute_tag(key, data);

    let mut tagged = Vec::with_capacity(data.len() + MAC_LEN);
    tagged.extend_from_slice(data);
    tagged.extend_from_slice(&tag);
    Some(tagged)
}

/// Check the trailing tag of `tagged` and return the data in front of it.
///
/// A buffer too short to carry a tag and a buffer whose tag does not match
/// fail identically.
pub fn validate_tag(key: &[u8], tagged: &[u8]) -> Result<Vec<u8>> {
    if tagged.len() <= MAC_LEN {
        return Err(CryptoError::AuthenticationFailed);
    }

    let (data, claimed) = tagged.split_at(tagged.len() - MAC_LEN);
    let expected = compute_tag(key, data);

    if bool::from(expected.as_slice().ct_eq(claimed)) {
        Ok(data.to_vec())
    } else {
        Err(CryptoError::AuthenticationFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"0123456789abcdef0123456789abcdef";

    #[test]
    fn empty_data_is_a_noop() {
        assert_eq!(append_tag(KEY, &[]), None);
        assert_eq!(append_tag(KEY, b""), None);
    }

    #[test]
    fn append_adds_exactly_one_tag() {
        let tagged = append_tag(KEY, b"some-data").unwrap();
        assert_eq!(tagged.len(), b"some-data".len() + MAC_LEN);
        assert_eq!(&tagged[..9], b"some-data");
    }

    #[test]
    fn validate_returns_original_data() {
        let tagged = append_tag(KEY, b"some-data").unwrap();
        assert_eq!(validate_tag(KEY, &tagged).unwrap(), b"some-data");
    }

    #[test]
    fn known_answer_rfc4231_case_2() {
        let tag = compute_tag(b"Jefe", b"what do ya want for nothing?");
        assert_eq!(
            hex::encode(tag),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn keys_of_any_length_produce_tags() {
        for len in [0usize, 1, 64, 65, 200] {
            let key = vec![0x0b; len];
            let tagged = append_tag(&key, b"payload").unwrap();
            assert_eq!(validate_tag(&key, &tagged).unwrap(), b"payload", "len {len}");
        }
    }

    #[test]
    fn short_buffers_are_invalid() {
        for len in [0usize, 1, MAC_LEN - 1, MAC_LEN] {
            let buf = vec![0u8; len];
            assert_eq!(validate_tag(KEY, &buf), Err(CryptoError::AuthenticationFailed));
        }
    }

    #[test]
    fn wrong_key_is_invalid() {
        let tagged = append_tag(KEY, b"payload").unwrap();
        assert_eq!(
            validate_tag(b"another key", &tagged),
            Err(CryptoError::AuthenticationFailed)
        );
    }

    #[test]
    fn every_flipped_byte_is_detected() {
        let tagged = append_tag(KEY, b"integrity matters").unwrap();
        for i in 0..tagged.len() {
            let mut corrupted = tagged.clone();
            corrupted[i] ^= 0x01;
            assert!(validate_tag(KEY, &corrupted).is_err(), "byte {i}");
        }
    }

    #[test]
    fn truncated_tag_is_invalid() {
        let tagged = append_tag(KEY, b"payload").unwrap();
        assert!(validate_tag(KEY, &tagged[..tagged.len() - 1]).is_err());
    }
}
