use keyseal::{CryptoError, append_tag, decrypt, encrypt, validate_tag};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn tag_roundtrip(key in proptest::collection::vec(any::<u8>(), 0..80),
                     data in proptest::collection::vec(any::<u8>(), 1..512)) {
        let tagged = append_tag(&key, &data).unwrap();
        prop_assert_eq!(validate_tag(&key, &tagged).unwrap(), data);
    }

    #[test]
    fn any_flipped_tagged_byte_is_detected(data in proptest::collection::vec(any::<u8>(), 1..256),
                                            index in any::<prop::sample::Index>(),
                                            bit in 0u8..8) {
        let key = b"tamper detection key";
        let mut tagged = append_tag(key, &data).unwrap();
        let i = index.index(tagged.len());
        tagged[i] ^= 1 << bit;
        prop_assert_eq!(validate_tag(key, &tagged), Err(CryptoError::AuthenticationFailed));
    }

    #[test]
    fn cipher_roundtrip(key in any::<[u8; 32]>(),
                        msg in proptest::collection::vec(any::<u8>(), 1..1024)) {
        let sealed = encrypt(&key, &msg).unwrap();
        let opened = decrypt(&key, &sealed).unwrap();
        prop_assert_eq!(opened.as_slice(), msg.as_slice());
    }

    #[test]
    fn any_flipped_sealed_byte_is_detected(msg in proptest::collection::vec(any::<u8>(), 1..256),
                                           index in any::<prop::sample::Index>(),
                                           bit in 0u8..8) {
        let key = [5u8; 32];
        let mut sealed = encrypt(&key, &msg).unwrap();
        let i = index.index(sealed.len());
        sealed[i] ^= 1 << bit;
        prop_assert_eq!(decrypt(&key, &sealed), Err(CryptoError::AuthenticationFailed));
    }
}
