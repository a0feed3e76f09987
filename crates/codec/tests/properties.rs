//! Property-based tests for the classifier and the common header codec.

use proptest::{collection::vec, prelude::*};
use rtcp_demux_codec::{Error, Header, PacketType, is_rtcp_packet};

fn header() -> impl Strategy<Value = Header> {
    (any::<bool>(), 0u8..=31, any::<u8>(), any::<u16>()).prop_map(
        |(padding, count, kind, length)| Header {
            padding,
            count,
            kind: PacketType::from(kind),
            length,
        },
    )
}

proptest! {
    #[test]
    fn prop_header_roundtrip(header in header()) {
        let bytes = header.to_bytes().expect("valid header should encode");
        prop_assert_eq!(Header::decode(&bytes), Ok(header));
    }

    #[test]
    fn prop_header_oversized_count(count in 32u8.., kind in any::<u8>(), length in any::<u16>()) {
        let header = Header::new(PacketType::from(kind), count, length);
        prop_assert!(!header.validate());
        prop_assert_eq!(header.to_bytes(), Err(Error::InvalidHeader));
    }

    #[test]
    fn prop_decode_ignores_trailing_bytes(header in header(), tail in vec(any::<u8>(), 0..64)) {
        let mut bytes = header.to_bytes().expect("valid header should encode").to_vec();
        bytes.extend_from_slice(&tail);
        prop_assert_eq!(Header::decode(&bytes), Ok(header));
    }

    #[test]
    fn prop_decode_version(bytes in any::<[u8; 4]>()) {
        let ret = Header::decode(&bytes);
        if bytes[0] >> 6 == 2 {
            prop_assert!(ret.is_ok());
        } else {
            prop_assert_eq!(ret, Err(Error::BadVersion));
        }
    }

    #[test]
    fn prop_short_buffers_never_decode(bytes in vec(any::<u8>(), 0..4)) {
        prop_assert!(!is_rtcp_packet(&bytes));
        prop_assert_eq!(Header::decode(&bytes), Err(Error::PacketTooShort));
    }

    #[test]
    fn prop_classify(bytes in vec(any::<u8>(), 4..32)) {
        let expected = bytes[0] >> 6 == 2 && (72..=76).contains(&(bytes[1] & 0x7f));
        prop_assert_eq!(is_rtcp_packet(&bytes), expected);
    }
}
