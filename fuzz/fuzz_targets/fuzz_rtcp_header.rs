#![no_main]

use bytes::BytesMut;
use libfuzzer_sys::fuzz_target;
use rtcp_demux_codec::{Header, is_rtcp_packet};

fuzz_target!(|data: &[u8]| {
    let _ = is_rtcp_packet(data);

    if let Ok(header) = Header::decode(data) {
        let mut bytes = BytesMut::with_capacity(4);
        header.encode(&mut bytes).unwrap();

        assert_eq!(&bytes[..], &data[..4]);
    }
});
