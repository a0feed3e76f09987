#![no_main]

use libfuzzer_sys::fuzz_target;
use rtcp_demux_codec::{Compound, classify};

fuzz_target!(|data: &[u8]| {
    let _ = classify(data);

    let mut walked = 0;
    for item in Compound::new(data) {
        match item {
            Ok((header, body)) => {
                assert_eq!(body.len() + 4, header.packet_size());
                walked += header.packet_size();
            }
            Err(_) => break,
        }
    }

    assert!(walked <= data.len());
});
