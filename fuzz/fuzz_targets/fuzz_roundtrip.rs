#![no_main]
use bmpkit::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, encoding and decoding again must reproduce it
    let Ok(decoded) = decode_bmp(data, enough::Unstoppable) else {
        return;
    };

    let Ok(encoded) = encode_bmp(&decoded, enough::Unstoppable) else {
        return;
    };
    let Ok(decoded2) = decode_bmp(&encoded, enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded.pixels(), decoded2.pixels(), "roundtrip pixel mismatch");
    assert_eq!(decoded.file_header.pixel_offset, decoded2.file_header.pixel_offset);
    assert_eq!(decoded.info_header, decoded2.info_header);
    assert_eq!(decoded.header_extra(), decoded2.header_extra());
});
