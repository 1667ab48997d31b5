#![no_main]
use bmpkit::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decode must never panic
    let Ok(image) = decode_bmp(data, enough::Unstoppable) else {
        return;
    };

    // Every operation either succeeds or reports an error. Output sizes here
    // are bounded by the input, so nothing allocates more than it decoded.
    let _ = extract(&image, BitPlane::Lsb);
    let _ = extract(&image, BitPlane::Msb);
    let _ = capacity(&image);
    let _ = crop(&image, 0, 0, 1, 1, enough::Unstoppable);
    let _ = resize(&image, 3, 3, enough::Unstoppable);
    let _ = scale(&image, 0.5, enough::Unstoppable);
    let _ = rotate(&image, 45.0, enough::Unstoppable);

    let mut image = image;
    let _ = fill(&mut image, [1, 2, 3]);
    let _ = embed(&mut image, b"fuzz", BitPlane::Lsb);
});
