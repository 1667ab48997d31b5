#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp(width: i32, height: i32, bpp: u16, extra: &[u8], pixels: &[u8]) -> Vec<u8> {
    let offset = 54 + extra.len() as u32;
    let mut out = vec![0u8; 54];
    out[0] = b'B'; out[1] = b'M';
    out[2..6].copy_from_slice(&(offset + pixels.len() as u32).to_le_bytes()); // file size
    out[10..14].copy_from_slice(&offset.to_le_bytes()); // data offset
    out[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    out[18..22].copy_from_slice(&width.to_le_bytes());
    out[22..26].copy_from_slice(&height.to_le_bytes());
    out[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    out[28..30].copy_from_slice(&bpp.to_le_bytes());
    out[34..38].copy_from_slice(&(pixels.len() as u32).to_le_bytes()); // image size
    out.extend_from_slice(extra);
    out.extend_from_slice(pixels);
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 1x1 24-bit: 3 bytes BGR + 1 padding
    fs::write(format!("{dir}/bmp_1x1.bmp"), bmp(1, 1, 24, &[], &[0xff, 0, 0, 0])).unwrap();

    // 3x2 24-bit bottom-up and top-down
    let pixels: Vec<u8> = (0..24).collect();
    fs::write(format!("{dir}/bmp_3x2.bmp"), bmp(3, 2, 24, &[], &pixels)).unwrap();
    fs::write(format!("{dir}/bmp_3x2_topdown.bmp"), bmp(3, -2, 24, &[], &pixels)).unwrap();

    // 4x4 32-bit with a 16-byte gap before the pixels
    let pixels: Vec<u8> = (0..64).map(|i| i * 3).collect();
    fs::write(format!("{dir}/bmp_4x4_bgra.bmp"), bmp(4, 4, 32, &[0xaa; 16], &pixels)).unwrap();

    // 12x12 24-bit with an embedded LSB payload header (length 2)
    let mut pixels = vec![0u8; 36 * 12];
    pixels[36 * 11 + 6] = 1;
    fs::write(format!("{dir}/bmp_12x12_stego.bmp"), bmp(12, 12, 24, &[], &pixels)).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    let mut bad_offset = bmp(1, 1, 24, &[], &[0; 4]);
    bad_offset[10..14].copy_from_slice(&20u32.to_le_bytes());
    fs::write(format!("{dir}/bmp_bad_offset.bin"), bad_offset).unwrap();
    let mut zero_size = bmp(2, 2, 24, &[], &[0x55; 16]);
    zero_size[34..38].copy_from_slice(&0u32.to_le_bytes());
    fs::write(format!("{dir}/bmp_zero_image_size.bmp"), zero_size).unwrap();

    println!("Generated seed corpus in {dir}/");
}
