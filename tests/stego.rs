use bmpkit::*;

fn noise(w: u32, h: u32, format: PixelFormat, order: RowOrder) -> Bitmap {
    let mut img = Bitmap::new(w, h, format, order).unwrap();
    let mut state: u32 = 0x1234_5678;
    for b in img.pixels_mut() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *b = state as u8;
    }
    img
}

#[test]
fn roundtrip_every_plane_depth_and_order() {
    let message = "The quick brown fox jumps over the lazy dog";
    for format in [PixelFormat::Bgr24, PixelFormat::Bgra32] {
        for order in [RowOrder::BottomUp, RowOrder::TopDown] {
            for plane in [BitPlane::Lsb, BitPlane::Msb] {
                let mut img = noise(13, 11, format, order);
                embed(&mut img, message, plane).unwrap();
                assert_eq!(
                    extract_text(&img, plane).unwrap(),
                    message,
                    "{format:?} {order:?} {plane}"
                );
            }
        }
    }
}

#[test]
fn binary_payload_roundtrip() {
    let payload: Vec<u8> = (0..=255).collect();
    let mut img = noise(64, 16, PixelFormat::Bgr24, RowOrder::BottomUp);
    embed(&mut img, &payload, BitPlane::Lsb).unwrap();
    assert_eq!(extract(&img, BitPlane::Lsb).unwrap(), payload);
}

#[test]
fn empty_message_roundtrip() {
    let mut img = noise(4, 4, PixelFormat::Bgr24, RowOrder::BottomUp);
    embed(&mut img, "", BitPlane::Msb).unwrap();
    assert_eq!(extract(&img, BitPlane::Msb).unwrap(), Vec::<u8>::new());
}

#[test]
fn later_embed_replaces_earlier() {
    let mut img = noise(20, 20, PixelFormat::Bgr24, RowOrder::TopDown);
    embed(&mut img, "first message", BitPlane::Lsb).unwrap();
    embed(&mut img, "second", BitPlane::Lsb).unwrap();
    assert_eq!(extract_text(&img, BitPlane::Lsb).unwrap(), "second");
}

#[test]
fn traversal_starts_at_top_row_of_bottom_up_image() {
    // 8x2 at 24 bits: 24 carrier bytes per row, no padding
    let mut img = Bitmap::new(8, 2, PixelFormat::Bgr24, RowOrder::BottomUp).unwrap();
    embed(&mut img, [0xFFu8], BitPlane::Lsb).unwrap();

    let mut expected = vec![0u8; 48];
    // Length 1 ends the first prefix byte: carrier 7, in logical row 0,
    // which is stored last
    expected[24 + 7] = 1;
    // Message bits are carriers 32..40: logical row 1, stored first
    expected[8..16].fill(1);
    assert_eq!(img.pixels(), &expected[..]);
}

#[test]
fn top_down_traversal_follows_storage() {
    let mut img = Bitmap::new(8, 2, PixelFormat::Bgr24, RowOrder::TopDown).unwrap();
    embed(&mut img, [0xFFu8], BitPlane::Lsb).unwrap();

    let mut expected = vec![0u8; 48];
    expected[7] = 1;
    expected[32..40].fill(1);
    assert_eq!(img.pixels(), &expected[..]);
}

#[test]
fn payload_skips_row_padding() {
    // 3 pixels = 9 bytes per row, 3 bytes of padding
    let mut img = Bitmap::new(3, 5, PixelFormat::Bgr24, RowOrder::BottomUp).unwrap();
    for row in img.pixels_mut().chunks_exact_mut(12) {
        row[9..].fill(0xEE);
    }
    // 45 carrier bytes: room for one byte after the prefix
    embed(&mut img, [0xA5u8], BitPlane::Lsb).unwrap();
    for row in img.pixels().chunks_exact(12) {
        assert_eq!(&row[9..], &[0xEE; 3]);
    }
    assert_eq!(extract(&img, BitPlane::Lsb).unwrap(), vec![0xA5]);
}

#[test]
fn msb_plane_only_touches_bit_seven() {
    let original = noise(10, 10, PixelFormat::Bgra32, RowOrder::BottomUp);
    let mut img = original.clone();
    embed(&mut img, "visible", BitPlane::Msb).unwrap();
    assert!(
        img.pixels()
            .iter()
            .zip(original.pixels())
            .all(|(a, b)| (a ^ b) & 0x7F == 0)
    );
    assert_eq!(img.file_header, original.file_header);
    assert_eq!(img.info_header, original.info_header);
}

#[test]
fn lsb_plane_only_touches_bit_zero() {
    let original = noise(10, 10, PixelFormat::Bgr24, RowOrder::TopDown);
    let mut img = original.clone();
    embed(&mut img, "hidden", BitPlane::Lsb).unwrap();
    assert!(
        img.pixels()
            .iter()
            .zip(original.pixels())
            .all(|(a, b)| (a ^ b) & 0xFE == 0)
    );
}

#[test]
fn capacity_boundary() {
    // 4x4 at 24 bits: 48 carrier bytes, 16 bits after the prefix
    let mut img = noise(4, 4, PixelFormat::Bgr24, RowOrder::BottomUp);
    assert_eq!(capacity(&img).unwrap(), 2);
    embed(&mut img, "ab", BitPlane::Lsb).unwrap();

    let before = img.clone();
    assert!(matches!(
        embed(&mut img, "abc", BitPlane::Lsb),
        Err(BitmapError::CapacityExceeded {
            needed_bits: 56,
            available_bits: 48
        })
    ));
    assert_eq!(img, before);
    assert_eq!(extract_text(&img, BitPlane::Lsb).unwrap(), "ab");

    // 14x1 at 32 bits: 56 carrier bytes
    let mut img = noise(14, 1, PixelFormat::Bgra32, RowOrder::TopDown);
    assert_eq!(capacity(&img).unwrap(), 3);
    embed(&mut img, "xyz", BitPlane::Msb).unwrap();
    assert!(embed(&mut img, "wxyz", BitPlane::Msb).is_err());
}

#[test]
fn implausible_length_is_rejected() {
    let mut img = Bitmap::new(10, 10, PixelFormat::Bgr24, RowOrder::BottomUp).unwrap();
    img.pixels_mut().fill(0xFF);
    // Declared length 0xFFFF_FFFF
    assert!(matches!(
        extract(&img, BitPlane::Lsb),
        Err(BitmapError::CapacityExceeded { .. })
    ));
}

#[test]
fn wrong_plane_does_not_recover_message() {
    let mut img = Bitmap::new(10, 10, PixelFormat::Bgr24, RowOrder::BottomUp).unwrap();
    embed(&mut img, "lsb only", BitPlane::Lsb).unwrap();
    // Bit 7 of a black image reads as a zero length
    assert_eq!(extract(&img, BitPlane::Msb).unwrap(), Vec::<u8>::new());
}

#[test]
fn non_utf8_payload() {
    let mut img = noise(8, 8, PixelFormat::Bgr24, RowOrder::BottomUp);
    embed(&mut img, [0xFFu8, 0xFE], BitPlane::Lsb).unwrap();
    assert!(matches!(
        extract_text(&img, BitPlane::Lsb),
        Err(BitmapError::InvalidUtf8)
    ));
    assert_eq!(extract(&img, BitPlane::Lsb).unwrap(), vec![0xFF, 0xFE]);
}

#[test]
fn unsupported_depth_is_rejected() {
    let mut img = Bitmap::new(8, 8, PixelFormat::Bgr24, RowOrder::BottomUp).unwrap();
    img.info_header.bit_count = 16;
    assert!(matches!(
        embed(&mut img, "x", BitPlane::Lsb),
        Err(BitmapError::UnsupportedFormat { bit_count: 16, .. })
    ));
    assert!(matches!(
        extract(&img, BitPlane::Lsb),
        Err(BitmapError::UnsupportedFormat { .. })
    ));
    assert!(capacity(&img).is_err());
}

#[test]
fn survives_encode_decode() {
    let mut img = noise(16, 9, PixelFormat::Bgr24, RowOrder::BottomUp);
    embed(&mut img, "persisted", BitPlane::Lsb).unwrap();
    let bytes = encode_bmp(&img, Unstoppable).unwrap();
    let loaded = decode_bmp(&bytes, Unstoppable).unwrap();
    assert_eq!(extract_text(&loaded, BitPlane::Lsb).unwrap(), "persisted");
}
