//! Assertion helpers for tests.

use std::io::Cursor;

use pretty_assertions::assert_eq;

/// Assert bytes carry the PNG signature.
pub fn assert_png(bytes: &[u8]) {
    assert!(
        bytes.len() > 8,
        "expected a PNG, got only {} bytes",
        bytes.len()
    );
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n", "missing PNG signature");
}

/// Decode PNG bytes back into (width, height, RGBA pixels).
pub fn decode_rgba(bytes: &[u8]) -> (u32, u32, Vec<u8>) {
    let decoder = png::Decoder::new(Cursor::new(bytes));
    let mut reader = decoder.read_info().expect("PNG header must parse");
    let mut data = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut data).expect("PNG frame must decode");
    data.truncate(info.buffer_size());
    (info.width, info.height, data)
}

/// Assert every pixel of decoded RGBA data equals `expected`.
pub fn assert_solid(data: &[u8], expected: [u8; 4]) {
    for (i, px) in data.chunks_exact(4).enumerate() {
        assert_eq!(px, expected, "pixel {i} diverged");
    }
}

/// Assert every pixel channel is one of exactly two values {0, 255}.
pub fn assert_one_bit(data: &[u8]) {
    for (i, px) in data.chunks_exact(4).enumerate() {
        for &channel in &px[..3] {
            assert!(
                channel == 0 || channel == 255,
                "pixel {i} has intermediate channel value {channel}"
            );
        }
        assert_eq!(px[0], px[1], "pixel {i} is not grey");
        assert_eq!(px[1], px[2], "pixel {i} is not grey");
    }
}
