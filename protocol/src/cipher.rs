//! Decoding of the obfuscated frames sent by the device.
//!
//! Each step is a free function over a fixed 8 byte buffer so that it can be
//! exercised in isolation. [`decode`] chains them in the order the device
//! firmware expects.

use crate::{FRAME_LEN, Key};

type Buf = [u8; FRAME_LEN];

/// Position pairs exchanged in the first step.
const SWAPS: [(usize, usize); 4] = [(0, 2), (1, 4), (3, 7), (5, 6)];

const MAGIC_WORD: &[u8; FRAME_LEN] = b"Htemp99e";

/// Decodes a raw frame with the key the device was armed with.
///
/// This never fails: garbage in gives well-formed garbage out.
#[must_use]
pub fn decode(raw: [u8; FRAME_LEN], key: &Key) -> [u8; FRAME_LEN] {
    let buf = swap_bytes(raw);
    let buf = xor_key(buf, key);
    let buf = redistribute_bits(buf);
    subtract_magic(buf)
}

#[must_use]
pub fn swap_bytes(mut buf: Buf) -> Buf {
    for (a, b) in SWAPS {
        buf.swap(a, b);
    }

    buf
}

#[must_use]
pub fn xor_key(mut buf: Buf, key: &Key) -> Buf {
    for (byte, k) in buf.iter_mut().zip(key.as_bytes()) {
        *byte ^= k;
    }

    buf
}

/// Shifts the whole 64 bit window right by 3 bits, wrapping the low bits
/// of the last byte into the first one.
#[must_use]
pub fn redistribute_bits(buf: Buf) -> Buf {
    let mut out = [0; FRAME_LEN];

    for i in 0..FRAME_LEN {
        let prev = buf[(i + FRAME_LEN - 1) % FRAME_LEN];
        out[i] = (prev << 5) | (buf[i] >> 3);
    }

    out
}

#[must_use]
pub fn subtract_magic(mut buf: Buf) -> Buf {
    for (byte, m) in buf.iter_mut().zip(MAGIC_WORD) {
        *byte = byte.wrapping_sub(m.rotate_left(4));
    }

    buf
}

#[cfg(test)]
mod tests {
    use super::{decode, redistribute_bits, subtract_magic, swap_bytes, xor_key};
    use crate::Key;

    // No device capture is available. The raw frames below were built by
    // running the transform backwards from well-formed readings (650 ppm,
    // raw temperature 0x1283) and checked against a direct port of the
    // reference decoder.
    const VENDOR_KEY: Key = Key::new([0x86, 0x41, 0xc9, 0xa8, 0x7f, 0x41, 0x3c, 0xac]);

    #[test]
    fn test_swap_is_involution() {
        let buf = [0, 1, 2, 3, 4, 5, 6, 7];
        assert_eq!(swap_bytes(buf), [2, 4, 0, 7, 1, 6, 5, 3]);
        assert_eq!(swap_bytes(swap_bytes(buf)), buf);
    }

    #[test]
    fn test_xor_with_zero_key_is_identity() {
        let buf = [0xde, 0xad, 0xbe, 0xef, 0x01, 0x02, 0x03, 0x04];
        assert_eq!(xor_key(buf, &Key::default()), buf);
        assert_eq!(xor_key(xor_key(buf, &VENDOR_KEY), &VENDOR_KEY), buf);
    }

    #[test]
    fn test_redistribute_wraps_last_byte() {
        // Only the low 3 bits of the last byte are set, so they must show
        // up as the top bits of the first output byte.
        let buf = [0, 0, 0, 0, 0, 0, 0, 0b0000_0111];
        assert_eq!(redistribute_bits(buf), [0b1110_0000, 0, 0, 0, 0, 0, 0, 0]);

        let buf = [0b1111_1000, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(redistribute_bits(buf), [0b0001_1111, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_subtract_magic_wraps() {
        assert_eq!(
            subtract_magic([0; 8]),
            [0x7c, 0xb9, 0xaa, 0x2a, 0xf9, 0x6d, 0x6d, 0xaa]
        );
    }

    #[test]
    fn test_decode_co2_frame() {
        let raw = [0x05, 0xa4, 0xa2, 0xb6, 0x4f, 0x9a, 0x9c, 0x90];
        assert_eq!(
            decode(raw, &Key::default()),
            [0x50, 0x02, 0x8a, 0xdc, 0x0d, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_decode_with_vendor_key() {
        let co2 = [0xcc, 0xdb, 0x24, 0x1a, 0x0e, 0xa6, 0xdd, 0x38];
        assert_eq!(
            decode(co2, &VENDOR_KEY),
            [0x50, 0x02, 0x8a, 0xdc, 0x0d, 0x00, 0x00, 0x00]
        );

        let temp = [0x04, 0xdb, 0xb4, 0x1a, 0x8f, 0xa6, 0xdd, 0xc0];
        assert_eq!(
            decode(temp, &VENDOR_KEY),
            [0x42, 0x12, 0x83, 0xd7, 0x0d, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_decode_is_deterministic() {
        let raw = [0x8b, 0xa4, 0x8a, 0xb7, 0x8b, 0x9a, 0x9c, 0x40];

        for key in [Key::default(), VENDOR_KEY] {
            assert_eq!(decode(raw, &key), decode(raw, &key));
        }
    }

    #[test]
    fn test_wrong_key_garbles_frame() {
        let raw = [0x05, 0xa4, 0xa2, 0xb6, 0x4f, 0x9a, 0x9c, 0x90];
        assert_ne!(decode(raw, &VENDOR_KEY)[0], 0x50);
    }
}
