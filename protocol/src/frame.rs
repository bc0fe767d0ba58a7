use crate::{FRAME_LEN, Key, Measurement, cipher, interpret};

/// Terminator the device places after the checksum.
const FRAME_END: u8 = 0x0d;

/// A frame after it went through [`cipher::decode`].
///
/// Layout: `[tag, value_hi, value_lo, checksum, 0x0d, 0, 0, 0]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedFrame([u8; FRAME_LEN]);

impl DecodedFrame {
    #[must_use]
    pub fn decode(raw: [u8; FRAME_LEN], key: &Key) -> Self {
        Self(cipher::decode(raw, key))
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }

    /// Whether the checksum byte matches and the frame is terminated.
    ///
    /// A mismatch usually means the device was armed with a different key.
    #[must_use]
    pub fn checksum_ok(&self) -> bool {
        let [tag, hi, lo, checksum, end, ..] = self.0;
        tag.wrapping_add(hi).wrapping_add(lo) == checksum && end == FRAME_END
    }

    #[must_use]
    pub fn measurement(&self) -> Measurement {
        interpret(&self.0)
    }
}

impl From<[u8; FRAME_LEN]> for DecodedFrame {
    fn from(value: [u8; FRAME_LEN]) -> Self {
        Self(value)
    }
}
