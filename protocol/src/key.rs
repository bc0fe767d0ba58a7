use core::str::FromStr;

use thiserror::Error as ThisError;

use crate::FRAME_LEN;

/// The 8 byte table sent to the device when arming it.
///
/// Any value is accepted by the device. Frames it sends afterwards are
/// XOR-ed with the same table, so the key has to be kept around for
/// decoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Key([u8; FRAME_LEN]);

impl Key {
    #[must_use]
    pub const fn new(bytes: [u8; FRAME_LEN]) -> Self {
        Self(bytes)
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }
}

impl From<[u8; FRAME_LEN]> for Key {
    fn from(value: [u8; FRAME_LEN]) -> Self {
        Self(value)
    }
}

/// Parses 16 hex digits, e.g. `8641c9a87f413cac`.
impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0; FRAME_LEN];
        let mut count = 0;

        for c in s.chars() {
            let nibble = c.to_digit(16).ok_or(KeyParseError::Digit(c))?;

            if let Some(byte) = bytes.get_mut(count / 2) {
                // Always fits, `to_digit(16)` is below 16.
                #[allow(clippy::cast_possible_truncation)]
                let nibble = nibble as u8;
                *byte = (*byte << 4) | nibble;
            }

            count += 1;
        }

        if count != FRAME_LEN * 2 {
            return Err(KeyParseError::Digits(count));
        }

        Ok(Self(bytes))
    }
}

#[derive(Clone, Copy, Debug, ThisError)]
#[cfg_attr(test, derive(PartialEq))]
pub enum KeyParseError {
    #[error("expected 16 hex digits, got {0}")]
    Digits(usize),
    #[error("invalid hex digit {0:?} in key")]
    Digit(char),
}
