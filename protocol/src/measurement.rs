use crate::FRAME_LEN;

/// Channels the device reports on, identified by the first decoded byte.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(test, derive(strum::EnumIter))]
pub enum Channel {
    Co2 = 0x50,
    Temperature = 0x42,
}

impl From<Channel> for u8 {
    fn from(value: Channel) -> Self {
        value as Self
    }
}

impl TryFrom<u8> for Channel {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            n if Channel::Co2 as u8 == n => Ok(Channel::Co2),
            n if Channel::Temperature as u8 == n => Ok(Channel::Temperature),
            n => Err(n),
        }
    }
}

/// A single value read from the device.
///
/// The temperature is kept in device units. Converting it to degrees
/// Celsius is up to the consumer (`raw / 16 - 273.15`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Measurement {
    Co2 { ppm: u16 },
    Temperature { raw: u16 },
    /// The device also emits housekeeping frames with undocumented tags.
    Unknown { tag: u8, raw: u16 },
}

/// Reads the channel tag and the big-endian value out of a decoded frame.
#[must_use]
pub fn interpret(frame: &[u8; FRAME_LEN]) -> Measurement {
    let raw = u16::from_be_bytes([frame[1], frame[2]]);

    match Channel::try_from(frame[0]) {
        Ok(Channel::Co2) => Measurement::Co2 { ppm: raw },
        Ok(Channel::Temperature) => Measurement::Temperature { raw },
        Err(tag) => Measurement::Unknown { tag, raw },
    }
}
