use std::fmt::{self, Display};

use protocol::Measurement;

const KELVIN_OFFSET: f64 = 273.15;

/// A measurement converted to the unit it gets displayed in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Reading {
    Co2 { ppm: u16 },
    Temperature { celsius: f64 },
}

impl Reading {
    /// Converts a measurement, returning [`None`] for unknown channels.
    #[must_use]
    pub fn from_measurement(measurement: Measurement) -> Option<Self> {
        match measurement {
            Measurement::Co2 { ppm } => Some(Self::Co2 { ppm }),
            Measurement::Temperature { raw } => Some(Self::Temperature {
                celsius: f64::from(raw) / 16.0 - KELVIN_OFFSET,
            }),
            Measurement::Unknown { .. } => None,
        }
    }
}

impl Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Co2 { ppm } => write!(f, "CntR\t{ppm}"),
            Self::Temperature { celsius } => write!(f, "Tamb\t{celsius:.4}"),
        }
    }
}

/// Latest reading of each channel.
#[derive(Clone, Copy, Debug, Default)]
pub struct Snapshot {
    co2_ppm: Option<u16>,
    celsius: Option<f64>,
}

impl Snapshot {
    pub fn update(&mut self, reading: Reading) {
        match reading {
            Reading::Co2 { ppm } => self.co2_ppm = Some(ppm),
            Reading::Temperature { celsius } => self.celsius = Some(celsius),
        }
    }

    #[inline]
    #[must_use]
    pub fn co2_ppm(&self) -> Option<u16> {
        self.co2_ppm
    }

    #[inline]
    #[must_use]
    pub fn celsius(&self) -> Option<f64> {
        self.celsius
    }

    /// Whether both channels have been read at least once.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.co2_ppm.is_some() && self.celsius.is_some()
    }
}

#[cfg(test)]
mod tests {
    use protocol::Measurement;

    use super::{Reading, Snapshot};

    #[test]
    fn test_temperature_conversion() {
        let reading = Reading::from_measurement(Measurement::Temperature { raw: 0x1283 });
        let Some(Reading::Temperature { celsius }) = reading else {
            panic!("expected a temperature, got {reading:?}");
        };

        assert!((celsius - 23.0375).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_has_no_reading() {
        let measurement = Measurement::Unknown { tag: 0x6d, raw: 1 };
        assert_eq!(Reading::from_measurement(measurement), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Reading::Co2 { ppm: 650 }.to_string(), "CntR\t650");
        assert_eq!(
            Reading::Temperature { celsius: 23.0375 }.to_string(),
            "Tamb\t23.0375"
        );
    }

    #[test]
    fn test_snapshot_completion() {
        let mut snapshot = Snapshot::default();
        assert!(!snapshot.is_complete());

        snapshot.update(Reading::Co2 { ppm: 650 });
        snapshot.update(Reading::Co2 { ppm: 700 });
        assert!(!snapshot.is_complete());
        assert_eq!(snapshot.co2_ppm(), Some(700));

        snapshot.update(Reading::Temperature { celsius: 21.5 });
        assert!(snapshot.is_complete());
        assert_eq!(snapshot.celsius(), Some(21.5));
    }
}
