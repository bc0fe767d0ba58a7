use thiserror::Error as ThisError;

#[derive(Clone, Copy, Debug, ThisError)]
pub enum Error {
    #[error("unable to enumerate USB devices")]
    Enumeration(#[source] rusb::Error),
    #[error("unable to open device")]
    Open(#[source] rusb::Error),
    #[error("unable to claim interface {interface}")]
    ClaimFailed {
        interface: u8,
        #[source]
        source: rusb::Error,
    },
    #[error("sending the key failed")]
    ArmFailed(#[from] ArmFailure),
    #[error("device polled before being armed")]
    NotArmed,
    #[error("interrupt transfer failed")]
    Transfer(#[source] rusb::Error),
    #[error("read {read} bytes, expected {expected}")]
    ShortRead { read: usize, expected: usize },
}

impl Error {
    /// Whether retrying the same call on the same session can succeed.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ArmFailed(_) | Self::ShortRead { .. } | Self::Transfer(rusb::Error::Timeout)
        )
    }
}

#[derive(Clone, Copy, Debug, ThisError)]
pub enum ArmFailure {
    #[error("control transfer failed")]
    Transfer(#[from] rusb::Error),
    #[error("wrote {written} bytes, expected {expected}")]
    ShortWrite { written: usize, expected: usize },
}

#[cfg(test)]
mod tests {
    use super::{ArmFailure, Error};

    #[test]
    fn test_recoverable_errors() {
        assert!(Error::ShortRead { read: 7, expected: 8 }.is_recoverable());
        assert!(Error::Transfer(rusb::Error::Timeout).is_recoverable());
        assert!(Error::from(ArmFailure::from(rusb::Error::Pipe)).is_recoverable());

        assert!(!Error::Transfer(rusb::Error::NoDevice).is_recoverable());
        assert!(!Error::NotArmed.is_recoverable());
    }
}
