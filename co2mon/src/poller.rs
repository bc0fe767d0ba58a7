use std::ops::ControlFlow;

use tracing::instrument;

use crate::{DeviceSession, Reading, UsbHandle, error::Error};

/// Polls an armed session until `sink` breaks or an unrecoverable error
/// occurs.
///
/// Short reads, timeouts, corrupted frames and frames on unknown channels
/// are skipped.
///
/// # Errors
#[instrument(skip_all)]
pub fn run<H, F>(session: &mut DeviceSession<H>, mut sink: F) -> Result<(), Error>
where
    H: UsbHandle,
    F: FnMut(Reading) -> ControlFlow<()>,
{
    loop {
        let frame = match session.poll_frame() {
            Ok(frame) => frame,
            Err(e) if e.is_recoverable() => {
                tracing::debug!("no frame this cycle: {e}");
                continue;
            }
            Err(e) => return Err(e),
        };

        if !frame.checksum_ok() {
            tracing::warn!("checksum mismatch, wrong key? {:02x?}", frame.as_bytes());
            continue;
        }

        let measurement = frame.measurement();

        let Some(reading) = Reading::from_measurement(measurement) else {
            tracing::debug!("skipping {measurement:?}");
            continue;
        };

        if sink(reading).is_break() {
            return Ok(());
        }
    }
}
