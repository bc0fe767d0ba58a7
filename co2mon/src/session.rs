use std::time::Duration;

use protocol::{
    ARM_INDEX, ARM_REQUEST, ARM_REQUEST_TYPE, ARM_TIMEOUT_MS, ARM_VALUE, DecodedFrame, FRAME_LEN,
    INTERFACE_NUMBER, INTERRUPT_ENDPOINT, Key, Measurement, POLL_TIMEOUT_MS,
};
use rusb::{Device, DeviceHandle, UsbContext};
use tracing::instrument;

use crate::{
    UsbHandle,
    error::{ArmFailure, Error},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Interface claimed, key not (successfully) sent yet.
    Open,
    /// Key accepted by the device, frames can be polled.
    Armed,
}

/// An exclusive session with the sensor.
///
/// The interface is claimed for as long as the session lives and gets
/// released on [`Drop`] or through [`DeviceSession::close`].
#[derive(Debug)]
pub struct DeviceSession<H>
where
    H: UsbHandle,
{
    handle: H,
    /// Present only once the device accepted it.
    key: Option<Key>,
    driver_detached: bool,
    released: bool,
}

impl<T> DeviceSession<DeviceHandle<T>>
where
    T: UsbContext,
{
    /// Opens the device and claims its interface.
    ///
    /// # Errors
    pub fn open_device(device: &Device<T>) -> Result<Self, Error> {
        let handle = device.open().map_err(Error::Open)?;
        Self::open(handle)
    }
}

impl<H> DeviceSession<H>
where
    H: UsbHandle,
{
    /// Claims the interface of an already open handle.
    ///
    /// If claiming fails the handle is dropped along with the error.
    ///
    /// # Errors
    #[instrument(level = "trace", skip_all)]
    pub fn open(mut handle: H) -> Result<Self, Error> {
        let interface = INTERFACE_NUMBER;

        // The HID driver usually grabs the device on Linux.
        // Detaching fails when no driver is bound, which is fine.
        let driver_detached = cfg!(target_os = "linux") && handle.detach_driver(interface).is_ok();

        if let Err(source) = handle.claim(interface) {
            if driver_detached {
                handle.attach_driver(interface).ok();
            }

            return Err(Error::ClaimFailed { interface, source });
        }

        Ok(Self {
            handle,
            key: None,
            driver_detached,
            released: false,
        })
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        match self.key {
            Some(_) => SessionState::Armed,
            None => SessionState::Open,
        }
    }

    /// Sends the key to the device, enabling it to send measurements.
    ///
    /// On failure the session is left [`SessionState::Open`] and arming
    /// can be retried.
    ///
    /// # Errors
    #[instrument(level = "trace", skip_all)]
    pub fn arm(&mut self, key: Key) -> Result<(), Error> {
        self.key = None;

        let written = self
            .handle
            .control_out(
                ARM_REQUEST_TYPE,
                ARM_REQUEST,
                ARM_VALUE,
                ARM_INDEX,
                key.as_bytes(),
                Duration::from_millis(ARM_TIMEOUT_MS),
            )
            .map_err(ArmFailure::from)?;

        if written != FRAME_LEN {
            return Err(ArmFailure::ShortWrite {
                written,
                expected: FRAME_LEN,
            }
            .into());
        }

        self.key = Some(key);
        Ok(())
    }

    /// Waits for the next frame and decodes it.
    ///
    /// # Errors
    pub fn poll(&mut self) -> Result<Measurement, Error> {
        self.poll_frame().map(|frame| frame.measurement())
    }

    /// Like [`DeviceSession::poll`], but hands out the whole decoded frame
    /// so that its checksum can be inspected.
    ///
    /// # Errors
    #[instrument(level = "trace", skip_all)]
    pub fn poll_frame(&mut self) -> Result<DecodedFrame, Error> {
        let key = self.key.ok_or(Error::NotArmed)?;
        let mut raw = [0; FRAME_LEN];

        let read = self
            .handle
            .interrupt_in(
                INTERRUPT_ENDPOINT,
                &mut raw,
                Duration::from_millis(POLL_TIMEOUT_MS),
            )
            .map_err(Error::Transfer)?;

        if read != FRAME_LEN {
            return Err(Error::ShortRead {
                read,
                expected: FRAME_LEN,
            });
        }

        tracing::trace!("raw frame: {raw:02x?}");
        Ok(DecodedFrame::decode(raw, &key))
    }

    /// Releases the interface, reporting the outcome. Dropping the
    /// session does the same but ignores errors.
    ///
    /// # Errors
    pub fn close(mut self) -> rusb::Result<()> {
        self.release()
    }

    fn release(&mut self) -> rusb::Result<()> {
        if self.released {
            return Ok(());
        }

        self.released = true;
        let res = self.handle.release(INTERFACE_NUMBER);

        if self.driver_detached {
            self.handle.attach_driver(INTERFACE_NUMBER).ok();
        }

        res
    }
}

impl<H> Drop for DeviceSession<H>
where
    H: UsbHandle,
{
    fn drop(&mut self) {
        self.release().ok();
    }
}
