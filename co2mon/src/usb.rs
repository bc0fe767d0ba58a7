use std::time::Duration;

use rusb::{DeviceHandle, UsbContext};

/// The subset of an open USB device handle that a
/// [`crate::DeviceSession`] needs.
///
/// Implemented for [`rusb::DeviceHandle`]; closing the handle is left
/// to its [`Drop`] implementation.
pub trait UsbHandle {
    /// # Errors
    fn detach_driver(&mut self, interface: u8) -> rusb::Result<()>;

    /// # Errors
    fn attach_driver(&mut self, interface: u8) -> rusb::Result<()>;

    /// # Errors
    fn claim(&mut self, interface: u8) -> rusb::Result<()>;

    /// # Errors
    fn release(&mut self, interface: u8) -> rusb::Result<()>;

    /// Returns the number of bytes written.
    ///
    /// # Errors
    fn control_out(
        &self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
        timeout: Duration,
    ) -> rusb::Result<usize>;

    /// Returns the number of bytes read.
    ///
    /// # Errors
    fn interrupt_in(&self, endpoint: u8, buf: &mut [u8], timeout: Duration)
    -> rusb::Result<usize>;
}

impl<T> UsbHandle for DeviceHandle<T>
where
    T: UsbContext,
{
    fn detach_driver(&mut self, interface: u8) -> rusb::Result<()> {
        DeviceHandle::detach_kernel_driver(self, interface)
    }

    fn attach_driver(&mut self, interface: u8) -> rusb::Result<()> {
        DeviceHandle::attach_kernel_driver(self, interface)
    }

    fn claim(&mut self, interface: u8) -> rusb::Result<()> {
        DeviceHandle::claim_interface(self, interface)
    }

    fn release(&mut self, interface: u8) -> rusb::Result<()> {
        DeviceHandle::release_interface(self, interface)
    }

    fn control_out(
        &self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
        timeout: Duration,
    ) -> rusb::Result<usize> {
        self.write_control(request_type, request, value, index, data, timeout)
    }

    fn interrupt_in(
        &self,
        endpoint: u8,
        buf: &mut [u8],
        timeout: Duration,
    ) -> rusb::Result<usize> {
        self.read_interrupt(endpoint, buf, timeout)
    }
}
