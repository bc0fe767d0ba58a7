use protocol::{USB_PID, USB_VID};
use rusb::{Device, UsbContext};
use tracing::instrument;

use crate::error::Error;

/// Returns the first connected sensor, if any.
///
/// The device list snapshot is released before returning; the returned
/// [`Device`] keeps its own reference.
///
/// # Errors
#[instrument(level = "trace", skip_all)]
pub fn find<T>(context: &T) -> Result<Option<Device<T>>, Error>
where
    T: UsbContext,
{
    let devices = context.devices().map_err(Error::Enumeration)?;

    let device = first_match(devices.iter(), |device| {
        // Unreadable descriptors only disqualify that one device.
        let desc = device.device_descriptor().ok()?;
        Some((desc.vendor_id(), desc.product_id()))
    });

    Ok(device)
}

fn first_match<I, F>(devices: I, mut identify: F) -> Option<I::Item>
where
    I: IntoIterator,
    F: FnMut(&I::Item) -> Option<(u16, u16)>,
{
    devices
        .into_iter()
        .find(|device| identify(device) == Some((USB_VID, USB_PID)))
}
