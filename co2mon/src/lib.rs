mod error;
pub mod locator;
pub mod poller;
mod reading;
mod session;
mod usb;

pub use anyhow::Result as AnyResult;
pub use error::{ArmFailure, Error};
pub use protocol::{Channel, DecodedFrame, Key, Measurement};
pub use reading::{Reading, Snapshot};
pub use session::{DeviceSession, SessionState};
pub use usb::UsbHandle;
