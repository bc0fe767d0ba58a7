#![no_std]

pub mod cipher;
mod frame;
mod key;
mod measurement;

pub use frame::DecodedFrame;
pub use key::{Key, KeyParseError};
pub use measurement::{Channel, Measurement, interpret};

pub const USB_VID: u16 = 0x04D9;
pub const USB_PID: u16 = 0xA052;

/// Every transfer to and from the device is exactly this long.
pub const FRAME_LEN: usize = 8;

pub const INTERFACE_NUMBER: u8 = 0;
/// IN | standard | interface recipient.
pub const INTERRUPT_ENDPOINT: u8 = 0x81;

/// OUT | class | interface recipient.
pub const ARM_REQUEST_TYPE: u8 = 0x21;
/// `SET_CONFIGURATION`, reused by the device for receiving the key.
pub const ARM_REQUEST: u8 = 0x09;
pub const ARM_VALUE: u16 = 0x0300;
pub const ARM_INDEX: u16 = 0;

pub const ARM_TIMEOUT_MS: u64 = 2000;
pub const POLL_TIMEOUT_MS: u64 = 5000;
