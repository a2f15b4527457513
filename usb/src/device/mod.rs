pub mod base;
mod libusb;
#[cfg(test)]
pub(crate) mod mock;

pub use libusb::device::{find_devices, XvfUSB};
