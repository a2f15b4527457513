pub use rusb;
pub use xvf_types::{AccessMode, ElementType, Values};

pub mod codec;
pub mod commands;
pub mod error;
pub mod parameters;
pub mod registry;
pub mod retry;
pub mod xvf;

mod device;

pub use device::base::{UsbData, XvfDevice};
pub use device::{find_devices, XvfUSB};

pub const VID_XVF: u16 = 0x2886;
pub const PID_XVF: u16 = 0x001a;
