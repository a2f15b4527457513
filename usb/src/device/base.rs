use std::fmt::Formatter;

// Bus number and address are enough to find a device again after enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XvfDevice {
    pub(crate) bus_number: u8,
    pub(crate) address: u8,
}

impl XvfDevice {
    pub fn bus_number(&self) -> u8 {
        self.bus_number
    }
    pub fn address(&self) -> u8 {
        self.address
    }
}

/// Descriptor strings read from an opened device, for display only.
pub struct UsbData {
    pub(crate) vendor_id: u16,
    pub(crate) product_id: u16,
    pub(crate) manufacturer: Option<String>,
    pub(crate) product_name: Option<String>,
    pub(crate) serial_number: Option<String>,
}

impl UsbData {
    pub fn vendor_id(&self) -> u16 {
        self.vendor_id
    }
    pub fn product_id(&self) -> u16 {
        self.product_id
    }
    pub fn manufacturer(&self) -> Option<&str> {
        self.manufacturer.as_deref()
    }
    pub fn product_name(&self) -> Option<&str> {
        self.product_name.as_deref()
    }
    pub fn serial_number(&self) -> Option<&str> {
        self.serial_number.as_deref()
    }
}

impl std::fmt::Display for UsbData {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} ({:04x}:{:04x})",
            self.manufacturer().unwrap_or("Unknown"),
            self.product_name().unwrap_or("Device"),
            self.vendor_id,
            self.product_id
        )?;
        if let Some(serial) = self.serial_number() {
            write!(f, ", serial {}", serial)?;
        }
        Ok(())
    }
}
