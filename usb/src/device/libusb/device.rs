use crate::commands::{Command, ControlChannel, Transfer, REQUEST};
use crate::device::base::{UsbData, XvfDevice};
use crate::error::{CommandError, ConnectError};
use log::{debug, info, warn};
use rusb::{
    Device, DeviceDescriptor, DeviceHandle, GlobalContext, Language, Recipient, RequestType,
};
use std::time::Duration;

// Descriptor strings are only for display, so don't wait long for them.
const STRING_TIMEOUT: Duration = Duration::from_millis(100);

pub struct XvfUSB {
    handle: DeviceHandle<GlobalContext>,
    device: Device<GlobalContext>,
    descriptor: DeviceDescriptor,
    language: Option<Language>,
}

impl XvfUSB {
    fn find_device(
        device: &XvfDevice,
    ) -> Result<(Device<GlobalContext>, DeviceDescriptor), ConnectError> {
        for usb_device in rusb::devices()?.iter() {
            if usb_device.bus_number() == device.bus_number
                && usb_device.address() == device.address
            {
                let descriptor = usb_device.device_descriptor()?;
                return Ok((usb_device, descriptor));
            }
        }
        Err(ConnectError::DeviceNotFound)
    }

    pub fn from_device(device: XvfDevice) -> Result<Self, ConnectError> {
        let (device, descriptor) = XvfUSB::find_device(&device)?;
        let handle = device.open()?;

        // Not every firmware exposes string descriptors, that's not a reason to give up.
        let language = match handle.read_languages(STRING_TIMEOUT) {
            Ok(languages) => languages.first().copied(),
            Err(error) => {
                warn!("Unable to read languages from {:?}: {}", device, error);
                None
            }
        };

        info!("Connected to XVF device at {:?}", device);
        Ok(Self {
            device: handle.device(),
            handle,
            descriptor,
            language,
        })
    }

    /// Opens the first device matching the vendor and product id.
    pub fn open_first(vendor_id: u16, product_id: u16) -> Result<Self, ConnectError> {
        let device = find_devices(vendor_id, product_id)
            .into_iter()
            .next()
            .ok_or(ConnectError::DeviceNotFound)?;
        Self::from_device(device)
    }

    pub(crate) fn write_control(
        &mut self,
        value: u16,
        index: u16,
        data: &[u8],
        timeout: Duration,
    ) -> Result<usize, rusb::Error> {
        self.handle.write_control(
            rusb::request_type(rusb::Direction::Out, RequestType::Vendor, Recipient::Device),
            REQUEST,
            value,
            index,
            data,
            timeout,
        )
    }

    pub(crate) fn read_control(
        &mut self,
        value: u16,
        index: u16,
        length: usize,
        timeout: Duration,
    ) -> Result<Vec<u8>, rusb::Error> {
        let mut buf = vec![0; length];
        let response_length = self.handle.read_control(
            rusb::request_type(rusb::Direction::In, RequestType::Vendor, Recipient::Device),
            REQUEST,
            value,
            index,
            &mut buf,
            timeout,
        )?;
        buf.truncate(response_length);
        Ok(buf)
    }

    pub fn get_descriptor(&self) -> UsbData {
        let read = |index: Option<u8>| -> Option<String> {
            let language = self.language?;
            self.handle
                .read_string_descriptor(language, index?, STRING_TIMEOUT)
                .ok()
        };

        UsbData {
            vendor_id: self.descriptor.vendor_id(),
            product_id: self.descriptor.product_id(),
            manufacturer: read(self.descriptor.manufacturer_string_index()),
            product_name: read(self.descriptor.product_string_index()),
            serial_number: read(self.descriptor.serial_number_string_index()),
        }
    }
}

impl ControlChannel for XvfUSB {
    fn transfer(
        &mut self,
        command: Command,
        transfer: Transfer<'_>,
        timeout: Duration,
    ) -> Result<Vec<u8>, CommandError> {
        let value = command.value(transfer.direction());
        let index = command.index();

        match transfer {
            Transfer::Write { payload } => {
                let written = self.write_control(value, index, payload, timeout)?;
                if written != payload.len() {
                    debug!("Short write to {:?}, {} of {}", self.device, written, payload.len());
                    return Err(CommandError::ShortTransfer {
                        expected: payload.len(),
                        actual: written,
                    });
                }
                Ok(vec![])
            }
            Transfer::Read { length } => {
                let response = self.read_control(value, index, length, timeout)?;
                if response.len() != length {
                    debug!(
                        "Short read from {:?} for {:?}, {} of {}",
                        self.device,
                        command,
                        response.len(),
                        length
                    );
                    return Err(CommandError::ShortTransfer {
                        expected: length,
                        actual: response.len(),
                    });
                }
                Ok(response)
            }
        }
    }
}

pub fn find_devices(vendor_id: u16, product_id: u16) -> Vec<XvfDevice> {
    let mut found_devices: Vec<XvfDevice> = Vec::new();

    if let Ok(devices) = rusb::devices() {
        for device in devices.iter() {
            if let Ok(descriptor) = device.device_descriptor() {
                if descriptor.vendor_id() == vendor_id && descriptor.product_id() == product_id {
                    found_devices.push(XvfDevice {
                        bus_number: device.bus_number(),
                        address: device.address(),
                    });
                }
            }
        }
    }

    found_devices
}
