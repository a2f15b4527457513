use crate::codec::{decode, encode};
use crate::commands::{ControlChannel, Direction, Transfer};
use crate::error::CommandError;
use crate::parameters::ParameterDescriptor;
use crate::registry::{registry, ParameterRegistry};
use crate::retry::read_with_retry;
use log::debug;
use std::time::Duration;
use xvf_types::Values;

/// Timing and retry limits for talking to a device.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ProtocolSettings {
    /// Applied to every individual control transfer.
    pub timeout: Duration,
    /// How long to wait before re-issuing a read the servicer reported as busy.
    pub retry_delay: Duration,
    /// Total read attempts, the first one included.
    pub max_read_attempts: u32,
}

impl Default for ProtocolSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(100_000),
            retry_delay: Duration::from_millis(10),
            max_read_attempts: 100,
        }
    }
}

/// Reads and writes named parameters over a control channel.
///
/// Every call goes straight to the device, nothing is cached. The channel is owned
/// exclusively, so calls against one device are naturally serialised.
pub struct Xvf<C: ControlChannel> {
    channel: C,
    settings: ProtocolSettings,
    registry: &'static ParameterRegistry,
}

impl<C: ControlChannel> Xvf<C> {
    pub fn new(channel: C) -> Self {
        Self::with_settings(channel, ProtocolSettings::default())
    }

    pub fn with_settings(channel: C, settings: ProtocolSettings) -> Self {
        Self {
            channel,
            settings,
            registry: registry(),
        }
    }

    pub fn settings(&self) -> &ProtocolSettings {
        &self.settings
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn resolve(&self, name: &str) -> Result<&'static ParameterDescriptor, CommandError> {
        self.registry.resolve(name)
    }

    pub fn read(&mut self, name: &str) -> Result<Values, CommandError> {
        let descriptor = self.resolve(name)?;
        self.read_parameter(descriptor)
    }

    pub fn write(&mut self, name: &str, values: &Values) -> Result<(), CommandError> {
        let descriptor = self.resolve(name)?;
        self.write_parameter(descriptor, values)
    }

    pub fn read_parameter(
        &mut self,
        descriptor: &ParameterDescriptor,
    ) -> Result<Values, CommandError> {
        descriptor.validate()?;
        descriptor.check_readable()?;
        let payload = read_with_retry(
            &mut self.channel,
            descriptor.command(),
            descriptor.response_length(),
            &self.settings,
        )?;

        let expected = descriptor.payload_length();
        if payload.len() > expected {
            debug!(
                "Ignoring {} trailing bytes in {} response",
                payload.len() - expected,
                descriptor.name
            );
        }
        decode(descriptor, &payload)
    }

    /// Writes the values and returns once the transfer has been acknowledged.
    ///
    /// There is no status byte on a write, so this cannot tell whether the servicer accepted
    /// the values, only that the transfer completed.
    pub fn write_parameter(
        &mut self,
        descriptor: &ParameterDescriptor,
        values: &Values,
    ) -> Result<(), CommandError> {
        descriptor.validate()?;
        descriptor.check_writable()?;
        let payload = encode(descriptor, values)?;

        let command = descriptor.command();
        debug!(
            "WriteCMD: cmdid: {}, resid: {}, payload: {:?}",
            command.value(Direction::Write),
            command.index(),
            payload
        );
        self.channel.transfer(
            command,
            Transfer::Write { payload: &payload },
            self.settings.timeout,
        )?;
        Ok(())
    }
}
