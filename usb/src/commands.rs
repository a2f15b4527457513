use crate::error::CommandError;
use std::time::Duration;

/// Set on the wire command id to ask the servicer for a read.
pub const READ_FLAG: u8 = 0x80;

// bRequest is not used by the servicers, but must be zero.
pub const REQUEST: u8 = 0;

pub const CONTROL_SUCCESS: u8 = 0;
pub const SERVICER_COMMAND_RETRY: u8 = 64;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Write,
    Read,
}

/// Addresses a single command on a single servicer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Command {
    pub resource_id: u8,
    pub command_id: u8,
}

impl Command {
    pub fn new(resource_id: u8, command_id: u8) -> Self {
        Self {
            resource_id,
            command_id,
        }
    }

    /// The wValue field for a transfer in the given direction.
    pub fn value(&self, direction: Direction) -> u16 {
        match direction {
            Direction::Write => self.command_id as u16,
            Direction::Read => (self.command_id | READ_FLAG) as u16,
        }
    }

    /// The wIndex field, which is the same for both directions.
    pub fn index(&self) -> u16 {
        self.resource_id as u16
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transfer<'a> {
    Write { payload: &'a [u8] },
    Read { length: usize },
}

impl Transfer<'_> {
    pub fn direction(&self) -> Direction {
        match self {
            Transfer::Write { .. } => Direction::Write,
            Transfer::Read { .. } => Direction::Read,
        }
    }
}

/// A single blocking vendor control transfer against one device.
///
/// Implementations must not buffer or cache responses, and must not retry on their own, every
/// call is a fresh transfer on the bus. Transfers to one device are not synchronised here, so a
/// channel must not be shared between threads without the caller serialising access.
pub trait ControlChannel {
    /// Performs the transfer, returning the response bytes for a read, or an empty vec for a
    /// write.
    fn transfer(
        &mut self,
        command: Command,
        transfer: Transfer<'_>,
        timeout: Duration,
    ) -> Result<Vec<u8>, CommandError>;
}

impl<C: ControlChannel + ?Sized> ControlChannel for Box<C> {
    fn transfer(
        &mut self,
        command: Command,
        transfer: Transfer<'_>,
        timeout: Duration,
    ) -> Result<Vec<u8>, CommandError> {
        (**self).transfer(command, transfer, timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_sets_high_bit() {
        let command = Command::new(20, 18);
        assert_eq!(command.value(Direction::Write), 18);
        assert_eq!(command.value(Direction::Read), 0x92);
        assert_eq!(command.index(), 20);
    }

    #[test]
    fn transfer_direction() {
        assert_eq!(Transfer::Write { payload: &[1] }.direction(), Direction::Write);
        assert_eq!(Transfer::Read { length: 5 }.direction(), Direction::Read);
    }
}
