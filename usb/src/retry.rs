use crate::commands::{
    Command, ControlChannel, Direction, Transfer, CONTROL_SUCCESS, SERVICER_COMMAND_RETRY,
};
use crate::error::CommandError;
use crate::xvf::ProtocolSettings;
use log::{debug, warn};
use std::thread::sleep;

/// Where a read is, between issuing a transfer and handing back the payload.
#[derive(Debug)]
pub enum ReadState {
    /// A transfer is about to be issued, `attempt` counts from 1.
    Pending { attempt: u32 },
    /// The servicer was busy, the read will be re-issued after a delay.
    Retry { attempt: u32 },
    /// The payload, with the status byte removed.
    Success(Vec<u8>),
    Fatal(CommandError),
}

impl ReadState {
    /// Classifies the response to the given attempt.
    pub fn observe(attempt: u32, mut response: Vec<u8>, max_attempts: u32) -> ReadState {
        let Some(&status) = response.first() else {
            return ReadState::Fatal(CommandError::TruncatedPayload {
                expected: 1,
                received: 0,
            });
        };

        match status {
            CONTROL_SUCCESS => {
                response.remove(0);
                ReadState::Success(response)
            }
            SERVICER_COMMAND_RETRY if attempt >= max_attempts => {
                ReadState::Fatal(CommandError::RetryExhausted { attempts: attempt })
            }
            SERVICER_COMMAND_RETRY => ReadState::Retry { attempt },
            status => ReadState::Fatal(CommandError::UnknownStatusCode(status)),
        }
    }
}

/// Reads from a servicer until it stops reporting busy, returning the payload without the
/// status byte.
///
/// Attempts are strictly sequential. A transport failure or a response shorter than `length`
/// ends the read straight away, only the busy status is retried.
pub fn read_with_retry<C: ControlChannel + ?Sized>(
    channel: &mut C,
    command: Command,
    length: usize,
    settings: &ProtocolSettings,
) -> Result<Vec<u8>, CommandError> {
    let mut state = ReadState::Pending { attempt: 1 };
    loop {
        state = match state {
            ReadState::Pending { attempt } => {
                let response =
                    channel.transfer(command, Transfer::Read { length }, settings.timeout)?;
                debug!(
                    "ReadCMD: cmdid: {}, resid: {}, response: {:?}",
                    command.value(Direction::Read),
                    command.index(),
                    response
                );
                // Every response is full length, busy ones included.
                if response.len() < length {
                    ReadState::Fatal(CommandError::ShortTransfer {
                        expected: length,
                        actual: response.len(),
                    })
                } else {
                    ReadState::observe(attempt, response, settings.max_read_attempts)
                }
            }
            ReadState::Retry { attempt } => {
                debug!(
                    "Servicer busy for {:?}, retrying (Attempt {} of {})",
                    command, attempt, settings.max_read_attempts
                );
                sleep(settings.retry_delay);
                ReadState::Pending {
                    attempt: attempt + 1,
                }
            }
            ReadState::Success(payload) => return Ok(payload),
            ReadState::Fatal(error) => {
                warn!("Read of {:?} failed: {}", command, error);
                return Err(error);
            }
        }
    }
}
