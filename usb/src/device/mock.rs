//! Scripted control channel for tests.

use crate::commands::{Command, ControlChannel, Transfer, SERVICER_COMMAND_RETRY};
use crate::error::CommandError;
use std::collections::VecDeque;
use std::time::Duration;

/// A transfer as it would have appeared on the bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedTransfer {
    Write {
        value: u16,
        index: u16,
        payload: Vec<u8>,
    },
    Read {
        value: u16,
        index: u16,
        length: usize,
    },
}

#[derive(Debug)]
enum Scripted {
    Respond(Vec<u8>),
    // Sized to whatever the read asks for, like the servicer does.
    Busy,
    Fail(rusb::Error),
}

/// Answers reads from a queue of canned responses, and records every transfer.
///
/// Writes always succeed. A read with nothing left in the queue fails with a timeout.
#[derive(Debug, Default)]
pub struct ScriptedChannel {
    responses: VecDeque<Scripted>,
    transfers: Vec<RecordedTransfer>,
}

impl ScriptedChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, response: &[u8]) -> Self {
        self.responses.push_back(Scripted::Respond(response.to_vec()));
        self
    }

    /// Queues `count` busy responses.
    pub fn busy(mut self, count: usize) -> Self {
        for _ in 0..count {
            self.responses.push_back(Scripted::Busy);
        }
        self
    }

    pub fn fail(mut self, error: rusb::Error) -> Self {
        self.responses.push_back(Scripted::Fail(error));
        self
    }

    pub fn transfers(&self) -> &[RecordedTransfer] {
        &self.transfers
    }
}

impl ControlChannel for ScriptedChannel {
    fn transfer(
        &mut self,
        command: Command,
        transfer: Transfer<'_>,
        _timeout: Duration,
    ) -> Result<Vec<u8>, CommandError> {
        let value = command.value(transfer.direction());
        let index = command.index();
        match transfer {
            Transfer::Write { payload } => {
                self.transfers.push(RecordedTransfer::Write {
                    value,
                    index,
                    payload: payload.to_vec(),
                });
                Ok(vec![])
            }
            Transfer::Read { length } => {
                self.transfers.push(RecordedTransfer::Read {
                    value,
                    index,
                    length,
                });
                match self.responses.pop_front() {
                    Some(Scripted::Respond(response)) => Ok(response),
                    Some(Scripted::Busy) => {
                        let mut response = vec![0; length.max(1)];
                        response[0] = SERVICER_COMMAND_RETRY;
                        Ok(response)
                    }
                    Some(Scripted::Fail(error)) => Err(error.into()),
                    None => Err(rusb::Error::Timeout.into()),
                }
            }
        }
    }
}
