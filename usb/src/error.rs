use strum::Display;
use xvf_types::{AccessMode, ElementType};

#[derive(thiserror::Error, Debug)]
pub enum ConnectError {
    #[error("No XVF device was found")]
    DeviceNotFound,

    #[error("USB error: {0}")]
    UsbError(#[from] rusb::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum CommandError {
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(#[from] RegistryError),

    #[error("{name} is {}", describe_access(.access))]
    AccessViolation { name: &'static str, access: AccessMode },

    #[error("{name} value count is {expected}, but {received} values provided")]
    ElementCountMismatch {
        name: &'static str,
        expected: usize,
        received: usize,
    },

    #[error("{name} value at position {index} does not fit in {element_type}")]
    ValueOutOfRange {
        name: &'static str,
        index: usize,
        element_type: ElementType,
    },

    #[error("{name} expects {expected} values")]
    ValueTypeMismatch {
        name: &'static str,
        expected: ElementType,
    },

    #[error("Response truncated, expected {expected} bytes but received {received}")]
    TruncatedPayload { expected: usize, received: usize },

    #[error("Read attempt exceeds {attempts} times")]
    RetryExhausted { attempts: u32 },

    #[error("Unknown status code: {0}")]
    UnknownStatusCode(u8),

    #[error("USB error: {0}")]
    TransportError(#[from] rusb::Error),

    #[error("Short transfer, {actual} of {expected} bytes transferred")]
    ShortTransfer { expected: usize, actual: usize },
}

fn describe_access(access: &AccessMode) -> &'static str {
    match access {
        AccessMode::ReadOnly => "read-only and cannot be written to",
        AccessMode::WriteOnly => "write-only and cannot be read",
        AccessMode::ReadWrite => "read-write",
    }
}

/// The category of a [`CommandError`], without any of its detail.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum ErrorKind {
    UnknownParameter,
    AccessViolation,
    ElementCountMismatch,
    ValueOutOfRange,
    TruncatedPayload,
    RetryExhausted,
    UnknownStatusCode,
    TransportError,
}

impl CommandError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CommandError::UnknownParameter(_) => ErrorKind::UnknownParameter,
            CommandError::InvalidParameter(_) => ErrorKind::UnknownParameter,
            CommandError::AccessViolation { .. } => ErrorKind::AccessViolation,
            CommandError::ElementCountMismatch { .. } => ErrorKind::ElementCountMismatch,
            CommandError::ValueOutOfRange { .. } => ErrorKind::ValueOutOfRange,
            CommandError::ValueTypeMismatch { .. } => ErrorKind::ValueOutOfRange,
            CommandError::TruncatedPayload { .. } => ErrorKind::TruncatedPayload,
            CommandError::RetryExhausted { .. } => ErrorKind::RetryExhausted,
            CommandError::UnknownStatusCode(_) => ErrorKind::UnknownStatusCode,
            CommandError::TransportError(_) => ErrorKind::TransportError,
            CommandError::ShortTransfer { .. } => ErrorKind::TransportError,
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("{0} has an element count of zero")]
    EmptyParameter(&'static str),

    #[error("{0} is defined more than once")]
    DuplicateName(String),

    #[error("{0} uses command id {1}, which sets the reserved read bit")]
    ReservedCommandBit(&'static str, u8),

    #[error("{first} and {second} share resource {resource_id} command {command_id} with different layouts")]
    ConflictingAddress {
        first: &'static str,
        second: &'static str,
        resource_id: u8,
        command_id: u8,
    },
}
