use clap::{Parser, ValueEnum};
use std::num::ParseIntError;
use xvf_usb::{PID_XVF, VID_XVF};

#[derive(Parser, Debug)]
#[clap(about, version, author)]
pub struct Cli {
    /// The parameter to read or write (e.g. VERSION, DOA_VALUE), case-insensitive
    #[clap(required_unless_present_any = ["list", "doa"])]
    pub parameter: Option<String>,

    /// Values to write to the parameter, the parameter is read if none are given.
    /// Supports decimal (123, 1.5) and hex (0x7B, $7B) formats
    #[clap(long, num_args = 1.., allow_negative_numbers = true)]
    pub values: Option<Vec<String>>,

    /// List every known parameter and exit
    #[clap(long, conflicts_with_all = ["parameter", "doa"])]
    pub list: bool,

    /// Continuously print the direction of arrival and speech detection state
    #[clap(long, conflicts_with = "parameter")]
    pub doa: bool,

    /// Stop the direction of arrival monitor after this many readings
    #[clap(long, conflicts_with_all = ["parameter", "list"])]
    pub count: Option<u32>,

    /// Print read values as JSON
    #[clap(long)]
    pub json: bool,

    /// Vendor ID of the device
    #[clap(long, value_parser = parse_id, default_value_t = VID_XVF)]
    pub vid: u16,

    /// Product ID of the device
    #[clap(long, value_parser = parse_id, default_value_t = PID_XVF)]
    pub pid: u16,

    /// Timeout for each individual USB transfer, in milliseconds
    #[clap(long, default_value = "100000")]
    pub timeout_ms: u64,

    /// Minimum log level to print out
    #[clap(long, value_enum, default_value = "warn")]
    pub log_level: LevelFilter,
}

// USB ids are conventionally written in hex.
fn parse_id(value: &str) -> Result<u16, ParseIntError> {
    match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => value.parse(),
    }
}

#[derive(ValueEnum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum LevelFilter {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LevelFilter> for log::LevelFilter {
    fn from(level: LevelFilter) -> Self {
        match level {
            LevelFilter::Off => log::LevelFilter::Off,
            LevelFilter::Error => log::LevelFilter::Error,
            LevelFilter::Warn => log::LevelFilter::Warn,
            LevelFilter::Info => log::LevelFilter::Info,
            LevelFilter::Debug => log::LevelFilter::Debug,
            LevelFilter::Trace => log::LevelFilter::Trace,
        }
    }
}
