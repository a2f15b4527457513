mod cli;
mod display;
mod values;

use crate::cli::Cli;
use crate::display::{format_json, format_table, format_values};
use crate::values::parse_values;
use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};
use std::process::ExitCode;
use std::thread::sleep;
use std::time::Duration;
use xvf_types::Values;
use xvf_usb::error::{CommandError, ErrorKind};
use xvf_usb::registry::registry;
use xvf_usb::xvf::{ProtocolSettings, Xvf};
use xvf_usb::XvfUSB;

// Give the device a moment to act on a write before we exit.
const WRITE_SETTLE_TIME: Duration = Duration::from_millis(100);
const DOA_POLL_INTERVAL: Duration = Duration::from_secs(1);

fn main() -> ExitCode {
    let cli: Cli = Cli::parse();

    if let Err(error) = CombinedLogger::init(vec![TermLogger::new(
        cli.log_level.into(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]) {
        eprintln!("Could not configure the logger: {}", error);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {:#}", error);
            ExitCode::from(exit_code(&error))
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    debug!("Using parameter table v{}", registry().version());
    if cli.list {
        for line in format_table(registry()) {
            println!("{}", line);
        }
        return Ok(());
    }

    let settings = ProtocolSettings {
        timeout: Duration::from_millis(cli.timeout_ms),
        ..Default::default()
    };

    if cli.doa {
        let mut xvf = open(cli, settings)?;
        return monitor_doa(&mut xvf, cli.count);
    }

    let Some(name) = &cli.parameter else {
        return Ok(());
    };

    // Validate everything we can before touching the device.
    let descriptor = registry().resolve(name)?;
    let values = match &cli.values {
        Some(raw) => {
            descriptor.check_writable()?;
            Some(parse_values(descriptor, raw)?)
        }
        None => {
            descriptor.check_readable()?;
            None
        }
    };

    let mut xvf = open(cli, settings)?;
    match values {
        Some(values) => {
            println!("Writing to {} with values: {}", descriptor.name, values);
            xvf.write_parameter(descriptor, &values)
                .with_context(|| format!("Error executing command {}", descriptor.name))?;
            sleep(WRITE_SETTLE_TIME);
            println!("Write operation completed successfully");
        }
        None => {
            let values = xvf
                .read_parameter(descriptor)
                .with_context(|| format!("Error executing command {}", descriptor.name))?;
            if cli.json {
                println!("{}", format_json(descriptor, &values));
            } else {
                println!("{}: {}", descriptor.name, format_values(descriptor, &values));
            }
        }
    }
    Ok(())
}

fn open(cli: &Cli, settings: ProtocolSettings) -> Result<Xvf<XvfUSB>> {
    debug!("Looking for device {:04x}:{:04x}", cli.vid, cli.pid);
    let device = XvfUSB::open_first(cli.vid, cli.pid).context("No device found")?;
    info!("Using {}", device.get_descriptor());
    Ok(Xvf::with_settings(device, settings))
}

fn monitor_doa(xvf: &mut Xvf<XvfUSB>, count: Option<u32>) -> Result<()> {
    let version = xvf.read("VERSION")?;
    println!("VERSION: {}", version);

    let mut readings = 0;
    while count.is_none_or(|count| readings < count) {
        if readings > 0 {
            sleep(DOA_POLL_INTERVAL);
        }
        match xvf.read("DOA_VALUE")? {
            Values::Uint16(values) if values.len() == 2 => {
                println!("SPEECH_DETECTED: {}, DOA_VALUE: {}", values[1], values[0]);
            }
            other => debug!("Unexpected DOA_VALUE layout: {:?}", other),
        }
        readings += 1;
    }
    Ok(())
}

fn exit_code(error: &anyhow::Error) -> u8 {
    if let Some(error) = error.downcast_ref::<CommandError>() {
        return match error.kind() {
            ErrorKind::UnknownParameter => 2,
            ErrorKind::AccessViolation => 3,
            ErrorKind::ElementCountMismatch => 4,
            ErrorKind::ValueOutOfRange => 5,
            ErrorKind::TruncatedPayload => 6,
            ErrorKind::RetryExhausted => 7,
            ErrorKind::UnknownStatusCode => 8,
            ErrorKind::TransportError => 9,
        };
    }
    // No device, or anything else outside the protocol itself.
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use xvf_usb::error::ConnectError;

    #[test]
    fn exit_codes_follow_the_error_kind() {
        let error = anyhow::Error::from(CommandError::UnknownParameter("X".into()));
        assert_eq!(exit_code(&error), 2);

        let error = anyhow::Error::from(CommandError::RetryExhausted { attempts: 100 })
            .context("Error executing command DOA_VALUE");
        assert_eq!(exit_code(&error), 7);

        let error = anyhow::Error::from(CommandError::TransportError(
            xvf_usb::rusb::Error::NoDevice,
        ));
        assert_eq!(exit_code(&error), 9);
    }

    #[test]
    fn missing_device_and_other_failures_exit_with_one() {
        let error = anyhow::Error::from(ConnectError::DeviceNotFound).context("No device found");
        assert_eq!(exit_code(&error), 1);
        assert_eq!(exit_code(&anyhow!("something else")), 1);
    }
}
