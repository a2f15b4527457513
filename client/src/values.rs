use anyhow::{anyhow, Result};
use xvf_types::{ElementType, Values};
use xvf_usb::codec::from_numbers;
use xvf_usb::parameters::ParameterDescriptor;

/// Parses a number that can be decimal, hex with a `0x` prefix, or hex with a `$` prefix.
pub fn parse_number(value: &str) -> Result<f64> {
    let hex = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .or_else(|| value.strip_prefix('$'));

    let parsed = match hex {
        Some(digits) => u64::from_str_radix(digits, 16).ok().map(|v| v as f64),
        None => value.parse::<f64>().ok(),
    };
    parsed.ok_or_else(|| {
        anyhow!(
            "Cannot parse '{}' as a number (supports decimal and hex formats like 0xFF or $FF)",
            value
        )
    })
}

/// Turns command line arguments into values for the parameter.
///
/// Text parameters take the arguments joined by spaces, everything else parses each argument
/// as a number and checks it fits the parameter's element type.
pub fn parse_values(descriptor: &ParameterDescriptor, raw: &[String]) -> Result<Values> {
    if descriptor.element_type == ElementType::Char {
        return Ok(Values::Char(raw.join(" ")));
    }

    let numbers = raw
        .iter()
        .map(|value| parse_number(value))
        .collect::<Result<Vec<_>>>()?;
    Ok(from_numbers(descriptor, &numbers)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use xvf_usb::error::CommandError;
    use xvf_usb::registry::registry;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn numbers() {
        assert_eq!(parse_number("123").unwrap(), 123.0);
        assert_eq!(parse_number("-2").unwrap(), -2.0);
        assert_eq!(parse_number("1.5").unwrap(), 1.5);
        assert_eq!(parse_number("0x7B").unwrap(), 123.0);
        assert_eq!(parse_number("0XFF").unwrap(), 255.0);
        assert_eq!(parse_number("$7b").unwrap(), 123.0);
        assert_eq!(parse_number("0xFFFFFFFF").unwrap(), 4294967295.0);
        assert!(parse_number("abc").is_err());
        assert!(parse_number("0x").is_err());
        assert!(parse_number("$G").is_err());
    }

    #[test]
    fn colours_parse_as_uint32() {
        let descriptor = registry().resolve("LED_COLOR").unwrap();
        let values = parse_values(descriptor, &args(&["0xff8800"])).unwrap();
        assert_eq!(values, Values::Uint32(vec![0xff8800]));
    }

    #[test]
    fn gains_parse_as_float() {
        let descriptor = registry().resolve("AEC_AECSILENCELEVEL").unwrap();
        let values = parse_values(descriptor, &args(&["0.05", "1e-9"])).unwrap();
        assert_eq!(values, Values::Float(vec![0.05, 1e-9]));
    }

    #[test]
    fn out_of_range_is_reported() {
        let descriptor = registry().resolve("LED_BRIGHTNESS").unwrap();
        let error = parse_values(descriptor, &args(&["256"])).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<CommandError>(),
            Some(CommandError::ValueOutOfRange { .. })
        ));
    }

    #[test]
    fn wrong_count_is_reported() {
        let descriptor = registry().resolve("LED_DOA_COLOR").unwrap();
        let error = parse_values(descriptor, &args(&["1"])).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<CommandError>(),
            Some(CommandError::ElementCountMismatch {
                expected: 2,
                received: 1,
                ..
            })
        ));
    }
}
