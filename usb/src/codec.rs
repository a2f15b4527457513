use crate::error::CommandError;
use crate::parameters::ParameterDescriptor;
use byteorder::{ByteOrder, LittleEndian};
use xvf_types::{ElementType, Values};

/// Serialises values for a write to the given parameter.
///
/// Numeric values are converted to the parameter's element type first (see [`coerce`]), so
/// a `Values::Uint32` can be written to a `uint8` parameter as long as every value fits.
/// `Char` parameters take text, which is sent as its UTF-8 bytes without any padding.
pub fn encode(descriptor: &ParameterDescriptor, values: &Values) -> Result<Vec<u8>, CommandError> {
    if descriptor.element_type == ElementType::Char {
        let Values::Char(text) = values else {
            return Err(type_mismatch(descriptor));
        };
        if text.len() > descriptor.count {
            return Err(CommandError::ElementCountMismatch {
                name: descriptor.name,
                expected: descriptor.count,
                received: text.len(),
            });
        }
        return Ok(text.as_bytes().to_vec());
    }

    let mut payload = vec![0; descriptor.payload_length()];
    match coerce(descriptor, values)? {
        Values::Uint8(values) => payload.copy_from_slice(&values),
        Values::Uint16(values) => LittleEndian::write_u16_into(&values, &mut payload),
        Values::Int32(values) => LittleEndian::write_i32_into(&values, &mut payload),
        Values::Uint32(values) => LittleEndian::write_u32_into(&values, &mut payload),
        Values::Float(values) => LittleEndian::write_f32_into(&values, &mut payload),
        Values::Char(_) => return Err(type_mismatch(descriptor)),
    }
    Ok(payload)
}

/// Deserialises a read payload, with the status byte already removed.
///
/// Trailing bytes beyond the parameter's size are ignored. `Char` payloads are decoded on a
/// best-effort basis: trailing NULs are dropped, and so is anything that isn't valid UTF-8.
pub fn decode(descriptor: &ParameterDescriptor, bytes: &[u8]) -> Result<Values, CommandError> {
    let count = descriptor.count;
    Ok(match descriptor.element_type {
        ElementType::Char => Values::Char(decode_text(&bytes[..bytes.len().min(count)])),
        ElementType::Uint8 => Values::Uint8(exact(descriptor, bytes)?.to_vec()),
        ElementType::Uint16 => {
            let mut values = vec![0; count];
            LittleEndian::read_u16_into(exact(descriptor, bytes)?, &mut values);
            Values::Uint16(values)
        }
        ElementType::Int32 => {
            let mut values = vec![0; count];
            LittleEndian::read_i32_into(exact(descriptor, bytes)?, &mut values);
            Values::Int32(values)
        }
        ElementType::Uint32 => {
            let mut values = vec![0; count];
            LittleEndian::read_u32_into(exact(descriptor, bytes)?, &mut values);
            Values::Uint32(values)
        }
        ElementType::Float | ElementType::Radians => {
            let mut values = vec![0.0; count];
            LittleEndian::read_f32_into(exact(descriptor, bytes)?, &mut values);
            Values::Float(values)
        }
    })
}

fn exact<'a>(descriptor: &ParameterDescriptor, bytes: &'a [u8]) -> Result<&'a [u8], CommandError> {
    let expected = descriptor.payload_length();
    if bytes.len() < expected {
        return Err(CommandError::TruncatedPayload {
            expected,
            received: bytes.len(),
        });
    }
    Ok(&bytes[..expected])
}

fn decode_text(bytes: &[u8]) -> String {
    let end = bytes.iter().rposition(|&c| c != 0).map_or(0, |last| last + 1);
    bytes[..end]
        .utf8_chunks()
        .map(|chunk| chunk.valid())
        .collect()
}

/// Converts numeric values into the container matching the parameter's element type.
///
/// The number of values must match the parameter exactly. Integer targets reject anything
/// fractional, non-finite or outside the type's range, nothing is truncated or wrapped. Float
/// targets reject finite values beyond the range of an `f32`.
pub fn coerce(descriptor: &ParameterDescriptor, values: &Values) -> Result<Values, CommandError> {
    let numbers = values.numbers().ok_or_else(|| type_mismatch(descriptor))?;
    from_numbers(descriptor, &numbers)
}

/// Builds values for the parameter from plain numbers, as parsed from user input.
pub fn from_numbers(
    descriptor: &ParameterDescriptor,
    numbers: &[f64],
) -> Result<Values, CommandError> {
    if !descriptor.element_type.is_numeric() {
        return Err(type_mismatch(descriptor));
    }
    if numbers.len() != descriptor.count {
        return Err(CommandError::ElementCountMismatch {
            name: descriptor.name,
            expected: descriptor.count,
            received: numbers.len(),
        });
    }

    let integers = |min: f64, max: f64| -> Result<Vec<f64>, CommandError> {
        numbers
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                if value.is_finite() && value.fract() == 0.0 && value >= min && value <= max {
                    Ok(value)
                } else {
                    Err(out_of_range(descriptor, index))
                }
            })
            .collect()
    };

    Ok(match descriptor.element_type {
        ElementType::Uint8 => Values::Uint8(
            integers(0.0, u8::MAX as f64)?
                .into_iter()
                .map(|v| v as u8)
                .collect(),
        ),
        ElementType::Uint16 => Values::Uint16(
            integers(0.0, u16::MAX as f64)?
                .into_iter()
                .map(|v| v as u16)
                .collect(),
        ),
        ElementType::Int32 => Values::Int32(
            integers(i32::MIN as f64, i32::MAX as f64)?
                .into_iter()
                .map(|v| v as i32)
                .collect(),
        ),
        ElementType::Uint32 => Values::Uint32(
            integers(0.0, u32::MAX as f64)?
                .into_iter()
                .map(|v| v as u32)
                .collect(),
        ),
        ElementType::Float | ElementType::Radians => {
            let mut floats = Vec::with_capacity(numbers.len());
            for (index, &value) in numbers.iter().enumerate() {
                if value.is_finite() && value.abs() > f32::MAX as f64 {
                    return Err(out_of_range(descriptor, index));
                }
                floats.push(value as f32);
            }
            Values::Float(floats)
        }
        ElementType::Char => return Err(type_mismatch(descriptor)),
    })
}

fn type_mismatch(descriptor: &ParameterDescriptor) -> CommandError {
    CommandError::ValueTypeMismatch {
        name: descriptor.name,
        expected: descriptor.element_type,
    }
}

fn out_of_range(descriptor: &ParameterDescriptor, index: usize) -> CommandError {
    CommandError::ValueOutOfRange {
        name: descriptor.name,
        index,
        element_type: descriptor.element_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xvf_types::AccessMode::ReadWrite;
    use xvf_types::ElementType::*;

    fn descriptor(count: usize, element_type: ElementType) -> ParameterDescriptor {
        ParameterDescriptor::new("TEST", 1, 2, count, ReadWrite, element_type)
    }

    #[test]
    fn float_layout() {
        let gain = descriptor(1, Float);
        let bytes = encode(&gain, &Values::Float(vec![1.5])).unwrap();
        assert_eq!(bytes, [0x00, 0x00, 0xc0, 0x3f]);
        assert_eq!(decode(&gain, &bytes).unwrap(), Values::Float(vec![1.5]));
    }

    #[test]
    fn radians_share_the_float_layout() {
        let angles = descriptor(2, Radians);
        let values = Values::Float(vec![1.5, -0.25]);
        let bytes = encode(&angles, &values).unwrap();
        assert_eq!(bytes, encode(&descriptor(2, Float), &values).unwrap());
        assert_eq!(decode(&angles, &bytes).unwrap(), values);
    }

    #[test]
    fn integers_are_little_endian() {
        let bytes = encode(&descriptor(2, Uint16), &Values::Uint16(vec![45, 0x0102])).unwrap();
        assert_eq!(bytes, [45, 0, 0x02, 0x01]);

        let bytes = encode(&descriptor(1, Int32), &Values::Int32(vec![-2])).unwrap();
        assert_eq!(bytes, [0xfe, 0xff, 0xff, 0xff]);

        let bytes = encode(&descriptor(1, Uint32), &Values::Uint32(vec![0xff0000])).unwrap();
        assert_eq!(bytes, [0x00, 0x00, 0xff, 0x00]);
    }

    #[test]
    fn round_trips() {
        let cases = [
            (descriptor(3, Uint8), Values::Uint8(vec![0, 128, 255])),
            (descriptor(2, Uint16), Values::Uint16(vec![u16::MAX, 1])),
            (descriptor(2, Int32), Values::Int32(vec![i32::MIN, i32::MAX])),
            (descriptor(1, Uint32), Values::Uint32(vec![u32::MAX])),
            (descriptor(3, Float), Values::Float(vec![0.0, -1.0e-3, 3.25e7])),
            (descriptor(8, Char), Values::Char("v2.0.5".into())),
        ];
        for (descriptor, values) in cases {
            let bytes = encode(&descriptor, &values).unwrap();
            assert_eq!(decode(&descriptor, &bytes).unwrap(), values);
        }
    }

    #[test]
    fn count_must_match() {
        let result = encode(&descriptor(2, Uint16), &Values::Uint16(vec![1]));
        assert!(matches!(
            result,
            Err(CommandError::ElementCountMismatch {
                expected: 2,
                received: 1,
                ..
            })
        ));

        let result = encode(&descriptor(1, Float), &Values::Float(vec![1.0, 2.0]));
        assert!(matches!(result, Err(CommandError::ElementCountMismatch { .. })));
    }

    #[test]
    fn values_are_range_checked_not_truncated() {
        let result = encode(&descriptor(2, Uint8), &Values::Uint32(vec![1, 256]));
        assert!(matches!(
            result,
            Err(CommandError::ValueOutOfRange {
                index: 1,
                element_type: Uint8,
                ..
            })
        ));

        let result = encode(&descriptor(1, Uint32), &Values::Int32(vec![-1]));
        assert!(matches!(result, Err(CommandError::ValueOutOfRange { .. })));

        let result = from_numbers(&descriptor(1, Int32), &[1.5]);
        assert!(matches!(result, Err(CommandError::ValueOutOfRange { .. })));

        let result = from_numbers(&descriptor(1, Float), &[1.0e39]);
        assert!(matches!(result, Err(CommandError::ValueOutOfRange { .. })));
    }

    #[test]
    fn values_are_converted_when_they_fit() {
        let bytes = encode(&descriptor(1, Uint8), &Values::Uint32(vec![255])).unwrap();
        assert_eq!(bytes, [0xff]);

        let values = from_numbers(&descriptor(2, Float), &[1.0, 0.5]).unwrap();
        assert_eq!(values, Values::Float(vec![1.0, 0.5]));

        let values = from_numbers(&descriptor(1, Uint32), &[4294967295.0]).unwrap();
        assert_eq!(values, Values::Uint32(vec![u32::MAX]));
    }

    #[test]
    fn text_and_numbers_do_not_mix() {
        let result = encode(&descriptor(4, Uint8), &Values::Char("abc".into()));
        assert!(matches!(
            result,
            Err(CommandError::ValueTypeMismatch {
                expected: Uint8,
                ..
            })
        ));

        let result = encode(&descriptor(4, Char), &Values::Uint8(vec![1, 2, 3, 4]));
        assert!(matches!(result, Err(CommandError::ValueTypeMismatch { .. })));
    }

    #[test]
    fn text_is_not_padded() {
        let bytes = encode(&descriptor(50, Char), &Values::Char("abc".into())).unwrap();
        assert_eq!(bytes, b"abc");

        let result = encode(&descriptor(2, Char), &Values::Char("abc".into()));
        assert!(matches!(result, Err(CommandError::ElementCountMismatch { .. })));
    }

    #[test]
    fn text_strips_trailing_nuls() {
        let decoded = decode(&descriptor(8, Char), b"1.0.2\0\0\0").unwrap();
        assert_eq!(decoded, Values::Char("1.0.2".into()));

        let decoded = decode(&descriptor(4, Char), &[0, 0, 0, 0]).unwrap();
        assert_eq!(decoded, Values::Char(String::new()));
    }

    #[test]
    fn text_drops_invalid_utf8() {
        let decoded = decode(&descriptor(6, Char), &[b'o', b'k', 0xff, 0xfe, b'!', 0]).unwrap();
        assert_eq!(decoded, Values::Char("ok!".into()));
    }

    #[test]
    fn short_payloads_are_rejected() {
        let result = decode(&descriptor(2, Uint16), &[0x2d, 0x00, 0x01]);
        assert!(matches!(
            result,
            Err(CommandError::TruncatedPayload {
                expected: 4,
                received: 3
            })
        ));

        let result = decode(&descriptor(1, Float), &[]);
        assert!(matches!(result, Err(CommandError::TruncatedPayload { .. })));
    }

    #[test]
    fn extra_bytes_are_ignored() {
        let decoded = decode(&descriptor(1, Uint16), &[0x2d, 0x00, 0xaa]).unwrap();
        assert_eq!(decoded, Values::Uint16(vec![45]));
    }
}
