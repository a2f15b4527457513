#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt::Formatter;
use strum::{Display, EnumIter, EnumString};

/// The on-wire type of every element of a parameter.
#[derive(Copy, Clone, Debug, Display, EnumIter, EnumString, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ElementType {
    Uint8,
    Uint16,
    Int32,
    Uint32,
    Float,
    // Laid out exactly like Float, but the value is an angle.
    Radians,
    Char,
}

impl ElementType {
    /// Width of a single element on the wire, in bytes.
    pub fn size(&self) -> usize {
        match self {
            ElementType::Uint8 | ElementType::Char => 1,
            ElementType::Uint16 => 2,
            ElementType::Int32 | ElementType::Uint32 => 4,
            ElementType::Float | ElementType::Radians => 4,
        }
    }

    pub fn is_numeric(&self) -> bool {
        *self != ElementType::Char
    }
}

#[derive(Copy, Clone, Debug, Display, EnumIter, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AccessMode {
    #[strum(to_string = "ro")]
    ReadOnly,
    #[strum(to_string = "wo")]
    WriteOnly,
    #[strum(to_string = "rw")]
    ReadWrite,
}

impl AccessMode {
    pub fn is_readable(&self) -> bool {
        *self != AccessMode::WriteOnly
    }

    pub fn is_writable(&self) -> bool {
        *self != AccessMode::ReadOnly
    }
}

/// A sequence of parameter values, tagged with the container type it is stored in.
///
/// `Radians` parameters are carried as `Float`, the unit only matters for display.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Values {
    Uint8(Vec<u8>),
    Uint16(Vec<u16>),
    Int32(Vec<i32>),
    Uint32(Vec<u32>),
    Float(Vec<f32>),
    Char(String),
}

impl Values {
    /// Number of elements, or the byte length of the text for `Char`.
    pub fn len(&self) -> usize {
        match self {
            Values::Uint8(values) => values.len(),
            Values::Uint16(values) => values.len(),
            Values::Int32(values) => values.len(),
            Values::Uint32(values) => values.len(),
            Values::Float(values) => values.len(),
            Values::Char(text) => text.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Widens every numeric element to an f64, which holds all of them exactly.
    /// Returns None for text.
    pub fn numbers(&self) -> Option<Vec<f64>> {
        match self {
            Values::Uint8(values) => Some(values.iter().map(|&v| f64::from(v)).collect()),
            Values::Uint16(values) => Some(values.iter().map(|&v| f64::from(v)).collect()),
            Values::Int32(values) => Some(values.iter().map(|&v| f64::from(v)).collect()),
            Values::Uint32(values) => Some(values.iter().map(|&v| f64::from(v)).collect()),
            Values::Float(values) => Some(values.iter().map(|&v| f64::from(v)).collect()),
            Values::Char(_) => None,
        }
    }
}

fn write_list<T: std::fmt::Display>(f: &mut Formatter<'_>, values: &[T]) -> std::fmt::Result {
    write!(f, "[")?;
    for (index, value) in values.iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", value)?;
    }
    write!(f, "]")
}

impl std::fmt::Display for Values {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Values::Uint8(values) => write_list(f, values),
            Values::Uint16(values) => write_list(f, values),
            Values::Int32(values) => write_list(f, values),
            Values::Uint32(values) => write_list(f, values),
            Values::Float(values) => write_list(f, values),
            Values::Char(text) => write!(f, "{}", text),
        }
    }
}
