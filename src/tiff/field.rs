//! Directory entry (interoperability field) decoding.
//!
//! Each IFD entry is a fixed 12-byte record:
//!
//! ```text
//! Bytes 0-1:  tag id (u16)
//! Bytes 2-3:  type code (u16)
//! Bytes 4-7:  value count (i32)
//! Bytes 8-11: the value itself, when its encoded size fits in 4 bytes,
//!             OR a byte offset to the value elsewhere in the buffer
//! ```
//!
//! The last 4 bytes are captured both ways: as individual raw bytes and as
//! an i32 offset. Which interpretation applies depends on the type and count,
//! and the typed accessors choose per call. Every accessor is total: a bounds
//! violation or type mismatch yields an empty string or zero, never a panic.
//! Zero is therefore indistinguishable from "absent", which is part of the
//! decoder's contract rather than an accident.

use std::fmt;

use crate::raw::ByteOrder;
use crate::tiff::tags::FieldType;

/// Size of one 12-byte directory entry.
pub const FIELD_SIZE: usize = 12;

/// One decoded directory entry.
///
/// A field never owns buffer bytes; accessors that need the value area take
/// the owning buffer as a parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Numeric tag id
    pub tag: u16,

    /// Raw type code. Unrecognized codes are preserved but not decoded.
    pub type_code: u16,

    /// Number of values, as written on disk (may be hostile)
    pub count: i32,

    /// The entry's 4-byte value slot interpreted as an i32 offset
    pub value_or_offset: i32,

    /// The same 4 bytes, raw, for inline values
    pub raw_value: [u8; 4],

    /// Byte order of the owning container
    pub byte_order: ByteOrder,

    /// Display name from the owning directory's namespace, if any
    pub tag_name: Option<&'static str>,
}

impl Field {
    /// Decode the 12-byte entry at `offset`.
    ///
    /// Reads past the end of the buffer materialize as zero bytes, matching
    /// the rest of the decoder's tolerance for truncated input. Validation
    /// against garbage happens in the typed accessors, not here.
    pub fn decode(buffer: &[u8], offset: usize, byte_order: ByteOrder) -> Field {
        let byte_at = |i: usize| offset.checked_add(i).and_then(|o| buffer.get(o)).copied();

        Field {
            tag: byte_order.u16_at(buffer, offset),
            type_code: byte_order.u16_at(buffer, offset.wrapping_add(2)),
            count: byte_order.i32_at(buffer, offset.wrapping_add(4)),
            value_or_offset: byte_order.i32_at(buffer, offset.wrapping_add(8)),
            raw_value: [
                byte_at(8).unwrap_or(0),
                byte_at(9).unwrap_or(0),
                byte_at(10).unwrap_or(0),
                byte_at(11).unwrap_or(0),
            ],
            byte_order,
            tag_name: None,
        }
    }

    /// Recognized field type, if the type code is known.
    #[inline]
    pub fn field_type(&self) -> Option<FieldType> {
        FieldType::from_u16(self.type_code)
    }

    /// The value as a single byte (first inline byte).
    #[inline]
    pub fn as_byte(&self) -> u8 {
        self.raw_value[0]
    }

    /// The value as a 16-bit integer from the first two inline bytes,
    /// read in the field's recorded byte order.
    #[inline]
    pub fn as_short(&self) -> i16 {
        self.byte_order
            .i16_from([self.raw_value[0], self.raw_value[1]])
    }

    /// The value as a rational converted to f64.
    ///
    /// Reads numerator and denominator i32s at the field's offset into
    /// `buffer`. Returns 0.0 when either is zero or when the offset is
    /// out of range; a zero numerator and a missing value are the same
    /// observable result.
    pub fn as_decimal(&self, buffer: &[u8]) -> f64 {
        let offset = match usize::try_from(self.value_or_offset) {
            Ok(o) => o,
            Err(_) => return 0.0,
        };

        let numerator = self.byte_order.i32_at(buffer, offset);
        let denominator = self.byte_order.i32_at(buffer, offset.wrapping_add(4));

        rational(numerator, denominator)
    }

    /// The value as text.
    ///
    /// Values of up to 4 bytes are decoded from the inline bytes as ASCII
    /// with NUL padding trimmed. Longer values must have a positive offset
    /// and fit strictly inside `buffer`; type 2 decodes as ASCII, and type 1
    /// applies an encoding guess based on the first two bytes at the offset:
    /// (non-zero, zero) reads as UTF-16 LE, (zero, non-zero) as UTF-16 BE,
    /// (non-zero, non-zero) as UTF-8. The guess is best-effort and can
    /// misclassify short or unusual sequences; a wrong guess yields wrong
    /// text, not an error.
    ///
    /// Anything else, including any bounds violation, yields an empty string.
    pub fn as_string(&self, buffer: &[u8]) -> String {
        if self.count <= 4 {
            if self.count < 1 {
                return String::new();
            }

            let len = self.count as usize;
            return ascii_string(&self.raw_value[..len]);
        }

        // count > 4: the value lives at the offset
        let count = self.count as usize;
        let offset = match usize::try_from(self.value_or_offset) {
            Ok(o) if o > 0 => o,
            _ => return String::new(),
        };

        // Strictly inside the buffer, matching the shipped bounds check
        let in_range = offset
            .checked_add(count)
            .map(|end| buffer.len() > end)
            .unwrap_or(false);
        if !in_range {
            return String::new();
        }

        let value = &buffer[offset..offset + count];

        match self.type_code {
            2 => ascii_string(value),
            1 => match (value[0] != 0, value[1] != 0) {
                (true, false) => utf16_string(value, ByteOrder::LittleEndian),
                (false, true) => utf16_string(value, ByteOrder::BigEndian),
                (true, true) => String::from_utf8_lossy(value).trim_matches('\0').to_string(),
                (false, false) => String::new(),
            },
            _ => String::new(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag: {:04X}", self.tag)?;
        if let Some(name) = self.tag_name {
            write!(f, " ({name})")?;
        }

        let type_name = match self.field_type() {
            Some(FieldType::Byte) => "Byte",
            Some(FieldType::Ascii) => "ASCII",
            Some(FieldType::Short) => "Short",
            Some(FieldType::Long) => "Long",
            Some(FieldType::Rational) => "Rational",
            Some(FieldType::Undefined) => "Undefined Byte",
            Some(FieldType::SignedLong) => "Signed Long",
            Some(FieldType::SignedRational) => "Signed Rational",
            None => "Unknown",
        };

        write!(
            f,
            ", {} ({}), Count: {}, Offset: {}",
            type_name, self.type_code, self.count, self.value_or_offset
        )
    }
}

/// Convert a rational to f64: numerator over denominator.
///
/// Returns 0.0 when numerator or denominator is 0. Zero and absent are the
/// same observable value throughout the decoder, so the zero-numerator case
/// short-circuits too.
pub fn rational(numerator: i32, denominator: i32) -> f64 {
    if numerator == 0 || denominator == 0 {
        return 0.0;
    }

    f64::from(numerator) / f64::from(denominator)
}

/// Decode bytes as ASCII, replacing non-ASCII bytes and trimming NUL padding.
fn ascii_string(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if b.is_ascii() { b as char } else { '?' })
        .collect::<String>()
        .trim_matches('\0')
        .to_string()
}

/// Decode bytes as UTF-16 in the given order, trimming NUL padding.
fn utf16_string(bytes: &[u8], order: ByteOrder) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| match order {
            ByteOrder::LittleEndian => u16::from_le_bytes([pair[0], pair[1]]),
            ByteOrder::BigEndian => u16::from_be_bytes([pair[0], pair[1]]),
        })
        .collect();

    String::from_utf16_lossy(&units).trim_matches('\0').to_string()
}

// =============================================================================
// Tests
// =============================================================================
