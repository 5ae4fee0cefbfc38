//! Bounds-checked endian primitives.
//!
//! TIFF files declare their byte order in the first two bytes of the header,
//! and every multi-byte value after that must be read respecting it. EXIF
//! blocks are untrusted camera output, so every reader here is total: an
//! offset that would run past the end of the buffer yields 0 rather than a
//! panic or an error. Callers that need to distinguish "absent" from "zero"
//! cannot, and that is a deliberate part of the decoder's contract.

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) of a TIFF container.
///
/// All multi-byte reads into the container go through these methods so the
/// order detected in the header is applied uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    BigEndian,
}

impl ByteOrder {
    /// Read a u16 at `offset`, or 0 if fewer than 2 bytes remain.
    #[inline]
    pub fn u16_at(self, bytes: &[u8], offset: usize) -> u16 {
        match offset.checked_add(2).and_then(|end| bytes.get(offset..end)) {
            Some(b) => match self {
                ByteOrder::LittleEndian => u16::from_le_bytes([b[0], b[1]]),
                ByteOrder::BigEndian => u16::from_be_bytes([b[0], b[1]]),
            },
            None => 0,
        }
    }

    /// Read a u32 at `offset`, or 0 if fewer than 4 bytes remain.
    #[inline]
    pub fn u32_at(self, bytes: &[u8], offset: usize) -> u32 {
        match offset.checked_add(4).and_then(|end| bytes.get(offset..end)) {
            Some(b) => match self {
                ByteOrder::LittleEndian => u32::from_le_bytes([b[0], b[1], b[2], b[3]]),
                ByteOrder::BigEndian => u32::from_be_bytes([b[0], b[1], b[2], b[3]]),
            },
            None => 0,
        }
    }

    /// Read an i32 at `offset`, or 0 if fewer than 4 bytes remain.
    ///
    /// TIFF offsets and counts are nominally unsigned but the directory
    /// entry layout stores them in 4-byte slots that rationals reuse for
    /// signed values, so the signed read is the one the decoder wants.
    #[inline]
    pub fn i32_at(self, bytes: &[u8], offset: usize) -> i32 {
        self.u32_at(bytes, offset) as i32
    }

    /// Read an i16 from a 2-byte array in this order.
    #[inline]
    pub fn i16_from(self, bytes: [u8; 2]) -> i16 {
        match self {
            ByteOrder::LittleEndian => i16::from_le_bytes(bytes),
            ByteOrder::BigEndian => i16::from_be_bytes(bytes),
        }
    }

    /// True for little-endian.
    #[inline]
    pub const fn is_little_endian(self) -> bool {
        matches!(self, ByteOrder::LittleEndian)
    }
}

// =============================================================================
// Tests
// =============================================================================
