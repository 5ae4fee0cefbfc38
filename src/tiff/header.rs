//! TIFF header parsing.
//!
//! The 8-byte header at the start of the TIFF container is the foundation
//! for everything else: it fixes the byte order for all subsequent reads and
//! points at the first Image File Directory.
//!
//! # Header structure
//!
//! ```text
//! Bytes 0-1: Byte order ("II" = little-endian, "MM" = big-endian)
//! Bytes 2-3: Magic (must be 42)
//! Bytes 4-7: Offset to the first IFD, relative to the header start
//! ```
//!
//! EXIF embeds only classic TIFF; BigTIFF (magic 43) does not occur in
//! camera metadata and is rejected like any other bad magic.

use crate::error::HeaderError;
use crate::raw::ByteOrder;

/// Size of a classic TIFF header in bytes.
pub const TIFF_HEADER_SIZE: usize = 8;

/// The TIFF magic value following the byte-order marker.
const TIFF_MAGIC: u16 = 42;

/// Parsed TIFF header.
///
/// Immutable once parsed. A value of this type always represents a valid
/// header; invalid bytes never produce one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    /// Byte order for all multi-byte values in the container
    pub byte_order: ByteOrder,

    /// Offset to the first IFD, relative to the start of the header.
    ///
    /// Stored as written on disk. A negative or out-of-range value here is
    /// tolerated; the IFD decoder fails closed when it tries to follow it.
    pub first_ifd_offset: i32,
}

impl TiffHeader {
    /// Parse a TIFF header at `offset` into `bytes`.
    ///
    /// Pure function of its inputs: no side effects, no reads past the
    /// 8 header bytes.
    ///
    /// # Errors
    /// - [`HeaderError::Truncated`] if fewer than 8 bytes remain at `offset`
    /// - [`HeaderError::InvalidByteOrder`] if the marker is not "II" or "MM"
    /// - [`HeaderError::InvalidMagic`] if the following u16 is not 42
    pub fn parse(bytes: &[u8], offset: usize) -> Result<Self, HeaderError> {
        let header = match offset
            .checked_add(TIFF_HEADER_SIZE)
            .and_then(|end| bytes.get(offset..end))
        {
            Some(h) => h,
            None => {
                return Err(HeaderError::Truncated {
                    offset,
                    len: bytes.len(),
                })
            }
        };

        let byte_order = match [header[0], header[1]] {
            [b'I', b'I'] => ByteOrder::LittleEndian,
            [b'M', b'M'] => ByteOrder::BigEndian,
            other => return Err(HeaderError::InvalidByteOrder(other)),
        };

        // Magic is read in the order the marker just declared
        let magic = byte_order.u16_at(header, 2);
        if magic != TIFF_MAGIC {
            return Err(HeaderError::InvalidMagic(magic));
        }

        let first_ifd_offset = byte_order.i32_at(header, 4);

        Ok(TiffHeader {
            byte_order,
            first_ifd_offset,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
