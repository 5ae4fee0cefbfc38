use thiserror::Error;

/// Errors that can occur when parsing a TIFF header.
///
/// These are structural failures: the bytes at the candidate offset do not
/// form a TIFF header at all. They abort the whole decode, unlike missing
/// tags or out-of-range values, which resolve to sentinel values instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// Not enough bytes remain at the offset to hold an 8-byte header
    #[error("truncated TIFF header: need 8 bytes at offset {offset}, buffer is {len} bytes")]
    Truncated { offset: usize, len: usize },

    /// Byte-order marker is neither "II" nor "MM"
    #[error("invalid byte-order marker: expected \"II\" or \"MM\", got {0:02X?}")]
    InvalidByteOrder([u8; 2]),

    /// The 16-bit value after the byte-order marker is not 42
    #[error("invalid TIFF magic: expected 42, got {0}")]
    InvalidMagic(u16),
}

/// Errors that can occur when decoding an Image File Directory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IfdError {
    /// Buffer is too small to hold even an empty directory
    #[error("buffer too small for an IFD: need at least 6 bytes, got {0}")]
    BufferTooSmall(usize),

    /// Directory offset points outside the buffer
    #[error("IFD offset out of range: {0}")]
    OffsetOutOfRange(i32),

    /// Entry count exceeds the hard cap (5460 entries, the most that fit a
    /// 64 KB window). Corrupt or hostile counts are rejected before any
    /// allocation happens.
    #[error("IFD claims {0} entries, cap is 5460")]
    TooManyEntries(u16),
}

/// Errors returned by [`Exif::from_bytes`](crate::Exif::from_bytes).
///
/// Only container-level failures surface here. Once a valid TIFF header is
/// found, missing sub-IFDs and malformed tag values degrade to empty or zero
/// results rather than errors. Partial success is the normal case for
/// camera-generated EXIF.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExifError {
    /// Input buffer is too short to contain any EXIF block
    #[error("buffer too small: need at least 16 bytes, got {0}")]
    BufferTooSmall(usize),

    /// Neither an "Exif\0\0" marker nor a bare TIFF signature was found
    #[error("no Exif or TIFF signature found in buffer")]
    SignatureNotFound,

    /// A signature was found but the TIFF header at it is invalid
    #[error("invalid TIFF header: {0}")]
    Header(#[from] HeaderError),
}
