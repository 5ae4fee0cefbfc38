//! # photometa
//!
//! A defensive EXIF/TIFF metadata decoder for photo buffers.
//!
//! This library locates the TIFF container embedded in an image buffer
//! (typically the leading bytes of a JPEG), decodes its image file
//! directories, and resolves the values photo tooling actually needs:
//! timestamps, camera identity, GPS position and time, focal length,
//! pixel dimensions, and keyword tags.
//!
//! ## Features
//!
//! - **Total decoding**: malformed entries degrade to sentinel values
//!   instead of panicking; only container-level failures are errors
//! - **Bounded memory**: at most 1 MiB of the input is copied, and
//!   directory entry counts are capped before allocation
//! - **Vendor maker notes**: Nikon and Sony maker-note payloads are
//!   decoded as nested TIFF containers for serial and sequence numbers
//! - **Byte-order aware**: both little-endian ("II") and big-endian
//!   ("MM") containers are handled throughout, including maker notes
//!   whose byte order differs from the outer file
//!
//! ## Architecture
//!
//! - [`raw`] - byte-order-aware primitive readers over raw slices
//! - [`tiff`] - header, signature locator, field and directory decoders
//! - [`exif`] - the aggregate decode and value-resolution API
//! - [`error`] - structural error types
//!
//! ## Example
//!
//! ```rust,no_run
//! use photometa::Exif;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let exif = Exif::from_bytes(&bytes).unwrap();
//!
//! println!("{} {}", exif.make(), exif.model());
//! if let Some(taken) = exif.taken() {
//!     println!("taken {taken}");
//! }
//! ```

pub mod error;
pub mod exif;
pub mod raw;
pub mod tiff;

// Re-export commonly used types
pub use error::{ExifError, HeaderError, IfdError};
pub use exif::{dms_to_decimal_degrees, parse_date_time, Exif};
pub use raw::ByteOrder;
pub use tiff::{
    find_tiff_start, rational, tag, Field, FieldType, Ifd, TagNamespace, TiffHeader, FIELD_SIZE,
    MAX_IFD_ENTRIES, TIFF_HEADER_SIZE,
};
