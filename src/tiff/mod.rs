//! TIFF container parsing.
//!
//! EXIF metadata is encoded in a TIFF container: an 8-byte header fixing
//! byte order and pointing at the first Image File Directory, followed by
//! directories of 12-byte tagged entries.
//!
//! # Key concepts
//!
//! - **Byte order**: declared by the header's "II"/"MM" marker; every
//!   multi-byte value afterwards is read respecting it.
//!
//! - **Inline vs offset values**: an entry value whose encoded size fits in
//!   4 bytes is stored inside the entry itself; anything larger is stored at
//!   an offset elsewhere in the buffer, which must be bounds-validated
//!   before every read.
//!
//! - **Defensive decoding**: the input is untrusted camera output. Structural
//!   failures (bad header, hostile entry counts) are `Err`s; everything else
//!   degrades to zero or empty values.

mod field;
mod header;
mod ifd;
mod locate;
mod tags;

pub use field::{rational, Field, FIELD_SIZE};
pub use header::{TiffHeader, TIFF_HEADER_SIZE};
pub use ifd::{Ifd, MAX_IFD_ENTRIES};
pub use locate::find_tiff_start;
pub use tags::{tag, FieldType, TagNamespace};
