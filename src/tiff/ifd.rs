//! Image File Directory decoding.
//!
//! An IFD is a 16-bit entry count, that many 12-byte entries, then a 32-bit
//! offset to the next directory in the chain. This decoder never follows the
//! chain itself; the aggregate only ever follows pointer tags (Exif sub-IFD,
//! GPS sub-IFD), so the trailing offset is decoded and kept but goes unused.

use tracing::{debug, warn};

use crate::error::IfdError;
use crate::raw::ByteOrder;
use crate::tiff::field::{Field, FIELD_SIZE};
use crate::tiff::tags::TagNamespace;

/// Hard cap on the directory entry count: the most 12-byte entries that fit
/// in a 64 KB window. Counts above this are treated as corrupt or hostile
/// and rejected before any allocation.
pub const MAX_IFD_ENTRIES: u16 = 5460;

/// One decoded directory.
///
/// Fields keep their on-disk order; lookup is by tag id, first match wins.
/// A directory with zero fields is valid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ifd {
    /// Entries in on-disk order
    pub fields: Vec<Field>,

    /// Offset of the next IFD in the chain (decoded, never followed)
    pub next_ifd_offset: i32,
}

impl Ifd {
    /// Decode the directory at `offset`.
    ///
    /// `namespace` selects which fixed tag-name table to attach display
    /// names from; maker-note directories pass `None`. Names never affect
    /// decode behavior.
    ///
    /// Individual entries that run past the end of the buffer decode with
    /// zero-filled values rather than failing the directory; only the
    /// structural preconditions below are errors.
    ///
    /// # Errors
    /// - [`IfdError::BufferTooSmall`] if the buffer cannot hold an empty IFD
    /// - [`IfdError::OffsetOutOfRange`] if `offset` is negative
    /// - [`IfdError::TooManyEntries`] if the count exceeds [`MAX_IFD_ENTRIES`]
    pub fn decode(
        buffer: &[u8],
        offset: i32,
        byte_order: ByteOrder,
        namespace: Option<TagNamespace>,
    ) -> Result<Ifd, IfdError> {
        if buffer.len() < 6 {
            return Err(IfdError::BufferTooSmall(buffer.len()));
        }

        let offset = usize::try_from(offset).map_err(|_| IfdError::OffsetOutOfRange(offset))?;

        let entry_count = byte_order.u16_at(buffer, offset);

        if entry_count > MAX_IFD_ENTRIES {
            warn!(entry_count, "rejecting IFD with hostile entry count");
            return Err(IfdError::TooManyEntries(entry_count));
        }

        debug!(offset, entry_count, "decoding IFD");

        let mut fields = Vec::with_capacity(entry_count as usize);

        for index in 0..entry_count as usize {
            let entry_offset = offset + 2 + index * FIELD_SIZE;
            let mut field = Field::decode(buffer, entry_offset, byte_order);

            if let Some(namespace) = namespace {
                field.tag_name = namespace.name_of(field.tag);
            }

            fields.push(field);
        }

        let next_ifd_offset =
            byte_order.i32_at(buffer, offset + 2 + entry_count as usize * FIELD_SIZE);

        Ok(Ifd {
            fields,
            next_ifd_offset,
        })
    }

    /// Find the first field with the given tag id, in on-disk order.
    pub fn get(&self, tag: u16) -> Option<&Field> {
        self.fields.iter().find(|field| field.tag == tag)
    }

    /// Number of fields in the directory.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the directory has no fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
