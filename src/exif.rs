//! EXIF aggregate: one-shot decode and value resolution.
//!
//! [`Exif::from_bytes`] locates the TIFF container inside an arbitrary byte
//! buffer, copies at most one megabyte of it, and decodes the root directory
//! plus the Exif and GPS sub-directories when their pointer tags are present.
//! Everything after that is a pure read: accessors resolve tag values on
//! demand, falling back across directories and recursing into vendor maker
//! notes where needed.
//!
//! # Sentinel semantics
//!
//! Numeric and string accessors return 0 / 0.0 / "" both when a tag is
//! absent and when its value is genuinely zero or empty. This ambiguity is
//! deliberate and matches the contract cameras are decoded against; callers
//! that need tri-state presence information can inspect the directories
//! directly via [`Ifd::get`]. Date and time accessors use `Option` instead,
//! with `None` playing the minimum-timestamp sentinel role.

use bytes::Bytes;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use tracing::debug;

use crate::error::ExifError;
use crate::tiff::{find_tiff_start, rational, tag, Field, Ifd, TagNamespace, TiffHeader};

/// Cap on the private TIFF copy: one megabyte, a hard limit against
/// pathological container sizes.
const ONE_MEGABYTE: usize = 1_048_576;

/// Minimum buffer size worth scanning at all.
const MIN_BUFFER_LEN: usize = 16;

/// Vendor header bytes to skip before the embedded TIFF in a Nikon maker note.
const NIKON_MAKER_NOTE_SKIP: usize = 10;

/// Vendor header bytes to skip before the embedded TIFF in a Sony maker note.
const SONY_MAKER_NOTE_SKIP: usize = 12;

// =============================================================================
// Exif
// =============================================================================

/// Decoded EXIF metadata for one image buffer.
///
/// Constructed once via [`Exif::from_bytes`] and immutable afterwards. The
/// struct owns a size-capped copy of the TIFF window, so concurrent decodes
/// of different files never share state.
#[derive(Debug, Clone)]
pub struct Exif {
    /// The validated TIFF header
    pub header: TiffHeader,

    /// The root directory. Empty when its decode failed; the overall decode
    /// still succeeds in that case.
    pub ifd0: Ifd,

    /// Exif sub-directory, present when IFD0 carries pointer tag 0x8769
    /// and it resolves
    pub exif_ifd: Option<Ifd>,

    /// GPS sub-directory, present when IFD0 carries pointer tag 0x8825
    /// and it resolves
    pub gps_ifd: Option<Ifd>,

    /// Owned copy of the buffer starting at the TIFF header, at most 1 MiB
    pub tiff_data: Bytes,
}

impl Exif {
    /// Decode EXIF metadata from a raw image buffer.
    ///
    /// The buffer is typically the leading bytes of a JPEG file. The decode
    /// aborts only on container-level failures; a missing sub-IFD or any
    /// malformed tag value leaves the corresponding accessor returning its
    /// sentinel. Partial success is the normal case.
    ///
    /// # Errors
    /// - [`ExifError::BufferTooSmall`] for buffers under 16 bytes
    /// - [`ExifError::SignatureNotFound`] when no Exif marker or TIFF
    ///   signature exists in the buffer
    /// - [`ExifError::Header`] when the signature is found but the TIFF
    ///   header at it is invalid
    pub fn from_bytes(bytes: &[u8]) -> Result<Exif, ExifError> {
        if bytes.len() < MIN_BUFFER_LEN {
            return Err(ExifError::BufferTooSmall(bytes.len()));
        }

        let tiff_offset = find_tiff_start(bytes).ok_or(ExifError::SignatureNotFound)?;

        let header = TiffHeader::parse(bytes, tiff_offset)?;

        let copy_len = (bytes.len() - tiff_offset).min(ONE_MEGABYTE);
        let tiff_data = Bytes::copy_from_slice(&bytes[tiff_offset..tiff_offset + copy_len]);

        debug!(
            tiff_offset,
            copy_len,
            little_endian = header.byte_order.is_little_endian(),
            "decoding TIFF container"
        );

        // A failed root directory leaves IFD0 empty without failing the
        // whole decode, same as a root directory with no useful tags.
        let ifd0 = Ifd::decode(
            &tiff_data,
            header.first_ifd_offset,
            header.byte_order,
            Some(TagNamespace::Ifd0),
        )
        .unwrap_or_default();

        let exif_ifd = ifd0.get(tag::EXIF_IFD_POINTER).and_then(|field| {
            Ifd::decode(
                &tiff_data,
                field.value_or_offset,
                header.byte_order,
                Some(TagNamespace::Exif),
            )
            .ok()
        });

        let gps_ifd = ifd0.get(tag::GPS_IFD_POINTER).and_then(|field| {
            Ifd::decode(
                &tiff_data,
                field.value_or_offset,
                header.byte_order,
                Some(TagNamespace::Gps),
            )
            .ok()
        });

        debug!(
            ifd0_fields = ifd0.len(),
            has_exif_ifd = exif_ifd.is_some(),
            has_gps_ifd = gps_ifd.is_some(),
            "EXIF decode complete"
        );

        Ok(Exif {
            header,
            ifd0,
            exif_ifd,
            gps_ifd,
            tiff_data,
        })
    }

    // -------------------------------------------------------------------------
    // Namespace-fallback lookup
    // -------------------------------------------------------------------------

    /// Resolve a string tag, searching IFD0, then the Exif sub-IFD, then the
    /// GPS sub-IFD. The first non-empty result wins.
    pub fn string_value(&self, tag: u16) -> String {
        let mut value = self.string_value_in(Some(&self.ifd0), tag);

        if value.is_empty() {
            value = self.string_value_in(self.exif_ifd.as_ref(), tag);
        }

        if value.is_empty() {
            value = self.string_value_in(self.gps_ifd.as_ref(), tag);
        }

        value
    }

    /// Resolve a rational tag to f64 with the same directory fallback.
    /// The first non-zero result wins; zero and absent are identical.
    pub fn decimal_value(&self, tag: u16) -> f64 {
        let mut value = self.decimal_value_in(Some(&self.ifd0), tag);

        if value == 0.0 {
            value = self.decimal_value_in(self.exif_ifd.as_ref(), tag);
        }

        if value == 0.0 {
            value = self.decimal_value_in(self.gps_ifd.as_ref(), tag);
        }

        value
    }

    /// Resolve a byte tag with the same directory fallback.
    pub fn byte_value(&self, tag: u16) -> i32 {
        let mut value = self.byte_value_in(Some(&self.ifd0), tag);

        if value == 0 {
            value = self.byte_value_in(self.exif_ifd.as_ref(), tag);
        }

        if value == 0 {
            value = self.byte_value_in(self.gps_ifd.as_ref(), tag);
        }

        value
    }

    // -------------------------------------------------------------------------
    // Per-directory typed lookup
    // -------------------------------------------------------------------------

    /// String value of `tag` in one directory, decoded from the owned
    /// TIFF copy. ASCII (type 2) and byte (type 1) fields with at least
    /// 2 characters qualify; anything else is empty.
    pub fn string_value_in(&self, ifd: Option<&Ifd>, tag: u16) -> String {
        string_from(ifd, tag, &self.tiff_data)
    }

    /// Rational (type 5) value of `tag` in one directory, or 0.0.
    pub fn decimal_value_in(&self, ifd: Option<&Ifd>, tag: u16) -> f64 {
        let Some(field) = lookup(ifd, tag) else {
            return 0.0;
        };

        if field.type_code != 5 {
            return 0.0;
        }

        field.as_decimal(&self.tiff_data)
    }

    /// Byte (type 1) value of `tag` in one directory, or 0. Only inline
    /// values (count 1 to 4) qualify; the first byte is returned.
    pub fn byte_value_in(&self, ifd: Option<&Ifd>, tag: u16) -> i32 {
        let Some(field) = lookup(ifd, tag) else {
            return 0;
        };

        if field.type_code != 1 || field.count < 1 || field.count > 4 {
            return 0;
        }

        i32::from(field.as_byte())
    }

    /// Short (type 3, single value) of `tag` in one directory, or 0.
    pub fn short_value_in(&self, ifd: Option<&Ifd>, tag: u16) -> i32 {
        let Some(field) = lookup(ifd, tag) else {
            return 0;
        };

        if field.type_code != 3 || field.count != 1 {
            return 0;
        }

        i32::from(field.as_short())
    }

    /// Long (type 4, single value) of `tag` in one directory, or 0.
    /// A single long lives inline in the value slot.
    pub fn long_value_in(&self, ifd: Option<&Ifd>, tag: u16) -> i32 {
        let Some(field) = lookup(ifd, tag) else {
            return 0;
        };

        if field.type_code != 4 || field.count != 1 {
            return 0;
        }

        field.value_or_offset
    }

    /// Integer value of `tag`: shorts and longs both qualify, widened to
    /// i32. Anything else is 0.
    pub fn integer_value_in(&self, ifd: Option<&Ifd>, tag: u16) -> i32 {
        let Some(field) = lookup(ifd, tag) else {
            return 0;
        };

        if field.count < 1 {
            return 0;
        }

        match field.type_code {
            3 => i32::from(field.as_short()),
            4 => self.long_value_in(ifd, tag),
            _ => 0,
        }
    }

    // -------------------------------------------------------------------------
    // Angular and time composition
    // -------------------------------------------------------------------------

    /// Decode a degrees/minutes/seconds tag (three rationals, type 5 or 10)
    /// into decimal degrees. Returns 0.0 for anything that is not a
    /// 3-rational angular value.
    pub fn degrees_value(&self, ifd: &Ifd, tag: u16) -> f64 {
        let Some((degrees, minutes, seconds)) = self.three_rationals(ifd, tag, &[5, 10]) else {
            return 0.0;
        };

        dms_to_decimal_degrees(degrees, minutes, seconds)
    }

    /// Read a 3-rational GPS time tag as (hours, minutes, seconds).
    fn gps_time_parts(&self, ifd: &Ifd, tag: u16) -> Option<(f64, f64, f64)> {
        self.three_rationals(ifd, tag, &[5])
    }

    /// Read three consecutive rationals at a field's offset.
    fn three_rationals(&self, ifd: &Ifd, tag: u16, types: &[u16]) -> Option<(f64, f64, f64)> {
        let field = ifd.get(tag)?;

        if !types.contains(&field.type_code) || field.count < 3 {
            return None;
        }

        let offset = usize::try_from(field.value_or_offset).ok()?;
        let order = self.header.byte_order;

        let mut parts = [0.0f64; 3];
        for (index, part) in parts.iter_mut().enumerate() {
            let numerator = order.i32_at(&self.tiff_data, offset + index * 8);
            let denominator = order.i32_at(&self.tiff_data, offset + index * 8 + 4);
            *part = rational(numerator, denominator);
        }

        Some((parts[0], parts[1], parts[2]))
    }

    // -------------------------------------------------------------------------
    // Camera identity
    // -------------------------------------------------------------------------

    /// Camera manufacturer (tag 0x010F), or empty.
    pub fn make(&self) -> String {
        self.string_value(tag::MAKE)
    }

    /// Camera model (tag 0x0110), or empty.
    pub fn model(&self) -> String {
        self.string_value(tag::MODEL)
    }

    /// Camera body serial number.
    ///
    /// Prefers the standard BodySerialNumber tag (0xA431). For Nikon bodies
    /// that omit it, falls back to the maker note: tag 0x1D, then tag 0xA0
    /// with its literal "NO=" prefix stripped. Empty when nothing resolves.
    pub fn serial_number(&self) -> String {
        let value = self.string_value(tag::BODY_SERIAL_NUMBER);
        if !value.is_empty() {
            return value;
        }

        if !self.make().to_lowercase().contains("nikon") {
            return String::new();
        }

        let Some((maker_note, buffer)) = self.maker_note_ifd(NIKON_MAKER_NOTE_SKIP) else {
            return String::new();
        };

        let value = string_from(Some(&maker_note), tag::NIKON_SERIAL_NUMBER, &buffer);
        if !value.is_empty() {
            return value;
        }

        let value = string_from(Some(&maker_note), tag::NIKON_SERIAL_NO, &buffer);
        if let Some(stripped) = value.strip_prefix("NO=") {
            return stripped.trim().to_string();
        }

        value
    }

    /// Number of times the camera's shutter has opened, from the Nikon
    /// maker note (tag 0xA7). 0 for other vendors or on any decode failure.
    pub fn shutter_count(&self) -> i32 {
        if !self.make().to_lowercase().contains("nikon") {
            return 0;
        }

        let Some((maker_note, _)) = self.maker_note_ifd(NIKON_MAKER_NOTE_SKIP) else {
            return 0;
        };

        self.integer_value_in(Some(&maker_note), tag::NIKON_SHUTTER_COUNT)
    }

    /// Shot sequence number: Sony maker-note tag 0xB04A, or the Nikon image
    /// count (tag 0xA5). 0 for other vendors or on any decode failure.
    pub fn sequence_number(&self) -> i32 {
        let make = self.make().to_lowercase();

        if make.contains("sony") {
            let Some((maker_note, _)) = self.maker_note_ifd(SONY_MAKER_NOTE_SKIP) else {
                return 0;
            };
            return self.integer_value_in(Some(&maker_note), tag::SONY_SEQUENCE_NUMBER);
        }

        if make.contains("nikon") {
            let Some((maker_note, _)) = self.maker_note_ifd(NIKON_MAKER_NOTE_SKIP) else {
                return 0;
            };
            return self.integer_value_in(Some(&maker_note), tag::NIKON_IMAGE_COUNT);
        }

        0
    }

    /// Decode the maker note's payload as a nested TIFF and return its
    /// directory along with the sliced payload buffer.
    ///
    /// The payload starts `skip` bytes into the tag's value (the vendor
    /// header before the embedded TIFF signature). Recursion stops here: a
    /// maker note never contains another maker note. Every failure in the
    /// chain yields `None`.
    fn maker_note_ifd(&self, skip: usize) -> Option<(Ifd, Bytes)> {
        let exif_ifd = self.exif_ifd.as_ref()?;
        let field = exif_ifd.get(tag::MAKER_NOTE)?;

        let count = usize::try_from(field.count).ok()?;
        let offset = usize::try_from(field.value_or_offset).ok()?;
        if count <= skip {
            return None;
        }

        let start = offset.checked_add(skip)?;
        let end = offset.checked_add(count)?;
        if end > self.tiff_data.len() {
            return None;
        }

        let buffer = self.tiff_data.slice(start..end);

        let header = TiffHeader::parse(&buffer, 0).ok()?;
        let ifd = Ifd::decode(&buffer, header.first_ifd_offset, header.byte_order, None).ok()?;

        debug!(skip, payload_len = buffer.len(), "decoded maker note");

        Some((ifd, buffer))
    }

    // -------------------------------------------------------------------------
    // Timestamps
    // -------------------------------------------------------------------------

    /// Raw DateTimeOriginal string, unparsed.
    pub fn date(&self) -> String {
        self.string_value(tag::DATE_TIME_ORIGINAL)
    }

    /// The moment the photograph was taken.
    ///
    /// Reads DateTimeOriginal (0x9003), falling back to DateTimeDigitized
    /// (0x9004), from the Exif sub-IFD. The matching sub-second tag
    /// (0x9291 / 0x9292) is interpreted as decimal digits after "0." and
    /// added when positive. `None` when neither tag parses.
    pub fn taken(&self) -> Option<NaiveDateTime> {
        let mut tag_id = tag::DATE_TIME_ORIGINAL;
        let mut value = self.string_value_in(self.exif_ifd.as_ref(), tag_id);

        if value.is_empty() {
            tag_id = tag::DATE_TIME_DIGITIZED;
            value = self.string_value_in(self.exif_ifd.as_ref(), tag_id);
        }

        if value.is_empty() {
            return None;
        }

        let mut taken = parse_date_time(&value)?;

        let sub_seconds = match tag_id {
            tag::DATE_TIME_ORIGINAL => {
                self.string_value_in(self.exif_ifd.as_ref(), tag::SUB_SEC_TIME_ORIGINAL)
            }
            _ => self.string_value_in(self.exif_ifd.as_ref(), tag::SUB_SEC_TIME_DIGITIZED),
        };

        if !sub_seconds.is_empty() {
            if let Ok(partial) = format!("0.{sub_seconds}").parse::<f64>() {
                if partial > 0.0 {
                    let shift = Duration::milliseconds((partial * 1000.0) as i64);
                    taken = taken.checked_add_signed(shift)?;
                }
            }
        }

        Some(taken)
    }

    /// The GPS date stamp.
    ///
    /// When the GPS date tag is absent or unparseable, substitutes the
    /// date from [`taken`](Exif::taken). Some phones record GPS time
    /// without GPS date, and this fixup recovers those.
    pub fn gps_date(&self) -> Option<NaiveDate> {
        self.gps_stamp_date()
            .or_else(|| self.taken().map(|taken| taken.date()))
    }

    /// The GPS date tag parsed strictly as "YYYY:MM:DD".
    fn gps_stamp_date(&self) -> Option<NaiveDate> {
        let value = self.string_value_in(self.gps_ifd.as_ref(), tag::GPS_DATE_STAMP);
        let bytes = value.as_bytes();

        if bytes.len() != 10 || bytes[4] != b':' || bytes[7] != b':' {
            return None;
        }

        let year = value[0..4].parse().ok()?;
        let month = value[5..7].parse().ok()?;
        let day = value[8..10].parse().ok()?;

        NaiveDate::from_ymd_opt(year, month, day)
    }

    /// The GPS time of day as a duration since midnight UTC, including
    /// fractional seconds. Zero when the tag is absent or malformed.
    pub fn gps_time(&self) -> Duration {
        let Some(gps_ifd) = self.gps_ifd.as_ref() else {
            return Duration::zero();
        };

        let Some((hours, minutes, seconds)) = self.gps_time_parts(gps_ifd, tag::GPS_TIME_STAMP)
        else {
            return Duration::zero();
        };

        // One f64 millisecond total keeps hostile rationals from
        // overflowing the per-unit Duration constructors
        let total_ms = hours * 3_600_000.0 + minutes * 60_000.0 + seconds * 1_000.0;
        if !total_ms.is_finite() || total_ms.abs() >= i64::MAX as f64 {
            return Duration::zero();
        }

        Duration::milliseconds(total_ms as i64)
    }

    /// GPS date and time combined into a UTC timestamp.
    pub fn gps_date_time(&self) -> Option<DateTime<Utc>> {
        let date = self.gps_date()?;
        let naive = date.and_hms_opt(0, 0, 0)?.checked_add_signed(self.gps_time())?;

        Some(DateTime::from_naive_utc_and_offset(naive, Utc))
    }

    // -------------------------------------------------------------------------
    // Optics and geometry
    // -------------------------------------------------------------------------

    /// Focal length in millimeters, preferring the value normalized to
    /// 35mm film (0xA405), falling back to the raw rational (0x920A).
    pub fn focal_length(&self) -> f64 {
        let normalized = self.integer_value_in(self.exif_ifd.as_ref(), tag::FOCAL_LENGTH_IN_35MM_FILM);

        if normalized != 0 {
            return f64::from(normalized);
        }

        self.decimal_value(tag::FOCAL_LENGTH)
    }

    /// Compass direction of the shot in decimal degrees.
    ///
    /// Some cameras store the direction DMS-encoded as three rationals,
    /// which is non-conformant but observed; those are composed and clamped
    /// to 0 when at or past 360. A conformant single rational is returned
    /// directly.
    pub fn compass_direction(&self) -> f64 {
        let Some(gps_ifd) = self.gps_ifd.as_ref() else {
            return 0.0;
        };

        let Some(field) = gps_ifd.get(tag::GPS_IMG_DIRECTION) else {
            return 0.0;
        };

        if field.type_code != 5 {
            return 0.0;
        }

        if field.count == 3 {
            let (degrees, minutes, seconds) = self
                .gps_time_parts(gps_ifd, tag::GPS_IMG_DIRECTION)
                .unwrap_or((0.0, 0.0, 0.0));

            let direction = dms_to_decimal_degrees(degrees, minutes, seconds);
            if direction >= 360.0 {
                return 0.0;
            }
            return direction;
        }

        self.decimal_value_in(Some(gps_ifd), tag::GPS_IMG_DIRECTION)
    }

    /// Image width in pixels (PixelXDimension), or 0.
    pub fn width(&self) -> i32 {
        self.integer_value_in(self.exif_ifd.as_ref(), tag::PIXEL_X_DIMENSION)
    }

    /// Image height in pixels (PixelYDimension), or 0.
    pub fn height(&self) -> i32 {
        self.integer_value_in(self.exif_ifd.as_ref(), tag::PIXEL_Y_DIMENSION)
    }

    /// Keyword tags from the XPKeywords tag, comma-split.
    ///
    /// When the tag is absent this returns a single empty-string element,
    /// because splitting an empty string yields one empty piece. Preserved
    /// as-is for compatibility; callers that want "no tags" should check
    /// for it.
    pub fn tags(&self) -> Vec<String> {
        self.string_value(tag::XP_KEYWORDS)
            .split(',')
            .map(str::to_string)
            .collect()
    }
}

// =============================================================================
// Free functions
// =============================================================================

/// Convert a degrees/minutes/seconds coordinate to decimal degrees.
///
/// Computes `|degrees| + minutes/60 + seconds/3600`, then re-applies the
/// sign of the degrees value, so negative degrees yield a negative result
/// even though minutes and seconds are supplied unsigned.
pub fn dms_to_decimal_degrees(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    let magnitude = degrees.abs() + minutes / 60.0 + seconds / 3600.0;

    if degrees < 0.0 {
        -magnitude
    } else {
        magnitude
    }
}

/// Parse an EXIF date/time string with the strict fixed-format rules.
///
/// Accepts both observed layouts by checking literal separator positions:
///
/// ```text
/// 2007:12:06 17:32:03
/// 2010-07-01T07:09:13.5-04:00
/// ```
///
/// Positions 4 and 7 must be ':' or '-', positions 13 and 16 must be ':',
/// and the six numeric fields must parse. Any violation yields `None`
/// rather than a partial date. Timezone suffixes are ignored.
pub fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    let bytes = value.as_bytes();

    if bytes.len() < 18 {
        return None;
    }

    if (bytes[4] != b':' && bytes[4] != b'-')
        || (bytes[7] != b':' && bytes[7] != b'-')
        || bytes[13] != b':'
        || bytes[16] != b':'
    {
        return None;
    }

    let year: i32 = value.get(0..4)?.parse().ok()?;
    let month: u32 = value.get(5..7)?.parse().ok()?;
    let day: u32 = value.get(8..10)?.parse().ok()?;
    let hour: u32 = value.get(11..13)?.parse().ok()?;
    let minute: u32 = value.get(14..16)?.parse().ok()?;
    let second: u32 = value.get(17..19)?.parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)
}

/// Look up a tag in an optional directory.
fn lookup<'a>(ifd: Option<&'a Ifd>, tag: u16) -> Option<&'a Field> {
    ifd?.get(tag)
}

/// String value of a tag against an explicit buffer. Shared between the
/// aggregate's own TIFF copy and maker-note payload buffers.
fn string_from(ifd: Option<&Ifd>, tag: u16, buffer: &[u8]) -> String {
    let Some(field) = lookup(ifd, tag) else {
        return String::new();
    };

    if (field.type_code != 2 && field.type_code != 1) || field.count < 2 {
        return String::new();
    }

    field.as_string(buffer)
}

// =============================================================================
// Tests
// =============================================================================
