//! End-to-end decode tests.
//!
//! Tests verify:
//! - Signature location with and without the Exif marker
//! - Both byte orders through the full pipeline
//! - Timestamp resolution with sub-second refinement
//! - String, integer and rational value resolution with directory fallback
//! - Defensive behavior on dangling offsets and truncated containers

use chrono::NaiveDate;

use photometa::{tag, Exif, ExifError};

use super::test_utils::{utf16_be_bytes, utf16_le_bytes, ExifBuilder};

// =============================================================================
// Signature and container tests
// =============================================================================

#[test]
fn test_decode_behind_exif_marker() {
    let builder = ExifBuilder::little_endian();
    let make = builder.ascii(tag::MAKE, "Canon");
    let bytes = builder.ifd0(make).build_with_marker();

    let exif = Exif::from_bytes(&bytes).unwrap();
    assert_eq!(exif.make(), "Canon");
}

#[test]
fn test_decode_bare_tiff_without_marker() {
    // No "Exif\0\0" marker anywhere; the locator falls back to scanning
    // for the signature itself. The fallback pattern only matches the
    // big-endian magic byte layout, so "MM" containers are found.
    let builder = ExifBuilder::big_endian();
    let make = builder.ascii(tag::MAKE, "Canon");
    let mut bytes = vec![0xDEu8; 32];
    bytes.extend_from_slice(&builder.ifd0(make).build_tiff());

    let exif = Exif::from_bytes(&bytes).unwrap();
    assert_eq!(exif.make(), "Canon");
}

#[test]
fn test_bare_little_endian_tiff_is_not_located() {
    // A little-endian container stores the magic as 2A 00, which the
    // fallback scan does not match
    let builder = ExifBuilder::little_endian();
    let make = builder.ascii(tag::MAKE, "Canon");
    let mut bytes = vec![0xDEu8; 32];
    bytes.extend_from_slice(&builder.ifd0(make).build_tiff());

    assert_eq!(
        Exif::from_bytes(&bytes).unwrap_err(),
        ExifError::SignatureNotFound
    );
}

#[test]
fn test_decode_big_endian_container() {
    let builder = ExifBuilder::big_endian();
    let make = builder.ascii(tag::MAKE, "NIKON CORPORATION");
    let width = builder.short(tag::PIXEL_X_DIMENSION, 4256);
    let bytes = builder.ifd0(make).exif(width).build_with_marker();

    let exif = Exif::from_bytes(&bytes).unwrap();
    assert_eq!(exif.make(), "NIKON CORPORATION");
    assert_eq!(exif.width(), 4256);
}

#[test]
fn test_decode_rejects_buffer_without_signature() {
    let bytes = vec![0x42u8; 256];
    assert_eq!(
        Exif::from_bytes(&bytes).unwrap_err(),
        ExifError::SignatureNotFound
    );
}

#[test]
fn test_decode_copy_capped_at_one_megabyte() {
    let builder = ExifBuilder::little_endian();
    let make = builder.ascii(tag::MAKE, "Canon");
    let mut bytes = builder.ifd0(make).build_with_marker();
    // Trailing image data well past the copy cap is simply not retained
    bytes.resize(2 * 1_048_576, 0xEE);

    let exif = Exif::from_bytes(&bytes).unwrap();
    assert_eq!(exif.tiff_data.len(), 1_048_576);
    assert_eq!(exif.make(), "Canon");
}

// =============================================================================
// Identity and geometry tests
// =============================================================================

#[test]
fn test_make_and_model() {
    let builder = ExifBuilder::little_endian();
    let make = builder.ascii(tag::MAKE, "SONY");
    let model = builder.ascii(tag::MODEL, "ILCE-7M3");
    let bytes = builder.ifd0(make).ifd0(model).build_with_marker();

    let exif = Exif::from_bytes(&bytes).unwrap();
    assert_eq!(exif.make(), "SONY");
    assert_eq!(exif.model(), "ILCE-7M3");
}

#[test]
fn test_dimensions_from_shorts() {
    let builder = ExifBuilder::little_endian();
    let width = builder.short(tag::PIXEL_X_DIMENSION, 6000);
    let height = builder.short(tag::PIXEL_Y_DIMENSION, 4000);
    let bytes = builder.exif(width).exif(height).build_with_marker();

    let exif = Exif::from_bytes(&bytes).unwrap();
    assert_eq!(exif.width(), 6000);
    assert_eq!(exif.height(), 4000);
}

#[test]
fn test_dimensions_from_longs() {
    let builder = ExifBuilder::little_endian();
    let width = builder.long(tag::PIXEL_X_DIMENSION, 65540);
    let height = builder.long(tag::PIXEL_Y_DIMENSION, 70000);
    let bytes = builder.exif(width).exif(height).build_with_marker();

    let exif = Exif::from_bytes(&bytes).unwrap();
    assert_eq!(exif.width(), 65540);
    assert_eq!(exif.height(), 70000);
}

#[test]
fn test_dimensions_absent_are_zero() {
    let builder = ExifBuilder::little_endian();
    let make = builder.ascii(tag::MAKE, "Canon");
    let bytes = builder.ifd0(make).build_with_marker();

    let exif = Exif::from_bytes(&bytes).unwrap();
    assert_eq!(exif.width(), 0);
    assert_eq!(exif.height(), 0);
}

#[test]
fn test_focal_length_prefers_35mm_equivalent() {
    let builder = ExifBuilder::little_endian();
    let normalized = builder.short(tag::FOCAL_LENGTH_IN_35MM_FILM, 75);
    let raw = builder.rationals(tag::FOCAL_LENGTH, &[(500, 10)]);
    let bytes = builder.exif(normalized).exif(raw).build_with_marker();

    let exif = Exif::from_bytes(&bytes).unwrap();
    assert_eq!(exif.focal_length(), 75.0);
}

#[test]
fn test_focal_length_falls_back_to_rational() {
    let builder = ExifBuilder::little_endian();
    let raw = builder.rationals(tag::FOCAL_LENGTH, &[(500, 10)]);
    let bytes = builder.exif(raw).build_with_marker();

    let exif = Exif::from_bytes(&bytes).unwrap();
    assert_eq!(exif.focal_length(), 50.0);
}

#[test]
fn test_serial_number_from_standard_tag() {
    let builder = ExifBuilder::little_endian();
    let serial = builder.ascii(tag::BODY_SERIAL_NUMBER, "2481234");
    let bytes = builder.exif(serial).build_with_marker();

    let exif = Exif::from_bytes(&bytes).unwrap();
    assert_eq!(exif.serial_number(), "2481234");
}

// =============================================================================
// Timestamp tests
// =============================================================================

#[test]
fn test_taken_from_date_time_original() {
    let builder = ExifBuilder::little_endian();
    let date = builder.ascii(tag::DATE_TIME_ORIGINAL, "2007:12:06 17:32:03");
    let bytes = builder.exif(date).build_with_marker();

    let exif = Exif::from_bytes(&bytes).unwrap();
    let expected = NaiveDate::from_ymd_opt(2007, 12, 6)
        .unwrap()
        .and_hms_opt(17, 32, 3)
        .unwrap();
    assert_eq!(exif.taken(), Some(expected));
}

#[test]
fn test_taken_falls_back_to_digitized() {
    let builder = ExifBuilder::little_endian();
    let date = builder.ascii(tag::DATE_TIME_DIGITIZED, "2019:03:01 08:00:15");
    let bytes = builder.exif(date).build_with_marker();

    let exif = Exif::from_bytes(&bytes).unwrap();
    let expected = NaiveDate::from_ymd_opt(2019, 3, 1)
        .unwrap()
        .and_hms_opt(8, 0, 15)
        .unwrap();
    assert_eq!(exif.taken(), Some(expected));
}

#[test]
fn test_taken_adds_sub_seconds() {
    let builder = ExifBuilder::little_endian();
    let date = builder.ascii(tag::DATE_TIME_ORIGINAL, "2007:12:06 17:32:03");
    let subsec = builder.ascii(tag::SUB_SEC_TIME_ORIGINAL, "5");
    let bytes = builder.exif(date).exif(subsec).build_with_marker();

    let exif = Exif::from_bytes(&bytes).unwrap();
    let expected = NaiveDate::from_ymd_opt(2007, 12, 6)
        .unwrap()
        .and_hms_opt(17, 32, 3)
        .unwrap()
        + chrono::Duration::milliseconds(500);
    assert_eq!(exif.taken(), Some(expected));
}

#[test]
fn test_taken_zero_sub_seconds_leave_timestamp_unchanged() {
    let builder = ExifBuilder::little_endian();
    let date = builder.ascii(tag::DATE_TIME_ORIGINAL, "2007:12:06 17:32:03");
    let subsec = builder.ascii(tag::SUB_SEC_TIME_ORIGINAL, "0");
    let bytes = builder.exif(date).exif(subsec).build_with_marker();

    let exif = Exif::from_bytes(&bytes).unwrap();
    let expected = NaiveDate::from_ymd_opt(2007, 12, 6)
        .unwrap()
        .and_hms_opt(17, 32, 3)
        .unwrap();
    assert_eq!(exif.taken(), Some(expected));
}

#[test]
fn test_taken_ignores_mismatched_sub_second_tag() {
    // Sub-seconds for DateTimeOriginal must not refine a timestamp read
    // from DateTimeDigitized
    let builder = ExifBuilder::little_endian();
    let date = builder.ascii(tag::DATE_TIME_DIGITIZED, "2019:03:01 08:00:15");
    let subsec = builder.ascii(tag::SUB_SEC_TIME_ORIGINAL, "5");
    let bytes = builder.exif(date).exif(subsec).build_with_marker();

    let exif = Exif::from_bytes(&bytes).unwrap();
    let expected = NaiveDate::from_ymd_opt(2019, 3, 1)
        .unwrap()
        .and_hms_opt(8, 0, 15)
        .unwrap();
    assert_eq!(exif.taken(), Some(expected));
}

#[test]
fn test_taken_none_when_unparseable() {
    let builder = ExifBuilder::little_endian();
    let date = builder.ascii(tag::DATE_TIME_ORIGINAL, "not a timestamp here");
    let bytes = builder.exif(date).build_with_marker();

    let exif = Exif::from_bytes(&bytes).unwrap();
    assert_eq!(exif.taken(), None);
}

#[test]
fn test_date_returns_raw_string() {
    let builder = ExifBuilder::little_endian();
    let date = builder.ascii(tag::DATE_TIME_ORIGINAL, "2007:12:06 17:32:03");
    let bytes = builder.exif(date).build_with_marker();

    let exif = Exif::from_bytes(&bytes).unwrap();
    assert_eq!(exif.date(), "2007:12:06 17:32:03");
}

// =============================================================================
// Keyword tag tests
// =============================================================================

#[test]
fn test_tags_utf16_le_keywords() {
    let builder = ExifBuilder::little_endian();
    let keywords = builder.byte_array(tag::XP_KEYWORDS, utf16_le_bytes("holiday,beach,2019"));
    let bytes = builder.ifd0(keywords).build_with_marker();

    let exif = Exif::from_bytes(&bytes).unwrap();
    assert_eq!(exif.tags(), vec!["holiday", "beach", "2019"]);
}

#[test]
fn test_tags_utf16_be_keywords() {
    let builder = ExifBuilder::little_endian();
    let keywords = builder.byte_array(tag::XP_KEYWORDS, utf16_be_bytes("holiday,beach"));
    let bytes = builder.ifd0(keywords).build_with_marker();

    let exif = Exif::from_bytes(&bytes).unwrap();
    assert_eq!(exif.tags(), vec!["holiday", "beach"]);
}

#[test]
fn test_tags_absent_yields_single_empty_element() {
    let builder = ExifBuilder::little_endian();
    let make = builder.ascii(tag::MAKE, "Canon");
    let bytes = builder.ifd0(make).build_with_marker();

    let exif = Exif::from_bytes(&bytes).unwrap();
    assert_eq!(exif.tags(), vec![String::new()]);
}

// =============================================================================
// Defensive behavior tests
// =============================================================================

#[test]
fn test_dangling_string_offset_is_empty() {
    // Heap offset points far past the end of the container
    let builder = ExifBuilder::little_endian();
    let make = builder.dangling(tag::MAKE, 2, 64, 1_000_000);
    let bytes = builder.ifd0(make).build_with_marker();

    let exif = Exif::from_bytes(&bytes).unwrap();
    assert_eq!(exif.make(), "");
}

#[test]
fn test_dangling_rational_offset_is_zero() {
    let builder = ExifBuilder::little_endian();
    let focal = builder.dangling(tag::FOCAL_LENGTH, 5, 1, 1_000_000);
    let bytes = builder.exif(focal).build_with_marker();

    let exif = Exif::from_bytes(&bytes).unwrap();
    assert_eq!(exif.focal_length(), 0.0);
}

#[test]
fn test_wrong_type_code_yields_sentinel() {
    // PixelXDimension stored as ASCII does not qualify as an integer
    let builder = ExifBuilder::little_endian();
    let width = builder.ascii(tag::PIXEL_X_DIMENSION, "6000");
    let bytes = builder.exif(width).build_with_marker();

    let exif = Exif::from_bytes(&bytes).unwrap();
    assert_eq!(exif.width(), 0);
}

#[test]
fn test_sub_ifd_pointer_past_end_yields_empty_ifd() {
    // The out-of-range entry count reads as zero, so the sub-directory
    // decodes empty rather than failing the whole file
    let builder = ExifBuilder::little_endian();
    let pointer = builder.long(tag::EXIF_IFD_POINTER, 9_000_000);
    let make = builder.ascii(tag::MAKE, "Canon");
    let bytes = builder.ifd0(pointer).ifd0(make).build_with_marker();

    let exif = Exif::from_bytes(&bytes).unwrap();
    assert!(exif.exif_ifd.as_ref().is_some_and(|ifd| ifd.is_empty()));
    assert_eq!(exif.make(), "Canon");
    assert_eq!(exif.taken(), None);
}

#[test]
fn test_negative_sub_ifd_pointer_leaves_ifd_absent() {
    let builder = ExifBuilder::little_endian();
    let pointer = builder.dangling(tag::EXIF_IFD_POINTER, 4, 1, -20);
    let bytes = builder.ifd0(pointer).build_with_marker();

    let exif = Exif::from_bytes(&bytes).unwrap();
    assert!(exif.exif_ifd.is_none());
}
