//! Tag and field-type vocabulary.
//!
//! This module defines:
//! - Field types that determine how directory entry values are encoded
//! - Tag id constants for every tag the aggregate resolves
//! - Three static tag-name namespaces (IFD0, Exif, GPS) used to attach
//!   human-readable names during decoding
//!
//! Tag names are diagnostic only. Decode logic never consults them, so an
//! unnamed tag decodes exactly like a named one.

// =============================================================================
// Field Types
// =============================================================================

/// TIFF field types recognized by the decoder.
///
/// Unrecognized type codes are preserved on the decoded field (as the raw
/// u16) but no typed accessor will decode them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum FieldType {
    /// Unsigned 8-bit integer (1 byte)
    Byte = 1,

    /// ASCII character data, possibly Unicode in XP tags (1 byte)
    Ascii = 2,

    /// Unsigned 16-bit integer (2 bytes)
    Short = 3,

    /// Unsigned 32-bit integer (4 bytes)
    Long = 4,

    /// Unsigned rational: numerator and denominator u32 pair (8 bytes)
    Rational = 5,

    /// Undefined byte data (1 byte per element)
    Undefined = 7,

    /// Signed 32-bit integer (4 bytes)
    SignedLong = 9,

    /// Signed rational: numerator and denominator i32 pair (8 bytes)
    SignedRational = 10,
}

impl FieldType {
    /// Create a FieldType from its numeric code.
    ///
    /// Returns `None` for codes the decoder does not recognize.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(FieldType::Byte),
            2 => Some(FieldType::Ascii),
            3 => Some(FieldType::Short),
            4 => Some(FieldType::Long),
            5 => Some(FieldType::Rational),
            7 => Some(FieldType::Undefined),
            9 => Some(FieldType::SignedLong),
            10 => Some(FieldType::SignedRational),
            _ => None,
        }
    }

    /// Size of a single value of this type in bytes.
    ///
    /// Determines whether `count` values fit in the entry's inline 4-byte
    /// slot or live at an offset elsewhere in the buffer.
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            FieldType::Byte | FieldType::Ascii | FieldType::Undefined => 1,
            FieldType::Short => 2,
            FieldType::Long | FieldType::SignedLong => 4,
            FieldType::Rational | FieldType::SignedRational => 8,
        }
    }
}

// =============================================================================
// Tag Constants
// =============================================================================

/// Tag ids the aggregate resolves, by namespace.
///
/// Only currently-needed tags are named; this is deliberately not a complete
/// EXIF dictionary.
pub mod tag {
    /// IFD0: pointer to the Exif sub-IFD
    pub const EXIF_IFD_POINTER: u16 = 0x8769;
    /// IFD0: pointer to the GPS sub-IFD
    pub const GPS_IFD_POINTER: u16 = 0x8825;
    /// IFD0: camera manufacturer
    pub const MAKE: u16 = 0x010F;
    /// IFD0: camera model
    pub const MODEL: u16 = 0x0110;
    /// IFD0: Windows XP keywords (comma-separated, often UTF-16)
    pub const XP_KEYWORDS: u16 = 0x9C9E;

    /// Exif: capture timestamp
    pub const DATE_TIME_ORIGINAL: u16 = 0x9003;
    /// Exif: digitization timestamp
    pub const DATE_TIME_DIGITIZED: u16 = 0x9004;
    /// Exif: sub-second digits for DateTimeOriginal
    pub const SUB_SEC_TIME_ORIGINAL: u16 = 0x9291;
    /// Exif: sub-second digits for DateTimeDigitized
    pub const SUB_SEC_TIME_DIGITIZED: u16 = 0x9292;
    /// Exif: camera body serial number
    pub const BODY_SERIAL_NUMBER: u16 = 0xA431;
    /// Exif: focal length normalized to 35mm film
    pub const FOCAL_LENGTH_IN_35MM_FILM: u16 = 0xA405;
    /// Exif: focal length as a rational
    pub const FOCAL_LENGTH: u16 = 0x920A;
    /// Exif: vendor-proprietary maker note blob
    pub const MAKER_NOTE: u16 = 0x927C;
    /// Exif: image width in pixels
    pub const PIXEL_X_DIMENSION: u16 = 0xA002;
    /// Exif: image height in pixels
    pub const PIXEL_Y_DIMENSION: u16 = 0xA003;

    /// GPS: time of day as three rationals (h/m/s)
    pub const GPS_TIME_STAMP: u16 = 7;
    /// GPS: date as "YYYY:MM:DD"
    pub const GPS_DATE_STAMP: u16 = 0x1D;
    /// GPS: image direction in degrees
    pub const GPS_IMG_DIRECTION: u16 = 17;

    /// Nikon maker note: serial number
    pub const NIKON_SERIAL_NUMBER: u16 = 0x1D;
    /// Nikon maker note: serial number, "NO="-prefixed variant
    pub const NIKON_SERIAL_NO: u16 = 0xA0;
    /// Nikon maker note: shutter count
    pub const NIKON_SHUTTER_COUNT: u16 = 0xA7;
    /// Nikon maker note: image count
    pub const NIKON_IMAGE_COUNT: u16 = 0xA5;
    /// Sony maker note: shot sequence number
    pub const SONY_SEQUENCE_NUMBER: u16 = 0xB04A;
}

// =============================================================================
// Tag Name Namespaces
// =============================================================================

/// One of the three fixed tag-name namespaces.
///
/// Each is a closed, compile-time mapping from tag id to display name.
/// Maker-note directories are decoded with no namespace at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagNamespace {
    /// Root directory (IFD0) names
    Ifd0,
    /// Exif sub-IFD names
    Exif,
    /// GPS sub-IFD names
    Gps,
}

impl TagNamespace {
    /// Look up the display name of `tag` in this namespace.
    pub fn name_of(self, tag: u16) -> Option<&'static str> {
        match self {
            TagNamespace::Ifd0 => ifd0_tag_name(tag),
            TagNamespace::Exif => exif_tag_name(tag),
            TagNamespace::Gps => gps_tag_name(tag),
        }
    }
}

fn ifd0_tag_name(tag: u16) -> Option<&'static str> {
    Some(match tag {
        0x0100 => "ImageWidth",
        0x0101 => "ImageLength",
        0x0102 => "BitsPerSample",
        0x010E => "ImageDescription",
        0x010F => "Make",
        0x0110 => "Model",
        0x0112 => "Orientation",
        0x011A => "XResolution",
        0x011B => "YResolution",
        0x0128 => "ResolutionUnit",
        0x0131 => "Software",
        0x0132 => "DateTime",
        0x013B => "Artist",
        0x0213 => "YCbCrPositioning",
        0x4746 => "Rating",
        0x4747 => "XP_DIP_XML",
        0x4748 => "HDViewInfo",
        0x4749 => "RatingPercent",
        0x8298 => "Copyright",
        0x8769 => "ExifIFDPointer",
        0x8825 => "GpsIFDPointer",
        0x9216 => "TIFF/EPStandardID",
        0x9C9B => "XPTitle",
        0x9C9C => "XPComment",
        0x9C9D => "XPAuthor",
        0x9C9E => "XPKeywords",
        0x9C9F => "XPSubject",
        0xEA1C => "Padding",
        _ => return None,
    })
}

fn exif_tag_name(tag: u16) -> Option<&'static str> {
    Some(match tag {
        0x829A => "ExposureTime",
        0x829D => "FNumber",
        0x8822 => "ExposureProgram",
        0x8827 => "ISO",
        0x9000 => "ExifVersion",
        0x9003 => "DateTimeOriginal",
        0x9004 => "DateTimeDigitized",
        0x9101 => "ComponentsConfiguration",
        0x9102 => "CompressedBitsPerPixel",
        0x9202 => "ApertureValue",
        0x9204 => "ExposureBiasValue",
        0x9205 => "MaxApertureValue",
        0x9206 => "SubjectDistance",
        0x9207 => "MeteringMode",
        0x9208 => "LightSource",
        0x9209 => "Flash",
        0x920A => "FocalLength",
        0x927C => "MakerNote",
        0x9286 => "UserComment",
        0x9290 => "SubSecTime",
        0x9291 => "SubSecTimeOriginal",
        0x9292 => "SubSecTimeDigitized",
        0xA000 => "FlashpixVersion",
        0xA001 => "ColorSpace",
        0xA002 => "PixelXDimension",
        0xA003 => "PixelYDimension",
        0xA005 => "InteropOffset",
        0xA217 => "SensingMethod",
        0xA300 => "FileSource",
        0xA301 => "SceneType",
        0xA302 => "CFAPattern",
        0xA401 => "CustomRendered",
        0xA402 => "ExposureMode",
        0xA403 => "WhiteBalance",
        0xA404 => "DigitalZoomRatio",
        0xA405 => "FocalLengthIn35mmFilm",
        0xA406 => "SceneCaptureType",
        0xA407 => "GainControl",
        0xA408 => "Contrast",
        0xA409 => "Saturation",
        0xA40A => "Sharpness",
        0xA40B => "DeviceSettingDescription",
        0xA40C => "SubjectDistanceRange",
        0xA431 => "BodySerialNumber",
        0xEA1C => "Padding",
        0xEA1D => "OffsetSchema",
        _ => return None,
    })
}

fn gps_tag_name(tag: u16) -> Option<&'static str> {
    Some(match tag {
        0 => "GPSVersionID",
        1 => "GPSLatitudeRef",
        2 => "GPSLatitude",
        3 => "GPSLongitudeRef",
        4 => "GPSLongitude",
        5 => "GPSAltitudeRef",
        6 => "GPSAltitude",
        7 => "GPSTimeStamp",
        8 => "GPSSatellites",
        9 => "GPSStatus",
        10 => "GPSMeasureMode",
        0x10 => "GPSImgDirectionRef",
        0x11 => "GPSImgDirection",
        0x12 => "GPSMapDatum",
        0x1D => "GPSDateStamp",
        _ => return None,
    })
}

// =============================================================================
// Tests
// =============================================================================
