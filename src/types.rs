// src/types.rs
use std::fmt;

/// The two independent frame sequences inside one ADV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum StreamId {
    Main = 0,
    Calibration = 1,
}

impl StreamId {
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(StreamId::Main),
            1 => Some(StreamId::Calibration),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StreamId::Main => "main",
            StreamId::Calibration => "calibration",
        }
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tag-table categories addressed by (category, sequential index).
///
/// The wire level has no name-based lookup; tags are pulled one at a
/// time by index within their category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum TagCategory {
    MainStream = 0,
    CalibrationStream = 1,
    SystemMetadata = 2,
    UserMetadata = 3,
    ImageSection = 4,
    Status = 5,
}

impl TagCategory {
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(TagCategory::MainStream),
            1 => Some(TagCategory::CalibrationStream),
            2 => Some(TagCategory::SystemMetadata),
            3 => Some(TagCategory::UserMetadata),
            4 => Some(TagCategory::ImageSection),
            5 => Some(TagCategory::Status),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TagCategory::MainStream => "main-stream",
            TagCategory::CalibrationStream => "calibration-stream",
            TagCategory::SystemMetadata => "system-metadata",
            TagCategory::UserMetadata => "user-metadata",
            TagCategory::ImageSection => "image-section",
            TagCategory::Status => "status",
        }
    }
}

impl fmt::Display for TagCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A 32-bit status code returned by the native codec boundary.
///
/// Native calls sign-extend their return value through a wider integer
/// slot, so a raw code always arrives as `i32` and is reinterpreted as
/// unsigned before any comparison. `Status::from_raw` is the single
/// place that masking happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Status(u32);

impl Status {
    /// The exact success code.
    pub const OK: Status = Status(0);

    /// Codes above this value are fatal open-time failures rather than
    /// version numbers.
    pub const FATAL_FLOOR: u32 = 0x7000_0000;

    /// Reinterpret a sign-extended native return value as an unsigned
    /// 32-bit status code.
    pub fn from_raw(raw: i32) -> Self {
        Status(raw as u32)
    }

    pub fn new(code: u32) -> Self {
        Status(code)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }

    pub fn is_ok(&self) -> bool {
        *self == Status::OK
    }

    pub fn is_fatal(&self) -> bool {
        self.0 > Self::FATAL_FLOOR
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

impl fmt::UpperHex for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

/// The only container version this library reads.
pub const SUPPORTED_FILE_VERSION: u32 = 2;
