// src/errcode.rs
//! Resolution of native status codes to human-readable text.
//!
//! The native core reports everything through 32-bit status codes:
//! `0` is success, the `0x71……` band carries warnings, and codes above
//! `0x70000000` are fatal. This module is a pure lookup table over the
//! documented codes; it has no state and never fails.

use crate::types::Status;

/// Which rendering of a status code the caller wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveKind {
    /// Descriptive text, e.g. "The requested frame cannot be found in the file".
    Message,
    /// Symbolic constant name, e.g. "E_ADV_FRAME_MISSING_FROM_FILE".
    EnumName,
}

struct ErrorCode {
    code: u32,
    enum_name: &'static str,
    message: &'static str,
}

static ERROR_CODES: &[ErrorCode] = &[
    ErrorCode { code: 0x0000_0000, enum_name: "S_OK", message: "Operation completed successfully" },
    ErrorCode { code: 0x7100_0001, enum_name: "S_ADV_TAG_REPLACED", message: "A tag with the same name already existed and its value was replaced" },
    ErrorCode { code: 0x8100_0001, enum_name: "E_ADV_NOFILE", message: "The file could not be found or opened" },
    ErrorCode { code: 0x8100_0002, enum_name: "E_ADV_IO_ERROR", message: "A low-level input/output error occurred while accessing the file" },
    ErrorCode { code: 0x8100_1001, enum_name: "E_ADV_STATUS_ENTRY_ALREADY_ADDED", message: "A status entry with this tag has already been added to the current frame" },
    ErrorCode { code: 0x8100_1002, enum_name: "E_ADV_INVALID_STATUS_TAG_ID", message: "The status tag id is not defined in the file" },
    ErrorCode { code: 0x8100_1003, enum_name: "E_ADV_INVALID_STATUS_TAG_TYPE", message: "The status tag type does not match the requested value type" },
    ErrorCode { code: 0x8100_1004, enum_name: "E_ADV_STATUS_TAG_NOT_FOUND_IN_FRAME", message: "The current frame carries no value for the requested status tag" },
    ErrorCode { code: 0x8100_1005, enum_name: "E_ADV_FRAME_STATUS_NOT_LOADED", message: "No frame status section has been loaded" },
    ErrorCode { code: 0x8100_1006, enum_name: "E_ADV_FRAME_NOT_STARTED", message: "No frame has been started" },
    ErrorCode { code: 0x8100_1007, enum_name: "E_ADV_IMAGE_NOT_ADDED_TO_FRAME", message: "No image has been added to the started frame" },
    ErrorCode { code: 0x8100_1008, enum_name: "E_ADV_INVALID_STREAM_ID", message: "The stream id is neither the main nor the calibration stream" },
    ErrorCode { code: 0x8100_1009, enum_name: "E_ADV_IMAGE_SECTION_UNDEFINED", message: "The file defines no image section" },
    ErrorCode { code: 0x8100_100A, enum_name: "E_ADV_STATUS_SECTION_UNDEFINED", message: "The file defines no status section" },
    ErrorCode { code: 0x8100_100B, enum_name: "E_ADV_IMAGE_LAYOUTS_UNDEFINED", message: "The file defines no image layouts" },
    ErrorCode { code: 0x8100_100C, enum_name: "E_ADV_INVALID_IMAGE_LAYOUT_ID", message: "The image layout id is not defined in the file" },
    ErrorCode { code: 0x8100_100D, enum_name: "E_ADV_CHANGE_NOT_ALLOWED_RIGHT_NOW", message: "The file structure cannot be changed at this point" },
    ErrorCode { code: 0x8100_100E, enum_name: "E_ADV_IMAGE_SECTION_ALREADY_DEFINED", message: "An image section has already been defined" },
    ErrorCode { code: 0x8100_100F, enum_name: "E_ADV_STATUS_SECTION_ALREADY_DEFINED", message: "A status section has already been defined" },
    ErrorCode { code: 0x8100_1010, enum_name: "E_ADV_IMAGE_LAYOUT_ALREADY_DEFINED", message: "An image layout with this id has already been defined" },
    ErrorCode { code: 0x8100_1011, enum_name: "E_ADV_INVALID_IMAGE_LAYOUT_TYPE", message: "The image layout type is not supported" },
    ErrorCode { code: 0x8100_1012, enum_name: "E_ADV_INVALID_IMAGE_LAYOUT_COMPRESSION", message: "The image layout compression is not supported" },
    ErrorCode { code: 0x8100_1013, enum_name: "E_ADV_INVALID_IMAGE_BITS_PER_PIXEL", message: "The bits-per-pixel value is outside the supported range" },
    ErrorCode { code: 0x8100_1014, enum_name: "E_ADV_FRAME_MISSING_FROM_FILE", message: "The requested frame cannot be found in the file" },
    ErrorCode { code: 0x8100_1015, enum_name: "E_ADV_FRAME_CORRUPTED", message: "The requested frame failed verification and appears to be corrupted" },
    ErrorCode { code: 0x8100_1016, enum_name: "E_ADV_FILE_NOT_OPEN", message: "No file is currently open" },
];

/// Render a status code in the requested form.
///
/// Unknown codes resolve to `"0x… is not a recognized error code"` in
/// either form rather than failing.
pub fn resolve(status: Status, kind: ResolveKind) -> String {
    match ERROR_CODES.iter().find(|entry| entry.code == status.raw()) {
        Some(entry) => match kind {
            ResolveKind::Message => entry.message.to_string(),
            ResolveKind::EnumName => entry.enum_name.to_string(),
        },
        None => format!("{status} is not a recognized error code"),
    }
}

/// Shorthand for the descriptive-text rendering.
pub fn resolve_message(status: Status) -> String {
    resolve(status, ResolveKind::Message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_known_code_to_message() {
        let msg = resolve(Status::new(0x8100_1014), ResolveKind::Message);
        assert!(msg.starts_with("The requested frame cannot"));
    }

    #[test]
    fn test_resolves_known_code_to_enum_name() {
        let name = resolve(Status::new(0x8100_1014), ResolveKind::EnumName);
        assert_eq!(name, "E_ADV_FRAME_MISSING_FROM_FILE");
    }

    #[test]
    fn test_unknown_code_formats_instead_of_failing() {
        let msg = resolve(Status::new(0x9100_1014), ResolveKind::Message);
        assert_eq!(msg, "0x91001014 is not a recognized error code");
        // Both kinds fall back the same way for unknown codes.
        let name = resolve(Status::new(0x9100_1014), ResolveKind::EnumName);
        assert_eq!(name, msg);
    }

    #[test]
    fn test_success_and_warning_codes_resolve() {
        assert_eq!(resolve(Status::OK, ResolveKind::EnumName), "S_OK");
        assert_eq!(
            resolve(Status::new(0x7100_0001), ResolveKind::EnumName),
            "S_ADV_TAG_REPLACED"
        );
    }

    #[test]
    fn test_masked_negative_raw_resolves_like_unsigned() {
        let status = Status::from_raw(0x8100_1014_u32 as i32);
        assert_eq!(
            resolve(status, ResolveKind::EnumName),
            "E_ADV_FRAME_MISSING_FROM_FILE"
        );
    }
}
