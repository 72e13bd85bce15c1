// src/record/file_info.rs
use crate::error::Result;
use crate::record::check_len;
use crate::types::TagCategory;
use byteorder::{ByteOrder, LittleEndian};

/// The fixed-layout file header record, decoded once at open time.
///
/// Wire layout is the native `AdvFileInfo` structure: little-endian,
/// natively aligned, 84 bytes total. The two u64 clock fields force
/// alignment padding at offsets 36..40 and 65..68; those bytes are
/// always zero on encode and ignored on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileInfo {
    pub width: u32,
    pub height: u32,
    pub count_main_frames: u32,
    pub count_calibration_frames: u32,
    pub data_bpp: u32,
    pub max_pixel_value: u32,
    pub main_clock_frequency: u64,
    pub main_stream_accuracy: i32,
    pub calibration_clock_frequency: u64,
    pub calibration_stream_accuracy: i32,
    pub main_stream_tags_count: u8,
    pub calibration_stream_tags_count: u8,
    pub system_metadata_tags_count: u8,
    pub user_metadata_tags_count: u8,
    pub utc_timestamp_accuracy_ns: u64,
    pub is_colour_image: bool,
    pub image_layouts_count: u32,
    pub status_tags_count: u32,
    pub image_section_tags_count: u32,
    /// Signed on the wire; -1 means no error-status tag is defined.
    pub error_status_tag_id: i32,
}

impl FileInfo {
    /// Exact wire size of the record, including alignment padding.
    pub const WIRE_SIZE: usize = 84;

    /// A zero-initialized request buffer for the native open call to fill.
    pub fn request_buffer() -> [u8; Self::WIRE_SIZE] {
        [0u8; Self::WIRE_SIZE]
    }

    /// Decode the header record from its raw byte block.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        check_len(buf, Self::WIRE_SIZE)?;

        Ok(FileInfo {
            width: LittleEndian::read_u32(&buf[0..4]),
            height: LittleEndian::read_u32(&buf[4..8]),
            count_main_frames: LittleEndian::read_u32(&buf[8..12]),
            count_calibration_frames: LittleEndian::read_u32(&buf[12..16]),
            data_bpp: LittleEndian::read_u32(&buf[16..20]),
            max_pixel_value: LittleEndian::read_u32(&buf[20..24]),
            main_clock_frequency: LittleEndian::read_u64(&buf[24..32]),
            main_stream_accuracy: LittleEndian::read_i32(&buf[32..36]),
            // padding 36..40
            calibration_clock_frequency: LittleEndian::read_u64(&buf[40..48]),
            calibration_stream_accuracy: LittleEndian::read_i32(&buf[48..52]),
            main_stream_tags_count: buf[52],
            calibration_stream_tags_count: buf[53],
            system_metadata_tags_count: buf[54],
            user_metadata_tags_count: buf[55],
            utc_timestamp_accuracy_ns: LittleEndian::read_u64(&buf[56..64]),
            is_colour_image: buf[64] != 0,
            // padding 65..68
            image_layouts_count: LittleEndian::read_u32(&buf[68..72]),
            status_tags_count: LittleEndian::read_u32(&buf[72..76]),
            image_section_tags_count: LittleEndian::read_u32(&buf[76..80]),
            error_status_tag_id: LittleEndian::read_i32(&buf[80..84]),
        })
    }

    /// Encode the record into its wire representation.
    pub fn encode(&self) -> [u8; Self::WIRE_SIZE] {
        let mut buf = [0u8; Self::WIRE_SIZE];
        LittleEndian::write_u32(&mut buf[0..4], self.width);
        LittleEndian::write_u32(&mut buf[4..8], self.height);
        LittleEndian::write_u32(&mut buf[8..12], self.count_main_frames);
        LittleEndian::write_u32(&mut buf[12..16], self.count_calibration_frames);
        LittleEndian::write_u32(&mut buf[16..20], self.data_bpp);
        LittleEndian::write_u32(&mut buf[20..24], self.max_pixel_value);
        LittleEndian::write_u64(&mut buf[24..32], self.main_clock_frequency);
        LittleEndian::write_i32(&mut buf[32..36], self.main_stream_accuracy);
        LittleEndian::write_u64(&mut buf[40..48], self.calibration_clock_frequency);
        LittleEndian::write_i32(&mut buf[48..52], self.calibration_stream_accuracy);
        buf[52] = self.main_stream_tags_count;
        buf[53] = self.calibration_stream_tags_count;
        buf[54] = self.system_metadata_tags_count;
        buf[55] = self.user_metadata_tags_count;
        LittleEndian::write_u64(&mut buf[56..64], self.utc_timestamp_accuracy_ns);
        buf[64] = self.is_colour_image as u8;
        LittleEndian::write_u32(&mut buf[68..72], self.image_layouts_count);
        LittleEndian::write_u32(&mut buf[72..76], self.status_tags_count);
        LittleEndian::write_u32(&mut buf[76..80], self.image_section_tags_count);
        LittleEndian::write_i32(&mut buf[80..84], self.error_status_tag_id);
        buf
    }

    /// Number of tags declared for a category.
    pub fn tag_count(&self, category: TagCategory) -> u32 {
        match category {
            TagCategory::MainStream => self.main_stream_tags_count as u32,
            TagCategory::CalibrationStream => self.calibration_stream_tags_count as u32,
            TagCategory::SystemMetadata => self.system_metadata_tags_count as u32,
            TagCategory::UserMetadata => self.user_metadata_tags_count as u32,
            TagCategory::ImageSection => self.image_section_tags_count,
            TagCategory::Status => self.status_tags_count,
        }
    }

    /// Number of pixel samples in one frame.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}
