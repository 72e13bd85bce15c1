// src/record/frame_info.rs
use crate::error::Result;
use crate::record::{check_len, u64_from_words, words_from_u64};
use byteorder::{ByteOrder, LittleEndian};

/// The per-frame metadata record that accompanies each pixel payload.
///
/// Wire layout is the native `AdvFrameInfo` structure: 80 bytes,
/// little-endian, no padding. Timing and frame-id fields travel as
/// Lo/Hi u32 word pairs and are composed into `u64` during decode.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInfo {
    /// Stream clock ticks at exposure start.
    pub start_ticks: u64,
    /// Stream clock ticks at exposure end.
    pub end_ticks: u64,
    /// Mid-exposure UTC timestamp.
    pub utc_mid_exposure_timestamp: u64,
    /// Exposure duration in stream clock units.
    pub exposure: u32,
    pub gamma: f32,
    pub gain: f32,
    pub shutter: f32,
    pub offset: f32,
    pub gps_tracked_satellites: u8,
    pub gps_almanac_status: u8,
    pub gps_fix_status: u8,
    pub gps_almanac_offset: i8,
    pub video_camera_frame_id: u64,
    pub hardware_timer_frame_id: u64,
    pub system_timestamp: u64,
    pub image_layout_id: u32,
    /// Byte length of the compressed payload that follows the record.
    pub raw_data_block_size: u32,
}

impl FrameInfo {
    /// Exact wire size of the record.
    pub const WIRE_SIZE: usize = 80;

    /// A zero-initialized request buffer for the native frame call to fill.
    pub fn request_buffer() -> [u8; Self::WIRE_SIZE] {
        [0u8; Self::WIRE_SIZE]
    }

    /// Decode the frame header record from its raw byte block.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        check_len(buf, Self::WIRE_SIZE)?;

        let word = |i: usize| LittleEndian::read_u32(&buf[i * 4..i * 4 + 4]);

        Ok(FrameInfo {
            start_ticks: u64_from_words(word(0), word(1)),
            end_ticks: u64_from_words(word(2), word(3)),
            utc_mid_exposure_timestamp: u64_from_words(word(4), word(5)),
            exposure: word(6),
            gamma: LittleEndian::read_f32(&buf[28..32]),
            gain: LittleEndian::read_f32(&buf[32..36]),
            shutter: LittleEndian::read_f32(&buf[36..40]),
            offset: LittleEndian::read_f32(&buf[40..44]),
            gps_tracked_satellites: buf[44],
            gps_almanac_status: buf[45],
            gps_fix_status: buf[46],
            gps_almanac_offset: buf[47] as i8,
            video_camera_frame_id: u64_from_words(word(12), word(13)),
            hardware_timer_frame_id: u64_from_words(word(14), word(15)),
            system_timestamp: u64_from_words(word(16), word(17)),
            image_layout_id: word(18),
            raw_data_block_size: word(19),
        })
    }

    /// Encode the record into its wire representation.
    pub fn encode(&self) -> [u8; Self::WIRE_SIZE] {
        let mut buf = [0u8; Self::WIRE_SIZE];

        let mut put_pair = |i: usize, value: u64| {
            let (lo, hi) = words_from_u64(value);
            LittleEndian::write_u32(&mut buf[i * 4..i * 4 + 4], lo);
            LittleEndian::write_u32(&mut buf[i * 4 + 4..i * 4 + 8], hi);
        };
        put_pair(0, self.start_ticks);
        put_pair(2, self.end_ticks);
        put_pair(4, self.utc_mid_exposure_timestamp);
        put_pair(12, self.video_camera_frame_id);
        put_pair(14, self.hardware_timer_frame_id);
        put_pair(16, self.system_timestamp);

        LittleEndian::write_u32(&mut buf[24..28], self.exposure);
        LittleEndian::write_f32(&mut buf[28..32], self.gamma);
        LittleEndian::write_f32(&mut buf[32..36], self.gain);
        LittleEndian::write_f32(&mut buf[36..40], self.shutter);
        LittleEndian::write_f32(&mut buf[40..44], self.offset);
        buf[44] = self.gps_tracked_satellites;
        buf[45] = self.gps_almanac_status;
        buf[46] = self.gps_fix_status;
        buf[47] = self.gps_almanac_offset as u8;
        LittleEndian::write_u32(&mut buf[72..76], self.image_layout_id);
        LittleEndian::write_u32(&mut buf[76..80], self.raw_data_block_size);
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Adv2Error;

    fn sample() -> FrameInfo {
        FrameInfo {
            start_ticks: 0x0000_0001_0000_0000,
            end_ticks: 0x0000_0001_0000_03E8,
            utc_mid_exposure_timestamp: 0x0123_4567_89AB_CDEF,
            exposure: 400,
            gamma: 1.0,
            gain: 34.5,
            shutter: 0.02,
            offset: -3.25,
            gps_tracked_satellites: 9,
            gps_almanac_status: 2,
            gps_fix_status: 3,
            gps_almanac_offset: -17,
            video_camera_frame_id: 0xFFFF_FFFF_0000_0001,
            hardware_timer_frame_id: 42,
            system_timestamp: 0x0000_0000_FFFF_FFFF,
            image_layout_id: 1,
            raw_data_block_size: 151_204,
        }
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let info = sample();
        let decoded = FrameInfo::decode(&info.encode()).unwrap();
        assert_eq!(decoded, info);
    }

    #[test]
    fn test_split_fields_compose_from_word_pairs() {
        let buf = sample().encode();
        // UtcMidExposureTimestamp occupies words 4 and 5.
        assert_eq!(LittleEndian::read_u32(&buf[16..20]), 0x89AB_CDEF);
        assert_eq!(LittleEndian::read_u32(&buf[20..24]), 0x0123_4567);
        // SystemTimestamp hi word is zero for a value below 2^32.
        assert_eq!(LittleEndian::read_u32(&buf[64..68]), 0xFFFF_FFFF);
        assert_eq!(LittleEndian::read_u32(&buf[68..72]), 0);
    }

    #[test]
    fn test_numeric_region_field_order() {
        // Exposure is the seventh u32; the four floats follow it.
        let buf = sample().encode();
        assert_eq!(LittleEndian::read_u32(&buf[24..28]), 400);
        assert_eq!(LittleEndian::read_f32(&buf[28..32]), 1.0);
        assert_eq!(LittleEndian::read_f32(&buf[40..44]), -3.25);
        assert_eq!(buf[47] as i8, -17);
    }

    #[test]
    fn test_decode_short_buffer_fails() {
        let buf = [0u8; 79];
        match FrameInfo::decode(&buf) {
            Err(Adv2Error::MalformedRecord { expected, found }) => {
                assert_eq!(expected, FrameInfo::WIRE_SIZE);
                assert_eq!(found, 79);
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn test_zeroed_request_buffer_decodes_to_default() {
        let decoded = FrameInfo::decode(&FrameInfo::request_buffer()).unwrap();
        assert_eq!(decoded, FrameInfo::default());
    }
}
