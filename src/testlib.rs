// src/testlib.rs
//! Test support: an in-memory stand-in for the native codec boundary.
//!
//! The real codec is linked separately, so the crate's own tests (and
//! downstream users') exercise the session against [`FakeAdvLibrary`],
//! which serves a configurable fixture through the same wire formats
//! the native core uses: headers and frame records are produced by the
//! record codec's `encode`, index tables as raw word runs, tag strings
//! as NUL-terminated buffers.

use crate::index::IndexEntry;
use crate::library::AdvLibrary;
use crate::record::{words_from_u64, FileInfo, FrameInfo};
use crate::types::{StreamId, TagCategory};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

/// Status codes the fake reports, mirroring the native core's bands.
pub const FAKE_E_FILE_NOT_OPEN: i32 = 0x8100_1016_u32 as i32;
pub const FAKE_E_FRAME_MISSING: i32 = 0x8100_1014_u32 as i32;
pub const FAKE_E_IO_ERROR: i32 = 0x8100_0002_u32 as i32;

/// Shared record of boundary calls, for asserting call ordering and
/// that failing paths performed none.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<&'static str>>>);

impl CallLog {
    fn record(&self, name: &'static str) {
        self.0.borrow_mut().push(name);
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.0.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

/// One fixture frame. Explicit pixels are optional; without them the
/// fake fills the buffer with a deterministic per-frame pattern.
#[derive(Debug, Clone)]
pub struct FakeFrame {
    pub pixels: Option<Vec<u16>>,
    pub info: FrameInfo,
}

/// In-memory [`AdvLibrary`] implementation with failure injection.
#[derive(Debug, Clone)]
pub struct FakeAdvLibrary {
    version: u32,
    file_info: FileInfo,
    main_frames: Vec<FakeFrame>,
    calibration_frames: Vec<FakeFrame>,
    tags: HashMap<TagCategory, Vec<(String, String)>>,
    main_index: Vec<IndexEntry>,
    calibration_index: Vec<IndexEntry>,
    open_code: Option<i32>,
    index_status: Option<i32>,
    frame_status: HashMap<u32, i32>,
    tag_status: HashMap<(TagCategory, u32), i32>,
    is_open: bool,
    log: CallLog,
}

impl FakeAdvLibrary {
    pub fn new(file_info: FileInfo) -> Self {
        FakeAdvLibrary {
            version: 2,
            file_info,
            main_frames: Vec::new(),
            calibration_frames: Vec::new(),
            tags: HashMap::new(),
            main_index: Vec::new(),
            calibration_index: Vec::new(),
            open_code: None,
            index_status: None,
            frame_status: HashMap::new(),
            tag_status: HashMap::new(),
            is_open: false,
            log: CallLog::default(),
        }
    }

    /// The conformance fixture: a 960×600, 16-bit, 102-frame monochrome
    /// capture with 21 system metadata tags and no calibration frames.
    pub fn reference() -> Self {
        let file_info = FileInfo {
            width: 960,
            height: 600,
            count_main_frames: 102,
            count_calibration_frames: 0,
            data_bpp: 16,
            max_pixel_value: 65535,
            main_clock_frequency: 1000,
            main_stream_accuracy: 1,
            calibration_clock_frequency: 1000,
            calibration_stream_accuracy: 1,
            main_stream_tags_count: 0,
            calibration_stream_tags_count: 0,
            system_metadata_tags_count: 21,
            user_metadata_tags_count: 0,
            utc_timestamp_accuracy_ns: 1_000_000,
            is_colour_image: false,
            image_layouts_count: 1,
            status_tags_count: 5,
            image_section_tags_count: 3,
            error_status_tag_id: -1,
        };

        let mut lib = FakeAdvLibrary::new(file_info);

        // 25 fps, 40 ms exposures, UTC in nanoseconds.
        let utc_base: u64 = 1_581_476_055_000_000_000;
        let mut payload_offset: u64 = 0;
        for frame in 0..file_info.count_main_frames {
            let start_ticks = frame as u64 * 40;
            let info = FrameInfo {
                start_ticks,
                end_ticks: start_ticks + 40,
                utc_mid_exposure_timestamp: utc_base + frame as u64 * 40_000_000,
                exposure: 40,
                gamma: 1.0,
                gain: 32.0,
                shutter: 0.04,
                offset: 0.0,
                gps_tracked_satellites: 8,
                gps_almanac_status: 2,
                gps_fix_status: 3,
                gps_almanac_offset: 0,
                video_camera_frame_id: frame as u64,
                hardware_timer_frame_id: frame as u64,
                system_timestamp: utc_base / 1_000_000 + frame as u64 * 40,
                image_layout_id: 1,
                raw_data_block_size: 151_204,
            };
            lib.main_index.push(IndexEntry {
                elapsed_ticks: start_ticks,
                frame_offset: payload_offset,
                bytes_count: info.raw_data_block_size,
            });
            payload_offset += info.raw_data_block_size as u64;
            lib.main_frames.push(FakeFrame { pixels: None, info });
        }

        lib.tags.insert(
            TagCategory::SystemMetadata,
            [
                ("RECORDER-SOFTWARE", "OccuRec"),
                ("RECORDER-SOFTWARE-VERSION", "3.7.1"),
                ("RECORDER-HARDWARE", "IOTA-VTI"),
                ("ADVLIB-VERSION", "2.0"),
                ("CAMERA-MODEL", "QHY174M-GPS"),
                ("CAMERA-SERIAL", "Q17400731"),
                ("CAMERA-FIRMWARE", "1.0.4"),
                ("CAMERA-SENSOR", "IMX174"),
                ("CAMERA-HDR-RESPONSE", "LINEAR"),
                ("CAMERA-OPTICAL-RESOLUTION", "1920x1200"),
                ("CAMERA-BINNING", "2x2"),
                ("CAMERA-GAIN-MODE", "HIGH"),
                ("OBSERVER", "A. Observer"),
                ("OBSERVATORY", "Backyard Observatory"),
                ("LONGITUDE", "-71.0589"),
                ("LATITUDE", "42.3601"),
                ("TELESCOPE", "C11 EdgeHD"),
                ("TARGET-OBJECT", "(87) Sylvia"),
                ("PREDICTED-EVENT-TIME", "2020-02-12T03:14:15Z"),
                ("TIMESTAMP-SOURCE", "GPS"),
                ("FRAME-RATE", "25.00"),
            ]
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect(),
        );
        lib.tags.insert(
            TagCategory::Status,
            [
                ("SystemTime", "TIMESTAMP"),
                ("GPSTrackedSatellites", "UINT8"),
                ("GPSAlmanacStatus", "UINT8"),
                ("GPSFixStatus", "UINT8"),
                ("Gain", "REAL"),
            ]
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect(),
        );
        lib.tags.insert(
            TagCategory::ImageSection,
            [
                ("IMAGE-SECTION-VERSION", "2"),
                ("IMAGE-BYTE-ORDER", "LITTLE-ENDIAN"),
                ("IMAGE-BITPIX", "16"),
            ]
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect(),
        );

        lib
    }

    /// The deterministic sample the fake writes at pixel `i` of a frame
    /// with no explicit pixel data.
    pub fn pattern_pixel(frame_number: u32, i: usize) -> u16 {
        (frame_number as usize + i) as u16
    }

    pub fn file_info(&self) -> &FileInfo {
        &self.file_info
    }

    pub fn main_index(&self) -> &[IndexEntry] {
        &self.main_index
    }

    pub fn call_log(&self) -> CallLog {
        self.log.clone()
    }

    /// Report this container version from probes and successful opens.
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Force `open_session` to return this raw code.
    pub fn with_open_code(mut self, raw: i32) -> Self {
        self.open_code = Some(raw);
        self
    }

    /// Force `fetch_index_entries` to return this raw code.
    pub fn fail_index(&mut self, raw: i32) {
        self.index_status = Some(raw);
    }

    /// Force a main-stream frame fetch to return this raw code; the
    /// buffers are still filled best-effort.
    pub fn fail_frame(&mut self, frame_number: u32, raw: i32) {
        self.frame_status.insert(frame_number, raw);
    }

    /// Force one tag fetch to return this raw code.
    pub fn fail_tag(&mut self, category: TagCategory, index: u32, raw: i32) {
        self.tag_status.insert((category, index), raw);
    }

    /// Replace a category's tag table.
    pub fn set_tags(&mut self, category: TagCategory, tags: Vec<(String, String)>) {
        self.tags.insert(category, tags);
    }

    fn fill_frame(&self, frame: &FakeFrame, frame_number: u32, pixels_out: &mut [u16], header_out: &mut [u8]) {
        match &frame.pixels {
            Some(pixels) => {
                let n = pixels.len().min(pixels_out.len());
                pixels_out[..n].copy_from_slice(&pixels[..n]);
            }
            None => {
                for (i, sample) in pixels_out.iter_mut().enumerate() {
                    *sample = Self::pattern_pixel(frame_number, i);
                }
            }
        }
        let encoded = frame.info.encode();
        let n = encoded.len().min(header_out.len());
        header_out[..n].copy_from_slice(&encoded[..n]);
    }

    fn fill_index(entries: &[IndexEntry], out: &mut [u32]) {
        for (entry, chunk) in entries.iter().zip(out.chunks_exact_mut(IndexEntry::WIRE_WORDS)) {
            let (tlo, thi) = words_from_u64(entry.elapsed_ticks);
            let (olo, ohi) = words_from_u64(entry.frame_offset);
            chunk.copy_from_slice(&[tlo, thi, olo, ohi, entry.bytes_count, 0]);
        }
    }
}

impl AdvLibrary for FakeAdvLibrary {
    fn probe_version(&mut self, _path: &Path) -> u32 {
        self.log.record("probe_version");
        self.version
    }

    fn open_session(&mut self, _path: &Path, header_out: &mut [u8]) -> i32 {
        self.log.record("open_session");
        if let Some(code) = self.open_code {
            return code;
        }
        let encoded = self.file_info.encode();
        let n = encoded.len().min(header_out.len());
        header_out[..n].copy_from_slice(&encoded[..n]);
        self.is_open = true;
        self.version as i32
    }

    fn close_session(&mut self) -> i32 {
        self.log.record("close_session");
        self.is_open = false;
        0
    }

    fn fetch_frame_pixels(
        &mut self,
        stream: StreamId,
        frame_number: u32,
        pixels_out: &mut [u16],
        frame_header_out: &mut [u8],
    ) -> i32 {
        self.log.record("fetch_frame_pixels");
        if !self.is_open {
            return FAKE_E_FILE_NOT_OPEN;
        }
        let frames = match stream {
            StreamId::Main => &self.main_frames,
            StreamId::Calibration => &self.calibration_frames,
        };
        let Some(frame) = frames.get(frame_number as usize) else {
            return FAKE_E_FRAME_MISSING;
        };
        self.fill_frame(frame, frame_number, pixels_out, frame_header_out);
        if stream == StreamId::Main {
            if let Some(&code) = self.frame_status.get(&frame_number) {
                return code;
            }
        }
        0
    }

    fn fetch_tag_pair(
        &mut self,
        category: TagCategory,
        index: u32,
        name_out: &mut [u8],
        value_out: &mut [u8],
    ) -> i32 {
        self.log.record("fetch_tag_pair");
        if !self.is_open {
            return FAKE_E_FILE_NOT_OPEN;
        }
        if let Some(&code) = self.tag_status.get(&(category, index)) {
            return code;
        }
        let Some((name, value)) = self
            .tags
            .get(&category)
            .and_then(|table| table.get(index as usize))
        else {
            return FAKE_E_IO_ERROR;
        };
        write_nul_terminated(name, name_out);
        write_nul_terminated(value, value_out);
        0
    }

    fn fetch_index_entries(&mut self, main_out: &mut [u32], calibration_out: &mut [u32]) -> i32 {
        self.log.record("fetch_index_entries");
        if !self.is_open {
            return FAKE_E_FILE_NOT_OPEN;
        }
        if let Some(code) = self.index_status {
            return code;
        }
        Self::fill_index(&self.main_index, main_out);
        Self::fill_index(&self.calibration_index, calibration_out);
        0
    }
}

fn write_nul_terminated(s: &str, out: &mut [u8]) {
    if out.is_empty() {
        return;
    }
    let n = s.len().min(out.len() - 1);
    out[..n].copy_from_slice(&s.as_bytes()[..n]);
    out[n] = 0;
}
