// src/session.rs
use crate::errcode::resolve_message;
use crate::error::{Adv2Error, Result};
use crate::index::{FrameIndex, IndexEntry};
use crate::library::AdvLibrary;
use crate::record::{FileInfo, FrameInfo};
use crate::tags::{TagPair, MAX_TAG_BYTES};
use crate::types::{Status, StreamId, TagCategory, SUPPORTED_FILE_VERSION};
use bytes::BytesMut;
use std::collections::HashMap;
use std::path::Path;

/// One frame's pixels and header record, possibly flagged with a fault.
///
/// The native core populates pixel and header buffers best-effort even
/// when it reports a failure, and callers inspect the fault before
/// trusting the data. [`FrameData::into_verified`] is the checked path.
#[derive(Debug, Clone)]
pub struct FrameData {
    pub pixels: Vec<u16>,
    pub info: FrameInfo,
    fault: Option<FrameFault>,
}

/// The status a frame fetch failed with, alongside its resolved text.
#[derive(Debug, Clone)]
pub struct FrameFault {
    pub status: Status,
    pub message: String,
}

impl FrameData {
    pub fn fault(&self) -> Option<&FrameFault> {
        self.fault.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.fault.is_none()
    }

    /// Consume the frame, failing if the fetch reported a fault.
    pub fn into_verified(self) -> Result<(Vec<u16>, FrameInfo)> {
        match self.fault {
            None => Ok((self.pixels, self.info)),
            Some(fault) => Err(Adv2Error::FrameUnavailable {
                status: fault.status,
                message: fault.message,
            }),
        }
    }

    /// The pixel samples viewed as raw little-endian bytes.
    pub fn pixel_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

/// Probe a file's container version without opening a session.
///
/// Distinct from [`Adv2Reader::open`]; a probe result of `0` means the
/// file is not a recognized container at all.
pub fn probe_file_version<L: AdvLibrary>(library: &mut L, path: impl AsRef<Path>) -> Result<u32> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Adv2Error::NotFound(path.display().to_string()));
    }
    match library.probe_version(path) {
        0 => Err(Adv2Error::UnsupportedVersion(0)),
        version => Ok(version),
    }
}

/// An open ADV version-2 file.
///
/// The session is the owning handle around the native codec boundary:
/// it validates the container version at open, caches the decoded
/// [`FileInfo`], and dispatches every frame, tag, and index request
/// against the open state. Dropping an open session closes it.
///
/// The underlying native core supports one open file per library
/// instance, so sessions do not share libraries.
#[derive(Debug)]
pub struct Adv2Reader<L: AdvLibrary> {
    library: L,
    file_info: FileInfo,
    frame_buf: BytesMut,
    open: bool,
}

impl<L: AdvLibrary> Adv2Reader<L> {
    /// Open an ADV file and decode its header record.
    ///
    /// Fails with `NotFound` before any boundary call if `path` is not
    /// a regular file, with `OpenError` when the native open reports a
    /// fatal code, and with `UnsupportedVersion` when the container is
    /// not version 2. There is no partially-open session: on a version
    /// mismatch the half-open native handle is closed before returning.
    pub fn open(path: impl AsRef<Path>, mut library: L) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Adv2Error::NotFound(path.display().to_string()));
        }

        let mut header = FileInfo::request_buffer();
        let code = Status::from_raw(library.open_session(path, &mut header));

        if code.is_fatal() {
            return Err(Adv2Error::OpenError {
                status: code,
                message: resolve_message(code),
            });
        }
        if code.raw() != SUPPORTED_FILE_VERSION {
            let _ = library.close_session();
            return Err(Adv2Error::UnsupportedVersion(code.raw()));
        }

        let file_info = FileInfo::decode(&header)?;
        Ok(Adv2Reader {
            library,
            file_info,
            frame_buf: BytesMut::with_capacity(FrameInfo::WIRE_SIZE),
            open: true,
        })
    }

    /// The header record decoded at open time. Stays available after
    /// `close`.
    pub fn file_info(&self) -> &FileInfo {
        &self.file_info
    }

    pub fn width(&self) -> u32 {
        self.file_info.width
    }

    pub fn height(&self) -> u32 {
        self.file_info.height
    }

    pub fn main_frame_count(&self) -> u32 {
        self.file_info.count_main_frames
    }

    pub fn calibration_frame_count(&self) -> u32 {
        self.file_info.count_calibration_frames
    }

    pub fn tag_count(&self, category: TagCategory) -> u32 {
        self.file_info.tag_count(category)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Fetch one frame's pixels and header from the main stream.
    pub fn main_frame_pixels(&mut self, frame_number: u32) -> Result<FrameData> {
        self.frame_pixels(StreamId::Main, frame_number)
    }

    /// Fetch one frame's pixels and header from the given stream.
    ///
    /// The pixel buffer holds exactly `width × height` 16-bit samples
    /// in row-major order. A non-success codec status still yields the
    /// best-effort buffer and header, flagged with the resolved fault.
    pub fn frame_pixels(&mut self, stream: StreamId, frame_number: u32) -> Result<FrameData> {
        self.ensure_open()?;
        let count = match stream {
            StreamId::Main => self.file_info.count_main_frames,
            StreamId::Calibration => self.file_info.count_calibration_frames,
        };
        if frame_number >= count {
            return Err(Adv2Error::FrameOutOfRange {
                frame: frame_number,
                count,
            });
        }

        let mut pixels = vec![0u16; self.file_info.pixel_count()];
        self.frame_buf.clear();
        self.frame_buf.resize(FrameInfo::WIRE_SIZE, 0);
        let status = Status::from_raw(self.library.fetch_frame_pixels(
            stream,
            frame_number,
            &mut pixels,
            &mut self.frame_buf,
        ));

        let info = FrameInfo::decode(&self.frame_buf)?;
        let fault = if status.is_ok() {
            None
        } else {
            Some(FrameFault {
                status,
                message: resolve_message(status),
            })
        };
        Ok(FrameData {
            pixels,
            info,
            fault,
        })
    }

    /// Fetch one tag pair by category and sequential index.
    pub fn tag(&mut self, category: TagCategory, index: u32) -> Result<TagPair> {
        self.ensure_open()?;
        let count = self.file_info.tag_count(category);
        if index >= count {
            return Err(Adv2Error::TagOutOfRange {
                category,
                index,
                count,
            });
        }

        let mut name = [0u8; MAX_TAG_BYTES];
        let mut value = [0u8; MAX_TAG_BYTES];
        let status = Status::from_raw(
            self.library
                .fetch_tag_pair(category, index, &mut name, &mut value),
        );
        if !status.is_ok() {
            return Err(Adv2Error::TagUnavailable {
                category,
                index,
                status,
                message: resolve_message(status),
            });
        }
        TagPair::decode(&name, &value)
    }

    /// Collect the system metadata tags into a name → value mapping.
    ///
    /// Enumeration is best-effort per entry: failed tags are skipped
    /// rather than aborting, and the last write wins on duplicates.
    pub fn metadata(&mut self) -> Result<HashMap<String, String>> {
        self.ensure_open()?;
        let count = self.file_info.tag_count(TagCategory::SystemMetadata);
        let mut map = HashMap::with_capacity(count as usize);
        for index in 0..count {
            if let Ok(tag) = self.tag(TagCategory::SystemMetadata, index) {
                map.insert(tag.name, tag.value);
            }
        }
        Ok(map)
    }

    /// Decode both streams' frame index tables.
    ///
    /// All-or-nothing: any non-success status fails the whole build and
    /// no partial index is returned. Re-reading an unmodified session
    /// yields identical entries.
    pub fn read_frame_index(&mut self) -> Result<FrameIndex> {
        self.ensure_open()?;
        let main_count = self.file_info.count_main_frames;
        let calibration_count = self.file_info.count_calibration_frames;
        let mut main_words = vec![0u32; IndexEntry::WIRE_WORDS * main_count as usize];
        let mut calibration_words = vec![0u32; IndexEntry::WIRE_WORDS * calibration_count as usize];

        let status = Status::from_raw(
            self.library
                .fetch_index_entries(&mut main_words, &mut calibration_words),
        );
        if !status.is_ok() {
            return Err(Adv2Error::IndexUnavailable {
                status,
                message: resolve_message(status),
            });
        }

        Ok(FrameIndex {
            main: FrameIndex::decode_entries(&main_words, main_count)?,
            calibration: FrameIndex::decode_entries(&calibration_words, calibration_count)?,
        })
    }

    /// Close the session, forwarding the native close status.
    ///
    /// Idempotent: callable when already closed. The cached `FileInfo`
    /// stays readable.
    pub fn close(&mut self) -> Status {
        self.open = false;
        Status::from_raw(self.library.close_session())
    }

    fn ensure_open(&self) -> Result<()> {
        if self.open {
            Ok(())
        } else {
            Err(Adv2Error::SessionClosed)
        }
    }
}

impl<L: AdvLibrary> Drop for Adv2Reader<L> {
    fn drop(&mut self) {
        if self.open {
            let _ = self.library.close_session();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testlib::FakeAdvLibrary;
    use tempfile::NamedTempFile;

    fn open_reference() -> (NamedTempFile, Adv2Reader<FakeAdvLibrary>) {
        let file = NamedTempFile::new().unwrap();
        let reader = Adv2Reader::open(file.path(), FakeAdvLibrary::reference()).unwrap();
        (file, reader)
    }

    #[test]
    fn test_calls_fail_once_closed() {
        let (_file, mut reader) = open_reference();
        assert!(reader.is_open());

        assert!(reader.close().is_ok());
        assert!(!reader.is_open());
        assert!(matches!(
            reader.main_frame_pixels(0),
            Err(Adv2Error::SessionClosed)
        ));
        assert!(matches!(
            reader.tag(TagCategory::SystemMetadata, 0),
            Err(Adv2Error::SessionClosed)
        ));
        assert!(matches!(
            reader.read_frame_index(),
            Err(Adv2Error::SessionClosed)
        ));
        // FileInfo survives close.
        assert_eq!(reader.width(), 960);
    }

    #[test]
    fn test_frame_out_of_range() {
        let (_file, mut reader) = open_reference();
        let count = reader.main_frame_count();
        match reader.main_frame_pixels(count) {
            Err(Adv2Error::FrameOutOfRange { frame, count: c }) => {
                assert_eq!(frame, count);
                assert_eq!(c, count);
            }
            other => panic!("expected FrameOutOfRange, got {other:?}"),
        }
        // The empty calibration stream rejects frame 0 outright.
        assert!(matches!(
            reader.frame_pixels(StreamId::Calibration, 0),
            Err(Adv2Error::FrameOutOfRange { .. })
        ));
    }

    #[test]
    fn test_tag_index_at_count_fails() {
        let (_file, mut reader) = open_reference();
        let count = reader.tag_count(TagCategory::SystemMetadata);
        assert_eq!(count, 21);
        match reader.tag(TagCategory::SystemMetadata, count) {
            Err(Adv2Error::TagOutOfRange { index, count: c, .. }) => {
                assert_eq!(index, count);
                assert_eq!(c, count);
            }
            other => panic!("expected TagOutOfRange, got {other:?}"),
        }
    }
}
