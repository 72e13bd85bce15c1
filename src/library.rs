// src/library.rs
//! The external codec boundary.
//!
//! Everything that touches container bytes on disk — version probing,
//! opening, payload decompression, tag and index retrieval — lives
//! behind [`AdvLibrary`]. The session layer owns an implementation and
//! only ever sees filled buffers and raw status codes.

use crate::types::{StreamId, TagCategory};
use std::path::Path;

/// Native codec operations an ADV session is built on.
///
/// Implementations follow the native calling convention: the caller
/// allocates zero-initialized output buffers, the call fills them and
/// returns a raw `i32` code. Raw codes are sign-extended by native
/// return slots and must be masked through
/// [`Status::from_raw`](crate::types::Status::from_raw) before any
/// comparison; `0` is success, values above `0x70000000` are fatal.
///
/// The underlying native core keeps a single implicit open file per
/// library instance. Calling `open_session` again while a session is
/// open is a precondition violation with undefined results; callers
/// must pair every successful open with a `close_session`.
pub trait AdvLibrary {
    /// Probe the container version without opening a session.
    /// Returns `0` when the file is not a recognized container.
    fn probe_version(&mut self, path: &Path) -> u32;

    /// Open the file and fill `header_out` with the raw
    /// [`FileInfo`](crate::record::FileInfo) record. The return code is
    /// the container version on success and an error code otherwise.
    fn open_session(&mut self, path: &Path, header_out: &mut [u8]) -> i32;

    /// Close the current session. Safe to call with none open.
    fn close_session(&mut self) -> i32;

    /// Decompress one frame's pixels into `pixels_out` and fill
    /// `frame_header_out` with the raw
    /// [`FrameInfo`](crate::record::FrameInfo) record.
    fn fetch_frame_pixels(
        &mut self,
        stream: StreamId,
        frame_number: u32,
        pixels_out: &mut [u16],
        frame_header_out: &mut [u8],
    ) -> i32;

    /// Fill `name_out` and `value_out` with the NUL-terminated strings
    /// of one tag pair.
    fn fetch_tag_pair(
        &mut self,
        category: TagCategory,
        index: u32,
        name_out: &mut [u8],
        value_out: &mut [u8],
    ) -> i32;

    /// Fill both streams' index tables as runs of
    /// [`IndexEntry::WIRE_WORDS`](crate::index::IndexEntry::WIRE_WORDS)
    /// words per frame.
    fn fetch_index_entries(&mut self, main_out: &mut [u32], calibration_out: &mut [u32]) -> i32;
}
