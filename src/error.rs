// src/error.rs
use crate::types::{Status, TagCategory};
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Adv2Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("cannot find file: {0}")]
    NotFound(String),

    #[error("not an ADV version 2 file (container version {0})")]
    UnsupportedVersion(u32),

    #[error("error opening file: {message} (status 0x{status:08X})")]
    OpenError { status: Status, message: String },

    #[error("malformed record: expected {expected} bytes, found {found}")]
    MalformedRecord { expected: usize, found: usize },

    #[error("frame index unavailable: {message} (status 0x{status:08X})")]
    IndexUnavailable { status: Status, message: String },

    #[error("{category} tag {index} unavailable: {message} (status 0x{status:08X})")]
    TagUnavailable {
        category: TagCategory,
        index: u32,
        status: Status,
        message: String,
    },

    #[error("{category} tag index {index} out of range (category has {count} tags)")]
    TagOutOfRange {
        category: TagCategory,
        index: u32,
        count: u32,
    },

    #[error("frame {frame} out of range (stream has {count} frames)")]
    FrameOutOfRange { frame: u32, count: u32 },

    #[error("frame unavailable: {message} (status 0x{status:08X})")]
    FrameUnavailable { status: Status, message: String },

    #[error("invalid UTF-8 in tag data")]
    InvalidUtf8,

    #[error("session is closed")]
    SessionClosed,
}

pub type Result<T> = std::result::Result<T, Adv2Error>;
