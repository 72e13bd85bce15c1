// src/lib.rs
//! # adv2-rs
//!
//! A Rust library for reading ADV (Astro Digital Video) version 2 files,
//! the tagged binary container format used for astronomical video capture
//! with high-precision GPS timestamps.
//!
//! ## Features
//!
//! - 🔍 **Exact decoding**: field-accurate, alignment-accurate decoding of the
//!   native file header and frame header records
//! - ⏱ **High-precision timing**: split 64-bit tick and timestamp fields
//!   composed into native `u64` values
//! - 🎯 **Random access**: per-stream frame indexes for seeking without a
//!   linear scan
//! - 🏷 **Metadata tags**: lazy, pull-based access to the system, user,
//!   stream, image-section and status tag tables
//! - 🧪 **Testable boundary**: the native codec sits behind a trait, with an
//!   in-memory fake shipped in [`testlib`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use adv2_rs::*;
//! # use adv2_rs::testlib::FakeAdvLibrary;
//!
//! fn main() -> Result<()> {
//!     // The codec boundary is linked separately; tests use the fake.
//!     let library = FakeAdvLibrary::reference();
//!     let mut reader = Adv2Reader::open("capture.adv", library)?;
//!
//!     println!(
//!         "{}x{}, {} frames",
//!         reader.width(),
//!         reader.height(),
//!         reader.main_frame_count()
//!     );
//!
//!     // Fetch a frame and check it before trusting the pixels.
//!     let frame = reader.main_frame_pixels(0)?;
//!     let (pixels, info) = frame.into_verified()?;
//!     println!("mid-exposure UTC: {}", info.utc_mid_exposure_timestamp);
//!     assert_eq!(pixels.len(), reader.file_info().pixel_count());
//!
//!     // Enumerate the recorder's metadata.
//!     for (name, value) in reader.metadata()? {
//!         println!("{name} = {value}");
//!     }
//!
//!     reader.close();
//!     Ok(())
//! }
//! ```

// Modules
pub mod errcode;
pub mod error;
pub mod index;
pub mod library;
pub mod record;
pub mod session;
pub mod tags;
pub mod testlib;
pub mod types;

mod utils;

// Re-export commonly used types at the crate root for convenience
pub use error::{Adv2Error, Result};

// Type exports
pub use types::{Status, StreamId, TagCategory, SUPPORTED_FILE_VERSION};

// Record exports
pub use record::{FileInfo, FrameInfo};

// Index exports
pub use index::{FrameIndex, IndexEntry};

// Tag exports
pub use tags::{TagPair, MAX_TAG_BYTES};

// Boundary exports
pub use library::AdvLibrary;

// Session exports
pub use session::{probe_file_version, Adv2Reader, FrameData, FrameFault};

// Error-code resolution exports
pub use errcode::{resolve, resolve_message, ResolveKind};

// Prelude module for glob imports
pub mod prelude {
    //! Convenient imports for common use cases.
    //!
    //! ```rust
    //! use adv2_rs::prelude::*;
    //! ```

    pub use crate::error::{Adv2Error, Result};
    pub use crate::library::AdvLibrary;
    pub use crate::record::{FileInfo, FrameInfo};
    pub use crate::session::{Adv2Reader, FrameData};
    pub use crate::types::{Status, StreamId, TagCategory};
}

// Version information
/// The ADV container version this library implements
pub const ADV_VERSION: u32 = 2;

/// The library version
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");
