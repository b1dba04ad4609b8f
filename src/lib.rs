//! # zenplanar
//!
//! Marshalling between packed 8-bit host pixel buffers and planar `f32`
//! images, plus a thin bridge for running an external image-processing
//! engine over a list of such images.
//!
//! ## Pixel formats
//!
//! Gray, gray+alpha, RGB, BGR, RGBA, BGRA and the padded RGBX/BGRX layouts,
//! all 8 bits per byte-channel, with any row pitch at least one row wide.
//! Import is exact. Export clamps to `[0, 255]` and truncates.
//!
//! ## Image list
//!
//! [`ImageList`] keeps images and labels in step. An empty image marks a
//! free slot; [`ImageList::add`] fills the lowest free slot before appending
//! and leaves the list untouched when it fails.
//!
//! ## Engine bridge (`std` feature)
//!
//! [`run`] prepares the resource directory, loads extension command files,
//! and hands the list to an [`Engine`]. [`run_with_status`] wraps it for
//! hosts that only understand [`Status`] codes and a bounded [`ErrorInfo`].
//!
//! ## Usage
//!
//! ```no_run
//! use zenplanar::{ImageList, PixelFormat};
//!
//! let pixels: &[u8] = &[255, 0, 0, 0, 255, 0];
//! let mut list = ImageList::new();
//!
//! // 2x1 RGB image, rows 6 bytes apart
//! let index = list.add(2, 1, 6, pixels, PixelFormat::Rgb8, Some("swatch"))?;
//!
//! let info = list.get_info(index)?;
//! println!("{}x{}x{} {:?}", info.width, info.height, info.spectrum, info.format);
//!
//! // Same pixels back, channel order swapped
//! let mut out = [0u8; 8];
//! list.copy_out(index, 2, 1, 8, &mut out, PixelFormat::Bgra8)?;
//! # Ok::<(), zenplanar::PlanarError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod codec;
mod error;
mod image;
mod limits;
mod list;
mod pixel;
mod record;
mod signal;
mod status;
mod view;

#[cfg(feature = "std")]
mod bridge;

#[cfg(feature = "rgb")]
mod typed;

// Re-exports
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::{EngineFault, PlanarError};
pub use image::PlanarImage;
pub use limits::Limits;
pub use list::{ImageInfo, ImageList, MAX_IMAGES, default_label};
pub use pixel::{ChannelRole, PixelFormat};
pub use record::{BoundedStr, ERROR_FIELD_LEN, ErrorInfo};
pub use signal::{AbortFlag, Progress};
pub use status::Status;
pub use view::{PackedRows, PackedRowsMut};

#[cfg(feature = "std")]
pub use bridge::{
    DEFAULT_HOST_NAME, Engine, EngineJob, HOST_VARIABLE, ResourcePaths, RunOptions,
    UPDATE_SIGNATURE, has_update_signature, run, run_with_status,
};

#[cfg(feature = "rgb")]
pub use typed::PackedPixel;
