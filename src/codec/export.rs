use alloc::vec::Vec;

use crate::error::PlanarError;
use crate::image::PlanarImage;
use crate::pixel::{ChannelRole, PixelFormat, plane_for};
use crate::view::PackedRowsMut;

/// Map a sample to a byte: clamp to `[0, 255]`, then truncate toward zero.
///
/// NaN maps to 0.
#[inline]
pub(crate) fn clamp_to_u8(v: f32) -> u8 {
    if v.is_nan() {
        0
    } else {
        v.clamp(0.0, 255.0) as u8
    }
}

/// Whether an image with `spectrum` channels may be exported as `format`.
///
/// The table is fixed:
///
/// | spectrum | formats |
/// |---|---|
/// | 1 (gray) | all |
/// | 2 (gray + alpha) | `GrayAlpha8`, `Rgba8`, `Bgra8` |
/// | 3 (color) | `Rgb8`, `Bgr8`, `Rgbx8`, `Bgrx8`, `Rgba8`, `Bgra8` |
/// | 4 (color + alpha) | `Rgba8`, `Bgra8` |
pub fn is_valid_pairing(spectrum: u32, format: PixelFormat) -> bool {
    use PixelFormat::*;
    matches!(
        (spectrum, format),
        (1, _)
            | (2, GrayAlpha8 | Rgba8 | Bgra8)
            | (3, Rgb8 | Bgr8 | Rgbx8 | Bgrx8 | Rgba8 | Bgra8)
            | (4, Rgba8 | Bgra8)
    )
}

/// Where one output byte of a pixel comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Sample {
    /// Clamped sample of this channel.
    Plane(usize),
    /// Synthesized opaque alpha (255).
    Opaque,
    /// Left untouched.
    Skip,
}

/// Per-byte source table for exporting one spectrum to one packed format.
#[derive(Clone, Copy, Debug)]
pub struct ExportPlan {
    format: PixelFormat,
    bytes: [Sample; 4],
}

impl ExportPlan {
    /// Resolve the plan, rejecting channel counts outside `1..=4` and pairs
    /// outside [`is_valid_pairing`].
    pub fn new(spectrum: u32, format: PixelFormat) -> Result<Self, PlanarError> {
        if !(1..=4).contains(&spectrum) {
            return Err(PlanarError::UnsupportedChannelCount(spectrum));
        }
        if !is_valid_pairing(spectrum, format) {
            return Err(PlanarError::UnsupportedPairing { spectrum, format });
        }
        let mut bytes = [Sample::Skip; 4];
        for (slot, &role) in bytes.iter_mut().zip(format.roles()) {
            *slot = match role {
                ChannelRole::Padding => Sample::Skip,
                _ => plane_for(role, spectrum).map_or(Sample::Opaque, Sample::Plane),
            };
        }
        Ok(Self { format, bytes })
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }
}

/// Gather per-channel plane rows into one packed row.
pub(crate) fn export_row(planes: &[&[f32]], plan: &ExportPlan, dst: &mut [u8]) {
    let bpp = plan.format.bytes_per_pixel();
    for (offset, sample) in plan.bytes[..bpp].iter().enumerate() {
        match *sample {
            Sample::Skip => {}
            Sample::Opaque => {
                for px in dst.chunks_exact_mut(bpp) {
                    px[offset] = u8::MAX;
                }
            }
            Sample::Plane(c) => {
                let Some(plane) = planes.get(c) else { continue };
                for (px, &v) in dst.chunks_exact_mut(bpp).zip(plane.iter()) {
                    px[offset] = clamp_to_u8(v);
                }
            }
        }
    }
}

/// Copy a planar image into packed rows of the same size.
///
/// Gray images are duplicated into every color byte; missing alpha is
/// written as 255; padding bytes and bytes past each row are left as they were.
pub fn export(src: &PlanarImage, dst: &mut PackedRowsMut<'_>) -> Result<(), PlanarError> {
    let plan = ExportPlan::new(src.spectrum(), dst.format())?;
    if dst.width() != src.width() || dst.height() != src.height() {
        return Err(PlanarError::InvalidParameter(
            "output size differs from the image size",
        ));
    }

    let mut planes: Vec<_> = src.plane_rows().collect();
    for dst_row in dst.rows_mut() {
        let mut rows: [&[f32]; 4] = Default::default();
        for (slot, plane) in rows.iter_mut().zip(planes.iter_mut()) {
            *slot = plane.next().unwrap_or_default();
        }
        export_row(&rows[..planes.len()], &plan, dst_row);
    }
    Ok(())
}
