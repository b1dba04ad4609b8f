use alloc::vec::Vec;

use crate::error::PlanarError;
use crate::image::PlanarImage;
use crate::pixel::{PixelFormat, plane_for};
use crate::view::PackedRows;

/// Scatter one packed row into per-channel plane rows.
///
/// `planes[c]` is row `y` of channel `c`; it must hold at least as many
/// samples as `src` has pixels.
pub(crate) fn import_row(src: &[u8], format: PixelFormat, planes: &mut [&mut [f32]]) {
    let bpp = format.bytes_per_pixel();
    let spectrum = format.channels();
    for (offset, &role) in format.roles().iter().enumerate() {
        let Some(plane) = plane_for(role, spectrum).and_then(|c| planes.get_mut(c)) else {
            continue;
        };
        for (dst, px) in plane.iter_mut().zip(src.chunks_exact(bpp)) {
            *dst = f32::from(px[offset]);
        }
    }
}

/// Copy packed pixels into a planar image of matching size.
///
/// `dst` must already be `src.width() x src.height()` with
/// `src.format().channels()` channels.
pub fn import(src: &PackedRows<'_>, dst: &mut PlanarImage) -> Result<(), PlanarError> {
    let format = src.format();
    if dst.width() != src.width() || dst.height() != src.height() {
        return Err(PlanarError::InvalidParameter(
            "planar image size differs from the packed rows",
        ));
    }
    if dst.spectrum() != format.channels() {
        return Err(PlanarError::InvalidParameter(
            "planar image channel count differs from the pixel format",
        ));
    }

    let spectrum = format.channels() as usize;
    let mut planes: Vec<_> = dst.plane_rows_mut().collect();
    for src_row in src.rows() {
        let mut rows: [&mut [f32]; 4] = Default::default();
        for (slot, plane) in rows.iter_mut().zip(planes.iter_mut()) {
            *slot = plane.next().unwrap_or_default();
        }
        import_row(src_row, format, &mut rows[..spectrum]);
    }
    Ok(())
}
