//! Bounds-checked views over host-owned packed pixel rows.
//!
//! A host hands over a flat byte buffer, a width, a height and a row pitch.
//! The view validates that every row the codec will touch lies inside the
//! buffer once, up front; row access afterwards cannot go out of bounds.

use crate::error::PlanarError;
use crate::pixel::PixelFormat;

/// Bytes needed to hold `height` rows of `width` pixels, `stride` apart.
///
/// The last row needs only its pixel bytes, not a full stride.
fn required_bytes(
    width: u32,
    height: u32,
    stride: usize,
    format: PixelFormat,
) -> Result<usize, PlanarError> {
    if width == 0 {
        return Err(PlanarError::InvalidParameter("width is zero"));
    }
    if height == 0 {
        return Err(PlanarError::InvalidParameter("height is zero"));
    }
    if stride == 0 {
        return Err(PlanarError::InvalidParameter("stride is zero"));
    }
    let row_bytes = (width as usize)
        .checked_mul(format.bytes_per_pixel())
        .ok_or(PlanarError::DimensionsTooLarge { width, height })?;
    if stride < row_bytes {
        return Err(PlanarError::InvalidParameter(
            "stride is smaller than one row of pixels",
        ));
    }
    (height as usize - 1)
        .checked_mul(stride)
        .and_then(|b| b.checked_add(row_bytes))
        .ok_or(PlanarError::DimensionsTooLarge { width, height })
}

/// Read-only packed rows with an arbitrary row pitch.
#[derive(Clone, Copy, Debug)]
pub struct PackedRows<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    stride: usize,
    format: PixelFormat,
}

impl<'a> PackedRows<'a> {
    /// Create a validated view.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension or the stride is zero, if the stride is
    /// smaller than one row, or if `data` is too small for `height` rows.
    pub fn new(
        data: &'a [u8],
        width: u32,
        height: u32,
        stride: usize,
        format: PixelFormat,
    ) -> Result<Self, PlanarError> {
        if data.is_empty() {
            return Err(PlanarError::InvalidParameter("pixel data is empty"));
        }
        let needed = required_bytes(width, height, stride, format)?;
        if data.len() < needed {
            return Err(PlanarError::BufferTooSmall {
                needed,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
            format,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Pixel bytes of every row, top to bottom, without row padding.
    pub fn rows(&self) -> impl Iterator<Item = &'a [u8]> + use<'a> {
        let len = self.width as usize * self.format.bytes_per_pixel();
        let stride = self.stride;
        let data = self.data;
        (0..self.height as usize).map(move |y| {
            let start = y * stride;
            &data[start..start + len]
        })
    }
}

/// Writable packed rows with an arbitrary row pitch.
///
/// Bytes between the end of a row and the next stride (and padding bytes of
/// `Rgbx8`/`Bgrx8` pixels) are never written.
#[derive(Debug)]
pub struct PackedRowsMut<'a> {
    data: &'a mut [u8],
    width: u32,
    height: u32,
    stride: usize,
    format: PixelFormat,
}

impl<'a> PackedRowsMut<'a> {
    /// Create a validated mutable view. Same rules as [`PackedRows::new`].
    pub fn new(
        data: &'a mut [u8],
        width: u32,
        height: u32,
        stride: usize,
        format: PixelFormat,
    ) -> Result<Self, PlanarError> {
        if data.is_empty() {
            return Err(PlanarError::InvalidParameter("output buffer is empty"));
        }
        let needed = required_bytes(width, height, stride, format)?;
        if data.len() < needed {
            return Err(PlanarError::BufferTooSmall {
                needed,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
            format,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Mutable pixel bytes of every row, top to bottom, without row padding.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [u8]> + '_ {
        let len = self.width as usize * self.format.bytes_per_pixel();
        let height = self.height as usize;
        self.data
            .chunks_mut(self.stride)
            .take(height)
            .map(move |row| &mut row[..len])
    }
}
