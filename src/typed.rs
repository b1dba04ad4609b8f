//! Typed pixel slices and 2D buffers as packed input and output.

use alloc::vec::Vec;

use crate::error::PlanarError;
use crate::list::ImageList;
use crate::pixel::PixelFormat;

/// An 8-bit pixel type with a fixed packed byte layout.
pub trait PackedPixel: Copy {
    const FORMAT: PixelFormat;
}

impl PackedPixel for rgb::Rgb<u8> {
    const FORMAT: PixelFormat = PixelFormat::Rgb8;
}

impl PackedPixel for rgb::Rgba<u8> {
    const FORMAT: PixelFormat = PixelFormat::Rgba8;
}

impl PackedPixel for rgb::alt::BGR<u8> {
    const FORMAT: PixelFormat = PixelFormat::Bgr8;
}

impl PackedPixel for rgb::alt::BGRA<u8> {
    const FORMAT: PixelFormat = PixelFormat::Bgra8;
}

impl PackedPixel for rgb::Gray<u8> {
    const FORMAT: PixelFormat = PixelFormat::Gray8;
}

impl PackedPixel for rgb::GrayAlpha<u8> {
    const FORMAT: PixelFormat = PixelFormat::GrayAlpha8;
}

fn row_bytes<P: PackedPixel>(pixels: usize) -> usize {
    pixels * P::FORMAT.bytes_per_pixel()
}

impl ImageList {
    /// Add a tightly packed `width x height` slice of typed pixels.
    pub fn add_pixels<P: PackedPixel>(
        &mut self,
        pixels: &[P],
        width: u32,
        height: u32,
        name: Option<&str>,
    ) -> Result<usize, PlanarError>
    where
        [P]: rgb::ComponentBytes<u8>,
    {
        use rgb::ComponentBytes as _;
        let stride = row_bytes::<P>(width as usize);
        self.add(width, height, stride, pixels.as_bytes(), P::FORMAT, name)
    }

    /// Export slot `index` as typed pixels, tightly packed.
    pub fn to_pixels<P: PackedPixel>(&self, index: usize) -> Result<Vec<P>, PlanarError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        use rgb::AsPixels as _;
        let bytes = self.copy_out_new(index, P::FORMAT)?;
        Ok(bytes.as_pixels().to_vec())
    }

    /// Add an [`imgref::ImgRef`]; its stride becomes the row pitch.
    #[cfg(feature = "imgref")]
    pub fn add_imgref<P: PackedPixel>(
        &mut self,
        img: imgref::ImgRef<'_, P>,
        name: Option<&str>,
    ) -> Result<usize, PlanarError>
    where
        [P]: rgb::ComponentBytes<u8>,
    {
        use rgb::ComponentBytes as _;
        let width = u32::try_from(img.width())
            .map_err(|_| PlanarError::InvalidParameter("image width exceeds u32"))?;
        let height = u32::try_from(img.height())
            .map_err(|_| PlanarError::InvalidParameter("image height exceeds u32"))?;
        let stride = row_bytes::<P>(img.stride());
        self.add(width, height, stride, img.buf().as_bytes(), P::FORMAT, name)
    }

    /// Export slot `index` into an [`imgref::ImgVec`].
    #[cfg(feature = "imgref")]
    pub fn to_imgvec<P: PackedPixel>(&self, index: usize) -> Result<imgref::ImgVec<P>, PlanarError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let info = self.get_info(index)?;
        let pixels = self.to_pixels::<P>(index)?;
        Ok(imgref::ImgVec::new(
            pixels,
            info.width as usize,
            info.height as usize,
        ))
    }
}
