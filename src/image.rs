use alloc::vec::Vec;

use crate::error::PlanarError;
use crate::limits::Limits;

/// A planar `f32` image: each channel is one contiguous `width * height`
/// block, rows top to bottom.
///
/// Samples nominally lie in `[0, 255]`. Nothing enforces that range while the
/// image lives in an [`ImageList`](crate::ImageList); export clamps.
///
/// An image with a zero dimension is *empty*. Empty images mark reusable
/// slots in an image list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlanarImage {
    width: u32,
    height: u32,
    spectrum: u32,
    data: Vec<f32>,
}

impl PlanarImage {
    /// Allocate a zero-filled image.
    ///
    /// Allocation failure is reported as [`PlanarError::OutOfMemory`] rather
    /// than aborting the process.
    pub fn new(width: u32, height: u32, spectrum: u32) -> Result<Self, PlanarError> {
        Self::with_limits(width, height, spectrum, &Limits::default())
    }

    pub(crate) fn with_limits(
        width: u32,
        height: u32,
        spectrum: u32,
        limits: &Limits,
    ) -> Result<Self, PlanarError> {
        let samples = limits.planar_samples(width, height, spectrum)?;
        let mut data = Vec::new();
        data.try_reserve_exact(samples)
            .map_err(|_| PlanarError::OutOfMemory {
                bytes: samples * core::mem::size_of::<f32>(),
            })?;
        data.resize(samples, 0.0);
        Ok(Self {
            width,
            height,
            spectrum,
            data,
        })
    }

    /// Wrap existing planar samples, channel after channel.
    pub fn from_planes(
        width: u32,
        height: u32,
        spectrum: u32,
        data: Vec<f32>,
    ) -> Result<Self, PlanarError> {
        let samples = Limits::default().planar_samples(width, height, spectrum)?;
        if data.len() != samples {
            return Err(PlanarError::BufferTooSmall {
                needed: samples,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            spectrum,
            data,
        })
    }

    /// An image with no pixels.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the image holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Drop the pixels and release their storage.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of channels.
    #[inline]
    pub fn spectrum(&self) -> u32 {
        self.spectrum
    }

    /// All samples, channel-major.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    fn plane_len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Samples of channel `c`.
    ///
    /// # Panics
    ///
    /// Panics if `c >= spectrum`.
    pub fn plane(&self, c: u32) -> &[f32] {
        assert!(c < self.spectrum, "channel {c} out of bounds (spectrum: {})", self.spectrum);
        let len = self.plane_len();
        let start = c as usize * len;
        &self.data[start..start + len]
    }

    /// Mutable samples of channel `c`.
    ///
    /// # Panics
    ///
    /// Panics if `c >= spectrum`.
    pub fn plane_mut(&mut self, c: u32) -> &mut [f32] {
        assert!(c < self.spectrum, "channel {c} out of bounds (spectrum: {})", self.spectrum);
        let len = self.plane_len();
        let start = c as usize * len;
        &mut self.data[start..start + len]
    }

    /// Sample at `(x, y)` in channel `c`, if in bounds.
    pub fn get(&self, x: u32, y: u32, c: u32) -> Option<f32> {
        if x >= self.width || y >= self.height || c >= self.spectrum {
            return None;
        }
        let idx = c as usize * self.plane_len() + y as usize * self.width as usize + x as usize;
        self.data.get(idx).copied()
    }

    /// Per-channel iterators over rows, used by the row codec.
    pub(crate) fn plane_rows(&self) -> impl Iterator<Item = core::slice::ChunksExact<'_, f32>> {
        let width = (self.width as usize).max(1);
        self.data
            .chunks_exact(self.plane_len().max(1))
            .map(move |plane| plane.chunks_exact(width))
    }

    pub(crate) fn plane_rows_mut(
        &mut self,
    ) -> impl Iterator<Item = core::slice::ChunksExactMut<'_, f32>> {
        let width = (self.width as usize).max(1);
        let plane_len = self.plane_len().max(1);
        self.data
            .chunks_exact_mut(plane_len)
            .map(move |plane| plane.chunks_exact_mut(width))
    }
}
