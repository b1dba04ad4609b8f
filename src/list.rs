//! Growable, slot-reusing list of planar images and their labels.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::codec::{self, ExportPlan};
use crate::error::PlanarError;
use crate::image::PlanarImage;
use crate::limits::Limits;
use crate::pixel::PixelFormat;
use crate::view::{PackedRows, PackedRowsMut};

/// Highest slot count the list can address; indices travel as `u32` on the
/// host side and `u32::MAX` is reserved.
pub const MAX_IMAGES: usize = u32::MAX as usize;

/// Size and natural pixel format of one slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub spectrum: u32,
    /// `None` when the channel count is outside `1..=4` (including empty slots).
    pub format: Option<PixelFormat>,
}

/// Label given to slot `index` when the caller supplies none.
pub fn default_label(index: usize) -> String {
    format!("image {}", index as u64 + 1)
}

/// Ordered list of planar images, each paired with a text label.
///
/// `images` and `labels` always have the same length. A slot whose image is
/// empty is free: the next [`add`](Self::add) fills the lowest free slot
/// before appending.
#[derive(Clone, Debug, Default)]
pub struct ImageList {
    images: Vec<PlanarImage>,
    labels: Vec<String>,
    limits: Limits,
}

impl ImageList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply resource limits to every subsequent [`add`](Self::add).
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Number of slots, empty ones included.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Slots that can be filled without reallocating.
    pub fn capacity(&self) -> usize {
        self.images.capacity().min(self.labels.capacity())
    }

    /// Remove every slot. Allocated slot storage is kept for reuse.
    pub fn clear(&mut self) {
        self.images.clear();
        self.labels.clear();
    }

    /// Make room for at least `capacity` slots in total.
    ///
    /// Growing moves the existing images into the new allocation; pixel
    /// buffers themselves are not copied.
    pub fn ensure_capacity(&mut self, capacity: usize) -> Result<(), PlanarError> {
        let slot_bytes =
            core::mem::size_of::<PlanarImage>().max(core::mem::size_of::<String>());
        let oom = |_| PlanarError::OutOfMemory {
            bytes: capacity.saturating_mul(slot_bytes),
        };
        let before = self.images.capacity();
        self.images
            .try_reserve(capacity.saturating_sub(self.images.len()))
            .map_err(oom)?;
        self.labels
            .try_reserve(capacity.saturating_sub(self.labels.len()))
            .map_err(oom)?;
        if self.images.capacity() != before {
            tracing::debug!(
                from = before,
                to = self.images.capacity(),
                "image list storage grown"
            );
        }
        Ok(())
    }

    /// Size and inferred format of slot `index`.
    pub fn get_info(&self, index: usize) -> Result<ImageInfo, PlanarError> {
        let image = self.image(index)?;
        Ok(ImageInfo {
            width: image.width(),
            height: image.height(),
            spectrum: image.spectrum(),
            format: PixelFormat::for_spectrum(image.spectrum()),
        })
    }

    pub fn image(&self, index: usize) -> Result<&PlanarImage, PlanarError> {
        self.images.get(index).ok_or(PlanarError::IndexOutOfRange {
            index,
            len: self.images.len(),
        })
    }

    pub fn image_mut(&mut self, index: usize) -> Result<&mut PlanarImage, PlanarError> {
        let len = self.images.len();
        self.images
            .get_mut(index)
            .ok_or(PlanarError::IndexOutOfRange { index, len })
    }

    pub fn label(&self, index: usize) -> Result<&str, PlanarError> {
        self.labels
            .get(index)
            .map(String::as_str)
            .ok_or(PlanarError::IndexOutOfRange {
                index,
                len: self.labels.len(),
            })
    }

    /// `(image, label)` pairs in slot order.
    pub fn iter(&self) -> <&Self as IntoIterator>::IntoIter {
        self.into_iter()
    }

    /// Index the next [`add`](Self::add) will write to: the lowest empty
    /// slot, or the end of the list.
    pub fn next_free_index(&self) -> Result<usize, PlanarError> {
        match self.images.iter().position(PlanarImage::is_empty) {
            Some(index) => Ok(index),
            None if self.images.len() < MAX_IMAGES => Ok(self.images.len()),
            None => Err(PlanarError::ListFull),
        }
    }

    /// Import a packed host buffer into the lowest free slot and return the
    /// slot index.
    ///
    /// Either everything happens or nothing does: on error the list length,
    /// every image and every label are exactly as before.
    pub fn add(
        &mut self,
        width: u32,
        height: u32,
        stride: usize,
        data: &[u8],
        format: PixelFormat,
        name: Option<&str>,
    ) -> Result<usize, PlanarError> {
        let rows = PackedRows::new(data, width, height, stride, format)?;
        self.add_rows(&rows, name)
    }

    /// [`add`](Self::add) for an already validated view.
    pub fn add_rows(
        &mut self,
        rows: &PackedRows<'_>,
        name: Option<&str>,
    ) -> Result<usize, PlanarError> {
        let index = self.next_free_index()?;

        let mut image = PlanarImage::with_limits(
            rows.width(),
            rows.height(),
            rows.format().channels(),
            &self.limits,
        )?;
        codec::import(rows, &mut image)?;
        self.commit(index, image, name)
    }

    /// Put an already planar image into the lowest free slot and return the
    /// slot index.
    ///
    /// The image must be non-empty with 1 to 4 channels and fit the list's
    /// [`Limits`]. On error the list is unchanged.
    pub fn add_planar(
        &mut self,
        image: PlanarImage,
        name: Option<&str>,
    ) -> Result<usize, PlanarError> {
        if image.is_empty() {
            return Err(PlanarError::InvalidParameter("planar image is empty"));
        }
        if !(1..=4).contains(&image.spectrum()) {
            return Err(PlanarError::UnsupportedChannelCount(image.spectrum()));
        }
        self.limits
            .planar_samples(image.width(), image.height(), image.spectrum())?;
        let index = self.next_free_index()?;
        self.commit(index, image, name)
    }

    /// Store `image` at `index`, which is either a free slot or the end of
    /// the list. Only the capacity reservation can fail, and it runs first.
    fn commit(
        &mut self,
        index: usize,
        image: PlanarImage,
        name: Option<&str>,
    ) -> Result<usize, PlanarError> {
        if index == self.images.len() {
            self.ensure_capacity(index + 1)?;
        }
        let label = name.map_or_else(|| default_label(index), String::from);
        if index == self.images.len() {
            self.images.push(image);
            self.labels.push(label);
            tracing::debug!(index, "image appended");
        } else {
            self.images[index] = image;
            self.labels[index] = label;
            tracing::debug!(index, "empty slot reused");
        }
        Ok(index)
    }

    /// Export slot `index` into a caller-owned packed buffer.
    ///
    /// `width` and `height` must equal the slot's size; `stride` may exceed
    /// the packed row size, and bytes beyond each row are left untouched.
    pub fn copy_out(
        &self,
        index: usize,
        width: u32,
        height: u32,
        stride: usize,
        buffer: &mut [u8],
        format: PixelFormat,
    ) -> Result<(), PlanarError> {
        if width == 0 || height == 0 || stride == 0 || buffer.is_empty() {
            return Err(PlanarError::InvalidParameter(
                "zero size, stride or empty output buffer",
            ));
        }
        let image = self.image(index)?;
        ExportPlan::new(image.spectrum(), format)?;
        let mut rows = PackedRowsMut::new(buffer, width, height, stride, format)?;
        codec::export(image, &mut rows)
    }

    /// Export slot `index` into a new tightly packed buffer.
    pub fn copy_out_new(&self, index: usize, format: PixelFormat) -> Result<Vec<u8>, PlanarError> {
        let image = self.image(index)?;
        ExportPlan::new(image.spectrum(), format)?;
        let stride = (image.width() as usize)
            .checked_mul(format.bytes_per_pixel())
            .ok_or(PlanarError::DimensionsTooLarge {
                width: image.width(),
                height: image.height(),
            })?;
        let len = stride
            .checked_mul(image.height() as usize)
            .ok_or(PlanarError::DimensionsTooLarge {
                width: image.width(),
                height: image.height(),
            })?;
        let mut out = Vec::new();
        out.try_reserve_exact(len)
            .map_err(|_| PlanarError::OutOfMemory { bytes: len })?;
        out.resize(len, 0);
        self.copy_out(index, image.width(), image.height(), stride, &mut out, format)?;
        Ok(out)
    }

    /// Borrow both sequences for an engine run.
    #[cfg(feature = "std")]
    pub(crate) fn parts_mut(&mut self) -> (&mut Vec<PlanarImage>, &mut Vec<String>) {
        (&mut self.images, &mut self.labels)
    }

    /// Bring `labels` back to the length of `images` after outside mutation.
    ///
    /// Missing labels are generated, surplus labels dropped.
    #[cfg(feature = "std")]
    pub(crate) fn reconcile_labels(&mut self) {
        let images = self.images.len();
        let labels = self.labels.len();
        if images == labels {
            return;
        }
        tracing::warn!(images, labels, "label count differs from image count");
        if labels > images {
            self.labels.truncate(images);
        } else {
            self.labels.extend((labels..images).map(default_label));
        }
    }

    /// Test helper: overwrite slot `index` with an empty image, as an engine
    /// run would.
    #[cfg(test)]
    pub(crate) fn empty_slot(&mut self, index: usize) {
        self.images[index] = PlanarImage::empty();
    }
}

impl<'a> IntoIterator for &'a ImageList {
    type Item = (&'a PlanarImage, &'a str);
    type IntoIter = core::iter::Zip<
        core::slice::Iter<'a, PlanarImage>,
        core::iter::Map<core::slice::Iter<'a, String>, fn(&String) -> &str>,
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.images
            .iter()
            .zip(self.labels.iter().map(String::as_str as fn(&String) -> &str))
    }
}
