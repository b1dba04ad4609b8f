use crate::PlanarError;

/// Resource limits for images added to an [`ImageList`](crate::ImageList).
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for a single planar `f32` buffer.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Reject images larger than any configured bound.
    fn check_dimensions(&self, width: u32, height: u32) -> Result<(), PlanarError> {
        let exceeded = |what: &str, value: u64, max: u64| {
            PlanarError::LimitExceeded(alloc::format!("{what} {value} exceeds limit {max}"))
        };
        if let Some(max_w) = self.max_width.filter(|&m| u64::from(width) > m) {
            return Err(exceeded("width", width.into(), max_w));
        }
        if let Some(max_h) = self.max_height.filter(|&m| u64::from(height) > m) {
            return Err(exceeded("height", height.into(), max_h));
        }
        let pixels = u64::from(width) * u64::from(height);
        if let Some(max_px) = self.max_pixels.filter(|&m| pixels > m) {
            return Err(exceeded("pixel count", pixels, max_px));
        }
        Ok(())
    }

    /// Validate a `width x height x spectrum` planar image against the limits
    /// and return its sample count.
    ///
    /// Arithmetic overflow is reported as [`PlanarError::DimensionsTooLarge`].
    pub(crate) fn planar_samples(
        &self,
        width: u32,
        height: u32,
        spectrum: u32,
    ) -> Result<usize, PlanarError> {
        self.check_dimensions(width, height)?;
        let too_large = PlanarError::DimensionsTooLarge { width, height };
        let samples = (width as usize)
            .checked_mul(height as usize)
            .and_then(|wh| wh.checked_mul(spectrum as usize))
            .ok_or(too_large)?;
        let bytes = samples
            .checked_mul(core::mem::size_of::<f32>())
            .ok_or(PlanarError::DimensionsTooLarge { width, height })?;
        if let Some(max_mem) = self.max_memory_bytes.filter(|&m| bytes as u64 > m) {
            return Err(PlanarError::LimitExceeded(alloc::format!(
                "allocation {bytes} bytes exceeds memory limit {max_mem}"
            )));
        }
        Ok(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_by_default() {
        assert_eq!(Limits::default().planar_samples(7, 5, 3).unwrap(), 105);
    }

    #[test]
    fn each_bound_is_enforced() {
        let limits = Limits {
            max_width: Some(10),
            max_height: Some(10),
            max_pixels: Some(50),
            max_memory_bytes: Some(400),
        };
        assert!(limits.planar_samples(11, 1, 1).is_err());
        assert!(limits.planar_samples(1, 11, 1).is_err());
        assert!(limits.planar_samples(10, 6, 1).is_err());
        // 10 * 10 pixels is over max_pixels; 5 * 5 * 4 channels * 4 bytes = 400 is fine
        assert_eq!(limits.planar_samples(5, 5, 4).unwrap(), 100);
        assert!(matches!(
            limits.planar_samples(5, 6, 4),
            Err(PlanarError::LimitExceeded(_))
        ));
    }
}
