use crate::error::PlanarError;

/// What a single byte of a packed pixel carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelRole {
    Gray,
    Red,
    Green,
    Blue,
    Alpha,
    /// Inert filler byte (the `x` in `Rgbx8`). Never read, never written.
    Padding,
}

/// Host-side packed pixel encoding, 8 bits per byte-channel.
///
/// The discriminants are stable and match the values accepted by
/// [`PixelFormat::from_raw`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelFormat {
    /// Single channel, 8-bit grayscale.
    Gray8 = 0,
    /// 2 channels, 8-bit grayscale followed by 8-bit alpha.
    GrayAlpha8 = 1,
    /// 3 channels, 8-bit RGB.
    Rgb8 = 2,
    /// 4 channels, 8-bit RGBA.
    Rgba8 = 3,
    /// 3 channels, 8-bit BGR.
    Bgr8 = 4,
    /// 4 channels, 8-bit BGRA.
    Bgra8 = 5,
    /// 4 bytes, 8-bit RGBX (opaque; 4th byte is padding, not alpha).
    Rgbx8 = 6,
    /// 4 bytes, 8-bit BGRX (opaque; 4th byte is padding, not alpha).
    Bgrx8 = 7,
}

impl PixelFormat {
    /// Every format, in discriminant order.
    pub const ALL: [PixelFormat; 8] = [
        Self::Gray8,
        Self::GrayAlpha8,
        Self::Rgb8,
        Self::Rgba8,
        Self::Bgr8,
        Self::Bgra8,
        Self::Rgbx8,
        Self::Bgrx8,
    ];

    /// Decode a format value received from a host.
    pub fn from_raw(value: u32) -> Result<Self, PlanarError> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or(PlanarError::UnknownFormat(value))
    }

    /// The stable numeric value of this format.
    pub fn as_raw(self) -> u32 {
        self as u32
    }

    /// Byte roles of one packed pixel, in memory order.
    pub fn roles(&self) -> &'static [ChannelRole] {
        use ChannelRole::*;
        match self {
            Self::Gray8 => &[Gray],
            Self::GrayAlpha8 => &[Gray, Alpha],
            Self::Rgb8 => &[Red, Green, Blue],
            Self::Bgr8 => &[Blue, Green, Red],
            Self::Rgba8 => &[Red, Green, Blue, Alpha],
            Self::Bgra8 => &[Blue, Green, Red, Alpha],
            Self::Rgbx8 => &[Red, Green, Blue, Padding],
            Self::Bgrx8 => &[Blue, Green, Red, Padding],
        }
    }

    /// Bytes per pixel for this format.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::GrayAlpha8 => 2,
            Self::Rgb8 | Self::Bgr8 => 3,
            Self::Rgba8 | Self::Bgra8 | Self::Rgbx8 | Self::Bgrx8 => 4,
        }
    }

    /// Number of planar channels an imported image of this format has.
    ///
    /// Padding bytes do not count, so `Rgbx8` yields 3.
    pub fn channels(&self) -> u32 {
        match self {
            Self::Gray8 => 1,
            Self::GrayAlpha8 => 2,
            Self::Rgb8 | Self::Bgr8 | Self::Rgbx8 | Self::Bgrx8 => 3,
            Self::Rgba8 | Self::Bgra8 => 4,
        }
    }

    /// Whether one byte of each pixel is a true alpha channel.
    pub fn has_alpha(&self) -> bool {
        matches!(self, Self::GrayAlpha8 | Self::Rgba8 | Self::Bgra8)
    }

    /// The format an image with `spectrum` planar channels naturally maps to.
    pub fn for_spectrum(spectrum: u32) -> Option<Self> {
        match spectrum {
            1 => Some(Self::Gray8),
            2 => Some(Self::GrayAlpha8),
            3 => Some(Self::Rgb8),
            4 => Some(Self::Rgba8),
            _ => None,
        }
    }
}

impl TryFrom<u32> for PixelFormat {
    type Error = PlanarError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_raw(value)
    }
}

/// Planar channel index that holds samples for `role` in an image of
/// `spectrum` channels.
///
/// Gray images broadcast their single value plane to every color role.
/// Returns `None` for padding, and for alpha when the image has none.
pub(crate) fn plane_for(role: ChannelRole, spectrum: u32) -> Option<usize> {
    let has_alpha = spectrum == 2 || spectrum == 4;
    match role {
        ChannelRole::Padding => None,
        ChannelRole::Alpha => has_alpha.then(|| spectrum as usize - 1),
        ChannelRole::Gray => Some(0),
        ChannelRole::Red => Some(0),
        ChannelRole::Green if spectrum >= 3 => Some(1),
        ChannelRole::Blue if spectrum >= 3 => Some(2),
        ChannelRole::Green | ChannelRole::Blue => Some(0),
    }
}
