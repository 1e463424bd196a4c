//! Extraction configuration.

use std::path::PathBuf;

/// JPEG quality for rasterized PDF pages, in `1..=100`.
///
/// # Examples
///
/// ```
/// use arcx_core::Quality;
///
/// let quality = Quality::new(90).expect("in range");
/// assert_eq!(quality.get(), 90);
///
/// assert!(Quality::new(0).is_none());
/// assert!(Quality::new(101).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Quality(u8);

impl Quality {
    /// Highest quality, used by the host-facing PDF operations.
    pub const MAX: Self = Self(100);

    /// Creates a quality value, or `None` if outside `1..=100`.
    #[must_use]
    pub fn new(value: u8) -> Option<Self> {
        (1..=100).contains(&value).then_some(Self(value))
    }

    /// Returns the quality on the `1..=100` scale.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self::MAX
    }
}

/// Configuration shared by all drivers.
///
/// The engine holds no state between calls; a config is read-only input.
///
/// # Examples
///
/// ```
/// use arcx_core::ExtractConfig;
/// use arcx_core::Quality;
///
/// let config = ExtractConfig {
///     pdf_quality: Quality::new(80).expect("in range"),
///     ..Default::default()
/// };
/// assert!(config.preserve_permissions);
/// ```
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Apply unix permission bits stored in ZIP members.
    pub preserve_permissions: bool,

    /// JPEG quality for rasterized PDF pages.
    pub pdf_quality: Quality,

    /// Directory containing the pdfium shared library.
    ///
    /// `None` searches the current directory, then the system library path.
    pub pdfium_library: Option<PathBuf>,
}

impl Default for ExtractConfig {
    /// Default values:
    /// - `preserve_permissions`: true
    /// - `pdf_quality`: 100
    /// - `pdfium_library`: None
    fn default() -> Self {
        Self {
            preserve_permissions: true,
            pdf_quality: Quality::MAX,
            pdfium_library: None,
        }
    }
}
