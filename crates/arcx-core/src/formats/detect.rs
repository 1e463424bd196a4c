//! Container format detection.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::ExtractError;
use crate::Result;
use crate::types::ContainerSource;

const ZIP_LOCAL_MAGIC: [u8; 4] = *b"PK\x03\x04";
const ZIP_EMPTY_MAGIC: [u8; 4] = *b"PK\x05\x06";
const RAR_MAGIC: [u8; 6] = *b"Rar!\x1a\x07";
const SEVENZ_MAGIC: [u8; 6] = [0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C];
const PDF_MAGIC: [u8; 5] = *b"%PDF-";

/// Supported container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// ZIP archive.
    Zip,
    /// RAR archive (v4 or v5).
    Rar,
    /// 7z archive.
    SevenZip,
    /// PDF document, rasterized page by page.
    Pdf,
}

impl ContainerKind {
    /// All supported kinds, in display order.
    pub const ALL: [Self; 4] = [Self::Zip, Self::Rar, Self::SevenZip, Self::Pdf];

    /// Returns the short format name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::Rar => "rar",
            Self::SevenZip => "7z",
            Self::Pdf => "pdf",
        }
    }

    /// Returns `true` for the archive kinds (everything except PDF).
    #[must_use]
    pub const fn is_archive(self) -> bool {
        !matches!(self, Self::Pdf)
    }

    /// Detects the kind of an existing container.
    ///
    /// Magic bytes are checked first; the file extension is only consulted
    /// when the header matches no known signature.
    ///
    /// # Errors
    ///
    /// Returns an error if the header cannot be read or the format cannot be
    /// determined.
    pub fn detect(source: &ContainerSource) -> Result<Self> {
        let header = source.read_magic::<8>()?;
        Self::from_magic(&header)
            .or_else(|| Self::from_extension(source.as_path()))
            .ok_or_else(|| ExtractError::unrecognized_format("unsupported container format"))
    }

    /// Identifies a container by its leading bytes.
    #[must_use]
    pub fn from_magic(header: &[u8]) -> Option<Self> {
        if header.starts_with(&ZIP_LOCAL_MAGIC) || header.starts_with(&ZIP_EMPTY_MAGIC) {
            Some(Self::Zip)
        } else if header.starts_with(&RAR_MAGIC) {
            Some(Self::Rar)
        } else if header.starts_with(&SEVENZ_MAGIC) {
            Some(Self::SevenZip)
        } else if header.starts_with(&PDF_MAGIC) {
            Some(Self::Pdf)
        } else {
            None
        }
    }

    /// Identifies a container by its file extension (case-insensitive).
    #[must_use]
    pub fn from_extension(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        extension.parse().ok()
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ContainerKind {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "zip" => Ok(Self::Zip),
            "rar" => Ok(Self::Rar),
            "7z" | "sevenzip" => Ok(Self::SevenZip),
            "pdf" => Ok(Self::Pdf),
            other => Err(ExtractError::unrecognized_format(format!(
                "unsupported container format: {other}"
            ))),
        }
    }
}
