//! Validated container source type.

use std::path::Path;

use crate::ExtractError;
use crate::Result;
use crate::path::EncodedPath;
use crate::path::PathCodec;

/// An existing, readable container file.
///
/// The engine only ever reads from a source; it is never modified.
///
/// # Examples
///
/// ```no_run
/// use arcx_core::types::ContainerSource;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let source = ContainerSource::resolve("/data/archive.zip")?;
/// println!("reading {}", source.encoded());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSource(EncodedPath);

impl ContainerSource {
    /// Encodes `path` and checks that it names an existing regular file.
    ///
    /// # Errors
    ///
    /// - `InvalidPath` if the path cannot be encoded
    /// - `SourceNotFound` if nothing readable exists at the path
    pub fn resolve(path: impl AsRef<Path>) -> Result<Self> {
        let encoded = PathCodec::encode(path)?;

        if !encoded.as_path().is_file() {
            return Err(ExtractError::SourceNotFound {
                path: encoded.as_path().to_path_buf(),
            });
        }

        Ok(Self(encoded))
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        self.0.as_path()
    }

    /// Returns the percent-encoded path.
    #[inline]
    #[must_use]
    pub fn encoded(&self) -> &str {
        self.0.encoded()
    }

    /// Reads the first `N` bytes of the file, padding with zeros when the
    /// file is shorter.
    pub(crate) fn read_magic<const N: usize>(&self) -> Result<[u8; N]> {
        use std::io::Read;

        let mut buf = [0u8; N];
        let file = std::fs::File::open(self.as_path()).map_err(|_| ExtractError::SourceNotFound {
            path: self.as_path().to_path_buf(),
        })?;
        let mut limited = file.take(N as u64);
        let mut filled = 0;
        loop {
            let n = limited.read(&mut buf[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        Ok(buf)
    }
}
