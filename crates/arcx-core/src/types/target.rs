//! Validated extraction target directory.

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use crate::ExtractError;
use crate::Result;
use crate::path::EncodedPath;
use crate::path::PathCodec;

/// A directory that extracted members and rendered pages are written into.
///
/// The directory is owned by the caller. Construction creates it if it does
/// not exist yet; nothing already inside it is ever overwritten.
///
/// # Examples
///
/// ```no_run
/// use arcx_core::types::ExtractionTarget;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let target = ExtractionTarget::prepare("/tmp/output")?;
/// let path = target.member_path("docs/readme.txt")?;
/// assert!(path.starts_with(target.as_path()));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionTarget(EncodedPath);

impl ExtractionTarget {
    /// Encodes `path` and makes sure it is a directory, creating it (and
    /// missing parents) when absent.
    ///
    /// # Errors
    ///
    /// - `InvalidPath` if the path cannot be encoded
    /// - `DestinationNotFound` if the path exists but is not a directory, or
    ///   cannot be created
    pub fn prepare(path: impl AsRef<Path>) -> Result<Self> {
        let encoded = PathCodec::encode(path)?;
        let dir = encoded.as_path();

        if dir.exists() && !dir.is_dir() {
            return Err(ExtractError::DestinationNotFound {
                path: dir.to_path_buf(),
            });
        }

        std::fs::create_dir_all(dir).map_err(|_| ExtractError::DestinationNotFound {
            path: dir.to_path_buf(),
        })?;

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

    /// Joins a plain file name (no separators) to the target directory.
    #[inline]
    #[must_use]
    pub fn join_file(&self, file_name: &str) -> PathBuf {
        self.as_path().join(file_name)
    }

    /// Maps an archive member name onto a path inside the target.
    ///
    /// Both `/` and `\` are treated as separators. Leading roots, drive
    /// prefixes and `.` components are dropped; `..` is rejected so a member
    /// can never land outside the target.
    ///
    /// # Errors
    ///
    /// Returns `ExtractFailed` if the name contains `..` or has no usable
    /// components.
    pub fn member_path(&self, name: &str) -> Result<PathBuf> {
        let mut relative = PathBuf::new();

        for part in name.split(['/', '\\']) {
            match Path::new(part).components().next() {
                None | Some(Component::CurDir | Component::RootDir | Component::Prefix(_)) => {}
                Some(Component::ParentDir) => {
                    return Err(ExtractError::failed(format!(
                        "member path escapes destination: {name}"
                    )));
                }
                Some(Component::Normal(_)) => relative.push(part),
            }
        }

        if relative.as_os_str().is_empty() {
            return Err(ExtractError::failed(format!(
                "member has an empty path: {name:?}"
            )));
        }

        Ok(self.as_path().join(relative))
    }
}
