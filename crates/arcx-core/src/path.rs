//! Path encoding at the engine boundary.
//!
//! Every source and destination path is encoded exactly once, when it enters
//! the engine. The encoded form is what gets logged and what a host would use
//! to build `file://` URLs; filesystem access keeps using the raw path.
//! Encoding an already-encoded path is not supported.

use std::path::Path;
use std::path::PathBuf;

use percent_encoding::AsciiSet;
use percent_encoding::CONTROLS;
use percent_encoding::utf8_percent_encode;

use crate::ExtractError;
use crate::Result;

/// Characters escaped in an encoded path. Path separators are left intact.
const PATH_UNSAFE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b']')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// A filesystem path together with its percent-encoded form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPath {
    raw: PathBuf,
    encoded: String,
}

impl EncodedPath {
    /// Returns the original path for filesystem access.
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.raw
    }

    /// Returns the percent-encoded form.
    #[must_use]
    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    /// Returns the encoded path as a `file://` URL.
    #[must_use]
    pub fn to_file_url(&self) -> String {
        format!("file://{}", self.encoded)
    }
}

/// Encodes raw paths into their canonical [`EncodedPath`] form.
pub struct PathCodec;

impl PathCodec {
    /// Percent-encodes a path, leaving `/` separators intact.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` if the path is empty, is not valid UTF-8, or
    /// contains a NUL byte.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcx_core::PathCodec;
    ///
    /// let encoded = PathCodec::encode("/tmp/my archive.zip")?;
    /// assert_eq!(encoded.encoded(), "/tmp/my%20archive.zip");
    /// # Ok::<(), arcx_core::ExtractError>(())
    /// ```
    pub fn encode(raw: impl AsRef<Path>) -> Result<EncodedPath> {
        let raw = raw.as_ref();
        let text = raw.to_str().ok_or_else(|| ExtractError::InvalidPath {
            path: raw.to_string_lossy().into_owned(),
            reason: "path is not valid UTF-8".into(),
        })?;

        if text.is_empty() {
            return Err(ExtractError::InvalidPath {
                path: String::new(),
                reason: "path is empty".into(),
            });
        }

        if text.contains('\0') {
            return Err(ExtractError::InvalidPath {
                path: text.replace('\0', "\\0"),
                reason: "path contains a NUL byte".into(),
            });
        }

        Ok(EncodedPath {
            raw: raw.to_path_buf(),
            encoded: utf8_percent_encode(text, PATH_UNSAFE).to_string(),
        })
    }
}
