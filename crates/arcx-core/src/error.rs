//! Error types for extraction operations.

use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ExtractError`.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Why an `ExtractFailed` error was raised.
///
/// Recorded where the failure is detected, never recovered from the message
/// text, so callers can react to it without parsing paths or library output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCause {
    /// Decoding, rendering or I/O failed.
    Decode,
    /// A credential is required, or the supplied one is wrong.
    Credential,
    /// An output file already exists and was left untouched.
    Overwrite,
    /// The container format could not be determined.
    UnrecognizedFormat,
}

/// Errors that can occur while probing or extracting a container.
///
/// Every failure of a single call is reported as exactly one of these
/// variants. Display strings are safe to show to users and never contain a
/// credential.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The source path does not resolve to a readable container or document.
    #[error("source not found: {path}")]
    SourceNotFound {
        /// The source path as supplied by the caller.
        path: PathBuf,
    },

    /// The destination path is invalid or cannot be resolved to a directory.
    #[error("destination not found: {path}")]
    DestinationNotFound {
        /// The destination path as supplied by the caller.
        path: PathBuf,
    },

    /// A planned output file already exists.
    #[error("file already exists: {path}")]
    DestinationExists {
        /// The output file that would have been overwritten.
        path: PathBuf,
    },

    /// A path cannot be encoded or represented.
    #[error("invalid path {path}: {reason}")]
    InvalidPath {
        /// Lossy rendering of the offending path.
        path: String,
        /// Why the path was rejected.
        reason: String,
    },

    /// The underlying decode or render operation failed.
    #[error("a problem occurred while extracting: {reason}")]
    ExtractFailed {
        /// Description of the failure.
        reason: String,
        /// Classification of the failure.
        cause: FailureCause,
    },

    /// The driver does not implement the requested operation.
    #[error("{operation} is not supported for {format} containers")]
    Unsupported {
        /// Operation name, e.g. `is_protected`.
        operation: &'static str,
        /// Container format name.
        format: &'static str,
    },

    /// Unclassified failure reported by an underlying library.
    #[error("unknown error: {reason}")]
    Unknown {
        /// Description of the failure.
        reason: String,
    },
}

impl ExtractError {
    /// Creates an `ExtractFailed` error for a decode, render or I/O failure.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::ExtractFailed {
            reason: reason.into(),
            cause: FailureCause::Decode,
        }
    }

    /// Creates an `ExtractFailed` error for a missing or wrong credential.
    pub fn credential(reason: impl Into<String>) -> Self {
        Self::ExtractFailed {
            reason: reason.into(),
            cause: FailureCause::Credential,
        }
    }

    /// Creates an `ExtractFailed` error for an output file that already
    /// exists.
    pub fn would_overwrite(path: &Path) -> Self {
        Self::ExtractFailed {
            reason: format!("refusing to overwrite existing file: {}", path.display()),
            cause: FailureCause::Overwrite,
        }
    }

    /// Creates an `ExtractFailed` error for a container whose format is not
    /// recognized.
    pub fn unrecognized_format(reason: impl Into<String>) -> Self {
        Self::ExtractFailed {
            reason: reason.into(),
            cause: FailureCause::UnrecognizedFormat,
        }
    }

    /// Returns the cause of an `ExtractFailed` error.
    #[must_use]
    pub const fn cause(&self) -> Option<FailureCause> {
        match self {
            Self::ExtractFailed { cause, .. } => Some(*cause),
            _ => None,
        }
    }

    /// Returns a stable machine-readable code for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcx_core::ExtractError;
    /// use std::path::PathBuf;
    ///
    /// let err = ExtractError::SourceNotFound {
    ///     path: PathBuf::from("missing.zip"),
    /// };
    /// assert_eq!(err.code(), "SOURCE_NOT_FOUND");
    /// ```
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::SourceNotFound { .. } => "SOURCE_NOT_FOUND",
            Self::DestinationNotFound { .. } => "DESTINATION_NOT_FOUND",
            Self::DestinationExists { .. } => "DESTINATION_EXISTS",
            Self::InvalidPath { .. } => "INVALID_PATH",
            Self::ExtractFailed { .. } => "EXTRACT_FAILED",
            Self::Unsupported { .. } => "UNSUPPORTED",
            Self::Unknown { .. } => "UNKNOWN",
        }
    }

    /// Returns `true` if the failure was caused by a missing or wrong
    /// credential.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcx_core::ExtractError;
    ///
    /// let err = ExtractError::credential("wrong password");
    /// assert!(err.is_credential_error());
    ///
    /// let err = ExtractError::failed("crc mismatch in password.txt");
    /// assert!(!err.is_credential_error());
    /// ```
    #[must_use]
    pub const fn is_credential_error(&self) -> bool {
        matches!(self.cause(), Some(FailureCause::Credential))
    }

    /// Returns the free-form reason carried by this error, if any.
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::ExtractFailed { reason, .. } | Self::Unknown { reason } => Some(reason),
            Self::InvalidPath { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ExtractError {
    fn from(err: std::io::Error) -> Self {
        Self::failed(format!("I/O error: {err}"))
    }
}

impl From<zip::result::ZipError> for ExtractError {
    fn from(err: zip::result::ZipError) -> Self {
        use zip::result::ZipError;

        match err {
            ZipError::Io(io) => io.into(),
            ZipError::InvalidPassword => {
                Self::credential("wrong password for encrypted zip member")
            }
            ZipError::UnsupportedArchive(msg) if msg == ZipError::PASSWORD_REQUIRED => {
                Self::credential("password required for encrypted zip member")
            }
            ZipError::UnsupportedArchive(msg) => Self::failed(format!("unsupported zip: {msg}")),
            ZipError::InvalidArchive(msg) => Self::failed(format!("invalid zip: {msg}")),
            ZipError::FileNotFound => Self::failed("zip member not found"),
            #[allow(unreachable_patterns)]
            other => Self::Unknown {
                reason: format!("zip: {other}"),
            },
        }
    }
}

impl From<sevenz_rust2::Error> for ExtractError {
    fn from(err: sevenz_rust2::Error) -> Self {
        use sevenz_rust2::Error;

        match err {
            Error::PasswordRequired => {
                Self::credential("password required for encrypted 7z archive")
            }
            Error::MaybeBadPassword(io) => {
                Self::credential(format!("wrong password for encrypted 7z archive: {io}"))
            }
            other => Self::failed(format!("7z: {other}")),
        }
    }
}

impl From<unrar::error::UnrarError> for ExtractError {
    fn from(err: unrar::error::UnrarError) -> Self {
        use unrar::error::Code;

        match err.code {
            Code::MissingPassword => {
                Self::credential("password required for encrypted rar archive")
            }
            Code::BadPassword => Self::credential("wrong password for encrypted rar archive"),
            Code::Unknown => Self::Unknown {
                reason: format!("rar: {err}"),
            },
            _ => Self::failed(format!("rar: {err}")),
        }
    }
}

impl From<pdfium_render::prelude::PdfiumError> for ExtractError {
    fn from(err: pdfium_render::prelude::PdfiumError) -> Self {
        use pdfium_render::prelude::PdfiumError;
        use pdfium_render::prelude::PdfiumInternalError;

        match err {
            PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::PasswordError) => {
                Self::credential("document is locked: password missing or wrong")
            }
            other => Self::failed(format!("pdf: {other:?}")),
        }
    }
}

impl From<image::ImageError> for ExtractError {
    fn from(err: image::ImageError) -> Self {
        Self::failed(format!("image encoding failed: {err}"))
    }
}
