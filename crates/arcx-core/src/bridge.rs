//! Asynchronous request/response facade for host runtimes.
//!
//! Each operation copies its inputs into one blocking worker task and
//! resolves to unit, a boolean, or a [`BridgeError`] carrying a stable code
//! and a human-readable message. Workers share no mutable state; callers
//! that need mutual exclusion on a destination must serialize requests
//! themselves. There is no cancellation once a request has started.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::ContainerKind;
use crate::Credential;
use crate::ExtractConfig;
use crate::ExtractError;
use crate::ExtractionEngine;
use crate::Quality;

/// Rejection delivered to the host: a machine code plus a message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct BridgeError {
    /// Stable error code, see [`ExtractError::code`].
    pub code: &'static str,
    /// Human-readable description.
    pub message: String,
}

impl From<ExtractError> for BridgeError {
    fn from(err: ExtractError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// Result type of bridge operations.
pub type BridgeResult<T> = std::result::Result<T, BridgeError>;

/// Async front end over [`ExtractionEngine`].
///
/// Must be used from within a tokio runtime.
#[derive(Debug, Clone, Default)]
pub struct Bridge {
    engine: Arc<ExtractionEngine>,
}

impl Bridge {
    /// Creates a bridge whose engine uses `config`.
    #[must_use]
    pub fn new(config: ExtractConfig) -> Self {
        Self {
            engine: Arc::new(ExtractionEngine::new(config)),
        }
    }

    async fn run<T, F>(&self, job: F) -> BridgeResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&ExtractionEngine) -> crate::Result<T> + Send + 'static,
    {
        let engine = Arc::clone(&self.engine);
        let outcome = tokio::task::spawn_blocking(move || job(&engine))
            .await
            .map_err(|err| ExtractError::Unknown {
                reason: format!("worker task failed: {err}"),
            })?;
        Ok(outcome?)
    }

    async fn probe(&self, kind: ContainerKind, source: PathBuf) -> BridgeResult<bool> {
        self.run(move |engine| engine.is_protected(kind, source))
            .await
    }

    async fn unpack(
        &self,
        kind: ContainerKind,
        source: PathBuf,
        destination: PathBuf,
        password: Option<String>,
    ) -> BridgeResult<()> {
        self.run(move |engine| {
            let credential = password.map(Credential::new);
            engine
                .extract(kind, source, destination, credential.as_ref())
                .map(drop)
        })
        .await
    }

    /// Reports whether a ZIP archive has encrypted members.
    ///
    /// # Errors
    ///
    /// Rejects with the engine's error code.
    pub async fn is_protected_zip(&self, source: impl Into<PathBuf>) -> BridgeResult<bool> {
        self.probe(ContainerKind::Zip, source.into()).await
    }

    /// Reports whether a RAR archive needs a password.
    ///
    /// # Errors
    ///
    /// Rejects with the engine's error code.
    pub async fn is_protected_rar(&self, source: impl Into<PathBuf>) -> BridgeResult<bool> {
        self.probe(ContainerKind::Rar, source.into()).await
    }

    /// Reports whether a PDF is encrypted or locked.
    ///
    /// # Errors
    ///
    /// Rejects with the engine's error code.
    pub async fn is_protected_pdf(&self, source: impl Into<PathBuf>) -> BridgeResult<bool> {
        self.probe(ContainerKind::Pdf, source.into()).await
    }

    /// Extracts an unencrypted ZIP archive.
    ///
    /// # Errors
    ///
    /// Rejects with the engine's error code.
    pub async fn extract_zip(
        &self,
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
    ) -> BridgeResult<()> {
        self.extract_zip_with_password(source, destination, None)
            .await
    }

    /// Extracts a ZIP archive, unlocking members with `password`.
    ///
    /// # Errors
    ///
    /// Rejects with the engine's error code.
    pub async fn extract_zip_with_password(
        &self,
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
        password: Option<String>,
    ) -> BridgeResult<()> {
        self.unpack(ContainerKind::Zip, source.into(), destination.into(), password)
            .await
    }

    /// Extracts an unencrypted RAR archive.
    ///
    /// # Errors
    ///
    /// Rejects with the engine's error code.
    pub async fn extract_rar(
        &self,
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
    ) -> BridgeResult<()> {
        self.extract_rar_with_password(source, destination, None)
            .await
    }

    /// Extracts a RAR archive with an optional password.
    ///
    /// # Errors
    ///
    /// Rejects with the engine's error code.
    pub async fn extract_rar_with_password(
        &self,
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
        password: Option<String>,
    ) -> BridgeResult<()> {
        self.unpack(ContainerKind::Rar, source.into(), destination.into(), password)
            .await
    }

    /// Extracts a 7z archive without a password.
    ///
    /// # Errors
    ///
    /// Rejects with the engine's error code.
    pub async fn extract_seven_zip(
        &self,
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
    ) -> BridgeResult<()> {
        self.extract_seven_zip_with_password(source, destination, None)
            .await
    }

    /// Extracts a 7z archive with an optional password.
    ///
    /// # Errors
    ///
    /// Rejects with the engine's error code.
    pub async fn extract_seven_zip_with_password(
        &self,
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
        password: Option<String>,
    ) -> BridgeResult<()> {
        self.unpack(
            ContainerKind::SevenZip,
            source.into(),
            destination.into(),
            password,
        )
        .await
    }

    /// Renders every page of an unlocked PDF to JPEG at full quality.
    ///
    /// # Errors
    ///
    /// Rejects with the engine's error code.
    pub async fn extract_pdf(
        &self,
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
    ) -> BridgeResult<()> {
        self.extract_pdf_with_password(source, destination, None)
            .await
    }

    /// Renders every page of a PDF to JPEG at full quality, unlocking it
    /// with `password` if given.
    ///
    /// # Errors
    ///
    /// Rejects with the engine's error code.
    pub async fn extract_pdf_with_password(
        &self,
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
        password: Option<String>,
    ) -> BridgeResult<()> {
        let source = source.into();
        let destination = destination.into();
        self.run(move |engine| {
            let credential = password.map(Credential::new);
            engine
                .extract_pdf(source, destination, Quality::MAX, credential.as_ref())
                .map(drop)
        })
        .await
    }
}
