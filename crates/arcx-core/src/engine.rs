//! Extraction engine: resolves paths, selects a driver and runs it.

use std::path::Path;

use tracing::info;

use crate::Credential;
use crate::ExtractConfig;
use crate::ExtractionReport;
use crate::Quality;
use crate::Result;
use crate::formats::ContainerKind;
use crate::formats::Extractor;
use crate::formats::PdfRasterizer;
use crate::formats::RarExtractor;
use crate::formats::SevenZipExtractor;
use crate::formats::ZipExtractor;
use crate::formats::pdf::PdfiumBackend;
use crate::types::ContainerSource;
use crate::types::ExtractionTarget;

/// Closed set of container drivers.
pub enum Driver {
    /// ZIP driver.
    Zip(ZipExtractor),
    /// RAR driver.
    Rar(RarExtractor),
    /// 7z driver.
    SevenZip(SevenZipExtractor),
    /// PDF rasterizer bound to libpdfium.
    Pdf(PdfRasterizer<PdfiumBackend>),
}

impl Extractor for Driver {
    fn format_name(&self) -> &'static str {
        match self {
            Self::Zip(d) => d.format_name(),
            Self::Rar(d) => d.format_name(),
            Self::SevenZip(d) => d.format_name(),
            Self::Pdf(d) => d.format_name(),
        }
    }

    fn is_protected(&self, source: &ContainerSource) -> Result<bool> {
        match self {
            Self::Zip(d) => d.is_protected(source),
            Self::Rar(d) => d.is_protected(source),
            Self::SevenZip(d) => d.is_protected(source),
            Self::Pdf(d) => d.is_protected(source),
        }
    }

    fn extract(
        &self,
        source: &ContainerSource,
        target: &ExtractionTarget,
        credential: Option<&Credential>,
    ) -> Result<ExtractionReport> {
        match self {
            Self::Zip(d) => d.extract(source, target, credential),
            Self::Rar(d) => d.extract(source, target, credential),
            Self::SevenZip(d) => d.extract(source, target, credential),
            Self::Pdf(d) => d.extract(source, target, credential),
        }
    }
}

/// Stateless entry point for probing and extracting containers.
///
/// Every call resolves its own source and target and builds a fresh driver,
/// so one engine can serve concurrent calls on different threads.
///
/// # Examples
///
/// ```no_run
/// use arcx_core::ContainerKind;
/// use arcx_core::ExtractionEngine;
///
/// # fn main() -> Result<(), arcx_core::ExtractError> {
/// let engine = ExtractionEngine::default();
/// if !engine.is_protected(ContainerKind::Zip, "bundle.zip")? {
///     let report = engine.extract(ContainerKind::Zip, "bundle.zip", "out", None)?;
///     println!("{} files", report.files_extracted);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExtractionEngine {
    config: ExtractConfig,
}

impl ExtractionEngine {
    /// Creates an engine with the given configuration.
    #[must_use]
    pub const fn new(config: ExtractConfig) -> Self {
        Self { config }
    }

    /// Returns the engine configuration.
    #[must_use]
    pub const fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Builds the driver for `kind`.
    ///
    /// # Errors
    ///
    /// Returns an error if the PDF backend library cannot be loaded.
    pub fn driver(&self, kind: ContainerKind) -> Result<Driver> {
        Ok(match kind {
            ContainerKind::Zip => Driver::Zip(ZipExtractor::new(self.config.preserve_permissions)),
            ContainerKind::Rar => Driver::Rar(RarExtractor::new()),
            ContainerKind::SevenZip => Driver::SevenZip(SevenZipExtractor::new()),
            ContainerKind::Pdf => Driver::Pdf(self.pdf_rasterizer(self.config.pdf_quality)?),
        })
    }

    fn pdf_rasterizer(&self, quality: Quality) -> Result<PdfRasterizer<PdfiumBackend>> {
        let backend = PdfiumBackend::bind(self.config.pdfium_library.as_deref())?;
        Ok(PdfRasterizer::new(backend, quality))
    }

    /// Detects the container kind of `source`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` or `SourceNotFound` for a bad source, or
    /// `ExtractFailed` if the format is not recognized.
    pub fn detect(&self, source: impl AsRef<Path>) -> Result<ContainerKind> {
        ContainerKind::detect(&ContainerSource::resolve(source)?)
    }

    /// Reports whether `source` needs a credential.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` or `SourceNotFound` for a bad source,
    /// `Unsupported` for 7z, or the driver's error if the container cannot
    /// be read.
    pub fn is_protected(&self, kind: ContainerKind, source: impl AsRef<Path>) -> Result<bool> {
        let source = ContainerSource::resolve(source)?;
        let protected = self.driver(kind)?.is_protected(&source)?;
        info!(source = source.encoded(), format = kind.name(), protected, "probed container");
        Ok(protected)
    }

    /// Extracts every member of `source` into `destination`.
    ///
    /// PDFs are rendered at the configured quality.
    ///
    /// # Errors
    ///
    /// Returns an error if either path is invalid, the container cannot be
    /// decoded, the credential is missing or wrong, or an output file
    /// already exists.
    pub fn extract(
        &self,
        kind: ContainerKind,
        source: impl AsRef<Path>,
        destination: impl AsRef<Path>,
        credential: Option<&Credential>,
    ) -> Result<ExtractionReport> {
        let source = ContainerSource::resolve(source)?;
        let driver = self.driver(kind)?;
        let target = ExtractionTarget::prepare(destination)?;
        let report = driver.extract(&source, &target, credential)?;
        log_completion(kind, &target, &report);
        Ok(report)
    }

    /// Renders every page of a PDF at an explicit `quality`.
    ///
    /// # Errors
    ///
    /// See [`PdfRasterizer::rasterize`].
    pub fn extract_pdf(
        &self,
        source: impl AsRef<Path>,
        destination: impl AsRef<Path>,
        quality: Quality,
        credential: Option<&Credential>,
    ) -> Result<ExtractionReport> {
        let source = ContainerSource::resolve(source)?;
        let rasterizer = self.pdf_rasterizer(quality)?;
        let target = ExtractionTarget::prepare(destination)?;
        let report = rasterizer.rasterize(&source, &target, quality, credential)?;
        log_completion(ContainerKind::Pdf, &target, &report);
        Ok(report)
    }
}

fn log_completion(kind: ContainerKind, target: &ExtractionTarget, report: &ExtractionReport) {
    info!(
        format = kind.name(),
        destination = target.encoded(),
        files = report.files_extracted,
        directories = report.directories_created,
        pages = report.pages_rendered,
        bytes = report.bytes_written,
        duration_ms = u64::try_from(report.duration.as_millis()).unwrap_or(u64::MAX),
        "extraction complete"
    );
}
