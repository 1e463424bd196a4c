//! PDF rasterization: every page becomes `{index}.jpg` in the target.
//!
//! Page output files are checked up front. If any `{index}.jpg` for the
//! document's page range already exists the call fails with
//! [`ExtractError::DestinationExists`] before a single page is written.
//! Pages are then rendered, encoded and written strictly in index order; a
//! failure stops the loop and leaves earlier pages on disk.

mod pdfium;

use std::fs::OpenOptions;
use std::io::BufWriter;
use std::io::ErrorKind;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;
use tracing::debug;
use tracing::trace;
use tracing::warn;

pub use pdfium::PdfiumBackend;
pub use pdfium::PdfiumDocument;

use crate::Credential;
use crate::ExtractError;
use crate::ExtractionReport;
use crate::Quality;
use crate::Result;
use crate::types::ContainerSource;
use crate::types::ExtractionTarget;

use super::traits::Extractor;

/// A loaded document whose pages can be rendered one at a time.
pub trait PdfDocumentPages {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Renders page `index` at its intrinsic size.
    ///
    /// # Errors
    ///
    /// Returns `ExtractFailed` if the page cannot be read or rendered.
    fn render_page(&self, index: usize) -> Result<RgbImage>;
}

/// Loads PDF documents for the rasterizer.
pub trait PdfBackend {
    /// Document handle, possibly borrowing the backend.
    type Document<'a>: PdfDocumentPages
    where
        Self: 'a;

    /// Opens `source`, unlocking it with `credential` when one is given.
    ///
    /// # Errors
    ///
    /// Returns `SourceNotFound` if the file is not a loadable PDF, or
    /// `ExtractFailed` if the document is locked and the credential is
    /// missing or wrong.
    fn open<'a>(
        &'a self,
        source: &ContainerSource,
        credential: Option<&'a Credential>,
    ) -> Result<Self::Document<'a>>;

    /// Reports whether the document is encrypted or currently locked.
    ///
    /// Never attempts to unlock the document.
    ///
    /// # Errors
    ///
    /// Returns `SourceNotFound` if the file is not a loadable PDF.
    fn is_protected(&self, source: &ContainerSource) -> Result<bool>;
}

/// Renders PDF pages to JPEG files.
#[derive(Debug, Clone)]
pub struct PdfRasterizer<B> {
    backend: B,
    quality: Quality,
}

impl<B: PdfBackend> PdfRasterizer<B> {
    /// Creates a rasterizer that encodes pages at `quality`.
    #[must_use]
    pub const fn new(backend: B, quality: Quality) -> Self {
        Self { backend, quality }
    }

    /// Returns the default encoding quality.
    #[must_use]
    pub const fn quality(&self) -> Quality {
        self.quality
    }

    /// Returns the document backend.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Renders every page of `source` to `{index}.jpg` under `target`.
    ///
    /// # Errors
    ///
    /// - `SourceNotFound` if the document cannot be loaded
    /// - `DestinationExists` if any page file already exists (nothing is
    ///   written in that case)
    /// - `ExtractFailed` if unlocking, rendering, encoding or writing fails
    pub fn rasterize(
        &self,
        source: &ContainerSource,
        target: &ExtractionTarget,
        quality: Quality,
        credential: Option<&Credential>,
    ) -> Result<ExtractionReport> {
        let start = Instant::now();

        let document = match self.backend.open(source, credential) {
            Ok(document) => document,
            Err(err) => {
                if credential.is_some() && err.is_credential_error() {
                    warn!(source = source.encoded(), "could not unlock document");
                }
                return Err(err);
            }
        };
        let page_count = document.page_count();
        debug!(
            source = source.encoded(),
            format = "pdf",
            pages = page_count,
            "opened container"
        );

        let planned: Vec<PathBuf> = (0..page_count)
            .map(|index| target.join_file(&page_file_name(index)))
            .collect();
        if let Some(existing) = planned
            .iter()
            .find(|path| std::fs::symlink_metadata(path).is_ok())
        {
            return Err(ExtractError::DestinationExists {
                path: existing.clone(),
            });
        }

        let mut report = ExtractionReport::new();
        for (index, path) in planned.iter().enumerate() {
            trace!(page = index, "rendering page");
            let image = document.render_page(index)?;
            report.bytes_written += write_jpeg(&image, path, quality)?;
            report.pages_rendered += 1;
        }

        report.duration = start.elapsed();
        debug!(
            pages = report.pages_rendered,
            bytes = report.bytes_written,
            "rasterized document"
        );
        Ok(report)
    }
}

impl<B: PdfBackend> Extractor for PdfRasterizer<B> {
    fn format_name(&self) -> &'static str {
        "pdf"
    }

    fn is_protected(&self, source: &ContainerSource) -> Result<bool> {
        self.backend.is_protected(source)
    }

    fn extract(
        &self,
        source: &ContainerSource,
        target: &ExtractionTarget,
        credential: Option<&Credential>,
    ) -> Result<ExtractionReport> {
        self.rasterize(source, target, self.quality, credential)
    }
}

/// Output file name for a zero-based page index.
#[must_use]
pub fn page_file_name(index: usize) -> String {
    format!("{index}.jpg")
}

fn write_jpeg(image: &RgbImage, path: &Path, quality: Quality) -> Result<u64> {
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|err| match err.kind() {
            ErrorKind::AlreadyExists => ExtractError::DestinationExists {
                path: path.to_path_buf(),
            },
            _ => err.into(),
        })?;

    let mut writer = BufWriter::new(file);
    JpegEncoder::new_with_quality(&mut writer, quality.get()).encode_image(image)?;
    writer.flush()?;

    Ok(std::fs::metadata(path)?.len())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use image::Rgb;
    use tempfile::TempDir;

    /// In-memory backend producing solid-colour pages.
    struct FakeBackend {
        pages: usize,
        fail_at: Option<usize>,
        password: Option<&'static str>,
    }

    struct FakeDocument {
        pages: usize,
        fail_at: Option<usize>,
    }

    impl PdfDocumentPages for FakeDocument {
        fn page_count(&self) -> usize {
            self.pages
        }

        fn render_page(&self, index: usize) -> Result<RgbImage> {
            if self.fail_at == Some(index) {
                return Err(ExtractError::failed(format!("page {index} is damaged")));
            }
            Ok(RgbImage::from_pixel(8, 11, Rgb([200, 100, 50])))
        }
    }

    impl PdfBackend for FakeBackend {
        type Document<'a>
            = FakeDocument
        where
            Self: 'a;

        fn open<'a>(
            &'a self,
            _source: &ContainerSource,
            credential: Option<&'a Credential>,
        ) -> Result<Self::Document<'a>> {
            if let Some(password) = self.password
                && credential.map(Credential::expose) != Some(password)
            {
                return Err(ExtractError::credential("document is locked"));
            }
            Ok(FakeDocument {
                pages: self.pages,
                fail_at: self.fail_at,
            })
        }

        fn is_protected(&self, _source: &ContainerSource) -> Result<bool> {
            Ok(self.password.is_some())
        }
    }

    fn rasterizer(pages: usize) -> PdfRasterizer<FakeBackend> {
        PdfRasterizer::new(
            FakeBackend {
                pages,
                fail_at: None,
                password: None,
            },
            Quality::MAX,
        )
    }

    fn setup() -> (TempDir, ContainerSource, ExtractionTarget) {
        let temp = TempDir::new().expect("failed to create temp dir");
        let pdf = temp.path().join("doc.pdf");
        std::fs::write(&pdf, b"%PDF-1.7").unwrap();
        let source = ContainerSource::resolve(&pdf).unwrap();
        let target = ExtractionTarget::prepare(temp.path().join("pages")).unwrap();
        (temp, source, target)
    }

    fn listing(target: &ExtractionTarget) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(target.as_path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_pages_written_in_order() {
        let (_temp, source, target) = setup();
        let quality = Quality::new(90).unwrap();

        let report = rasterizer(3)
            .rasterize(&source, &target, quality, None)
            .unwrap();

        assert_eq!(report.pages_rendered, 3);
        assert_eq!(listing(&target), ["0.jpg", "1.jpg", "2.jpg"]);
        for name in ["0.jpg", "1.jpg", "2.jpg"] {
            let bytes = std::fs::read(target.join_file(name)).unwrap();
            assert!(bytes.starts_with(&[0xFF, 0xD8]), "{name} is not a jpeg");
        }
    }

    #[test]
    fn test_preflight_collision_writes_nothing() {
        let (_temp, source, target) = setup();
        std::fs::write(target.join_file("2.jpg"), b"existing").unwrap();

        let err = rasterizer(5)
            .rasterize(&source, &target, Quality::MAX, None)
            .unwrap_err();

        assert!(matches!(
            err,
            ExtractError::DestinationExists { ref path } if path.ends_with("2.jpg")
        ));
        assert_eq!(listing(&target), ["2.jpg"]);
        assert_eq!(std::fs::read(target.join_file("2.jpg")).unwrap(), b"existing");
    }

    #[test]
    fn test_files_beyond_page_range_are_not_collisions() {
        let (_temp, source, target) = setup();
        std::fs::write(target.join_file("3.jpg"), b"unrelated").unwrap();

        rasterizer(3)
            .rasterize(&source, &target, Quality::MAX, None)
            .unwrap();
        assert_eq!(listing(&target), ["0.jpg", "1.jpg", "2.jpg", "3.jpg"]);
    }

    #[test]
    fn test_mid_loop_failure_keeps_earlier_pages() {
        let (_temp, source, target) = setup();
        let rasterizer = PdfRasterizer::new(
            FakeBackend {
                pages: 4,
                fail_at: Some(2),
                password: None,
            },
            Quality::MAX,
        );

        let err = rasterizer.extract(&source, &target, None).unwrap_err();

        assert!(matches!(err, ExtractError::ExtractFailed { .. }));
        assert_eq!(listing(&target), ["0.jpg", "1.jpg"]);
    }

    #[test]
    fn test_locked_document_requires_credential() {
        let (_temp, source, target) = setup();
        let rasterizer = PdfRasterizer::new(
            FakeBackend {
                pages: 1,
                fail_at: None,
                password: Some("open sesame"),
            },
            Quality::MAX,
        );

        assert!(rasterizer.is_protected(&source).unwrap());

        let err = rasterizer.extract(&source, &target, None).unwrap_err();
        assert!(err.is_credential_error());

        let wrong = Credential::new("nope");
        assert!(rasterizer.extract(&source, &target, Some(&wrong)).is_err());
        assert!(listing(&target).is_empty());

        let right = Credential::new("open sesame");
        rasterizer.extract(&source, &target, Some(&right)).unwrap();
        assert_eq!(listing(&target), ["0.jpg"]);
    }

    #[test]
    fn test_lower_quality_gives_smaller_output() {
        let temp = TempDir::new().unwrap();
        let image = RgbImage::from_fn(64, 64, |x, y| {
            Rgb([(x * 4) as u8, (y * 4) as u8, ((x ^ y) * 4) as u8])
        });
        let high = temp.path().join("high.jpg");
        let low = temp.path().join("low.jpg");

        let high_len = write_jpeg(&image, &high, Quality::MAX).unwrap();
        let low_len = write_jpeg(&image, &low, Quality::new(10).unwrap()).unwrap();

        assert!(low_len < high_len);
    }

    #[test]
    fn test_page_file_name() {
        assert_eq!(page_file_name(0), "0.jpg");
        assert_eq!(page_file_name(12), "12.jpg");
    }
}
