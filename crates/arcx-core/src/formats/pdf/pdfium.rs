//! Production PDF backend using a dynamically bound libpdfium.

use std::path::Path;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use image::DynamicImage;
use image::RgbImage;
use image::RgbaImage;
use pdfium_render::prelude::*;
use tracing::debug;

use crate::Credential;
use crate::ExtractError;
use crate::Result;
use crate::types::ContainerSource;

use super::PdfBackend;
use super::PdfDocumentPages;

/// libpdfium keeps global state, so at most one binding is alive at a time.
static PDFIUM_LOCK: Mutex<()> = Mutex::new(());

/// PDF backend bound to libpdfium for the lifetime of the value.
///
/// Holding a backend blocks other threads from binding their own, so keep
/// it for the duration of one call only.
pub struct PdfiumBackend {
    pdfium: Pdfium,
    _guard: MutexGuard<'static, ()>,
}

impl PdfiumBackend {
    /// Binds libpdfium.
    ///
    /// With `library_dir` set, the platform library name is loaded from that
    /// directory only. Otherwise the current directory is tried first, then
    /// the system library path.
    ///
    /// # Errors
    ///
    /// Returns `ExtractFailed` if the library cannot be loaded.
    pub fn bind(library_dir: Option<&Path>) -> Result<Self> {
        let guard = PDFIUM_LOCK.lock().unwrap_or_else(PoisonError::into_inner);

        let bindings = match library_dir {
            Some(dir) => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir)),
            None => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
                .or_else(|_| Pdfium::bind_to_system_library()),
        }
        .map_err(|err| ExtractError::failed(format!("failed to load pdfium library: {err:?}")))?;
        debug!(library_dir = ?library_dir, "bound pdfium");

        Ok(Self {
            pdfium: Pdfium::new(bindings),
            _guard: guard,
        })
    }
}

/// A document opened through [`PdfiumBackend`].
pub struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
}

fn is_password_error(err: &PdfiumError) -> bool {
    matches!(
        err,
        PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::PasswordError)
    )
}

fn not_a_document(source: &ContainerSource) -> ExtractError {
    ExtractError::SourceNotFound {
        path: source.as_path().to_path_buf(),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn points_to_pixels(points: f32) -> Pixels {
    (points.round() as Pixels).max(1)
}

impl PdfBackend for PdfiumBackend {
    type Document<'a>
        = PdfiumDocument<'a>
    where
        Self: 'a;

    fn open<'a>(
        &'a self,
        source: &ContainerSource,
        credential: Option<&'a Credential>,
    ) -> Result<Self::Document<'a>> {
        let document = self
            .pdfium
            .load_pdf_from_file(source.as_path(), credential.map(Credential::expose))
            .map_err(|err| {
                if is_password_error(&err) {
                    ExtractError::from(err)
                } else {
                    not_a_document(source)
                }
            })?;
        Ok(PdfiumDocument { document })
    }

    fn is_protected(&self, source: &ContainerSource) -> Result<bool> {
        match self.pdfium.load_pdf_from_file(source.as_path(), None) {
            Ok(document) => {
                let revision = document.permissions().security_handler_revision()?;
                Ok(!matches!(revision, PdfSecurityHandlerRevision::Unprotected))
            }
            Err(err) if is_password_error(&err) => Ok(true),
            Err(_) => Err(not_a_document(source)),
        }
    }
}

impl PdfDocumentPages for PdfiumDocument<'_> {
    fn page_count(&self) -> usize {
        usize::from(self.document.pages().len())
    }

    fn render_page(&self, index: usize) -> Result<RgbImage> {
        let index = PdfPageIndex::try_from(index)
            .map_err(|_| ExtractError::failed(format!("page index {index} out of range")))?;
        let page = self.document.pages().get(index)?;

        let config = PdfRenderConfig::new()
            .set_target_width(points_to_pixels(page.width().value))
            .set_target_height(points_to_pixels(page.height().value));
        let bitmap = page.render_with_config(&config)?;

        let width = u32::try_from(bitmap.width())
            .map_err(|_| ExtractError::failed("rendered bitmap has invalid width"))?;
        let height = u32::try_from(bitmap.height())
            .map_err(|_| ExtractError::failed("rendered bitmap has invalid height"))?;
        let rgba = RgbaImage::from_raw(width, height, bitmap.as_rgba_bytes())
            .ok_or_else(|| ExtractError::failed("rendered bitmap has unexpected size"))?;

        Ok(DynamicImage::ImageRgba8(rgba).to_rgb8())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_points_to_pixels() {
        assert_eq!(points_to_pixels(612.0), 612);
        assert_eq!(points_to_pixels(841.89), 842);
        assert_eq!(points_to_pixels(0.2), 1);
    }

    #[test]
    fn test_password_error_classification() {
        let err = PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::PasswordError);
        assert!(is_password_error(&err));
        assert!(ExtractError::from(err).is_credential_error());

        let err = PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::FormatError);
        assert!(!is_password_error(&err));
    }

    fn fixture(name: &str) -> ContainerSource {
        ContainerSource::resolve(
            Path::new(env!("CARGO_MANIFEST_DIR"))
                .join("tests/fixtures")
                .join(name),
        )
        .unwrap()
    }

    #[test]
    #[ignore = "requires libpdfium"]
    fn test_locked_document_is_protected() {
        let backend = PdfiumBackend::bind(None).unwrap();
        let source = fixture("user_password.pdf");

        assert!(backend.is_protected(&source).unwrap());
        assert!(backend.open(&source, None).is_err());
    }

    #[test]
    #[ignore = "requires libpdfium"]
    fn test_owner_encrypted_document_is_protected_without_being_locked() {
        let backend = PdfiumBackend::bind(None).unwrap();
        let source = fixture("owner_password.pdf");

        assert!(backend.is_protected(&source).unwrap());
        assert_eq!(backend.open(&source, None).unwrap().page_count(), 1);
    }
}
