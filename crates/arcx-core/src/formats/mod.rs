//! Container format drivers.

pub(crate) mod common;
pub mod detect;
pub mod pdf;
pub mod rar;
pub mod sevenz;
pub mod traits;
pub mod zip;

// Re-export main types for convenience
pub use detect::ContainerKind;
pub use pdf::PdfRasterizer;
pub use rar::RarExtractor;
pub use sevenz::SevenZipExtractor;
pub use traits::Extractor;
pub use zip::ZipExtractor;
