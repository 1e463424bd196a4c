//! Common capability implemented by every container driver.

use crate::Credential;
use crate::ExtractionReport;
use crate::Result;
use crate::types::ContainerSource;
use crate::types::ExtractionTarget;

/// Probe-then-extract contract shared by all container formats.
///
/// Implementations hold no state between calls. Each call opens the
/// container, works through its members in enumeration order, and reports a
/// single outcome. Nothing is retried, and a failure part-way through leaves
/// already written members on disk.
pub trait Extractor {
    /// Returns the container format name.
    fn format_name(&self) -> &'static str;

    /// Reports whether reading the container requires a credential.
    ///
    /// Never writes anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the container cannot be opened, or `Unsupported`
    /// if the driver has no protection probe.
    fn is_protected(&self, source: &ContainerSource) -> Result<bool>;

    /// Writes every member of the container into `target`.
    ///
    /// Existing files in `target` are never overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error if decoding fails, the credential is missing or
    /// wrong, or a member would overwrite an existing file.
    fn extract(
        &self,
        source: &ContainerSource,
        target: &ExtractionTarget,
        credential: Option<&Credential>,
    ) -> Result<ExtractionReport>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct TestFormat;

    impl Extractor for TestFormat {
        fn format_name(&self) -> &'static str {
            "test"
        }

        fn is_protected(&self, _source: &ContainerSource) -> Result<bool> {
            Ok(false)
        }

        fn extract(
            &self,
            _source: &ContainerSource,
            _target: &ExtractionTarget,
            _credential: Option<&Credential>,
        ) -> Result<ExtractionReport> {
            Ok(ExtractionReport::new())
        }
    }

    #[test]
    fn test_trait_implementation() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("x.test");
        std::fs::write(&file, b"x").unwrap();
        let source = ContainerSource::resolve(&file).unwrap();

        let format = TestFormat;
        assert_eq!(format.format_name(), "test");
        assert!(!format.is_protected(&source).unwrap());
    }
}
