//! Password-aware extraction for ZIP, RAR and 7z archives, and page
//! rasterization for PDF documents.
//!
//! `arcx-core` probes containers for protection and extracts them into a
//! destination directory. Archive members keep their relative paths; PDF
//! pages become `0.jpg`, `1.jpg`, ... Existing files are never overwritten.
//!
//! # Examples
//!
//! ```no_run
//! use arcx_core::ContainerKind;
//! use arcx_core::Credential;
//! use arcx_core::ExtractionEngine;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = ExtractionEngine::default();
//! let credential = Credential::new("secret");
//! let report = engine.extract(ContainerKind::Zip, "archive.zip", "/output/dir", Some(&credential))?;
//! println!("Extracted {} files", report.files_extracted);
//! # Ok(())
//! # }
//! ```
//!
//! Async hosts go through [`bridge::Bridge`], which runs every request on a
//! blocking worker task.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod bridge;
pub mod config;
pub mod credential;
pub mod engine;
pub mod error;
pub mod formats;
pub mod path;
pub mod report;
pub mod types;

// Re-export main API types
pub use api::extract_archive;
pub use api::is_protected;
pub use config::ExtractConfig;
pub use config::Quality;
pub use credential::Credential;
pub use engine::Driver;
pub use engine::ExtractionEngine;
pub use error::ExtractError;
pub use error::FailureCause;
pub use error::Result;
pub use formats::ContainerKind;
pub use formats::Extractor;
pub use path::EncodedPath;
pub use path::PathCodec;
pub use report::ExtractionReport;

// Re-export types module for easier access
pub use types::ContainerSource;
pub use types::ExtractionTarget;
