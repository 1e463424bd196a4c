//! Validated wrappers for the paths an extraction call works on.
//!
//! Both types are built once per call, at the engine boundary, and dropped
//! when the call ends.

pub mod source;
pub mod target;

pub use source::ContainerSource;
pub use target::ExtractionTarget;
