//! Core module re-exports.
//!
//! Core functionality lives in `lpm-core`. It is re-exported here so the
//! rest of the crate can refer to `crate::core::...`.

pub use lpm_core::core::*;
pub use lpm_core::Version;
