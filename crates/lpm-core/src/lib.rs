//! Core building blocks shared by the LPM crates: the error taxonomy,
//! semantic versions and platform paths.

pub mod core;

pub use core::error::{LpmError, LpmResult};
pub use core::version::Version;
