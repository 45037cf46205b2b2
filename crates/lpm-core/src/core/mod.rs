pub mod error;
pub mod path;
pub mod version;

pub use error::{LpmError, LpmResult};
