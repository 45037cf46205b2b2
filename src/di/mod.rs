//! Dependency injection infrastructure for LPM
//!
//! Services reach their collaborators through the traits in [`traits`], so
//! tests can swap in the in-memory fakes from [`mocks`].
//!
//! # Example (Production)
//! ```no_run
//! use lpm::di::ServiceContainer;
//!
//! # fn example() -> lpm::core::LpmResult<()> {
//! let container = ServiceContainer::new()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example (Testing)
//! ```
//! use lpm::di::{ServiceContainer, mocks::*};
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! # fn example() -> lpm::core::LpmResult<()> {
//! let config = Arc::new(MockConfigProvider::default());
//! let fetcher = Arc::new(MockArtifactFetcher::new());
//! let host = Arc::new(StaticHostDetector::new(PathBuf::from("/opt/liquibase"), "4.25.0")?);
//!
//! let container = ServiceContainer::with_providers(config, fetcher, host);
//! # Ok(())
//! # }
//! ```

pub mod container;
pub mod mocks;
pub mod traits;

// Re-export key types
pub use container::ServiceContainer;
pub use traits::{ArtifactFetcher, ConfigProvider, HostDetector, ManifestStore, Presenter};
