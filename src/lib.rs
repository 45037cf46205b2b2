//! LPM (Liquibase Package Manager)
//!
//! Installs Liquibase extensions and JDBC drivers into a classpath, choosing
//! versions that match the detected Liquibase installation. Shared building
//! blocks come from `lpm-core`.

pub use lpm_core::{LpmError, LpmResult, Version};

/// Core module re-exported from lpm-core.
pub mod core;

/// Configuration management.
pub mod config;

/// Dependency injection infrastructure.
pub mod di;

/// Liquibase installation detection.
pub mod host;

/// Package model, catalog, classpath and dependency manifest.
pub mod package;

/// Version resolution and install/remove/upgrade orchestration.
pub mod resolver;
