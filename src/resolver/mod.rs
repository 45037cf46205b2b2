//! Package resolution: version selection against the host, classpath state
//! and the install / remove / upgrade actions that follow from them.

pub mod engine;
pub mod session;

pub use engine::{DedupeReport, ItemOutcome, ResolutionEngine, Upgrade};
pub use session::{open, refresh_local_catalog, ClasspathScope};
