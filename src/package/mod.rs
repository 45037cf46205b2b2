pub mod catalog;
pub mod checksum;
pub mod classpath;
pub mod dependency;
pub mod fetcher;
pub mod manifest;
pub mod model;

pub use catalog::PackageCatalog;
pub use checksum::{ChecksumAlgorithm, ChecksumVerifier};
pub use classpath::ClasspathStore;
pub use dependency::{DependencyList, DependencyRecord, PackageSpec};
pub use fetcher::HttpFetcher;
pub use manifest::DependencyManifest;
pub use model::{Category, Package, PackageVersion};
