pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{JsonContractSource, StaticContractSource};
pub use config::{cli::LocalStorage, toml_config::TomlConfig, BuildOverrides, BuildSettings};
pub use core::builder::{
    build_nested_zip, bundle_archives, BuildOptions, BuildReport, EntrySummary, NestedZipBuilder,
    PLACEHOLDER_CONTENT,
};
pub use core::engine::{NestedZipEngine, RunSummary};
pub use domain::model::{ArchiveBundle, Contract, FileData};
pub use utils::error::{NestedZipError, Result};
