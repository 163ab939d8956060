pub mod cli;
pub mod toml_config;

use crate::core::builder::BuildOptions;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_required_field, Validate};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};

pub const DEFAULT_OUTPUT_PATH: &str = "Main.zip";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "nested-zip")]
#[command(about = "Packs contracts into a ZIP of per-contract ZIP archives")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Build one inner archive per contract from a JSON contract list
    Build(BuildArgs),
    /// Store existing archive files as entries of a container archive
    Bundle(BundleArgs),
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct BuildArgs {
    /// JSON file holding an array of contracts
    #[arg(short, long)]
    pub input: Option<String>,

    /// Output archive path (default: Main.zip)
    #[arg(short, long)]
    pub output: Option<String>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Use fixed entry timestamps for reproducible output
    #[arg(long)]
    pub deterministic: bool,
}

#[cfg(feature = "cli")]
impl BuildArgs {
    pub fn overrides(&self) -> BuildOverrides {
        BuildOverrides {
            input_path: self.input.clone(),
            output_path: self.output.clone(),
            deterministic: self.deterministic.then_some(true),
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct BundleArgs {
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: String,

    /// Use fixed entry timestamps for reproducible output
    #[arg(long)]
    pub deterministic: bool,

    /// Archive files to store; each entry is named after its file name
    #[arg(required = true)]
    pub archives: Vec<String>,
}

/// Values given on the command line; they win over the configuration file.
#[derive(Debug, Clone, Default)]
pub struct BuildOverrides {
    pub input_path: Option<String>,
    pub output_path: Option<String>,
    pub deterministic: Option<bool>,
}

/// Effective settings for one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSettings {
    pub input_path: String,
    pub output_path: String,
    pub deterministic: bool,
}

impl BuildSettings {
    pub fn resolve(file: Option<&TomlConfig>, overrides: BuildOverrides) -> Result<Self> {
        let file = file.cloned().unwrap_or_default();

        let input_path = overrides.input_path.or(file.input.path);
        let input_path = validate_required_field("input.path", &input_path)?.clone();

        let output_path = overrides
            .output_path
            .or(file.output.path)
            .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string());

        let deterministic = overrides
            .deterministic
            .or(file.output.deterministic)
            .unwrap_or(false);

        let settings = Self {
            input_path,
            output_path,
            deterministic,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            deterministic: self.deterministic,
        }
    }
}

impl Validate for BuildSettings {
    fn validate(&self) -> Result<()> {
        validate_path("input.path", &self.input_path)?;
        validate_path("output.path", &self.output_path)
    }
}
