use anyhow::Context;
use clap::Parser;
use nested_zip::config::{BuildArgs, BundleArgs, Command};
use nested_zip::utils::logger::{self, LogFormat};
use nested_zip::utils::validation::{validate_path, Validate};
use nested_zip::{
    ArchiveBundle, BuildOptions, BuildSettings, CliConfig, JsonContractSource, LocalStorage,
    NestedZipBuilder, NestedZipEngine, NestedZipError, TomlConfig,
};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    let file_config = match &config.command {
        Command::Build(args) => match &args.config {
            Some(path) => Some(
                TomlConfig::from_file(path)
                    .with_context(|| format!("Failed to load config file '{}'", path))?,
            ),
            None => None,
        },
        Command::Bundle(_) => None,
    };

    let verbose = config.verbose || file_config.as_ref().is_some_and(|c| c.verbose());
    let format = if config.log_json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(verbose, format);

    tracing::info!("Starting nested-zip");
    tracing::debug!("CLI config: {:?}", config);

    let result = match &config.command {
        Command::Build(args) => run_build(args, file_config.as_ref()),
        Command::Bundle(args) => run_bundle(args),
    };

    if let Err(e) = result {
        tracing::error!("❌ Build failed: {} (Category: {:?})", e, e.category());
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    Ok(())
}

fn run_build(args: &BuildArgs, file_config: Option<&TomlConfig>) -> nested_zip::Result<()> {
    if let Some(file_config) = file_config {
        file_config.validate()?;
    }
    let settings = BuildSettings::resolve(file_config, args.overrides())?;

    let source = JsonContractSource::new(&settings.input_path);
    let storage = LocalStorage::new(".".to_string());
    let engine = NestedZipEngine::new(
        source,
        storage,
        NestedZipBuilder::new(settings.build_options()),
    );

    let summary = engine.run(&settings.output_path)?;
    println!("✅ Packed {} contracts", summary.report.entry_count());
    println!("📁 Output saved to: {}", summary.output_location);
    Ok(())
}

fn run_bundle(args: &BundleArgs) -> nested_zip::Result<()> {
    validate_path("output", &args.output)?;

    let mut bundles = Vec::with_capacity(args.archives.len());
    for archive in &args.archives {
        let file_name = Path::new(archive)
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| NestedZipError::InvalidConfigValueError {
                field: "archives".to_string(),
                value: archive.clone(),
                reason: "Path has no file name".to_string(),
            })?;
        let data = std::fs::read(archive).map_err(|source| NestedZipError::InputError {
            path: archive.clone(),
            source,
        })?;
        bundles.push(ArchiveBundle::new(file_name, data));
    }

    let builder = NestedZipBuilder::new(BuildOptions {
        deterministic: args.deterministic,
    });
    let report = builder.bundle_file(&args.output, &bundles)?;
    println!("✅ Bundled {} archives", report.entry_count());
    println!("📁 Output saved to: {}", args.output);
    Ok(())
}
