use crate::core::builder::{BuildReport, NestedZipBuilder};
use crate::core::{ContractSource, Storage};
use crate::utils::error::Result;
use crate::utils::validation::lint_contracts;

/// Outcome of one engine run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_location: String,
    pub report: BuildReport,
}

pub struct NestedZipEngine<S: ContractSource, St: Storage> {
    source: S,
    storage: St,
    builder: NestedZipBuilder,
}

impl<S: ContractSource, St: Storage> NestedZipEngine<S, St> {
    pub fn new(source: S, storage: St, builder: NestedZipBuilder) -> Self {
        Self {
            source,
            storage,
            builder,
        }
    }

    pub fn run(&self, output_name: &str) -> Result<RunSummary> {
        tracing::info!("Loading contracts...");
        let contracts = self.source.contracts()?;
        tracing::info!("Loaded {} contracts", contracts.len());

        for finding in lint_contracts(&contracts) {
            tracing::warn!("{}", finding);
        }

        let output_location = self.storage.location(output_name);
        tracing::info!("Building {}...", output_location);

        let writer = self.storage.create(output_name)?;
        let (writer, report) = self.builder.build_into(writer, &contracts)?;
        self.storage.finalize(writer)?;

        tracing::info!(
            "Wrote {} archives containing {} files to {}",
            report.entry_count(),
            report.total_files(),
            output_location
        );

        Ok(RunSummary {
            output_location,
            report,
        })
    }
}
