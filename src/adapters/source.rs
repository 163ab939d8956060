use crate::core::{Contract, ContractSource};
use crate::utils::error::{NestedZipError, Result};
use std::path::{Path, PathBuf};

/// Reads a JSON array of contracts, in the shape the contracts API returns.
#[derive(Debug, Clone)]
pub struct JsonContractSource {
    path: PathBuf,
}

impl JsonContractSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn parse(content: &str) -> Result<Vec<Contract>> {
        Ok(serde_json::from_str(content)?)
    }
}

impl ContractSource for JsonContractSource {
    fn contracts(&self) -> Result<Vec<Contract>> {
        tracing::debug!("Reading contracts from {}", self.path.display());
        let content =
            std::fs::read_to_string(&self.path).map_err(|source| NestedZipError::InputError {
                path: self.path.display().to_string(),
                source,
            })?;
        Self::parse(&content)
    }
}

/// Contracts already held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticContractSource {
    contracts: Vec<Contract>,
}

impl StaticContractSource {
    pub fn new(contracts: Vec<Contract>) -> Self {
        Self { contracts }
    }
}

impl ContractSource for StaticContractSource {
    fn contracts(&self) -> Result<Vec<Contract>> {
        Ok(self.contracts.clone())
    }
}
