use crate::domain::model::Contract;
use crate::utils::error::{NestedZipError, Result};
use std::collections::HashSet;
use std::fmt;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(NestedZipError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(NestedZipError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| NestedZipError::MissingConfigError {
            field: field_name.to_string(),
        })
}

/// Something about the input that will produce surprising output.
///
/// Findings are advisory: the builder accepts every input and writes names
/// exactly as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintFinding {
    EmptyNamePart { contract_id: String },
    DuplicateEntryName { entry_name: String },
    UnsafeFilename { entry_name: String, filename: String },
}

impl fmt::Display for LintFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintFinding::EmptyNamePart { contract_id } => write!(
                f,
                "Contract {} has an empty number or sequence",
                contract_id
            ),
            LintFinding::DuplicateEntryName { entry_name } => {
                write!(f, "Entry name {} is produced by more than one contract", entry_name)
            }
            LintFinding::UnsafeFilename {
                entry_name,
                filename,
            } => write!(
                f,
                "Filename {:?} in {} is not safe to extract",
                filename, entry_name
            ),
        }
    }
}

fn is_unsafe_filename(filename: &str) -> bool {
    filename.starts_with('/')
        || filename.contains('\\')
        || filename.split('/').any(|segment| segment == "..")
}

pub fn lint_contracts(contracts: &[Contract]) -> Vec<LintFinding> {
    let mut findings = Vec::new();
    let mut seen = HashSet::new();

    for contract in contracts {
        let entry_name = contract.outer_entry_name();

        if contract.contract_no.is_empty() || contract.contract_sequence.is_empty() {
            findings.push(LintFinding::EmptyNamePart {
                contract_id: contract.contract_id.clone(),
            });
        }

        if !seen.insert(entry_name.clone()) {
            findings.push(LintFinding::DuplicateEntryName {
                entry_name: entry_name.clone(),
            });
        }

        for file in &contract.items {
            if is_unsafe_filename(&file.filename) {
                findings.push(LintFinding::UnsafeFilename {
                    entry_name: entry_name.clone(),
                    filename: file.filename.clone(),
                });
            }
        }
    }

    findings
}
