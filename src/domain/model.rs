use serde::{Deserialize, Serialize};

/// One file synthesized inside a contract's inner archive.
///
/// Only `filename` reaches the output. `file_size` is carried from the
/// upstream payload but is not consulted: every file gets the same
/// placeholder content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    pub receipt_id: String,
    pub receipt_no: String,
    pub receipt_sequence: String,
    pub file_id: String,
    pub filename: String,
    pub file_size: u64,
}

/// A logical grouping of files, written as one inner archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub contract_id: String,
    pub contract_no: String,
    pub contract_sequence: String,
    #[serde(rename = "data", alias = "items", default)]
    pub items: Vec<FileData>,
}

impl Contract {
    /// Name of this contract's entry in the outer archive.
    pub fn outer_entry_name(&self) -> String {
        format!("{}_{}.zip", self.contract_no, self.contract_sequence)
    }
}

/// An already-built archive blob stored verbatim as one outer entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveBundle {
    pub file_name: String,
    pub data: Vec<u8>,
}

impl ArchiveBundle {
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            data,
        }
    }
}
