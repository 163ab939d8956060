pub mod builder;
pub mod engine;

pub use crate::domain::model::{ArchiveBundle, Contract, FileData};
pub use crate::domain::ports::{ContractSource, Storage};
pub use crate::utils::error::Result;
