use crate::domain::model::Contract;
use crate::utils::error::Result;
use std::io::{Seek, Write};

/// Supplies the ordered contracts to build.
pub trait ContractSource {
    fn contracts(&self) -> Result<Vec<Contract>>;
}

/// Where the outer archive is written.
pub trait Storage {
    type Writer: Write + Seek;

    /// Creates (or truncates) the named output and returns an exclusive writer over it.
    fn create(&self, name: &str) -> Result<Self::Writer>;

    /// Makes a finished output durable. The writer has already been flushed.
    fn finalize(&self, writer: Self::Writer) -> Result<()>;

    /// Human readable location of the named output.
    fn location(&self, name: &str) -> String;
}
