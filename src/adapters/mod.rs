// Adapters layer: concrete contract sources.

pub mod source;

pub use source::{JsonContractSource, StaticContractSource};
