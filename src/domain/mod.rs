// Domain layer: value records and the ports the builder is driven through.

pub mod model;
pub mod ports;
