// Domain layer: records, bounds and the ports a host must provide.

pub mod model;
pub mod ports;
