// Domain layer: record models and ports. Concrete implementations live under adapters/.

pub mod model;
pub mod ports;
