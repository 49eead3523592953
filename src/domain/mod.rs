// Domain layer: sketch models and ports. No host-specific dependencies.

pub mod model;
pub mod ports;
