// Domain layer: clothing model and the ports the core consumes.

pub mod model;
pub mod ports;
