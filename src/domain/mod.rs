// Domain layer: entities and the ports the handlers talk through.

pub mod model;
pub mod ports;
