// Domain layer: data shapes passed between agents, and the storage port.

pub mod model;
pub mod ports;
