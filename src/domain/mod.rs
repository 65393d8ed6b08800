// Domain layer: ranking models, rank bookkeeping and the ports adapters implement.

pub mod model;
pub mod ports;
pub mod ranks;
