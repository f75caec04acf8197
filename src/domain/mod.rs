// Domain layer: request model and ports. No transport or terminal code here.

pub mod model;
pub mod ports;
