// Domain layer: core models and ports (capabilities the core calls into).

pub mod model;
pub mod ports;
