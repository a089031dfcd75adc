// Domain layer: models and ports. Concrete Redis / HTTP implementations live in `adapters`.

pub mod model;
pub mod ports;
