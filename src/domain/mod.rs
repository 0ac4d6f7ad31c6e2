// Domain layer: data model and ports. Nothing here touches the filesystem or the runtime.

pub mod model;
pub mod ports;
