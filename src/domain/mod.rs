// Domain layer: scraped records and the ports the pipelines depend on.

pub mod model;
pub mod ports;
