pub mod adapters;
pub mod analysis;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod extract;
pub mod utils;

pub use adapters::{HttpFetcher, LocalStorage};
pub use app::pipelines::{CatalogPipeline, MenuPipeline};
pub use config::{AnalysisSettings, CatalogSettings, HttpSettings, MenuSettings};
pub use core::etl::EtlEngine;
pub use utils::error::{Result, ScrapeError};
