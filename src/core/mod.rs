pub mod etl;
pub mod pagination;

pub use crate::domain::model::{CatalogItem, Menu, OutputFile, TransformResult};
pub use crate::domain::ports::{FragmentClassifier, Pipeline, Storage};
pub use crate::utils::error::Result;
