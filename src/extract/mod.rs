pub mod catalog;
pub mod menu;

pub use catalog::parse_catalog_page;
pub use menu::{build_menu, collect_fragments, MenuBuilder, StyleTokenClassifier};
