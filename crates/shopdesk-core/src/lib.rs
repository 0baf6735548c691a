pub mod app_config;
pub mod category;
pub mod config;
pub mod error;
pub mod input;
pub mod sku;
pub mod tree;
pub mod variant;

pub use app_config::{AppConfig, Environment};
pub use category::{CategoryId, CategoryNode, CategoryRecord, FlatCategory};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{CatalogError, ConfigError};
pub use input::{load_categories, load_selection};
pub use sku::{generate_sku, slugify};
pub use tree::{
    build_tree, count_nodes, filter_tree, flatten_tree, search_tree, unreachable_ids,
};
pub use variant::{
    build_variant_rows, combination_count, combinations, generate_variant_combinations,
    validate_selection, AttributeSelection, Combinations, VariantCombination, VariantDefaults,
    VariantRow,
};
