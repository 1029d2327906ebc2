pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::FitcheckConfig;
pub use crate::core::{
    catalog::{load_catalog, CatalogHandle, DirectoryCatalog, LoadReport, LoadWarning},
    critique::CritiqueReport,
    engine::OutfitEngine,
    filter::{filter_items, ItemFilter},
    palette::ColorTable,
    recommender::{OutfitRecommender, RequirementSet},
};
pub use domain::model::{ClothingItem, Outfit, OutfitRequest, TagRecord};
pub use utils::error::{FitError, Result};
