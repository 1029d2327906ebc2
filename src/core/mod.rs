pub mod catalog;
pub mod critique;
pub mod engine;
pub mod filter;
pub mod palette;
pub mod recommender;

pub use crate::domain::model::{ClothingItem, Outfit, OutfitRequest};
pub use crate::domain::ports::{CatalogSource, ClosetSettings};
pub use crate::utils::error::Result;
