use crate::core::catalog::{Catalog, CatalogHandle, LoadReport};
use crate::core::filter::{filter_items, ItemFilter};
use crate::core::recommender::OutfitRecommender;
use crate::domain::model::{ClothingItem, Outfit, OutfitRequest};
use crate::domain::ports::CatalogSource;
use crate::utils::error::Result;
use rand::Rng;
use std::sync::Arc;

pub struct OutfitEngine<S: CatalogSource> {
    source: S,
    catalog: CatalogHandle,
    recommender: OutfitRecommender,
}

impl<S: CatalogSource> OutfitEngine<S> {
    /// Loads the catalog once; a missing closet fails here.
    pub fn open(source: S, recommender: OutfitRecommender) -> Result<(Self, LoadReport)> {
        tracing::info!("Loading closet from {}", source.describe());
        let report = source.load()?;
        let engine = Self {
            source,
            catalog: CatalogHandle::new(Catalog::new(report.items.clone())),
            recommender,
        };
        Ok((engine, report))
    }

    pub fn reload(&self) -> Result<LoadReport> {
        tracing::info!("Reloading closet from {}", self.source.describe());
        self.catalog.reload(&self.source)
    }

    pub fn catalog(&self) -> Arc<Catalog> {
        self.catalog.snapshot()
    }

    pub fn recommender(&self) -> &OutfitRecommender {
        &self.recommender
    }

    pub fn recommend(&self, request: &OutfitRequest) -> Outfit {
        self.recommend_with_rng(request, &mut rand::thread_rng())
    }

    /// Runs against one catalog snapshot for the whole request.
    pub fn recommend_with_rng<R: Rng + ?Sized>(
        &self,
        request: &OutfitRequest,
        rng: &mut R,
    ) -> Outfit {
        let catalog = self.catalog.snapshot();
        if catalog.is_empty() {
            tracing::warn!("Closet is empty, nothing to recommend");
        }
        self.recommender
            .recommend_with_rng(catalog.items(), request, rng)
    }

    pub fn inventory(&self, filter: &ItemFilter) -> Vec<ClothingItem> {
        let catalog = self.catalog.snapshot();
        filter_items(catalog.items(), filter)
            .into_iter()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::LoadWarning;
    use crate::domain::model::{CASUAL, INDOOR, MENS};
    use crate::utils::error::FitError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Mutex;

    struct MockSource {
        batches: Mutex<Vec<Result<LoadReport>>>,
    }

    impl MockSource {
        fn new(mut batches: Vec<Result<LoadReport>>) -> Self {
            batches.reverse();
            Self {
                batches: Mutex::new(batches),
            }
        }
    }

    impl CatalogSource for MockSource {
        fn load(&self) -> Result<LoadReport> {
            self.batches
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Ok(LoadReport::default()))
        }

        fn describe(&self) -> String {
            "memory".to_string()
        }
    }

    fn shirt(color: &str) -> ClothingItem {
        ClothingItem {
            item_type: "shirts".to_string(),
            color: color.to_string(),
            gender: MENS.to_string(),
            ..ClothingItem::default()
        }
    }

    fn report(items: Vec<ClothingItem>) -> LoadReport {
        LoadReport {
            items,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_open_propagates_catalog_not_found() {
        let source = MockSource::new(vec![Err(FitError::CatalogNotFound {
            path: "Closet".to_string(),
        })]);
        let result = OutfitEngine::open(source, OutfitRecommender::default());
        assert!(matches!(result, Err(FitError::CatalogNotFound { .. })));
    }

    #[test]
    fn test_open_returns_warnings() {
        let mut first = report(vec![shirt("red")]);
        first.warnings.push(LoadWarning {
            file: "bad.json".to_string(),
            reason: "EOF".to_string(),
        });
        let source = MockSource::new(vec![Ok(first)]);

        let (engine, report) = OutfitEngine::open(source, OutfitRecommender::default()).unwrap();
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(engine.catalog().len(), 1);
    }

    #[test]
    fn test_reload_swaps_catalog() {
        let source = MockSource::new(vec![
            Ok(report(vec![shirt("red")])),
            Ok(report(vec![shirt("blue"), shirt("white")])),
        ]);
        let (engine, _) = OutfitEngine::open(source, OutfitRecommender::default()).unwrap();
        let before = engine.catalog();

        engine.reload().unwrap();

        assert_eq!(before.len(), 1);
        assert_eq!(engine.catalog().len(), 2);
    }

    #[test]
    fn test_recommend_uses_current_catalog() {
        let source = MockSource::new(vec![Ok(report(vec![shirt("red")]))]);
        let (engine, _) = OutfitEngine::open(source, OutfitRecommender::default()).unwrap();
        let request = OutfitRequest::new(INDOOR, CASUAL, MENS);
        let mut rng = StdRng::seed_from_u64(1);

        let outfit = engine.recommend_with_rng(&request, &mut rng);
        assert_eq!(outfit.get("shirts").unwrap().color, "red");

        engine.reload().unwrap();
        assert!(engine.recommend(&request).is_empty());
    }

    #[test]
    fn test_inventory_filters_snapshot() {
        let source = MockSource::new(vec![Ok(report(vec![shirt("red"), shirt("blue")]))]);
        let (engine, _) = OutfitEngine::open(source, OutfitRecommender::default()).unwrap();

        let blue = engine.inventory(&ItemFilter::new().color("blue"));
        assert_eq!(blue.len(), 1);
        assert_eq!(engine.inventory(&ItemFilter::new()).len(), 2);
    }
}
