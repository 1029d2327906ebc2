use crate::domain::model::{ClothingItem, UNISEX};

/// Optional predicates over catalog items, combined with AND.
///
/// Matching is exact and case-sensitive against the stored canonical values.
/// The gender predicate also accepts items tagged `Unisex`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub item_type: Option<String>,
    pub color: Option<String>,
    pub location: Option<String>,
    pub formality: Option<String>,
    pub gender: Option<String>,
}

impl ItemFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item_type(mut self, value: impl Into<String>) -> Self {
        self.item_type = Some(value.into());
        self
    }

    pub fn color(mut self, value: impl Into<String>) -> Self {
        self.color = Some(value.into());
        self
    }

    pub fn location(mut self, value: impl Into<String>) -> Self {
        self.location = Some(value.into());
        self
    }

    pub fn formality(mut self, value: impl Into<String>) -> Self {
        self.formality = Some(value.into());
        self
    }

    pub fn gender(mut self, value: impl Into<String>) -> Self {
        self.gender = Some(value.into());
        self
    }

    pub fn is_unrestricted(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, item: &ClothingItem) -> bool {
        fn exact(predicate: &Option<String>, value: &str) -> bool {
            predicate.as_deref().map_or(true, |wanted| wanted == value)
        }

        exact(&self.item_type, &item.item_type)
            && exact(&self.color, &item.color)
            && exact(&self.location, &item.location)
            && exact(&self.formality, &item.formality)
            && self
                .gender
                .as_deref()
                .map_or(true, |wanted| item.gender == wanted || item.gender == UNISEX)
    }
}

/// Items satisfying every set predicate, in catalog order.
pub fn filter_items<'a>(items: &'a [ClothingItem], filter: &ItemFilter) -> Vec<&'a ClothingItem> {
    items.iter().filter(|item| filter.matches(item)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, item_type: &str, color: &str, gender: &str) -> ClothingItem {
        ClothingItem {
            name: name.to_string(),
            item_type: item_type.to_string(),
            color: color.to_string(),
            gender: gender.to_string(),
            ..ClothingItem::default()
        }
    }

    fn closet() -> Vec<ClothingItem> {
        vec![
            item("oxford", "shirts", "white", "Men's"),
            item("blouse", "shirts", "pink", "Women's"),
            item("tee", "shirts", "black", "Unisex"),
            item("chinos", "pants", "beige", "Men's"),
            item("boots", "shoes", "brown", "Unisex"),
        ]
    }

    fn names(items: &[&ClothingItem]) -> Vec<String> {
        items.iter().map(|i| i.name.clone()).collect()
    }

    #[test]
    fn test_unset_filter_returns_everything_in_order() {
        let items = closet();
        let filter = ItemFilter::new();
        assert!(filter.is_unrestricted());
        assert_eq!(
            names(&filter_items(&items, &filter)),
            vec!["oxford", "blouse", "tee", "chinos", "boots"]
        );
    }

    #[test]
    fn test_gender_accepts_unisex() {
        let items = closet();
        let filter = ItemFilter::new().item_type("shirts").gender("Men's");
        assert_eq!(names(&filter_items(&items, &filter)), vec!["oxford", "tee"]);
    }

    #[test]
    fn test_unisex_gender_only_matches_unisex() {
        let items = closet();
        let filter = ItemFilter::new().gender("Unisex");
        assert_eq!(names(&filter_items(&items, &filter)), vec!["tee", "boots"]);
    }

    #[test]
    fn test_predicates_are_anded() {
        let items = closet();
        let filter = ItemFilter::new().item_type("shirts").color("pink").gender("Men's");
        assert!(filter_items(&items, &filter).is_empty());
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let items = closet();
        let filter = ItemFilter::new().item_type("Shirts");
        assert!(filter_items(&items, &filter).is_empty());
    }

    #[test]
    fn test_location_and_formality() {
        let mut items = closet();
        items[0].location = "Outdoor".to_string();
        items[3].formality = "Formal".to_string();

        let outdoor = ItemFilter::new().location("Outdoor");
        assert_eq!(names(&filter_items(&items, &outdoor)), vec!["oxford"]);

        let formal = ItemFilter::new().formality("Formal");
        assert_eq!(names(&filter_items(&items, &formal)), vec!["chinos"]);
    }

    #[test]
    fn test_every_result_satisfies_every_predicate() {
        let items = closet();
        let filters = [
            ItemFilter::new().gender("Women's"),
            ItemFilter::new().color("brown").gender("Men's"),
            ItemFilter::new().item_type("pants").location("Indoor").formality("Casual"),
        ];

        for filter in &filters {
            let result = filter_items(&items, filter);
            assert!(result.len() <= items.len());
            for picked in result {
                assert!(items.contains(picked));
                if let Some(gender) = &filter.gender {
                    assert!(&picked.gender == gender || picked.gender == "Unisex");
                }
                if let Some(color) = &filter.color {
                    assert_eq!(&picked.color, color);
                }
                if let Some(item_type) = &filter.item_type {
                    assert_eq!(&picked.item_type, item_type);
                }
            }
        }
    }
}
