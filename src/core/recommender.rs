use crate::core::filter::{filter_items, ItemFilter};
use crate::core::palette::ColorTable;
use crate::domain::model::{ClothingItem, Outfit, OutfitRequest, FORMAL, MENS, OUTDOOR};
use rand::seq::SliceRandom;
use rand::Rng;

const FORMAL_MENS: &[&str] = &["shirts", "pants", "shoes", "jackets"];
const FORMAL_OTHER: &[&str] = &["dresses", "shoes", "bags"];
const CASUAL_MENS: &[&str] = &["shirts", "pants", "shoes"];
const CASUAL_OTHER: &[&str] = &["shirts", "pants", "shoes", "skirts"];
const OUTDOOR_EXTRAS: &[&str] = &["hats", "sunglasses"];

/// Ordered item-type slots an outfit needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementSet {
    slots: Vec<&'static str>,
}

impl RequirementSet {
    /// Anything other than `Formal` is treated as casual, anything other than
    /// `Men's` as the non-men's row. Outdoor accessories always come last.
    pub fn derive(location: &str, formality: &str, gender: &str) -> Self {
        let base = match (formality == FORMAL, gender == MENS) {
            (true, true) => FORMAL_MENS,
            (true, false) => FORMAL_OTHER,
            (false, true) => CASUAL_MENS,
            (false, false) => CASUAL_OTHER,
        };

        let mut slots = base.to_vec();
        if location == OUTDOOR {
            slots.extend_from_slice(OUTDOOR_EXTRAS);
        }
        Self { slots }
    }

    pub fn for_request(request: &OutfitRequest) -> Self {
        Self::derive(&request.location, &request.formality, &request.gender)
    }

    pub fn slots(&self) -> &[&'static str] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Greedy, rule-based outfit assembly.
#[derive(Debug, Clone, Default)]
pub struct OutfitRecommender {
    colors: ColorTable,
}

impl OutfitRecommender {
    pub fn new(colors: ColorTable) -> Self {
        Self { colors }
    }

    pub fn colors(&self) -> &ColorTable {
        &self.colors
    }

    pub fn recommend(&self, items: &[ClothingItem], request: &OutfitRequest) -> Outfit {
        self.recommend_with_rng(items, request, &mut rand::thread_rng())
    }

    /// Fills each required slot in order with one random candidate.
    ///
    /// Once a base color is known (given, or taken from the first filled
    /// slot) candidates are narrowed to compatible colors, unless that would
    /// leave none. Slots without candidates are left out.
    pub fn recommend_with_rng<R: Rng + ?Sized>(
        &self,
        items: &[ClothingItem],
        request: &OutfitRequest,
        rng: &mut R,
    ) -> Outfit {
        let requirements = RequirementSet::for_request(request);
        let mut base_color = request
            .base_color
            .clone()
            .filter(|color| !color.trim().is_empty());
        let mut outfit = Outfit::new();

        tracing::debug!(
            "Recommending for {}/{}/{} with slots {:?}",
            request.location,
            request.formality,
            request.gender,
            requirements.slots()
        );

        for &slot in requirements.slots() {
            let filter = ItemFilter::new()
                .item_type(slot)
                .location(request.location.as_str())
                .formality(request.formality.as_str())
                .gender(request.gender.as_str());
            let mut candidates = filter_items(items, &filter);

            if let Some(color) = base_color.as_deref() {
                if !candidates.is_empty() {
                    let compatible: Vec<&ClothingItem> = candidates
                        .iter()
                        .copied()
                        .filter(|item| self.colors.is_compatible(color, &item.color))
                        .collect();
                    if compatible.is_empty() {
                        tracing::debug!(
                            "No {} compatible with {}, keeping all {} candidates",
                            slot,
                            color,
                            candidates.len()
                        );
                    } else {
                        candidates = compatible;
                    }
                }
            }

            match candidates.choose(rng) {
                Some(&picked) => {
                    tracing::debug!("Picked {} for {}", picked, slot);
                    if base_color.is_none() {
                        base_color = Some(picked.color.clone());
                    }
                    outfit.insert(slot, picked.clone());
                }
                None => tracing::debug!("No candidates for {}", slot),
            }
        }

        tracing::info!(
            "Assembled outfit with {} of {} slots",
            outfit.len(),
            requirements.len()
        );
        outfit
    }
}
