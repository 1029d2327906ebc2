use crate::utils::error::{FitError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_one_of, Validate};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

pub const INDOOR: &str = "Indoor";
pub const OUTDOOR: &str = "Outdoor";
pub const FORMAL: &str = "Formal";
pub const CASUAL: &str = "Casual";
pub const MENS: &str = "Men's";
pub const WOMENS: &str = "Women's";
pub const UNISEX: &str = "Unisex";

pub const LOCATIONS: [&str; 2] = [INDOOR, OUTDOOR];
pub const FORMALITIES: [&str; 2] = [FORMAL, CASUAL];
pub const GENDERS: [&str; 3] = [MENS, WOMENS, UNISEX];

/// Item types the tagging model chooses from.
pub const ITEM_TYPES: [&str; 10] = [
    "sunglasses",
    "hats",
    "jackets",
    "shirts",
    "pants",
    "shorts",
    "skirts",
    "dresses",
    "bags",
    "shoes",
];

pub const UNNAMED: &str = "Unnamed";
pub const UNKNOWN: &str = "unknown";

/// One catalogued garment or accessory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClothingItem {
    pub name: String,
    pub item_type: String,
    pub color: String,
    pub location: String,
    pub formality: String,
    pub gender: String,
    pub image_path: String,
}

impl Default for ClothingItem {
    fn default() -> Self {
        Self {
            name: UNNAMED.to_string(),
            item_type: UNKNOWN.to_string(),
            color: UNKNOWN.to_string(),
            location: INDOOR.to_string(),
            formality: CASUAL.to_string(),
            gender: UNISEX.to_string(),
            image_path: String::new(),
        }
    }
}

impl ClothingItem {
    /// Builds a fully populated item from a loosely structured record.
    ///
    /// Every attribute falls back to its default independently. The tagger's
    /// `indoor_outdoor` and `path` keys are accepted for `location` and
    /// `image_path`; `item_type` and `color` are lower-cased to their
    /// canonical form. Non-string values count as missing.
    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        let defaults = Self::default();
        let text = |keys: &[&str]| -> Option<String> {
            keys.iter()
                .find_map(|key| fields.get(*key).and_then(Value::as_str))
                .map(str::to_string)
        };

        Self {
            name: text(&["name"]).unwrap_or(defaults.name),
            item_type: text(&["item_type"])
                .map(|v| v.to_lowercase())
                .unwrap_or(defaults.item_type),
            color: text(&["color"])
                .map(|v| v.to_lowercase())
                .unwrap_or(defaults.color),
            location: text(&["location", "indoor_outdoor"]).unwrap_or(defaults.location),
            formality: text(&["formality"]).unwrap_or(defaults.formality),
            gender: text(&["gender"]).unwrap_or(defaults.gender),
            image_path: text(&["image_path", "path"]).unwrap_or(defaults.image_path),
        }
    }
}

impl std::fmt::Display for ClothingItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} {})", self.name, self.color, self.item_type)
    }
}

/// Record written by the tagging collaborator, one per catalog file.
///
/// Keys the tagger adds beyond the attributes (`image_id`, `folder`, ...) are
/// kept in `extra` so a stored record matches what the tagger produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub item_type: String,
    pub color: String,
    pub indoor_outdoor: String,
    pub formality: String,
    pub gender: String,
    pub path: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TagRecord {
    /// Parses the tagger's JSON output. `file` only labels errors.
    ///
    /// The tagger reports failures as `{"error": "..."}`; those are rejected.
    pub fn parse(file: &str, content: &str) -> Result<Self> {
        let invalid = |reason: String| FitError::InvalidTagRecord {
            file: file.to_string(),
            reason,
        };

        let value: Value = serde_json::from_str(content).map_err(|e| invalid(e.to_string()))?;
        if let Some(error) = value.get("error") {
            let reason = error
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            return Err(invalid(format!("tagging failed: {}", reason)));
        }

        let record: Self = serde_json::from_value(value).map_err(|e| invalid(e.to_string()))?;
        record.validate()?;
        Ok(record)
    }
}

impl Validate for TagRecord {
    fn validate(&self) -> Result<()> {
        validate_one_of("item_type", &self.item_type.to_lowercase(), &ITEM_TYPES)?;
        validate_non_empty_string("color", &self.color)?;
        validate_one_of("indoor_outdoor", &self.indoor_outdoor, &LOCATIONS)?;
        validate_one_of("formality", &self.formality, &FORMALITIES)?;
        validate_one_of("gender", &self.gender, &GENDERS)?;
        Ok(())
    }
}

/// A recommendation request. An empty base color means "none".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutfitRequest {
    pub location: String,
    pub formality: String,
    pub gender: String,
    pub base_color: Option<String>,
}

impl OutfitRequest {
    pub fn new(
        location: impl Into<String>,
        formality: impl Into<String>,
        gender: impl Into<String>,
    ) -> Self {
        Self {
            location: location.into(),
            formality: formality.into(),
            gender: gender.into(),
            base_color: None,
        }
    }

    pub fn with_base_color(mut self, color: Option<String>) -> Self {
        self.base_color = color.filter(|c| !c.trim().is_empty());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct OutfitPiece {
    slot: String,
    item: ClothingItem,
}

/// Slot name to chosen item, in requirement order. Absent slots have no entry.
///
/// Serialises as a JSON object keyed by slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outfit {
    pieces: Vec<OutfitPiece>,
}

impl Outfit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns `item` to `slot`, replacing any earlier pick for the same slot.
    pub fn insert(&mut self, slot: impl Into<String>, item: ClothingItem) {
        let slot = slot.into();
        match self.pieces.iter_mut().find(|p| p.slot == slot) {
            Some(existing) => existing.item = item,
            None => self.pieces.push(OutfitPiece { slot, item }),
        }
    }

    pub fn get(&self, slot: &str) -> Option<&ClothingItem> {
        self.pieces.iter().find(|p| p.slot == slot).map(|p| &p.item)
    }

    pub fn contains_slot(&self, slot: &str) -> bool {
        self.get(slot).is_some()
    }

    pub fn slots(&self) -> impl Iterator<Item = &str> {
        self.pieces.iter().map(|p| p.slot.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClothingItem)> {
        self.pieces.iter().map(|p| (p.slot.as_str(), &p.item))
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

impl Serialize for Outfit {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (slot, item) in self.iter() {
            map.serialize_entry(slot, item)?;
        }
        map.end()
    }
}

struct OutfitVisitor;

impl<'de> Visitor<'de> for OutfitVisitor {
    type Value = Outfit;

    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str("a map of slot names to clothing items")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Outfit, A::Error> {
        let mut outfit = Outfit::new();
        // 重複的欄位以最後一筆為準
        while let Some((slot, item)) = access.next_entry::<String, ClothingItem>()? {
            outfit.insert(slot, item);
        }
        Ok(outfit)
    }
}

impl<'de> Deserialize<'de> for Outfit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(OutfitVisitor)
    }
}
