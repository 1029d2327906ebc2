use std::collections::HashMap;

/// Colors the tagging model chooses from.
pub const COLOR_LABELS: [&str; 16] = [
    "black", "white", "grey", "gray", "blue", "red", "green", "yellow", "brown", "beige",
    "orange", "purple", "pink", "navy", "gold", "silver",
];

// "grey" 與 "gray" 保持為兩個獨立的鍵，表格刻意不對稱
const BUILTIN: &[(&str, &[&str])] = &[
    ("black", &["white", "gray", "red", "gold", "silver", "pink"]),
    ("white", &["black", "navy", "red", "green", "blue", "pink", "purple"]),
    ("grey", &["pink", "red", "white", "black", "navy"]),
    ("gray", &["pink", "red", "white", "black", "navy"]),
    ("blue", &["white", "grey", "beige", "brown", "orange"]),
    ("red", &["black", "white", "grey", "blue", "gold"]),
    ("green", &["white", "black", "brown", "beige", "gold"]),
    ("yellow", &["gray", "black", "blue", "purple"]),
    ("brown", &["beige", "blue", "green", "white"]),
    ("beige", &["brown", "blue", "green", "black"]),
    ("orange", &["blue", "white", "black"]),
    ("purple", &["yellow", "white", "gray", "black"]),
    ("pink", &["black", "white", "gray", "navy"]),
    ("navy", &["white", "pink", "gold", "gray"]),
    ("gold", &["black", "navy", "green", "red"]),
    ("silver", &["black", "white", "blue", "red"]),
];

/// Static mapping from a base color to the colors that go with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTable {
    entries: HashMap<String, Vec<String>>,
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ColorTable {
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(base, compatible)| {
                (
                    base.to_string(),
                    compatible.iter().map(|c| c.to_string()).collect(),
                )
            })
            .collect();
        Self { entries }
    }

    /// Replaces whole rows. Rows are taken as given; nothing is mirrored.
    pub fn with_overrides(mut self, overrides: &HashMap<String, Vec<String>>) -> Self {
        for (base, compatible) in overrides {
            self.entries.insert(base.to_lowercase(), compatible.clone());
        }
        self
    }

    /// The configured sequence for `color`, looked up case-insensitively.
    /// Unknown colors have no compatible colors.
    pub fn compatible(&self, color: &str) -> &[String] {
        self.entries
            .get(&color.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_compatible(&self, base: &str, candidate: &str) -> bool {
        self.compatible(base).iter().any(|c| c == candidate)
    }

    pub fn base_colors(&self) -> Vec<&str> {
        let mut colors: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        colors.sort_unstable();
        colors
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
