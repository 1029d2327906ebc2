use crate::utils::error::{FitError, Result};
use crate::utils::validation::validate_range;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Structured form of the critique model's free-text answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CritiqueReport {
    pub style: String,
    pub rating: u32,
    pub comment: String,
}

fn critique_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?is)Style:\s*(?P<style>.*?)\s*Rating:\s*(?P<rating>\d+)\s*/\s*100\b.*?Comment:\s*(?P<comment>[^\r\n]*)",
        )
        .expect("critique pattern is valid")
    })
}

impl CritiqueReport {
    /// Parses `Style: ...`, `Rating: <n>/100` and `Comment: ...` appearing
    /// in that order. Text before `Style:` is ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let caps = critique_pattern()
            .captures(text)
            .ok_or_else(|| FitError::CritiqueFormatError {
                message: missing_section(text).to_string(),
            })?;

        let style = caps["style"].trim().to_string();
        let comment = caps["comment"].trim().to_string();
        if style.is_empty() {
            return Err(FitError::CritiqueFormatError {
                message: "style section is empty".to_string(),
            });
        }
        if comment.is_empty() {
            return Err(FitError::CritiqueFormatError {
                message: "comment section is empty".to_string(),
            });
        }

        let rating: u32 = caps["rating"]
            .parse()
            .map_err(|_| FitError::CritiqueFormatError {
                message: format!("rating '{}' is not a number", &caps["rating"]),
            })?;
        validate_range("rating", rating, 0, 100).map_err(|e| FitError::CritiqueFormatError {
            message: e.to_string(),
        })?;

        Ok(Self {
            style,
            rating,
            comment,
        })
    }
}

fn missing_section(text: &str) -> &'static str {
    let lower = text.to_lowercase();
    match (
        lower.find("style:"),
        lower.find("rating:"),
        lower.find("comment:"),
    ) {
        (None, _, _) => "missing 'Style:' section",
        (_, None, _) => "missing 'Rating:' section",
        (_, _, None) => "missing 'Comment:' section",
        (Some(s), Some(r), Some(c)) if !(s < r && r < c) => {
            "sections must appear as Style, Rating, Comment"
        }
        _ => "rating must be formatted as '<integer>/100'",
    }
}
