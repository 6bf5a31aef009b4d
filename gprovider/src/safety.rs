//! Safety categories, block thresholds, and the ratings providers report back.
//!
//! ```rust
//! use gprovider::{HarmBlockThreshold, HarmCategory, SafetySetting, SafetySettings};
//!
//! let mut settings = SafetySettings::new();
//! settings.insert(HarmCategory::Harassment, HarmBlockThreshold::BlockNone);
//! settings.insert(HarmCategory::Harassment, HarmBlockThreshold::BlockOnlyHigh);
//!
//! let wire = SafetySetting::from_settings(&settings);
//! assert_eq!(wire.len(), 1);
//! assert_eq!(wire[0].threshold.as_str(), "BLOCK_ONLY_HIGH");
//! ```

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HarmCategory {
    Harassment,
    HateSpeech,
    SexuallyExplicit,
    DangerousContent,
}

impl HarmCategory {
    pub const ALL: [Self; 4] = [
        Self::Harassment,
        Self::HateSpeech,
        Self::SexuallyExplicit,
        Self::DangerousContent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Harassment => "HARM_CATEGORY_HARASSMENT",
            Self::HateSpeech => "HARM_CATEGORY_HATE_SPEECH",
            Self::SexuallyExplicit => "HARM_CATEGORY_SEXUALLY_EXPLICIT",
            Self::DangerousContent => "HARM_CATEGORY_DANGEROUS_CONTENT",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HarmBlockThreshold {
    #[default]
    Unspecified,
    BlockLowAndAbove,
    BlockMediumAndAbove,
    BlockOnlyHigh,
    BlockNone,
}

impl HarmBlockThreshold {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unspecified => "HARM_BLOCK_THRESHOLD_UNSPECIFIED",
            Self::BlockLowAndAbove => "BLOCK_LOW_AND_ABOVE",
            Self::BlockMediumAndAbove => "BLOCK_MEDIUM_AND_ABOVE",
            Self::BlockOnlyHigh => "BLOCK_ONLY_HIGH",
            Self::BlockNone => "BLOCK_NONE",
        }
    }
}

/// Per-category thresholds; one entry per category, last write wins.
pub type SafetySettings = BTreeMap<HarmCategory, HarmBlockThreshold>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

impl SafetySetting {
    pub fn new(category: HarmCategory, threshold: HarmBlockThreshold) -> Self {
        Self {
            category,
            threshold,
        }
    }

    pub fn from_settings(settings: &SafetySettings) -> Vec<Self> {
        settings
            .iter()
            .map(|(category, threshold)| Self::new(*category, *threshold))
            .collect()
    }
}

/// Rating reported by the provider. Categories are kept verbatim so values
/// this crate does not model still survive decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafetyRating {
    pub category: String,
    pub probability: String,
    pub blocked: bool,
}

impl SafetyRating {
    pub fn harm_category(&self) -> Option<HarmCategory> {
        HarmCategory::parse(&self.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_names_round_trip_through_parse() {
        for category in HarmCategory::ALL {
            assert_eq!(HarmCategory::parse(category.as_str()), Some(category));
        }
        assert_eq!(HarmCategory::parse("HARM_CATEGORY_CIVIC_INTEGRITY"), None);
    }

    #[test]
    fn settings_render_in_category_order() {
        let mut settings = SafetySettings::new();
        settings.insert(HarmCategory::DangerousContent, HarmBlockThreshold::BlockNone);
        settings.insert(HarmCategory::Harassment, HarmBlockThreshold::BlockLowAndAbove);

        let wire = SafetySetting::from_settings(&settings);
        assert_eq!(wire[0].category, HarmCategory::Harassment);
        assert_eq!(wire[1].category, HarmCategory::DangerousContent);
    }

    #[test]
    fn rating_exposes_known_category() {
        let rating = SafetyRating {
            category: "HARM_CATEGORY_HATE_SPEECH".to_string(),
            probability: "NEGLIGIBLE".to_string(),
            blocked: false,
        };
        assert_eq!(rating.harm_category(), Some(HarmCategory::HateSpeech));
    }
}
