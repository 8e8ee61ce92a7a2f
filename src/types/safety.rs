//! Safety-related types for the Gemini API.
//!
//! This module contains the harm category and threshold enum tables used to
//! configure content safety, and the rating types returned with candidates.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Safety setting for content generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SafetySetting {
    /// The harm category to configure.
    pub category: HarmCategory,
    /// The blocking threshold for this category.
    pub threshold: HarmBlockThreshold,
}

impl SafetySetting {
    /// Build a safety setting for one category.
    pub fn new(category: HarmCategory, threshold: HarmBlockThreshold) -> Self {
        Self { category, threshold }
    }
}

/// Categories of harmful content.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HarmCategory {
    /// Harassment content.
    #[serde(rename = "HARM_CATEGORY_HARASSMENT")]
    Harassment,
    /// Hate speech content.
    #[serde(rename = "HARM_CATEGORY_HATE_SPEECH")]
    HateSpeech,
    /// Sexually explicit content.
    #[serde(rename = "HARM_CATEGORY_SEXUALLY_EXPLICIT")]
    SexuallyExplicit,
    /// Dangerous content.
    #[serde(rename = "HARM_CATEGORY_DANGEROUS_CONTENT")]
    DangerousContent,
    /// Civic integrity content.
    #[serde(rename = "HARM_CATEGORY_CIVIC_INTEGRITY")]
    CivicIntegrity,
}

impl HarmCategory {
    /// All configurable harm categories.
    pub fn all() -> &'static [HarmCategory] {
        &[
            HarmCategory::Harassment,
            HarmCategory::HateSpeech,
            HarmCategory::SexuallyExplicit,
            HarmCategory::DangerousContent,
            HarmCategory::CivicIntegrity,
        ]
    }
}

/// Thresholds for blocking harmful content.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HarmBlockThreshold {
    /// Block none.
    #[serde(rename = "BLOCK_NONE")]
    BlockNone,
    /// Block low and above.
    #[serde(rename = "BLOCK_LOW_AND_ABOVE")]
    BlockLowAndAbove,
    /// Block medium and above.
    #[serde(rename = "BLOCK_MEDIUM_AND_ABOVE")]
    BlockMediumAndAbove,
    /// Block only high.
    #[serde(rename = "BLOCK_ONLY_HIGH")]
    BlockOnlyHigh,
}

/// Safety rating for a piece of content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SafetyRating {
    /// The harm category.
    pub category: HarmCategory,
    /// The probability of harm.
    pub probability: HarmProbability,
}

/// Probability levels for harmful content.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmProbability {
    /// Negligible probability.
    Negligible,
    /// Low probability.
    Low,
    /// Medium probability.
    Medium,
    /// High probability.
    High,
}

static DEFAULT_SAFETY_SETTINGS: Lazy<Vec<SafetySetting>> = Lazy::new(|| {
    HarmCategory::all()
        .iter()
        .map(|&category| SafetySetting::new(category, HarmBlockThreshold::BlockMediumAndAbove))
        .collect()
});

/// Default safety settings: block medium and above for every category.
pub fn default_safety_settings() -> &'static [SafetySetting] {
    &DEFAULT_SAFETY_SETTINGS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_cover_all_categories() {
        let defaults = default_safety_settings();
        assert_eq!(defaults.len(), HarmCategory::all().len());
        for setting in defaults {
            assert_eq!(setting.threshold, HarmBlockThreshold::BlockMediumAndAbove);
        }
    }

    #[test]
    fn test_category_wire_names() {
        let json = serde_json::to_string(&HarmCategory::HateSpeech).expect("serialize");
        assert_eq!(json, r#""HARM_CATEGORY_HATE_SPEECH""#);

        let json = serde_json::to_string(&HarmBlockThreshold::BlockOnlyHigh).expect("serialize");
        assert_eq!(json, r#""BLOCK_ONLY_HIGH""#);
    }
}
