use std::collections::HashMap;

use model::ClipForgeError;
use serde::{Deserialize, Serialize};

/// Per-content-type length and count caps.
///
/// Conceptually a flat map keyed by e.g. `reel-title-max`; represented here as a typed
/// struct for ergonomic internal use, with [`FieldLimits::as_map`]/[`FieldLimits::apply_overrides`]
/// bridging to the flat override map a caller may submit per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldLimits {
    /// `reel-title-max`
    pub reel_title_max: u32,
    /// `reel-caption-max`
    pub reel_caption_max: u32,
    /// `reel-hook-max`
    pub reel_hook_max: u32,
    /// `reel-script-max`
    pub reel_script_max: u32,
    /// `carousel-title-max`
    pub carousel_title_max: u32,
    /// `carousel-caption-max`
    pub carousel_caption_max: u32,
    /// `carousel-slide-heading-max`
    pub carousel_slide_heading_max: u32,
    /// `carousel-slide-text-max`
    pub carousel_slide_text_max: u32,
    /// `carousel-min-slides`
    pub carousel_min_slides: u32,
    /// `carousel-max-slides`
    pub carousel_max_slides: u32,
    /// `tweet-title-max`
    pub tweet_title_max: u32,
    /// `tweet-text-max` (hard-capped at 280 regardless of override)
    pub tweet_text_max: u32,
    /// `tweet-thread-item-max`
    pub tweet_thread_item_max: u32,
    /// `min-ideas`
    pub min_ideas: u32,
    /// `max-ideas`
    pub max_ideas: u32,
}

/// The platform hard cap on tweet text length, regardless of any configured override.
pub const TWEET_HARD_CAP: u32 = 280;

impl Default for FieldLimits {
    fn default() -> Self {
        Self {
            reel_title_max: 100,
            reel_caption_max: 300,
            reel_hook_max: 200,
            reel_script_max: 2000,
            carousel_title_max: 100,
            carousel_caption_max: 300,
            carousel_slide_heading_max: 100,
            carousel_slide_text_max: 800,
            carousel_min_slides: 4,
            carousel_max_slides: 8,
            tweet_title_max: 100,
            tweet_text_max: 280,
            tweet_thread_item_max: 280,
            min_ideas: 6,
            max_ideas: 8,
        }
    }
}

impl FieldLimits {
    /// All keys this configuration recognizes, in table order, paired with an accessor.
    fn entries(&self) -> [(&'static str, u32); 15] {
        [
            ("reel-title-max", self.reel_title_max),
            ("reel-caption-max", self.reel_caption_max),
            ("reel-hook-max", self.reel_hook_max),
            ("reel-script-max", self.reel_script_max),
            ("carousel-title-max", self.carousel_title_max),
            ("carousel-caption-max", self.carousel_caption_max),
            ("carousel-slide-heading-max", self.carousel_slide_heading_max),
            ("carousel-slide-text-max", self.carousel_slide_text_max),
            ("carousel-min-slides", self.carousel_min_slides),
            ("carousel-max-slides", self.carousel_max_slides),
            ("tweet-title-max", self.tweet_title_max),
            ("tweet-text-max", self.tweet_text_max),
            ("tweet-thread-item-max", self.tweet_thread_item_max),
            ("min-ideas", self.min_ideas),
            ("max-ideas", self.max_ideas),
        ]
    }

    /// Render as the flat key/value map `spec.md` describes.
    pub fn as_map(&self) -> HashMap<String, u32> {
        self.entries().into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    fn set(&mut self, key: &str, value: u32) -> bool {
        match key {
            "reel-title-max" => self.reel_title_max = value,
            "reel-caption-max" => self.reel_caption_max = value,
            "reel-hook-max" => self.reel_hook_max = value,
            "reel-script-max" => self.reel_script_max = value,
            "carousel-title-max" => self.carousel_title_max = value,
            "carousel-caption-max" => self.carousel_caption_max = value,
            "carousel-slide-heading-max" => self.carousel_slide_heading_max = value,
            "carousel-slide-text-max" => self.carousel_slide_text_max = value,
            "carousel-min-slides" => self.carousel_min_slides = value,
            "carousel-max-slides" => self.carousel_max_slides = value,
            "tweet-title-max" => self.tweet_title_max = value,
            "tweet-text-max" => self.tweet_text_max = value,
            "tweet-thread-item-max" => self.tweet_thread_item_max = value,
            "min-ideas" => self.min_ideas = value,
            "max-ideas" => self.max_ideas = value,
            _ => return false,
        }
        true
    }

    /// Apply a partial override map on top of `self`, returning a new validated
    /// [`FieldLimits`]. Unspecified keys inherit `self`'s values.
    pub fn apply_overrides(&self, overrides: &HashMap<String, u32>) -> Result<Self, ClipForgeError> {
        let mut merged = *self;

        for (key, value) in overrides {
            if !merged.set(key, *value) {
                return Err(ClipForgeError::InvalidFieldLimit(format!("unknown field limit key: {key}")));
            }
        }

        merged.validate()?;
        Ok(merged)
    }

    /// Check the invariants `spec.md` §4.4 names: `min <= max` for paired keys,
    /// `tweet-text-max <= 280`, and no negative values (enforced by the `u32` type
    /// itself, but zero is also rejected since a zero-length cap is never useful).
    pub fn validate(&self) -> Result<(), ClipForgeError> {
        if self.tweet_text_max > TWEET_HARD_CAP {
            return Err(ClipForgeError::InvalidFieldLimit(format!(
                "tweet-text-max ({}) exceeds the platform hard cap of {TWEET_HARD_CAP}",
                self.tweet_text_max
            )));
        }

        if self.carousel_min_slides > self.carousel_max_slides {
            return Err(ClipForgeError::InvalidFieldLimit(format!(
                "carousel-min-slides ({}) is greater than carousel-max-slides ({})",
                self.carousel_min_slides, self.carousel_max_slides
            )));
        }

        if self.min_ideas > self.max_ideas {
            return Err(ClipForgeError::InvalidFieldLimit(format!(
                "min-ideas ({}) is greater than max-ideas ({})",
                self.min_ideas, self.max_ideas
            )));
        }

        for (key, value) in self.entries() {
            if value == 0 {
                return Err(ClipForgeError::InvalidFieldLimit(format!("{key} must be positive")));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec_table() {
        insta::assert_debug_snapshot!(FieldLimits::default(), @r#"
        FieldLimits {
            reel_title_max: 100,
            reel_caption_max: 300,
            reel_hook_max: 200,
            reel_script_max: 2000,
            carousel_title_max: 100,
            carousel_caption_max: 300,
            carousel_slide_heading_max: 100,
            carousel_slide_text_max: 800,
            carousel_min_slides: 4,
            carousel_max_slides: 8,
            tweet_title_max: 100,
            tweet_text_max: 280,
            tweet_thread_item_max: 280,
            min_ideas: 6,
            max_ideas: 8,
        }
        "#);
    }

    #[test]
    fn rejects_tweet_cap_above_280() {
        let mut overrides = HashMap::new();
        overrides.insert("tweet-text-max".to_string(), 1000);

        let err = FieldLimits::default().apply_overrides(&overrides).unwrap_err();
        assert_eq!(err.kind(), "invalid-field-limit");
    }

    #[test]
    fn rejects_inverted_carousel_bounds() {
        let mut overrides = HashMap::new();
        overrides.insert("carousel-min-slides".to_string(), 9);
        overrides.insert("carousel-max-slides".to_string(), 8);

        let err = FieldLimits::default().apply_overrides(&overrides).unwrap_err();
        assert_eq!(err.kind(), "invalid-field-limit");
    }

    #[test]
    fn unspecified_keys_inherit_defaults() {
        let mut overrides = HashMap::new();
        overrides.insert("reel-title-max".to_string(), 50);

        let merged = FieldLimits::default().apply_overrides(&overrides).unwrap();
        assert_eq!(merged.reel_title_max, 50);
        assert_eq!(merged.reel_caption_max, 300);
    }
}
