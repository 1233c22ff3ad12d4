use std::collections::HashMap;

use model::ClipForgeError;
use serde::{Deserialize, Serialize};

use crate::limits::FieldLimits;

/// A fully-resolved content style: audience, goal, tone, and an optional field-limits
/// override, used to season both the ideation and materialization prompts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleBlock {
    /// Who the generated content addresses.
    pub target_audience: String,
    /// The call-to-action the generator should favor.
    pub call_to_action: String,
    /// What outcome the content should drive (sales, awareness, engagement, ...).
    pub content_goal: String,
    /// Output language. Defaults to "English".
    #[serde(default = "default_language")]
    pub language: String,
    /// Tone of voice. Defaults to "Professional".
    #[serde(default = "default_tone")]
    pub tone: String,
    /// Free-form additional instructions appended to the prompt.
    #[serde(default)]
    pub additional_instructions: String,
    /// Field-limits override embedded in the style itself.
    #[serde(default)]
    pub field_limits: Option<HashMap<String, u32>>,
}

fn default_language() -> String {
    "English".to_string()
}

fn default_tone() -> String {
    "Professional".to_string()
}

impl StyleBlock {
    /// Build a caller-supplied custom style. `language`/`tone` default per `spec.md` §4.5.
    pub fn custom(target_audience: impl Into<String>, call_to_action: impl Into<String>, content_goal: impl Into<String>) -> Self {
        Self {
            target_audience: target_audience.into(),
            call_to_action: call_to_action.into(),
            content_goal: content_goal.into(),
            language: default_language(),
            tone: default_tone(),
            additional_instructions: String::new(),
            field_limits: None,
        }
    }
}

/// The registry of named style presets.
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    presets: HashMap<&'static str, StyleBlock>,
}

impl Default for StyleRegistry {
    fn default() -> Self {
        let mut presets = HashMap::new();

        presets.insert(
            "ecommerce-entrepreneur",
            StyleBlock {
                target_audience: "small online store owners and aspiring entrepreneurs".to_string(),
                call_to_action: "Visit the link in bio to shop now".to_string(),
                content_goal: "drive product discovery and sales".to_string(),
                language: default_language(),
                tone: "Energetic and persuasive".to_string(),
                additional_instructions: "Emphasize concrete numbers and outcomes over hype.".to_string(),
                field_limits: None,
            },
        );
        presets.insert(
            "professional-business",
            StyleBlock {
                target_audience: "B2B decision makers and professionals".to_string(),
                call_to_action: "Book a consultation to learn more".to_string(),
                content_goal: "build authority and generate qualified leads".to_string(),
                language: default_language(),
                tone: "Authoritative and polished".to_string(),
                additional_instructions: "Avoid slang; favor precise, data-backed claims.".to_string(),
                field_limits: None,
            },
        );
        presets.insert(
            "social-media-casual",
            StyleBlock {
                target_audience: "general social media audiences".to_string(),
                call_to_action: "Drop a comment and follow for more".to_string(),
                content_goal: "maximize shares and engagement".to_string(),
                language: default_language(),
                tone: "Casual and conversational".to_string(),
                additional_instructions: "Lean into relatable humor where it fits naturally.".to_string(),
                field_limits: None,
            },
        );
        presets.insert(
            "educational-content",
            StyleBlock {
                target_audience: "learners looking to build a new skill".to_string(),
                call_to_action: "Save this post for later reference".to_string(),
                content_goal: "teach a concept clearly and memorably".to_string(),
                language: default_language(),
                tone: "Clear and encouraging".to_string(),
                additional_instructions: "Prefer concrete examples over abstract explanation.".to_string(),
                field_limits: None,
            },
        );
        presets.insert(
            "fitness-wellness",
            StyleBlock {
                target_audience: "people pursuing fitness and wellness goals".to_string(),
                call_to_action: "Start your free trial today".to_string(),
                content_goal: "motivate action toward a healthier habit".to_string(),
                language: default_language(),
                tone: "Motivational and supportive".to_string(),
                additional_instructions: "Avoid unsubstantiated health claims.".to_string(),
                field_limits: None,
            },
        );

        Self { presets }
    }
}

impl StyleRegistry {
    /// Look up a preset by name.
    pub fn get(&self, name: &str) -> Result<&StyleBlock, ClipForgeError> {
        self.presets.get(name).ok_or_else(|| ClipForgeError::InvalidPreset(name.to_string()))
    }

    /// All registered preset names, in a stable order.
    pub fn preset_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.presets.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Resolve an effective [`FieldLimits`] for a style, layering: process default,
    /// then the style's embedded override (if any), then a caller-supplied override
    /// (if any).
    pub fn resolve_limits(
        &self,
        defaults: &FieldLimits,
        style: &StyleBlock,
        request_override: Option<&HashMap<String, u32>>,
    ) -> Result<FieldLimits, ClipForgeError> {
        let mut limits = *defaults;

        if let Some(style_override) = &style.field_limits {
            limits = limits.apply_overrides(style_override)?;
        }

        if let Some(request_override) = request_override {
            limits = limits.apply_overrides(request_override)?;
        }

        Ok(limits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_five_presets_registered() {
        let registry = StyleRegistry::default();
        assert_eq!(
            registry.preset_names(),
            vec![
                "ecommerce-entrepreneur",
                "educational-content",
                "fitness-wellness",
                "professional-business",
                "social-media-casual",
            ]
        );
    }

    #[test]
    fn unknown_preset_is_invalid_preset_error() {
        let registry = StyleRegistry::default();
        let err = registry.get("does-not-exist").unwrap_err();
        assert_eq!(err.kind(), "invalid-preset");
    }

    #[test]
    fn custom_style_defaults_language_and_tone() {
        let style = StyleBlock::custom("teenagers", "subscribe now", "grow audience");
        assert_eq!(style.language, "English");
        assert_eq!(style.tone, "Professional");
    }
}
