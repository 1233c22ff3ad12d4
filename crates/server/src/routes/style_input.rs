//! Shared style/field-limits resolution for every generation-triggering endpoint.

use config::{FieldLimits, StyleBlock};
use model::{ClipForgeError, Result};
use serde::Deserialize;

use crate::state::AppState;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct CustomStyleBody {
    pub target_audience: String,
    pub call_to_action: String,
    pub content_goal: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub additional_instructions: Option<String>,
}

/// Resolve a request's `style-preset`/`custom-style` fields into an effective style
/// and field limits. Exactly one of the two should be set; a custom style takes
/// precedence if both are present, matching how the style registry is consulted only
/// when no custom style overrides it.
pub fn resolve_style(state: &AppState, style_preset: Option<&str>, custom_style: Option<CustomStyleBody>) -> Result<(StyleBlock, FieldLimits)> {
    let style = match custom_style {
        Some(custom) => {
            let mut style = StyleBlock::custom(custom.target_audience, custom.call_to_action, custom.content_goal);
            if let Some(language) = custom.language {
                style.language = language;
            }
            if let Some(tone) = custom.tone {
                style.tone = tone;
            }
            if let Some(additional_instructions) = custom.additional_instructions {
                style.additional_instructions = additional_instructions;
            }
            style
        }
        None => {
            let name = style_preset.ok_or_else(|| ClipForgeError::InvalidPreset("no style-preset or custom-style supplied".to_string()))?;
            state.style_registry.get(name)?.clone()
        }
    };

    let limits = state.style_registry.resolve_limits(&state.config.field_limits, &style, None)?;
    Ok((style, limits))
}
