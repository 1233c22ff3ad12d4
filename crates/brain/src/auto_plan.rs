use config::FieldLimits;
use llm_client::LlmClient;
use model::{ClipForgeError, Result};

const AUTO_COUNT_SYSTEM_PROMPT: &str = "You are a short-form content strategist deciding how many distinct \
pieces of content a source deserves. Respond with a JSON object of the shape \
{\"count\": integer, \"rationale\": string} and nothing else. rationale should be one short sentence.";

/// Ask the model how many ideas to extract from `source_text` and why, for
/// [`crate::ComposeRequest::Auto`]. The returned count is clamped into
/// `limits.min_ideas..=limits.max_ideas`.
pub async fn decide_auto_count(llm: &LlmClient, source_text: &str, limits: &FieldLimits) -> Result<(u32, String)> {
    let user = format!(
        "Choose how many content ideas (between {} and {}) this source material deserves.\n\nSource material:\n{source_text}",
        limits.min_ideas, limits.max_ideas
    );

    let response = llm.chat_json(AUTO_COUNT_SYSTEM_PROMPT, &user).await?;

    let count = response
        .get("count")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| ClipForgeError::LlmParseFailed("auto-count response missing 'count' integer".to_string()))?
        as u32;
    let count = count.clamp(limits.min_ideas, limits.max_ideas);

    let rationale = response
        .get("rationale")
        .and_then(|v| v.as_str())
        .ok_or_else(|| ClipForgeError::LlmParseFailed("auto-count response missing 'rationale' string".to_string()))?
        .to_string();

    Ok((count, rationale))
}
