use config::{FieldLimits, StyleBlock};
use llm_client::LlmClient;
use model::{ClipForgeError, ContentIdea, Result};
use serde_json::Value;

/// Generate between `min_ideas` and `max_ideas` content ideas from `source_text`.
///
/// Performs a single repair call if the first response fails schema validation;
/// invalid elements are dropped rather than padded. Fails with `IdeationFailed` if no
/// valid idea survives.
pub async fn generate(llm: &LlmClient, source_text: &str, style: &StyleBlock, limits: &FieldLimits) -> Result<Vec<ContentIdea>> {
    let prompt = prompts::ideation_prompt(source_text, style, limits);
    let response = llm.chat_json(&prompt.system, &prompt.user).await?;

    let (ideas, violations) = extract_ideas(&response, limits);
    if violations.is_empty() && !ideas.is_empty() {
        return Ok(ideas);
    }

    log::warn!("ideation response failed validation, attempting one repair: {violations:?}");

    let repair_user = format!(
        "{}\n\nYour previous response was invalid for these reasons:\n{}\n\nPrevious response:\n{}\n\nRespond again with a corrected JSON object.",
        prompt.user,
        violations.join("\n"),
        response
    );
    let repaired = llm.chat_json(&prompt.system, &repair_user).await?;

    let (ideas, _) = extract_ideas(&repaired, limits);
    if ideas.is_empty() { Err(ClipForgeError::IdeationFailed) } else { Ok(ideas) }
}

fn extract_ideas(response: &Value, limits: &FieldLimits) -> (Vec<ContentIdea>, Vec<String>) {
    let mut violations = Vec::new();

    let Some(raw_ideas) = response.get("ideas").and_then(Value::as_array) else {
        violations.push("response is not a JSON object with an 'ideas' array".to_string());
        return (Vec::new(), violations);
    };

    if (raw_ideas.len() as u32) < limits.min_ideas || (raw_ideas.len() as u32) > limits.max_ideas {
        violations.push(format!(
            "ideas array has {} elements, expected between {} and {}",
            raw_ideas.len(),
            limits.min_ideas,
            limits.max_ideas
        ));
    }

    let mut ideas = Vec::new();
    for (index, raw) in raw_ideas.iter().enumerate() {
        match serde_json::from_value::<ContentIdea>(raw.clone()) {
            Ok(idea) => ideas.push(idea),
            Err(err) => violations.push(format!("idea {index}: unrecognized content_type or malformed idea ({err})")),
        }
    }

    (ideas, violations)
}
