use config::FieldLimits;
use llm_client::LlmClient;
use model::{Carousel, ClipForgeError, ContentArtifact, Reel, Result, Tweet};
use serde_json::Value;

use crate::validate;

/// The result of a successful edit: the artifact before and after, plus a field-level
/// diff summary.
pub struct EditOutcome {
    /// The artifact as it was before the edit.
    pub before: ContentArtifact,
    /// The artifact as it is after the edit.
    pub after: ContentArtifact,
    /// Human-readable field-level changes, e.g. `"caption changed"`.
    pub changes: Vec<String>,
}

/// Apply a natural-language edit instruction to `current`, validating the result
/// against the same schema and caps the materializer uses.
///
/// On validation failure, no replacement happens; the caller should keep `current` and
/// surface `ClipForgeError::ValidationFailed`.
pub async fn edit(llm: &LlmClient, current: ContentArtifact, limits: &FieldLimits, edit_prompt: &str) -> Result<EditOutcome> {
    let current_json = serde_json::to_string(&current).expect("ContentArtifact always serializes");
    let prompt = prompts::editing_prompt(&current_json, edit_prompt, current.content_type(), limits);

    let response: Value = llm.chat_json(&prompt.system, &prompt.user).await?;

    let after = validate::parse_and_validate(current.content_type(), &response, limits)
        .map_err(|violations| ClipForgeError::ValidationFailed(violations.join("; ")))?;

    let changes = diff(&current, &after);
    Ok(EditOutcome { before: current, after, changes })
}

fn diff(before: &ContentArtifact, after: &ContentArtifact) -> Vec<String> {
    match (before, after) {
        (ContentArtifact::Reel(before), ContentArtifact::Reel(after)) => diff_reel(before, after),
        (ContentArtifact::ImageCarousel(before), ContentArtifact::ImageCarousel(after)) => diff_carousel(before, after),
        (ContentArtifact::Tweet(before), ContentArtifact::Tweet(after)) => diff_tweet(before, after),
        _ => vec!["content type changed".to_string()],
    }
}

fn diff_reel(before: &Reel, after: &Reel) -> Vec<String> {
    let mut changes = Vec::new();
    push_if_changed(&mut changes, "title", &before.title, &after.title);
    push_if_changed(&mut changes, "caption", &before.caption, &after.caption);
    push_if_changed(&mut changes, "hook", &before.hook, &after.hook);
    push_if_changed(&mut changes, "script", &before.script, &after.script);
    push_if_changed(&mut changes, "visual_suggestions", &before.visual_suggestions, &after.visual_suggestions);
    push_if_changed(&mut changes, "call_to_action", &before.call_to_action, &after.call_to_action);
    push_if_changed(&mut changes, "tags", &before.tags, &after.tags);
    changes
}

fn diff_carousel(before: &Carousel, after: &Carousel) -> Vec<String> {
    let mut changes = Vec::new();
    push_if_changed(&mut changes, "title", &before.title, &after.title);
    push_if_changed(&mut changes, "caption", &before.caption, &after.caption);
    push_if_changed(&mut changes, "call_to_action", &before.call_to_action, &after.call_to_action);

    if before.slides.len() != after.slides.len() {
        changes.push(format!("slide count changed: {} -> {}", before.slides.len(), after.slides.len()));
    }

    for (n, (before_slide, after_slide)) in before.slides.iter().zip(after.slides.iter()).enumerate() {
        if before_slide.heading != after_slide.heading {
            changes.push(format!("slide {} heading changed", n + 1));
        }
        if before_slide.text != after_slide.text {
            changes.push(format!("slide {} text changed", n + 1));
        }
    }

    changes
}

fn diff_tweet(before: &Tweet, after: &Tweet) -> Vec<String> {
    let mut changes = Vec::new();
    push_if_changed(&mut changes, "title", &before.title, &after.title);
    push_if_changed(&mut changes, "text", &before.text, &after.text);
    push_if_changed(&mut changes, "thread", &before.thread, &after.thread);
    push_if_changed(&mut changes, "call_to_action", &before.call_to_action, &after.call_to_action);
    changes
}

fn push_if_changed<T: PartialEq>(changes: &mut Vec<String>, field: &str, before: &T, after: &T) {
    if before != after {
        changes.push(format!("{field} changed"));
    }
}
