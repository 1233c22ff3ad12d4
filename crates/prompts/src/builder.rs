use config::{FieldLimits, StyleBlock};
use model::{ContentIdea, ContentType};

use crate::schema;

/// A system/user prompt pair, plus the raw style and content-focus sections used to
/// assemble the user prompt (kept separate so the prompt-balance invariant can be
/// checked directly, instead of re-deriving them by re-parsing the assembled text).
pub struct Prompt {
    /// The system message.
    pub system: String,
    /// The user message, `style_section` followed by `content_section`.
    pub user: String,
    /// The portion of `user` devoted to style guidance.
    pub style_section: String,
    /// The portion of `user` devoted to the content task and its schema.
    pub content_section: String,
}

impl Prompt {
    fn assemble(system: String, style_section: String, content_section: String) -> Self {
        let user = format!("{style_section}\n\n{content_section}");
        Self { system, user, style_section, content_section }
    }
}

fn style_guide(style: &StyleBlock) -> String {
    format!(
        "Style guide (use as a guide, not a rigid constraint):\n\
         - Target audience: {}\n\
         - Call to action: {}\n\
         - Content goal: {}\n\
         - Language: {}\n\
         - Tone: {}\n\
         {}",
        style.target_audience,
        style.call_to_action,
        style.content_goal,
        style.language,
        style.tone,
        if style.additional_instructions.is_empty() {
            String::new()
        } else {
            format!("- Additional instructions: {}\n", style.additional_instructions)
        }
    )
}

/// Build the ideation prompt: extract `min_ideas`-`max_ideas` ideas from `source_text`.
pub fn ideation_prompt(source_text: &str, style: &StyleBlock, limits: &FieldLimits) -> Prompt {
    let system = "You are a short-form content strategist. Respond with a single JSON object and nothing else.".to_string();

    let style_section = style_guide(style);

    let content_section = format!(
        "Read the following source material and extract between {} and {} distinct content ideas, \
         each suited to one of: reel, image-carousel, tweet. Favor ideas with concrete hooks, numbers, \
         or contrarian angles over generic summaries.\n\n\
         Respond as: {{ \"ideas\": [ {{ \"content_type\": \"reel\" | \"image-carousel\" | \"tweet\", \
         \"title\": string, \"snippet\": string, \"hints\": object }} ] }}\n\n\
         Source material:\n{source_text}",
        limits.min_ideas, limits.max_ideas
    );

    Prompt::assemble(system, style_section, content_section)
}

/// Build the materialization prompt for one idea, embedding the type's schema and the
/// active field caps.
pub fn materialization_prompt(idea: &ContentIdea, source_text: &str, style: &StyleBlock, limits: &FieldLimits) -> Prompt {
    let system = "You turn a single content idea into a fully-written social media artifact. \
Respond with a single JSON object matching the given schema and nothing else."
        .to_string();

    let style_section = style_guide(style);

    let content_section = format!(
        "Idea: {}\nType: {:?}\nRelevant snippet: {}\n\nSchema:\n{}\n\nSource material for grounding:\n{source_text}",
        idea.title,
        idea.content_type,
        idea.snippet,
        schema::describe(idea.content_type, limits)
    );

    Prompt::assemble(system, style_section, content_section)
}

/// Build the editing prompt for `edit_prompt` applied to the current artifact.
pub fn editing_prompt(current_artifact_json: &str, edit_prompt: &str, content_type: ContentType, limits: &FieldLimits) -> Prompt {
    let system = "You edit an existing social media artifact per the user's instruction. \
Respond with a single JSON object matching the given schema and nothing else."
        .to_string();

    let style_section = format!("Edit instruction:\n{edit_prompt}");

    let content_section = format!(
        "Current artifact:\n{current_artifact_json}\n\nSchema:\n{}",
        schema::describe(content_type, limits)
    );

    Prompt::assemble(system, style_section, content_section)
}
