//! Ideation and materialization prompt assembly against the active style and limits.

#![deny(missing_docs)]

mod builder;
mod schema;

pub use builder::{Prompt, editing_prompt, ideation_prompt, materialization_prompt};

fn token_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{FieldLimits, StyleBlock};
    use model::{ContentIdea, ContentType};

    fn style() -> StyleBlock {
        StyleBlock::custom(
            "small online store owners and aspiring entrepreneurs",
            "Visit the link in bio to shop now",
            "drive product discovery and sales",
        )
    }

    fn idea(content_type: ContentType) -> ContentIdea {
        ContentIdea {
            content_type,
            title: "Three mistakes new sellers make".to_string(),
            snippet: "a relevant excerpt pulled from the source transcript".to_string(),
            hints: Default::default(),
        }
    }

    #[test]
    fn style_tokens_do_not_dominate_materialization_prompt() {
        let limits = FieldLimits::default();

        for content_type in ContentType::ALL {
            let prompt = materialization_prompt(&idea(content_type), "source text here", &style(), &limits);

            let style_tokens = token_count(&prompt.style_section);
            let content_tokens = token_count(&prompt.content_section);

            assert!(
                (style_tokens as f64) <= 1.5 * (content_tokens as f64),
                "{content_type:?}: style tokens ({style_tokens}) outnumber content-focus tokens \
                 ({content_tokens}) by more than 1.5x"
            );
        }
    }

    #[test]
    fn ideation_prompt_carries_min_max_ideas() {
        let limits = FieldLimits::default();
        let prompt = ideation_prompt("source material", &style(), &limits);
        assert!(prompt.content_section.contains(&limits.min_ideas.to_string()));
        assert!(prompt.content_section.contains(&limits.max_ideas.to_string()));
    }

    #[test]
    fn materialization_prompt_embeds_active_caps() {
        let mut limits = FieldLimits::default();
        limits.reel_script_max = 1500;
        let prompt = materialization_prompt(&idea(ContentType::Reel), "source", &style(), &limits);
        assert!(prompt.content_section.contains("1500"));
    }

    #[test]
    fn editing_prompt_embeds_current_artifact() {
        let limits = FieldLimits::default();
        let prompt = editing_prompt(r#"{"title": "old"}"#, "make it punchier", ContentType::Tweet, &limits);
        assert!(prompt.content_section.contains(r#"{"title": "old"}"#));
        assert!(prompt.style_section.contains("make it punchier"));
    }
}
