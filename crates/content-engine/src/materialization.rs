use std::collections::HashMap;
use std::sync::Arc;

use config::{FieldLimits, StyleBlock};
use futures::future::join_all;
use llm_client::LlmClient;
use model::{ClipForgeError, ContentArtifact, ContentIdea, ContentType, Result, content_id};
use tokio::sync::Semaphore;

use crate::validate;

const MAX_REPAIR_ATTEMPTS: u32 = 2;
const DEFAULT_GROUP_PARALLELISM: usize = 3;

/// Turn a list of [`ContentIdea`]s into validated [`ContentArtifact`]s.
///
/// Ideas are grouped by content type; groups run concurrently (bounded by
/// `DEFAULT_GROUP_PARALLELISM`), each group's calls run sequentially (rate-limiting is
/// enforced by the shared [`LlmClient`], not by this engine). Artifacts that fail
/// validation after two repair attempts are dropped with a warning; the pipeline
/// succeeds as long as at least one artifact survives.
pub async fn materialize(
    llm: &LlmClient,
    ideas: &[ContentIdea],
    source_id: &str,
    source_text: &str,
    style: &StyleBlock,
    limits: &FieldLimits,
) -> Result<Vec<ContentArtifact>> {
    let mut grouped: HashMap<ContentType, Vec<(usize, &ContentIdea)>> = HashMap::new();
    for (index, idea) in ideas.iter().enumerate() {
        grouped.entry(idea.content_type).or_default().push((index, idea));
    }

    let semaphore = Arc::new(Semaphore::new(DEFAULT_GROUP_PARALLELISM));

    let group_futures = grouped.into_iter().map(|(content_type, group_ideas)| {
        let semaphore = Arc::clone(&semaphore);
        async move {
            let _permit = semaphore.acquire().await.expect("semaphore is never closed");
            materialize_group(llm, content_type, group_ideas, source_id, source_text, style, limits).await
        }
    });

    let mut results: Vec<(usize, ContentArtifact)> = join_all(group_futures).await.into_iter().flatten().collect();
    results.sort_by_key(|(index, _)| *index);

    let artifacts: Vec<ContentArtifact> = results.into_iter().map(|(_, artifact)| artifact).collect();
    if artifacts.is_empty() { Err(ClipForgeError::MaterializationEmpty) } else { Ok(artifacts) }
}

async fn materialize_group(
    llm: &LlmClient,
    content_type: ContentType,
    ideas: Vec<(usize, &ContentIdea)>,
    source_id: &str,
    source_text: &str,
    style: &StyleBlock,
    limits: &FieldLimits,
) -> Vec<(usize, ContentArtifact)> {
    let mut survivors = Vec::new();
    let mut next_index_within_type = 1u32;

    for (ideation_index, idea) in ideas {
        match materialize_one(llm, idea, source_text, style, limits).await {
            Ok(mut artifact) => {
                artifact.set_content_id(content_id(source_id, content_type, next_index_within_type));
                next_index_within_type += 1;
                survivors.push((ideation_index, artifact));
            }
            Err(violations) => {
                log::warn!("dropping {content_type:?} artifact for idea '{}' after repairs: {violations:?}", idea.title);
            }
        }
    }

    survivors
}

async fn materialize_one(
    llm: &LlmClient,
    idea: &ContentIdea,
    source_text: &str,
    style: &StyleBlock,
    limits: &FieldLimits,
) -> std::result::Result<ContentArtifact, Vec<String>> {
    let prompt = prompts::materialization_prompt(idea, source_text, style, limits);

    let mut response = llm
        .chat_json(&prompt.system, &prompt.user)
        .await
        .map_err(|err| vec![err.to_string()])?;

    for attempt in 0..=MAX_REPAIR_ATTEMPTS {
        match validate::parse_and_validate(idea.content_type, &response, limits) {
            Ok(artifact) => return Ok(artifact),
            Err(violations) if attempt == MAX_REPAIR_ATTEMPTS => return Err(violations),
            Err(violations) => {
                let repair_user = format!(
                    "{}\n\nYour previous response violated these constraints:\n{}\n\nPrevious response:\n{response}\n\nRespond again with a corrected JSON object.",
                    prompt.user,
                    violations.join("\n")
                );
                response = llm
                    .chat_json(&prompt.system, &repair_user)
                    .await
                    .map_err(|err| vec![err.to_string()])?;
            }
        }
    }

    unreachable!("loop always returns on the final attempt")
}
