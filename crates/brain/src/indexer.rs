use llm_client::LlmClient;
use model::{ClipForgeError, Result, Source};

use crate::fingerprint::fingerprint;

const INDEX_SYSTEM_PROMPT: &str = "You are a librarian summarizing source material for a searchable knowledge base. \
Respond with a JSON object of the shape {\"topics\": string[], \"summary\": string} and nothing else. \
Produce between 5 and 15 topics and a summary between 200 and 500 characters.";

/// Normalizes raw source text into an indexed [`Source`]: topics, summary, and a
/// retrieval-surrogate fingerprint, computed via one combined LLM completion plus a
/// local (language-model-free) fingerprint pass.
///
/// Re-indexing the same `(kind, id)` is idempotent: calling this again simply
/// overwrites `topics`/`summary`/`fingerprint`/`indexed_at` on the same [`Source`].
pub async fn index(llm: &LlmClient, mut source: Source) -> Result<Source> {
    let response = llm.chat_json(INDEX_SYSTEM_PROMPT, &source.text).await?;

    let topics: Vec<String> = response
        .get("topics")
        .and_then(|v| v.as_array())
        .map(|arr| arr.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
        .ok_or_else(|| ClipForgeError::LlmParseFailed("indexing response missing 'topics' array".to_string()))?;

    let summary = response
        .get("summary")
        .and_then(|v| v.as_str())
        .ok_or_else(|| ClipForgeError::LlmParseFailed("indexing response missing 'summary' string".to_string()))?
        .to_string();

    source.topics = topics;
    source.summary = Some(summary);
    source.fingerprint = Some(fingerprint(&source.text));
    source.indexed_at = Some(jiff::Timestamp::now());

    Ok(source)
}
