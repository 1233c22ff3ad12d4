//! The shared ideation + materialization core both the synchronous and streaming
//! endpoints drive; the only difference between them is whether a [`TaskContext`]
//! is there to report progress through.

use config::{FieldLimits, StyleBlock};
use content_engine::{generate_ideas, materialize};
use model::{ContentArtifact, ContentIdea, Result, Stage};
use progress::TaskContext;

use crate::state::AppState;

/// The ideas and surviving artifacts one generation run produced.
pub struct GenerationOutcome {
    /// The ideas ideation proposed, before materialization and any drops.
    pub ideas: Vec<ContentIdea>,
    /// The artifacts that survived materialization and validation.
    pub artifacts: Vec<ContentArtifact>,
}

/// Run ideation then materialization against `source_text`, persisting every
/// surviving artifact under `source_id`. `task` is `None` for the synchronous
/// endpoint, which awaits this inline; the streaming endpoint passes its
/// [`TaskContext`] so progress fans out to subscribers as it goes.
pub async fn generate_for_source(
    state: &AppState,
    task: Option<&TaskContext>,
    source_id: &str,
    source_text: &str,
    style: &StyleBlock,
    limits: &FieldLimits,
) -> Result<GenerationOutcome> {
    if let Some(task) = task {
        task.report(Stage::GeneratingContent, "generating content ideas").await;
    }

    let ideas = generate_ideas(&state.llm, source_text, style, limits).await?;

    if let Some(task) = task {
        task.report(Stage::IdeasGenerated, format!("{} ideas generated", ideas.len())).await;
        task.report(Stage::CreatingContent, "materializing content artifacts").await;
    }

    let artifacts = materialize(&state.llm, &ideas, source_id, source_text, style, limits).await?;

    for artifact in &artifacts {
        state.repo.put_artifact(artifact.clone()).await;
    }

    if let Some(task) = task {
        task.report(Stage::ContentGenerated, format!("{} artifacts generated", artifacts.len())).await;
    }

    Ok(GenerationOutcome { ideas, artifacts })
}
