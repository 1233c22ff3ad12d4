use config::FieldLimits;
use model::{BrainMode, BrainSession, ClipForgeError, HybridStrategy, Result, Source};

use crate::retriever::{SearchFilter, search};

/// Default top-K for [`ComposeRequest::Vision`] retrieval.
const VISION_TOP_K: usize = 5;

/// A caller's request to the Brain Composer, one variant per mode (`spec.md` §4.14).
pub enum ComposeRequest {
    /// A free-form creative vision drives retrieval; the top-K matching sources are
    /// concatenated with the vision as context for ideation.
    Vision {
        /// The caller's creative vision text.
        vision: String,
    },
    /// Full-AI mode, `single` sub-variant: exactly one idea, model-chosen type.
    Single {
        /// Caller-chosen source ids.
        source_ids: Vec<String>,
    },
    /// Full-AI mode, `multiple` sub-variant: caller-chosen idea count.
    Multiple {
        /// Caller-chosen source ids.
        source_ids: Vec<String>,
        /// Exact idea count to request.
        count: u32,
    },
    /// Full-AI mode, `auto` sub-variant: model chooses the idea count.
    Auto {
        /// Caller-chosen source ids.
        source_ids: Vec<String>,
    },
    /// Hybrid mode: user-chosen sources augmented by the Brain under a named strategy.
    Hybrid {
        /// Caller-chosen source ids.
        source_ids: Vec<String>,
        /// Augmentation strategy.
        strategy: HybridStrategy,
        /// Query used to retrieve augmenting sources, for `augment` and `support`.
        hint_query: Option<String>,
        /// Target total source count, for `fill`.
        fill_target: Option<usize>,
    },
}

/// The result of composing a [`ComposeRequest`]: concatenated source text ready for the
/// Ideation Engine, the field limits to request ideas under, and a freshly created
/// [`BrainSession`] recording attribution.
pub struct ComposedContext {
    /// Concatenated, delimited source text to feed the Ideation Engine.
    pub source_text: String,
    /// Field limits to use for this request's ideation call (`min_ideas`/`max_ideas`
    /// adjusted for `single`/`multiple`; unchanged for `vision`/`auto`/`hybrid`).
    pub limits: FieldLimits,
    /// The session record: mode, vision, user/matched source ids, status `composing`.
    pub session: BrainSession,
    /// Source ids available for primary attribution (excludes hybrid `support` sources).
    pub primary_source_ids: Vec<String>,
    /// Source ids present in the prompt but never eligible for primary attribution
    /// (hybrid `support` additions only).
    pub supporting_source_ids: Vec<String>,
}

fn find<'a>(candidates: &'a [Source], id: &str) -> Result<&'a Source> {
    candidates.iter().find(|source| source.id == id).ok_or_else(|| ClipForgeError::SourceNotFound(id.to_string()))
}

fn render(sources: &[&Source]) -> String {
    sources
        .iter()
        .map(|source| format!("--- SOURCE: {} ---\n{}", source.title, source.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Compose a [`ComposeRequest`] into a [`ComposedContext`] against the indexed
/// `candidates` and the caller's `base_limits`.
pub fn compose(candidates: &[Source], request: ComposeRequest, base_limits: &FieldLimits) -> Result<ComposedContext> {
    let session_id = uuid::Uuid::new_v4().to_string();

    match request {
        ComposeRequest::Vision { vision } => {
            let filter = SearchFilter { limit: VISION_TOP_K, ..SearchFilter::default() };
            let matches = search(candidates, &vision, &filter);

            let matched_source_ids: Vec<(String, f32)> = matches.iter().map(|m| (m.source_id.clone(), m.score)).collect();
            let sources: Vec<&Source> = matches.iter().filter_map(|m| candidates.iter().find(|s| s.id == m.source_id)).collect();

            let mut session = BrainSession::new(session_id, BrainMode::Vision);
            session.vision = Some(vision.clone());
            session.matched_source_ids = matched_source_ids.clone();

            let primary_source_ids = matched_source_ids.into_iter().map(|(id, _)| id).collect();
            let source_text = format!("VISION: {vision}\n\n{}", render(&sources));

            Ok(ComposedContext { source_text, limits: *base_limits, session, primary_source_ids, supporting_source_ids: Vec::new() })
        }

        ComposeRequest::Single { source_ids } => {
            let sources = source_ids.iter().map(|id| find(candidates, id)).collect::<Result<Vec<_>>>()?;
            let mut limits = *base_limits;
            limits.min_ideas = 1;
            limits.max_ideas = 1;

            let mut session = BrainSession::new(session_id, BrainMode::AutoSingle);
            session.user_source_ids = source_ids.clone();

            Ok(ComposedContext { source_text: render(&sources), limits, session, primary_source_ids: source_ids, supporting_source_ids: Vec::new() })
        }

        ComposeRequest::Multiple { source_ids, count } => {
            let sources = source_ids.iter().map(|id| find(candidates, id)).collect::<Result<Vec<_>>>()?;
            let mut limits = *base_limits;
            limits.min_ideas = count;
            limits.max_ideas = count;

            let mut session = BrainSession::new(session_id, BrainMode::AutoMultiple);
            session.user_source_ids = source_ids.clone();

            Ok(ComposedContext { source_text: render(&sources), limits, session, primary_source_ids: source_ids, supporting_source_ids: Vec::new() })
        }

        ComposeRequest::Auto { source_ids } => {
            let sources = source_ids.iter().map(|id| find(candidates, id)).collect::<Result<Vec<_>>>()?;

            let mut session = BrainSession::new(session_id, BrainMode::AutoAuto);
            session.user_source_ids = source_ids.clone();

            Ok(ComposedContext {
                source_text: render(&sources),
                limits: *base_limits,
                session,
                primary_source_ids: source_ids,
                supporting_source_ids: Vec::new(),
            })
        }

        ComposeRequest::Hybrid { source_ids, strategy, hint_query, fill_target } => {
            let user_sources = source_ids.iter().map(|id| find(candidates, id)).collect::<Result<Vec<_>>>()?;

            let (augmenting_ids, augmenting_scores): (Vec<String>, Vec<(String, f32)>) = match strategy {
                HybridStrategy::Augment | HybridStrategy::Support => {
                    let query = hint_query.clone().unwrap_or_default();
                    let filter = SearchFilter { limit: VISION_TOP_K, ..SearchFilter::default() };
                    let matches: Vec<_> =
                        search(candidates, &query, &filter).into_iter().filter(|m| !source_ids.contains(&m.source_id)).collect();
                    (matches.iter().map(|m| m.source_id.clone()).collect(), matches.into_iter().map(|m| (m.source_id, m.score)).collect())
                }
                HybridStrategy::Fill => {
                    let target = fill_target.unwrap_or(source_ids.len());
                    let needed = target.saturating_sub(source_ids.len());
                    let query = hint_query.clone().unwrap_or_default();
                    let filter = SearchFilter { limit: needed, ..SearchFilter::default() };
                    let matches: Vec<_> =
                        search(candidates, &query, &filter).into_iter().filter(|m| !source_ids.contains(&m.source_id)).collect();
                    (matches.iter().map(|m| m.source_id.clone()).collect(), matches.into_iter().map(|m| (m.source_id, m.score)).collect())
                }
            };

            let augmenting_sources: Vec<&Source> = augmenting_ids.iter().filter_map(|id| candidates.iter().find(|s| &s.id == id)).collect();

            let mut session = BrainSession::new(session_id, BrainMode::Hybrid);
            session.user_source_ids = source_ids.clone();
            session.matched_source_ids = augmenting_scores;

            let mut all_sources = user_sources;
            all_sources.extend(augmenting_sources);

            let (primary_source_ids, supporting_source_ids) = match strategy {
                HybridStrategy::Support => (source_ids, augmenting_ids),
                HybridStrategy::Augment | HybridStrategy::Fill => {
                    let mut primary = source_ids;
                    primary.extend(augmenting_ids);
                    (primary, Vec::new())
                }
            };

            Ok(ComposedContext { source_text: render(&all_sources), limits: *base_limits, session, primary_source_ids, supporting_source_ids })
        }
    }
}
