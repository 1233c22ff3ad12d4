use std::sync::Arc;

use llm_client::LlmClient;
use model::{ClipForgeError, Result, TranscriptCacheEntry, TranscriptDescriptor, TranscriptPriority, TranscriptResult, TranscriptVariant};

use crate::cache::TranscriptCache;
use crate::preferences::Preferences;
use crate::provider::TranscriptProvider;

const TRANSLATION_SYSTEM_PROMPT: &str = "You translate video transcripts into natural, fluent English. \
Respond with a JSON object of the shape {\"translation\": string} and nothing else.";

/// Selects the best available English transcript for a video, following the priority
/// ladder cache → manual English → auto English → manual translated → auto translated.
pub struct TranscriptAcquirer {
    provider: Arc<dyn TranscriptProvider>,
    cache: Arc<dyn TranscriptCache>,
    llm: LlmClient,
}

impl TranscriptAcquirer {
    /// Build an acquirer from its three collaborators.
    pub fn new(provider: Arc<dyn TranscriptProvider>, cache: Arc<dyn TranscriptCache>, llm: LlmClient) -> Self {
        Self { provider, cache, llm }
    }

    /// List every caption track the provider offers, unfiltered.
    pub async fn list_available(&self, video_id: &str) -> Result<Vec<TranscriptDescriptor>> {
        self.provider.list_available(video_id).await
    }

    /// Run the 8-step selection algorithm and return the best English transcript.
    pub async fn get_english(&self, video_id: &str, preferences: &Preferences) -> Result<TranscriptResult> {
        let mut notes = Vec::new();

        if let Some(entry) = self.cache.get(video_id, "en", TranscriptVariant::Manual).await {
            notes.push("cache hit: manual english".to_string());
            return Ok(TranscriptResult::new(entry.text, TranscriptPriority::ManualEnglish, None, notes));
        }
        notes.push("cache miss: manual english".to_string());

        if let Some(entry) = self.cache.get(video_id, "en", TranscriptVariant::AutoGenerated).await {
            notes.push("cache hit: auto english".to_string());
            return Ok(TranscriptResult::new(entry.text, TranscriptPriority::AutoEnglish, None, notes));
        }
        notes.push("cache miss: auto english".to_string());

        let available = self.provider.list_available(video_id).await?;
        if available.is_empty() {
            notes.push("provider returned no tracks".to_string());
            return Err(ClipForgeError::NoTranscriptFound);
        }
        notes.push(format!("provider offers {} track(s)", available.len()));

        if let Some(descriptor) = find(&available, "en", TranscriptVariant::Manual) {
            let text = self.provider.fetch_text(video_id, descriptor).await?;
            self.store(video_id, "en", TranscriptVariant::Manual, &text, None).await;
            notes.push("manual english available: fetched and cached".to_string());
            return Ok(TranscriptResult::new(text, TranscriptPriority::ManualEnglish, None, notes));
        }
        notes.push("manual en not available".to_string());

        if let Some(descriptor) = find(&available, "en", TranscriptVariant::AutoGenerated) {
            let text = self.provider.fetch_text(video_id, descriptor).await?;
            self.store(video_id, "en", TranscriptVariant::AutoGenerated, &text, None).await;
            notes.push("auto english available: fetched and cached".to_string());
            return Ok(TranscriptResult::new(text, TranscriptPriority::AutoEnglish, None, notes));
        }
        notes.push("auto en not available".to_string());

        if preferences.enable_translation {
            if let Some(descriptor) = pick_translatable(&available, preferences, TranscriptVariant::Manual) {
                notes.push(format!("translating from {}", descriptor.language_code));
                return self.translate_and_store(video_id, descriptor, TranscriptPriority::ManualTranslated, preferences, notes).await;
            }
            notes.push("no manual translatable transcript".to_string());

            if let Some(descriptor) = pick_translatable(&available, preferences, TranscriptVariant::AutoGenerated) {
                notes.push(format!("translating (auto) from {}", descriptor.language_code));
                return self.translate_and_store(video_id, descriptor, TranscriptPriority::AutoTranslated, preferences, notes).await;
            }
            notes.push("no auto translatable transcript".to_string());
        } else {
            notes.push("translation disabled by preferences".to_string());
        }

        Err(ClipForgeError::NoTranscriptFound)
    }

    async fn translate_and_store(
        &self,
        video_id: &str,
        descriptor: &TranscriptDescriptor,
        priority: TranscriptPriority,
        preferences: &Preferences,
        mut notes: Vec<String>,
    ) -> Result<TranscriptResult> {
        let original = self.provider.fetch_text(video_id, descriptor).await?;
        self.store(video_id, &descriptor.language_code, descriptor.variant, &original, None).await;

        match self.translate(&original).await {
            Ok(translated) => {
                self.store(video_id, "en", descriptor.variant, &translated, Some(descriptor.language_code.clone())).await;
                notes.push("translation succeeded".to_string());
                Ok(TranscriptResult::new(translated, priority, Some(descriptor.language_code.clone()), notes))
            }
            Err(err) => {
                notes.push(format!("translation failed: {err}"));
                if preferences.require_english {
                    Err(ClipForgeError::TranslationFailed(err.to_string()))
                } else {
                    notes.push("require-english is false: falling back to original language".to_string());
                    Ok(TranscriptResult::new(original, priority, Some(descriptor.language_code.clone()), notes))
                }
            }
        }
    }

    async fn translate(&self, text: &str) -> Result<String> {
        let response = self.llm.chat_json(TRANSLATION_SYSTEM_PROMPT, text).await?;
        response
            .get("translation")
            .and_then(|value| value.as_str())
            .map(str::to_string)
            .ok_or_else(|| ClipForgeError::TranslationFailed("llm response missing 'translation' field".to_string()))
    }

    async fn store(&self, video_id: &str, language: &str, variant: TranscriptVariant, text: &str, source_language: Option<String>) {
        self.cache
            .put(TranscriptCacheEntry {
                video_id: video_id.to_string(),
                language: language.to_string(),
                variant,
                text: text.to_string(),
                source_language,
                cached_at: jiff::Timestamp::now(),
            })
            .await;
    }
}

fn find<'a>(available: &'a [TranscriptDescriptor], language_code: &str, variant: TranscriptVariant) -> Option<&'a TranscriptDescriptor> {
    available.iter().find(|d| d.language_code == language_code && d.variant == variant)
}

fn pick_translatable<'a>(
    available: &'a [TranscriptDescriptor],
    preferences: &Preferences,
    variant: TranscriptVariant,
) -> Option<&'a TranscriptDescriptor> {
    for language in &preferences.fallback_languages {
        if let Some(descriptor) = available.iter().find(|d| d.variant == variant && d.is_translatable && &d.language_code == language) {
            return Some(descriptor);
        }
    }

    available.iter().find(|d| d.variant == variant && d.is_translatable)
}
