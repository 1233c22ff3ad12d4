/// Caller-tunable knobs for [`crate::TranscriptAcquirer::get_english`].
#[derive(Debug, Clone)]
pub struct Preferences {
    /// Prefer a manual transcript over an auto-generated one when both exist.
    pub prefer_manual: bool,
    /// If true, a translation failure is a hard failure; if false, fall back to the
    /// best-available original-language transcript.
    pub require_english: bool,
    /// Whether machine translation may be used at all.
    pub enable_translation: bool,
    /// Ordered language preference used when choosing which non-English transcript to
    /// translate.
    pub fallback_languages: Vec<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            prefer_manual: true,
            require_english: true,
            enable_translation: true,
            fallback_languages: vec!["en".to_string(), "es".to_string(), "fr".to_string(), "de".to_string()],
        }
    }
}
