use config::FieldLimits;
use model::ContentType;

/// Render the JSON schema description embedded in a materialization prompt for one
/// content type, against the currently active field caps.
pub fn describe(content_type: ContentType, limits: &FieldLimits) -> String {
    match content_type {
        ContentType::Reel => format!(
            "{{\n  \"title\": string (<= {} chars),\n  \"caption\": string (<= {} chars),\n  \"hook\": string (<= {} chars),\n  \"script\": string (<= {} chars),\n  \"visual_suggestions\": string | null,\n  \"tags\": string[],\n  \"call_to_action\": string | null,\n  \"estimated_duration_seconds\": number | null,\n  \"music_suggestion\": string | null\n}}",
            limits.reel_title_max, limits.reel_caption_max, limits.reel_hook_max, limits.reel_script_max
        ),
        ContentType::ImageCarousel => format!(
            "{{\n  \"title\": string (<= {} chars),\n  \"caption\": string (<= {} chars),\n  \"slides\": array of {{ \"heading\": string (<= {} chars), \"text\": string (<= {} chars, aim 400-800 chars / 3-5 sentences) }}, length between {} and {},\n  \"tags\": string[],\n  \"call_to_action\": string | null,\n  \"design_notes\": string | null\n}}",
            limits.carousel_title_max,
            limits.carousel_caption_max,
            limits.carousel_slide_heading_max,
            limits.carousel_slide_text_max,
            limits.carousel_min_slides,
            limits.carousel_max_slides
        ),
        ContentType::Tweet => format!(
            "{{\n  \"title\": string (<= {} chars),\n  \"text\": string (<= {} chars),\n  \"thread\": string[] (each <= {} chars),\n  \"tags\": string[],\n  \"call_to_action\": string | null\n}}",
            limits.tweet_title_max, limits.tweet_text_max, limits.tweet_thread_item_max
        ),
    }
}
