use config::FieldLimits;
use model::{Carousel, CarouselSlide, ContentArtifact, ContentType, Reel, Tweet};
use serde_json::Value;

/// Parse a raw LLM completion against `content_type`'s schema and the active field
/// caps. Returns the list of schema/length violations on failure, suitable for both a
/// repair prompt and a dropped-artifact warning log.
pub fn parse_and_validate(content_type: ContentType, raw: &Value, limits: &FieldLimits) -> Result<ContentArtifact, Vec<String>> {
    match content_type {
        ContentType::Reel => {
            let reel: Reel = serde_json::from_value(raw.clone()).map_err(|err| vec![format!("could not parse reel: {err}")])?;
            validate_reel(reel, limits).map(ContentArtifact::Reel)
        }
        ContentType::ImageCarousel => {
            let carousel: Carousel = serde_json::from_value(raw.clone()).map_err(|err| vec![format!("could not parse carousel: {err}")])?;
            validate_carousel(carousel, limits).map(ContentArtifact::ImageCarousel)
        }
        ContentType::Tweet => {
            let tweet: Tweet = serde_json::from_value(raw.clone()).map_err(|err| vec![format!("could not parse tweet: {err}")])?;
            validate_tweet(tweet, limits).map(ContentArtifact::Tweet)
        }
    }
}

fn validate_reel(reel: Reel, limits: &FieldLimits) -> Result<Reel, Vec<String>> {
    let mut violations = Vec::new();

    check_len(&mut violations, "title", &reel.title, limits.reel_title_max);
    check_len(&mut violations, "caption", &reel.caption, limits.reel_caption_max);
    check_len(&mut violations, "hook", &reel.hook, limits.reel_hook_max);
    check_len(&mut violations, "script", &reel.script, limits.reel_script_max);

    if violations.is_empty() { Ok(reel) } else { Err(violations) }
}

fn validate_carousel(carousel: Carousel, limits: &FieldLimits) -> Result<Carousel, Vec<String>> {
    let mut violations = Vec::new();

    check_len(&mut violations, "title", &carousel.title, limits.carousel_title_max);
    check_len(&mut violations, "caption", &carousel.caption, limits.carousel_caption_max);

    let slide_count = carousel.slides.len() as u32;
    if slide_count < limits.carousel_min_slides || slide_count > limits.carousel_max_slides {
        violations.push(format!(
            "slide count: {slide_count}, must be between {} and {}",
            limits.carousel_min_slides, limits.carousel_max_slides
        ));
    }

    for slide in &carousel.slides {
        check_slide_len(&mut violations, slide, "heading", &slide.heading, limits.carousel_slide_heading_max);
        check_slide_len(&mut violations, slide, "text", &slide.text, limits.carousel_slide_text_max);
    }

    if violations.is_empty() { Ok(carousel) } else { Err(violations) }
}

fn validate_tweet(tweet: Tweet, limits: &FieldLimits) -> Result<Tweet, Vec<String>> {
    let mut violations = Vec::new();

    check_len(&mut violations, "title", &tweet.title, limits.tweet_title_max);
    check_len(&mut violations, "text", &tweet.text, limits.tweet_text_max.min(config::TWEET_HARD_CAP));

    for (index, item) in tweet.thread.iter().enumerate() {
        let len = item.chars().count() as u32;
        if len > limits.tweet_thread_item_max {
            violations.push(format!("thread item {}: {len} chars, max {}", index + 1, limits.tweet_thread_item_max));
        }
    }

    if violations.is_empty() { Ok(tweet) } else { Err(violations) }
}

fn check_len(violations: &mut Vec<String>, field: &str, value: &str, max: u32) {
    let len = value.chars().count() as u32;
    if len > max {
        violations.push(format!("{field}: {len} chars, max {max}"));
    }
}

fn check_slide_len(violations: &mut Vec<String>, slide: &CarouselSlide, field: &str, value: &str, max: u32) {
    let len = value.chars().count() as u32;
    if len > max {
        violations.push(format!("slide {} {field}: {len} chars, max {max}", slide.slide_number));
    }
}
