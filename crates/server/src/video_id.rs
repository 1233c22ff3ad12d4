use model::{ClipForgeError, Result};

/// Validate a YouTube video id: exactly 11 characters drawn from
/// `[A-Za-z0-9_-]`, the platform's well-formed id shape.
pub fn validate(video_id: &str) -> Result<()> {
    if video_id.len() == 11 && video_id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        Ok(())
    } else {
        Err(ClipForgeError::InvalidVideoId(video_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_id() {
        assert!(validate("dQw4w9WgXcQ").is_ok());
    }

    #[test]
    fn rejects_wrong_length() {
        let err = validate("short").unwrap_err();
        assert_eq!(err.kind(), "invalid-video-id");
    }

    #[test]
    fn rejects_disallowed_characters() {
        let err = validate("dQw4w9Wg$cQ").unwrap_err();
        assert_eq!(err.kind(), "invalid-video-id");
    }
}
