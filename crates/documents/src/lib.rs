//! Document Parser: local file extraction (text/Markdown/Word/PDF) and boilerplate-
//! stripped URL extraction into Markdown.

#![deny(missing_docs)]

mod file;
mod url_extract;

pub use file::{ExtractedDocument, extract as extract_file};
pub use url_extract::{ExtractedPage, extract as extract_url, validate as validate_url};

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn rejects_unsupported_extension() {
        let err = extract_file(Path::new("notes.rtf"), b"hello").unwrap_err();
        assert_eq!(err.kind(), "unsupported-format");
    }

    #[test]
    fn rejects_text_below_minimum_length() {
        let err = extract_file(Path::new("notes.txt"), b"too short").unwrap_err();
        assert_eq!(err.kind(), "text-too-short");
    }

    #[test]
    fn plain_text_round_trips_and_derives_title_from_stem() {
        let body = "x".repeat(60);
        let extracted = extract_file(Path::new("my-notes.md"), body.as_bytes()).unwrap();
        assert_eq!(extracted.detected_title, "my-notes");
        assert_eq!(extracted.text, body);
    }

    #[test]
    fn rejects_private_network_urls() {
        let err = validate_url("http://127.0.0.1/secret").unwrap_err();
        assert_eq!(err.kind(), "invalid-url");
    }

    #[test]
    fn rejects_youtube_urls() {
        let err = validate_url("https://www.youtube.com/watch?v=abc123").unwrap_err();
        assert_eq!(err.kind(), "invalid-url");
    }

    #[test]
    fn accepts_ordinary_https_urls() {
        assert!(validate_url("https://example.com/article").is_ok());
    }
}
