use std::path::Path;

use model::{ClipForgeError, Result};

/// Extracted text plus the metadata local-file extraction can derive.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// Full extracted text.
    pub text: String,
    /// Title derived from the filename stem (no extraction step produces a better one
    /// for local files).
    pub detected_title: String,
    /// Free-form metadata; empty for local files today, a seam for future formats.
    pub metadata: std::collections::HashMap<String, String>,
}

/// Extract text from a local file, dispatching on the lowercased extension.
///
/// Supported extensions: `.txt`, `.md` (read as UTF-8), `.docx` (paragraph text in
/// document order), `.pdf` (text layer, page by page). Any other extension is
/// rejected as unsupported.
pub fn extract(path: &Path, bytes: &[u8]) -> Result<ExtractedDocument> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let text = match extension.as_str() {
        "txt" | "md" | "markdown" => extract_plain_text(bytes)?,
        "docx" => extract_docx(bytes)?,
        "pdf" => extract_pdf(bytes)?,
        other => return Err(ClipForgeError::UnsupportedFormat(other.to_string())),
    };

    if text.trim().chars().count() < model::Source::MIN_TEXT_LEN {
        return Err(ClipForgeError::TextTooShort(text.trim().chars().count()));
    }

    let detected_title = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("untitled")
        .to_string();

    Ok(ExtractedDocument { text, detected_title, metadata: std::collections::HashMap::new() })
}

fn extract_plain_text(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec()).map_err(|err| ClipForgeError::UnsupportedFormat(format!("not valid utf-8: {err}")))
}

fn extract_docx(bytes: &[u8]) -> Result<String> {
    let document = docx_rs::read_docx(bytes).map_err(|err| ClipForgeError::UnsupportedFormat(format!("invalid docx: {err}")))?;

    let mut paragraphs = Vec::new();
    for child in &document.document.body.children {
        if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
            let text: String = paragraph
                .children
                .iter()
                .filter_map(|run| match run {
                    docx_rs::ParagraphChild::Run(run) => Some(run_text(run)),
                    _ => None,
                })
                .collect();

            if !text.trim().is_empty() {
                paragraphs.push(text);
            }
        }
    }

    Ok(paragraphs.join("\n\n"))
}

fn run_text(run: &docx_rs::Run) -> String {
    run.children
        .iter()
        .filter_map(|child| match child {
            docx_rs::RunChild::Text(text) => Some(text.text.clone()),
            _ => None,
        })
        .collect()
}

fn extract_pdf(bytes: &[u8]) -> Result<String> {
    let text = pdf_extract::extract_text_from_mem(bytes).map_err(|err| ClipForgeError::UnsupportedFormat(format!("invalid pdf: {err}")))?;

    if text.trim().is_empty() {
        return Err(ClipForgeError::PdfNoText);
    }

    Ok(text)
}
