use std::collections::HashMap;
use std::net::IpAddr;
use std::time::Duration;

use model::{ClipForgeError, Result};
use scraper::{Html, Selector};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
const BLOCKED_HOST_SUFFIXES: [&str; 2] = ["youtube.com", "youtu.be"];

/// Markdown text plus whatever page metadata could be recovered, from one URL fetch.
#[derive(Debug, Clone)]
pub struct ExtractedPage {
    /// Boilerplate-stripped Markdown, preserving tables and links.
    pub markdown: String,
    /// Page title, author, publication date, site name — whichever were present.
    pub metadata: HashMap<String, String>,
}

/// Validate that a URL is safe to fetch: well-formed, not a private-network address,
/// and not a video-platform host (those go through the Transcript Acquirer instead).
pub fn validate(url: &str) -> Result<url::Url> {
    let parsed = url::Url::parse(url).map_err(|err| ClipForgeError::InvalidUrl(err.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ClipForgeError::InvalidUrl(format!("unsupported scheme: {}", parsed.scheme())));
    }

    let host = parsed.host_str().ok_or_else(|| ClipForgeError::InvalidUrl("url has no host".to_string()))?;

    if BLOCKED_HOST_SUFFIXES.iter().any(|suffix| host == *suffix || host.ends_with(&format!(".{suffix}"))) {
        return Err(ClipForgeError::InvalidUrl("video platform urls go through the transcript acquirer".to_string()));
    }

    if let Ok(ip) = host.parse::<IpAddr>() {
        if is_private(&ip) {
            return Err(ClipForgeError::InvalidUrl("private-network addresses are not allowed".to_string()));
        }
    } else if host == "localhost" {
        return Err(ClipForgeError::InvalidUrl("private-network addresses are not allowed".to_string()));
    }

    Ok(parsed)
}

fn is_private(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_private() || v4.is_loopback() || v4.is_link_local(),
        IpAddr::V6(v6) => v6.is_loopback() || (v6.segments()[0] & 0xfe00) == 0xfc00,
    }
}

/// Download a URL's HTML and convert it into boilerplate-stripped Markdown.
pub async fn extract(client: &reqwest::Client, url: &str) -> Result<ExtractedPage> {
    let parsed = validate(url)?;

    let response = client
        .get(parsed)
        .timeout(FETCH_TIMEOUT)
        .send()
        .await
        .map_err(|err| ClipForgeError::UrlFetchFailed(err.to_string()))?;

    if !response.status().is_success() {
        return Err(ClipForgeError::UrlFetchFailed(format!("http {}", response.status())));
    }

    let html = response.text().await.map_err(|err| ClipForgeError::UrlFetchFailed(err.to_string()))?;

    let document = Html::parse_document(&html);
    let metadata = extract_metadata(&document);
    let markdown = html_to_markdown(&document);

    if markdown.trim().is_empty() {
        return Err(ClipForgeError::UrlEmptyExtraction);
    }

    Ok(ExtractedPage { markdown, metadata })
}

fn extract_metadata(document: &Html) -> HashMap<String, String> {
    let mut metadata = HashMap::new();

    if let Some(title) = select_one_text(document, "title") {
        metadata.insert("title".to_string(), title);
    }

    for (key, selector) in [
        ("author", r#"meta[name="author"]"#),
        ("date", r#"meta[property="article:published_time"]"#),
        ("site_name", r#"meta[property="og:site_name"]"#),
    ] {
        if let Some(value) = select_one_attr(document, selector, "content") {
            metadata.insert(key.to_string(), value);
        }
    }

    metadata
}

fn select_one_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document.select(&selector).next().map(|el| el.text().collect::<String>().trim().to_string())
}

fn select_one_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document.select(&selector).next().and_then(|el| el.value().attr(attr)).map(str::to_string)
}

const BOILERPLATE_TAGS: [&str; 5] = ["nav", "header", "footer", "script", "style"];
const MAIN_CONTENT_SELECTORS: [&str; 3] = ["article", "main", "body"];

fn html_to_markdown(document: &Html) -> String {
    let root = MAIN_CONTENT_SELECTORS.iter().find_map(|selector| {
        let selector = Selector::parse(selector).ok()?;
        document.select(&selector).next()
    });

    let Some(root) = root else { return String::new() };

    let mut lines = Vec::new();
    render_element(root, &mut lines);
    lines.join("\n\n").trim().to_string()
}

fn render_element(element: scraper::ElementRef<'_>, lines: &mut Vec<String>) {
    let tag = element.value().name();

    if BOILERPLATE_TAGS.contains(&tag) {
        return;
    }

    match tag {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = tag[1..].parse::<usize>().unwrap_or(1);
            let text = element.text().collect::<String>().trim().to_string();
            if !text.is_empty() {
                lines.push(format!("{} {text}", "#".repeat(level)));
            }
            return;
        }
        "a" => {
            let text = element.text().collect::<String>();
            if let Some(href) = element.value().attr("href") {
                lines.push(format!("[{}]({href})", text.trim()));
                return;
            }
        }
        "table" => {
            lines.push(render_table(element));
            return;
        }
        "p" | "li" => {
            let text = element.text().collect::<String>().trim().to_string();
            if !text.is_empty() {
                lines.push(text);
            }
            return;
        }
        _ => {}
    }

    for child in element.children().filter_map(scraper::ElementRef::wrap) {
        render_element(child, lines);
    }
}

fn render_table(table: scraper::ElementRef<'_>) -> String {
    let row_selector = Selector::parse("tr").expect("static selector is valid");
    let cell_selector = Selector::parse("th, td").expect("static selector is valid");

    let mut rows: Vec<Vec<String>> = Vec::new();
    for row in table.select(&row_selector) {
        let cells: Vec<String> = row.select(&cell_selector).map(|cell| cell.text().collect::<String>().trim().to_string()).collect();
        if !cells.is_empty() {
            rows.push(cells);
        }
    }

    if rows.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(&format!("| {} |\n", rows[0].join(" | ")));
    out.push_str(&format!("| {} |\n", rows[0].iter().map(|_| "---").collect::<Vec<_>>().join(" | ")));
    for row in &rows[1..] {
        out.push_str(&format!("| {} |\n", row.join(" | ")));
    }

    out.trim_end().to_string()
}
