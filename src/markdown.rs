//! Lightweight metadata extraction from markdown source.
//!
//! Pages are never rendered here. Four fields are pulled out of the raw text
//! with targeted line matching:
//!
//! - **Title**: the first level-1 heading (`# Title`) anywhere in the document.
//! - **Description**: a `description:` line inside the frontmatter block.
//! - **Keywords**: a `keywords: [a, "b", 'c']` line inside the frontmatter block.
//! - **Excerpt**: the first paragraph after frontmatter and H1, cut to
//!   [`EXCERPT_LEN`] characters.
//!
//! The frontmatter block must open on the very first line:
//!
//! ```text
//! ---
//! description: Installing the toolchain
//! keywords: [setup, "install"]
//! ---
//! # Installation
//!
//! First paragraph becomes the excerpt.
//! ```
//!
//! Extraction never fails. A missing or malformed block simply yields absent
//! fields; the title scan is independent of the frontmatter.

/// Maximum excerpt length in characters.
pub const EXCERPT_LEN: usize = 150;

const FRONTMATTER_DELIMITER: &str = "---";

/// Metadata shared by navigation nodes and search index entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<Vec<String>>,
}

/// Extract title, description, and keywords from markdown source.
pub fn extract_metadata(content: &str) -> PageMetadata {
    let title = extract_title(content);
    let Some(frontmatter) = split_frontmatter(content).map(|(fm, _)| fm) else {
        return PageMetadata {
            title,
            ..PageMetadata::default()
        };
    };

    PageMetadata {
        title,
        description: frontmatter_value(frontmatter, "description")
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(String::from),
        keywords: frontmatter_value(frontmatter, "keywords").and_then(parse_keyword_list),
    }
}

/// Text of the first `# heading` line, trimmed.
pub fn extract_title(content: &str) -> Option<String> {
    content.lines().find_map(h1_text).map(String::from)
}

/// Derive a search excerpt: the first paragraph after frontmatter and H1.
///
/// Truncation counts characters and may cut mid-word.
pub fn extract_excerpt(content: &str) -> Option<String> {
    let body = split_frontmatter(content).map_or(content, |(_, body)| body);
    let body = remove_first_h1(body);

    let trimmed = body.trim();
    let paragraph = trimmed.split("\n\n").next().unwrap_or_default().trim();
    let excerpt: String = paragraph.chars().take(EXCERPT_LEN).collect();

    if excerpt.is_empty() { None } else { Some(excerpt) }
}

/// Heading text if `line` is a level-1 heading: `#`, whitespace, then text.
fn h1_text(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('#')?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let text = rest.trim();
    (!text.is_empty()).then_some(text)
}

/// Split a document into `(frontmatter, body)`.
///
/// Returns `None` unless the first line is `---` and a later line is exactly
/// `---`. The body starts after the closing delimiter line.
fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let first_newline = content.find('\n')?;
    if content[..first_newline].trim_end_matches('\r') != FRONTMATTER_DELIMITER {
        return None;
    }

    let inner_start = first_newline + 1;
    let mut offset = inner_start;
    for line in content[inner_start..].split_inclusive('\n') {
        let bare = line.trim_end_matches(['\n', '\r']);
        if bare == FRONTMATTER_DELIMITER {
            let frontmatter = content[inner_start..offset].trim_end_matches(['\n', '\r']);
            let body = &content[offset + line.len()..];
            return Some((frontmatter, body));
        }
        offset += line.len();
    }
    None
}

/// Value of a single-line `key: value` entry in a frontmatter block.
fn frontmatter_value<'a>(frontmatter: &'a str, key: &str) -> Option<&'a str> {
    frontmatter.lines().find_map(|line| {
        line.trim_end_matches('\r')
            .strip_prefix(key)?
            .strip_prefix(':')
    })
}

/// Parse an inline YAML list like `[a, "b", 'c']`.
///
/// Empty elements are dropped; an empty result is treated as absent.
fn parse_keyword_list(value: &str) -> Option<Vec<String>> {
    let inner = value.trim().strip_prefix('[')?.strip_suffix(']')?;
    let keywords: Vec<String> = inner
        .split(',')
        .map(|k| k.trim().trim_matches(['"', '\'']).trim())
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect();
    (!keywords.is_empty()).then_some(keywords)
}

/// Remove the first H1 line, keeping its line break so paragraphs stay split.
fn remove_first_h1(body: &str) -> String {
    let mut removed = false;
    let mut out = String::with_capacity(body.len());
    for line in body.split_inclusive('\n') {
        if !removed && h1_text(line.trim_end_matches(['\n', '\r'])).is_some() {
            removed = true;
            if line.ends_with('\n') {
                out.push('\n');
            }
            continue;
        }
        out.push_str(line);
    }
    out
}
