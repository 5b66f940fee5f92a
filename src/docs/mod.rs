// Documentation pages
//
// A page is a route path plus a flat list of blocks parsed from markdown:
// headings (each with an anchor id), text paragraphs and fenced code blocks.
// The document panel lays these out; code blocks become CodeBlock widgets.

mod demo;

pub use demo::demo_pages;

use anyhow::{Context, Result};
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// A renderable piece of a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading {
        level: u8,
        text: String,
        anchor: String,
    },
    Text(String),
    Code {
        /// Info-string language, `None` when the fence has none
        language: Option<String>,
        code: String,
    },
}

/// One routable documentation page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Route path, always starting with `/`
    pub path: String,
    pub title: String,
    pub blocks: Vec<Block>,
}

impl Page {
    /// Headings with their anchors, in document order
    pub fn headings(&self) -> impl Iterator<Item = (u8, &str, &str)> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Heading {
                level,
                text,
                anchor,
            } => Some((*level, text.as_str(), anchor.as_str())),
            _ => None,
        })
    }

    /// Whole page as plain text (headings, paragraphs, code)
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| match b {
                Block::Heading { level, text, .. } => {
                    format!("{} {}", "#".repeat(*level as usize), text)
                }
                Block::Text(text) => text.clone(),
                Block::Code { code, .. } => code.trim().to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Anchor id for a heading: lower-case, alphanumerics kept, runs of
/// anything else collapsed into a single `-`
///
/// `"Pricing & Plans"` -> `"pricing-plans"`
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Hands out unique anchors: repeats get `-1`, `-2`, ...
///
/// A suffix is skipped when a literal heading already took it, so
/// `Install`, `Install`, `Install 1` never share an anchor.
#[derive(Default)]
struct AnchorAllocator {
    next_suffix: HashMap<String, usize>,
    taken: HashSet<String>,
}

impl AnchorAllocator {
    fn allocate(&mut self, base: String) -> String {
        let base = if base.is_empty() {
            "section".to_string()
        } else {
            base
        };
        let mut suffix = self.next_suffix.get(&base).copied().unwrap_or(0);
        loop {
            let candidate = if suffix == 0 {
                base.clone()
            } else {
                format!("{}-{}", base, suffix)
            };
            suffix += 1;
            if self.taken.insert(candidate.clone()) {
                self.next_suffix.insert(base, suffix);
                return candidate;
            }
        }
    }
}

/// Parse a markdown document into a page
///
/// Title is the first level-1 heading, falling back to `fallback_title`.
/// Explicit heading ids (`## Pricing {#plans}`) take precedence over slugs.
pub fn parse_page(path: &str, fallback_title: &str, markdown: &str) -> Page {
    let mut blocks = Vec::new();
    let mut anchors = AnchorAllocator::default();
    let mut title: Option<String> = None;

    let mut heading: Option<(u8, Option<String>)> = None;
    let mut code: Option<Option<String>> = None;
    let mut buffer = String::new();
    // Next number per open list, `None` for bullets
    let mut lists: Vec<Option<u64>> = Vec::new();

    let flush_text = |buffer: &mut String, blocks: &mut Vec<Block>| {
        // Leading spaces are list indentation
        let text = buffer.trim_end().trim_start_matches('\n');
        if !text.trim_start().is_empty() {
            blocks.push(Block::Text(text.to_string()));
        }
        buffer.clear();
    };

    let options = Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TABLES
        | Options::ENABLE_HEADING_ATTRIBUTES;
    for event in Parser::new_ext(markdown, options) {
        match event {
            Event::Start(Tag::Heading { level, id, .. }) => {
                flush_text(&mut buffer, &mut blocks);
                heading = Some((heading_level(level), id.map(|id| id.to_string())));
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, explicit_id)) = heading.take() {
                    let text = buffer.trim().to_string();
                    buffer.clear();
                    let anchor = anchors.allocate(explicit_id.unwrap_or_else(|| slugify(&text)));
                    if level == 1 && title.is_none() {
                        title = Some(text.clone());
                    }
                    blocks.push(Block::Heading {
                        level,
                        text,
                        anchor,
                    });
                }
            }

            Event::Start(Tag::CodeBlock(kind)) => {
                flush_text(&mut buffer, &mut blocks);
                let language = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(|lang| lang.to_string()),
                    CodeBlockKind::Indented => None,
                };
                code = Some(language);
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(language) = code.take() {
                    blocks.push(Block::Code {
                        language,
                        code: std::mem::take(&mut buffer),
                    });
                }
            }

            Event::Start(Tag::List(start)) => {
                flush_text(&mut buffer, &mut blocks);
                lists.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                flush_text(&mut buffer, &mut blocks);
                lists.pop();
            }
            Event::Start(Tag::Item) => {
                flush_text(&mut buffer, &mut blocks);
                let indent = "  ".repeat(lists.len().saturating_sub(1));
                let marker = match lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{}.", n);
                        *n += 1;
                        marker
                    }
                    _ => "•".to_string(),
                };
                buffer.push_str(&format!("{}{} ", indent, marker));
            }
            Event::End(TagEnd::Item) => flush_text(&mut buffer, &mut blocks),

            Event::End(TagEnd::Paragraph) if lists.is_empty() => {
                flush_text(&mut buffer, &mut blocks)
            }

            Event::Text(text) => buffer.push_str(&text),
            Event::Code(text) => {
                if code.is_none() && heading.is_none() {
                    buffer.push('`');
                    buffer.push_str(&text);
                    buffer.push('`');
                } else {
                    buffer.push_str(&text);
                }
            }
            Event::SoftBreak => buffer.push(' '),
            Event::HardBreak => buffer.push('\n'),
            Event::Rule => {
                flush_text(&mut buffer, &mut blocks);
                blocks.push(Block::Text("───".to_string()));
            }
            _ => {}
        }
    }
    flush_text(&mut buffer, &mut blocks);

    Page {
        path: path.to_string(),
        title: title.unwrap_or_else(|| fallback_title.to_string()),
        blocks,
    }
}

/// Route path for a markdown file: `/` + stem, `index` maps to `/`
pub fn route_for_file(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if stem.is_empty() || stem == "index" || stem == "readme" {
        "/".to_string()
    } else {
        format!("/{}", slugify(&stem))
    }
}

/// Load markdown files as pages, in the given order
pub fn load_pages<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Page>> {
    let mut pages: Vec<Page> = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let markdown = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read page {}", path.display()))?;
        let route = route_for_file(path);
        if pages.iter().any(|p| p.path == route) {
            tracing::warn!("Skipping {}: route {} already taken", path.display(), route);
            continue;
        }
        let fallback = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| route.clone());
        pages.push(parse_page(&route, &fallback, &markdown));
        tracing::debug!("Loaded page {} from {}", route, path.display());
    }
    Ok(pages)
}

/// Placeholder page for routes that match nothing
pub fn not_found_page(path: &str) -> Page {
    Page {
        path: path.to_string(),
        title: "Not found".to_string(),
        blocks: vec![
            Block::Heading {
                level: 1,
                text: "404".to_string(),
                anchor: "404".to_string(),
            },
            Block::Text(format!("No page at {}. Pick one from the sidebar.", path)),
        ],
    }
}
