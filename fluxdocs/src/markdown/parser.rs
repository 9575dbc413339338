//! Line-oriented Markdown-subset renderer
//!
//! Converts a raw content string into blocks and a heading outline in a single
//! forward pass. The only state carried between lines is the open code fence.

use super::blocks::{Block, Heading, HeadingList};
use super::heading_id::heading_id;
use super::inline::{InlineFormatter, TrustedMarkup};
use serde::Serialize;

/// Literal that opens and closes a code fence
const FENCE_MARKER: &str = "```";

/// Where the content being rendered comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentTrust {
    /// Build-time controlled content; paragraph HTML passes through unescaped
    #[default]
    Trusted,
    /// Any other source; paragraph text is HTML-escaped before formatting
    Untrusted,
}

/// Result of rendering one document
///
/// Blocks and headings always come from the same render and are replaced
/// together.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenderedDocument {
    /// Blocks in source-line order
    pub blocks: Vec<Block>,
    /// Headings in source-line order
    pub headings: HeadingList,
    /// Non-fatal observations (e.g. an unterminated code fence)
    pub warnings: Vec<String>,
}

/// An open code fence waiting for its closing marker
struct OpenFence {
    /// Declared language as written after the marker
    language: String,
    /// 1-based line number of the opening marker
    opened_at: usize,
    /// Raw lines collected so far
    lines: Vec<String>,
}

/// Markdown-subset renderer
///
/// Supports headings, flat `- ` list items, paragraphs with bold, italic and
/// inline code, and fenced code blocks. Each call to [`render`](Self::render)
/// starts from a clean state.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer {
    trust: ContentTrust,
}

impl MarkdownRenderer {
    /// Create a renderer for trusted content
    pub fn new() -> Self {
        Self::default()
    }

    /// Select how paragraph text is treated
    #[must_use]
    pub fn with_trust(mut self, trust: ContentTrust) -> Self {
        self.trust = trust;
        self
    }

    /// Render a raw content string
    ///
    /// # Parameters
    /// * `content` - Raw document content, possibly empty
    ///
    /// # Returns
    /// * `RenderedDocument` - Blocks and headings; empty input yields neither
    pub fn render(&self, content: &str) -> RenderedDocument {
        if content.is_empty() {
            return RenderedDocument::default();
        }

        let mut blocks = Vec::new();
        let mut headings = Vec::new();
        let mut warnings = Vec::new();
        let mut fence: Option<OpenFence> = None;

        for (index, line) in content.split('\n').enumerate() {
            let trimmed = line.trim();

            if let Some(declared) = trimmed.strip_prefix(FENCE_MARKER) {
                match fence.take() {
                    Some(open) => blocks.push(Self::close_fence(open)),
                    None => {
                        fence = Some(OpenFence {
                            language: declared.trim().to_string(),
                            opened_at: index + 1,
                            lines: Vec::new(),
                        });
                    }
                }
                continue;
            }

            if let Some(open) = fence.as_mut() {
                open.lines.push(line.to_string());
                continue;
            }

            if trimmed.starts_with('#') {
                let heading = Self::parse_heading(line.trim_start());
                headings.push(heading.clone());
                blocks.push(Block::Heading(heading));
            } else if let Some(text) = trimmed.strip_prefix("- ") {
                blocks.push(Block::ListItem {
                    text: text.to_string(),
                });
            } else if !trimmed.is_empty() {
                blocks.push(Block::Paragraph {
                    formatted: self.format_inline(trimmed),
                });
            } else {
                blocks.push(Block::BlankSpacer);
            }
        }

        if let Some(open) = fence {
            warnings.push(format!(
                "code fence opened on line {} is never closed; {} line(s) dropped",
                open.opened_at,
                open.lines.len()
            ));
        }

        RenderedDocument {
            blocks,
            headings: HeadingList::new(headings),
            warnings,
        }
    }

    /// Turn a closed fence into a code block
    fn close_fence(open: OpenFence) -> Block {
        Block::CodeBlock {
            language: open.language.to_lowercase(),
            code: open.lines.join("\n"),
        }
    }

    /// Parse a line starting with `#` into a heading
    ///
    /// `line` has its leading whitespace removed but keeps trailing whitespace,
    /// so a marker followed only by spaces still counts as followed by
    /// whitespace. The level counts every leading `#`. The marker and the
    /// whitespace after it are removed only when whitespace follows the marker.
    fn parse_heading(line: &str) -> Heading {
        let rest = line.trim_start_matches('#');
        let level = line.len() - rest.len();

        let text = if rest.starts_with(char::is_whitespace) {
            rest.trim()
        } else {
            line.trim_end()
        };

        Heading {
            id: heading_id(text),
            text: text.to_string(),
            level,
        }
    }

    fn format_inline(&self, line: &str) -> TrustedMarkup {
        match self.trust {
            ContentTrust::Trusted => InlineFormatter::format(line),
            ContentTrust::Untrusted => InlineFormatter::format_escaped(line),
        }
    }
}

/// Render trusted content with the default renderer
pub fn render(content: &str) -> RenderedDocument {
    MarkdownRenderer::new().render(content)
}
