//! Block-level document elements
//!
//! This module defines the structured output of the Markdown-subset renderer:
//! the ordered block sequence and the heading outline extracted alongside it.

use super::inline::TrustedMarkup;
use serde::Serialize;
use std::ops::Deref;
use std::rc::Rc;

/// A heading extracted from the source, shared by the block sequence and the outline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Anchor id generated from the heading text
    pub id: String,

    /// Heading text with the `#` marker removed
    pub text: String,

    /// Number of leading `#` characters (not capped at 6)
    pub level: usize,
}

/// Block-level element in strict source-line order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A heading line; the same value is pushed to the heading outline
    Heading(Heading),

    /// A single `- ` line, rendered as its own one-item list
    ListItem {
        /// Item text without the `- ` prefix
        text: String,
    },

    /// A line of prose with inline markup already resolved
    Paragraph {
        /// Formatted markup (bold, italic, inline code spans)
        formatted: TrustedMarkup,
    },

    /// A fenced code block
    CodeBlock {
        /// Declared language, lowercased (possibly empty)
        language: String,
        /// Lines between the fence markers joined with `\n`, byte-for-byte
        code: String,
    },

    /// Placeholder for a blank source line
    BlankSpacer,
}

impl Block {
    /// Language tag to hand to a syntax highlighter for a code block
    ///
    /// Empty and `shell` declarations are highlighted as `bash`. Returns `None`
    /// for non-code blocks.
    pub fn highlight_language(&self) -> Option<&str> {
        match self {
            Block::CodeBlock { language, .. } => Some(highlight_language(language)),
            _ => None,
        }
    }
}

/// Map a declared code fence language to the highlighter language
pub fn highlight_language(declared: &str) -> &str {
    match declared {
        "" | "shell" => "bash",
        other => other,
    }
}

/// Ordered, immutable heading outline of one rendered document
///
/// Cloning shares the underlying list. Two lists are the "same" only when they
/// come from the same render, which is how the scroll spy detects new content.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct HeadingList(Rc<[Heading]>);

impl HeadingList {
    /// Wrap freshly extracted headings
    pub fn new(headings: Vec<Heading>) -> Self {
        Self(Rc::from(headings))
    }

    /// Check whether both handles point at the same rendered outline
    pub fn same_list(&self, other: &HeadingList) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for HeadingList {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Deref for HeadingList {
    type Target = [Heading];

    fn deref(&self) -> &[Heading] {
        &self.0
    }
}

impl From<Vec<Heading>> for HeadingList {
    fn from(headings: Vec<Heading>) -> Self {
        Self::new(headings)
    }
}
