//! Markdown-subset rendering
//!
//! This module turns the raw content strings of the documentation store into
//! an ordered block sequence plus the heading outline that drives the table of
//! contents. Only the subset used by the content store is supported: headings,
//! flat list items, paragraphs with bold/italic/inline code, and fenced code
//! blocks.

// Submodules
mod blocks;
mod heading_id;
mod inline;
mod parser;

// Re-export public types
pub use blocks::{highlight_language, Block, Heading, HeadingList};
pub use heading_id::heading_id;
pub use inline::{escape_html, InlineFormatter, TrustedMarkup, INLINE_CODE_CLASS};
pub use parser::{render, ContentTrust, MarkdownRenderer, RenderedDocument};
