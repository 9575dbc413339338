//! "On This Page" table of contents

use crate::markdown::{escape_html, Heading};

/// Horizontal indent per heading level below 1, in pixels
const INDENT_PER_LEVEL_PX: usize = 12;

/// Placeholder shown for documents without headings
pub const EMPTY_TOC_MESSAGE: &str = "No headings available in this document";

/// One row of the table of contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub id: String,
    pub text: String,
    pub level: usize,
    pub indent_px: usize,
    pub active: bool,
}

/// Presentational view over a heading list and the active heading id
#[derive(Debug, Clone, Copy)]
pub struct TableOfContentsView<'a> {
    headings: &'a [Heading],
    active_id: Option<&'a str>,
}

impl<'a> TableOfContentsView<'a> {
    pub fn new(headings: &'a [Heading], active_id: Option<&'a str>) -> Self {
        Self {
            headings,
            active_id,
        }
    }

    /// Rows in heading order
    ///
    /// Every heading sharing the active id is marked active.
    pub fn entries(&self) -> Vec<TocEntry> {
        self.headings
            .iter()
            .map(|heading| TocEntry {
                id: heading.id.clone(),
                text: heading.text.clone(),
                level: heading.level,
                indent_px: heading.level.saturating_sub(1) * INDENT_PER_LEVEL_PX,
                active: self.active_id == Some(heading.id.as_str()),
            })
            .collect()
    }

    /// Render the table of contents as an HTML fragment
    ///
    /// Entries link to `#<id>`; following a link scrolls to the heading anchor
    /// and the scroll spy picks the new position up on the next signal.
    pub fn render_html(&self) -> String {
        log::debug!(
            "table of contents updated: {} headings",
            self.headings.len()
        );

        if self.headings.is_empty() {
            return format!("<div class=\"toc-empty\">{EMPTY_TOC_MESSAGE}</div>\n");
        }

        let mut output = String::from("<nav class=\"toc\">\n");
        for entry in self.entries() {
            let class = if entry.active {
                "toc-link active"
            } else {
                "toc-link"
            };
            output.push_str(&format!(
                "<div class=\"toc-entry\" style=\"margin-left: {}px\"><a class=\"{}\" href=\"#{}\" data-heading-id=\"{}\">{}</a></div>\n",
                entry.indent_px,
                class,
                escape_html(&entry.id),
                escape_html(&entry.id),
                escape_html(&entry.text)
            ));
        }
        output.push_str("</nav>\n");
        output
    }
}
