//! Inline formatting for paragraph lines
//!
//! Paragraph text is turned into raw HTML markup by three independent textual
//! substitutions. The result is wrapped in [`TrustedMarkup`] so that plain text
//! and raw markup cannot be mixed up by a sink: the only ways to obtain a
//! `TrustedMarkup` are [`InlineFormatter::format`] (content from the trusted,
//! compiled-in store) and [`InlineFormatter::format_escaped`] (any other
//! source, escaped before substitution).

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

static BOLD: OnceLock<Regex> = OnceLock::new();
static ITALIC: OnceLock<Regex> = OnceLock::new();
static CODE: OnceLock<Regex> = OnceLock::new();

/// CSS class applied to inline code spans
pub const INLINE_CODE_CLASS: &str = "inline-code";

fn bold_pattern() -> &'static Regex {
    BOLD.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern is valid"))
}

fn italic_pattern() -> &'static Regex {
    ITALIC.get_or_init(|| Regex::new(r"\*(.*?)\*").expect("italic pattern is valid"))
}

fn code_pattern() -> &'static Regex {
    CODE.get_or_init(|| Regex::new(r"`(.*?)`").expect("code pattern is valid"))
}

/// Raw HTML markup that may be injected into a page without escaping
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TrustedMarkup(String);

impl TrustedMarkup {
    /// Borrow the markup
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take ownership of the markup
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TrustedMarkup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Applies bold, italic and inline-code substitutions to one line
///
/// Substitutions run in fixed order over the whole line: `**X**` to
/// `<strong>`, then `*X*` to `<em>`, then `` `X` `` to `<code>`. Matches are
/// non-greedy and never nest. The italic pass runs over the output of the bold
/// pass, so stray asterisks left behind may still pair up.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineFormatter;

impl InlineFormatter {
    /// Format a line from a trusted source, passing any HTML through as-is
    pub fn format(line: &str) -> TrustedMarkup {
        TrustedMarkup(Self::substitute(line))
    }

    /// Escape HTML in a line from an untrusted source, then format it
    pub fn format_escaped(line: &str) -> TrustedMarkup {
        TrustedMarkup(Self::substitute(&escape_html(line)))
    }

    fn substitute(line: &str) -> String {
        let bold = bold_pattern().replace_all(line, "<strong>${1}</strong>");
        let italic = italic_pattern().replace_all(&bold, "<em>${1}</em>");
        let code_replacement = format!("<code class=\"{INLINE_CODE_CLASS}\">${{1}}</code>");
        code_pattern()
            .replace_all(&italic, code_replacement.as_str())
            .into_owned()
    }
}

/// Escape special HTML characters
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
