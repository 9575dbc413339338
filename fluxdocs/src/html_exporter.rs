//! HTML exporter for documentation pages
//!
//! This module turns a rendered document into a complete static HTML page with:
//! - A header with the site title and a Docs link
//! - A left sidebar listing every section, the active one expanded
//! - The rendered document body
//! - A right "On This Page" sidebar driven by a small scroll-spy script

use crate::content_store::ContentStore;
use crate::markdown::{escape_html, Block, Heading, RenderedDocument};
use crate::toc::TableOfContentsView;

/// Everything needed to render one documentation page
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    /// Site title shown in the header and the `<title>` element
    pub site_title: &'a str,
    /// Title of the current item, if any
    pub page_title: Option<&'a str>,
    /// Sections and items for the sidebar
    pub store: &'a ContentStore,
    pub active_section_id: Option<&'a str>,
    pub active_item_id: Option<&'a str>,
    /// The rendered document body
    pub document: &'a RenderedDocument,
    /// Heading highlighted in the table of contents before any scrolling
    pub active_heading: Option<&'a str>,
    /// Activation offset used by the embedded scroll spy, in pixels
    pub scroll_offset: i32,
    pub repository_url: &'a str,
    pub version_label: &'a str,
}

/// Render a complete documentation page
///
/// # Parameters
/// * `ctx` - Page context
///
/// # Returns
/// * `String` - The full HTML document
pub fn render_page(ctx: &PageContext<'_>) -> String {
    let mut output = String::new();

    let title = match ctx.page_title {
        Some(page_title) => format!("{} | {}", page_title, ctx.site_title),
        None => ctx.site_title.to_string(),
    };
    write_html_header(&mut output, &title);

    output.push_str("<body>\n");
    write_site_header(&mut output, ctx.site_title);

    output.push_str("<div class=\"layout\">\n");
    write_sidebar(&mut output, ctx);

    output.push_str("<main class=\"content\">\n");
    output.push_str("<div class=\"markdown-content\">\n");
    output.push_str(&render_blocks(&ctx.document.blocks));
    output.push_str("</div>\n");
    output.push_str("</main>\n");

    output.push_str("<aside class=\"toc-sidebar\">\n");
    output.push_str("<h3 class=\"toc-title\">On This Page</h3>\n");
    output.push_str(
        &TableOfContentsView::new(&ctx.document.headings, ctx.active_heading).render_html(),
    );
    output.push_str("</aside>\n");
    output.push_str("</div>\n");

    write_script(&mut output, ctx.scroll_offset);
    output.push_str("</body>\n");
    output.push_str("</html>\n");
    output
}

/// Render the "Page Not Found" page
pub fn render_not_found_page(site_title: &str, docs_route: &str) -> String {
    let mut output = String::new();
    write_html_header(&mut output, &format!("Page Not Found | {site_title}"));
    output.push_str("<body>\n");
    write_site_header(&mut output, site_title);
    output.push_str("<main class=\"not-found\">\n");
    output.push_str("<h1>Page Not Found</h1>\n");
    output.push_str("<p>The page you're looking for doesn't exist.</p>\n");
    output.push_str(&format!(
        "<a class=\"button\" href=\"{}\">Go to Documentation</a>\n",
        escape_html(docs_route)
    ));
    output.push_str("</main>\n");
    output.push_str("</body>\n");
    output.push_str("</html>\n");
    output
}

/// Render a page that immediately redirects to `target`
pub fn render_redirect_page(target: &str) -> String {
    let target = escape_html(target);
    let mut output = String::new();
    output.push_str("<!DOCTYPE html>\n");
    output.push_str("<html lang=\"en\">\n");
    output.push_str("<head>\n");
    output.push_str("<meta charset=\"UTF-8\">\n");
    output.push_str(&format!(
        "<meta http-equiv=\"refresh\" content=\"0; url={target}\">\n"
    ));
    output.push_str(&format!("<link rel=\"canonical\" href=\"{target}\">\n"));
    output.push_str("<title>Redirecting</title>\n");
    output.push_str("</head>\n");
    output.push_str(&format!(
        "<body><a href=\"{target}\">Redirecting to {target}</a></body>\n"
    ));
    output.push_str("</html>\n");
    output
}

/// Render a block list as an HTML fragment
pub fn render_blocks(blocks: &[Block]) -> String {
    let mut output = String::new();
    let mut code_index = 0;
    for block in blocks {
        write_block(&mut output, block, &mut code_index);
    }
    output
}

/// Write HTML header with CSS styling
fn write_html_header(output: &mut String, title: &str) {
    output.push_str("<!DOCTYPE html>\n");
    output.push_str("<html lang=\"en\">\n");
    output.push_str("<head>\n");
    output.push_str("<meta charset=\"UTF-8\">\n");
    output.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    output.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    output.push_str("<style>\n");
    output.push_str(CSS_STYLES);
    output.push_str("</style>\n");
    output.push_str("</head>\n");
}

fn write_site_header(output: &mut String, site_title: &str) {
    output.push_str("<header class=\"site-header\">\n");
    output.push_str(&format!(
        "<a class=\"brand\" href=\"/\">{}</a>\n",
        escape_html(site_title)
    ));
    output.push_str("<nav class=\"site-nav\"><a href=\"/docs/\">Docs</a></nav>\n");
    output.push_str("</header>\n");
}

/// Write the section navigation sidebar
fn write_sidebar(output: &mut String, ctx: &PageContext<'_>) {
    output.push_str("<aside class=\"sidebar\">\n");
    output.push_str("<h2 class=\"sidebar-title\">Documentation</h2>\n");
    output.push_str("<nav>\n");

    for section in &ctx.store.sections {
        let section_active = ctx.active_section_id == Some(section.id.as_str());
        output.push_str(&format!(
            "<details class=\"nav-section\"{}>\n<summary>{}</summary>\n<ul>\n",
            if section_active { " open" } else { "" },
            escape_html(&section.title)
        ));
        for item in &section.items {
            let item_active = section_active && ctx.active_item_id == Some(item.id.as_str());
            output.push_str(&format!(
                "<li><a class=\"{}\" href=\"/docs/{}/{}/\">{}</a></li>\n",
                if item_active { "nav-item active" } else { "nav-item" },
                escape_html(&section.id),
                escape_html(item.path_segment()),
                escape_html(&item.title)
            ));
        }
        output.push_str("</ul>\n</details>\n");
    }

    output.push_str("</nav>\n");
    output.push_str("<div class=\"sidebar-footer\">\n");
    if !ctx.repository_url.is_empty() {
        output.push_str(&format!(
            "<a href=\"{}\">GitHub</a>\n",
            escape_html(ctx.repository_url)
        ));
    }
    output.push_str(&format!(
        "<span class=\"version\">{}</span>\n",
        escape_html(ctx.version_label)
    ));
    output.push_str("</div>\n");
    output.push_str("</aside>\n");
}

/// Write a single block to the output
fn write_block(output: &mut String, block: &Block, code_index: &mut usize) {
    match block {
        Block::Heading(heading) => write_heading(output, heading),

        Block::ListItem { text } => {
            output.push_str(&format!(
                "<ul class=\"doc-list\"><li>{}</li></ul>\n",
                escape_html(text)
            ));
        }

        Block::Paragraph { formatted } => {
            output.push_str(&format!("<p>{formatted}</p>\n"));
        }

        Block::CodeBlock { language, code } => {
            let highlight = block.highlight_language().unwrap_or(language.as_str());
            let code_id = format!("code-{code_index}");
            *code_index += 1;

            output.push_str("<div class=\"code-block\">\n");
            output.push_str(&format!(
                "<button class=\"copy-button\" type=\"button\" title=\"Copy code\" data-copy-target=\"{code_id}\">Copy</button>\n"
            ));
            output.push_str(&format!(
                "<pre><code id=\"{}\" class=\"language-{}\">{}</code></pre>\n",
                code_id,
                escape_html(highlight),
                escape_html(code)
            ));
            output.push_str("</div>\n");
        }

        Block::BlankSpacer => output.push_str("<div class=\"spacer\"></div>\n"),
    }
}

/// Headings deeper than `h6` keep their anchor as an ARIA heading
fn write_heading(output: &mut String, heading: &Heading) {
    let id = escape_html(&heading.id);
    let text = escape_html(&heading.text);
    if (1..=6).contains(&heading.level) {
        output.push_str(&format!(
            "<h{level} id=\"{id}\" class=\"content-heading\">{text}</h{level}>\n",
            level = heading.level
        ));
    } else {
        output.push_str(&format!(
            "<div id=\"{}\" class=\"content-heading deep-heading\" role=\"heading\" aria-level=\"{}\">{}</div>\n",
            id, heading.level, text
        ));
    }
}

/// Scroll spy and copy buttons for the browser
fn write_script(output: &mut String, scroll_offset: i32) {
    output.push_str("<script>\n");
    output.push_str(&format!("const SCROLL_OFFSET = {scroll_offset};\n"));
    output.push_str(SCRIPT);
    output.push_str("</script>\n");
}

const SCRIPT: &str = r#"
(function () {
    const links = Array.from(document.querySelectorAll('.toc-link'));
    const ids = links.map(function (link) { return link.dataset.headingId; });

    function update() {
        const resolved = [];
        ids.forEach(function (id) {
            const el = document.getElementById(id);
            if (el) {
                resolved.push([id, el.getBoundingClientRect().top]);
            }
        });
        if (resolved.length === 0) {
            return;
        }
        let active = resolved[0][0];
        for (let i = resolved.length - 1; i >= 0; i--) {
            if (resolved[i][1] <= SCROLL_OFFSET) {
                active = resolved[i][0];
                break;
            }
        }
        links.forEach(function (link) {
            link.classList.toggle('active', link.dataset.headingId === active);
        });
    }

    if (links.length > 0) {
        window.addEventListener('scroll', update, { passive: true });
        update();
    }

    document.querySelectorAll('.copy-button').forEach(function (button) {
        button.addEventListener('click', function () {
            const code = document.getElementById(button.dataset.copyTarget);
            if (!code || !navigator.clipboard) {
                return;
            }
            navigator.clipboard.writeText(code.textContent).then(function () {
                button.textContent = 'Copied';
                setTimeout(function () { button.textContent = 'Copy'; }, 2000);
            });
        });
    });
})();
"#;

/// Dark documentation theme
const CSS_STYLES: &str = r#"
* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Roboto', 'Oxygen',
                 'Ubuntu', 'Cantarell', 'Fira Sans', 'Droid Sans', 'Helvetica Neue',
                 sans-serif;
    line-height: 1.6;
    color: #f3f4f6;
    background-color: #111827;
}

a {
    color: #60a5fa;
    text-decoration: none;
}

a:hover {
    text-decoration: underline;
}

.site-header {
    position: sticky;
    top: 0;
    z-index: 40;
    display: flex;
    align-items: center;
    justify-content: space-between;
    height: 64px;
    padding: 0 32px;
    background-color: #111827;
    border-bottom: 1px solid #374151;
    box-shadow: 0 2px 4px rgba(0, 0, 0, 0.3);
}

.brand {
    font-size: 1.25em;
    font-weight: 700;
    color: #f3f4f6;
}

.site-nav a {
    color: #d1d5db;
    font-size: 0.9em;
    font-weight: 500;
}

.layout {
    display: flex;
    min-height: calc(100vh - 64px);
}

.sidebar {
    width: 288px;
    flex-shrink: 0;
    padding: 16px;
    border-right: 1px solid #374151;
}

.sidebar-title {
    font-size: 1.25em;
    margin-bottom: 32px;
}

.nav-section {
    margin-bottom: 16px;
}

.nav-section summary {
    cursor: pointer;
    padding: 8px 12px;
    border-radius: 6px;
    font-weight: 500;
    color: #e5e7eb;
}

.nav-section summary:hover {
    background-color: #1f2937;
}

.nav-section ul {
    list-style: none;
    margin: 4px 0 0 16px;
}

.nav-item {
    display: block;
    padding: 8px 12px;
    border-radius: 6px;
    color: #d1d5db;
}

.nav-item.active {
    background-color: rgba(30, 58, 138, 0.3);
    color: #60a5fa;
    font-weight: 500;
}

.sidebar-footer {
    display: flex;
    justify-content: space-between;
    margin-top: 32px;
    padding-top: 16px;
    border-top: 1px solid #374151;
    font-size: 0.9em;
    color: #9ca3af;
}

.content {
    flex: 1;
    padding: 32px;
    min-width: 0;
}

.content-heading {
    margin-top: 24px;
    margin-bottom: 16px;
    font-weight: 700;
    color: #f3f4f6;
}

h1.content-heading {
    font-size: 1.875em;
}

h2.content-heading {
    font-size: 1.5em;
}

.content-heading:not(h1):not(h2) {
    font-size: 1.25em;
}

p {
    margin: 12px 0;
    line-height: 1.75;
}

strong {
    font-weight: 700;
}

em {
    font-style: italic;
}

.inline-code {
    font-family: 'Monaco', 'Menlo', 'Ubuntu Mono', 'Consolas', monospace;
    background-color: #1f2937;
    padding: 2px 4px;
    border-radius: 4px;
    font-size: 0.9em;
    color: #93c5fd;
}

.doc-list {
    margin: 8px 0 8px 24px;
    list-style: disc;
}

.spacer {
    height: 16px;
}

.code-block {
    position: relative;
    margin: 16px 0;
}

.copy-button {
    position: absolute;
    top: 8px;
    right: 8px;
    padding: 4px 8px;
    border-radius: 4px;
    border: 1px solid #374151;
    background-color: #030712;
    color: #d1d5db;
    cursor: pointer;
    opacity: 0;
    transition: opacity 0.2s;
}

.code-block:hover .copy-button {
    opacity: 1;
}

pre {
    background-color: #030712;
    border: 1px solid #374151;
    border-radius: 6px;
    padding: 16px;
    overflow-x: auto;
}

pre code {
    font-family: 'Monaco', 'Menlo', 'Ubuntu Mono', 'Consolas', monospace;
    font-size: 0.9em;
    line-height: 1.45;
    color: #e5e7eb;
}

.toc-sidebar {
    width: 320px;
    flex-shrink: 0;
    padding: 16px;
    border-left: 1px solid #374151;
}

.toc-title {
    font-size: 1.1em;
    font-weight: 500;
    margin-bottom: 16px;
    color: #e5e7eb;
}

.toc {
    position: sticky;
    top: 80px;
}

.toc-entry {
    margin-bottom: 8px;
}

.toc-link {
    display: block;
    font-size: 0.875em;
    color: #9ca3af;
}

.toc-link.active {
    color: #60a5fa;
    font-weight: 500;
}

.toc-empty {
    font-size: 0.875em;
    color: #6b7280;
}

.not-found {
    max-width: 640px;
    margin: 96px auto;
    text-align: center;
}

.not-found h1 {
    font-size: 2.25em;
    margin-bottom: 16px;
}

.not-found p {
    margin-bottom: 24px;
}

.button {
    display: inline-block;
    padding: 8px 16px;
    border-radius: 4px;
    background-color: #2563eb;
    color: white;
}

@media screen and (max-width: 1280px) {
    .toc-sidebar {
        display: none;
    }
}

@media screen and (max-width: 1024px) {
    .sidebar {
        display: none;
    }

    .content {
        padding: 24px 16px;
    }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content_store::{DocItem, DocSection};
    use crate::markdown::{render, ContentTrust, MarkdownRenderer};
    use pretty_assertions::assert_eq;

    fn store() -> ContentStore {
        ContentStore {
            sections: vec![
                DocSection {
                    id: "guides".to_string(),
                    title: "Guides".to_string(),
                    items: vec![DocItem {
                        id: "intro".to_string(),
                        title: "Introduction".to_string(),
                        slug: "introduction".to_string(),
                        content: Some("# Intro".to_string()),
                    }],
                },
                DocSection {
                    id: "reference".to_string(),
                    title: "Reference".to_string(),
                    items: vec![DocItem {
                        id: "cli".to_string(),
                        title: "CLI".to_string(),
                        slug: String::new(),
                        content: None,
                    }],
                },
            ],
            trust: ContentTrust::Trusted,
        }
    }

    #[test]
    fn test_render_blocks_headings_carry_ids() {
        let doc = render("# Getting Started\n#### Deep\n####### Deeper");
        let html = render_blocks(&doc.blocks);
        assert_eq!(
            html,
            "<h1 id=\"getting-started\" class=\"content-heading\">Getting Started</h1>\n\
             <h4 id=\"deep\" class=\"content-heading\">Deep</h4>\n\
             <div id=\"deeper\" class=\"content-heading deep-heading\" role=\"heading\" aria-level=\"7\">Deeper</div>\n"
        );
    }

    #[test]
    fn test_render_blocks_list_items_are_separate_lists() {
        let html = render_blocks(&render("- one\n- two").blocks);
        assert_eq!(
            html,
            "<ul class=\"doc-list\"><li>one</li></ul>\n<ul class=\"doc-list\"><li>two</li></ul>\n"
        );
    }

    #[test]
    fn test_render_blocks_code_is_escaped_and_highlighted_as_bash() {
        let html = render_blocks(&render("```shell\necho \"<hi>\" && ls\n```").blocks);
        assert!(html.contains("data-copy-target=\"code-0\""));
        assert!(html.contains(
            "<code id=\"code-0\" class=\"language-bash\">echo &quot;&lt;hi&gt;&quot; &amp;&amp; ls</code>"
        ));
    }

    #[test]
    fn test_render_blocks_numbers_code_blocks() {
        let html = render_blocks(&render("```go\na\n```\n```\nb\n```").blocks);
        assert!(html.contains("id=\"code-0\" class=\"language-go\""));
        assert!(html.contains("id=\"code-1\" class=\"language-bash\""));
    }

    #[test]
    fn test_render_blocks_paragraph_and_spacer() {
        let html = render_blocks(&render("Use **bold**\n\nend").blocks);
        assert_eq!(
            html,
            "<p>Use <strong>bold</strong></p>\n<div class=\"spacer\"></div>\n<p>end</p>\n"
        );
    }

    #[test]
    fn test_untrusted_paragraph_is_escaped() {
        let doc = MarkdownRenderer::new()
            .with_trust(ContentTrust::Untrusted)
            .render("<script>x</script>");
        assert_eq!(
            render_blocks(&doc.blocks),
            "<p>&lt;script&gt;x&lt;/script&gt;</p>\n"
        );
    }

    #[test]
    fn test_render_page_sidebar_and_toc() {
        let store = store();
        let document = render("# Intro\n## Setup");
        let html = render_page(&PageContext {
            site_title: "Flux",
            page_title: Some("Introduction"),
            store: &store,
            active_section_id: Some("guides"),
            active_item_id: Some("intro"),
            document: &document,
            active_heading: Some("intro"),
            scroll_offset: 100,
            repository_url: "https://github.com/Fluxgo/flux",
            version_label: "v1.0.0",
        });

        assert!(html.contains("<title>Introduction | Flux</title>"));
        assert!(html.contains("<details class=\"nav-section\" open>\n<summary>Guides</summary>"));
        assert!(html.contains("<details class=\"nav-section\">\n<summary>Reference</summary>"));
        assert!(html.contains(
            "<a class=\"nav-item active\" href=\"/docs/guides/introduction/\">Introduction</a>"
        ));
        assert!(html.contains("<a class=\"nav-item\" href=\"/docs/reference/cli/\">CLI</a>"));
        assert!(html.contains("<h3 class=\"toc-title\">On This Page</h3>"));
        assert!(html.contains("<a class=\"toc-link active\" href=\"#intro\""));
        assert!(html.contains("const SCROLL_OFFSET = 100;"));
        assert!(html.contains("<span class=\"version\">v1.0.0</span>"));
    }

    #[test]
    fn test_render_page_without_headings_shows_placeholder() {
        let store = store();
        let document = render("just text");
        let html = render_page(&PageContext {
            site_title: "Flux",
            page_title: None,
            store: &store,
            active_section_id: None,
            active_item_id: None,
            document: &document,
            active_heading: None,
            scroll_offset: 100,
            repository_url: "",
            version_label: "v1",
        });
        assert!(html.contains("No headings available in this document"));
        assert!(!html.contains(">GitHub</a>"));
    }

    #[test]
    fn test_redirect_and_not_found_pages() {
        let redirect = render_redirect_page("/docs/guides/introduction/");
        assert!(redirect.contains("content=\"0; url=/docs/guides/introduction/\""));

        let not_found = render_not_found_page("Flux", "/docs/guides/introduction/");
        assert!(not_found.contains("<h1>Page Not Found</h1>"));
        assert!(not_found.contains("href=\"/docs/guides/introduction/\">Go to Documentation</a>"));
    }
}
