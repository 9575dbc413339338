//! Anchor id generation for headings

/// Generate the anchor id for a heading
///
/// Lowercases the text, collapses every whitespace run into a single hyphen,
/// then drops every character that is not an ASCII word character or hyphen.
/// Whitespace is the Unicode `White_Space` property and lowercasing is the
/// full Unicode mapping, so U+3000 and U+00A0 separate words too.
/// The mapping is not injective: headings with the same normalized text share
/// an id and no suffix is appended.
///
/// # Examples
///
/// ```
/// use fluxdocs::heading_id;
///
/// assert_eq!(heading_id("Quick Start"), "quick-start");
/// assert_eq!(heading_id("Flux! the GoPowerhouse"), "flux-the-gopowerhouse");
/// ```
pub fn heading_id(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut id = String::with_capacity(lowered.len());
    let mut in_whitespace = false;

    for c in lowered.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                id.push('-');
                in_whitespace = true;
            }
            continue;
        }
        in_whitespace = false;

        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            id.push(c);
        }
    }

    id
}
