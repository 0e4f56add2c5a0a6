//! Escaping for Telegram's legacy `Markdown` parse mode.

/// Characters that open an entity in legacy Markdown.
const RESERVED: [char; 4] = ['_', '*', '`', '['];

/// Escape free text so it renders literally.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if RESERVED.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Make a URL safe to use as an inline link target.
///
/// A literal `)` would end the link early, so it is percent-encoded.
pub fn link_target(url: &str) -> String {
    url.replace(')', "%29")
}
