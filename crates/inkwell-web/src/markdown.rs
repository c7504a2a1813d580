//! Markdown to HTML conversion.

use pulldown_cmark::{Options, Parser, html};

/// Render markdown source to an HTML fragment.
///
/// Raw HTML in the source is passed through unchanged.
#[must_use]
pub fn render_markdown(source: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(source, options);

    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
