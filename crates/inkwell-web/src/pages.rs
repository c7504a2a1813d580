//! HTML page rendering.
//!
//! Every page is a full document built around [`layout`]. All interpolated
//! text goes through [`escape_html`]; the only raw HTML inserted is the
//! rendered markdown body of a post.

use crate::forms::FieldError;
use crate::notice::Notice;
use inkwell_common::{MAX_CONTENT_CHARS, MAX_TITLE_CHARS, PostTitle};
use std::fmt::Write;

/// Characters of post content shown per search result
const EXCERPT_CHARS: usize = 200;

/// Escape text for use in HTML element content and quoted attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Path of the page showing `title`
#[must_use]
pub fn post_path(title: &str) -> String {
    format!("/{}", urlencoding::encode(title))
}

fn edit_path(title: &str) -> String {
    format!("/edit/{}", urlencoding::encode(title))
}

fn delete_path(title: &str) -> String {
    format!("/delete/{}", urlencoding::encode(title))
}

fn layout(page_title: &str, notices: &[Notice], body: &str) -> String {
    let mut notice_html = String::new();
    for notice in notices {
        let _ = write!(
            notice_html,
            r#"<div class="{}" role="status">{}</div>"#,
            notice.level.css_class(),
            escape_html(&notice.message)
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} - Inkwell</title>
</head>
<body>
<nav>
<a href="/">All posts</a>
<a href="/new">New post</a>
<form action="/search" method="get" class="search">
<input type="search" name="q" placeholder="Search posts">
</form>
</nav>
<main>
{notice_html}
{body}
</main>
</body>
</html>
"#,
        title = escape_html(page_title),
    )
}

fn field_errors(errors: &[FieldError]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let mut html = String::from(r#"<ul class="errorlist">"#);
    for error in errors {
        let _ = write!(
            html,
            "<li>{}: {}</li>",
            escape_html(error.field),
            escape_html(&error.message)
        );
    }
    html.push_str("</ul>");
    html
}

/// List of every post
#[must_use]
pub fn posts_page(titles: &[String], notices: &[Notice]) -> String {
    let mut body = String::from("<h1>All posts</h1>\n");
    if titles.is_empty() {
        body.push_str(r#"<p class="empty">No posts yet.</p>"#);
    } else {
        body.push_str("<ul class=\"posts\">\n");
        for title in titles {
            let _ = writeln!(
                body,
                r#"<li><a href="{}">{}</a></li>"#,
                escape_html(&post_path(title)),
                escape_html(title)
            );
        }
        body.push_str("</ul>");
    }
    layout("All posts", notices, &body)
}

/// A single post with its rendered markdown
#[must_use]
pub fn post_page(title: &PostTitle, content_html: &str, notices: &[Notice]) -> String {
    let body = format!(
        r#"<article>
<h1 class="post-title">{title}</h1>
{content_html}
</article>
<p class="actions"><a href="{edit}">Edit</a> <a href="{delete}">Delete</a></p>"#,
        title = escape_html(title.as_str()),
        edit = escape_html(&edit_path(title.as_str())),
        delete = escape_html(&delete_path(title.as_str())),
    );
    layout(title.as_str(), notices, &body)
}

/// Blank or re-submitted "new post" form
#[must_use]
pub fn new_post_page(
    title: &str,
    content: &str,
    errors: &[FieldError],
    notices: &[Notice],
) -> String {
    let body = format!(
        r#"<h1>New post</h1>
{errors}
<form action="/new" method="post">
<input type="text" name="title" maxlength="{MAX_TITLE_CHARS}" placeholder="Title" value="{title}" required>
<textarea name="content" rows="10" maxlength="{MAX_CONTENT_CHARS}" placeholder="Write your article here" required>{content}</textarea>
<button type="submit">Save</button>
</form>"#,
        errors = field_errors(errors),
        title = escape_html(title),
        content = escape_html(content),
    );
    layout("New post", notices, &body)
}

/// Edit form; the title is fixed and only carried in a hidden field
#[must_use]
pub fn edit_post_page(
    title: &PostTitle,
    content: &str,
    errors: &[FieldError],
    notices: &[Notice],
) -> String {
    let body = format!(
        r#"<h1>Edit <a href="{view}">{title}</a></h1>
{errors}
<form action="{action}" method="post">
<input type="hidden" name="title" value="{title}">
<textarea name="content" rows="10" maxlength="{MAX_CONTENT_CHARS}" required>{content}</textarea>
<button type="submit">Save changes</button>
</form>"#,
        view = escape_html(&post_path(title.as_str())),
        action = escape_html(&edit_path(title.as_str())),
        title = escape_html(title.as_str()),
        errors = field_errors(errors),
        content = escape_html(content),
    );
    layout(&format!("Edit {title}"), notices, &body)
}

/// Delete confirmation form
#[must_use]
pub fn delete_post_page(title: &PostTitle, errors: &[FieldError], notices: &[Notice]) -> String {
    let body = format!(
        r#"<h1>Delete {title}?</h1>
{errors}
<form action="{action}" method="post">
<input type="hidden" name="title" value="{title}">
<button type="submit">Delete</button>
<a href="{view}">Cancel</a>
</form>"#,
        title = escape_html(title.as_str()),
        errors = field_errors(errors),
        action = escape_html(&delete_path(title.as_str())),
        view = escape_html(&post_path(title.as_str())),
    );
    layout(&format!("Delete {title}"), notices, &body)
}

/// Search results, with the query echoed back
#[must_use]
pub fn search_page(query: Option<&str>, results: &[(String, String)]) -> String {
    let mut body = match query {
        Some(q) => format!(
            "<h1>Search results for &quot;{}&quot;</h1>\n",
            escape_html(q)
        ),
        None => String::from("<h1>Search</h1>\n"),
    };

    if results.is_empty() {
        body.push_str(r#"<p class="empty">No matching posts.</p>"#);
    } else {
        body.push_str("<ul class=\"results\">\n");
        for (title, content) in results {
            let _ = writeln!(
                body,
                r#"<li><a href="{}">{}</a><p>{}</p></li>"#,
                escape_html(&post_path(title)),
                escape_html(title),
                escape_html(&excerpt(content))
            );
        }
        body.push_str("</ul>");
    }
    layout("Search", &[], &body)
}

/// Page for an unknown post or path
#[must_use]
pub fn not_found_page(message: &str) -> String {
    let body = format!(
        r#"<h1>Not found</h1>
<p>{}</p>
<p><a href="/">Back to all posts</a></p>"#,
        escape_html(message)
    );
    layout("Not found", &[], &body)
}

/// Page for failures the user cannot fix
#[must_use]
pub fn error_page() -> String {
    layout(
        "Error",
        &[],
        "<h1>Something went wrong</h1>\n<p>The request could not be completed.</p>",
    )
}

fn excerpt(content: &str) -> String {
    let mut chars = content.chars();
    let mut out: String = chars.by_ref().take(EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_post_path_encodes() {
        assert_eq!(post_path("Intro"), "/Intro");
        assert_eq!(post_path("Hello World?"), "/Hello%20World%3F");
    }

    #[test]
    fn test_posts_page_lists_titles() {
        let html = posts_page(&["Intro".to_string(), "<b>".to_string()], &[]);
        assert!(html.contains(r#"<a href="/Intro">Intro</a>"#));
        assert!(html.contains("&lt;b&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_posts_page_empty() {
        assert!(posts_page(&[], &[]).contains("No posts yet."));
    }

    #[test]
    fn test_notices_are_rendered() {
        let html = posts_page(&[], &[Notice::error("Failed <here>")]);
        assert!(html.contains("notice-error"));
        assert!(html.contains("Failed &lt;here&gt;"));
    }

    #[test]
    fn test_post_page_inserts_html_raw() {
        let title = PostTitle::new("Intro").unwrap();
        let html = post_page(&title, "<h1>Hi</h1>\n", &[]);
        assert!(html.contains("<h1>Hi</h1>"));
        assert!(html.contains(r#"href="/edit/Intro""#));
        assert!(html.contains(r#"href="/delete/Intro""#));
    }

    #[test]
    fn test_new_post_page_keeps_values() {
        let errors = vec![FieldError {
            field: "content",
            message: "This field is required.".to_string(),
        }];
        let html = new_post_page("My \"title\"", "", &errors, &[]);
        assert!(html.contains(r#"value="My &quot;title&quot;""#));
        assert!(html.contains("content: This field is required."));
    }

    #[test]
    fn test_search_page_echoes_query() {
        let html = search_page(
            Some("<hello>"),
            &[("Intro".to_string(), "hello world".to_string())],
        );
        assert!(html.contains("&quot;&lt;hello&gt;&quot;"));
        assert!(html.contains(r#"<a href="/Intro">Intro</a><p>hello world</p>"#));
    }

    #[test]
    fn test_excerpt_truncates() {
        let long = "x".repeat(EXCERPT_CHARS + 10);
        let cut = excerpt(&long);
        assert_eq!(cut.chars().count(), EXCERPT_CHARS + 1);
        assert!(cut.ends_with('…'));
        assert_eq!(excerpt("short"), "short");
    }
}
