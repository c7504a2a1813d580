//! Axum handlers for the post pages.
//!
//! Every request round-trips through the [`PostStore`]; nothing is cached
//! between requests. Validation failures and title conflicts are answered
//! with the re-rendered form, unknown posts with the not-found page, and
//! storage failures with a 500 (see [`WebError`]).

use crate::error::WebError;
use crate::forms::{DeletePostForm, EditPostForm, NewPostForm};
use crate::markdown::render_markdown;
use crate::notice::{Notice, NoticeCode, NoticeParams};
use crate::pages;
use axum::Json;
use axum::extract::{Form, Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};
use inkwell_common::PostTitle;
use inkwell_store::PostStore;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

type Result<T> = std::result::Result<T, WebError>;

/// Shared state for the post handlers.
pub struct AppState {
    pub store: Arc<dyn PostStore>,
}

/// Query parameters for the search page
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Interpret a route segment as a post title.
///
/// A segment that could never have been created (reserved word, padded
/// with whitespace, illegal characters) is reported as not found.
fn parse_title(raw: &str) -> Result<PostTitle> {
    match PostTitle::new(raw) {
        Ok(title) if title.as_str() == raw => Ok(title),
        _ => Err(WebError::not_found(raw)),
    }
}

/// Parse the route segment and require that the post exists.
fn existing_title(state: &AppState, raw: &str) -> Result<PostTitle> {
    let title = parse_title(raw)?;
    if !state.store.exists(title.as_str())? {
        return Err(WebError::not_found(raw));
    }
    Ok(title)
}

// ---- Pages ----

/// GET /
///
/// # Errors
/// Returns `WebError` if the store cannot be listed.
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NoticeParams>,
) -> Result<Html<String>> {
    let titles = state.store.list_entries()?;
    Ok(Html(pages::posts_page(&titles, &params.notices())))
}

/// GET /{title}
///
/// # Errors
/// Returns `WebError::NotFound` for unknown posts.
pub async fn view_post(
    State(state): State<Arc<AppState>>,
    Path(raw): Path<String>,
    Query(params): Query<NoticeParams>,
) -> Result<Html<String>> {
    let title = parse_title(&raw)?;
    let content = state
        .store
        .get_entry(title.as_str())?
        .ok_or_else(|| WebError::not_found(&raw))?;

    let html = render_markdown(&content);
    Ok(Html(pages::post_page(&title, &html, &params.notices())))
}

/// GET /new
pub async fn new_post_form() -> Html<String> {
    Html(pages::new_post_page("", "", &[], &[]))
}

/// POST /new
///
/// # Errors
/// Returns `WebError` only for storage failures.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    Form(form): Form<NewPostForm>,
) -> Result<Response> {
    let post = match form.validate() {
        Ok(post) => post,
        Err(errors) => {
            let notice = Notice::error("Failed to save post (invalid form)");
            let page = pages::new_post_page(&form.title, &form.content, &errors, &[notice]);
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response());
        }
    };

    if state.store.exists(post.title.as_str())? {
        let notice = Notice::error("Failed to save post (already exists)");
        let page = pages::new_post_page(&form.title, &form.content, &[], &[notice]);
        return Ok((StatusCode::CONFLICT, Html(page)).into_response());
    }

    state.store.save_entry(post.title.as_str(), &post.content)?;
    info!("Created post '{}'", post.title);

    let location = NoticeCode::PostSaved.attach(&pages::post_path(post.title.as_str()));
    Ok(Redirect::to(&location).into_response())
}

/// GET /edit/{title}
///
/// # Errors
/// Returns `WebError::NotFound` for unknown posts.
pub async fn edit_post_form(
    State(state): State<Arc<AppState>>,
    Path(raw): Path<String>,
) -> Result<Html<String>> {
    let title = parse_title(&raw)?;
    let content = state
        .store
        .get_entry(title.as_str())?
        .ok_or_else(|| WebError::not_found(&raw))?;

    Ok(Html(pages::edit_post_page(&title, &content, &[], &[])))
}

/// POST /edit/{title}
///
/// The storage key is the route segment; a `title` field in the body is
/// ignored.
///
/// # Errors
/// Returns `WebError::NotFound` for unknown posts.
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    Path(raw): Path<String>,
    Form(form): Form<EditPostForm>,
) -> Result<Response> {
    let title = existing_title(&state, &raw)?;

    match form.validate() {
        Ok(content) => {
            state.store.save_entry(title.as_str(), &content)?;
            info!("Updated post '{}'", title);
            let notice = Notice::info("Saved changes");
            let page = pages::edit_post_page(&title, &content, &[], &[notice]);
            Ok(Html(page).into_response())
        }
        Err(errors) => {
            let notice = Notice::error("Failed to save changes (invalid form)");
            let page = pages::edit_post_page(&title, &form.content, &errors, &[notice]);
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response())
        }
    }
}

/// GET /delete/{title}
///
/// # Errors
/// Returns `WebError::NotFound` for unknown posts.
pub async fn delete_post_form(
    State(state): State<Arc<AppState>>,
    Path(raw): Path<String>,
) -> Result<Html<String>> {
    let title = existing_title(&state, &raw)?;
    Ok(Html(pages::delete_post_page(&title, &[], &[])))
}

/// POST /delete/{title}
///
/// Deleting a post that is already gone still succeeds.
///
/// # Errors
/// Returns `WebError` for invalid route segments and storage failures.
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    Path(raw): Path<String>,
    Form(form): Form<DeletePostForm>,
) -> Result<Response> {
    let title = parse_title(&raw)?;

    if let Err(errors) = form.validate(&title) {
        let notice = Notice::error("Failed to delete post (invalid form)");
        let page = pages::delete_post_page(&title, &errors, &[notice]);
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response());
    }

    state.store.delete_entry(title.as_str())?;
    info!("Deleted post '{}'", title);

    Ok(Redirect::to(&NoticeCode::PostDeleted.attach("/")).into_response())
}

/// GET /search?q=
///
/// Case-insensitive substring match against every title and every body.
///
/// # Errors
/// Returns `WebError` if the store cannot be scanned.
pub async fn search_posts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>> {
    // An absent query shows nothing; a present one, even empty, is matched as given
    let Some(query) = params.q.as_deref() else {
        return Ok(Html(pages::search_page(None, &[])));
    };

    let needle = query.to_lowercase();
    let entries = state.store.scan()?;
    let scanned = entries.len();
    let results: Vec<(String, String)> = entries
        .into_iter()
        .filter(|(title, content)| {
            title.to_lowercase().contains(&needle) || content.to_lowercase().contains(&needle)
        })
        .collect();
    debug!(
        "Search for '{}' matched {} of {} posts",
        query,
        results.len(),
        scanned
    );

    Ok(Html(pages::search_page(Some(query), &results)))
}

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Fallback for paths no route matches.
pub async fn not_found(uri: Uri) -> impl IntoResponse {
    let page = pages::not_found_page(&format!("Nothing lives at {}.", uri.path()));
    (StatusCode::NOT_FOUND, Html(page))
}
