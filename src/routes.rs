use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::warn;

use crate::cache::FeedCache;
use crate::feed::NewsEntry;

pub const CARDS_PER_ROW: usize = 3;

/// Shared state handed to every handler.
pub struct AppState {
    pub cache: FeedCache,
    pub default_query: String,
}

/// Status line shown above the card grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Prompt,
    Found(usize),
    Empty,
}

impl Notice {
    pub fn css_class(&self) -> &'static str {
        match self {
            Notice::Prompt => "notice-info",
            Notice::Found(_) => "notice-success",
            Notice::Empty => "notice-warning",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Notice::Prompt => "👈 サイドバーから検索キーワードを入力してください".to_string(),
            Notice::Found(count) => format!("🐟 {}件のニュースを釣り上げました！", count),
            Notice::Empty => {
                "🐟 ニュースが見つかりませんでした。別のキーワードで試してください。".to_string()
            }
        }
    }
}

pub struct Card {
    pub title: String,
    pub link: String,
    pub date: String,
    pub summary: String,
}

impl From<NewsEntry> for Card {
    fn from(entry: NewsEntry) -> Self {
        Self {
            date: entry.published.to_string(),
            title: entry.title,
            link: entry.link,
            summary: entry.summary,
        }
    }
}

// Template structs
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub query: String,
    pub notice: Notice,
    pub rows: Vec<Vec<Card>>,
}

#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsTemplate {
    pub notice: Notice,
    pub rows: Vec<Vec<Card>>,
}

// Wrapper for HTML responses
struct HtmlTemplate<T>(T);

impl<T: Template> IntoResponse for HtmlTemplate<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template: {}", err),
            )
                .into_response(),
        }
    }
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/news", get(news))
        .route("/health", get(health))
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Resolve the notice and card rows for a query. An empty query never
/// reaches the network; a fetch failure is shown the same as zero results.
async fn search(cache: &FeedCache, query: &str) -> (Notice, Vec<Vec<Card>>) {
    if query.is_empty() {
        return (Notice::Prompt, Vec::new());
    }

    let entries = match cache.get_entries(query).await {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Failed to fetch news for '{}': {}", query, e);
            Vec::new()
        }
    };

    if entries.is_empty() {
        return (Notice::Empty, Vec::new());
    }

    let notice = Notice::Found(entries.len());
    (notice, into_rows(entries))
}

fn into_rows(entries: Vec<NewsEntry>) -> Vec<Vec<Card>> {
    let mut rows = Vec::new();
    let mut cards = entries.into_iter().map(Card::from).peekable();
    while cards.peek().is_some() {
        rows.push(cards.by_ref().take(CARDS_PER_ROW).collect());
    }
    rows
}

// Route handlers
pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> impl IntoResponse {
    let query = params.q.unwrap_or_else(|| state.default_query.clone());
    let (notice, rows) = search(&state.cache, &query).await;

    HtmlTemplate(IndexTemplate {
        query,
        notice,
        rows,
    })
}

pub async fn news(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> impl IntoResponse {
    let query = params.q.unwrap_or_default();
    let (notice, rows) = search(&state.cache, &query).await;

    HtmlTemplate(ResultsTemplate { notice, rows })
}

pub async fn health() -> impl IntoResponse {
    Html("OK")
}
