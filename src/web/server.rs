//! HTTP server implementation for the task list UI.
//!
//! This module provides the axum-based HTTP server that serves the
//! server-rendered task page and handles the mutation routes.

use axum::{
    Router,
    extract::{Form, Path, Query, State},
    response::{Html, IntoResponse, Json, Redirect},
    routing::{get, post},
};
use chrono::{DateTime, NaiveDate, Utc};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use super::templates;
use crate::db::{Database, now_ms};
use crate::error::AppResult;
use crate::status::TaskStatus;
use crate::types::{Task, TaskFilter, normalize_title};

/// Server state shared across handlers.
#[derive(Clone)]
pub struct WebServer {
    /// Reference to the task database.
    db: Arc<Database>,
}

impl WebServer {
    /// Create a new server instance.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Get the database reference.
    pub fn db(&self) -> &Arc<Database> {
        &self.db
    }
}

/// Health check response.
#[derive(serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Query parameters for the listing page.
#[derive(Debug, serde::Deserialize)]
struct ListParams {
    f: Option<String>,
    start: Option<String>,
    end: Option<String>,
}

/// Form data for adding a task.
#[derive(Debug, serde::Deserialize)]
struct AddForm {
    title: Option<String>,
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Format epoch milliseconds at minute precision, or an empty string.
fn format_timestamp(ms: Option<i64>) -> String {
    ms.and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

/// Parse an ISO date query parameter, treating malformed input as absent.
fn parse_date(s: Option<&str>) -> Option<NaiveDate> {
    s.and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

/// Build the filter link bar, highlighting the current filter.
fn render_filters(current: TaskFilter) -> String {
    [
        (TaskFilter::Active, "Active"),
        (TaskFilter::Open, "Open"),
        (TaskFilter::Done, "Done"),
        (TaskFilter::Archive, "Archive"),
    ]
    .iter()
    .map(|(filter, label)| {
        let class = if *filter == current { " class=\"current\"" } else { "" };
        format!(r#"<a href="/?f={}"{}>{}</a>"#, filter.as_str(), class, label)
    })
    .collect::<Vec<_>>()
    .join("\n")
}

/// Build the date-range form, shown only on the archive view.
fn render_date_form(current: TaskFilter) -> String {
    if current != TaskFilter::Archive {
        return String::new();
    }

    r#"<form method="get" action="/">
<input type="hidden" name="f" value="archive">
From: <input type="date" name="start">
To: <input type="date" name="end">
<button>Filter</button>
</form>"#
        .to_string()
}

/// Build one task table row.
fn render_task_row(task: &Task, now: i64) -> String {
    let status = TaskStatus::compute(task, now);

    let mut row_class = status.urgency.css_class().to_string();
    if task.done {
        if !row_class.is_empty() {
            row_class.push(' ');
        }
        row_class.push_str("done");
    }

    let checked = if task.done { " checked" } else { "" };

    let action = if task.archived {
        format!(
            r#"<form method="post" action="/unarchive/{}"><button>Restore</button></form>"#,
            task.id
        )
    } else if task.done {
        format!(
            r#"<form method="post" action="/archive/{}"><button>Archive</button></form>"#,
            task.id
        )
    } else {
        "&mdash;".to_string()
    };

    format!(
        r#"<tr class="{}">
<td><form method="post" action="/toggle/{}"><input type="checkbox" onchange="this.form.submit()"{}></form></td>
<td>{}</td>
<td>{}</td>
<td>{}</td>
<td>{}</td>
<td>{}</td>
</tr>"#,
        row_class,
        task.id,
        checked,
        html_escape(&task.title),
        format_timestamp(Some(task.start_dt)),
        format_timestamp(task.end_dt),
        html_escape(&status.text),
        action
    )
}

/// Listing page: render the filtered task table.
async fn index(
    State(state): State<WebServer>,
    Query(params): Query<ListParams>,
) -> AppResult<Html<String>> {
    let filter = params
        .f
        .as_deref()
        .map(TaskFilter::parse)
        .unwrap_or_default();

    // The range only applies when both endpoints parse; a half-open or
    // malformed range is ignored.
    let date_range = match (
        parse_date(params.start.as_deref()),
        parse_date(params.end.as_deref()),
    ) {
        (Some(start), Some(end)) => Some((start, end)),
        _ => None,
    };

    let tasks = state.db().list_tasks(filter, date_range)?;
    debug!(filter = filter.as_str(), count = tasks.len(), "listing tasks");

    let now = now_ms();
    let rows = if tasks.is_empty() {
        r#"<tr><td colspan="6" class="empty-state">No tasks</td></tr>"#.to_string()
    } else {
        tasks
            .iter()
            .map(|t| render_task_row(t, now))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let html = templates::INDEX_TEMPLATE
        .replace("{{filters}}", &render_filters(filter))
        .replace("{{date_form}}", &render_date_form(filter))
        .replace("{{rows}}", &rows);

    Ok(Html(html))
}

/// Add a task. Blank titles are dropped without an error; the redirect
/// proceeds either way.
async fn add_task(
    State(state): State<WebServer>,
    Form(form): Form<AddForm>,
) -> AppResult<Redirect> {
    let Some(title) = normalize_title(form.title.as_deref().unwrap_or("")) else {
        debug!("ignoring blank task title");
        return Ok(Redirect::to("/"));
    };

    let task = state.db().add_task(&title)?;
    info!(id = task.id, title = %task.title, "task added");

    Ok(Redirect::to("/"))
}

/// Flip a task's done state. Missing ids redirect without changing anything.
async fn toggle_task(
    State(state): State<WebServer>,
    Path(id): Path<i64>,
) -> AppResult<Redirect> {
    if !state.db().toggle_task(id)? {
        debug!(id, "toggle on missing task ignored");
    }
    Ok(Redirect::to("/"))
}

/// Archive a done task. Not-done or missing ids are a no-op.
async fn archive_task(
    State(state): State<WebServer>,
    Path(id): Path<i64>,
) -> AppResult<Redirect> {
    if !state.db().archive_task(id)? {
        debug!(id, "archive ignored (not done or missing)");
    }
    Ok(Redirect::to("/"))
}

/// Restore a task from the archive.
async fn unarchive_task(
    State(state): State<WebServer>,
    Path(id): Path<i64>,
) -> AppResult<Redirect> {
    state.db().unarchive_task(id)?;
    Ok(Redirect::to("/?f=archive"))
}

/// Health check endpoint.
async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the router with all routes.
pub fn build_router(state: WebServer) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index).post(add_task))
        .route("/toggle/{id}", post(toggle_task))
        .route("/archive/{id}", post(archive_task))
        .route("/unarchive/{id}", post(unarchive_task))
        .route("/api/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the listener and serve until ctrl-c.
pub async fn run_server(db: Arc<Database>, addr: SocketAddr) -> anyhow::Result<()> {
    let state = WebServer::new(db);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;

    Ok(())
}
