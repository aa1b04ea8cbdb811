//! Embedded web dashboard for spamscope.
//!
//! Provides a lightweight HTTP server (sync, via `tiny_http`) that serves:
//! - A single-page app with a classify view and a dataset dashboard view
//! - JSON API endpoints for classification, history, dashboard stats, health
//!
//! Launched via `spamscope web` (default: `http://127.0.0.1:8501`).
//!
//! The server owns one [`AppState`]: the model and dataset loaded at startup
//! plus the single session history. Requests are handled one at a time.

mod api;
mod frontend;

use std::io::Cursor;

use anyhow::{Context, Result};
use colored::Colorize;
use tiny_http::{Header, Method, Response, Server, StatusCode};

use crate::config::{self, SpamscopeConfig};
use crate::dataset::{self, Dataset};
use crate::history::SessionHistory;
use crate::model::{self, ModelBundle};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Model availability. A failed load keeps the server up in an error state.
#[derive(Debug)]
pub enum ModelState {
    Ready(ModelBundle),
    Failed(String),
}

/// Dataset availability. A missing dataset only disables the dashboard.
#[derive(Debug)]
pub enum DatasetState {
    Ready(Dataset),
    Missing(String),
}

/// Everything the request handlers read or mutate.
#[derive(Debug)]
pub struct AppState {
    pub config: SpamscopeConfig,
    pub model: ModelState,
    pub dataset: DatasetState,
    pub history: SessionHistory,
}

impl AppState {
    pub fn new(config: SpamscopeConfig, model: ModelState, dataset: DatasetState) -> Self {
        Self {
            config,
            model,
            dataset,
            history: SessionHistory::new(),
        }
    }

    /// Load model and dataset as named by `config`, capturing failures.
    pub fn load(config: SpamscopeConfig) -> Self {
        let model = match model::load(config::expand_home(&config.model.path)) {
            Ok(bundle) => ModelState::Ready(bundle),
            Err(e) => ModelState::Failed(format!("{e:#}")),
        };
        let dataset = match dataset::load(config::expand_home(&config.dataset.path), &config.dataset)
        {
            Ok(dataset) => DatasetState::Ready(dataset),
            Err(e) => DatasetState::Missing(format!("{e:#}")),
        };
        Self::new(config, model, dataset)
    }
}

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Start the web dashboard server.
///
/// `addr` overrides `web.addr` from the config. Blocks the current thread and
/// handles requests sequentially. Per-request errors become JSON 500
/// responses without stopping the server.
pub fn serve(addr: Option<&str>, open: bool) -> Result<()> {
    let cfg = config::load();
    let addr = addr.map(str::to_string).unwrap_or_else(|| cfg.web.addr.clone());
    let open = open && cfg.web.open_browser;

    let mut state = AppState::load(cfg);

    if let ModelState::Failed(reason) = &state.model {
        println!("{} {}", "Model unavailable:".red().bold(), reason);
        println!("  {}", "Classification is disabled until the model loads.".dimmed());
    }
    if let DatasetState::Missing(reason) = &state.dataset {
        println!("{} {}", "Dataset not found:".yellow().bold(), reason);
        println!("  {}", "Dashboard statistics are unavailable.".dimmed());
    }

    let server = Server::http(&addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    println!("spamscope dashboard running at http://{addr}");
    println!("Press Ctrl+C to stop.\n");

    if open {
        let _ = open_browser(&format!("http://{addr}"));
    }

    for mut request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        // Read body up-front for methods that carry one
        let body = if matches!(method, Method::Put | Method::Post | Method::Patch) {
            let mut buf = String::new();
            request
                .as_reader()
                .read_to_string(&mut buf)
                .map(|_| Some(buf))
                .context("failed to read request body")
        } else {
            Ok(None)
        };

        let response = match body {
            Ok(body) => match dispatch(&mut state, &method, &url, body.as_deref()) {
                Ok(resp) => resp,
                Err(e) => api::ApiReply::error(500, &format!("{e:#}")).into_response(),
            },
            Err(e) => api::ApiReply::error(400, &format!("{e:#}")).into_response(),
        };
        let _ = request.respond(response);

        // Brief access log
        println!(
            "{} {} {}",
            method,
            url,
            chrono::Local::now().format("%H:%M:%S")
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Dispatch an incoming request to the appropriate handler.
fn dispatch(
    state: &mut AppState,
    method: &Method,
    url: &str,
    body: Option<&str>,
) -> Result<Response<Cursor<Vec<u8>>>> {
    // Strip query string for path matching
    let path = url.split('?').next().unwrap_or(url);

    let reply = match (method, path) {
        (&Method::Get, "/") | (&Method::Get, "/index.html") => return Ok(serve_frontend()),

        // API: Classification
        (&Method::Get, "/api/model") => api::get_model(state)?,
        (&Method::Post, "/api/classify") => api::post_classify(state, body.unwrap_or("{}"))?,
        (&Method::Get, "/api/examples") => api::get_examples()?,

        // API: Session history
        (&Method::Get, "/api/history") => api::get_history(state, url)?,
        (&Method::Delete, "/api/history") => api::delete_history(state)?,

        // API: Dashboard
        (&Method::Get, "/api/dashboard") => api::get_dashboard(state)?,

        // API: Health
        (&Method::Get, "/api/health") => api::get_health(state)?,

        _ => api::ApiReply::error(404, "not found"),
    };

    Ok(reply.into_response())
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Serve the embedded single-page frontend.
fn serve_frontend() -> Response<Cursor<Vec<u8>>> {
    let html = frontend::INDEX_HTML;
    Response::from_data(html.as_bytes().to_vec())
        .with_header(content_type_html())
        .with_status_code(StatusCode(200))
}

/// JSON content type header.
pub(crate) fn content_type_json() -> Header {
    Header::from_bytes("Content-Type", "application/json; charset=utf-8")
        .expect("static header is valid")
}

/// HTML content type header.
fn content_type_html() -> Header {
    Header::from_bytes("Content-Type", "text/html; charset=utf-8")
        .expect("static header is valid")
}

/// Attempt to open a URL in the system default browser.
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    Ok(())
}
