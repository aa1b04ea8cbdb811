//! JSON API handlers for the web dashboard.
//!
//! Each handler corresponds to an API endpoint and returns an [`ApiReply`]
//! (status + JSON body) that the router turns into a `tiny_http` response.

use std::io::Cursor;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tiny_http::{Response, StatusCode};

use crate::classifier::{Classification, Classifier, HAM_EXAMPLE, SPAM_EXAMPLE};
use crate::config;
use crate::dashboard::{self, DashboardStats};
use crate::history::ClassificationResult;
use crate::model::{Label, ModelInfo};

use super::{AppState, DatasetState, ModelState, content_type_json};

// ---------------------------------------------------------------------------
// Reply type
// ---------------------------------------------------------------------------

/// A JSON reply before it is written to the wire.
#[derive(Debug)]
pub struct ApiReply {
    pub status: u16,
    pub body: serde_json::Value,
}

impl ApiReply {
    fn ok<T: Serialize>(data: &T) -> Result<Self> {
        let body = serde_json::to_value(data).context("failed to serialize JSON response")?;
        Ok(Self { status: 200, body })
    }

    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: serde_json::json!({ "error": message }),
        }
    }

    pub fn into_response(self) -> Response<Cursor<Vec<u8>>> {
        Response::from_data(self.body.to_string().into_bytes())
            .with_header(content_type_json())
            .with_status_code(StatusCode(self.status))
    }
}

// ---------------------------------------------------------------------------
// JSON request / response types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ClassifyRequest {
    #[serde(default)]
    message: String,
}

#[derive(Serialize)]
struct ClassifyResponse {
    /// The history entry, or `None` when there was nothing to classify.
    result: Option<HistoryEntryResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    classification: Option<ClassificationResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<String>,
}

#[derive(Serialize)]
struct ClassificationResponse {
    label: Label,
    confidence: f64,
    ham_probability: f64,
    spam_probability: f64,
}

impl From<&Classification> for ClassificationResponse {
    fn from(c: &Classification) -> Self {
        Self {
            label: c.label,
            confidence: c.confidence(),
            ham_probability: c.ham_probability,
            spam_probability: c.spam_probability,
        }
    }
}

#[derive(Serialize)]
struct HistoryEntryResponse {
    timestamp: String,
    message: String,
    label: Label,
    confidence: f64,
}

impl From<&ClassificationResult> for HistoryEntryResponse {
    fn from(entry: &ClassificationResult) -> Self {
        Self {
            timestamp: entry.display_timestamp(),
            message: entry.message().to_string(),
            label: entry.label(),
            confidence: entry.confidence(),
        }
    }
}

#[derive(Serialize)]
struct HistoryResponse {
    total: usize,
    entries: Vec<HistoryEntryResponse>,
}

#[derive(Serialize)]
struct ExamplesResponse {
    ham: &'static str,
    spam: &'static str,
}

#[derive(Serialize)]
struct DashboardResponse {
    available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    spam_rate_display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<DashboardStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<ModelInfo>,
}

#[derive(Serialize)]
struct HealthResponse {
    model_ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    model_error: Option<String>,
    dataset_ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    dataset_error: Option<String>,
    dataset_messages: usize,
    history_entries: usize,
    logging_enabled: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a non-negative integer query parameter from a URL.
fn parse_usize_param(url: &str, name: &str) -> Option<usize> {
    url.split('?').nth(1)?.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        if k == name { v.parse().ok() } else { None }
    })
}

fn model_unavailable(reason: &str) -> ApiReply {
    ApiReply::error(503, &format!("model unavailable: {reason}"))
}

// ---------------------------------------------------------------------------
// API Handlers
// ---------------------------------------------------------------------------

/// `GET /api/model`: model metadata.
pub fn get_model(state: &AppState) -> Result<ApiReply> {
    match &state.model {
        ModelState::Ready(bundle) => ApiReply::ok(&bundle.info()),
        ModelState::Failed(reason) => Ok(model_unavailable(reason)),
    }
}

/// `POST /api/classify`: classify a message and record it in the session.
///
/// Expects JSON body: `{ "message": "..." }`. Blank messages return
/// `{ "result": null, "notice": ... }` and record nothing.
pub fn post_classify(state: &mut AppState, body: &str) -> Result<ApiReply> {
    let req: ClassifyRequest = match serde_json::from_str(body) {
        Ok(req) => req,
        Err(e) => {
            return Ok(ApiReply::error(
                400,
                &format!("invalid JSON in classify request: {e}"),
            ));
        }
    };

    let bundle = match &state.model {
        ModelState::Ready(bundle) => bundle,
        ModelState::Failed(reason) => return Ok(model_unavailable(reason)),
    };

    let mut classifier = Classifier::new(bundle, state.config.history.preview_chars);
    if state.config.logging.enabled {
        classifier = classifier.with_log(config::expand_home(&state.config.logging.path), "web");
    }

    let resp = match classifier.classify(&req.message, &mut state.history) {
        Some(outcome) => ClassifyResponse {
            result: Some(HistoryEntryResponse::from(&outcome.entry)),
            classification: Some(ClassificationResponse::from(&outcome.classification)),
            notice: None,
        },
        None => ClassifyResponse {
            result: None,
            classification: None,
            notice: Some("Enter a message to classify.".to_string()),
        },
    };

    ApiReply::ok(&resp)
}

/// `GET /api/examples`: the canned example messages.
pub fn get_examples() -> Result<ApiReply> {
    ApiReply::ok(&ExamplesResponse {
        ham: HAM_EXAMPLE,
        spam: SPAM_EXAMPLE,
    })
}

/// `GET /api/history?limit=N`: most recent predictions, newest first.
pub fn get_history(state: &AppState, url: &str) -> Result<ApiReply> {
    let limit =
        parse_usize_param(url, "limit").unwrap_or(state.config.history.display_limit);

    ApiReply::ok(&HistoryResponse {
        total: state.history.len(),
        entries: state
            .history
            .recent(limit)
            .into_iter()
            .map(HistoryEntryResponse::from)
            .collect(),
    })
}

/// `DELETE /api/history`: clear the session history.
pub fn delete_history(state: &mut AppState) -> Result<ApiReply> {
    state.history.clear();
    ApiReply::ok(&serde_json::json!({ "success": true }))
}

/// `GET /api/dashboard`: dataset statistics, or a warning when unavailable.
pub fn get_dashboard(state: &AppState) -> Result<ApiReply> {
    let model = match &state.model {
        ModelState::Ready(bundle) => Some(bundle.info()),
        ModelState::Failed(_) => None,
    };

    let resp = match &state.dataset {
        DatasetState::Ready(dataset) => {
            let stats = dashboard::compute(dataset, &state.config.dashboard);
            DashboardResponse {
                available: true,
                warning: None,
                spam_rate_display: Some(stats.spam_rate_display()),
                stats: Some(stats),
                model,
            }
        }
        DatasetState::Missing(reason) => DashboardResponse {
            available: false,
            warning: Some(format!(
                "Dataset not found. Dashboard statistics are unavailable. ({reason})"
            )),
            spam_rate_display: None,
            stats: None,
            model,
        },
    };

    ApiReply::ok(&resp)
}

/// `GET /api/health`: readiness summary.
pub fn get_health(state: &AppState) -> Result<ApiReply> {
    let (model_ready, model_error) = match &state.model {
        ModelState::Ready(_) => (true, None),
        ModelState::Failed(reason) => (false, Some(reason.clone())),
    };
    let (dataset_ready, dataset_error, dataset_messages) = match &state.dataset {
        DatasetState::Ready(dataset) => (true, None, dataset.len()),
        DatasetState::Missing(reason) => (false, Some(reason.clone()), 0),
    };

    ApiReply::ok(&HealthResponse {
        model_ready,
        model_error,
        dataset_ready,
        dataset_error,
        dataset_messages,
        history_entries: state.history.len(),
        logging_enabled: state.config.logging.enabled,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpamscopeConfig;
    use crate::dataset::{Dataset, DatasetRecord};
    use crate::model::ModelBundle;

    fn bundle() -> ModelBundle {
        ModelBundle::from_json(
            r#"{
                "accuracy": 0.9832,
                "feature_count": 3,
                "vectorizer": { "vocabulary": { "winner": 0, "prize": 1, "coffee": 2 } },
                "model": {
                    "class_log_prior": [-0.15, -1.97],
                    "feature_log_prob": [[-6.0, -6.0, -0.5], [-0.5, -0.9, -6.0]]
                }
            }"#,
        )
        .unwrap()
    }

    fn state(model: ModelState, dataset: DatasetState) -> AppState {
        let mut config = SpamscopeConfig::default();
        config.logging.enabled = false;
        AppState::new(config, model, dataset)
    }

    fn ready_state() -> AppState {
        let records = vec![
            DatasetRecord::new("Free prize inside", "spam", "spam"),
            DatasetRecord::new("Lunch at noon?", "ham", "spam"),
        ];
        state(
            ModelState::Ready(bundle()),
            DatasetState::Ready(Dataset::from_records(records)),
        )
    }

    #[test]
    fn parse_usize_param_extracts_value() {
        assert_eq!(parse_usize_param("/api/history?limit=5", "limit"), Some(5));
        assert_eq!(parse_usize_param("/api/history?x=1&limit=9", "limit"), Some(9));
        assert_eq!(parse_usize_param("/api/history", "limit"), None);
        assert_eq!(parse_usize_param("/api/history?limit=-1", "limit"), None);
        assert_eq!(parse_usize_param("/api/history?limit=", "limit"), None);
    }

    #[test]
    fn classify_records_into_history() {
        let mut state = ready_state();
        let reply = post_classify(&mut state, r#"{"message": "WINNER prize prize"}"#).unwrap();

        assert_eq!(reply.status, 200);
        assert_eq!(reply.body["result"]["label"], "Spam");
        assert_eq!(reply.body["classification"]["label"], "Spam");
        assert_eq!(state.history.len(), 1);

        let history = get_history(&state, "/api/history").unwrap();
        assert_eq!(history.body["total"], 1);
        assert_eq!(history.body["entries"][0]["message"], "WINNER prize prize");
    }

    #[test]
    fn classify_blank_message_returns_notice() {
        let mut state = ready_state();
        let reply = post_classify(&mut state, r#"{"message": "   "}"#).unwrap();

        assert_eq!(reply.status, 200);
        assert!(reply.body["result"].is_null());
        assert!(reply.body["notice"].is_string());
        assert!(state.history.is_empty());

        let reply = post_classify(&mut state, "{}").unwrap();
        assert!(reply.body["result"].is_null());
    }

    #[test]
    fn classify_without_model_is_unavailable() {
        let mut state = state(
            ModelState::Failed("missing file".to_string()),
            DatasetState::Missing("missing file".to_string()),
        );
        let reply = post_classify(&mut state, r#"{"message": "hello"}"#).unwrap();
        assert_eq!(reply.status, 503);
        assert!(state.history.is_empty());

        assert_eq!(get_model(&state).unwrap().status, 503);
    }

    #[test]
    fn classify_rejects_invalid_json() {
        let mut state = ready_state();
        for body in ["not json", r#"{"message": 42}"#, ""] {
            let reply = post_classify(&mut state, body).unwrap();
            assert_eq!(reply.status, 400, "{body}");
            assert!(reply.body["error"].as_str().unwrap().contains("invalid JSON"));
        }
        assert!(state.history.is_empty());
    }

    #[test]
    fn history_limit_and_clear() {
        let mut state = ready_state();
        for i in 0..7 {
            post_classify(&mut state, &format!(r#"{{"message": "coffee {i}"}}"#)).unwrap();
        }

        let reply = get_history(&state, "/api/history").unwrap();
        let entries = reply.body["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0]["message"], "coffee 6");

        let reply = get_history(&state, "/api/history?limit=2").unwrap();
        assert_eq!(reply.body["entries"].as_array().unwrap().len(), 2);

        delete_history(&mut state).unwrap();
        let reply = get_history(&state, "/api/history").unwrap();
        assert_eq!(reply.body["total"], 0);
    }

    #[test]
    fn dashboard_reports_stats() {
        let state = ready_state();
        let reply = get_dashboard(&state).unwrap();

        assert_eq!(reply.body["available"], true);
        assert_eq!(reply.body["stats"]["total"], 2);
        assert_eq!(reply.body["stats"]["spam_count"], 1);
        assert_eq!(reply.body["spam_rate_display"], "50.0%");
        assert_eq!(reply.body["model"]["feature_count"], 3);
    }

    #[test]
    fn dashboard_degrades_without_dataset() {
        let state = state(
            ModelState::Ready(bundle()),
            DatasetState::Missing("no spam.csv".to_string()),
        );
        let reply = get_dashboard(&state).unwrap();

        assert_eq!(reply.status, 200);
        assert_eq!(reply.body["available"], false);
        assert!(reply.body["warning"].as_str().unwrap().contains("no spam.csv"));
        assert!(reply.body.get("stats").is_none());
    }

    #[test]
    fn health_reflects_state() {
        let state = state(
            ModelState::Failed("bad artifact".to_string()),
            DatasetState::Ready(Dataset::default()),
        );
        let reply = get_health(&state).unwrap();
        assert_eq!(reply.body["model_ready"], false);
        assert_eq!(reply.body["model_error"], "bad artifact");
        assert_eq!(reply.body["dataset_ready"], true);
        assert_eq!(reply.body["dataset_messages"], 0);
    }

    #[test]
    fn examples_are_exposed() {
        let reply = get_examples().unwrap();
        assert_eq!(reply.body["ham"], HAM_EXAMPLE);
        assert_eq!(reply.body["spam"], SPAM_EXAMPLE);
    }

    #[test]
    fn error_reply_shape() {
        let reply = ApiReply::error(404, "not found");
        assert_eq!(reply.status, 404);
        assert_eq!(reply.body["error"], "not found");
    }
}
