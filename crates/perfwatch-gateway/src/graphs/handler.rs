//! Graphs endpoint (GET and POST).
//!
//! Parameters, from the query string and, for POST, a urlencoded body:
//! - `graphName` (repeatable): graphs to show, in order
//! - `refreshRate`: auto-refresh interval in seconds

use axum::{
    extract::{Form, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use perfwatch_core::error::{PerfError, Result};
use perfwatch_core::Outcome;

use super::page;
use crate::app_state::AppState;
use crate::error::ApiError;

pub const GRAPH_NAME_PARAM: &str = "graphName";
pub const REFRESH_RATE_PARAM: &str = "refreshRate";

/// Parsed request parameters.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct GraphsRequest {
    pub graph_names: Vec<String>,
    pub refresh_secs: Option<u32>,
}

impl GraphsRequest {
    /// Collect `graphName` values in order. A non-numeric `refreshRate` is an
    /// error; when repeated, the first one counts.
    pub fn from_params(params: Vec<(String, String)>) -> Result<Self> {
        let mut req = GraphsRequest::default();
        let mut refresh: Option<String> = None;
        for (k, v) in params {
            if k == GRAPH_NAME_PARAM {
                req.graph_names.push(v);
            } else if k == REFRESH_RATE_PARAM && refresh.is_none() {
                refresh = Some(v);
            }
        }
        if let Some(raw) = refresh {
            let secs = raw.trim().parse::<u32>().map_err(|_| {
                PerfError::BadRequest(format!("{REFRESH_RATE_PARAM} must be a whole number of seconds: {raw:?}"))
            })?;
            req.refresh_secs = Some(secs);
        }
        Ok(req)
    }

    pub fn explicit_names(&self) -> Option<&[String]> {
        if self.graph_names.is_empty() {
            None
        } else {
            Some(&self.graph_names)
        }
    }
}

pub async fn graphs_get(State(state): State<AppState>, Query(params): Query<Vec<(String, String)>>) -> Response {
    render_graphs(&state, params)
}

pub async fn graphs_post(
    State(state): State<AppState>,
    Query(mut params): Query<Vec<(String, String)>>,
    body: Option<Form<Vec<(String, String)>>>,
) -> Response {
    if let Some(Form(form)) = body {
        params.extend(form);
    }
    render_graphs(&state, params)
}

fn render_graphs(state: &AppState, params: Vec<(String, String)>) -> Response {
    let mut sw = state.stopwatch("perf.graphs");

    let req = match GraphsRequest::from_params(params) {
        Ok(req) => req,
        Err(e) => {
            sw.stop_with(Outcome::Failed);
            tracing::debug!(error = %e, "graphs request rejected");
            return ApiError(e).into_response();
        }
    };

    let graphs = state.resolver().resolve(req.explicit_names(), state.default_graphs());
    let body = page::render(&graphs, req.refresh_secs);
    sw.stop();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        body,
    )
        .into_response()
}
