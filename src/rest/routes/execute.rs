// rest/routes/execute.rs — simulated code execution route.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::{require_field, ApiError};
use crate::execute::run_snippet;
use crate::AppContext;

#[derive(Deserialize)]
pub struct ExecuteRequest {
    pub code: String,
    pub language: String,
}

pub async fn execute(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<ExecuteRequest>,
) -> Result<Json<Value>, ApiError> {
    require_field(&body.code, "code")?;
    let language = require_field(&body.language, "language")?;

    ctx.metrics.inc_executions();
    let output = run_snippet(&body.code, language);
    Ok(Json(json!({ "output": output })))
}
