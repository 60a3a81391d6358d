// rest/routes/workspace.rs — editor workspace routes.
//
// The daemon hosts one workspace per process; all routes go through the
// EditorState behind a RwLock. Write-lock scope is the whole handler body —
// cheap here, and it keeps the tab invariants atomic per request.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::{require_field, ApiError};
use crate::AppContext;

pub async fn tree(State(ctx): State<Arc<AppContext>>) -> Result<Json<Value>, ApiError> {
    let ws = ctx.workspace.read().await;
    Ok(Json(json!({
        "tree": ws.tree(),
        "openFiles": ws.open_files(),
    })))
}

#[derive(Deserialize)]
pub struct FileIdRequest {
    pub id: String,
}

pub async fn open(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<FileIdRequest>,
) -> Result<Json<Value>, ApiError> {
    let id = require_field(&body.id, "id")?;
    let mut ws = ctx.workspace.write().await;
    let Some(node) = ws.find_node(id).cloned() else {
        return Err(ApiError::NotFound(format!("file '{id}' not found")));
    };
    ws.open_file(&node);
    Ok(Json(json!({ "openFiles": ws.open_files() })))
}

pub async fn close(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<FileIdRequest>,
) -> Result<Json<Value>, ApiError> {
    let id = require_field(&body.id, "id")?;
    let mut ws = ctx.workspace.write().await;
    ws.close_file(id);
    Ok(Json(json!({ "openFiles": ws.open_files() })))
}

pub async fn set_active(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<FileIdRequest>,
) -> Result<Json<Value>, ApiError> {
    let id = require_field(&body.id, "id")?;
    let mut ws = ctx.workspace.write().await;
    // Unknown ids are a documented no-op, not an error — `activated` tells
    // the client which one happened.
    let activated = ws.set_active_file(id);
    Ok(Json(json!({
        "activated": activated,
        "openFiles": ws.open_files(),
    })))
}

#[derive(Deserialize)]
pub struct UpdateContentRequest {
    pub id: String,
    pub content: String,
}

pub async fn update_content(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<UpdateContentRequest>,
) -> Result<Json<Value>, ApiError> {
    let id = require_field(&body.id, "id")?;
    let mut ws = ctx.workspace.write().await;
    if !ws.update_content(id, &body.content) {
        return Err(ApiError::NotFound(format!("file '{id}' is not open")));
    }
    Ok(Json(json!({ "updated": true })))
}
