// rest/routes/projects.rs — project and file entity CRUD.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::{require_field, ApiError};
use crate::store::{FilePatch, NewFile, NewProject, ProjectPatch};
use crate::AppContext;

pub async fn list(State(ctx): State<Arc<AppContext>>) -> Json<Value> {
    let projects = ctx.store.projects.list().await;
    Json(json!({ "projects": projects }))
}

pub async fn create(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<NewProject>,
) -> Result<Json<Value>, ApiError> {
    require_field(&body.name, "name")?;
    let project = ctx.store.projects.insert(|id| body.into_project(id)).await;
    Ok(Json(json!({ "project": project })))
}

pub async fn get_one(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    match ctx.store.projects.get(id).await {
        Some(project) => Ok(Json(json!({ "project": project }))),
        None => Err(ApiError::NotFound(format!("project {id} not found"))),
    }
}

pub async fn update(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<u64>,
    Json(patch): Json<ProjectPatch>,
) -> Result<Json<Value>, ApiError> {
    match ctx.store.projects.update(id, |p| p.apply(patch)).await {
        Some(project) => Ok(Json(json!({ "project": project }))),
        None => Err(ApiError::NotFound(format!("project {id} not found"))),
    }
}

pub async fn delete(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    // No cascade: the project's files stay behind (preserved design gap).
    if ctx.store.projects.delete(id).await {
        Ok(Json(json!({ "deleted": true })))
    } else {
        Err(ApiError::NotFound(format!("project {id} not found")))
    }
}

pub async fn list_files(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    if ctx.store.projects.get(id).await.is_none() {
        return Err(ApiError::NotFound(format!("project {id} not found")));
    }
    let files = ctx.store.files.filter(|f| f.project_id == id).await;
    Ok(Json(json!({ "files": files })))
}

pub async fn create_file(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<u64>,
    Json(body): Json<NewFile>,
) -> Result<Json<Value>, ApiError> {
    require_field(&body.name, "name")?;
    if ctx.store.projects.get(id).await.is_none() {
        return Err(ApiError::NotFound(format!("project {id} not found")));
    }
    let file = ctx
        .store
        .files
        .insert(|file_id| body.into_file(file_id, id))
        .await;
    Ok(Json(json!({ "file": file })))
}

pub async fn update_file(
    State(ctx): State<Arc<AppContext>>,
    Path((id, file_id)): Path<(u64, u64)>,
    Json(patch): Json<FilePatch>,
) -> Result<Json<Value>, ApiError> {
    let belongs = ctx
        .store
        .files
        .get(file_id)
        .await
        .is_some_and(|f| f.project_id == id);
    if !belongs {
        return Err(ApiError::NotFound(format!(
            "file {file_id} not found in project {id}"
        )));
    }
    match ctx.store.files.update(file_id, |f| f.apply(patch)).await {
        Some(file) => Ok(Json(json!({ "file": file }))),
        None => Err(ApiError::NotFound(format!(
            "file {file_id} not found in project {id}"
        ))),
    }
}
