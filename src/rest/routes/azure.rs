// rest/routes/azure.rs — mocked Azure deployment routes.
//
// Auth and resource listings are canned; deployments follow the real
// submit-then-poll shape the frontend's polling loop expects.

use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::deploy::{self, DeployRequest};
use crate::error::{require_field, ApiError};
use crate::store::DeploymentRow;
use crate::AppContext;

pub async fn auth_status() -> Json<Value> {
    // Always authenticated in the demo — there is no real identity provider.
    Json(json!({ "isAuthenticated": true }))
}

pub async fn login() -> Redirect {
    Redirect::temporary("https://login.microsoftonline.com/common/oauth2/v2.0/authorize")
}

pub async fn deploy(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<DeployRequest>,
) -> Result<Json<Value>, ApiError> {
    require_field(&body.resource_group, "resourceGroup")?;
    require_field(&body.region, "region")?;
    require_field(&body.service_name, "serviceName")?;
    require_field(&body.deployment_type, "deploymentType")?;

    let service_name = body.service_name.clone();
    let record = ctx.deployments.deploy(body).await;
    ctx.metrics.inc_deployments_started();

    // Mirror into the entity store so deployment history survives as a row.
    ctx.store
        .deployments
        .insert(|id| DeploymentRow::new(id, &record.id, &service_name))
        .await;

    Ok(Json(serde_json::to_value(&record).map_err(anyhow::Error::from)?))
}

pub async fn deployment_status(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    match ctx.deployments.check_status(&id).await {
        Some(record) => Ok(Json(
            serde_json::to_value(&record).map_err(anyhow::Error::from)?,
        )),
        None => Err(ApiError::NotFound(format!("deployment '{id}' not found"))),
    }
}

#[derive(Deserialize)]
pub struct ResourceQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

pub async fn resources(Query(query): Query<ResourceQuery>) -> Json<Value> {
    let resources = deploy::list_resources(query.kind.as_deref());
    Json(json!({ "resources": resources }))
}
