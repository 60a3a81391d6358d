// rest/routes/users.rs — demo auth routes.
//
// Credentials are plaintext and compared by equality. This is the demo
// contract; it must never ship against real users (see DESIGN.md). There
// are no sessions or tokens — login simply confirms the pair matches.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

use crate::error::{require_field, ApiError};
use crate::store::NewUser;
use crate::AppContext;

#[derive(Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

pub async fn register(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<Credentials>,
) -> Result<Json<Value>, ApiError> {
    let username = require_field(&body.username, "username")?.to_string();
    let password = require_field(&body.password, "password")?.to_string();

    if ctx.store.get_user_by_username(&username).await.is_some() {
        return Err(ApiError::Validation(format!(
            "username '{username}' is already taken"
        )));
    }

    let user = ctx.store.create_user(NewUser { username, password }).await;
    info!(id = user.id, username = %user.username, "user registered");
    Ok(Json(json!({ "user": user })))
}

pub async fn login(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<Credentials>,
) -> Result<Json<Value>, ApiError> {
    let username = require_field(&body.username, "username")?;
    let password = require_field(&body.password, "password")?;

    let user = ctx
        .store
        .get_user_by_username(username)
        .await
        .filter(|u| u.password == password)
        .ok_or_else(|| ApiError::Auth("invalid username or password".to_string()))?;

    Ok(Json(json!({ "user": user })))
}
