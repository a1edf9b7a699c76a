/// User endpoints
///
/// # Endpoints
///
/// - `GET /v1/users/me` - The authenticated user

use axum::{Extension, Json};
use serde_json::Value as JsonValue;

use storyboard_shared::models::user::User;

use crate::{error::ApiResult, routes::crud::keyed};

/// Returns the user the guard attached to this request as
/// `{ "user": { ... } }`.
///
/// No store access happens here; the guard already resolved the user.
pub async fn me(Extension(user): Extension<User>) -> ApiResult<Json<JsonValue>> {
    Ok(Json(keyed("user", serde_json::to_value(user)?)))
}
