/// Generic CRUD handlers
///
/// One set of axum handlers serves every owned resource. A resource opts in
/// by implementing [`Resource`], which adds the two response keys to the
/// document traits; the routes then register e.g. `find_all::<Board>`.
///
/// Response bodies wrap documents under the resource's name:
/// `{ "<plural>": [docs] }` for lists and `{ "<singular>": doc }` for single
/// documents. The owner id always comes from the guard-attached user, so
/// these handlers cannot cross user boundaries.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use storyboard_shared::{crud::CrudService, db::repository::OwnedDocument, models::user::User};

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};

/// An owned document servable by the generic handlers.
pub trait Resource: OwnedDocument {
    /// Response key for a single document, e.g. "board"
    const SINGULAR: &'static str;

    /// Response key for a collection, e.g. "boards"
    const PLURAL: &'static str;
}

/// Wraps `value` in an object under `key`.
pub(crate) fn keyed(key: &str, value: JsonValue) -> JsonValue {
    let mut map = serde_json::Map::with_capacity(1);
    map.insert(key.to_string(), value);
    JsonValue::Object(map)
}

/// `GET /v1/<plural>`
///
/// Lists the caller's documents, newest first, as `{ "<plural>": [...] }`.
pub async fn find_all<R: Resource>(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> ApiResult<Json<JsonValue>> {
    let docs = CrudService::<R>::new(state.db.clone())
        .find_many(user.id)
        .await?;

    Ok(Json(keyed(R::PLURAL, serde_json::to_value(docs)?)))
}

/// `GET /v1/<plural>/:id`
///
/// Returns `{ "<singular>": doc }`, or 404 when the document does not exist
/// or belongs to someone else.
pub async fn find_one<R: Resource>(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<JsonValue>> {
    let doc = CrudService::<R>::new(state.db.clone())
        .find_one(id, user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("{} not found", R::SINGULAR)))?;

    Ok(Json(keyed(R::SINGULAR, serde_json::to_value(doc)?)))
}

/// `DELETE /v1/<plural>/:id`
///
/// Returns 204 on success, 404 when nothing owned by the caller matched.
pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let deleted = CrudService::<R>::new(state.db.clone())
        .delete(id, user.id)
        .await?;

    if !deleted {
        return Err(ApiError::NotFound(format!("{} not found", R::SINGULAR)));
    }

    Ok(StatusCode::NO_CONTENT)
}
