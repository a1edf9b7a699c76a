/// Story endpoints
///
/// # Endpoints
///
/// - `POST /v1/stories` - Create story (board id in the body)
/// - `GET /v1/stories` - List stories (generic handler)
/// - `GET /v1/stories/:id` - Get story (generic handler)
/// - `DELETE /v1/stories/:id` - Delete story (generic handler)
///
/// Creation always verifies that the target board is owned by the caller;
/// a foreign board id behaves exactly like a missing one.

use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use uuid::Uuid;
use validator::Validate;

use storyboard_shared::{
    crud::CrudService,
    models::{
        board::Board,
        story::{CreateStory, Story},
        user::User,
    },
};

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::crud::{keyed, Resource},
};

impl Resource for Story {
    const SINGULAR: &'static str = "story";
    const PLURAL: &'static str = "stories";
}

/// Create story request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStoryRequest {
    /// Story title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// Optional longer description
    pub description: Option<String>,

    /// Board to attach the story to
    pub board_id: Uuid,
}

/// Create a new story on one of the caller's boards.
///
/// # Response
///
/// `201 Created` with `{ "story": { ... } }`.
pub async fn create_story(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(req): Json<CreateStoryRequest>,
) -> ApiResult<(StatusCode, Json<JsonValue>)> {
    req.validate()?;

    let board = CrudService::<Board>::new(state.db.clone())
        .find_one(req.board_id, user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("board not found".to_string()))?;

    create_on_board(&state, &user, board.id, req.title, req.description).await
}

/// Shared creation path for `POST /v1/stories` and
/// `POST /v1/boards/:id/stories`. Callers have already confirmed board
/// ownership.
pub(crate) async fn create_on_board(
    state: &AppState,
    user: &User,
    board_id: Uuid,
    title: String,
    description: Option<String>,
) -> ApiResult<(StatusCode, Json<JsonValue>)> {
    let story = CrudService::<Story>::new(state.db.clone())
        .create(CreateStory {
            title,
            description,
            board_id,
            user_id: user.id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(keyed(Story::SINGULAR, serde_json::to_value(story)?)),
    ))
}
