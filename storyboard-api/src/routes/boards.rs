/// Board endpoints
///
/// # Endpoints
///
/// - `POST /v1/boards` - Create board
/// - `GET /v1/boards` - List boards (generic handler)
/// - `GET /v1/boards/:id` - Get board (generic handler)
/// - `DELETE /v1/boards/:id` - Delete board (generic handler)
/// - `POST /v1/boards/:id/stories` - Add a story to a board

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use uuid::Uuid;
use validator::Validate;

use storyboard_shared::{
    crud::CrudService,
    models::{
        board::{Board, CreateBoard},
        user::User,
    },
};

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::crud::{keyed, Resource},
    routes::stories,
};

impl Resource for Board {
    const SINGULAR: &'static str = "board";
    const PLURAL: &'static str = "boards";
}

/// Create board request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBoardRequest {
    /// Board title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,
}

/// Story payload for `POST /v1/boards/:id/stories`
#[derive(Debug, Deserialize, Validate)]
pub struct AddStoryRequest {
    /// Story title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// Optional longer description
    pub description: Option<String>,
}

/// Create a new board owned by the caller.
///
/// # Response
///
/// `201 Created` with `{ "board": { ... } }`.
pub async fn create_board(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(req): Json<CreateBoardRequest>,
) -> ApiResult<(StatusCode, Json<JsonValue>)> {
    req.validate()?;

    let board = CrudService::<Board>::new(state.db.clone())
        .create(CreateBoard {
            title: req.title,
            user_id: user.id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(keyed(Board::SINGULAR, serde_json::to_value(board)?)),
    ))
}

/// Add a story to one of the caller's boards.
///
/// The board is resolved through the owner-scoped service first, so adding
/// to an unknown or foreign board is a 404.
///
/// # Response
///
/// `201 Created` with `{ "story": { ... } }`.
pub async fn add_story(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(board_id): Path<Uuid>,
    Json(req): Json<AddStoryRequest>,
) -> ApiResult<(StatusCode, Json<JsonValue>)> {
    req.validate()?;

    let board = CrudService::<Board>::new(state.db.clone())
        .find_one(board_id, user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("board not found".to_string()))?;

    stories::create_on_board(&state, &user, board.id, req.title, req.description).await
}
