/// Authentication guard
///
/// Middleware applied to every protected route. The sequence is fixed:
///
/// 1. The `Authorization` header must exist and carry a `Bearer ` prefix,
///    otherwise the request is rejected with 401 before any token work.
/// 2. The token is verified (signature, expiry, issuer, access type).
///    Verification failures are denied with a bare 403 carrying no token
///    diagnostics.
/// 3. The user named by the token's subject is loaded from the store. A
///    user that no longer exists is a 404; a failed lookup is a 500.
/// 4. The resolved [`User`] is inserted into request extensions, where
///    handlers pick it up with `Extension<User>`.
///
/// Handlers behind this guard therefore never see a request without a live,
/// attached user.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use storyboard_shared::{auth::jwt, models::user::User};

use crate::{app::AppState, error::ApiError};

/// Guard middleware; install with `axum::middleware::from_fn_with_state`.
pub async fn auth_guard(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let token = bearer_token(header_value)?;

    let claims = match jwt::validate_access_token(token, state.jwt_secret()) {
        Ok(claims) => claims,
        Err(_) => return Err(ApiError::Forbidden("Access denied".to_string())),
    };

    let user = match User::find_by_id(&state.db, claims.sub).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Err(ApiError::NotFound("This user no longer exists".to_string()));
        }
        Err(e) => {
            return Err(ApiError::InternalError(format!(
                "User lookup failed during authentication: {}",
                e
            )));
        }
    };

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Extracts the token from a `Bearer `-prefixed Authorization header value.
fn bearer_token(header: Option<&str>) -> Result<&str, ApiError> {
    header
        .and_then(|h| h.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            ApiError::Unauthorized("You are not logged in. Please log in to continue.".to_string())
        })
}
