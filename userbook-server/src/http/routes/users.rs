//! User endpoints

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::http::error::ApiError;
use crate::http::extractors::{FormOrJson, UserFields};
use crate::http::server::AppState;
use crate::models::{NewUser, User};

/// GET /users - list all users
async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state
        .store
        .list()
        .await
        .map_err(ApiError::storage("Error fetching users from the database"))?;

    tracing::debug!(count = users.len(), "Listed users");
    Ok(Json(users))
}

/// POST /users - create a user from a JSON or form body
async fn create_user(
    State(state): State<AppState>,
    FormOrJson(fields): FormOrJson<UserFields>,
) -> Result<(StatusCode, String), ApiError> {
    let user = NewUser::from_parts(fields.name, fields.email)?;
    let id = state
        .store
        .create(user)
        .await
        .map_err(ApiError::storage("Error creating user"))?;

    tracing::info!(user_id = id, "User created");
    Ok((StatusCode::CREATED, format!("User created with ID: {id}")))
}

/// User routes
pub fn router() -> Router<AppState> {
    Router::new().route("/users", get(list_users).post(create_user))
}
