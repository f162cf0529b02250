//! Form submission endpoint
//!
//! Same insert as `POST /users`, answered with an HTML confirmation page
//! instead of plain text.

use axum::{
    extract::{rejection::FormRejection, State},
    response::Html,
    routing::post,
    Form, Router,
};

use crate::http::error::ApiError;
use crate::http::extractors::UserFields;
use crate::http::server::AppState;
use crate::models::NewUser;

/// POST /submit
async fn submit(
    State(state): State<AppState>,
    form: Result<Form<UserFields>, FormRejection>,
) -> Result<Html<String>, ApiError> {
    let Form(fields) = form.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let user = NewUser::from_parts(fields.name, fields.email)?;
    let name = user.name().to_owned();

    let id = state
        .store
        .create(user)
        .await
        .map_err(ApiError::storage("Error saving data to the database."))?;

    tracing::info!(user_id = id, "Form submission saved");
    Ok(Html(confirmation_page(&name)))
}

fn confirmation_page(name: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Thank you</title>
</head>
<body>
  <h1>Thank you, {name}!</h1>
  <p>Your details have been saved.</p>
  <p><a href="/">Submit another</a></p>
</body>
</html>
"#,
        name = escape_html(name)
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

pub fn router() -> Router<AppState> {
    Router::new().route("/submit", post(submit))
}
