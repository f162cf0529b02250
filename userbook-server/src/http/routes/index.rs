//! Static signup form served at `/`

use axum::{response::Html, routing::get, Router};

static INDEX_HTML: &str = include_str!("../../../static/index.html");

/// GET /
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_posts_to_submit() {
        assert!(INDEX_HTML.contains(r#"action="/submit""#));
        assert!(INDEX_HTML.contains(r#"name="name""#));
        assert!(INDEX_HTML.contains(r#"name="email""#));
    }
}
