//! Validated query extractor for Axum
//!
//! `ValidatedQuery<T>` works like `axum::extract::Query<T>`, but
//! additionally runs `validator::Validate::validate()` on the
//! deserialized value. A list handler that takes
//! `ValidatedQuery<PaginationQuery>` therefore receives parameters that
//! already satisfy the engine's invariants (`page >= 1`,
//! `1 <= limit <= 100`, well-formed sort expression); the engine does not
//! re-validate.

use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;
use validator::Validate;

/// An extractor that deserializes the query string and validates it.
///
/// # Usage
///
/// ```ignore
/// use pagekit::{PaginationQuery, ValidatedQuery};
///
/// async fn list_orders(ValidatedQuery(query): ValidatedQuery<PaginationQuery>) {
///     // `query` is guaranteed to pass validation
/// }
/// ```
pub struct ValidatedQuery<T>(pub T);

/// Error type for `ValidatedQuery` extraction failures.
#[derive(Debug, Error)]
pub enum ValidatedQueryRejection {
    /// Query-string parsing failed.
    #[error("Invalid query string: {0}")]
    ParseError(#[from] QueryRejection),
    /// Validation failed.
    #[error("Validation failed")]
    ValidationError(#[from] validator::ValidationErrors),
}

impl IntoResponse for ValidatedQueryRejection {
    fn into_response(self) -> Response {
        match self {
            Self::ParseError(rejection) => {
                let body = json!({
                    "success": false,
                    "error": format!("Invalid query string: {}", rejection),
                });
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            Self::ValidationError(errors) => {
                let field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errs)| {
                        errs.iter().map(move |e| {
                            let msg = e
                                .message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| format!("{:?}", e.code));
                            format!("{}: {}", field, msg)
                        })
                    })
                    .collect();

                let message = if field_errors.is_empty() {
                    "Validation failed".to_string()
                } else {
                    field_errors.join("; ")
                };

                let body = json!({ "success": false, "error": message });
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
        }
    }
}

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedQueryRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;

        value.validate()?;

        Ok(ValidatedQuery(value))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::PaginationQuery;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use axum::Router;

    async fn handler(ValidatedQuery(query): ValidatedQuery<PaginationQuery>) -> String {
        format!(
            "{}|{}|{}",
            query.page,
            query.limit,
            query.sort.as_deref().unwrap_or("-")
        )
    }

    fn app() -> Router {
        Router::new().route("/items", get(handler))
    }

    async fn send(uri: &str) -> axum::http::Response<Body> {
        use tower::Service;
        let mut svc = app().into_service();
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        svc.call(req).await.unwrap()
    }

    async fn body_text(resp: axum::http::Response<Body>) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn missing_params_take_defaults() {
        let resp = send("/items").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_text(resp).await, "1|20|-");
    }

    #[tokio::test]
    async fn valid_query_passes_through() {
        let resp = send("/items?page=3&limit=50&sort=email:asc").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_text(resp).await, "3|50|email:asc");
    }

    #[tokio::test]
    async fn zero_page_returns_422() {
        let resp = send("/items?page=0").await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn oversized_limit_returns_422() {
        let resp = send("/items?limit=500").await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn malformed_sort_returns_422() {
        let resp = send("/items?sort=email").await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let resp = send("/items?sort=email:upwards").await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn non_numeric_page_returns_400() {
        let resp = send("/items?page=abc").await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
