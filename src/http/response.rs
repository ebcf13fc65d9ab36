//! Response construction from resolved route outcomes.
//!
//! # Design Decisions
//! - Redirects are always 302 Found with the location passed through
//!   verbatim; no encoding or normalization of the captured remainder
//! - A render failure (unknown view, should have been caught by validation)
//!   is a 500, never a silent fallback page

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::routing::RouteOutcome;
use crate::views::ViewEngine;

/// Convert a resolved route outcome into an HTTP response.
pub fn outcome_response(outcome: RouteOutcome, views: &dyn ViewEngine) -> Response {
    match outcome {
        RouteOutcome::Render { view } => match views.render(&view) {
            Ok(body) => (
                [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                body,
            )
                .into_response(),
            Err(e) => {
                tracing::error!(view = %view, error = %e, "View render failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "View render failed").into_response()
            }
        },
        RouteOutcome::Redirect { location } => redirect_found(&location),
        RouteOutcome::Fixed { status, body } => (status, body).into_response(),
    }
}

/// 302 Found. Axum's `Redirect` helpers use 303/307/308, so the header is
/// built by hand.
fn redirect_found(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => (StatusCode::FOUND, [(header::LOCATION, value)]).into_response(),
        // Location came from the request path; control characters in it
        // cannot be expressed as a header.
        Err(_) => (StatusCode::BAD_REQUEST, "Invalid redirect target").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewsConfig;
    use crate::views::StaticViewEngine;

    fn engine() -> StaticViewEngine {
        StaticViewEngine::from_config(&ViewsConfig::default()).unwrap()
    }

    #[test]
    fn render_outcome_is_html_200() {
        let response = outcome_response(
            RouteOutcome::Render {
                view: "welcome".to_string(),
            },
            &engine(),
        );
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
    }

    #[test]
    fn unknown_view_is_a_500() {
        let response = outcome_response(
            RouteOutcome::Render {
                view: "missing".to_string(),
            },
            &engine(),
        );
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn redirect_outcome_is_302_with_verbatim_location() {
        let response = outcome_response(
            RouteOutcome::Redirect {
                location: "/a%2Fb".to_string(),
            },
            &engine(),
        );
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/a%2Fb");
    }

    #[test]
    fn fixed_outcome_keeps_status_and_body() {
        let response = outcome_response(
            RouteOutcome::Fixed {
                status: StatusCode::OK,
                body: "OK".to_string(),
            },
            &engine(),
        );
        assert_eq!(response.status(), StatusCode::OK);
    }
}
