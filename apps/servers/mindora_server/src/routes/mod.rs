use crate::AppState;
use axum::http::{header::CONTENT_TYPE, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

pub mod appointment;
pub mod auth;
pub mod chat;
pub mod forum;
pub mod health;
pub mod journal;
pub mod mood;
pub mod profile;
pub mod sleep;
pub mod stress;
pub mod todo;

/// The mobile client calls from arbitrary origins and sends no cookies.
pub(crate) fn cors(methods: impl Into<tower_http::cors::AllowMethods>) -> CorsLayer {
	CorsLayer::new().allow_origin(Any).allow_methods(methods).allow_headers([CONTENT_TYPE])
}

/// Every API route, bound to `state`.
pub fn app_router(state: AppState) -> Router {
	Router::new()
		.merge(health::get_health())
		.merge(mood::mood_routes())
		.merge(stress::stress_routes())
		.merge(sleep::sleep_routes())
		.merge(auth::auth_routes())
		.merge(auth::reset_pass_routes())
		.merge(profile::profile_routes())
		.merge(journal::journal_routes())
		.merge(forum::forum_routes())
		.merge(todo::todo_routes())
		.merge(appointment::appointment_routes())
		.merge(chat::chat_routes())
		.with_state(state)
}

#[cfg(test)]
mod tests {
	use super::*;
	use axum::body::Body;
	use axum::http::{Request, StatusCode};
	use tower::ServiceExt;

	#[tokio::test]
	async fn test_preflight_allows_any_origin() {
		let app = Router::new().route("/ping", axum::routing::post(|| async { "pong" })).layer(cors([Method::POST]));

		let response = app
			.oneshot(
				Request::builder()
					.method(Method::OPTIONS)
					.uri("/ping")
					.header("origin", "http://10.0.2.2:8081")
					.header("access-control-request-method", "POST")
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();

		assert_eq!(response.status(), StatusCode::OK);
		assert_eq!(response.headers()["access-control-allow-origin"], "*");
	}
}
