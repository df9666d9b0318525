use crate::handlers::health as routes;
use crate::routes::cors;
use crate::AppState;
use axum::routing::get;
use axum::{extract::FromRef, http::Method, Router};

pub fn get_health<S>() -> Router<S>
where
	S: Clone + Send + Sync + 'static,
	AppState: FromRef<S>,
{
	Router::new().route("/health", get(routes::health)).layer(cors([Method::GET]))
}
