use crate::handlers::sleep as routes;
use crate::routes::cors;
use crate::AppState;
use axum::routing::{get, post};
use axum::{extract::FromRef, http::Method, Router};

pub fn sleep_routes<S>() -> Router<S>
where
	S: Clone + Send + Sync + 'static,
	AppState: FromRef<S>,
{
	Router::new()
		.route("/sleepinput", post(routes::log_sleep))
		.route("/sleep/data/:user_id", get(routes::latest_sleep))
		.layer(cors([Method::GET, Method::POST]))
}
