use crate::handlers::stress as routes;
use crate::routes::cors;
use crate::AppState;
use axum::routing::{get, post};
use axum::{extract::FromRef, http::Method, Router};

pub fn stress_routes<S>() -> Router<S>
where
	S: Clone + Send + Sync + 'static,
	AppState: FromRef<S>,
{
	Router::new()
		.route("/stress/track", post(routes::track_stress))
		.route("/stress/data/:user_id", get(routes::latest_stress))
		.route("/stress/data/:user_id/:date", get(routes::stress_on_date))
		.route("/stress/weekly/:user_id", get(routes::weekly_stress))
		.layer(cors([Method::GET, Method::POST]))
}
