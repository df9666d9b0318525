use crate::handlers::mood as routes;
use crate::routes::cors;
use crate::AppState;
use axum::routing::{get, post};
use axum::{extract::FromRef, http::Method, Router};

pub fn mood_routes<S>() -> Router<S>
where
	S: Clone + Send + Sync + 'static,
	AppState: FromRef<S>,
{
	Router::new()
		.route("/mood/track", post(routes::track_mood))
		.route("/mood/data/:user_id", get(routes::latest_mood))
		.route("/mood/data/:user_id/:date", get(routes::mood_on_date))
		// Also runs the emergency-alert analysis
		.route("/mood/weekly/:user_id", get(routes::weekly_mood))
		.route("/mood/monthly/:user_id/:year/:month", get(routes::monthly_mood))
		.layer(cors([Method::GET, Method::POST]))
}
