use crate::handlers::profile as routes;
use crate::routes::cors;
use crate::AppState;
use axum::routing::{get, post};
use axum::{extract::FromRef, http::Method, Router};

pub fn profile_routes<S>() -> Router<S>
where
	S: Clone + Send + Sync + 'static,
	AppState: FromRef<S>,
{
	Router::new()
		.route("/profile/get-info", get(routes::get_info))
		.route("/profile/update-info", post(routes::update_info))
		.route("/profile/update-profile-image", post(routes::update_profile_image))
		.route("/profile/get-mood", get(routes::get_mood))
		.layer(cors([Method::GET, Method::POST]))
}
