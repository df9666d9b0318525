use crate::handlers::forum as routes;
use crate::routes::cors;
use crate::AppState;
use axum::routing::{get, post};
use axum::{extract::FromRef, http::Method, Router};

pub fn forum_routes<S>() -> Router<S>
where
	S: Clone + Send + Sync + 'static,
	AppState: FromRef<S>,
{
	Router::new()
		.route("/forum/post-content", post(routes::post_content))
		.route("/forum/get-posts", get(routes::get_posts))
		.route("/forum/get-all-posts", get(routes::get_all_posts))
		.route("/forum/update-post", post(routes::update_post))
		.route("/forum/delete-post", post(routes::delete_post))
		.layer(cors([Method::GET, Method::POST]))
}
