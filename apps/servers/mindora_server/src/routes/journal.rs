use crate::handlers::journal as routes;
use crate::routes::cors;
use crate::AppState;
use axum::routing::post;
use axum::{extract::FromRef, http::Method, Router};

pub fn journal_routes<S>() -> Router<S>
where
	S: Clone + Send + Sync + 'static,
	AppState: FromRef<S>,
{
	Router::new()
		.route("/journal", post(routes::save_journal).get(routes::list_journals))
		.route("/journal/update", post(routes::update_journal))
		.route("/journal/delete", post(routes::delete_journal))
		.layer(cors([Method::GET, Method::POST]))
}
