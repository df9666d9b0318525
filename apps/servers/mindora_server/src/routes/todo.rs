use crate::handlers::todo as routes;
use crate::routes::cors;
use crate::AppState;
use axum::routing::{get, post};
use axum::{extract::FromRef, http::Method, Router};

pub fn todo_routes<S>() -> Router<S>
where
	S: Clone + Send + Sync + 'static,
	AppState: FromRef<S>,
{
	Router::new()
		.route("/todo/get-tasks", get(routes::get_tasks))
		.route("/todo/add-task", post(routes::add_task))
		.route("/todo/update-task", post(routes::update_task))
		.route("/todo/delete-task", post(routes::delete_task))
		.route("/todo/complete-task", post(routes::complete_task))
		.route("/todo/wellness", get(routes::wellness))
		.layer(cors([Method::GET, Method::POST]))
}
