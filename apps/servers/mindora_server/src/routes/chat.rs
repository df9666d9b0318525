use crate::handlers::chat as routes;
use crate::routes::cors;
use crate::AppState;
use axum::routing::{get, post};
use axum::{extract::FromRef, http::Method, Router};

pub fn chat_routes<S>() -> Router<S>
where
	S: Clone + Send + Sync + 'static,
	AppState: FromRef<S>,
{
	Router::new()
		.route("/chat/save", post(routes::save_chat))
		.route("/chat/history/:user_id", get(routes::chat_history))
		.route("/alert/email", post(routes::alert_email))
		.layer(cors([Method::GET, Method::POST]))
}
