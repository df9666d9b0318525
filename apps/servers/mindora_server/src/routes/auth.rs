use crate::handlers::{auth, reset_pass};
use crate::routes::cors;
use crate::AppState;
use axum::routing::{get, post};
use axum::{extract::FromRef, http::Method, Router};

pub fn auth_routes<S>() -> Router<S>
where
	S: Clone + Send + Sync + 'static,
	AppState: FromRef<S>,
{
	Router::new()
		.route("/signup", post(auth::signup))
		.route("/login", post(auth::login))
		.route("/user/:user_id", get(auth::get_user))
		.layer(cors([Method::GET, Method::POST]))
}

pub fn reset_pass_routes<S>() -> Router<S>
where
	S: Clone + Send + Sync + 'static,
	AppState: FromRef<S>,
{
	Router::new()
		.route("/reset-pass/check-user", get(reset_pass::check_user))
		.route("/reset-pass/send-otp", get(reset_pass::send_otp))
		.route("/reset-pass/change-pass", post(reset_pass::change_password))
		.layer(cors([Method::GET, Method::POST]))
}
