use crate::handlers::appointment as routes;
use crate::routes::cors;
use crate::AppState;
use axum::routing::{get, post};
use axum::{extract::FromRef, http::Method, Router};

pub fn appointment_routes<S>() -> Router<S>
where
	S: Clone + Send + Sync + 'static,
	AppState: FromRef<S>,
{
	Router::new()
		.route("/appointment/booked", post(routes::book))
		.route("/appointment/therapists", get(routes::therapists))
		.route("/appointment/confirmed-appointments", get(routes::confirmed))
		.layer(cors([Method::GET, Method::POST]))
}
