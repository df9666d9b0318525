use crate::{AppState, MindoraError};
use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;
use tracing::instrument;

#[derive(Serialize)]
pub struct HealthResponse {
	status: &'static str,
	version: &'static str,
}

#[axum::debug_handler]
#[instrument(name = "health", skip(state))]
pub async fn health(State(state): State<AppState>) -> Result<(StatusCode, Json<HealthResponse>), MindoraError> {
	sqlx::query("SELECT 1").execute(&state.core.db).await?;

	let response = HealthResponse {
		status: "ok",
		version: env!("CARGO_PKG_VERSION"),
	};

	Ok((StatusCode::OK, Json(response)))
}
