use crate::handlers::{user_day, MessageResponse};
use crate::models::sleep::{self, SleepRecord};
use crate::{AppState, MindoraError};
use axum::{
	extract::{Path, State},
	http::StatusCode,
	Json,
};
use garde::Validate;
use serde::Deserialize;
use tracing::instrument;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SleepInputRequest {
	#[garde(range(min = 1))]
	pub user_id: i64,

	#[garde(range(min = 0.0, max = 24.0))]
	pub hours: f64,

	#[garde(length(min = 1))]
	pub date: String,
}

#[axum::debug_handler]
#[instrument(name = "log_sleep", skip(state, request), fields(user_id = request.user_id))]
pub async fn log_sleep(State(state): State<AppState>, Json(request): Json<SleepInputRequest>) -> Result<(StatusCode, Json<MessageResponse>), MindoraError> {
	request.validate()?;
	let date = user_day(&state.core.clock, &request.date)?;

	sleep::insert(&state.core.db, request.user_id, date, request.hours).await?;

	Ok((StatusCode::CREATED, Json(MessageResponse::new("Sleep hours logged successfully"))))
}

#[axum::debug_handler]
#[instrument(name = "latest_sleep", skip(state))]
pub async fn latest_sleep(State(state): State<AppState>, Path(user_id): Path<i64>) -> Result<Json<SleepRecord>, MindoraError> {
	let record = sleep::latest(&state.core.db, user_id).await?;
	record.map(Json).ok_or(MindoraError::NotFound("No sleep data found"))
}
