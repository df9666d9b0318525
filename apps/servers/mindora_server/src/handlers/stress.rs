use crate::handlers::user_day;
use crate::models::stress::{self, DailyStress, NewStressRecord, StressRecord};
use crate::{AppState, MindoraError};
use axum::{
	extract::{Path, State},
	http::StatusCode,
	Json,
};
use chrono::Days;
use garde::Validate;
use serde::Deserialize;
use tracing::instrument;

#[derive(Debug, Deserialize, Validate)]
pub struct TrackStressRequest {
	#[garde(range(min = 1))]
	pub user_id: i64,

	#[garde(range(min = 0, max = 10))]
	pub stress_level: i64,

	#[garde(length(max = 200))]
	pub cause: Option<String>,

	#[garde(length(max = 500))]
	pub logged_symptoms: Option<String>,

	#[garde(length(max = 2000))]
	#[serde(alias = "Notes")]
	pub notes: Option<String>,

	#[garde(length(min = 1))]
	pub date: String,
}

#[axum::debug_handler]
#[instrument(name = "track_stress", skip(state, request), fields(user_id = request.user_id))]
pub async fn track_stress(State(state): State<AppState>, Json(request): Json<TrackStressRequest>) -> Result<(StatusCode, Json<StressRecord>), MindoraError> {
	request.validate()?;
	let date = user_day(&state.core.clock, &request.date)?;

	let record = stress::insert(
		&state.core.db,
		&NewStressRecord {
			user_id: request.user_id,
			stress_level: request.stress_level,
			cause: request.cause,
			logged_symptoms: request.logged_symptoms,
			notes: request.notes,
			date,
		},
	)
	.await?;

	Ok((StatusCode::CREATED, Json(record)))
}

#[axum::debug_handler]
#[instrument(name = "latest_stress", skip(state))]
pub async fn latest_stress(State(state): State<AppState>, Path(user_id): Path<i64>) -> Result<Json<StressRecord>, MindoraError> {
	let record = stress::latest(&state.core.db, user_id).await?;
	record.map(Json).ok_or(MindoraError::NotFound("No stress data found"))
}

#[axum::debug_handler]
#[instrument(name = "stress_on_date", skip(state))]
pub async fn stress_on_date(State(state): State<AppState>, Path((user_id, date)): Path<(i64, String)>) -> Result<Json<StressRecord>, MindoraError> {
	let date = user_day(&state.core.clock, &date)?;
	let record = stress::latest_on(&state.core.db, user_id, date).await?;
	record.map(Json).ok_or(MindoraError::NoData("No stress data found for this date"))
}

/// One summary per logged day over the last seven local days, newest first.
#[axum::debug_handler]
#[instrument(name = "weekly_stress", skip(state))]
pub async fn weekly_stress(State(state): State<AppState>, Path(user_id): Path<i64>) -> Result<Json<Vec<DailyStress>>, MindoraError> {
	let today = state.core.clock.today();
	let from = today.checked_sub_days(Days::new(6)).unwrap_or(today);

	let records = stress::between(&state.core.db, user_id, from, today).await?;
	Ok(Json(stress::summarize_days(&records)))
}
