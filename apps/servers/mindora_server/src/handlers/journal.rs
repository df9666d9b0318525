use crate::handlers::user_day;
use crate::models::journal::{self, Journal, NewJournal};
use crate::{AppState, MindoraError};
use axum::{
	extract::{Query, State},
	http::StatusCode,
	Json,
};
use garde::Validate;
use serde::{Deserialize, Serialize};
use tracing::instrument;

#[derive(Debug, Deserialize, Validate)]
pub struct SaveJournalRequest {
	#[garde(range(min = 1))]
	pub user_id: i64,

	#[garde(length(min = 1, max = 200))]
	pub title: String,

	#[garde(length(min = 1))]
	pub information: String,

	#[garde(length(min = 1))]
	pub date: String,

	#[garde(length(min = 1, max = 20))]
	pub time: String,

	#[garde(length(max = 50))]
	pub mood: Option<String>,

	#[garde(length(max = 20))]
	pub mood_color: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateJournalRequest {
	#[garde(range(min = 1))]
	pub id: i64,

	#[garde(length(min = 1, max = 200))]
	pub title: String,

	#[garde(length(min = 1))]
	pub description: String,

	#[garde(length(min = 1, max = 50))]
	pub mood: String,

	#[garde(length(max = 20))]
	pub mood_color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteJournalRequest {
	pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct JournalQuery {
	pub user_id: i64,
}

#[derive(Debug, Serialize)]
pub struct SavedJournal {
	pub message: &'static str,
	pub journal: Journal,
}

#[derive(Debug, Serialize)]
pub struct JournalList {
	pub journals: Vec<Journal>,
}

#[derive(Debug, Serialize)]
pub struct JournalUpdate {
	pub success: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub journal: Option<Journal>,
}

#[axum::debug_handler]
#[instrument(name = "save_journal", skip(state, request), fields(user_id = request.user_id))]
pub async fn save_journal(State(state): State<AppState>, Json(request): Json<SaveJournalRequest>) -> Result<(StatusCode, Json<SavedJournal>), MindoraError> {
	request.validate()?;
	let date = user_day(&state.core.clock, &request.date)?;

	let journal = journal::insert(
		&state.core.db,
		&NewJournal {
			user_id: request.user_id,
			title: request.title,
			information: request.information,
			date,
			time: request.time,
			mood: request.mood.filter(|m| !m.trim().is_empty()),
			mood_color: request.mood_color.filter(|c| !c.trim().is_empty()),
		},
	)
	.await?;

	Ok((
		StatusCode::CREATED,
		Json(SavedJournal {
			message: "Journal saved successfully",
			journal,
		}),
	))
}

#[axum::debug_handler]
#[instrument(name = "list_journals", skip(state))]
pub async fn list_journals(State(state): State<AppState>, Query(query): Query<JournalQuery>) -> Result<Json<JournalList>, MindoraError> {
	let journals = journal::for_user(&state.core.db, query.user_id).await?;
	Ok(Json(JournalList { journals }))
}

#[axum::debug_handler]
#[instrument(name = "update_journal", skip(state, request), fields(id = request.id))]
pub async fn update_journal(State(state): State<AppState>, Json(request): Json<UpdateJournalRequest>) -> Result<Json<JournalUpdate>, MindoraError> {
	request.validate()?;

	let mood_color = request.mood_color.as_deref().filter(|c| !c.trim().is_empty());
	let journal = journal::update(&state.core.db, request.id, &request.title, &request.description, &request.mood, mood_color)
		.await?
		.ok_or(MindoraError::NotFound("Journal not found"))?;

	Ok(Json(JournalUpdate {
		success: true,
		journal: Some(journal),
	}))
}

#[axum::debug_handler]
#[instrument(name = "delete_journal", skip(state))]
pub async fn delete_journal(State(state): State<AppState>, Json(request): Json<DeleteJournalRequest>) -> Result<Json<JournalUpdate>, MindoraError> {
	if !journal::delete(&state.core.db, request.id).await? {
		return Err(MindoraError::NotFound("Journal not found"));
	}

	Ok(Json(JournalUpdate { success: true, journal: None }))
}
