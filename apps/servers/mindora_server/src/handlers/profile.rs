use crate::models::profiles::{self, DoctorUpdate, PatientUpdate, Profile};
use crate::models::users::{self, User, UserKind};
use crate::{AppState, MindoraError};
use axum::{
	extract::{Query, State},
	Json,
};
use garde::Validate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::instrument;

#[derive(Debug, Deserialize, Validate)]
pub struct ProfileQuery {
	#[garde(range(min = 1))]
	pub user_id: i64,

	#[garde(length(min = 1))]
	pub user_type: String,
}

/// `user_id` and `user_type` select the profile; every other key is an update.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateInfoRequest {
	#[garde(range(min = 1))]
	pub user_id: i64,

	#[garde(length(min = 1))]
	pub user_type: String,

	#[garde(skip)]
	#[serde(flatten)]
	pub fields: Map<String, Value>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ProfileImageRequest {
	#[garde(range(min = 1))]
	pub user_id: i64,

	#[garde(length(min = 1))]
	pub user_type: String,

	#[garde(length(min = 1))]
	#[serde(rename = "profileImage")]
	pub profile_image: String,
}

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
	pub user_id: i64,
}

#[derive(Debug, Serialize)]
pub struct TodayMood {
	pub mood_status: String,
	pub current_streak: i64,
}

fn user_kind(raw: &str) -> Result<UserKind, MindoraError> {
	raw.parse::<UserKind>().map_err(MindoraError::bad_request)
}

fn update_fields<T: DeserializeOwned>(fields: Map<String, Value>) -> Result<T, MindoraError> {
	serde_json::from_value(Value::Object(fields)).map_err(|e| MindoraError::bad_request(format!("invalid profile fields: {e}")))
}

#[axum::debug_handler]
#[instrument(name = "get_profile", skip(state))]
pub async fn get_info(State(state): State<AppState>, Query(query): Query<ProfileQuery>) -> Result<Json<Profile>, MindoraError> {
	query.validate()?;

	let profile = match user_kind(&query.user_type)? {
		UserKind::Patient => profiles::patient_profile(&state.core.db, query.user_id).await?.map(Profile::Patient),
		UserKind::Doctor => profiles::doctor_profile(&state.core.db, query.user_id).await?.map(Profile::Doctor),
	};

	profile.map(Json).ok_or(MindoraError::NotFound("Profile not found"))
}

#[axum::debug_handler]
#[instrument(name = "update_profile", skip(state, request), fields(user_id = request.user_id))]
pub async fn update_info(State(state): State<AppState>, Json(request): Json<UpdateInfoRequest>) -> Result<Json<Profile>, MindoraError> {
	request.validate()?;

	let profile = match user_kind(&request.user_type)? {
		UserKind::Patient => {
			let update: PatientUpdate = update_fields(request.fields)?;
			profiles::update_patient(&state.core.db, request.user_id, &update).await?.map(Profile::Patient)
		}
		UserKind::Doctor => {
			let update: DoctorUpdate = update_fields(request.fields)?;
			profiles::update_doctor(&state.core.db, request.user_id, &update).await?.map(Profile::Doctor)
		}
	};

	profile.map(Json).ok_or(MindoraError::NotFound("Profile not found"))
}

#[axum::debug_handler]
#[instrument(name = "update_profile_image", skip(state, request), fields(user_id = request.user_id))]
pub async fn update_profile_image(State(state): State<AppState>, Json(request): Json<ProfileImageRequest>) -> Result<Json<User>, MindoraError> {
	request.validate()?;
	user_kind(&request.user_type)?;

	let user = users::update_profile_image(&state.core.db, request.user_id, &request.profile_image).await?;
	user.map(Json).ok_or(MindoraError::NotFound("Profile not found"))
}

/// Today's mood plus the current logging streak.
#[axum::debug_handler]
#[instrument(name = "get_today_mood", skip(state))]
pub async fn get_mood(State(state): State<AppState>, Query(query): Query<UserIdQuery>) -> Result<Json<TodayMood>, MindoraError> {
	let today = state.core.clock.today();
	let record = state.core.moods.latest_on(query.user_id, today).await?.ok_or(MindoraError::NotFound("Mood data not found"))?;
	let current_streak = state.core.moods.current_streak(query.user_id).await?;

	Ok(Json(TodayMood {
		mood_status: record.entry.mood_status,
		current_streak,
	}))
}
