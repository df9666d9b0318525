use crate::models::users::{self, CreatedUser, NewUser, User, UserKind, UserSummary};
use crate::passwords::{hash_password, verify_password};
use crate::{AppState, MindoraError};
use axum::{
	extract::{Path, State},
	http::StatusCode,
	Json,
};
use garde::Validate;
use serde::{Deserialize, Serialize};
use tracing::instrument;

const DUPLICATE_EMAIL: &str = "User already exists with this email";

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
	#[garde(email)]
	pub email: String,

	#[garde(length(min = 6, max = 128))]
	pub password: String,

	#[garde(length(min = 1, max = 100))]
	pub name: String,

	#[garde(length(max = 50))]
	pub bdn: Option<String>,

	#[garde(skip)]
	pub is_patient: bool,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
	pub message: &'static str,
	pub user: CreatedUser,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
	#[garde(length(min = 1))]
	pub email: String,

	#[garde(length(min = 1))]
	pub password: String,
}

#[axum::debug_handler]
#[instrument(name = "signup", skip(state, request), fields(email = %request.email))]
pub async fn signup(State(state): State<AppState>, Json(request): Json<SignupRequest>) -> Result<(StatusCode, Json<SignupResponse>), MindoraError> {
	request.validate()?;

	if users::find_by_email(&state.core.db, &request.email).await?.is_some() {
		return Err(MindoraError::bad_request(DUPLICATE_EMAIL));
	}

	let kind = if request.is_patient { UserKind::Patient } else { UserKind::Doctor };
	let new_user = NewUser {
		password_hash: hash_password(&request.password)?,
		email: request.email,
		name: request.name,
		kind,
		bdn: request.bdn,
	};

	let user = match users::create(&state.core.db, &new_user).await {
		Ok(user) => user,
		Err(sqlx::Error::Database(e)) if e.is_unique_violation() => return Err(MindoraError::bad_request(DUPLICATE_EMAIL)),
		Err(e) => return Err(e.into()),
	};

	tracing::info!(id = user.id, %kind, "user created");
	Ok((
		StatusCode::CREATED,
		Json(SignupResponse {
			message: "User created successfully",
			user,
		}),
	))
}

#[axum::debug_handler]
#[instrument(name = "login", skip(state, request), fields(email = %request.email))]
pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> Result<Json<User>, MindoraError> {
	request.validate()?;

	let user = users::find_by_email(&state.core.db, &request.email).await?.ok_or(MindoraError::NotFound("User not found"))?;

	if !verify_password(&request.password, &user.password_hash) {
		return Err(MindoraError::Unauthorized("Invalid password"));
	}

	Ok(Json(user))
}

#[axum::debug_handler]
#[instrument(name = "get_user", skip(state))]
pub async fn get_user(State(state): State<AppState>, Path(user_id): Path<i64>) -> Result<Json<UserSummary>, MindoraError> {
	let user = users::find_summary(&state.core.db, user_id).await?;
	user.map(Json).ok_or(MindoraError::NotFound("User not found"))
}
