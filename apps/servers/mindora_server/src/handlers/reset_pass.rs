use crate::handlers::MessageResponse;
use crate::mail::MailMessage;
use crate::models::users::{self, User};
use crate::passwords::hash_password;
use crate::{AppState, MindoraError};
use axum::{
	extract::{Query, State},
	Json,
};
use garde::Validate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

#[derive(Debug, Deserialize, Validate)]
pub struct EmailQuery {
	#[garde(length(min = 1))]
	pub email: String,
}

#[derive(Debug, Serialize)]
pub struct CheckUserResponse {
	pub message: &'static str,
	pub user: User,
}

#[derive(Debug, Serialize)]
pub struct OtpResponse {
	pub message: &'static str,
	pub otp: u32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
	#[garde(length(min = 1))]
	pub email: String,

	#[garde(length(min = 6, max = 128))]
	pub password: String,
}

#[axum::debug_handler]
#[instrument(name = "check_user", skip(state, query), fields(email = %query.email))]
pub async fn check_user(State(state): State<AppState>, Query(query): Query<EmailQuery>) -> Result<Json<CheckUserResponse>, MindoraError> {
	query.validate()?;

	let user = users::find_by_email(&state.core.db, &query.email).await?.ok_or(MindoraError::NotFound("User not found"))?;

	Ok(Json(CheckUserResponse { message: "User exists", user }))
}

/// Mails a five-digit code. The code is also returned because the client
/// compares it locally.
#[axum::debug_handler]
#[instrument(name = "send_otp", skip(state, query), fields(email = %query.email))]
pub async fn send_otp(State(state): State<AppState>, Query(query): Query<EmailQuery>) -> Result<Json<OtpResponse>, MindoraError> {
	query.validate()?;

	if users::find_by_email(&state.core.db, &query.email).await?.is_none() {
		return Err(MindoraError::NotFound("User not found"));
	}

	let otp: u32 = rand::thread_rng().gen_range(10_000..=99_999);
	let message = MailMessage::text(query.email.as_str(), "Your OTP Code", format!("Your OTP code is {otp}"));

	if let Err(e) = state.external.mailer.send(message).await {
		tracing::error!(error = %e, "failed to send OTP");
		return Err(e.into());
	}

	Ok(Json(OtpResponse {
		message: "OTP sent successfully",
		otp,
	}))
}

#[axum::debug_handler]
#[instrument(name = "change_password", skip(state, request), fields(email = %request.email))]
pub async fn change_password(State(state): State<AppState>, Json(request): Json<ChangePasswordRequest>) -> Result<Json<MessageResponse>, MindoraError> {
	request.validate()?;

	let hash = hash_password(&request.password)?;
	if !users::update_password(&state.core.db, &request.email, &hash).await? {
		return Err(MindoraError::NotFound("User not found"));
	}

	Ok(Json(MessageResponse::new("Password changed successfully")))
}
