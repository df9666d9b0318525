use crate::handlers::MessageResponse;
use crate::mail::MailMessage;
use crate::models::chat::{self, ChatConversation};
use crate::models::users;
use crate::{AppState, MindoraError};
use axum::{
	extract::{Path, State},
	http::StatusCode,
	Json,
};
use garde::Validate;
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveChatRequest {
	#[garde(range(min = 1))]
	pub user_id: i64,

	#[garde(skip)]
	pub conversation: Value,

	#[garde(length(min = 1))]
	pub date: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AlertEmailRequest {
	#[garde(range(min = 1))]
	pub user_id: i64,

	#[garde(length(min = 1, max = 5000))]
	pub message: String,
}

#[axum::debug_handler]
#[instrument(name = "save_chat", skip(state, request), fields(user_id = request.user_id))]
pub async fn save_chat(State(state): State<AppState>, Json(request): Json<SaveChatRequest>) -> Result<(StatusCode, Json<ChatConversation>), MindoraError> {
	request.validate()?;

	let saved = chat::save(&state.core.db, request.user_id, &request.conversation, &request.date).await?;
	Ok((StatusCode::CREATED, Json(saved)))
}

#[axum::debug_handler]
#[instrument(name = "chat_history", skip(state))]
pub async fn chat_history(State(state): State<AppState>, Path(user_id): Path<i64>) -> Result<Json<Vec<ChatConversation>>, MindoraError> {
	Ok(Json(chat::history(&state.core.db, user_id).await?))
}

/// Forwards a chatbot-raised message to the user's emergency contact.
#[axum::debug_handler]
#[instrument(name = "alert_email", skip(state, request), fields(user_id = request.user_id))]
pub async fn alert_email(State(state): State<AppState>, Json(request): Json<AlertEmailRequest>) -> Result<Json<MessageResponse>, MindoraError> {
	request.validate()?;

	let contact = users::find_emergency_contact(&state.core.db, request.user_id)
		.await?
		.ok_or_else(|| MindoraError::bad_request("Emergency email not found for the user."))?;

	state
		.external
		.mailer
		.send(MailMessage::text(contact.emergency_email, "Emergency Alert from Chatbot", request.message))
		.await?;

	tracing::info!("emergency email sent");
	Ok(Json(MessageResponse::new("Emergency email sent successfully.")))
}
