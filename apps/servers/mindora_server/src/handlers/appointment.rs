use crate::models::appointments::{self, Appointment, ConfirmedAppointment, NewAppointment, Therapist};
use crate::{AppState, MindoraError};
use axum::{extract::State, http::StatusCode, Json};
use garde::Validate;
use serde::{Deserialize, Serialize};
use tracing::instrument;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
	#[garde(range(min = 1))]
	pub doc_id: i64,

	#[garde(range(min = 1))]
	pub user_id: i64,

	#[garde(length(min = 1, max = 100))]
	pub name: String,

	#[garde(length(min = 1, max = 200))]
	pub institution: String,

	#[garde(length(min = 1))]
	pub date: String,

	#[garde(length(min = 1))]
	pub time: String,

	#[garde(length(min = 1, max = 1000))]
	pub reason: String,

	#[garde(skip)]
	pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
	pub message: &'static str,
	pub appointment: Appointment,
}

#[axum::debug_handler]
#[instrument(name = "book_appointment", skip(state, request), fields(doc_id = request.doc_id, user_id = request.user_id))]
pub async fn book(State(state): State<AppState>, Json(request): Json<BookingRequest>) -> Result<(StatusCode, Json<BookingResponse>), MindoraError> {
	request.validate()?;

	let appointment = appointments::book(
		&state.core.db,
		&NewAppointment {
			doc_id: request.doc_id,
			user_id: request.user_id,
			name: request.name,
			institution: request.institution,
			date: request.date,
			time: request.time,
			reason: request.reason,
			email: request.email.filter(|e| !e.trim().is_empty()),
		},
	)
	.await?;

	Ok((
		StatusCode::CREATED,
		Json(BookingResponse {
			message: "Appointment booked successfully",
			appointment,
		}),
	))
}

#[axum::debug_handler]
#[instrument(name = "therapists", skip(state))]
pub async fn therapists(State(state): State<AppState>) -> Result<Json<Vec<Therapist>>, MindoraError> {
	let therapists = appointments::therapists(&state.core.db).await?;
	if therapists.is_empty() {
		return Err(MindoraError::NotFound("No therapists found"));
	}

	Ok(Json(therapists))
}

#[axum::debug_handler]
#[instrument(name = "confirmed_appointments", skip(state))]
pub async fn confirmed(State(state): State<AppState>) -> Result<Json<Vec<ConfirmedAppointment>>, MindoraError> {
	Ok(Json(appointments::confirmed(&state.core.db).await?))
}
