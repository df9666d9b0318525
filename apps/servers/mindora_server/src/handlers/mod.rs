use crate::error::MindoraError;
use crate::local_day::UserClock;
use chrono::NaiveDate;
use serde::Serialize;

pub mod appointment;
pub mod auth;
pub mod chat;
pub mod forum;
pub mod health;
pub mod journal;
pub mod mood;
pub mod profile;
pub mod reset_pass;
pub mod sleep;
pub mod stress;
pub mod todo;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
	pub message: &'static str,
}

impl MessageResponse {
	pub const fn new(message: &'static str) -> Self {
		Self { message }
	}
}

/// Resolves a client-supplied date to the user's calendar day.
pub(crate) fn user_day(clock: &UserClock, raw: &str) -> Result<NaiveDate, MindoraError> {
	clock.local_day(raw).ok_or_else(|| MindoraError::bad_request(format!("invalid date `{raw}`")))
}
