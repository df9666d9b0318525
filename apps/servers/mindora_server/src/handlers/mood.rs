use crate::alerts::dispatch_mood_alert;
use crate::handlers::user_day;
use crate::{AppState, MindoraError};
use axum::{
	extract::{Path, State},
	http::StatusCode,
	Json,
};
use chrono::Days;
use garde::Validate;
use mood_tracker::{week_of_month, MoodEntry, MoodRecord, NewMoodEntry};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::instrument;

/// Days before and after today covered by the weekly view.
const WEEKLY_LOOKBACK_DAYS: u64 = 10;
const WEEKLY_LOOKAHEAD_DAYS: u64 = 3;

#[derive(Debug, Deserialize, Validate)]
pub struct TrackMoodRequest {
	#[garde(range(min = 1))]
	pub user_id: i64,

	#[garde(length(min = 1, max = 50))]
	pub mood_status: String,

	#[garde(range(min = 0, max = 10))]
	pub mood_level: i64,

	#[garde(skip)]
	#[serde(default, deserialize_with = "reason_tags")]
	pub reason: Vec<String>,

	#[garde(length(min = 1))]
	pub date: String,
}

/// Anything other than an array of strings is an empty tag list.
fn reason_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Value::deserialize(deserializer)?;
	Ok(match value {
		Value::Array(items) => items.into_iter().filter_map(|item| item.as_str().map(str::to_string)).collect(),
		_ => Vec::new(),
	})
}

#[axum::debug_handler]
#[instrument(name = "track_mood", skip(state, request), fields(user_id = request.user_id))]
pub async fn track_mood(State(state): State<AppState>, Json(request): Json<TrackMoodRequest>) -> Result<(StatusCode, Json<MoodRecord>), MindoraError> {
	request.validate()?;
	let date = user_day(&state.core.clock, &request.date)?;

	let record = state
		.core
		.moods
		.record(NewMoodEntry {
			user_id: request.user_id,
			date,
			mood_status: request.mood_status,
			mood_level: request.mood_level,
			reason: request.reason,
		})
		.await?;

	tracing::info!(id = record.id, %date, "mood logged");
	Ok((StatusCode::CREATED, Json(record)))
}

#[axum::debug_handler]
#[instrument(name = "latest_mood", skip(state))]
pub async fn latest_mood(State(state): State<AppState>, Path(user_id): Path<i64>) -> Result<Json<MoodRecord>, MindoraError> {
	let record = state.core.moods.latest(user_id).await?;
	record.map(Json).ok_or(MindoraError::NoData("No mood data found for this user"))
}

#[axum::debug_handler]
#[instrument(name = "mood_on_date", skip(state))]
pub async fn mood_on_date(State(state): State<AppState>, Path((user_id, date)): Path<(i64, String)>) -> Result<Json<MoodRecord>, MindoraError> {
	let date = user_day(&state.core.clock, &date)?;
	let record = state.core.moods.latest_on(user_id, date).await?;
	record.map(Json).ok_or(MindoraError::NoData("No mood data found for this date"))
}

/// Recent entries, newest first. Reading them also runs the emergency-alert
/// analysis; the response never depends on whether a notification went out.
#[axum::debug_handler]
#[instrument(name = "weekly_mood", skip(state))]
pub async fn weekly_mood(State(state): State<AppState>, Path(user_id): Path<i64>) -> Result<Json<Vec<MoodEntry>>, MindoraError> {
	let today = state.core.clock.today();
	let from = today.checked_sub_days(Days::new(WEEKLY_LOOKBACK_DAYS)).unwrap_or(today);
	let to = today.checked_add_days(Days::new(WEEKLY_LOOKAHEAD_DAYS)).unwrap_or(today);

	let mut entries = state.core.moods.between(user_id, from, to).await?;
	dispatch_mood_alert(&state, user_id, &entries);

	entries.reverse();
	Ok(Json(entries))
}

#[axum::debug_handler]
#[instrument(name = "monthly_mood", skip(state))]
pub async fn monthly_mood(
	State(state): State<AppState>,
	Path((user_id, year, month)): Path<(i64, i32, u32)>,
) -> Result<Json<BTreeMap<String, Vec<MoodEntry>>>, MindoraError> {
	if !(1..=12).contains(&month) {
		return Err(MindoraError::bad_request(format!("invalid month `{month}`")));
	}

	let entries = state.core.moods.month(user_id, year, month).await?;
	if entries.is_empty() {
		return Err(MindoraError::NoData("No mood data found for this month"));
	}

	let mut weeks: BTreeMap<String, Vec<MoodEntry>> = BTreeMap::new();
	for entry in entries {
		weeks.entry(format!("Week {}", week_of_month(entry.date))).or_default().push(entry);
	}

	Ok(Json(weeks))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_reason_accepts_only_string_arrays() {
		let parse = |body: &str| serde_json::from_str::<TrackMoodRequest>(body).unwrap().reason;

		let base = r#""user_id": 1, "mood_status": "Sad", "mood_level": 4, "date": "2024-06-03""#;
		assert_eq!(parse(&format!(r#"{{{base}, "reason": ["work", 3, "sleep"]}}"#)), vec!["work", "sleep"]);
		assert!(parse(&format!(r#"{{{base}, "reason": "work"}}"#)).is_empty());
		assert!(parse(&format!(r#"{{{base}, "reason": null}}"#)).is_empty());
		assert!(parse(&format!("{{{base}}}")).is_empty());
	}

	#[test]
	fn test_track_request_validation() {
		let request = TrackMoodRequest {
			user_id: 0,
			mood_status: String::new(),
			mood_level: 4,
			reason: Vec::new(),
			date: "2024-06-03".to_string(),
		};

		let report = request.validate().unwrap_err();
		let fields: Vec<String> = report.iter().map(|(path, _)| path.to_string()).collect();
		assert!(fields.contains(&"user_id".to_string()));
		assert!(fields.contains(&"mood_status".to_string()));
	}
}
