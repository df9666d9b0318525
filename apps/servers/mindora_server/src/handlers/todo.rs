use crate::handlers::MessageResponse;
use crate::models::todo::{self, TaskFields, TodoTask};
use crate::models::{sleep, stress};
use crate::suggestions::{suggest_tasks, MoodSnapshot, SleepSnapshot, StressSnapshot, SuggestedTask, WellnessSnapshot};
use crate::{AppState, MindoraError};
use axum::{
	extract::{Query, State},
	http::StatusCode,
	Json,
};
use chrono::{SecondsFormat, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};
use tracing::instrument;

const PRIORITIES: [&str; 3] = ["low", "medium", "high"];

fn known_priority(value: &str, _ctx: &()) -> garde::Result {
	if PRIORITIES.contains(&value.to_ascii_lowercase().as_str()) {
		Ok(())
	} else {
		Err(garde::Error::new("priority must be low, medium or high"))
	}
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddTaskRequest {
	#[garde(range(min = 1))]
	pub user_id: i64,

	#[garde(length(min = 1, max = 200))]
	pub title: String,

	#[garde(length(min = 1, max = 2000))]
	pub description: String,

	#[garde(custom(known_priority))]
	pub priority: String,

	#[garde(skip)]
	#[serde(rename = "dueDate")]
	pub due_date: Option<String>,

	#[garde(skip)]
	#[serde(rename = "createdAt")]
	pub created_at: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
	#[garde(range(min = 1))]
	pub user_id: i64,

	#[garde(range(min = 1))]
	pub task_id: i64,

	#[garde(length(min = 1, max = 200))]
	pub title: String,

	#[garde(length(min = 1, max = 2000))]
	pub description: String,

	#[garde(custom(known_priority))]
	pub priority: String,

	#[garde(skip)]
	#[serde(alias = "dueDate")]
	pub due_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TaskRef {
	pub user_id: i64,
	pub task_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UserQuery {
	pub user_id: i64,
}

#[derive(Debug, Serialize)]
pub struct WellnessResponse {
	pub success: bool,
	pub suggestions: Vec<SuggestedTask>,
	#[serde(rename = "wellnessData")]
	pub wellness_data: WellnessSnapshot,
}

fn non_empty(value: Option<String>) -> Option<String> {
	value.filter(|v| !v.trim().is_empty())
}

#[axum::debug_handler]
#[instrument(name = "get_tasks", skip(state))]
pub async fn get_tasks(State(state): State<AppState>, Query(query): Query<UserQuery>) -> Result<Json<Vec<TodoTask>>, MindoraError> {
	let tasks = todo::for_user(&state.core.db, query.user_id).await?;
	Ok(Json(tasks))
}

#[axum::debug_handler]
#[instrument(name = "add_task", skip(state, request), fields(user_id = request.user_id))]
pub async fn add_task(State(state): State<AppState>, Json(request): Json<AddTaskRequest>) -> Result<(StatusCode, Json<TodoTask>), MindoraError> {
	request.validate()?;

	let created_at = non_empty(request.created_at).unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));
	let fields = TaskFields {
		title: request.title,
		description: request.description,
		priority: request.priority,
		due_date: non_empty(request.due_date),
	};

	let task = todo::insert(&state.core.db, request.user_id, &fields, &created_at).await?;
	Ok((StatusCode::CREATED, Json(task)))
}

#[axum::debug_handler]
#[instrument(name = "update_task", skip(state, request), fields(user_id = request.user_id, task_id = request.task_id))]
pub async fn update_task(State(state): State<AppState>, Json(request): Json<UpdateTaskRequest>) -> Result<Json<TodoTask>, MindoraError> {
	request.validate()?;

	let fields = TaskFields {
		title: request.title,
		description: request.description,
		priority: request.priority,
		due_date: non_empty(request.due_date),
	};

	let task = todo::update(&state.core.db, request.user_id, request.task_id, &fields)
		.await?
		.ok_or(MindoraError::NotFound("Task not found or you don't have permission to update it"))?;

	Ok(Json(task))
}

#[axum::debug_handler]
#[instrument(name = "delete_task", skip(state))]
pub async fn delete_task(State(state): State<AppState>, Json(request): Json<TaskRef>) -> Result<Json<MessageResponse>, MindoraError> {
	if !todo::delete(&state.core.db, request.user_id, request.task_id).await? {
		return Err(MindoraError::NotFound("Task not found or you don't have permission to delete it"));
	}

	Ok(Json(MessageResponse::new("Task deleted successfully")))
}

#[axum::debug_handler]
#[instrument(name = "complete_task", skip(state))]
pub async fn complete_task(State(state): State<AppState>, Json(request): Json<TaskRef>) -> Result<Json<TodoTask>, MindoraError> {
	let task = todo::complete(&state.core.db, request.user_id, request.task_id)
		.await?
		.ok_or(MindoraError::NotFound("Task not found or you don't have permission to complete it"))?;

	Ok(Json(task))
}

/// Suggested tasks built from the user's latest mood, stress and sleep logs.
#[axum::debug_handler]
#[instrument(name = "wellness_suggestions", skip(state))]
pub async fn wellness(State(state): State<AppState>, Query(query): Query<UserQuery>) -> Result<Json<WellnessResponse>, MindoraError> {
	let db = &state.core.db;
	let (mood, stress, sleep) = futures::try_join!(
		state.core.moods.latest(query.user_id),
		stress::latest(db, query.user_id),
		sleep::latest(db, query.user_id),
	)?;

	let snapshot = WellnessSnapshot {
		mood: mood.map(|record| MoodSnapshot {
			mood_status: record.entry.mood_status,
			mood_level: record.entry.mood_level,
			reason: record.entry.reason,
		}),
		stress: stress.map(|record| StressSnapshot {
			stress_level: record.stress_level,
			cause: record.cause,
		}),
		sleep: sleep.map(|record| SleepSnapshot { sleep_hours: record.sleep_hours }),
	};

	let suggestions = suggest_tasks(state.external.suggester.as_ref(), &snapshot, state.core.clock.now()).await;

	Ok(Json(WellnessResponse {
		success: true,
		suggestions,
		wellness_data: snapshot,
	}))
}
