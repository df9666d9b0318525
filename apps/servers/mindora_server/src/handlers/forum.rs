use crate::handlers::MessageResponse;
use crate::models::forum::{self, ForumPost};
use crate::{AppState, MindoraError};
use axum::{
	extract::{Query, State},
	Json,
};
use garde::Validate;
use serde::{Deserialize, Serialize};
use tracing::instrument;

#[derive(Debug, Deserialize, Validate)]
pub struct NewPostRequest {
	/// Author's user id.
	#[garde(range(min = 1))]
	pub id: i64,

	#[garde(length(min = 1, max = 5000))]
	pub content: String,

	#[garde(length(min = 1, max = 50))]
	pub mood: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
	#[garde(range(min = 1))]
	pub post_id: i64,

	#[garde(length(min = 1, max = 5000))]
	pub content: String,

	#[garde(length(min = 1, max = 50))]
	pub mood: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePostRequest {
	pub post_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct AuthorQuery {
	pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
	pub message: &'static str,
	pub post: ForumPost,
}

#[derive(Debug, Serialize)]
pub struct PostList {
	pub data: Vec<ForumPost>,
}

#[axum::debug_handler]
#[instrument(name = "create_post", skip(state, request), fields(user_id = request.id))]
pub async fn post_content(State(state): State<AppState>, Json(request): Json<NewPostRequest>) -> Result<Json<PostResponse>, MindoraError> {
	request.validate()?;

	let post = forum::insert(&state.core.db, request.id, &request.content, &request.mood).await?;

	Ok(Json(PostResponse {
		message: "Post created successfully",
		post,
	}))
}

#[axum::debug_handler]
#[instrument(name = "user_posts", skip(state))]
pub async fn get_posts(State(state): State<AppState>, Query(query): Query<AuthorQuery>) -> Result<Json<PostList>, MindoraError> {
	let data = forum::for_user(&state.core.db, query.id).await?;
	Ok(Json(PostList { data }))
}

#[axum::debug_handler]
#[instrument(name = "all_posts", skip(state))]
pub async fn get_all_posts(State(state): State<AppState>) -> Result<Json<PostList>, MindoraError> {
	let data = forum::all(&state.core.db).await?;
	Ok(Json(PostList { data }))
}

#[axum::debug_handler]
#[instrument(name = "update_post", skip(state, request), fields(post_id = request.post_id))]
pub async fn update_post(State(state): State<AppState>, Json(request): Json<UpdatePostRequest>) -> Result<Json<PostResponse>, MindoraError> {
	request.validate()?;

	let post = forum::update(&state.core.db, request.post_id, &request.content, &request.mood)
		.await?
		.ok_or(MindoraError::NotFound("Post not found"))?;

	Ok(Json(PostResponse {
		message: "Post updated successfully",
		post,
	}))
}

#[axum::debug_handler]
#[instrument(name = "delete_post", skip(state))]
pub async fn delete_post(State(state): State<AppState>, Json(request): Json<DeletePostRequest>) -> Result<Json<MessageResponse>, MindoraError> {
	if !forum::delete(&state.core.db, request.post_id).await? {
		return Err(MindoraError::NotFound("Post not found"));
	}

	Ok(Json(MessageResponse::new("Post deleted successfully")))
}
