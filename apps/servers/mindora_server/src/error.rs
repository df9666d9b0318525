use crate::mail::MailError;
use axum::body::Body;
use axum::http::{Response, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::borrow::Cow;
use std::collections::HashMap;

#[derive(thiserror::Error, Debug)]
pub enum MindoraError {
	#[error("{0}")]
	BadRequest(Cow<'static, str>),

	#[error("{0}")]
	Unauthorized(&'static str),

	#[error("{0}")]
	NotFound(&'static str),

	/// Lookup that found nothing, reported as `{message, data: null}`.
	#[error("{0}")]
	NoData(&'static str),

	#[error("error in the request body")]
	UnprocessableEntity { errors: HashMap<Cow<'static, str>, Vec<Cow<'static, str>>> },

	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),

	#[error("mail delivery failed: {0}")]
	Mail(#[from] MailError),

	#[error("password hashing failed: {0}")]
	PasswordHash(String),

	#[error("an internal server error occurred")]
	Anyhow(#[from] anyhow::Error),

	#[error("Request timeout")]
	RequestTimeout,

	#[error("Service temporarily overloaded")]
	ServiceOverloaded,

	#[error("Unexpected Tower Service error: {0}")]
	TowerError(#[from] tower::BoxError),
}

impl MindoraError {
	pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
		Self::BadRequest(message.into())
	}

	pub fn unprocessable_entity<K, V>(errors: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: Into<Cow<'static, str>>,
		V: Into<Cow<'static, str>>,
	{
		let mut error_map = HashMap::new();

		for (key, val) in errors {
			error_map.entry(key.into()).or_insert_with(Vec::new).push(val.into());
		}

		Self::UnprocessableEntity { errors: error_map }
	}

	pub const fn status_code(&self) -> StatusCode {
		match self {
			Self::BadRequest(_) => StatusCode::BAD_REQUEST,
			Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
			Self::NotFound(_) | Self::NoData(_) => StatusCode::NOT_FOUND,
			Self::UnprocessableEntity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
			Self::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
			Self::ServiceOverloaded => StatusCode::SERVICE_UNAVAILABLE,
			Self::Database(_) | Self::Mail(_) | Self::PasswordHash(_) | Self::Anyhow(_) | Self::TowerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl From<garde::Report> for MindoraError {
	fn from(report: garde::Report) -> Self {
		Self::unprocessable_entity(report.iter().map(|(path, error)| (path.to_string(), error.message().to_string())))
	}
}

impl IntoResponse for MindoraError {
	fn into_response(self) -> Response<Body> {
		let status = self.status_code();
		match self {
			Self::UnprocessableEntity { errors } => {
				#[derive(serde::Serialize)]
				struct Errors {
					errors: HashMap<Cow<'static, str>, Vec<Cow<'static, str>>>,
				}

				(status, Json(Errors { errors })).into_response()
			}
			Self::NoData(message) => (status, Json(json!({ "message": message, "data": null }))).into_response(),
			Self::Anyhow(ref e) => {
				tracing::error!("Generic error: {:?}", e);
				(status, Json(json!({ "error": "Internal Server Error" }))).into_response()
			}
			_ => {
				if status.is_server_error() {
					tracing::error!(error = %self, "request failed");
				}
				(status, Json(json!({ "error": self.to_string() }))).into_response()
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use http_body_util::BodyExt;

	async fn body_json(error: MindoraError) -> (StatusCode, serde_json::Value) {
		let response = error.into_response();
		let status = response.status();
		let bytes = response.into_body().collect().await.unwrap().to_bytes();
		(status, serde_json::from_slice(&bytes).unwrap())
	}

	#[tokio::test]
	async fn test_error_body_shape() {
		let (status, body) = body_json(MindoraError::NotFound("User not found")).await;
		assert_eq!(status, StatusCode::NOT_FOUND);
		assert_eq!(body, json!({ "error": "User not found" }));
	}

	#[tokio::test]
	async fn test_no_data_body_shape() {
		let (status, body) = body_json(MindoraError::NoData("No mood data found for this user")).await;
		assert_eq!(status, StatusCode::NOT_FOUND);
		assert_eq!(body, json!({ "message": "No mood data found for this user", "data": null }));
	}

	#[tokio::test]
	async fn test_unprocessable_groups_messages_by_field() {
		let error = MindoraError::unprocessable_entity([("email", "length is lower than 3"), ("email", "not a valid email"), ("name", "empty")]);
		let (status, body) = body_json(error).await;

		assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
		assert_eq!(body["errors"]["email"].as_array().unwrap().len(), 2);
		assert_eq!(body["errors"]["name"][0], "empty");
	}
}
