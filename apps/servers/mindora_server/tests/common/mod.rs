#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mindora_server::mail::{MailError, MailMessage, Mailer};
use mindora_server::suggestions::{SuggestionError, TaskSuggester};
use mindora_server::{app_router, prepare_database, AppState, Config, ExternalApis};
use mood_alert::{EmergencyAlert, EmergencyNotifier, NotifyError};
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

#[derive(Default)]
pub struct Outbox {
	pub sent: Mutex<Vec<MailMessage>>,
	pub fail: bool,
}

#[async_trait]
impl Mailer for Outbox {
	async fn send(&self, message: MailMessage) -> Result<(), MailError> {
		if self.fail {
			return Err(MailError::Relay(502, "relay down".to_string()));
		}
		self.sent.lock().unwrap().push(message);
		Ok(())
	}
}

#[derive(Default)]
pub struct RecordingNotifier {
	pub alerts: Mutex<Vec<EmergencyAlert>>,
}

#[async_trait]
impl EmergencyNotifier for RecordingNotifier {
	async fn notify(&self, alert: &EmergencyAlert) -> Result<(), NotifyError> {
		self.alerts.lock().unwrap().push(alert.clone());
		Ok(())
	}
}

/// Hangs well past any notify timeout, then fails.
pub struct StalledNotifier;

#[async_trait]
impl EmergencyNotifier for StalledNotifier {
	async fn notify(&self, _alert: &EmergencyAlert) -> Result<(), NotifyError> {
		tokio::time::sleep(Duration::from_secs(30)).await;
		Err(NotifyError::Transport("relay unreachable".to_string()))
	}
}

/// Replies with a fixed model output, or fails when there is none.
pub struct CannedSuggester(pub Option<String>);

#[async_trait]
impl TaskSuggester for CannedSuggester {
	async fn generate(&self, _prompt: &str) -> Result<String, SuggestionError> {
		self.0.clone().ok_or(SuggestionError::NotConfigured)
	}
}

pub struct TestApp {
	pub router: Router,
	pub pool: SqlitePool,
	pub outbox: Arc<Outbox>,
	pub notifier: Arc<RecordingNotifier>,
}

impl TestApp {
	pub async fn new() -> Self {
		Self::with_parts(Outbox::default(), CannedSuggester(None)).await
	}

	pub async fn with_parts(outbox: Outbox, suggester: CannedSuggester) -> Self {
		let notifier = Arc::new(RecordingNotifier::default());
		Self::build(outbox, suggester, notifier.clone(), notifier).await
	}

	/// Alerts go to `alerting` instead of the recording notifier.
	pub async fn with_notifier(alerting: Arc<dyn EmergencyNotifier>) -> Self {
		Self::build(Outbox::default(), CannedSuggester(None), alerting, Arc::new(RecordingNotifier::default())).await
	}

	async fn build(outbox: Outbox, suggester: CannedSuggester, alerting: Arc<dyn EmergencyNotifier>, notifier: Arc<RecordingNotifier>) -> Self {
		let pool = SqlitePoolOptions::new().max_connections(1).connect("sqlite::memory:").await.unwrap();
		prepare_database(&pool).await.unwrap();

		let outbox = Arc::new(outbox);
		let external = ExternalApis {
			mailer: outbox.clone(),
			notifier: alerting,
			suggester: Arc::new(suggester),
		};

		let config = Config {
			notify_timeout_ms: 1_000,
			..Config::default()
		};
		let state = AppState::with_external(Arc::new(config), pool.clone(), external).unwrap();

		Self {
			router: app_router(state),
			pool,
			outbox,
			notifier,
		}
	}

	pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
		self.send(Method::GET, uri, None).await
	}

	pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
		self.send(Method::POST, uri, Some(body)).await
	}

	async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
		let builder = Request::builder().method(method).uri(uri);
		let request = match body {
			Some(json) => builder.header("content-type", "application/json").body(Body::from(json.to_string())).unwrap(),
			None => builder.body(Body::empty()).unwrap(),
		};

		let response = self.router.clone().oneshot(request).await.unwrap();
		let status = response.status();
		let bytes = response.into_body().collect().await.unwrap().to_bytes();
		let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };

		(status, json)
	}

	/// Creates a patient and returns its id.
	pub async fn patient(&self, email: &str, emergency_email: Option<&str>) -> i64 {
		let (status, body) = self
			.post(
				"/signup",
				serde_json::json!({ "email": email, "password": "secret-pass", "name": "Rafi", "isPatient": true }),
			)
			.await;
		assert_eq!(status, StatusCode::CREATED, "{body}");
		let id = body["user"]["id"].as_i64().unwrap();

		if let Some(contact) = emergency_email {
			let (status, _) = self
				.post("/profile/update-info", serde_json::json!({ "user_id": id, "user_type": "patient", "emergency_contact": contact }))
				.await;
			assert_eq!(status, StatusCode::OK);
		}

		id
	}

	/// Waits for the background notifier to record `count` alerts.
	pub async fn wait_for_alerts(&self, count: usize) -> Vec<EmergencyAlert> {
		for _ in 0..100 {
			{
				let alerts = self.notifier.alerts.lock().unwrap();
				if alerts.len() >= count {
					return alerts.clone();
				}
			}
			tokio::time::sleep(Duration::from_millis(10)).await;
		}
		self.notifier.alerts.lock().unwrap().clone()
	}
}
