use crate::local_day::UserClock;
use crate::mail::{HttpMailer, MailNotifier, Mailer};
use crate::suggestions::{GeminiSuggester, TaskSuggester};
use anyhow::Context;
use mood_alert::{EmergencyNotifier, MoodPatternAnalyzer};
use mood_tracker::MoodTrackerRepository;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;

pub mod alerts;
pub mod config;
pub mod error;
pub mod handlers;
pub mod local_day;
pub mod mail;
pub mod models;
pub mod passwords;
pub mod routes;
pub mod suggestions;

pub use config::Config;
pub use error::MindoraError;
pub use routes::app_router;

/// Core: configuration, storage and the rules that run per request
#[derive(Clone)]
pub struct CoreContext {
	pub config: Arc<Config>,
	pub db: SqlitePool,
	pub moods: MoodTrackerRepository,
	pub clock: UserClock,
	pub analyzer: MoodPatternAnalyzer,
}

/// External APIs: outbound mail and the task suggestion model
#[derive(Clone)]
pub struct ExternalApis {
	pub mailer: Arc<dyn Mailer>,
	pub notifier: Arc<dyn EmergencyNotifier>,
	pub suggester: Arc<dyn TaskSuggester>,
}

impl ExternalApis {
	pub fn from_config(config: &Config) -> anyhow::Result<Self> {
		let mailer: Arc<dyn Mailer> = Arc::new(HttpMailer::new(
			config.email_service_url.clone(),
			config.email_service_token.clone(),
			config.mail_from.clone(),
			Duration::from_millis(config.notify_timeout_ms),
		)?);

		let suggester = GeminiSuggester::new(
			config.generative_ai_url.clone(),
			config.generative_ai_model.clone(),
			config.generative_ai_api_key.clone(),
			Duration::from_millis(config.ai_timeout_ms),
		)?;

		Ok(Self {
			notifier: Arc::new(MailNotifier::new(mailer.clone())),
			mailer,
			suggester: Arc::new(suggester),
		})
	}
}

#[derive(Clone)]
pub struct AppState {
	pub core: CoreContext,
	pub external: ExternalApis,
}

impl AppState {
	/// Build the entire universe in one explicit place
	pub fn build(config: Arc<Config>, pool: SqlitePool) -> anyhow::Result<Self> {
		let external = ExternalApis::from_config(&config)?;
		Self::with_external(config, pool, external)
	}

	pub fn with_external(config: Arc<Config>, pool: SqlitePool, external: ExternalApis) -> anyhow::Result<Self> {
		let clock = UserClock::from_offset_minutes(config.user_utc_offset_minutes)
			.with_context(|| format!("USER_UTC_OFFSET_MINUTES out of range: {}", config.user_utc_offset_minutes))?;

		let core = CoreContext {
			analyzer: MoodPatternAnalyzer::new(config.sudden_shift_rule),
			moods: MoodTrackerRepository::new(pool.clone()),
			db: pool,
			clock,
			config,
		};

		Ok(Self { core, external })
	}
}

/// Runs the embedded migrations, mood table included.
pub async fn prepare_database(pool: &SqlitePool) -> anyhow::Result<()> {
	sqlx::migrate!().run(pool).await.context("running migrations")?;
	Ok(())
}
