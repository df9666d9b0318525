use clap::Parser;
use mood_alert::SuddenShiftRule;

#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Config {
	/// Use JSON formatting for tracing
	#[arg(long, env = "LOG_JSON", default_value = "false")]
	pub log_json: bool,

	/// Tracing filter directives
	#[arg(long, env = "RUST_LOG", default_value = "info")]
	pub rust_log: String,

	/// SQLite connection string
	#[arg(long, env = "DATABASE_URL", default_value = "sqlite://mindora.db")]
	pub database_url: String,

	/// Maximum pooled database connections
	#[arg(long, env = "DB_MAX_CONNECTIONS", default_value = "5")]
	pub db_max_connections: u32,

	/// Server host
	#[arg(long, env = "HOST", default_value = "0.0.0.0")]
	pub host: String,

	/// Server port
	#[arg(long, env = "PORT", default_value = "3000")]
	pub port: u16,

	/// Max Request Size (MiB)
	#[arg(long, env = "MAX_REQUEST_SIZE", default_value = "2")]
	pub max_request_size: usize,

	/// Request timeout in milliseconds
	#[arg(long, env = "TASK_TIMEOUT_MS", default_value = "30000")]
	pub task_timeout_ms: u64,

	/// Max in-flight requests before load shedding
	#[arg(long, env = "MAX_CONCURRENT_REQ", default_value = "256")]
	pub max_concurrent_req: usize,

	/// Email relay endpoint; mail is disabled when unset
	#[arg(long, env = "EMAIL_SERVICE_URL")]
	pub email_service_url: Option<String>,

	/// Bearer token for the email relay
	#[arg(long, env = "EMAIL_SERVICE_TOKEN")]
	pub email_service_token: Option<String>,

	/// Sender address on outgoing mail
	#[arg(long, env = "MAIL_FROM", default_value = "Mindora <no-reply@mindora.app>")]
	pub mail_from: String,

	/// Upper bound for one emergency notification
	#[arg(long, env = "NOTIFY_TIMEOUT_MS", default_value = "10000")]
	pub notify_timeout_ms: u64,

	/// Offset from UTC that defines the user's calendar day
	#[arg(long, env = "USER_UTC_OFFSET_MINUTES", default_value = "360", allow_hyphen_values = true)]
	pub user_utc_offset_minutes: i32,

	/// Adjacency rule for the sudden negative shift check
	#[arg(long, env = "SUDDEN_SHIFT_RULE", default_value = "disabled")]
	pub sudden_shift_rule: SuddenShiftRule,

	/// Generative AI key for wellness task suggestions
	#[arg(long, env = "GENERATIVE_AI_API_KEY")]
	pub generative_ai_api_key: Option<String>,

	#[arg(long, env = "GENERATIVE_AI_MODEL", default_value = "gemini-1.5-flash")]
	pub generative_ai_model: String,

	#[arg(long, env = "GENERATIVE_AI_URL", default_value = "https://generativelanguage.googleapis.com/v1beta")]
	pub generative_ai_url: String,

	#[arg(long, env = "AI_TIMEOUT_MS", default_value = "15000")]
	pub ai_timeout_ms: u64,
}

impl Default for Config {
	/// Built-in defaults only, ignoring the process environment.
	fn default() -> Self {
		Self {
			log_json: false,
			rust_log: "info".to_string(),
			database_url: "sqlite://mindora.db".to_string(),
			db_max_connections: 5,
			host: "0.0.0.0".to_string(),
			port: 3000,
			max_request_size: 2,
			task_timeout_ms: 30_000,
			max_concurrent_req: 256,
			email_service_url: None,
			email_service_token: None,
			mail_from: "Mindora <no-reply@mindora.app>".to_string(),
			notify_timeout_ms: 10_000,
			user_utc_offset_minutes: 360,
			sudden_shift_rule: SuddenShiftRule::Disabled,
			generative_ai_api_key: None,
			generative_ai_model: "gemini-1.5-flash".to_string(),
			generative_ai_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
			ai_timeout_ms: 15_000,
		}
	}
}
