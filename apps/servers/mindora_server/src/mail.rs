use async_trait::async_trait;
use mood_alert::{render_alert_email, EmergencyAlert, EmergencyNotifier, NotifyError};
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

#[derive(Debug, thiserror::Error)]
pub enum MailError {
	#[error("no email relay configured")]
	NotConfigured,

	#[error("request failed: {0}")]
	RequestFailed(#[from] reqwest::Error),

	#[error("relay error {0}: {1}")]
	Relay(u16, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
	pub to: String,
	pub subject: String,
	pub text: String,
	pub html: Option<String>,
}

impl MailMessage {
	pub fn text(to: impl Into<String>, subject: impl Into<String>, text: impl Into<String>) -> Self {
		Self {
			to: to.into(),
			subject: subject.into(),
			text: text.into(),
			html: None,
		}
	}
}

#[async_trait]
pub trait Mailer: Send + Sync + 'static {
	async fn send(&self, message: MailMessage) -> Result<(), MailError>;
}

#[derive(Serialize)]
struct RelayPayload<'a> {
	from: &'a str,
	to: &'a str,
	subject: &'a str,
	text: &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	html: Option<&'a str>,
}

/// Posts mail as JSON to an HTTP relay.
pub struct HttpMailer {
	client: Client,
	endpoint: Option<String>,
	token: Option<String>,
	from: String,
}

impl HttpMailer {
	pub fn new(endpoint: Option<String>, token: Option<String>, from: String, timeout: Duration) -> Result<Self, MailError> {
		let client = Client::builder().timeout(timeout).build()?;

		Ok(Self {
			client,
			endpoint: endpoint.filter(|url| !url.trim().is_empty()),
			token,
			from,
		})
	}
}

#[async_trait]
impl Mailer for HttpMailer {
	#[instrument(name = "send_mail", skip(self, message), fields(to = %message.to, subject = %message.subject))]
	async fn send(&self, message: MailMessage) -> Result<(), MailError> {
		let Some(endpoint) = self.endpoint.as_deref() else {
			tracing::warn!("mail dropped, EMAIL_SERVICE_URL is not set");
			return Err(MailError::NotConfigured);
		};

		let payload = RelayPayload {
			from: &self.from,
			to: &message.to,
			subject: &message.subject,
			text: &message.text,
			html: message.html.as_deref(),
		};

		let mut request = self.client.post(endpoint).json(&payload);
		if let Some(token) = &self.token {
			request = request.bearer_auth(token);
		}

		let response = request.send().await?;
		let status = response.status();
		if !status.is_success() {
			let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
			return Err(MailError::Relay(status.as_u16(), error_text));
		}

		tracing::info!("mail accepted by relay");
		Ok(())
	}
}

/// Sends emergency alerts as templated mail.
pub struct MailNotifier {
	mailer: Arc<dyn Mailer>,
}

impl MailNotifier {
	pub fn new(mailer: Arc<dyn Mailer>) -> Self {
		Self { mailer }
	}
}

#[async_trait]
impl EmergencyNotifier for MailNotifier {
	async fn notify(&self, alert: &EmergencyAlert) -> Result<(), NotifyError> {
		let email = render_alert_email(alert.alert_type, &alert.user_name, &alert.relevant_entries).ok_or(NotifyError::NoTemplate(alert.alert_type))?;

		let message = MailMessage {
			to: alert.contact_address.clone(),
			subject: email.subject,
			text: email.text,
			html: Some(email.html),
		};

		self.mailer.send(message).await.map_err(|e| NotifyError::Transport(e.to_string()))
	}
}
