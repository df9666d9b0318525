use crate::models::users;
use crate::AppState;
use mood_alert::{EmergencyAlert, EmergencyAlertDecision, EmergencyNotifier, MoodEntry, NotifyError};
use sqlx::SqlitePool;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::Instrument;

#[derive(Debug, thiserror::Error)]
pub enum AlertDispatchError {
	#[error("emergency contact lookup failed: {0}")]
	Lookup(#[from] sqlx::Error),

	#[error(transparent)]
	Notify(#[from] NotifyError),
}

/// Analyzes `entries` and, when an alert is due, notifies the user's emergency
/// contact in the background. The caller never waits on or sees the outcome.
pub fn dispatch_mood_alert(state: &AppState, user_id: i64, entries: &[MoodEntry]) -> Option<JoinHandle<()>> {
	let decision = state.core.analyzer.analyze(entries);
	if !decision.needs_alert {
		return None;
	}

	tracing::info!(user_id, alert_type = %decision.alert_type, relevant = decision.relevant_entries.len(), "emergency alert raised");

	let pool = state.core.db.clone();
	let notifier = state.external.notifier.clone();
	let timeout = Duration::from_millis(state.core.config.notify_timeout_ms);

	let task = async move {
		match notify_contact(&pool, notifier.as_ref(), user_id, decision, timeout).await {
			Ok(true) => tracing::info!("emergency contact notified"),
			Ok(false) => tracing::info!("no emergency contact on file, alert not sent"),
			Err(AlertDispatchError::Notify(e @ NotifyError::TimedOut(_))) => tracing::warn!(error = %e, "emergency notification abandoned"),
			Err(e) => tracing::error!(error = %e, "emergency notification failed"),
		}
	};

	Some(tokio::spawn(task.instrument(tracing::info_span!("mood_alert", user_id))))
}

/// `Ok(false)` when there is nobody to tell.
pub async fn notify_contact(
	pool: &SqlitePool,
	notifier: &dyn EmergencyNotifier,
	user_id: i64,
	decision: EmergencyAlertDecision,
	timeout: Duration,
) -> Result<bool, AlertDispatchError> {
	let Some(contact) = users::find_emergency_contact(pool, user_id).await? else {
		return Ok(false);
	};
	let Some(alert) = EmergencyAlert::from_decision(contact.emergency_email, contact.name, decision) else {
		return Ok(false);
	};

	tokio::time::timeout(timeout, notifier.notify(&alert)).await.map_err(|_| NotifyError::TimedOut(timeout))??;
	Ok(true)
}
