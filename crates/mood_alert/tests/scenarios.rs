use chrono::{Days, NaiveDate};
use mood_alert::{AlertType, EmergencyAlert, EmergencyAlertDecision, EmergencyNotifier, MoodEntry, MoodPatternAnalyzer, NotifyError};
use std::sync::Mutex;

fn day(offset: u64) -> NaiveDate {
	NaiveDate::from_ymd_opt(2024, 11, 1).unwrap().checked_add_days(Days::new(offset)).unwrap()
}

#[test]
fn test_five_sad_two_happy_week_alerts() {
	let entries: Vec<_> = ["Sad", "Sad", "Happy", "Sad", "Sad", "Happy", "Sad"]
		.iter()
		.enumerate()
		.map(|(i, status)| MoodEntry::new(day(i as u64), *status, if *status == "Sad" { 4 } else { 1 }))
		.collect();

	let decision = MoodPatternAnalyzer::default().analyze(&entries);

	assert!(decision.needs_alert);
	assert_eq!(decision.alert_type, AlertType::NegativeMoodPattern);
	assert_eq!(decision.relevant_entries.len(), 5);
	assert!(decision.relevant_entries.iter().all(|e| e.mood_status == "Sad"));
}

#[test]
fn test_four_depressed_days_are_not_enough_history() {
	let entries: Vec<_> = (0..4).map(|i| MoodEntry::new(day(i), "Depressed", 5)).collect();

	assert_eq!(MoodPatternAnalyzer::default().analyze(&entries), EmergencyAlertDecision::no_alert());
}

#[test]
fn test_older_entries_outside_window_are_ignored() {
	// 3 positive days, then the 7 most recent days with 5 qualifying negatives.
	let mut entries: Vec<_> = (0..3).map(|i| MoodEntry::new(day(i), "Happy", 1)).collect();
	let recent = [("Sad", 3), ("Calm", 1), ("Angry", 4), ("Depressed", 5), ("Okay", 2), ("Stressed", 3), ("sad", 4)];
	entries.extend(recent.iter().enumerate().map(|(i, (status, level))| MoodEntry::new(day(3 + i as u64), *status, *level)));

	let decision = MoodPatternAnalyzer::default().analyze(&entries);

	assert_eq!(decision.alert_type, AlertType::NegativeMoodPattern);
	let dates: Vec<_> = decision.relevant_entries.iter().map(|e| e.date).collect();
	assert_eq!(dates, vec![day(3), day(5), day(6), day(8), day(9)]);

	// Swapping the old positive days for negative ones changes nothing.
	for entry in entries.iter_mut().take(3) {
		entry.mood_status = "Sad".to_string();
		entry.mood_level = Some(5);
	}
	assert_eq!(MoodPatternAnalyzer::default().analyze(&entries), decision);
}

#[derive(Default)]
struct RecordingNotifier {
	sent: Mutex<Vec<EmergencyAlert>>,
}

#[async_trait::async_trait]
impl EmergencyNotifier for RecordingNotifier {
	async fn notify(&self, alert: &EmergencyAlert) -> Result<(), NotifyError> {
		self.sent.lock().unwrap().push(alert.clone());
		Ok(())
	}
}

#[tokio::test]
async fn test_decision_flows_into_notifier() {
	let entries: Vec<_> = (0..5).map(|i| MoodEntry::new(day(i), "Angry", 3)).collect();
	let decision = MoodPatternAnalyzer::default().analyze(&entries);
	let notifier = RecordingNotifier::default();

	if let Some(alert) = EmergencyAlert::from_decision("contact@example.com", "Nadia", decision) {
		notifier.notify(&alert).await.unwrap();
	}

	let sent = notifier.sent.lock().unwrap();
	assert_eq!(sent.len(), 1);
	assert_eq!(sent[0].user_name, "Nadia");
	assert_eq!(sent[0].relevant_entries.len(), 5);
}
