use crate::decision::AlertType;
use mood_tracker::MoodEntry;
use std::fmt::Write;

const HOTLINES: [(&str, &str); 3] = [
	("Kaan Pete Roi Helpline", "09611-677678"),
	("Suicide Prevention Hotline Bangladesh", "01779554391"),
	("Moner Bondhu", "01833-334343"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertEmail {
	pub subject: String,
	pub html: String,
	pub text: String,
}

/// One evidence line, e.g. `03/06/2024: Sad (Intensity Level: 4)`.
pub fn format_entry_line(entry: &MoodEntry) -> String {
	let level = entry.mood_level.map_or_else(|| "unknown".to_string(), |level| level.to_string());
	format!("{}: {} (Intensity Level: {})", entry.date.format("%d/%m/%Y"), entry.mood_status, level)
}

pub fn render_alert_email(alert_type: AlertType, user_name: &str, entries: &[MoodEntry]) -> Option<AlertEmail> {
	let (concern, finding) = match alert_type {
		AlertType::None => return None,
		AlertType::NegativeMoodPattern => (
			"Prolonged Negative Mood Pattern",
			format!(
				"{user_name} has experienced 5 or more days of negative moods (Sad, Angry, Depressed, Stressed) with high intensity (level 3 or higher) in the past week."
			),
		),
		AlertType::SuddenNegativeShift => (
			"Sudden Negative Mood Shift",
			format!(
				"{user_name} had 3 or more consecutive days of positive/neutral moods, followed by a sudden shift to negative moods (Sad, Angry, Depressed, Stressed) with high intensity (level 3 or higher) for 3 or more consecutive days."
			),
		),
	};

	let subject = format!("Mindora Emergency Alert - {concern}");
	let lines: Vec<String> = entries.iter().map(format_entry_line).collect();

	let mut text = String::new();
	let _ = writeln!(text, "Dear Emergency Contact,\n");
	let _ = writeln!(text, "This is an automated alert from Mindora regarding {user_name}'s mental health status.\n");
	let _ = writeln!(text, "CONCERN DETECTED: {concern}\n");
	let _ = writeln!(text, "We have detected that {finding}\n");
	let _ = writeln!(text, "Recent mood pattern:");
	for line in &lines {
		let _ = writeln!(text, "- {line}");
	}
	let _ = writeln!(
		text,
		"\nPlease consider reaching out to {user_name} to check on their wellbeing. You can also book therapy appointments for {user_name} through Mindora.\n"
	);
	let _ = writeln!(text, "For immediate mental health crisis support in Bangladesh:");
	for (name, number) in HOTLINES {
		let _ = writeln!(text, "- {name}: {number}");
	}
	let _ = write!(text, "\nBest regards,\nMindora Mental Health Team");

	let name = escape_html(user_name);
	let mut html = String::from(r#"<div style="font-family: Arial, sans-serif; color: #000000; line-height: 1.6; max-width: 600px;">"#);
	let _ = write!(html, "<p>Dear Emergency Contact,</p>");
	let _ = write!(
		html,
		"<p>This is an automated alert from <strong><em>Mindora</em></strong> regarding <strong>{name}</strong>'s mental health status.</p>"
	);
	let _ = write!(html, "<p><strong>CONCERN DETECTED: {concern}</strong></p>");
	let _ = write!(html, "<p>We have detected that {}</p>", escape_html(&finding));
	let _ = write!(html, "<p><strong>Recent mood pattern:</strong></p><ul>");
	for line in &lines {
		let _ = write!(html, "<li>{}</li>", escape_html(line));
	}
	let _ = write!(html, "</ul>");
	let _ = write!(
		html,
		"<p>Please consider reaching out to <strong>{name}</strong> to check on their wellbeing. You can also book therapy appointments for <strong>{name}</strong> through <strong><em>Mindora</em></strong>.</p>"
	);
	let _ = write!(html, "<p><strong>For immediate mental health crisis support in Bangladesh:</strong></p><ul>");
	for (hotline, number) in HOTLINES {
		let _ = write!(html, "<li>{hotline}: {number}</li>");
	}
	let _ = write!(html, "</ul><p>Best regards,<br><strong><em>Mindora</em></strong> Mental Health Team</p></div>");

	Some(AlertEmail { subject, html, text })
}

fn escape_html(raw: &str) -> String {
	let mut out = String::with_capacity(raw.len());
	for c in raw.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&#39;"),
			_ => out.push(c),
		}
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::NaiveDate;

	fn entries() -> Vec<MoodEntry> {
		vec![
			MoodEntry::new(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(), "Sad", 4),
			MoodEntry {
				mood_level: None,
				..MoodEntry::new(NaiveDate::from_ymd_opt(2024, 6, 14).unwrap(), "Angry", 0)
			},
		]
	}

	#[test]
	fn test_entry_line_format() {
		let entries = entries();
		assert_eq!(format_entry_line(&entries[0]), "03/06/2024: Sad (Intensity Level: 4)");
		assert_eq!(format_entry_line(&entries[1]), "14/06/2024: Angry (Intensity Level: unknown)");
	}

	#[test]
	fn test_no_email_without_alert() {
		assert!(render_alert_email(AlertType::None, "Rafi", &entries()).is_none());
	}

	#[test]
	fn test_subject_differs_per_alert_type() {
		let pattern = render_alert_email(AlertType::NegativeMoodPattern, "Rafi", &entries()).unwrap();
		let shift = render_alert_email(AlertType::SuddenNegativeShift, "Rafi", &entries()).unwrap();

		assert_eq!(pattern.subject, "Mindora Emergency Alert - Prolonged Negative Mood Pattern");
		assert_eq!(shift.subject, "Mindora Emergency Alert - Sudden Negative Mood Shift");
	}

	#[test]
	fn test_body_lists_evidence_and_hotlines() {
		let email = render_alert_email(AlertType::NegativeMoodPattern, "Rafi", &entries()).unwrap();

		assert!(email.text.contains("- 03/06/2024: Sad (Intensity Level: 4)"));
		assert!(email.html.contains("<li>03/06/2024: Sad (Intensity Level: 4)</li>"));
		assert!(email.text.contains("Kaan Pete Roi Helpline: 09611-677678"));
		assert!(email.html.contains("Moner Bondhu: 01833-334343"));
	}

	#[test]
	fn test_user_name_is_escaped_in_html() {
		let email = render_alert_email(AlertType::NegativeMoodPattern, "<b>Rafi</b>", &entries()).unwrap();

		assert!(!email.html.contains("<b>Rafi</b>"));
		assert!(email.html.contains("&lt;b&gt;Rafi&lt;/b&gt;"));
	}
}
