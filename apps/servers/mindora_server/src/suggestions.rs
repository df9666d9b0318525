use async_trait::async_trait;
use chrono::{DateTime, Days, Duration as ChronoDuration, FixedOffset, NaiveDate, Timelike, Utc};
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::instrument;

static TIME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-1]?[0-9]|2[0-3]):[0-5][0-9]$").unwrap());

const MAX_SUGGESTIONS: usize = 3;
const TITLE_LIMIT: usize = 50;
const DESCRIPTION_LIMIT: usize = 150;
const DEFAULT_DURATION: i64 = 30;
const DEFAULT_TIME: &str = "12:00";

#[derive(Debug, thiserror::Error)]
pub enum SuggestionError {
	#[error("no generative AI key configured")]
	NotConfigured,

	#[error("request failed: {0}")]
	RequestFailed(#[from] reqwest::Error),

	#[error("API error {0}: {1}")]
	Api(u16, String),

	#[error("unusable suggestion response: {0}")]
	Malformed(String),
}

#[async_trait]
pub trait TaskSuggester: Send + Sync + 'static {
	/// Raw model output for `prompt`.
	async fn generate(&self, prompt: &str) -> Result<String, SuggestionError>;
}

pub struct GeminiSuggester {
	client: Client,
	base_url: String,
	model: String,
	api_key: Option<String>,
}

impl GeminiSuggester {
	pub fn new(base_url: String, model: String, api_key: Option<String>, timeout: Duration) -> Result<Self, SuggestionError> {
		let client = Client::builder().timeout(timeout).build()?;

		Ok(Self {
			client,
			base_url: base_url.trim_end_matches('/').to_string(),
			model,
			api_key: api_key.filter(|key| !key.trim().is_empty()),
		})
	}
}

#[derive(Deserialize)]
struct GenerateResponse {
	#[serde(default)]
	candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
	content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
	#[serde(default)]
	parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
	text: Option<String>,
}

#[async_trait]
impl TaskSuggester for GeminiSuggester {
	#[instrument(name = "generate_suggestions", skip_all, fields(model = %self.model))]
	async fn generate(&self, prompt: &str) -> Result<String, SuggestionError> {
		let api_key = self.api_key.as_deref().ok_or(SuggestionError::NotConfigured)?;
		let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

		let response = self
			.client
			.post(url)
			.query(&[("key", api_key)])
			.json(&json!({ "contents": [{ "parts": [{ "text": prompt }] }] }))
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
			return Err(SuggestionError::Api(status.as_u16(), error_text));
		}

		let body: GenerateResponse = response.json().await?;
		let text: String = body
			.candidates
			.into_iter()
			.next()
			.and_then(|candidate| candidate.content)
			.map(|content| content.parts.into_iter().filter_map(|part| part.text).collect())
			.unwrap_or_default();

		if text.trim().is_empty() {
			return Err(SuggestionError::Malformed("empty candidate".to_string()));
		}
		Ok(text)
	}
}

#[derive(Debug, Clone, Serialize)]
pub struct MoodSnapshot {
	pub mood_status: String,
	pub mood_level: Option<i64>,
	pub reason: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StressSnapshot {
	pub stress_level: i64,
	pub cause: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SleepSnapshot {
	pub sleep_hours: f64,
}

/// Latest mood, stress and sleep readings for one user.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WellnessSnapshot {
	pub mood: Option<MoodSnapshot>,
	pub stress: Option<StressSnapshot>,
	pub sleep: Option<SleepSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
	Now,
	Today,
	ThisWeek,
}

impl Urgency {
	fn parse(raw: Option<&str>) -> Self {
		match raw {
			Some("now") => Self::Now,
			Some("this_week") => Self::ThisWeek,
			_ => Self::Today,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestedTask {
	pub id: String,
	pub title: String,
	pub description: String,
	pub priority: String,
	pub estimated_duration: i64,
	#[serde(rename = "dueDate")]
	pub due_date: DateTime<Utc>,
	#[serde(rename = "createdAt")]
	pub created_at: DateTime<Utc>,
	pub suggested_time: String,
	pub urgency: Urgency,
}

pub fn wellness_prompt(snapshot: &WellnessSnapshot, now: DateTime<FixedOffset>) -> String {
	let mood = snapshot.mood.as_ref().map_or_else(
		|| "No recent mood data".to_string(),
		|mood| {
			let level = mood.mood_level.map_or_else(|| "unknown".to_string(), |level| level.to_string());
			let mut line = format!("{} (level: {level}/10)", mood.mood_status);
			if !mood.reason.is_empty() {
				line.push_str(&format!(", reason: {}", mood.reason.join(", ")));
			}
			line
		},
	);

	let stress = snapshot.stress.as_ref().map_or_else(
		|| "No recent stress data".to_string(),
		|stress| match &stress.cause {
			Some(cause) => format!("Level {}/10, cause: {cause}", stress.stress_level),
			None => format!("Level {}/10", stress.stress_level),
		},
	);

	let sleep = snapshot.sleep.as_ref().map_or_else(|| "No recent sleep data".to_string(), |sleep| format!("{} hours", sleep.sleep_hours));

	format!(
		r#"You are a wellness assistant. Based on the user's recent wellness data, suggest exactly 3 actionable tasks that would help improve their mental and physical well-being.

Current wellness status:
- Mood: {mood}
- Stress: {stress}
- Sleep: {sleep}

Please provide exactly 3 task suggestions in JSON format with the following structure:
{{
  "tasks": [
    {{
      "title": "Brief, actionable task title (max 50 characters)",
      "description": "Detailed explanation of the task and its benefits (max 150 characters)",
      "priority": "low|medium|high",
      "estimated_duration": "Duration in minutes as number (e.g., 15, 30, 60)",
      "suggested_time": "Best time to do this task in 24hr format (e.g., '09:00', '14:30', '20:00')",
      "urgency": "when this should be done: 'now', 'today', 'this_week'"
    }}
  ]
}}

Guidelines:
- Tasks should be specific, actionable, and contextually appropriate
- For low mood: suggest mood-boosting activities (morning/afternoon preferred)
- For high stress: suggest immediate stress-relief activities (suggest 'now' or 'today')
- For poor sleep: suggest sleep hygiene tasks for evening (18:00-22:00)
- Each task should take between 5-60 minutes
- Set urgency: high stress 'now', low mood 'today', sleep issues 'today' (evening), general wellness 'this_week'
- Avoid suggesting medication or medical advice
- Focus on behavioral and lifestyle interventions

Current time context: {} (use this to suggest appropriate timing)

Return ONLY the JSON response, no additional text."#,
		now.format("%H:%M:%S")
	)
}

/// Validates model output into at most three tasks. Any task without a title
/// or description rejects the whole response.
pub fn parse_suggestions<R: Rng>(raw: &str, now: DateTime<FixedOffset>, rng: &mut R) -> Result<Vec<SuggestedTask>, SuggestionError> {
	let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) else {
		return Err(SuggestionError::Malformed("no JSON object in response".to_string()));
	};
	if end < start {
		return Err(SuggestionError::Malformed("no JSON object in response".to_string()));
	}

	let parsed: Value = serde_json::from_str(&raw[start..=end]).map_err(|e| SuggestionError::Malformed(e.to_string()))?;
	let tasks = parsed.get("tasks").and_then(Value::as_array).ok_or_else(|| SuggestionError::Malformed("missing tasks array".to_string()))?;

	let created_at = now.with_timezone(&Utc);
	let millis = now.timestamp_millis();

	tasks
		.iter()
		.take(MAX_SUGGESTIONS)
		.enumerate()
		.map(|(index, task)| {
			let text = |key: &str| task.get(key).and_then(Value::as_str).filter(|value| !value.is_empty());
			let (Some(title), Some(description)) = (text("title"), text("description")) else {
				return Err(SuggestionError::Malformed(format!("task {} missing required fields", index + 1)));
			};

			let priority = match text("priority") {
				Some(priority @ ("low" | "medium" | "high")) => priority,
				_ => "medium",
			};
			let estimated_duration = parse_minutes(task.get("estimated_duration")).filter(|minutes| (5..=120).contains(minutes)).unwrap_or(DEFAULT_DURATION);
			let suggested_time = text("suggested_time").filter(|time| TIME_PATTERN.is_match(time)).unwrap_or(DEFAULT_TIME);
			let urgency = Urgency::parse(text("urgency"));

			Ok(SuggestedTask {
				id: format!("suggestion_{millis}_{index}"),
				title: clip(title, TITLE_LIMIT),
				description: clip(description, DESCRIPTION_LIMIT),
				priority: priority.to_string(),
				estimated_duration,
				due_date: due_date(urgency, suggested_time, now, rng),
				created_at,
				suggested_time: suggested_time.to_string(),
				urgency,
			})
		})
		.collect()
}

/// The fixed set returned whenever the model cannot be used.
pub fn fallback_suggestions<R: Rng>(now: DateTime<FixedOffset>, rng: &mut R) -> Vec<SuggestedTask> {
	let hour = now.hour();
	let walk_time = if hour < 17 { format!("{}:00", (hour + 1).max(8)) } else { "18:00".to_string() };
	let breathing_time = format!("{}:00", (hour + 1).min(23));
	let (gratitude_time, gratitude_urgency) = if hour < 21 { ("21:00", Urgency::Today) } else { ("09:00", Urgency::ThisWeek) };

	let created_at = now.with_timezone(&Utc);
	let millis = now.timestamp_millis();
	let task = |n: u8, title: &str, description: &str, priority: &str, minutes: i64, time: &str, urgency: Urgency, due: DateTime<Utc>| SuggestedTask {
		id: format!("fallback_{millis}_{n}"),
		title: title.to_string(),
		description: description.to_string(),
		priority: priority.to_string(),
		estimated_duration: minutes,
		due_date: due,
		created_at,
		suggested_time: time.to_string(),
		urgency,
	};

	vec![
		task(
			1,
			"Take a 10-minute mindful walk",
			"Step outside and focus on your breathing and surroundings to reduce stress and improve mood",
			"medium",
			10,
			walk_time.as_str(),
			Urgency::Today,
			due_date(Urgency::Today, &walk_time, now, rng),
		),
		task(
			2,
			"Practice deep breathing for 5 minutes",
			"Use the 4-7-8 breathing technique to calm your mind and reduce anxiety",
			"high",
			5,
			breathing_time.as_str(),
			Urgency::Now,
			due_date(Urgency::Now, &breathing_time, now, rng),
		),
		task(
			3,
			"Write 3 things you're grateful for",
			"Reflect on positive aspects of your day to boost mood and mental well-being",
			"low",
			10,
			gratitude_time,
			gratitude_urgency,
			due_date(gratitude_urgency, gratitude_time, now, rng),
		),
	]
}

/// `now` is due in 30 minutes, `today` at the suggested time (tomorrow once it
/// has passed), `this_week` at the suggested time one to three days out.
pub fn due_date<R: Rng>(urgency: Urgency, suggested_time: &str, now: DateTime<FixedOffset>, rng: &mut R) -> DateTime<Utc> {
	let due = match urgency {
		Urgency::Now => Some(now + ChronoDuration::minutes(30)),
		Urgency::Today => at_time(now.date_naive(), suggested_time, now).map(|today| if today <= now { today + ChronoDuration::days(1) } else { today }),
		Urgency::ThisWeek => now
			.date_naive()
			.checked_add_days(Days::new(rng.gen_range(1..=3)))
			.and_then(|day| at_time(day, suggested_time, now)),
	};

	due.unwrap_or(now + ChronoDuration::minutes(30)).with_timezone(&Utc)
}

fn at_time(day: NaiveDate, time: &str, now: DateTime<FixedOffset>) -> Option<DateTime<FixedOffset>> {
	let (hours, minutes) = time.split_once(':')?;
	day.and_hms_opt(hours.parse().ok()?, minutes.parse().ok()?, 0)?.and_local_timezone(*now.offset()).single()
}

// Leading integer, the way a lenient client would read "15 minutes".
fn parse_minutes(value: Option<&Value>) -> Option<i64> {
	match value? {
		#[allow(clippy::cast_possible_truncation)]
		Value::Number(number) => number.as_i64().or_else(|| number.as_f64().map(|f| f.trunc() as i64)),
		Value::String(text) => {
			let text = text.trim_start();
			let len = text.chars().enumerate().take_while(|(i, c)| c.is_ascii_digit() || (*i == 0 && (*c == '-' || *c == '+'))).count();
			text[..len].parse().ok()
		}
		_ => None,
	}
}

fn clip(text: &str, limit: usize) -> String {
	if text.chars().count() > limit {
		let mut clipped: String = text.chars().take(limit - 3).collect();
		clipped.push_str("...");
		clipped
	} else {
		text.to_string()
	}
}

/// Asks the suggester and falls back to the fixed set on any failure.
pub async fn suggest_tasks(suggester: &dyn TaskSuggester, snapshot: &WellnessSnapshot, now: DateTime<FixedOffset>) -> Vec<SuggestedTask> {
	let raw = suggester.generate(&wellness_prompt(snapshot, now)).await;

	let mut rng = rand::thread_rng();
	match raw.and_then(|raw| parse_suggestions(&raw, now, &mut rng)) {
		Ok(tasks) => tasks,
		Err(e) => {
			tracing::warn!(error = %e, "using fallback task suggestions");
			fallback_suggestions(now, &mut rng)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::rngs::StdRng;
	use rand::SeedableRng;

	fn at(hour: u32, minute: u32) -> DateTime<FixedOffset> {
		NaiveDate::from_ymd_opt(2024, 6, 3)
			.unwrap()
			.and_hms_opt(hour, minute, 0)
			.unwrap()
			.and_local_timezone(FixedOffset::east_opt(6 * 3600).unwrap())
			.unwrap()
	}

	fn rng() -> StdRng {
		StdRng::seed_from_u64(7)
	}

	fn local(due: DateTime<Utc>) -> DateTime<FixedOffset> {
		due.with_timezone(&FixedOffset::east_opt(6 * 3600).unwrap())
	}

	#[test]
	fn test_valid_response_inside_prose() {
		let raw = r#"Sure! ```json
{"tasks": [{"title": "Stretch", "description": "Loosen up", "priority": "high", "estimated_duration": 15, "suggested_time": "18:30", "urgency": "today"}]}
```"#;

		let tasks = parse_suggestions(raw, at(10, 0), &mut rng()).unwrap();

		assert_eq!(tasks.len(), 1);
		assert_eq!(tasks[0].priority, "high");
		assert_eq!(tasks[0].estimated_duration, 15);
		assert_eq!(local(tasks[0].due_date), at(18, 30));
		assert!(tasks[0].id.starts_with("suggestion_"));
	}

	#[test]
	fn test_fields_fall_back_to_defaults() {
		let raw = r#"{"tasks": [
			{"title": "A", "description": "a", "priority": "urgent", "estimated_duration": "200", "suggested_time": "25:00", "urgency": "later"},
			{"title": "B", "description": "b", "estimated_duration": "15 minutes", "suggested_time": "7:05", "urgency": "now"},
			{"title": "C", "description": "c", "estimated_duration": "soon"},
			{"title": "D", "description": "d"}
		]}"#;

		let tasks = parse_suggestions(raw, at(10, 0), &mut rng()).unwrap();

		assert_eq!(tasks.len(), 3);
		assert_eq!(tasks[0].priority, "medium");
		assert_eq!(tasks[0].estimated_duration, 30);
		assert_eq!(tasks[0].suggested_time, "12:00");
		assert_eq!(tasks[0].urgency, Urgency::Today);
		assert_eq!(tasks[1].estimated_duration, 15);
		assert_eq!(tasks[1].suggested_time, "7:05");
		assert_eq!(local(tasks[1].due_date), at(10, 30));
		assert_eq!(tasks[2].estimated_duration, 30);
	}

	#[test]
	fn test_missing_description_rejects_everything() {
		let raw = r#"{"tasks": [{"title": "A", "description": "a"}, {"title": "B"}]}"#;
		assert!(matches!(parse_suggestions(raw, at(10, 0), &mut rng()), Err(SuggestionError::Malformed(_))));
		assert!(parse_suggestions("no json here", at(10, 0), &mut rng()).is_err());
		assert!(parse_suggestions(r#"{"items": []}"#, at(10, 0), &mut rng()).is_err());
	}

	#[test]
	fn test_long_text_is_clipped() {
		let title = "t".repeat(60);
		let description = "d".repeat(151);
		let raw = json!({ "tasks": [{ "title": title, "description": description }] }).to_string();

		let task = &parse_suggestions(&raw, at(10, 0), &mut rng()).unwrap()[0];

		assert_eq!(task.title.chars().count(), 50);
		assert!(task.title.ends_with("..."));
		assert_eq!(task.description.chars().count(), 150);
		assert_eq!(clip("exactly fifty", 50), "exactly fifty");
	}

	#[test]
	fn test_due_dates() {
		let now = at(14, 0);

		assert_eq!(local(due_date(Urgency::Now, "09:00", now, &mut rng())), at(14, 30));
		assert_eq!(local(due_date(Urgency::Today, "16:00", now, &mut rng())), at(16, 0));
		assert_eq!(local(due_date(Urgency::Today, "14:00", now, &mut rng())), at(14, 0) + ChronoDuration::days(1));

		for _ in 0..20 {
			let due = local(due_date(Urgency::ThisWeek, "08:15", now, &mut rand::thread_rng()));
			let days_out = (due.date_naive() - now.date_naive()).num_days();
			assert!((1..=3).contains(&days_out));
			assert_eq!((due.hour(), due.minute()), (8, 15));
		}
	}

	#[test]
	fn test_fallback_set_follows_the_clock() {
		let morning = fallback_suggestions(at(10, 0), &mut rng());
		assert_eq!(morning.len(), 3);
		assert_eq!(morning[0].suggested_time, "11:00");
		assert_eq!(morning[1].suggested_time, "11:00");
		assert_eq!(morning[1].urgency, Urgency::Now);
		assert_eq!(morning[2].suggested_time, "21:00");
		assert_eq!(morning[2].urgency, Urgency::Today);

		let late = fallback_suggestions(at(22, 30), &mut rng());
		assert_eq!(late[0].suggested_time, "18:00");
		assert_eq!(late[1].suggested_time, "23:00");
		assert_eq!(late[2].suggested_time, "09:00");
		assert_eq!(late[2].urgency, Urgency::ThisWeek);
	}

	#[test]
	fn test_prompt_mentions_available_data() {
		let snapshot = WellnessSnapshot {
			mood: Some(MoodSnapshot {
				mood_status: "Sad".to_string(),
				mood_level: Some(4),
				reason: vec!["exams".to_string()],
			}),
			stress: None,
			sleep: Some(SleepSnapshot { sleep_hours: 5.5 }),
		};

		let prompt = wellness_prompt(&snapshot, at(9, 5));

		assert!(prompt.contains("- Mood: Sad (level: 4/10), reason: exams"));
		assert!(prompt.contains("- Stress: No recent stress data"));
		assert!(prompt.contains("- Sleep: 5.5 hours"));
		assert!(prompt.contains("Current time context: 09:05:00"));
	}
}
