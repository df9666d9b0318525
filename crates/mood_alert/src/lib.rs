//! Emergency-alert rules over a user's recent mood history.
//!
//! [`MoodPatternAnalyzer`] decides whether the emergency contact should be
//! told; [`EmergencyNotifier`] is the seam the server plugs a mail transport into.

pub mod analyzer;
pub mod decision;
pub mod notifier;
pub mod template;

pub use analyzer::{is_high_intensity_negative, is_negative_status, MoodPatternAnalyzer, SuddenShiftRule, NEGATIVE_MOODS};
pub use decision::{AlertType, EmergencyAlertDecision};
pub use mood_tracker::MoodEntry;
pub use notifier::{EmergencyAlert, EmergencyNotifier, NotifyError};
pub use template::{format_entry_line, render_alert_email, AlertEmail};
