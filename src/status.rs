//! Elapsed-time display and urgency classification.

use crate::types::Task;

const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_DAY: i64 = 86_400_000;

/// Display-only urgency classification for not-yet-done tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Urgency {
    #[default]
    None,
    /// Open for 2-3 whole days.
    Warn,
    /// Open for 4 or more whole days.
    Late,
}

impl Urgency {
    /// CSS class used by the task table row.
    pub fn css_class(&self) -> &'static str {
        match self {
            Urgency::None => "",
            Urgency::Warn => "warn",
            Urgency::Late => "late",
        }
    }
}

/// Computed display state for one task row.
#[derive(Debug, Clone)]
pub struct TaskStatus {
    pub text: String,
    pub urgency: Urgency,
}

impl TaskStatus {
    /// Derive the status line and urgency for a task at time `now_ms`.
    ///
    /// The duration reference is `end_dt` when set, otherwise `now_ms`;
    /// negative durations (clock skew) clamp to zero.
    pub fn compute(task: &Task, now_ms: i64) -> Self {
        let reference = task.end_dt.unwrap_or(now_ms);
        let duration = (reference - task.start_dt).max(0);

        let days = duration / MS_PER_DAY;
        let hours = (duration % MS_PER_DAY) / MS_PER_HOUR;

        if task.done {
            return TaskStatus {
                text: format!("took {} days {} hours", days, hours),
                urgency: Urgency::None,
            };
        }

        let text = if days == 0 {
            "Today".to_string()
        } else {
            format!("{} days {} hours elapsed", days, hours)
        };

        let urgency = if days >= 4 {
            Urgency::Late
        } else if days >= 2 {
            Urgency::Warn
        } else {
            Urgency::None
        };

        TaskStatus { text, urgency }
    }
}
