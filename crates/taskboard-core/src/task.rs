use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use taskboard_shared::{DEFAULT_PRIORITY, TaskDto, TaskStatus};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    pub status: TaskStatus,

    #[serde(default = "default_priority")]
    pub priority: u8,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    #[serde(default)]
    pub due_date: Option<String>,
}

impl Task {
    pub fn new(title: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            description: None,
            status: TaskStatus::Todo,
            priority: DEFAULT_PRIORITY,
            created_at: now,
            updated_at: now,
            due_date: None,
        }
    }

    pub fn to_dto(&self) -> TaskDto {
        TaskDto {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
            priority: self.priority,
            created_at: format_timestamp(self.created_at),
            updated_at: format_timestamp(self.updated_at),
            due_date: self.due_date.clone(),
        }
    }
}

fn default_priority() -> u8 {
    DEFAULT_PRIORITY
}

fn format_timestamp(stamp: DateTime<Utc>) -> String {
    stamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn new_tasks_start_as_todo_with_default_priority() {
        let now = Utc::now();
        let task = Task::new("Write spec".to_string(), now);
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.priority, DEFAULT_PRIORITY);
        assert_eq!(task.created_at, task.updated_at);
        assert!(Uuid::parse_str(&task.id).is_ok());
    }

    #[test]
    fn dto_timestamps_use_utc_suffix() {
        let now = Utc
            .with_ymd_and_hms(2026, 10, 18, 9, 30, 0)
            .single()
            .expect("valid timestamp");
        let dto = Task::new("t".to_string(), now).to_dto();
        assert_eq!(dto.created_at, "2026-10-18T09:30:00.000000Z");
    }
}
