use std::fmt;
use std::str::FromStr;

use chrono::{
  DateTime,
  NaiveDate
};
use serde::{
  Deserialize,
  Serialize
};

pub const TITLE_MAX_CHARS: usize = 200;
pub const DESCRIPTION_MAX_CHARS: usize =
  1000;
pub const PRIORITY_MIN: u8 = 1;
pub const PRIORITY_MAX: u8 = 5;
pub const DEFAULT_PRIORITY: u8 = 3;
pub const LIST_PAGE_SIZE: usize = 100;

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Hash,
)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(
  feature = "openapi",
  derive(utoipa::ToSchema)
)]
pub enum TaskStatus {
  #[default]
  Todo,
  InProgress,
  Done
}

impl TaskStatus {
  pub const ALL: [TaskStatus; 3] = [
    TaskStatus::Todo,
    TaskStatus::InProgress,
    TaskStatus::Done
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      | TaskStatus::Todo => "todo",
      | TaskStatus::InProgress => {
        "in_progress"
      }
      | TaskStatus::Done => "done"
    }
  }

  /// Text shown on a card's status
  /// badge.
  pub fn badge_label(
    self
  ) -> &'static str {
    match self {
      | TaskStatus::Todo => "Todo",
      | TaskStatus::InProgress => {
        "In Progress"
      }
      | TaskStatus::Done => "Done"
    }
  }

  /// Text shown in the status
  /// selector.
  pub fn option_label(
    self
  ) -> &'static str {
    match self {
      | TaskStatus::Todo => "To Do",
      | TaskStatus::InProgress => {
        "In Progress"
      }
      | TaskStatus::Done => "Done"
    }
  }
}

impl fmt::Display for TaskStatus {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  thiserror::Error,
)]
#[error(
  "Invalid status. Must be one of: \
   todo, in_progress, done"
)]
pub struct UnknownStatus(pub String);

impl FromStr for TaskStatus {
  type Err = UnknownStatus;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    match s {
      | "todo" => Ok(TaskStatus::Todo),
      | "in_progress" => {
        Ok(TaskStatus::InProgress)
      }
      | "done" => Ok(TaskStatus::Done),
      | other => {
        Err(UnknownStatus(
          other.to_string()
        ))
      }
    }
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Hash,
)]
pub enum StatusFilter {
  #[default]
  All,
  Todo,
  InProgress,
  Done
}

impl StatusFilter {
  pub const ALL: [StatusFilter; 4] = [
    StatusFilter::All,
    StatusFilter::Todo,
    StatusFilter::InProgress,
    StatusFilter::Done
  ];

  /// `None` means the list query is
  /// not scoped by status.
  pub fn status(
    self
  ) -> Option<TaskStatus> {
    match self {
      | StatusFilter::All => None,
      | StatusFilter::Todo => {
        Some(TaskStatus::Todo)
      }
      | StatusFilter::InProgress => {
        Some(TaskStatus::InProgress)
      }
      | StatusFilter::Done => {
        Some(TaskStatus::Done)
      }
    }
  }

  pub fn as_key(self) -> &'static str {
    self
      .status()
      .map(TaskStatus::as_str)
      .unwrap_or("all")
  }

  pub fn label(self) -> &'static str {
    match self {
      | StatusFilter::All => "All",
      | StatusFilter::Todo => "Todo",
      | StatusFilter::InProgress => {
        "In Progress"
      }
      | StatusFilter::Done => "Done"
    }
  }
}

impl From<TaskStatus> for StatusFilter {
  fn from(status: TaskStatus) -> Self {
    match status {
      | TaskStatus::Todo => {
        StatusFilter::Todo
      }
      | TaskStatus::InProgress => {
        StatusFilter::InProgress
      }
      | TaskStatus::Done => {
        StatusFilter::Done
      }
    }
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
#[cfg_attr(
  feature = "openapi",
  derive(utoipa::ToSchema)
)]
pub struct TaskDto {
  pub id:          String,
  #[serde(default)]
  pub title:       String,
  #[serde(default)]
  pub description: Option<String>,
  pub status:      TaskStatus,
  pub priority:    u8,
  #[serde(default)]
  pub created_at:  String,
  #[serde(default)]
  pub updated_at:  String,
  #[serde(default)]
  pub due_date:    Option<String>
}

impl TaskDto {
  pub fn description_text(
    &self
  ) -> Option<&str> {
    self
      .description
      .as_deref()
      .filter(|text| {
        !text.trim().is_empty()
      })
  }

  pub fn due_date_text(
    &self
  ) -> Option<&str> {
    self
      .due_date
      .as_deref()
      .filter(|text| {
        !text.trim().is_empty()
      })
  }

  pub fn priority_label(
    &self
  ) -> Option<&'static str> {
    priority_label(self.priority)
  }

  /// Patch for a status selector
  /// change. The selector always shows
  /// the stored status, so picking that
  /// same value or an unknown one
  /// yields nothing.
  pub fn status_change(
    &self,
    selected: &str
  ) -> Option<TaskPatch> {
    let status =
      selected.parse::<TaskStatus>().ok()?;
    (status != self.status)
      .then(|| TaskPatch::status(status))
  }
}

/// What the task form hands to the
/// controller. The title is already
/// trimmed and non-empty.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct NewTask {
  pub title:       String,
  pub description: String,
  pub priority:    u8,
  pub due_date:    String
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct CreateTaskBody {
  pub title:       String,
  pub description: Option<String>,
  pub priority:    u8,
  pub due_date:    Option<String>,
  pub status:      TaskStatus
}

impl From<NewTask> for CreateTaskBody {
  fn from(task: NewTask) -> Self {
    Self {
      title:       task.title,
      description: non_empty(
        task.description
      ),
      priority:    task.priority,
      due_date:    non_empty(
        task.due_date
      ),
      status:      TaskStatus::Todo
    }
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  Default,
  PartialEq,
)]
pub struct TaskPatch {
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub title:       Option<String>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub description: Option<String>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub status:      Option<TaskStatus>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub priority:    Option<u8>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub due_date:    Option<String>
}

impl TaskPatch {
  pub fn status(
    status: TaskStatus
  ) -> Self {
    Self {
      status: Some(status),
      ..Self::default()
    }
  }

  pub fn is_empty(&self) -> bool {
    self.title.is_none()
      && self.description.is_none()
      && self.status.is_none()
      && self.priority.is_none()
      && self.due_date.is_none()
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
)]
pub struct TaskStats {
  pub total:       usize,
  pub todo:        usize,
  pub in_progress: usize,
  pub done:        usize
}

impl TaskStats {
  pub fn from_tasks(
    tasks: &[TaskDto]
  ) -> Self {
    let mut stats = Self {
      total: tasks.len(),
      ..Self::default()
    };
    for task in tasks {
      match task.status {
        | TaskStatus::Todo => {
          stats.todo += 1
        }
        | TaskStatus::InProgress => {
          stats.in_progress += 1
        }
        | TaskStatus::Done => {
          stats.done += 1
        }
      }
    }
    stats
  }
}

pub fn priority_label(
  priority: u8
) -> Option<&'static str> {
  match priority {
    | 1 => Some("Low"),
    | 2 => Some("Low-Med"),
    | 3 => Some("Medium"),
    | 4 => Some("High"),
    | 5 => Some("Critical"),
    | _ => None
  }
}

/// Label used by the form's priority
/// select, e.g. `2 - Low-Medium`.
pub fn priority_option_label(
  priority: u8
) -> Option<String> {
  let name = match priority {
    | 1 => "Low",
    | 2 => "Low-Medium",
    | 3 => "Medium",
    | 4 => "High",
    | 5 => "Critical",
    | _ => return None
  };
  Some(format!("{priority} - {name}"))
}

pub fn is_valid_priority(
  priority: u8
) -> bool {
  (PRIORITY_MIN..=PRIORITY_MAX)
    .contains(&priority)
}

/// Renders a due date as `M/D/YYYY`.
/// Unparseable input is shown as-is.
pub fn format_due_date(
  raw: &str
) -> String {
  let trimmed = raw.trim();
  if let Ok(date) =
    NaiveDate::parse_from_str(
      trimmed, "%Y-%m-%d"
    )
  {
    return date
      .format("%-m/%-d/%Y")
      .to_string();
  }
  if let Ok(stamp) =
    DateTime::parse_from_rfc3339(
      trimmed
    )
  {
    return stamp
      .date_naive()
      .format("%-m/%-d/%Y")
      .to_string();
  }
  trimmed.to_string()
}

pub fn truncate_chars(
  value: &str,
  max: usize
) -> String {
  value.chars().take(max).collect()
}

fn non_empty(
  value: String
) -> Option<String> {
  if value.trim().is_empty() {
    None
  } else {
    Some(value)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample(
    id: &str,
    status: TaskStatus
  ) -> TaskDto {
    TaskDto {
      id: id.to_string(),
      title: format!("task {id}"),
      description: None,
      status,
      priority: DEFAULT_PRIORITY,
      created_at: String::new(),
      updated_at: String::new(),
      due_date: None
    }
  }

  #[test]
  fn status_wire_names_roundtrip() {
    for status in TaskStatus::ALL {
      let json = serde_json::to_string(
        &status
      )
      .expect("serialize status");
      assert_eq!(
        json,
        format!("\"{}\"", status.as_str())
      );
      assert_eq!(
        status
          .as_str()
          .parse::<TaskStatus>()
          .expect("parse status"),
        status
      );
    }
    assert!(
      "blocked"
        .parse::<TaskStatus>()
        .is_err()
    );
  }

  #[test]
  fn badge_labels_capitalize_and_special_case_in_progress(
  ) {
    assert_eq!(
      TaskStatus::Todo.badge_label(),
      "Todo"
    );
    assert_eq!(
      TaskStatus::InProgress
        .badge_label(),
      "In Progress"
    );
    assert_eq!(
      TaskStatus::Done.badge_label(),
      "Done"
    );
  }

  #[test]
  fn priority_labels_cover_one_to_five_only(
  ) {
    let labels: Vec<_> = (1..=5)
      .map(|p| {
        priority_label(p)
          .expect("label in range")
      })
      .collect();
    assert_eq!(
      labels,
      vec![
        "Low", "Low-Med", "Medium",
        "High", "Critical"
      ]
    );
    assert_eq!(priority_label(0), None);
    assert_eq!(priority_label(6), None);
    assert_eq!(
      priority_option_label(2)
        .as_deref(),
      Some("2 - Low-Medium")
    );
  }

  #[test]
  fn stats_partition_the_collection() {
    let tasks = vec![
      sample("a", TaskStatus::Todo),
      sample("b", TaskStatus::Done),
      sample("c", TaskStatus::InProgress),
      sample("d", TaskStatus::Todo),
      sample("e", TaskStatus::Done),
    ];
    let stats =
      TaskStats::from_tasks(&tasks);
    assert_eq!(stats.total, 5);
    assert_eq!(stats.todo, 2);
    assert_eq!(stats.in_progress, 1);
    assert_eq!(stats.done, 2);
    assert_eq!(
      stats.todo
        + stats.in_progress
        + stats.done,
      stats.total
    );
    assert_eq!(
      TaskStats::from_tasks(&[]),
      TaskStats::default()
    );
  }

  #[test]
  fn create_body_forces_todo_and_nulls_blank_fields(
  ) {
    let body =
      CreateTaskBody::from(NewTask {
        title:       "Write spec"
          .to_string(),
        description: String::new(),
        priority:    3,
        due_date:    String::new()
      });
    let json = serde_json::to_value(
      &body
    )
    .expect("serialize body");
    assert_eq!(
      json,
      serde_json::json!({
        "title": "Write spec",
        "description": null,
        "priority": 3,
        "due_date": null,
        "status": "todo"
      })
    );
  }

  #[test]
  fn patch_omits_absent_fields() {
    let json = serde_json::to_value(
      TaskPatch::status(
        TaskStatus::Done
      )
    )
    .expect("serialize patch");
    assert_eq!(
      json,
      serde_json::json!({ "status": "done" })
    );
    assert!(
      TaskPatch::default().is_empty()
    );
  }

  #[test]
  fn task_dto_tolerates_missing_optional_fields(
  ) {
    let task: TaskDto =
      serde_json::from_str(
        r#"{"id":"1","title":"t","status":"in_progress","priority":4}"#
      )
      .expect("decode task");
    assert_eq!(
      task.status,
      TaskStatus::InProgress
    );
    assert_eq!(
      task.description_text(),
      None
    );
    assert_eq!(
      task.priority_label(),
      Some("High")
    );
  }

  #[test]
  fn due_dates_render_as_month_day_year(
  ) {
    assert_eq!(
      format_due_date("2026-03-07"),
      "3/7/2026"
    );
    assert_eq!(
      format_due_date(
        "2026-12-24T10:00:00Z"
      ),
      "12/24/2026"
    );
    assert_eq!(
      format_due_date("someday"),
      "someday"
    );
  }

  #[test]
  fn status_change_only_for_a_different_known_status(
  ) {
    let task =
      sample("a", TaskStatus::Todo);
    assert_eq!(
      task.status_change("done"),
      Some(TaskPatch::status(
        TaskStatus::Done
      ))
    );
    assert_eq!(
      task.status_change("todo"),
      None
    );
    assert_eq!(
      task.status_change("blocked"),
      None
    );
  }

  #[test]
  fn filter_maps_to_optional_status() {
    assert_eq!(
      StatusFilter::All.status(),
      None
    );
    assert_eq!(
      StatusFilter::InProgress.as_key(),
      "in_progress"
    );
    assert_eq!(
      StatusFilter::from(
        TaskStatus::Done
      ),
      StatusFilter::Done
    );
  }
}
