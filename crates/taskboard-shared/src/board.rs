//! State owned by the root controller:
//! the fetched task collection, the
//! loading and error flags, and the
//! active status filter.
//!
//! The board never performs I/O. The
//! UI feeds it [`BoardAction`]s as
//! requests start and settle, and
//! re-runs the list fetch whenever
//! [`Board::refresh_key`] changes.

use crate::request::{
  ApiRequest,
  RequestError
};
use crate::task::{
  StatusFilter,
  TaskDto,
  TaskStats
};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Operation {
  Fetch,
  Create,
  Update,
  Delete
}

impl Operation {
  pub fn fallback_message(
    self
  ) -> &'static str {
    match self {
      | Operation::Fetch => {
        "Failed to fetch tasks"
      }
      | Operation::Create => {
        "Failed to create task"
      }
      | Operation::Update => {
        "Failed to update task"
      }
      | Operation::Delete => {
        "Failed to delete task"
      }
    }
  }

  /// Banner text for a failed call. A
  /// bare non-success status gets the
  /// fixed message; anything carrying
  /// a detail appends it.
  pub fn failure_message(
    self,
    err: &RequestError
  ) -> String {
    let fallback =
      self.fallback_message();
    match err {
      | RequestError::Status(_) => {
        fallback.to_string()
      }
      | RequestError::Transport(detail)
      | RequestError::Decode(detail)
      | RequestError::Encode(detail) => {
        if detail.trim().is_empty() {
          fallback.to_string()
        } else {
          format!("{fallback}: {detail}")
        }
      }
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoardAction {
  SelectFilter(StatusFilter),
  RefreshStarted,
  RefreshFinished(
    Result<Vec<TaskDto>, RequestError>
  ),
  MutationFinished(
    Operation,
    Result<(), RequestError>
  )
}

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
  tasks:        Vec<TaskDto>,
  loading:      bool,
  error:        Option<String>,
  filter:       StatusFilter,
  refresh_tick: u64
}

impl Default for Board {
  fn default() -> Self {
    Self {
      tasks:        Vec::new(),
      loading:      true,
      error:        None,
      filter:       StatusFilter::All,
      refresh_tick: 0
    }
  }
}

impl Board {
  pub fn tasks(&self) -> &[TaskDto] {
    &self.tasks
  }

  pub fn loading(&self) -> bool {
    self.loading
  }

  pub fn error(&self) -> Option<&str> {
    self.error.as_deref()
  }

  pub fn filter(&self) -> StatusFilter {
    self.filter
  }

  pub fn stats(&self) -> TaskStats {
    TaskStats::from_tasks(&self.tasks)
  }

  /// Changes exactly when a new list
  /// fetch is due: on a filter switch
  /// or after a successful mutation.
  pub fn refresh_key(
    &self
  ) -> (StatusFilter, u64) {
    (self.filter, self.refresh_tick)
  }

  pub fn list_request(
    &self,
    base: &str
  ) -> ApiRequest {
    ApiRequest::list(base, self.filter)
  }

  pub fn apply(
    &mut self,
    action: BoardAction
  ) {
    match action {
      | BoardAction::SelectFilter(
        filter
      ) => {
        self.filter = filter;
      }
      | BoardAction::RefreshStarted => {
        self.loading = true;
      }
      | BoardAction::RefreshFinished(
        result
      ) => {
        match result {
          | Ok(tasks) => {
            self.tasks = tasks;
            self.error = None;
          }
          | Err(err) => {
            self.error = Some(
              Operation::Fetch
                .failure_message(&err)
            );
          }
        }
        self.loading = false;
      }
      | BoardAction::MutationFinished(
        operation,
        result
      ) => {
        match result {
          | Ok(()) => {
            self.refresh_tick = self
              .refresh_tick
              .wrapping_add(1);
          }
          | Err(err) => {
            self.error = Some(
              operation
                .failure_message(&err)
            );
          }
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::task::{
    DEFAULT_PRIORITY,
    TaskStatus
  };

  fn task(
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

  fn loaded(
    tasks: Vec<TaskDto>
  ) -> Board {
    let mut board = Board::default();
    board.apply(
      BoardAction::RefreshFinished(Ok(
        tasks
      ))
    );
    board
  }

  #[test]
  fn starts_loading_with_all_filter() {
    let board = Board::default();
    assert!(board.loading());
    assert_eq!(
      board.filter(),
      StatusFilter::All
    );
    assert!(board.tasks().is_empty());
    assert_eq!(
      board
        .list_request("http://h")
        .url,
      "http://h/items?limit=100"
    );
  }

  #[test]
  fn successful_refresh_replaces_tasks_and_clears_error(
  ) {
    let mut board = Board::default();
    board.apply(
      BoardAction::MutationFinished(
        Operation::Update,
        Err(RequestError::Status(500))
      )
    );
    assert!(board.error().is_some());

    board.apply(
      BoardAction::RefreshStarted
    );
    board.apply(
      BoardAction::RefreshFinished(Ok(
        vec![task(
          "1",
          TaskStatus::Todo
        )]
      ))
    );
    assert!(!board.loading());
    assert_eq!(board.error(), None);
    assert_eq!(board.tasks().len(), 1);
  }

  #[test]
  fn failed_refresh_keeps_tasks_and_stops_loading(
  ) {
    let mut board = loaded(vec![
      task("1", TaskStatus::Todo),
    ]);
    board.apply(
      BoardAction::RefreshStarted
    );
    board.apply(
      BoardAction::RefreshFinished(
        Err(RequestError::Status(503))
      )
    );
    assert!(!board.loading());
    assert_eq!(
      board.error(),
      Some("Failed to fetch tasks")
    );
    assert_eq!(board.tasks().len(), 1);
  }

  #[test]
  fn transport_failures_carry_detail() {
    let mut board = Board::default();
    board.apply(
      BoardAction::RefreshFinished(
        Err(RequestError::Transport(
          "connection refused"
            .to_string()
        ))
      )
    );
    assert_eq!(
      board.error(),
      Some(
        "Failed to fetch tasks: \
         connection refused"
      )
    );
  }

  #[test]
  fn filter_change_moves_refresh_key_once(
  ) {
    let mut board = loaded(vec![]);
    let before = board.refresh_key();

    board.apply(
      BoardAction::SelectFilter(
        StatusFilter::Done
      )
    );
    let after = board.refresh_key();
    assert_ne!(before, after);
    assert_eq!(
      board
        .list_request("http://h")
        .url,
      "http://h/items?status=done&limit=100"
    );

    board.apply(
      BoardAction::SelectFilter(
        StatusFilter::Done
      )
    );
    assert_eq!(
      board.refresh_key(),
      after
    );

    board.apply(
      BoardAction::SelectFilter(
        StatusFilter::All
      )
    );
    assert!(
      !board
        .list_request("http://h")
        .url
        .contains("status=")
    );
  }

  #[test]
  fn only_successful_mutations_request_refresh(
  ) {
    let mut board = loaded(vec![
      task("1", TaskStatus::Todo),
    ]);
    let key = board.refresh_key();

    board.apply(
      BoardAction::MutationFinished(
        Operation::Create,
        Err(RequestError::Status(422))
      )
    );
    assert_eq!(board.refresh_key(), key);
    assert_eq!(
      board.error(),
      Some("Failed to create task")
    );

    board.apply(
      BoardAction::MutationFinished(
        Operation::Create,
        Ok(())
      )
    );
    assert_ne!(board.refresh_key(), key);
  }

  #[test]
  fn failed_delete_leaves_list_untouched(
  ) {
    let tasks = vec![
      task("1", TaskStatus::Todo),
      task("2", TaskStatus::Done),
    ];
    let mut board =
      loaded(tasks.clone());
    board.apply(
      BoardAction::MutationFinished(
        Operation::Delete,
        Err(RequestError::Status(404))
      )
    );
    assert_eq!(
      board.error(),
      Some("Failed to delete task")
    );
    assert_eq!(board.tasks(), &tasks[..]);
  }

  #[test]
  fn only_latest_error_is_kept() {
    let mut board = loaded(vec![]);
    board.apply(
      BoardAction::MutationFinished(
        Operation::Update,
        Err(RequestError::Status(500))
      )
    );
    board.apply(
      BoardAction::MutationFinished(
        Operation::Delete,
        Err(RequestError::Status(404))
      )
    );
    assert_eq!(
      board.error(),
      Some("Failed to delete task")
    );
  }

  #[test]
  fn stats_follow_current_tasks() {
    let board = loaded(vec![
      task("1", TaskStatus::Todo),
      task("2", TaskStatus::InProgress),
      task("3", TaskStatus::Done),
    ]);
    let stats = board.stats();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.in_progress, 1);
  }
}
