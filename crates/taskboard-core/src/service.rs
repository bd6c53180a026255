use chrono::Utc;
use parking_lot::Mutex;
use serde::Deserialize;
use taskboard_shared::{
    DESCRIPTION_MAX_CHARS, PRIORITY_MAX, PRIORITY_MIN, TITLE_MAX_CHARS, TaskDto, TaskStatus,
    UnknownStatus, is_valid_priority,
};
use tracing::{debug, instrument};
use utoipa::{IntoParams, ToSchema};

use crate::datastore::DataStore;
use crate::task::Task;

pub const DEFAULT_LIST_LIMIT: usize = 10;
pub const MAX_LIST_LIMIT: usize = 100;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Task not found")]
    NotFound,

    #[error(transparent)]
    InvalidStatus(#[from] UnknownStatus),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    pub status: Option<String>,
    pub priority: Option<u8>,
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<u8>,
    #[serde(default)]
    pub due_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<u8>,
    #[serde(default)]
    pub due_date: Option<String>,
}

pub struct TaskService {
    store: Mutex<DataStore>,
}

impl TaskService {
    pub fn new(store: DataStore) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    #[instrument(skip(self))]
    pub fn list(&self, query: ListQuery) -> ServiceResult<Vec<TaskDto>> {
        let status = query
            .status
            .as_deref()
            .filter(|value| !value.is_empty())
            .map(str::parse::<TaskStatus>)
            .transpose()?;
        if let Some(priority) = query.priority {
            check_priority(priority)?;
        }
        let skip = query.skip.unwrap_or(0);
        let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT);
        if !(1..=MAX_LIST_LIMIT).contains(&limit) {
            return Err(ServiceError::Validation(format!(
                "limit must be between 1 and {MAX_LIST_LIMIT}"
            )));
        }

        let tasks = self.store.lock().load()?;
        let page = tasks
            .iter()
            .filter(|task| status.is_none_or(|status| task.status == status))
            .filter(|task| query.priority.is_none_or(|priority| task.priority == priority))
            .skip(skip)
            .take(limit)
            .map(Task::to_dto)
            .collect();

        Ok(page)
    }

    #[instrument(skip(self, request), fields(title_len = request.title.len()))]
    pub fn create(&self, request: CreateTaskRequest) -> ServiceResult<TaskDto> {
        let status = request
            .status
            .as_deref()
            .map(str::parse::<TaskStatus>)
            .transpose()?
            .unwrap_or_default();
        check_title(&request.title)?;
        if let Some(description) = request.description.as_deref() {
            check_description(description)?;
        }
        let priority = match request.priority {
            Some(priority) => {
                check_priority(priority)?;
                priority
            }
            None => taskboard_shared::DEFAULT_PRIORITY,
        };

        let mut task = Task::new(request.title, Utc::now());
        task.description = request.description;
        task.status = status;
        task.priority = priority;
        task.due_date = request.due_date;

        let store = self.store.lock();
        let mut tasks = store.load()?;
        tasks.push(task.clone());
        store.save(&tasks)?;

        debug!(id = %task.id, "task created");
        Ok(task.to_dto())
    }

    #[instrument(skip(self))]
    pub fn get(&self, id: &str) -> ServiceResult<TaskDto> {
        let tasks = self.store.lock().load()?;
        tasks
            .iter()
            .find(|task| task.id == id)
            .map(Task::to_dto)
            .ok_or(ServiceError::NotFound)
    }

    #[instrument(skip(self, update))]
    pub fn update(&self, id: &str, update: UpdateTaskRequest) -> ServiceResult<TaskDto> {
        let store = self.store.lock();
        let mut tasks = store.load()?;

        let updated = {
            let task = tasks
                .iter_mut()
                .find(|task| task.id == id)
                .ok_or(ServiceError::NotFound)?;
            apply_update(task, update)?;
            task.updated_at = Utc::now();
            task.to_dto()
        };

        store.save(&tasks)?;
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub fn delete(&self, id: &str) -> ServiceResult<()> {
        let store = self.store.lock();
        let mut tasks = store.load()?;
        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        if tasks.len() == before {
            return Err(ServiceError::NotFound);
        }
        store.save(&tasks)?;
        Ok(())
    }
}

/// Validates every provided field before touching the task so a rejected
/// update leaves it unchanged.
fn apply_update(task: &mut Task, update: UpdateTaskRequest) -> ServiceResult<()> {
    let status = update
        .status
        .as_deref()
        .filter(|value| !value.is_empty())
        .map(str::parse::<TaskStatus>)
        .transpose()?;
    if let Some(title) = update.title.as_deref() {
        check_title(title)?;
    }
    if let Some(description) = update.description.as_deref() {
        check_description(description)?;
    }
    if let Some(priority) = update.priority {
        check_priority(priority)?;
    }

    if let Some(title) = update.title {
        task.title = title;
    }
    if let Some(description) = update.description {
        task.description = Some(description);
    }
    if let Some(status) = status {
        task.status = status;
    }
    if let Some(priority) = update.priority {
        task.priority = priority;
    }
    if let Some(due_date) = update.due_date {
        task.due_date = Some(due_date);
    }

    debug!(id = %task.id, "task update applied");
    Ok(())
}

fn check_title(title: &str) -> ServiceResult<()> {
    if title.trim().is_empty() {
        return Err(ServiceError::Validation(
            "title must not be blank".to_string(),
        ));
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(ServiceError::Validation(format!(
            "title must be at most {TITLE_MAX_CHARS} characters"
        )));
    }
    Ok(())
}

fn check_description(description: &str) -> ServiceResult<()> {
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        return Err(ServiceError::Validation(format!(
            "description must be at most {DESCRIPTION_MAX_CHARS} characters"
        )));
    }
    Ok(())
}

fn check_priority(priority: u8) -> ServiceResult<()> {
    if !is_valid_priority(priority) {
        return Err(ServiceError::Validation(format!(
            "priority must be between {PRIORITY_MIN} and {PRIORITY_MAX}"
        )));
    }
    Ok(())
}
