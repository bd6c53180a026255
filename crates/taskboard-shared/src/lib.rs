pub mod board;
pub mod draft;
pub mod request;
pub mod task;

pub use board::{
  Board,
  BoardAction,
  Operation
};
pub use draft::{
  CardDraft,
  FormDraft
};
pub use request::{
  ApiRequest,
  DEFAULT_API_BASE_URL,
  Method,
  RequestError,
  resolve_base_url
};
pub use task::{
  CreateTaskBody,
  DEFAULT_PRIORITY,
  DESCRIPTION_MAX_CHARS,
  LIST_PAGE_SIZE,
  NewTask,
  PRIORITY_MAX,
  PRIORITY_MIN,
  StatusFilter,
  TITLE_MAX_CHARS,
  TaskDto,
  TaskPatch,
  TaskStats,
  TaskStatus,
  UnknownStatus,
  format_due_date,
  is_valid_priority,
  priority_label,
  priority_option_label,
  truncate_chars
};
