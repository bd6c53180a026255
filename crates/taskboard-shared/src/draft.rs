use crate::task::{
  DEFAULT_PRIORITY,
  DESCRIPTION_MAX_CHARS,
  NewTask,
  TITLE_MAX_CHARS,
  TaskDto,
  TaskPatch,
  is_valid_priority,
  truncate_chars
};

/// Unsaved input of the create form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormDraft {
  pub title:       String,
  pub description: String,
  pub priority:    u8,
  pub due_date:    String,
  submitting:      bool
}

impl Default for FormDraft {
  fn default() -> Self {
    Self {
      title:       String::new(),
      description: String::new(),
      priority:    DEFAULT_PRIORITY,
      due_date:    String::new(),
      submitting:  false
    }
  }
}

impl FormDraft {
  pub fn set_title(
    &mut self,
    value: &str
  ) {
    self.title =
      truncate_chars(value, TITLE_MAX_CHARS);
  }

  pub fn set_description(
    &mut self,
    value: &str
  ) {
    self.description = truncate_chars(
      value,
      DESCRIPTION_MAX_CHARS
    );
  }

  /// Out-of-range or non-numeric input
  /// leaves the priority unchanged.
  pub fn set_priority_input(
    &mut self,
    raw: &str
  ) {
    if let Ok(priority) =
      raw.trim().parse::<u8>()
      && is_valid_priority(priority)
    {
      self.priority = priority;
    }
  }

  pub fn set_due_date(
    &mut self,
    value: &str
  ) {
    self.due_date = value.to_string();
  }

  pub fn submitting(&self) -> bool {
    self.submitting
  }

  pub fn can_submit(&self) -> bool {
    !self.submitting
      && !self.title.trim().is_empty()
  }

  /// Marks a submit in flight and
  /// returns the trimmed input, or
  /// `None` when the title is blank or
  /// a submit is already pending.
  pub fn begin_submit(
    &mut self
  ) -> Option<NewTask> {
    if !self.can_submit() {
      return None;
    }
    self.submitting = true;
    Some(NewTask {
      title:       self
        .title
        .trim()
        .to_string(),
      description: self
        .description
        .trim()
        .to_string(),
      priority:    self.priority,
      due_date:    self.due_date.clone()
    })
  }

  pub fn finish_submit(
    &mut self,
    created: bool
  ) {
    if created {
      *self = Self::default();
    } else {
      self.submitting = false;
    }
  }
}

/// Inline-edit state of one task card.
#[derive(
  Debug, Clone, Default, PartialEq,
)]
pub struct CardDraft {
  pub title:       String,
  pub description: String,
  editing:         bool
}

impl CardDraft {
  pub fn for_task(
    task: &TaskDto
  ) -> Self {
    let mut draft = Self::default();
    draft.reset_to(task);
    draft
  }

  pub fn is_editing(&self) -> bool {
    self.editing
  }

  pub fn begin_edit(
    &mut self,
    task: &TaskDto
  ) {
    self.reset_to(task);
    self.editing = true;
  }

  pub fn set_title(
    &mut self,
    value: &str
  ) {
    self.title =
      truncate_chars(value, TITLE_MAX_CHARS);
  }

  pub fn set_description(
    &mut self,
    value: &str
  ) {
    self.description = truncate_chars(
      value,
      DESCRIPTION_MAX_CHARS
    );
  }

  pub fn cancel(
    &mut self,
    task: &TaskDto
  ) {
    self.reset_to(task);
    self.editing = false;
  }

  /// Builds the title/description
  /// patch and leaves edit mode. A
  /// blank title yields `None` and
  /// keeps the card in edit mode.
  pub fn save(
    &mut self
  ) -> Option<TaskPatch> {
    let title = self.title.trim();
    if title.is_empty() {
      return None;
    }
    let description =
      self.description.trim();
    let patch = TaskPatch {
      title: Some(title.to_string()),
      description: if description
        .is_empty()
      {
        None
      } else {
        Some(description.to_string())
      },
      ..TaskPatch::default()
    };
    self.editing = false;
    Some(patch)
  }

  fn reset_to(
    &mut self,
    task: &TaskDto
  ) {
    self.title = task.title.clone();
    self.description = task
      .description
      .clone()
      .unwrap_or_default();
  }
}
