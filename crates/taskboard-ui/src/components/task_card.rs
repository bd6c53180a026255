use taskboard_shared::{
  CardDraft,
  TaskDto,
  TaskPatch,
  TaskStatus,
  format_due_date
};
use web_sys::{
  Event,
  HtmlInputElement,
  HtmlSelectElement,
  HtmlTextAreaElement,
  InputEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html,
  use_state
};

use crate::app::ui_debug;

#[derive(Properties, PartialEq)]
pub struct TaskCardProps {
  pub task:      TaskDto,
  pub on_update:
    Callback<(String, TaskPatch)>,
  pub on_delete: Callback<String>
}

#[function_component(TaskCard)]
pub fn task_card(
  props: &TaskCardProps
) -> Html {
  let draft = {
    let task = props.task.clone();
    use_state(move || {
      CardDraft::for_task(&task)
    })
  };

  if draft.is_editing() {
    let on_title_input = {
      let draft = draft.clone();
      Callback::from(
        move |e: InputEvent| {
          let input: HtmlInputElement =
            e.target_unchecked_into();
          let mut next = (*draft).clone();
          next.set_title(&input.value());
          draft.set(next);
        }
      )
    };

    let on_description_input = {
      let draft = draft.clone();
      Callback::from(
        move |e: InputEvent| {
          let input: HtmlTextAreaElement =
            e.target_unchecked_into();
          let mut next = (*draft).clone();
          next.set_description(
            &input.value()
          );
          draft.set(next);
        }
      )
    };

    let on_save = {
      let draft = draft.clone();
      let on_update =
        props.on_update.clone();
      let id = props.task.id.clone();
      Callback::from(move |_| {
        let mut next = (*draft).clone();
        match next.save() {
          | Some(patch) => {
            on_update
              .emit((id.clone(), patch));
            draft.set(next);
          }
          | None => {
            ui_debug(
              "card.save.skipped",
              "blank title"
            )
          }
        }
      })
    };

    let on_cancel = {
      let draft = draft.clone();
      let task = props.task.clone();
      Callback::from(move |_| {
        let mut next = (*draft).clone();
        next.cancel(&task);
        draft.set(next);
      })
    };

    return html! {
        <div class="task-card editing">
            <input
                type="text"
                class="card-input"
                maxlength="200"
                value={draft.title.clone()}
                oninput={on_title_input}
            />
            <textarea
                class="card-input"
                rows="2"
                maxlength="1000"
                value={draft.description.clone()}
                oninput={on_description_input}
            />
            <div class="card-actions">
                <button type="button" class="btn save" onclick={on_save}>{ "Save" }</button>
                <button type="button" class="btn" onclick={on_cancel}>{ "Cancel" }</button>
            </div>
        </div>
    };
  }

  let task = &props.task;

  let on_status_change = {
    let on_update =
      props.on_update.clone();
    let task = task.clone();
    Callback::from(move |e: Event| {
      let select: HtmlSelectElement =
        e.target_unchecked_into();
      let selected = select.value();
      // Show the stored status until a
      // refetch says otherwise.
      select.set_value(task.status.as_str());
      match task.status_change(&selected) {
        | Some(patch) => {
          on_update
            .emit((task.id.clone(), patch))
        }
        | None => {
          ui_debug(
            "card.status.ignored",
            &selected
          )
        }
      }
    })
  };

  let on_edit = {
    let draft = draft.clone();
    let task = task.clone();
    Callback::from(move |_| {
      ui_debug("card.edit", &task.id);
      let mut next = (*draft).clone();
      next.begin_edit(&task);
      draft.set(next);
    })
  };

  let on_delete = {
    let on_delete =
      props.on_delete.clone();
    let id = task.id.clone();
    Callback::from(move |_| {
      on_delete.emit(id.clone())
    })
  };

  html! {
      <div class="task-card">
          <div class="card-body">
              <h3 class="card-title">{ task.title.clone() }</h3>
              if let Some(description) = task.description_text() {
                  <p class="card-description">{ description.to_string() }</p>
              }
          </div>
          <div class="card-meta">
              <span class={format!("status-badge {}", task.status.as_str())}>
                  { task.status.badge_label() }
              </span>
              if let Some(label) = task.priority_label() {
                  <span class={format!("priority priority-{}", task.priority)}>
                      { format!("Priority: {label}") }
                  </span>
              }
              if let Some(due) = task.due_date_text() {
                  <span class="due-date">{ format!("Due: {}", format_due_date(due)) }</span>
              }
          </div>
          <div class="card-actions">
              <select
                  key={task.status.as_str()}
                  class="status-select"
                  onchange={on_status_change}
              >
                  {
                      for TaskStatus::ALL.into_iter().map(|status| html! {
                          <option
                              value={status.as_str()}
                              selected={status == task.status}
                          >
                              { status.option_label() }
                          </option>
                      })
                  }
              </select>
              <button key="edit" type="button" class="btn" onclick={on_edit}>{ "Edit" }</button>
              <button key="delete" type="button" class="btn danger" onclick={on_delete}>{ "Delete" }</button>
          </div>
      </div>
  }
}
