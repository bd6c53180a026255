use std::rc::Rc;

use taskboard_shared::{
  FormDraft,
  PRIORITY_MAX,
  PRIORITY_MIN,
  priority_option_label
};
use web_sys::{
  Event,
  HtmlInputElement,
  HtmlSelectElement,
  HtmlTextAreaElement,
  InputEvent,
  SubmitEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  Reducible,
  TargetCast,
  function_component,
  html,
  use_reducer
};

use crate::app::{
  CreateRequest,
  ui_debug
};

enum FormAction {
  Title(String),
  Description(String),
  Priority(String),
  DueDate(String),
  Submit,
  Settled(bool)
}

#[derive(Default)]
struct FormState(FormDraft);

impl Reducible for FormState {
  type Action = FormAction;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    let mut draft = self.0.clone();
    match action {
      | FormAction::Title(value) => {
        draft.set_title(&value)
      }
      | FormAction::Description(value) => {
        draft.set_description(&value)
      }
      | FormAction::Priority(value) => {
        draft.set_priority_input(&value)
      }
      | FormAction::DueDate(value) => {
        draft.set_due_date(&value)
      }
      | FormAction::Submit => {
        draft.begin_submit();
      }
      | FormAction::Settled(created) => {
        draft.finish_submit(created)
      }
    }
    Rc::new(Self(draft))
  }
}

#[derive(Properties, PartialEq)]
pub struct TaskFormProps {
  pub on_create: Callback<CreateRequest>
}

#[function_component(TaskForm)]
pub fn task_form(
  props: &TaskFormProps
) -> Html {
  let form =
    use_reducer(FormState::default);
  let draft = &form.0;

  let on_submit = {
    let form = form.clone();
    let on_create =
      props.on_create.clone();
    Callback::from(
      move |e: SubmitEvent| {
        e.prevent_default();
        let Some(task) =
          form.0.clone().begin_submit()
        else {
          ui_debug(
            "form.submit.skipped",
            "blank title or busy"
          );
          return;
        };
        form.dispatch(FormAction::Submit);
        let dispatcher = form.dispatcher();
        on_create.emit(CreateRequest {
          task,
          settled: Callback::from(
            move |created: bool| {
              dispatcher.dispatch(
                FormAction::Settled(created)
              )
            }
          )
        });
      }
    )
  };

  let on_title = {
    let form = form.clone();
    Callback::from(move |e: InputEvent| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      form.dispatch(FormAction::Title(
        input.value()
      ));
    })
  };

  let on_description = {
    let form = form.clone();
    Callback::from(move |e: InputEvent| {
      let input: HtmlTextAreaElement =
        e.target_unchecked_into();
      form.dispatch(
        FormAction::Description(
          input.value()
        )
      );
    })
  };

  let on_priority = {
    let form = form.clone();
    Callback::from(move |e: Event| {
      let select: HtmlSelectElement =
        e.target_unchecked_into();
      form.dispatch(FormAction::Priority(
        select.value()
      ));
    })
  };

  let on_due_date = {
    let form = form.clone();
    Callback::from(move |e: InputEvent| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      form.dispatch(FormAction::DueDate(
        input.value()
      ));
    })
  };

  let submit_label =
    if draft.submitting() {
      "Creating..."
    } else {
      "Create Task"
    };

  html! {
      <form class="task-form" onsubmit={on_submit}>
          <h2>{ "Create Task" }</h2>

          <label class="field">
              <span>{ "Title *" }</span>
              <input
                  type="text"
                  placeholder="Enter task title"
                  maxlength="200"
                  required=true
                  value={draft.title.clone()}
                  oninput={on_title}
              />
          </label>

          <label class="field">
              <span>{ "Description" }</span>
              <textarea
                  placeholder="Add details about this task"
                  maxlength="1000"
                  rows="4"
                  value={draft.description.clone()}
                  oninput={on_description}
              />
          </label>

          <label class="field">
              <span>{ "Priority" }</span>
              <select onchange={on_priority}>
                  {
                      for (PRIORITY_MIN..=PRIORITY_MAX).map(|priority| html! {
                          <option
                              value={priority.to_string()}
                              selected={priority == draft.priority}
                          >
                              { priority_option_label(priority).unwrap_or_default() }
                          </option>
                      })
                  }
              </select>
          </label>

          <label class="field">
              <span>{ "Due Date" }</span>
              <input
                  type="date"
                  value={draft.due_date.clone()}
                  oninput={on_due_date}
              />
          </label>

          <button type="submit" class="btn primary" disabled={!draft.can_submit()}>
              { submit_label }
          </button>
      </form>
  }
}
