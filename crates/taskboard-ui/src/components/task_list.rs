use taskboard_shared::{
  TaskDto,
  TaskPatch
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TaskCard;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub tasks:     Vec<TaskDto>,
  pub loading:   bool,
  pub on_update:
    Callback<(String, TaskPatch)>,
  pub on_delete: Callback<String>
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  if props.loading {
    return html! {
        <div class="task-list-state">
            <div class="spinner"></div>
            <p>{ "Loading tasks..." }</p>
        </div>
    };
  }

  if props.tasks.is_empty() {
    return html! {
        <div class="task-list-state">
            <p class="empty-title">{ "No tasks yet" }</p>
            <p>{ "Create your first task to get started" }</p>
        </div>
    };
  }

  html! {
      <div class="task-list">
          {
              for props.tasks.iter().cloned().map(|task| html! {
                  <TaskCard
                      key={task.id.clone()}
                      task={task.clone()}
                      on_update={props.on_update.clone()}
                      on_delete={props.on_delete.clone()}
                  />
              })
          }
      </div>
  }
}
