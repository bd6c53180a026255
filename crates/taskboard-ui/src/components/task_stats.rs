use taskboard_shared::TaskDto;
use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskStatsProps {
  pub tasks: Vec<TaskDto>
}

#[function_component(TaskStats)]
pub fn task_stats(
  props: &TaskStatsProps
) -> Html {
  let stats =
    taskboard_shared::TaskStats::from_tasks(
      &props.tasks
    );

  let tile =
    |label: &str, count: usize, class: &str| {
      html! {
          <div class={format!("stat-tile {class}")}>
              <div class="stat-count">{ count.to_string() }</div>
              <div class="stat-label">{ label.to_string() }</div>
          </div>
      }
    };

  html! {
      <div class="stats">
          { tile("Total Tasks", stats.total, "total") }
          { tile("To Do", stats.todo, "todo") }
          { tile("In Progress", stats.in_progress, "in_progress") }
          { tile("Done", stats.done, "done") }
      </div>
  }
}
