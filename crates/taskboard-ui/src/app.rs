use std::future::Future;
use std::rc::Rc;

use gloo::console::log;
use taskboard_shared::{
  Board,
  BoardAction,
  NewTask,
  Operation,
  RequestError,
  StatusFilter,
  TaskPatch
};
use yew::{
  Callback,
  Html,
  Reducible,
  UseReducerDispatcher,
  function_component,
  html,
  use_effect_with,
  use_reducer
};

use crate::api;
use crate::components::{
  ErrorBanner,
  FilterTabs,
  TaskForm,
  TaskList,
  TaskStats
};

#[derive(Default)]
pub struct BoardState(Board);

impl Reducible for BoardState {
  type Action = BoardAction;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    let mut board = self.0.clone();
    board.apply(action);
    Rc::new(Self(board))
  }
}

/// A create submitted by the form.
/// `settled` fires with `true` once
/// the task exists on the server.
pub struct CreateRequest {
  pub task:    NewTask,
  pub settled: Callback<bool>
}

#[function_component(App)]
pub fn app() -> Html {
  let board =
    use_reducer(BoardState::default);

  {
    let dispatcher = board.dispatcher();
    use_effect_with(
      board.0.refresh_key(),
      move |(filter, tick)| {
        let filter = *filter;
        let tick = *tick;
        dispatcher.dispatch(
          BoardAction::RefreshStarted
        );
        wasm_bindgen_futures::spawn_local(
          async move {
            tracing::info!(
              filter = filter.as_key(),
              tick,
              "refreshing tasks"
            );
            let result =
              api::fetch_tasks(filter)
                .await;
            match &result {
              | Ok(tasks) => {
                ui_debug(
                  "tasks.fetched",
                  &format!(
                    "filter={} count={}",
                    filter.as_key(),
                    tasks.len()
                  )
                )
              }
              | Err(err) => {
                tracing::error!(
                  error = %err,
                  "fetch tasks failed"
                )
              }
            }
            dispatcher.dispatch(
              BoardAction::RefreshFinished(
                result
              )
            );
          }
        );
        || ()
      }
    );
  }

  let on_filter = {
    let dispatcher = board.dispatcher();
    Callback::from(
      move |filter: StatusFilter| {
        ui_debug(
          "filter.select",
          filter.as_key()
        );
        dispatcher.dispatch(
          BoardAction::SelectFilter(filter)
        );
      }
    )
  };

  let on_create = {
    let dispatcher = board.dispatcher();
    Callback::from(
      move |request: CreateRequest| {
        let CreateRequest {
          task,
          settled
        } = request;
        spawn_mutation(
          dispatcher.clone(),
          Operation::Create,
          api::create_task(task),
          Some(settled)
        );
      }
    )
  };

  let on_update = {
    let dispatcher = board.dispatcher();
    Callback::from(
      move |(id, patch): (
        String,
        TaskPatch
      )| {
        ui_debug("task.update", &id);
        spawn_mutation(
          dispatcher.clone(),
          Operation::Update,
          api::update_task(id, patch),
          None
        );
      }
    )
  };

  let on_delete = {
    let dispatcher = board.dispatcher();
    Callback::from(move |id: String| {
      ui_debug("task.delete", &id);
      spawn_mutation(
        dispatcher.clone(),
        Operation::Delete,
        api::delete_task(id),
        None
      );
    })
  };

  let state = &board.0;

  html! {
      <main class="page">
          <div class="shell">
              <header class="page-header">
                  <h1>{ "Task Manager" }</h1>
                  <p>{ "Stay organized and manage your tasks efficiently" }</p>
              </header>

              <ErrorBanner message={state.error().map(str::to_string)} />

              <TaskStats tasks={state.tasks().to_vec()} />

              <div class="layout">
                  <aside class="form-column">
                      <TaskForm on_create={on_create} />
                  </aside>
                  <section class="list-column">
                      <FilterTabs active={state.filter()} on_select={on_filter} />
                      <TaskList
                          tasks={state.tasks().to_vec()}
                          loading={state.loading()}
                          on_update={on_update}
                          on_delete={on_delete}
                      />
                  </section>
              </div>
          </div>
      </main>
  }
}

/// Runs one create/update/delete call
/// and feeds its outcome back into the
/// board. A success triggers a refetch
/// through the refresh tick.
fn spawn_mutation<F>(
  dispatcher: UseReducerDispatcher<
    BoardState
  >,
  operation: Operation,
  call: F,
  settled: Option<Callback<bool>>
) where
  F: Future<Output = Result<(), RequestError>>
    + 'static
{
  wasm_bindgen_futures::spawn_local(
    async move {
      let result = call.await;
      if let Err(err) = &result {
        tracing::error!(
          ?operation,
          error = %err,
          "task mutation failed"
        );
      } else {
        tracing::info!(
          ?operation,
          "task mutation succeeded"
        );
      }
      let succeeded = result.is_ok();
      dispatcher.dispatch(
        BoardAction::MutationFinished(
          operation, result
        )
      );
      if let Some(settled) = settled {
        settled.emit(succeeded);
      }
    }
  );
}

pub(crate) fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}
