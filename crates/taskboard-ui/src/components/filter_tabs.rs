use taskboard_shared::StatusFilter;
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct FilterTabsProps {
  pub active:    StatusFilter,
  pub on_select: Callback<StatusFilter>
}

#[function_component(FilterTabs)]
pub fn filter_tabs(
  props: &FilterTabsProps
) -> Html {
  html! {
      <div class="filter-tabs">
          {
              for StatusFilter::ALL.into_iter().map(|filter| {
                  let on_select = props.on_select.clone();
                  let active = props.active == filter;
                  html! {
                      <button
                          type="button"
                          class={classes!("filter-tab", active.then_some("active"))}
                          onclick={move |_| on_select.emit(filter)}
                      >
                          { filter.label() }
                      </button>
                  }
              })
          }
      </div>
  }
}
