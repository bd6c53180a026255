use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ErrorBannerProps {
  #[prop_or_default]
  pub message: Option<String>
}

#[function_component(ErrorBanner)]
pub fn error_banner(
  props: &ErrorBannerProps
) -> Html {
  let Some(message) = &props.message
  else {
    return html! {};
  };

  html! {
      <div class="error-banner" role="alert">
          { message.clone() }
      </div>
  }
}
