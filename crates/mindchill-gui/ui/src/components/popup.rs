use yew::{
  Callback,
  Children,
  Html,
  MouseEvent,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct PopupProps {
  #[prop_or_default]
  pub class:    &'static str,
  pub on_close: Callback<MouseEvent>,
  #[prop_or_default]
  pub children: Children
}

/// Overlay card. Clicking the dimmed
/// backdrop closes it; clicks inside the
/// card stay inside.
#[function_component(Popup)]
pub fn popup(props: &PopupProps) -> Html {
  let keep_inside =
    Callback::from(|e: MouseEvent| {
      e.stop_propagation()
    });

  html! {
      <div class="popup-overlay" onclick={props.on_close.clone()}>
          <div class={classes!("popup-container", props.class)} onclick={keep_inside}>
              <button class="popup-close" type="button" onclick={props.on_close.clone()}>{ "✕" }</button>
              { for props.children.iter() }
          </div>
      </div>
  }
}
