use mindchill_core::ambience::{
  BackdropRecord,
  StreamRecord
};
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct PlayerSettingsProps {
  pub streams:        Vec<StreamRecord>,
  pub backdrops:      Vec<BackdropRecord>,
  pub stream_index:   usize,
  pub backdrop_index: usize,
  pub on_stream:      Callback<usize>,
  pub on_backdrop:    Callback<usize>
}

#[function_component(PlayerSettings)]
pub fn player_settings(
  props: &PlayerSettingsProps
) -> Html {
  html! {
      <div class="settings-panel glass-card">
          <div class="settings-section">
              <h3>{ "🎵 Music Stream" }</h3>
              <div class="stream-options">
                  {
                      for props.streams.iter().enumerate().map(|(index, stream)| {
                          let on_stream = props.on_stream.clone();
                          let active = props.stream_index == index;
                          html! {
                              <button
                                  key={stream.id}
                                  class={classes!("stream-btn", active.then_some("active"))}
                                  type="button"
                                  onclick={move |_| on_stream.emit(index)}
                              >
                                  { &stream.name }
                              </button>
                          }
                      })
                  }
              </div>
          </div>

          <div class="settings-section">
              <h3>{ "🖼️ Backdrop" }</h3>
              <div class="backdrop-options">
                  {
                      for props.backdrops.iter().enumerate().map(|(index, backdrop)| {
                          let on_backdrop = props.on_backdrop.clone();
                          let active = props.backdrop_index == index;
                          html! {
                              <button
                                  key={backdrop.id}
                                  class={classes!("backdrop-btn", active.then_some("active"))}
                                  type="button"
                                  style={format!("background-image: url({});", backdrop.url)}
                                  title={backdrop.name.clone()}
                                  onclick={move |_| on_backdrop.emit(index)}
                              >
                                  {
                                      if active {
                                          html! { <span class="check">{ "✓" }</span> }
                                      } else {
                                          html! {}
                                      }
                                  }
                              </button>
                          }
                      })
                  }
              </div>
              <p class="backdrop-hint">{ "💡 Click anywhere on the background to cycle through backdrops" }</p>
          </div>
      </div>
  }
}
