use mindchill_core::ambience::MAX_VOLUME;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct PlayerControlsProps {
  pub playing:        bool,
  pub muted:          bool,
  pub volume:         u8,
  pub ticker_text:    String,
  pub on_toggle_play: Callback<MouseEvent>,
  pub on_toggle_mute: Callback<MouseEvent>,
  pub on_volume:      Callback<u8>,
  pub on_shuffle:     Callback<MouseEvent>
}

#[function_component(PlayerControls)]
pub fn player_controls(
  props: &PlayerControlsProps
) -> Html {
  let on_slide = {
    let on_volume = props.on_volume.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        if let Ok(volume) =
          input.value().parse::<u8>()
        {
          on_volume.emit(volume.min(MAX_VOLUME));
        }
      }
    )
  };

  let play_icon = if props.playing {
    html! {
        <svg width="24" height="24" viewBox="0 0 24 24" fill="currentColor">
            <path d="M6 4h4v16H6V4zm8 0h4v16h-4V4z" />
        </svg>
    }
  } else {
    html! {
        <svg width="24" height="24" viewBox="0 0 24 24" fill="currentColor">
            <path d="M8 5v14l11-7z" />
        </svg>
    }
  };

  let volume_icon = if props.muted {
    html! {
        <svg width="24" height="24" viewBox="0 0 24 24" fill="currentColor">
            <path d="M16.5 12c0-1.77-1.02-3.29-2.5-4.03v2.21l2.45 2.45c.03-.2.05-.41.05-.63zm2.5 0c0 .94-.2 1.82-.54 2.64l1.51 1.51C20.63 14.91 21 13.5 21 12c0-4.28-2.99-7.86-7-8.77v2.06c2.89.86 5 3.54 5 6.71zM4.27 3L3 4.27 7.73 9H3v6h4l5 5v-6.73l4.25 4.25c-.67.52-1.42.93-2.25 1.18v2.06c1.38-.31 2.63-.95 3.69-1.81L19.73 21 21 19.73l-9-9L4.27 3zM12 4L9.91 6.09 12 8.18V4z" />
        </svg>
    }
  } else {
    html! {
        <svg width="24" height="24" viewBox="0 0 24 24" fill="currentColor">
            <path d="M3 9v6h4l5 5V4L7 9H3zm13.5 3c0-1.77-1.02-3.29-2.5-4.03v8.05c1.48-.73 2.5-2.25 2.5-4.02zM14 3.23v2.06c2.89.86 5 3.54 5 6.71s-2.11 5.85-5 6.71v2.06c4.01-.91 7-4.49 7-8.77s-2.99-7.86-7-8.77z" />
        </svg>
    }
  };

  html! {
      <div class="bottom-controls">
          <div class="player-controls">
              <button class="control-btn play-btn" type="button" onclick={props.on_toggle_play.clone()} title={if props.playing { "Pause" } else { "Play" }}>
                  { play_icon }
              </button>

              <div class="volume-control">
                  <button class="control-btn volume-btn" type="button" onclick={props.on_toggle_mute.clone()} title={if props.muted { "Unmute" } else { "Mute" }}>
                      { volume_icon }
                  </button>
                  <input
                      type="range"
                      class="volume-slider"
                      min="0"
                      max={MAX_VOLUME.to_string()}
                      value={props.volume.to_string()}
                      oninput={on_slide}
                  />
              </div>

              <button class="control-btn shuffle-btn" type="button" onclick={props.on_shuffle.clone()} title="Shuffle stream">
                  <svg width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2.5" stroke-linecap="round" stroke-linejoin="round">
                      <polyline points="16 3 21 3 21 8" />
                      <line x1="4" y1="20" x2="21" y2="3" />
                      <polyline points="21 16 21 21 16 21" />
                      <line x1="15" y1="15" x2="21" y2="21" />
                      <line x1="4" y1="4" x2="9" y2="9" />
                  </svg>
              </button>
          </div>

          <div class="music-ticker">
              <div class="ticker-content">
                  <span class="ticker-text">{ format!("{0}  •  {0}", props.ticker_text) }</span>
              </div>
          </div>
      </div>
  }
}
