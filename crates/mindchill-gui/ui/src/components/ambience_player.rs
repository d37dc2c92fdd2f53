use mindchill_core::ambience::{
  AmbienceEvent,
  AmbienceState,
  BackdropRecord,
  EmbedState,
  StreamRecord
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html,
  use_effect_with,
  use_force_update,
  use_mut_ref
};

use super::{
  PlayerControls,
  PlayerSettings
};
use crate::app::ui_debug;
use crate::bindings::youtube::{
  EmbedPlayer,
  EmbedSignal
};

const EMBED_ELEMENT_ID: &str =
  "ambience-embed";

#[derive(Properties, PartialEq)]
pub struct AmbiencePlayerProps {
  pub streams:   Vec<StreamRecord>,
  pub backdrops: Vec<BackdropRecord>
}

#[function_component(AmbiencePlayer)]
pub fn ambience_player(
  props: &AmbiencePlayerProps
) -> Html {
  let model = {
    let streams = props.streams.clone();
    let backdrops = props.backdrops.clone();
    use_mut_ref(move || {
      AmbienceState::new(streams, backdrops)
    })
  };
  let embed = use_mut_ref(|| None::<EmbedPlayer>);
  let redraw = use_force_update();

  let dispatch = {
    let model = model.clone();
    let embed = embed.clone();
    let redraw = redraw.clone();
    Callback::from(move |event: AmbienceEvent| {
      let commands =
        model.borrow_mut().apply(event);
      if let Some(player) = embed.borrow().as_ref()
      {
        player.run(&commands);
      }
      redraw.force_update();
    })
  };

  {
    let model = model.clone();
    let embed = embed.clone();
    let dispatch = dispatch.clone();
    use_effect_with((), move |_| {
      let slot = embed.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          if let Err(reason) =
            EmbedPlayer::wait_for_api().await
          {
            tracing::error!(%reason, "ambience embed unavailable");
            return;
          }
          let video_id = model
            .borrow()
            .current_stream()
            .map(|stream| stream.video_id.clone())
            .unwrap_or_default();
          let notify = move |signal: EmbedSignal| {
            let event = match signal {
              | EmbedSignal::Ready => {
                AmbienceEvent::PlayerReady
              }
              | EmbedSignal::StateChanged(code) => {
                AmbienceEvent::PlayerStateChanged(
                  EmbedState::from_code(code)
                )
              }
            };
            dispatch.emit(event);
          };
          match EmbedPlayer::mount(
            EMBED_ELEMENT_ID,
            &video_id,
            notify
          ) {
            | Ok(player) => {
              ui_debug(
                "ambience.embed.mounted",
                &video_id
              );
              *slot.borrow_mut() = Some(player);
            }
            | Err(reason) => {
              tracing::error!(%reason, "failed to mount ambience embed");
            }
          }
        }
      );
      move || drop(embed.borrow_mut().take())
    });
  }

  let on_backdrop_click = {
    let dispatch = dispatch.clone();
    Callback::from(move |_: MouseEvent| {
      dispatch.emit(AmbienceEvent::BackdropClicked)
    })
  };
  let on_toggle_settings = {
    let dispatch = dispatch.clone();
    Callback::from(move |_: MouseEvent| {
      dispatch.emit(AmbienceEvent::ToggleSettings)
    })
  };
  let on_toggle_play = {
    let dispatch = dispatch.clone();
    Callback::from(move |_: MouseEvent| {
      dispatch.emit(AmbienceEvent::TogglePlay)
    })
  };
  let on_toggle_mute = {
    let dispatch = dispatch.clone();
    Callback::from(move |_: MouseEvent| {
      dispatch.emit(AmbienceEvent::ToggleMute)
    })
  };
  let on_volume = {
    let dispatch = dispatch.clone();
    Callback::from(move |volume: u8| {
      dispatch.emit(AmbienceEvent::SetVolume(volume))
    })
  };
  let on_stream = {
    let dispatch = dispatch.clone();
    Callback::from(move |index: usize| {
      dispatch.emit(AmbienceEvent::SelectStream(index))
    })
  };
  let on_backdrop = {
    let dispatch = dispatch.clone();
    Callback::from(move |index: usize| {
      dispatch.emit(AmbienceEvent::SelectBackdrop(
        index
      ))
    })
  };
  let on_shuffle = {
    let model = model.clone();
    let embed = embed.clone();
    let redraw = redraw.clone();
    Callback::from(move |_: MouseEvent| {
      let commands = model
        .borrow_mut()
        .shuffle(&mut rand::thread_rng());
      if let Some(player) = embed.borrow().as_ref()
      {
        player.run(&commands);
      }
      redraw.force_update();
    })
  };

  let state = model.borrow().clone();
  let backdrop_url = state
    .current_backdrop()
    .map(|backdrop| backdrop.url.clone())
    .unwrap_or_default();

  html! {
      <div class="music-player-fullscreen">
          <div class="fullscreen-backdrop" style={format!("background-image: url({backdrop_url});")} onclick={on_backdrop_click}>
              <div class="backdrop-gradient"></div>
          </div>

          <div class="youtube-container" style="position: absolute; top: -9999px; left: -9999px; visibility: hidden;">
              <div id={EMBED_ELEMENT_ID}></div>
          </div>

          <button class="settings-toggle" type="button" onclick={on_toggle_settings} aria-label="Toggle settings">{ "⚙️" }</button>

          {
              if state.settings_open() {
                  html! {
                      <PlayerSettings
                          streams={state.streams().to_vec()}
                          backdrops={state.backdrops().to_vec()}
                          stream_index={state.stream_index()}
                          backdrop_index={state.backdrop_index()}
                          on_stream={on_stream}
                          on_backdrop={on_backdrop}
                      />
                  }
              } else {
                  html! {}
              }
          }

          <PlayerControls
              playing={state.is_playing()}
              muted={state.is_muted()}
              volume={state.displayed_volume()}
              ticker_text={state.ticker_text()}
              on_toggle_play={on_toggle_play}
              on_toggle_mute={on_toggle_mute}
              on_volume={on_volume}
              on_shuffle={on_shuffle}
          />
      </div>
  }
}
