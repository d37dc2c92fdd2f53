use gloo::timers::future::TimeoutFuture;
use js_sys::{
  Object,
  Reflect
};
use mindchill_core::ambience::PlayerCommand;
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::describe_js_error;

const API_POLL_MS: u32 = 100;
const API_POLL_LIMIT: u32 = 150;

#[wasm_bindgen]
extern "C" {
  #[wasm_bindgen(js_namespace = YT, js_name = Player)]
  type YtPlayer;

  #[wasm_bindgen(
    constructor,
    catch,
    js_namespace = YT,
    js_class = "Player"
  )]
  fn new(
    element_id: &str,
    options: &JsValue
  ) -> Result<YtPlayer, JsValue>;

  #[wasm_bindgen(method, js_name = playVideo)]
  fn play_video(this: &YtPlayer);

  #[wasm_bindgen(method, js_name = pauseVideo)]
  fn pause_video(this: &YtPlayer);

  #[wasm_bindgen(method)]
  fn mute(this: &YtPlayer);

  #[wasm_bindgen(method, js_name = unMute)]
  fn un_mute(this: &YtPlayer);

  #[wasm_bindgen(method, js_name = setVolume)]
  fn set_volume(this: &YtPlayer, volume: u8);

  #[wasm_bindgen(method, js_name = loadVideoById)]
  fn load_video_by_id(
    this: &YtPlayer,
    video_id: &str
  );

  #[wasm_bindgen(method)]
  fn destroy(this: &YtPlayer);
}

/// Notifications from the hidden embed.
pub enum EmbedSignal {
  Ready,
  StateChanged(i32)
}

/// Hidden, chrome-less embed player bound
/// to a placeholder element.
pub struct EmbedPlayer {
  player:    YtPlayer,
  _handlers: Vec<Closure<dyn FnMut(JsValue)>>
}

impl EmbedPlayer {
  /// Waits for the iframe API script to
  /// finish loading.
  pub async fn wait_for_api(
  ) -> Result<(), String> {
    for _ in 0..API_POLL_LIMIT {
      if super::global_has(&["YT", "Player"]) {
        return Ok(());
      }
      TimeoutFuture::new(API_POLL_MS).await;
    }
    Err(
      "embed player api did not load"
        .to_string()
    )
  }

  pub fn mount(
    element_id: &str,
    video_id: &str,
    mut notify: impl FnMut(EmbedSignal) + Clone + 'static
  ) -> Result<Self, String> {
    let mut on_ready = notify.clone();
    let ready = Closure::<dyn FnMut(JsValue)>::new(
      move |_event: JsValue| {
        on_ready(EmbedSignal::Ready);
      }
    );
    let changed = Closure::<dyn FnMut(JsValue)>::new(
      move |event: JsValue| {
        let code = Reflect::get(
          &event,
          &JsValue::from_str("data")
        )
        .ok()
        .and_then(|value| value.as_f64())
        .map_or(-1, |value| value as i32);
        notify(EmbedSignal::StateChanged(code));
      }
    );

    let options = player_options(
      video_id,
      ready.as_ref().unchecked_ref(),
      changed.as_ref().unchecked_ref()
    )
    .map_err(|error| describe_js_error(&error))?;
    let player = YtPlayer::new(
      element_id,
      &options
    )
    .map_err(|error| describe_js_error(&error))?;

    Ok(Self {
      player,
      _handlers: vec![ready, changed]
    })
  }

  pub fn run(
    &self,
    commands: &[PlayerCommand]
  ) {
    for command in commands {
      match command {
        | PlayerCommand::Play => {
          self.player.play_video()
        }
        | PlayerCommand::Pause => {
          self.player.pause_video()
        }
        | PlayerCommand::Mute => {
          self.player.mute()
        }
        | PlayerCommand::Unmute => {
          self.player.un_mute()
        }
        | PlayerCommand::SetVolume(volume) => {
          self.player.set_volume(*volume)
        }
        | PlayerCommand::Load(video_id) => {
          self
            .player
            .load_video_by_id(video_id)
        }
      }
    }
  }
}

impl Drop for EmbedPlayer {
  fn drop(&mut self) {
    self.player.destroy();
  }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlayerOptions<'a> {
  height:      &'static str,
  width:       &'static str,
  video_id:    &'a str,
  player_vars: PlayerVars
}

/// Chrome-less, keyboard-less, autoplaying.
#[derive(Serialize)]
struct PlayerVars {
  autoplay:       u8,
  controls:       u8,
  disablekb:      u8,
  fs:             u8,
  iv_load_policy: u8,
  modestbranding: u8,
  rel:            u8
}

fn player_options(
  video_id: &str,
  on_ready: &js_sys::Function,
  on_state_change: &js_sys::Function
) -> Result<JsValue, JsValue> {
  let options = serde_wasm_bindgen::to_value(
    &PlayerOptions {
      height: "0",
      width: "0",
      video_id,
      player_vars: PlayerVars {
        autoplay:       1,
        controls:       0,
        disablekb:      1,
        fs:             0,
        iv_load_policy: 3,
        modestbranding: 1,
        rel:            0
      }
    }
  )?;

  let events = Object::new();
  Reflect::set(
    &events,
    &JsValue::from_str("onReady"),
    on_ready
  )?;
  Reflect::set(
    &events,
    &JsValue::from_str("onStateChange"),
    on_state_change
  )?;
  Reflect::set(
    &options,
    &JsValue::from_str("events"),
    &events
  )?;
  Ok(options)
}
