use wasm_bindgen::{
  JsCast,
  JsValue
};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
  MediaStream,
  MediaStreamConstraints,
  MediaStreamTrack
};

use super::describe_js_error;

/// Asks for the camera and microphone
/// together.
pub async fn request_camera_and_mic(
) -> Result<MediaStream, String> {
  let window = web_sys::window()
    .ok_or_else(|| "no window".to_string())?;
  let devices = window
    .navigator()
    .media_devices()
    .map_err(|error| {
      describe_js_error(&error)
    })?;

  let constraints =
    MediaStreamConstraints::new();
  constraints.set_video(&JsValue::TRUE);
  constraints.set_audio(&JsValue::TRUE);

  let promise = devices
    .get_user_media_with_constraints(
      &constraints
    )
    .map_err(|error| {
      describe_js_error(&error)
    })?;
  let stream = JsFuture::from(promise)
    .await
    .map_err(|error| {
      describe_js_error(&error)
    })?;

  stream
    .dyn_into::<MediaStream>()
    .map_err(|value| {
      format!(
        "capture resolved to a non-stream: \
         {value:?}"
      )
    })
}

pub fn stop_all_tracks(stream: &MediaStream) {
  for track in stream.get_tracks().iter() {
    track
      .unchecked_into::<MediaStreamTrack>()
      .stop();
  }
}

/// Flips the first track of the list and
/// returns its new enabled state.
pub fn flip_first_track(
  tracks: js_sys::Array
) -> Option<bool> {
  let first = tracks.get(0);
  if first.is_undefined() {
    return None;
  }
  let track =
    first.unchecked_into::<MediaStreamTrack>();
  let enabled = !track.enabled();
  track.set_enabled(enabled);
  Some(enabled)
}
