use gloo::timers::callback::Timeout;
use mindchill_core::config::ChimeConfig;
use wasm_bindgen::JsValue;
use web_sys::{
  AudioContext,
  OscillatorType
};

/// Plays one short sine tone with an
/// exponential fade, then closes the audio
/// context.
pub fn play_chime(
  tone: &ChimeConfig
) -> Result<(), JsValue> {
  let context = AudioContext::new()?;
  let oscillator =
    context.create_oscillator()?;
  let gain = context.create_gain()?;

  oscillator.connect_with_audio_node(&gain)?;
  gain.connect_with_audio_node(
    &context.destination()
  )?;

  oscillator.set_type(OscillatorType::Sine);
  oscillator
    .frequency()
    .set_value(tone.frequency_hz);

  let start = context.current_time();
  let end = start
    + f64::from(tone.duration_ms) / 1000.0;
  gain
    .gain()
    .set_value_at_time(tone.start_gain, start)?;
  gain
    .gain()
    .exponential_ramp_to_value_at_time(
      tone.end_gain,
      end
    )?;

  oscillator.start_with_when(start)?;
  oscillator.stop_with_when(end)?;

  let _ = Timeout::new(
    tone.duration_ms + 100,
    move || {
      let _ = context.close();
    }
  )
  .forget();
  Ok(())
}
