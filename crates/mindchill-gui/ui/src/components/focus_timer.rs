use std::f64::consts::PI;

use gloo::timers::callback::Interval;
use mindchill_core::config::{
  ChimeConfig,
  TimerConfig
};
use mindchill_core::timer::{
  FocusTimer,
  TimerEffect,
  TimerEvent,
  TimerMode,
  format_clock
};
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html,
  use_effect_with,
  use_force_update,
  use_mut_ref
};

use crate::app::ui_debug;
use crate::bindings::chime::play_chime;
use crate::bindings::describe_js_error;

const RING_RADIUS: f64 = 90.0;

/// Dash length and offset of the progress
/// ring for an elapsed share in `0..=1`.
fn ring_dash(progress: f64) -> (f64, f64) {
  let circumference = 2.0 * PI * RING_RADIUS;
  let progress = progress.clamp(0.0, 1.0);
  (
    circumference,
    circumference - progress * circumference
  )
}

#[derive(Properties, PartialEq)]
pub struct FocusTimerPanelProps {
  pub timer: TimerConfig,
  pub chime: ChimeConfig
}

#[function_component(FocusTimerPanel)]
pub fn focus_timer_panel(
  props: &FocusTimerPanelProps
) -> Html {
  let timer = {
    let config = props.timer.clone();
    use_mut_ref(move || FocusTimer::new(config))
  };
  let redraw = use_force_update();

  let dispatch = {
    let timer = timer.clone();
    let tone = props.chime.clone();
    Callback::from(move |event: TimerEvent| {
      let effects =
        timer.borrow_mut().apply(event);
      for effect in effects {
        match effect {
          | TimerEffect::Chime => {
            if let Err(error) = play_chime(&tone)
            {
              tracing::warn!(
                error = %describe_js_error(&error),
                "chime failed"
              );
            }
          }
        }
      }
      redraw.force_update();
    })
  };

  let running = timer.borrow().is_running();
  {
    let dispatch = dispatch.clone();
    use_effect_with(running, move |running| {
      let interval = running.then(|| {
        Interval::new(1_000, move || {
          dispatch.emit(TimerEvent::Tick)
        })
      });
      move || drop(interval)
    });
  }

  let snapshot = timer.borrow().clone();
  let spec = snapshot.spec().clone();
  let (circumference, offset) =
    ring_dash(snapshot.progress());
  let ring_style = format!(
    "stroke-dasharray: {circumference}; \
     stroke-dashoffset: {offset}; transform: \
     rotate(-90deg); transform-origin: 50% \
     50%; transition: stroke-dashoffset 0.5s \
     ease;"
  );

  let on_toggle = {
    let dispatch = dispatch.clone();
    Callback::from(move |_| {
      ui_debug("timer.toggle", "start/pause");
      dispatch.emit(TimerEvent::Toggle)
    })
  };
  let on_reset = {
    let dispatch = dispatch.clone();
    Callback::from(move |_| {
      dispatch.emit(TimerEvent::Reset)
    })
  };

  html! {
      <div class="pomodoro-timer glass-card">
          <div class="timer-header">
              <h2>{ "⏱️ Pomodoro Timer" }</h2>
              <div class="session-count">
                  <span class="session-icon">{ "🎯" }</span>
                  <span>{ format!("{} sessions", snapshot.sessions()) }</span>
              </div>
          </div>

          <div class="mode-tabs">
              {
                  for TimerMode::all().into_iter().map(|mode| {
                      let dispatch = dispatch.clone();
                      let active = snapshot.mode() == mode;
                      html! {
                          <button
                              key={mode.as_key()}
                              class={classes!("mode-tab", active.then_some("active"))}
                              type="button"
                              onclick={move |_| dispatch.emit(TimerEvent::Select(mode))}
                          >
                              { &snapshot.spec_for(mode).name }
                          </button>
                      }
                  })
              }
          </div>

          <div class="timer-display">
              <svg class="progress-ring" width="220" height="220">
                  <circle class="progress-ring-bg" stroke="rgba(255,255,255,0.1)" stroke-width="8" fill="transparent" r={RING_RADIUS.to_string()} cx="110" cy="110" />
                  <circle class="progress-ring-progress" stroke={spec.color.clone()} stroke-width="8" stroke-linecap="round" fill="transparent" r={RING_RADIUS.to_string()} cx="110" cy="110" style={ring_style} />
              </svg>
              <div class="timer-text">
                  <span class="time">{ format_clock(snapshot.remaining()) }</span>
                  <span class="mode-label" style={format!("color: {};", spec.color)}>{ &spec.name }</span>
              </div>
          </div>

          <div class="timer-controls">
              <button class={classes!("control-btn", "primary", if running { "pause" } else { "play" })} type="button" onclick={on_toggle}>
                  { if running { "⏸️ Pause" } else { "▶️ Start" } }
              </button>
              <button class="control-btn secondary" type="button" onclick={on_reset}>{ "🔄 Reset" }</button>
          </div>

          <div class="progress-dots">
              {
                  for snapshot.session_dots().into_iter().enumerate().map(|(index, lit)| html! {
                      <span key={index} class={classes!("dot", lit.then_some("completed"))} />
                  })
              }
          </div>
      </div>
  }
}

#[cfg(test)]
mod focus_timer_tests {
  use super::*;

  #[test]
  fn ring_is_empty_at_start_and_full_at_end(
  ) {
    let (circumference, offset) =
      ring_dash(0.0);
    assert!((circumference - 565.486).abs() < 1e-3);
    assert_eq!(offset, circumference);

    let (_, offset) = ring_dash(1.0);
    assert_eq!(offset, 0.0);

    let (circumference, offset) =
      ring_dash(0.25);
    assert!(
      (offset - circumference * 0.75).abs()
        < 1e-9
    );
  }

  #[test]
  fn ring_clamps_out_of_range_progress() {
    assert_eq!(ring_dash(-1.0), ring_dash(0.0));
    assert_eq!(ring_dash(2.0), ring_dash(1.0));
  }
}
