use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use mindchill_core::call::{
  CallController,
  CallEvent,
  CallSession,
  CallStatus
};
use wasm_bindgen_futures::JsFuture;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  TargetCast,
  classes,
  function_component,
  html,
  use_effect_with,
  use_force_update,
  use_mut_ref,
  use_node_ref,
  use_state
};

use crate::app::ui_debug;
use crate::bindings::describe_js_error;
use crate::call_backend::{
  Arrival,
  BrowserCallBackend,
  release_unclaimed
};

const COPIED_FLASH_MS: u32 = 2_000;

#[derive(Properties, PartialEq)]
pub struct CallPanelProps {
  pub room_id_len: usize,
  pub on_close:    Callback<MouseEvent>
}

/// "Study With Me" modal. Mounting it opens
/// a session; unmounting tears it down.
#[function_component(CallPanel)]
pub fn call_panel(
  props: &CallPanelProps
) -> Html {
  let local_view = use_node_ref();
  let remote_view = use_node_ref();
  let controller = {
    let local_view = local_view.clone();
    let remote_view = remote_view.clone();
    let room_id_len = props.room_id_len;
    use_mut_ref(move || {
      CallController::new(
        CallSession::new(room_id_len),
        BrowserCallBackend::new(
          local_view,
          remote_view
        )
      )
    })
  };
  let redraw = use_force_update();
  let copied = use_state(|| false);

  {
    let controller = controller.clone();
    let redraw = redraw.clone();
    use_effect_with((), move |_| {
      let weak = Rc::downgrade(&controller);
      let sink_redraw = redraw.clone();
      let sink = Callback::from(
        move |(event, arrival): (
          CallEvent,
          Option<Arrival>
        )| {
          let weak = weak.clone();
          let redraw = sink_redraw.clone();
          // JS callbacks may fire while the
          // controller is mid-dispatch.
          wasm_bindgen_futures::spawn_local(
            async move {
              let Some(controller) = weak.upgrade()
              else {
                release_unclaimed(&event, arrival);
                return;
              };
              {
                let mut controller =
                  controller.borrow_mut();
                if let Some(arrival) = arrival {
                  controller
                    .backend_mut()
                    .stage(arrival);
                }
                controller.dispatch(event);
                controller
                  .backend_mut()
                  .clear_staged();
              }
              redraw.force_update();
            }
          );
        }
      );

      {
        let mut ctl = controller.borrow_mut();
        ctl.backend_mut().attach(sink);
        ctl.dispatch(CallEvent::Open);
      }
      redraw.force_update();
      ui_debug("call.open", "call panel mounted");

      move || {
        controller
          .borrow_mut()
          .dispatch(CallEvent::Close);
        ui_debug("call.close", "call panel unmounted");
      }
    });
  }

  let dispatch = {
    let controller = controller.clone();
    let redraw = redraw.clone();
    Callback::from(move |event: CallEvent| {
      controller.borrow_mut().dispatch(event);
      redraw.force_update();
    })
  };

  let session = controller.borrow().session().clone();
  let status = session.status();
  let connected = session.is_connected();
  let registered = matches!(
    status,
    CallStatus::Ready
      | CallStatus::Calling
      | CallStatus::Incoming
      | CallStatus::Connected
  );
  let room_id = if registered {
    session.room_id().to_string()
  } else {
    String::new()
  };

  let on_copy = {
    let copied = copied.clone();
    let room_id = room_id.clone();
    Callback::from(move |_: MouseEvent| {
      let Some(window) = web_sys::window() else {
        return;
      };
      let promise = window
        .navigator()
        .clipboard()
        .write_text(&room_id);
      let copied = copied.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          if let Err(error) =
            JsFuture::from(promise).await
          {
            tracing::warn!(
              error = %describe_js_error(&error),
              "clipboard write failed"
            );
            return;
          }
          copied.set(true);
          TimeoutFuture::new(COPIED_FLASH_MS)
            .await;
          copied.set(false);
        }
      );
    })
  };

  let on_target = {
    let dispatch = dispatch.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        dispatch.emit(CallEvent::TargetEdited(
          input.value()
        ));
      }
    )
  };
  let on_dial = {
    let dispatch = dispatch.clone();
    Callback::from(move |_: MouseEvent| {
      dispatch.emit(CallEvent::Dial)
    })
  };
  let on_hang_up = {
    let dispatch = dispatch.clone();
    Callback::from(move |_: MouseEvent| {
      dispatch.emit(CallEvent::HangUp)
    })
  };
  let on_toggle_audio = {
    let dispatch = dispatch.clone();
    Callback::from(move |_: MouseEvent| {
      dispatch.emit(CallEvent::ToggleAudio)
    })
  };
  let on_toggle_video = {
    let dispatch = dispatch.clone();
    Callback::from(move |_: MouseEvent| {
      dispatch.emit(CallEvent::ToggleVideo)
    })
  };
  let keep_inside =
    Callback::from(|e: MouseEvent| {
      e.stop_propagation()
    });

  let audio_muted = session.is_audio_muted();
  let video_off = session.is_video_off();

  html! {
      <div class="video-call-overlay" onclick={props.on_close.clone()}>
          <div class="video-call-modal glass-card" onclick={keep_inside}>
              <div class="modal-header">
                  <h2>{ "📹 Study With Me" }</h2>
                  <button class="close-btn" type="button" onclick={props.on_close.clone()}>{ "✕" }</button>
              </div>

              <div class={classes!("connection-status", status.as_key())}>
                  <span class="status-dot"></span>
                  <span class="status-text">{ status.label() }</span>
              </div>
              {
                  match session.fault() {
                      | Some(fault) => html! { <p class="call-fault">{ fault.to_string() }</p> },
                      | None => html! {}
                  }
              }

              <div class={classes!("video-container", connected.then_some("connected"))}>
                  <div class="remote-video-wrapper">
                      <video ref={remote_view} class="remote-video" autoplay=true playsinline="true" />
                      {
                          if connected {
                              html! {}
                          } else {
                              html! {
                                  <div class="video-placeholder">
                                      <span class="placeholder-icon">{ "👋" }</span>
                                      <span>{ "Waiting for friend..." }</span>
                                  </div>
                              }
                          }
                      }
                  </div>
                  <div class={classes!("local-video-wrapper", video_off.then_some("video-off"))}>
                      <video ref={local_view} class="local-video" autoplay=true playsinline="true" muted=true />
                      {
                          if video_off {
                              html! { <div class="video-off-indicator"><span>{ "📷" }</span></div> }
                          } else {
                              html! {}
                          }
                      }
                  </div>
              </div>

              {
                  if connected {
                      html! {}
                  } else {
                      html! {
                          <div class="connection-panel">
                              <div class="room-id-section">
                                  <label>{ "Your Room ID" }</label>
                                  <div class="room-id-display">
                                      <span class="room-id">{ if room_id.is_empty() { "...".to_string() } else { room_id.clone() } }</span>
                                      <button class="copy-btn" type="button" onclick={on_copy} disabled={room_id.is_empty()}>
                                          { if *copied { "✓ Copied!" } else { "📋 Copy" } }
                                      </button>
                                  </div>
                                  <p class="room-hint">{ "Share this ID with your friend" }</p>
                              </div>
                              <div class="join-section">
                                  <label>{ "Join a Friend" }</label>
                                  <div class="join-input-group">
                                      <input
                                          type="text"
                                          class="room-input"
                                          placeholder="Enter friend's Room ID"
                                          maxlength={props.room_id_len.to_string()}
                                          value={session.target().to_string()}
                                          oninput={on_target}
                                      />
                                      <button class="join-btn" type="button" onclick={on_dial} disabled={!session.can_dial()}>{ "📞 Call" }</button>
                                  </div>
                              </div>
                          </div>
                      }
                  }
              }

              <div class="video-controls">
                  <button class={classes!("control-btn", audio_muted.then_some("off"))} type="button" onclick={on_toggle_audio} title={if audio_muted { "Unmute" } else { "Mute" }}>
                      { if audio_muted { "🔇" } else { "🎤" } }
                  </button>
                  <button class={classes!("control-btn", video_off.then_some("off"))} type="button" onclick={on_toggle_video} title={if video_off { "Turn on camera" } else { "Turn off camera" }}>
                      { if video_off { "📷" } else { "📹" } }
                  </button>
                  {
                      if connected {
                          html! { <button class="control-btn end-call" type="button" onclick={on_hang_up} title="End call">{ "📞" }</button> }
                      } else {
                          html! {}
                      }
                  }
              </div>

              <p class="privacy-notice">{ "🔒 Peer-to-peer connection • No data stored on servers" }</p>
          </div>
      </div>
  }
}
