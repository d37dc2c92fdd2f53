use mindchill_core::call::{
  Attempt,
  CallBackend,
  CallEffect,
  CallEvent,
  CallTicket,
  unclaimed_effects
};
use tracing::{
  debug,
  warn
};
use web_sys::{
  HtmlMediaElement,
  MediaStream
};
use yew::{
  Callback,
  NodeRef
};

use crate::bindings::capture::{
  flip_first_track,
  request_camera_and_mic,
  stop_all_tracks
};
use crate::bindings::peer::{
  CallLink,
  EndpointSignal,
  LinkSignal,
  MediaConnection,
  PeerEndpoint
};

/// A browser object delivered alongside
/// the event that announces it.
pub enum Arrival {
  Capture(MediaStream),
  Offer(MediaConnection),
  Remote(MediaStream)
}

impl Arrival {
  /// Lets go of the object without using
  /// it: local tracks are stopped and an
  /// unanswered offer is closed.
  pub fn release(self) {
    match self {
      | Arrival::Capture(stream) => {
        stop_all_tracks(&stream)
      }
      | Arrival::Offer(connection) => {
        connection.close()
      }
      | Arrival::Remote(_) => {}
    }
  }
}

/// Releases what an event carried after
/// the panel that asked for it has gone.
pub fn release_unclaimed(
  event: &CallEvent,
  arrival: Option<Arrival>
) {
  debug!(?event, "no call session to claim event");
  let mut backend = BrowserCallBackend::new(
    NodeRef::default(),
    NodeRef::default()
  );
  if let Some(arrival) = arrival {
    backend.stage(arrival);
  }
  for effect in unclaimed_effects(event) {
    backend.perform(&effect);
  }
  backend.clear_staged();
}

pub type CallSink =
  Callback<(CallEvent, Option<Arrival>)>;

/// Runs call effects against PeerJS, the
/// capture device and the two video
/// elements of the panel.
pub struct BrowserCallBackend {
  sink:        Option<CallSink>,
  local_view:  NodeRef,
  remote_view: NodeRef,
  staged:      Option<Arrival>,
  capture:     Option<MediaStream>,
  endpoint:    Option<PeerEndpoint>,
  link:        Option<CallLink>
}

impl BrowserCallBackend {
  pub fn new(
    local_view: NodeRef,
    remote_view: NodeRef
  ) -> Self {
    Self {
      sink: None,
      local_view,
      remote_view,
      staged: None,
      capture: None,
      endpoint: None,
      link: None
    }
  }

  pub fn attach(&mut self, sink: CallSink) {
    self.sink = Some(sink);
  }

  pub fn stage(&mut self, arrival: Arrival) {
    self.staged = Some(arrival);
  }

  /// Drops whatever the last event carried
  /// but the session did not take.
  pub fn clear_staged(&mut self) {
    if let Some(arrival) = self.staged.take() {
      arrival.release();
    }
  }

  fn take_capture(
    &mut self
  ) -> Option<MediaStream> {
    match self.staged.take() {
      | Some(Arrival::Capture(stream)) => {
        Some(stream)
      }
      | other => {
        self.staged = other;
        None
      }
    }
  }

  fn take_offer(
    &mut self
  ) -> Option<MediaConnection> {
    match self.staged.take() {
      | Some(Arrival::Offer(connection)) => {
        Some(connection)
      }
      | other => {
        self.staged = other;
        None
      }
    }
  }

  fn take_remote(
    &mut self
  ) -> Option<MediaStream> {
    match self.staged.take() {
      | Some(Arrival::Remote(stream)) => {
        Some(stream)
      }
      | other => {
        self.staged = other;
        None
      }
    }
  }

  fn request_capture(
    &self,
    attempt: Attempt
  ) -> Option<CallEvent> {
    let Some(sink) = self.sink.clone() else {
      return Some(CallEvent::CaptureDenied {
        attempt,
        reason: "call panel is not attached"
          .to_string()
      });
    };
    wasm_bindgen_futures::spawn_local(
      async move {
        match request_camera_and_mic().await {
          | Ok(stream) => sink.emit((
            CallEvent::CaptureGranted {
              attempt
            },
            Some(Arrival::Capture(stream))
          )),
          | Err(reason) => sink.emit((
            CallEvent::CaptureDenied {
              attempt,
              reason
            },
            None
          ))
        }
      }
    );
    None
  }

  fn register(
    &mut self,
    attempt: Attempt,
    room_id: &str
  ) -> Option<CallEvent> {
    let Some(sink) = self.sink.clone() else {
      return Some(CallEvent::EndpointFailed {
        attempt,
        reason: "call panel is not attached"
          .to_string()
      });
    };
    let notify =
      move |signal: EndpointSignal| match signal
      {
        | EndpointSignal::Opened(id) => sink.emit(
          (
            CallEvent::EndpointOpened {
              attempt,
              id
            },
            None
          )
        ),
        | EndpointSignal::Offer(connection) => {
          sink.emit((
            CallEvent::IncomingOffer { attempt },
            Some(Arrival::Offer(connection))
          ))
        }
        | EndpointSignal::Failed(reason) => {
          sink.emit((
            CallEvent::EndpointFailed {
              attempt,
              reason
            },
            None
          ))
        }
      };

    match PeerEndpoint::register(room_id, notify)
    {
      | Ok(endpoint) => {
        self.endpoint = Some(endpoint);
        None
      }
      | Err(reason) => {
        Some(CallEvent::EndpointFailed {
          attempt,
          reason
        })
      }
    }
  }

  fn link_notify(
    &self,
    ticket: CallTicket
  ) -> Option<impl FnMut(LinkSignal) + Clone + 'static>
  {
    let sink = self.sink.clone()?;
    Some(move |signal: LinkSignal| match signal {
      | LinkSignal::Stream(stream) => sink.emit((
        CallEvent::RemoteStream { ticket },
        Some(Arrival::Remote(stream))
      )),
      | LinkSignal::Closed => sink.emit((
        CallEvent::CallClosed { ticket },
        None
      )),
      | LinkSignal::Failed(reason) => {
        sink.emit((
          CallEvent::CallFailed {
            ticket,
            reason
          },
          None
        ))
      }
    })
  }

  fn answer(
    &mut self,
    ticket: CallTicket
  ) -> Option<CallEvent> {
    let failed = |reason: &str| {
      Some(CallEvent::CallFailed {
        ticket,
        reason: reason.to_string()
      })
    };
    let Some(connection) = self.take_offer()
    else {
      return failed("no pending offer");
    };
    let Some(capture) = self.capture.clone()
    else {
      return failed("no local capture");
    };
    let Some(notify) = self.link_notify(ticket)
    else {
      return failed(
        "call panel is not attached"
      );
    };

    let link = CallLink::watch(connection, notify);
    link.answer(&capture);
    self.link = Some(link);
    None
  }

  fn place_call(
    &mut self,
    ticket: CallTicket,
    target: &str
  ) -> Option<CallEvent> {
    let failed = |reason: String| {
      Some(CallEvent::CallFailed {
        ticket,
        reason
      })
    };
    let (Some(endpoint), Some(capture)) =
      (self.endpoint.as_ref(), self.capture.as_ref())
    else {
      return failed(
        "endpoint or capture missing".to_string()
      );
    };
    let Some(notify) = self.link_notify(ticket)
    else {
      return failed(
        "call panel is not attached".to_string()
      );
    };

    match endpoint.call(target, capture, notify) {
      | Ok(link) => {
        self.link = Some(link);
        None
      }
      | Err(reason) => failed(reason)
    }
  }

  fn toggle_track(
    &self,
    audio: bool
  ) -> Option<CallEvent> {
    let capture = self.capture.as_ref()?;
    if audio {
      flip_first_track(capture.get_audio_tracks())
        .map(|enabled| {
          CallEvent::AudioTrackState { enabled }
        })
    } else {
      flip_first_track(capture.get_video_tracks())
        .map(|enabled| {
          CallEvent::VideoTrackState { enabled }
        })
    }
  }
}

fn show_stream(
  view: &NodeRef,
  stream: Option<&MediaStream>
) {
  match view.cast::<HtmlMediaElement>() {
    | Some(element) => {
      element.set_src_object(stream);
    }
    | None => {
      debug!("video element not mounted")
    }
  }
}

impl CallBackend for BrowserCallBackend {
  fn perform(
    &mut self,
    effect: &CallEffect
  ) -> Option<CallEvent> {
    debug!(?effect, "call effect");
    match effect {
      | CallEffect::RequestCapture {
        attempt
      } => self.request_capture(*attempt),
      | CallEffect::AdoptCapture => {
        match self.take_capture() {
          | Some(stream) => {
            if let Some(element) = self
              .local_view
              .cast::<HtmlMediaElement>()
            {
              element.set_muted(true);
            }
            show_stream(
              &self.local_view,
              Some(&stream)
            );
            self.capture = Some(stream);
          }
          | None => {
            warn!("no capture staged to adopt")
          }
        }
        None
      }
      | CallEffect::DiscardCapture => {
        if let Some(stream) = self.take_capture()
        {
          stop_all_tracks(&stream);
        }
        None
      }
      | CallEffect::Register {
        attempt,
        room_id
      } => self.register(*attempt, room_id),
      | CallEffect::AnswerOffer {
        ticket
      } => self.answer(*ticket),
      | CallEffect::DeclineOffer => {
        if let Some(connection) =
          self.take_offer()
        {
          connection.close();
        }
        None
      }
      | CallEffect::PlaceCall {
        ticket,
        target
      } => self.place_call(*ticket, target),
      | CallEffect::ShowRemote => {
        if let Some(stream) = self.take_remote()
        {
          show_stream(
            &self.remote_view,
            Some(&stream)
          );
        }
        None
      }
      | CallEffect::ClearRemote => {
        show_stream(&self.remote_view, None);
        None
      }
      | CallEffect::CloseCall => {
        if let Some(link) = self.link.take() {
          link.close();
        }
        None
      }
      | CallEffect::ToggleAudioTrack => {
        self.toggle_track(true)
      }
      | CallEffect::ToggleVideoTrack => {
        self.toggle_track(false)
      }
      | CallEffect::ReleaseCapture => {
        if let Some(stream) = self.capture.take()
        {
          stop_all_tracks(&stream);
        }
        show_stream(&self.local_view, None);
        None
      }
      | CallEffect::DestroyEndpoint => {
        if let Some(endpoint) =
          self.endpoint.take()
        {
          endpoint.destroy();
        }
        None
      }
    }
  }
}
