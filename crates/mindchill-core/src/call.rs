//! "Study With Me" call session.
//!
//! A single state machine drives the panel. The peer library, the capture
//! device and the video surfaces live behind [`CallBackend`]; the machine
//! only decides which of their operations to run. Asynchronous completions
//! come back as [`CallEvent`]s tagged with the [`Attempt`] (one per panel
//! open) or the [`CallTicket`] (one per call) they belong to, so late
//! completions from a torn-down attempt or a replaced call are inert.

use std::collections::VecDeque;
use std::fmt;

use tracing::{
  debug,
  info,
  warn
};
use uuid::Uuid;

use crate::config::DEFAULT_ROOM_ID_LEN;
use crate::error::CallFault;

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
)]
pub struct Attempt(pub u32);

impl fmt::Display for Attempt {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    write!(f, "attempt#{}", self.0)
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
)]
pub struct CallTicket(pub u32);

impl fmt::Display for CallTicket {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    write!(f, "call#{}", self.0)
  }
}

/// Connection label shown on the panel.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum CallStatus {
  Idle,
  Initializing,
  Ready,
  Calling,
  Incoming,
  Connected,
  Error
}

impl CallStatus {
  pub fn as_key(self) -> &'static str {
    match self {
      | Self::Idle => "idle",
      | Self::Initializing => "initializing",
      | Self::Ready => "ready",
      | Self::Calling => "calling",
      | Self::Incoming => "incoming",
      | Self::Connected => "connected",
      | Self::Error => "error"
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | Self::Idle => "Initializing...",
      | Self::Initializing => {
        "Setting up camera..."
      }
      | Self::Ready => "Ready to connect",
      | Self::Calling => "Calling...",
      | Self::Incoming => "Incoming call...",
      | Self::Connected => "Connected",
      | Self::Error => "Connection error"
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
  Idle,
  AwaitingCapture,
  Registering,
  Ready,
  Calling(CallTicket),
  Incoming(CallTicket),
  Connected(CallTicket),
  Failed(CallFault)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallEvent {
  /// The panel was opened.
  Open,
  CaptureGranted {
    attempt: Attempt
  },
  CaptureDenied {
    attempt: Attempt,
    reason:  String
  },
  EndpointOpened {
    attempt: Attempt,
    id:      String
  },
  EndpointFailed {
    attempt: Attempt,
    reason:  String
  },
  IncomingOffer {
    attempt: Attempt
  },
  RemoteStream {
    ticket: CallTicket
  },
  CallClosed {
    ticket: CallTicket
  },
  CallFailed {
    ticket: CallTicket,
    reason: String
  },
  /// Track state read back after a
  /// toggle.
  AudioTrackState {
    enabled: bool
  },
  VideoTrackState {
    enabled: bool
  },
  TargetEdited(String),
  Dial,
  HangUp,
  ToggleAudio,
  ToggleVideo,
  /// The panel was closed or disposed.
  Close
}

/// Operations the backend runs on behalf
/// of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallEffect {
  RequestCapture {
    attempt: Attempt
  },
  /// Keep the capture that was just
  /// granted and show it locally.
  AdoptCapture,
  /// Stop every track of the capture that
  /// was just granted to a dead attempt.
  DiscardCapture,
  Register {
    attempt: Attempt,
    room_id: String
  },
  /// Answer the offer that was just
  /// received with the local capture.
  AnswerOffer {
    ticket: CallTicket
  },
  /// Close the offer that was just
  /// received without answering it.
  DeclineOffer,
  PlaceCall {
    ticket: CallTicket,
    target: String
  },
  /// Show the remote stream that just
  /// arrived.
  ShowRemote,
  ClearRemote,
  CloseCall,
  ToggleAudioTrack,
  ToggleVideoTrack,
  ReleaseCapture,
  DestroyEndpoint
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSession {
  phase:       Phase,
  attempt:     Attempt,
  next_ticket: u32,
  room_id_len: usize,
  room_id:     String,
  target:      String,
  has_capture: bool,
  audio_muted: bool,
  video_off:   bool
}

impl Default for CallSession {
  fn default() -> Self {
    Self::new(DEFAULT_ROOM_ID_LEN)
  }
}

impl CallSession {
  pub fn new(room_id_len: usize) -> Self {
    Self {
      phase: Phase::Idle,
      attempt: Attempt::default(),
      next_ticket: 0,
      room_id_len,
      room_id: String::new(),
      target: String::new(),
      has_capture: false,
      audio_muted: false,
      video_off: false
    }
  }

  pub fn status(&self) -> CallStatus {
    match self.phase {
      | Phase::Idle => CallStatus::Idle,
      | Phase::AwaitingCapture
      | Phase::Registering => {
        CallStatus::Initializing
      }
      | Phase::Ready => CallStatus::Ready,
      | Phase::Calling(_) => {
        CallStatus::Calling
      }
      | Phase::Incoming(_) => {
        CallStatus::Incoming
      }
      | Phase::Connected(_) => {
        CallStatus::Connected
      }
      | Phase::Failed(_) => CallStatus::Error
    }
  }

  pub fn fault(&self) -> Option<&CallFault> {
    match &self.phase {
      | Phase::Failed(fault) => Some(fault),
      | _ => None
    }
  }

  pub fn attempt(&self) -> Attempt {
    self.attempt
  }

  pub fn room_id(&self) -> &str {
    &self.room_id
  }

  pub fn target(&self) -> &str {
    &self.target
  }

  pub fn is_connected(&self) -> bool {
    matches!(self.phase, Phase::Connected(_))
  }

  pub fn is_audio_muted(&self) -> bool {
    self.audio_muted
  }

  pub fn is_video_off(&self) -> bool {
    self.video_off
  }

  pub fn has_capture(&self) -> bool {
    self.has_capture
  }

  pub fn active_call(
    &self
  ) -> Option<CallTicket> {
    match self.phase {
      | Phase::Calling(ticket)
      | Phase::Incoming(ticket)
      | Phase::Connected(ticket) => {
        Some(ticket)
      }
      | _ => None
    }
  }

  /// Whether the dial button should be
  /// enabled.
  pub fn can_dial(&self) -> bool {
    self.phase == Phase::Ready
      && self.has_capture
      && !normalize_room_id(&self.target)
        .is_empty()
  }

  pub fn apply(
    &mut self,
    event: CallEvent
  ) -> Vec<CallEffect> {
    let before = self.status();
    let effects = self.transition(event);
    let after = self.status();
    if before != after {
      info!(
        from = before.as_key(),
        to = after.as_key(),
        attempt = %self.attempt,
        "call status changed"
      );
    }
    effects
  }

  fn transition(
    &mut self,
    event: CallEvent
  ) -> Vec<CallEffect> {
    match event {
      | CallEvent::Open => self.open(),
      | CallEvent::CaptureGranted {
        attempt
      } => {
        if !self.is_current(attempt)
          || self.phase
            != Phase::AwaitingCapture
        {
          debug!(%attempt, "discarding capture from stale attempt");
          return vec![
            CallEffect::DiscardCapture,
          ];
        }
        self.has_capture = true;
        self.room_id =
          generate_room_id(self.room_id_len);
        self.phase = Phase::Registering;
        vec![
          CallEffect::AdoptCapture,
          CallEffect::Register {
            attempt,
            room_id: self.room_id.clone()
          },
        ]
      }
      | CallEvent::CaptureDenied {
        attempt,
        reason
      } => {
        if self.is_current(attempt)
          && self.phase
            == Phase::AwaitingCapture
        {
          warn!(%reason, "capture request failed");
          self.phase = Phase::Failed(
            CallFault::CaptureUnavailable(
              reason
            )
          );
        }
        vec![]
      }
      | CallEvent::EndpointOpened {
        attempt,
        id
      } => {
        if self.is_current(attempt)
          && self.phase == Phase::Registering
        {
          self.room_id = id;
          self.phase = Phase::Ready;
        }
        vec![]
      }
      | CallEvent::EndpointFailed {
        attempt,
        reason
      } => {
        if !self.is_current(attempt) {
          return vec![];
        }
        self.endpoint_failed(reason)
      }
      | CallEvent::IncomingOffer {
        attempt
      } => {
        if !self.is_current(attempt)
          || self.phase != Phase::Ready
        {
          debug!(
            status = self.status().as_key(),
            "declining incoming offer"
          );
          return vec![CallEffect::DeclineOffer];
        }
        let ticket = self.issue_ticket();
        self.phase = Phase::Incoming(ticket);
        vec![CallEffect::AnswerOffer {
          ticket
        }]
      }
      | CallEvent::RemoteStream {
        ticket
      } => match self.phase {
        | Phase::Calling(active)
        | Phase::Incoming(active)
          if active == ticket =>
        {
          self.phase =
            Phase::Connected(ticket);
          vec![CallEffect::ShowRemote]
        }
        | _ => vec![]
      },
      | CallEvent::CallClosed {
        ticket
      } => {
        if self.active_call() != Some(ticket)
        {
          return vec![];
        }
        self.phase = Phase::Ready;
        vec![
          CallEffect::CloseCall,
          CallEffect::ClearRemote,
        ]
      }
      | CallEvent::CallFailed {
        ticket,
        reason
      } => {
        if self.active_call() != Some(ticket)
        {
          return vec![];
        }
        warn!(%ticket, %reason, "call failed");
        self.phase = Phase::Failed(
          CallFault::Transport(reason)
        );
        vec![
          CallEffect::CloseCall,
          CallEffect::ClearRemote,
        ]
      }
      | CallEvent::AudioTrackState {
        enabled
      } => {
        if self.has_capture {
          self.audio_muted = !enabled;
        }
        vec![]
      }
      | CallEvent::VideoTrackState {
        enabled
      } => {
        if self.has_capture {
          self.video_off = !enabled;
        }
        vec![]
      }
      | CallEvent::TargetEdited(text) => {
        if self.phase != Phase::Idle {
          self.target = text.to_uppercase();
        }
        vec![]
      }
      | CallEvent::Dial => self.dial(),
      | CallEvent::HangUp => {
        if self.active_call().is_none() {
          return vec![];
        }
        self.phase = Phase::Ready;
        self.target.clear();
        vec![
          CallEffect::CloseCall,
          CallEffect::ClearRemote,
        ]
      }
      | CallEvent::ToggleAudio => {
        if self.has_capture {
          vec![CallEffect::ToggleAudioTrack]
        } else {
          vec![]
        }
      }
      | CallEvent::ToggleVideo => {
        if self.has_capture {
          vec![CallEffect::ToggleVideoTrack]
        } else {
          vec![]
        }
      }
      | CallEvent::Close => self.teardown()
    }
  }

  fn open(&mut self) -> Vec<CallEffect> {
    if self.phase != Phase::Idle {
      debug!(
        status = self.status().as_key(),
        "open ignored; session already \
         started"
      );
      return vec![];
    }
    self.attempt =
      Attempt(self.attempt.0.wrapping_add(1));
    self.phase = Phase::AwaitingCapture;
    vec![CallEffect::RequestCapture {
      attempt: self.attempt
    }]
  }

  fn dial(&mut self) -> Vec<CallEffect> {
    let target = normalize_room_id(&self.target);
    if self.phase != Phase::Ready
      || !self.has_capture
      || target.is_empty()
    {
      debug!(
        status = self.status().as_key(),
        "dial ignored"
      );
      return vec![];
    }

    let ticket = self.issue_ticket();
    self.target = target.clone();
    self.phase = Phase::Calling(ticket);
    info!(%ticket, target = %target, "placing call");
    vec![CallEffect::PlaceCall {
      ticket,
      target
    }]
  }

  fn endpoint_failed(
    &mut self,
    reason: String
  ) -> Vec<CallEffect> {
    warn!(%reason, status = self.status().as_key(), "endpoint error");
    match self.phase {
      | Phase::Registering => {
        self.phase = Phase::Failed(
          CallFault::RegistrationFailed(
            reason
          )
        );
        vec![]
      }
      | Phase::Ready => {
        self.phase = Phase::Failed(
          CallFault::Transport(reason)
        );
        vec![]
      }
      | Phase::Calling(_)
      | Phase::Incoming(_)
      | Phase::Connected(_) => {
        self.phase = Phase::Failed(
          CallFault::Transport(reason)
        );
        vec![
          CallEffect::CloseCall,
          CallEffect::ClearRemote,
        ]
      }
      | Phase::Idle
      | Phase::AwaitingCapture
      | Phase::Failed(_) => vec![]
    }
  }

  fn teardown(&mut self) -> Vec<CallEffect> {
    let mut effects = Vec::new();
    if self.active_call().is_some() {
      effects.push(CallEffect::CloseCall);
      effects.push(CallEffect::ClearRemote);
    }
    effects.push(CallEffect::ReleaseCapture);
    effects.push(CallEffect::DestroyEndpoint);

    *self = Self {
      attempt: self.attempt,
      next_ticket: self.next_ticket,
      ..Self::new(self.room_id_len)
    };
    effects
  }

  fn is_current(
    &self,
    attempt: Attempt
  ) -> bool {
    self.phase != Phase::Idle
      && attempt == self.attempt
  }

  fn issue_ticket(&mut self) -> CallTicket {
    self.next_ticket =
      self.next_ticket.wrapping_add(1);
    CallTicket(self.next_ticket)
  }
}

/// Trims and uppercases a typed room id.
pub fn normalize_room_id(raw: &str) -> String {
  raw.trim().to_uppercase()
}

/// A short shareable room id: the leading
/// hex digits of a random v4 uuid,
/// uppercased.
pub fn generate_room_id(len: usize) -> String {
  Uuid::new_v4()
    .simple()
    .to_string()
    .chars()
    .take(len)
    .collect::<String>()
    .to_uppercase()
}

/// Effects that release what an event
/// carries once no session is left to
/// claim it.
pub fn unclaimed_effects(
  event: &CallEvent
) -> Vec<CallEffect> {
  match event {
    | CallEvent::CaptureGranted { .. } => {
      vec![CallEffect::DiscardCapture]
    }
    | CallEvent::IncomingOffer { .. } => {
      vec![CallEffect::DeclineOffer]
    }
    | _ => vec![]
  }
}

/// Runs collaborator operations for the
/// session. A returned event is fed back
/// into the session right away.
pub trait CallBackend {
  fn perform(
    &mut self,
    effect: &CallEffect
  ) -> Option<CallEvent>;
}

pub struct CallController<B> {
  session: CallSession,
  backend: B
}

impl<B: CallBackend> CallController<B> {
  pub fn new(
    session: CallSession,
    backend: B
  ) -> Self {
    Self { session, backend }
  }

  pub fn session(&self) -> &CallSession {
    &self.session
  }

  pub fn backend(&self) -> &B {
    &self.backend
  }

  pub fn backend_mut(&mut self) -> &mut B {
    &mut self.backend
  }

  pub fn dispatch(&mut self, event: CallEvent) {
    let mut queue = VecDeque::from([event]);
    while let Some(event) = queue.pop_front() {
      for effect in self.session.apply(event) {
        if let Some(follow_up) =
          self.backend.perform(&effect)
        {
          queue.push_back(follow_up);
        }
      }
    }
  }
}

#[cfg(test)]
mod call_tests {
  use super::*;

  #[derive(Debug, Default)]
  struct FakeBackend {
    staged_tracks: usize,
    live_tracks:   usize,
    stopped:       usize,
    audio_enabled: bool,
    video_enabled: bool,
    endpoint:      Option<String>,
    active_call:   Option<CallTicket>,
    declined:      usize,
    remote_shown:  bool,
    requests:      Vec<Attempt>,
    dialed:        Vec<String>
  }

  impl CallBackend for FakeBackend {
    fn perform(
      &mut self,
      effect: &CallEffect
    ) -> Option<CallEvent> {
      match effect {
        | CallEffect::RequestCapture {
          attempt
        } => self.requests.push(*attempt),
        | CallEffect::AdoptCapture => {
          self.live_tracks =
            std::mem::take(&mut self.staged_tracks);
          self.audio_enabled = true;
          self.video_enabled = true;
        }
        | CallEffect::DiscardCapture => {
          self.stopped +=
            std::mem::take(&mut self.staged_tracks);
        }
        | CallEffect::Register {
          room_id,
          ..
        } => self.endpoint = Some(room_id.clone()),
        | CallEffect::AnswerOffer {
          ticket
        } => self.active_call = Some(*ticket),
        | CallEffect::DeclineOffer => {
          self.declined += 1
        }
        | CallEffect::PlaceCall {
          ticket,
          target
        } => {
          self.active_call = Some(*ticket);
          self.dialed.push(target.clone());
        }
        | CallEffect::ShowRemote => {
          self.remote_shown = true
        }
        | CallEffect::ClearRemote => {
          self.remote_shown = false
        }
        | CallEffect::CloseCall => {
          self.active_call = None
        }
        | CallEffect::ToggleAudioTrack => {
          if self.live_tracks == 0 {
            return None;
          }
          self.audio_enabled = !self.audio_enabled;
          return Some(CallEvent::AudioTrackState {
            enabled: self.audio_enabled
          });
        }
        | CallEffect::ToggleVideoTrack => {
          if self.live_tracks == 0 {
            return None;
          }
          self.video_enabled = !self.video_enabled;
          return Some(CallEvent::VideoTrackState {
            enabled: self.video_enabled
          });
        }
        | CallEffect::ReleaseCapture => {
          self.stopped +=
            std::mem::take(&mut self.live_tracks);
        }
        | CallEffect::DestroyEndpoint => {
          self.endpoint = None
        }
      }
      None
    }
  }

  type Controller = CallController<FakeBackend>;

  fn controller() -> Controller {
    CallController::new(
      CallSession::default(),
      FakeBackend::default()
    )
  }

  fn grant(ctl: &mut Controller) {
    let attempt = ctl.session().attempt();
    ctl.backend_mut().staged_tracks = 2;
    ctl.dispatch(CallEvent::CaptureGranted {
      attempt
    });
  }

  fn ready(ctl: &mut Controller) {
    ctl.dispatch(CallEvent::Open);
    grant(ctl);
    let attempt = ctl.session().attempt();
    let id = ctl.session().room_id().to_string();
    ctl.dispatch(CallEvent::EndpointOpened {
      attempt,
      id
    });
  }

  fn assert_torn_down(ctl: &Controller) {
    assert_eq!(ctl.session().status(), CallStatus::Idle);
    assert_eq!(ctl.backend().live_tracks, 0);
    assert!(ctl.backend().endpoint.is_none());
    assert!(ctl.backend().active_call.is_none());
    assert!(!ctl.backend().remote_shown);
    assert!(ctl.session().room_id().is_empty());
    assert!(ctl.session().target().is_empty());
    assert!(!ctl.session().is_audio_muted());
    assert!(!ctl.session().is_video_off());
  }

  #[test]
  fn open_registers_uppercase_room_and_becomes_ready(
  ) {
    let mut ctl = controller();
    ctl.dispatch(CallEvent::Open);
    assert_eq!(
      ctl.session().status(),
      CallStatus::Initializing
    );
    assert_eq!(ctl.backend().requests.len(), 1);

    grant(&mut ctl);
    let room = ctl.session().room_id().to_string();
    assert_eq!(room.len(), 8);
    assert!(room.chars().all(|c| {
      c.is_ascii_digit() || c.is_ascii_uppercase()
    }));
    assert_eq!(
      ctl.backend().endpoint.as_deref(),
      Some(room.as_str())
    );
    assert_eq!(
      ctl.session().status(),
      CallStatus::Initializing
    );

    let attempt = ctl.session().attempt();
    ctl.dispatch(CallEvent::EndpointOpened {
      attempt,
      id: room.clone()
    });
    assert_eq!(
      ctl.session().status(),
      CallStatus::Ready
    );
    assert_eq!(ctl.backend().live_tracks, 2);
  }

  #[test]
  fn denied_capture_ends_in_error_not_ready() {
    let mut ctl = controller();
    ctl.dispatch(CallEvent::Open);
    let attempt = ctl.session().attempt();
    ctl.dispatch(CallEvent::CaptureDenied {
      attempt,
      reason: "NotAllowedError".to_string()
    });
    assert_eq!(
      ctl.session().status(),
      CallStatus::Error
    );
    assert!(matches!(
      ctl.session().fault(),
      Some(CallFault::CaptureUnavailable(_))
    ));

    ctl.dispatch(CallEvent::EndpointOpened {
      attempt,
      id: "ABCDEF12".to_string()
    });
    assert_eq!(
      ctl.session().status(),
      CallStatus::Error
    );
  }

  #[test]
  fn registration_failure_is_an_error() {
    let mut ctl = controller();
    ctl.dispatch(CallEvent::Open);
    grant(&mut ctl);
    let attempt = ctl.session().attempt();
    ctl.dispatch(CallEvent::EndpointFailed {
      attempt,
      reason: "unavailable-id".to_string()
    });
    assert!(matches!(
      ctl.session().fault(),
      Some(CallFault::RegistrationFailed(_))
    ));
  }

  #[test]
  fn incoming_offer_is_answered_then_connects() {
    let mut ctl = controller();
    ready(&mut ctl);
    let attempt = ctl.session().attempt();

    ctl.dispatch(CallEvent::IncomingOffer {
      attempt
    });
    assert_eq!(
      ctl.session().status(),
      CallStatus::Incoming
    );
    let ticket = ctl
      .backend()
      .active_call
      .expect("offer answered");

    ctl.dispatch(CallEvent::RemoteStream {
      ticket
    });
    assert!(ctl.session().is_connected());
    assert!(ctl.backend().remote_shown);

    // A second offer while connected is
    // declined.
    ctl.dispatch(CallEvent::IncomingOffer {
      attempt
    });
    assert_eq!(
      ctl.backend().active_call,
      Some(ticket)
    );
    assert_eq!(ctl.backend().declined, 1);
    assert!(ctl.session().is_connected());

    ctl.dispatch(CallEvent::CallClosed {
      ticket
    });
    assert_eq!(
      ctl.session().status(),
      CallStatus::Ready
    );
    assert!(!ctl.backend().remote_shown);
  }

  #[test]
  fn dial_while_calling_is_ignored() {
    let mut ctl = controller();
    ready(&mut ctl);
    ctl.dispatch(CallEvent::TargetEdited(
      "friend01".to_string()
    ));
    ctl.dispatch(CallEvent::Dial);
    assert_eq!(
      ctl.session().status(),
      CallStatus::Calling
    );

    ctl.dispatch(CallEvent::Dial);
    assert_eq!(
      ctl.session().status(),
      CallStatus::Calling
    );
    assert_eq!(ctl.session().target(), "FRIEND01");
    assert_eq!(ctl.backend().dialed, vec![
      "FRIEND01".to_string()
    ]);
  }

  #[test]
  fn blank_target_is_rejected() {
    let mut ctl = controller();
    ready(&mut ctl);
    ctl.dispatch(CallEvent::TargetEdited(
      "   ".to_string()
    ));
    assert!(!ctl.session().can_dial());
    ctl.dispatch(CallEvent::Dial);
    assert_eq!(
      ctl.session().status(),
      CallStatus::Ready
    );
    assert!(ctl.backend().dialed.is_empty());
  }

  #[test]
  fn hang_up_returns_to_ready_and_clears_target(
  ) {
    let mut ctl = controller();
    ready(&mut ctl);
    ctl.dispatch(CallEvent::TargetEdited(
      "abcd1234".to_string()
    ));
    ctl.dispatch(CallEvent::Dial);
    let ticket = ctl
      .session()
      .active_call()
      .expect("call placed");
    ctl.dispatch(CallEvent::RemoteStream {
      ticket
    });
    assert!(ctl.session().is_connected());

    ctl.dispatch(CallEvent::HangUp);
    assert_eq!(
      ctl.session().status(),
      CallStatus::Ready
    );
    assert!(ctl.session().target().is_empty());
    assert!(ctl.backend().active_call.is_none());

    // The close echo from the peer library
    // arrives after the hang-up.
    ctl.dispatch(CallEvent::CallClosed {
      ticket
    });
    assert_eq!(
      ctl.session().status(),
      CallStatus::Ready
    );
  }

  #[test]
  fn call_transport_failure_ends_call_in_error(
  ) {
    let mut ctl = controller();
    ready(&mut ctl);
    ctl.dispatch(CallEvent::TargetEdited(
      "PEER0001".to_string()
    ));
    ctl.dispatch(CallEvent::Dial);
    let ticket = ctl
      .session()
      .active_call()
      .expect("call placed");
    ctl.dispatch(CallEvent::CallFailed {
      ticket,
      reason: "negotiation failed".to_string()
    });
    assert_eq!(
      ctl.session().status(),
      CallStatus::Error
    );
    assert!(ctl.backend().active_call.is_none());
  }

  #[test]
  fn track_flags_mirror_track_state() {
    let mut ctl = controller();
    ctl.dispatch(CallEvent::ToggleAudio);
    assert!(!ctl.session().is_audio_muted());

    ready(&mut ctl);
    ctl.dispatch(CallEvent::ToggleAudio);
    assert!(ctl.session().is_audio_muted());
    assert!(!ctl.backend().audio_enabled);
    ctl.dispatch(CallEvent::ToggleVideo);
    assert!(ctl.session().is_video_off());
    ctl.dispatch(CallEvent::ToggleAudio);
    assert!(!ctl.session().is_audio_muted());
    assert_eq!(ctl.backend().live_tracks, 2);
  }

  #[test]
  fn teardown_from_every_phase_releases_everything(
  ) {
    type Setup = fn(&mut Controller);
    let setups: [Setup; 8] = [
      |_| {},
      |ctl| ctl.dispatch(CallEvent::Open),
      |ctl| {
        ctl.dispatch(CallEvent::Open);
        grant(ctl);
      },
      ready,
      |ctl| {
        ready(ctl);
        ctl.dispatch(CallEvent::TargetEdited(
          "AAAA1111".to_string()
        ));
        ctl.dispatch(CallEvent::Dial);
      },
      |ctl| {
        ready(ctl);
        let attempt = ctl.session().attempt();
        ctl.dispatch(CallEvent::IncomingOffer {
          attempt
        });
        let ticket = ctl
          .session()
          .active_call()
          .expect("answered");
        ctl.dispatch(CallEvent::RemoteStream {
          ticket
        });
        ctl.dispatch(CallEvent::ToggleAudio);
      },
      |ctl| {
        ready(ctl);
        let attempt = ctl.session().attempt();
        ctl.dispatch(CallEvent::IncomingOffer {
          attempt
        });
        assert_eq!(
          ctl.session().status(),
          CallStatus::Incoming
        );
      },
      |ctl| {
        ready(ctl);
        let attempt = ctl.session().attempt();
        ctl.dispatch(CallEvent::EndpointFailed {
          attempt,
          reason: "network".to_string()
        });
        assert_eq!(
          ctl.session().status(),
          CallStatus::Error
        );
      }
    ];

    for setup in setups {
      let mut ctl = controller();
      setup(&mut ctl);
      ctl.dispatch(CallEvent::Close);
      assert_torn_down(&ctl);
      ctl.dispatch(CallEvent::Close);
      assert_torn_down(&ctl);
    }
  }

  #[test]
  fn capture_granted_after_close_is_discarded() {
    let mut ctl = controller();
    ctl.dispatch(CallEvent::Open);
    let stale = ctl.session().attempt();
    ctl.dispatch(CallEvent::Close);

    ctl.dispatch(CallEvent::Open);
    ctl.backend_mut().staged_tracks = 2;
    ctl.dispatch(CallEvent::CaptureGranted {
      attempt: stale
    });
    assert_eq!(ctl.backend().live_tracks, 0);
    assert_eq!(ctl.backend().stopped, 2);
    assert_eq!(
      ctl.session().status(),
      CallStatus::Initializing
    );

    grant(&mut ctl);
    assert_eq!(ctl.backend().live_tracks, 2);
    assert!(ctl.backend().endpoint.is_some());
  }

  #[test]
  fn arrivals_after_the_session_is_gone_are_released(
  ) {
    let mut ctl = controller();
    ctl.dispatch(CallEvent::Open);
    let attempt = ctl.session().attempt();
    ctl.dispatch(CallEvent::Close);

    let mut orphan = FakeBackend {
      staged_tracks: 2,
      ..FakeBackend::default()
    };
    for event in [
      CallEvent::CaptureGranted { attempt },
      CallEvent::IncomingOffer { attempt },
      CallEvent::RemoteStream {
        ticket: CallTicket(1)
      }
    ] {
      for effect in unclaimed_effects(&event) {
        assert_eq!(orphan.perform(&effect), None);
      }
    }
    assert_eq!(orphan.staged_tracks, 0);
    assert_eq!(orphan.stopped, 2);
    assert_eq!(orphan.live_tracks, 0);
    assert_eq!(orphan.declined, 1);
    assert!(orphan.active_call.is_none());
  }

  #[test]
  fn lowercase_target_dials_uppercase_room() {
    let mut lower = controller();
    let mut upper = controller();
    for (ctl, typed) in [
      (&mut lower, " ab12cd34 "),
      (&mut upper, "AB12CD34")
    ] {
      ready(ctl);
      ctl.dispatch(CallEvent::TargetEdited(
        typed.to_string()
      ));
      ctl.dispatch(CallEvent::Dial);
    }
    assert_eq!(
      lower.backend().dialed,
      upper.backend().dialed
    );
    assert_eq!(
      lower.session().status(),
      upper.session().status()
    );
  }

  #[test]
  fn status_labels_match_panel_text() {
    assert_eq!(
      CallStatus::Initializing.label(),
      "Setting up camera..."
    );
    assert_eq!(
      CallStatus::Ready.as_key(),
      "ready"
    );
    assert_eq!(
      CallStatus::Error.label(),
      "Connection error"
    );
  }
}
