use rand::Rng;
use tracing::debug;

pub use crate::config::{
  BackdropRecord,
  StreamRecord
};

pub const MAX_VOLUME: u8 = 100;
pub const DEFAULT_VOLUME: u8 = 50;

/// Playback state reported by the embedded
/// player.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
)]
pub enum EmbedState {
  #[default]
  Unstarted,
  Ended,
  Playing,
  Paused,
  Buffering,
  Cued
}

impl EmbedState {
  pub fn from_code(code: i32) -> Self {
    match code {
      | 0 => Self::Ended,
      | 1 => Self::Playing,
      | 2 => Self::Paused,
      | 3 => Self::Buffering,
      | 5 => Self::Cued,
      | _ => Self::Unstarted
    }
  }
}

/// Commands sent to the embedded player.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub enum PlayerCommand {
  Play,
  Pause,
  Mute,
  Unmute,
  SetVolume(u8),
  Load(String)
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum AmbienceEvent {
  PlayerReady,
  PlayerStateChanged(EmbedState),
  TogglePlay,
  ToggleMute,
  SetVolume(u8),
  SelectStream(usize),
  BackdropClicked,
  SelectBackdrop(usize),
  ToggleSettings
}

#[derive(Debug, Clone, PartialEq)]
pub struct AmbienceState {
  streams:        Vec<StreamRecord>,
  backdrops:      Vec<BackdropRecord>,
  stream_index:   usize,
  backdrop_index: usize,
  playing:        bool,
  volume:         u8,
  muted:          bool,
  settings_open:  bool,
  ready:          bool,
  reported:       EmbedState
}

impl AmbienceState {
  pub fn new(
    streams: Vec<StreamRecord>,
    backdrops: Vec<BackdropRecord>
  ) -> Self {
    Self {
      streams,
      backdrops,
      stream_index: 0,
      backdrop_index: 0,
      playing: false,
      volume: DEFAULT_VOLUME,
      muted: false,
      settings_open: false,
      ready: false,
      reported: EmbedState::Unstarted
    }
  }

  pub fn streams(&self) -> &[StreamRecord] {
    &self.streams
  }

  pub fn backdrops(
    &self
  ) -> &[BackdropRecord] {
    &self.backdrops
  }

  pub fn stream_index(&self) -> usize {
    self.stream_index
  }

  pub fn backdrop_index(&self) -> usize {
    self.backdrop_index
  }

  pub fn current_stream(
    &self
  ) -> Option<&StreamRecord> {
    self.streams.get(self.stream_index)
  }

  pub fn current_backdrop(
    &self
  ) -> Option<&BackdropRecord> {
    self.backdrops.get(self.backdrop_index)
  }

  pub fn is_playing(&self) -> bool {
    self.playing
  }

  pub fn is_muted(&self) -> bool {
    self.muted
  }

  pub fn volume(&self) -> u8 {
    self.volume
  }

  pub fn is_ready(&self) -> bool {
    self.ready
  }

  pub fn settings_open(&self) -> bool {
    self.settings_open
  }

  /// Volume shown on the slider: zero
  /// while muted.
  pub fn displayed_volume(&self) -> u8 {
    if self.muted { 0 } else { self.volume }
  }

  pub fn ticker_text(&self) -> String {
    self
      .streams
      .iter()
      .map(|stream| {
        format!(
          "{} - {} 📡",
          stream.name, stream.description
        )
      })
      .collect::<Vec<_>>()
      .join("  •  ")
  }

  pub fn apply(
    &mut self,
    event: AmbienceEvent
  ) -> Vec<PlayerCommand> {
    let commands = match event {
      | AmbienceEvent::PlayerReady => {
        self.ready = true;
        self.playing = true;
        vec![
          PlayerCommand::SetVolume(
            self.volume
          ),
          if self.muted {
            PlayerCommand::Mute
          } else {
            PlayerCommand::Unmute
          },
          PlayerCommand::Play,
        ]
      }
      | AmbienceEvent::PlayerStateChanged(
        state
      ) => {
        self.reported = state;
        match state {
          | EmbedState::Playing => {
            self.playing = true
          }
          | EmbedState::Paused => {
            self.playing = false
          }
          | _ => {}
        }
        vec![]
      }
      | AmbienceEvent::TogglePlay => {
        self.playing = !self.playing;
        self.reconcile().into_iter().collect()
      }
      | AmbienceEvent::ToggleMute => {
        self.muted = !self.muted;
        if self.muted {
          vec![PlayerCommand::Mute]
        } else {
          vec![
            PlayerCommand::Unmute,
            PlayerCommand::SetVolume(
              self.volume
            ),
          ]
        }
      }
      | AmbienceEvent::SetVolume(volume) => {
        self.volume = volume.min(MAX_VOLUME);
        let mut commands =
          vec![PlayerCommand::SetVolume(
            self.volume
          )];
        if self.muted && self.volume > 0 {
          self.muted = false;
          commands.push(PlayerCommand::Unmute);
        }
        commands
      }
      | AmbienceEvent::SelectStream(index) => {
        self.select_stream(index)
      }
      | AmbienceEvent::BackdropClicked => {
        if !self.backdrops.is_empty() {
          self.backdrop_index = (self
            .backdrop_index
            + 1)
            % self.backdrops.len();
        }
        vec![]
      }
      | AmbienceEvent::SelectBackdrop(
        index
      ) => {
        if index < self.backdrops.len() {
          self.backdrop_index = index;
        }
        vec![]
      }
      | AmbienceEvent::ToggleSettings => {
        self.settings_open =
          !self.settings_open;
        vec![]
      }
    };

    if self.ready {
      commands
    } else {
      vec![]
    }
  }

  /// Jumps to a random stream other than
  /// the current one and resumes playback.
  pub fn shuffle<R: Rng>(
    &mut self,
    rng: &mut R
  ) -> Vec<PlayerCommand> {
    let len = self.streams.len();
    if len == 0 {
      return vec![];
    }

    let index = if len > 1 {
      // Draw from the other len - 1 slots.
      let pick = rng.gen_range(0..len - 1);
      if pick >= self.stream_index {
        pick + 1
      } else {
        pick
      }
    } else {
      0
    };

    debug!(
      from = self.stream_index,
      to = index,
      "shuffled stream"
    );
    self.apply(AmbienceEvent::SelectStream(
      index
    ))
  }

  fn select_stream(
    &mut self,
    index: usize
  ) -> Vec<PlayerCommand> {
    let Some(stream) = self.streams.get(index)
    else {
      return vec![];
    };
    let video_id = stream.video_id.clone();
    self.stream_index = index;
    self.playing = true;
    vec![
      PlayerCommand::Load(video_id),
      PlayerCommand::Play,
    ]
  }

  // Only issue commands that change what
  // the embed is doing.
  fn reconcile(&self) -> Option<PlayerCommand> {
    match (self.playing, self.reported) {
      | (
        true,
        EmbedState::Playing
        | EmbedState::Buffering
      ) => None,
      | (true, _) => Some(PlayerCommand::Play),
      | (false, EmbedState::Playing) => {
        Some(PlayerCommand::Pause)
      }
      | (false, _) => None
    }
  }
}

#[cfg(test)]
mod ambience_tests {
  use rand::SeedableRng;
  use rand::rngs::StdRng;

  use super::*;

  fn catalog(count: u32) -> AmbienceState {
    let streams = (1..=count)
      .map(|id| StreamRecord {
        id,
        name: format!("Stream {id}"),
        video_id: format!("vid{id}"),
        description: format!("desc {id}")
      })
      .collect();
    let backdrops = (1..=3)
      .map(|id| BackdropRecord {
        id,
        name: format!("Backdrop {id}"),
        url: format!("https://example.test/{id}.gif")
      })
      .collect();
    AmbienceState::new(streams, backdrops)
  }

  fn ready(count: u32) -> AmbienceState {
    let mut state = catalog(count);
    state.apply(AmbienceEvent::PlayerReady);
    state
  }

  #[test]
  fn ready_applies_volume_mute_and_plays() {
    let mut state = catalog(3);
    assert_eq!(
      state.apply(AmbienceEvent::PlayerReady),
      vec![
        PlayerCommand::SetVolume(50),
        PlayerCommand::Unmute,
        PlayerCommand::Play,
      ]
    );
    assert!(state.is_playing());
  }

  #[test]
  fn commands_wait_for_ready_player() {
    let mut state = catalog(3);
    assert!(
      state
        .apply(AmbienceEvent::SetVolume(30))
        .is_empty()
    );
    assert_eq!(state.volume(), 30);
  }

  #[test]
  fn backdrop_click_wraps_around() {
    let mut state = catalog(2);
    for expected in [1, 2, 0, 1] {
      state.apply(AmbienceEvent::BackdropClicked);
      assert_eq!(state.backdrop_index(), expected);
    }
    state.apply(AmbienceEvent::SelectBackdrop(9));
    assert_eq!(state.backdrop_index(), 1);
  }

  #[test]
  fn shuffle_never_repeats_current_stream() {
    let mut state = ready(4);
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
      let before = state.stream_index();
      let commands = state.shuffle(&mut rng);
      assert_ne!(state.stream_index(), before);
      assert!(state.is_playing());
      assert!(matches!(
        commands.first(),
        Some(PlayerCommand::Load(_))
      ));
    }
  }

  #[test]
  fn shuffle_with_single_stream_keeps_it() {
    let mut state = ready(1);
    let mut rng = StdRng::seed_from_u64(1);
    state.shuffle(&mut rng);
    assert_eq!(state.stream_index(), 0);
  }

  #[test]
  fn play_toggle_reconciles_with_reported_state(
  ) {
    let mut state = ready(2);
    state.apply(
      AmbienceEvent::PlayerStateChanged(
        EmbedState::Playing
      )
    );
    assert_eq!(
      state.apply(AmbienceEvent::TogglePlay),
      vec![PlayerCommand::Pause]
    );
    assert!(!state.is_playing());

    state.apply(
      AmbienceEvent::PlayerStateChanged(
        EmbedState::Buffering
      )
    );
    assert!(
      state
        .apply(AmbienceEvent::TogglePlay)
        .is_empty()
    );
    assert!(state.is_playing());

    state.apply(
      AmbienceEvent::PlayerStateChanged(
        EmbedState::Paused
      )
    );
    assert!(!state.is_playing());
    assert_eq!(
      state.apply(AmbienceEvent::TogglePlay),
      vec![PlayerCommand::Play]
    );
  }

  #[test]
  fn pause_is_not_sent_when_player_is_idle() {
    let mut state = ready(2);
    state.apply(
      AmbienceEvent::PlayerStateChanged(
        EmbedState::Cued
      )
    );
    assert!(
      state
        .apply(AmbienceEvent::TogglePlay)
        .is_empty()
    );
    assert!(!state.is_playing());
  }

  #[test]
  fn raising_volume_while_muted_unmutes() {
    let mut state = ready(2);
    state.apply(AmbienceEvent::SetVolume(80));
    assert_eq!(
      state.apply(AmbienceEvent::ToggleMute),
      vec![PlayerCommand::Mute]
    );
    assert_eq!(state.displayed_volume(), 0);

    assert_eq!(
      state.apply(AmbienceEvent::SetVolume(0)),
      vec![PlayerCommand::SetVolume(0)]
    );
    assert!(state.is_muted());

    assert_eq!(
      state.apply(AmbienceEvent::SetVolume(120)),
      vec![
        PlayerCommand::SetVolume(100),
        PlayerCommand::Unmute,
      ]
    );
    assert!(!state.is_muted());
    assert_eq!(state.displayed_volume(), 100);
  }

  #[test]
  fn unmute_restores_last_volume() {
    let mut state = ready(2);
    state.apply(AmbienceEvent::SetVolume(35));
    state.apply(AmbienceEvent::ToggleMute);
    assert_eq!(
      state.apply(AmbienceEvent::ToggleMute),
      vec![
        PlayerCommand::Unmute,
        PlayerCommand::SetVolume(35),
      ]
    );
  }

  #[test]
  fn ticker_lists_every_stream() {
    let state = catalog(2);
    assert_eq!(
      state.ticker_text(),
      "Stream 1 - desc 1 📡  •  Stream 2 - desc 2 📡"
    );
  }
}
