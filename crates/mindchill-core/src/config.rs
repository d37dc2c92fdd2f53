use anyhow::Context;
use serde::{
  Deserialize,
  Serialize
};
use tracing::{
  error,
  info,
  warn
};

use crate::timer::TimerMode;

const APP_CONFIG_TOML: &str =
  include_str!("../assets/mindchill.toml");

pub const DEFAULT_TASKS_KEY: &str =
  "mindchill-todos";
pub const DEFAULT_ROOM_ID_LEN: usize = 8;
pub const DEFAULT_LONG_BREAK_EVERY: u32 =
  4;

/// One entry of the background stream
/// catalog.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct StreamRecord {
  pub id:          u32,
  pub name:        String,
  pub video_id:    String,
  #[serde(default)]
  pub description: String
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct BackdropRecord {
  pub id:   u32,
  pub name: String,
  pub url:  String
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct ModeSpec {
  pub name:    String,
  pub minutes: u32,
  pub color:   String
}

impl ModeSpec {
  pub fn duration_secs(&self) -> u32 {
    self.minutes.saturating_mul(60)
  }
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Serialize,
  Deserialize,
)]
pub struct TimerConfig {
  #[serde(
    default = "default_long_break_every"
  )]
  pub long_break_every: u32,
  pub work:             ModeSpec,
  pub short_break:      ModeSpec,
  pub long_break:       ModeSpec
}

impl TimerConfig {
  pub fn spec(
    &self,
    mode: TimerMode
  ) -> &ModeSpec {
    match mode {
      | TimerMode::Work => &self.work,
      | TimerMode::ShortBreak => {
        &self.short_break
      }
      | TimerMode::LongBreak => {
        &self.long_break
      }
    }
  }

  pub fn duration_secs(
    &self,
    mode: TimerMode
  ) -> u32 {
    self.spec(mode).duration_secs()
  }
}

impl Default for TimerConfig {
  fn default() -> Self {
    Self {
      long_break_every:
        DEFAULT_LONG_BREAK_EVERY,
      work:             ModeSpec {
        name:    "Focus".to_string(),
        minutes: 25,
        color:   "#8b5cf6".to_string()
      },
      short_break:      ModeSpec {
        name:    "Short Break"
          .to_string(),
        minutes: 5,
        color:   "#10b981".to_string()
      },
      long_break:       ModeSpec {
        name:    "Long Break"
          .to_string(),
        minutes: 15,
        color:   "#3b82f6".to_string()
      }
    }
  }
}

/// Tone played when a countdown completes.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Serialize,
  Deserialize,
)]
pub struct ChimeConfig {
  pub frequency_hz: f32,
  pub duration_ms:  u32,
  pub start_gain:   f32,
  pub end_gain:     f32
}

impl Default for ChimeConfig {
  fn default() -> Self {
    Self {
      frequency_hz: 800.0,
      duration_ms:  500,
      start_gain:   0.3,
      end_gain:     0.01
    }
  }
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct StorageConfig {
  #[serde(default = "default_tasks_key")]
  pub tasks_key: String
}

impl Default for StorageConfig {
  fn default() -> Self {
    Self {
      tasks_key: default_tasks_key()
    }
  }
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct CallConfig {
  #[serde(
    default = "default_room_id_len"
  )]
  pub room_id_len: usize
}

impl Default for CallConfig {
  fn default() -> Self {
    Self {
      room_id_len: DEFAULT_ROOM_ID_LEN
    }
  }
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Serialize,
  Deserialize,
)]
pub struct AppConfig {
  #[serde(default)]
  pub version:   u32,
  #[serde(default)]
  pub storage:   StorageConfig,
  #[serde(default)]
  pub call:      CallConfig,
  #[serde(default)]
  pub timer:     TimerConfig,
  #[serde(default)]
  pub chime:     ChimeConfig,
  #[serde(default)]
  pub streams:   Vec<StreamRecord>,
  #[serde(default)]
  pub backdrops: Vec<BackdropRecord>
}

impl AppConfig {
  /// Loads the configuration bundled
  /// with the crate, falling back to the
  /// built-in defaults when it does not
  /// parse.
  pub fn load() -> Self {
    match Self::parse(APP_CONFIG_TOML) {
      | Ok(config) => {
        info!(
          version = config.version,
          streams = config.streams.len(),
          backdrops =
            config.backdrops.len(),
          "loaded app config"
        );
        config
      }
      | Err(error) => {
        error!(error = %format!("{error:#}"), "failed parsing app config; using defaults");
        Self::default()
      }
    }
  }

  pub fn parse(
    text: &str
  ) -> anyhow::Result<Self> {
    let mut config =
      toml::from_str::<AppConfig>(text)
        .context(
          "failed to parse app config \
           toml"
        )?;
    sanitize_app_config(&mut config);
    Ok(config)
  }
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      version:   1,
      storage:   StorageConfig::default(),
      call:      CallConfig::default(),
      timer:     TimerConfig::default(),
      chime:     ChimeConfig::default(),
      streams:   default_streams(),
      backdrops: default_backdrops()
    }
  }
}

fn sanitize_app_config(
  config: &mut AppConfig
) {
  let defaults = TimerConfig::default();

  if config.timer.long_break_every == 0 {
    config.timer.long_break_every =
      DEFAULT_LONG_BREAK_EVERY;
  }
  if config.timer.work.minutes == 0 {
    config.timer.work.minutes =
      defaults.work.minutes;
  }
  if config.timer.short_break.minutes
    == 0
  {
    config.timer.short_break.minutes =
      defaults.short_break.minutes;
  }
  if config.timer.long_break.minutes == 0
  {
    config.timer.long_break.minutes =
      defaults.long_break.minutes;
  }

  if config
    .storage
    .tasks_key
    .trim()
    .is_empty()
  {
    config.storage.tasks_key =
      default_tasks_key();
  }

  // Ids are cut from a 32-digit uuid.
  config.call.room_id_len =
    config.call.room_id_len.clamp(4, 32);

  if config.streams.is_empty() {
    warn!(
      "stream catalog was empty; using \
       fallback catalog"
    );
    config.streams = default_streams();
  }
  if config.backdrops.is_empty() {
    warn!(
      "backdrop catalog was empty; using \
       fallback catalog"
    );
    config.backdrops = default_backdrops();
  }
}

fn default_tasks_key() -> String {
  DEFAULT_TASKS_KEY.to_string()
}

fn default_room_id_len() -> usize {
  DEFAULT_ROOM_ID_LEN
}

fn default_long_break_every() -> u32 {
  DEFAULT_LONG_BREAK_EVERY
}

fn default_streams() -> Vec<StreamRecord> {
  vec![StreamRecord {
    id:          1,
    name:        "Resonance".to_string(),
    video_id:    "WTeolI19oOI".to_string(),
    description: "jazzy & lofi hip hop \
                  beats"
      .to_string()
  }]
}

fn default_backdrops() -> Vec<BackdropRecord>
{
  vec![BackdropRecord {
    id:   1,
    name: "Rainy Window".to_string(),
    url:  "https://media4.giphy.com/media/13EgsbsNCLHXJm/giphy.gif"
      .to_string()
  }]
}

#[cfg(test)]
mod config_tests {
  use super::*;

  #[test]
  fn bundled_config_parses_with_full_catalogs(
  ) {
    let config =
      AppConfig::parse(APP_CONFIG_TOML)
        .expect("bundled config parses");
    assert_eq!(config.streams.len(), 3);
    assert_eq!(config.backdrops.len(), 5);
    assert_eq!(
      config.storage.tasks_key,
      "mindchill-todos"
    );
    assert_eq!(
      config
        .timer
        .duration_secs(TimerMode::Work),
      25 * 60
    );
    assert_eq!(
      config.timer.long_break_every,
      4
    );
  }

  #[test]
  fn sanitize_replaces_zero_durations_and_empty_catalogs(
  ) {
    let text = r##"
      [timer]
      long_break_every = 0
      [timer.work]
      name = "Focus"
      minutes = 0
      color = "#000000"
      [timer.short_break]
      name = "Short"
      minutes = 3
      color = "#111111"
      [timer.long_break]
      name = "Long"
      minutes = 0
      color = "#222222"
    "##;
    let config = AppConfig::parse(text)
      .expect("partial config parses");
    assert_eq!(
      config.timer.long_break_every,
      4
    );
    assert_eq!(config.timer.work.minutes, 25);
    assert_eq!(
      config.timer.short_break.minutes,
      3
    );
    assert_eq!(
      config.timer.long_break.minutes,
      15
    );
    assert!(!config.streams.is_empty());
    assert!(!config.backdrops.is_empty());
    assert_eq!(config.call.room_id_len, 8);
  }

  #[test]
  fn malformed_config_is_an_error() {
    let err = AppConfig::parse(
      "streams = \"not a list\""
    )
    .expect_err("config should not parse");
    assert!(
      format!("{err:#}")
        .contains("failed to parse app")
    );
  }
}
