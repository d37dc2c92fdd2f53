use tracing::{
  debug,
  info
};

use crate::config::{
  ModeSpec,
  TimerConfig
};

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
)]
pub enum TimerMode {
  Work,
  ShortBreak,
  LongBreak
}

impl TimerMode {
  pub fn all() -> [Self; 3] {
    [Self::Work, Self::ShortBreak, Self::LongBreak]
  }

  pub fn as_key(self) -> &'static str {
    match self {
      | Self::Work => "work",
      | Self::ShortBreak => "short-break",
      | Self::LongBreak => "long-break"
    }
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum TimerEvent {
  /// One second of wall time elapsed.
  Tick,
  Toggle,
  Reset,
  Select(TimerMode)
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum TimerEffect {
  Chime
}

/// Pomodoro countdown. `remaining` never
/// leaves `0..=duration(mode)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusTimer {
  config:    TimerConfig,
  mode:      TimerMode,
  remaining: u32,
  running:   bool,
  sessions:  u32
}

impl FocusTimer {
  pub fn new(config: TimerConfig) -> Self {
    let remaining =
      config.duration_secs(TimerMode::Work);
    Self {
      config,
      mode: TimerMode::Work,
      remaining,
      running: false,
      sessions: 0
    }
  }

  pub fn mode(&self) -> TimerMode {
    self.mode
  }

  pub fn remaining(&self) -> u32 {
    self.remaining
  }

  pub fn is_running(&self) -> bool {
    self.running
  }

  pub fn sessions(&self) -> u32 {
    self.sessions
  }

  pub fn spec(&self) -> &ModeSpec {
    self.config.spec(self.mode)
  }

  pub fn spec_for(
    &self,
    mode: TimerMode
  ) -> &ModeSpec {
    self.config.spec(mode)
  }

  pub fn duration(&self) -> u32 {
    self.config.duration_secs(self.mode)
  }

  /// Elapsed share of the current mode,
  /// from 0.0 to 1.0.
  pub fn progress(&self) -> f64 {
    let duration = self.duration();
    if duration == 0 {
      return 0.0;
    }
    f64::from(duration - self.remaining)
      / f64::from(duration)
  }

  /// Lit state of the session dots; dot
  /// `n` (1-based) is lit once
  /// `sessions % interval >= n`.
  pub fn session_dots(&self) -> Vec<bool> {
    let interval =
      self.config.long_break_every.max(1);
    let filled = self.sessions % interval;
    (1..=interval)
      .map(|dot| filled >= dot)
      .collect()
  }

  pub fn apply(
    &mut self,
    event: TimerEvent
  ) -> Vec<TimerEffect> {
    match event {
      | TimerEvent::Tick => self.tick(),
      | TimerEvent::Toggle => {
        self.running = !self.running;
        debug!(
          running = self.running,
          mode = self.mode.as_key(),
          remaining = self.remaining,
          "toggled timer"
        );
        vec![]
      }
      | TimerEvent::Reset => {
        self.running = false;
        self.remaining = self.duration();
        vec![]
      }
      | TimerEvent::Select(mode) => {
        self.enter(mode);
        vec![]
      }
    }
  }

  fn tick(&mut self) -> Vec<TimerEffect> {
    if !self.running || self.remaining == 0
    {
      return vec![];
    }

    self.remaining -= 1;
    if self.remaining > 0 {
      return vec![];
    }

    let next = match self.mode {
      | TimerMode::Work => {
        self.sessions += 1;
        if self.sessions
          % self.config.long_break_every.max(1)
          == 0
        {
          TimerMode::LongBreak
        } else {
          TimerMode::ShortBreak
        }
      }
      | TimerMode::ShortBreak
      | TimerMode::LongBreak => {
        TimerMode::Work
      }
    };

    info!(
      finished = self.mode.as_key(),
      next = next.as_key(),
      sessions = self.sessions,
      "countdown completed"
    );
    self.enter(next);
    vec![TimerEffect::Chime]
  }

  fn enter(&mut self, mode: TimerMode) {
    self.mode = mode;
    self.remaining =
      self.config.duration_secs(mode);
    self.running = false;
  }
}

/// Formats seconds as `MM:SS`.
pub fn format_clock(seconds: u32) -> String {
  format!(
    "{:02}:{:02}",
    seconds / 60,
    seconds % 60
  )
}

#[cfg(test)]
mod timer_tests {
  use super::*;
  use crate::config::ModeSpec;

  fn quick_config() -> TimerConfig {
    let spec = |name: &str, minutes| {
      ModeSpec {
        name: name.to_string(),
        minutes,
        color: "#ffffff".to_string()
      }
    };
    TimerConfig {
      long_break_every: 4,
      work:             spec("Focus", 2),
      short_break:      spec("Short", 1),
      long_break:       spec("Long", 3)
    }
  }

  fn run_to_zero(
    timer: &mut FocusTimer
  ) -> Vec<TimerEffect> {
    timer.apply(TimerEvent::Toggle);
    let mut effects = Vec::new();
    for _ in 0..timer.duration() {
      effects.extend(
        timer.apply(TimerEvent::Tick)
      );
    }
    effects
  }

  #[test]
  fn starts_paused_in_work_with_full_duration(
  ) {
    let timer =
      FocusTimer::new(TimerConfig::default());
    assert_eq!(timer.mode(), TimerMode::Work);
    assert!(!timer.is_running());
    assert_eq!(timer.remaining(), 25 * 60);
    assert_eq!(timer.progress(), 0.0);
  }

  #[test]
  fn paused_timer_ignores_ticks() {
    let mut timer =
      FocusTimer::new(quick_config());
    assert!(
      timer.apply(TimerEvent::Tick).is_empty()
    );
    assert_eq!(timer.remaining(), 120);
  }

  #[test]
  fn completed_work_chimes_once_and_goes_to_short_break(
  ) {
    let mut timer =
      FocusTimer::new(quick_config());
    let effects = run_to_zero(&mut timer);

    assert_eq!(effects, vec![TimerEffect::Chime]);
    assert_eq!(timer.sessions(), 1);
    assert_eq!(
      timer.mode(),
      TimerMode::ShortBreak
    );
    assert!(!timer.is_running());
    assert_eq!(timer.remaining(), 60);
  }

  #[test]
  fn fourth_session_goes_to_long_break() {
    let mut timer =
      FocusTimer::new(quick_config());
    for expected in 1..=3 {
      run_to_zero(&mut timer);
      assert_eq!(timer.sessions(), expected);
      assert_eq!(
        timer.mode(),
        TimerMode::ShortBreak
      );
      run_to_zero(&mut timer);
      assert_eq!(timer.mode(), TimerMode::Work);
      assert_eq!(timer.sessions(), expected);
    }

    let effects = run_to_zero(&mut timer);
    assert_eq!(effects.len(), 1);
    assert_eq!(timer.sessions(), 4);
    assert_eq!(
      timer.mode(),
      TimerMode::LongBreak
    );
    assert_eq!(timer.remaining(), 180);
    assert_eq!(timer.session_dots(), vec![
      false, false, false, false
    ]);
  }

  #[test]
  fn manual_switch_resets_without_counting() {
    let mut timer =
      FocusTimer::new(quick_config());
    timer.apply(TimerEvent::Toggle);
    timer.apply(TimerEvent::Tick);
    timer.apply(TimerEvent::Tick);

    timer.apply(TimerEvent::Select(
      TimerMode::LongBreak
    ));
    assert_eq!(
      timer.mode(),
      TimerMode::LongBreak
    );
    assert_eq!(timer.remaining(), 180);
    assert!(!timer.is_running());
    assert_eq!(timer.sessions(), 0);

    timer.apply(TimerEvent::Select(
      TimerMode::Work
    ));
    assert_eq!(timer.remaining(), 120);
    assert_eq!(timer.sessions(), 0);
  }

  #[test]
  fn reset_rearms_current_mode() {
    let mut timer =
      FocusTimer::new(quick_config());
    run_to_zero(&mut timer);
    timer.apply(TimerEvent::Toggle);
    timer.apply(TimerEvent::Tick);
    assert_eq!(timer.remaining(), 59);

    timer.apply(TimerEvent::Reset);
    assert_eq!(
      timer.mode(),
      TimerMode::ShortBreak
    );
    assert_eq!(timer.remaining(), 60);
    assert!(!timer.is_running());
    assert_eq!(timer.sessions(), 1);
  }

  #[test]
  fn progress_and_dots_track_state() {
    let mut timer =
      FocusTimer::new(quick_config());
    timer.apply(TimerEvent::Toggle);
    for _ in 0..30 {
      timer.apply(TimerEvent::Tick);
    }
    assert!((timer.progress() - 0.25).abs() < 1e-9);

    timer.apply(TimerEvent::Reset);
    run_to_zero(&mut timer);
    assert_eq!(timer.session_dots(), vec![
      true, false, false, false
    ]);
  }

  #[test]
  fn clock_is_zero_padded() {
    assert_eq!(format_clock(25 * 60), "25:00");
    assert_eq!(format_clock(65), "01:05");
    assert_eq!(format_clock(0), "00:00");
  }
}
