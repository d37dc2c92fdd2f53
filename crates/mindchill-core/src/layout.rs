/// Popups hosted by the container view.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Panel {
  Timer,
  Tasks,
  About,
  Call
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
)]
pub struct Panels {
  timer: bool,
  tasks: bool,
  about: bool,
  call:  bool
}

impl Panels {
  pub fn is_open(self, panel: Panel) -> bool {
    match panel {
      | Panel::Timer => self.timer,
      | Panel::Tasks => self.tasks,
      | Panel::About => self.about,
      | Panel::Call => self.call
    }
  }

  pub fn toggle(self, panel: Panel) -> Self {
    self.with(panel, !self.is_open(panel))
  }

  pub fn open(self, panel: Panel) -> Self {
    self.with(panel, true)
  }

  pub fn close(self, panel: Panel) -> Self {
    self.with(panel, false)
  }

  fn with(
    mut self,
    panel: Panel,
    open: bool
  ) -> Self {
    match panel {
      | Panel::Timer => self.timer = open,
      | Panel::Tasks => self.tasks = open,
      | Panel::About => self.about = open,
      | Panel::Call => self.call = open
    }
    self
  }
}

#[cfg(test)]
mod layout_tests {
  use super::*;

  #[test]
  fn panels_are_independent() {
    let panels = Panels::default()
      .toggle(Panel::Timer)
      .open(Panel::Call);
    assert!(panels.is_open(Panel::Timer));
    assert!(panels.is_open(Panel::Call));
    assert!(!panels.is_open(Panel::Tasks));

    let panels = panels
      .toggle(Panel::Timer)
      .open(Panel::Call)
      .close(Panel::About);
    assert!(!panels.is_open(Panel::Timer));
    assert!(panels.is_open(Panel::Call));
    assert!(!panels.is_open(Panel::About));
  }
}
