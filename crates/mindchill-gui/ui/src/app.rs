use gloo::console::log;
use mindchill_core::AppConfig;
use mindchill_core::layout::{
  Panel,
  Panels
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  function_component,
  html,
  use_effect_with,
  use_state
};

use crate::components::{
  AboutPanel,
  AmbiencePlayer,
  CallPanel,
  FocusTimerPanel,
  HeaderBar,
  Popup,
  TaskListPanel
};

#[function_component(App)]
pub fn app() -> Html {
  let config = use_state(AppConfig::load);
  let panels = use_state(Panels::default);

  {
    let config = config.clone();
    use_effect_with((), move |_| {
      ui_debug(
        "app.mounted",
        &format!(
          "config v{} streams={} backdrops={}",
          config.version,
          config.streams.len(),
          config.backdrops.len()
        )
      );
      || ()
    });
  }

  let toggle = |panel: Panel| {
    let panels = panels.clone();
    Callback::from(move |_: MouseEvent| {
      let next = panels.toggle(panel);
      ui_debug(
        "panel.toggle",
        &format!(
          "{panel:?} open={}",
          next.is_open(panel)
        )
      );
      panels.set(next);
    })
  };
  let open = |panel: Panel| {
    let panels = panels.clone();
    Callback::from(move |_: MouseEvent| {
      panels.set(panels.open(panel))
    })
  };
  let close = |panel: Panel| {
    let panels = panels.clone();
    Callback::from(move |_: MouseEvent| {
      panels.set(panels.close(panel))
    })
  };

  html! {
      <div class="app">
          <AmbiencePlayer
              streams={config.streams.clone()}
              backdrops={config.backdrops.clone()}
          />

          <HeaderBar
              on_toggle_timer={toggle(Panel::Timer)}
              on_toggle_tasks={toggle(Panel::Tasks)}
              on_open_about={open(Panel::About)}
              on_open_call={open(Panel::Call)}
          />

          {
              if panels.is_open(Panel::Timer) {
                  html! {
                      <Popup on_close={close(Panel::Timer)}>
                          <FocusTimerPanel timer={config.timer.clone()} chime={config.chime.clone()} />
                      </Popup>
                  }
              } else {
                  html! {}
              }
          }

          {
              if panels.is_open(Panel::Tasks) {
                  html! {
                      <Popup on_close={close(Panel::Tasks)}>
                          <TaskListPanel storage_key={config.storage.tasks_key.clone()} />
                      </Popup>
                  }
              } else {
                  html! {}
              }
          }

          {
              if panels.is_open(Panel::About) {
                  html! {
                      <Popup class="about-popup" on_close={close(Panel::About)}>
                          <AboutPanel />
                      </Popup>
                  }
              } else {
                  html! {}
              }
          }

          {
              if panels.is_open(Panel::Call) {
                  html! {
                      <CallPanel room_id_len={config.call.room_id_len} on_close={close(Panel::Call)} />
                  }
              } else {
                  html! {}
              }
          }
      </div>
  }
}

pub fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}
