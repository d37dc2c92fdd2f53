use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

const PROFILE_URL: &str =
  "https://github.com/Sij4n?tab=overview&from=2025-10-01&to=2025-10-31";

#[derive(Properties, PartialEq)]
pub struct HeaderBarProps {
  pub on_toggle_timer: Callback<MouseEvent>,
  pub on_toggle_tasks: Callback<MouseEvent>,
  pub on_open_about:   Callback<MouseEvent>,
  pub on_open_call:    Callback<MouseEvent>
}

#[function_component(HeaderBar)]
pub fn header_bar(
  props: &HeaderBarProps
) -> Html {
  html! {
      <header class="header-overlay">
          <div class="logo">
              <span class="logo-text">{ "Mind Chill" }</span>
          </div>
          <div class="icon-panel">
              <button class="icon-btn" type="button" onclick={props.on_toggle_timer.clone()} title="Pomodoro Timer">
                  <svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
                      <circle cx="12" cy="12" r="10" />
                      <polyline points="12,6 12,12 16,14" />
                  </svg>
              </button>
              <button class="icon-btn" type="button" onclick={props.on_toggle_tasks.clone()} title="Todo List">
                  <svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
                      <rect x="3" y="3" width="18" height="18" rx="2" />
                      <path d="M9 12l2 2 4-4" />
                  </svg>
              </button>
              <button class="icon-btn" type="button" onclick={props.on_open_about.clone()} title="About Project">
                  <svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
                      <circle cx="12" cy="12" r="10" />
                      <line x1="12" y1="16" x2="12" y2="12" />
                      <line x1="12" y1="8" x2="12.01" y2="8" />
                  </svg>
              </button>
              <button class="icon-btn" type="button" onclick={props.on_open_call.clone()} title="Study With Me">
                  <svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
                      <rect x="2" y="5" width="14" height="14" rx="2" />
                      <path d="M16 10l6-4v12l-6-4v-4z" />
                  </svg>
              </button>
              <a class="icon-btn" href={PROFILE_URL} target="_blank" rel="noopener noreferrer" title="GitHub">
                  <svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
                      <path d="M9 19c-5 1.5-5-2.5-7-3m14 6v-3.87a3.37 3.37 0 0 0-.94-2.61c3.14-.35 6.44-1.54 6.44-7A5.44 5.44 0 0 0 20 4.77 5.07 5.07 0 0 0 19.91 1S18.73.65 16 2.48a13.38 13.38 0 0 0-7 0C6.27.65 5.09 1 5.09 1A5.07 5.07 0 0 0 5 4.77a5.44 5.44 0 0 0-1.5 3.78c0 5.42 3.3 6.61 6.44 7A3.37 3.37 0 0 0 9 18.13V22" />
                  </svg>
              </a>
          </div>
      </header>
  }
}
