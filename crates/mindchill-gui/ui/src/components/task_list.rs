use chrono::Utc;
use mindchill_core::todo::{
  TaskBook,
  TaskFilter,
  TaskId,
  TaskOp
};
use yew::{
  Callback,
  Html,
  Properties,
  SubmitEvent,
  TargetCast,
  classes,
  function_component,
  html,
  use_state
};

use super::TaskRow;
use crate::app::ui_debug;
use crate::storage::LocalStorage;

#[derive(Properties, PartialEq)]
pub struct TaskListPanelProps {
  pub storage_key: String
}

#[function_component(TaskListPanel)]
pub fn task_list_panel(
  props: &TaskListPanelProps
) -> Html {
  let book = {
    let key = props.storage_key.clone();
    use_state(move || {
      TaskBook::load(&LocalStorage, &key)
    })
  };
  let draft = use_state(String::new);
  let filter = use_state(TaskFilter::default);

  let apply = {
    let book = book.clone();
    Callback::from(move |op: TaskOp| {
      let mut next = (*book).clone();
      if next.apply(op, &LocalStorage, Utc::now())
      {
        book.set(next);
      }
    })
  };

  let on_submit = {
    let draft = draft.clone();
    let apply = apply.clone();
    Callback::from(move |e: SubmitEvent| {
      e.prevent_default();
      let text = (*draft).clone();
      if text.trim().is_empty() {
        return;
      }
      ui_debug(
        "tasks.add",
        &format!("len={}", text.trim().len())
      );
      apply.emit(TaskOp::Add(text));
      draft.set(String::new());
    })
  };

  let on_input = {
    let draft = draft.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        draft.set(input.value());
      }
    )
  };

  let on_toggle = {
    let apply = apply.clone();
    Callback::from(move |id: TaskId| {
      apply.emit(TaskOp::Toggle(id))
    })
  };
  let on_delete = {
    let apply = apply.clone();
    Callback::from(move |id: TaskId| {
      apply.emit(TaskOp::Delete(id))
    })
  };
  let on_clear = {
    let apply = apply.clone();
    Callback::from(move |_| {
      apply.emit(TaskOp::ClearCompleted)
    })
  };

  let counts = book.counts();
  let visible = book.visible(*filter);

  html! {
      <div class="todo-list glass-card">
          <div class="todo-header">
              <h2>{ "✅ To-Do List" }</h2>
              <div class="todo-stats">
                  <span>{ format!("{}/{}", counts.completed, counts.total) }</span>
              </div>
          </div>

          {
              if counts.total > 0 {
                  html! {
                      <div class="progress-bar-container">
                          <div class="progress-bar-fill" style={format!("width: {}%;", book.progress_percent())} />
                      </div>
                  }
              } else {
                  html! {}
              }
          }

          <form class="add-todo-form" onsubmit={on_submit}>
              <input
                  type="text"
                  class="todo-input"
                  placeholder="What needs to be done?"
                  value={(*draft).clone()}
                  oninput={on_input}
              />
              <button type="submit" class="add-btn" disabled={draft.trim().is_empty()}>{ "➕" }</button>
          </form>

          <div class="filter-tabs">
              {
                  for TaskFilter::all().into_iter().map(|option| {
                      let filter = filter.clone();
                      let active = *filter == option;
                      html! {
                          <button
                              key={option.as_key()}
                              class={classes!("filter-tab", active.then_some("active"))}
                              type="button"
                              onclick={move |_| filter.set(option)}
                          >
                              { option.label() }
                          </button>
                      }
                  })
              }
          </div>

          <ul class="todo-items">
              {
                  if visible.is_empty() {
                      html! { <li class="empty-state">{ filter.empty_message() }</li> }
                  } else {
                      html! {
                          <>
                              {
                                  for visible.into_iter().cloned().map(|task| html! {
                                      <TaskRow
                                          key={task.id}
                                          task={task}
                                          on_toggle={on_toggle.clone()}
                                          on_delete={on_delete.clone()}
                                      />
                                  })
                              }
                          </>
                      }
                  }
              }
          </ul>

          {
              if counts.completed > 0 {
                  html! {
                      <button class="clear-btn" type="button" onclick={on_clear}>
                          { format!("🧹 Clear completed ({})", counts.completed) }
                      </button>
                  }
              } else {
                  html! {}
              }
          }
      </div>
  }
}
