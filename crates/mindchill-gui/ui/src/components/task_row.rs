use mindchill_core::todo::{
  TaskId,
  TaskRecord
};
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskRowProps {
  pub task:      TaskRecord,
  pub on_toggle: Callback<TaskId>,
  pub on_delete: Callback<TaskId>
}

#[function_component(TaskRow)]
pub fn task_row(props: &TaskRowProps) -> Html {
  let id = props.task.id;
  let completed = props.task.completed;
  let on_toggle = props.on_toggle.clone();
  let on_delete = props.on_delete.clone();
  let toggle_label = if completed {
    "Mark as incomplete"
  } else {
    "Mark as complete"
  };

  html! {
      <li class={classes!("todo-item", completed.then_some("completed"))}>
          <button class="checkbox" type="button" onclick={move |_| on_toggle.emit(id)} aria-label={toggle_label}>
              {
                  if completed {
                      html! { <span class="checkmark">{ "✓" }</span> }
                  } else {
                      html! {}
                  }
              }
          </button>
          <span class="todo-text">{ &props.task.text }</span>
          <button class="delete-btn" type="button" onclick={move |_| on_delete.emit(id)} aria-label="Delete task">{ "🗑️" }</button>
      </li>
  }
}
