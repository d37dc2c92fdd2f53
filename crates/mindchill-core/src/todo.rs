use chrono::{
  DateTime,
  Utc
};
use serde::{
  Deserialize,
  Serialize
};
use tracing::{
  debug,
  error,
  warn
};

use crate::error::StorageError;
use crate::storage::KeyValueStore;

pub type TaskId = i64;

/// One to-do entry, in the layout kept
/// under the tasks storage key.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct TaskRecord {
  pub id:         TaskId,
  pub text:       String,
  #[serde(default)]
  pub completed:  bool,
  #[serde(rename = "createdAt")]
  pub created_at: DateTime<Utc>
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
)]
pub enum TaskFilter {
  #[default]
  All,
  Active,
  Completed
}

impl TaskFilter {
  pub fn all() -> [Self; 3] {
    [Self::All, Self::Active, Self::Completed]
  }

  pub fn as_key(self) -> &'static str {
    match self {
      | Self::All => "all",
      | Self::Active => "active",
      | Self::Completed => "completed"
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | Self::All => "All",
      | Self::Active => "Active",
      | Self::Completed => "Completed"
    }
  }

  pub fn matches(
    self,
    task: &TaskRecord
  ) -> bool {
    match self {
      | Self::All => true,
      | Self::Active => !task.completed,
      | Self::Completed => task.completed
    }
  }

  pub fn empty_message(
    self
  ) -> &'static str {
    match self {
      | Self::All => {
        "🎯 Add your first task!"
      }
      | Self::Active => {
        "🎉 All tasks completed!"
      }
      | Self::Completed => {
        "📝 No completed tasks yet"
      }
    }
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub enum TaskOp {
  Add(String),
  Toggle(TaskId),
  Delete(TaskId),
  ClearCompleted
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
)]
pub struct TaskCounts {
  pub completed: usize,
  pub total:     usize
}

/// The task collection, newest first.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct TaskBook {
  key:   String,
  tasks: Vec<TaskRecord>
}

impl TaskBook {
  pub fn empty(key: &str) -> Self {
    Self {
      key:   key.to_string(),
      tasks: Vec::new()
    }
  }

  /// Rehydrates the collection stored
  /// under `key`. Missing or unreadable
  /// data yields an empty book.
  #[tracing::instrument(skip(store))]
  pub fn load(
    store: &dyn KeyValueStore,
    key: &str
  ) -> Self {
    let Some(raw) = store.get(key) else {
      debug!(
        "no stored tasks; starting empty"
      );
      return Self::empty(key);
    };

    match decode_tasks(&raw) {
      | Ok(tasks) => {
        debug!(
          task_count = tasks.len(),
          "loaded tasks from storage"
        );
        Self {
          key: key.to_string(),
          tasks
        }
      }
      | Err(error) => {
        error!(
          %error,
          "failed parsing stored tasks; \
           starting empty"
        );
        Self::empty(key)
      }
    }
  }

  pub fn key(&self) -> &str {
    &self.key
  }

  pub fn tasks(&self) -> &[TaskRecord] {
    &self.tasks
  }

  pub fn is_empty(&self) -> bool {
    self.tasks.is_empty()
  }

  /// Applies `op` and, when it changed
  /// anything, writes the whole
  /// collection back to `store`. Returns
  /// whether the collection changed.
  #[tracing::instrument(skip(self, store, now), fields(key = %self.key))]
  pub fn apply(
    &mut self,
    op: TaskOp,
    store: &dyn KeyValueStore,
    now: DateTime<Utc>
  ) -> bool {
    let changed = match op {
      | TaskOp::Add(text) => {
        self.add(&text, now)
      }
      | TaskOp::Toggle(id) => {
        self.toggle(id)
      }
      | TaskOp::Delete(id) => {
        self.delete(id)
      }
      | TaskOp::ClearCompleted => {
        self.clear_completed()
      }
    };

    if changed
      && let Err(error) = self.save(store)
    {
      warn!(
        %error,
        "failed persisting tasks; keeping \
         in-memory state"
      );
    }

    changed
  }

  pub fn save(
    &self,
    store: &dyn KeyValueStore
  ) -> Result<(), StorageError> {
    let json = encode_tasks(&self.tasks)
      .map_err(|error| {
        StorageError::Encode {
          key:    self.key.clone(),
          reason: error.to_string()
        }
      })?;
    store.set(&self.key, &json)
  }

  pub fn visible(
    &self,
    filter: TaskFilter
  ) -> Vec<&TaskRecord> {
    self
      .tasks
      .iter()
      .filter(|task| filter.matches(task))
      .collect()
  }

  pub fn counts(&self) -> TaskCounts {
    TaskCounts {
      completed: self
        .tasks
        .iter()
        .filter(|task| task.completed)
        .count(),
      total:     self.tasks.len()
    }
  }

  pub fn progress_percent(&self) -> f64 {
    let counts = self.counts();
    if counts.total == 0 {
      return 0.0;
    }
    counts.completed as f64 * 100.0
      / counts.total as f64
  }

  fn add(
    &mut self,
    text: &str,
    now: DateTime<Utc>
  ) -> bool {
    let text = text.trim();
    if text.is_empty() {
      return false;
    }

    let id = self.next_id(now);
    self.tasks.insert(0, TaskRecord {
      id,
      text: text.to_string(),
      completed: false,
      created_at: now
    });
    debug!(id, "added task");
    true
  }

  fn toggle(&mut self, id: TaskId) -> bool {
    match self
      .tasks
      .iter_mut()
      .find(|task| task.id == id)
    {
      | Some(task) => {
        task.completed = !task.completed;
        debug!(
          id,
          completed = task.completed,
          "toggled task"
        );
        true
      }
      | None => false
    }
  }

  fn delete(&mut self, id: TaskId) -> bool {
    let before = self.tasks.len();
    self.tasks.retain(|task| task.id != id);
    self.tasks.len() != before
  }

  fn clear_completed(&mut self) -> bool {
    let before = self.tasks.len();
    self.tasks.retain(|task| !task.completed);
    let removed = before - self.tasks.len();
    if removed > 0 {
      debug!(removed, "cleared completed tasks");
    }
    removed > 0
  }

  // Clock based, bumped past the newest
  // id when the clock has not moved.
  fn next_id(
    &self,
    now: DateTime<Utc>
  ) -> TaskId {
    let stamp = now.timestamp_millis();
    match self
      .tasks
      .iter()
      .map(|task| task.id)
      .max()
    {
      | Some(max) if stamp <= max => {
        max.saturating_add(1)
      }
      | _ => stamp
    }
  }
}

pub fn encode_tasks(
  tasks: &[TaskRecord]
) -> serde_json::Result<String> {
  serde_json::to_string(tasks)
}

pub fn decode_tasks(
  raw: &str
) -> serde_json::Result<Vec<TaskRecord>> {
  serde_json::from_str(raw)
}
