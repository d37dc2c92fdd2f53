//! Widget state machines for the Mind Chill page.
//!
//! Every widget keeps its state in a plain value type with a transition
//! function that returns the side effects to perform. The browser frontend
//! owns the collaborators (embed player, peer endpoint, capture device,
//! local storage) and executes those effects.

pub mod ambience;
pub mod call;
pub mod config;
pub mod error;
pub mod layout;
pub mod storage;
pub mod timer;
pub mod todo;

pub use config::AppConfig;
pub use error::{
  CallFault,
  StorageError
};
