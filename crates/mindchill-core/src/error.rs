use thiserror::Error;

/// Reasons a call session ends up in the error state.
#[derive(
  Debug, Clone, PartialEq, Eq, Error,
)]
pub enum CallFault {
  #[error(
    "camera or microphone unavailable: \
     {0}"
  )]
  CaptureUnavailable(String),
  #[error(
    "failed to register room endpoint: \
     {0}"
  )]
  RegistrationFailed(String),
  #[error("call transport failed: {0}")]
  Transport(String)
}

#[derive(
  Debug, Clone, PartialEq, Eq, Error,
)]
pub enum StorageError {
  #[error("storage backend unavailable")]
  Unavailable,
  #[error(
    "failed writing key {key}: {reason}"
  )]
  Write {
    key:    String,
    reason: String
  },
  #[error(
    "failed encoding value for {key}: \
     {reason}"
  )]
  Encode {
    key:    String,
    reason: String
  }
}
