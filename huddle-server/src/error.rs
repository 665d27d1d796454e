use huddle_core::{ErrorReason, SessionId};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoordinatorError {
    #[error("room {0} not found")]
    RoomNotFound(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Expected race with a disconnect; never reported to clients.
    #[error("session {0} is unreachable")]
    TargetUnreachable(SessionId),
}

impl CoordinatorError {
    /// Reason code sent back to the requester, if this error is reportable at all.
    pub fn reason(&self) -> Option<ErrorReason> {
        match self {
            CoordinatorError::RoomNotFound(_) => Some(ErrorReason::RoomNotFound),
            CoordinatorError::InvalidRequest(_) => Some(ErrorReason::InvalidRequest),
            CoordinatorError::TargetUnreachable(_) => None,
        }
    }
}
