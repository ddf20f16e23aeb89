//! Error types for pagegrant

use thiserror::Error;

use crate::group::GroupId;

/// The main error type for pagegrant operations
#[derive(Debug, Error)]
pub enum AccessError {
    /// Inheriting was requested for a page that has no parent to inherit from.
    #[error("cannot inherit access: page has no parent")]
    InheritWithoutParent,

    #[error("group {0} is not in the directory")]
    UnknownGroup(GroupId),

    /// Edit access requires view access first.
    #[error("group {0} has no view access")]
    NotGranted(GroupId),

    #[error("group {0} already has access and cannot be chosen")]
    NotSelectable(GroupId),

    /// Grants can only change while access is managed on this page.
    #[error("access is inherited from the parent page and cannot be edited")]
    ReadOnly,

    #[error("failed to read access data: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed access data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to render widget: {0}")]
    Render(#[from] tera::Error),

    #[error("invalid event: {0}")]
    Event(String),
}

/// Result type alias for pagegrant operations
pub type Result<T> = std::result::Result<T, AccessError>;
