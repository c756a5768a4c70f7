//! Driving port for note listing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, NoteFilterParams, UserId};

/// One entry of a listing response.
///
/// `belongs_to_current_user` is only ever `Some(true)`; it is omitted from
/// the JSON otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListedNote {
    pub title: String,
    pub text: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub belongs_to_current_user: Option<bool>,
}

/// Driving port for note read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteQuery: Send + Sync {
    /// List notes matching `filters` on behalf of `requester`.
    async fn list_notes(
        &self,
        requester: UserId,
        filters: NoteFilterParams,
    ) -> Result<Vec<ListedNote>, Error>;
}
