//! Timeline feed feature
//!
//! Entries are appended and never removed; only their like counter changes.
//! `RequestLike` and `TrySetText` are intents: the reducer validates them,
//! and the effect runner turns them into the follow-up actions.

pub mod reducer;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{ChorusError, Result};
use crate::state::RootState;

pub use reducer::{reduce, reducer};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub id: u64,
    pub desc: String,
    #[serde(default)]
    pub like_count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineState {
    pub timelines: Arc<Vec<TimelineEntry>>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub text: String,
}

/// Events owned by the timeline branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum TimelineAction {
    #[serde(rename = "timeline/addTimeline")]
    AddTimeline(TimelineEntry),

    /// Intent: like an entry (optimistic, mocked request)
    #[serde(rename = "timeline/requestLike")]
    RequestLike { id: u64 },

    #[serde(rename = "timeline/addLike")]
    AddLike { id: u64, value: i64 },

    #[serde(rename = "timeline/setLoading")]
    SetLoading(bool),

    #[serde(rename = "timeline/setError")]
    SetError(Option<String>),

    /// Intent: text typed by the user, committed after a quiet period
    #[serde(rename = "timeline/trySetText")]
    TrySetText(String),

    #[serde(rename = "timeline/setText")]
    SetText(String),
}

pub fn get_timelines(state: &RootState) -> Result<Arc<Vec<TimelineEntry>>> {
    state
        .timeline
        .as_ref()
        .map(|timeline| Arc::clone(&timeline.timelines))
        .ok_or(ChorusError::MissingSubState("timeline"))
}
