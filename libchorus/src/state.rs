//! Root state tree and action type
//!
//! Each branch is owned by one feature reducer. Branches are optional so
//! that the initialization pass of [`merge_reducers`] can assemble the tree
//! from the slices each reducer contributes.

use serde::{Deserialize, Serialize};

use crate::error::{ChorusError, Result};
use crate::friend::{self, FriendAction, FriendState};
use crate::redux::{boxed, merge_reducers, ShallowMerge};
use crate::timeline::{self, TimelineAction, TimelineState};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RootState {
    pub friend: Option<FriendState>,
    pub timeline: Option<TimelineState>,
}

impl RootState {
    pub fn friend(&self) -> Result<&FriendState> {
        self.friend
            .as_ref()
            .ok_or(ChorusError::MissingSubState("friend"))
    }

    pub fn timeline(&self) -> Result<&TimelineState> {
        self.timeline
            .as_ref()
            .ok_or(ChorusError::MissingSubState("timeline"))
    }
}

impl ShallowMerge for RootState {
    fn merge_from(&mut self, other: Self) {
        if let Some(friend) = other.friend {
            self.friend = Some(friend);
        }
        if let Some(timeline) = other.timeline {
            self.timeline = Some(timeline);
        }
    }
}

/// Store lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum StoreAction {
    #[serde(rename = "@@INIT")]
    Init,
}

/// Every event the store accepts
///
/// On the wire each event is `{"type": "...", "payload": ...}`, for example
/// `{"type": "friend/setShowLimit", "payload": 4}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Action {
    Store(StoreAction),
    Friend(FriendAction),
    Timeline(TimelineAction),
}

impl Action {
    /// Initialization event
    pub fn init() -> Self {
        Action::Store(StoreAction::Init)
    }
}

impl From<FriendAction> for Action {
    fn from(action: FriendAction) -> Self {
        Action::Friend(action)
    }
}

impl From<TimelineAction> for Action {
    fn from(action: TimelineAction) -> Self {
        Action::Timeline(action)
    }
}

impl std::str::FromStr for Action {
    type Err = ChorusError;

    fn from_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| ChorusError::InvalidEvent(format!("{}: {}", e, s.trim())))
    }
}

/// The application reducer: friend branch, then timeline branch
pub fn root_reducer() -> impl Fn(Option<RootState>, &Action) -> Result<RootState> {
    merge_reducers(vec![boxed(friend::reducer), boxed(timeline::reducer)])
}
