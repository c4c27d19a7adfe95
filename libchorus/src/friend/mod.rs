//! Friend list feature
//!
//! Friends are appended and never changed or removed. The branch also holds
//! how many friends a list view shows at most.

pub mod reducer;
pub mod selector;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub use reducer::{reduce, reducer};
pub use selector::{
    get_age_limit, get_friends, get_show_limit, make_get_friends_with_age_limit,
    make_get_friends_with_age_show_limit, FriendProps, FriendsView,
};

/// Show limit of a freshly initialized branch
pub const DEFAULT_SHOW_LIMIT: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
    pub id: u64,
    pub name: String,
    pub age: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendState {
    pub friends: Arc<Vec<Friend>>,
    pub show_limit: usize,
}

impl Default for FriendState {
    fn default() -> Self {
        Self {
            friends: Arc::new(Vec::new()),
            show_limit: DEFAULT_SHOW_LIMIT,
        }
    }
}

/// Events owned by the friend branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum FriendAction {
    #[serde(rename = "friend/addFriend")]
    AddFriend(Friend),

    #[serde(rename = "friend/setShowLimit")]
    SetShowLimit(usize),
}
